#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use api_types::{
    AccountId, Amount, BudgetId, CategoryId, TransactionId, UserId,
    account::{Account, AccountNew},
    budget::{Budget, BudgetNew},
    category::{Category, CategoryKind, CategoryNew},
    dashboard::{BudgetSummary, CategoryTotal, MonthTotal, Summary},
    transaction::{Transaction, TransactionNew},
    user::{Login, SignupNew, User},
};
use client::{Backend, ClientError, Result};

#[derive(Debug, Default)]
pub struct FakeState {
    pub users: Vec<(User, String)>,
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
    pub summary: Option<Summary>,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
    pub budget_summary: Vec<BudgetSummary>,
    next_id: i64,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id + 100
    }
}

/// In-memory backend that records how often each operation was called.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failing: Mutex<HashSet<&'static str>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call to `op` fail with a 500 and no detail.
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn heal(&self, op: &'static str) {
        self.failing.lock().unwrap().remove(op);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    pub fn with_state(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    fn record(&self, op: &'static str) -> Result<()> {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
        if self.failing.lock().unwrap().contains(op) {
            return Err(ClientError::from_status(500, None));
        }
        Ok(())
    }
}

pub fn user(id: UserId) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        created_at: "2024-01-01T00:00:00".to_string(),
    }
}

pub fn account(id: AccountId, user_id: UserId, name: &str, cents: i64) -> Account {
    Account {
        id,
        name: name.to_string(),
        kind: "checking".to_string(),
        description: None,
        starting_balance: Amount::from_cents(cents),
        current_balance: Amount::from_cents(cents),
        user_id,
        created_at: None,
    }
}

pub fn category(id: CategoryId, user_id: UserId, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        kind: CategoryKind::Expense,
        description: None,
        user_id,
        created_at: None,
    }
}

pub fn total(name: &str, cents: i64) -> CategoryTotal {
    CategoryTotal {
        category: name.to_string(),
        total: Amount::from_cents(cents),
    }
}

impl Backend for FakeBackend {
    async fn signup(&self, payload: &SignupNew) -> Result<User> {
        self.record("signup")?;
        let mut state = self.state.lock().unwrap();
        if state
            .users
            .iter()
            .any(|(user, _)| user.username == payload.username || user.email == payload.email)
        {
            return Err(ClientError::from_status(
                400,
                Some("Username or email already taken".to_string()),
            ));
        }
        let id = state.next_id();
        let created = User {
            id,
            username: payload.username.clone(),
            email: payload.email.clone(),
            created_at: "2024-01-01T00:00:00".to_string(),
        };
        state.users.push((created.clone(), payload.password.clone()));
        Ok(created)
    }

    async fn login(&self, payload: &Login) -> Result<User> {
        self.record("login")?;
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|(user, password)| {
                let identity = payload.email.as_deref() == Some(user.email.as_str())
                    || payload.username.as_deref() == Some(user.username.as_str());
                identity && *password == payload.password
            })
            .map(|(user, _)| user.clone())
            .ok_or_else(|| ClientError::from_status(401, Some("Invalid credentials".to_string())))
    }

    async fn list_accounts(&self, user_id: UserId) -> Result<Vec<Account>> {
        self.record("list_accounts")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .accounts
            .iter()
            .filter(|account| account.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_account(&self, payload: &AccountNew) -> Result<Account> {
        self.record("create_account")?;
        let mut state = self.state.lock().unwrap();
        let created = Account {
            id: state.next_id(),
            name: payload.name.clone(),
            kind: payload.kind.clone(),
            description: payload.description.clone(),
            starting_balance: payload.starting_balance,
            current_balance: payload.starting_balance,
            user_id: payload.user_id,
            created_at: None,
        };
        state.accounts.push(created.clone());
        Ok(created)
    }

    async fn delete_account(&self, id: AccountId) -> Result<()> {
        self.record("delete_account")?;
        let mut state = self.state.lock().unwrap();
        let before = state.accounts.len();
        state.accounts.retain(|account| account.id != id);
        if state.accounts.len() == before {
            return Err(ClientError::from_status(404, Some("Account not found".to_string())));
        }
        Ok(())
    }

    async fn list_categories(&self, user_id: UserId) -> Result<Vec<Category>> {
        self.record("list_categories")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .categories
            .iter()
            .filter(|category| category.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_category(&self, payload: &CategoryNew) -> Result<Category> {
        self.record("create_category")?;
        let mut state = self.state.lock().unwrap();
        let created = Category {
            id: state.next_id(),
            name: payload.name.clone(),
            kind: payload.kind,
            description: None,
            user_id: payload.user_id,
            created_at: None,
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<()> {
        self.record("delete_category")?;
        self.state
            .lock()
            .unwrap()
            .categories
            .retain(|category| category.id != id);
        Ok(())
    }

    async fn list_budgets(&self, user_id: UserId) -> Result<Vec<Budget>> {
        self.record("list_budgets")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .budgets
            .iter()
            .filter(|budget| budget.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_budget(&self, payload: &BudgetNew) -> Result<Budget> {
        self.record("create_budget")?;
        let mut state = self.state.lock().unwrap();
        let created = Budget {
            id: state.next_id(),
            name: payload.name.clone(),
            target_amount: payload.target_amount,
            period: payload.period.clone(),
            user_id: payload.user_id,
            category_id: payload.category_id,
            current_spent: Amount::ZERO,
            remaining: payload.target_amount,
            created_at: None,
        };
        state.budgets.push(created.clone());
        Ok(created)
    }

    async fn delete_budget(&self, id: BudgetId) -> Result<()> {
        self.record("delete_budget")?;
        self.state
            .lock()
            .unwrap()
            .budgets
            .retain(|budget| budget.id != id);
        Ok(())
    }

    async fn list_transactions(&self, user_id: UserId, limit: u32) -> Result<Vec<Transaction>> {
        self.record("list_transactions")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .transactions
            .iter()
            .filter(|transaction| transaction.user_id == user_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create_transaction(&self, payload: &TransactionNew) -> Result<Transaction> {
        self.record("create_transaction")?;
        let mut state = self.state.lock().unwrap();
        let created = Transaction {
            id: state.next_id(),
            amount: payload.amount,
            date: payload.date,
            description: payload.description.clone(),
            is_income: payload.is_income,
            user_id: payload.user_id,
            account_id: payload.account_id,
            category_id: payload.category_id,
            created_at: None,
        };
        state.transactions.push(created.clone());
        Ok(created)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<()> {
        self.record("delete_transaction")?;
        self.state
            .lock()
            .unwrap()
            .transactions
            .retain(|transaction| transaction.id != id);
        Ok(())
    }

    async fn dashboard_summary(&self, _user_id: UserId) -> Result<Summary> {
        self.record("dashboard_summary")?;
        let state = self.state.lock().unwrap();
        Ok(state.summary.clone().unwrap_or(Summary {
            income: Amount::ZERO,
            expenses: Amount::ZERO,
            net: None,
            month: None,
        }))
    }

    async fn dashboard_by_category(&self, _user_id: UserId) -> Result<Vec<CategoryTotal>> {
        self.record("dashboard_by_category")?;
        Ok(self.state.lock().unwrap().by_category.clone())
    }

    async fn dashboard_by_month(&self, _user_id: UserId) -> Result<Vec<MonthTotal>> {
        self.record("dashboard_by_month")?;
        Ok(self.state.lock().unwrap().by_month.clone())
    }

    async fn dashboard_budget_summary(&self, _user_id: UserId) -> Result<Vec<BudgetSummary>> {
        self.record("dashboard_budget_summary")?;
        Ok(self.state.lock().unwrap().budget_summary.clone())
    }
}
