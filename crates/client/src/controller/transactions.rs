use api_types::{
    AccountId, Amount, CategoryId, TransactionId, UserId,
    account::Account,
    category::{Category, CategoryNew},
    transaction::{Transaction, TransactionNew},
};
use chrono::NaiveDate;

use super::{InlineCategory, Page, Ticket, adopt_category, cycle_id, step};
use crate::{error::Result, remote::Backend};

pub const LOAD_ERROR: &str = "Failed to load transactions/accounts/categories.";
pub const CREATE_ERROR: &str = "Failed to create transaction.";
pub const DELETE_ERROR: &str = "Failed to delete transaction.";

pub const DEFAULT_LIMIT: u32 = 100;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Default, PartialEq)]
pub struct TransactionsData {
    pub transactions: Vec<Transaction>,
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
}

impl TransactionsData {
    pub fn account_name(&self, id: AccountId) -> Option<&str> {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .map(|account| account.name.as_str())
    }

    pub fn category_name(&self, id: Option<CategoryId>) -> Option<&str> {
        let id = id?;
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionField {
    #[default]
    Amount,
    Date,
    Description,
    Income,
    Account,
    Category,
}

#[derive(Debug)]
pub struct TransactionForm {
    pub amount: String,
    /// `YYYY-MM-DD`, today by default.
    pub date: String,
    pub description: String,
    pub is_income: bool,
    pub account_id: Option<AccountId>,
    pub category_id: Option<CategoryId>,
    pub focus: TransactionField,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            date: today(),
            description: String::new(),
            is_income: false,
            account_id: None,
            category_id: None,
            focus: TransactionField::default(),
        }
    }
}

fn today() -> String {
    chrono::Local::now()
        .date_naive()
        .format(DATE_FORMAT)
        .to_string()
}

impl TransactionForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            TransactionField::Amount => TransactionField::Date,
            TransactionField::Date => TransactionField::Description,
            TransactionField::Description => TransactionField::Income,
            TransactionField::Income => TransactionField::Account,
            TransactionField::Account => TransactionField::Category,
            TransactionField::Category => TransactionField::Amount,
        };
    }

    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            TransactionField::Amount => Some(&mut self.amount),
            TransactionField::Date => Some(&mut self.date),
            TransactionField::Description => Some(&mut self.description),
            TransactionField::Income | TransactionField::Account | TransactionField::Category => {
                None
            }
        }
    }

    pub fn cycle_choice(&mut self, data: &TransactionsData, forward: bool) {
        match self.focus {
            TransactionField::Income => self.is_income = !self.is_income,
            TransactionField::Account => {
                let ids: Vec<AccountId> = data.accounts.iter().map(|account| account.id).collect();
                self.account_id = cycle_id(&ids, self.account_id, forward);
            }
            TransactionField::Category => {
                let ids: Vec<CategoryId> =
                    data.categories.iter().map(|category| category.id).collect();
                self.category_id = cycle_id(&ids, self.category_id, forward);
            }
            TransactionField::Amount | TransactionField::Date | TransactionField::Description => {}
        }
    }

    pub fn payload(&self, user_id: UserId) -> std::result::Result<TransactionNew, String> {
        let amount = self.amount.trim();
        let date = self.date.trim();
        let account_id = self
            .account_id
            .filter(|_| !amount.is_empty() && !date.is_empty())
            .ok_or_else(|| "Amount, date and account are required.".to_string())?;
        let amount = amount
            .parse::<Amount>()
            .map_err(|err| format!("Amount: {err}"))?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| "Date must be YYYY-MM-DD.".to_string())?;
        let description = self.description.trim();
        Ok(TransactionNew {
            amount,
            date,
            description: (!description.is_empty()).then(|| description.to_string()),
            is_income: self.is_income,
            user_id,
            account_id,
            category_id: self.category_id,
        })
    }

    /// Clears the entry fields; date and account carry over to the next entry.
    pub fn reset(&mut self) {
        self.amount.clear();
        self.description.clear();
        self.is_income = false;
        self.category_id = None;
        self.focus = TransactionField::Amount;
    }
}

#[derive(Debug)]
pub struct TransactionsController {
    pub page: Page<TransactionsData>,
    pub form: TransactionForm,
    pub inline: InlineCategory,
    pub selected: usize,
    limit: u32,
}

impl Default for TransactionsController {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl TransactionsController {
    pub fn new(limit: u32) -> Self {
        Self {
            page: Page::default(),
            form: TransactionForm::default(),
            inline: InlineCategory::default(),
            selected: 0,
            limit,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub async fn fetch<B: Backend>(
        backend: &B,
        user_id: UserId,
        limit: u32,
    ) -> Result<TransactionsData> {
        let (transactions, accounts, categories) = tokio::try_join!(
            backend.list_transactions(user_id, limit),
            backend.list_accounts(user_id),
            backend.list_categories(user_id),
        )?;
        Ok(TransactionsData {
            transactions,
            accounts,
            categories,
        })
    }

    pub fn data(&self) -> &TransactionsData {
        self.page.data()
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.data().transactions.get(self.selected)
    }

    pub fn select(&mut self, forward: bool) {
        self.selected = step(self.selected, self.data().transactions.len(), forward);
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        let data = self.page.data();
        self.form.cycle_choice(data, forward);
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<TransactionsData>) -> bool {
        let applied = self.page.finish_load(ticket, result, LOAD_ERROR);
        let len = self.data().transactions.len();
        self.selected = self.selected.min(len.saturating_sub(1));
        applied
    }

    pub fn begin_create(&mut self) -> Option<(Ticket, TransactionNew)> {
        if !self.page.can_submit() {
            return None;
        }
        let user_id = self.page.user_id()?;
        match self.form.payload(user_id) {
            Ok(payload) => Some((self.page.begin_submit()?, payload)),
            Err(message) => {
                self.page.reject(message);
                None
            }
        }
    }

    pub fn finish_create(&mut self, ticket: Ticket, result: Result<Transaction>) -> Option<Ticket> {
        let reload = self.page.finish_submit(ticket, result, CREATE_ERROR);
        if reload.is_some() {
            self.form.reset();
        }
        reload
    }

    pub fn begin_delete(&mut self) -> Option<(Ticket, TransactionId)> {
        let id = self.selected_transaction()?.id;
        Some((self.page.begin_submit()?, id))
    }

    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<()>) -> Option<Ticket> {
        self.page.finish_submit(ticket, result, DELETE_ERROR)
    }

    pub fn begin_inline_category(&mut self) -> Option<(Ticket, CategoryNew)> {
        self.inline.begin(&self.page)
    }

    pub fn finish_inline_category(&mut self, ticket: Ticket, result: Result<Category>) {
        let accepted = self.page.same_mount(ticket);
        if let Some(created) = self.inline.finish(accepted, result) {
            let categories = &mut self.page.data_mut().categories;
            adopt_category(categories, &mut self.form.category_id, created);
        }
    }

    pub async fn mount<B: Backend>(&mut self, backend: &B, user_id: UserId) {
        let ticket = self.page.mount(user_id);
        let result = Self::fetch(backend, user_id, self.limit).await;
        self.finish_load(ticket, result);
    }

    pub async fn reload<B: Backend>(&mut self, backend: &B) {
        if let Some((ticket, user_id)) = self.page.begin_reload() {
            let result = Self::fetch(backend, user_id, self.limit).await;
            self.finish_load(ticket, result);
        }
    }

    pub async fn create<B: Backend>(&mut self, backend: &B) {
        let Some((ticket, payload)) = self.begin_create() else {
            return;
        };
        let result = backend.create_transaction(&payload).await;
        if let Some(ticket) = self.finish_create(ticket, result) {
            self.refetch(backend, ticket).await;
        }
    }

    pub async fn delete<B: Backend>(&mut self, backend: &B) {
        let Some((ticket, id)) = self.begin_delete() else {
            return;
        };
        let result = backend.delete_transaction(id).await;
        if let Some(ticket) = self.finish_delete(ticket, result) {
            self.refetch(backend, ticket).await;
        }
    }

    pub async fn create_inline_category<B: Backend>(&mut self, backend: &B) {
        let Some((ticket, payload)) = self.begin_inline_category() else {
            return;
        };
        let result = backend.create_category(&payload).await;
        self.finish_inline_category(ticket, result);
    }

    async fn refetch<B: Backend>(&mut self, backend: &B, ticket: Ticket) {
        if let Some(user_id) = self.page.user_id() {
            let result = Self::fetch(backend, user_id, self.limit).await;
            self.finish_load(ticket, result);
        }
    }
}
