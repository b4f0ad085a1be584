//! Background requests.
//!
//! Every backend call runs on its own tokio task and reports back through an
//! unbounded channel drained by the event loop between frames. Nothing here
//! touches UI state.

use std::future::Future;

use api_types::{
    AccountId, BudgetId, CategoryId, TransactionId, UserId,
    account::{Account, AccountNew},
    budget::{Budget, BudgetNew},
    category::{Category, CategoryNew},
    transaction::{Transaction, TransactionNew},
    user::{Login, SignupNew, User},
};
use client::{
    Backend, HttpBackend, Result, Ticket,
    controller::{
        accounts::AccountsController,
        budgets::{BudgetsController, BudgetsData},
        categories::CategoriesController,
        dashboard::{DashboardController, DashboardData},
        transactions::{TransactionsController, TransactionsData},
    },
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Page owning an inline category draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineHost {
    Budgets,
    Transactions,
}

#[derive(Debug)]
pub enum Message {
    LoggedIn(Result<User>),
    SignedUp(Result<User>),
    Dashboard(Ticket, Result<DashboardData>),
    Accounts(Ticket, Result<Vec<Account>>),
    AccountCreated(Ticket, Result<Account>),
    AccountDeleted(Ticket, Result<()>),
    Categories(Ticket, Result<Vec<Category>>),
    CategoryCreated(Ticket, Result<Category>),
    CategoryDeleted(Ticket, Result<()>),
    Budgets(Ticket, Result<BudgetsData>),
    BudgetCreated(Ticket, Result<Budget>),
    BudgetDeleted(Ticket, Result<()>),
    Transactions(Ticket, Result<TransactionsData>),
    TransactionCreated(Ticket, Result<Transaction>),
    TransactionDeleted(Ticket, Result<()>),
    InlineCategory(InlineHost, Ticket, Result<Category>),
}

#[derive(Debug, Clone)]
pub struct Tasks {
    backend: HttpBackend,
    tx: UnboundedSender<Message>,
}

impl Tasks {
    pub fn new(backend: HttpBackend) -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = unbounded_channel();
        (Self { backend, tx }, rx)
    }

    fn spawn<F, Fut>(&self, request: F)
    where
        F: FnOnce(HttpBackend) -> Fut,
        Fut: Future<Output = Message> + Send + 'static,
    {
        let tx = self.tx.clone();
        let fut = request(self.backend.clone());
        tokio::spawn(async move {
            if tx.send(fut.await).is_err() {
                tracing::debug!("ui closed before request completed");
            }
        });
    }

    pub fn login(&self, payload: Login) {
        self.spawn(|backend| async move { Message::LoggedIn(backend.login(&payload).await) });
    }

    pub fn signup(&self, payload: SignupNew) {
        self.spawn(|backend| async move { Message::SignedUp(backend.signup(&payload).await) });
    }

    pub fn load_dashboard(&self, ticket: Ticket, user_id: UserId, limit: u32) {
        self.spawn(move |backend| async move {
            let result = DashboardController::fetch(&backend, user_id, limit).await;
            Message::Dashboard(ticket, result)
        });
    }

    pub fn load_accounts(&self, ticket: Ticket, user_id: UserId) {
        self.spawn(move |backend| async move {
            Message::Accounts(ticket, AccountsController::fetch(&backend, user_id).await)
        });
    }

    pub fn create_account(&self, ticket: Ticket, payload: AccountNew) {
        self.spawn(move |backend| async move {
            Message::AccountCreated(ticket, backend.create_account(&payload).await)
        });
    }

    pub fn delete_account(&self, ticket: Ticket, id: AccountId) {
        self.spawn(move |backend| async move {
            Message::AccountDeleted(ticket, backend.delete_account(id).await)
        });
    }

    pub fn load_categories(&self, ticket: Ticket, user_id: UserId) {
        self.spawn(move |backend| async move {
            Message::Categories(ticket, CategoriesController::fetch(&backend, user_id).await)
        });
    }

    pub fn create_category(&self, ticket: Ticket, payload: CategoryNew) {
        self.spawn(move |backend| async move {
            Message::CategoryCreated(ticket, backend.create_category(&payload).await)
        });
    }

    pub fn delete_category(&self, ticket: Ticket, id: CategoryId) {
        self.spawn(move |backend| async move {
            Message::CategoryDeleted(ticket, backend.delete_category(id).await)
        });
    }

    pub fn load_budgets(&self, ticket: Ticket, user_id: UserId) {
        self.spawn(move |backend| async move {
            Message::Budgets(ticket, BudgetsController::fetch(&backend, user_id).await)
        });
    }

    pub fn create_budget(&self, ticket: Ticket, payload: BudgetNew) {
        self.spawn(move |backend| async move {
            Message::BudgetCreated(ticket, backend.create_budget(&payload).await)
        });
    }

    pub fn delete_budget(&self, ticket: Ticket, id: BudgetId) {
        self.spawn(move |backend| async move {
            Message::BudgetDeleted(ticket, backend.delete_budget(id).await)
        });
    }

    pub fn load_transactions(&self, ticket: Ticket, user_id: UserId, limit: u32) {
        self.spawn(move |backend| async move {
            let result = TransactionsController::fetch(&backend, user_id, limit).await;
            Message::Transactions(ticket, result)
        });
    }

    pub fn create_transaction(&self, ticket: Ticket, payload: TransactionNew) {
        self.spawn(move |backend| async move {
            Message::TransactionCreated(ticket, backend.create_transaction(&payload).await)
        });
    }

    pub fn delete_transaction(&self, ticket: Ticket, id: TransactionId) {
        self.spawn(move |backend| async move {
            Message::TransactionDeleted(ticket, backend.delete_transaction(id).await)
        });
    }

    pub fn create_inline_category(&self, host: InlineHost, ticket: Ticket, payload: CategoryNew) {
        self.spawn(move |backend| async move {
            Message::InlineCategory(host, ticket, backend.create_category(&payload).await)
        });
    }
}
