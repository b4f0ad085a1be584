mod input;
mod tasks;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use tokio::sync::mpsc::UnboundedReceiver;

use client::{
    HttpBackend, LoginForm, Navigation, Route, SessionStore, SignupForm,
    controller::{
        accounts::AccountsController, budgets::BudgetsController,
        categories::CategoriesController, dashboard::DashboardController,
        transactions::TransactionsController,
    },
    resolve,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui,
};

pub use tasks::InlineHost;
use tasks::{Message, Tasks};

const TOAST_TTL: Duration = Duration::from_secs(3);

/// What keystrokes on a data page act upon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    Editing,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl ToastState {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub session: SessionStore,
    pub login: LoginForm,
    pub signup: SignupForm,
    pub dashboard: DashboardController,
    pub accounts: AccountsController,
    pub categories: CategoriesController,
    pub budgets: BudgetsController,
    pub transactions: TransactionsController,
    pub mode: Mode,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

impl AppState {
    pub fn new(config: &AppConfig, session: SessionStore) -> Self {
        Self {
            route: Route::Login,
            session,
            login: LoginForm::default(),
            signup: SignupForm::default(),
            dashboard: DashboardController::new(config.dashboard_transactions_limit),
            accounts: AccountsController::default(),
            categories: CategoriesController::default(),
            budgets: BudgetsController::default(),
            transactions: TransactionsController::new(config.transactions_limit),
            mode: Mode::Browse,
            toast: None,
            base_url: config.base_url.clone(),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.session.get().map(|user| user.username.as_str())
    }
}

pub struct App {
    pub state: AppState,
    tasks: Tasks,
    rx: UnboundedReceiver<Message>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, backend: HttpBackend, session: SessionStore) -> Self {
        let (tasks, rx) = Tasks::new(backend);
        Self {
            state: AppState::new(config, session),
            tasks,
            rx,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.navigate(Route::Dashboard.path());
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::AppTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.drain_messages();
            if self
                .state
                .toast
                .as_ref()
                .is_some_and(|toast| toast.expired(Instant::now()))
            {
                self.state.toast = None;
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
        }
    }

    /// Resolves `path` through the guard and mounts the resulting page.
    pub fn navigate(&mut self, path: &str) {
        let navigation = resolve(self.state.session.is_authenticated(), path);
        if let Navigation::Redirect(target) = &navigation {
            tracing::info!(from = path, to = target.path(), "redirected");
        }
        let route = navigation.into_route();
        if route != self.state.route {
            let previous = std::mem::replace(&mut self.state.route, route);
            self.unmount(&previous);
            self.state.mode = Mode::Browse;
        }
        self.mount_current();
    }

    fn unmount(&mut self, route: &Route) {
        let state = &mut self.state;
        match route {
            Route::Dashboard => state.dashboard.page.unmount(),
            Route::Accounts => state.accounts.page.unmount(),
            Route::Categories => state.categories.page.unmount(),
            Route::Budgets => {
                state.budgets.inline.cancel();
                state.budgets.page.unmount();
            }
            Route::Transactions => {
                state.transactions.inline.cancel();
                state.transactions.page.unmount();
            }
            Route::Login | Route::Signup | Route::Unknown(_) => {}
        }
    }

    fn mount_current(&mut self) {
        let Some(user_id) = self.state.session.user_id() else {
            return;
        };
        let state = &mut self.state;
        match state.route {
            Route::Dashboard if !state.dashboard.page.is_mounted() => {
                let ticket = state.dashboard.page.mount(user_id);
                let limit = state.dashboard.transactions_limit();
                self.tasks.load_dashboard(ticket, user_id, limit);
            }
            Route::Accounts if !state.accounts.page.is_mounted() => {
                let ticket = state.accounts.page.mount(user_id);
                self.tasks.load_accounts(ticket, user_id);
            }
            Route::Categories if !state.categories.page.is_mounted() => {
                let ticket = state.categories.page.mount(user_id);
                self.tasks.load_categories(ticket, user_id);
            }
            Route::Budgets if !state.budgets.page.is_mounted() => {
                let ticket = state.budgets.page.mount(user_id);
                self.tasks.load_budgets(ticket, user_id);
            }
            Route::Transactions if !state.transactions.page.is_mounted() => {
                let ticket = state.transactions.page.mount(user_id);
                let limit = state.transactions.limit();
                self.tasks.load_transactions(ticket, user_id, limit);
            }
            _ => {}
        }
    }

    fn reload_current(&mut self) {
        let state = &mut self.state;
        match state.route {
            Route::Dashboard => {
                if let Some((ticket, user_id)) = state.dashboard.page.begin_reload() {
                    let limit = state.dashboard.transactions_limit();
                    self.tasks.load_dashboard(ticket, user_id, limit);
                }
            }
            Route::Accounts => {
                if let Some((ticket, user_id)) = state.accounts.page.begin_reload() {
                    self.tasks.load_accounts(ticket, user_id);
                }
            }
            Route::Categories => {
                if let Some((ticket, user_id)) = state.categories.page.begin_reload() {
                    self.tasks.load_categories(ticket, user_id);
                }
            }
            Route::Budgets => {
                if let Some((ticket, user_id)) = state.budgets.page.begin_reload() {
                    self.tasks.load_budgets(ticket, user_id);
                }
            }
            Route::Transactions => {
                if let Some((ticket, user_id)) = state.transactions.page.begin_reload() {
                    let limit = state.transactions.limit();
                    self.tasks.load_transactions(ticket, user_id, limit);
                }
            }
            Route::Login | Route::Signup | Route::Unknown(_) => {}
        }
    }

    fn logout(&mut self) {
        let cleared = client::logout(&mut self.state.session);
        let state = &mut self.state;
        state.dashboard.page.sync_user(None);
        state.accounts.page.sync_user(None);
        state.categories.page.sync_user(None);
        state.budgets.page.sync_user(None);
        state.transactions.page.sync_user(None);
        state.login = LoginForm::default();
        state.toast = Some(match cleared {
            Ok(()) => ToastState::new(ToastLevel::Info, "Logged out."),
            Err(err) => ToastState::new(
                ToastLevel::Error,
                format!("Logged out, but the saved session could not be removed: {err}"),
            ),
        });
        self.navigate(Route::Login.path());
    }

    fn apply(&mut self, message: Message) {
        let state = &mut self.state;
        match message {
            Message::LoggedIn(result) => {
                if state.login.finish(result, &mut state.session) {
                    self.welcome();
                }
            }
            Message::SignedUp(result) => {
                if state.signup.finish(result, &mut state.session) {
                    state.signup = SignupForm::default();
                    self.welcome();
                }
            }
            Message::Dashboard(ticket, result) => {
                state.dashboard.finish_load(ticket, result);
            }
            Message::Accounts(ticket, result) => {
                state.accounts.finish_load(ticket, result);
            }
            Message::AccountCreated(ticket, result) => {
                if let Some(reload) = state.accounts.finish_create(ticket, result) {
                    self.refetch(&Route::Accounts, reload);
                }
            }
            Message::AccountDeleted(ticket, result) => {
                if let Some(reload) = state.accounts.finish_delete(ticket, result) {
                    self.refetch(&Route::Accounts, reload);
                }
            }
            Message::Categories(ticket, result) => {
                state.categories.finish_load(ticket, result);
            }
            Message::CategoryCreated(ticket, result) => {
                if let Some(reload) = state.categories.finish_create(ticket, result) {
                    self.refetch(&Route::Categories, reload);
                }
            }
            Message::CategoryDeleted(ticket, result) => {
                if let Some(reload) = state.categories.finish_delete(ticket, result) {
                    self.refetch(&Route::Categories, reload);
                }
            }
            Message::Budgets(ticket, result) => {
                state.budgets.finish_load(ticket, result);
            }
            Message::BudgetCreated(ticket, result) => {
                if let Some(reload) = state.budgets.finish_create(ticket, result) {
                    self.refetch(&Route::Budgets, reload);
                }
            }
            Message::BudgetDeleted(ticket, result) => {
                if let Some(reload) = state.budgets.finish_delete(ticket, result) {
                    self.refetch(&Route::Budgets, reload);
                }
            }
            Message::Transactions(ticket, result) => {
                state.transactions.finish_load(ticket, result);
            }
            Message::TransactionCreated(ticket, result) => {
                if let Some(reload) = state.transactions.finish_create(ticket, result) {
                    self.refetch(&Route::Transactions, reload);
                }
            }
            Message::TransactionDeleted(ticket, result) => {
                if let Some(reload) = state.transactions.finish_delete(ticket, result) {
                    self.refetch(&Route::Transactions, reload);
                }
            }
            Message::InlineCategory(InlineHost::Budgets, ticket, result) => {
                state.budgets.finish_inline_category(ticket, result);
            }
            Message::InlineCategory(InlineHost::Transactions, ticket, result) => {
                state.transactions.finish_inline_category(ticket, result);
            }
        }
    }

    /// Issues the re-fetch that follows a successful mutation.
    fn refetch(&mut self, route: &Route, ticket: client::Ticket) {
        if self.state.route == *route {
            self.state.mode = Mode::Browse;
        }
        let state = &self.state;
        match route {
            Route::Accounts => {
                if let Some(user_id) = state.accounts.page.user_id() {
                    self.tasks.load_accounts(ticket, user_id);
                }
            }
            Route::Categories => {
                if let Some(user_id) = state.categories.page.user_id() {
                    self.tasks.load_categories(ticket, user_id);
                }
            }
            Route::Budgets => {
                if let Some(user_id) = state.budgets.page.user_id() {
                    self.tasks.load_budgets(ticket, user_id);
                }
            }
            Route::Transactions => {
                if let Some(user_id) = state.transactions.page.user_id() {
                    let limit = state.transactions.limit();
                    self.tasks.load_transactions(ticket, user_id, limit);
                }
            }
            Route::Dashboard | Route::Login | Route::Signup | Route::Unknown(_) => {}
        }
    }

    fn welcome(&mut self) {
        if let Some(name) = self.state.username() {
            let message = format!("Welcome, {name}.");
            self.state.toast = Some(ToastState::new(ToastLevel::Success, message));
        }
        self.navigate(Route::Dashboard.path());
    }
}
