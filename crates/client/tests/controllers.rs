mod common;

use api_types::{Amount, category::CategoryKind, dashboard::Summary};
use client::{
    LoginForm, MemoryStorage, Navigation, Phase, Route, SessionStore,
    controller::{
        accounts::{self, AccountsController},
        budgets::BudgetsController,
        categories::CategoriesController,
        dashboard::{self, DashboardController},
        transactions::{self, TransactionsController},
    },
    resolve,
};
use common::{FakeBackend, account, category, total, user};

#[tokio::test]
async fn account_creation_refetches_exactly_once() {
    let backend = FakeBackend::new();
    let mut page = AccountsController::default();
    page.mount(&backend, 1).await;
    assert_eq!(backend.calls("list_accounts"), 1);
    assert!(page.accounts().is_empty());

    page.form.name = "Main".to_string();
    page.form.starting_balance = "250.00".to_string();
    page.create(&backend).await;

    assert_eq!(backend.calls("create_account"), 1);
    assert_eq!(backend.calls("list_accounts"), 2);
    assert_eq!(page.page.phase(), Phase::Ready);
    assert_eq!(page.accounts().len(), 1);
    assert_eq!(page.accounts()[0].current_balance, Amount::from_cents(25_000));
    assert!(page.form.name.is_empty(), "form resets after success");
}

#[tokio::test]
async fn failed_creation_keeps_the_list() {
    let backend = FakeBackend::new();
    backend.with_state(|state| state.accounts.push(account(7, 1, "Savings", 1_000)));
    let mut page = AccountsController::default();
    page.mount(&backend, 1).await;

    backend.fail("create_account");
    page.form.name = "Main".to_string();
    page.form.starting_balance = "1".to_string();
    page.create(&backend).await;

    assert_eq!(backend.calls("list_accounts"), 1, "no re-fetch after failure");
    assert_eq!(page.accounts().len(), 1);
    assert_eq!(page.page.error(), Some(accounts::CREATE_ERROR));
    assert_eq!(page.form.name, "Main", "form keeps its input");
    assert_eq!(page.page.phase(), Phase::Ready);
}

#[tokio::test]
async fn invalid_form_issues_no_request() {
    let backend = FakeBackend::new();
    let mut page = CategoriesController::default();
    page.mount(&backend, 1).await;

    page.create(&backend).await;
    assert_eq!(backend.calls("create_category"), 0);
    assert!(page.page.error().is_some());
}

#[tokio::test]
async fn each_entity_refetches_its_collections_once() {
    let backend = FakeBackend::new();
    backend.with_state(|state| {
        state.accounts.push(account(1, 1, "Main", 0));
        state.categories.push(category(2, 1, "Food"));
    });

    let mut categories = CategoriesController::default();
    categories.mount(&backend, 1).await;
    categories.form.name = "Rent".to_string();
    categories.create(&backend).await;
    assert_eq!(backend.calls("list_categories"), 2);
    assert_eq!(categories.categories().len(), 2);

    let mut budgets = BudgetsController::default();
    budgets.mount(&backend, 1).await;
    budgets.form.name = "Groceries".to_string();
    budgets.form.target_amount = "300".to_string();
    budgets.form.category_id = Some(2);
    budgets.create(&backend).await;
    assert_eq!(backend.calls("create_budget"), 1);
    assert_eq!(backend.calls("list_budgets"), 2);
    assert_eq!(budgets.budgets().len(), 1);
    assert_eq!(budgets.page.data().category_name(2), "Food");

    let mut transactions = TransactionsController::default();
    transactions.mount(&backend, 1).await;
    transactions.form.amount = "12.30".to_string();
    transactions.form.account_id = Some(1);
    transactions.create(&backend).await;
    assert_eq!(backend.calls("list_transactions"), 2);
    assert_eq!(transactions.data().transactions.len(), 1);
    assert_eq!(transactions.form.account_id, Some(1), "account carries over");
}

#[tokio::test]
async fn inline_category_is_appended_without_refetch() {
    let backend = FakeBackend::new();
    backend.with_state(|state| state.accounts.push(account(1, 1, "Main", 0)));
    let mut page = TransactionsController::default();
    page.mount(&backend, 1).await;
    let fetched = backend.calls("list_categories");

    page.inline.open();
    if let Some(draft) = page.inline.draft_mut() {
        draft.name = "Groceries".to_string();
    }
    page.create_inline_category(&backend).await;

    assert_eq!(backend.calls("create_category"), 1);
    assert_eq!(backend.calls("list_categories"), fetched);
    let created = page.data().categories.last().unwrap();
    assert_eq!(created.name, "Groceries");
    assert_eq!(created.kind, CategoryKind::Expense);
    assert_eq!(page.form.category_id, Some(created.id));
    assert!(!page.inline.is_open());
}

#[tokio::test]
async fn failed_inline_category_keeps_the_draft() {
    let backend = FakeBackend::new();
    let mut page = BudgetsController::default();
    page.mount(&backend, 1).await;

    backend.fail("create_category");
    page.inline.open();
    if let Some(draft) = page.inline.draft_mut() {
        draft.name = "Travel".to_string();
    }
    page.create_inline_category(&backend).await;

    let draft = page.inline.draft().unwrap();
    assert_eq!(draft.error.as_deref(), Some("Failed to create category."));
    assert!(page.categories().is_empty());
    assert!(page.form.category_id.is_none());
}

#[tokio::test]
async fn completion_after_navigation_is_ignored() {
    let backend = FakeBackend::new();
    backend.with_state(|state| state.accounts.push(account(1, 1, "Main", 500)));
    let mut page = AccountsController::default();

    let ticket = page.page.mount(1);
    let result = AccountsController::fetch(&backend, 1).await;
    page.page.unmount();

    assert!(!page.finish_load(ticket, result));
    assert!(page.accounts().is_empty());
}

#[tokio::test]
async fn user_switch_drops_previous_data() {
    let backend = FakeBackend::new();
    backend.with_state(|state| {
        state.accounts.push(account(1, 1, "Alice", 100));
        state.accounts.push(account(2, 2, "Bob", 200));
    });
    let mut page = AccountsController::default();
    page.mount(&backend, 1).await;
    assert_eq!(page.accounts()[0].name, "Alice");

    let ticket = page.page.sync_user(Some(2)).unwrap();
    assert!(page.accounts().is_empty());
    let result = AccountsController::fetch(&backend, 2).await;
    page.finish_load(ticket, result);
    assert_eq!(page.accounts().len(), 1);
    assert_eq!(page.accounts()[0].name, "Bob");
}

#[tokio::test]
async fn dashboard_aggregates_six_fetches() {
    let backend = FakeBackend::new();
    backend.with_state(|state| {
        state.accounts.push(account(1, 1, "Main", 120_000));
        state.accounts.push(account(2, 1, "Card", -20_050));
        state.by_category = vec![total("A", 10_000), total("B", 25_000), total("C", 25_000)];
        state.summary = Some(Summary {
            income: Amount::from_cents(500_000),
            expenses: Amount::from_cents(200_000),
            net: None,
            month: Some("2024-03".to_string()),
        });
    });

    let mut page = DashboardController::default();
    page.mount(&backend, 1).await;

    for op in [
        "list_accounts",
        "list_transactions",
        "dashboard_summary",
        "dashboard_by_category",
        "dashboard_by_month",
        "dashboard_budget_summary",
    ] {
        assert_eq!(backend.calls(op), 1, "{op}");
    }
    let data = page.data();
    assert_eq!(data.net_worth.to_string(), "999.50");
    assert_eq!(data.top_category().map(|t| t.category.as_str()), Some("B"));
    assert_eq!(data.monthly_net(), Amount::from_cents(300_000));
    assert!(page.page.error().is_none());
}

#[tokio::test]
async fn dashboard_with_no_accounts_has_zero_net_worth() {
    let backend = FakeBackend::new();
    let mut page = DashboardController::default();
    page.mount(&backend, 1).await;
    assert_eq!(page.data().net_worth.to_string(), "0.00");
    assert!(page.data().top_category().is_none());
}

#[tokio::test]
async fn one_failed_dashboard_fetch_fails_the_page() {
    let backend = FakeBackend::new();
    backend.with_state(|state| state.accounts.push(account(1, 1, "Main", 100)));
    backend.fail("dashboard_by_month");

    let mut page = DashboardController::default();
    page.mount(&backend, 1).await;

    assert_eq!(page.page.error(), Some(dashboard::LOAD_ERROR));
    assert!(page.data().accounts.is_empty());
    assert_eq!(page.page.phase(), Phase::Ready);

    backend.heal("dashboard_by_month");
    page.reload(&backend).await;
    assert!(page.page.error().is_none());
    assert_eq!(page.data().accounts.len(), 1);
}

#[tokio::test]
async fn transactions_load_failure_uses_fixed_message() {
    let backend = FakeBackend::new();
    backend.fail("list_categories");
    let mut page = TransactionsController::default();
    page.mount(&backend, 1).await;
    assert_eq!(page.page.error(), Some(transactions::LOAD_ERROR));
}

#[tokio::test]
async fn login_then_empty_accounts_page() {
    let backend = FakeBackend::new();
    backend.with_state(|state| state.users.push((user(1), "x".to_string())));
    let mut session = SessionStore::restore(MemoryStorage::new());
    assert_eq!(resolve(session.is_authenticated(), "/accounts"), Navigation::Redirect(Route::Login));

    let mut form = LoginForm {
        identifier: "user1@example.com".to_string(),
        password: "x".to_string(),
        ..LoginForm::default()
    };
    assert!(form.submit(&backend, &mut session).await);
    assert_eq!(session.user_id(), Some(1));

    let navigation = resolve(session.is_authenticated(), "/accounts");
    assert_eq!(navigation, Navigation::Allow(Route::Accounts));

    let mut page = AccountsController::default();
    page.mount(&backend, 1).await;
    assert!(page.accounts().is_empty());
    assert!(page.page.error().is_none());
}

#[tokio::test]
async fn delete_refetches_and_reports_missing_rows() {
    let backend = FakeBackend::new();
    backend.with_state(|state| state.accounts.push(account(5, 1, "Old", 0)));
    let mut page = AccountsController::default();
    page.mount(&backend, 1).await;

    page.delete(&backend).await;
    assert_eq!(backend.calls("delete_account"), 1);
    assert_eq!(backend.calls("list_accounts"), 2);
    assert!(page.accounts().is_empty());

    page.delete(&backend).await;
    assert_eq!(backend.calls("delete_account"), 1, "nothing selected");
}
