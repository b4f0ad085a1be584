//! Dashboard aggregation.
//!
//! Six independent reads are issued together and the page leaves `Loading`
//! only once all of them settled. Any single failure discards the batch and
//! shows one generic error. Derived figures are computed once per successful
//! load and cached next to the raw responses.

use api_types::{
    Amount, UserId,
    account::Account,
    dashboard::{BudgetSummary, CategoryTotal, MonthTotal, Summary},
    transaction::Transaction,
};

use super::{Page, Ticket};
use crate::{error::Result, remote::Backend};

pub const LOAD_ERROR: &str = "Failed to load dashboard data.";
pub const DEFAULT_TRANSACTIONS_LIMIT: u32 = 20;

#[derive(Debug, Default, PartialEq)]
pub struct DashboardData {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub summary: Option<Summary>,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthTotal>,
    pub budget_summary: Vec<BudgetSummary>,
    pub net_worth: Amount,
    /// Index into `by_category`.
    top_category: Option<usize>,
}

impl DashboardData {
    pub fn new(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        summary: Summary,
        by_category: Vec<CategoryTotal>,
        by_month: Vec<MonthTotal>,
        budget_summary: Vec<BudgetSummary>,
    ) -> Self {
        let net_worth = net_worth(&accounts);
        let top_category = top_category_index(&by_category);
        Self {
            accounts,
            transactions,
            summary: Some(summary),
            by_category,
            by_month,
            budget_summary,
            net_worth,
            top_category,
        }
    }

    pub fn top_category(&self) -> Option<&CategoryTotal> {
        self.top_category.and_then(|idx| self.by_category.get(idx))
    }

    pub fn income(&self) -> Amount {
        self.summary.as_ref().map_or(Amount::ZERO, |summary| summary.income)
    }

    pub fn expenses(&self) -> Amount {
        self.summary.as_ref().map_or(Amount::ZERO, |summary| summary.expenses)
    }

    pub fn monthly_net(&self) -> Amount {
        self.summary.as_ref().map_or(Amount::ZERO, Summary::net)
    }
}

/// Sum of every account's current balance. Empty input is zero.
pub fn net_worth(accounts: &[Account]) -> Amount {
    accounts.iter().map(|account| account.current_balance).sum()
}

/// The category with the largest total. Ties keep the earliest entry.
pub fn top_category(totals: &[CategoryTotal]) -> Option<&CategoryTotal> {
    top_category_index(totals).map(|idx| &totals[idx])
}

fn top_category_index(totals: &[CategoryTotal]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, entry) in totals.iter().enumerate() {
        match best {
            Some(current) if entry.total <= totals[current].total => {}
            _ => best = Some(idx),
        }
    }
    best
}

#[derive(Debug)]
pub struct DashboardController {
    pub page: Page<DashboardData>,
    transactions_limit: u32,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSACTIONS_LIMIT)
    }
}

impl DashboardController {
    pub fn new(transactions_limit: u32) -> Self {
        Self {
            page: Page::default(),
            transactions_limit,
        }
    }

    pub fn transactions_limit(&self) -> u32 {
        self.transactions_limit
    }

    pub fn data(&self) -> &DashboardData {
        self.page.data()
    }

    pub async fn fetch<B: Backend>(
        backend: &B,
        user_id: UserId,
        transactions_limit: u32,
    ) -> Result<DashboardData> {
        let (accounts, transactions, summary, by_category, by_month, budget_summary) = tokio::try_join!(
            backend.list_accounts(user_id),
            backend.list_transactions(user_id, transactions_limit),
            backend.dashboard_summary(user_id),
            backend.dashboard_by_category(user_id),
            backend.dashboard_by_month(user_id),
            backend.dashboard_budget_summary(user_id),
        )?;
        Ok(DashboardData::new(
            accounts,
            transactions,
            summary,
            by_category,
            by_month,
            budget_summary,
        ))
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<DashboardData>) -> bool {
        self.page.finish_load(ticket, result, LOAD_ERROR)
    }

    pub async fn mount<B: Backend>(&mut self, backend: &B, user_id: UserId) {
        let ticket = self.page.mount(user_id);
        let result = Self::fetch(backend, user_id, self.transactions_limit).await;
        self.finish_load(ticket, result);
    }

    pub async fn reload<B: Backend>(&mut self, backend: &B) {
        if let Some((ticket, user_id)) = self.page.begin_reload() {
            let result = Self::fetch(backend, user_id, self.transactions_limit).await;
            self.finish_load(ticket, result);
        }
    }
}
