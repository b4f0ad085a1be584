use api_types::{
    Amount, BudgetId, CategoryId, UserId,
    budget::{Budget, BudgetNew, BudgetPeriod},
    category::{Category, CategoryNew},
};

use super::{InlineCategory, Page, Ticket, adopt_category, cycle, cycle_id, step};
use crate::{error::Result, remote::Backend};

pub const LOAD_ERROR: &str = "Failed to load budgets or categories.";
pub const CREATE_ERROR: &str = "Failed to create budget.";
pub const DELETE_ERROR: &str = "Failed to delete budget.";

/// Name shown for a budget whose category is not in the loaded list.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Default, PartialEq)]
pub struct BudgetsData {
    pub budgets: Vec<Budget>,
    pub categories: Vec<Category>,
}

impl BudgetsData {
    pub fn category_name(&self, id: CategoryId) -> &str {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map_or(UNKNOWN_CATEGORY, |category| category.name.as_str())
    }
}

/// Share of the target already spent, in percent, capped at 100.
///
/// A zero target counts as one unit.
pub fn progress(budget: &Budget) -> f64 {
    let target = if budget.target_amount.is_zero() {
        1.0
    } else {
        budget.target_amount.as_f64()
    };
    (budget.current_spent.as_f64() / target * 100.0).min(100.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BudgetField {
    #[default]
    Name,
    Target,
    Period,
    Category,
}

#[derive(Debug, Default)]
pub struct BudgetForm {
    pub name: String,
    pub target_amount: String,
    pub period: BudgetPeriod,
    pub category_id: Option<CategoryId>,
    pub focus: BudgetField,
}

impl BudgetForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            BudgetField::Name => BudgetField::Target,
            BudgetField::Target => BudgetField::Period,
            BudgetField::Period => BudgetField::Category,
            BudgetField::Category => BudgetField::Name,
        };
    }

    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            BudgetField::Name => Some(&mut self.name),
            BudgetField::Target => Some(&mut self.target_amount),
            BudgetField::Period | BudgetField::Category => None,
        }
    }

    pub fn cycle_choice(&mut self, categories: &[Category], forward: bool) {
        match self.focus {
            BudgetField::Period => self.period = cycle(&BudgetPeriod::ALL, self.period, forward),
            BudgetField::Category => {
                let ids: Vec<CategoryId> = categories.iter().map(|category| category.id).collect();
                self.category_id = cycle_id(&ids, self.category_id, forward);
            }
            BudgetField::Name | BudgetField::Target => {}
        }
    }

    pub fn payload(&self, user_id: UserId) -> std::result::Result<BudgetNew, String> {
        let name = self.name.trim();
        let target = self.target_amount.trim();
        let category_id = self
            .category_id
            .filter(|_| !name.is_empty() && !target.is_empty())
            .ok_or_else(|| "Name, target amount and category are required.".to_string())?;
        let target_amount = target
            .parse::<Amount>()
            .map_err(|err| format!("Target amount: {err}"))?;
        Ok(BudgetNew {
            name: name.to_string(),
            target_amount,
            period: self.period.as_str().to_string(),
            user_id,
            category_id,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct BudgetsController {
    pub page: Page<BudgetsData>,
    pub form: BudgetForm,
    pub inline: InlineCategory,
    pub selected: usize,
}

impl BudgetsController {
    /// Budgets and categories are fetched concurrently; either failure fails
    /// the whole load.
    pub async fn fetch<B: Backend>(backend: &B, user_id: UserId) -> Result<BudgetsData> {
        let (budgets, categories) = tokio::try_join!(
            backend.list_budgets(user_id),
            backend.list_categories(user_id),
        )?;
        Ok(BudgetsData {
            budgets,
            categories,
        })
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.page.data().budgets
    }

    pub fn categories(&self) -> &[Category] {
        &self.page.data().categories
    }

    pub fn selected_budget(&self) -> Option<&Budget> {
        self.budgets().get(self.selected)
    }

    pub fn select(&mut self, forward: bool) {
        self.selected = step(self.selected, self.budgets().len(), forward);
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        let categories = &self.page.data().categories;
        self.form.cycle_choice(categories, forward);
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<BudgetsData>) -> bool {
        let applied = self.page.finish_load(ticket, result, LOAD_ERROR);
        self.selected = self.selected.min(self.budgets().len().saturating_sub(1));
        applied
    }

    pub fn begin_create(&mut self) -> Option<(Ticket, BudgetNew)> {
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

    pub fn finish_create(&mut self, ticket: Ticket, result: Result<Budget>) -> Option<Ticket> {
        let reload = self.page.finish_submit(ticket, result, CREATE_ERROR);
        if reload.is_some() {
            self.form.reset();
        }
        reload
    }

    pub fn begin_delete(&mut self) -> Option<(Ticket, BudgetId)> {
        let id = self.selected_budget()?.id;
        Some((self.page.begin_submit()?, id))
    }

    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<()>) -> Option<Ticket> {
        self.page.finish_submit(ticket, result, DELETE_ERROR)
    }

    pub fn begin_inline_category(&mut self) -> Option<(Ticket, CategoryNew)> {
        self.inline.begin(&self.page)
    }

    /// Appends the created category and selects it in the budget form.
    pub fn finish_inline_category(&mut self, ticket: Ticket, result: Result<Category>) {
        let accepted = self.page.same_mount(ticket);
        if let Some(created) = self.inline.finish(accepted, result) {
            let categories = &mut self.page.data_mut().categories;
            adopt_category(categories, &mut self.form.category_id, created);
        }
    }

    pub async fn mount<B: Backend>(&mut self, backend: &B, user_id: UserId) {
        let ticket = self.page.mount(user_id);
        let result = Self::fetch(backend, user_id).await;
        self.finish_load(ticket, result);
    }

    pub async fn reload<B: Backend>(&mut self, backend: &B) {
        if let Some((ticket, user_id)) = self.page.begin_reload() {
            let result = Self::fetch(backend, user_id).await;
            self.finish_load(ticket, result);
        }
    }

    pub async fn create<B: Backend>(&mut self, backend: &B) {
        let Some((ticket, payload)) = self.begin_create() else {
            return;
        };
        let result = backend.create_budget(&payload).await;
        if let Some(ticket) = self.finish_create(ticket, result) {
            self.refetch(backend, ticket).await;
        }
    }

    pub async fn delete<B: Backend>(&mut self, backend: &B) {
        let Some((ticket, id)) = self.begin_delete() else {
            return;
        };
        let result = backend.delete_budget(id).await;
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
            let result = Self::fetch(backend, user_id).await;
            self.finish_load(ticket, result);
        }
    }
}
