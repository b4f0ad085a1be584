use api_types::{
    CategoryId, UserId,
    category::{Category, CategoryKind, CategoryNew},
};

use super::{Page, Ticket, step};
use crate::{error::Result, remote::Backend};

pub const LOAD_ERROR: &str = "Failed to load categories.";
pub const CREATE_ERROR: &str = "Failed to create category.";
pub const DELETE_ERROR: &str = "Failed to delete category.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryField {
    #[default]
    Name,
    Kind,
}

#[derive(Debug, Default)]
pub struct CategoryForm {
    pub name: String,
    pub kind: CategoryKind,
    pub focus: CategoryField,
}

impl CategoryForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            CategoryField::Name => CategoryField::Kind,
            CategoryField::Kind => CategoryField::Name,
        };
    }

    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            CategoryField::Name => Some(&mut self.name),
            CategoryField::Kind => None,
        }
    }

    pub fn cycle_choice(&mut self) {
        if self.focus == CategoryField::Kind {
            self.kind = self.kind.toggle();
        }
    }

    pub fn payload(&self, user_id: UserId) -> std::result::Result<CategoryNew, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required.".to_string());
        }
        Ok(CategoryNew {
            name: name.to_string(),
            kind: self.kind,
            user_id,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct CategoriesController {
    pub page: Page<Vec<Category>>,
    pub form: CategoryForm,
    pub selected: usize,
}

impl CategoriesController {
    pub async fn fetch<B: Backend>(backend: &B, user_id: UserId) -> Result<Vec<Category>> {
        backend.list_categories(user_id).await
    }

    pub fn categories(&self) -> &[Category] {
        self.page.data()
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.categories().get(self.selected)
    }

    pub fn select(&mut self, forward: bool) {
        self.selected = step(self.selected, self.categories().len(), forward);
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Category>>) -> bool {
        let applied = self.page.finish_load(ticket, result, LOAD_ERROR);
        self.selected = self.selected.min(self.categories().len().saturating_sub(1));
        applied
    }

    pub fn begin_create(&mut self) -> Option<(Ticket, CategoryNew)> {
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

    pub fn finish_create(&mut self, ticket: Ticket, result: Result<Category>) -> Option<Ticket> {
        let reload = self.page.finish_submit(ticket, result, CREATE_ERROR);
        if reload.is_some() {
            self.form.reset();
        }
        reload
    }

    pub fn begin_delete(&mut self) -> Option<(Ticket, CategoryId)> {
        let id = self.selected_category()?.id;
        Some((self.page.begin_submit()?, id))
    }

    pub fn finish_delete(&mut self, ticket: Ticket, result: Result<()>) -> Option<Ticket> {
        self.page.finish_submit(ticket, result, DELETE_ERROR)
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
        let result = backend.create_category(&payload).await;
        if let Some(ticket) = self.finish_create(ticket, result) {
            self.refetch(backend, ticket).await;
        }
    }

    pub async fn delete<B: Backend>(&mut self, backend: &B) {
        let Some((ticket, id)) = self.begin_delete() else {
            return;
        };
        let result = backend.delete_category(id).await;
        if let Some(ticket) = self.finish_delete(ticket, result) {
            self.refetch(backend, ticket).await;
        }
    }

    async fn refetch<B: Backend>(&mut self, backend: &B, ticket: Ticket) {
        if let Some(user_id) = self.page.user_id() {
            let result = Self::fetch(backend, user_id).await;
            self.finish_load(ticket, result);
        }
    }
}
