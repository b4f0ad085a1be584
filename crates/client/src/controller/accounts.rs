use api_types::{
    AccountId, Amount, UserId,
    account::{Account, AccountKind, AccountNew},
};

use super::{Page, Ticket, cycle, step};
use crate::{error::Result, remote::Backend};

pub const LOAD_ERROR: &str = "Failed to load accounts.";
pub const CREATE_ERROR: &str = "Failed to create account.";
pub const DELETE_ERROR: &str = "Failed to delete account.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountField {
    #[default]
    Name,
    Kind,
    Description,
    StartingBalance,
}

#[derive(Debug, Default)]
pub struct AccountForm {
    pub name: String,
    pub kind: AccountKind,
    pub description: String,
    pub starting_balance: String,
    pub focus: AccountField,
}

impl AccountForm {
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AccountField::Name => AccountField::Kind,
            AccountField::Kind => AccountField::Description,
            AccountField::Description => AccountField::StartingBalance,
            AccountField::StartingBalance => AccountField::Name,
        };
    }

    /// The focused text input, `None` on choice fields.
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            AccountField::Name => Some(&mut self.name),
            AccountField::Description => Some(&mut self.description),
            AccountField::StartingBalance => Some(&mut self.starting_balance),
            AccountField::Kind => None,
        }
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        if self.focus == AccountField::Kind {
            self.kind = cycle(&AccountKind::ALL, self.kind, forward);
        }
    }

    pub fn payload(&self, user_id: UserId) -> std::result::Result<AccountNew, String> {
        let name = self.name.trim();
        let balance = self.starting_balance.trim();
        if name.is_empty() || balance.is_empty() {
            return Err("Name and starting balance are required.".to_string());
        }
        let starting_balance = balance
            .parse::<Amount>()
            .map_err(|err| format!("Starting balance: {err}"))?;
        let description = self.description.trim();
        Ok(AccountNew {
            name: name.to_string(),
            kind: self.kind.as_str().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            starting_balance,
            user_id,
        })
    }

    /// Clears the inputs after a successful create; the account type stays.
    pub fn reset(&mut self) {
        self.name.clear();
        self.description.clear();
        self.starting_balance.clear();
        self.focus = AccountField::Name;
    }
}

#[derive(Debug, Default)]
pub struct AccountsController {
    pub page: Page<Vec<Account>>,
    pub form: AccountForm,
    pub selected: usize,
}

impl AccountsController {
    pub async fn fetch<B: Backend>(backend: &B, user_id: UserId) -> Result<Vec<Account>> {
        backend.list_accounts(user_id).await
    }

    pub fn accounts(&self) -> &[Account] {
        self.page.data()
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts().get(self.selected)
    }

    pub fn select(&mut self, forward: bool) {
        self.selected = step(self.selected, self.accounts().len(), forward);
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Account>>) -> bool {
        let applied = self.page.finish_load(ticket, result, LOAD_ERROR);
        self.selected = self.selected.min(self.accounts().len().saturating_sub(1));
        applied
    }

    pub fn begin_create(&mut self) -> Option<(Ticket, AccountNew)> {
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

    /// Returns the re-fetch ticket on success.
    pub fn finish_create(&mut self, ticket: Ticket, result: Result<Account>) -> Option<Ticket> {
        let reload = self.page.finish_submit(ticket, result, CREATE_ERROR);
        if reload.is_some() {
            self.form.reset();
        }
        reload
    }

    pub fn begin_delete(&mut self) -> Option<(Ticket, AccountId)> {
        let id = self.selected_account()?.id;
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
        let result = backend.create_account(&payload).await;
        if let Some(ticket) = self.finish_create(ticket, result) {
            self.refetch(backend, ticket).await;
        }
    }

    pub async fn delete<B: Backend>(&mut self, backend: &B) {
        let Some((ticket, id)) = self.begin_delete() else {
            return;
        };
        let result = backend.delete_account(id).await;
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
