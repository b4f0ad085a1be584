use crossterm::event::KeyEvent;

use client::{
    Route,
    controller::{
        CategoryDraft, DraftField, InlineCategory, budgets::BudgetField,
        transactions::TransactionField,
    },
};

use super::{App, InlineHost, Mode};
use crate::ui::keymap::{AppAction, map_key};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        match action {
            AppAction::Quit => {
                self.should_quit = true;
                return;
            }
            AppAction::Logout if self.state.session.is_authenticated() => {
                self.logout();
                return;
            }
            _ => {}
        }

        match self.state.route {
            Route::Login => self.login_key(action),
            Route::Signup => self.signup_key(action),
            _ => self.page_key(action),
        }
    }

    fn login_key(&mut self, action: AppAction) {
        let form = &mut self.state.login;
        match action {
            AppAction::SwitchAuth => self.navigate(Route::Signup.path()),
            AppAction::NextField | AppAction::Up | AppAction::Down => form.next_field(),
            AppAction::Submit => {
                if let Some(payload) = form.begin() {
                    self.tasks.login(payload);
                }
            }
            AppAction::Backspace => {
                form.active_field_mut().pop();
            }
            AppAction::Input(ch) => form.active_field_mut().push(ch),
            AppAction::Cancel => form.state.error = None,
            _ => {}
        }
    }

    fn signup_key(&mut self, action: AppAction) {
        let form = &mut self.state.signup;
        match action {
            AppAction::SwitchAuth => self.navigate(Route::Login.path()),
            AppAction::NextField | AppAction::Up | AppAction::Down => form.next_field(),
            AppAction::Submit => {
                if let Some(payload) = form.begin() {
                    self.tasks.signup(payload);
                }
            }
            AppAction::Backspace => {
                form.active_field_mut().pop();
            }
            AppAction::Input(ch) => form.active_field_mut().push(ch),
            AppAction::Cancel => form.state.error = None,
            _ => {}
        }
    }

    fn page_key(&mut self, action: AppAction) {
        if let Some(host) = self.open_inline_host() {
            self.inline_key(host, action);
            return;
        }
        match self.state.mode {
            Mode::Browse => self.browse_key(action),
            Mode::Editing => self.edit_key(action),
            Mode::ConfirmDelete => self.confirm_key(action),
        }
    }

    fn open_inline_host(&self) -> Option<InlineHost> {
        match self.state.route {
            Route::Budgets if self.state.budgets.inline.is_open() => Some(InlineHost::Budgets),
            Route::Transactions if self.state.transactions.inline.is_open() => {
                Some(InlineHost::Transactions)
            }
            _ => None,
        }
    }

    fn browse_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input(ch @ '1'..='5') => {
                let index = ch as usize - '1' as usize;
                if let Some(route) = Route::PAGES.get(index) {
                    self.navigate(route.path());
                }
            }
            AppAction::Input('n') if self.state.route != Route::Dashboard => {
                self.state.mode = Mode::Editing;
            }
            AppAction::Input('d') if self.has_selection() => {
                self.state.mode = Mode::ConfirmDelete;
            }
            AppAction::Input('r') => self.reload_current(),
            AppAction::Down | AppAction::Input('j') => self.select(true),
            AppAction::Up | AppAction::Input('k') => self.select(false),
            _ => {}
        }
    }

    fn has_selection(&self) -> bool {
        let state = &self.state;
        match state.route {
            Route::Accounts => state.accounts.selected_account().is_some(),
            Route::Categories => state.categories.selected_category().is_some(),
            Route::Budgets => state.budgets.selected_budget().is_some(),
            Route::Transactions => state.transactions.selected_transaction().is_some(),
            _ => false,
        }
    }

    fn select(&mut self, forward: bool) {
        let state = &mut self.state;
        match state.route {
            Route::Accounts => state.accounts.select(forward),
            Route::Categories => state.categories.select(forward),
            Route::Budgets => state.budgets.select(forward),
            Route::Transactions => state.transactions.select(forward),
            _ => {}
        }
    }

    fn edit_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => {
                self.state.mode = Mode::Browse;
                return;
            }
            AppAction::Submit => {
                self.submit_form();
                return;
            }
            _ => {}
        }

        let state = &mut self.state;
        match state.route {
            Route::Accounts => {
                let form = &mut state.accounts.form;
                match action {
                    AppAction::NextField => form.next_field(),
                    AppAction::Left => form.cycle_choice(false),
                    AppAction::Right => form.cycle_choice(true),
                    _ => edit_text(form.active_text_mut(), action),
                }
            }
            Route::Categories => {
                let form = &mut state.categories.form;
                match action {
                    AppAction::NextField => form.next_field(),
                    AppAction::Left | AppAction::Right => form.cycle_choice(),
                    _ => edit_text(form.active_text_mut(), action),
                }
            }
            Route::Budgets => {
                let budgets = &mut state.budgets;
                match action {
                    AppAction::NextField => budgets.form.next_field(),
                    AppAction::Left => budgets.cycle_choice(false),
                    AppAction::Right => budgets.cycle_choice(true),
                    AppAction::Input('+') if budgets.form.focus == BudgetField::Category => {
                        budgets.inline.open();
                    }
                    _ => edit_text(budgets.form.active_text_mut(), action),
                }
            }
            Route::Transactions => {
                let transactions = &mut state.transactions;
                match action {
                    AppAction::NextField => transactions.form.next_field(),
                    AppAction::Left => transactions.cycle_choice(false),
                    AppAction::Right => transactions.cycle_choice(true),
                    AppAction::Input('+')
                        if transactions.form.focus == TransactionField::Category =>
                    {
                        transactions.inline.open();
                    }
                    _ => edit_text(transactions.form.active_text_mut(), action),
                }
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let state = &mut self.state;
        match state.route {
            Route::Accounts => {
                if let Some((ticket, payload)) = state.accounts.begin_create() {
                    self.tasks.create_account(ticket, payload);
                }
            }
            Route::Categories => {
                if let Some((ticket, payload)) = state.categories.begin_create() {
                    self.tasks.create_category(ticket, payload);
                }
            }
            Route::Budgets => {
                if let Some((ticket, payload)) = state.budgets.begin_create() {
                    self.tasks.create_budget(ticket, payload);
                }
            }
            Route::Transactions => {
                if let Some((ticket, payload)) = state.transactions.begin_create() {
                    self.tasks.create_transaction(ticket, payload);
                }
            }
            _ => {}
        }
    }

    fn confirm_key(&mut self, action: AppAction) {
        self.state.mode = Mode::Browse;
        if action != AppAction::Input('y') {
            return;
        }
        let state = &mut self.state;
        match state.route {
            Route::Accounts => {
                if let Some((ticket, id)) = state.accounts.begin_delete() {
                    self.tasks.delete_account(ticket, id);
                }
            }
            Route::Categories => {
                if let Some((ticket, id)) = state.categories.begin_delete() {
                    self.tasks.delete_category(ticket, id);
                }
            }
            Route::Budgets => {
                if let Some((ticket, id)) = state.budgets.begin_delete() {
                    self.tasks.delete_budget(ticket, id);
                }
            }
            Route::Transactions => {
                if let Some((ticket, id)) = state.transactions.begin_delete() {
                    self.tasks.delete_transaction(ticket, id);
                }
            }
            _ => {}
        }
    }

    fn inline_key(&mut self, host: InlineHost, action: AppAction) {
        if action == AppAction::Submit {
            let started = match host {
                InlineHost::Budgets => self.state.budgets.begin_inline_category(),
                InlineHost::Transactions => self.state.transactions.begin_inline_category(),
            };
            if let Some((ticket, payload)) = started {
                self.tasks.create_inline_category(host, ticket, payload);
            }
            return;
        }

        let inline = match host {
            InlineHost::Budgets => &mut self.state.budgets.inline,
            InlineHost::Transactions => &mut self.state.transactions.inline,
        };
        edit_draft(inline, action);
    }
}

fn edit_draft(inline: &mut InlineCategory, action: AppAction) {
    if action == AppAction::Cancel {
        inline.cancel();
        return;
    }
    let Some(draft) = inline.draft_mut() else {
        return;
    };
    if draft.submitting {
        return;
    }
    match action {
        AppAction::NextField => draft.next_field(),
        AppAction::Left | AppAction::Right if draft.focus == DraftField::Kind => {
            draft.kind = draft.kind.toggle();
        }
        _ => edit_text(draft_name(draft), action),
    }
}

fn draft_name(draft: &mut CategoryDraft) -> Option<&mut String> {
    (draft.focus == DraftField::Name).then_some(&mut draft.name)
}

fn edit_text(field: Option<&mut String>, action: AppAction) {
    match (field, action) {
        (Some(text), AppAction::Backspace) => {
            text.pop();
        }
        (Some(text), AppAction::Input(ch)) => text.push(ch),
        _ => {}
    }
}
