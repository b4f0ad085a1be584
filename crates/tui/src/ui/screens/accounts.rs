use client::controller::accounts::{AccountField, AccountForm};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::ListItem,
};

use super::{ListPage, render_list_page, truncate};
use crate::{
    app::AppState,
    ui::{
        components::{
            form::{choice_line, field_line},
            money::styled_amount,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let accounts = &state.accounts;

    let items = accounts
        .accounts()
        .iter()
        .map(|account| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<20} ", truncate(&account.name, 20))),
                Span::styled(
                    format!("{:<12} ", account.kind),
                    Style::default().fg(theme.dim),
                ),
                styled_amount(account.current_balance, &theme),
            ]))
        })
        .collect();

    let view = ListPage {
        title: "Accounts",
        items,
        selected: accounts.selected,
        empty: "No accounts yet.",
        form_title: "New Account",
        form: form_lines(&accounts.form, &theme),
        confirm: accounts.selected_account().map(|account| account.name.clone()),
    };
    render_list_page(frame, area, &accounts.page, view, state.mode, &theme);
}

fn form_lines(form: &AccountForm, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        field_line("Name", &form.name, form.focus == AccountField::Name, theme),
        choice_line(
            "Type",
            form.kind.label(),
            form.focus == AccountField::Kind,
            theme,
        ),
        field_line(
            "Description",
            &form.description,
            form.focus == AccountField::Description,
            theme,
        ),
        field_line(
            "Balance",
            &form.starting_balance,
            form.focus == AccountField::StartingBalance,
            theme,
        ),
    ]
}
