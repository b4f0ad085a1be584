use client::controller::transactions::{DATE_FORMAT, TransactionField, TransactionsController};
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
            category_modal,
            form::{choice_line, field_line},
            money::flow_amount,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let transactions = &state.transactions;
    let data = transactions.data();

    let items = data
        .transactions
        .iter()
        .map(|tx| {
            let account = data.account_name(tx.account_id).unwrap_or("-");
            let category = data.category_name(tx.category_id).unwrap_or("-");
            ListItem::new(Line::from(vec![
                Span::styled(
                    tx.date.format(DATE_FORMAT).to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw(format!(
                    "  {:<20} {:<12} {:<12} ",
                    truncate(tx.description.as_deref().unwrap_or("-"), 20),
                    truncate(account, 12),
                    truncate(category, 12),
                )),
                flow_amount(tx.amount, tx.is_income, &theme),
            ]))
        })
        .collect();

    let view = ListPage {
        title: "Transactions",
        items,
        selected: transactions.selected,
        empty: "No transactions yet.",
        form_title: "New Transaction",
        form: form_lines(transactions, &theme),
        confirm: transactions.selected_transaction().map(|tx| {
            format!(
                "{} {}",
                tx.date.format(DATE_FORMAT),
                tx.description.as_deref().unwrap_or("transaction")
            )
        }),
    };
    render_list_page(frame, area, &transactions.page, view, state.mode, &theme);

    if let Some(draft) = transactions.inline.draft() {
        category_modal::render(frame, area, draft, &theme);
    }
}

fn form_lines(transactions: &TransactionsController, theme: &Theme) -> Vec<Line<'static>> {
    let form = &transactions.form;
    let data = transactions.data();
    let account = form
        .account_id
        .and_then(|id| data.account_name(id))
        .unwrap_or("Select account");
    let category = data.category_name(form.category_id).unwrap_or("None");
    let direction = if form.is_income { "Income" } else { "Expense" };
    vec![
        field_line(
            "Amount",
            &form.amount,
            form.focus == TransactionField::Amount,
            theme,
        ),
        field_line("Date", &form.date, form.focus == TransactionField::Date, theme),
        field_line(
            "Description",
            &form.description,
            form.focus == TransactionField::Description,
            theme,
        ),
        choice_line(
            "Direction",
            direction,
            form.focus == TransactionField::Income,
            theme,
        ),
        choice_line(
            "Account",
            account,
            form.focus == TransactionField::Account,
            theme,
        ),
        choice_line(
            "Category",
            category,
            form.focus == TransactionField::Category,
            theme,
        ),
    ]
}
