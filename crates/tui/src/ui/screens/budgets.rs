use client::controller::budgets::{BudgetField, BudgetsController, progress};
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
            money::progress_bar,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let budgets = &state.budgets;
    let data = budgets.page.data();

    let items = budgets
        .budgets()
        .iter()
        .map(|budget| {
            let percent = progress(budget);
            let color = if percent >= 100.0 {
                theme.negative
            } else if percent >= 75.0 {
                theme.warning
            } else {
                theme.positive
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(format!("{:<18} ", truncate(&budget.name, 18))),
                    Span::styled(
                        format!("{} · {}", data.category_name(budget.category_id), budget.period),
                        Style::default().fg(theme.dim),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(progress_bar(percent, 12), Style::default().fg(color)),
                    Span::raw(format!(
                        "  {} / {}  left {}",
                        budget.current_spent, budget.target_amount, budget.remaining
                    )),
                ]),
            ])
        })
        .collect();

    let view = ListPage {
        title: "Budgets",
        items,
        selected: budgets.selected,
        empty: "No budgets yet.",
        form_title: "New Budget",
        form: form_lines(budgets, &theme),
        confirm: budgets.selected_budget().map(|budget| budget.name.clone()),
    };
    render_list_page(frame, area, &budgets.page, view, state.mode, &theme);

    if let Some(draft) = budgets.inline.draft() {
        category_modal::render(frame, area, draft, &theme);
    }
}

fn form_lines(budgets: &BudgetsController, theme: &Theme) -> Vec<Line<'static>> {
    let form = &budgets.form;
    let category = form
        .category_id
        .map(|id| budgets.page.data().category_name(id))
        .unwrap_or("Select category");
    vec![
        field_line("Name", &form.name, form.focus == BudgetField::Name, theme),
        field_line(
            "Target",
            &form.target_amount,
            form.focus == BudgetField::Target,
            theme,
        ),
        choice_line(
            "Period",
            form.period.as_str(),
            form.focus == BudgetField::Period,
            theme,
        ),
        choice_line(
            "Category",
            category,
            form.focus == BudgetField::Category,
            theme,
        ),
    ]
}
