use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use client::controller::dashboard::DashboardData;

use super::{empty, status_line, truncate};
use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{ascii_bar, render_month_chart},
            money::{flow_amount, progress_bar, status_color, styled_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let page = &state.dashboard.page;
    let data = state.dashboard.data();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Status
            Constraint::Length(4),      // Stat cards
            Constraint::Percentage(50), // Chart and categories
            Constraint::Min(5),         // Budgets and recent transactions
        ])
        .split(area);

    if let Some(line) = status_line(page, &theme) {
        frame.render_widget(Paragraph::new(line), layout[0]);
    }
    render_stats(frame, layout[1], data, &theme);

    let middle = halves(layout[2]);
    render_month_chart(frame, middle[0], &data.by_month, &theme);
    render_categories(frame, middle[1], data, &theme);

    let bottom = halves(layout[3]);
    render_budgets(frame, bottom[0], data, &theme);
    render_recent(frame, bottom[1], data, &theme);
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn render_stats(frame: &mut Frame<'_>, area: Rect, data: &DashboardData, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let month = data
        .summary
        .as_ref()
        .and_then(|summary| summary.month.clone())
        .unwrap_or_else(|| "this month".to_string());
    let accounts = format!("{} accounts", data.accounts.len());

    StatCard::new("Net Worth", styled_amount(data.net_worth, theme), theme)
        .subtitle(accounts)
        .render(frame, cols[0]);
    StatCard::new("Income", flow_amount(data.income(), true, theme), theme)
        .subtitle(month.clone())
        .render(frame, cols[1]);
    StatCard::new("Expenses", flow_amount(data.expenses(), false, theme), theme)
        .subtitle(month.clone())
        .render(frame, cols[2]);
    StatCard::new("Net", styled_amount(data.monthly_net(), theme), theme)
        .subtitle(month)
        .render(frame, cols[3]);
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, data: &DashboardData, theme: &Theme) {
    let card = Card::new("Spending by Category", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if data.by_category.is_empty() {
        frame.render_widget(Paragraph::new(empty("No spending yet.", theme)), inner);
        return;
    }

    let max = data
        .by_category
        .iter()
        .map(|total| total.total.cents().max(0) as u64)
        .max()
        .unwrap_or(0);
    let top = data.top_category().map(|total| total.category.as_str());

    let mut lines = Vec::with_capacity(data.by_category.len() + 1);
    if let Some(name) = top {
        lines.push(Line::from(vec![
            Span::styled("Top: ", Style::default().fg(theme.dim)),
            Span::styled(
                name.to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    for total in &data.by_category {
        let bar = ascii_bar(total.total.cents().max(0) as u64, max, 12);
        lines.push(Line::from(vec![
            Span::raw(format!("{:<14} ", truncate(&total.category, 14))),
            Span::styled(bar, Style::default().fg(theme.accent)),
            Span::raw(format!(" {}", total.total)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_budgets(frame: &mut Frame<'_>, area: Rect, data: &DashboardData, theme: &Theme) {
    let card = Card::new("Budgets", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if data.budget_summary.is_empty() {
        frame.render_widget(Paragraph::new(empty("No budgets yet.", theme)), inner);
        return;
    }

    let lines: Vec<Line<'static>> = data
        .budget_summary
        .iter()
        .map(|budget| {
            let color = status_color(budget.status(), theme);
            Line::from(vec![
                Span::raw(format!("{:<14} ", truncate(&budget.name, 14))),
                Span::styled(
                    progress_bar(budget.pct.min(100.0), 10),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {} / {}", budget.spent, budget.target),
                    Style::default().fg(theme.dim),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, data: &DashboardData, theme: &Theme) {
    let card = Card::new("Recent Transactions", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if data.transactions.is_empty() {
        frame.render_widget(Paragraph::new(empty("No transactions yet.", theme)), inner);
        return;
    }

    let lines: Vec<Line<'static>> = data
        .transactions
        .iter()
        .map(|tx| {
            Line::from(vec![
                Span::styled(
                    tx.date.format("%d %b").to_string(),
                    Style::default().fg(theme.dim),
                ),
                Span::raw(format!(
                    "  {:<18} ",
                    truncate(tx.description.as_deref().unwrap_or("-"), 18)
                )),
                flow_amount(tx.amount, tx.is_income, theme),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
