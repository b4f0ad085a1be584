use api_types::dashboard::MonthTotal;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
};

use crate::ui::{components::card::Card, theme::Theme};

/// Income and expense bars per month, drawn inside a card.
pub fn render_month_chart(frame: &mut Frame<'_>, area: Rect, months: &[MonthTotal], theme: &Theme) {
    let card = Card::new("Income vs Expenses", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let mut chart = BarChart::default()
        .bar_width(3)
        .bar_gap(1)
        .group_gap(2)
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.dim));

    for month in months {
        let bars = [
            bar(month.income.cents(), Style::default().fg(theme.positive)),
            bar(month.expenses.cents(), Style::default().fg(theme.negative)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(month.month.clone()))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, inner);
}

fn bar(cents: i64, style: Style) -> Bar<'static> {
    let units = cents.max(0) / 100;
    Bar::default()
        .value(units as u64)
        .text_value(units.to_string())
        .style(style)
}

/// Creates a simple ASCII-based horizontal bar for inline use.
///
/// Returns a string like `████████░░░░░░░░░░░░` representing the ratio.
#[must_use]
pub fn ascii_bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = (value as f64 / max as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
