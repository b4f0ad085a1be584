use api_types::{Amount, dashboard::BudgetStatus};
use ratatui::{
    style::{Color, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// An amount colored by its sign, formatted with two decimals.
#[must_use]
pub fn styled_amount(amount: Amount, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else if amount.is_zero() {
        theme.text
    } else {
        theme.positive
    };
    Span::styled(amount.to_string(), Style::default().fg(color))
}

/// A transaction amount: `+` and green for income, `-` and red otherwise.
#[must_use]
pub fn flow_amount(amount: Amount, is_income: bool, theme: &Theme) -> Span<'static> {
    let (sign, color) = if is_income {
        ("+", theme.positive)
    } else {
        ("-", theme.negative)
    };
    Span::styled(format!("{sign}{amount}"), Style::default().fg(color))
}

#[must_use]
pub fn status_color(status: BudgetStatus, theme: &Theme) -> Color {
    match status {
        BudgetStatus::OnTrack => theme.positive,
        BudgetStatus::Approaching => theme.warning,
        BudgetStatus::Over => theme.negative,
    }
}

/// Text bar for a percentage already capped at 100, e.g. `████░░░░ 50%`.
#[must_use]
pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!(
        "{}{} {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent.clamp(0.0, 100.0)
    )
}
