use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// Calculates a rect of the given size centered in `area`.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// A labelled text input; the focused one gets a cursor.
pub fn field_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let cursor = if focused { "│" } else { "" };
    Line::from(vec![
        label_span(label, focused, theme),
        Span::styled(format!("{value}{cursor}"), value_style(focused, theme)),
    ])
}

pub fn password_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    field_line(label, &mask_password(value), focused, theme)
}

/// A labelled choice cycled with the arrow keys.
pub fn choice_line(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let value = if focused {
        format!("‹ {value} ›")
    } else {
        value.to_string()
    };
    Line::from(vec![
        label_span(label, focused, theme),
        Span::styled(value, value_style(focused, theme)),
    ])
}

pub fn error_line(message: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.error),
    ))
}

fn label_span(label: &str, focused: bool, theme: &Theme) -> Span<'static> {
    let style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    Span::styled(format!("{label:<12}"), style)
}

fn value_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    }
}

/// One bullet per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
