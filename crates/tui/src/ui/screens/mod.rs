pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod login;
pub mod signup;
pub mod transactions;

use client::{Page, Phase};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::Mode,
    ui::{components::card::Card, theme::Theme},
};

/// What a collection page shows: a selectable list beside its create form.
struct ListPage<'a> {
    title: &'a str,
    items: Vec<ListItem<'static>>,
    selected: usize,
    empty: &'static str,
    form_title: &'a str,
    form: Vec<Line<'static>>,
    /// Label of the row a delete is pending for.
    confirm: Option<String>,
}

fn render_list_page<D: Default>(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &Page<D>,
    view: ListPage<'_>,
    mode: Mode,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let status = match (&view.confirm, mode) {
        (Some(label), Mode::ConfirmDelete) => Some(Line::from(Span::styled(
            format!("Delete {label}? (y to confirm)"),
            Style::default().fg(theme.warning),
        ))),
        _ => status_line(page, theme),
    };
    if let Some(line) = status {
        frame.render_widget(Paragraph::new(line), layout[0]);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(layout[1]);

    let card = Card::new(view.title, theme).focused(mode != Mode::Editing);
    let inner = card.inner(body[0]);
    card.render_frame(frame, body[0]);
    if view.items.is_empty() {
        if !page.is_loading() {
            frame.render_widget(Paragraph::new(empty(view.empty, theme)), inner);
        }
    } else {
        let mut list_state = ListState::default();
        list_state.select(Some(view.selected));
        let list = List::new(view.items)
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("» ");
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    let form_card = Card::new(view.form_title, theme).focused(mode == Mode::Editing);
    let form_inner = form_card.inner(body[1]);
    form_card.render_frame(frame, body[1]);
    let form = if mode == Mode::Editing {
        view.form
    } else {
        vec![empty("Press n to add.", theme)]
    };
    frame.render_widget(Paragraph::new(form), form_inner);
}

/// Loading indicator or the page's current error, if either applies.
fn status_line<D: Default>(page: &Page<D>, theme: &Theme) -> Option<Line<'static>> {
    if let Some(error) = page.error() {
        return Some(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        )));
    }
    let label = match page.phase() {
        Phase::Loading => "Loading...",
        Phase::Submitting => "Saving...",
        Phase::Idle | Phase::Ready => return None,
    };
    Some(Line::from(Span::styled(label, Style::default().fg(theme.dim))))
}

fn empty(message: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(message, Style::default().fg(theme.dim)))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
