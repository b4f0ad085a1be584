use client::controller::{CategoryDraft, DraftField};
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Clear, Paragraph},
};

use crate::ui::{
    components::{
        card::Card,
        form::{centered_box, choice_line, error_line, field_line},
    },
    theme::Theme,
};

/// The "new category" popup opened from the budget and transaction forms.
pub fn render(frame: &mut Frame<'_>, area: Rect, draft: &CategoryDraft, theme: &Theme) {
    let rect = centered_box(44, 7, area);
    frame.render_widget(Clear, rect);

    let card = Card::new("New Category", theme).focused(true);
    let inner = card.inner(rect);
    card.render_frame(frame, rect);

    let mut lines = vec![
        field_line("Name", &draft.name, draft.focus == DraftField::Name, theme),
        choice_line(
            "Type",
            draft.kind.as_str(),
            draft.focus == DraftField::Kind,
            theme,
        ),
        Line::default(),
    ];
    if draft.submitting {
        lines.push(Line::from("Creating..."));
    } else if let Some(error) = &draft.error {
        lines.push(error_line(error, theme));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
