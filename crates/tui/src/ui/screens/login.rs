use client::auth::LoginField;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::Card,
            form::{centered_box, error_line, field_line, password_line},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card_area = centered_box(48, 8, area);
    frame.render_widget(Clear, card_area);

    let card = Card::new("login", &theme).focused(true);
    let inner = card.inner(card_area);
    card.render_frame(frame, card_area);

    let login = &state.login;
    let mut lines = vec![
        field_line(
            "User",
            &login.identifier,
            login.focus == LoginField::Identifier,
            &theme,
        ),
        password_line(
            "Password",
            &login.password,
            login.focus == LoginField::Password,
            &theme,
        ),
        Line::default(),
    ];
    if login.state.submitting {
        lines.push(Line::from("Logging in..."));
    } else if let Some(error) = &login.state.error {
        lines.push(error_line(error, &theme));
    }
    lines.push(Line::from(vec![
        Span::styled("Ctrl+N", Style::default().fg(theme.accent)),
        Span::styled(" sign up", Style::default().fg(theme.dim)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);

    let caption = Rect {
        y: card_area.y.saturating_sub(1),
        height: 1,
        ..card_area
    };
    frame.render_widget(
        Paragraph::new(Span::styled("Personal Finance", Style::default().fg(theme.accent)))
            .alignment(Alignment::Center),
        caption,
    );
}
