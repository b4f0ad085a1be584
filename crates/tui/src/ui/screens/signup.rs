use client::auth::SignupField;
use ratatui::{
    Frame,
    layout::Rect,
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
    let card_area = centered_box(48, 9, area);
    frame.render_widget(Clear, card_area);

    let card = Card::new("sign up", &theme).focused(true);
    let inner = card.inner(card_area);
    card.render_frame(frame, card_area);

    let signup = &state.signup;
    let mut lines = vec![
        field_line(
            "Username",
            &signup.username,
            signup.focus == SignupField::Username,
            &theme,
        ),
        field_line(
            "Email",
            &signup.email,
            signup.focus == SignupField::Email,
            &theme,
        ),
        password_line(
            "Password",
            &signup.password,
            signup.focus == SignupField::Password,
            &theme,
        ),
        Line::default(),
    ];
    if signup.state.submitting {
        lines.push(Line::from("Creating account..."));
    } else if let Some(error) = &signup.state.error {
        lines.push(error_line(error, &theme));
    }
    lines.push(Line::from(vec![
        Span::styled("Ctrl+N", Style::default().fg(theme.accent)),
        Span::styled(" back to login", Style::default().fg(theme.dim)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
