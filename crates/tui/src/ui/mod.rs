pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use client::Route;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};
use components::hints::{KeyHint, hint_separator, hints_to_spans};

pub use terminal::{AppTerminal, restore_terminal, setup_terminal};
use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.route {
        Route::Login => screens::login::render(frame, area, state),
        Route::Signup => screens::signup::render(frame, area, state),
        _ => render_shell(frame, area, state),
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tabs
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], &state.route, &theme);

    let content = layout[2];
    match state.route {
        Route::Dashboard => screens::dashboard::render(frame, content, state),
        Route::Accounts => screens::accounts::render(frame, content, state),
        Route::Categories => screens::categories::render(frame, content, state),
        Route::Budgets => screens::budgets::render(frame, content, state),
        Route::Transactions => screens::transactions::render(frame, content, state),
        Route::Login | Route::Signup | Route::Unknown(_) => {}
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.username().unwrap_or("-");
    let line = Line::from(vec![
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Backend", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}", state.base_url)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = Vec::new();
    let context = context_hints(state);
    if !context.is_empty() {
        parts.extend(hints_to_spans(&context, theme));
        parts.push(hint_separator(theme));
    }
    parts.extend(hints_to_spans(
        &[KeyHint::new("Ctrl+L", "logout"), KeyHint::new("q", "quit")],
        theme,
    ));
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState) -> Vec<KeyHint> {
    let inline_open = match state.route {
        Route::Budgets => state.budgets.inline.is_open(),
        Route::Transactions => state.transactions.inline.is_open(),
        _ => false,
    };
    if inline_open {
        return vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "type"),
            KeyHint::new("Enter", "create category"),
            KeyHint::new("Esc", "cancel"),
        ];
    }

    match (state.mode, &state.route) {
        (_, Route::Dashboard) => vec![KeyHint::new("1-5", "pages"), KeyHint::new("r", "refresh")],
        (Mode::Browse, _) => vec![
            KeyHint::new("1-5", "pages"),
            KeyHint::new("↑↓", "select"),
            KeyHint::new("n", "new"),
            KeyHint::new("d", "delete"),
            KeyHint::new("r", "refresh"),
        ],
        (Mode::Editing, Route::Budgets | Route::Transactions) => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "choose"),
            KeyHint::new("+", "new category"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "close"),
        ],
        (Mode::Editing, _) => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "choose"),
            KeyHint::new("Enter", "save"),
            KeyHint::new("Esc", "close"),
        ],
        (Mode::ConfirmDelete, _) => vec![KeyHint::new("y", "confirm"), KeyHint::new("any", "cancel")],
    }
}

#[cfg(test)]
mod tests {
    use api_types::user::User;
    use client::{MemoryStorage, SessionStore};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::config::AppConfig;

    fn logged_in_state() -> AppState {
        let mut session = SessionStore::restore(MemoryStorage::new());
        session
            .set(Some(User {
                id: 1,
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                created_at: "2024-01-01T00:00:00".to_string(),
            }))
            .unwrap();
        AppState::new(&AppConfig::default(), session)
    }

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn login_screen_shows_form_and_error() {
        let mut state = AppState::new(
            &AppConfig::default(),
            SessionStore::restore(MemoryStorage::new()),
        );
        state.login.password = "secret".to_string();
        state.login.state.error = Some("Invalid credentials".to_string());

        let screen = draw(&state);
        assert!(screen.contains("login"));
        assert!(screen.contains("••••••"));
        assert!(!screen.contains("secret"));
        assert!(screen.contains("Invalid credentials"));
    }

    #[test]
    fn empty_accounts_page_says_so() {
        let mut state = logged_in_state();
        state.route = Route::Accounts;
        let ticket = state.accounts.page.mount(1);
        state.accounts.finish_load(ticket, Ok(Vec::new()));

        let screen = draw(&state);
        assert!(screen.contains("No accounts yet."));
        assert!(screen.contains("User: alice"));
    }

    #[test]
    fn loading_page_hides_empty_message() {
        let mut state = logged_in_state();
        state.route = Route::Categories;
        state.categories.page.mount(1);

        let screen = draw(&state);
        assert!(screen.contains("Loading..."));
        assert!(!screen.contains("No categories yet."));
    }

    #[test]
    fn dashboard_failure_shows_generic_error() {
        let mut state = logged_in_state();
        state.route = Route::Dashboard;
        let ticket = state.dashboard.page.mount(1);
        state.dashboard.finish_load(
            ticket,
            Err(client::ClientError::Server {
                status: 500,
                message: None,
            }),
        );

        let screen = draw(&state);
        assert!(screen.contains("Failed to load dashboard data."));
        assert!(screen.contains("0.00"));
    }

    #[test]
    fn editing_mode_swaps_hints() {
        let mut state = logged_in_state();
        state.route = Route::Budgets;
        state.mode = Mode::Editing;

        let screen = draw(&state);
        assert!(screen.contains("new category"));
        assert!(screen.contains("Select category"));
    }
}
