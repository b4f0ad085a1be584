use client::controller::categories::CategoryField;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::ListItem,
};

use super::{ListPage, render_list_page};
use crate::{
    app::AppState,
    ui::{
        components::form::{choice_line, field_line},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let categories = &state.categories;

    let items = categories
        .categories()
        .iter()
        .map(|category| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<24} ", category.name)),
                Span::styled(category.kind.as_str(), Style::default().fg(theme.dim)),
            ]))
        })
        .collect();

    let form = &categories.form;
    let view = ListPage {
        title: "Categories",
        items,
        selected: categories.selected,
        empty: "No categories yet.",
        form_title: "New Category",
        form: vec![
            field_line("Name", &form.name, form.focus == CategoryField::Name, &theme),
            choice_line(
                "Type",
                form.kind.as_str(),
                form.focus == CategoryField::Kind,
                &theme,
            ),
        ],
        confirm: categories
            .selected_category()
            .map(|category| category.name.clone()),
    };
    render_list_page(frame, area, &categories.page, view, state.mode, &theme);
}
