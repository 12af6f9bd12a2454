use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::store::QuestionStore;
use crate::utils::truncate_string;

/// Entries shown on the category screen: every category, then "all".
pub fn menu_entries(store: &QuestionStore) -> Vec<String> {
    let mut entries: Vec<String> = store
        .categories()
        .iter()
        .map(|c| format!("{} ({})", truncate_string(c, 60), store.count_in(c)))
        .collect();
    entries.push(format!("All questions ({})", store.len()));
    entries
}

pub fn draw_menu(f: &mut Frame, store: &QuestionStore, selected_index: usize, load_error: Option<&str>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new("Interactive Quiz v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let entries = menu_entries(store);
    let mut items: Vec<ListItem> = Vec::with_capacity(entries.len() + 1);
    if store.categories().is_empty() {
        let placeholder = match load_error {
            Some(error) => format!("No categories loaded: {}", error),
            None => "No categories loaded".to_string(),
        };
        items.push(
            ListItem::new(placeholder).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        );
    }
    items.extend(entries.into_iter().enumerate().map(|(i, name)| {
        let style = if i == selected_index {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        ListItem::new(name).style(style)
    }));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title("Choose a category"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(list, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Start  "),
        Span::styled(
            "q/Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
