use crate::models::OptionMark;
use crate::surface::TerminalSurface;
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn option_style(mark: Option<OptionMark>, selected: bool, under_cursor: bool) -> Style {
    let style = match mark {
        Some(OptionMark::Correct) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(OptionMark::Incorrect) => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Some(OptionMark::Neutral) => Style::default().fg(Color::DarkGray),
        None if selected => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        None => Style::default(),
    };
    if under_cursor && mark.is_none() {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

pub fn draw_quiz(f: &mut Frame, surface: &TerminalSurface) {
    let layout = calculate_quiz_chunks(f.area());

    let Some(question) = surface.question.as_ref() else {
        return;
    };

    let header_text = format!(
        "Question {} of {} - {}",
        surface.question_index + 1,
        surface.question_total,
        surface.title
    );
    let header = Paragraph::new(header_text)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let score_label = format!(
        "Correct: {}  Incorrect: {}",
        surface.score.correct, surface.score.incorrect
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(score_label))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(surface.progress);
    f.render_widget(gauge, layout.progress_area);

    let mut question_text = Text::default();
    question_text.push_line(Line::from(Span::styled(
        question.kind.label(),
        Style::default().fg(Color::DarkGray),
    )));
    question_text.push_line(Line::from(question.prompt.as_str()));
    let prompt = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(prompt, layout.question_area);

    let feedback_height = if surface.feedback.is_some() { 6 } else { 0 };
    let option_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(feedback_height)])
        .split(layout.options_area);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let selected = surface.selected.contains(&option.key);
            let mark = surface
                .feedback
                .as_ref()
                .map(|fb| fb.outcome.mark_for(&option.key));
            let marker = if selected { "[x]" } else { "[ ]" };
            let text = format!("{} {}. {}", marker, option.key, option.text);
            ListItem::new(text).style(option_style(mark, selected, i == surface.option_cursor))
        })
        .collect();
    let options_title = if question.kind.allows_multiple() {
        "Options (select all that apply)"
    } else {
        "Options"
    };
    let options = List::new(items).block(Block::default().borders(Borders::ALL).title(options_title));
    f.render_widget(options, option_chunks[0]);

    if let Some(feedback) = &surface.feedback {
        let color = if feedback.correct {
            Color::Green
        } else {
            Color::Red
        };
        let text = vec![
            Line::from(Span::styled(
                feedback.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(feedback.explanation.as_str()),
        ];
        let result = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title("Result"),
            );
        f.render_widget(result, option_chunks[1]);
    }

    let mut spans = Vec::new();
    if surface.feedback.is_some() {
        spans.extend([Span::styled("Enter/n", key_style()), Span::from(" Next  ")]);
    } else {
        spans.extend([
            Span::styled("↑/↓", key_style()),
            Span::from(" Move  "),
            Span::styled("Space/key", key_style()),
            Span::from(" Select  "),
        ]);
        if surface.can_check {
            spans.extend([Span::styled("Enter", key_style()), Span::from(" Check  ")]);
        }
    }
    spans.extend([
        Span::styled("Esc", key_style()),
        Span::from(" Categories  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit"),
    ]);
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Back to Categories")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Abandon this quiz? Your score will be discarded.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Categories)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
