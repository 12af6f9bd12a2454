use crate::models::Score;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::score_percentage;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_summary(f: &mut Frame, title: &str, score: &Score) {
    let layout = calculate_summary_chunks(f.area());

    let header = Paragraph::new(format!("Quiz Finished - {}", title))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(format!("Total Questions: {}", score.answered())));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(Span::styled(
        format!("Correct: {}", score.correct),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(Span::styled(
        format!("Incorrect: {}", score.incorrect),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(""));
    if score.answered() == 0 {
        summary_text.push_line(Line::from("This category has no questions."));
    } else {
        summary_text.push_line(Line::from(format!("Score: {}%", score_percentage(score))));
    }

    let summary = Paragraph::new(summary_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Retry  "),
        Span::styled(
            "m",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Categories  "),
        Span::styled(
            "q/Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit  "),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
