pub mod layout;
mod menu;
mod quiz;
mod summary;

pub use layout::{calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::{draw_menu, menu_entries};
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use summary::draw_summary;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QuizEngine;
    use crate::models::{CategoryFilter, Question, QuestionOption, QuestionType, Score};
    use crate::store::QuestionStore;
    use crate::surface::TerminalSurface;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn store() -> QuestionStore {
        QuestionStore::new(vec![Question {
            category: "Events".to_string(),
            kind: QuestionType::TrueFalse,
            prompt: "The Daily Scrum is 15 minutes".to_string(),
            options: vec![
                QuestionOption {
                    key: "A".to_string(),
                    text: "True".to_string(),
                },
                QuestionOption {
                    key: "B".to_string(),
                    text: "False".to_string(),
                },
            ],
            correct_keys: ["A".to_string()].into_iter().collect(),
            explanation: "It is timeboxed".to_string(),
        }])
    }

    #[test]
    fn test_menu_renders_categories_and_all() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let store = store();
        terminal.draw(|f| draw_menu(f, &store, 0, None)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Events (1)"));
        assert!(text.contains("All questions (1)"));
    }

    #[test]
    fn test_menu_renders_load_error() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let store = QuestionStore::default();
        terminal
            .draw(|f| draw_menu(f, &store, 0, Some("questions.json")))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("No categories loaded"));
        assert!(text.contains("All questions (0)"));
    }

    #[test]
    fn test_menu_entries_order() {
        assert_eq!(menu_entries(&store()), vec!["Events (1)", "All questions (1)"]);
    }

    #[test]
    fn test_quiz_renders_question_and_feedback() {
        let mut engine = QuizEngine::with_store(store(), TerminalSurface::new());
        engine.start_quiz(CategoryFilter::All).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, engine.surface())).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Question 1 of 1 - All questions"));
        assert!(text.contains("The Daily Scrum is 15 minutes"));
        assert!(text.contains("A. True"));

        engine.select_option("B").unwrap();
        engine.check_answer().unwrap();
        terminal.draw(|f| draw_quiz(f, engine.surface())).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Incorrect"));
        assert!(text.contains("Correct: 0  Incorrect: 1"));
    }

    #[test]
    fn test_summary_renders_totals() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let score = Score {
            correct: 3,
            incorrect: 1,
        };
        terminal.draw(|f| draw_summary(f, "Events", &score)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Quiz Finished - Events"));
        assert!(text.contains("Correct: 3"));
        assert!(text.contains("Score: 75%"));
    }

    #[test]
    fn test_quit_confirmation_renders() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(draw_quit_confirmation).unwrap();
        assert!(buffer_text(&terminal).contains("Back to Categories"));
    }
}
