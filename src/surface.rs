use crate::engine::{AnswerOutcome, PresentationSurface};
use crate::models::{Question, Score};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub correct: bool,
    pub title: String,
    pub explanation: String,
    pub outcome: AnswerOutcome,
}

impl Feedback {
    fn from_outcome(question: &Question, outcome: &AnswerOutcome) -> Self {
        if outcome.correct {
            Self {
                correct: true,
                title: "Correct!".to_string(),
                explanation: question.explanation.clone(),
                outcome: outcome.clone(),
            }
        } else {
            let explanation = format!(
                "The correct answer(s): {}. {}",
                question.correct_keys_display(),
                question.explanation
            );
            Self {
                correct: false,
                title: "Incorrect".to_string(),
                explanation: explanation.trim_end().to_string(),
                outcome: outcome.clone(),
            }
        }
    }
}

/// View model for the terminal front end. The engine writes into it and the
/// `ui` draw functions read from it; the option cursor is the only state the
/// front end owns itself.
#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    pub categories: Vec<String>,
    pub title: String,
    pub question_index: usize,
    pub question_total: usize,
    pub question: Option<Question>,
    pub selected: BTreeSet<String>,
    pub can_check: bool,
    pub feedback: Option<Feedback>,
    pub score: Score,
    pub progress: f64,
    pub final_score: Option<Score>,
    pub option_cursor: usize,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn option_count(&self) -> usize {
        self.question.as_ref().map(|q| q.options.len()).unwrap_or(0)
    }

    pub fn cursor_up(&mut self) {
        self.option_cursor = self.option_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.option_cursor < self.option_count().saturating_sub(1) {
            self.option_cursor += 1;
        }
    }

    /// Key of the option under the cursor.
    pub fn cursor_key(&self) -> Option<&str> {
        self.question
            .as_ref()
            .and_then(|q| q.options.get(self.option_cursor))
            .map(|o| o.key.as_str())
    }

    /// Finds the option whose key matches a typed character, ignoring case.
    pub fn key_for_char(&self, c: char) -> Option<String> {
        let question = self.question.as_ref()?;
        question
            .options
            .iter()
            .find(|o| {
                let mut chars = o.key.chars();
                matches!((chars.next(), chars.next()), (Some(k), None) if k.eq_ignore_ascii_case(&c))
            })
            .map(|o| o.key.clone())
    }
}

impl PresentationSurface for TerminalSurface {
    fn show_categories(&mut self, categories: &[String]) {
        *self = Self {
            categories: categories.to_vec(),
            ..Self::default()
        };
    }

    fn show_question(&mut self, title: &str, index: usize, total: usize, question: &Question) {
        self.title = title.to_string();
        self.question_index = index;
        self.question_total = total;
        self.question = Some(question.clone());
        self.feedback = None;
        self.final_score = None;
        self.option_cursor = 0;
    }

    fn show_selection(&mut self, selected: &BTreeSet<String>, can_check: bool) {
        self.selected = selected.clone();
        self.can_check = can_check;
    }

    fn show_result(&mut self, question: &Question, outcome: &AnswerOutcome) {
        self.feedback = Some(Feedback::from_outcome(question, outcome));
        self.selected = outcome.selected.clone();
        self.can_check = false;
    }

    fn update_score(&mut self, score: Score) {
        self.score = score;
    }

    fn update_progress(&mut self, fraction: f64) {
        self.progress = fraction.clamp(0.0, 1.0);
    }

    fn show_finished(&mut self, title: &str, score: Score) {
        self.title = title.to_string();
        self.question = None;
        self.feedback = None;
        self.selected.clear();
        self.can_check = false;
        self.score = score;
        self.final_score = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QuizEngine;
    use crate::models::{CategoryFilter, QuestionOption, QuestionType};
    use crate::store::QuestionStore;

    fn sample_store() -> QuestionStore {
        QuestionStore::new(vec![Question {
            category: "Artifacts".to_string(),
            kind: QuestionType::MultiChoice,
            prompt: "Which are Scrum artifacts?".to_string(),
            options: vec![
                QuestionOption {
                    key: "A".to_string(),
                    text: "Product Backlog".to_string(),
                },
                QuestionOption {
                    key: "B".to_string(),
                    text: "Burndown chart".to_string(),
                },
                QuestionOption {
                    key: "C".to_string(),
                    text: "Increment".to_string(),
                },
            ],
            correct_keys: ["A", "C"].iter().map(|k| k.to_string()).collect(),
            explanation: "Burndown charts are optional.".to_string(),
        }])
    }

    #[test]
    fn test_cursor_bounds() {
        let mut engine = QuizEngine::with_store(sample_store(), TerminalSurface::new());
        engine.start_quiz(CategoryFilter::All).unwrap();
        let surface = engine.surface_mut();

        surface.cursor_up();
        assert_eq!(surface.option_cursor, 0);
        for _ in 0..10 {
            surface.cursor_down();
        }
        assert_eq!(surface.option_cursor, 2);
        assert_eq!(surface.cursor_key(), Some("C"));
    }

    #[test]
    fn test_key_for_char_ignores_case() {
        let mut engine = QuizEngine::with_store(sample_store(), TerminalSurface::new());
        engine.start_quiz(CategoryFilter::All).unwrap();
        assert_eq!(engine.surface().key_for_char('b'), Some("B".to_string()));
        assert_eq!(engine.surface().key_for_char('z'), None);
    }

    #[test]
    fn test_feedback_on_wrong_answer_lists_correct_keys() {
        let mut engine = QuizEngine::with_store(sample_store(), TerminalSurface::new());
        engine.start_quiz(CategoryFilter::All).unwrap();
        engine.select_option("A").unwrap();
        engine.check_answer().unwrap();

        let feedback = engine.surface().feedback.clone().unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.title, "Incorrect");
        assert_eq!(
            feedback.explanation,
            "The correct answer(s): A, C. Burndown charts are optional."
        );
        assert_eq!(engine.surface().score.incorrect, 1);
    }

    #[test]
    fn test_feedback_on_correct_answer() {
        let mut engine = QuizEngine::with_store(sample_store(), TerminalSurface::new());
        engine.start_quiz(CategoryFilter::All).unwrap();
        engine.select_option("C").unwrap();
        engine.select_option("A").unwrap();
        assert!(engine.surface().can_check);
        engine.check_answer().unwrap();

        let feedback = engine.surface().feedback.clone().unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.title, "Correct!");
        assert_eq!(feedback.explanation, "Burndown charts are optional.");
    }

    #[test]
    fn test_finished_and_back_to_categories() {
        let mut engine = QuizEngine::with_store(sample_store(), TerminalSurface::new());
        engine.start_quiz(CategoryFilter::All).unwrap();
        engine.select_option("B").unwrap();
        engine.check_answer().unwrap();
        engine.advance().unwrap();

        assert_eq!(
            engine.surface().final_score,
            Some(Score {
                correct: 0,
                incorrect: 1
            })
        );
        assert_eq!(engine.surface().progress, 1.0);

        engine.restart();
        assert_eq!(engine.surface().categories, vec!["Artifacts"]);
        assert!(engine.surface().final_score.is_none());
        assert!(engine.surface().question.is_none());
    }
}
