use crate::logger;
use crate::models::{CategoryFilter, OptionMark, Question, QuizState, Score};
use crate::store::QuestionStore;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("`{action}` is not allowed while in {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: QuizState,
    },
    #[error("option `{0}` does not belong to the current question")]
    UnknownOption(String),
    #[error("no option selected")]
    NothingSelected,
}

/// Rendering capabilities the engine drives. Implementations hold no quiz
/// logic; they only reflect what they are told.
pub trait PresentationSurface {
    fn show_categories(&mut self, categories: &[String]);
    fn show_question(&mut self, title: &str, index: usize, total: usize, question: &Question);
    fn show_selection(&mut self, selected: &BTreeSet<String>, can_check: bool);
    fn show_result(&mut self, question: &Question, outcome: &AnswerOutcome);
    fn update_score(&mut self, score: Score);
    fn update_progress(&mut self, fraction: f64);
    fn show_finished(&mut self, title: &str, score: Score);
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub selected: BTreeSet<String>,
    /// One mark per option, in option order.
    pub marks: Vec<(String, OptionMark)>,
}

impl AnswerOutcome {
    fn evaluate(question: &Question, selected: BTreeSet<String>) -> Self {
        let correct = selected == question.correct_keys;
        let marks = question
            .options
            .iter()
            .map(|o| {
                let mark = if question.is_correct_key(&o.key) {
                    OptionMark::Correct
                } else if selected.contains(&o.key) {
                    OptionMark::Incorrect
                } else {
                    OptionMark::Neutral
                };
                (o.key.clone(), mark)
            })
            .collect();

        Self {
            correct,
            selected,
            marks,
        }
    }

    pub fn mark_for(&self, key: &str) -> OptionMark {
        self.marks
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, m)| *m)
            .unwrap_or(OptionMark::Neutral)
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    pub filter: CategoryFilter,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub score: Score,
    pub selected_keys: BTreeSet<String>,
    pub last_outcome: Option<AnswerOutcome>,
}

impl QuizSession {
    fn new(filter: CategoryFilter, store: &QuestionStore) -> Self {
        let questions = store
            .questions()
            .iter()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect();

        Self {
            filter,
            questions,
            current_index: 0,
            score: Score::default(),
            selected_keys: BTreeSet::new(),
            last_outcome: None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            1.0
        } else {
            self.current_index as f64 / self.questions.len() as f64
        }
    }
}

pub struct QuizEngine<S> {
    store: QuestionStore,
    surface: S,
    state: QuizState,
    session: Option<QuizSession>,
}

impl<S: PresentationSurface> QuizEngine<S> {
    pub fn new(surface: S) -> Self {
        let mut engine = Self {
            store: QuestionStore::default(),
            surface,
            state: QuizState::CategorySelection,
            session: None,
        };
        engine.surface.show_categories(&[]);
        engine
    }

    pub fn with_store(store: QuestionStore, surface: S) -> Self {
        let mut engine = Self::new(surface);
        engine.install(store);
        engine
    }

    /// Parses `data` and replaces the store. On failure the error is logged
    /// and the engine keeps offering no categories.
    pub fn load_questions(&mut self, data: &str) -> bool {
        match QuestionStore::from_json(data) {
            Ok(store) => {
                self.install(store);
                true
            }
            Err(e) => {
                logger::error(&format!("Failed to load questions: {}", e));
                self.install(QuestionStore::default());
                false
            }
        }
    }

    pub fn load_questions_from(&mut self, path: &Path) -> bool {
        match QuestionStore::from_path(path) {
            Ok(store) => {
                self.install(store);
                true
            }
            Err(e) => {
                logger::error(&format!("Failed to load questions: {}", e));
                self.install(QuestionStore::default());
                false
            }
        }
    }

    fn install(&mut self, store: QuestionStore) {
        logger::info(&format!(
            "Loaded {} questions in {} categories ({} rejected)",
            store.len(),
            store.categories().len(),
            store.rejected()
        ));
        self.store = store;
        self.restart();
    }

    pub fn start_quiz(&mut self, filter: CategoryFilter) -> Result<(), QuizError> {
        self.ensure_state(QuizState::CategorySelection, "start")?;
        self.begin(filter);
        Ok(())
    }

    /// Starts over with the category of the finished session.
    pub fn retry(&mut self) -> Result<(), QuizError> {
        self.ensure_state(QuizState::Finished, "retry")?;
        let filter = self
            .session
            .take()
            .map(|s| s.filter)
            .unwrap_or(CategoryFilter::All);
        self.begin(filter);
        Ok(())
    }

    fn begin(&mut self, filter: CategoryFilter) {
        let session = QuizSession::new(filter, &self.store);
        logger::info(&format!(
            "Starting quiz '{}' with {} questions",
            session.filter.title(),
            session.questions.len()
        ));
        self.session = Some(session);
        self.surface.update_score(Score::default());
        self.present_current();
    }

    pub fn select_option(&mut self, key: &str) -> Result<(), QuizError> {
        self.ensure_state(QuizState::InQuestion, "select")?;
        let Some(session) = self.session.as_mut() else {
            return Err(self.invalid("select"));
        };
        let Some(question) = session.questions.get(session.current_index) else {
            return Err(QuizError::InvalidTransition {
                action: "select",
                state: self.state,
            });
        };
        if !question.has_option(key) {
            return Err(QuizError::UnknownOption(key.to_string()));
        }

        if question.kind.allows_multiple() {
            if !session.selected_keys.remove(key) {
                session.selected_keys.insert(key.to_string());
            }
        } else {
            session.selected_keys.clear();
            session.selected_keys.insert(key.to_string());
        }

        let can_check = !session.selected_keys.is_empty();
        self.surface.show_selection(&session.selected_keys, can_check);
        Ok(())
    }

    pub fn check_answer(&mut self) -> Result<AnswerOutcome, QuizError> {
        self.ensure_state(QuizState::InQuestion, "check")?;
        let Some(session) = self.session.as_mut() else {
            return Err(self.invalid("check"));
        };
        if session.selected_keys.is_empty() {
            return Err(QuizError::NothingSelected);
        }
        let Some(question) = session.questions.get(session.current_index) else {
            return Err(QuizError::InvalidTransition {
                action: "check",
                state: self.state,
            });
        };

        let selected = std::mem::take(&mut session.selected_keys);
        let outcome = AnswerOutcome::evaluate(question, selected);
        if outcome.correct {
            session.score.correct += 1;
        } else {
            session.score.incorrect += 1;
        }
        session.last_outcome = Some(outcome.clone());

        self.surface.show_result(question, &outcome);
        self.surface.update_score(session.score);
        self.state = QuizState::AnswerShown;
        Ok(outcome)
    }

    pub fn advance(&mut self) -> Result<(), QuizError> {
        self.ensure_state(QuizState::AnswerShown, "advance")?;
        let Some(session) = self.session.as_mut() else {
            return Err(self.invalid("advance"));
        };
        session.current_index = (session.current_index + 1).min(session.questions.len());
        session.last_outcome = None;
        self.present_current();
        Ok(())
    }

    /// Back to category selection; the current session is discarded.
    pub fn restart(&mut self) {
        self.session = None;
        self.state = QuizState::CategorySelection;
        self.surface.show_categories(self.store.categories());
    }

    fn present_current(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.selected_keys.clear();
        self.surface.update_progress(session.progress());

        match session.questions.get(session.current_index) {
            Some(question) => {
                self.surface.show_question(
                    session.filter.title(),
                    session.current_index,
                    session.questions.len(),
                    question,
                );
                self.surface.show_selection(&session.selected_keys, false);
                self.state = QuizState::InQuestion;
            }
            None => {
                logger::info(&format!(
                    "Quiz '{}' finished: {} correct, {} incorrect",
                    session.filter.title(),
                    session.score.correct,
                    session.score.incorrect
                ));
                self.surface
                    .show_finished(session.filter.title(), session.score);
                self.state = QuizState::Finished;
            }
        }
    }

    fn ensure_state(&self, expected: QuizState, action: &'static str) -> Result<(), QuizError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            state: self.state,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &QuestionStore {
        &self.store
    }

    pub fn categories(&self) -> &[String] {
        self.store.categories()
    }

    pub fn progress(&self) -> f64 {
        self.session.as_ref().map(|s| s.progress()).unwrap_or(0.0)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
