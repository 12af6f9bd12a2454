pub mod app;
pub mod config;
pub mod engine;
pub mod logger;
pub mod models;
pub mod store;
pub mod surface;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use app::{App, AppState, Flow};
pub use config::QuizConfig;
pub use engine::{AnswerOutcome, PresentationSurface, QuizEngine, QuizError, QuizSession};
pub use models::{CategoryFilter, OptionMark, Question, QuestionOption, QuestionType, QuizState, Score};
pub use store::{LoadError, QuestionStore, RecordError};
pub use surface::TerminalSurface;
pub use ui::{draw_menu, draw_quit_confirmation, draw_quiz, draw_summary};
pub use utils::truncate_string;
