use std::path::PathBuf;

pub const DEFAULT_QUESTIONS_FILE: &str = "questions.json";
pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

pub const QUESTIONS_ENV: &str = "QUIZ_QUESTIONS_FILE";
pub const LOG_ENV: &str = "QUIZ_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub questions_path: PathBuf,
    pub log_path: PathBuf,
}

impl QuizConfig {
    /// First CLI argument wins over `QUIZ_QUESTIONS_FILE`, which wins over the default.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(QUESTIONS_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
        )
    }

    pub fn resolve(
        arg_questions: Option<String>,
        env_questions: Option<String>,
        env_log: Option<String>,
    ) -> Self {
        let questions_path = arg_questions
            .filter(|s| !s.trim().is_empty())
            .or(env_questions.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_QUESTIONS_FILE.to_string());
        let log_path = env_log
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Self {
            questions_path: PathBuf::from(questions_path),
            log_path: PathBuf::from(log_path),
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}
