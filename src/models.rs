use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    SingleChoice,
    TrueFalse,
    MultiChoice,
}

impl QuestionType {
    /// Parses the `type` field of a question record. Besides the canonical
    /// names, the labels used by the Spanish data files are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "SingleChoice" | "Opción Múltiple" => Some(QuestionType::SingleChoice),
            "TrueFalse" | "Verdadero/Falso" => Some(QuestionType::TrueFalse),
            "MultiChoice" | "Selección Múltiple" => Some(QuestionType::MultiChoice),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "Single choice",
            QuestionType::TrueFalse => "True / False",
            QuestionType::MultiChoice => "Multiple selection",
        }
    }

    pub fn allows_multiple(&self) -> bool {
        matches!(self, QuestionType::MultiChoice)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub category: String,
    pub kind: QuestionType,
    pub prompt: String,
    /// Options in the order they appear in the source file.
    pub options: Vec<QuestionOption>,
    pub correct_keys: BTreeSet<String>,
    pub explanation: String,
}

impl Question {
    pub fn has_option(&self, key: &str) -> bool {
        self.options.iter().any(|o| o.key == key)
    }

    pub fn is_correct_key(&self, key: &str) -> bool {
        self.correct_keys.contains(key)
    }

    /// Correct keys joined in option order, e.g. "A, C".
    pub fn correct_keys_display(&self) -> String {
        self.options
            .iter()
            .filter(|o| self.correct_keys.contains(&o.key))
            .map(|o| o.key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
}

impl Score {
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// How an option is displayed once the answer has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => question.category == *name,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CategoryFilter::All => "All questions",
            CategoryFilter::Named(name) => name.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    CategorySelection,
    InQuestion,
    AnswerShown,
    Finished,
}
