use crate::logger;
use crate::models::{Question, QuestionOption, QuestionType};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a top-level array of questions")]
    NotAnArray,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("unknown question type `{0}`")]
    UnknownType(String),
    #[error("question has no options")]
    NoOptions,
    #[error("option `{0}` text is not a string")]
    OptionNotText(String),
    #[error("correct key `{0}` is not one of the options")]
    UnknownCorrectKey(String),
    #[error("correct key `{0}` is listed twice")]
    DuplicateCorrectKey(String),
    #[error("{kind} question needs exactly one correct key, found {found}")]
    CorrectCount { kind: QuestionType, found: usize },
}

/// Shape of a record as it appears in the file. Every field is optional so
/// that missing ones can be reported by name.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    category: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    question: Option<String>,
    options: Option<Map<String, Value>>,
    correct: Option<Vec<String>>,
    explanation: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = RecordError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let category = raw.category.ok_or(RecordError::MissingField("category"))?;
        let kind_raw = raw.kind.ok_or(RecordError::MissingField("type"))?;
        let kind = QuestionType::parse(&kind_raw).ok_or(RecordError::UnknownType(kind_raw))?;
        let prompt = raw.question.ok_or(RecordError::MissingField("question"))?;
        let raw_options = raw.options.ok_or(RecordError::MissingField("options"))?;
        let correct = raw.correct.ok_or(RecordError::MissingField("correct"))?;

        if raw_options.is_empty() {
            return Err(RecordError::NoOptions);
        }

        let mut options = Vec::with_capacity(raw_options.len());
        for (key, value) in raw_options {
            match value {
                Value::String(text) => options.push(QuestionOption { key, text }),
                _ => return Err(RecordError::OptionNotText(key)),
            }
        }

        let mut correct_keys = BTreeSet::new();
        for key in correct {
            if !options.iter().any(|o| o.key == key) {
                return Err(RecordError::UnknownCorrectKey(key));
            }
            if !correct_keys.insert(key.clone()) {
                return Err(RecordError::DuplicateCorrectKey(key));
            }
        }

        let valid_count = if kind.allows_multiple() {
            !correct_keys.is_empty()
        } else {
            correct_keys.len() == 1
        };
        if !valid_count {
            return Err(RecordError::CorrectCount {
                kind,
                found: correct_keys.len(),
            });
        }

        Ok(Question {
            category,
            kind,
            prompt,
            options,
            correct_keys,
            explanation: raw.explanation.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    questions: Vec<Question>,
    categories: Vec<String>,
    rejected: usize,
}

impl QuestionStore {
    pub fn new(questions: Vec<Question>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for q in &questions {
            if !categories.contains(&q.category) {
                categories.push(q.category.clone());
            }
        }

        Self {
            questions,
            categories,
            rejected: 0,
        }
    }

    /// Parses a JSON array of question records. Records that fail validation
    /// are logged and skipped; only an unreadable document fails the load.
    pub fn from_json(data: &str) -> Result<Self, LoadError> {
        let document: Value = serde_json::from_str(data)?;
        let Value::Array(records) = document else {
            return Err(LoadError::NotAnArray);
        };

        let mut questions = Vec::with_capacity(records.len());
        let mut rejected = 0;
        for (index, record) in records.into_iter().enumerate() {
            match parse_record(record) {
                Ok(question) => questions.push(question),
                Err(e) => {
                    rejected += 1;
                    logger::warn(&format!("Skipping question #{}: {}", index + 1, e));
                }
            }
        }

        let mut store = Self::new(questions);
        store.rejected = rejected;
        Ok(store)
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn count_in(&self, category: &str) -> usize {
        self.questions
            .iter()
            .filter(|q| q.category == category)
            .count()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of records skipped during parsing.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

fn parse_record(record: Value) -> Result<Question, RecordError> {
    let raw: RawQuestion =
        serde_json::from_value(record).map_err(|e| RecordError::Malformed(e.to_string()))?;
    Question::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "category": "Roles",
            "type": "Opción Múltiple",
            "question": "Who owns the Product Backlog?",
            "options": {"B": "Scrum Master", "A": "Product Owner", "C": "Developers"},
            "correct": ["A"],
            "explanation": "The Product Owner is accountable for it."
        },
        {
            "category": "Events",
            "type": "Verdadero/Falso",
            "question": "The Sprint Review is a formal gate.",
            "options": {"A": "True", "B": "False"},
            "correct": ["B"],
            "explanation": "It is a working session."
        },
        {
            "category": "Roles",
            "type": "Selección Múltiple",
            "question": "Which are accountabilities in Scrum?",
            "options": {"A": "Product Owner", "B": "Project Manager", "C": "Scrum Master"},
            "correct": ["A", "C"],
            "explanation": "There is no project manager."
        }
    ]"#;

    #[test]
    fn test_parse_sample() {
        let store = QuestionStore::from_json(SAMPLE).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.rejected(), 0);
        assert_eq!(store.questions()[0].kind, QuestionType::SingleChoice);
        assert_eq!(store.questions()[1].kind, QuestionType::TrueFalse);
        assert_eq!(store.questions()[2].kind, QuestionType::MultiChoice);
    }

    #[test]
    fn test_categories_first_occurrence_deduplicated() {
        let store = QuestionStore::from_json(SAMPLE).unwrap();
        assert_eq!(store.categories(), &["Roles".to_string(), "Events".to_string()]);
        assert_eq!(store.count_in("Roles"), 2);
        assert_eq!(store.count_in("Events"), 1);
        assert_eq!(store.count_in("Artifacts"), 0);
    }

    #[test]
    fn test_option_order_preserved() {
        let store = QuestionStore::from_json(SAMPLE).unwrap();
        let keys: Vec<&str> = store.questions()[0]
            .options
            .iter()
            .map(|o| o.key.as_str())
            .collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_invalid_json_fails_load() {
        let result = QuestionStore::from_json("{ not json");
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_top_level_object_fails_load() {
        let result = QuestionStore::from_json(r#"{"questions": []}"#);
        assert!(matches!(result, Err(LoadError::NotAnArray)));
    }

    #[test]
    fn test_empty_array_loads_empty_store() {
        let store = QuestionStore::from_json("[]").unwrap();
        assert!(store.is_empty());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let data = r#"[
            {"category": "A", "type": "SingleChoice", "question": "ok?",
             "options": {"A": "yes", "B": "no"}, "correct": ["A"], "explanation": ""},
            {"category": "A", "type": "SingleChoice", "question": "missing correct",
             "options": {"A": "yes"}},
            {"category": "A", "type": "Essay", "question": "bad type",
             "options": {"A": "yes"}, "correct": ["A"]},
            {"category": 5, "type": "SingleChoice", "question": "bad category",
             "options": {"A": "yes"}, "correct": ["A"]},
            "not even an object",
            {"category": "B", "type": "MultiChoice", "question": "also ok",
             "options": {"A": "x", "B": "y"}, "correct": ["A", "B"]}
        ]"#;
        let store = QuestionStore::from_json(data).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.rejected(), 4);
        assert_eq!(store.categories(), &["A".to_string(), "B".to_string()]);
        assert_eq!(store.questions()[1].explanation, "");
    }

    fn record(kind: &str, options: &str, correct: &str) -> Result<Question, RecordError> {
        let json = format!(
            r#"{{"category": "C", "type": "{}", "question": "q", "options": {}, "correct": {}}}"#,
            kind, options, correct
        );
        parse_record(serde_json::from_str(&json).unwrap())
    }

    #[test]
    fn test_record_validation_errors() {
        assert_eq!(
            record("SingleChoice", r#"{"A": "x"}"#, r#"["Z"]"#),
            Err(RecordError::UnknownCorrectKey("Z".to_string()))
        );
        assert_eq!(
            record("MultiChoice", r#"{"A": "x", "B": "y"}"#, r#"["A", "A"]"#),
            Err(RecordError::DuplicateCorrectKey("A".to_string()))
        );
        assert_eq!(
            record("TrueFalse", r#"{"A": "True", "B": "False"}"#, r#"["A", "B"]"#),
            Err(RecordError::CorrectCount {
                kind: QuestionType::TrueFalse,
                found: 2
            })
        );
        assert_eq!(
            record("MultiChoice", r#"{"A": "x"}"#, "[]"),
            Err(RecordError::CorrectCount {
                kind: QuestionType::MultiChoice,
                found: 0
            })
        );
        assert_eq!(
            record("SingleChoice", "{}", r#"["A"]"#),
            Err(RecordError::NoOptions)
        );
        assert_eq!(
            record("SingleChoice", r#"{"A": 1}"#, r#"["A"]"#),
            Err(RecordError::OptionNotText("A".to_string()))
        );
    }

    #[test]
    fn test_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("questions.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = QuestionStore::from_path(&path).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_from_missing_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nope.json");
        let err = QuestionStore::from_path(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
