//! JSON catalog format.
//!
//! Records mirror the domain types so the file layout stays independent of
//! the validated constructors in `quiz-core`.

use std::path::Path;

use quiz_core::model::{
    Difficulty, Question, QuestionBank, QuestionId, QuizDefinition, QuizId,
};
use serde::{Deserialize, Serialize};

use crate::repository::{InMemoryCatalog, StorageError};

/// Top-level document of a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub quizzes: Vec<QuizRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: QuizId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub point_value: u32,
    pub time_limit_secs: u32,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id(),
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            correct_option_index: question.correct_option_index(),
            explanation: question.explanation().map(str::to_owned),
            hint: question.hint().map(str::to_owned),
        }
    }

    /// Convert the record into a validated `Question`.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error::Question` if validation fails.
    pub fn into_question(self) -> Result<Question, quiz_core::Error> {
        Ok(
            Question::new(self.id, self.prompt, self.options, self.correct_option_index)?
                .with_explanation(self.explanation)
                .with_hint(self.hint),
        )
    }
}

impl QuizRecord {
    #[must_use]
    pub fn from_quiz(quiz: &QuizDefinition) -> Self {
        Self {
            id: quiz.id(),
            title: quiz.title().to_owned(),
            description: quiz.description().map(str::to_owned),
            difficulty: quiz.difficulty(),
            point_value: quiz.point_value(),
            time_limit_secs: quiz.time_limit_secs(),
            questions: quiz
                .bank()
                .iter()
                .map(QuestionRecord::from_question)
                .collect(),
        }
    }

    /// Convert the record back into a domain `QuizDefinition`.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if any question, the bank, or the quiz fails validation.
    pub fn into_quiz(self) -> Result<QuizDefinition, quiz_core::Error> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        let bank = QuestionBank::new(questions)?;
        Ok(QuizDefinition::new(
            self.id,
            self.title,
            self.difficulty,
            self.point_value,
            self.time_limit_secs,
            bank,
        )?
        .with_description(self.description))
    }
}

impl CatalogFile {
    /// Parse a catalog document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Render the catalog as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    #[must_use]
    pub fn from_quizzes<'a>(quizzes: impl IntoIterator<Item = &'a QuizDefinition>) -> Self {
        Self {
            quizzes: quizzes.into_iter().map(QuizRecord::from_quiz).collect(),
        }
    }

    /// Validate every record and build an in-memory catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Invalid` for a record that fails validation and
    /// `StorageError::Conflict` for duplicate quiz ids.
    pub fn into_catalog(self) -> Result<InMemoryCatalog, StorageError> {
        let quizzes = self
            .quizzes
            .into_iter()
            .map(|record| {
                let id = record.id;
                record.into_quiz().inspect_err(|err| {
                    tracing::warn!(quiz_id = %id, error = %err, "rejected catalog entry");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        InMemoryCatalog::from_quizzes(quizzes)
    }
}

/// Load a catalog from a JSON file on disk.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, plus any error from
/// [`CatalogFile::from_json`] or [`CatalogFile::into_catalog`].
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog, StorageError> {
    let raw = std::fs::read_to_string(path)?;
    let file = CatalogFile::from_json(&raw)?;
    let count = file.quizzes.len();
    let catalog = file.into_catalog()?;
    tracing::info!(path = %path.display(), quizzes = count, "loaded quiz catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::QuizCatalog;

    const SAMPLE: &str = r##"{
        "quizzes": [
            {
                "id": 7,
                "title": "Preprocessor",
                "difficulty": "intermediate",
                "point_value": 20,
                "time_limit_secs": 180,
                "questions": [
                    {
                        "id": 1,
                        "prompt": "Which directive guards against double inclusion?",
                        "options": ["#pragma once", "#define once", "#include once"],
                        "correct_option_index": 0,
                        "hint": "It is non-standard but widely supported."
                    },
                    {
                        "id": 2,
                        "prompt": "When are macros expanded?",
                        "options": ["At link time", "Before compilation"],
                        "correct_option_index": 1
                    }
                ]
            }
        ]
    }"##;

    #[test]
    fn parses_sample_catalog() {
        let catalog = CatalogFile::from_json(SAMPLE).unwrap().into_catalog().unwrap();
        let quiz = catalog.get_quiz(QuizId::new(7)).unwrap();

        assert_eq!(quiz.title(), "Preprocessor");
        assert_eq!(quiz.difficulty(), Difficulty::Intermediate);
        assert_eq!(quiz.question_count(), 2);
        let first = quiz.bank().get(0).unwrap();
        assert_eq!(first.hint(), Some("It is non-standard but widely supported."));
        assert_eq!(first.explanation(), None);
        assert_eq!(first.options()[0], "#pragma once");
        assert_eq!(first.options()[2], "#include once");
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = CatalogFile::from_json("{ \"quizzes\": [").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn out_of_range_correct_index_is_invalid() {
        let json = SAMPLE.replace("\"correct_option_index\": 1", "\"correct_option_index\": 5");
        let err = CatalogFile::from_json(&json)
            .unwrap()
            .into_catalog()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StorageError::Invalid(quiz_core::Error::Question(_))
        ));
    }

    #[test]
    fn empty_question_list_is_invalid() {
        let mut file = CatalogFile::from_json(SAMPLE).unwrap();
        file.quizzes[0].questions.clear();
        let err = file.into_catalog().err().unwrap();
        assert!(matches!(
            err,
            StorageError::Invalid(quiz_core::Error::QuestionBank(_))
        ));
    }

    #[test]
    fn record_round_trips_through_domain() {
        let file = CatalogFile::from_json(SAMPLE).unwrap();
        let quiz = file.quizzes[0].clone().into_quiz().unwrap();
        assert_eq!(QuizRecord::from_quiz(&quiz), file.quizzes[0]);
    }
}
