use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::bank::QuestionBank;
use crate::model::ids::QuizId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz time limit must be > 0 seconds")]
    InvalidTimeLimit,
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty label shown in the catalog. Has no effect on scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── QUIZ DEFINITION ───────────────────────────────────────────────────────────
//

/// Catalog entry for a quiz together with the bank it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDefinition {
    id: QuizId,
    title: String,
    description: Option<String>,
    difficulty: Difficulty,
    point_value: u32,
    time_limit_secs: u32,
    bank: QuestionBank,
}

impl QuizDefinition {
    /// Creates a quiz definition.
    ///
    /// `time_limit_secs` is advisory; the engine reports it but never enforces it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTitle` for a blank title and
    /// `QuizError::InvalidTimeLimit` for a zero time limit.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        difficulty: Difficulty,
        point_value: u32,
        time_limit_secs: u32,
        bank: QuestionBank,
    ) -> Result<Self, QuizError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if time_limit_secs == 0 {
            return Err(QuizError::InvalidTimeLimit);
        }

        Ok(Self {
            id,
            title,
            description: None,
            difficulty,
            point_value,
            time_limit_secs,
            bank,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        self
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn point_value(&self) -> u32 {
        self.point_value
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.bank.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionId};

    fn bank() -> QuestionBank {
        let q = Question::new(
            QuestionId::new(1),
            "Which header declares printf?",
            vec!["<stdio.h>".into(), "<stdlib.h>".into()],
            0,
        )
        .unwrap();
        QuestionBank::new(vec![q]).unwrap()
    }

    #[test]
    fn quiz_rejects_blank_title() {
        let err = QuizDefinition::new(QuizId::new(1), "  ", Difficulty::Beginner, 10, 60, bank())
            .unwrap_err();
        assert_eq!(err, QuizError::EmptyTitle);
    }

    #[test]
    fn quiz_rejects_zero_time_limit() {
        let err = QuizDefinition::new(QuizId::new(1), "C", Difficulty::Beginner, 10, 0, bank())
            .unwrap_err();
        assert_eq!(err, QuizError::InvalidTimeLimit);
    }

    #[test]
    fn quiz_happy_path() {
        let quiz = QuizDefinition::new(
            QuizId::new(4),
            " C Basics ",
            Difficulty::Intermediate,
            50,
            300,
            bank(),
        )
        .unwrap()
        .with_description(Some("  syntax and types ".into()));

        assert_eq!(quiz.id(), QuizId::new(4));
        assert_eq!(quiz.title(), "C Basics");
        assert_eq!(quiz.description(), Some("syntax and types"));
        assert_eq!(quiz.difficulty(), Difficulty::Intermediate);
        assert_eq!(quiz.point_value(), 50);
        assert_eq!(quiz.time_limit_secs(), 300);
        assert_eq!(quiz.question_count(), 1);
    }

    #[test]
    fn difficulty_serializes_snake_case() {
        let json = serde_json::to_string(&Difficulty::Advanced).unwrap();
        assert_eq!(json, "\"advanced\"");
        assert_eq!(Difficulty::Beginner.to_string(), "Beginner");
    }
}
