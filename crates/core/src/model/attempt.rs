use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerSheet, AttemptId, QuestionResult, QuizDefinition, QuizId, QuizScore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("question {index} has no recorded answer")]
    Unanswered { index: usize },
}

/// Aggregate result of a completed quiz attempt.
///
/// Lives only as long as the caller keeps it; attempts are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    quiz_id: QuizId,
    attempt_id: AttemptId,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    point_value: u32,
    score: QuizScore,
}

impl AttemptSummary {
    /// Build a summary from the final answer sheet of an attempt.
    ///
    /// # Errors
    ///
    /// Returns `AttemptSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `AttemptSummaryError::Unanswered` if any question lacks an answer; a
    /// completed attempt answers every question.
    pub fn from_answers(
        quiz: &QuizDefinition,
        attempt_id: AttemptId,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        answers: &AnswerSheet,
    ) -> Result<Self, AttemptSummaryError> {
        if completed_at < started_at {
            return Err(AttemptSummaryError::InvalidTimeRange);
        }
        if let Some(index) = (0..quiz.question_count()).find(|i| !answers.contains(*i)) {
            return Err(AttemptSummaryError::Unanswered { index });
        }

        Ok(Self {
            quiz_id: quiz.id(),
            attempt_id,
            started_at,
            completed_at,
            point_value: quiz.point_value(),
            score: QuizScore::compute(quiz.bank(), answers),
        })
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Wall-clock time between start and completion, in whole seconds.
    #[must_use]
    pub fn duration_secs(&self) -> i64 {
        (self.completed_at - self.started_at).num_seconds()
    }

    /// The quiz's advertised point value. Not scaled by the score.
    #[must_use]
    pub fn point_value(&self) -> u32 {
        self.point_value
    }

    #[must_use]
    pub fn score(&self) -> &QuizScore {
        &self.score
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.score.percent()
    }

    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        self.score.results()
    }
}
