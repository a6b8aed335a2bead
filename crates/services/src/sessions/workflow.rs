use std::sync::Arc;

use quiz_core::model::{AttemptSummary, QuizId};
use storage::repository::{QuizCatalog, QuizListItem, StorageError};

use super::progress::SessionStep;
use super::service::QuizSession;
use crate::Clock;
use crate::error::SessionError;

/// Orchestrates session start, retry and exit against a quiz catalog.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    catalog: Arc<dyn QuizCatalog>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<dyn QuizCatalog>) -> Self {
        Self { clock, catalog }
    }

    /// Quizzes available to start, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the catalog cannot be read.
    pub fn list_quizzes(&self) -> Result<Vec<QuizListItem>, SessionError> {
        Ok(self.catalog.list_quizzes()?)
    }

    /// Start a new attempt at the given quiz.
    ///
    /// The returned session is already on the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuizNotFound` if the catalog has no such quiz, or
    /// `SessionError::Storage` for other catalog failures.
    pub fn start(&self, quiz_id: QuizId) -> Result<QuizSession, SessionError> {
        let quiz = self.catalog.get_quiz(quiz_id).map_err(|err| match err {
            StorageError::NotFound => SessionError::QuizNotFound(quiz_id),
            other => SessionError::Storage(other),
        })?;

        let session = QuizSession::started(quiz, self.clock);
        tracing::info!(
            quiz_id = %quiz_id,
            attempt_id = %session.attempt_id(),
            questions = session.question_count(),
            "quiz attempt started"
        );
        Ok(session)
    }

    /// Restart a completed attempt in place with empty answers.
    ///
    /// Sessions that are not completed are left untouched.
    pub fn retry(&self, session: &mut QuizSession) -> SessionStep {
        let previous = session.attempt_id();
        let step = session.retry();
        if step.changed() {
            tracing::info!(
                quiz_id = %session.quiz_id(),
                previous_attempt = %previous,
                attempt_id = %session.attempt_id(),
                "quiz attempt retried"
            );
        }
        step
    }

    /// Leave the quiz, handing back the summary of a completed attempt.
    ///
    /// Nothing is persisted; an unfinished attempt is simply dropped.
    #[must_use]
    pub fn exit(&self, session: QuizSession) -> Option<AttemptSummary> {
        if !session.is_complete() {
            tracing::debug!(
                quiz_id = %session.quiz_id(),
                attempt_id = %session.attempt_id(),
                answered = session.answers().len(),
                "abandoned unfinished attempt"
            );
        }
        session.summary().cloned()
    }
}
