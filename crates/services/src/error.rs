//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizId;
use storage::repository::StorageError;

/// Errors emitted by quiz sessions and the session service.
///
/// Navigation misuse (advancing without an answer, stepping back from the
/// first question, commands on a finished attempt) is not an error; those
/// calls report `SessionStep::Unchanged` instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz {0} not found")]
    QuizNotFound(QuizId),
    #[error("option {option_index} is out of range for a question with {option_count} options")]
    InvalidOption {
        option_index: usize,
        option_count: usize,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
