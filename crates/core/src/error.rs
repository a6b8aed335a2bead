use thiserror::Error;

use crate::model::{AttemptSummaryError, QuestionBankError, QuestionError, QuizError};

/// Any validation failure raised while building quiz domain values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    AttemptSummary(#[from] AttemptSummaryError),
}
