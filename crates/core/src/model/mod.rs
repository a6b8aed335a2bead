mod attempt;
mod bank;
mod ids;
mod question;
mod quiz;
mod score;

pub use ids::{AttemptId, ParseIdError, QuestionId, QuizId};

pub use attempt::{AttemptSummary, AttemptSummaryError};
pub use bank::{QuestionBank, QuestionBankError};
pub use question::{MIN_OPTIONS, Question, QuestionError};
pub use quiz::{Difficulty, QuizDefinition, QuizError};
pub use score::{AnswerSheet, QuestionResult, QuizScore, percent_half_up};
