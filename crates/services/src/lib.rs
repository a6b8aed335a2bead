#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use sessions::{
    CurrentQuestion, QuizSession, QuizSessionService, ReviewItem, SessionSnapshot, SessionStatus,
    SessionStep,
};
