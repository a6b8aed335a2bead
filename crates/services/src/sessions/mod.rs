mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{SessionSnapshot, SessionStatus, SessionStep};
pub use service::QuizSession;
pub use view::{CurrentQuestion, ReviewItem};
pub use workflow::QuizSessionService;
