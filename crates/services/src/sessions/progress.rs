use serde::Serialize;

/// Lifecycle of a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// What a session command did.
///
/// `Unchanged` covers every ignored command: advancing without an answer,
/// stepping back from the first question, and anything sent to a session
/// that is not in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Started,
    Answered,
    Advanced,
    Retreated,
    Completed,
    Unchanged,
}

impl SessionStep {
    #[must_use]
    pub fn changed(self) -> bool {
        !matches!(self, SessionStep::Unchanged)
    }
}

/// Read-only view of a session handed to the renderer after each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub current_index: usize,
    pub question_count: usize,
    pub selected_answer: Option<usize>,
    pub answered_count: usize,
    pub can_go_next: bool,
    pub can_go_previous: bool,
}

impl SessionSnapshot {
    /// True when the next `next()` would finish the attempt.
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.question_count
    }
}
