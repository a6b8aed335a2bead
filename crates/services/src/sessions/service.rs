use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{
    AnswerSheet, AttemptId, AttemptSummary, Question, QuizDefinition, QuizId, QuizScore,
};

use super::progress::{SessionSnapshot, SessionStatus, SessionStep};
use super::view::{CurrentQuestion, ReviewItem};
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory attempt at a quiz.
///
/// Steps through the quiz's questions in bank order. The session is the only
/// owner of its answers and position; renderers read snapshots and issue
/// commands. Once completed, every command except `retry` is ignored.
pub struct QuizSession {
    quiz: Arc<QuizDefinition>,
    clock: Clock,
    attempt_id: AttemptId,
    status: SessionStatus,
    current: usize,
    answers: AnswerSheet,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    summary: Option<AttemptSummary>,
}

impl QuizSession {
    /// Create a session in `NotStarted` for the given quiz.
    ///
    /// The clock stamps the start and completion of the attempt.
    #[must_use]
    pub fn new(quiz: Arc<QuizDefinition>, clock: Clock) -> Self {
        Self {
            quiz,
            clock,
            attempt_id: AttemptId::generate(),
            status: SessionStatus::NotStarted,
            current: 0,
            answers: AnswerSheet::new(),
            started_at: None,
            completed_at: None,
            summary: None,
        }
    }

    /// Create a session and begin it immediately.
    #[must_use]
    pub fn started(quiz: Arc<QuizDefinition>, clock: Clock) -> Self {
        let mut session = Self::new(quiz, clock);
        session.begin();
        session
    }

    /// Move a `NotStarted` session to the first question with no answers.
    pub fn begin(&mut self) -> SessionStep {
        if self.status != SessionStatus::NotStarted {
            return SessionStep::Unchanged;
        }
        self.status = SessionStatus::InProgress;
        self.current = 0;
        self.answers = AnswerSheet::new();
        self.started_at = Some(self.clock.now());
        SessionStep::Started
    }

    /// Record `option_index` as the answer to the current question.
    ///
    /// Re-selecting overwrites the previous choice. Ignored unless the session
    /// is in progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidOption` if the current question has no such
    /// option; the answer sheet is left untouched.
    pub fn select_answer(&mut self, option_index: usize) -> Result<SessionStep, SessionError> {
        if self.status != SessionStatus::InProgress {
            return Ok(SessionStep::Unchanged);
        }
        let Some(question) = self.quiz.bank().get(self.current) else {
            return Ok(SessionStep::Unchanged);
        };
        if !question.accepts(option_index) {
            tracing::debug!(
                quiz_id = %self.quiz.id(),
                question_index = self.current,
                option_index,
                "rejected out-of-range option"
            );
            return Err(SessionError::InvalidOption {
                option_index,
                option_count: question.option_count(),
            });
        }

        self.answers.record(self.current, option_index);
        Ok(SessionStep::Answered)
    }

    /// Advance to the next question, or complete the attempt on the last one.
    ///
    /// Ignored when the current question has no answer yet.
    pub fn next(&mut self) -> SessionStep {
        if !self.can_go_next() {
            return SessionStep::Unchanged;
        }

        if self.current + 1 < self.question_count() {
            self.current += 1;
            return SessionStep::Advanced;
        }

        self.complete();
        SessionStep::Completed
    }

    /// Step back one question. Ignored on the first question.
    pub fn previous(&mut self) -> SessionStep {
        if !self.can_go_previous() {
            return SessionStep::Unchanged;
        }
        self.current -= 1;
        SessionStep::Retreated
    }

    /// Replace a completed attempt with a fresh one on the same quiz.
    ///
    /// The new attempt gets its own id and starts with no answers. Ignored
    /// unless the session is completed.
    pub fn retry(&mut self) -> SessionStep {
        if self.status != SessionStatus::Completed {
            return SessionStep::Unchanged;
        }
        *self = Self::started(Arc::clone(&self.quiz), self.clock);
        SessionStep::Started
    }

    fn complete(&mut self) {
        let started_at = self.started_at.unwrap_or_else(|| self.clock.now());
        let completed_at = self.clock.stamp_after(started_at);

        self.status = SessionStatus::Completed;
        self.completed_at = Some(completed_at);
        self.summary = match AttemptSummary::from_answers(
            &self.quiz,
            self.attempt_id,
            started_at,
            completed_at,
            &self.answers,
        ) {
            Ok(summary) => {
                tracing::info!(
                    quiz_id = %self.quiz.id(),
                    attempt_id = %self.attempt_id,
                    correct = summary.score().correct_count(),
                    total = summary.score().question_count(),
                    percent = summary.percent(),
                    "quiz attempt completed"
                );
                Some(summary)
            }
            Err(err) => {
                tracing::error!(
                    quiz_id = %self.quiz.id(),
                    attempt_id = %self.attempt_id,
                    error = %err,
                    "completed attempt could not be summarized"
                );
                None
            }
        };
    }

    //
    // ─── INSPECTION ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn quiz(&self) -> &QuizDefinition {
        &self.quiz
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz.id()
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.question_count()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// The option chosen for the current question, if any.
    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.answers.get(self.current)
    }

    /// The option chosen for the question at `index`, if any.
    #[must_use]
    pub fn selected_answer_at(&self, index: usize) -> Option<usize> {
        self.answers.get(index)
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.status == SessionStatus::InProgress && self.answers.contains(self.current)
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.status == SessionStatus::InProgress && self.current > 0
    }

    #[must_use]
    pub fn current_question(&self) -> Option<CurrentQuestion<'_>> {
        if self.status != SessionStatus::InProgress {
            return None;
        }
        let question: &Question = self.quiz.bank().get(self.current)?;
        Some(CurrentQuestion {
            index: self.current,
            question_count: self.question_count(),
            prompt: question.prompt(),
            options: question.options(),
            hint: question.hint(),
            selected_answer: self.selected_answer(),
        })
    }

    /// Owned view of the session for renderers.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            current_index: self.current,
            question_count: self.question_count(),
            selected_answer: self.selected_answer(),
            answered_count: self.answers.len(),
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
        }
    }

    /// Score of the answers recorded so far. Valid in any state.
    #[must_use]
    pub fn score(&self) -> QuizScore {
        QuizScore::compute(self.quiz.bank(), &self.answers)
    }

    /// Summary computed when the attempt completed.
    #[must_use]
    pub fn summary(&self) -> Option<&AttemptSummary> {
        self.summary.as_ref()
    }

    /// Question-by-question review, available once completed.
    #[must_use]
    pub fn review_items(&self) -> Vec<ReviewItem> {
        match &self.summary {
            Some(summary) => ReviewItem::collect(&self.quiz, summary.score()),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    //
    // ─── ADVISORY TIMING ───────────────────────────────────────────────────────
    //

    /// Time spent so far, frozen at completion. Zero before the attempt begins.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.completed_at) {
            (None, _) => Duration::zero(),
            (Some(start), Some(end)) => end - start,
            (Some(start), None) => self.clock.elapsed_since(start),
        }
    }

    /// Remaining time against the quiz's advisory limit, floored at zero.
    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        let limit = Duration::seconds(i64::from(self.quiz.time_limit_secs()));
        (limit - self.elapsed()).max(Duration::zero())
    }

    /// Whether the advisory time limit has passed. Never ends the attempt.
    #[must_use]
    pub fn is_over_time(&self) -> bool {
        self.elapsed() > Duration::seconds(i64::from(self.quiz.time_limit_secs()))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz.id())
            .field("attempt_id", &self.attempt_id)
            .field("status", &self.status)
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, QuestionBank, QuestionId};
    use quiz_core::time::{fixed_clock, fixed_now};

    fn build_quiz(correct: &[usize]) -> Arc<QuizDefinition> {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Question::new(
                    QuestionId::new(i as u64 + 1),
                    format!("Q{i}"),
                    vec!["a".into(), "b".into(), "c".into()],
                    *c,
                )
                .unwrap()
                .with_explanation(Some(format!("because {c}")))
            })
            .collect();
        Arc::new(
            QuizDefinition::new(
                QuizId::new(1),
                "Test",
                Difficulty::Beginner,
                10,
                60,
                QuestionBank::new(questions).unwrap(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn new_session_is_not_started_and_ignores_commands() {
        let mut session = QuizSession::new(build_quiz(&[0, 1]), fixed_clock());

        assert_eq!(session.status(), SessionStatus::NotStarted);
        assert_eq!(session.select_answer(0).unwrap(), SessionStep::Unchanged);
        assert_eq!(session.next(), SessionStep::Unchanged);
        assert_eq!(session.previous(), SessionStep::Unchanged);
        assert!(session.answers().is_empty());
        assert!(session.current_question().is_none());
        assert_eq!(session.elapsed(), Duration::zero());
    }

    #[test]
    fn begin_moves_to_first_question() {
        let mut session = QuizSession::new(build_quiz(&[0, 1]), fixed_clock());
        assert_eq!(session.begin(), SessionStep::Started);
        assert_eq!(session.begin(), SessionStep::Unchanged);

        let snap = session.snapshot();
        assert_eq!(snap.status, SessionStatus::InProgress);
        assert_eq!(snap.current_index, 0);
        assert_eq!(snap.question_count, 2);
        assert_eq!(snap.selected_answer, None);
        assert!(!snap.can_go_next);
        assert!(!snap.can_go_previous);
        assert_eq!(session.started_at(), Some(fixed_now()));
    }

    #[test]
    fn reselecting_overwrites() {
        let mut session = QuizSession::started(build_quiz(&[0, 1]), fixed_clock());
        session.select_answer(0).unwrap();
        session.select_answer(2).unwrap();
        assert_eq!(session.selected_answer(), Some(2));
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn out_of_range_option_is_rejected_without_side_effects() {
        let mut session = QuizSession::started(build_quiz(&[0, 1]), fixed_clock());
        session.select_answer(1).unwrap();

        let err = session.select_answer(3).unwrap_err();

        assert!(matches!(
            err,
            SessionError::InvalidOption {
                option_index: 3,
                option_count: 3
            }
        ));
        assert_eq!(session.selected_answer(), Some(1));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn completing_freezes_the_session() {
        let mut session = QuizSession::started(build_quiz(&[0, 1]), fixed_clock());
        session.select_answer(0).unwrap();
        assert_eq!(session.next(), SessionStep::Advanced);
        session.select_answer(1).unwrap();
        assert_eq!(session.next(), SessionStep::Completed);

        assert!(session.is_complete());
        assert_eq!(session.next(), SessionStep::Unchanged);
        assert_eq!(session.previous(), SessionStep::Unchanged);
        assert_eq!(session.select_answer(0).unwrap(), SessionStep::Unchanged);
        // out-of-range input is ignored too once completed
        assert_eq!(session.select_answer(99).unwrap(), SessionStep::Unchanged);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_answer_at(1), Some(1));
        assert!(session.current_question().is_none());

        let summary = session.summary().unwrap();
        assert_eq!(summary.percent(), 100);
        assert_eq!(summary.completed_at(), fixed_now());
    }

    #[test]
    fn review_items_carry_question_text() {
        let mut session = QuizSession::started(build_quiz(&[2, 0]), fixed_clock());
        assert!(session.review_items().is_empty());
        session.select_answer(2).unwrap();
        session.next();
        session.select_answer(1).unwrap();
        session.next();

        let items = session.review_items();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_correct);
        assert_eq!(items[0].chosen_text(), Some("c"));
        assert_eq!(items[1].chosen_text(), Some("b"));
        assert_eq!(items[1].correct_text(), Some("a"));
        assert_eq!(items[1].explanation.as_deref(), Some("because 0"));
    }

    #[test]
    fn retry_only_applies_to_completed_sessions() {
        let mut session = QuizSession::started(build_quiz(&[0]), fixed_clock());
        session.select_answer(0).unwrap();
        assert_eq!(session.retry(), SessionStep::Unchanged);
        assert_eq!(session.selected_answer(), Some(0));

        let first_attempt = session.attempt_id();
        session.next();
        assert_eq!(session.retry(), SessionStep::Started);

        assert_ne!(session.attempt_id(), first_attempt);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert!(session.answers().is_empty());
        assert!(session.summary().is_none());
        assert_eq!(session.completed_at(), None);
    }

    #[test]
    fn advisory_timer_never_blocks() {
        let mut clock = fixed_clock();
        let quiz = build_quiz(&[0]);
        let mut session = QuizSession::started(Arc::clone(&quiz), clock);
        assert_eq!(session.time_remaining(), Duration::seconds(60));

        clock.advance(Duration::seconds(90));
        session.clock = clock;
        assert!(session.is_over_time());
        assert_eq!(session.time_remaining(), Duration::zero());

        session.select_answer(0).unwrap();
        assert_eq!(session.next(), SessionStep::Completed);
        assert_eq!(session.elapsed(), Duration::seconds(90));
        assert_eq!(session.summary().unwrap().duration_secs(), 90);
    }

    #[test]
    fn clock_stepping_backwards_cannot_invert_the_attempt() {
        let quiz = build_quiz(&[1]);
        let mut session = QuizSession::started(quiz, fixed_clock());
        session.clock = Clock::fixed(fixed_now() - Duration::minutes(10));

        session.select_answer(1).unwrap();
        assert_eq!(session.elapsed(), Duration::zero());
        assert_eq!(session.next(), SessionStep::Completed);

        assert_eq!(session.completed_at(), Some(fixed_now()));
        assert_eq!(session.summary().unwrap().duration_secs(), 0);
    }
}
