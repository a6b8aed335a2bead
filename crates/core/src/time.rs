use chrono::{DateTime, Duration, Utc};

/// Where attempts read their start and completion stamps from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Current time, but never earlier than `start`.
    ///
    /// Completion stamps go through here so an attempt cannot end before it
    /// began when the system clock steps backwards.
    #[must_use]
    pub fn stamp_after(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        self.now().max(start)
    }

    /// Time since `start`, floored at zero.
    #[must_use]
    pub fn elapsed_since(&self, start: DateTime<Utc>) -> Duration {
        self.stamp_after(start) - start
    }

    /// Move a fixed clock forward. No effect on `Clock::System`.
    #[cfg(any(test, feature = "test-support"))]
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
#[cfg(any(test, feature = "test-support"))]
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

#[cfg(any(test, feature = "test-support"))]
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(FIXED_TEST_TIMESTAMP, 0).unwrap_or_default()
}

#[cfg(any(test, feature = "test-support"))]
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
