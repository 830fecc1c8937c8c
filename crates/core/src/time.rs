use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Fixed display offset for Duomonggo deadlines (UTC+7, Bangkok/Jakarta).
///
/// The service stores deadlines as UTC instants; all comparison and display
/// happens at this offset, never at the host timezone.
const BANGKOK_OFFSET_SECONDS: i32 = 7 * 3600;

fn bangkok_offset() -> FixedOffset {
    FixedOffset::east_opt(BANGKOK_OFFSET_SECONDS).expect("UTC+7 is a valid fixed offset")
}

/// Whether `deadline` (a stored UTC instant) has passed at `now`.
///
/// Pure function of the two instants; the executing environment's local
/// timezone is never consulted.
#[must_use]
pub fn deadline_passed(now: DateTime<Utc>, deadline: NaiveDateTime) -> bool {
    deadline.and_utc() < now
}

/// Format a stored deadline for display at UTC+7, e.g. `2025-06-01 19:00`.
#[must_use]
pub fn format_deadline(deadline: NaiveDateTime) -> String {
    deadline
        .and_utc()
        .with_timezone(&bangkok_offset())
        .format("%b %e, %Y %H:%M")
        .to_string()
}

/// Format an elapsed completion time as whole minutes and seconds.
#[must_use]
pub fn format_elapsed(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}m {seconds}s")
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
