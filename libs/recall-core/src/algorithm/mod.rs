//! Review scheduling policies.

pub mod interval;

use chrono::{DateTime, Utc};

use crate::types::{CardStats, Grade, ReviewLogEntry, SchedulingState};

/// Everything produced by one review: the card's next scheduling state,
/// its updated rolling statistics, and an append-only log record.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub state: SchedulingState,
    pub stats: CardStats,
    pub log: ReviewLogEntry,
}

/// Trait for review scheduling policies.
pub trait Scheduler: Send + Sync {
    /// Policy identifier.
    fn name(&self) -> &'static str;

    /// Scheduling state for a card that has never been reviewed.
    fn initial_state(&self) -> SchedulingState;

    /// Rolling statistics for a card that has never been reviewed.
    fn initial_stats(&self) -> CardStats;

    /// Compute the next state after a review.
    ///
    /// Inputs are read-only snapshots; the caller persists the returned
    /// values. `now` is captured once and stamps the due time, the last
    /// review time and the log entry.
    fn schedule(
        &self,
        state: &SchedulingState,
        stats: &CardStats,
        grade: Grade,
        time_spent_secs: f64,
        typed_answer: Option<&str>,
        now: DateTime<Utc>,
    ) -> ReviewOutcome;
}
