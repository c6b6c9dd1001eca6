//! Core review-scheduling library.
//!
//! Provides:
//! - Interval scheduling policy (four grade levels, lapse handling)
//! - Answer evaluation for typed and cloze reviews (Levenshtein distance)
//! - Grade suggestion from similarity scores
//! - Review log records with bounded retention
//! - Shared types (SchedulingState, CardStats, Grade, etc.)
//!
//! Both the scheduler and the evaluator are pure: the only external input
//! is the wall clock, passed in by the caller so tests can pin it.

pub mod algorithm;
pub mod error;
pub mod history;
pub mod matching;
pub mod types;

pub use algorithm::{interval::IntervalScheduler, ReviewOutcome, Scheduler};
pub use error::{Error, Result};
pub use history::{ReviewHistory, MAX_ENTRIES};
pub use matching::{evaluate, levenshtein_distance, normalize, similarity, suggest_grade};
pub use types::{
    Answer, CardStats, CardStatus, Correctness, Evaluation, Grade, IntervalUnit, ReviewLogEntry,
    SchedulingState,
};
