//! Core types for the review scheduler and answer evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Card learning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Relearning,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Grade given to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Grade {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Self::from_value(value).ok_or(Error::InvalidGrade { value })
    }
}

/// Unit of the raw `interval` number.
///
/// The scheduling policy stores minutes for the short learning and
/// relearning steps and days once a card graduates to review. The raw
/// number keeps the persisted convention; the tag makes the unit explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Minutes,
    Days,
}

/// Card scheduling state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SchedulingStateWire")]
pub struct SchedulingState {
    pub status: CardStatus,
    /// Raw interval number, minutes or days per `interval_unit`.
    pub interval: f64,
    pub interval_unit: IntervalUnit,
    pub ease: f64,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due: Option<DateTime<Utc>>,
    pub lapses: u32,
    pub reps: u32,
}

impl Default for SchedulingState {
    fn default() -> Self {
        Self {
            status: CardStatus::New,
            interval: 0.0,
            interval_unit: IntervalUnit::Minutes,
            ease: 2.5,
            due: None,
            lapses: 0,
            reps: 0,
        }
    }
}

/// Wire shape for `SchedulingState`.
///
/// Rows persisted before the unit tag existed carry no `interval_unit`
/// field; for those the tag is recovered from the status (days once a card
/// is in review, minutes otherwise).
#[derive(Deserialize)]
struct SchedulingStateWire {
    status: CardStatus,
    interval: f64,
    interval_unit: Option<IntervalUnit>,
    #[serde(with = "chrono::serde::ts_milliseconds_option", default)]
    due: Option<DateTime<Utc>>,
    ease: f64,
    lapses: u32,
    reps: u32,
}

impl From<SchedulingStateWire> for SchedulingState {
    fn from(wire: SchedulingStateWire) -> Self {
        let interval_unit = wire.interval_unit.unwrap_or(match wire.status {
            CardStatus::Review => IntervalUnit::Days,
            _ => IntervalUnit::Minutes,
        });
        Self {
            status: wire.status,
            interval: wire.interval,
            interval_unit,
            ease: wire.ease,
            due: wire.due,
            lapses: wire.lapses,
            reps: wire.reps,
        }
    }
}

/// Rolling review statistics for a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardStats {
    pub total_reviews: u32,
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_review: Option<DateTime<Utc>>,
    /// Running mean of response time in seconds across all reviews.
    pub average_time_secs: f64,
    /// Cumulative recall credit: 1 per good/easy review, 0.5 per hard.
    pub correct_count: f64,
    /// Perceived difficulty in [0, 1].
    pub difficulty: f64,
}

impl Default for CardStats {
    fn default() -> Self {
        Self {
            total_reviews: 0,
            last_review: None,
            average_time_secs: 0.0,
            correct_count: 0.0,
            difficulty: 0.5,
        }
    }
}

/// Append-only record of a single review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLogEntry {
    pub id: Uuid,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub reviewed_at: DateTime<Utc>,
    pub grade: Grade,
    pub time_spent_secs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_answer: Option<String>,
    pub interval_before: f64,
    pub interval_after: f64,
    pub ease_before: f64,
    pub ease_after: f64,
}

/// A reference or user answer: single text, or one entry per cloze blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Blanks(Vec<String>),
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for Answer {
    fn from(blanks: Vec<String>) -> Self {
        Self::Blanks(blanks)
    }
}

/// Correctness classification of a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correctness {
    Correct,
    Partial,
    Wrong,
}

/// Result of evaluating a typed answer against the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correctness: Correctness,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn grade_round_trips_through_value() {
        for grade in [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy] {
            assert_eq!(Grade::from_value(grade.to_value()), Some(grade));
        }
    }

    #[test]
    fn grade_rejects_out_of_range_value() {
        assert_eq!(Grade::from_value(0), None);
        assert_eq!(Grade::from_value(5), None);
        assert_eq!(Grade::try_from(7), Err(Error::InvalidGrade { value: 7 }));
    }

    #[test]
    fn default_state_is_new_card() {
        let state = SchedulingState::default();
        assert_eq!(state.status, CardStatus::New);
        assert_eq!(state.interval, 0.0);
        assert_eq!(state.ease, 2.5);
        assert_eq!(state.lapses, 0);
        assert_eq!(state.reps, 0);
        assert!(state.due.is_none());
    }

    #[test]
    fn default_stats_start_at_middle_difficulty() {
        let stats = CardStats::default();
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.difficulty, 0.5);
        assert_eq!(stats.correct_count, 0.0);
    }

    #[test]
    fn scheduling_state_serializes_due_as_epoch_millis() {
        let due = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let state = SchedulingState {
            status: CardStatus::Review,
            interval: 10.0,
            interval_unit: IntervalUnit::Days,
            ease: 2.5,
            due: Some(due),
            lapses: 1,
            reps: 5,
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["due"], serde_json::json!(due.timestamp_millis()));
        assert_eq!(json["status"], "review");
        assert_eq!(json["interval"], 10.0);

        let back: SchedulingState = serde_json::from_value(json).unwrap();
        assert_eq!(back.due, Some(due));
        assert_eq!(back.interval_unit, IntervalUnit::Days);
        assert_eq!(back.reps, 5);
    }

    #[test]
    fn legacy_state_without_unit_tag_recovers_unit_from_status() {
        let review: SchedulingState = serde_json::from_str(
            r#"{"status":"review","interval":12.0,"ease":2.3,"lapses":0,"reps":3}"#,
        )
        .unwrap();
        assert_eq!(review.interval_unit, IntervalUnit::Days);

        let relearning: SchedulingState = serde_json::from_str(
            r#"{"status":"relearning","interval":1.0,"ease":1.8,"lapses":2,"reps":9}"#,
        )
        .unwrap();
        assert_eq!(relearning.interval_unit, IntervalUnit::Minutes);
    }

    #[test]
    fn log_entry_round_trips_and_skips_missing_answer() {
        let entry = ReviewLogEntry {
            id: Uuid::new_v4(),
            reviewed_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            grade: Grade::Hard,
            time_spent_secs: 4.5,
            typed_answer: None,
            interval_before: 10.0,
            interval_after: 12.0,
            ease_before: 2.5,
            ease_after: 2.35,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("typed_answer").is_none());
        assert_eq!(json["grade"], "hard");

        let back: ReviewLogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, entry.id);
        assert_eq!(back.reviewed_at, entry.reviewed_at);
        assert_eq!(back.grade, Grade::Hard);
    }

    #[test]
    fn answer_serializes_untagged() {
        let text = Answer::from("Paris");
        assert_eq!(serde_json::to_value(&text).unwrap(), serde_json::json!("Paris"));

        let blanks = Answer::Blanks(vec!["cat".to_string(), "dog".to_string()]);
        assert_eq!(
            serde_json::to_value(&blanks).unwrap(),
            serde_json::json!(["cat", "dog"])
        );
    }
}
