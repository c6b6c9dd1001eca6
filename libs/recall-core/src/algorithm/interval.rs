//! Interval scheduling policy.
//!
//! A simplified multi-state policy: short fixed steps in minutes while a
//! card is being (re)learned, multiplicative growth in days once it is in
//! review. Lapses penalize ease and drop the card back to a one-minute
//! step.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{ReviewOutcome, Scheduler};
use crate::types::{CardStats, CardStatus, Grade, IntervalUnit, ReviewLogEntry, SchedulingState};

/// Interval policy with configurable parameters.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Step after a lapse, in minutes.
    pub lapse_step_min: f64,
    /// Step after a hard answer during learning, in minutes.
    pub hard_step_min: f64,
    /// First full-day interval after a good answer on a new card.
    pub graduating_interval_days: f64,
    /// Interval when a good answer graduates a learning card.
    pub learning_good_interval_days: f64,
    /// Interval when an easy answer graduates a new card.
    pub easy_interval_days: f64,
    /// Interval when an easy answer graduates a learning card.
    pub learning_easy_interval_days: f64,
    /// Interval multiplier for a hard answer in review.
    pub hard_multiplier: f64,
    /// Added to ease when computing the easy growth multiplier.
    pub easy_bonus: f64,
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            lapse_step_min: 1.0,
            hard_step_min: 10.0,
            graduating_interval_days: 1.0,
            learning_good_interval_days: 3.0,
            easy_interval_days: 4.0,
            learning_easy_interval_days: 7.0,
            hard_multiplier: 1.2,
            easy_bonus: 0.3,
        }
    }
}

fn minutes(m: f64) -> Duration {
    Duration::seconds((m * 60.0) as i64)
}

fn days(d: f64) -> Duration {
    Duration::seconds((d * 86_400.0) as i64)
}

impl Scheduler for IntervalScheduler {
    fn name(&self) -> &'static str {
        "interval"
    }

    fn initial_state(&self) -> SchedulingState {
        SchedulingState {
            status: CardStatus::New,
            interval: 0.0,
            interval_unit: IntervalUnit::Minutes,
            ease: self.initial_ease,
            due: None,
            lapses: 0,
            reps: 0,
        }
    }

    fn initial_stats(&self) -> CardStats {
        CardStats::default()
    }

    fn schedule(
        &self,
        state: &SchedulingState,
        stats: &CardStats,
        grade: Grade,
        time_spent_secs: f64,
        typed_answer: Option<&str>,
        now: DateTime<Utc>,
    ) -> ReviewOutcome {
        let new_stats = self.update_stats(stats, grade, time_spent_secs, now);

        let new_state = match grade {
            Grade::Again => self.schedule_again(state, now),
            Grade::Hard => self.schedule_hard(state, now),
            Grade::Good => self.schedule_good(state, now),
            Grade::Easy => self.schedule_easy(state, now),
        };

        tracing::debug!(
            grade = grade.to_value(),
            status = ?new_state.status,
            interval = new_state.interval,
            ease = new_state.ease,
            "scheduled review"
        );

        let log = ReviewLogEntry {
            id: Uuid::new_v4(),
            reviewed_at: now,
            grade,
            time_spent_secs: time_spent_secs.max(0.0),
            typed_answer: typed_answer.map(str::to_string),
            interval_before: state.interval,
            interval_after: new_state.interval,
            ease_before: state.ease,
            ease_after: new_state.ease,
        };

        ReviewOutcome {
            state: new_state,
            stats: new_stats,
            log,
        }
    }
}

impl IntervalScheduler {
    /// Update rolling statistics. Keyed on grade alone, applied before the
    /// state transition. Negative response times are treated as zero.
    fn update_stats(
        &self,
        stats: &CardStats,
        grade: Grade,
        time_spent_secs: f64,
        now: DateTime<Utc>,
    ) -> CardStats {
        let sample = time_spent_secs.max(0.0);
        let n = stats.total_reviews + 1;
        let average = (stats.average_time_secs * (n - 1) as f64 + sample) / n as f64;

        let (difficulty_delta, credit) = match grade {
            Grade::Again => (0.1, 0.0),
            Grade::Hard => (0.05, 0.5),
            Grade::Good => (-0.05, 1.0),
            Grade::Easy => (-0.1, 1.0),
        };

        CardStats {
            total_reviews: n,
            last_review: Some(now),
            average_time_secs: average,
            correct_count: stats.correct_count + credit,
            difficulty: (stats.difficulty + difficulty_delta).clamp(0.0, 1.0),
        }
    }

    /// Lapse: back to a one-minute step. A new card enters learning, any
    /// other card enters relearning.
    fn schedule_again(&self, state: &SchedulingState, now: DateTime<Utc>) -> SchedulingState {
        let status = if state.status == CardStatus::New {
            CardStatus::Learning
        } else {
            CardStatus::Relearning
        };

        SchedulingState {
            status,
            interval: self.lapse_step_min,
            interval_unit: IntervalUnit::Minutes,
            ease: (state.ease - 0.2).max(self.minimum_ease),
            due: Some(now + minutes(self.lapse_step_min)),
            lapses: state.lapses + 1,
            reps: state.reps + 1,
        }
    }

    fn schedule_hard(&self, state: &SchedulingState, now: DateTime<Utc>) -> SchedulingState {
        match state.status {
            CardStatus::New | CardStatus::Learning => SchedulingState {
                status: CardStatus::Learning,
                interval: self.hard_step_min,
                interval_unit: IntervalUnit::Minutes,
                ease: state.ease.max(self.minimum_ease),
                due: Some(now + minutes(self.hard_step_min)),
                lapses: state.lapses,
                reps: state.reps + 1,
            },
            CardStatus::Review | CardStatus::Relearning => {
                let interval = (state.interval * self.hard_multiplier).max(1.0);
                SchedulingState {
                    status: CardStatus::Review,
                    interval,
                    interval_unit: IntervalUnit::Days,
                    ease: (state.ease - 0.15).max(self.minimum_ease),
                    due: Some(now + days(interval)),
                    lapses: state.lapses,
                    reps: state.reps + 1,
                }
            }
        }
    }

    fn schedule_good(&self, state: &SchedulingState, now: DateTime<Utc>) -> SchedulingState {
        match state.status {
            CardStatus::New => SchedulingState {
                // First full-day step; the card stays in learning until the
                // next good answer graduates it.
                status: CardStatus::Learning,
                interval: self.graduating_interval_days,
                interval_unit: IntervalUnit::Days,
                ease: state.ease.max(self.minimum_ease),
                due: Some(now + days(self.graduating_interval_days)),
                lapses: state.lapses,
                reps: state.reps + 1,
            },
            CardStatus::Learning => {
                // Raw-number comparison: the stored interval may still be a
                // minute step here, which also lands in the longer branch.
                let interval = if state.interval < 1.0 {
                    self.graduating_interval_days
                } else {
                    self.learning_good_interval_days
                };
                SchedulingState {
                    status: CardStatus::Review,
                    interval,
                    interval_unit: IntervalUnit::Days,
                    ease: state.ease.max(self.minimum_ease),
                    due: Some(now + days(interval)),
                    lapses: state.lapses,
                    reps: state.reps + 1,
                }
            }
            CardStatus::Review | CardStatus::Relearning => {
                let interval = state.interval * state.ease;
                SchedulingState {
                    status: CardStatus::Review,
                    interval,
                    interval_unit: IntervalUnit::Days,
                    ease: (state.ease + 0.1).max(self.minimum_ease),
                    due: Some(now + days(interval)),
                    lapses: state.lapses,
                    reps: state.reps + 1,
                }
            }
        }
    }

    fn schedule_easy(&self, state: &SchedulingState, now: DateTime<Utc>) -> SchedulingState {
        match state.status {
            CardStatus::New => SchedulingState {
                status: CardStatus::Review,
                interval: self.easy_interval_days,
                interval_unit: IntervalUnit::Days,
                ease: state.ease.max(self.minimum_ease),
                due: Some(now + days(self.easy_interval_days)),
                lapses: state.lapses,
                reps: state.reps + 1,
            },
            CardStatus::Learning => SchedulingState {
                status: CardStatus::Review,
                interval: self.learning_easy_interval_days,
                interval_unit: IntervalUnit::Days,
                ease: state.ease.max(self.minimum_ease),
                due: Some(now + days(self.learning_easy_interval_days)),
                lapses: state.lapses,
                reps: state.reps + 1,
            },
            CardStatus::Review | CardStatus::Relearning => {
                let interval = state.interval * (state.ease + self.easy_bonus);
                SchedulingState {
                    status: CardStatus::Review,
                    interval,
                    interval_unit: IntervalUnit::Days,
                    ease: (state.ease + 0.15).max(self.minimum_ease),
                    due: Some(now + days(interval)),
                    lapses: state.lapses,
                    reps: state.reps + 1,
                }
            }
        }
    }
}
