//! Interval arithmetic for the two supported scheduling strategies.
//!
//! Graded (SM-2 derived, quality 0-5):
//! - first success: 1 day, second consecutive success: 6 days
//! - later successes: `round(interval * ease_factor)`
//! - failure (quality < 3): back to 1 day, streak cleared
//! - ease factor is adjusted after every review, failures included
//!
//! Boolean (right/wrong, no ease factor):
//! - success doubles the interval starting from 1, capped (30 days by default)
//! - failure: back to 1 day, streak cleared

use std::fmt;
use std::str::FromStr;

use crate::data::models::{Quality, ReviewOutcome, ReviewRecord, ValidationError, MIN_EASE_FACTOR};

/// Default cap for the boolean policy
pub const BOOLEAN_MAX_INTERVAL_DAYS: u32 = 30;

/// Hard ceiling for any interval, keeps due dates representable
pub const ABSOLUTE_MAX_INTERVAL_DAYS: i32 = 36_500;

const FIRST_INTERVAL_DAYS: i32 = 1;
const SECOND_INTERVAL_DAYS: i32 = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradedPolicy {
    pub max_interval_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanPolicy {
    pub max_interval_days: Option<u32>,
}

impl Default for BooleanPolicy {
    fn default() -> Self {
        Self {
            max_interval_days: Some(BOOLEAN_MAX_INTERVAL_DAYS),
        }
    }
}

/// Strategy chosen once at construction; both accept either outcome kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingPolicy {
    Graded(GradedPolicy),
    Boolean(BooleanPolicy),
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        SchedulingPolicy::Graded(GradedPolicy::default())
    }
}

impl SchedulingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            SchedulingPolicy::Graded(_) => "graded",
            SchedulingPolicy::Boolean(_) => "boolean",
        }
    }

    pub fn max_interval_days(&self) -> Option<u32> {
        match self {
            SchedulingPolicy::Graded(p) => p.max_interval_days,
            SchedulingPolicy::Boolean(p) => p.max_interval_days,
        }
    }

    /// Same strategy with a different cap; `None` removes it.
    pub fn with_max_interval_days(self, cap: Option<u32>) -> Self {
        match self {
            SchedulingPolicy::Graded(_) => SchedulingPolicy::Graded(GradedPolicy { max_interval_days: cap }),
            SchedulingPolicy::Boolean(_) => SchedulingPolicy::Boolean(BooleanPolicy { max_interval_days: cap }),
        }
    }

    /// Updates interval, ease factor and counters in place.
    /// Returns whether the outcome counted as a correct answer.
    pub(crate) fn apply(&self, record: &mut ReviewRecord, outcome: ReviewOutcome) -> Result<bool, ValidationError> {
        match self {
            SchedulingPolicy::Graded(p) => {
                let quality = outcome.quality()?;
                Ok(p.apply(record, quality))
            }
            SchedulingPolicy::Boolean(p) => {
                let correct = outcome.is_correct()?;
                p.apply(record, correct);
                Ok(correct)
            }
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_interval_days() {
            Some(cap) => write!(f, "{} (max {} days)", self.name(), cap),
            None => write!(f, "{} (uncapped)", self.name()),
        }
    }
}

impl FromStr for SchedulingPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graded" | "sm2" | "sm-2" => Ok(SchedulingPolicy::Graded(GradedPolicy::default())),
            "boolean" | "bool" => Ok(SchedulingPolicy::Boolean(BooleanPolicy::default())),
            other => Err(ValidationError::InvalidRequest(format!("unknown scheduling policy {other:?}"))),
        }
    }
}

impl GradedPolicy {
    fn apply(&self, record: &mut ReviewRecord, quality: Quality) -> bool {
        let passed = quality.is_passing();

        if passed {
            record.interval_days = match record.correct_streak {
                0 => FIRST_INTERVAL_DAYS,
                1 => SECOND_INTERVAL_DAYS,
                _ => grow(record.interval_days, record.ease_factor),
            };
            record.interval_days = cap(record.interval_days, self.max_interval_days);
            record.correct_streak += 1;
        } else {
            record.interval_days = FIRST_INTERVAL_DAYS;
            record.correct_streak = 0;
            record.incorrect_count += 1;
        }

        record.ease_factor = next_ease_factor(record.ease_factor, quality);
        passed
    }
}

impl BooleanPolicy {
    fn apply(&self, record: &mut ReviewRecord, correct: bool) {
        if correct {
            record.interval_days = if record.interval_days <= 0 {
                FIRST_INTERVAL_DAYS
            } else {
                record.interval_days.saturating_mul(2)
            };
            record.interval_days = cap(record.interval_days, self.max_interval_days);
            record.correct_streak += 1;
        } else {
            record.interval_days = FIRST_INTERVAL_DAYS;
            record.correct_streak = 0;
            record.incorrect_count += 1;
        }
    }
}

/// `EF' = max(1.3, EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)))`
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = f64::from(5 - quality.value());
    (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
}

fn grow(interval_days: i32, ease_factor: f64) -> i32 {
    let next = (f64::from(interval_days) * ease_factor).round();
    if next >= f64::from(ABSOLUTE_MAX_INTERVAL_DAYS) {
        ABSOLUTE_MAX_INTERVAL_DAYS
    } else {
        (next as i32).max(FIRST_INTERVAL_DAYS)
    }
}

fn cap(interval_days: i32, max_interval_days: Option<u32>) -> i32 {
    let ceiling = match max_interval_days {
        Some(max) => i32::try_from(max)
            .unwrap_or(ABSOLUTE_MAX_INTERVAL_DAYS)
            .clamp(FIRST_INTERVAL_DAYS, ABSOLUTE_MAX_INTERVAL_DAYS),
        None => ABSOLUTE_MAX_INTERVAL_DAYS,
    };
    interval_days.min(ceiling)
}
