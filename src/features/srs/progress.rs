use chrono::NaiveDate;

use crate::data::models::ProgressSummary;

pub const POINTS_CORRECT: i64 = 10;
/// Wrong answers still earn something for showing up
pub const POINTS_INCORRECT: i64 = 4;
pub const POINTS_PER_LEVEL: i64 = 100;

pub struct ProgressAggregator;

impl ProgressAggregator {
    /// Folds one review into the learner's counters. `today` is a UTC calendar day.
    pub fn record_review(summary: &ProgressSummary, was_correct: bool, today: NaiveDate) -> ProgressSummary {
        let mut next = summary.clone();

        next.total_reviews += 1;
        if was_correct {
            next.correct_reviews += 1;
            next.points += POINTS_CORRECT;
        } else {
            next.points += POINTS_INCORRECT;
        }

        next.streak_days = Self::next_streak(summary.last_study_date, summary.streak_days, today);
        next.last_study_date = Some(today);
        next.level = Self::level_for(next.points);
        next
    }

    pub fn level_for(points: i64) -> i32 {
        let level = points.max(0) / POINTS_PER_LEVEL + 1;
        i32::try_from(level).unwrap_or(i32::MAX)
    }

    fn next_streak(last_study_date: Option<NaiveDate>, streak_days: i32, today: NaiveDate) -> i32 {
        match last_study_date {
            None => 1,
            Some(last) if last == today => streak_days,
            Some(last) if last.succ_opt() == Some(today) => streak_days + 1,
            // gap of two or more days, or a clock that went backwards
            Some(_) => 1,
        }
    }
}
