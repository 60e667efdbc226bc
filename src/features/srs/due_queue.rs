use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::data::models::{ContentKey, ContentRef, ReviewRecord};

pub struct DueQueue;

impl DueQueue {
    /// Due-date index over one learner's records
    pub fn index(records: &[ReviewRecord]) -> HashMap<ContentKey, DateTime<Utc>> {
        records.iter().map(|r| (r.key(), r.due_at)).collect()
    }

    /// Candidates whose review is due at `now`, earliest first, at most `limit`.
    ///
    /// Items without a record count as due since the epoch. Equal due dates
    /// keep the order they had in `candidates`; repeated candidates are dropped.
    pub fn select_due(
        candidates: &[ContentRef],
        due_dates: &HashMap<ContentKey, DateTime<Utc>>,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<ContentRef> {
        let mut seen = HashSet::with_capacity(candidates.len());
        let mut due: Vec<(DateTime<Utc>, &ContentRef)> = candidates
            .iter()
            .filter(|c| seen.insert(c.key()))
            .map(|c| {
                let due_at = due_dates
                    .get(&c.key())
                    .copied()
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
                (due_at, c)
            })
            .filter(|(due_at, _)| *due_at <= now)
            .collect();

        // stable: ties keep input order
        due.sort_by_key(|(due_at, _)| *due_at);

        due.into_iter()
            .take(limit)
            .map(|(_, c)| c.clone())
            .collect()
    }
}
