use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;

use crate::core::interval::Interval;

/// One observed period an asset was in use.
///
/// `end_timestamp` and `heartbeat_timestamp` may both be missing: the asset
/// may still be active, or the heartbeat may not have been recorded yet.
#[derive(Copy, Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub start_timestamp: DateTime<Utc>,

    #[serde(default)]
    pub end_timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub heartbeat_timestamp: Option<DateTime<Utc>>,
}

impl UsageRecord {
    /// Effective end of the session: the recorded end, else the last
    /// heartbeat, else a short default session.
    fn effective_end(self) -> DateTime<Utc> {
        self.end_timestamp
            .or(self.heartbeat_timestamp)
            .unwrap_or_else(|| self.start_timestamp + TimeDelta::minutes(10))
    }
}

impl From<UsageRecord> for Interval {
    fn from(record: UsageRecord) -> Self {
        Self::new(record.start_timestamp, record.effective_end())
    }
}

/// Usage collapsed into a minimal sorted set of non-overlapping intervals.
#[derive(Clone, Debug, Default, Eq, PartialEq, derive_more::Index, derive_more::IntoIterator)]
pub struct MergedUsage(Vec<Interval>);

impl MergedUsage {
    /// Normalize the records, drop whatever falls wholly outside `range`, and
    /// merge the rest.
    pub fn from_records(records: &[UsageRecord], range: Interval) -> Self {
        Self::from_intervals(records.iter().copied().map(Interval::from), range)
    }

    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>, range: Interval) -> Self {
        let mut intervals =
            intervals.into_iter().filter(|interval| interval.overlaps(range)).collect_vec();
        // The upstream order is only coincidentally chronological.
        intervals.sort_by_key(|interval| interval.start);
        Self(
            intervals
                .into_iter()
                .coalesce(|current, next| {
                    if next.start <= current.end {
                        Ok(Interval::new(current.start, current.end.max(next.end)))
                    } else {
                        Err((current, next))
                    }
                })
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Interval> + '_ {
        self.0.iter().copied()
    }

    /// Span from the earliest start to the latest end, `None` when empty.
    pub fn extent(&self) -> Option<Interval> {
        Some(Interval::new(self.0.first()?.start, self.0.last()?.end))
    }
}
