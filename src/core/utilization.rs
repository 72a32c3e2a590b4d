use chrono::{DateTime, Days, TimeDelta, Utc};
use enumset::EnumSet;

use crate::core::{
    calendar::business_windows,
    interval::Interval,
    overlap::{WindowOverlap, overlay},
    policy::{Bucket, Frequency, Weekday, WorkingHoursPolicy},
    usage::{MergedUsage, UsageRecord},
};

/// One sample of the resulting series.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize)]
pub struct UtilizationPoint {
    pub time: DateTime<Utc>,
    pub percentage: f64,
}

/// Reduce each window's overlap to a single percentage.
///
/// A collapsed window reports zero instead of dividing by it. Percentages are
/// not clamped: merged usage is disjoint, so a value above 100 can only mean
/// an upstream invariant was broken, and clamping would mask that.
pub fn aggregate(overlaps: &[WindowOverlap]) -> Vec<UtilizationPoint> {
    overlaps
        .iter()
        .map(|overlap| {
            let window = overlap.window.duration();
            let percentage = if window.is_zero() {
                0.0
            } else {
                let used = overlap
                    .segments
                    .iter()
                    .fold(TimeDelta::zero(), |sum, segment| sum + segment.duration());
                used.as_seconds_f64() / window.as_seconds_f64() * 100.0
            };
            UtilizationPoint { time: overlap.window.start, percentage }
        })
        .collect()
}

/// Turn raw usage records into the utilization series.
///
/// Pure and deterministic: the calendar math runs on the provided UTC offset,
/// never on the machine's clock. An empty history yields an empty series.
pub fn utilization_series(
    records: &[UsageRecord],
    range: Interval,
    policy: WorkingHoursPolicy,
    utc_offset_hours: f64,
    bucket: Bucket,
    peak_days: EnumSet<Weekday>,
    frequency: Frequency,
) -> Vec<UtilizationPoint> {
    let usage = MergedUsage::from_records(records, range);
    let Some(extent) = usage.extent() else {
        return Vec::new();
    };
    let windows = business_windows(
        extent.start.date_naive(),
        // The exclusive bound still has to cover the last partial day.
        extent.end.date_naive() + Days::new(1),
        policy.with_utc_offset(utc_offset_hours),
        bucket,
        peak_days,
        frequency,
    );
    aggregate(&overlay(&windows, &usage, bucket, peak_days))
}
