use chrono::{Datelike, NaiveDate};
use enumset::EnumSet;

use crate::core::{
    calendar::BusinessWindow,
    interval::Interval,
    policy::{Bucket, Weekday},
    usage::MergedUsage,
};

/// A business window together with the merged usage that fell inside it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowOverlap {
    pub day: NaiveDate,
    pub window: Interval,
    pub segments: Vec<Interval>,
}

/// Intersect every window with the merged usage.
///
/// On `Bucket::Peak`, days outside the peak set are excluded from the
/// accounting entirely: their segment lists are forced empty even where usage
/// intersects the window.
pub fn overlay(
    windows: &[BusinessWindow],
    usage: &MergedUsage,
    bucket: Bucket,
    peak_days: EnumSet<Weekday>,
) -> Vec<WindowOverlap> {
    windows
        .iter()
        .map(|business| {
            let excluded = (bucket == Bucket::Peak)
                && !peak_days.contains(Weekday::from(business.day.weekday()));
            let segments = if excluded {
                Vec::new()
            } else {
                usage.iter().filter_map(|interval| business.window.intersect(interval)).collect()
            };
            WindowOverlap { day: business.day, window: business.window, segments }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use itertools::Itertools;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2023, 11, 20).unwrap().and_hms_opt(hour, minute, 0).unwrap().and_utc()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 20).unwrap()
    }

    fn usage(intervals: impl IntoIterator<Item = Interval>) -> MergedUsage {
        MergedUsage::from_intervals(intervals, Interval::new(at(0, 0), at(23, 59)))
    }

    #[test]
    fn test_collects_segments_in_usage_order() {
        let windows =
            [BusinessWindow { day: day(), window: Interval::new(at(9, 0), at(17, 0)) }];
        let usage = usage([
            Interval::new(at(8, 0), at(10, 0)),
            Interval::new(at(12, 0), at(12, 30)),
            Interval::new(at(16, 30), at(18, 0)),
        ]);
        let overlaps = overlay(&windows, &usage, Bucket::Peak, EnumSet::all());
        assert_eq!(
            overlaps[0].segments,
            [
                Interval::new(at(9, 0), at(10, 0)),
                Interval::new(at(12, 0), at(12, 30)),
                Interval::new(at(16, 30), at(17, 0)),
            ],
        );
    }

    #[test]
    fn test_disjoint_usage_yields_no_segments() {
        let windows =
            [BusinessWindow { day: day(), window: Interval::new(at(9, 0), at(17, 0)) }];
        let usage = usage([Interval::new(at(18, 0), at(19, 0))]);
        let overlaps = overlay(&windows, &usage, Bucket::Peak, EnumSet::all());
        assert!(overlaps[0].segments.is_empty());
    }

    #[test]
    fn test_peak_excludes_off_days_despite_usage() {
        // 2023-11-20 is a Monday; only Tuesdays are peak days here.
        let windows =
            [BusinessWindow { day: day(), window: Interval::new(at(9, 0), at(17, 0)) }];
        let usage = usage([Interval::new(at(10, 0), at(11, 0))]);
        let overlaps = overlay(&windows, &usage, Bucket::Peak, EnumSet::only(Weekday::Tuesday));
        assert!(overlaps[0].segments.is_empty());
    }

    #[test]
    fn test_non_peak_keeps_off_days() {
        let windows =
            [BusinessWindow { day: day(), window: Interval::new(at(17, 0), at(23, 0)) }];
        let usage = usage([Interval::new(at(18, 0), at(19, 0))]);
        let overlaps = overlay(&windows, &usage, Bucket::NonPeak, EnumSet::only(Weekday::Tuesday));
        assert_eq!(overlaps[0].segments, [Interval::new(at(18, 0), at(19, 0))]);
    }
}
