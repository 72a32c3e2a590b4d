use chrono::{Datelike, Days, NaiveDate, TimeDelta};
use enumset::EnumSet;

use crate::core::{
    interval::Interval,
    policy::{Bucket, Frequency, Weekday, WorkingHoursPolicy},
};

/// One denominator window: a day, or an hourly slice of it, against which
/// usage is measured.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BusinessWindow {
    pub day: NaiveDate,
    pub window: Interval,
}

/// Generate the denominator windows for every day in `[init_date, end_date)`.
///
/// The policy must already be on UTC. On `Bucket::NonPeak` the boundary roles
/// swap so that the off-hours become the denominator, and a day outside the
/// peak set counts whole. On `Bucket::Peak` a day outside the peak set
/// collapses to a zero-width window.
pub fn business_windows(
    init_date: NaiveDate,
    end_date: NaiveDate,
    policy: WorkingHoursPolicy,
    bucket: Bucket,
    peak_days: EnumSet<Weekday>,
    frequency: Frequency,
) -> Vec<BusinessWindow> {
    let (start_time, end_time) = match bucket {
        Bucket::Peak => (policy.start_time, policy.end_time),
        Bucket::NonPeak => (policy.end_time, policy.start_time),
    };

    let mut windows = Vec::new();
    for day in init_date.iter_days().take_while(|day| *day < end_date) {
        let next_day = day + Days::new(1);
        let start = day.and_time(start_time).and_utc();
        let window = if peak_days.contains(Weekday::from(day.weekday())) {
            if end_time > start_time {
                Interval::new(start, day.and_time(end_time).and_utc())
            } else {
                // An end at or before the start wraps into the next day;
                // equal boundaries span the full 24 hours.
                Interval::new(start, next_day.and_time(end_time).and_utc())
            }
        } else if bucket == Bucket::Peak {
            Interval::new(start, start)
        } else {
            Interval::new(start, next_day.and_time(start_time).and_utc())
        };
        match frequency {
            Frequency::Daily => windows.push(BusinessWindow { day, window }),
            Frequency::Hourly => subdivide_hourly(day, window, &mut windows),
        }
    }
    windows
}

/// Split the window into consecutive sub-windows of at most one hour; the
/// last one may be shorter. A zero-width window stays a single sub-window so
/// that excluded days keep their place in the series.
fn subdivide_hourly(day: NaiveDate, window: Interval, windows: &mut Vec<BusinessWindow>) {
    if window.is_empty() {
        windows.push(BusinessWindow { day, window });
        return;
    }
    let mut start = window.start;
    while start < window.end {
        let end = window.end.min(start + TimeDelta::hours(1));
        windows.push(BusinessWindow { day, window: Interval::new(start, end) });
        start = end;
    }
}
