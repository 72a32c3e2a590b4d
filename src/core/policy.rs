use chrono::{NaiveTime, TimeDelta};

/// Which side of the working-hours boundary the percentage is reported for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Bucket {
    /// Business hours on peak days.
    Peak,

    /// Everything outside the business hours.
    NonPeak,
}

/// One observation per day, or one per hour.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Frequency {
    Daily,
    Hourly,
}

/// Day of the week, Sunday-first like the asset service counts them.
#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

/// Business-hours boundary for a generic day, as times of day in the
/// service's reference timezone.
#[derive(Copy, Clone, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursPolicy {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl WorkingHoursPolicy {
    pub const fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self { start_time, end_time }
    }

    /// Shift the policy from the site's clock onto UTC.
    ///
    /// The offset is in hours and may be fractional (half-hour timezones).
    /// Times wrap around midnight.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn with_utc_offset(self, offset_hours: f64) -> Self {
        let offset = TimeDelta::seconds((offset_hours * 3600.0).round() as i64);
        Self { start_time: self.start_time - offset, end_time: self.end_time - offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_utc_offset_shifts_backwards() {
        let policy = WorkingHoursPolicy::new(time_of_day(9, 0), time_of_day(17, 0));
        assert_eq!(
            policy.with_utc_offset(2.0),
            WorkingHoursPolicy::new(time_of_day(7, 0), time_of_day(15, 0)),
        );
    }

    #[test]
    fn test_utc_offset_wraps_around_midnight() {
        let policy = WorkingHoursPolicy::new(time_of_day(1, 0), time_of_day(9, 0));
        assert_eq!(
            policy.with_utc_offset(2.0),
            WorkingHoursPolicy::new(time_of_day(23, 0), time_of_day(7, 0)),
        );
    }

    #[test]
    fn test_utc_offset_fractional() {
        let policy = WorkingHoursPolicy::new(time_of_day(9, 0), time_of_day(17, 0));
        assert_eq!(
            policy.with_utc_offset(5.5),
            WorkingHoursPolicy::new(time_of_day(3, 30), time_of_day(11, 30)),
        );
    }

    #[test]
    fn test_weekday_from_chrono() {
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from(chrono::Weekday::Sat), Weekday::Saturday);
    }
}
