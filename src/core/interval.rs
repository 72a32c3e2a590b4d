use std::fmt::{Debug, Formatter};

use chrono::{DateTime, TimeDelta, Utc};

/// A span of absolute time.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Utc>,

    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Half-open overlap test: `true` iff the spans share a non-empty range.
    pub fn overlaps(self, other: Self) -> bool {
        (self.start < other.end) && (other.start < self.end)
    }

    /// Common span of the two intervals.
    ///
    /// `None` when they are disjoint or only touch at a boundary.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then(|| Self::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2023, 11, 20).unwrap().and_hms_opt(hour, minute, 0).unwrap().and_utc()
    }

    #[test]
    fn test_overlaps() {
        let interval = Interval::new(at(10, 0), at(11, 0));
        assert!(interval.overlaps(Interval::new(at(10, 30), at(12, 0))));
        assert!(!interval.overlaps(Interval::new(at(11, 0), at(12, 0))));
        assert!(!interval.overlaps(Interval::new(at(12, 0), at(13, 0))));
    }

    #[test]
    fn test_intersect() {
        let interval = Interval::new(at(10, 0), at(11, 0));
        assert_eq!(
            interval.intersect(Interval::new(at(10, 30), at(12, 0))),
            Some(Interval::new(at(10, 30), at(11, 0))),
        );
        assert_eq!(interval.intersect(Interval::new(at(11, 0), at(12, 0))), None);
    }

    #[test]
    fn test_intersect_contained() {
        let outer = Interval::new(at(9, 0), at(17, 0));
        let inner = Interval::new(at(10, 0), at(10, 30));
        assert_eq!(outer.intersect(inner), Some(inner));
    }
}
