mod calendar;
mod interval;
mod overlap;
mod policy;
mod usage;
mod utilization;

pub use self::{
    calendar::{BusinessWindow, business_windows},
    interval::Interval,
    overlap::{WindowOverlap, overlay},
    policy::{Bucket, Frequency, Weekday, WorkingHoursPolicy},
    usage::{MergedUsage, UsageRecord},
    utilization::{UtilizationPoint, aggregate, utilization_series},
};
