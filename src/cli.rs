use chrono::{DateTime, Local, NaiveTime, TimeDelta, Utc};
use clap::{Parser, Subcommand};
use enumset::EnumSet;
use reqwest::Url;

use crate::{
    api::AssetService,
    core::{Bucket, Frequency, Interval, Weekday, WorkingHoursPolicy},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: fetch the usage history and report utilization.
    Report(Box<ReportArgs>),

    /// Development tools: peek at the raw service responses.
    Inspect(Box<InspectArgs>),
}

#[derive(Parser)]
pub struct ReportArgs {
    #[clap(flatten)]
    pub service: AssetServiceArgs,

    #[clap(flatten)]
    pub query: QueryArgs,

    #[clap(flatten)]
    pub schedule: ScheduleArgs,

    /// Print the series as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct AssetServiceArgs {
    /// Asset service API base URL. For example: `https://systems.example.test/api`.
    #[clap(long = "base-url", env = "TALLY_BASE_URL")]
    pub base_url: Url,

    /// Asset service API key.
    #[clap(long = "api-key", env = "TALLY_API_KEY")]
    pub api_key: String,
}

impl AssetServiceArgs {
    pub fn try_new_client(&self) -> Result<AssetService> {
        AssetService::try_new(self.base_url.clone(), &self.api_key)
    }
}

#[derive(Parser)]
pub struct QueryArgs {
    /// Asset filter expression, as the service understands it.
    #[clap(long = "assets", env = "TALLY_ASSET_FILTER", default_value = "")]
    pub asset_filter: String,

    /// Utilization category filter expression.
    #[clap(long = "category", env = "TALLY_CATEGORY_FILTER", default_value = "")]
    pub category_filter: String,

    /// Start of the reporting range, RFC 3339.
    #[clap(long)]
    pub from: Option<DateTime<Utc>>,

    /// End of the reporting range, RFC 3339; defaults to now.
    #[clap(long)]
    pub to: Option<DateTime<Utc>>,

    /// Report over the trailing N days when no explicit start is given.
    #[clap(long = "last-days", default_value = "14", env = "TALLY_LAST_DAYS")]
    pub n_last_days: i64,
}

impl QueryArgs {
    pub fn range(&self) -> Result<Interval> {
        let to = self.to.unwrap_or_else(Utc::now);
        let from = self.from.unwrap_or_else(|| to - TimeDelta::days(self.n_last_days));
        ensure!(from < to, "the range start must precede its end");
        Ok(Interval::new(from, to))
    }
}

#[derive(Parser)]
pub struct ScheduleArgs {
    /// Which side of the working-hours boundary to report.
    #[clap(long, value_enum, default_value = "peak", env = "TALLY_BUCKET")]
    pub bucket: Bucket,

    /// Weekdays that count as peak days.
    #[clap(
        long = "peak-days",
        env = "TALLY_PEAK_DAYS",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "monday,tuesday,wednesday,thursday,friday",
    )]
    pub peak_days: Vec<Weekday>,

    /// One point per day, or one per hour.
    #[clap(long, value_enum, default_value = "daily", env = "TALLY_FREQUENCY")]
    pub frequency: Frequency,

    /// Override the working-hours start instead of asking the service.
    #[clap(long = "work-start", requires = "work_end")]
    pub work_start: Option<NaiveTime>,

    /// Override the working-hours end instead of asking the service.
    #[clap(long = "work-end", requires = "work_start")]
    pub work_end: Option<NaiveTime>,

    /// Offset of the site's clock from UTC, in hours.
    ///
    /// Defaults to this machine's current offset.
    #[clap(
        long = "utc-offset-hours",
        allow_negative_numbers = true,
        env = "TALLY_UTC_OFFSET_HOURS"
    )]
    pub utc_offset_hours: Option<f64>,
}

impl ScheduleArgs {
    #[must_use]
    pub fn peak_days(&self) -> EnumSet<Weekday> {
        self.peak_days.iter().copied().collect()
    }

    #[must_use]
    pub fn utc_offset_hours(&self) -> f64 {
        self.utc_offset_hours
            .unwrap_or_else(|| f64::from(Local::now().offset().local_minus_utc()) / 3600.0)
    }

    /// The policy override, when both boundaries are given on the command line.
    #[must_use]
    pub fn policy_override(&self) -> Option<WorkingHoursPolicy> {
        match (self.work_start, self.work_end) {
            (Some(start_time), Some(end_time)) => {
                Some(WorkingHoursPolicy::new(start_time, end_time))
            }
            _ => None,
        }
    }
}

#[derive(Parser)]
pub struct InspectArgs {
    #[clap(flatten)]
    pub service: AssetServiceArgs,

    #[command(subcommand)]
    pub command: InspectCommand,
}

#[derive(Subcommand)]
pub enum InspectCommand {
    /// Dump the raw usage records for the filters.
    UsageHistory(Box<QueryArgs>),

    /// Dump the working-hours policy.
    WorkingHours,
}
