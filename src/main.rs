mod api;
mod cli;
mod core;
mod prelude;
mod tables;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Args, Command, InspectCommand},
    core::utilization_series,
    prelude::*,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Args::parse().command {
        Command::Report(args) => {
            let api = args.service.try_new_client()?;
            let range = args.query.range()?;
            let records = api
                .query_usage_history(&args.query.asset_filter, &args.query.category_filter, range)
                .await?;
            let policy = match args.schedule.policy_override() {
                Some(policy) => policy,
                None => api.get_working_hours_policy().await?,
            };
            let series = utilization_series(
                &records,
                range,
                policy,
                args.schedule.utc_offset_hours(),
                args.schedule.bucket,
                args.schedule.peak_days(),
                args.schedule.frequency,
            );
            info!(n_points = series.len(), "computed the utilization series");
            if args.json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                println!("{}", tables::build_series_table(&series));
            }
            Ok(())
        }

        Command::Inspect(args) => {
            let api = args.service.try_new_client()?;
            match args.command {
                InspectCommand::UsageHistory(query) => {
                    let records = api
                        .query_usage_history(
                            &query.asset_filter,
                            &query.category_filter,
                            query.range()?,
                        )
                        .await?;
                    for record in &records {
                        info!(
                            start = %record.start_timestamp,
                            end = ?record.end_timestamp,
                            heartbeat = ?record.heartbeat_timestamp,
                            "usage record",
                        );
                    }
                    Ok(())
                }

                InspectCommand::WorkingHours => {
                    api.get_working_hours_policy().await.map(|_| ())
                }
            }
        }
    }
}
