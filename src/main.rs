//! CLI entry point for the custsync tool.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use custsync::export::{CustomerExport, SummaryReport, write_json};
use custsync::{PageClient, WeightedAssigner, enrich, fetch_all, merge};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("custsync starting");

    let config = args.to_config();
    let client = PageClient::with_policy(
        config.base_url.clone(),
        config.api_key.clone(),
        config.retry_policy(),
    );

    // Overall fetch deadline: cancelling the token aborts in-flight backoff
    // waits, so the pipeline reports Cancelled instead of partial output.
    let cancel = CancellationToken::new();
    if args.timeout > 0 {
        let deadline_token = cancel.clone();
        let timeout = Duration::from_secs(args.timeout);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            info!(timeout_secs = timeout.as_secs(), "fetch deadline reached");
            deadline_token.cancel();
        });
    }

    let raw_records = fetch_all(&client, &cancel).await?;
    info!(records = raw_records.len(), "fetched raw customer records");

    let mut assigner = WeightedAssigner::from_seed(config.seed);
    let enriched: Vec<_> = raw_records
        .iter()
        .map(|record| enrich(record, &mut assigner))
        .collect();
    let customers = merge(enriched);
    info!(customers = customers.len(), "enriched and deduplicated");

    let report = SummaryReport::from_customers(&customers);
    let export = CustomerExport::new(customers);

    let customers_path = args.output.join("processed_customers.json");
    let report_path = args.output.join("summary_report.json");
    write_json(&export, &customers_path).await?;
    write_json(&report, &report_path).await?;

    info!(
        total_customers = report.total_customers,
        average_quality_score = report.average_quality_score,
        high_quality = report.data_quality_summary.high_quality,
        medium_quality = report.data_quality_summary.medium_quality,
        low_quality = report.data_quality_summary.low_quality,
        "pipeline complete"
    );

    Ok(())
}
