//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use custsync::{DEFAULT_MAX_RETRIES, DEFAULT_SEED, PipelineConfig};

/// Synchronize customer records from a paginated API.
///
/// Custsync fetches every page of the upstream customer API, enriches each
/// record with business classifications and a data-quality score,
/// deduplicates by customer ID, and writes the sorted result plus a summary
/// report as JSON.
#[derive(Parser, Debug)]
#[command(name = "custsync")]
#[command(author, version, about)]
pub struct Args {
    /// Base URL of the customer API
    #[arg(long, default_value = "https://reqres.in")]
    pub base_url: Url,

    /// API key sent as the x-api-key header
    #[arg(long, default_value = "reqres-free-v1")]
    pub api_key: String,

    /// Maximum retry attempts per page for transient failures (0-10)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_RETRIES, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub max_retries: u32,

    /// Random seed for reproducible category assignment
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Directory the export documents are written to
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Overall fetch deadline in seconds (0 disables the deadline)
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(0..=3600))]
    pub timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the pipeline configuration from the parsed arguments.
    #[must_use]
    pub fn to_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(self.base_url.clone(), self.api_key.clone());
        config.max_retries = self.max_retries;
        config.seed = self.seed;
        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["custsync"]).unwrap();
        assert_eq!(args.base_url.as_str(), "https://reqres.in/");
        assert_eq!(args.api_key, "reqres-free-v1");
        assert_eq!(args.max_retries, 3); // DEFAULT_MAX_RETRIES
        assert_eq!(args.seed, 42); // DEFAULT_SEED
        assert_eq!(args.output, PathBuf::from("output"));
        assert_eq!(args.timeout, 0);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["custsync", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["custsync", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_base_url_must_be_valid() {
        let result = Args::try_parse_from(["custsync", "--base-url", "not a url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_max_retries_range_enforced() {
        let args = Args::try_parse_from(["custsync", "-r", "10"]).unwrap();
        assert_eq!(args.max_retries, 10);

        let result = Args::try_parse_from(["custsync", "-r", "11"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_seed_flag() {
        let args = Args::try_parse_from(["custsync", "--seed", "7"]).unwrap();
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["custsync", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_to_config_carries_flags() {
        let args =
            Args::try_parse_from(["custsync", "--seed", "9", "-r", "5", "--api-key", "k"]).unwrap();
        let config = args.to_config();
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key, "k");
    }
}
