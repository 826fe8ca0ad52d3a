//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gaprobe_core::QueryOverrides;

#[derive(Parser, Debug)]
#[command(author, version, about = "Query analytics views with a service-account key", long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(short = 'c', long, env = "GAPROBE_CONFIG", default_value = "gaprobe.json")]
    pub config: PathBuf,

    /// Service-account key file (falls back to GOOGLE_APPLICATION_CREDENTIALS)
    #[arg(short = 'k', long, env = "GAPROBE_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Events seen in the current minute buckets
    Realtime(RealtimeArgs),
    /// Historical batch report over a lookback window
    Report(ReportArgs),
    /// Print the first view (profile) id reachable with the key
    Profile,
}

#[derive(Args, Debug)]
pub struct RealtimeArgs {
    #[arg(long, env = "GAPROBE_VIEW_ID")]
    pub view_id: Option<String>,

    /// Metric expression, e.g. rt:totalEvents
    #[arg(long, env = "GAPROBE_REALTIME_METRIC")]
    pub metric: Option<String>,

    /// Dimension expression, e.g. rt:eventLabel,rt:minutesAgo
    #[arg(long, env = "GAPROBE_REALTIME_DIMENSION")]
    pub dimension: Option<String>,

    /// Label printed before each row's first dimension
    #[arg(long, env = "GAPROBE_ROW_LABEL")]
    pub label: Option<String>,

    /// Print every column labelled by its header instead
    #[arg(long)]
    pub all_columns: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[arg(long, env = "GAPROBE_VIEW_ID")]
    pub view_id: Option<String>,

    /// Metric expression, e.g. ga:transactions
    #[arg(long, env = "GAPROBE_REPORT_METRIC")]
    pub metric: Option<String>,

    /// Dimension expression, e.g. ga:transactionId
    #[arg(long, env = "GAPROBE_REPORT_DIMENSION")]
    pub dimension: Option<String>,

    /// Days back from today
    #[arg(long, env = "GAPROBE_LOOKBACK_DAYS")]
    pub lookback_days: Option<u32>,

    /// Alias for the metric column
    #[arg(long, env = "GAPROBE_METRIC_ALIAS")]
    pub alias: Option<String>,

    /// Query the first view reachable with the key instead of --view-id
    #[arg(long)]
    pub resolve_view: bool,
}

impl Cli {
    /// Collect the flags that override the config file.
    pub fn overrides(&self) -> QueryOverrides {
        let mut overrides = QueryOverrides {
            key_file: self.key_file.clone(),
            ..Default::default()
        };

        match &self.command {
            Command::Realtime(args) => {
                overrides.view_id = args.view_id.clone();
                overrides.realtime_metric = args.metric.clone();
                overrides.realtime_dimension = args.dimension.clone();
                overrides.row_label = args.label.clone();
            }
            Command::Report(args) => {
                overrides.view_id = args.view_id.clone();
                overrides.report_metric = args.metric.clone();
                overrides.report_dimension = args.dimension.clone();
                overrides.lookback_days = args.lookback_days;
                overrides.metric_alias = args.alias.clone();
            }
            Command::Profile => {}
        }

        overrides
    }
}
