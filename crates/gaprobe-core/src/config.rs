//! Run configuration: query parameters, key location and API endpoints.
//!
//! Loaded once at startup from an optional JSON file, then overridden by
//! command-line flags. Every field has a default so an absent file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::surface::ApiSurface;

pub const DEFAULT_VIEW_ID: &str = "12341234";
pub const DEFAULT_REALTIME_METRIC: &str = "rt:totalEvents";
pub const DEFAULT_REALTIME_DIMENSION: &str = "rt:eventLabel,rt:minutesAgo";
pub const DEFAULT_REPORT_METRIC: &str = "ga:transactions";
pub const DEFAULT_REPORT_DIMENSION: &str = "ga:transactionId";
pub const DEFAULT_METRIC_ALIAS: &str = "transactions";
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;
pub const DEFAULT_ROW_LABEL: &str = "bookingId";

pub const DEFAULT_V3_BASE: &str = "https://www.googleapis.com/analytics/v3";
pub const DEFAULT_V4_BASE: &str = "https://analyticsreporting.googleapis.com/v4";

/// Base URLs for each API surface. Overridable for tests and proxies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_v3_base")]
    pub realtime_base: String,
    #[serde(default = "default_v3_base")]
    pub management_base: String,
    #[serde(default = "default_v4_base")]
    pub reporting_base: String,
}

fn default_v3_base() -> String {
    DEFAULT_V3_BASE.into()
}
fn default_v4_base() -> String {
    DEFAULT_V4_BASE.into()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            realtime_base: default_v3_base(),
            management_base: default_v3_base(),
            reporting_base: default_v4_base(),
        }
    }
}

impl Endpoints {
    /// Every surface pointed at one base URL (mock servers).
    pub fn uniform(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            realtime_base: base.clone(),
            management_base: base.clone(),
            reporting_base: base,
        }
    }

    /// Base URL for a surface, without a trailing slash.
    pub fn base_for(&self, surface: ApiSurface) -> &str {
        let base = match surface {
            ApiSurface::Realtime => &self.realtime_base,
            ApiSurface::CoreReporting => &self.management_base,
            ApiSurface::ReportingV4 => &self.reporting_base,
        };
        base.trim_end_matches('/')
    }
}

/// Top-level gaprobe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Analytics view (profile) the queries target.
    #[serde(default = "default_view_id")]
    pub view_id: String,
    #[serde(default = "default_realtime_metric")]
    pub realtime_metric: String,
    #[serde(default = "default_realtime_dimension")]
    pub realtime_dimension: String,
    #[serde(default = "default_report_metric")]
    pub report_metric: String,
    #[serde(default = "default_report_dimension")]
    pub report_dimension: String,
    /// Alias attached to the batch query's metric; becomes its header name.
    #[serde(default = "default_metric_alias")]
    pub metric_alias: String,
    /// Historical window, in days back from today.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Label printed in front of each realtime row.
    #[serde(default = "default_row_label")]
    pub row_label: String,
    #[serde(default)]
    pub key_file: Option<PathBuf>,
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_view_id() -> String {
    DEFAULT_VIEW_ID.into()
}
fn default_realtime_metric() -> String {
    DEFAULT_REALTIME_METRIC.into()
}
fn default_realtime_dimension() -> String {
    DEFAULT_REALTIME_DIMENSION.into()
}
fn default_report_metric() -> String {
    DEFAULT_REPORT_METRIC.into()
}
fn default_report_dimension() -> String {
    DEFAULT_REPORT_DIMENSION.into()
}
fn default_metric_alias() -> String {
    DEFAULT_METRIC_ALIAS.into()
}
fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}
fn default_row_label() -> String {
    DEFAULT_ROW_LABEL.into()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            view_id: default_view_id(),
            realtime_metric: default_realtime_metric(),
            realtime_dimension: default_realtime_dimension(),
            report_metric: default_report_metric(),
            report_dimension: default_report_dimension(),
            metric_alias: default_metric_alias(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            row_label: default_row_label(),
            key_file: None,
            endpoints: Endpoints::default(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the loaded value.
#[derive(Debug, Clone, Default)]
pub struct QueryOverrides {
    pub view_id: Option<String>,
    pub realtime_metric: Option<String>,
    pub realtime_dimension: Option<String>,
    pub report_metric: Option<String>,
    pub report_dimension: Option<String>,
    pub metric_alias: Option<String>,
    pub lookback_days: Option<u32>,
    pub row_label: Option<String>,
    pub key_file: Option<PathBuf>,
}

impl ProbeConfig {
    /// Load config from a JSON file. A missing file yields the defaults; a
    /// file that exists but does not parse is a configuration error.
    pub fn load(config_path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(config_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", config_path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::Config(format!(
                    "cannot read {}: {}",
                    config_path.display(),
                    e
                )))
            }
        };

        let config: ProbeConfig = serde_json::from_str(&raw).map_err(|e| {
            Error::Config(format!("invalid config {}: {}", config_path.display(), e))
        })?;
        info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, overrides: &QueryOverrides) {
        if let Some(v) = &overrides.view_id {
            self.view_id = v.clone();
        }
        if let Some(m) = &overrides.realtime_metric {
            self.realtime_metric = m.clone();
        }
        if let Some(d) = &overrides.realtime_dimension {
            self.realtime_dimension = d.clone();
        }
        if let Some(m) = &overrides.report_metric {
            self.report_metric = m.clone();
        }
        if let Some(d) = &overrides.report_dimension {
            self.report_dimension = d.clone();
        }
        if let Some(a) = &overrides.metric_alias {
            self.metric_alias = a.clone();
        }
        if let Some(n) = overrides.lookback_days {
            self.lookback_days = n;
        }
        if let Some(l) = &overrides.row_label {
            self.row_label = l.clone();
        }
        if let Some(k) = &overrides.key_file {
            self.key_file = Some(k.clone());
        }
    }
}
