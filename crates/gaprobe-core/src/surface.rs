//! Reporting API surfaces a client can be bound to.

use serde::{Deserialize, Serialize};

pub const SCOPE_ANALYTICS: &str = "https://www.googleapis.com/auth/analytics";
pub const SCOPE_ANALYTICS_READONLY: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Which API family a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSurface {
    /// Realtime API (`data/realtime`), current-minute buckets.
    Realtime,
    /// Core Reporting / Management API v3 (accounts, properties, views).
    CoreReporting,
    /// Analytics Reporting API v4 (`reports:batchGet`).
    ReportingV4,
}

impl ApiSurface {
    /// OAuth scopes requested when authorizing for this surface.
    pub fn scopes(&self) -> &'static [&'static str] {
        match self {
            ApiSurface::Realtime | ApiSurface::CoreReporting => &[SCOPE_ANALYTICS_READONLY],
            ApiSurface::ReportingV4 => &[SCOPE_ANALYTICS, SCOPE_ANALYTICS_READONLY],
        }
    }
}

impl std::fmt::Display for ApiSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiSurface::Realtime => write!(f, "realtime"),
            ApiSurface::CoreReporting => write!(f, "core-reporting"),
            ApiSurface::ReportingV4 => write!(f, "reporting-v4"),
        }
    }
}
