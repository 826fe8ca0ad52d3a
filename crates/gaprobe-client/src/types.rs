//! Wire types for the three API surfaces, matching the services' JSON.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------
// Realtime API (v3 data/realtime)
// ---------------------------------------------------------------

/// Response of `GET data/realtime`. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealtimeData {
    #[serde(default, rename = "columnHeaders")]
    pub column_headers: Option<Vec<RealtimeColumnHeader>>,
    /// One entry per row; each row holds all columns in header order.
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeColumnHeader {
    pub name: String,
    /// `DIMENSION` or `METRIC`.
    #[serde(rename = "columnType")]
    pub column_type: String,
    #[serde(default, rename = "dataType")]
    pub data_type: Option<String>,
}

// ---------------------------------------------------------------
// Reporting API v4 (reports:batchGet)
// ---------------------------------------------------------------

/// Relative or absolute date window, e.g. `7DaysAgo` to `today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

impl DateRange {
    /// Window from `days` days ago up to today.
    pub fn lookback(days: u32) -> Self {
        Self {
            start_date: format!("{}DaysAgo", days),
            end_date: "today".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionSpec {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricSpec {
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    #[serde(rename = "viewId")]
    pub view_id: String,
    #[serde(rename = "dateRanges")]
    pub date_ranges: Vec<DateRange>,
    pub dimensions: Vec<DimensionSpec>,
    pub metrics: Vec<MetricSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetReportsRequest {
    #[serde(rename = "reportRequests")]
    pub report_requests: Vec<ReportRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetReportsResponse {
    #[serde(default)]
    pub reports: Vec<WireReport>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireReport {
    #[serde(default, rename = "columnHeader")]
    pub column_header: Option<WireColumnHeader>,
    #[serde(default)]
    pub data: Option<WireReportData>,
    #[serde(default, rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireColumnHeader {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default, rename = "metricHeader")]
    pub metric_header: Option<WireMetricHeader>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMetricHeader {
    #[serde(default, rename = "metricHeaderEntries")]
    pub metric_header_entries: Vec<MetricHeaderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricHeaderEntry {
    pub name: String,
    #[serde(default, rename = "type")]
    pub metric_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireReportData {
    #[serde(default)]
    pub rows: Option<Vec<WireReportRow>>,
    #[serde(default, rename = "rowCount")]
    pub row_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireReportRow {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<DateRangeValues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeValues {
    #[serde(default)]
    pub values: Vec<String>,
}

// ---------------------------------------------------------------
// Management API (v3 management/*)
// ---------------------------------------------------------------

/// Any management collection: accounts, webproperties, profiles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManagementList {
    #[serde(default)]
    pub items: Vec<ManagementItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagementItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------
// Errors
// ---------------------------------------------------------------

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
