//! Reporting API v4 batch query over a relative lookback window.

use gaprobe_core::{ApiSurface, Error, ProbeConfig, Result};
use tracing::{info, warn};

use crate::client::AnalyticsClient;
use crate::report::{ColumnHeader, Report, ReportRow};
use crate::types::{
    DateRange, DimensionSpec, GetReportsRequest, GetReportsResponse, MetricSpec, ReportRequest,
    WireReport,
};

/// One metric broken down by one dimension over the last `lookback_days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub view_id: String,
    pub lookback_days: u32,
    pub metric: String,
    pub metric_alias: Option<String>,
    pub dimension: String,
}

impl ReportQuery {
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            view_id: config.view_id.clone(),
            lookback_days: config.lookback_days,
            metric: config.report_metric.clone(),
            metric_alias: Some(config.metric_alias.clone()).filter(|a| !a.is_empty()),
            dimension: config.report_dimension.clone(),
        }
    }

    /// A batch holding exactly one sub-request.
    pub fn to_request(&self) -> GetReportsRequest {
        let request = ReportRequest {
            view_id: self.view_id.clone(),
            date_ranges: vec![DateRange::lookback(self.lookback_days)],
            dimensions: vec![DimensionSpec {
                name: self.dimension.clone(),
            }],
            metrics: vec![MetricSpec {
                expression: self.metric.clone(),
                alias: self.metric_alias.clone(),
            }],
        };

        GetReportsRequest {
            report_requests: vec![request],
        }
    }
}

/// Submit the batch and return one report per sub-request. Only the first
/// page of each report is fetched.
pub async fn batch_get(client: &AnalyticsClient, query: &ReportQuery) -> Result<Vec<Report>> {
    client.require_surface(ApiSurface::ReportingV4)?;

    let response: GetReportsResponse = client
        .post_json("reports:batchGet", &query.to_request())
        .await?;

    let reports = response
        .reports
        .into_iter()
        .map(wire_to_report)
        .collect::<Result<Vec<_>>>()?;

    for report in &reports {
        if let Some(token) = &report.next_page_token {
            warn!(
                "View {} has more rows than the first page (nextPageToken={}); they are not fetched",
                query.view_id, token
            );
        }
    }

    info!(
        "Batch query for view {} returned {} report(s), {} row(s)",
        query.view_id,
        reports.len(),
        reports.iter().map(|r| r.rows.len()).sum::<usize>()
    );
    Ok(reports)
}

/// Convert one v4 report. A report without a column header is rejected.
pub fn wire_to_report(wire: WireReport) -> Result<Report> {
    let column_header = wire
        .column_header
        .ok_or_else(|| Error::malformed("report is missing its columnHeader"))?;

    let header = ColumnHeader {
        dimensions: column_header.dimensions,
        metrics: column_header
            .metric_header
            .map(|m| m.metric_header_entries.into_iter().map(|e| e.name).collect())
            .unwrap_or_default(),
    };

    let rows = wire
        .data
        .and_then(|d| d.rows)
        .unwrap_or_default()
        .into_iter()
        .map(|row| ReportRow {
            dimensions: row.dimensions,
            metrics: row.metrics.into_iter().map(|m| m.values).collect(),
        })
        .collect();

    Ok(Report {
        header,
        rows,
        next_page_token: wire.next_page_token,
    })
}
