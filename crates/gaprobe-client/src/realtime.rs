//! Realtime API query: current-minute buckets for one view.

use gaprobe_core::{ApiSurface, Error, ProbeConfig, Result};
use tracing::info;

use crate::client::AnalyticsClient;
use crate::report::{ColumnHeader, Report, ReportRow};
use crate::types::RealtimeData;

/// A realtime query. `metrics` and `dimensions` are comma-separated
/// `rt:` expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeQuery {
    pub view_id: String,
    pub metrics: String,
    pub dimensions: String,
}

impl RealtimeQuery {
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            view_id: config.view_id.clone(),
            metrics: config.realtime_metric.clone(),
            dimensions: config.realtime_dimension.clone(),
        }
    }

    /// The `ids` parameter: the view id with its `ga:` table prefix.
    pub fn table_id(&self) -> String {
        if self.view_id.starts_with("ga:") {
            self.view_id.clone()
        } else {
            format!("ga:{}", self.view_id)
        }
    }
}

/// Run one realtime query. Transport and service failures are returned as
/// errors; a successful call with no rows is an empty report.
pub async fn query_realtime(client: &AnalyticsClient, query: &RealtimeQuery) -> Result<Report> {
    client.require_surface(ApiSurface::Realtime)?;

    let ids = query.table_id();
    let data: RealtimeData = client
        .get_json(
            "data/realtime",
            &[
                ("ids", ids.as_str()),
                ("metrics", query.metrics.as_str()),
                ("dimensions", query.dimensions.as_str()),
            ],
        )
        .await?;

    let report = realtime_to_report(data)?;
    info!("Realtime query for {} returned {} rows", ids, report.rows.len());
    Ok(report)
}

/// Split realtime's flat rows into dimension and metric values using the
/// column headers.
pub fn realtime_to_report(data: RealtimeData) -> Result<Report> {
    let rows = data.rows.unwrap_or_default();
    let headers = match data.column_headers {
        Some(headers) => headers,
        None if rows.is_empty() => return Ok(Report::default()),
        None => return Err(Error::malformed("realtime rows arrived without column headers")),
    };

    let mut header = ColumnHeader::default();
    for column in &headers {
        match column.column_type.as_str() {
            "DIMENSION" => header.dimensions.push(column.name.clone()),
            "METRIC" => header.metrics.push(column.name.clone()),
            other => {
                return Err(Error::malformed(format!(
                    "column {} has unknown type {}",
                    column.name, other
                )))
            }
        }
    }

    let rows = rows
        .into_iter()
        .map(|values| {
            let mut row = ReportRow::default();
            let mut metric_values = Vec::new();
            for (column, value) in headers.iter().zip(values) {
                if column.column_type == "DIMENSION" {
                    row.dimensions.push(value);
                } else {
                    metric_values.push(value);
                }
            }
            if !header.metrics.is_empty() {
                row.metrics.push(metric_values);
            }
            row
        })
        .collect();

    Ok(Report::new(header, rows))
}
