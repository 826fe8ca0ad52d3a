//! End-to-end command flows: authorize, query, print.
//!
//! Each flow builds a fresh client per surface and issues its requests one at
//! a time. Output goes to the supplied writer; diagnostics go to tracing.

use std::io::Write;

use gaprobe_auth::{exchange, ServiceAccountKey};
use gaprobe_core::{ApiSurface, Error, ProbeConfig, Result};
use reqwest::Client;
use tracing::info;

use crate::client::AnalyticsClient;
use crate::management::{resolve_first_profile, ProfileRef};
use crate::printer::{print_labelled_column, print_reports};
use crate::realtime::{query_realtime, RealtimeQuery};
use crate::report::Report;
use crate::reporting::{batch_get, ReportQuery};

/// Exchange the key for a token scoped to `surface` and bind a client to it.
pub async fn connect(
    http: &Client,
    key: &ServiceAccountKey,
    surface: ApiSurface,
    config: &ProbeConfig,
) -> Result<AnalyticsClient> {
    let token = exchange(http, key, surface.scopes()).await?;
    info!(
        "Authorized {} for {}, token valid until {}",
        key.client_email,
        surface,
        token.expires_at().to_rfc3339()
    );
    Ok(AnalyticsClient::with_http(
        http.clone(),
        token,
        surface,
        &config.endpoints,
    ))
}

/// How realtime rows are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealtimeOutput {
    /// `{row_label}: {first dimension}` per row.
    Labelled,
    /// Every column, labelled by its header.
    AllColumns,
}

/// Realtime flow: one query against the configured view.
pub async fn run_realtime(
    http: &Client,
    key: &ServiceAccountKey,
    config: &ProbeConfig,
    output: RealtimeOutput,
    out: &mut impl Write,
) -> Result<Report> {
    let query = RealtimeQuery::from_config(config);
    require_view_id(&query.view_id)?;

    let client = connect(http, key, ApiSurface::Realtime, config).await?;
    let report = query_realtime(&client, &query).await?;

    match output {
        RealtimeOutput::Labelled => print_labelled_column(&report, &config.row_label, &query.view_id, out)?,
        RealtimeOutput::AllColumns => print_reports(std::slice::from_ref(&report), &query.view_id, out)?,
    }
    Ok(report)
}

/// Resolve the first view reachable by the service account.
pub async fn resolve_view(http: &Client, key: &ServiceAccountKey, config: &ProbeConfig) -> Result<Option<ProfileRef>> {
    let client = connect(http, key, ApiSurface::CoreReporting, config).await?;
    resolve_first_profile(&client).await
}

fn require_view_id(view_id: &str) -> Result<()> {
    if view_id.trim().is_empty() {
        return Err(Error::Config("no view id configured".into()));
    }
    Ok(())
}

/// Batch flow. The first reachable view is always looked up and printed.
/// With `resolve_target` the query runs against it, and finding none is an
/// error rather than a query with no id; otherwise the configured view is
/// queried.
pub async fn run_report(
    http: &Client,
    key: &ServiceAccountKey,
    config: &ProbeConfig,
    resolve_target: bool,
    out: &mut impl Write,
) -> Result<Vec<Report>> {
    let mut query = ReportQuery::from_config(config);

    match resolve_view(http, key, config).await? {
        Some(profile) => {
            writeln!(out, "First Profile Id: {}", profile.profile_id)?;
            if resolve_target {
                query.view_id = profile.profile_id;
            }
        }
        None if resolve_target => {
            return Err(Error::Config("no view (profile) is reachable with this key".into()));
        }
        None => {}
    }

    require_view_id(&query.view_id)?;

    info!(
        "Querying view {} for {} by {} over the last {} days",
        query.view_id, query.metric, query.dimension, query.lookback_days
    );

    let client = connect(http, key, ApiSurface::ReportingV4, config).await?;
    let reports = batch_get(&client, &query).await?;
    print_reports(&reports, &query.view_id, out)?;
    Ok(reports)
}
