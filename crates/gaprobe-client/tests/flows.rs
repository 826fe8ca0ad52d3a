//! Full flows against a mock token endpoint and mock analytics APIs.

use gaprobe_auth::{AccessToken, ServiceAccountKey};
use gaprobe_client::flows::{resolve_view, run_realtime, run_report};
use gaprobe_client::{query_realtime, AnalyticsClient, RealtimeOutput, RealtimeQuery};
use gaprobe_core::{ApiSurface, Endpoints, Error, ProbeConfig};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_PEM: &str = include_str!("../../gaprobe-auth/tests/fixtures/test_key.pem");
const TOKEN: &str = "ya29.mock";

async fn start_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": TOKEN,
            "expires_in": 3600,
            "token_type": "Bearer",
        })))
        .mount(&server)
        .await;
    server
}

fn key_for(server: &MockServer) -> ServiceAccountKey {
    let json = serde_json::json!({
        "type": "service_account",
        "private_key": TEST_PEM,
        "client_email": "reporter@poc-project.iam.gserviceaccount.com",
        "token_uri": format!("{}/token", server.uri()),
    });
    ServiceAccountKey::from_slice(json.to_string().as_bytes()).unwrap()
}

fn config_for(server: &MockServer) -> ProbeConfig {
    ProbeConfig {
        endpoints: Endpoints::uniform(server.uri()),
        ..ProbeConfig::default()
    }
}

/// Serve a management tree whose first path is `acc-1` / `UA-1-1` / `profile_id`.
async fn mount_management(server: &MockServer, profile_id: &str) {
    Mock::given(method("GET"))
        .and(path("/management/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": "acc-1", "name": "First"}, {"id": "acc-2"}]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/management/accounts/acc-1/webproperties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": "UA-1-1"}]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/management/accounts/acc-1/webproperties/UA-1-1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": profile_id}, {"id": "888"}]
        })))
        .mount(server)
        .await;
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn test_realtime_prints_booking_ids() {
    let server = start_server().await;
    Mock::given(method("GET"))
        .and(path("/data/realtime"))
        .and(query_param("ids", "ga:12341234"))
        .and(query_param("metrics", "rt:totalEvents"))
        .and(query_param("dimensions", "rt:eventLabel,rt:minutesAgo"))
        .and(header("authorization", "Bearer ya29.mock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "analytics#realtimeData",
            "columnHeaders": [
                {"name": "rt:eventLabel", "columnType": "DIMENSION", "dataType": "STRING"},
                {"name": "rt:minutesAgo", "columnType": "DIMENSION", "dataType": "STRING"},
                {"name": "rt:totalEvents", "columnType": "METRIC", "dataType": "INTEGER"}
            ],
            "rows": [["booking-42", "00", "1"]],
            "totalResults": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    let report = run_realtime(
        &reqwest::Client::new(),
        &key_for(&server),
        &config_for(&server),
        RealtimeOutput::Labelled,
        &mut buf,
    )
    .await
    .unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(output(buf), "bookingId: booking-42\n");
}

#[tokio::test]
async fn test_realtime_failure_is_not_an_empty_result() {
    let server = start_server().await;
    Mock::given(method("GET"))
        .and(path("/data/realtime"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {
                "code": 403,
                "message": "User does not have sufficient permissions for this profile.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    let err = run_realtime(
        &reqwest::Client::new(),
        &key_for(&server),
        &config_for(&server),
        RealtimeOutput::Labelled,
        &mut buf,
    )
    .await
    .unwrap_err();

    match err {
        Error::Query { status, message } => {
            assert_eq!(status, 403);
            assert!(message.starts_with("PERMISSION_DENIED"));
        }
        other => panic!("expected query error, got {other:?}"),
    }
    assert!(buf.is_empty());
}

#[tokio::test]
async fn test_realtime_without_view_id_is_config_error() {
    let server = start_server().await;
    Mock::given(method("GET"))
        .and(path("/data/realtime"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ProbeConfig {
        view_id: String::new(),
        ..config_for(&server)
    };
    let mut buf = Vec::new();
    let err = run_realtime(
        &reqwest::Client::new(),
        &key_for(&server),
        &config,
        RealtimeOutput::Labelled,
        &mut buf,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(buf.is_empty());
}

#[tokio::test]
async fn test_realtime_without_rows_prints_notice() {
    let server = start_server().await;
    Mock::given(method("GET"))
        .and(path("/data/realtime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "analytics#realtimeData",
            "totalResults": 0
        })))
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    let report = run_realtime(
        &reqwest::Client::new(),
        &key_for(&server),
        &config_for(&server),
        RealtimeOutput::AllColumns,
        &mut buf,
    )
    .await
    .unwrap();

    assert!(report.is_empty());
    assert_eq!(output(buf), "No data found for 12341234\n");
}

#[tokio::test]
async fn test_report_prints_header_labelled_rows() {
    let server = start_server().await;
    mount_management(&server, "777").await;
    Mock::given(method("POST"))
        .and(path("/reports:batchGet"))
        .and(header("authorization", "Bearer ya29.mock"))
        .and(body_partial_json(serde_json::json!({
            "reportRequests": [{
                "viewId": "12341234",
                "dateRanges": [{"startDate": "7DaysAgo", "endDate": "today"}],
                "dimensions": [{"name": "ga:transactionId"}],
                "metrics": [{"expression": "ga:transactions", "alias": "transactions"}]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "reports": [{
                "columnHeader": {
                    "dimensions": ["eventLabel"],
                    "metricHeader": {"metricHeaderEntries": [{"name": "transactions", "type": "INTEGER"}]}
                },
                "data": {
                    "rows": [{"dimensions": ["booking-42"], "metrics": [{"values": ["1"]}]}],
                    "rowCount": 1
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    let reports = run_report(
        &reqwest::Client::new(),
        &key_for(&server),
        &config_for(&server),
        false,
        &mut buf,
    )
    .await
    .unwrap();

    assert_eq!(reports.len(), 1);
    let out = output(buf);
    assert!(out.lines().any(|line| line == "eventLabel: booking-42"));
    assert_eq!(
        out,
        "First Profile Id: 777\neventLabel: booking-42\nDate Range (0): transactions: 1\n"
    );
}

#[tokio::test]
async fn test_report_without_reachable_view_keeps_configured_id() {
    let server = start_server().await;
    Mock::given(method("GET"))
        .and(path("/management/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reports:batchGet"))
        .and(body_partial_json(serde_json::json!({
            "reportRequests": [{"viewId": "12341234"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "reports": [{"columnHeader": {"dimensions": ["ga:transactionId"]}, "data": {}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    run_report(
        &reqwest::Client::new(),
        &key_for(&server),
        &config_for(&server),
        false,
        &mut buf,
    )
    .await
    .unwrap();

    assert_eq!(output(buf), "No data found for 12341234\n");
}

#[tokio::test]
async fn test_report_with_resolved_view() {
    let server = start_server().await;
    mount_management(&server, "777").await;
    Mock::given(method("POST"))
        .and(path("/reports:batchGet"))
        .and(body_partial_json(serde_json::json!({
            "reportRequests": [{"viewId": "777"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "reports": [{"columnHeader": {"dimensions": ["ga:transactionId"]}, "data": {}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut buf = Vec::new();
    run_report(
        &reqwest::Client::new(),
        &key_for(&server),
        &config_for(&server),
        true,
        &mut buf,
    )
    .await
    .unwrap();

    assert_eq!(output(buf), "First Profile Id: 777\nNo data found for 777\n");
}

#[tokio::test]
async fn test_unresolved_view_never_queries() {
    let server = start_server().await;
    Mock::given(method("GET"))
        .and(path("/management/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/management/accounts/acc-1/webproperties"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reports:batchGet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let key = key_for(&server);
    let config = config_for(&server);
    let http = reqwest::Client::new();

    assert_eq!(resolve_view(&http, &key, &config).await.unwrap(), None);

    let mut buf = Vec::new();
    let err = run_report(&http, &key, &config, true, &mut buf).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(buf.is_empty());
}

#[tokio::test]
async fn test_client_rejects_wrong_surface() {
    let token = AccessToken::new(
        TOKEN,
        vec![],
        chrono::Utc::now() + chrono::Duration::seconds(60),
    );
    let client = AnalyticsClient::with_http(
        reqwest::Client::new(),
        token,
        ApiSurface::ReportingV4,
        &Endpoints::uniform("http://127.0.0.1:1"),
    );

    let query = RealtimeQuery {
        view_id: "1".into(),
        metrics: "rt:totalEvents".into(),
        dimensions: "rt:eventLabel".into(),
    };
    let err = query_realtime(&client, &query).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
