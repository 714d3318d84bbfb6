//! End-to-end browsing against a mocked identity service: filter changes,
//! pagination, client-side search and export through the HTTP client.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use credlens_client::{HttpSearchClient, SearchApiConfig};
use credlens_core::{CredentialRecord, Filters, MemorySink, StatusFilter, TimeRange};
use credlens_state::{CredentialBrowser, FixedClock};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH: &str = "/api/ui/v1/identity/credentials/search";

fn credentials(start: usize, n: usize) -> Vec<serde_json::Value> {
    (start..start + n)
        .map(|i| {
            serde_json::json!({
                "vc_id": format!("vc-{i}"),
                "execution_id": format!("exec-{i}"),
                "workflow_id": if i == 7 { "ws-42".to_string() } else { format!("wf-{i}") },
                "reasoner_name": "triage",
                "status": "failed",
                "duration_ms": 420,
                "verified": true,
                "created_at": "2026-01-15T10:00:00Z"
            })
        })
        .collect()
}

fn browser(
    server: &MockServer,
    sink: Arc<MemorySink>,
) -> CredentialBrowser<HttpSearchClient> {
    let config = SearchApiConfig::new(server.uri().parse().unwrap());
    let client = HttpSearchClient::new(config).unwrap();
    CredentialBrowser::builder(client)
        .clock(Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        )))
        .sink(sink)
        .build()
}

#[tokio::test]
async fn seven_day_failed_filter_pages_through_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("start_time", "2026-01-08T12:00:00.000Z"))
        .and(query_param("end_time", "2026-01-15T12:00:00.000Z"))
        .and(query_param("status", "failed"))
        .and(query_param("limit", "50"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "credentials": credentials(0, 50),
            "total": 120
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("start_time", "2026-01-08T12:00:00.000Z"))
        .and(query_param("status", "failed"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "credentials": credentials(50, 50),
            "total": 120
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(MemorySink::new());
    let browser = browser(&server, sink.clone());

    let state = browser
        .set_filters(Filters::new(TimeRange::LastWeek, StatusFilter::parse("failed")))
        .await;
    assert_eq!(state.items.len(), 50);
    assert_eq!(state.total, 120);
    assert!(state.has_more);
    assert_eq!(state.error, None);

    let state = browser.load_more().await;
    assert_eq!(state.items.len(), 100);
    assert_eq!(state.offset, 50);
    assert!(state.has_more);

    browser.set_search_query("ws-42");
    let visible = browser.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].vc_id, "vc-7");

    let filename = browser.export_visible().unwrap();
    assert!(filename.starts_with("credentials-export-"));
    let exported: Vec<CredentialRecord> =
        serde_json::from_str(&sink.documents()[0].content).unwrap();
    assert_eq!(exported, visible);
}

#[tokio::test]
async fn server_error_on_reset_clears_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("offset", "0"))
        .and(query_param("status", "failed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "credentials": credentials(0, 3),
            "total": 3
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(SEARCH))
        .and(query_param("status", "succeeded"))
        .respond_with(ResponseTemplate::new(500).set_body_string("search index offline"))
        .mount(&server)
        .await;

    let browser = browser(&server, Arc::new(MemorySink::new()));
    let loaded = browser.set_status(StatusFilter::parse("failed")).await;
    assert_eq!(loaded.items.len(), 3);

    let failed = browser.set_status(StatusFilter::parse("succeeded")).await;
    assert!(failed.items.is_empty());
    let message = failed.error.unwrap();
    assert!(message.contains("search index offline"), "{message}");
}
