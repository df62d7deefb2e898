#![allow(clippy::unwrap_used)]
// Integration tests for `PrtgClient` using wiremock.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prtg_api::{DeviceFilter, Error, NewDevice, PrtgClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

const TOKEN: &str = "test-token";

async fn setup() -> (MockServer, PrtgClient) {
    let server = MockServer::start().await;
    let client = client_for(&server, &TransportConfig::default());
    (server, client)
}

/// In-memory sink for formatted log records.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn lines_containing(&self, needle: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}

fn client_for(server: &MockServer, transport: &TransportConfig) -> PrtgClient {
    PrtgClient::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from(TOKEN.to_string()),
        transport,
    )
    .unwrap()
}

// ── Status ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_appends_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status.json"))
        .and(query_param("apitoken", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Version": "24.2.96" })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.get_status().await.unwrap();
    assert_eq!(status["Version"], "24.2.96");
}

// ── Failure tagging ─────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status.json"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_status().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.list_sensors(Some(40)).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(
        matches!(&err, Error::Http { endpoint, .. } if endpoint == "/api/table.json"),
        "expected Http error on table.json, got: {err:?}"
    );
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.get_status().await;
    assert!(
        matches!(result, Err(Error::InvalidResponse { .. })),
        "expected InvalidResponse, got: {result:?}"
    );
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    let client = client_for(
        &server,
        &TransportConfig {
            timeout: Duration::from_millis(200),
            ..TransportConfig::default()
        },
    );

    Mock::given(method("GET"))
        .and(path("/api/status.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Version": "24.2.96" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.get_status().await.unwrap_err();
    assert!(
        matches!(err, Error::Timeout { .. }),
        "expected timeout, got: {err:?}"
    );
    assert_eq!(err.to_string(), "Request timed out after 200ms");
}

#[tokio::test]
async fn test_timeout_is_logged_once_per_call() {
    let server = MockServer::start().await;
    let client = client_for(
        &server,
        &TransportConfig {
            timeout: Duration::from_millis(200),
            ..TransportConfig::default()
        },
    );

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "sensors": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let (logs, _guard) = capture_logs();

    client.list_sensors(Some(40)).await.unwrap_err();
    assert_eq!(logs.lines_containing("timed out"), 1);

    client.get_status().await.unwrap_err();
    assert_eq!(logs.lines_containing("timed out"), 2);
    assert_eq!(logs.lines_containing("ERROR"), 2);
    assert_eq!(logs.lines_containing("timeout=200ms"), 2);
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Nothing listens on the discard port.
    let client = PrtgClient::new(
        Url::parse("http://127.0.0.1:9").unwrap(),
        SecretString::from(TOKEN.to_string()),
        &TransportConfig::default(),
    )
    .unwrap();

    let result = client.get_status().await;
    assert!(
        matches!(result, Err(Error::Connection { .. })),
        "expected Connection error, got: {result:?}"
    );
}

// ── Tables ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_by_name_substring() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("content", "devices"))
        .and(query_param("filter_name", "@sub(core-sw1)"))
        .and(query_param("count", "50"))
        .and(query_param_is_missing("filter_host"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prtg-version": "24.2.96",
            "treesize": 1,
            "devices": [{
                "objid": 2045,
                "name": "core-sw1",
                "host": "10.0.0.1",
                "status": "Up",
                "message": "OK",
                "group": "Switches"
            }]
        })))
        .mount(&server)
        .await;

    let devices = client
        .list_devices(DeviceFilter::NameContains("core-sw1"), Some(50))
        .await
        .unwrap();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].objid, 2045);
    assert_eq!(devices[0].host, "10.0.0.1");
    assert_eq!(devices[0].group, "Switches");
}

#[tokio::test]
async fn test_list_devices_by_host_substring() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("filter_host", "@sub(10.0.0.9)"))
        .and(query_param_is_missing("filter_name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client
        .list_devices(DeviceFilter::HostContains("10.0.0.9"), Some(50))
        .await
        .unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn test_list_sensors_for_parent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("content", "sensors"))
        .and(query_param("filter_parentid", "2045"))
        .and(query_param("count", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sensors": [
                { "objid": 1, "name": "Ping", "status": "Up", "status_raw": 3, "lastvalue": "2 msec" },
                { "objid": 2, "name": "Uptime", "status": "Paused (paused by user)", "status_raw": 7 }
            ]
        })))
        .mount(&server)
        .await;

    let sensors = client.list_sensors(Some(2045)).await.unwrap();
    assert_eq!(sensors.len(), 2);
    assert_eq!(sensors[0].lastvalue, "2 msec");
    assert_eq!(sensors[1].status_raw, Some(7));
}

#[tokio::test]
async fn test_list_all_sensors_has_no_parent_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/table.json"))
        .and(query_param("content", "sensors"))
        .and(query_param_is_missing("filter_parentid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sensors": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.list_sensors(None).await.unwrap().is_empty());
}

// ── Creation calls ──────────────────────────────────────────────────

#[tokio::test]
async fn test_add_device_sends_discovery_parameters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/adddevice2.htm"))
        .and(query_param("name_", "edge-rtr"))
        .and(query_param("host_", "192.0.2.10"))
        .and(query_param("id", "7001"))
        .and(query_param("devicetemplate_", "1"))
        .and(query_param("discoverytype_", "1"))
        .and(query_param("discoveryschedule_", "0"))
        .and(query_param("apitoken", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .add_device(&NewDevice {
            name: "edge-rtr",
            host: "192.0.2.10",
            group_id: 7001,
            auto_discover: true,
        })
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("ok"));
}

#[tokio::test]
async fn test_add_device_bad_request() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/adddevice2.htm"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = client
        .add_device(&NewDevice {
            name: "edge-rtr",
            host: "192.0.2.10",
            group_id: 1,
            auto_discover: true,
        })
        .await
        .unwrap_err();
    assert!(err.is_bad_request());
}

#[tokio::test]
async fn test_add_group_under_parent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/addgroup.htm"))
        .and(query_param("name_", "NetBox Import"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.add_group("NetBox Import", 1).await.unwrap();
    assert_eq!(resp.status, 200);
}
