//! Integration tests for the scrape cycle
//!
//! These tests use wiremock to stand in for the router's web interface and
//! drive full login -> fetch -> reconcile cycles against it.

use std::sync::Arc;
use std::time::Duration;
use tplink_exporter::collector::{Collector, CycleStage, SnapshotStore};
use tplink_exporter::config::{CollectionMode, Config};
use tplink_exporter::model::UNKNOWN_CLIENT_NAME;
use tplink_exporter::naming::parse_naming_database;
use tplink_exporter::output::{serve, AppState};
use tplink_exporter::router::auth_cookie;
use tplink_exporter::{NamingTable, RouterError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "ABCDEFGHIJKLMNOP";

const LOGIN_PAGE: &str = r#"<body><script language="javaScript">
window.parent.location.href = "http://192.168.0.1/ABCDEFGHIJKLMNOP/userRpm/Index.htm";
</script></body></html>"#;

const STATUS_PAGE: &str = r#"<html><head><script type="text/javascript">
var statusPara = new Array(1, 1, 0, 0 );
var statistList = new Array(
"4,096", "10,240", "31", "28",
0,0 );
</script></head><body></body></html>"#;

const CLIENT_PAGE: &str = r#"<html><head><script type="text/javascript">
var DHCPDynList = new Array(
"PC1", "AA-BB-CC-DD-EE-FF", "192.168.0.10", "01:00:00",
"phone", "11-22-33-44-55-66", "192.168.0.11", "Permanent",
0,0 );
</script></head><body></body></html>"#;

const STATS_PAGE: &str = r#"<html><head><script type="text/javascript">
var statList = new Array(
1, "192.168.0.10", "AA-BB-CC-DD-EE-FF", 100, 2048, 0, 0, 0, 0, 0,
2, "192.168.0.20", "DE-AD-BE-EF-00-01", 7, 1024, 0, 0, 0, 0, 0,
0,0 );
</script></head><body></body></html>"#;

/// Creates a test configuration pointing at the mock router
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.router.address = server.uri();
    config.router.username = "admin".to_string();
    config.router.password = "admin".to_string();
    config.router.timeout_ms = 500;
    config.naming.database_path = String::new();
    config
}

fn token_path(page: &str) -> String {
    format!("/{}/userRpm/{}", TOKEN, page)
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/userRpm/LoginRpm.htm"))
        .and(header("Cookie", auth_cookie("admin", "admin").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(token_path(page).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_router(server: &MockServer) {
    mount_login(server).await;
    mount_page(server, "StatusRpm.htm", STATUS_PAGE).await;
    mount_page(server, "AssignedIpAddrListRpm.htm", CLIENT_PAGE).await;
    mount_page(server, "SystemStatisticRpm.htm", STATS_PAGE).await;
}

#[tokio::test]
async fn test_full_scrape_cycle() {
    let mock_server = MockServer::start().await;
    mount_router(&mock_server).await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    let snapshot = collector.run_cycle().await.expect("cycle should succeed");

    // First statistList field is transmit, second is receive
    assert_eq!(snapshot.wan.tx_kbytes, 4.0);
    assert_eq!(snapshot.wan.rx_kbytes, 10.0);

    assert_eq!(snapshot.clients.len(), 3);

    let pc = snapshot.client("AA-BB-CC-DD-EE-FF").expect("merged client");
    assert_eq!(pc.name, "PC1");
    assert_eq!(pc.ip, "192.168.0.10");
    assert_eq!(pc.lease_secs, 3600);
    assert_eq!(pc.packets, 100);
    assert_eq!(pc.kbytes, 2.0);

    let unknown = snapshot.client("DE-AD-BE-EF-00-01").expect("stats-only client");
    assert_eq!(unknown.name, UNKNOWN_CLIENT_NAME);
    assert_eq!(unknown.lease_secs, 0);
    assert_eq!(unknown.kbytes, 1.0);

    let phone = snapshot.client("11-22-33-44-55-66").expect("wireless-only client");
    assert_eq!(phone.name, "phone");
    assert_eq!(phone.packets, 0);
    assert_eq!(phone.kbytes, 0.0);
}

#[tokio::test]
async fn test_requests_carry_cookie_and_referer() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;

    let status_url = format!("{}{}", mock_server.uri(), token_path("StatusRpm.htm"));
    Mock::given(method("GET"))
        .and(path(token_path("StatusRpm.htm").as_str()))
        .and(header("Cookie", auth_cookie("admin", "admin").as_str()))
        .and(header("Referer", status_url.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "AssignedIpAddrListRpm.htm", CLIENT_PAGE).await;
    mount_page(&mock_server, "SystemStatisticRpm.htm", STATS_PAGE).await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    collector.run_cycle().await.expect("cycle should succeed");
}

#[tokio::test]
async fn test_naming_overrides_applied() {
    let mock_server = MockServer::start().await;
    mount_router(&mock_server).await;

    let naming = parse_naming_database(
        "AA-BB-CC=Vendor box\n\
         AA-BB-CC-DD-EE-FF=Office PC\n\
         DE-AD-BE=Printer\n",
    );
    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, naming).expect("collector");

    let snapshot = collector.run_cycle().await.expect("cycle should succeed");

    assert_eq!(snapshot.client("AA-BB-CC-DD-EE-FF").unwrap().name, "Office PC");
    assert_eq!(snapshot.client("DE-AD-BE-EF-00-01").unwrap().name, "Printer");
    assert_eq!(snapshot.client("11-22-33-44-55-66").unwrap().name, "phone");
}

#[tokio::test]
async fn test_failed_stats_fetch_publishes_nothing() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    mount_page(&mock_server, "StatusRpm.htm", STATUS_PAGE).await;
    mount_page(&mock_server, "AssignedIpAddrListRpm.htm", CLIENT_PAGE).await;
    Mock::given(method("GET"))
        .and(path(token_path("SystemStatisticRpm.htm").as_str()))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    let error = collector.run_cycle().await.unwrap_err();
    assert_eq!(error.stage, CycleStage::FetchStats);
    assert!(matches!(error.source, RouterError::Transport { .. }));

    // Timer binding: the failed cycle leaves the store untouched
    let store = SnapshotStore::new();
    assert!(!collector.tick(&store).await);
    assert!(store.latest().await.is_none());
}

#[tokio::test]
async fn test_failed_cycle_keeps_previous_snapshot() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    mount_page(&mock_server, "AssignedIpAddrListRpm.htm", CLIENT_PAGE).await;
    mount_page(&mock_server, "SystemStatisticRpm.htm", STATS_PAGE).await;
    Mock::given(method("GET"))
        .and(path(token_path("StatusRpm.htm").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(STATUS_PAGE))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(token_path("StatusRpm.htm").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");
    let store = SnapshotStore::new();

    assert!(collector.tick(&store).await);
    let first = store.latest().await.expect("first snapshot");

    assert!(!collector.tick(&store).await);
    let still = store.latest().await.expect("snapshot kept");
    assert_eq!(still.taken_at, first.taken_at);
}

#[tokio::test]
async fn test_missing_token_is_auth_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userRpm/LoginRpm.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad password</html>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    let error = collector.run_cycle().await.unwrap_err();
    assert_eq!(error.stage, CycleStage::Login);
    match error.source {
        RouterError::Auth { body } => assert_eq!(body, "<html>bad password</html>"),
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pull_scrape_retries_once() {
    let mock_server = MockServer::start().await;

    // First login attempt fails, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/userRpm/LoginRpm.htm"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_router(&mock_server).await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    let snapshot = collector.scrape().await.expect("retry should succeed");
    assert_eq!(snapshot.clients.len(), 3);
}

#[tokio::test]
async fn test_pull_scrape_gives_up_after_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userRpm/LoginRpm.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("no token here"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    let error = collector.scrape().await.unwrap_err();
    assert_eq!(error.stage, CycleStage::Login);
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/userRpm/LoginRpm.htm"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LOGIN_PAGE)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server);
    config.router.timeout_ms = 200;
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    let error = collector.run_cycle().await.unwrap_err();
    assert!(matches!(error.source, RouterError::Transport { .. }));
}

#[tokio::test]
async fn test_reboot_logs_in_first() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server).await;
    Mock::given(method("GET"))
        .and(path(token_path("SysRebootRpm.htm").as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    collector.reboot().await.expect("reboot should succeed");
}

#[tokio::test]
async fn test_logout_after_scrape() {
    let mock_server = MockServer::start().await;
    mount_router(&mock_server).await;
    Mock::given(method("GET"))
        .and(path(token_path("LogoutRpm.htm").as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server);
    config.exporter.logout_after_scrape = true;
    let collector = Collector::new(&config, NamingTable::default()).expect("collector");

    collector.run_cycle().await.expect("cycle should succeed");
}

#[tokio::test]
async fn test_metrics_endpoint_pull_mode() {
    let mock_server = MockServer::start().await;
    mount_router(&mock_server).await;

    let mut config = create_test_config(&mock_server);
    config.exporter.collection_mode = CollectionMode::Pull;
    let collector = Arc::new(Collector::new(&config, NamingTable::default()).expect("collector"));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(serve(listener, AppState::new(collector, &config.exporter)));

    let response = reqwest::get(format!("http://{}/metrics", addr))
        .await
        .expect("metrics request");
    assert_eq!(response.status().as_u16(), 200);

    let body = response.text().await.expect("body");
    assert!(body.contains("tplink_wan_rx_kbytes 10\n"));
    assert!(body.contains(
        r#"tplink_lan_traffic_packets{name="PC1",ip="192.168.0.10",mac="AA-BB-CC-DD-EE-FF"} 100"#
    ));
}
