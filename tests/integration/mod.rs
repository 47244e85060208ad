//! Integration tests for the loan API.
//!
//! Router tests run against a mock probe and need nothing external.
//!
//! Tests marked `#[ignore]` need a reachable Postgres configured through
//! POSTGRES_USER / POSTGRES_PASSWORD / POSTGRES_DB / DB_HOST / DB_PORT.
//! Run with: cargo test --test integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use loan_api::api::{create_router, AppState};
use loan_api::config::Config;
use loan_api::db::{check_health, DatabaseProbe, MockProbe, PgProbe};

/// Router backed by a probe that always succeeds.
fn healthy_app() -> Router {
    create_router(AppState::with_probe(MockProbe::healthy()))
}

/// Send a request and return status plus raw body bytes.
async fn send_raw(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Send a request and parse the JSON body.
async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

//
// GET /api/loans
//

#[tokio::test]
async fn list_returns_two_fixed_loans() {
    let (status, body) = send(healthy_app(), get("/api/loans")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 1, "amount": 1000 }, { "id": 2, "amount": 2000 }])
    );
}

#[tokio::test]
async fn list_ignores_prior_posts() {
    let app = healthy_app();

    let (status, _) = send(
        app.clone(),
        post_json("/api/loans", r#"{"amount":9999,"applicant":"New"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, get("/api/loans")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(
        body,
        json!([{ "id": 1, "amount": 1000 }, { "id": 2, "amount": 2000 }])
    );
}

//
// GET /api/loans/:id
//

#[tokio::test]
async fn get_loan_echoes_id_as_string() {
    for (path_id, expected) in [
        ("1", "1"),
        ("42", "42"),
        ("abc", "abc"),
        ("007", "007"),
        ("-3", "-3"),
        ("1.5", "1.5"),
        ("a%20b", "a b"),
    ] {
        let uri = format!("/api/loans/{}", path_id);
        let (status, body) = send(healthy_app(), get(&uri)).await;

        assert_eq!(status, StatusCode::OK, "uri {}", uri);
        assert_eq!(
            body,
            json!({ "id": expected, "amount": 1000, "applicant": "Mock User" })
        );
    }
}

#[tokio::test]
async fn list_is_served_with_trailing_slash() {
    let (status, body) = send(healthy_app(), get("/api/loans/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 1, "amount": 1000 }, { "id": 2, "amount": 2000 }])
    );
}

#[tokio::test]
async fn get_loan_never_returns_404_for_unknown_id() {
    let (status, body) = send(healthy_app(), get("/api/loans/999999")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!("999999"));
}

//
// POST /api/loans
//

#[tokio::test]
async fn create_echoes_body_with_id_3() {
    let (status, body) = send(
        healthy_app(),
        post_json(
            "/api/loans",
            r#"{"amount":2500,"applicant":"Jane Doe","term_months":12,"tags":["auto"]}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 3,
            "amount": 2500,
            "applicant": "Jane Doe",
            "term_months": 12,
            "tags": ["auto"]
        })
    );
}

#[tokio::test]
async fn create_overwrites_supplied_id() {
    let (status, body) = send(
        healthy_app(),
        post_json("/api/loans", r#"{"id":77,"amount":1}"#),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 3, "amount": 1 }));
}

#[tokio::test]
async fn create_with_empty_object() {
    let (status, body) = send(healthy_app(), post_json("/api/loans", "{}")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 3 }));
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let (status, body) = send(healthy_app(), post_json("/api/loans", r#"{"amount":"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_rejects_non_object_json() {
    let (status, body) = send(healthy_app(), post_json("/api/loans", "[1,2,3]")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("JSON object"));
}

#[tokio::test]
async fn create_with_empty_json_body() {
    let (status, body) = send(healthy_app(), post_json("/api/loans", "")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 3 }));
}

#[tokio::test]
async fn create_without_content_type_ignores_body() {
    for payload in ["", r#"{"amount":1}"#] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/loans")
            .body(Body::from(payload))
            .unwrap();

        let (status, body) = send(healthy_app(), request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "id": 3 }));
    }
}

//
// GET /api/stats
//

#[tokio::test]
async fn stats_are_fixed_regardless_of_posts() {
    let app = healthy_app();

    for _ in 0..3 {
        send(app.clone(), post_json("/api/loans", r#"{"amount":100}"#)).await;
    }

    let (status, body) = send(app, get("/api/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total_loans": 2, "total_value": 3000 }));
}

//
// GET /health
//

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = send(healthy_app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "database": "connected" }));
}

#[tokio::test]
async fn health_reports_probe_error_verbatim() {
    let message = "error communicating with database: Connection refused (os error 111)";
    let app = create_router(AppState::with_probe(MockProbe::failing(message)));

    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({ "status": "unhealthy", "database": "disconnected", "error": message })
    );
}

#[tokio::test]
async fn health_follows_live_database_state() {
    let probe = MockProbe::healthy();
    let app = create_router(AppState::with_probe(probe.clone()));

    let (status, _) = send(app.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    probe.set_healthy(false);
    let (status, _) = send(app.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    probe.set_healthy(true);
    let (status, _) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(probe.calls(), 3);
}

#[tokio::test]
async fn slow_health_probe_does_not_block_other_routes() {
    let probe = MockProbe::healthy().with_latency(Duration::from_millis(500));
    let app = create_router(AppState::with_probe(probe));

    let health = tokio::spawn(send(app.clone(), get("/health")));
    let started = std::time::Instant::now();
    let (status, _) = send(app, get("/api/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() < Duration::from_millis(500));
    assert_eq!(health.await.unwrap().0, StatusCode::OK);
}

//
// Fallthrough
//

#[tokio::test]
async fn unknown_route_returns_404() {
    let (status, body) = send(healthy_app(), get("/api/borrowers")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Cannot GET /api/borrowers" }));
}

#[tokio::test]
async fn unsupported_method_on_known_path_is_rejected() {
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/stats")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send_raw(healthy_app(), request).await;
    assert!(status.is_client_error(), "status {}", status);
}

//
// Idempotence
//

#[tokio::test]
async fn repeated_gets_are_byte_identical() {
    let app = healthy_app();

    for uri in ["/api/loans", "/api/loans/17", "/api/stats"] {
        let (_, first) = send_raw(app.clone(), get(uri)).await;
        let (_, second) = send_raw(app.clone(), get(uri)).await;
        assert_eq!(first, second, "uri {}", uri);
    }
}

//
// Live database
//

/// Build a config from the environment, if a database is configured.
fn live_config() -> Option<Config> {
    let config = Config::load().ok()?;
    config.postgres_db.as_ref()?;
    Some(config)
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn live_probe_succeeds() {
    let config = match live_config() {
        Some(c) => c,
        None => {
            println!("Skipping: POSTGRES_DB not set");
            return;
        }
    };

    let probe = PgProbe::from_config(&config);
    let result = probe.ping().await;
    assert!(result.is_ok(), "Probe failed: {:?}", result.err());

    let report = check_health(&probe).await;
    assert!(report.is_healthy());
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn live_health_endpoint() {
    let config = match live_config() {
        Some(c) => c,
        None => {
            println!("Skipping: POSTGRES_DB not set");
            return;
        }
    };

    let probe: Arc<dyn DatabaseProbe> = Arc::new(PgProbe::from_config(&config));
    let app = create_router(AppState::new(probe));

    let (status, body) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "database": "connected" }));
}

#[tokio::test]
async fn unreachable_database_yields_503() {
    let config = Config {
        db_host: Some("127.0.0.1".to_string()),
        db_port: Some(1),
        db_min_connections: 0,
        db_probe_timeout_ms: 500,
        ..Config::default()
    };
    let app = create_router(AppState::with_probe(PgProbe::from_config(&config)));

    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], json!("unhealthy"));
    assert_eq!(body["database"], json!("disconnected"));
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn silent_database_yields_503_with_timeout() {
    // Accepts connections and never answers the startup handshake.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = Config {
        db_host: Some("127.0.0.1".to_string()),
        db_port: Some(port),
        db_min_connections: 0,
        db_probe_timeout_ms: 300,
        ..Config::default()
    };
    let app = create_router(AppState::with_probe(PgProbe::from_config(&config)));

    let started = std::time::Instant::now();
    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({
            "status": "unhealthy",
            "database": "disconnected",
            "error": "database probe timed out after 300ms"
        })
    );
    assert!(started.elapsed() < Duration::from_secs(5));

    server.abort();
}
