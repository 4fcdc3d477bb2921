//! HTTP API tests, driving the router in-process

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lhdice::{Config, DiceSource, Server};
use serde_json::Value;
use tower::ServiceExt;

fn app(seed: Option<u64>) -> Router {
    lhdice::api::router(
        Arc::new(common::system()),
        Arc::new(DiceSource::new(seed)),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_endpoint() {
    let (status, body) = get(app(None), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "lhdice");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get(app(None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_system_info() {
    let (status, body) = get(app(None), "/v1/systeminfo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "LogHorizon");
    assert_eq!(body["name"], "ログ・ホライズンTRPG");
    assert!(body["help_message"].as_str().unwrap().contains("PCT"));
    assert!(body["command_pattern"].as_str().unwrap().starts_with("^(?i)S?"));
}

#[tokio::test]
async fn test_roll_check() {
    let (status, body) = get(app(Some(1)), "/v1/roll?command=3LH%3E%3D8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["secret"], false);
    assert!(body["text"].as_str().unwrap().starts_with("(3LH>=8) ＞ "));

    let rands = body["rands"].as_array().unwrap();
    assert_eq!(rands.len(), 3);
    assert!(rands.iter().all(|r| r["sides"] == 6));
}

#[tokio::test]
async fn test_roll_secret() {
    let (status, body) = get(app(None), "/v1/roll?command=sPTAG").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["secret"], true);
    assert!(body["text"].as_str().unwrap().starts_with("パーソナリティタグ表("));
}

#[tokio::test]
async fn test_seeded_rolls_repeat() {
    let uri = "/v1/roll?command=TIAS";
    let (_, first) = get(app(Some(99)), uri).await;
    let (_, second) = get(app(Some(99)), uri).await;
    assert_eq!(first["text"], second["text"]);
}

#[tokio::test]
async fn test_roll_unsupported() {
    for uri in ["/v1/roll?command=2D6", "/v1/roll"] {
        let (status, body) = get(app(None), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["reason"], "unsupported command");
    }
}

#[tokio::test]
async fn test_server_starts_and_stops() {
    let config = Config {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        ..Config::default()
    };
    let server = Arc::new(Server::new(config).unwrap());

    let running = server.clone();
    let handle = tokio::spawn(async move { running.run().await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    server.shutdown();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[test]
fn test_bad_locale_path_fails() {
    let config = Config {
        locale_path: Some("/nonexistent/locale.json".into()),
        ..Config::default()
    };
    assert!(Server::new(config).is_err());
}
