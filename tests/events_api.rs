//! Events, users and health endpoints over HTTP.

#![allow(clippy::panic)]

mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{TestServer, code_of, id_of, send};

#[tokio::test]
async fn health_reports_healthy() {
    let server = TestServer::spawn().await;
    let (status, body) = send(server.get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status").and_then(Value::as_str), Some("healthy"));
    assert_eq!(body.get("database").and_then(Value::as_str), Some("ok"));
}

#[tokio::test]
async fn created_event_reads_back_with_review_stats() {
    let server = TestServer::spawn().await;
    let (status, created) = send(server.post(
        "/api/events",
        &json!({
            "title": "  Lakers vs Celtics ",
            "sport": "Basketball",
            "league": "NBA",
            "date": "2024-03-15T19:30:00Z",
            "homeTeam": "Lakers",
            "awayTeam": "Celtics",
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_of(&created);

    let (status, detail) = send(server.get(&format!("/api/events/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail.get("title").and_then(Value::as_str), Some("Lakers vs Celtics"));
    assert_eq!(detail.get("homeTeam").and_then(Value::as_str), Some("Lakers"));
    assert_eq!(
        detail.pointer("/reviewStats/count").and_then(Value::as_i64),
        Some(0)
    );

    let (status, plain) = send(server.get(&format!("/api/events?id={id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, created);
}

#[tokio::test]
async fn missing_title_inserts_nothing() {
    let server = TestServer::spawn().await;
    let (status, body) = send(server.post(
        "/api/events",
        &json!({ "sport": "Soccer", "date": "2024-03-15" }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_TITLE"));
    assert_eq!(server.count("events").await, 0);
}

#[tokio::test]
async fn bad_dates_are_rejected() {
    let server = TestServer::spawn().await;
    let (status, body) = send(server.post(
        "/api/events",
        &json!({ "title": "Derby", "sport": "Soccer", "date": "someday" }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_DATE_FORMAT"));
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let server = TestServer::spawn().await;
    let (status, body) = send(server.get("/api/events?id=999999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), Some("EVENT_NOT_FOUND"));

    let (status, body) = send(server.get("/api/events?id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_ID"));

    let (status, body) = send(server.get("/api/events/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_ID"));
}

#[tokio::test]
async fn limit_is_capped() {
    let server = TestServer::spawn().await;
    let seeded = sqlx::query(
        "WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 120) \
         INSERT INTO events (title, sport, date, created_at) \
         SELECT 'Game ' || i, 'Hockey', '2024-01-01', '2024-01-01T00:00:00Z' FROM n",
    )
    .execute(server.store.pool())
    .await;
    assert!(seeded.is_ok());

    let (status, body) = send(server.get("/api/events?limit=500")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(100));

    let (_, body) = send(server.get("/api/events")).await;
    assert_eq!(body.as_array().map(Vec::len), Some(20));
}

#[tokio::test]
async fn sport_filter_and_search() {
    let server = TestServer::spawn().await;
    server.create_event("El Clasico", "Soccer").await;
    server.create_event("Finals Game 7", "Basketball").await;

    let (_, body) = send(server.get("/api/events?sport=Soccer")).await;
    let titles: Vec<&str> = body
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|e| e.get("title").and_then(Value::as_str))
        .collect();
    assert_eq!(titles, ["El Clasico"]);

    let (_, body) = send(server.get("/api/events?search=game")).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let server = TestServer::spawn().await;
    let Ok(response) = server
        .client
        .post(format!("{}/api/events", server.base))
        .header("content-type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let Ok(body) = response.json::<Value>().await else {
        panic!("response was not JSON");
    };
    assert_eq!(code_of(&body), Some("INVALID_JSON"));

    let (status, body) = send(server.post("/api/events", &json!([1, 2, 3]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_JSON"));
}

#[tokio::test]
async fn user_profile_hides_password() {
    let server = TestServer::spawn().await;
    let id = server.seed_user("ana").await;

    let (status, body) = send(server.get(&format!("/api/users/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("username").and_then(Value::as_str), Some("ana"));
    assert!(body.get("password").is_none());

    let (status, body) = send(server.get("/api/users/424242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), Some("USER_NOT_FOUND"));
}
