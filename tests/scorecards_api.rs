//! Scorecards and player statistics over HTTP.

#![allow(clippy::panic)]

mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{TestServer, code_of, id_of, send};

async fn scorecard(server: &TestServer, sport: &str) -> i64 {
    let event = server.create_event("Final", sport).await;
    let (status, body) = send(server.post(
        "/api/scorecards",
        &json!({ "eventId": event, "sport": sport, "finalScore": "102-99" }),
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    id_of(&body)
}

fn names(stats: &Value) -> Vec<&str> {
    stats
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|s| s.get("playerName").and_then(Value::as_str))
        .collect()
}

#[tokio::test]
async fn scorecard_requires_existing_event() {
    let server = TestServer::spawn().await;
    let (status, body) = send(server.post(
        "/api/scorecards",
        &json!({ "eventId": 42, "sport": "Soccer", "finalScore": "1-0" }),
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), Some("EVENT_NOT_FOUND"));

    let (status, body) = send(server.post("/api/scorecards", &json!({ "eventId": 42 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("MISSING_REQUIRED_FIELDS"));
}

#[tokio::test]
async fn bulk_insert_is_all_or_nothing() {
    let server = TestServer::spawn().await;
    let card = scorecard(&server, "Basketball").await;

    let mut lines: Vec<Value> = (0..5)
        .map(|i| json!({ "scorecardId": card, "playerName": format!("Player {i}"), "stats": { "points": 10 } }))
        .collect();
    if let Some(third) = lines.get_mut(2) {
        *third = json!({ "scorecardId": card, "stats": {} });
    }

    let (status, body) = send(server.post("/api/player-stats", &json!({ "playerStats": lines }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_PLAYER_NAME"));
    assert_eq!(body.get("index").and_then(Value::as_u64), Some(2));
    assert_eq!(server.count("player_stats").await, 0);

    let (status, body) = send(server.post("/api/player-stats", &json!({ "playerStats": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("EMPTY_ARRAY"));
}

#[tokio::test]
async fn bulk_insert_creates_every_line() {
    let server = TestServer::spawn().await;
    let card = scorecard(&server, "Basketball").await;
    let lines: Vec<Value> = (0..3)
        .map(|i| json!({ "scorecardId": card, "playerName": format!("Player {i}"), "teamName": "Lakers", "stats": { "points": i } }))
        .collect();

    let (status, body) = send(server.post("/api/player-stats", &json!({ "playerStats": lines }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().map(Vec::len), Some(3));
    assert_eq!(server.count("player_stats").await, 3);
}

#[tokio::test]
async fn stats_are_checked_against_the_sport() {
    let server = TestServer::spawn().await;
    let card = scorecard(&server, "Basketball").await;
    let (status, body) = send(server.post(
        "/api/player-stats",
        &json!({ "scorecardId": card, "playerName": "LeBron", "stats": { "points": -3 } }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_STATS"));

    let (status, body) = send(server.post(
        "/api/player-stats",
        &json!({ "scorecardId": 999, "playerName": "LeBron", "stats": {} }),
    ))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), Some("SCORECARD_NOT_FOUND"));
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let server = TestServer::spawn().await;
    let card = scorecard(&server, "Basketball").await;
    let (_, line) = send(server.post(
        "/api/player-stats",
        &json!({ "scorecardId": card, "playerName": "Guard", "stats": { "points": 12 } }),
    ))
    .await;
    let line = id_of(&line);

    let (status, body) =
        send(server.put(&format!("/api/player-stats?id={line}"), &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("NO_UPDATES"));

    let (status, body) = send(server.put(&format!("/api/scorecards?id={card}"), &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("NO_UPDATES_PROVIDED"));
}

#[tokio::test]
async fn empty_update_of_missing_row_is_not_found() {
    let server = TestServer::spawn().await;
    let (status, body) = send(server.put("/api/player-stats?id=999", &json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), Some("PLAYER_STAT_NOT_FOUND"));

    let (status, body) = send(server.put("/api/scorecards?id=999", &json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), Some("SCORECARD_NOT_FOUND"));
}

#[tokio::test]
async fn update_checks_id_before_body() {
    let server = TestServer::spawn().await;
    for path in ["/api/player-stats", "/api/scorecards?id=abc"] {
        let (status, body) = send(
            server
                .client
                .put(format!("{}{path}", server.base))
                .header("content-type", "application/json")
                .body("{\"sport\": "),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(code_of(&body), Some("INVALID_ID"), "{path}");
    }
}

#[tokio::test]
async fn sport_change_rechecks_stored_details() {
    let server = TestServer::spawn().await;
    let event = server.create_event("Grand Prix", "Curling").await;
    let (status, body) = send(server.post(
        "/api/scorecards",
        &json!({ "eventId": event, "sport": "Curling", "finalScore": "7-5", "additionalData": { "laps": "many" } }),
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let card = id_of(&body);

    let (status, body) =
        send(server.put(&format!("/api/scorecards?id={card}"), &json!({ "sport": "F1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_ADDITIONAL_DATA"));

    let (_, stored) = send(server.get(&format!("/api/scorecards?id={card}"))).await;
    assert_eq!(stored.get("sport").and_then(Value::as_str), Some("Curling"));

    // Replacing the details in the same request makes the change valid.
    let (status, body) = send(server.put(
        &format!("/api/scorecards?id={card}"),
        &json!({ "sport": "F1", "additionalData": { "laps": 57 } }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body.get("sport").and_then(Value::as_str), Some("F1"));
}

#[tokio::test]
async fn sport_change_rechecks_player_stats() {
    let server = TestServer::spawn().await;
    let card = scorecard(&server, "Curling").await;
    let (status, body) = send(server.post(
        "/api/player-stats",
        &json!({ "scorecardId": card, "playerName": "Skip", "stats": { "points": "lots" } }),
    ))
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send(server.put(
        &format!("/api/scorecards?id={card}"),
        &json!({ "sport": "Basketball" }),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), Some("INVALID_STATS"));

    let (status, body) =
        send(server.put(&format!("/api/scorecards?id={card}"), &json!({ "sport": "Lacrosse" }))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body.get("sport").and_then(Value::as_str), Some("Lacrosse"));
}

#[tokio::test]
async fn unpositioned_players_come_last() {
    let server = TestServer::spawn().await;
    let card = scorecard(&server, "F1").await;
    for (name, position) in [("Bench", Value::Null), ("Winner", json!(1)), ("Third", json!(3))] {
        let (status, _) = send(server.post(
            "/api/player-stats",
            &json!({ "scorecardId": card, "playerName": name, "position": position, "stats": {} }),
        ))
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, detail) = send(server.get(&format!("/api/scorecards/{card}"))).await;
    let stats = detail.get("playerStats").cloned().unwrap_or_default();
    assert_eq!(names(&stats), ["Winner", "Third", "Bench"]);

    let (_, listed) = send(server.get(&format!("/api/player-stats?scorecardId={card}"))).await;
    assert_eq!(names(&listed), ["Winner", "Third", "Bench"]);
}

#[tokio::test]
async fn updates_apply_and_delete_cascades() {
    let server = TestServer::spawn().await;
    let card = scorecard(&server, "Soccer").await;
    let (_, stat) = send(server.post(
        "/api/player-stats",
        &json!({ "scorecardId": card, "playerName": "Saka", "teamName": "Arsenal", "position": 7, "stats": { "goals": 1 } }),
    ))
    .await;
    let stat_id = id_of(&stat);

    let (status, updated) = send(server.put(
        &format!("/api/player-stats?id={stat_id}"),
        &json!({ "position": null, "stats": { "goals": 2 } }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated.get("position").is_some_and(Value::is_null));
    assert_eq!(updated.pointer("/stats/goals").and_then(Value::as_i64), Some(2));

    let (status, updated) = send(server.put(
        &format!("/api/scorecards?id={card}"),
        &json!({ "finalScore": "3-1" }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.get("finalScore").and_then(Value::as_str), Some("3-1"));

    let (status, deleted) = send(server.delete(&format!("/api/scorecards?id={card}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted.pointer("/scorecard/id").and_then(Value::as_i64), Some(card));
    assert_eq!(server.count("player_stats").await, 0);

    let (status, body) = send(server.delete(&format!("/api/scorecards?id={card}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), Some("SCORECARD_NOT_FOUND"));
}
