//! Shared harness: a real server on an ephemeral port backed by a fresh
//! in-memory database.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

use scoreboxd::api;
use scoreboxd::app_state::AppState;
use scoreboxd::config::ServerConfig;
use scoreboxd::persistence::Store;

/// A running server and a client pointed at it.
pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    pub store: Arc<Store>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let config = ServerConfig {
            database_url: "sqlite::memory:".to_string(),
            ..ServerConfig::default()
        };
        let Ok(store) = Store::connect(&config).await else {
            panic!("in-memory store failed to open");
        };
        let store = Arc::new(store);
        let app = api::build_router().with_state(AppState::new(Arc::clone(&store)));

        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            store,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{path}", self.base))
    }

    pub fn post(&self, path: &str, body: &Value) -> RequestBuilder {
        self.client.post(format!("{}{path}", self.base)).json(body)
    }

    pub fn put(&self, path: &str, body: &Value) -> RequestBuilder {
        self.client.put(format!("{}{path}", self.base)).json(body)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(format!("{}{path}", self.base))
    }

    /// Inserts a user directly; there is no user-creation endpoint.
    pub async fn seed_user(&self, username: &str) -> i64 {
        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (email, username, password, name, created_at) \
             VALUES (?, ?, '$2b$10$secret', ?, '2024-01-10T00:00:00Z') RETURNING id",
        )
        .bind(format!("{username}@example.com"))
        .bind(username)
        .bind(username)
        .fetch_one(self.store.pool())
        .await;
        let Ok(id) = inserted else {
            panic!("seeding user {username} failed");
        };
        id
    }

    /// Creates an event through the API and returns its id.
    pub async fn create_event(&self, title: &str, sport: &str) -> i64 {
        let (status, body) = send(self.post(
            "/api/events",
            &serde_json::json!({ "title": title, "sport": sport, "date": "2024-03-15" }),
        ))
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }

    pub async fn count(&self, table: &str) -> i64 {
        let counted = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.store.pool())
            .await;
        let Ok(n) = counted else {
            panic!("count on {table} failed");
        };
        n
    }
}

/// Sends a request and decodes the JSON response.
pub async fn send(request: RequestBuilder) -> (StatusCode, Value) {
    let Ok(response) = request.send().await else {
        panic!("request failed");
    };
    let status = response.status();
    let Ok(body) = response.json::<Value>().await else {
        panic!("response was not JSON");
    };
    (status, body)
}

pub fn id_of(body: &Value) -> i64 {
    let Some(id) = body.get("id").and_then(Value::as_i64) else {
        panic!("no id in {body}");
    };
    id
}

pub fn code_of(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}
