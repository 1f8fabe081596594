#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tinylink_dashboard::config::Config;
use tinylink_dashboard::domain::entities::Link;
use tinylink_dashboard::state::AppState;

/// In-memory stand-in for the TinyLink backend.
pub struct Backend {
    pub links: Mutex<Vec<Link>>,
    /// Artificial latency of `GET /api/links/{code}` per code.
    pub stats_delays: Mutex<HashMap<String, Duration>>,
    pub health_status: Mutex<u16>,
    /// `message` of 409 responses; `None` sends `{"message": null}`.
    pub conflict_message: Mutex<Option<String>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    next_code: AtomicUsize,
}

impl Backend {
    pub fn new() -> Arc<Self> {
        Self::with_links(Vec::new())
    }

    pub fn with_links(links: Vec<Link>) -> Arc<Self> {
        Arc::new(Self {
            links: Mutex::new(links),
            stats_delays: Mutex::new(HashMap::new()),
            health_status: Mutex::new(200),
            conflict_message: Mutex::new(Some("Custom code already exists.".to_string())),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            next_code: AtomicUsize::new(1),
        })
    }

    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.links.lock().iter().map(|l| l.code.clone()).collect();
        codes.sort();
        codes
    }

    pub fn delay_stats(&self, code: &str, delay: Duration) {
        self.stats_delays.lock().insert(code.to_string(), delay);
    }
}

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

pub fn link(code: &str, url: &str, clicks: u64) -> Link {
    let mut link = Link::new(code, url, created_at());
    link.total_clicks = clicks;
    if clicks > 0 {
        link.last_clicked_time = Some(created_at() + chrono::Duration::hours(clicks as i64));
    }
    link
}

pub fn seed_links() -> Vec<Link> {
    vec![
        link("abc123", "https://www.rust-lang.org", 12),
        link("zzz999", "https://docs.rs/tokio", 3),
        link("qwerty1", "https://crates.io", 0),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody {
    target_url: String,
    custom_code: Option<String>,
}

async fn list_links(State(backend): State<Arc<Backend>>) -> Json<Vec<Link>> {
    backend.list_calls.fetch_add(1, Ordering::SeqCst);
    Json(backend.links.lock().clone())
}

async fn create_link(
    State(backend): State<Arc<Backend>>,
    Json(body): Json<CreateBody>,
) -> Response {
    backend.create_calls.fetch_add(1, Ordering::SeqCst);
    let mut links = backend.links.lock();

    let code = match body.custom_code {
        Some(code) if links.iter().any(|l| l.code == code) => {
            let message = backend.conflict_message.lock().clone();
            return (StatusCode::CONFLICT, Json(json!({ "message": message }))).into_response();
        }
        Some(code) => code,
        None => format!("gen{:04}", backend.next_code.fetch_add(1, Ordering::SeqCst)),
    };

    let link = Link::new(code, body.target_url, created_at());
    links.insert(0, link.clone());
    (StatusCode::CREATED, Json(link)).into_response()
}

async fn delete_link(State(backend): State<Arc<Backend>>, Path(code): Path<String>) -> StatusCode {
    let mut links = backend.links.lock();
    let before = links.len();
    links.retain(|l| l.code != code);

    if links.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn link_stats(State(backend): State<Arc<Backend>>, Path(code): Path<String>) -> Response {
    let delay = backend.stats_delays.lock().get(&code).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let link = backend.links.lock().iter().find(|l| l.code == code).cloned();
    let Some(link) = link else {
        let body = Json(json!({ "message": "Link not found" }));
        return (StatusCode::NOT_FOUND, body).into_response();
    };

    let mut body = serde_json::to_value(&link).unwrap();
    body["clicksByDay"] = json!([{ "date": "2024-01-15", "clicks": link.total_clicks }]);
    Json(body).into_response()
}

async fn healthz(State(backend): State<Arc<Backend>>) -> Response {
    let status = *backend.health_status.lock();
    if status == 200 {
        return Json(json!({
            "ok": true,
            "database_status": "connected",
            "uptime": 93_784.5,
            "version": "1.2.3",
            "environment": "test",
        }))
        .into_response();
    }

    let status = StatusCode::from_u16(status).unwrap();
    (status, Json(json!({ "ok": false }))).into_response()
}

/// Serves `backend` on an ephemeral port and returns its origin.
pub async fn spawn_backend(backend: Arc<Backend>) -> String {
    let app = Router::new()
        .route("/api/links", get(list_links).post(create_link))
        .route("/api/links/{code}", get(link_stats).delete(delete_link))
        .route("/healthz", get(healthz))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        public_base_url: "https://tiny.link".to_string(),
        health_poll_interval_secs: 1,
        request_timeout_secs: 5,
        ..Config::default()
    }
}

/// Dashboard state wired to a freshly spawned stub backend.
pub async fn create_test_state(backend: Arc<Backend>) -> AppState {
    let base_url = spawn_backend(backend).await;
    AppState::from_config(&test_config(&base_url)).unwrap()
}
