#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use broadcast_core::schedule::{Schedule, ScheduleStatus, ScheduleType, SourceType};
use broadcast_core::targeting::{Device, DeviceStatus, Unit, UnitType};
use broadcast_core::types::Timestamp;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use broadcast_api::config::ServerConfig;
use broadcast_api::router::build_app_router;
use broadcast_api::state::AppState;
use broadcast_db::{create_pool, Seed};

pub const OPERATOR: &str = "op-duty";

/// Test `ServerConfig` with the dev CORS origin and a 30-second timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        seed_path: None,
    }
}

/// Full application router over a store built from `seed`, with the same
/// middleware stack as `main.rs`.
pub fn build_test_app(seed: Seed) -> Router {
    let config = test_config();
    let state = AppState {
        pool: create_pool(seed),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 2026-10-16 at `hour:minute` UTC.
pub fn at(hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 10, 16, hour, minute, 0).unwrap()
}

/// A one-time file broadcast titled `Bulletin {id}`.
pub fn schedule(
    id: &str,
    status: ScheduleStatus,
    start: Timestamp,
    end: Option<Timestamp>,
    units: &[&str],
) -> Schedule {
    Schedule {
        id: id.to_string(),
        title: format!("Bulletin {id}"),
        description: None,
        owner_unit_id: "district-a".to_string(),
        schedule_type: ScheduleType::OneTime,
        priority: 5,
        source_type: SourceType::File,
        source_url: Some("https://example.com/bulletin.mp3".to_string()),
        tts_content: None,
        source_unit_id: None,
        source_channel_id: None,
        relay_from_level: None,
        start_time: start,
        end_time: end,
        days_of_week: Vec::new(),
        target_unit_ids: units.iter().map(|u| u.to_string()).collect(),
        target_device_ids: Vec::new(),
        status,
        approved_by: None,
        created_at: at(0, 0),
    }
}

fn unit(id: &str, parent: Option<&str>) -> Unit {
    Unit {
        id: id.to_string(),
        name: id.to_string(),
        unit_type: UnitType::Department,
        parent_id: parent.map(str::to_string),
    }
}

fn device(id: &str, unit_id: &str) -> Device {
    Device {
        id: id.to_string(),
        code: format!("SPK-{id}"),
        name: id.to_string(),
        unit_id: unit_id.to_string(),
        status: DeviceStatus::Idle,
    }
}

/// province -> district-a -> {ward-1, ward-2}; one device per ward.
pub fn seed_with(schedules: Vec<Schedule>) -> Seed {
    Seed {
        schedules,
        units: vec![
            unit("province", None),
            unit("district-a", Some("province")),
            unit("ward-1", Some("district-a")),
            unit("ward-2", Some("district-a")),
        ],
        devices: vec![device("d1", "ward-1"), device("d2", "ward-2")],
    }
}

/// A: APPROVED 08:00-09:00 on ward-1. B: PENDING_APPROVAL from 08:30 (no
/// end) on ward-1.
pub fn overlapping_pair() -> Seed {
    seed_with(vec![
        schedule("A", ScheduleStatus::Approved, at(8, 0), Some(at(9, 0)), &["ward-1"]),
        schedule("B", ScheduleStatus::PendingApproval, at(8, 30), None, &["ward-1"]),
    ])
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send `body` as JSON, identified as [`OPERATOR`].
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-operator-id", OPERATOR)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

/// DELETE identified as [`OPERATOR`].
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("x-operator-id", OPERATOR)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
