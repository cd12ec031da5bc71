//! Integration tests for `/api/v1/schedules`: reads, the action gate on
//! every mutation, and optimistic status checks.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use broadcast_core::schedule::ScheduleStatus;
use common::{at, body_json, delete, get, post_json, schedule, send_json, seed_with, OPERATOR};
use serde_json::json;
use tower::ServiceExt;

fn ids(json: &serde_json::Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect()
}

fn tts_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "ownerUnitId": "district-a",
        "type": "ONE_TIME",
        "priority": 3,
        "sourceType": "TTS",
        "ttsContent": "Vaccination day at the commune health station",
        "startTime": "2026-10-17T07:00:00Z",
        "endTime": "2026-10-17T07:15:00Z",
        "targetUnitIds": ["ward-2"]
    })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_filters_by_unit_and_status() {
    let app = common::build_test_app(seed_with(vec![
        schedule("A", ScheduleStatus::Approved, at(8, 0), Some(at(9, 0)), &["ward-1"]),
        schedule("B", ScheduleStatus::PendingApproval, at(8, 30), None, &["ward-1"]),
        schedule("C", ScheduleStatus::Approved, at(12, 0), None, &["ward-2"]),
        schedule("D", ScheduleStatus::Approved, at(18, 0), None, &[]),
    ]));

    let all = body_json(get(app.clone(), "/api/v1/schedules").await).await;
    assert_eq!(ids(&all), vec!["A", "B", "C", "D"]);

    let ward_2 = body_json(get(app.clone(), "/api/v1/schedules?unit_id=ward-2").await).await;
    assert_eq!(ids(&ward_2), vec!["C", "D"]);

    let pending = body_json(get(app.clone(), "/api/v1/schedules?status=PENDING_APPROVAL").await).await;
    assert_eq!(ids(&pending), vec!["B"]);

    let approved_in_district =
        body_json(get(app, "/api/v1/schedules?unit_id=district-a&status=APPROVED").await).await;
    assert_eq!(ids(&approved_in_district), vec!["A", "C", "D"]);
}

#[tokio::test]
async fn detail_includes_actions_and_conflicts() {
    let app = common::build_test_app(common::overlapping_pair());

    let response = get(app, "/api/v1/schedules/A").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["schedule"]["id"], "A");
    assert_eq!(data["schedule"]["status"], "APPROVED");

    assert_eq!(data["actions"]["canView"], true);
    assert_eq!(data["actions"]["canEdit"], true);
    assert_eq!(data["actions"]["canCancel"], true);
    assert_eq!(data["actions"]["canDelete"], false);
    assert_eq!(data["actions"]["canApprove"], false);

    assert_eq!(data["hasConflicts"], true);
    let conflicts = data["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["scheduleId"], "A");
    assert_eq!(conflicts[0]["conflictingScheduleId"], "B");
    assert_eq!(conflicts[0]["reason"], "DEVICE_OVERLAP");
    assert_eq!(conflicts[0]["severity"], "HIGH");
}

#[tokio::test]
async fn action_menu_for_pending_schedule() {
    let app = common::build_test_app(common::overlapping_pair());

    let data = body_json(get(app, "/api/v1/schedules/B/actions").await).await["data"].clone();

    assert_eq!(data["status"], "PENDING_APPROVAL");
    assert_eq!(data["canApprove"], true);
    assert_eq!(data["canReject"], true);
    assert_eq!(data["canEdit"], false);

    let items = data["items"].as_array().unwrap();
    let actions: Vec<_> = items.iter().map(|i| i["action"].as_str().unwrap()).collect();
    assert_eq!(actions, vec!["view", "cancel", "approve", "reject"]);

    let approve = &items[2];
    assert_eq!(approve["label"], "Approve");
    assert_eq!(approve["destructive"], false);
    assert_eq!(approve["confirmMessage"], "Approve broadcast schedule \"Bulletin B\"?");
    assert_eq!(items[3]["destructive"], true);
}

#[tokio::test]
async fn schedule_conflicts_come_from_the_deduplicated_set() {
    let app = common::build_test_app(common::overlapping_pair());

    // B sees the pair record first produced with A as subject.
    let json = body_json(get(app, "/api/v1/schedules/B/conflicts").await).await;
    let conflicts = json["data"].as_array().unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["scheduleId"], "A");
    assert_eq!(conflicts[0]["conflictingScheduleId"], "B");
}

#[tokio::test]
async fn detail_without_conflicts() {
    let app = common::build_test_app(seed_with(vec![
        schedule("A", ScheduleStatus::Approved, at(8, 0), Some(at(9, 0)), &["ward-1"]),
        schedule("C", ScheduleStatus::Approved, at(8, 0), Some(at(9, 0)), &["ward-2"]),
    ]));

    let json = body_json(get(app, "/api/v1/schedules/C").await).await;

    assert_eq!(json["data"]["hasConflicts"], false);
    assert!(json["data"]["conflicts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_schedule_returns_404() {
    let app = common::build_test_app(seed_with(Vec::new()));

    for uri in [
        "/api/v1/schedules/nope",
        "/api/v1/schedules/nope/actions",
        "/api/v1/schedules/nope/conflicts",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mutations_require_operator_header() {
    let app = common::build_test_app(seed_with(Vec::new()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/schedules")
        .header("content-type", "application/json")
        .body(Body::from(tts_body("Vaccination day").to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let list = body_json(get(app, "/api/v1/schedules").await).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_stores_draft_or_pending() {
    let app = common::build_test_app(seed_with(Vec::new()));

    let response = post_json(app.clone(), "/api/v1/schedules", tts_body("Vaccination day")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let draft = body_json(response).await["data"].clone();
    assert_eq!(draft["status"], "DRAFT");
    assert_eq!(draft["id"].as_str().unwrap().len(), 36);

    let mut body = tts_body("Vaccination reminder");
    body["submit"] = json!(true);
    let submitted = body_json(post_json(app.clone(), "/api/v1/schedules", body).await).await;
    assert_eq!(submitted["data"]["status"], "PENDING_APPROVAL");

    let list = body_json(get(app, "/api/v1/schedules").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let app = common::build_test_app(seed_with(Vec::new()));

    let response = post_json(app.clone(), "/api/v1/schedules", tts_body("Hi")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut no_content = tts_body("Vaccination day");
    no_content["ttsContent"] = json!(null);
    let response = post_json(app.clone(), "/api/v1/schedules", no_content).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("tts_content"));

    let mut backwards = tts_body("Vaccination day");
    backwards["endTime"] = json!("2026-10-17T06:00:00Z");
    let response = post_json(app, "/api/v1/schedules", backwards).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_is_gated_by_status() {
    let app = common::build_test_app(seed_with(vec![
        schedule("draft", ScheduleStatus::Draft, at(8, 0), None, &["ward-1"]),
        schedule("live", ScheduleStatus::Running, at(8, 0), None, &["ward-2"]),
    ]));

    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/schedules/draft",
        json!({ "title": "Updated bulletin", "priority": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["title"], "Updated bulletin");
    assert_eq!(data["priority"], 2);
    assert_eq!(data["status"], "DRAFT");

    let response = send_json(
        app,
        Method::PUT,
        "/api/v1/schedules/live",
        json!({ "title": "Updated bulletin" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_is_gated_by_status() {
    let app = common::build_test_app(seed_with(vec![
        schedule("draft", ScheduleStatus::Draft, at(8, 0), None, &["ward-1"]),
        schedule("approved", ScheduleStatus::Approved, at(8, 0), None, &["ward-2"]),
    ]));

    let response = delete(app.clone(), "/api/v1/schedules/approved").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete(app.clone(), "/api/v1/schedules/draft").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, "/api/v1/schedules/draft").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_stale_expected_status_is_rejected() {
    let app = common::build_test_app(seed_with(vec![schedule(
        "draft",
        ScheduleStatus::Draft,
        at(8, 0),
        None,
        &["ward-1"],
    )]));

    let response = delete(app.clone(), "/api/v1/schedules/draft?expected_status=REJECTED").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "TRANSITION_REJECTED");

    let response = get(app, "/api/v1/schedules/draft").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bulk_delete_skips_protected_schedules() {
    let app = common::build_test_app(seed_with(vec![
        schedule("draft", ScheduleStatus::Draft, at(8, 0), None, &["ward-1"]),
        schedule("approved", ScheduleStatus::Approved, at(8, 0), None, &["ward-2"]),
    ]));

    let response = post_json(
        app.clone(),
        "/api/v1/schedules/bulk-delete",
        json!({ "ids": ["draft", "approved", "ghost"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["total"], 3);
    assert_eq!(data["deleted"], json!(["draft"]));
    let skipped: Vec<_> = data["skipped"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(skipped, vec!["approved", "ghost"]);

    let response = post_json(
        app,
        "/api/v1/schedules/bulk-delete",
        json!({ "ids": ["approved"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approve_records_operator() {
    let app = common::build_test_app(common::overlapping_pair());

    let response = post_json(
        app.clone(),
        "/api/v1/schedules/B/approve",
        json!({ "expectedStatus": "PENDING_APPROVAL" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["status"], "APPROVED");
    assert_eq!(data["approvedBy"], OPERATOR);

    // Approved schedules offer cancel, not approve.
    let actions = body_json(get(app, "/api/v1/schedules/B/actions").await).await;
    assert_eq!(actions["data"]["canApprove"], false);
    assert_eq!(actions["data"]["canCancel"], true);
}

#[tokio::test]
async fn second_decision_on_same_observed_status_is_rejected() {
    let app = common::build_test_app(common::overlapping_pair());
    let observed = json!({ "expectedStatus": "PENDING_APPROVAL" });

    let first = post_json(app.clone(), "/api/v1/schedules/B/reject", observed.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(app.clone(), "/api/v1/schedules/B/approve", observed).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "TRANSITION_REJECTED");
    assert!(json["error"].as_str().unwrap().contains("REJECTED"));

    let detail = body_json(get(app, "/api/v1/schedules/B").await).await;
    assert_eq!(detail["data"]["schedule"]["status"], "REJECTED");
    assert!(detail["data"]["schedule"]["approvedBy"].is_null());
}

#[tokio::test]
async fn transition_not_permitted_by_policy_is_forbidden() {
    let app = common::build_test_app(common::overlapping_pair());

    let response = post_json(
        app,
        "/api/v1/schedules/A/approve",
        json!({ "expectedStatus": "APPROVED" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert!(json["error"].as_str().unwrap().contains("approve"));
}

#[tokio::test]
async fn running_schedule_can_be_stopped() {
    let app = common::build_test_app(seed_with(vec![schedule(
        "live",
        ScheduleStatus::Running,
        at(8, 0),
        None,
        &["ward-1"],
    )]));

    let response = post_json(
        app,
        "/api/v1/schedules/live/cancel",
        json!({ "expectedStatus": "RUNNING" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "CANCELED");
}

#[tokio::test]
async fn transition_without_expected_status_is_unprocessable() {
    let app = common::build_test_app(common::overlapping_pair());

    let response = post_json(app, "/api/v1/schedules/B/approve", json!({})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
