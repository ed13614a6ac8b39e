//! HTTP surface tests driving the composed router with `oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use civic_watch::adapters::http::{api_router, MeAppState, ProgramCycleAppState};
use civic_watch::adapters::memory::{
    InMemoryMembershipReader, InMemoryProgramCycleRepository, InMemoryProgressCounter,
    InMemoryReferenceLookup,
};
use civic_watch::adapters::{InMemoryEventBus, InProcessScopeLock};
use civic_watch::domain::foundation::{
    ContextId, DateWindow, MembershipId, Timestamp, TrackId, UserId,
};
use civic_watch::domain::membership::Membership;

struct TestApp {
    router: Router,
    memberships: Arc<InMemoryMembershipReader>,
    progress: Arc<InMemoryProgressCounter>,
}

fn app() -> TestApp {
    let references = Arc::new(InMemoryReferenceLookup::new());
    references.add_track(TrackId::new(1), "Community health");
    references.add_context(ContextId::new(1), "District 1");
    let memberships = Arc::new(InMemoryMembershipReader::new());
    let progress = Arc::new(InMemoryProgressCounter::new());

    let program_cycles = ProgramCycleAppState {
        repository: Arc::new(InMemoryProgramCycleRepository::new()),
        tracks: references.clone(),
        contexts: references,
        progress: progress.clone(),
        scope_lock: Arc::new(InProcessScopeLock::new()),
        event_publisher: Arc::new(InMemoryEventBus::new()),
    };
    let me = MeAppState {
        membership_reader: memberships.clone(),
    };

    TestApp {
        router: api_router(program_cycles, me),
        memberships,
        progress,
    }
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", "42")
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn create_body(name: &str) -> Value {
    let today = Timestamp::today();
    json!({
        "track_id": 1,
        "context_id": 1,
        "name": name,
        "start_date": today - Duration::days(10),
        "end_date": today + Duration::days(10),
    })
}

#[tokio::test]
async fn create_returns_201_with_draft_cycle_and_references() {
    let app = app();

    let (status, body) = send(&app.router, "POST", "/api/program-cycles", Some(create_body("2026.1"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "draft");
    assert_eq!(body["track"]["name"], "Community health");
    assert_eq!(body["context"]["name"], "District 1");
}

#[tokio::test]
async fn missing_caller_header_is_401() {
    let app = app();
    let request = Request::builder()
        .uri("/api/program-cycles/active")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn inverted_dates_are_400() {
    let app = app();
    let body = json!({
        "track_id": 1,
        "context_id": 1,
        "name": "bad",
        "start_date": "2026-03-01",
        "end_date": "2026-02-01",
    });

    let (status, body) = send(&app.router, "POST", "/api/program-cycles", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app();

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/program-cycles",
        Some(json!({"name": "missing everything else"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn unknown_track_is_404() {
    let app = app();
    let mut body = create_body("2026.1");
    body["track_id"] = json!(77);

    let (status, _) = send(&app.router, "POST", "/api/program-cycles", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_name_is_409() {
    let app = app();
    send(&app.router, "POST", "/api/program-cycles", Some(create_body("2026.1"))).await;

    let (status, body) = send(&app.router, "POST", "/api/program-cycles", Some(create_body("2026.1"))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "PROGRAM_CYCLE_NAME_TAKEN");
}

#[tokio::test]
async fn activation_conflict_is_409_with_existing_cycle() {
    let app = app();
    let (_, first) = send(&app.router, "POST", "/api/program-cycles", Some(create_body("C1"))).await;
    let (_, second) = send(&app.router, "POST", "/api/program-cycles", Some(create_body("C2"))).await;
    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    let (status, _) = send(
        &app.router,
        "PUT",
        &format!("/api/program-cycles/{first_id}/status"),
        Some(json!({"status": "active"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("/api/program-cycles/{second_id}/status"),
        Some(json!({"status": "active"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"]["existing_id"], first_id);

    let (status, body) = send(&app.router, "GET", "/api/program-cycles/active?context_id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["program_cycles"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn patch_rejects_status_field() {
    let app = app();
    let (_, created) = send(&app.router, "POST", "/api/program-cycles", Some(create_body("C1"))).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app.router,
        "PATCH",
        &format!("/api/program-cycles/{id}"),
        Some(json!({"status": "active"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_honours_progress_records() {
    let app = app();
    let (_, created) = send(&app.router, "POST", "/api/program-cycles", Some(create_body("C1"))).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/program-cycles/{id}");
    app.progress.record(id.parse().unwrap());

    let (status, body) = send(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["progress_records"], 1);

    app.progress.clear(id.parse().unwrap());
    let (status, _) = send(&app.router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app.router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = app();

    let (status, _) = send(&app.router, "GET", "/api/program-cycles/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn me_endpoints_follow_current_membership() {
    let app = app();

    let (status, body) = send(&app.router, "GET", "/api/me/report-scope", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"]["kind"], "global");

    let today = Timestamp::today();
    app.memberships.insert(Membership {
        id: MembershipId::new(1),
        user_id: UserId::new(42),
        context_id: ContextId::new(9),
        window: DateWindow::new(today - Duration::days(1), Some(today)),
        active: true,
        created_at: Timestamp::from_datetime(Utc::now()),
    });

    let (_, body) = send(&app.router, "GET", "/api/me/current-membership", None).await;
    assert_eq!(body["membership"]["context_id"], 9);
    assert_eq!(
        body["membership"]["end_date"],
        json!(today.format("%Y-%m-%d").to_string())
    );

    let (_, body) = send(&app.router, "GET", "/api/me/report-scope", None).await;
    assert_eq!(body["scope"], json!({"kind": "context", "context_id": 9}));
}

#[tokio::test]
async fn membership_ending_yesterday_is_not_current() {
    let app = app();
    let yesterday: NaiveDate = Timestamp::today() - Duration::days(1);
    app.memberships.insert(Membership {
        id: MembershipId::new(1),
        user_id: UserId::new(42),
        context_id: ContextId::new(9),
        window: DateWindow::new(yesterday - Duration::days(30), Some(yesterday)),
        active: true,
        created_at: Timestamp::now(),
    });

    let (status, body) = send(&app.router, "GET", "/api/me/current-membership", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["membership"].is_null());
}
