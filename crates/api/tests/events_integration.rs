//! Integration tests for the join flow, feedback, and organizer surface.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;

#[tokio::test]
async fn join_with_valid_code_returns_the_event() {
    let (app, _pool) = create_test_app().await;
    let event = create_active_event(&app).await;

    // Codes are normalized to uppercase on the way in
    let request = json_request(
        Method::POST,
        "/api/v1/events/join",
        serde_json::json!({ "code": event.code.to_lowercase() }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["event"]["code"].as_str().unwrap(), event.code);
    assert_eq!(body["profile_exists"], false);
}

#[tokio::test]
async fn join_reports_existing_profile_for_returning_session() {
    let (app, _pool) = create_test_app().await;
    let event = create_active_event(&app).await;
    let ana = create_test_profile(&app, &event.id, "Ana", "woman", "everyone").await;

    let request = session_request(
        Method::POST,
        "/api/v1/events/join",
        serde_json::json!({ "code": event.code }),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["profile_exists"], true);
}

#[tokio::test]
async fn join_distinguishes_unknown_early_and_ended_events() {
    let (app, _pool) = create_test_app().await;

    // Unknown code
    let request = json_request(
        Method::POST,
        "/api/v1/events/join",
        serde_json::json!({ "code": "ZZZZ9999" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Not started yet
    let upcoming = create_test_event(&app, 2, 8).await;
    let request = json_request(
        Method::POST,
        "/api/v1/events/join",
        serde_json::json!({ "code": upcoming.code }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "event_not_started");

    // Already over
    let ended = create_test_event(&app, -8, -2).await;
    let request = json_request(
        Method::POST,
        "/api/v1/events/join",
        serde_json::json!({ "code": ended.code }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::GONE);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "event_ended");
}

#[tokio::test]
async fn malformed_code_is_a_validation_error() {
    let (app, _pool) = create_test_app().await;

    let request = json_request(
        Method::POST,
        "/api/v1/events/join",
        serde_json::json!({ "code": "no" }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_require_the_organizer_key() {
    let (app, _pool) = create_test_app().await;

    // Missing key
    let request = json_request(Method::POST, "/api/v1/admin/events", serde_json::json!({}));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong key
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/admin/events")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .header("X-Admin-Key", "mx_wrong_key")
        .body(axum::body::Body::from("{}"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn event_code_is_generated_when_omitted() {
    let (app, _pool) = create_test_app().await;
    let now = chrono::Utc::now();

    let request = admin_request(
        Method::POST,
        "/api/v1/admin/events",
        serde_json::json!({
            "name": "Warehouse Social",
            "location": "Dock 3",
            "starts_at": now.to_rfc3339(),
            "expires_at": (now + chrono::Duration::hours(5)).to_rfc3339(),
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
}

#[tokio::test]
async fn duplicate_event_code_is_a_conflict() {
    let (app, _pool) = create_test_app().await;
    let event = create_active_event(&app).await;
    let now = chrono::Utc::now();

    let request = admin_request(
        Method::POST,
        "/api/v1/admin/events",
        serde_json::json!({
            "name": "Copycat Night",
            "code": event.code,
            "location": "Elsewhere",
            "starts_at": now.to_rfc3339(),
            "expires_at": (now + chrono::Duration::hours(5)).to_rfc3339(),
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn backwards_schedule_is_rejected() {
    let (app, _pool) = create_test_app().await;
    let now = chrono::Utc::now();

    let request = admin_request(
        Method::POST,
        "/api/v1/admin/events",
        serde_json::json!({
            "name": "Time Traveler Night",
            "location": "Nowhere",
            "starts_at": now.to_rfc3339(),
            "expires_at": (now - chrono::Duration::hours(2)).to_rfc3339(),
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_an_event_cascades_to_attendee_records() {
    let (app, pool) = create_test_app().await;
    let (event, _ana, _ben) = create_matched_pair(&app).await;

    let request =
        admin_request_empty(Method::DELETE, &format!("/api/v1/admin/events/{}", event.id));
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for table in ["event_profiles", "likes", "messages"] {
        let (count,): (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM {} WHERE event_id = $1::uuid",
            table
        ))
        .bind(&event.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 0, "{} rows survived the cascade", table);
    }
}

#[tokio::test]
async fn feedback_opens_only_after_expiry_and_only_once() {
    let (app, _pool) = create_test_app().await;
    let event = create_active_event(&app).await;
    let ana = create_test_profile(&app, &event.id, "Ana", "woman", "everyone").await;

    let feedback = serde_json::json!({
        "event_id": event.id,
        "rating_profile_setup": 5,
        "rating_interests_helpful": 4,
        "rating_social_usefulness": 5,
        "met_match_in_person": true,
        "open_to_other_event_types": true,
        "match_experience_feedback": "Matched with someone and actually met up."
    });

    // Too early while the event is live
    let request = session_request(
        Method::POST,
        "/api/v1/feedback",
        feedback.clone(),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "event_not_ended");

    reschedule_event(&app, &event.id, -8, -1).await;

    // Accepted once the event is over
    let request = session_request(
        Method::POST,
        "/api/v1/feedback",
        feedback.clone(),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // One submission per session
    let request = session_request(
        Method::POST,
        "/api/v1/feedback",
        feedback,
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
