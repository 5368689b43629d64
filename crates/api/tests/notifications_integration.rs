//! Integration tests for the notification poll.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;

async fn poll(app: &axum::Router, event_id: &str, session_id: &str) -> serde_json::Value {
    let request = session_request_empty(Method::GET, "/api/v1/notifications", event_id, session_id);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    parse_response_body(response).await
}

#[tokio::test]
async fn one_sided_like_surfaces_nothing() {
    let (app, _pool) = create_test_app().await;
    let event = create_active_event(&app).await;
    let ana = create_test_profile(&app, &event.id, "Ana", "woman", "everyone").await;
    let ben = create_test_profile(&app, &event.id, "Ben", "man", "everyone").await;

    like(&app, &event.id, &ana.session_id, &ben.session_id).await;

    let body = poll(&app, &event.id, &ben.session_id).await;
    assert!(body.get("new_match").is_none());
    assert_eq!(body["has_unseen_matches"], false);
}

#[tokio::test]
async fn first_liker_learns_of_the_match_from_the_poll() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    // Ben (second liker) was shown the match inline; his poll is quiet
    let body = poll(&app, &event.id, &ben.session_id).await;
    assert!(body.get("new_match").is_none());

    // Ana (first liker) gets the match toast exactly once
    let body = poll(&app, &event.id, &ana.session_id).await;
    assert_eq!(body["new_match"]["matched_profile"]["first_name"], "Ben");

    let body = poll(&app, &event.id, &ana.session_id).await;
    assert!(body.get("new_match").is_none());
    assert_eq!(body["has_unseen_matches"], false);
}

#[tokio::test]
async fn poll_marks_only_the_callers_side() {
    let (app, pool) = create_test_app().await;
    let (event, ana, _ben) = create_matched_pair(&app).await;

    // Before Ana polls, her own flag on her like record is still false
    let (before,): (bool,) = sqlx::query_as(
        r#"
        SELECT liker_notified_of_match FROM likes
        WHERE event_id = $1::uuid AND liker_session_id = $2
        "#,
    )
    .bind(&event.id)
    .bind(&ana.session_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(!before);

    poll(&app, &event.id, &ana.session_id).await;

    let (after,): (bool,) = sqlx::query_as(
        r#"
        SELECT liker_notified_of_match FROM likes
        WHERE event_id = $1::uuid AND liker_session_id = $2
        "#,
    )
    .bind(&event.id)
    .bind(&ana.session_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(after);
}

#[tokio::test]
async fn unread_message_surfaces_latest_sender() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    let request = session_request(
        Method::POST,
        "/api/v1/messages",
        serde_json::json!({ "receiver_session_id": ben.session_id, "content": "hi!" }),
        &event.id,
        &ana.session_id,
    );
    app.clone().oneshot(request).await.unwrap();

    let body = poll(&app, &event.id, &ben.session_id).await;
    assert_eq!(body["new_message"]["sender_first_name"], "Ana");
    assert_eq!(body["new_message"]["unread_count"], 1);
    assert_eq!(body["has_unread_messages"], true);

    // Nothing was marked read by the poll: the toast repeats until chat view
    let body = poll(&app, &event.id, &ben.session_id).await;
    assert_eq!(body["new_message"]["unread_count"], 1);

    // Reading the chat clears it
    let request = session_request(
        Method::POST,
        "/api/v1/messages/read",
        serde_json::json!({ "with": ana.session_id }),
        &event.id,
        &ben.session_id,
    );
    app.clone().oneshot(request).await.unwrap();

    let body = poll(&app, &event.id, &ben.session_id).await;
    assert!(body.get("new_message").is_none());
    assert_eq!(body["has_unread_messages"], false);
}

#[tokio::test]
async fn match_and_message_checks_are_independent() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    // Ben messages Ana before she has polled for the match
    let request = session_request(
        Method::POST,
        "/api/v1/messages",
        serde_json::json!({ "receiver_session_id": ana.session_id, "content": "we matched!" }),
        &event.id,
        &ben.session_id,
    );
    app.clone().oneshot(request).await.unwrap();

    // One poll carries both payloads
    let body = poll(&app, &event.id, &ana.session_id).await;
    assert_eq!(body["new_match"]["matched_profile"]["first_name"], "Ben");
    assert_eq!(body["new_message"]["sender_first_name"], "Ben");
}

#[tokio::test]
async fn poll_on_expired_event_is_gone() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, _ben) = create_matched_pair(&app).await;

    reschedule_event(&app, &event.id, -3, -1).await;

    let request =
        session_request_empty(Method::GET, "/api/v1/notifications", &event.id, &ana.session_id);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::GONE);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "event_ended");
}
