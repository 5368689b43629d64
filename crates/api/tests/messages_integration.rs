//! Integration tests for the chat channel.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use tower::ServiceExt;

async fn send(
    app: &axum::Router,
    event_id: &str,
    sender: &str,
    receiver: &str,
    content: &str,
) -> serde_json::Value {
    let request = session_request(
        Method::POST,
        "/api/v1/messages",
        serde_json::json!({ "receiver_session_id": receiver, "content": content }),
        event_id,
        sender,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    parse_response_body(response).await
}

#[tokio::test]
async fn both_parties_see_the_same_conversation() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    send(&app, &event.id, &ana.session_id, &ben.session_id, "hey Ben!").await;
    send(&app, &event.id, &ben.session_id, &ana.session_id, "hey Ana!").await;
    send(&app, &event.id, &ana.session_id, &ben.session_id, "found the rooftop bar yet?").await;

    // Ana's view
    let request = session_request_empty(
        Method::GET,
        &format!("/api/v1/messages?with={}", ben.session_id),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ana_view = parse_response_body(response).await;

    // Ben's view, independently derived conversation id
    let request = session_request_empty(
        Method::GET,
        &format!("/api/v1/messages?with={}", ana.session_id),
        &event.id,
        &ben.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let ben_view = parse_response_body(response).await;

    assert_eq!(ana_view["match_id"], ben_view["match_id"]);

    let messages = ana_view["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    // Ordered oldest first
    assert_eq!(messages[0]["content"], "hey Ben!");
    assert_eq!(messages[1]["content"], "hey Ana!");
    assert_eq!(messages[2]["content"], "found the rooftop bar yet?");
}

#[tokio::test]
async fn new_messages_are_unread_until_chat_view() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    send(&app, &event.id, &ana.session_id, &ben.session_id, "one").await;
    send(&app, &event.id, &ana.session_id, &ben.session_id, "two").await;

    // Ben's matches list shows two unread from Ana
    let request = session_request_empty(Method::GET, "/api/v1/matches", &event.id, &ben.session_id);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["profile"]["first_name"], "Ana");
    assert_eq!(matches[0]["unread_count"], 2);

    // Entering the chat marks both read
    let request = session_request(
        Method::POST,
        "/api/v1/messages/read",
        serde_json::json!({ "with": ana.session_id }),
        &event.id,
        &ben.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["marked_read"], 2);

    // Recomputed unread count is zero
    let request = session_request_empty(Method::GET, "/api/v1/matches", &event.id, &ben.session_id);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["matches"][0]["unread_count"], 0);
}

#[tokio::test]
async fn mark_read_is_idempotent() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    send(&app, &event.id, &ana.session_id, &ben.session_id, "hello").await;

    let mark = session_request(
        Method::POST,
        "/api/v1/messages/read",
        serde_json::json!({ "with": ana.session_id }),
        &event.id,
        &ben.session_id,
    );
    let response = app.clone().oneshot(mark).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["marked_read"], 1);

    // Second call flips nothing: false -> true happens at most once
    let mark = session_request(
        Method::POST,
        "/api/v1/messages/read",
        serde_json::json!({ "with": ana.session_id }),
        &event.id,
        &ben.session_id,
    );
    let response = app.clone().oneshot(mark).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["marked_read"], 0);
}

#[tokio::test]
async fn read_flag_never_reverts_on_new_traffic() {
    let (app, pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    send(&app, &event.id, &ana.session_id, &ben.session_id, "first").await;

    let mark = session_request(
        Method::POST,
        "/api/v1/messages/read",
        serde_json::json!({ "with": ana.session_id }),
        &event.id,
        &ben.session_id,
    );
    app.clone().oneshot(mark).await.unwrap();

    // A later message does not touch the earlier one's flag
    send(&app, &event.id, &ana.session_id, &ben.session_id, "second").await;

    let flags: Vec<(String, bool)> = sqlx::query_as(
        r#"
        SELECT content, is_read FROM messages
        WHERE event_id = $1::uuid
        ORDER BY created_at ASC
        "#,
    )
    .bind(&event.id)
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(flags.len(), 2);
    assert_eq!(flags[0], ("first".to_string(), true));
    assert_eq!(flags[1], ("second".to_string(), false));
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;

    let request = session_request(
        Method::POST,
        "/api/v1/messages",
        serde_json::json!({ "receiver_session_id": ben.session_id, "content": "" }),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_share_is_one_time_and_match_gated() {
    let (app, _pool) = create_test_app().await;
    let (event, ana, ben) = create_matched_pair(&app).await;
    let outsider = create_test_profile(&app, &event.id, "Cal", "man", "everyone").await;

    // Sharing outside a mutual match is forbidden
    let request = session_request(
        Method::POST,
        "/api/v1/contact-shares",
        serde_json::json!({
            "recipient_session_id": outsider.session_id,
            "full_name": "Ana Silva",
            "phone_number": "+1 415 555 0132"
        }),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Sharing with the match works once
    let share = serde_json::json!({
        "recipient_session_id": ben.session_id,
        "full_name": "Ana Silva",
        "phone_number": "+1 415 555 0132"
    });
    let request = session_request(
        Method::POST,
        "/api/v1/contact-shares",
        share.clone(),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // A repeat is a conflict
    let request = session_request(
        Method::POST,
        "/api/v1/contact-shares",
        share,
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Ben sees the received card; Ana sees shared=true, nothing received
    let request = session_request_empty(
        Method::GET,
        &format!("/api/v1/contact-shares?with={}", ana.session_id),
        &event.id,
        &ben.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["shared"], false);
    assert_eq!(body["received"]["full_name"], "Ana Silva");

    let request = session_request_empty(
        Method::GET,
        &format!("/api/v1/contact-shares?with={}", ben.session_id),
        &event.id,
        &ana.session_id,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["shared"], true);
    assert!(body.get("received").is_none());
}
