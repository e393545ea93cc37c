use super::*;
use crate::server::build_router;
use crate::test_support::{body_json, body_text, json_request, test_state, MockChatModel};
use axum::body::Body;
use axum::http::Request;
use lib_core::model::store::models::ChatPromptForCreate;
use lib_core::model::store::ChatPromptRepository;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_empty_message_is_bad_request() {
    let state = test_state(Arc::new(MockChatModel::replying("ok"))).await;
    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request("POST", "/api/chat", json!({ "message": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": INVALID_MESSAGE_ERROR }));
}

#[tokio::test]
async fn test_missing_or_non_string_message_is_bad_request() {
    let state = test_state(Arc::new(MockChatModel::replying("ok"))).await;

    for body in [json!({}), json!({ "message": 12 }), json!({ "message": null })] {
        let app = build_router(state.clone(), &[]);
        let response = app.oneshot(json_request("POST", "/api/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let state = test_state(Arc::new(MockChatModel::replying("ok"))).await;
    let app = build_router(state, &[]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_successful_reply() {
    let model = Arc::new(MockChatModel::replying("Chúng tôi có thép hộp 40x80."));
    let state = test_state(model.clone()).await;
    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat",
            json!({ "message": "Có thép hộp không?", "history": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "response": "Chúng tôi có thép hộp 40x80." }));
    assert!(model.last_prompt().unwrap().ends_with("User: Có thép hộp không?"));
}

#[tokio::test]
async fn test_active_prompt_drives_system_segment() {
    let model = Arc::new(MockChatModel::replying("ok"));
    let state = test_state(model.clone()).await;
    ChatPromptRepository::create(&state.db, ChatPromptForCreate::new("Kỹ thuật", "X").active())
        .await
        .unwrap();
    let app = build_router(state, &[]);

    app.oneshot(json_request("POST", "/api/chat", json!({ "message": "Hỏi" })))
        .await
        .unwrap();

    assert_eq!(model.last_prompt().unwrap(), "System: X\n\nUser: Hỏi");
}

#[tokio::test]
async fn test_model_failure_is_generic_server_error() {
    let state = test_state(Arc::new(MockChatModel::failing())).await;
    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request("POST", "/api/chat", json!({ "message": "Giá tôn?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": CHAT_FAILURE_ERROR }));
}

#[tokio::test]
async fn test_store_failure_is_generic_server_error() {
    let model = Arc::new(MockChatModel::replying("ok"));
    let state = test_state(model.clone()).await;
    state.db.close().await;
    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request("POST", "/api/chat", json!({ "message": "Giá tôn?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": CHAT_FAILURE_ERROR }));
    assert!(model.last_prompt().is_none());
}

#[tokio::test]
async fn test_stream_returns_full_text() {
    let state = test_state(Arc::new(MockChatModel::replying("Thép ống mạ kẽm"))).await;
    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request("POST", "/api/chat/stream", json!({ "message": "Có gì?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_text(response).await, "Thép ống mạ kẽm");
}

#[tokio::test]
async fn test_stream_validates_message() {
    let state = test_state(Arc::new(MockChatModel::replying("ok"))).await;
    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request("POST", "/api/chat/stream", json!({ "message": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
