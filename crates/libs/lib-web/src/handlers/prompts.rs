//! # Chat Prompt Handlers
//!
//! Admin CRUD over prompt configurations (`/api/admin/chat-prompts`).

use crate::services::ChatPromptService;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use lib_core::dto::{ChatPromptForCreate, ChatPromptForUpdate};
use lib_core::model::store::models::ChatPromptConfig;
use lib_core::{AppError, DbPool};
use tracing::instrument;

pub async fn list_prompts(State(db): State<DbPool>) -> Result<Json<Vec<ChatPromptConfig>>, AppError> {
    Ok(Json(ChatPromptService::new(db).list().await?))
}

pub async fn get_prompt(
    State(db): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<Json<ChatPromptConfig>, AppError> {
    Ok(Json(ChatPromptService::new(db).get(id).await?))
}

#[instrument(skip_all)]
pub async fn create_prompt(
    State(db): State<DbPool>,
    Json(data): Json<ChatPromptForCreate>,
) -> Result<(StatusCode, Json<ChatPromptConfig>), AppError> {
    let config = ChatPromptService::new(db).create(data).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

#[instrument(skip(db, data))]
pub async fn update_prompt(
    State(db): State<DbPool>,
    Path(id): Path<i64>,
    Json(data): Json<ChatPromptForUpdate>,
) -> Result<Json<ChatPromptConfig>, AppError> {
    Ok(Json(ChatPromptService::new(db).update(id, data).await?))
}

/// Make one configuration the only active one.
#[instrument(skip(db))]
pub async fn activate_prompt(
    State(db): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<Json<ChatPromptConfig>, AppError> {
    Ok(Json(ChatPromptService::new(db).activate(id).await?))
}

#[instrument(skip(db))]
pub async fn delete_prompt(State(db): State<DbPool>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    ChatPromptService::new(db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;
    use crate::test_support::{admin_request, body_json, json_request, test_state, MockChatModel};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_prompt_lifecycle() {
        let model = Arc::new(MockChatModel::replying("ok"));
        let app = build_router(test_state(model.clone()).await, &[]);

        let response = app
            .clone()
            .oneshot(admin_request(
                "POST",
                "/api/admin/chat-prompts",
                Some(json!({ "name": "Bán hàng", "prompt": "Bạn là nhân viên bán hàng.", "is_active": true })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let first = body_json(response).await;

        let response = app
            .clone()
            .oneshot(admin_request(
                "POST",
                "/api/admin/chat-prompts",
                Some(json!({ "name": "Kỹ thuật", "prompt": "Bạn là kỹ sư." })),
            ))
            .await
            .unwrap();
        let second = body_json(response).await;
        assert_eq!(second["is_active"], false);

        let response = app
            .clone()
            .oneshot(admin_request(
                "POST",
                &format!("/api/admin/chat-prompts/{}/activate", second["id"]),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["is_active"], true);

        let response = app
            .clone()
            .oneshot(admin_request("GET", &format!("/api/admin/chat-prompts/{}", first["id"]), None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["is_active"], false);

        // The public chat now uses the newly activated prompt
        app.clone()
            .oneshot(json_request("POST", "/api/chat", json!({ "message": "Hỏi" })))
            .await
            .unwrap();
        assert!(model.last_prompt().unwrap().starts_with("System: Bạn là kỹ sư."));

        let response = app
            .clone()
            .oneshot(admin_request(
                "PUT",
                &format!("/api/admin/chat-prompts/{}", second["id"]),
                Some(json!({ "include_products": true })),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["include_products"], true);

        let response = app
            .clone()
            .oneshot(admin_request("DELETE", &format!("/api/admin/chat-prompts/{}", first["id"]), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(admin_request("GET", "/api/admin/chat-prompts", None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_not_found() {
        let app = build_router(test_state(Arc::new(MockChatModel::replying("ok"))).await, &[]);

        let response = app
            .oneshot(admin_request("POST", "/api/admin/chat-prompts/404/activate", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NotFound");
    }
}
