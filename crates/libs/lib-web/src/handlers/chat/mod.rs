//! # Chat Handlers
//!
//! Public chat assistant endpoints.
//!
//! ## Responses
//!
//! - `200` - `{ "response": "..." }` (or a chunked `text/plain` body for the
//!   stream endpoint)
//! - `400` - `{ "error": "..." }` when `message` is missing, not a string,
//!   blank, or the body is not JSON
//! - `500` - `{ "error": "..." }` with a generic message for any store or
//!   model failure; details stay in the logs

use crate::services::ChatService;
use crate::chat::ChatModel;
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::{stream, StreamExt};
use lib_core::dto::{ChatRequest, ChatResponse, ErrorResponse};
use lib_core::DbPool;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, instrument, warn};

/// Reply for a missing or unusable `message`.
pub const INVALID_MESSAGE_ERROR: &str = "Vui lòng nhập nội dung tin nhắn.";

/// Reply for any failure while producing an answer.
pub const CHAT_FAILURE_ERROR: &str = "Xin lỗi, đã có lỗi xảy ra khi xử lý câu hỏi của bạn. Vui lòng thử lại sau.";

type ChatError = (StatusCode, Json<ErrorResponse>);

fn bad_request() -> ChatError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(INVALID_MESSAGE_ERROR)))
}

fn server_error() -> ChatError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(CHAT_FAILURE_ERROR)))
}

/// Pull a usable message out of the request body.
fn message_from(payload: Result<Json<ChatRequest>, JsonRejection>) -> Result<String, ChatError> {
    let Json(req) = payload.map_err(|e| {
        warn!("[CHAT] Rejected body: {}", e.body_text());
        bad_request()
    })?;

    req.message_text().map(str::to_string).ok_or_else(|| {
        warn!("[CHAT] Missing or invalid message");
        bad_request()
    })
}

#[instrument(skip_all)]
pub async fn chat(
    State(db): State<DbPool>,
    State(model): State<Arc<dyn ChatModel>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let message = message_from(payload)?;

    let response = ChatService::new(db, model).reply(&message).await.map_err(|e| {
        error!("[CHAT] Failed to answer: {}", e);
        server_error()
    })?;

    Ok(Json(ChatResponse { response }))
}

#[instrument(skip_all)]
pub async fn chat_stream(
    State(db): State<DbPool>,
    State(model): State<Arc<dyn ChatModel>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ChatError> {
    let message = message_from(payload)?;

    let chunks = ChatService::new(db, model)
        .reply_stream(&message)
        .await
        .map_err(|e| {
            error!("[CHAT] Failed to start stream: {}", e);
            server_error()
        })?;

    // Ends at the first model error; headers are already sent by then
    let body = stream::unfold(chunks, |mut chunks| async move {
        match chunks.next().await {
            Some(Ok(text)) => Some((Ok::<_, Infallible>(text), chunks)),
            Some(Err(e)) => {
                error!("[CHAT] Stream interrupted: {}", e);
                None
            }
            None => None,
        }
    });

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(body),
    )
        .into_response())
}

#[cfg(test)]
mod tests;
