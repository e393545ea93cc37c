//! Shared fixtures for handler and service tests.

use crate::chat::{ChatModel, ModelError, TextStream};
use crate::services::SliderFeed;
use crate::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::{stream, StreamExt};
use lib_core::config::{AiConfig, MediaConfig};
use lib_core::{create_memory_pool, Config};
use lib_media::{CloudinaryClient, CloudinaryConfig};
use std::sync::{Arc, Mutex};

pub const TEST_JWT_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";
pub const TEST_ADMIN_EMAIL: &str = "admin@thep.vn";
pub const TEST_ADMIN_PASSWORD: &str = "ThepXayDung2024!";

/// Chat model with a canned answer that records every prompt it receives.
pub struct MockChatModel {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockChatModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    fn record(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| ModelError::Request("quota exceeded".to_string()))
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn model_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.record(prompt)
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream, ModelError> {
        let reply = self.record(prompt)?;
        let chunks: Vec<Result<String, ModelError>> = reply
            .split_inclusive(' ')
            .map(|chunk| Ok(chunk.to_string()))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }
}

pub fn test_config(admin_password_hash: &str) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration_hours: 24,
        admin_email: TEST_ADMIN_EMAIL.to_string(),
        admin_password_hash: admin_password_hash.to_string(),
        ai: AiConfig::default(),
        media: MediaConfig {
            cloud_name: "demo".to_string(),
            api_key: "123456789012345".to_string(),
            api_secret: "abcd".to_string(),
            upload_folder: "steel".to_string(),
        },
    }
}

/// State over a fresh in-memory database. The Cloudinary client points at
/// `media_api_base` when given.
pub async fn test_state_with(model: Arc<dyn ChatModel>, media_api_base: Option<&str>) -> AppState {
    let hash = lib_auth::hash_password(TEST_ADMIN_PASSWORD).unwrap();
    let config = test_config(&hash);

    let mut media_config = CloudinaryConfig::new(
        &config.media.cloud_name,
        &config.media.api_key,
        &config.media.api_secret,
        &config.media.upload_folder,
    );
    if let Some(base) = media_api_base {
        media_config = media_config.with_api_base(base);
    }

    AppState {
        db: create_memory_pool().await.unwrap(),
        config,
        chat_model: model,
        media: Arc::new(CloudinaryClient::new(media_config).unwrap()),
        slider_feed: Arc::new(SliderFeed::new()),
    }
}

pub async fn test_state(model: Arc<dyn ChatModel>) -> AppState {
    test_state_with(model, None).await
}

pub fn admin_token() -> String {
    lib_auth::encode_jwt(TEST_ADMIN_EMAIL, TEST_JWT_SECRET, 1).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn admin_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", admin_token()));

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
