//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature. Handlers extract what they need from
//! [`AppState`](crate::AppState) through `FromRef`, validate the request and
//! delegate to [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`chat`]**: public chat assistant
//!   - `POST /api/chat` - Reply to a message
//!   - `POST /api/chat/stream` - Reply as a chunked text stream
//!
//! - **[`sliders`]**: home page carousel
//!   - `GET /api/sliders` - Active sliders (default set when none)
//!   - `GET /api/sliders/events` - Server-sent slider updates
//!   - `GET|POST /api/admin/sliders`, `PUT|DELETE /api/admin/sliders/{id}`
//!
//! - **[`auth`]**: `POST /api/admin/login`
//!
//! - **[`prompts`]**: admin prompt configurations under `/api/admin/chat-prompts`
//!
//! - **[`uploads`]**: `POST /api/admin/uploads` - signed image upload
//!
//! ## Errors
//!
//! Admin and slider handlers return [`AppError`](lib_core::AppError), which
//! renders `{ "error", "code" }`. The chat handlers answer `{ "error" }` only,
//! with 400 for a bad message and 500 for everything else.

pub mod auth;
pub mod chat;
pub mod prompts;
pub mod sliders;
pub mod uploads;
