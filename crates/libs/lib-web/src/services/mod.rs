//! # Services Layer
//!
//! Business logic between the HTTP handlers and the store / external
//! clients:
//!
//! ```text
//! Handlers (HTTP) → Services → Repositories / ChatModel / CloudinaryClient
//! ```
//!
//! - [`chat`] - prompt assembly and model calls for the public chat
//! - [`chat_prompt`] - admin CRUD over prompt configurations
//! - [`slider`] - public slider reads with fallback, admin writes
//! - [`slider_feed`] - pub/sub of slider changes
//!
//! Services are plain structs built per request from [`AppState`](crate::AppState)
//! parts and return `Result<T, AppError>`.

pub mod chat;
pub mod chat_prompt;
pub mod slider;
pub mod slider_feed;

pub use chat::ChatService;
pub use chat_prompt::ChatPromptService;
pub use slider::{default_sliders, SliderService};
pub use slider_feed::{SliderFeed, SliderList, SliderSubscription};
