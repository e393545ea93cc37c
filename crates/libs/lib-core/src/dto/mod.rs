//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies exchanged with the website and the admin UI
//! over the REST API.

pub mod auth;
pub mod chat;

pub use auth::*;
pub use chat::*;

pub use crate::model::store::models::{
    ChatPromptForCreate, ChatPromptForUpdate, SliderForCreate, SliderForUpdate,
};
