//! # Chat
//!
//! Prompt assembly and the generative-AI model seam used by the chat
//! endpoints.
//!
//! ## Modules
//!
//! - **[`model`]**: [`ChatModel`] trait and the `genai`-backed implementation
//! - **[`prompt`]**: default persona, context assembly, prompt composition

pub mod model;
pub mod prompt;

pub use model::{ChatModel, GenaiChatModel, ModelError, TextStream};
pub use prompt::{assemble_context, compose_prompt, ChatContext, DEFAULT_SYSTEM_PROMPT};
