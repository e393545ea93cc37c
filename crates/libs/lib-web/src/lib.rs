//! # Web Library
//!
//! HTTP handlers, middleware, services, chat model integration, and server
//! setup.

pub mod chat;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use server::{build_router, start_server, AppState, ServerConfig};
