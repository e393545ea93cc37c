//! # Core Library
//!
//! Models, database store, configuration, errors, and the carousel state
//! machine shared by the web layer.

pub mod carousel;
pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{AiConfig, Config, MediaConfig};
pub use error::{AppError, Result};
pub use model::store::{create_memory_pool, create_pool, run_migrations, DbPool};
