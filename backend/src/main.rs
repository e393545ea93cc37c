//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//! `BIND_ADDRESS` and `ALLOWED_ORIGINS` override the listener defaults.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    start_server(ServerConfig::from_env()).await
}
