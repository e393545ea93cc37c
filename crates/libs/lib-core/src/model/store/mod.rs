//! # Database Store
//!
//! SQLite connection pool, embedded migrations, and repositories.

// region: --- Modules
pub mod catalog_repository;
pub mod chat_prompt_repository;
pub mod models;
pub mod slider_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use catalog_repository::CatalogRepository;
pub use chat_prompt_repository::ChatPromptRepository;
pub use slider_repository::SliderRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations, embedded from `lib-core/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Create a connection pool, creating the database file if missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    if let Some(db_path) = database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                tracing::info!("Created database directory: {:?}", parent);
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Single-connection in-memory database with the schema applied.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// capped at one connection.
pub async fn create_memory_pool() -> anyhow::Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
// endregion: --- Types and Functions
