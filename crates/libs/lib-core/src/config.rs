//! # Application Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! to fail fast if misconfigured.
//!
//! The server builds one [`Config`] in `start_server` and hands it to the
//! router state; nothing reads it through a global.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env()?;
//! config.validate()?;
//! # Ok::<(), String>(())
//! ```

use lib_utils::{get_env, get_env_or, get_env_parse_or, validate_email};

/// Settings for the hosted generative-AI model.
#[derive(Clone, Debug)]
pub struct AiConfig {
    /// Model name understood by `genai` (e.g. "gemini-2.0-flash")
    pub model: String,
    /// Provider API key; empty means "let genai read the provider's own env var"
    pub api_key: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_key: String::new(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

/// Cloudinary account used for signed uploads.
#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub upload_folder: String,
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for admin JWT signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// Admin token validity period in hours (1-720)
    pub jwt_expiration_hours: i64,

    /// Admin login email
    pub admin_email: String,

    /// Argon2 PHC string for the admin password
    pub admin_password_hash: String,

    pub ai: AiConfig,

    pub media: MediaConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/steel.db");

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| e.to_string())?;
        let jwt_expiration_hours = get_env_parse_or("JWT_EXPIRATION_HOURS", 24i64)
            .map_err(|e| e.to_string())?;

        let admin_email = get_env("ADMIN_EMAIL").map_err(|e| e.to_string())?;
        let admin_password_hash = get_env("ADMIN_PASSWORD_HASH").map_err(|e| e.to_string())?;

        let defaults = AiConfig::default();
        let ai = AiConfig {
            model: get_env_or("AI_MODEL", &defaults.model),
            api_key: get_env("AI_API_KEY")
                .or_else(|_| get_env("GEMINI_API_KEY"))
                .unwrap_or_default(),
            temperature: get_env_parse_or("AI_TEMPERATURE", defaults.temperature)
                .map_err(|e| e.to_string())?,
            max_tokens: get_env_parse_or("AI_MAX_TOKENS", defaults.max_tokens)
                .map_err(|e| e.to_string())?,
        };

        let media = MediaConfig {
            cloud_name: get_env("CLOUDINARY_CLOUD_NAME").map_err(|e| e.to_string())?,
            api_key: get_env("CLOUDINARY_API_KEY").map_err(|e| e.to_string())?,
            api_secret: get_env("CLOUDINARY_API_SECRET").map_err(|e| e.to_string())?,
            upload_folder: get_env_or("CLOUDINARY_UPLOAD_FOLDER", "steel"),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            admin_email,
            admin_password_hash,
            ai,
            media,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        validate_email(&self.admin_email).map_err(|_| "ADMIN_EMAIL must be a valid email address".to_string())?;

        if !self.admin_password_hash.starts_with("$argon2") {
            return Err("ADMIN_PASSWORD_HASH must be an Argon2 PHC string (see hash-password)".to_string());
        }

        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err("AI_TEMPERATURE must be between 0.0 and 2.0".to_string());
        }

        if self.ai.max_tokens == 0 {
            return Err("AI_MAX_TOKENS must be greater than 0".to_string());
        }

        Ok(())
    }
}
