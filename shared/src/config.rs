use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Sender identity the dispatcher sends as. Selected by configuration so a
/// single dispatcher replaces the per-function copies that used to drift.
#[derive(Debug, Clone)]
pub struct SenderProfile {
    pub from: String,
    pub reply_to: Option<String>,
}

/// Configuration for the invite service. Loaded once at startup; startup
/// fails fast when a credential is absent. No embedded defaults.
#[derive(Debug, Clone)]
pub struct InviteConfig {
    pub email_api_key: String,
    pub sender: SenderProfile,
    pub app_base_url: String,
    pub jwt_secret: String,
    pub database_url: String,
    pub database_service_key: String,
}

impl InviteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            email_api_key: require("RESEND_API_KEY")?,
            sender: SenderProfile {
                from: require("EMAIL_SENDER")?,
                reply_to: env::var("EMAIL_REPLY_TO").ok(),
            },
            app_base_url: require("APP_BASE_URL")?,
            jwt_secret: require("AUTH_JWT_SECRET")?,
            database_url: require("DATABASE_URL")?,
            database_service_key: require("DATABASE_SERVICE_KEY")?,
        })
    }
}

/// Configuration for the nutrition service.
#[derive(Debug, Clone)]
pub struct NutritionConfig {
    pub genai_api_key: String,
    pub genai_model: String,
}

impl NutritionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            genai_api_key: require("GEMINI_API_KEY")?,
            // Model name is not a credential, so a default is fine here.
            genai_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
