use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub cors_allowed_origins: Vec<String>,
    pub app_env: String,
    pub providers: ProviderConfig,
}

/// Credentials and fixed generation parameters for the LLM providers.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub openai_api_base: String,
    pub mistral_api_key: Option<SecretString>,
    pub mistral_model: String,
    pub mistral_api_base: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: "gpt-4".to_string(),
            openai_api_base: "https://api.openai.com/v1".to_string(),
            mistral_api_key: None,
            mistral_model: "mistral-large-latest".to_string(),
            mistral_api_base: "https://api.mistral.ai/v1".to_string(),
            max_tokens: 3500,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = ProviderConfig::default();

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "lesson-forge-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT").unwrap_or(3001),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: parse_env("JWT_EXPIRATION_HOURS").unwrap_or(24 * 7),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|origins| split_origins(&origins))
                .unwrap_or_else(|_| vec!["http://localhost:3000".to_string()]),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            providers: ProviderConfig {
                openai_api_key: secret_env("OPENAI_API_KEY"),
                openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
                openai_api_base: env::var("OPENAI_API_BASE").unwrap_or(defaults.openai_api_base),
                mistral_api_key: secret_env("MISTRAL_API_KEY"),
                mistral_model: env::var("MISTRAL_MODEL").unwrap_or(defaults.mistral_model),
                mistral_api_base: env::var("MISTRAL_API_BASE")
                    .unwrap_or(defaults.mistral_api_base),
                max_tokens: parse_env("GENERATION_MAX_TOKENS").unwrap_or(defaults.max_tokens),
                temperature: parse_env("GENERATION_TEMPERATURE")
                    .unwrap_or(defaults.temperature),
                timeout_secs: parse_env("GENERATION_TIMEOUT_SECS")
                    .unwrap_or(defaults.timeout_secs),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configuration that must never reach a production deployment.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}). Must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        if self.providers.openai_api_key.is_none() && self.providers.mistral_api_key.is_none() {
            log::warn!("No LLM provider key configured; content generation will fail");
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "lesson-forge-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3001,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            app_env: "test".to_string(),
            providers: ProviderConfig::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn secret_env(key: &str) -> Option<SecretString> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
