use thiserror::Error;

use crate::app_config::{ApiMode, AppConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_mode = parse_api_mode(&or_default("SHOPLENS_API_MODE", "production"))?;

    // The base URL is only required when the services actually talk to the
    // network; mock mode runs fully offline.
    let api_base_url = match lookup("SHOPLENS_API_BASE_URL") {
        Ok(url) => url,
        Err(_) if api_mode == ApiMode::Mock => String::new(),
        Err(_) => return Err(ConfigError::MissingEnvVar("SHOPLENS_API_BASE_URL".into())),
    };

    let api_key = lookup("SHOPLENS_API_KEY").ok().filter(|k| !k.is_empty());
    let request_timeout_secs = parse_u64("SHOPLENS_REQUEST_TIMEOUT_SECS", "60")?;
    let session_path = PathBuf::from(or_default("SHOPLENS_SESSION_PATH", "./.shoplens-session.json"));
    let log_level = or_default("SHOPLENS_LOG_LEVEL", "info");
    let app_name = or_default("SHOPLENS_APP_NAME", "shoplens");
    let app_version = or_default("SHOPLENS_APP_VERSION", "0.1.0");

    Ok(AppConfig {
        api_mode,
        api_base_url,
        api_key,
        request_timeout_secs,
        session_path,
        log_level,
        app_name,
        app_version,
    })
}

fn parse_api_mode(s: &str) -> Result<ApiMode, ConfigError> {
    match s {
        "mock" => Ok(ApiMode::Mock),
        "production" => Ok(ApiMode::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPLENS_API_MODE".to_string(),
            reason: format!("expected 'mock' or 'production', got '{other}'"),
        }),
    }
}
