use std::path::PathBuf;

/// Which data backend the services talk to.
///
/// `Mock` serves deterministic in-memory fixtures for offline development;
/// `Production` issues real HTTP requests against the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Mock,
    Production,
}

impl std::fmt::Display for ApiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiMode::Mock => write!(f, "mock"),
            ApiMode::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_mode: ApiMode,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub session_path: PathBuf,
    pub log_level: String,
    pub app_name: String,
    pub app_version: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_mode", &self.api_mode)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("session_path", &self.session_path)
            .field("log_level", &self.log_level)
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .finish()
    }
}
