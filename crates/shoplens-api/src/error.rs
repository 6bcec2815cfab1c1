use thiserror::Error;

/// Errors surfaced by the dashboard API client.
///
/// The client is the only layer that throws: normalizers and aggregators fail
/// soft to empty collections, and services catch these errors for read-only
/// analytics fetches.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response other than a recoverable 401. Carries the
    /// server-supplied message when the error body has one, else a fixed
    /// per-status default.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// 401 that survived the refresh-and-retry cycle (or refresh was not
    /// possible). The session has already been cleared when this is returned.
    #[error("인증이 만료되었습니다. 다시 로그인해주세요.")]
    Unauthorized,

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// A 2xx response body that should have had a known shape did not.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Local form validation failed before any network call was made.
    #[error("{0}")]
    Validation(String),

    /// Reading or writing the persisted session snapshot failed.
    #[error("session storage error: {0}")]
    SessionStorage(#[from] std::io::Error),
}

/// Default user-facing message for a non-2xx status when the error body
/// supplies none.
#[must_use]
pub fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "잘못된 요청입니다.",
        403 => "접근 권한이 없습니다.",
        404 => "요청한 데이터를 찾을 수 없습니다.",
        500..=599 => "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
        _ => "요청 처리 중 오류가 발생했습니다.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_have_specific_defaults() {
        assert_eq!(default_status_message(400), "잘못된 요청입니다.");
        assert_eq!(default_status_message(403), "접근 권한이 없습니다.");
        assert_eq!(default_status_message(404), "요청한 데이터를 찾을 수 없습니다.");
        assert!(default_status_message(500).contains("서버 오류"));
        assert!(default_status_message(503).contains("서버 오류"));
    }

    #[test]
    fn unknown_status_gets_generic_default() {
        assert_eq!(default_status_message(418), "요청 처리 중 오류가 발생했습니다.");
    }
}
