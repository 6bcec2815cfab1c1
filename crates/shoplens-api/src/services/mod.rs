//! Endpoint-facing services.
//!
//! Each submodule owns one analysis domain and speaks to a [`Backend`]:
//! either the live HTTP client or the offline fixture catalog, selected by
//! configuration. Collection fetches fail soft — a failed analytics read
//! logs a warning and renders as an empty list — while auth flows and
//! single-record reads surface their errors.

use shoplens_core::{ApiMode, AppConfig};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::mock::MockData;
use crate::session::SessionStore;

pub mod auth;
pub mod customers;
pub mod products;
pub mod repurchase;
pub mod reviews;

/// Data source behind the services: the live API or local fixtures.
#[derive(Clone)]
pub enum Backend {
    Api(ApiClient),
    Mock { data: MockData, session: SessionStore },
}

impl Backend {
    /// Selects the backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] or [`ApiError::InvalidBaseUrl`] if the
    /// production client cannot be constructed.
    pub fn from_config(config: &AppConfig, session: SessionStore) -> Result<Self, ApiError> {
        match config.api_mode {
            ApiMode::Mock => Ok(Backend::Mock {
                data: MockData::new(),
                session,
            }),
            ApiMode::Production => Ok(Backend::Api(ApiClient::new(config, session)?)),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        match self {
            Backend::Api(client) => client.session(),
            Backend::Mock { session, .. } => session,
        }
    }
}

/// Collapses a failed collection fetch to an empty list with a warning.
pub(crate) fn soften<T>(result: Result<Vec<T>, ApiError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(what, %error, "fetch failed, rendering empty");
            Vec::new()
        }
    }
}
