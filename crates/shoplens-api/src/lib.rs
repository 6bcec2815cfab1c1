//! Dashboard data layer: HTTP client with token refresh, shape-tolerant
//! response normalizers, cross-endpoint aggregation, the persisted auth
//! session store, and the offline mock backend.

pub mod aggregate;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod mock;
pub mod normalize;
pub mod services;
pub mod session;

pub use client::{ApiClient, Query};
pub use error::ApiError;
pub use mock::MockData;
pub use services::Backend;
pub use session::{FileSessionStorage, MemorySessionStorage, SessionStore};
