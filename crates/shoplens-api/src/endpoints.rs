//! Endpoint catalog and the bearer-token allow-list.
//!
//! Paths mirror the backend's URL scheme. Per-entity paths are built with
//! [`percent_encoding`] so composite customer ids like `"이름|주소"` survive
//! the round trip.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Method;

pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_LOGOUT: &str = "/auth/logout";

pub const PRODUCTS: &str = "/api/v1/product-analysis/products";
pub const PRODUCT_STATS: &str = "/api/v1/product-analysis/stats";
pub const PRODUCT_TREND: &str = "/api/v1/product-analysis/chart/trend";

pub const CUSTOMER_GRADES: &str = "/api/v1/customer-analysis/grades";
pub const CUSTOMER_LIST: &str = "/api/v1/customer-analysis/list";

pub const REVIEW_STATS: &str = "/api/v1/review-analysis/stats";
pub const REVIEW_KEYWORDS: &str = "/api/v1/review-analysis/keywords";
pub const REVIEW_LIST: &str = "/api/v1/review-analysis/list";

pub const REPURCHASE_PRODUCTS: &str = "/api/v1/repurchase-analysis/products";
pub const REPURCHASE_KPIS: &str = "/api/v1/repurchase-analysis/kpis";
pub const REPURCHASE_CUSTOMERS: &str = "/api/v1/repurchase-analysis/customers";

pub const PROFILE: &str = "/api/v1/management/profile";
pub const DASHBOARD_STATS: &str = "/api/v1/management/dashboard-stats";

#[must_use]
pub fn product_review_stats(product_id: &str) -> String {
    format!("/api/v1/product-analysis/products/{}/review-stats", encode(product_id))
}

#[must_use]
pub fn product_review_keywords(product_id: &str) -> String {
    format!("/api/v1/product-analysis/products/{}/review-keywords", encode(product_id))
}

#[must_use]
pub fn product_reviews(product_id: &str) -> String {
    format!("/api/v1/product-analysis/products/{}/reviews", encode(product_id))
}

#[must_use]
pub fn repurchase_customer_detail(customer_id: &str) -> String {
    format!("/api/v1/repurchase-analysis/customer/{}/detail", encode(customer_id))
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string()
}

/// Whether the bearer authorization header is attached to a request.
///
/// Identity is required by every analytics/management endpoint and by
/// logout (the server invalidates the session it belongs to). Register,
/// login, and refresh authenticate by their payload instead; the refresh
/// call in particular must never carry a possibly-stale access token.
#[must_use]
pub fn requires_auth(method: &Method, path: &str) -> bool {
    match *method {
        Method::GET => path.starts_with("/api/v1/"),
        Method::POST => path == AUTH_LOGOUT,
        Method::PUT => path == PROFILE,
        _ => false,
    }
}
