//! Product analysis: catalog listing, windowed stats, daily sales series,
//! and per-product review slices.

use chrono::NaiveDate;

use shoplens_core::types::{
    DailySales, Product, ProductStatsSummary, Review, ReviewStats, TrendPoint, WordCloudItem,
};

use crate::aggregate::merge_daily_series;
use crate::client::Query;
use crate::endpoints;
use crate::error::ApiError;
use crate::normalize::{
    normalize_keywords, normalize_product_stats, normalize_products, normalize_review_stats,
    normalize_reviews, normalize_trend_series,
};
use crate::services::{soften, Backend};

/// Product catalog page. Fails soft to an empty list.
pub async fn list(backend: &Backend, page: u32, limit: u32, search: Option<&str>) -> Vec<Product> {
    match backend {
        Backend::Mock { data, .. } => {
            let mut products = data.products();
            if let Some(term) = search {
                let term = term.trim();
                if !term.is_empty() {
                    products.retain(|p| p.name.contains(term) || p.category.contains(term));
                }
            }
            products
        }
        Backend::Api(client) => {
            let query = Query::new()
                .push("page", page)
                .push("limit", limit)
                .push_opt("search", search.map(str::trim).filter(|s| !s.is_empty()));
            soften(
                client
                    .get_with(endpoints::PRODUCTS, &query)
                    .await
                    .map(|value| normalize_products(&value)),
                "products",
            )
        }
    }
}

/// Windowed sales totals for one product.
///
/// # Errors
/// Transport and status errors from the stats endpoint.
pub async fn stats(
    backend: &Backend,
    product_id: &str,
    days: u32,
) -> Result<ProductStatsSummary, ApiError> {
    match backend {
        Backend::Mock { data, .. } => {
            let sales: u64 = data
                .products()
                .iter()
                .find(|p| p.id == product_id)
                .map_or(0, |p| p.price * u64::from(days));
            Ok(ProductStatsSummary {
                days,
                sales,
                items: u64::from(days) * 3,
                buyers: u64::from(days) * 2,
            })
        }
        Backend::Api(client) => {
            let query = Query::new().push("product_id", product_id).push("days", days);
            let value = client.get_with(endpoints::PRODUCT_STATS, &query).await?;
            Ok(normalize_product_stats(&value))
        }
    }
}

/// One metric's daily trend series, shop-wide or scoped to a product.
/// Fails soft to an empty series.
pub async fn daily_trend(
    backend: &Backend,
    product_id: Option<&str>,
    metric: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<TrendPoint> {
    match backend {
        Backend::Mock { data, .. } => data.trend_series(metric, start, end),
        Backend::Api(client) => {
            let query = Query::new()
                .push("metric", metric)
                .push("start_date", start.format("%Y-%m-%d"))
                .push("end_date", end.format("%Y-%m-%d"))
                .push_opt("product_id", product_id);
            soften(
                client
                    .get_with(endpoints::PRODUCT_TREND, &query)
                    .await
                    .map(|value| normalize_trend_series(&value)),
                "daily trend",
            )
        }
    }
}

/// Merged daily sales series over an inclusive window.
///
/// The three metric series are fetched concurrently; a failed series logs
/// and contributes zeros, so the merged output always covers the window.
pub async fn daily_sales(
    backend: &Backend,
    product_id: Option<&str>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailySales> {
    let (amounts, quantities, buyers) = tokio::join!(
        daily_trend(backend, product_id, "amount", start, end),
        daily_trend(backend, product_id, "quantity", start, end),
        daily_trend(backend, product_id, "buyers", start, end),
    );
    merge_daily_series(start, end, &amounts, &quantities, &buyers)
}

/// Review keyword frequencies for one product, capped at `limit` entries.
/// Fails soft.
pub async fn review_keywords(
    backend: &Backend,
    product_id: &str,
    limit: u32,
) -> Vec<WordCloudItem> {
    match backend {
        Backend::Mock { data, .. } => {
            let mut keywords = data.keywords();
            keywords.truncate(limit as usize);
            keywords
        }
        Backend::Api(client) => {
            let query = Query::new().push("limit", limit);
            soften(
                client
                    .get_with(&endpoints::product_review_keywords(product_id), &query)
                    .await
                    .map(|value| normalize_keywords(&value)),
                "product review keywords",
            )
        }
    }
}

/// Aggregate review counters for one product.
///
/// # Errors
/// Transport and status errors from the review-stats endpoint.
pub async fn review_stats(backend: &Backend, product_id: &str) -> Result<ReviewStats, ApiError> {
    match backend {
        Backend::Mock { data, .. } => Ok(data.review_stats()),
        Backend::Api(client) => {
            let value = client
                .get(&endpoints::product_review_stats(product_id))
                .await?;
            Ok(normalize_review_stats(&value))
        }
    }
}

/// Reviews written against one product. Fails soft.
pub async fn reviews(backend: &Backend, product_id: &str, page: u32, limit: u32) -> Vec<Review> {
    match backend {
        Backend::Mock { data, .. } => {
            let code = data
                .products()
                .iter()
                .find(|p| p.id == product_id)
                .and_then(|p| p.product_code);
            match code {
                Some(code) => data
                    .reviews()
                    .into_iter()
                    .filter(|r| r.product_id == code)
                    .collect(),
                None => Vec::new(),
            }
        }
        Backend::Api(client) => {
            let query = Query::new().push("page", page).push("limit", limit);
            soften(
                client
                    .get_with(&endpoints::product_reviews(product_id), &query)
                    .await
                    .map(|value| normalize_reviews(&value)),
                "product reviews",
            )
        }
    }
}
