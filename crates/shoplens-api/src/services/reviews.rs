//! Review analysis: filtered listing, keyword frequencies, and counters.

use shoplens_core::types::{Review, ReviewStats, WordCloudItem};

use crate::client::Query;
use crate::endpoints;
use crate::error::ApiError;
use crate::normalize::{normalize_keywords, normalize_review_stats, normalize_reviews};
use crate::services::{soften, Backend};

/// Review list page, optionally narrowed to a star rating and to a set of
/// catalog codes sent as repeated `product_ids` query keys. Fails soft.
pub async fn list(
    backend: &Backend,
    page: u32,
    limit: u32,
    rating: Option<u8>,
    product_ids: &[i64],
) -> Vec<Review> {
    match backend {
        Backend::Mock { data, .. } => {
            let mut reviews = data.reviews();
            if let Some(rating) = rating {
                reviews.retain(|r| r.rating == rating);
            }
            if !product_ids.is_empty() {
                reviews.retain(|r| product_ids.contains(&r.product_id));
            }
            reviews
        }
        Backend::Api(client) => {
            let query = Query::new()
                .push("page", page)
                .push("limit", limit)
                .push_opt("rating", rating)
                .push_all("product_ids", product_ids);
            soften(
                client
                    .get_with(endpoints::REVIEW_LIST, &query)
                    .await
                    .map(|value| normalize_reviews(&value)),
                "reviews",
            )
        }
    }
}

/// Shop-wide keyword frequencies. Fails soft.
pub async fn keywords(backend: &Backend) -> Vec<WordCloudItem> {
    match backend {
        Backend::Mock { data, .. } => data.keywords(),
        Backend::Api(client) => soften(
            client
                .get(endpoints::REVIEW_KEYWORDS)
                .await
                .map(|value| normalize_keywords(&value)),
            "review keywords",
        ),
    }
}

/// Shop-wide review counters.
///
/// # Errors
/// Transport and status errors from the stats endpoint.
pub async fn stats(backend: &Backend) -> Result<ReviewStats, ApiError> {
    match backend {
        Backend::Mock { data, .. } => Ok(data.review_stats()),
        Backend::Api(client) => {
            let value = client.get(endpoints::REVIEW_STATS).await?;
            Ok(normalize_review_stats(&value))
        }
    }
}
