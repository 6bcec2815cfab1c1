//! Review-analysis normalizers.

use serde_json::Value;

use shoplens_core::types::{Review, ReviewStats, Sentiment, WordCloudItem};

use super::{date_field, extract_items, f64_field, i64_field, str_field, u32_field, u64_field};

/// Normalizes a review list response. Sentiment uses the source label when
/// one is present and otherwise derives from the star rating; entries with
/// no rating at all read as neutral.
#[must_use]
pub fn normalize_reviews(value: &Value) -> Vec<Review> {
    extract_items(value, &["reviews"])
        .iter()
        .filter_map(normalize_review)
        .collect()
}

fn normalize_review(obj: &Value) -> Option<Review> {
    let id = str_field(obj, &["review_id", "id"])?;
    let rating = u32_field(obj, &["rating", "score", "star_rating"])
        .map(|r| u8::try_from(r.clamp(1, 5)).unwrap_or(5));
    let sentiment = str_field(obj, &["sentiment", "sentiment_label"]).map_or_else(
        || rating.map_or(Sentiment::Neutral, Sentiment::from_rating),
        |s| Sentiment::from_label(&s),
    );
    Some(Review {
        id,
        product_id: i64_field(obj, &["product_id", "product_code"]).unwrap_or(0),
        customer_name: str_field(obj, &["customer_name", "author", "writer"]).unwrap_or_default(),
        rating: rating.unwrap_or(1),
        content: str_field(obj, &["content", "review_text", "text"]).unwrap_or_default(),
        sentiment,
        created_at: date_field(obj, &["created_at", "review_date", "date"]),
    })
}

/// Normalizes keyword frequencies for the word cloud. Zero-weight entries
/// are kept; the layout stage decides what to draw.
#[must_use]
pub fn normalize_keywords(value: &Value) -> Vec<WordCloudItem> {
    extract_items(value, &["keywords", "words"])
        .iter()
        .filter_map(|obj| {
            let text = str_field(obj, &["keyword", "text", "word"])?;
            if text.trim().is_empty() {
                return None;
            }
            let value = u64_field(obj, &["count", "value", "frequency", "weight"]).unwrap_or(0);
            Some(WordCloudItem { text, value })
        })
        .collect()
}

/// Normalizes the aggregate review counters.
#[must_use]
pub fn normalize_review_stats(value: &Value) -> ReviewStats {
    let obj = value.get("data").unwrap_or(value);
    ReviewStats {
        total_reviews: u64_field(obj, &["total_reviews", "review_count", "total"]).unwrap_or(0),
        average_rating: f64_field(obj, &["average_rating", "avg_rating", "rating"]).unwrap_or(0.0),
    }
}
