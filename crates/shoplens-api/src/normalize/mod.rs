//! Normalization of loosely-shaped backend JSON into the canonical domain
//! model.
//!
//! The backend has shipped several envelope generations (`[...]`,
//! `{"items": [...]}`, `{"products": [...]}`, `{"data": ...}`) and renames
//! fields between them. Every function here is pure and total: given any
//! JSON value it produces domain values, skipping list entries that are not
//! objects and defaulting fields it cannot read.

use chrono::NaiveDate;
use serde_json::Value;

use shoplens_core::parse::{parse_date, parse_embedded_u64};

pub mod customers;
pub mod products;
pub mod repurchase;
pub mod reviews;

pub use customers::{normalize_customers, normalize_grade_distribution};
pub use products::{
    normalize_product_stats, normalize_products, normalize_trend_series,
};
pub use repurchase::{
    normalize_customer_repurchase_detail, normalize_repurchase_customers,
    normalize_repurchase_kpis, normalize_repurchase_products,
};
pub use reviews::{normalize_keywords, normalize_review_stats, normalize_reviews};

/// Locates the item array inside any of the known envelope shapes.
///
/// Tried in order: the value itself as a bare array, an `"items"` key, each
/// caller-supplied domain key (`"products"`, `"customers"`, ...), and finally
/// a `"data"` key whose contents are searched the same way. Anything else
/// yields an empty slice.
#[must_use]
pub fn extract_items<'a>(value: &'a Value, domain_keys: &[&str]) -> &'a [Value] {
    if let Some(items) = value.as_array() {
        return items;
    }
    if let Some(items) = value.get("items").and_then(Value::as_array) {
        return items;
    }
    for key in domain_keys {
        if let Some(items) = value.get(key).and_then(Value::as_array) {
            return items;
        }
    }
    if let Some(inner) = value.get("data") {
        return extract_items(inner, domain_keys);
    }
    &[]
}

/// First present alias as a string. Numbers are rendered to their decimal
/// form so id fields survive a numeric encoding.
#[must_use]
pub fn str_field(obj: &Value, aliases: &[&str]) -> Option<String> {
    for key in aliases {
        match obj.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First present alias as a `u64`. String values go through embedded-digit
/// parsing, so `"16,240P"` reads as 16240.
#[must_use]
pub fn u64_field(obj: &Value, aliases: &[&str]) -> Option<u64> {
    for key in aliases {
        match obj.get(key) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_u64() {
                    return Some(v);
                }
                if let Some(v) = n.as_f64() {
                    if v >= 0.0 {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                        return Some(v.round() as u64);
                    }
                }
            }
            Some(Value::String(s)) if !s.trim().is_empty() => {
                return Some(parse_embedded_u64(s));
            }
            _ => {}
        }
    }
    None
}

#[must_use]
pub fn u32_field(obj: &Value, aliases: &[&str]) -> Option<u32> {
    u64_field(obj, aliases).map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// First present alias as an `i64`. Strings must be plain integers here;
/// embedded-unit parsing is for unsigned display values only.
#[must_use]
pub fn i64_field(obj: &Value, aliases: &[&str]) -> Option<i64> {
    for key in aliases {
        match obj.get(key) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_i64() {
                    return Some(v);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse() {
                    return Some(v);
                }
            }
            _ => {}
        }
    }
    None
}

#[must_use]
pub fn f64_field(obj: &Value, aliases: &[&str]) -> Option<f64> {
    for key in aliases {
        match obj.get(key) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().trim_end_matches('%').parse() {
                    return Some(v);
                }
            }
            _ => {}
        }
    }
    None
}

#[must_use]
pub fn bool_field(obj: &Value, aliases: &[&str]) -> Option<bool> {
    for key in aliases {
        match obj.get(key) {
            Some(Value::Bool(b)) => return Some(*b),
            Some(Value::String(s)) => match s.trim() {
                "true" | "Y" | "y" | "1" => return Some(true),
                "false" | "N" | "n" | "0" => return Some(false),
                _ => {}
            },
            Some(Value::Number(n)) => return Some(n.as_i64() != Some(0)),
            _ => {}
        }
    }
    None
}

/// First alias that parses as a date in any of the accepted formats.
#[must_use]
pub fn date_field(obj: &Value, aliases: &[&str]) -> Option<NaiveDate> {
    for key in aliases {
        if let Some(Value::String(s)) = obj.get(key) {
            if let Some(date) = parse_date(s) {
                return Some(date);
            }
        }
    }
    None
}
