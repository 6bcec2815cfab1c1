//! Canonical domain model after normalization.
//!
//! The backend sends these entities under several historical field names and
//! envelope shapes; the normalizers in `shoplens-api` fold all of that into
//! the types here. Every field has a defined default so normalization is
//! total.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::grade::Grade;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Secondary catalog code. Reviews reference products by this code, NOT
    /// by `id` — the two are different namespaces.
    pub product_code: Option<i64>,
    pub name: String,
    pub category: String,
    /// Unit price in won. Always resolved to an integer, even when the
    /// source sends a comma-formatted string.
    pub price: u64,
    pub stock: Option<u32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub grade: Grade,
    pub points: u64,
    pub purchase_count: u32,
    pub first_purchase_date: Option<NaiveDate>,
    pub recent_purchase_date: Option<NaiveDate>,
    pub used_coupon: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepurchaseCustomer {
    /// Stable identity. Members keep their backend id; non-members are keyed
    /// by the composite `"name|address"` so repeated fetches agree.
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub grade: Grade,
    pub points: u64,
    pub purchase_count: u32,
    pub average_repurchase_days: u32,
    pub recent_purchase_date: Option<NaiveDate>,
}

/// Average days between repurchases over the first..last purchase window.
///
/// Zero when the customer has made at most one purchase — there is no
/// repurchase interval to speak of.
#[must_use]
pub fn average_repurchase_days(
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
    purchase_count: u32,
) -> u32 {
    if purchase_count <= 1 {
        return 0;
    }
    let (Some(first), Some(last)) = (first, last) else {
        return 0;
    };
    let span = (last - first).num_days().max(0);
    let intervals = i64::from(purchase_count - 1);
    // Ceiling division keeps a 1-day span over many purchases from rounding
    // to zero.
    u32::try_from((span + intervals - 1) / intervals).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Maps a source sentiment label (English or Korean) to the enum.
    /// Unknown labels fall back to `Neutral`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "positive" | "긍정" => Sentiment::Positive,
            "negative" | "부정" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    /// Derives sentiment from a star rating when the source supplies none:
    /// 4-5 positive, 1-2 negative, 3 neutral.
    #[must_use]
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            4.. => Sentiment::Positive,
            ..=2 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    /// References [`Product::product_code`], not [`Product::id`].
    pub product_id: i64,
    pub customer_name: String,
    pub rating: u8,
    pub content: String,
    pub sentiment: Sentiment,
    pub created_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCloudItem {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepurchaseProduct {
    pub product_id: String,
    pub product_name: String,
    pub price: Option<u64>,
    pub repurchase_rate: Option<f64>,
    pub repurchase_count: Option<u32>,
}

/// The five aggregate repurchase metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepurchaseKpi {
    pub total_repurchase_count: u64,
    /// Percentage.
    pub average_repurchase_rate: f64,
    pub average_repurchase_days: f64,
    /// Percentage.
    pub same_product_repurchase_rate: f64,
    /// Percentage of revenue contributed by repurchase customers.
    pub revenue_contribution: f64,
}

/// One point of a single-metric daily trend series as the backend sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// One merged entry of the daily sales series: the three per-metric trend
/// series folded into a single per-date record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub amount: u64,
    pub quantity: u64,
    pub buyers: u64,
}

/// Windowed sales totals for one product (`/product-analysis/stats`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductStatsSummary {
    pub days: u32,
    pub sales: u64,
    pub items: u64,
    pub buyers: u64,
}

/// Aggregate review counters (`/review-analysis/stats`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_reviews: u64,
    pub average_rating: f64,
}

/// Delivery-address breakdown entry for one repurchase customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepurchaseAddress {
    pub address: String,
    pub count: u64,
    pub percentage: f64,
}

/// Header block of the per-customer repurchase detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepurchaseCustomerSummary {
    pub customer_id: String,
    pub name: String,
    pub grade: Grade,
    pub points: u64,
    pub total_order_count: u32,
    pub average_repurchase_days: u32,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
}

/// Full per-customer repurchase detail: summary, per-product breakdown, and
/// delivery-address breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRepurchaseDetail {
    pub customer: RepurchaseCustomerSummary,
    pub products: Vec<RepurchaseProduct>,
    pub addresses: Vec<RepurchaseAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeDistribution {
    pub grade: Grade,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub site_name: String,
    pub site_type: String,
    pub site_url: String,
    pub timezone: String,
    pub business_category: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_customers: u64,
    pub monthly_revenue: u64,
}

/// The process-wide auth session snapshot.
///
/// Created empty at startup, populated on login/signup, rotated on refresh,
/// cleared on logout or an unrecoverable 401. Persisted write-through by the
/// session store in `shoplens-api`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: Option<UserProfile>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AuthSession {
    /// Authenticated iff both the access token and the user profile are
    /// present. A token without a user is corrupt state, not a login.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}
