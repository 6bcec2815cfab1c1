//! Cross-endpoint aggregation: pure functions combining already-normalized
//! collections into the composite views the dashboard renders.

use std::collections::HashMap;

use chrono::NaiveDate;

use shoplens_core::types::{DailySales, Product, Review, TrendPoint};

/// Merges the three per-metric trend series into one per-date record for
/// every day of the inclusive `start..=end` window.
///
/// Days absent from a series contribute zero for that metric, so the output
/// always covers the full window in date order with no gaps.
#[must_use]
pub fn merge_daily_series(
    start: NaiveDate,
    end: NaiveDate,
    amounts: &[TrendPoint],
    quantities: &[TrendPoint],
    buyers: &[TrendPoint],
) -> Vec<DailySales> {
    let amounts = index_by_date(amounts);
    let quantities = index_by_date(quantities);
    let buyers = index_by_date(buyers);

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| DailySales {
            date,
            amount: amounts.get(&date).copied().unwrap_or(0),
            quantity: quantities.get(&date).copied().unwrap_or(0),
            buyers: buyers.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

fn index_by_date(series: &[TrendPoint]) -> HashMap<NaiveDate, u64> {
    series.iter().map(|point| (point.date, point.value)).collect()
}

/// Reviews belonging to the selected product.
///
/// Reviews reference products by catalog code, not by id, so the selected
/// product's `product_code` is resolved first. A missing product or a
/// product without a code matches nothing.
#[must_use]
pub fn reviews_for_product<'a>(
    reviews: &'a [Review],
    products: &[Product],
    selected_product_id: &str,
) -> Vec<&'a Review> {
    let Some(code) = products
        .iter()
        .find(|product| product.id == selected_product_id)
        .and_then(|product| product.product_code)
    else {
        return Vec::new();
    };
    reviews
        .iter()
        .filter(|review| review.product_id == code)
        .collect()
}
