//! Customer-analysis normalizers.

use serde_json::Value;

use shoplens_core::grade::Grade;
use shoplens_core::types::{Customer, GradeDistribution};

use super::{bool_field, date_field, extract_items, f64_field, str_field, u32_field, u64_field};

/// Normalizes a customer list response.
#[must_use]
pub fn normalize_customers(value: &Value) -> Vec<Customer> {
    extract_items(value, &["customers"])
        .iter()
        .filter_map(normalize_customer)
        .collect()
}

fn normalize_customer(obj: &Value) -> Option<Customer> {
    let id = str_field(obj, &["customer_id", "id"])?;
    Some(Customer {
        id,
        name: str_field(obj, &["customer_name", "name"]).unwrap_or_default(),
        email: str_field(obj, &["email"]).unwrap_or_default(),
        grade: grade_field(obj),
        points: u64_field(obj, &["point", "points"]).unwrap_or(0),
        purchase_count: u32_field(obj, &["purchase_count", "order_count"]).unwrap_or(0),
        first_purchase_date: date_field(obj, &["first_purchase_date", "first_order_date"]),
        recent_purchase_date: date_field(
            obj,
            &["last_purchase_date", "recent_purchase_date", "last_order_date"],
        ),
        used_coupon: bool_field(obj, &["used_coupon", "coupon_used"]).unwrap_or(false),
    })
}

fn grade_field(obj: &Value) -> Grade {
    str_field(obj, &["grade", "customer_grade", "member_grade"])
        .map_or(Grade::All, |label| Grade::from_label(&label))
}

/// Normalizes the per-grade distribution. Percentages are recomputed from
/// the counts when the source omits them, so the slices always sum near 100.
#[must_use]
pub fn normalize_grade_distribution(value: &Value) -> Vec<GradeDistribution> {
    let items = extract_items(value, &["grades", "distribution"]);
    let entries: Vec<(Grade, u64, Option<f64>)> = items
        .iter()
        .filter_map(|obj| {
            let grade = str_field(obj, &["grade", "grade_name", "label"])?;
            let count = u64_field(obj, &["count", "customer_count"]).unwrap_or(0);
            Some((Grade::from_label(&grade), count, f64_field(obj, &["percentage", "ratio"])))
        })
        .collect();

    let total: u64 = entries.iter().map(|(_, count, _)| count).sum();
    entries
        .into_iter()
        .map(|(grade, count, percentage)| {
            #[allow(clippy::cast_precision_loss)]
            let computed = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            GradeDistribution {
                grade,
                count,
                percentage: percentage.unwrap_or(computed),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn customers_parse_display_formatted_fields() {
        let value = json!({"customers": [{
            "customer_id": "c-1",
            "customer_name": "김철수",
            "email": "kim@example.com",
            "grade": "슈린이 GOLD",
            "point": "16,240P",
            "purchase_count": "31회",
            "first_purchase_date": "2024.01.15",
            "last_purchase_date": "2025-06-01T10:00:00",
            "used_coupon": "Y"
        }]});
        let customers = normalize_customers(&value);
        assert_eq!(customers.len(), 1);
        let c = &customers[0];
        assert_eq!(c.grade, Grade::Gold);
        assert_eq!(c.points, 16240);
        assert_eq!(c.purchase_count, 31);
        assert_eq!(c.first_purchase_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(c.recent_purchase_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert!(c.used_coupon);
    }

    #[test]
    fn unknown_grade_falls_back_to_all() {
        let value = json!([{"id": "c-2", "grade": "신규등급"}]);
        let customers = normalize_customers(&value);
        assert_eq!(customers[0].grade, Grade::All);
    }

    #[test]
    fn distribution_recomputes_missing_percentages() {
        let value = json!({"grades": [
            {"grade": "슈둥이", "count": 30},
            {"grade": "슈린이 GOLD", "count": 10}
        ]});
        let dist = normalize_grade_distribution(&value);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].grade, Grade::Base);
        assert!((dist[0].percentage - 75.0).abs() < f64::EPSILON);
        assert!((dist[1].percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distribution_keeps_server_percentages() {
        let value = json!([{"grade": "슈린이 VIP", "count": 5, "percentage": 12.5}]);
        let dist = normalize_grade_distribution(&value);
        assert!((dist[0].percentage - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn distribution_zero_total_yields_zero_percentages() {
        let value = json!([{"grade": "슈둥이", "count": 0}]);
        let dist = normalize_grade_distribution(&value);
        assert!((dist[0].percentage).abs() < f64::EPSILON);
    }
}
