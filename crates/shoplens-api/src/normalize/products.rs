//! Product-analysis normalizers.

use serde_json::Value;

use shoplens_core::types::{Product, ProductStatsSummary, TrendPoint};

use super::{date_field, extract_items, i64_field, str_field, u32_field, u64_field};

/// Normalizes a product list response. Entries without any usable id are
/// skipped; every other field defaults.
#[must_use]
pub fn normalize_products(value: &Value) -> Vec<Product> {
    extract_items(value, &["products"])
        .iter()
        .filter_map(normalize_product)
        .collect()
}

fn normalize_product(obj: &Value) -> Option<Product> {
    let id = str_field(obj, &["product_id", "id"])?;
    Some(Product {
        id,
        product_code: i64_field(obj, &["product_code"]),
        name: str_field(obj, &["product_name", "name"]).unwrap_or_default(),
        category: str_field(obj, &["category", "product_category", "category_name"])
            .unwrap_or_else(|| "기타".to_owned()),
        price: u64_field(obj, &["price", "sale_price"]).unwrap_or(0),
        stock: u32_field(obj, &["stock", "stock_quantity"]),
        image_url: str_field(obj, &["image_url", "thumbnail_url"]),
    })
}

/// Normalizes the windowed sales totals for one product.
#[must_use]
pub fn normalize_product_stats(value: &Value) -> ProductStatsSummary {
    let obj = value.get("data").unwrap_or(value);
    ProductStatsSummary {
        days: u32_field(obj, &["days", "period_days"]).unwrap_or(0),
        sales: u64_field(obj, &["sales", "total_sales", "sales_amount"]).unwrap_or(0),
        items: u64_field(obj, &["items", "total_items", "item_count"]).unwrap_or(0),
        buyers: u64_field(obj, &["buyers", "total_buyers", "buyer_count"]).unwrap_or(0),
    }
}

/// Normalizes one metric's daily trend series. Entries without a parseable
/// date are dropped; the merge step cannot place them on the axis.
#[must_use]
pub fn normalize_trend_series(value: &Value) -> Vec<TrendPoint> {
    extract_items(value, &["trend", "chart", "series"])
        .iter()
        .filter_map(|obj| {
            let date = date_field(obj, &["date", "order_date", "day"])?;
            let value = u64_field(obj, &["value", "amount", "count", "total"]).unwrap_or(0);
            Some(TrendPoint { date, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn products_read_aliased_fields() {
        let value = json!({"products": [
            {
                "product_id": 7,
                "product_code": 1042,
                "product_name": "한우 선물세트",
                "category": "식품",
                "price": "45,000",
                "stock_quantity": 12
            },
            {"id": "p-9", "name": "수제 쿠키", "sale_price": 8900}
        ]});
        let products = normalize_products(&value);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "7");
        assert_eq!(products[0].product_code, Some(1042));
        assert_eq!(products[0].price, 45000);
        assert_eq!(products[0].stock, Some(12));
        assert_eq!(products[1].id, "p-9");
        assert_eq!(products[1].price, 8900);
        assert_eq!(products[1].product_code, None);
    }

    #[test]
    fn category_falls_back_through_aliases_to_default() {
        let value = json!([
            {"id": 1, "product_category": "식품"},
            {"id": 2}
        ]);
        let products = normalize_products(&value);
        assert_eq!(products[0].category, "식품");
        assert_eq!(products[1].category, "기타");
    }

    #[test]
    fn products_without_id_are_skipped() {
        let value = json!([{"name": "이름뿐"}, {"id": 1, "name": "ok"}]);
        let products = normalize_products(&value);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "1");
    }

    #[test]
    fn empty_and_unknown_shapes_yield_empty() {
        assert!(normalize_products(&json!([])).is_empty());
        assert!(normalize_products(&json!({"count": 0})).is_empty());
        assert!(normalize_products(&json!(null)).is_empty());
    }

    #[test]
    fn stats_default_missing_fields() {
        let value = json!({"days": 30, "total_sales": "1,200,000"});
        let stats = normalize_product_stats(&value);
        assert_eq!(stats.days, 30);
        assert_eq!(stats.sales, 1_200_000);
        assert_eq!(stats.items, 0);
        assert_eq!(stats.buyers, 0);
    }

    #[test]
    fn trend_drops_undated_points() {
        let value = json!({"trend": [
            {"date": "2025-05-01", "value": 10},
            {"date": null, "value": 99},
            {"date": "2025-05-03", "amount": 30}
        ]});
        let series = normalize_trend_series(&value);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert_eq!(series[1].value, 30);
    }
}
