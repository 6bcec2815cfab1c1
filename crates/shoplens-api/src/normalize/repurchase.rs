//! Repurchase-analysis normalizers.

use serde_json::Value;

use shoplens_core::grade::Grade;
use shoplens_core::types::{
    average_repurchase_days, CustomerRepurchaseDetail, RepurchaseAddress, RepurchaseCustomer,
    RepurchaseCustomerSummary, RepurchaseKpi, RepurchaseProduct,
};

use super::{date_field, extract_items, f64_field, str_field, u32_field, u64_field};

/// Sentinel customer ids the backend sends for guest orders.
const GUEST_MARKERS: &[&str] = &["", "비회원", "null"];

/// Normalizes the repurchase customer list.
///
/// Guest orders arrive without a stable id; those rows are keyed by the
/// composite `"name|address"` so repeated fetches and the detail endpoint
/// agree on identity.
#[must_use]
pub fn normalize_repurchase_customers(value: &Value) -> Vec<RepurchaseCustomer> {
    extract_items(value, &["customers"])
        .iter()
        .filter_map(normalize_repurchase_customer)
        .collect()
}

fn normalize_repurchase_customer(obj: &Value) -> Option<RepurchaseCustomer> {
    let name = str_field(obj, &["customer_name", "name"]).unwrap_or_default();
    let address = str_field(obj, &["address", "delivery_address"]).unwrap_or_default();
    let id = customer_identity(obj, &name, &address)?;

    let purchase_count = u32_field(obj, &["purchase_count", "order_count"]).unwrap_or(0);
    let first = date_field(obj, &["first_purchase_date", "first_order_date"]);
    let recent = date_field(
        obj,
        &["last_purchase_date", "recent_purchase_date", "last_order_date"],
    );
    let avg_days = u32_field(obj, &["avg_period", "average_repurchase_days", "avg_days"])
        .unwrap_or_else(|| average_repurchase_days(first, recent, purchase_count));

    Some(RepurchaseCustomer {
        id,
        name,
        email: str_field(obj, &["email"]).unwrap_or_default(),
        phone: str_field(obj, &["phone", "phone_number"]).unwrap_or_default(),
        address,
        grade: str_field(obj, &["grade", "customer_grade"])
            .map_or(Grade::All, |label| Grade::from_label(&label)),
        points: u64_field(obj, &["point", "points"]).unwrap_or(0),
        purchase_count,
        average_repurchase_days: avg_days,
        recent_purchase_date: recent,
    })
}

/// Stable identity for a repurchase row: the backend id when one exists,
/// else the guest composite. A guest row with neither name nor address has
/// no identity at all and is dropped.
fn customer_identity(obj: &Value, name: &str, address: &str) -> Option<String> {
    let raw = str_field(obj, &["customer_id", "id"]).unwrap_or_default();
    let raw = raw.trim();
    if !GUEST_MARKERS.contains(&raw) {
        return Some(raw.to_owned());
    }
    if name.is_empty() && address.is_empty() {
        return None;
    }
    Some(format!("{name}|{address}"))
}

/// Normalizes the per-product repurchase list.
#[must_use]
pub fn normalize_repurchase_products(value: &Value) -> Vec<RepurchaseProduct> {
    extract_items(value, &["products"])
        .iter()
        .filter_map(|obj| {
            let product_id = str_field(obj, &["product_id", "id"])?;
            Some(RepurchaseProduct {
                product_id,
                product_name: str_field(obj, &["product_name", "name"]).unwrap_or_default(),
                price: u64_field(obj, &["price"]),
                repurchase_rate: f64_field(obj, &["repurchase_rate", "rate"]),
                repurchase_count: u32_field(obj, &["repurchase_count", "count"]),
            })
        })
        .collect()
}

/// Normalizes the five aggregate repurchase metrics.
#[must_use]
pub fn normalize_repurchase_kpis(value: &Value) -> RepurchaseKpi {
    let obj = value.get("data").unwrap_or(value);
    RepurchaseKpi {
        total_repurchase_count: u64_field(obj, &["total_repurchase_count", "total_count"])
            .unwrap_or(0),
        average_repurchase_rate: f64_field(obj, &["avg_repurchase_rate", "average_repurchase_rate"])
            .unwrap_or(0.0),
        average_repurchase_days: f64_field(obj, &["avg_repurchase_days", "average_repurchase_days"])
            .unwrap_or(0.0),
        same_product_repurchase_rate: f64_field(obj, &["same_product_rate", "same_product_repurchase_rate"])
            .unwrap_or(0.0),
        revenue_contribution: f64_field(obj, &["sales_contribution", "revenue_contribution"])
            .unwrap_or(0.0),
    }
}

/// Normalizes the per-customer repurchase detail: summary header, product
/// breakdown, and delivery-address breakdown.
#[must_use]
pub fn normalize_customer_repurchase_detail(
    value: &Value,
    fallback_id: &str,
) -> CustomerRepurchaseDetail {
    let root = value.get("data").unwrap_or(value);
    let summary_obj = root.get("customer").or_else(|| root.get("summary")).unwrap_or(root);

    let purchase_count =
        u32_field(summary_obj, &["total_order_count", "purchase_count", "order_count"]).unwrap_or(0);
    let first = date_field(summary_obj, &["first_order_date", "first_purchase_date"]);
    let last = date_field(summary_obj, &["last_order_date", "last_purchase_date"]);

    let customer = RepurchaseCustomerSummary {
        customer_id: str_field(summary_obj, &["customer_id", "id"])
            .unwrap_or_else(|| fallback_id.to_owned()),
        name: str_field(summary_obj, &["customer_name", "name"]).unwrap_or_default(),
        grade: str_field(summary_obj, &["grade"])
            .map_or(Grade::All, |label| Grade::from_label(&label)),
        points: u64_field(summary_obj, &["point", "points"]).unwrap_or(0),
        total_order_count: purchase_count,
        average_repurchase_days: u32_field(
            summary_obj,
            &["avg_period", "average_repurchase_days"],
        )
        .unwrap_or_else(|| average_repurchase_days(first, last, purchase_count)),
        first_order_date: first,
        last_order_date: last,
    };

    let products = root
        .get("products")
        .map(normalize_repurchase_products)
        .unwrap_or_default();

    let addresses = root
        .get("addresses")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .filter_map(|obj| {
            let address = str_field(obj, &["address", "delivery_address"])?;
            Some(RepurchaseAddress {
                address,
                count: u64_field(obj, &["count", "order_count"]).unwrap_or(0),
                percentage: f64_field(obj, &["percentage", "ratio"]).unwrap_or(0.0),
            })
        })
        .collect();

    CustomerRepurchaseDetail {
        customer,
        products,
        addresses,
    }
}
