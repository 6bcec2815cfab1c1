//! Repurchase analysis: KPIs, product and customer breakdowns, and the
//! per-customer detail view.

use shoplens_core::grade::Grade;
use shoplens_core::types::{
    CustomerRepurchaseDetail, RepurchaseCustomer, RepurchaseKpi, RepurchaseProduct,
};

use crate::client::Query;
use crate::endpoints;
use crate::error::ApiError;
use crate::normalize::{
    normalize_customer_repurchase_detail, normalize_repurchase_customers,
    normalize_repurchase_kpis, normalize_repurchase_products,
};
use crate::services::{soften, Backend};

/// Per-product repurchase breakdown. Fails soft.
pub async fn products(backend: &Backend) -> Vec<RepurchaseProduct> {
    match backend {
        Backend::Mock { data, .. } => data.repurchase_products(),
        Backend::Api(client) => soften(
            client
                .get(endpoints::REPURCHASE_PRODUCTS)
                .await
                .map(|value| normalize_repurchase_products(&value)),
            "repurchase products",
        ),
    }
}

/// The five aggregate repurchase metrics, optionally scoped to a set of
/// products sent as repeated `product_ids` query keys.
///
/// # Errors
/// Transport and status errors from the KPI endpoint.
pub async fn kpis(backend: &Backend, product_ids: &[String]) -> Result<RepurchaseKpi, ApiError> {
    match backend {
        Backend::Mock { data, .. } => Ok(data.repurchase_kpis()),
        Backend::Api(client) => {
            let query = Query::new().push_all("product_ids", product_ids);
            let value = client.get_with(endpoints::REPURCHASE_KPIS, &query).await?;
            Ok(normalize_repurchase_kpis(&value))
        }
    }
}

/// Repurchase customer list page. Grade, sort, and product scoping are
/// server-driven. Fails soft.
pub async fn customers(
    backend: &Backend,
    page: u32,
    limit: u32,
    grade: Grade,
    sort_by: Option<&str>,
    product_ids: &[String],
) -> Vec<RepurchaseCustomer> {
    match backend {
        Backend::Mock { data, .. } => {
            let mut customers = data.repurchase_customers();
            if grade != Grade::All {
                customers.retain(|c| c.grade == grade);
            }
            customers
        }
        Backend::Api(client) => {
            let query = Query::new()
                .push("page", page)
                .push("limit", limit)
                .push_opt(
                    "grade",
                    (grade != Grade::All).then(|| grade.label().to_owned()),
                )
                .push_opt("sort_by", sort_by)
                .push_all("product_ids", product_ids);
            soften(
                client
                    .get_with(endpoints::REPURCHASE_CUSTOMERS, &query)
                    .await
                    .map(|value| normalize_repurchase_customers(&value)),
                "repurchase customers",
            )
        }
    }
}

/// Per-customer repurchase detail. The id may be a backend id or the guest
/// composite `"name|address"`; the path builder percent-encodes either.
///
/// # Errors
/// Transport and status errors from the detail endpoint.
pub async fn customer_detail(
    backend: &Backend,
    customer_id: &str,
) -> Result<CustomerRepurchaseDetail, ApiError> {
    match backend {
        Backend::Mock { data, .. } => Ok(data.customer_repurchase_detail(customer_id)),
        Backend::Api(client) => {
            let value = client
                .get(&endpoints::repurchase_customer_detail(customer_id))
                .await?;
            Ok(normalize_customer_repurchase_detail(&value, customer_id))
        }
    }
}
