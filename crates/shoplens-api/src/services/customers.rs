//! Customer analysis: grade-filtered listing and grade distribution.

use shoplens_core::grade::Grade;
use shoplens_core::types::{Customer, GradeDistribution};

use crate::client::Query;
use crate::endpoints;
use crate::normalize::{normalize_customers, normalize_grade_distribution};
use crate::services::{soften, Backend};

/// Customer list page. Filter and sort are server-driven: anything but
/// [`Grade::All`] is sent as the backend's own label, and `sort_by` is the
/// backend's column name. Fails soft.
pub async fn list(
    backend: &Backend,
    page: u32,
    limit: u32,
    grade: Grade,
    sort_by: Option<&str>,
) -> Vec<Customer> {
    match backend {
        Backend::Mock { data, .. } => {
            let mut customers = data.customers();
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
                .push_opt("sort_by", sort_by);
            soften(
                client
                    .get_with(endpoints::CUSTOMER_LIST, &query)
                    .await
                    .map(|value| normalize_customers(&value)),
                "customers",
            )
        }
    }
}

/// Per-grade customer distribution. Fails soft.
pub async fn grade_distribution(backend: &Backend) -> Vec<GradeDistribution> {
    match backend {
        Backend::Mock { data, .. } => data.grade_distribution(),
        Backend::Api(client) => soften(
            client
                .get(endpoints::CUSTOMER_GRADES)
                .await
                .map(|value| normalize_grade_distribution(&value)),
            "grade distribution",
        ),
    }
}
