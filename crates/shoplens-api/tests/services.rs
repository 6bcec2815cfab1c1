//! Integration tests for the service layer against wiremock: auth flows,
//! trend merging, server-driven filters, and fail-soft collection reads.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shoplens_api::services::{auth, customers, products, repurchase, reviews};
use shoplens_api::{ApiClient, ApiError, Backend, SessionStore};
use shoplens_core::grade::Grade;

fn api_backend(base_url: &str, session: SessionStore) -> Backend {
    Backend::Api(
        ApiClient::with_base_url(base_url, session).expect("client construction should not fail"),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn login_fetches_profile_and_commits_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"access_token": "a-1", "refresh_token": "r-1"},
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/management/profile"))
        .and(header("authorization", "Bearer a-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "u-9", "email": "owner@example.com", "site_name": "슈슈마켓"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let backend = api_backend(&server.uri(), session.clone());
    let user = auth::login(&backend, "owner@example.com", "pw").await.unwrap();

    assert_eq!(user.id, "u-9");
    assert_eq!(user.site_name, "슈슈마켓");
    assert!(session.is_authenticated());
    assert_eq!(session.access_token().as_deref(), Some("a-1"));
}

#[tokio::test]
async fn rejected_login_leaves_session_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "이메일 또는 비밀번호가 올바르지 않습니다."
        })))
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let backend = api_backend(&server.uri(), session.clone());
    let result = auth::login(&backend, "owner@example.com", "wrong").await;

    match result {
        Err(ApiError::Status { status, message, .. }) => {
            assert_eq!(status, 401);
            assert!(message.contains("비밀번호"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    session
        .set_authenticated(
            shoplens_core::types::UserProfile {
                id: "u-1".into(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                site_name: String::new(),
                site_type: String::new(),
                site_url: String::new(),
                timezone: String::new(),
                business_category: String::new(),
                created_at: None,
            },
            "a".into(),
            "r".into(),
        )
        .unwrap();

    let backend = api_backend(&server.uri(), session.clone());
    auth::logout(&backend).await.unwrap();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn daily_sales_merges_three_metric_series() {
    let server = MockServer::start().await;
    let trend = |points: serde_json::Value| {
        ResponseTemplate::new(200).set_body_json(json!({"trend": points}))
    };
    Mock::given(method("GET"))
        .and(path("/api/v1/product-analysis/chart/trend"))
        .and(query_param("metric", "amount"))
        .respond_with(trend(json!([
            {"date": "2025-05-01", "value": 1},
            {"date": "2025-05-02", "value": 2},
            {"date": "2025-05-03", "value": 3}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product-analysis/chart/trend"))
        .and(query_param("metric", "quantity"))
        .respond_with(trend(json!([
            {"date": "2025-05-01", "value": 2},
            {"date": "2025-05-02", "value": 3},
            {"date": "2025-05-03", "value": 4}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product-analysis/chart/trend"))
        .and(query_param("metric", "buyers"))
        .respond_with(trend(json!([
            {"date": "2025-05-01", "value": 1},
            {"date": "2025-05-03", "value": 3}
        ])))
        .mount(&server)
        .await;

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    let merged = products::daily_sales(&backend, None, date(2025, 5, 1), date(2025, 5, 4)).await;

    assert_eq!(merged.len(), 4);
    assert_eq!((merged[0].amount, merged[0].quantity, merged[0].buyers), (1, 2, 1));
    assert_eq!((merged[1].amount, merged[1].quantity, merged[1].buyers), (2, 3, 0));
    assert_eq!((merged[2].amount, merged[2].quantity, merged[2].buyers), (3, 4, 3));
    assert_eq!((merged[3].amount, merged[3].quantity, merged[3].buyers), (0, 0, 0));
}

#[tokio::test]
async fn one_failed_series_still_yields_a_full_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product-analysis/chart/trend"))
        .and(query_param("metric", "amount"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    for metric in ["quantity", "buyers"] {
        Mock::given(method("GET"))
            .and(path("/api/v1/product-analysis/chart/trend"))
            .and(query_param("metric", metric))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "trend": [{"date": "2025-05-01", "value": 5}]
            })))
            .mount(&server)
            .await;
    }

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    let merged = products::daily_sales(&backend, None, date(2025, 5, 1), date(2025, 5, 2)).await;

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].amount, 0, "failed metric contributes zeros");
    assert_eq!(merged[0].quantity, 5);
    assert_eq!(merged[0].buyers, 5);
}

#[tokio::test]
async fn customer_list_sends_the_grade_label() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customer-analysis/list"))
        .and(query_param("grade", "슈린이 GOLD"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{"customer_id": "c-1", "grade": "슈린이 GOLD", "point": "16,240P"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    let rows = customers::list(&backend, 2, 10, Grade::Gold, None).await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].grade, Grade::Gold);
    assert_eq!(rows[0].points, 16240);
}

#[tokio::test]
async fn all_grades_filter_sends_no_grade_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customer-analysis/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    customers::list(&backend, 0, 10, Grade::All, None).await;

    let request = server
        .received_requests()
        .await
        .expect("requests should be recorded")
        .into_iter()
        .next()
        .expect("one request should exist");
    assert!(
        !request.url.query().unwrap_or("").contains("grade"),
        "ALL must not narrow the server query"
    );
}

#[tokio::test]
async fn review_list_repeats_the_product_ids_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/review-analysis/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reviews": []})))
        .mount(&server)
        .await;

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    reviews::list(&backend, 0, 20, None, &[1001, 1002]).await;

    let request = server
        .received_requests()
        .await
        .expect("requests should be recorded")
        .into_iter()
        .next()
        .expect("one request should exist");
    assert_eq!(
        request.url.query(),
        Some("page=0&limit=20&product_ids=1001&product_ids=1002")
    );
}

#[tokio::test]
async fn failed_collection_reads_render_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    assert!(products::list(&backend, 0, 20, None).await.is_empty());
    assert!(customers::grade_distribution(&backend).await.is_empty());
    assert!(reviews::keywords(&backend).await.is_empty());
    assert!(repurchase::products(&backend).await.is_empty());
}

#[tokio::test]
async fn single_record_reads_surface_their_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    assert!(repurchase::kpis(&backend, &[]).await.is_err());
    assert!(reviews::stats(&backend).await.is_err());
    assert!(auth::dashboard_stats(&backend).await.is_err());
}

#[tokio::test]
async fn repurchase_detail_normalizes_the_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repurchase-analysis/customer/m-100/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customer": {
                "customer_id": "m-100",
                "customer_name": "김철수",
                "grade": "슈린이 VIP",
                "total_order_count": 7,
                "avg_period": "48일"
            },
            "products": [{"product_id": "p-1", "product_name": "한우 선물세트"}],
            "addresses": [{"address": "서울 강남구", "count": 5, "percentage": 71.4}]
        })))
        .mount(&server)
        .await;

    let backend = api_backend(&server.uri(), SessionStore::in_memory());
    let detail = repurchase::customer_detail(&backend, "m-100").await.unwrap();

    assert_eq!(detail.customer.name, "김철수");
    assert_eq!(detail.customer.grade, Grade::Vip);
    assert_eq!(detail.customer.average_repurchase_days, 48);
    assert_eq!(detail.products.len(), 1);
    assert_eq!(detail.addresses.len(), 1);
}
