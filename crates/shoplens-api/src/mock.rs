//! Offline data source for mock mode.
//!
//! Fixtures are deterministic: entity lists are hand-written constants and
//! the daily series come from a seeded RNG keyed on the metric name, so two
//! runs (and the three per-metric series for one window) always agree.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shoplens_core::grade::Grade;
use shoplens_core::types::{
    average_repurchase_days, Customer, CustomerRepurchaseDetail, DashboardStats,
    GradeDistribution, Product, RepurchaseAddress, RepurchaseCustomer, RepurchaseCustomerSummary,
    RepurchaseKpi, RepurchaseProduct, Review, ReviewStats, Sentiment, TrendPoint, UserProfile,
    WordCloudItem,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Fixture catalog backing mock mode. Stateless; every accessor rebuilds
/// its collection so callers can own the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockData;

impl MockData {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: "mock-owner".into(),
            email: "owner@shoplens.example".into(),
            first_name: "수진".into(),
            last_name: "박".into(),
            site_name: "슈슈마켓".into(),
            site_type: "Cafe24".into(),
            site_url: "https://shushu.example".into(),
            timezone: "Asia/Seoul".into(),
            business_category: "식품".into(),
            created_at: None,
        }
    }

    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            total_products: 48,
            total_customers: 1204,
            monthly_revenue: 18_340_000,
        }
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        let rows: &[(&str, i64, &str, &str, u64, u32)] = &[
            ("p-1", 1001, "한우 선물세트 1+", "식품", 89000, 24),
            ("p-2", 1002, "수제 그래놀라 500g", "식품", 12900, 180),
            ("p-3", 1003, "유기농 콤부차 6병", "음료", 21000, 64),
            ("p-4", 1004, "프리미엄 드립백 커피", "음료", 15800, 92),
            ("p-5", 1005, "저당 단백질바 12입", "식품", 19900, 37),
            ("p-6", 1006, "시그니처 꿀 스틱", "식품", 9900, 210),
            ("p-7", 1007, "냉동 밀키트 갈비탕", "식품", 13500, 58),
        ];
        rows.iter()
            .map(|&(id, code, name, category, price, stock)| Product {
                id: id.into(),
                product_code: Some(code),
                name: name.into(),
                category: category.into(),
                price,
                stock: Some(stock),
                image_url: None,
            })
            .collect()
    }

    #[must_use]
    pub fn customers(&self) -> Vec<Customer> {
        let rows: &[(&str, &str, Grade, u64, u32, (i32, u32, u32), (i32, u32, u32), bool)] = &[
            ("c-1", "김철수", Grade::Vip, 48200, 31, (2023, 2, 11), (2025, 6, 2), true),
            ("c-2", "이영희", Grade::Platinum, 30150, 22, (2023, 7, 3), (2025, 5, 28), true),
            ("c-3", "박민수", Grade::Gold, 16240, 12, (2024, 1, 15), (2025, 5, 14), false),
            ("c-4", "최지은", Grade::Gold, 14980, 11, (2024, 3, 2), (2025, 4, 30), true),
            ("c-5", "정다혜", Grade::Base, 3200, 4, (2024, 11, 20), (2025, 5, 9), false),
            ("c-6", "한상우", Grade::Base, 1800, 2, (2025, 1, 8), (2025, 3, 21), false),
            ("c-7", "오세라", Grade::Platinum, 27700, 19, (2023, 9, 14), (2025, 6, 1), true),
            ("c-8", "임준호", Grade::Base, 900, 1, (2025, 4, 2), (2025, 4, 2), false),
            ("c-9", "서지민", Grade::Gold, 12040, 9, (2024, 5, 27), (2025, 5, 22), true),
            ("c-10", "홍길동", Grade::Vip, 51500, 36, (2022, 12, 1), (2025, 6, 3), true),
            ("c-11", "강은비", Grade::Base, 2400, 3, (2024, 10, 5), (2025, 2, 17), false),
            ("c-12", "문태현", Grade::Platinum, 33900, 24, (2023, 4, 19), (2025, 5, 30), true),
        ];
        rows.iter()
            .map(
                |&(id, name, grade, points, count, first, recent, used_coupon)| Customer {
                    id: id.into(),
                    name: name.into(),
                    email: format!("{id}@example.com"),
                    grade,
                    points,
                    purchase_count: count,
                    first_purchase_date: Some(date(first.0, first.1, first.2)),
                    recent_purchase_date: Some(date(recent.0, recent.1, recent.2)),
                    used_coupon,
                },
            )
            .collect()
    }

    #[must_use]
    pub fn grade_distribution(&self) -> Vec<GradeDistribution> {
        let customers = self.customers();
        #[allow(clippy::cast_precision_loss)]
        let total = customers.len() as f64;
        [Grade::Base, Grade::Gold, Grade::Platinum, Grade::Vip]
            .into_iter()
            .map(|grade| {
                let count = customers.iter().filter(|c| c.grade == grade).count() as u64;
                #[allow(clippy::cast_precision_loss)]
                let percentage = count as f64 / total * 100.0;
                GradeDistribution {
                    grade,
                    count,
                    percentage,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn reviews(&self) -> Vec<Review> {
        let rows: &[(&str, i64, &str, u8, &str, (i32, u32, u32))] = &[
            ("r-1", 1001, "김철수", 5, "선물용으로 최고예요. 포장도 깔끔합니다.", (2025, 5, 2)),
            ("r-2", 1001, "이영희", 4, "고기 질이 좋아요. 배송이 하루 늦었어요.", (2025, 5, 6)),
            ("r-3", 1002, "박민수", 5, "매일 아침 먹고 있어요. 재구매 의사 있습니다.", (2025, 4, 28)),
            ("r-4", 1002, "정다혜", 3, "맛은 무난한데 양이 조금 적네요.", (2025, 5, 11)),
            ("r-5", 1003, "오세라", 2, "탄산이 거의 없었어요.", (2025, 5, 15)),
            ("r-6", 1004, "홍길동", 5, "향이 정말 좋습니다. 드립백 중 최고.", (2025, 5, 18)),
            ("r-7", 1004, "서지민", 4, "가성비 좋아요.", (2025, 5, 21)),
            ("r-8", 1005, "문태현", 1, "너무 달아요. 저당 맞나요?", (2025, 5, 24)),
            ("r-9", 1006, "최지은", 5, "아이들 간식으로 딱입니다.", (2025, 5, 27)),
            ("r-10", 1007, "강은비", 4, "간편하고 맛있어요. 국물이 진합니다.", (2025, 6, 1)),
        ];
        rows.iter()
            .map(|&(id, product_id, name, rating, content, d)| Review {
                id: id.into(),
                product_id,
                customer_name: name.into(),
                rating,
                content: content.into(),
                sentiment: Sentiment::from_rating(rating),
                created_at: Some(date(d.0, d.1, d.2)),
            })
            .collect()
    }

    #[must_use]
    pub fn review_stats(&self) -> ReviewStats {
        let reviews = self.reviews();
        let total = reviews.len() as u64;
        #[allow(clippy::cast_precision_loss)]
        let average = if reviews.is_empty() {
            0.0
        } else {
            reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / reviews.len() as f64
        };
        ReviewStats {
            total_reviews: total,
            average_rating: average,
        }
    }

    #[must_use]
    pub fn keywords(&self) -> Vec<WordCloudItem> {
        let rows: &[(&str, u64)] = &[
            ("맛있어요", 86),
            ("배송", 71),
            ("재구매", 64),
            ("포장", 52),
            ("신선해요", 47),
            ("선물", 41),
            ("가성비", 38),
            ("양이 많아요", 29),
            ("향", 24),
            ("친절", 18),
            ("달아요", 12),
            ("아쉬워요", 7),
        ];
        rows.iter()
            .map(|&(text, value)| WordCloudItem {
                text: text.into(),
                value,
            })
            .collect()
    }

    /// Daily series for one metric over an inclusive window. The RNG is
    /// seeded from the metric name, so the same metric and window always
    /// produce the same series.
    #[must_use]
    pub fn trend_series(&self, metric: &str, start: NaiveDate, end: NaiveDate) -> Vec<TrendPoint> {
        let seed = metric
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        let mut rng = StdRng::seed_from_u64(seed);
        let (low, high) = match metric {
            "amount" => (120_000, 900_000),
            "quantity" => (8, 70),
            _ => (3, 40),
        };
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| TrendPoint {
                date: day,
                value: rng.random_range(low..=high),
            })
            .collect()
    }

    #[must_use]
    pub fn repurchase_products(&self) -> Vec<RepurchaseProduct> {
        self.products()
            .into_iter()
            .enumerate()
            .map(|(i, product)| {
                let rank = u32::try_from(i).unwrap_or(0);
                RepurchaseProduct {
                    product_id: product.id,
                    product_name: product.name,
                    price: Some(product.price),
                    repurchase_rate: Some(18.0 + 4.5 * f64::from(rank)),
                    repurchase_count: Some(6 + 3 * rank),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn repurchase_kpis(&self) -> RepurchaseKpi {
        RepurchaseKpi {
            total_repurchase_count: 310,
            average_repurchase_rate: 27.4,
            average_repurchase_days: 41.5,
            same_product_repurchase_rate: 63.0,
            revenue_contribution: 38.2,
        }
    }

    #[must_use]
    pub fn repurchase_customers(&self) -> Vec<RepurchaseCustomer> {
        let mut rows: Vec<RepurchaseCustomer> = self
            .customers()
            .into_iter()
            .filter(|customer| customer.purchase_count > 1)
            .map(|customer| {
                let avg = average_repurchase_days(
                    customer.first_purchase_date,
                    customer.recent_purchase_date,
                    customer.purchase_count,
                );
                RepurchaseCustomer {
                    id: customer.id.clone(),
                    name: customer.name,
                    email: customer.email,
                    phone: format!("010-0000-{:04}", customer.points % 10000),
                    address: "서울 강남구 역삼동".into(),
                    grade: customer.grade,
                    points: customer.points,
                    purchase_count: customer.purchase_count,
                    average_repurchase_days: avg,
                    recent_purchase_date: customer.recent_purchase_date,
                }
            })
            .collect();
        // One guest row keyed by the composite identity.
        rows.push(RepurchaseCustomer {
            id: "윤보라|인천 연수구 송도동".into(),
            name: "윤보라".into(),
            email: String::new(),
            phone: String::new(),
            address: "인천 연수구 송도동".into(),
            grade: Grade::All,
            points: 0,
            purchase_count: 3,
            average_repurchase_days: 35,
            recent_purchase_date: Some(date(2025, 5, 19)),
        });
        rows
    }

    #[must_use]
    pub fn customer_repurchase_detail(&self, customer_id: &str) -> CustomerRepurchaseDetail {
        let customers = self.repurchase_customers();
        let found = customers.iter().find(|c| c.id == customer_id);

        let customer = found.map_or_else(
            || RepurchaseCustomerSummary {
                customer_id: customer_id.to_owned(),
                name: String::new(),
                grade: Grade::All,
                points: 0,
                total_order_count: 0,
                average_repurchase_days: 0,
                first_order_date: None,
                last_order_date: None,
            },
            |c| RepurchaseCustomerSummary {
                customer_id: c.id.clone(),
                name: c.name.clone(),
                grade: c.grade,
                points: c.points,
                total_order_count: c.purchase_count,
                average_repurchase_days: c.average_repurchase_days,
                first_order_date: None,
                last_order_date: c.recent_purchase_date,
            },
        );

        let products = if found.is_some() {
            self.repurchase_products().into_iter().take(3).collect()
        } else {
            Vec::new()
        };
        let addresses = if found.is_some() {
            vec![
                RepurchaseAddress {
                    address: "서울 강남구 역삼동".into(),
                    count: 5,
                    percentage: 71.4,
                },
                RepurchaseAddress {
                    address: "서울 서초구 반포동".into(),
                    count: 2,
                    percentage: 28.6,
                },
            ]
        } else {
            Vec::new()
        };

        CustomerRepurchaseDetail {
            customer,
            products,
            addresses,
        }
    }
}
