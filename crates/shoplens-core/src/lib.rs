pub mod app_config;
pub mod config;
pub mod grade;
pub mod parse;
pub mod types;

pub use app_config::{ApiMode, AppConfig};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use grade::Grade;
pub use types::{
    AuthSession, Customer, CustomerRepurchaseDetail, DailySales, DashboardStats,
    GradeDistribution, Product, ProductStatsSummary, RepurchaseAddress, RepurchaseCustomer,
    RepurchaseCustomerSummary, RepurchaseKpi, RepurchaseProduct, Review, ReviewStats, Sentiment,
    TrendPoint, UserProfile, WordCloudItem,
};
