//! Command handlers for the CLI.
//!
//! These are called from `main` after config, session, and backend are
//! established. Collection commands render whatever the service layer
//! returns; an unreachable backend shows up as an empty table plus the
//! warning the service already logged.

use chrono::NaiveDate;
use clap::Subcommand;

use shoplens_api::services::{auth, customers as customer_svc, products as product_svc,
    repurchase as repurchase_svc, reviews as review_svc};
use shoplens_api::Backend;
use shoplens_core::Grade;
use shoplens_views::{layout_word_cloud, SortKey, SortOrder, TableState, CUSTOMER_TABLE_PAGE_SIZE};

use crate::render;

#[derive(Debug, Subcommand)]
pub enum RepurchaseCommands {
    /// The five aggregate repurchase metrics.
    Kpis,
    /// Per-product repurchase breakdown.
    Products,
    /// Repurchase customer table.
    Customers {
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Detail view for one customer id (member id or "name|address").
    Detail { customer_id: String },
}

pub async fn login(backend: &Backend, email: &str, password: &str) -> anyhow::Result<()> {
    let user = auth::login(backend, email, password).await?;
    println!("logged in as {} ({})", user.email, user.site_name);
    Ok(())
}

pub async fn logout(backend: &Backend) -> anyhow::Result<()> {
    auth::logout(backend).await?;
    println!("logged out");
    Ok(())
}

pub async fn whoami(backend: &Backend) -> anyhow::Result<()> {
    if let Some(user) = backend.session().snapshot().user {
        render::profile(&user);
        return Ok(());
    }
    let user = auth::current_user(backend).await?;
    render::profile(&user);
    Ok(())
}

pub async fn dashboard(backend: &Backend) -> anyhow::Result<()> {
    let stats = auth::dashboard_stats(backend).await?;
    println!("products:        {}", stats.total_products);
    println!("customers:       {}", stats.total_customers);
    println!("monthly revenue: {}원", stats.monthly_revenue);
    Ok(())
}

pub async fn products(backend: &Backend, search: Option<&str>, page: u32) -> anyhow::Result<()> {
    let limit = u32::try_from(shoplens_views::LIST_PAGE_SIZE).unwrap_or(20);
    let products = product_svc::list(backend, page, limit, search).await;
    render::products(&products);
    Ok(())
}

pub async fn sales(backend: &Backend, start: NaiveDate, end: NaiveDate) -> anyhow::Result<()> {
    anyhow::ensure!(start <= end, "start date must not be after end date");
    let series = product_svc::daily_sales(backend, None, start, end).await;
    render::daily_sales(&series);
    Ok(())
}

pub async fn customers(
    backend: &Backend,
    grade: &str,
    sort: &str,
    ascending: bool,
    page: usize,
) -> anyhow::Result<()> {
    let grade = parse_grade(grade);
    let limit = u32::try_from(CUSTOMER_TABLE_PAGE_SIZE).unwrap_or(10);
    let rows = customer_svc::list(backend, 0, limit, grade, None).await;

    let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
    state.set_grade_filter(grade);
    state.sort_key = parse_sort_key(sort)?;
    state.sort_order = if ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };
    for _ in 0..page {
        state.next_page(rows.len());
    }

    let table = state.apply(&rows);
    render::customer_table(&table);
    Ok(())
}

pub async fn grades(backend: &Backend) -> anyhow::Result<()> {
    let distribution = customer_svc::grade_distribution(backend).await;
    render::grade_distribution(&distribution);
    Ok(())
}

pub async fn reviews(
    backend: &Backend,
    rating: Option<u8>,
    product_ids: &[i64],
    page: u32,
) -> anyhow::Result<()> {
    let limit = u32::try_from(shoplens_views::LIST_PAGE_SIZE).unwrap_or(20);
    let reviews = review_svc::list(backend, page, limit, rating, product_ids).await;
    render::reviews(&reviews);
    Ok(())
}

pub async fn keywords(backend: &Backend, product_id: Option<&str>) -> anyhow::Result<()> {
    let items = match product_id {
        Some(id) => product_svc::review_keywords(backend, id, 50).await,
        None => review_svc::keywords(backend).await,
    };
    let placed = layout_word_cloud(&items);
    render::word_cloud(&placed);
    Ok(())
}

pub async fn repurchase(backend: &Backend, command: RepurchaseCommands) -> anyhow::Result<()> {
    match command {
        RepurchaseCommands::Kpis => {
            let kpi = repurchase_svc::kpis(backend, &[]).await?;
            render::repurchase_kpis(&kpi);
        }
        RepurchaseCommands::Products => {
            let products = repurchase_svc::products(backend).await;
            render::repurchase_products(&products);
        }
        RepurchaseCommands::Customers { page } => {
            let limit = u32::try_from(shoplens_views::LIST_PAGE_SIZE).unwrap_or(20);
            let rows = repurchase_svc::customers(backend, 0, limit, Grade::All, None, &[]).await;

            let table = repurchase_table_state(page, rows.len()).apply(&rows);
            render::repurchase_table(&table);
        }
        RepurchaseCommands::Detail { customer_id } => {
            let detail = repurchase_svc::customer_detail(backend, &customer_id).await?;
            render::repurchase_detail(&detail);
        }
    }
    Ok(())
}

/// Repurchase lists page at the list size, not the customer-table size.
fn repurchase_table_state(page: usize, total: usize) -> TableState {
    let mut state = TableState::new(shoplens_views::LIST_PAGE_SIZE);
    for _ in 0..page {
        state.next_page(total);
    }
    state
}

/// Accepts the short display names as well as the backend's own labels.
fn parse_grade(label: &str) -> Grade {
    match label.to_uppercase().as_str() {
        "ALL" | "전체" => Grade::All,
        "BASE" => Grade::Base,
        "GOLD" => Grade::Gold,
        "PLATINUM" => Grade::Platinum,
        "VIP" => Grade::Vip,
        _ => Grade::from_label(label),
    }
}

fn parse_sort_key(key: &str) -> anyhow::Result<SortKey> {
    match key {
        "name" => Ok(SortKey::Name),
        "purchases" => Ok(SortKey::PurchaseCount),
        "points" => Ok(SortKey::Points),
        "first" => Ok(SortKey::FirstPurchaseDate),
        "recent" => Ok(SortKey::RecentPurchaseDate),
        other => anyhow::bail!(
            "unknown sort key '{other}' (expected name, purchases, points, first, or recent)"
        ),
    }
}
