//! Plain-text rendering for command output.

use shoplens_core::types::{
    Customer, CustomerRepurchaseDetail, DailySales, GradeDistribution, Product,
    RepurchaseCustomer, RepurchaseKpi, RepurchaseProduct, Review, UserProfile,
};
use shoplens_views::{PlacedWord, TablePage};

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d").to_string())
}

pub fn profile(user: &UserProfile) {
    println!("{} {} <{}>", user.last_name, user.first_name, user.email);
    println!("shop: {} ({})", user.site_name, user.site_type);
    if !user.site_url.is_empty() {
        println!("url:  {}", user.site_url);
    }
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("no products");
        return;
    }
    for product in products {
        let stock = product
            .stock
            .map_or_else(|| "-".to_owned(), |s| s.to_string());
        println!(
            "{:<8} {:<30} {:<10} {:>10}원  stock {}",
            product.id, product.name, product.category, product.price, stock
        );
    }
}

pub fn daily_sales(series: &[DailySales]) {
    if series.is_empty() {
        println!("no sales in window");
        return;
    }
    println!("{:<12} {:>12} {:>8} {:>8}", "date", "amount", "qty", "buyers");
    for day in series {
        println!(
            "{:<12} {:>12} {:>8} {:>8}",
            day.date, day.amount, day.quantity, day.buyers
        );
    }
}

pub fn customer_table(table: &TablePage<'_, Customer>) {
    println!(
        "page {}/{} ({} customers)",
        table.page + 1,
        table.total_pages,
        table.filtered_count
    );
    for customer in &table.rows {
        println!(
            "{:<12} {:<16} {:>6}회 {:>8}P  first {}  recent {}",
            customer.grade.display_name(),
            customer.name,
            customer.purchase_count,
            customer.points,
            date_or_dash(customer.first_purchase_date),
            date_or_dash(customer.recent_purchase_date),
        );
    }
}

pub fn grade_distribution(distribution: &[GradeDistribution]) {
    if distribution.is_empty() {
        println!("no distribution data");
        return;
    }
    for entry in distribution {
        println!(
            "{:<10} {:>6}  {:>5.1}%",
            entry.grade.display_name(),
            entry.count,
            entry.percentage
        );
    }
}

pub fn reviews(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("no reviews");
        return;
    }
    for review in reviews {
        println!(
            "[{}] {}점 {:?} {} — {}",
            date_or_dash(review.created_at),
            review.rating,
            review.sentiment,
            review.customer_name,
            review.content
        );
    }
}

pub fn word_cloud(placed: &[PlacedWord]) {
    if placed.is_empty() {
        println!("no keywords");
        return;
    }
    for word in placed {
        println!(
            "{:<16} value {:>4}  {}px {}  at ({:.1}, {:.1}) rot {:+.1}°",
            word.text, word.value, word.font_size_px, word.color, word.x, word.y, word.rotation_deg
        );
    }
}

pub fn repurchase_kpis(kpi: &RepurchaseKpi) {
    println!("total repurchases:      {}", kpi.total_repurchase_count);
    println!("avg repurchase rate:    {:.1}%", kpi.average_repurchase_rate);
    println!("avg repurchase days:    {:.1}일", kpi.average_repurchase_days);
    println!("same-product rate:      {:.1}%", kpi.same_product_repurchase_rate);
    println!("revenue contribution:   {:.1}%", kpi.revenue_contribution);
}

pub fn repurchase_products(products: &[RepurchaseProduct]) {
    if products.is_empty() {
        println!("no repurchase products");
        return;
    }
    for product in products {
        let rate = product
            .repurchase_rate
            .map_or_else(|| "-".to_owned(), |r| format!("{r:.1}%"));
        let count = product
            .repurchase_count
            .map_or_else(|| "-".to_owned(), |c| c.to_string());
        println!(
            "{:<8} {:<30} rate {:>7}  count {}",
            product.product_id, product.product_name, rate, count
        );
    }
}

pub fn repurchase_table(table: &TablePage<'_, RepurchaseCustomer>) {
    println!(
        "page {}/{} ({} customers)",
        table.page + 1,
        table.total_pages,
        table.filtered_count
    );
    for customer in &table.rows {
        println!(
            "{:<24} {:<16} {:>4}회  every {:>3}일  recent {}",
            customer.id,
            customer.name,
            customer.purchase_count,
            customer.average_repurchase_days,
            date_or_dash(customer.recent_purchase_date),
        );
    }
}

pub fn repurchase_detail(detail: &CustomerRepurchaseDetail) {
    let c = &detail.customer;
    println!("{} [{}]", c.name, c.grade.display_name());
    println!(
        "orders {}  every {}일  points {}P",
        c.total_order_count, c.average_repurchase_days, c.points
    );
    println!(
        "first {}  last {}",
        date_or_dash(c.first_order_date),
        date_or_dash(c.last_order_date)
    );
    if !detail.products.is_empty() {
        println!("-- products --");
        repurchase_products(&detail.products);
    }
    if !detail.addresses.is_empty() {
        println!("-- addresses --");
        for address in &detail.addresses {
            println!(
                "{:<30} {:>4}  {:>5.1}%",
                address.address, address.count, address.percentage
            );
        }
    }
}
