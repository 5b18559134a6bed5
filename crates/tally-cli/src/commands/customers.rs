//! Customer analytics command

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{Analytics, AnalyticsConfig, CustomerId, Product, Snapshot};

use super::{money, print_json, truncate};

pub fn cmd_customer(
    snapshot: &Snapshot,
    config: &AnalyticsConfig,
    customer_id: CustomerId,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let analytics = Analytics::with_config(snapshot, config.clone());
    let report = analytics
        .customer_report(customer_id, today)
        .with_context(|| format!("No analytics for customer {}", customer_id))?;

    if json {
        return print_json(&report);
    }

    println!();
    println!("👤 {} (#{})", report.customer.name, report.customer.id);
    if let Some(email) = &report.customer.email {
        println!("   {}", email);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if report.totals.order_count == 0 {
        println!("   No orders yet.");
        return Ok(());
    }

    println!("   Orders:          {}", report.totals.order_count);
    println!("   Units:           {}", report.totals.total_units);
    println!("   Revenue:         {}", money(report.totals.total_amount));
    if let Some(aov) = report.average_order_value {
        println!("   Avg order:       {}", money(aov));
    }
    if let Some(months) = report.tenure_months {
        println!("   Customer for:    {} months", months);
    }

    println!();
    match report.order_frequency_days {
        Some(days) => println!("   Orders every:    {} days", days),
        None => println!("   Orders every:    not enough orders"),
    }
    if let Some(last) = report.last_order_date {
        let since = report.days_since_last_order.unwrap_or(0);
        println!("   Last order:      {} ({} days ago)", last, since);
    }
    if let Some(next) = report.next_order_date {
        let overdue = if next < today { "  ⚠️  overdue" } else { "" };
        println!("   Next expected:   {}{}", next, overdue);
    }

    if !report.top_products.is_empty() {
        println!();
        println!("📦 Top Products");
        println!("   ─────────────────────────────────────────────────────────────");
        for q in &report.top_products {
            println!(
                "   {:10} {:36} {:>6} units",
                q.product.item_code,
                truncate(&q.product.description, 36),
                q.quantity
            );
        }
    }

    println!();
    println!("📅 Monthly Revenue");
    println!("   ─────────────────────────────");
    for (month, amount) in &report.monthly_revenue {
        println!("   {}  {:>12}", month, money(*amount));
    }

    let patterns = &report.buying_patterns;
    println!();
    println!(
        "🛒 Buying Patterns (last {} orders)",
        config.pattern_window
    );
    println!("   ─────────────────────────────────────────────────────────────");
    print_bucket("Always buys", &patterns.always_buys);
    print_bucket("Sometimes buys", &patterns.sometimes_buys);
    print_bucket("Not bought recently", &patterns.not_bought_recently);

    Ok(())
}

fn print_bucket(label: &str, products: &[Product]) {
    println!("   {} ({})", label, products.len());
    for p in products {
        println!("     {:10} {}", p.item_code, truncate(&p.description, 40));
    }
}
