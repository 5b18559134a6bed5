//! Dashboard command

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::{Analytics, AnalyticsConfig, Snapshot};

use super::{money, print_json, truncate};

pub fn cmd_dashboard(
    snapshot: &Snapshot,
    config: &AnalyticsConfig,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let analytics = Analytics::with_config(snapshot, config.clone());
    let report = analytics.dashboard(today);

    if json {
        return print_json(&report);
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           📦 Tally Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  As of:           {}", today);
    println!("  Customers:       {}", report.customer_count);
    println!(
        "  Active:          {} (ordered in the last {} days)",
        report.active_customers.len(),
        config.active_days
    );
    println!("  Orders:          {}", report.totals.order_count);
    println!("  Units sold:      {}", report.totals.total_units);
    println!("  Revenue:         {}", money(report.totals.total_amount));
    if let Some(aov) = report.totals.average_order_value() {
        println!("  Avg order:       {}", money(aov));
    }

    if report.totals.order_count == 0 {
        println!();
        println!("  No orders yet.");
        return Ok(());
    }

    println!();
    println!("🏆 Top Customers");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:30} │ {:>12} │ {:>8}", "Customer", "Revenue", "Units");
    println!("   ───────────────────────────────┼──────────────┼──────────");
    for c in &report.top_customers {
        println!(
            "   {:30} │ {:>12} │ {:>8}",
            truncate(c.display_name(), 30),
            money(c.revenue),
            c.units
        );
    }

    println!();
    println!("📦 Top Products");
    println!("   ─────────────────────────────────────────────────────────────");
    for t in &report.top_products {
        println!(
            "   {:10} {:28} {:>12}  ({} units)",
            t.product.item_code,
            truncate(&t.product.description, 28),
            money(t.revenue),
            t.units
        );
    }

    println!();
    println!("📅 Monthly Revenue");
    println!("   ─────────────────────────────");
    for (month, amount) in &report.monthly_revenue {
        println!("   {}  {:>12}", month, money(*amount));
    }

    println!();
    println!("🕒 Recent Orders");
    println!("   ─────────────────────────────────────────────────────────────");
    for summary in &report.recent_orders {
        println!(
            "   #{:<6} {}  {:30} {:>12}",
            summary.order.id,
            summary.order.order_date,
            truncate(summary.customer_name.as_deref().unwrap_or("Unknown"), 30),
            money(summary.total)
        );
    }

    Ok(())
}
