//! Product analytics command

use std::collections::BTreeMap;

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tally_core::{Analytics, AnalyticsConfig, MonthKey, Snapshot};

use super::{money, print_json, truncate};

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn cmd_products(snapshot: &Snapshot, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let analytics = Analytics::with_config(snapshot, config.clone());
    let report = analytics.product_report();

    if json {
        return print_json(&report);
    }

    println!();
    println!("📦 Products");
    println!("   ─────────────────────────────────────────────────────────────");

    if report.totals.is_empty() {
        println!("   No products ordered yet.");
        return Ok(());
    }

    let months: Vec<MonthKey> = report.monthly_revenue.keys().copied().collect();
    if let (Some(first), Some(last)) = (months.first(), months.last()) {
        println!("   Trend: {} to {}", first, last);
    }
    println!();
    println!(
        "   {:10} │ {:28} │ {:>7} │ {:>12} │ Trend",
        "Code", "Description", "Units", "Revenue"
    );
    println!("   ───────────┼──────────────────────────────┼─────────┼──────────────┼──────");

    for (total, trend) in report.totals.iter().zip(&report.trends) {
        println!(
            "   {:10} │ {:28} │ {:>7} │ {:>12} │ {}",
            truncate(&total.product.item_code, 10),
            truncate(&total.product.description, 28),
            total.units,
            money(total.revenue),
            sparkline(&months, &trend.monthly)
        );
    }

    Ok(())
}

/// One bar per month in `months`, scaled to the largest month; gaps are the lowest bar
pub fn sparkline(months: &[MonthKey], monthly: &BTreeMap<MonthKey, Decimal>) -> String {
    let values: Vec<Decimal> = months
        .iter()
        .map(|m| monthly.get(m).copied().unwrap_or(Decimal::ZERO))
        .collect();
    let max = values.iter().copied().max().unwrap_or(Decimal::ZERO);
    let top = SPARK_BARS.len() - 1;

    values
        .iter()
        .map(|v| {
            if max <= Decimal::ZERO {
                return SPARK_BARS[0];
            }
            let level = (*v * Decimal::from(top) / max)
                .round()
                .to_usize()
                .unwrap_or(0);
            SPARK_BARS[level.min(top)]
        })
        .collect()
}
