//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (snapshot/config loading, date arguments)
//! - `customers` - Per-customer analytics
//! - `dashboard` - Business-wide dashboard
//! - `order_sheet` - Order sheet CSV export
//! - `products` - Product revenue and monthly trends

pub mod core;
pub mod customers;
pub mod dashboard;
pub mod order_sheet;
pub mod products;

// Re-export command functions for main.rs
pub use self::core::*;
pub use customers::*;
pub use dashboard::*;
pub use order_sheet::*;
pub use products::*;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::format_money;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount as dollars, rounded to cents
pub fn money(amount: Decimal) -> String {
    format!("${}", format_money(amount))
}

/// Print any report as pretty JSON
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
