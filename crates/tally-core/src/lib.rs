//! Tally Core Library
//!
//! Customer analytics for a small order-management dashboard:
//! - Snapshot loading from JSON or CSV
//! - Revenue and unit totals over order item joins
//! - Order frequency and next-order prediction
//! - Buying-pattern classification over recent orders
//! - Product and customer rankings
//! - Order sheet export
//! - Analytics configuration with embedded defaults

pub mod aggregate;
pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod export;
pub mod frequency;
pub mod index;
pub mod models;
pub mod patterns;
pub mod ranking;
pub mod revenue;
pub mod snapshot;

pub use config::AnalyticsConfig;
pub use dates::MonthKey;
pub use engine::Analytics;
pub use error::{Error, Result};
pub use export::OrderSheet;
pub use frequency::OrderHistory;
pub use index::{CustomerIndex, ItemJoin, OrderIndex, ProductIndex, ProductLookup};
pub use models::*;
pub use revenue::format_money;
pub use snapshot::Snapshot;
