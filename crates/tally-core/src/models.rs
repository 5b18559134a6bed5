//! Domain models for Tally

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::MonthKey;

/// Category reported for products without one
pub const UNCATEGORIZED: &str = "Uncategorized";

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

id_type!(
    /// Product identifier
    ProductId
);
id_type!(
    /// Customer identifier
    CustomerId
);
id_type!(
    /// Order identifier
    OrderId
);
id_type!(
    /// Order line identifier
    OrderItemId
);

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub item_code: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Price of a single unit
    pub unit_price: Decimal,
    #[serde(default)]
    pub units_per_case: Option<u32>,
    #[serde(default)]
    pub case_price: Option<Decimal>,
    /// Grade label printed on the order sheet
    #[serde(default)]
    pub grade: Option<String>,
    /// Container volume printed on the order sheet
    #[serde(default)]
    pub ml: Option<String>,
}

impl Product {
    /// Category name, falling back to "Uncategorized" when missing or blank
    pub fn category_name(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }
}

/// A customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(alias = "customer_name")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// An order placed by a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
}

/// A product line on an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
}

// ========== Report Models ==========

/// Revenue and volume totals over a set of orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerTotals {
    pub total_amount: Decimal,
    pub total_units: u64,
    pub order_count: usize,
}

impl CustomerTotals {
    /// Revenue per order, or None without orders
    pub fn average_order_value(&self) -> Option<Decimal> {
        if self.order_count == 0 {
            return None;
        }
        Some(self.total_amount / Decimal::from(self.order_count as u64))
    }
}

/// Units and revenue for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTotal {
    pub product: Product,
    pub units: u64,
    pub revenue: Decimal,
}

/// Total quantity ordered for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub product: Product,
    pub quantity: u64,
}

/// Revenue attributed to one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRevenue {
    pub customer_id: CustomerId,
    /// None when the customer record is not in the snapshot
    pub customer: Option<Customer>,
    pub revenue: Decimal,
    pub units: u64,
}

impl CustomerRevenue {
    pub fn display_name(&self) -> &str {
        self.customer
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown")
    }
}

/// Catalog partitioned by how often a customer bought each product recently
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuyingPatterns {
    /// Present in every order of the window
    pub always_buys: Vec<Product>,
    /// Present in some orders of the window
    pub sometimes_buys: Vec<Product>,
    /// Absent from the window
    pub not_bought_recently: Vec<Product>,
}

impl BuyingPatterns {
    pub fn is_empty(&self) -> bool {
        self.always_buys.is_empty()
            && self.sometimes_buys.is_empty()
            && self.not_bought_recently.is_empty()
    }
}

/// An order together with its computed total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order: Order,
    pub customer_name: Option<String>,
    pub total: Decimal,
}

/// Monthly revenue for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTrend {
    pub product_id: ProductId,
    pub item_code: String,
    pub monthly: BTreeMap<MonthKey, Decimal>,
}

/// Everything the customer analytics page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerReport {
    pub customer: Customer,
    pub totals: CustomerTotals,
    pub average_order_value: Option<Decimal>,
    /// Average gap between orders in days
    pub order_frequency_days: Option<u32>,
    pub next_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
    pub days_since_last_order: Option<i64>,
    /// Whole months from first order until today
    pub tenure_months: Option<u32>,
    pub top_products: Vec<ProductQuantity>,
    pub monthly_revenue: BTreeMap<MonthKey, Decimal>,
    pub buying_patterns: BuyingPatterns,
}

/// Business-wide dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub totals: CustomerTotals,
    pub customer_count: usize,
    pub active_customers: Vec<Customer>,
    pub top_customers: Vec<CustomerRevenue>,
    pub monthly_revenue: BTreeMap<MonthKey, Decimal>,
    pub top_products: Vec<ProductTotal>,
    pub recent_orders: Vec<OrderSummary>,
}

/// Product analytics page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReport {
    pub totals: Vec<ProductTotal>,
    pub monthly_revenue: BTreeMap<MonthKey, Decimal>,
    pub trends: Vec<ProductTrend>,
}
