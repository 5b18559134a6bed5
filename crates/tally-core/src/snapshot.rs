//! Loading record snapshots from JSON or CSV
//!
//! A snapshot is everything the engine reads: products, customers, orders
//! and order items. It can come from a single JSON document or from a
//! directory of CSV files with header rows:
//!
//! - `products.csv`: id,item_code,description,category,unit_price,units_per_case,case_price,grade,ml
//! - `customers.csv`: id,name,email,phone,address,postal_code
//! - `orders.csv`: id,customer_id,order_date
//! - `order_items.csv`: id,order_id,product_id,quantity
//!
//! Only malformed input is an error. Dangling references between records
//! load fine and are skipped by the analytics.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Customer, CustomerId, Order, OrderId, OrderItem, Product};

pub const PRODUCTS_FILE: &str = "products.csv";
pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const ORDERS_FILE: &str = "orders.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items.csv";

/// An in-memory copy of all records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default, alias = "items")]
    pub order_items: Vec<OrderItem>,
}

impl Snapshot {
    /// Load from a CSV directory or a JSON file, depending on what `path` is
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_csv_dir(path)
        } else {
            Self::load_json(path)
        }
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let snapshot = Self::from_json_reader(file)?;
        snapshot.log_loaded(path);
        Ok(snapshot)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load the four CSV files in `dir`; a missing file is an empty table
    pub fn load_csv_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::NotFound(format!(
                "Snapshot directory {}",
                dir.display()
            )));
        }

        let snapshot = Self {
            products: read_csv_file(&dir.join(PRODUCTS_FILE))?,
            customers: read_csv_file(&dir.join(CUSTOMERS_FILE))?,
            orders: read_csv_file(&dir.join(ORDERS_FILE))?,
            order_items: read_csv_file(&dir.join(ORDER_ITEMS_FILE))?,
        };
        snapshot.log_loaded(dir);
        Ok(snapshot)
    }

    /// Orders placed by one customer, in snapshot order
    pub fn orders_for_customer(&self, id: CustomerId) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.customer_id == id)
            .copied()
            .collect()
    }

    /// Items belonging to any of `orders`
    pub fn items_for_orders(&self, orders: &[Order]) -> Vec<OrderItem> {
        let ids: HashSet<OrderId> = orders.iter().map(|o| o.id).collect();
        self.order_items
            .iter()
            .filter(|it| ids.contains(&it.order_id))
            .copied()
            .collect()
    }

    fn log_loaded(&self, source: &Path) {
        info!(
            "Loaded snapshot from {}: {} products, {} customers, {} orders, {} items",
            source.display(),
            self.products.len(),
            self.customers.len(),
            self.orders.len(),
            self.order_items.len()
        );
    }
}

/// Parse CSV records with a header row
pub fn parse_csv<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

fn read_csv_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        debug!("{} not found, treating as empty", path.display());
        return Ok(Vec::new());
    }
    parse_csv(File::open(path)?)
}
