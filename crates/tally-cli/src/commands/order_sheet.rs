//! Order sheet export command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tally_core::{CustomerId, CustomerIndex, Order, OrderHistory, OrderSheet, Snapshot};
use tracing::debug;

/// Export the customer's order placed on `date` (their latest order by
/// default) laid out over the full catalog.
///
/// `output` may be a file or a directory; in a directory the sheet is saved
/// under its suggested file name. Without `output` the CSV goes to stdout.
pub fn cmd_order_sheet(
    snapshot: &Snapshot,
    customer_id: CustomerId,
    date: Option<NaiveDate>,
    output: Option<&Path>,
) -> Result<()> {
    let customer = CustomerIndex::new(&snapshot.customers)
        .get(customer_id)
        .with_context(|| format!("Customer {} not found", customer_id))?;

    let orders = snapshot.orders_for_customer(customer_id);
    let order_date = match date {
        Some(d) => d,
        None => OrderHistory::new(&orders)
            .last()
            .map(|o| o.order_date)
            .unwrap_or_else(|| Utc::now().date_naive()),
    };

    let on_date: Vec<Order> = orders
        .into_iter()
        .filter(|o| o.order_date == order_date)
        .collect();
    if on_date.is_empty() {
        debug!(
            "Customer {} has no order on {}, exporting a blank sheet",
            customer_id, order_date
        );
    }
    let items = snapshot.items_for_orders(&on_date);

    let sheet = OrderSheet::build(customer, &snapshot.products, &items, order_date);

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(sheet.file_name())
            } else {
                path.to_path_buf()
            };
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            sheet.write_csv(file)?;

            println!(
                "✅ Exported order sheet ({} lines, total {}) to {}",
                sheet.ordered_lines(),
                super::money(sheet.grand_total()),
                path.display()
            );
        }
        None => {
            // Write to stdout
            print!("{}", sheet.to_csv()?);
        }
    }

    Ok(())
}
