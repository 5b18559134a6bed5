//! Order sheet export
//!
//! An order sheet is the full price list for a customer, grouped by product
//! category, with the quantity and line total of anything on the order
//! filled in. It renders to CSV with one header row per category.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate;
use crate::dates::format_date;
use crate::error::{Error, Result};
use crate::models::{Customer, OrderItem, Product, ProductId};
use crate::revenue::{format_money, line_amount};

const HEADER: [&str; 7] = [
    "Code",
    "Description",
    "Grade",
    "mL",
    "Unit Price",
    "Qty",
    "Total",
];

/// One product line on the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSheetRow {
    pub product_id: ProductId,
    pub item_code: String,
    pub description: String,
    pub grade: Option<String>,
    pub ml: Option<String>,
    pub unit_price: Decimal,
    /// None when the product is not on the order
    pub quantity: Option<u32>,
    pub total: Option<Decimal>,
}

/// Products of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSheetSection {
    pub category: String,
    pub rows: Vec<OrderSheetRow>,
}

/// A customer's order laid out over the whole catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSheet {
    pub customer: Customer,
    pub order_date: NaiveDate,
    pub sections: Vec<OrderSheetSection>,
}

impl OrderSheet {
    /// Lay out `catalog` by category in first-seen order.
    ///
    /// A product's quantity comes from the first item referencing it;
    /// zero quantities are left blank.
    pub fn build(
        customer: &Customer,
        catalog: &[Product],
        items: &[OrderItem],
        order_date: NaiveDate,
    ) -> Self {
        let mut quantities: HashMap<ProductId, u32> = HashMap::new();
        for it in items {
            quantities.entry(it.product_id).or_insert(it.quantity);
        }

        let sections = aggregate::group_by(catalog.iter(), |p| p.category_name().to_string())
            .into_iter()
            .map(|(category, products)| OrderSheetSection {
                category,
                rows: products
                    .into_iter()
                    .map(|p| {
                        let quantity = quantities.get(&p.id).copied().filter(|&q| q > 0);
                        OrderSheetRow {
                            product_id: p.id,
                            item_code: p.item_code.clone(),
                            description: p.description.clone(),
                            grade: p.grade.clone(),
                            ml: p.ml.clone(),
                            unit_price: p.unit_price,
                            quantity,
                            total: quantity.map(|q| line_amount(q, p)),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            customer: customer.clone(),
            order_date,
            sections,
        }
    }

    /// Sum of filled-in line totals
    pub fn grand_total(&self) -> Decimal {
        aggregate::sum(
            self.sections
                .iter()
                .flat_map(|s| &s.rows)
                .filter_map(|r| r.total),
        )
    }

    /// Rows with a quantity
    pub fn ordered_lines(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.rows)
            .filter(|r| r.quantity.is_some())
            .count()
    }

    /// Suggested file name: Order-{customer}-{YYYY-MM-DD}.csv
    ///
    /// Path separators in the customer name become `-` so the name stays a
    /// single path component.
    pub fn file_name(&self) -> String {
        format!(
            "Order-{}-{}.csv",
            self.customer.name.replace(['/', '\\'], "-"),
            format_date(self.order_date)
        )
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);

        wtr.write_record(HEADER)?;
        for section in &self.sections {
            wtr.write_record([section.category.as_str(), "", "", "", "", "", ""])?;
            for row in &section.rows {
                wtr.write_record([
                    row.item_code.clone(),
                    row.description.clone(),
                    row.grade.clone().unwrap_or_default(),
                    row.ml.clone().unwrap_or_default(),
                    format_money(row.unit_price),
                    row.quantity.map(|q| q.to_string()).unwrap_or_default(),
                    row.total.map(format_money).unwrap_or_default(),
                ])?;
            }
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("Order sheet: {}", e)))
    }
}
