//! Revenue and unit totals from order item × product joins
//!
//! Items whose order or product cannot be resolved contribute nothing.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::aggregate::{self, Accumulator};
use crate::dates::MonthKey;
use crate::index::{ItemJoin, OrderIndex, ProductIndex, ProductLookup};
use crate::models::{CustomerTotals, Order, OrderId, OrderItem, Product, ProductId, ProductTotal};

/// `quantity × unit_price`
pub fn line_amount(quantity: u32, product: &Product) -> Decimal {
    Decimal::from(quantity) * product.unit_price
}

/// Round to cents, halves away from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Amount with exactly two decimals, rounded with [`round_money`]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

/// Total of one order's items
pub fn order_total(order_id: OrderId, items: &[OrderItem], products: &ProductIndex) -> Decimal {
    aggregate::sum(
        items
            .iter()
            .filter(|it| it.order_id == order_id)
            .filter_map(|it| match products.resolve(it) {
                ProductLookup::Found(p) => Some(line_amount(it.quantity, p)),
                ProductLookup::Missing(_) => None,
            }),
    )
}

/// Totals over every supplied item.
///
/// No customer filtering happens here: pass the orders and items of the
/// customer of interest (or everything for business-wide totals).
/// `order_count` is the number of orders even when they have no items.
pub fn customer_totals(
    orders: &[Order],
    items: &[OrderItem],
    products: &ProductIndex,
) -> CustomerTotals {
    let mut totals = CustomerTotals {
        order_count: orders.len(),
        ..Default::default()
    };

    for it in items {
        match products.resolve(it) {
            ProductLookup::Found(p) => {
                totals.total_amount += line_amount(it.quantity, p);
                totals.total_units += it.quantity as u64;
            }
            ProductLookup::Missing(_) => continue,
        }
    }

    totals
}

/// Units and revenue per product, highest revenue first.
///
/// Products without items are left out. Ties keep the order in which the
/// products first appear in `items`.
pub fn product_totals(items: &[OrderItem], products: &ProductIndex) -> Vec<ProductTotal> {
    let mut acc: Accumulator<ProductId, ProductTotal> = Accumulator::new();

    for it in items {
        let ProductLookup::Found(p) = products.resolve(it) else {
            continue;
        };
        let entry = acc.entry(p.id, || ProductTotal {
            product: p.clone(),
            units: 0,
            revenue: Decimal::ZERO,
        });
        entry.units += it.quantity as u64;
        entry.revenue += line_amount(it.quantity, p);
    }

    let mut totals: Vec<ProductTotal> = acc.into_entries().into_iter().map(|(_, t)| t).collect();
    aggregate::sort_desc_by(&mut totals, |t| t.revenue);
    totals
}

/// Revenue per YYYY-MM month of the owning order's date
pub fn monthly_revenue(
    orders: &OrderIndex,
    items: &[OrderItem],
    products: &ProductIndex,
) -> BTreeMap<MonthKey, Decimal> {
    bucket_by_month(orders, items.iter(), products)
}

/// Monthly revenue of a single product
pub fn product_monthly_revenue(
    product_id: ProductId,
    orders: &OrderIndex,
    items: &[OrderItem],
    products: &ProductIndex,
) -> BTreeMap<MonthKey, Decimal> {
    bucket_by_month(
        orders,
        items.iter().filter(|it| it.product_id == product_id),
        products,
    )
}

fn bucket_by_month<'i>(
    orders: &OrderIndex,
    items: impl Iterator<Item = &'i OrderItem>,
    products: &ProductIndex,
) -> BTreeMap<MonthKey, Decimal> {
    let mut buckets = BTreeMap::new();

    for it in items {
        match orders.join(it, products) {
            ItemJoin::Resolved { order, product } => {
                *buckets
                    .entry(MonthKey::from(order.order_date))
                    .or_insert(Decimal::ZERO) += line_amount(it.quantity, product);
            }
            ItemJoin::MissingOrder(_) | ItemJoin::MissingProduct(_) => continue,
        }
    }

    buckets
}
