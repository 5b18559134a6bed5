//! Top-N rankings of products and customers

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::aggregate::{self, Accumulator};
use crate::index::{CustomerIndex, ItemJoin, OrderIndex, ProductIndex, ProductLookup};
use crate::models::{
    Customer, CustomerId, CustomerRevenue, Order, OrderItem, ProductId, ProductQuantity,
};
use crate::revenue::line_amount;

/// Products by total quantity ordered, largest first, at most `limit`.
///
/// Ranks by units where [`crate::revenue::product_totals`] ranks by revenue.
/// Items for unknown products are left out of both.
pub fn top_products(
    items: &[OrderItem],
    products: &ProductIndex,
    limit: usize,
) -> Vec<ProductQuantity> {
    let mut acc: Accumulator<ProductId, ProductQuantity> = Accumulator::new();

    for it in items {
        let ProductLookup::Found(p) = products.resolve(it) else {
            continue;
        };
        acc.entry(p.id, || ProductQuantity {
            product: p.clone(),
            quantity: 0,
        })
        .quantity += it.quantity as u64;
    }

    let mut ranked: Vec<ProductQuantity> = acc.into_entries().into_iter().map(|(_, q)| q).collect();
    aggregate::sort_desc_by(&mut ranked, |q| q.quantity);
    aggregate::top_n(ranked, limit)
}

/// Revenue per customer of the owning order, highest first
pub fn top_customers(
    orders: &OrderIndex,
    items: &[OrderItem],
    products: &ProductIndex,
    customers: &CustomerIndex,
) -> Vec<CustomerRevenue> {
    let mut acc: Accumulator<CustomerId, (Decimal, u64)> = Accumulator::new();

    for it in items {
        let ItemJoin::Resolved { order, product } = orders.join(it, products) else {
            continue;
        };
        let entry = acc.entry(order.customer_id, || (Decimal::ZERO, 0));
        entry.0 += line_amount(it.quantity, product);
        entry.1 += it.quantity as u64;
    }

    let mut ranked: Vec<CustomerRevenue> = acc
        .into_entries()
        .into_iter()
        .map(|(customer_id, (revenue, units))| CustomerRevenue {
            customer_id,
            customer: customers.get(customer_id).cloned(),
            revenue,
            units,
        })
        .collect();
    aggregate::sort_desc_by(&mut ranked, |c| c.revenue);
    ranked
}

/// Most recent orders first, at most `limit`
pub fn recent_orders(orders: &[Order], limit: usize) -> Vec<&Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    aggregate::sort_desc_by(&mut sorted, |o| o.order_date);
    aggregate::top_n(sorted, limit)
}

/// Customers whose latest order is at most `window_days` before `today`,
/// in customer order
pub fn active_customers(
    orders: &[Order],
    customers: &[Customer],
    today: NaiveDate,
    window_days: i64,
) -> Vec<Customer> {
    let mut latest: Accumulator<CustomerId, NaiveDate> = Accumulator::new();
    for o in orders {
        let last = latest.entry(o.customer_id, || o.order_date);
        if o.order_date > *last {
            *last = o.order_date;
        }
    }

    customers
        .iter()
        .filter(|c| {
            latest
                .get(&c.id)
                .is_some_and(|&last| (today - last).num_days() <= window_days)
        })
        .cloned()
        .collect()
}
