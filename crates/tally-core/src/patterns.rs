//! Buying-pattern classification over a customer's most recent orders

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::frequency::OrderHistory;
use crate::index::ProductIndex;
use crate::models::{BuyingPatterns, OrderId, OrderItem, ProductId};

/// Number of recent orders examined by default
pub const DEFAULT_PATTERN_WINDOW: usize = 3;

/// Classify every catalog product by how many of the last `window_size`
/// orders contain it.
///
/// A product counts once per order no matter how many lines or units it
/// has there. Only a count equal to `window_size` is "always": with a window
/// of 3, a customer who has placed only 2 orders lands in "sometimes" even
/// for products present in both. Each bucket keeps catalog order.
///
/// With no orders (or a zero window) all buckets are empty.
pub fn classify_buying_patterns(
    history: &OrderHistory,
    items: &[OrderItem],
    products: &ProductIndex,
    window_size: usize,
) -> BuyingPatterns {
    if history.is_empty() || window_size == 0 {
        return BuyingPatterns::default();
    }

    let window: HashSet<OrderId> = history.last_n(window_size).iter().map(|o| o.id).collect();

    let seen: HashSet<(OrderId, ProductId)> = items
        .iter()
        .filter(|it| window.contains(&it.order_id))
        .map(|it| (it.order_id, it.product_id))
        .collect();

    let mut counts: HashMap<ProductId, usize> = HashMap::new();
    for (_, product_id) in seen {
        *counts.entry(product_id).or_insert(0) += 1;
    }

    let mut patterns = BuyingPatterns::default();
    for product in products.catalog() {
        match counts.get(&product.id).copied().unwrap_or(0) {
            0 => patterns.not_bought_recently.push(product.clone()),
            n if n == window_size => patterns.always_buys.push(product.clone()),
            _ => patterns.sometimes_buys.push(product.clone()),
        }
    }

    debug!(
        "Buying patterns over {} orders: {} always, {} sometimes, {} not recently",
        window.len(),
        patterns.always_buys.len(),
        patterns.sometimes_buys.len(),
        patterns.not_bought_recently.len()
    );

    patterns
}
