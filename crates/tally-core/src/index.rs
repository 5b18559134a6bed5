//! Lookup indexes for joining order items to orders and products
//!
//! Built once per snapshot so aggregation is a single pass over items.
//! A dangling foreign key is a normal outcome here: it surfaces as an
//! explicit variant and the caller decides to skip it.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Customer, CustomerId, Order, OrderId, OrderItem, Product, ProductId};

/// Products by id, plus the catalog in input order
#[derive(Debug, Clone)]
pub struct ProductIndex<'a> {
    catalog: &'a [Product],
    by_id: HashMap<ProductId, &'a Product>,
}

impl<'a> ProductIndex<'a> {
    /// Later duplicates of an id replace earlier ones
    pub fn new(catalog: &'a [Product]) -> Self {
        let by_id = catalog.iter().map(|p| (p.id, p)).collect();
        Self { catalog, by_id }
    }

    pub fn get(&self, id: ProductId) -> Option<&'a Product> {
        self.by_id.get(&id).copied()
    }

    /// Resolve the product an item refers to
    pub fn resolve(&self, item: &OrderItem) -> ProductLookup<'a> {
        match self.get(item.product_id) {
            Some(product) => ProductLookup::Found(product),
            None => {
                debug!(
                    "Order item {} references unknown product {}",
                    item.id, item.product_id
                );
                ProductLookup::Missing(item.product_id)
            }
        }
    }

    pub fn catalog(&self) -> &'a [Product] {
        self.catalog
    }
}

/// Orders by id
#[derive(Debug, Clone)]
pub struct OrderIndex<'a> {
    by_id: HashMap<OrderId, &'a Order>,
}

impl<'a> OrderIndex<'a> {
    pub fn new(orders: &'a [Order]) -> Self {
        let by_id = orders.iter().map(|o| (o.id, o)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: OrderId) -> Option<&'a Order> {
        self.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Resolve both sides of an item
    pub fn join(&self, item: &OrderItem, products: &ProductIndex<'a>) -> ItemJoin<'a> {
        let Some(order) = self.get(item.order_id) else {
            debug!(
                "Order item {} references unknown order {}",
                item.id, item.order_id
            );
            return ItemJoin::MissingOrder(item.order_id);
        };
        match products.resolve(item) {
            ProductLookup::Found(product) => ItemJoin::Resolved { order, product },
            ProductLookup::Missing(id) => ItemJoin::MissingProduct(id),
        }
    }
}

/// Customers by id
#[derive(Debug, Clone)]
pub struct CustomerIndex<'a> {
    by_id: HashMap<CustomerId, &'a Customer>,
}

impl<'a> CustomerIndex<'a> {
    /// Later duplicates of an id replace earlier ones
    pub fn new(customers: &'a [Customer]) -> Self {
        let by_id = customers.iter().map(|c| (c.id, c)).collect();
        Self { by_id }
    }

    pub fn get(&self, id: CustomerId) -> Option<&'a Customer> {
        self.by_id.get(&id).copied()
    }
}

/// Result of looking up an item's product
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductLookup<'a> {
    Found(&'a Product),
    Missing(ProductId),
}

/// Result of joining an item to its order and product
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemJoin<'a> {
    Resolved {
        order: &'a Order,
        product: &'a Product,
    },
    MissingOrder(OrderId),
    MissingProduct(ProductId),
}
