//! Report assembly over a loaded snapshot
//!
//! [`Analytics`] builds its lookup indexes once and composes the
//! revenue, frequency, pattern and ranking functions into the three reports
//! the dashboard shows.

use chrono::NaiveDate;
use tracing::debug;

use crate::aggregate;
use crate::config::AnalyticsConfig;
use crate::dates;
use crate::error::{Error, Result};
use crate::frequency::{self, OrderHistory};
use crate::index::{CustomerIndex, OrderIndex, ProductIndex};
use crate::models::{
    CustomerId, CustomerReport, DashboardReport, OrderItem, OrderSummary, ProductReport,
    ProductTrend,
};
use crate::patterns::classify_buying_patterns;
use crate::ranking;
use crate::revenue;
use crate::snapshot::Snapshot;

pub struct Analytics<'a> {
    snapshot: &'a Snapshot,
    products: ProductIndex<'a>,
    orders: OrderIndex<'a>,
    customers: CustomerIndex<'a>,
    config: AnalyticsConfig,
}

impl<'a> Analytics<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self::with_config(snapshot, AnalyticsConfig::default())
    }

    pub fn with_config(snapshot: &'a Snapshot, config: AnalyticsConfig) -> Self {
        Self {
            snapshot,
            products: ProductIndex::new(&snapshot.products),
            orders: OrderIndex::new(&snapshot.orders),
            customers: CustomerIndex::new(&snapshot.customers),
            config,
        }
    }

    /// Analytics for one customer as of `today`
    pub fn customer_report(
        &self,
        customer_id: CustomerId,
        today: NaiveDate,
    ) -> Result<CustomerReport> {
        let customer = self
            .customers
            .get(customer_id)
            .ok_or_else(|| Error::NotFound(format!("Customer {}", customer_id)))?;

        let orders = self.snapshot.orders_for_customer(customer_id);
        let items = self.snapshot.items_for_orders(&orders);
        let history = OrderHistory::new(&orders);
        let own_orders = OrderIndex::new(&orders);

        let totals = revenue::customer_totals(&orders, &items, &self.products);
        let last_order_date = history.last().map(|o| o.order_date);
        let tenure_months = history
            .first()
            .map(|first| dates::months_between(first.order_date, today));

        debug!(
            "Customer {}: {} orders, {} items, total {}",
            customer_id,
            orders.len(),
            items.len(),
            totals.total_amount
        );

        Ok(CustomerReport {
            customer: customer.clone(),
            totals,
            average_order_value: totals.average_order_value(),
            order_frequency_days: frequency::order_frequency(&history),
            next_order_date: frequency::next_order_prediction(&history),
            last_order_date,
            days_since_last_order: frequency::days_since_last_order(&history, today),
            tenure_months,
            top_products: ranking::top_products(&items, &self.products, self.config.top_products),
            monthly_revenue: revenue::monthly_revenue(&own_orders, &items, &self.products),
            buying_patterns: classify_buying_patterns(
                &history,
                &items,
                &self.products,
                self.config.pattern_window,
            ),
        })
    }

    /// Business-wide dashboard as of `today`
    pub fn dashboard(&self, today: NaiveDate) -> DashboardReport {
        let snapshot = self.snapshot;
        // Items of unknown orders belong to no customer
        let placed: Vec<OrderItem> = snapshot
            .order_items
            .iter()
            .filter(|it| self.orders.contains(it.order_id))
            .copied()
            .collect();
        let items = &placed;

        let totals = revenue::customer_totals(&snapshot.orders, items, &self.products);
        let active_customers = ranking::active_customers(
            &snapshot.orders,
            &snapshot.customers,
            today,
            self.config.active_days,
        );
        let top_customers = aggregate::top_n(
            ranking::top_customers(&self.orders, items, &self.products, &self.customers),
            self.config.top_customers,
        );
        let top_products = aggregate::top_n(
            revenue::product_totals(items, &self.products),
            self.config.top_products,
        );

        let recent_orders = ranking::recent_orders(&snapshot.orders, self.config.recent_orders)
            .into_iter()
            .map(|order| OrderSummary {
                order: *order,
                customer_name: self
                    .customers
                    .get(order.customer_id)
                    .map(|c| c.name.clone()),
                total: revenue::order_total(order.id, items, &self.products),
            })
            .collect();

        debug!(
            "Dashboard: {} orders, {} of {} customers active",
            totals.order_count,
            active_customers.len(),
            snapshot.customers.len()
        );

        DashboardReport {
            totals,
            customer_count: snapshot.customers.len(),
            active_customers,
            top_customers,
            monthly_revenue: revenue::monthly_revenue(&self.orders, items, &self.products),
            top_products,
            recent_orders,
        }
    }

    /// Per-product totals and monthly trends
    pub fn product_report(&self) -> ProductReport {
        let items = &self.snapshot.order_items;
        let totals = revenue::product_totals(items, &self.products);

        let trends = totals
            .iter()
            .map(|t| ProductTrend {
                product_id: t.product.id,
                item_code: t.product.item_code.clone(),
                monthly: revenue::product_monthly_revenue(
                    t.product.id,
                    &self.orders,
                    items,
                    &self.products,
                ),
            })
            .collect();

        ProductReport {
            monthly_revenue: revenue::monthly_revenue(&self.orders, items, &self.products),
            totals,
            trends,
        }
    }
}
