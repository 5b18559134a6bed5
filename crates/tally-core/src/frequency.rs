//! Order frequency and next-order prediction
//!
//! Everything here works on an [`OrderHistory`], which is always in
//! ascending date order, so no function has to trust its caller's sort.

use chrono::NaiveDate;

use crate::dates;
use crate::models::{CustomerId, Order};

/// A customer's orders, oldest first
#[derive(Debug, Clone, Default)]
pub struct OrderHistory<'a> {
    orders: Vec<&'a Order>,
}

impl<'a> OrderHistory<'a> {
    /// Sorts by date; orders on the same date keep their supplied order
    pub fn new(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut orders: Vec<&'a Order> = orders.into_iter().collect();
        orders.sort_by_key(|o| o.order_date);
        Self { orders }
    }

    /// Orders in `orders` placed by `customer_id`
    pub fn for_customer(orders: &'a [Order], customer_id: CustomerId) -> Self {
        Self::new(orders.iter().filter(|o| o.customer_id == customer_id))
    }

    pub fn orders(&self) -> &[&'a Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn first(&self) -> Option<&'a Order> {
        self.orders.first().copied()
    }

    pub fn last(&self) -> Option<&'a Order> {
        self.orders.last().copied()
    }

    /// The most recent `n` orders (all of them if there are fewer)
    pub fn last_n(&self, n: usize) -> &[&'a Order] {
        let start = self.orders.len().saturating_sub(n);
        &self.orders[start..]
    }
}

/// Day gaps between consecutive orders
pub fn order_gaps(history: &OrderHistory) -> Vec<u64> {
    history
        .orders()
        .windows(2)
        .map(|pair| dates::days_between(pair[0].order_date, pair[1].order_date))
        .collect()
}

/// Average days between orders, rounded half away from zero.
///
/// None with fewer than two orders, and None when the average rounds to
/// zero days (e.g. every order on the same date): a zero gap carries no
/// signal for prediction.
pub fn order_frequency(history: &OrderHistory) -> Option<u32> {
    let gaps = order_gaps(history);
    if gaps.is_empty() {
        return None;
    }

    let n = gaps.len() as u64;
    let total: u64 = gaps.iter().sum();
    let rounded = (2 * total + n) / (2 * n);

    match u32::try_from(rounded) {
        Ok(0) | Err(_) => None,
        Ok(days) => Some(days),
    }
}

/// Expected date of the next order: last order date + average gap
pub fn next_order_prediction(history: &OrderHistory) -> Option<NaiveDate> {
    let gap = order_frequency(history)?;
    let last = history.last()?;
    dates::add_days(last.order_date, gap)
}

/// Days from the most recent order to `today` (negative for future-dated orders)
pub fn days_since_last_order(history: &OrderHistory, today: NaiveDate) -> Option<i64> {
    history
        .last()
        .map(|last| (today - last.order_date).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderId;
    use std::str::FromStr;

    fn order(id: i64, date: &str) -> Order {
        Order {
            id: OrderId(id),
            customer_id: CustomerId(1),
            order_date: NaiveDate::from_str(date).unwrap(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_frequency_needs_two_orders() {
        let none: Vec<Order> = vec![];
        assert_eq!(order_frequency(&OrderHistory::new(&none)), None);

        let one = vec![order(1, "2024-01-01")];
        assert_eq!(order_frequency(&OrderHistory::new(&one)), None);
        assert_eq!(next_order_prediction(&OrderHistory::new(&one)), None);
    }

    #[test]
    fn test_even_ten_day_cadence() {
        let orders = vec![
            order(1, "2024-01-01"),
            order(2, "2024-01-11"),
            order(3, "2024-01-21"),
        ];
        let history = OrderHistory::new(&orders);
        assert_eq!(order_frequency(&history), Some(10));
        assert_eq!(next_order_prediction(&history), Some(date("2024-01-31")));
    }

    #[test]
    fn test_same_day_orders_have_no_frequency() {
        let orders = vec![
            order(1, "2024-05-05"),
            order(2, "2024-05-05"),
            order(3, "2024-05-05"),
        ];
        let history = OrderHistory::new(&orders);
        assert_eq!(order_gaps(&history), vec![0, 0]);
        assert_eq!(order_frequency(&history), None);
        assert_eq!(next_order_prediction(&history), None);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let orders = vec![
            order(3, "2024-01-21"),
            order(1, "2024-01-01"),
            order(2, "2024-01-11"),
        ];
        let history = OrderHistory::new(&orders);
        assert_eq!(history.first().unwrap().id, OrderId(1));
        assert_eq!(history.last().unwrap().id, OrderId(3));
        assert_eq!(order_frequency(&history), Some(10));
        assert_eq!(next_order_prediction(&history), Some(date("2024-01-31")));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // gaps 1 and 2 -> 1.5 -> 2
        let orders = vec![
            order(1, "2024-01-01"),
            order(2, "2024-01-02"),
            order(3, "2024-01-04"),
        ];
        assert_eq!(order_frequency(&OrderHistory::new(&orders)), Some(2));

        // gaps 1, 1, 1, 2 -> 1.25 -> 1
        let orders = vec![
            order(1, "2024-01-01"),
            order(2, "2024-01-02"),
            order(3, "2024-01-03"),
            order(4, "2024-01-04"),
            order(5, "2024-01-06"),
        ];
        assert_eq!(order_frequency(&OrderHistory::new(&orders)), Some(1));

        // gaps 0 and 1 -> 0.5 -> 1, still a signal
        let orders = vec![
            order(1, "2024-01-01"),
            order(2, "2024-01-01"),
            order(3, "2024-01-02"),
        ];
        assert_eq!(order_frequency(&OrderHistory::new(&orders)), Some(1));
    }

    #[test]
    fn test_same_date_keeps_supplied_order() {
        let orders = vec![order(7, "2024-02-01"), order(5, "2024-02-01")];
        let history = OrderHistory::new(&orders);
        let ids: Vec<OrderId> = history.orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(7), OrderId(5)]);
    }

    #[test]
    fn test_last_n() {
        let orders: Vec<Order> = (1..=5)
            .map(|i| order(i, &format!("2024-01-0{}", i)))
            .collect();
        let history = OrderHistory::new(&orders);
        let ids: Vec<i64> = history.last_n(3).iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(history.last_n(10).len(), 5);
        assert!(history.last_n(0).is_empty());
    }

    #[test]
    fn test_for_customer_filters() {
        let mut orders = vec![order(1, "2024-01-10"), order(2, "2024-01-01")];
        orders.push(Order {
            id: OrderId(3),
            customer_id: CustomerId(2),
            order_date: date("2024-01-05"),
        });
        let history = OrderHistory::for_customer(&orders, CustomerId(1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.first().unwrap().id, OrderId(2));
    }

    #[test]
    fn test_days_since_last_order() {
        let orders = vec![order(1, "2024-01-01"), order(2, "2024-03-01")];
        let history = OrderHistory::new(&orders);
        assert_eq!(days_since_last_order(&history, date("2024-03-11")), Some(10));
        assert_eq!(
            days_since_last_order(&OrderHistory::default(), date("2024-03-11")),
            None
        );
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let orders = vec![order(1, "2024-01-01"), order(2, "2024-01-15")];
        let history = OrderHistory::new(&orders);
        assert_eq!(
            next_order_prediction(&history),
            next_order_prediction(&history)
        );
        assert_eq!(history.len(), 2);
    }
}
