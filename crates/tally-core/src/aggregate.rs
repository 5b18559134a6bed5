//! Grouping and summation helpers shared by the analytics modules
//!
//! Groups keep the order in which their keys were first seen, so results
//! that are later sorted with a stable sort break ties by input order.

use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;

/// Accumulates one value per key, remembering first-seen key order
#[derive(Debug)]
pub struct Accumulator<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Accumulator<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Value for `key`, inserting `init()` the first time the key is seen
    pub fn entry(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let pos = match self.index.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.clone(), pos);
                self.entries.push((key, init()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K, V> Default for Accumulator<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Group items by key; groups and their members keep input order
pub fn group_by<T, K, I, F>(items: I, key: F) -> Vec<(K, Vec<T>)>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut groups: Accumulator<K, Vec<T>> = Accumulator::new();
    for item in items {
        groups.entry(key(&item), Vec::new).push(item);
    }
    groups.into_entries()
}

/// Exact sum of decimal amounts
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, |acc, v| acc + v)
}

/// Sort descending by `metric`; equal metrics keep their relative order
pub fn sort_desc_by<T, M, F>(items: &mut [T], metric: F)
where
    M: Ord,
    F: Fn(&T) -> M,
{
    items.sort_by(|a, b| metric(b).cmp(&metric(a)));
}

/// Keep the first `limit` items
pub fn top_n<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_keeps_first_seen_order() {
        let mut acc: Accumulator<&str, u32> = Accumulator::new();
        for (k, v) in [("b", 1), ("a", 2), ("b", 3), ("c", 4)] {
            *acc.entry(k, || 0) += v;
        }
        assert_eq!(acc.len(), 3);
        assert_eq!(acc.get(&"b"), Some(&4));
        assert_eq!(acc.into_entries(), vec![("b", 4), ("a", 2), ("c", 4)]);
    }

    #[test]
    fn test_group_by() {
        let groups = group_by(vec![1, 2, 3, 4, 5, 6], |n| n % 3);
        assert_eq!(groups, vec![(1, vec![1, 4]), (2, vec![2, 5]), (0, vec![3, 6])]);
        assert!(group_by(Vec::<i32>::new(), |n| *n).is_empty());
    }

    #[test]
    fn test_sum_is_exact() {
        let tenth = Decimal::new(1, 1);
        let total = sum(std::iter::repeat(tenth).take(10));
        assert_eq!(total, Decimal::ONE);
        assert_eq!(sum(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_sort_desc_by_is_stable() {
        let mut items = vec![("a", 1), ("b", 3), ("c", 1), ("d", 3)];
        sort_desc_by(&mut items, |(_, n)| *n);
        assert_eq!(items, vec![("b", 3), ("d", 3), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn test_top_n() {
        assert_eq!(top_n(vec![1, 2, 3], 2), vec![1, 2]);
        assert_eq!(top_n(vec![1, 2, 3], 10), vec![1, 2, 3]);
        assert!(top_n(vec![1, 2, 3], 0).is_empty());
    }
}
