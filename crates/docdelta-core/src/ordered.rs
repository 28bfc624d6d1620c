//! Keyed collections with a deterministic ascending traversal.
//!
//! [`OrderedSet`] is the only ordering guarantee the batch builder relies
//! on: documents keyed by id and fields keyed by name are both stored here,
//! and both feed [`merge_by`](crate::merge::merge_by) through [`merge_ordered`].

use std::collections::btree_map::{self, BTreeMap};

use crate::merge::{merge_by, Merged};

/// A value that carries its own string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Replace-on-insert collection iterated in ascending key order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedSet<V: Keyed> {
    entries: BTreeMap<String, V>,
}

impl<V: Keyed> OrderedSet<V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert `value`, returning the entry it replaced under the same key.
    pub fn add(&mut self, value: V) -> Option<V> {
        self.entries.insert(value.key().to_string(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key)
    }

    /// Values in strictly ascending key order. Every call starts afresh.
    pub fn iter(&self) -> btree_map::Values<'_, String, V> {
        self.entries.values()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, V> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<V: Keyed> Default for OrderedSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Keyed> FromIterator<V> for OrderedSet<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<V: Keyed> Extend<V> for OrderedSet<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, V: Keyed> IntoIterator for &'a OrderedSet<V> {
    type Item = &'a V;
    type IntoIter = btree_map::Values<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Merge two ordered sets by key.
pub fn merge_ordered<'a, V: Keyed>(
    left: &'a OrderedSet<V>,
    right: &'a OrderedSet<V>,
) -> impl Iterator<Item = Merged<&'a V>> + 'a {
    merge_by(left.iter(), right.iter(), |l: &&V, r: &&V| l.key().cmp(r.key()))
}
