use alloc::vec::Vec;

use super::Value;

/// Backing storage of an allocated map.
///
/// Keys are compared with `==`, so any value can be a key. Lookups scan the
/// entries, so they cost O(n), and filling a map one key at a time costs
/// O(n²). Iteration order is not part of the contract.
#[derive(Clone, Debug, Default)]
pub struct MapStorage {
    entries: Vec<(Value, Value)>,
}

impl MapStorage {
    /// An allocated, empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocated, empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries the map can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns true if there is an entry for `key`
    pub fn contains_key(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    /// Returns the value stored for `key`
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Stores `value` for `key`, returning the value it replaces
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.position(&key) {
            Some(i) => Some(core::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes the entry for `key`, returning its value
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let i = self.position(key)?;
        Some(self.entries.swap_remove(i).1)
    }

    /// Iterates over the entries
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over the entries, with mutable values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Value, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl PartialEq for MapStorage {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}
