use crate::errors::{ContainerError, Result};
use std::collections::HashMap;

/// Key-unique associative store that remembers insertion order
///
/// Overwriting a key keeps its original position; removing a key
/// shifts every later key back by one.
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> OrderedMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert or overwrite the value stored under `key`, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &str) -> Result<&V> {
        self.index
            .get(key)
            .map(|&position| &self.entries[position].1)
            .ok_or_else(|| ContainerError::unknown_key(key))
    }

    /// Get a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V> {
        match self.index.get(key) {
            Some(&position) => Ok(&mut self.entries[position].1),
            None => Err(ContainerError::unknown_key(key)),
        }
    }

    /// Check if `key` is present
    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: &str) -> Result<V> {
        let position = self
            .index
            .remove(key)
            .ok_or_else(|| ContainerError::unknown_key(key))?;
        let (_, value) = self.entries.remove(position);
        for (shifted, _) in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut(shifted) {
                *slot -= 1;
            }
        }
        Ok(value)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
