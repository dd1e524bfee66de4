//! Keyed store of tagged values plus an owned integer buffer.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::buffer::IntBuffer;
use super::error::StoreError;
use crate::logging::{debug, info, trace};
use crate::value::{Payload, TaggedValue, ValueKind};

/// Buffer capacity used by [`ConfigStore::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// A mapping from string keys to [`TaggedValue`]s and a fixed-length buffer.
///
/// Entries and buffer are created together and dropped together. Getters
/// return owned copies, so nothing handed to a caller aliases the store.
///
/// # Example
///
/// ```ignore
/// use config_store::ConfigStore;
///
/// let mut store = ConfigStore::new();
/// store.set_int("max_connections", 100);
/// store.set_vector("ports", &[8080, 8081]);
/// assert_eq!(store.get_int("max_connections")?, 100);
///
/// store.process_buffer(3, 7)?;
/// assert_eq!(store.sum_buffer(0, 10)?, 7);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    entries: HashMap<String, TaggedValue>,
    buffer: IntBuffer,
}

impl ConfigStore {
    /// Create a store with a buffer of [`DEFAULT_CAPACITY`] cells.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a store whose buffer holds `capacity` zeroed cells.
    pub fn with_capacity(capacity: usize) -> Self {
        let buffer = IntBuffer::zeroed(capacity);
        info!(capacity, "config store created");
        Self {
            entries: HashMap::new(),
            buffer,
        }
    }

    // Typed entries

    /// Insert or replace the entry at `key`.
    ///
    /// Any previous entry, whatever its kind, is dropped before this returns.
    pub fn set(&mut self, key: &str, value: impl Into<Payload>) {
        let value = TaggedValue::new(value);
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                debug!(key, old = %slot.get().kind(), new = %value.kind(), "replacing entry");
                // Old payload is dropped here, before the new one is visible.
                slot.insert(value);
            }
            Entry::Vacant(slot) => {
                debug!(key, kind = %value.kind(), "inserting entry");
                slot.insert(value);
            }
        }
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.set(key, value);
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        self.set(key, value);
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.set(key, value);
    }

    /// Store a deep copy of `value`; the caller keeps its own slice.
    pub fn set_vector(&mut self, key: &str, value: &[i32]) {
        self.set(key, value);
    }

    /// Borrow the entry at `key`.
    pub fn get(&self, key: &str) -> Result<&TaggedValue, StoreError> {
        self.entries.get(key).ok_or_else(|| {
            debug!(key, "key not found");
            StoreError::KeyNotFound {
                key: key.to_string(),
            }
        })
    }

    pub fn get_int(&self, key: &str) -> Result<i32, StoreError> {
        self.get(key)?.as_int().map_err(|e| e.with_key(key))
    }

    pub fn get_float(&self, key: &str) -> Result<f32, StoreError> {
        self.get(key)?.as_float().map_err(|e| e.with_key(key))
    }

    pub fn get_string(&self, key: &str) -> Result<String, StoreError> {
        self.get(key)?.as_string().map_err(|e| e.with_key(key))
    }

    /// Copy of the integer sequence at `key`.
    pub fn get_vector(&self, key: &str) -> Result<Vec<i32>, StoreError> {
        self.get(key)?.as_int_sequence().map_err(|e| e.with_key(key))
    }

    /// Kind of the entry at `key`.
    pub fn kind_of(&self, key: &str) -> Result<ValueKind, StoreError> {
        Ok(self.get(key)?.kind())
    }

    /// Take the entry at `key` out of the store.
    pub fn remove(&mut self, key: &str) -> Option<TaggedValue> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            debug!(key, "removed entry");
        }
        removed
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaggedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries (the buffer is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Buffer

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn is_ready(&self) -> bool {
        self.buffer.is_ready()
    }

    /// Write `value` into the buffer at `index`.
    pub fn process_buffer(&mut self, index: i64, value: i32) -> Result<(), StoreError> {
        match self.buffer.write(index, value) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(index, error = %e, "rejected buffer write");
                Err(e)
            }
        }
    }

    /// Read the buffer cell at `index`.
    pub fn read_buffer(&self, index: i64) -> Result<i32, StoreError> {
        self.buffer.read(index)
    }

    /// Sum of `buffer[start..end]`, end exclusive.
    pub fn sum_buffer(&self, start: i64, end: i64) -> Result<i64, StoreError> {
        match self.buffer.sum(start, end) {
            Ok(sum) => {
                trace!(start, end, sum, "buffer sum");
                Ok(sum)
            }
            Err(e) => {
                debug!(start, end, error = %e, "rejected buffer sum");
                Err(e)
            }
        }
    }

    /// Replace the last buffer cell with the sum of all cells.
    pub fn fold_buffer(&mut self) -> Result<i64, StoreError> {
        self.buffer.fold_into_last()
    }

    /// Copy of the buffer contents.
    pub fn buffer_snapshot(&self) -> Vec<i32> {
        self.buffer.to_vec()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
