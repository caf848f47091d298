use std::{fmt, mem, slice};

use log::{debug, trace};

use crate::{
    HashTableError,
    config::{DEFAULT_CAPACITY, TableConfig},
    hash::bucket_index,
};

/// Owning link to the next entry of a chain
type Link<V> = Option<Box<Entry<V>>>;

/// A key-value pair stored in a bucket chain
#[derive(Debug)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// The entry that follows this one in the same bucket
    next: Link<V>,
}

impl<V> Entry<V> {
    /// Creates a detached entry
    fn new(key: String, value: V) -> Box<Self> {
        Box::new(Self { key, value, next: None })
    }
}

/// A string-keyed hash table with separate chaining.
///
/// Keys are hashed with DJB2 and reduced modulo the number of buckets. Each bucket owns a
/// singly linked chain of entries, new keys being appended at the tail. The bucket array
/// doubles when the load factor rises above `max_load_factor` after an insert and halves
/// when it drops below `min_load_factor` after a removal, never going below one bucket.
///
/// Note: This implementation is not thread-safe.
pub struct HashTable<V> {
    /// Chain heads, one per bucket
    buckets: Vec<Link<V>>,
    /// Number of live entries across all chains
    count: usize,
    /// Load factor above which an insert doubles the bucket array
    max_load_factor: f64,
    /// Load factor below which a removal halves the bucket array
    min_load_factor: f64,
}

/// Allocates `capacity` empty chains
fn empty_buckets<V>(capacity: usize) -> Vec<Link<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, || None);
    buckets
}

/// Walks `chain` looking for `entry.key`.
///
/// On a match the stored value is replaced and the previous one returned, otherwise
/// `entry` becomes the new tail of the chain.
fn link_entry<V>(chain: &mut Link<V>, entry: Box<Entry<V>>) -> Option<V> {
    let mut cursor = chain;
    while let Some(node) = cursor {
        if node.key == entry.key {
            return Some(mem::replace(&mut node.value, entry.value));
        }
        cursor = &mut node.next;
    }
    *cursor = Some(entry);
    None
}

/// Splices the entry stored under `key` out of `chain`
fn unlink_entry<V>(chain: &mut Link<V>, key: &str) -> Option<Box<Entry<V>>> {
    let mut cursor = chain;
    while cursor.as_ref().is_some_and(|node| node.key != key) {
        if let Some(node) = cursor {
            cursor = &mut node.next;
        }
    }

    let mut removed = cursor.take()?;
    *cursor = removed.next.take();
    Some(removed)
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V> HashTable<V> {
    /// Creates a table with `initial_capacity` buckets and the default load factors (0.7 / 0.2).
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self::from_config(TableConfig::default().with_initial_capacity(initial_capacity))
    }

    /// Creates a table from an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`HashTableError::InvalidLoadFactors`] when the thresholds could leave the
    /// load factor outside its bounds after a resize.
    pub fn with_config(config: TableConfig) -> Result<Self, HashTableError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Builds a table without validating the thresholds
    fn from_config(config: TableConfig) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity().max(1)),
            count: 0,
            max_load_factor: config.max_load_factor(),
            min_load_factor: config.min_load_factor(),
        }
    }

    /// Chain that `key` hashes to
    #[allow(clippy::indexing_slicing)]
    fn chain(&self, key: &str) -> &Link<V> {
        // bucket_index is always below buckets.len()
        &self.buckets[bucket_index(key, self.buckets.len())]
    }

    /// Mutable chain that `key` hashes to
    #[allow(clippy::indexing_slicing)]
    fn chain_mut(&mut self, key: &str) -> &mut Link<V> {
        let index = bucket_index(key, self.buckets.len());
        &mut self.buckets[index]
    }

    /// Stores `value` under `key`.
    ///
    /// If the key is already present its value is overwritten in place, the entry count
    /// stays the same and the previous value is returned. Otherwise the entry is appended
    /// to its chain and the table may double its bucket array.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let chain = self.chain_mut(&key);
        let previous = link_entry(chain, Entry::new(key, value));

        if previous.is_none() {
            self.count = self.count.saturating_add(1);
            trace!(
                "load factor {:.2} ({} entries in {} buckets)",
                self.load_factor(),
                self.count,
                self.capacity()
            );
            self.grow_if_needed();
        }

        previous
    }

    /// Removes the entry stored under `key` and returns its value.
    ///
    /// A successful removal may halve the bucket array.
    ///
    /// # Errors
    ///
    /// Returns [`HashTableError::KeyNotFound`] if the key is absent. The table is left
    /// untouched in that case.
    ///
    /// # Panics
    ///
    /// Panics if the entry count would underflow, which means the table is corrupted.
    pub fn remove(&mut self, key: &str) -> Result<V, HashTableError> {
        let removed = unlink_entry(self.chain_mut(key), key)
            .ok_or_else(|| HashTableError::KeyNotFound(key.to_string()))?;

        assert_ne!(self.count, 0, "entry count underflow");
        self.count = self.count.saturating_sub(1);
        self.shrink_if_needed();

        Ok(removed.value)
    }

    /// Returns the value stored under `key`, if any
    #[must_use]
    pub fn retrieve(&self, key: &str) -> Option<&V> {
        let mut cursor = self.chain(key).as_deref();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(&entry.value);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Returns a mutable reference to the value stored under `key`, if any
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.chain_mut(key).as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key == key {
                return Some(&mut entry.value);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Returns true if the table holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.retrieve(key).is_some()
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor_at(self.buckets.len())
    }

    /// Load factor the current entries would have in `capacity` buckets
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn load_factor_at(&self, capacity: usize) -> f64 {
        self.count as f64 / capacity as f64
    }

    /// Load factor above which an insert doubles the bucket array
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Load factor below which a removal halves the bucket array
    #[must_use]
    pub fn min_load_factor(&self) -> f64 {
        self.min_load_factor
    }

    /// Removes every entry, keeping the current number of buckets
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut head = bucket.take();
            while let Some(mut entry) = head {
                head = entry.next.take();
            }
        }
        self.count = 0;
    }

    /// Returns an iterator over the entries, bucket by bucket and head to tail within a chain
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None, remaining: self.count }
    }

    /// Returns the length of every chain, in bucket order
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> {
        self.buckets.iter().map(|bucket| {
            let mut length: usize = 0;
            let mut cursor = bucket.as_deref();
            while let Some(entry) = cursor {
                length = length.saturating_add(1);
                cursor = entry.next.as_deref();
            }
            length
        })
    }

    /// Doubles the bucket array until the load factor is back under the upper threshold.
    ///
    /// Every doubling is checked again before rehashing, so a small table with a low
    /// threshold skips straight to the first capacity that fits.
    fn grow_if_needed(&mut self) {
        let mut new_capacity = self.capacity();
        while self.load_factor_at(new_capacity) > self.max_load_factor {
            let doubled = new_capacity.saturating_mul(2);
            if doubled == new_capacity {
                break;
            }
            new_capacity = doubled;
        }

        if new_capacity != self.capacity() {
            self.rehash(new_capacity);
        }
    }

    /// Halves the bucket array once the load factor drops below the lower threshold
    #[allow(clippy::arithmetic_side_effects)]
    fn shrink_if_needed(&mut self) {
        let capacity = self.capacity();
        if capacity > 1 && self.load_factor() < self.min_load_factor {
            self.rehash((capacity / 2).max(1));
        }
    }

    /// Moves every entry into a fresh array of `new_capacity` buckets
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        self.count = 0;

        for mut head in old_buckets {
            while let Some(mut entry) = head {
                head = entry.next.take();
                self.relink(entry);
            }
        }

        debug!(
            "rehashed {} entries from {old_capacity} to {new_capacity} buckets",
            self.count
        );
    }

    /// Appends an entry with a key that is not in the table yet
    fn relink(&mut self, entry: Box<Entry<V>>) {
        let chain = self.chain_mut(&entry.key);
        if link_entry(chain, entry).is_none() {
            self.count = self.count.saturating_add(1);
        }
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        // unlink chains one entry at a time instead of recursing through Box drops
        self.clear();
    }
}

impl<V: Clone> Clone for HashTable<V> {
    fn clone(&self) -> Self {
        let mut table = Self {
            buckets: empty_buckets(self.capacity()),
            count: 0,
            max_load_factor: self.max_load_factor,
            min_load_factor: self.min_load_factor,
        };
        for (key, value) in self {
            table.relink(Entry::new(key.to_string(), value.clone()));
        }
        table
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for HashTable<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for HashTable<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of a [`HashTable`]
pub struct Iter<'a, V> {
    /// Buckets not visited yet
    buckets: slice::Iter<'a, Link<V>>,
    /// Next entry of the chain being walked
    chain: Option<&'a Entry<V>>,
    /// Entries left to yield
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                self.remaining = self.remaining.saturating_sub(1);
                return Some((entry.key.as_str(), &entry.value));
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish_non_exhaustive()
    }
}
