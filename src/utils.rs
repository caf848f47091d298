//! Utility functions and traits for `HashTable`

use crate::HashTable;

/// Shape of the bucket array at one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    /// Number of buckets
    pub capacity: usize,
    /// Number of entries
    pub len: usize,
    /// Buckets with no chain
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Average length of the non-empty chains, 0.0 for an empty table
    pub mean_chain_length: f64,
}

/// Extension trait for tables that provides additional utility methods
pub trait HashTableExtensions<V> {
    /// Returns the keys of the table as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<V>;

    /// Summarizes how entries are spread over the buckets
    fn chain_stats(&self) -> ChainStats;
}

impl<V: Clone> HashTableExtensions<V> for HashTable<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn chain_stats(&self) -> ChainStats {
        let (empty_buckets, longest_chain) =
            self.chain_lengths().fold((0_usize, 0_usize), |(empty, longest), length| {
                (if length == 0 { empty.saturating_add(1) } else { empty }, longest.max(length))
            });

        let occupied = self.capacity().saturating_sub(empty_buckets);
        let mean_chain_length =
            if occupied == 0 { 0.0 } else { self.len() as f64 / occupied as f64 };

        ChainStats {
            capacity: self.capacity(),
            len: self.len(),
            empty_buckets,
            longest_chain,
            mean_chain_length,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::TableConfig;

    #[test]
    fn test_keys_and_values() {
        let mut table = HashTable::new(8);
        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("c", 3);

        let mut keys = table.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_chain_stats_with_collisions() {
        let config = TableConfig::default().with_initial_capacity(4).with_max_load_factor(4.0);
        let mut table = HashTable::with_config(config).unwrap();
        // "a", "e" and "i" share bucket 2, "b" sits alone in bucket 3
        for key in ["a", "e", "i", "b"] {
            table.insert(key, ());
        }

        let stats = table.chain_stats();
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.len, 4);
        assert_eq!(stats.empty_buckets, 2);
        assert_eq!(stats.longest_chain, 3);
        assert!((stats.mean_chain_length - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chain_stats_empty() {
        let table: HashTable<u8> = HashTable::new(2);
        let stats = table.chain_stats();
        assert_eq!(stats.empty_buckets, 2);
        assert_eq!(stats.longest_chain, 0);
        assert!(stats.mean_chain_length.abs() < f64::EPSILON);
    }
}
