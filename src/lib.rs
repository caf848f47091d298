//! # Bucket Chain
//!
//! A string-keyed hash table built from first principles.
//!
//! `HashTable` hashes keys with DJB2, resolves collisions by chaining entries in
//! singly linked lists hanging off each bucket, and keeps its load factor between
//! two thresholds by doubling or halving the bucket array:
//!
//! - after an insert that adds a key, the table doubles once `len / capacity`
//!   exceeds `max_load_factor` (0.7 by default),
//! - after a removal, the table halves once `len / capacity` drops below
//!   `min_load_factor` (0.2 by default), never going below one bucket.
//!
//! Every resize rehashes all entries into the new bucket array.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bucketchain::{HashTable, HashTableError};
//!
//! // Create a table with four buckets
//! let mut table = HashTable::new(4);
//!
//! // Insert values
//! table.insert("apple", 1);
//! table.insert("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(table.retrieve("apple"), Some(&1));
//!
//! // Update values
//! table.insert("apple", 10);
//! assert_eq!(table.retrieve("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(table.remove("apple"), Ok(10));
//! assert_eq!(table.retrieve("apple"), None);
//! assert_eq!(table.remove("apple"), Err(HashTableError::KeyNotFound("apple".to_string())));
//! ```
//!
//! ## Resizing
//!
//! ```rust
//! use bucketchain::HashTable;
//!
//! let mut table = HashTable::new(4);
//! table.insert("a", 1);
//! table.insert("b", 2);
//! table.insert("c", 3); // 3 / 4 > 0.7
//! assert_eq!(table.capacity(), 8);
//! ```

/// Construction-time configuration of a table
mod config;
/// Error type returned by table operations
mod error;
/// DJB2 hashing and bucket selection
mod hash;
/// Module implementing the chained hash table
mod hash_table;
/// Utility functions and traits for the table
mod utils;

pub use config::{DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, DEFAULT_MIN_LOAD_FACTOR, TableConfig};
pub use error::HashTableError;
pub use hash::{bucket_index, djb2};
pub use hash_table::{HashTable, Iter};
pub use utils::{ChainStats, HashTableExtensions};
