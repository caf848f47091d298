//! Error type shared by the table and its configuration

use thiserror::Error;

/// Recoverable conditions reported by [`HashTable`](crate::HashTable) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HashTableError {
    /// The key is not present in the table
    #[error("key {0:?} not found")]
    KeyNotFound(String),
    /// The load factor thresholds cannot keep the table inside its bounds
    #[error("invalid load factors: min {min} and max {max} (need 0 <= 2 * min <= max)")]
    InvalidLoadFactors {
        /// Lower threshold that triggers shrinking
        min: f64,
        /// Upper threshold that triggers growth
        max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = HashTableError::KeyNotFound("apple".to_string());
        assert_eq!(err.to_string(), "key \"apple\" not found");

        let err = HashTableError::InvalidLoadFactors { min: 0.5, max: 0.7 };
        assert!(err.to_string().contains("min 0.5 and max 0.7"));
    }
}
