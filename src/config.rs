//! Construction-time configuration for [`HashTable`](crate::HashTable)

use crate::HashTableError;

/// Number of buckets used by [`TableConfig::default`]
pub const DEFAULT_CAPACITY: usize = 16;
/// Load factor above which the table doubles its bucket array
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;
/// Load factor below which the table halves its bucket array
pub const DEFAULT_MIN_LOAD_FACTOR: f64 = 0.2;

/// Initial capacity and resize thresholds of a table.
///
/// The thresholds are fixed once a table is built from the config.
///
/// ```rust
/// use bucketchain::{HashTable, TableConfig};
///
/// let config = TableConfig::default()
///     .with_initial_capacity(4)
///     .with_max_load_factor(0.9)
///     .with_min_load_factor(0.1);
/// let table: HashTable<u32> = HashTable::with_config(config).unwrap();
/// assert_eq!(table.capacity(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated up front, at least 1
    initial_capacity: usize,
    /// Upper bound of `count / capacity`
    max_load_factor: f64,
    /// Lower bound of `count / capacity`
    min_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            min_load_factor: DEFAULT_MIN_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Sets the initial number of buckets; zero is raised to one
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }

    /// Sets the load factor above which the table grows
    #[must_use]
    pub fn with_max_load_factor(mut self, load_factor: f64) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    /// Sets the load factor below which the table shrinks
    #[must_use]
    pub fn with_min_load_factor(mut self, load_factor: f64) -> Self {
        self.min_load_factor = load_factor;
        self
    }

    /// Number of buckets a new table starts with
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Upper load factor threshold
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Lower load factor threshold
    #[must_use]
    pub fn min_load_factor(&self) -> f64 {
        self.min_load_factor
    }

    /// Checks that the thresholds leave room for the resize policy.
    ///
    /// With `2 * min <= max`, growing to the first doubling whose load factor is at most
    /// `max` leaves it above `min`, and halving after a removal never pushes it above
    /// `max`.
    ///
    /// # Errors
    ///
    /// Returns [`HashTableError::InvalidLoadFactors`] if a threshold is not
    /// finite, `min` is negative, `max` is not positive, or `2 * min > max`.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn validate(&self) -> Result<(), HashTableError> {
        let (min, max) = (self.min_load_factor, self.max_load_factor);
        let valid = min.is_finite() && max.is_finite() && min >= 0.0 && max > 0.0 && min * 2.0 <= max;

        if valid { Ok(()) } else { Err(HashTableError::InvalidLoadFactors { min, max }) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.initial_capacity(), DEFAULT_CAPACITY);
        assert!((config.max_load_factor() - 0.7).abs() < f64::EPSILON);
        assert!((config.min_load_factor() - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let config = TableConfig::default().with_initial_capacity(0);
        assert_eq!(config.initial_capacity(), 1);
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let cases = [(0.5, 0.7), (-0.1, 0.7), (0.1, 0.0), (0.1, f64::NAN), (0.1, f64::INFINITY)];

        for (min, max) in cases {
            let config = TableConfig::default().with_min_load_factor(min).with_max_load_factor(max);
            assert!(
                matches!(config.validate(), Err(HashTableError::InvalidLoadFactors { .. })),
                "min {min} max {max} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_chaining_friendly_thresholds() {
        // chains may be longer than one entry on average
        let config = TableConfig::default().with_min_load_factor(0.0).with_max_load_factor(8.0);
        assert_eq!(config.validate(), Ok(()));
    }
}
