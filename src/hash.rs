//! DJB2 string hashing and bucket index reduction

/// Initial value of the DJB2 accumulator
const DJB2_SEED: u32 = 5381;

/// Hashes a string key with Dan Bernstein's DJB2 function.
///
/// Every character contributes its Unicode scalar value through
/// `hash = hash * 33 + code`, evaluated with wrapping 32-bit arithmetic. The
/// result only depends on the key, never on the state of a table.
///
/// ```rust
/// use bucketchain::djb2;
///
/// assert_eq!(djb2(""), 5381);
/// assert_eq!(djb2("a"), 177_670);
/// ```
#[must_use]
pub fn djb2(key: &str) -> u32 {
    key.chars().fold(DJB2_SEED, |hash, ch| {
        // (hash << 5) + hash == hash * 33
        hash.wrapping_shl(5).wrapping_add(hash).wrapping_add(u32::from(ch))
    })
}

/// Maps a key to a bucket in `[0, capacity)`.
///
/// # Panics
///
/// Panics if `capacity` is zero. Tables never hold zero buckets.
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub fn bucket_index(key: &str, capacity: usize) -> usize {
    assert_ne!(capacity, 0, "bucket array must not be empty");
    djb2(key) as usize % capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 177_670);
        assert_eq!(djb2("b"), 177_671);
        // 177_670 * 33 + 98
        assert_eq!(djb2("ab"), 5_863_208);
    }

    #[test]
    fn test_wraps_instead_of_overflowing() {
        let key = "z".repeat(64);
        let expected = key.bytes().fold(5381_u64, |hash, b| {
            (hash.wrapping_mul(33).wrapping_add(u64::from(b))) & 0xFFFF_FFFF
        });
        assert_eq!(u64::from(djb2(&key)), expected);
    }

    #[test]
    fn test_uses_code_points() {
        // 'é' is a single scalar value (233), not two UTF-8 bytes
        assert_eq!(djb2("é"), 5381 * 33 + 233);
    }

    #[test]
    fn test_bucket_index_in_range() {
        assert_eq!(bucket_index("a", 4), 2);
        assert_eq!(bucket_index("e", 4), 2);
        assert_eq!(bucket_index("a", 8), 6);
        assert_eq!(bucket_index("anything", 1), 0);

        for capacity in 1..64 {
            for key in ["", "apple", "banana", "cherry"] {
                assert!(bucket_index(key, capacity) < capacity);
            }
        }
    }

    proptest::proptest! {
        #[test]
        fn matches_unbounded_computation(key in ".*", capacity in 1_usize..1024) {
            let unbounded = key.chars().fold(5381_u64, |hash, ch| {
                ((hash << 5) + hash + u64::from(ch)) & 0xFFFF_FFFF
            });
            proptest::prop_assert_eq!(u64::from(djb2(&key)), unbounded);
            proptest::prop_assert!(bucket_index(&key, capacity) < capacity);
        }
    }

    #[test]
    #[should_panic(expected = "bucket array must not be empty")]
    fn test_bucket_index_zero_capacity() {
        let _index = bucket_index("a", 0);
    }
}
