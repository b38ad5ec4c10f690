//! Hash mixing and prime helpers used to place keys and size the bucket array

use std::num::NonZeroUsize;

/// Multiplier applied by both mixing rounds of [`mix`]
pub const MIX_MULTIPLIER: u32 = 0x045d_9f3b;

/// Spreads the bits of `key` over the whole 32-bit word.
///
/// Two rounds of xor-shift followed by a wrapping multiply, then a final
/// xor-shift. Sequential and low-entropy keys end up far apart.
#[must_use]
pub const fn mix(key: i32) -> u32 {
    let mut hash = u32::from_ne_bytes(key.to_ne_bytes());
    hash = ((hash >> 16) ^ hash).wrapping_mul(MIX_MULTIPLIER);
    hash = ((hash >> 16) ^ hash).wrapping_mul(MIX_MULTIPLIER);
    (hash >> 16) ^ hash
}

/// Index of the bucket holding `key` in a table with `capacity` buckets.
///
/// Always in `0..capacity`, and the same for the same key and capacity.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn bucket_index(key: i32, capacity: NonZeroUsize) -> usize {
    widen(mix(key)) % capacity
}

/// Plain `key mod capacity` placement, without mixing.
///
/// Kept as a baseline for measuring how evenly [`bucket_index`] spreads keys.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn modulo_index(key: i32, capacity: NonZeroUsize) -> usize {
    widen(u32::from_ne_bytes(key.to_ne_bytes())) % capacity
}

/// Lossless `u32` to `usize` conversion on every supported target
#[allow(clippy::cast_possible_truncation)]
const fn widen(value: u32) -> usize {
    value as usize
}

/// Returns true if `n` is prime.
///
/// Trial division up to the square root, testing only `6k ± 1` candidates.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i: usize = 5;
    while i.checked_mul(i).is_some_and(|square| square <= n) {
        if n % i == 0 || i.checked_add(2).is_some_and(|j| n % j == 0) {
            return false;
        }
        i = match i.checked_add(6) {
            Some(next) => next,
            None => break,
        };
    }
    true
}

/// Smallest prime strictly greater than `n`, or 2 when `n <= 1`.
///
/// Returns `None` if no such prime fits in a `usize`.
#[must_use]
pub fn next_prime(n: usize) -> Option<usize> {
    if n <= 1 {
        return Some(2);
    }
    let mut candidate = n;
    loop {
        candidate = candidate.checked_add(1)?;
        if is_prime(candidate) {
            return Some(candidate);
        }
    }
}

/// Smallest prime greater than or equal to `n`
#[must_use]
pub fn prime_at_least(n: usize) -> Option<usize> {
    if is_prime(n) { Some(n) } else { next_prime(n) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_log::test;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
    }

    #[test]
    fn mix_matches_reference_values() {
        assert_eq!(mix(0), 0);
        assert_eq!(mix(1), 824_515_495);
        assert_ne!(mix(1), mix(2));
    }

    #[test]
    fn negative_keys_are_reinterpreted_as_unsigned() {
        assert_eq!(mix(-1), mix_unsigned(u32::MAX));
        assert_eq!(mix(i32::MIN), mix_unsigned(0x8000_0000));
    }

    fn mix_unsigned(mut h: u32) -> u32 {
        h = ((h >> 16) ^ h).wrapping_mul(MIX_MULTIPLIER);
        h = ((h >> 16) ^ h).wrapping_mul(MIX_MULTIPLIER);
        (h >> 16) ^ h
    }

    #[test]
    fn modulo_index_is_plain_remainder() {
        assert_eq!(modulo_index(12, nz(5)), 2);
        assert_eq!(modulo_index(4, nz(5)), 4);
        assert_eq!(modulo_index(-1, nz(7)), (u32::MAX % 7) as usize);
    }

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
    }

    #[test]
    fn composites_with_large_factors() {
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(7919 * 7927));
        assert!(is_prime(7919));
        assert!(is_prime(1_000_000_007));
    }

    #[test]
    fn next_prime_is_strictly_greater() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(1), Some(2));
        assert_eq!(next_prime(2), Some(3));
        assert_eq!(next_prime(3), Some(5));
        assert_eq!(next_prime(10), Some(11));
        assert_eq!(next_prime(11), Some(13));
        assert_eq!(next_prime(60_000_000), Some(60_000_011));
    }

    #[test]
    fn next_prime_overflow_is_reported() {
        assert_eq!(next_prime(usize::MAX), None);
    }

    #[test]
    fn prime_at_least_keeps_primes() {
        assert_eq!(prime_at_least(0), Some(2));
        assert_eq!(prime_at_least(5), Some(5));
        assert_eq!(prime_at_least(64), Some(67));
        assert_eq!(prime_at_least(30_000_000), Some(30_000_001));
    }

    proptest! {
        #[test]
        fn bucket_index_is_in_range_and_deterministic(key in any::<i32>(), capacity in 1usize..100_000) {
            let capacity = nz(capacity);
            let index = bucket_index(key, capacity);
            prop_assert!(index < capacity.get());
            prop_assert_eq!(index, bucket_index(key, capacity));
        }

        #[test]
        fn next_prime_has_no_prime_in_between(n in 0usize..50_000) {
            let p = next_prime(n).unwrap_or(0);
            prop_assert!(p > n);
            prop_assert!(is_prime(p));
            prop_assert!((n + 1..p).all(|m| !is_prime(m)));
        }
    }
}
