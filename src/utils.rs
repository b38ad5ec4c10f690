//! Utility functions and traits for `ChainedHashTable`

use crate::{ChainedHashTable, TableError};

/// Extension trait for tables that provides additional utility methods
pub trait TableExtensions {
    /// Returns the keys of the table as a Vec, in bucket order
    fn keys(&self) -> Vec<i32>;

    /// Returns the values of the table as a Vec, in bucket order
    fn values(&self) -> Vec<i32>;

    /// Copies every entry into a `std` map, for comparisons and reporting
    fn to_std_map(&self) -> std::collections::HashMap<i32, i32>;
}

impl TableExtensions for ChainedHashTable {
    fn keys(&self) -> Vec<i32> {
        self.iter().map(|(k, _)| k).collect()
    }

    fn values(&self) -> Vec<i32> {
        self.iter().map(|(_, v)| v).collect()
    }

    fn to_std_map(&self) -> std::collections::HashMap<i32, i32> {
        self.iter().collect()
    }
}

/// Creates a `ChainedHashTable` with `capacity` buckets from an iterator of key-value pairs.
///
/// Later pairs overwrite earlier ones with the same key.
///
/// # Errors
///
/// Whatever [`ChainedHashTable::with_capacity`] or [`ChainedHashTable::put`] report.
pub fn from_pairs<I>(capacity: usize, iter: I) -> Result<ChainedHashTable, TableError>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut table = ChainedHashTable::with_capacity(capacity)?;

    for (key, value) in iter {
        table.put(key, value)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_from_pairs() -> Result<(), TableError> {
        let data = vec![(1, 10), (2, 20), (3, 30), (1, 11)];

        let table = from_pairs(5, data)?;

        assert_eq!(table.get(1), Some(11));
        assert_eq!(table.get(2), Some(20));
        assert_eq!(table.get(3), Some(30));
        assert_eq!(table.len(), 3);
        Ok(())
    }

    #[test]
    fn test_from_pairs_rejects_zero_capacity() {
        assert!(from_pairs(0, [(1, 1)]).is_err());
    }

    #[test]
    fn test_keys_and_values() -> Result<(), TableError> {
        let table = from_pairs(3, [(3, 30), (1, 10), (2, 20)])?;

        let mut keys = table.keys();
        keys.sort_unstable(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(values, vec![10, 20, 30]);
        Ok(())
    }

    #[test]
    fn test_to_std_map() -> Result<(), TableError> {
        let table = from_pairs(7, (0..40).map(|k| (k, k * k)))?;
        let map = table.to_std_map();

        assert_eq!(map.len(), 40);
        assert_eq!(map.get(&6), Some(&36));
        Ok(())
    }
}
