//! Construction parameters for [`ChainedHashTable`](crate::ChainedHashTable)

use crate::TableError;

/// Bucket count used by [`TableConfig::default`]
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Average chain length above which an insert first grows the table
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 2.0;

/// Parameters for building a table.
///
/// ```rust
/// use sepchain::{ChainedHashTable, TableConfig};
///
/// let config = TableConfig::new(100).load_factor_threshold(1.5);
/// let table = ChainedHashTable::with_config(config)?;
/// assert_eq!(table.capacity(), 101);
/// # Ok::<(), sepchain::TableError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Requested number of buckets for the first allocation
    pub initial_capacity: usize,
    /// Growth happens when `len / capacity` exceeds this value before an insert
    pub load_factor_threshold: f64,
    /// Use `initial_capacity` as-is instead of rounding it up to a prime
    pub exact_initial_capacity: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY)
    }
}

impl TableConfig {
    /// Config with the given initial capacity and default everything else
    #[must_use]
    pub const fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            exact_initial_capacity: false,
        }
    }

    /// Sets the load factor that triggers growth
    #[must_use]
    pub const fn load_factor_threshold(mut self, threshold: f64) -> Self {
        self.load_factor_threshold = threshold;
        self
    }

    /// Keeps the first capacity exactly as requested, even when it is not prime.
    ///
    /// Capacities chosen on growth are always prime.
    #[must_use]
    pub const fn exact_initial_capacity(mut self, exact: bool) -> Self {
        self.exact_initial_capacity = exact;
        self
    }

    /// Checks that the parameters describe a usable table.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if the capacity is zero or the
    /// threshold is not a finite positive number.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_capacity == 0 {
            return Err(TableError::invalid("capacity must be positive"));
        }
        validate_threshold(self.load_factor_threshold)
    }
}

/// Rejects thresholds that would make growth never or always happen
pub(crate) fn validate_threshold(threshold: f64) -> Result<(), TableError> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(TableError::invalid("load factor threshold must be finite and positive"))
    }
}
