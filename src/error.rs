//! Error type shared by every table operation

/// Errors returned by [`ChainedHashTable`](crate::ChainedHashTable) operations.
///
/// Every operation reports failure through its own `Result`; there is no
/// process-wide error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// An argument can never be valid, such as a zero capacity or an empty output buffer
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: &'static str,
    },

    /// Storage for a bucket array could not be obtained
    #[error("out of memory while allocating {buckets} buckets")]
    OutOfMemory {
        /// Number of buckets that was requested
        buckets: usize,
    },

    /// The key is not present in the table
    #[error("key {key} not found")]
    NotFound {
        /// The key that was looked up
        key: i32,
    },
}

impl TableError {
    /// Shorthand for an [`TableError::InvalidArgument`] with the given reason
    pub(crate) const fn invalid(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(TableError::NotFound { key: 42 }.to_string(), "key 42 not found");
        assert_eq!(
            TableError::OutOfMemory { buckets: 7 }.to_string(),
            "out of memory while allocating 7 buckets"
        );
        assert_eq!(
            TableError::invalid("capacity must be positive").to_string(),
            "invalid argument: capacity must be positive"
        );
    }
}
