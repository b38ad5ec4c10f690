//! # Separate-Chaining Hash Table
//!
//! A hash table mapping `i32` keys to `i32` values.
//!
//! Every bucket holds a singly linked chain of entries. Keys are placed with a
//! fixed 32-bit avalanche mix reduced modulo the bucket count, and the bucket
//! count is kept prime. Before each insert the table checks its load factor;
//! once the average chain length exceeds 2 the bucket array grows to the
//! smallest prime above twice its size and every entry is moved across.
//!
//! The table is single-threaded: mutation needs `&mut self`, and sharing it
//! between threads is left to an outer lock.
//!
//! ## Basic Usage
//!
//! ```rust
//! use sepchain::{ChainedHashTable, TableError};
//!
//! // Create a table with five buckets
//! let mut table = ChainedHashTable::with_capacity(5)?;
//!
//! // Insert values
//! table.put(1, 10)?;
//! table.put(2, 20)?;
//!
//! // Retrieve values
//! assert_eq!(table.get(1), Some(10));
//!
//! // Update values
//! table.put(1, 100)?;
//! assert_eq!(table.get(1), Some(100));
//! assert_eq!(table.len(), 2);
//!
//! // Remove values
//! assert_eq!(table.erase(1)?, 100);
//! assert_eq!(table.erase(1), Err(TableError::NotFound { key: 1 }));
//! # Ok::<(), TableError>(())
//! ```
//!
//! ## Buffered Lookup
//!
//! [`ChainedHashTable::get_into`] writes matches into a caller buffer and
//! returns the total number of matches, which may exceed the buffer length.
//!
//! ```rust
//! use sepchain::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::with_capacity(5)?;
//! table.put(3, 30)?;
//!
//! let mut values = [0; 5];
//! assert_eq!(table.get_into(3, &mut values)?, 1);
//! assert_eq!(values[0], 30);
//! assert_eq!(table.get_into(100, &mut values)?, 0);
//! # Ok::<(), sepchain::TableError>(())
//! ```

/// Module implementing the chained hash table itself
mod chained_table;
/// Construction parameters
pub mod config;
/// Error type returned by table operations
mod error;
/// Hash mixing and prime number helpers
pub mod hashing;
/// Utility functions and traits for the table
mod utils;

pub use chained_table::{ChainedHashTable, Iter};
pub use config::TableConfig;
pub use error::TableError;
pub use utils::{from_pairs, TableExtensions};
