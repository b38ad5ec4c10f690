use std::{iter, mem, num::NonZeroUsize};

use log::{debug, trace};

use crate::{
    config::{self, TableConfig},
    hashing::{bucket_index, next_prime, prime_at_least},
    TableError,
};

/// A single key-value pair and the link to the next entry of its chain
#[derive(Debug)]
struct Node {
    /// The key in the key-value pair
    key: i32,
    /// The value associated with the key
    value: i32,
    /// Next entry in the same bucket
    next: Option<Box<Self>>,
}

/// Singly linked list of every entry whose key hashes to one bucket
#[derive(Debug, Default)]
struct Chain {
    /// First entry, `None` for an empty bucket
    head: Option<Box<Node>>,
}

impl Chain {
    /// Overwrites the value of `key` if present, otherwise appends a new entry at the tail.
    ///
    /// Returns true if a new entry was created.
    fn upsert(&mut self, key: i32, value: i32) -> bool {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            if node.key == key {
                node.value = value;
                return false;
            }
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { key, value, next: None }));
        true
    }

    /// Links an existing node at the tail without checking for duplicates
    fn push_back(&mut self, mut node: Box<Node>) {
        node.next = None;
        let mut cursor = &mut self.head;
        while let Some(current) = cursor {
            cursor = &mut current.next;
        }
        *cursor = Some(node);
    }

    /// Detaches and returns the first node
    fn pop_front(&mut self) -> Option<Box<Node>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    /// Unlinks the entry for `key` and returns its value
    fn remove(&mut self, key: i32) -> Option<i32> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }
        let mut removed = cursor.take()?;
        *cursor = removed.next.take();
        Some(removed.value)
    }

    /// Iterates over the entries in chain order
    fn iter(&self) -> ChainIter<'_> {
        ChainIter { next: self.head.as_deref() }
    }
}

impl Drop for Chain {
    // Unlinks one node at a time so long chains do not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

/// Iterator over the entries of one chain
#[derive(Debug, Clone)]
struct ChainIter<'a> {
    /// Entry returned by the next call
    next: Option<&'a Node>,
}

impl Iterator for ChainIter<'_> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key, node.value))
    }
}

/// A hash table from `i32` keys to `i32` values using separate chaining.
///
/// Each bucket holds a singly linked chain of entries. Before every insert
/// the table checks its load factor (`len / capacity`); once that exceeds the
/// configured threshold (2 by default) the bucket array is regrown to the
/// smallest prime above twice the current capacity and every entry is moved
/// across.
///
/// Keys are unique: inserting a present key replaces its value.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Debug)]
pub struct ChainedHashTable {
    /// One chain per bucket; its length is always `capacity`
    buckets: Box<[Chain]>,
    /// Number of buckets, kept non-zero so indexing never divides by zero
    capacity: NonZeroUsize,
    /// Number of live entries across all chains
    len: usize,
    /// Load factor above which the next insert grows the table
    load_factor_threshold: f64,
}

impl Default for ChainedHashTable {
    /// Table with the default configuration.
    ///
    /// Like `Vec`, this aborts if the default bucket array cannot be allocated.
    fn default() -> Self {
        let capacity = prime_at_least(config::DEFAULT_INITIAL_CAPACITY)
            .and_then(NonZeroUsize::new)
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            buckets: iter::repeat_with(Chain::default).take(capacity.get()).collect(),
            capacity,
            len: 0,
            load_factor_threshold: config::DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }
}

impl ChainedHashTable {
    /// Creates a table with at least `capacity` buckets, rounded up to a prime.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `capacity` is zero,
    /// [`TableError::OutOfMemory`] if the bucket array cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new(capacity))
    }

    /// Creates a table from a full [`TableConfig`].
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if the config does not validate,
    /// [`TableError::OutOfMemory`] if the bucket array cannot be allocated.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        if config.initial_capacity > max_buckets() {
            return Err(TableError::OutOfMemory { buckets: config.initial_capacity });
        }

        let requested = if config.exact_initial_capacity {
            config.initial_capacity
        } else {
            prime_at_least(config.initial_capacity)
                .ok_or(TableError::OutOfMemory { buckets: config.initial_capacity })?
        };
        let capacity =
            NonZeroUsize::new(requested).ok_or(TableError::invalid("capacity must be positive"))?;
        let buckets = allocate_buckets(capacity)?;
        trace!("allocated table with {capacity} buckets");

        Ok(Self {
            buckets,
            capacity,
            len: 0,
            load_factor_threshold: config.load_factor_threshold,
        })
    }

    /// Inserts `key` with `value`, replacing the value if the key is already present.
    ///
    /// May grow the table first, see the type-level docs.
    ///
    /// # Errors
    ///
    /// [`TableError::OutOfMemory`] if growth was needed and the larger bucket
    /// array could not be allocated. The table is left unchanged in that case.
    pub fn put(&mut self, key: i32, value: i32) -> Result<(), TableError> {
        if self.needs_growth() {
            self.grow()?;
        }

        let index = bucket_index(key, self.capacity);
        let inserted = self.buckets.get_mut(index).is_some_and(|chain| chain.upsert(key, value));
        if inserted {
            self.len = self.len.saturating_add(1);
        }
        Ok(())
    }

    /// Copies the values stored under `key` into `out` and returns how many there are.
    ///
    /// The returned count can be larger than `out.len()`, in which case only
    /// the first `out.len()` values were written. Keys are unique, so the
    /// count is always 0 or 1; the buffer form is kept for callers written
    /// against a multi-value contract. See [`get`](Self::get) for the
    /// single-value form.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] if `out` is empty.
    pub fn get_into(&self, key: i32, out: &mut [i32]) -> Result<usize, TableError> {
        if out.is_empty() {
            return Err(TableError::invalid("output buffer must have room for one value"));
        }

        let mut count: usize = 0;
        for (_, value) in self.entries_for(key).filter(|&(k, _)| k == key) {
            if let Some(slot) = out.get_mut(count) {
                *slot = value;
            }
            count = count.saturating_add(1);
        }
        Ok(count)
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn get(&self, key: i32) -> Option<i32> {
        self.entries_for(key).find(|&(k, _)| k == key).map(|(_, value)| value)
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn contains_key(&self, key: i32) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` and returns the value it held.
    ///
    /// # Errors
    ///
    /// [`TableError::NotFound`] if the key is absent; the table is unchanged.
    pub fn erase(&mut self, key: i32) -> Result<i32, TableError> {
        let index = bucket_index(key, self.capacity);
        let removed = self.buckets.get_mut(index).and_then(|chain| chain.remove(key));
        if let Some(value) = removed {
            self.len = self.len.saturating_sub(1);
            Ok(value)
        } else {
            debug!("erase: key {key} not found");
            Err(TableError::NotFound { key })
        }
    }

    /// Removes every entry, keeping the current capacity
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            *chain = Chain::default();
        }
        self.len = 0;
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the average chain length, `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity.get() as f64
    }

    /// Returns the load factor above which the next insert grows the table
    #[must_use]
    pub const fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Changes the growth threshold for subsequent inserts.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidArgument`] unless `threshold` is finite and positive.
    pub fn set_load_factor_threshold(&mut self, threshold: f64) -> Result<(), TableError> {
        config::validate_threshold(threshold)?;
        self.load_factor_threshold = threshold;
        Ok(())
    }

    /// Returns the length of every chain in bucket order
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(|chain| chain.iter().count())
    }

    /// Returns the length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }

    /// Returns an iterator over the key-value pairs in bucket order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { buckets: self.buckets.iter(), current: ChainIter { next: None } }
    }

    /// Entries of the chain `key` hashes to
    fn entries_for(&self, key: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.buckets.get(bucket_index(key, self.capacity)).into_iter().flat_map(Chain::iter)
    }

    /// Whether the next insert must grow the table first
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn needs_growth(&self) -> bool {
        self.len as f64 / self.capacity.get() as f64 > self.load_factor_threshold
    }

    /// Moves every entry into a bucket array sized to the next prime above twice the capacity.
    ///
    /// The new array is allocated before anything is moved, so a failed
    /// allocation leaves the table untouched.
    fn grow(&mut self) -> Result<(), TableError> {
        let new_capacity = next_capacity(self.capacity)?;
        let new_buckets = allocate_buckets(new_capacity)?;

        debug!(
            "growing table from {} to {} buckets with {} entries",
            self.capacity, new_capacity, self.len
        );
        let old_buckets = mem::replace(&mut self.buckets, new_buckets);
        self.capacity = new_capacity;

        for mut chain in old_buckets.into_vec() {
            while let Some(node) = chain.pop_front() {
                let index = bucket_index(node.key, new_capacity);
                if let Some(target) = self.buckets.get_mut(index) {
                    target.push_back(node);
                }
            }
        }
        Ok(())
    }
}

/// Largest bucket count an allocation can describe
fn max_buckets() -> usize {
    isize::MAX.unsigned_abs().checked_div(mem::size_of::<Chain>()).unwrap_or(0)
}

/// Bucket count after growing from `capacity`: the smallest prime above twice it.
///
/// Fails with [`TableError::OutOfMemory`] when the doubled count cannot be
/// allocated, before any prime search.
fn next_capacity(capacity: NonZeroUsize) -> Result<NonZeroUsize, TableError> {
    let doubled = capacity
        .get()
        .checked_mul(2)
        .filter(|&n| n <= max_buckets())
        .ok_or(TableError::OutOfMemory { buckets: usize::MAX })?;
    next_prime(doubled)
        .and_then(NonZeroUsize::new)
        .ok_or(TableError::OutOfMemory { buckets: doubled })
}

/// Reserves `capacity` empty chains without aborting on allocation failure
fn allocate_buckets(capacity: NonZeroUsize) -> Result<Box<[Chain]>, TableError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity.get())
        .map_err(|_| TableError::OutOfMemory { buckets: capacity.get() })?;
    buckets.resize_with(capacity.get(), Chain::default);
    Ok(buckets.into_boxed_slice())
}

/// Iterator over the key-value pairs of the table, in bucket then chain order
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Buckets not yet visited
    buckets: std::slice::Iter<'a, Chain>,
    /// Position in the bucket being visited
    current: ChainIter<'a>,
}

impl<'a> IntoIterator for &'a ChainedHashTable {
    type Item = (i32, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Iterator for Iter<'_> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.next() {
                return Some(entry);
            }
            self.current = self.buckets.next()?.iter();
        }
    }
}
