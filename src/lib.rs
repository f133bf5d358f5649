#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bucket;

/// Table sizing parameters and their defaults.
pub mod config;

/// The key-identity entry stored in buckets.
pub mod entry;

/// Error type shared by all table operations.
pub mod error;

/// A chaining hash table with a configurable load factor.
///
/// This module provides the `HashTable` container together with its
/// iterators and, behind the `stats` feature, bucket-level statistics.
pub mod hash_table;

/// A hash set backed by the chaining `HashTable`.
///
/// This module provides the set type returned by `HashTable::key_set`.
pub mod hash_set;

/// Hash code mixing, bucket reduction and the default hasher builder.
pub mod hasher;

pub use bucket::Bucket;
pub use config::TableConfig;
pub use entry::Entry;
pub use error::TableError;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use hasher::DefaultHashBuilder;
