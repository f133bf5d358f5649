use crate::error::Result;
use crate::error::TableError;

/// Number of buckets allocated by [`HashTable::new`](crate::HashTable::new)
/// and restored by [`HashTable::clear`](crate::HashTable::clear).
pub const DEFAULT_CAPACITY: usize = 16;

/// Load-factor ceiling used when none is supplied.
pub const DEFAULT_MAX_LOAD: f64 = 0.75;

/// Sizing parameters for a [`HashTable`](crate::HashTable).
///
/// `capacity` is the length of the bucket array and `max_load` is the ceiling
/// on `len / capacity`. Once a table is built, `max_load` never changes
/// while `capacity` only grows.
///
/// # Examples
///
/// ```rust
/// use chain_hash::TableConfig;
///
/// let config = TableConfig::new(64, 0.5).unwrap();
/// assert_eq!(config.capacity, 64);
/// assert_eq!(config.max_load, 0.5);
///
/// assert!(TableConfig::new(0, 0.75).is_err());
/// assert!(TableConfig::new(8, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets.
    pub capacity: usize,
    /// Maximum load factor before the bucket array is doubled.
    pub max_load: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_load: DEFAULT_MAX_LOAD,
        }
    }
}

impl TableConfig {
    /// Creates and validates a configuration.
    pub fn new(capacity: usize, max_load: f64) -> Result<Self> {
        let config = Self { capacity, max_load };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration with the given capacity and the default load
    /// factor.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, DEFAULT_MAX_LOAD)
    }

    /// Checks that the table can be built from this configuration.
    ///
    /// The capacity must be non-zero and the load factor must be a finite
    /// number greater than zero.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(TableError::InvalidArgument("capacity must be greater than zero"));
        }
        if !self.max_load.is_finite() || self.max_load <= 0.0 {
            return Err(TableError::InvalidArgument(
                "max load must be a finite number greater than zero",
            ));
        }
        Ok(())
    }
}
