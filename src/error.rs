use thiserror::Error;

/// Errors reported by [`HashTable`](crate::HashTable) operations.
///
/// Every failure is raised before the table is touched, so an `Err` never
/// leaves a partially applied mutation behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// A caller-supplied argument was rejected: an absent key passed to one of
    /// the checked keyed operations, or an unusable table configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The operation is not supported by this table.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, TableError>;
