//! Crate-wide error type.

use thiserror::Error;

/// Errors raised while building a registry, resolving geometry, or loading
/// input files.
#[derive(Error, Debug)]
pub enum PickError {
    /// A pending-quantity entry or pair references a name absent from the
    /// registry.
    #[error("location `{0}` is not in the registry")]
    MissingLocation(String),

    /// Two registry records share the same name.
    #[error("duplicate location name `{0}`")]
    DuplicateLocation(String),

    /// A pending quantity was negative.
    #[error("location `{name}` has negative pending quantity {layers}")]
    InvalidQuantity {
        /// Offending location name.
        name: String,
        /// The rejected quantity.
        layers: i64,
    },

    /// The row structure cannot support path synthesis.
    #[error("degenerate layout: {0}")]
    DegenerateLayout(String),

    /// A CSV row could not be interpreted.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number within the file.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// CSV-level read failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PickError>;
