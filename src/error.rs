use thiserror::Error;

/// Result type for building a dancing-links structure
pub type Result<T> = std::result::Result<T, InvalidMatrixError>;

/// Reasons an input matrix is rejected before any node is linked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMatrixError {
    #[error("matrix has no rows")]
    EmptyMatrix,

    #[error("matrix has no columns")]
    NoColumns,

    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("entry at row {row}, column {column} is {value}, expected 0 or 1")]
    InvalidEntry { row: usize, column: usize, value: u8 },
}
