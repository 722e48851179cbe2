//! Error types for range-codec

use std::fmt;

use thiserror::Error;

/// A grid whose rows do not all share the same length, or whose cell count
/// does not match its declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A row is shorter or longer than the first row
    #[error("row {row} has {len} values, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Flat cell storage that cannot fill `rows * cols` slots exactly
    #[error("{actual} cells cannot fill a {rows}x{cols} grid")]
    CellCount {
        rows: usize,
        cols: usize,
        actual: usize,
    },

    /// `rows * cols` does not fit in usize
    #[error("a {rows}x{cols} grid has more cells than fit in memory")]
    TooManyCells { rows: usize, cols: usize },
}

/// The numeric field the decoder was reading when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The leading row count
    Rows,
    /// The column count after the row count
    Columns,
    /// The length prefix of the value at this row-major index
    Length { index: usize },
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Rows => write!(f, "row count"),
            Field::Columns => write!(f, "column count"),
            Field::Length { index } => write!(f, "length of value {index}"),
        }
    }
}

/// Malformed encoded range data.
///
/// `offset` is the byte offset in the input at which the problem was
/// detected. No partial grid is ever returned alongside this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed range data at offset {offset}: {reason}")]
pub struct DecodeError {
    pub offset: usize,
    pub reason: DecodeErrorReason,
}

impl DecodeError {
    pub(crate) fn new(offset: usize, reason: DecodeErrorReason) -> Self {
        Self { offset, reason }
    }

    /// True when the input simply ended too early, as opposed to containing
    /// something it should not.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self.reason,
            DecodeErrorReason::UnexpectedEnd { .. } | DecodeErrorReason::ValueTruncated { .. }
        )
    }
}

/// What the decoder expected and did not find.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorReason {
    #[error("expected a digit for the {field}, found {found:?}")]
    ExpectedDigit { field: Field, found: char },

    #[error("leading zero in the {field}")]
    LeadingZero { field: Field },

    #[error("expected '#' after the {field}, found {found:?}")]
    ExpectedDelimiter { field: Field, found: char },

    #[error("the {field} does not fit in usize")]
    NumberOverflow { field: Field },

    #[error("{rows}x{cols} cells overflow usize")]
    CellCountOverflow { rows: usize, cols: usize },

    #[error("input ended while reading the {field}")]
    UnexpectedEnd { field: Field },

    #[error("value {index} declares length {declared} but only {available} remain")]
    ValueTruncated {
        index: usize,
        declared: usize,
        available: usize,
    },

    #[error("length of value {index} ends inside a character")]
    SplitCharacter { index: usize },

    #[error("{remaining} unconsumed bytes after the last value")]
    TrailingData { remaining: usize },
}

/// Failure of a round-trip self-check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Re-encoding the decoded grid did not reproduce the original text
    #[error("re-encoded data differs from the input at byte {offset}")]
    Mismatch { offset: usize },

    /// Decoding the encoded grid did not reproduce the original grid
    #[error("decoded grid differs from the source grid")]
    GridMismatch,
}

/// Invalid A1-style cell address or range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),
}

/// Errors from reading or writing a range through [`crate::RangeData`]
#[derive(Debug, Error)]
pub enum RangeError {
    /// The grid being written does not have the range's dimensions
    #[error("range is {rows}x{cols} but data is {data_rows}x{data_cols}")]
    SizeMismatch {
        rows: usize,
        cols: usize,
        data_rows: usize,
        data_cols: usize,
    },

    /// The range holds more cells than one read may materialize
    #[error("range is {rows}x{cols}, larger than the {limit} cell limit")]
    TooLarge {
        rows: usize,
        cols: usize,
        limit: usize,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl RangeError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RangeError::Other(msg.into())
    }
}
