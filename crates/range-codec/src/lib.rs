//! # range-codec
//!
//! Length-prefixed text encoding for rectangular grids of spreadsheet range
//! values, so a whole range can travel across an automation boundary as one
//! string.
//!
//! ## Format
//!
//! ```text
//! Encoded   := Count "#" Count "#" ValueSeq
//! Count     := D+          -- rows, then columns
//! ValueSeq  := (Length "#" RawChars){rows * cols}, row-major
//! Length    := D+
//! RawChars  := exactly Length characters, any content
//! ```
//!
//! Numbers are plain ASCII decimal with no sign and no leading zeros other
//! than `0` itself. Values are never escaped: a value may contain digits or
//! `#`, and the decoder never looks inside it.
//!
//! ## Example
//!
//! ```rust
//! use range_codec::{decode, encode, Grid};
//!
//! let grid = Grid::new(vec![
//!     vec!["abc", "de", "fghi", "3", "5235"],
//!     vec!["23", "5353", "", "3253", "32"],
//! ])
//! .unwrap();
//!
//! let text = encode(&grid);
//! assert_eq!(text, "2#5#3#abc2#de4#fghi1#34#52352#234#53530#4#32532#32");
//! assert_eq!(decode(&text).unwrap(), grid);
//! ```

pub mod address;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod options;
pub mod range;
pub mod sheet;
pub mod verify;

pub use address::{CellAddress, CellRange};
pub use decoder::{decode, decode_with};
pub use encoder::{encode, encode_rows, encode_rows_with, encode_with};
pub use error::{
    AddressError, DecodeError, DecodeErrorReason, Field, RangeError, ShapeError, VerifyError,
};
pub use grid::Grid;
pub use options::{CodecOptions, LengthUnit};
pub use range::{check_size, RangeData};
pub use sheet::{Sheet, SheetRange, SheetRangeMut};
pub use verify::{check_roundtrip, check_roundtrip_with, verify, verify_with};

/// Separator closing every count and length field
pub const DELIMITER: char = '#';

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Largest block of cells a sheet range will materialize in one read
pub const MAX_RANGE_CELLS: usize = 1 << 22;
