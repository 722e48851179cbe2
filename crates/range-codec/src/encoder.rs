//! Range data encoder
//!
//! Output is `R#C#` followed by every cell, row-major, as
//! `<length>#<raw text>`. Raw text is copied verbatim; the length prefix is
//! what delimits it.

use std::fmt::Write;

use crate::error::ShapeError;
use crate::grid::Grid;
use crate::options::CodecOptions;
use crate::DELIMITER;

/// Encode a grid, counting lengths in chars.
///
/// # Examples
/// ```
/// use range_codec::{encode, Grid};
///
/// let grid = Grid::new(vec![vec!["3#ab", ""]]).unwrap();
/// assert_eq!(encode(&grid), "1#2#4#3#ab0#");
/// ```
pub fn encode(grid: &Grid) -> String {
    encode_with(grid, &CodecOptions::default())
}

/// Encode a grid with explicit options
pub fn encode_with(grid: &Grid, options: &CodecOptions) -> String {
    let unit = options.length_unit;
    let mut out = String::with_capacity(encoded_capacity(grid));

    push_count(&mut out, grid.row_count());
    push_count(&mut out, grid.col_count());

    for value in grid.cells() {
        push_count(&mut out, unit.measure(value));
        out.push_str(value);
    }

    out
}

/// Encode a sequence of rows directly.
///
/// Rows of unequal length are rejected and nothing is produced. With no rows
/// there is no width to report, so the result is `0#0#`.
pub fn encode_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<String, ShapeError> {
    encode_rows_with(rows, &CodecOptions::default())
}

/// [`encode_rows`] with explicit options
pub fn encode_rows_with<S: AsRef<str>>(
    rows: &[Vec<S>],
    options: &CodecOptions,
) -> Result<String, ShapeError> {
    let width = rows.first().map_or(0, Vec::len);
    if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(ShapeError::RaggedRow {
            row,
            len: values.len(),
            expected: width,
        });
    }

    let unit = options.length_unit;
    let mut out = String::new();
    push_count(&mut out, rows.len());
    push_count(&mut out, width);

    for value in rows.iter().flatten() {
        let value: &str = value.as_ref();
        push_count(&mut out, unit.measure(value));
        out.push_str(value);
    }

    Ok(out)
}

fn push_count(out: &mut String, n: usize) {
    // Writing to a String cannot fail
    let _ = write!(out, "{n}");
    out.push(DELIMITER);
}

/// Header plus content plus a rough allowance for each length prefix
fn encoded_capacity(grid: &Grid) -> usize {
    let content: usize = grid.cells().iter().map(String::len).sum();
    content + grid.cells().len() * 3 + 16
}
