//! Reading and writing whole ranges as grids or as encoded range data

use crate::decoder::decode_with;
use crate::encoder::encode_with;
use crate::error::RangeError;
use crate::grid::Grid;
use crate::options::CodecOptions;

/// A rectangular block of cells that can hand out and accept its values in
/// one piece.
///
/// Implementors provide the grid-level access; the encoded forms come for
/// free. Writes require the incoming data to match the range's size exactly.
pub trait RangeData {
    /// `(rows, cols)` of this range
    fn dimensions(&self) -> (usize, usize);

    /// Read every value of the range, row-major
    fn read_values(&self) -> Result<Grid, RangeError>;

    /// Overwrite every value of the range.
    ///
    /// Implementors must call [`check_size`] (or an equivalent check) before
    /// touching any cell.
    fn write_values(&mut self, grid: &Grid) -> Result<(), RangeError>;

    /// Read the range as encoded range data
    fn read_encoded(&self) -> Result<String, RangeError> {
        self.read_encoded_with(&CodecOptions::default())
    }

    /// [`RangeData::read_encoded`] with explicit options
    fn read_encoded_with(&self, options: &CodecOptions) -> Result<String, RangeError> {
        let grid = self.read_values()?;
        Ok(encode_with(&grid, options))
    }

    /// Decode range data and write it into the range. Nothing is written if
    /// the data is malformed or has the wrong size.
    fn write_encoded(&mut self, data: &str) -> Result<(), RangeError> {
        self.write_encoded_with(data, &CodecOptions::default())
    }

    /// [`RangeData::write_encoded`] with explicit options
    fn write_encoded_with(&mut self, data: &str, options: &CodecOptions) -> Result<(), RangeError> {
        let grid = decode_with(data, options)?;
        check_size(self.dimensions(), &grid)?;
        self.write_values(&grid)
    }
}

/// Fail with [`RangeError::SizeMismatch`] unless `grid` is `rows x cols`
pub fn check_size((rows, cols): (usize, usize), grid: &Grid) -> Result<(), RangeError> {
    let (data_rows, data_cols) = grid.dimensions();
    if (rows, cols) != (data_rows, data_cols) {
        return Err(RangeError::SizeMismatch {
            rows,
            cols,
            data_rows,
            data_cols,
        });
    }
    Ok(())
}

impl<T: RangeData + ?Sized> RangeData for Box<T> {
    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn read_values(&self) -> Result<Grid, RangeError> {
        (**self).read_values()
    }

    fn write_values(&mut self, grid: &Grid) -> Result<(), RangeError> {
        (**self).write_values(grid)
    }

    fn read_encoded_with(&self, options: &CodecOptions) -> Result<String, RangeError> {
        (**self).read_encoded_with(options)
    }

    fn write_encoded_with(&mut self, data: &str, options: &CodecOptions) -> Result<(), RangeError> {
        (**self).write_encoded_with(data, options)
    }
}
