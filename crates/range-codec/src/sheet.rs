//! In-memory sheet of text cells
//!
//! Sparse row-based storage: only non-empty cells are kept, in
//! `BTreeMap<row, BTreeMap<col, value>>` so iteration is row-major. An empty
//! string and a missing cell are the same thing.

use std::collections::BTreeMap;

use crate::address::{CellAddress, CellRange};
use crate::error::{AddressError, RangeError};
use crate::grid::Grid;
use crate::range::{check_size, RangeData};
use crate::{MAX_COLS, MAX_RANGE_CELLS, MAX_ROWS};

/// A named sheet of text cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, BTreeMap<u16, String>>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Create a sheet whose top-left block holds `rows`. Rows may differ in
    /// length.
    pub fn from_rows<R, S>(
        name: impl Into<String>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, AddressError>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sheet = Self::new(name);
        for (r, values) in rows.into_iter().enumerate() {
            let row = index_to_row(r)?;
            for (c, value) in values.into_iter().enumerate() {
                let col = index_to_col(c)?;
                sheet.set_at(row, col, value)?;
            }
        }
        Ok(sheet)
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a cell value by 0-based position; empty cells read as `""`
    pub fn get_at(&self, row: u32, col: u16) -> &str {
        self.rows
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .map_or("", String::as_str)
    }

    /// Get a cell value by A1 address
    pub fn get(&self, address: &str) -> Result<&str, AddressError> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_at(addr.row, addr.col))
    }

    /// Set a cell value by 0-based position. Setting `""` clears the cell.
    pub fn set_at(
        &mut self,
        row: u32,
        col: u16,
        value: impl Into<String>,
    ) -> Result<(), AddressError> {
        if row >= MAX_ROWS {
            return Err(AddressError::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(AddressError::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }

        let value = value.into();
        if value.is_empty() {
            if let Some(cols) = self.rows.get_mut(&row) {
                cols.remove(&col);
                if cols.is_empty() {
                    self.rows.remove(&row);
                }
            }
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
        Ok(())
    }

    /// Set a cell value by A1 address
    pub fn set(&mut self, address: &str, value: impl Into<String>) -> Result<(), AddressError> {
        let addr = CellAddress::parse(address)?;
        self.set_at(addr.row, addr.col, value)
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Smallest range covering every non-empty cell, or `None` if the sheet
    /// is empty
    pub fn used_range(&self) -> Option<CellRange> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;
        let first_col = self.rows.values().filter_map(|c| c.keys().next()).min()?;
        let last_col = self
            .rows
            .values()
            .filter_map(|c| c.keys().next_back())
            .max()?;

        Some(CellRange::from_indices(
            first_row, *first_col, last_row, *last_col,
        ))
    }

    /// Copy out everything from A1 to the bottom-right used cell
    pub fn to_rows(&self) -> Result<Vec<Vec<String>>, RangeError> {
        match self.used_range() {
            Some(used) => Ok(self
                .range(CellRange::from_indices(0, 0, used.end.row, used.end.col))
                .read_values()?
                .into_rows()),
            None => Ok(Vec::new()),
        }
    }

    /// Read-only view of a range
    pub fn range(&self, range: CellRange) -> SheetRange<'_> {
        SheetRange { sheet: self, range }
    }

    /// Read-write view of a range
    pub fn range_mut(&mut self, range: CellRange) -> SheetRangeMut<'_> {
        SheetRangeMut { sheet: self, range }
    }

    fn read_block(&self, range: &CellRange) -> Result<Grid, RangeError> {
        let (rows, cols) = range.dimensions();
        if range.cell_count() > MAX_RANGE_CELLS as u64 {
            return Err(RangeError::TooLarge {
                rows,
                cols,
                limit: MAX_RANGE_CELLS,
            });
        }
        let mut grid = Grid::empty(rows, cols)?;
        let (top, left) = (range.start.row, range.start.col);

        for (&row, values) in self.rows.range(range.start.row..=range.end.row) {
            for (&col, value) in values.range(range.start.col..=range.end.col) {
                grid.set((row - top) as usize, (col - left) as usize, value.as_str());
            }
        }
        Ok(grid)
    }
}

fn index_to_row(index: usize) -> Result<u32, AddressError> {
    u32::try_from(index)
        .ok()
        .filter(|&r| r < MAX_ROWS)
        .ok_or_else(|| {
            AddressError::RowOutOfBounds(u32::try_from(index).unwrap_or(u32::MAX), MAX_ROWS - 1)
        })
}

fn index_to_col(index: usize) -> Result<u16, AddressError> {
    u16::try_from(index)
        .ok()
        .filter(|&c| c < MAX_COLS)
        .ok_or_else(|| {
            AddressError::ColumnOutOfBounds(u32::try_from(index).unwrap_or(u32::MAX), MAX_COLS - 1)
        })
}

/// A read-only view of a range within a [`Sheet`]
pub struct SheetRange<'a> {
    sheet: &'a Sheet,
    range: CellRange,
}

impl<'a> SheetRange<'a> {
    /// The cell range this view covers
    pub fn range(&self) -> &CellRange {
        &self.range
    }

    /// Read every value, row-major
    pub fn read_values(&self) -> Result<Grid, RangeError> {
        self.sheet.read_block(&self.range)
    }

    /// Read every value as encoded range data
    pub fn read_encoded(&self) -> Result<String, RangeError> {
        Ok(crate::encode(&self.read_values()?))
    }
}

/// A read-write view of a range within a [`Sheet`]
pub struct SheetRangeMut<'a> {
    sheet: &'a mut Sheet,
    range: CellRange,
}

impl<'a> SheetRangeMut<'a> {
    /// The cell range this view covers
    pub fn range(&self) -> &CellRange {
        &self.range
    }
}

impl<'a> RangeData for SheetRangeMut<'a> {
    fn dimensions(&self) -> (usize, usize) {
        self.range.dimensions()
    }

    fn read_values(&self) -> Result<Grid, RangeError> {
        self.sheet.read_block(&self.range)
    }

    fn write_values(&mut self, grid: &Grid) -> Result<(), RangeError> {
        check_size(self.dimensions(), grid)?;

        for (addr, value) in self.range.cells().zip(grid.cells()) {
            self.sheet.set_at(addr.row, addr.col, value.as_str())?;
        }
        tracing::trace!("wrote {} cells to {}!{}", grid.cells().len(), self.sheet.name, self.range);
        Ok(())
    }
}
