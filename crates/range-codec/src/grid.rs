//! Rectangular grid of text cell values

use crate::error::ShapeError;

/// A rectangular two-dimensional grid of text values.
///
/// Cells are stored row-major in one flat vector. The row and column counts
/// are kept explicitly, so a grid with zero rows still remembers its width
/// (and a grid with zero columns its height).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<String>,
}

impl Grid {
    /// Build a grid from a sequence of rows.
    ///
    /// Every row must have the same length as the first one. An empty
    /// sequence yields the 0x0 grid.
    ///
    /// # Examples
    /// ```
    /// use range_codec::Grid;
    ///
    /// let grid = Grid::new(vec![vec!["a", "b"], vec!["c", "d"]]).unwrap();
    /// assert_eq!(grid.row_count(), 2);
    /// assert_eq!(grid.get(1, 0), Some("c"));
    ///
    /// assert!(Grid::new(vec![vec!["a", "b"], vec!["c"]]).is_err());
    /// ```
    pub fn new<R, S>(rows: impl IntoIterator<Item = R>) -> Result<Self, ShapeError>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells = Vec::new();
        let mut row_count = 0;
        let mut width = 0;

        for (row, values) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(values.into_iter().map(Into::into));
            let len = cells.len() - before;

            if row == 0 {
                width = len;
            } else if len != width {
                return Err(ShapeError::RaggedRow {
                    row,
                    len,
                    expected: width,
                });
            }
            row_count += 1;
        }

        Ok(Self {
            rows: row_count,
            cols: width,
            cells,
        })
    }

    /// Build a grid from row-major cells with explicit dimensions
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<String>) -> Result<Self, ShapeError> {
        match rows.checked_mul(cols) {
            Some(n) if n == cells.len() => Ok(Self { rows, cols, cells }),
            _ => Err(ShapeError::CellCount {
                rows,
                cols,
                actual: cells.len(),
            }),
        }
    }

    /// Caller guarantees `cells.len() == rows * cols`
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<String>) -> Self {
        debug_assert_eq!(Some(cells.len()), rows.checked_mul(cols));
        Self { rows, cols, cells }
    }

    /// A `rows x cols` grid where every cell is the empty string
    pub fn empty(rows: usize, cols: usize) -> Result<Self, ShapeError> {
        let count = rows
            .checked_mul(cols)
            .ok_or(ShapeError::TooManyCells { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![String::new(); count],
        })
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn col_count(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the grid holds no cells (zero rows or zero columns)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell value (0-based)
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).map(String::as_str)
    }

    /// Replace a cell value. Returns the previous value, or `None` when the
    /// position is outside the grid (in which case nothing changes).
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) -> Option<String> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let slot = &mut self.cells[row * self.cols + col];
        Some(std::mem::replace(slot, value.into()))
    }

    /// Get one row as a slice
    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        (0..self.rows).map(move |r| {
            let start = r * self.cols;
            &self.cells[start..start + self.cols]
        })
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Copy out as a vector of rows
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows().map(<[String]>::to_vec).collect()
    }

    /// Consume into a vector of rows.
    ///
    /// A 0xC grid becomes an empty vector; an Rx0 grid becomes `R` empty rows.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        let mut out = Vec::with_capacity(self.rows);
        let mut cells = self.cells.into_iter();
        for _ in 0..self.rows {
            out.push(cells.by_ref().take(self.cols).collect());
        }
        out
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        Grid::new(rows)
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.into_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rectangular() {
        let grid = Grid::new(vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]).unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.get(0, 2), Some("c"));
        assert_eq!(grid.get(1, 1), Some("e"));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_new_ragged() {
        let err = Grid::new(vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::RaggedRow {
                row: 2,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_new_empty_sequence() {
        let grid = Grid::new(Vec::<Vec<String>>::new()).unwrap();
        assert_eq!(grid.dimensions(), (0, 0));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_rows_without_columns() {
        let grid = Grid::new(vec![Vec::<String>::new(), Vec::new()]).unwrap();
        assert_eq!(grid.dimensions(), (2, 0));
        assert!(grid.is_empty());
        assert_eq!(grid.into_rows(), vec![Vec::<String>::new(), Vec::new()]);
    }

    #[test]
    fn test_from_cells() {
        let grid = Grid::from_cells(2, 2, vec!["1".into(), "2".into(), "3".into(), "4".into()])
            .unwrap();
        assert_eq!(grid.row(1), Some(&["3".to_string(), "4".to_string()][..]));

        let err = Grid::from_cells(2, 2, vec!["1".into()]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::CellCount {
                rows: 2,
                cols: 2,
                actual: 1
            }
        );

        assert!(Grid::from_cells(usize::MAX, 2, Vec::new()).is_err());
    }

    #[test]
    fn test_empty_overflow() {
        assert_eq!(
            Grid::empty(usize::MAX, 2),
            Err(ShapeError::TooManyCells {
                rows: usize::MAX,
                cols: 2
            })
        );
        assert_eq!(Grid::empty(usize::MAX, 0).unwrap().dimensions(), (usize::MAX, 0));
    }

    #[test]
    fn test_zero_rows_keeps_width() {
        let grid = Grid::from_cells(0, 3, Vec::new()).unwrap();
        assert_eq!(grid.dimensions(), (0, 3));
        assert_ne!(grid, Grid::empty(0, 0).unwrap());
        assert!(grid.into_rows().is_empty());
    }

    #[test]
    fn test_set() {
        let mut grid = Grid::empty(2, 2).unwrap();
        assert_eq!(grid.set(1, 0, "x"), Some(String::new()));
        assert_eq!(grid.get(1, 0), Some("x"));
        assert_eq!(grid.set(2, 0, "y"), None);
    }

    #[test]
    fn test_into_rows_roundtrip() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        let grid = Grid::try_from(rows.clone()).unwrap();
        assert_eq!(grid.to_rows(), rows);
        assert_eq!(Vec::<Vec<String>>::from(grid), rows);
    }
}
