//! Generic bounds-checked 2-D container.
//!
//! Dimensions are fixed at creation; resizing a game board is done by
//! replacing the grid wholesale. All access is bounds-checked, and the
//! reported dimensions are guarded against disagreeing with the backing
//! storage.

use derive_more::{Display, Error};

/// Errors produced by [`Grid`] accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// An index exceeded the configured bounds.
    #[display("position ({row}, {col}) out of range for a {rows}x{cols} grid")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Configured row count.
        rows: usize,
        /// Configured column count.
        cols: usize,
    },
    /// The stored dimensions disagree with the backing storage.
    ///
    /// This is a corruption guard: it indicates a bug, not caller error.
    #[display("grid reports {expected} {axis} but storage holds {actual}")]
    DimensionMismatch {
        /// Which dimension disagreed ("rows" or "columns").
        axis: &'static str,
        /// The configured dimension.
        expected: usize,
        /// What the backing storage actually holds.
        actual: usize,
    },
}

/// A rows x cols matrix with bounds-checked access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<Vec<T>>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid of the given dimensions with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            cells: vec![vec![fill; cols]; rows],
            rows,
            cols,
        }
    }
}

impl<T> Grid<T> {
    /// Returns the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if either index exceeds the bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<&T, GridError> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(self.out_of_range(row, col))
    }

    /// Overwrites the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if either index exceeds the bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), GridError> {
        let err = self.out_of_range(row, col);
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(err)?;
        *cell = value;
        Ok(())
    }

    /// Returns true iff `(row, col)` lies within the configured bounds.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Returns the configured row count.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the backing storage has
    /// drifted from the configured dimension.
    pub fn rows(&self) -> Result<usize, GridError> {
        if self.cells.len() != self.rows {
            return Err(GridError::DimensionMismatch {
                axis: "rows",
                expected: self.rows,
                actual: self.cells.len(),
            });
        }
        Ok(self.rows)
    }

    /// Returns the configured column count.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if any row of the backing
    /// storage has drifted from the configured dimension.
    pub fn cols(&self) -> Result<usize, GridError> {
        for row in &self.cells {
            if row.len() != self.cols {
                return Err(GridError::DimensionMismatch {
                    axis: "columns",
                    expected: self.cols,
                    actual: row.len(),
                });
            }
        }
        Ok(self.cols)
    }

    /// Iterates over all cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }

    fn out_of_range(&self, row: usize, col: usize) -> GridError {
        GridError::OutOfRange {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: PartialEq> Grid<T> {
    /// Counts the cells equal to `value`.
    pub fn count(&self, value: &T) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| *cell == value).count())
            .sum()
    }
}
