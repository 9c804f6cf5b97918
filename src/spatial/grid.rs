//! Immutable 2-D color grids with validation at every construction boundary
//!
//! Cells hold values in `0..=9`. The only empty grid is the degenerate 0×0
//! grid: any shape with a zero dimension is normalized to 0×0 so that grid
//! equality matches row-list equality.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::io::configuration::MAX_COLOR;
use crate::io::error::{Result, dimension_error, invalid_parameter};

/// Rectangular grid of color values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Grid {
    cells: Array2<u8>,
}

/// Reason a row list does not form a well-formed grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedGrid {
    /// A row's length differs from the first row's length
    Ragged {
        /// Index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },
    /// Rows exist but none of them has any cells
    EmptyRows {
        /// Number of zero-length rows
        rows: usize,
    },
    /// A cell value lies outside `0..=9`
    ValueOutOfRange {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        col: usize,
        /// The offending value
        value: i64,
    },
}

impl fmt::Display for MalformedGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::EmptyRows { rows } => write!(f, "{rows} rows without any cells"),
            Self::ValueOutOfRange { row, col, value } => {
                write!(f, "value {value} at ({row}, {col}) is outside 0..=9")
            }
        }
    }
}

impl Grid {
    /// The degenerate 0×0 grid
    pub fn empty() -> Self {
        Self {
            cells: Array2::zeros((0, 0)),
        }
    }

    /// Create a grid with every cell set to `value`
    ///
    /// # Errors
    ///
    /// Returns an error if `value` exceeds 9
    pub fn filled(rows: usize, cols: usize, value: u8) -> Result<Self> {
        if value > MAX_COLOR {
            return Err(invalid_parameter("value", &value, &"must be within 0..=9"));
        }
        Ok(Self::wrap(Array2::from_elem((rows, cols), value)))
    }

    /// Build a grid from a cell array, validating every value
    ///
    /// # Errors
    ///
    /// Returns an error if any cell exceeds 9
    pub fn from_array(cells: Array2<u8>) -> Result<Self> {
        if let Some(&value) = cells.iter().find(|&&value| value > MAX_COLOR) {
            return Err(invalid_parameter("cell", &value, &"must be within 0..=9"));
        }
        Ok(Self::wrap(cells))
    }

    /// Build a grid from rows of cell values
    ///
    /// # Errors
    ///
    /// Returns an error if rows differ in length or a value exceeds 9
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let widened: Vec<Vec<i64>> = rows
            .iter()
            .map(|row| row.iter().map(|&value| i64::from(value)).collect())
            .collect();
        Self::from_raw_rows(&widened).map_err(|malformed| dimension_error("from_rows", &malformed))
    }

    /// Validate unconstrained integer rows into a grid
    ///
    /// # Errors
    ///
    /// Returns the first structural or value problem found, scanning rows in order
    pub fn from_raw_rows(rows: &[Vec<i64>]) -> std::result::Result<Self, MalformedGrid> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let width = first.len();
        if width == 0 {
            if let Some((row, found)) = rows
                .iter()
                .enumerate()
                .find_map(|(index, row)| (!row.is_empty()).then_some((index, row.len())))
            {
                return Err(MalformedGrid::Ragged {
                    row,
                    expected: 0,
                    found,
                });
            }
            return Err(MalformedGrid::EmptyRows { rows: rows.len() });
        }

        let mut flat = Vec::with_capacity(rows.len() * width);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MalformedGrid::Ragged {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            for (col_index, &value) in row.iter().enumerate() {
                let cell = u8::try_from(value)
                    .ok()
                    .filter(|&cell| cell <= MAX_COLOR)
                    .ok_or(MalformedGrid::ValueOutOfRange {
                        row: row_index,
                        col: col_index,
                        value,
                    })?;
                flat.push(cell);
            }
        }

        Array2::from_shape_vec((rows.len(), width), flat)
            .map(Self::wrap)
            .map_err(|_shape_error| MalformedGrid::EmptyRows { rows: rows.len() })
    }

    // Callers guarantee values are already within range
    pub(crate) fn wrap(cells: Array2<u8>) -> Self {
        if cells.nrows() == 0 || cells.ncols() == 0 {
            Self::empty()
        } else {
            Self { cells }
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Whether this is the 0×0 grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the grid has as many rows as columns
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Cell value at (row, col), if in bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get((row, col)).copied()
    }

    /// Copy of a single row, if in bounds
    pub fn row(&self, row: usize) -> Option<Vec<u8>> {
        (row < self.rows()).then(|| self.cells.row(row).to_vec())
    }

    /// Underlying cell array
    pub const fn cells(&self) -> &Array2<u8> {
        &self.cells
    }

    /// Iterate over cell values in row-major order
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().copied()
    }

    /// Iterate over ((row, col), value) in row-major order
    pub fn indexed_values(&self) -> impl Iterator<Item = ((usize, usize), u8)> + '_ {
        self.cells.indexed_iter().map(|(position, &value)| (position, value))
    }

    /// Number of cells holding `value`
    pub fn count(&self, value: u8) -> usize {
        self.values().filter(|&cell| cell == value).count()
    }

    /// Rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Rows widened to the integer representation candidates produce
    pub fn to_raw_rows(&self) -> Vec<Vec<i64>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&value| i64::from(value)).collect())
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = crate::io::error::SolverError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(empty)");
        }
        for (index, row) in self.cells.rows().into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for value in row {
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}
