//! Symmetry tests and repetition-period detection
//!
//! Diagonal symmetry is only defined for square grids; any other shape is
//! reported as not symmetric rather than rejected.

use ndarray::{Array2, s};
use serde::Serialize;

use crate::spatial::grid::Grid;
use crate::spatial::transform::{rotate90, rotate180};

/// Left-right mirror symmetry (every row is a palindrome)
pub fn is_horizontally_symmetric(grid: &Grid) -> bool {
    grid.cells().view() == grid.cells().slice(s![.., ..;-1])
}

/// Top-bottom mirror symmetry
pub fn is_vertically_symmetric(grid: &Grid) -> bool {
    grid.cells().view() == grid.cells().slice(s![..;-1, ..])
}

/// Symmetry across the main diagonal
pub fn is_main_diagonal_symmetric(grid: &Grid) -> bool {
    grid.is_square() && grid.cells().view() == grid.cells().t()
}

/// Symmetry across the anti-diagonal
pub fn is_anti_diagonal_symmetric(grid: &Grid) -> bool {
    grid.is_square() && grid.cells().view() == grid.cells().t().slice(s![..;-1, ..;-1])
}

/// Grid equals its own 90° rotation
pub fn is_rotationally_symmetric_90(grid: &Grid) -> bool {
    *grid == rotate90(grid)
}

/// Grid equals its own 180° rotation
pub fn is_rotationally_symmetric_180(grid: &Grid) -> bool {
    *grid == rotate180(grid)
}

/// Every symmetry flag of a single grid
// One flag per independent symmetry test
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SymmetryFlags {
    /// Left-right mirror
    pub horizontal: bool,
    /// Top-bottom mirror
    pub vertical: bool,
    /// Main diagonal
    pub main_diagonal: bool,
    /// Anti-diagonal
    pub anti_diagonal: bool,
    /// Invariant under 90° rotation
    pub rotational_90: bool,
    /// Invariant under 180° rotation
    pub rotational_180: bool,
}

impl SymmetryFlags {
    /// Evaluate every symmetry test on `grid`
    pub fn of(grid: &Grid) -> Self {
        Self {
            horizontal: is_horizontally_symmetric(grid),
            vertical: is_vertically_symmetric(grid),
            main_diagonal: is_main_diagonal_symmetric(grid),
            anti_diagonal: is_anti_diagonal_symmetric(grid),
            rotational_90: is_rotationally_symmetric_90(grid),
            rotational_180: is_rotationally_symmetric_180(grid),
        }
    }

    /// Flags that hold for both `self` and `other`
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self {
            horizontal: self.horizontal && other.horizontal,
            vertical: self.vertical && other.vertical,
            main_diagonal: self.main_diagonal && other.main_diagonal,
            anti_diagonal: self.anti_diagonal && other.anti_diagonal,
            rotational_90: self.rotational_90 && other.rotational_90,
            rotational_180: self.rotational_180 && other.rotational_180,
        }
    }

    /// Flags that hold for every grid in `grids`; all set when `grids` is empty
    pub fn common<'a>(grids: impl IntoIterator<Item = &'a Grid>) -> Self {
        grids.into_iter().map(Self::of).fold(
            Self {
                horizontal: true,
                vertical: true,
                main_diagonal: true,
                anti_diagonal: true,
                rotational_90: true,
                rotational_180: true,
            },
            Self::intersect,
        )
    }

    /// Whether any symmetry holds
    pub const fn any(self) -> bool {
        self.horizontal
            || self.vertical
            || self.main_diagonal
            || self.anti_diagonal
            || self.rotational_90
            || self.rotational_180
    }
}

/// Smallest segment count above one splitting the rows into identical bands
///
/// Tries each divisor `d` of the row count in increasing order and returns
/// the first for which the grid is `d` stacked copies of its top band.
pub fn row_repetition(grid: &Grid) -> Option<usize> {
    let rows = grid.rows();
    (2..=rows)
        .filter(|divisor| rows % divisor == 0)
        .find(|&divisor| is_tiled_by(grid.cells(), rows / divisor, grid.cols()))
}

/// Smallest segment count above one splitting the columns into identical bands
pub fn column_repetition(grid: &Grid) -> Option<usize> {
    let cols = grid.cols();
    (2..=cols)
        .filter(|divisor| cols % divisor == 0)
        .find(|&divisor| is_tiled_by(grid.cells(), grid.rows(), cols / divisor))
}

/// First 2-D tile shape (tile_rows, tile_cols) whose repetition rebuilds the grid
///
/// Divisor pairs are tried in increasing row divisor, then increasing column
/// divisor; both divisors start at two.
pub fn tile_period(grid: &Grid) -> Option<(usize, usize)> {
    let (rows, cols) = grid.dims();
    (2..=rows)
        .filter(|row_divisor| rows % row_divisor == 0)
        .flat_map(|row_divisor| {
            (2..=cols)
                .filter(move |col_divisor| cols % col_divisor == 0)
                .map(move |col_divisor| (rows / row_divisor, cols / col_divisor))
        })
        .find(|&(tile_rows, tile_cols)| is_tiled_by(grid.cells(), tile_rows, tile_cols))
}

// Whether every tile_rows×tile_cols block equals the top-left block
fn is_tiled_by(cells: &Array2<u8>, tile_rows: usize, tile_cols: usize) -> bool {
    if tile_rows == 0 || tile_cols == 0 {
        return false;
    }
    cells
        .indexed_iter()
        .all(|((row, col), value)| cells.get((row % tile_rows, col % tile_cols)) == Some(value))
}

/// Repetition summary of a single grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RepetitionFlags {
    /// Segment count of the first repeating row band split
    pub rows: Option<usize>,
    /// Segment count of the first repeating column band split
    pub cols: Option<usize>,
    /// First repeating 2-D tile shape
    pub tile: Option<(usize, usize)>,
}

impl RepetitionFlags {
    /// Run every repetition detector on `grid`
    pub fn of(grid: &Grid) -> Self {
        Self {
            rows: row_repetition(grid),
            cols: column_repetition(grid),
            tile: tile_period(grid),
        }
    }

    /// Whether any repetition was detected
    pub const fn any(&self) -> bool {
        self.rows.is_some() || self.cols.is_some() || self.tile.is_some()
    }
}
