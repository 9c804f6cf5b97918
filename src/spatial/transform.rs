//! Structural grid operations: rotation, reflection, tiling, scaling, margins and recoloring
//!
//! Every operation returns a new grid. Shape preconditions are reported as
//! dimension errors rather than clamped.

use ndarray::{Array2, Axis, s};

use crate::io::configuration::{COLOR_COUNT, MAX_COLOR};
use crate::io::error::{Result, dimension_error, invalid_parameter};
use crate::spatial::grid::Grid;

/// Rotate 90° clockwise
pub fn rotate90(grid: &Grid) -> Grid {
    // Clockwise rotation is a vertical flip followed by a transpose
    Grid::wrap(grid.cells().slice(s![..;-1, ..]).t().to_owned())
}

/// Rotate 180°
pub fn rotate180(grid: &Grid) -> Grid {
    Grid::wrap(grid.cells().slice(s![..;-1, ..;-1]).to_owned())
}

/// Rotate 270° clockwise (90° counter-clockwise)
pub fn rotate270(grid: &Grid) -> Grid {
    Grid::wrap(grid.cells().t().slice(s![..;-1, ..]).to_owned())
}

/// Mirror left-right
pub fn flip_horizontal(grid: &Grid) -> Grid {
    Grid::wrap(grid.cells().slice(s![.., ..;-1]).to_owned())
}

/// Mirror top-bottom
pub fn flip_vertical(grid: &Grid) -> Grid {
    Grid::wrap(grid.cells().slice(s![..;-1, ..]).to_owned())
}

/// Swap rows and columns (reflect across the main diagonal)
pub fn transpose(grid: &Grid) -> Grid {
    Grid::wrap(grid.cells().t().to_owned())
}

/// Reflect across the anti-diagonal
pub fn anti_transpose(grid: &Grid) -> Grid {
    Grid::wrap(grid.cells().t().slice(s![..;-1, ..;-1]).to_owned())
}

/// Replicate the grid `rows` times vertically and `cols` times horizontally
pub fn tile(grid: &Grid, rows: usize, cols: usize) -> Grid {
    let (height, width) = grid.dims();
    let cells = grid.cells();
    Grid::wrap(Array2::from_shape_fn(
        (height * rows, width * cols),
        |(row, col)| cells.get((row % height, col % width)).copied().unwrap_or(0),
    ))
}

/// Expand each cell into a `factor`×`factor` block
///
/// # Errors
///
/// Returns an error if `factor` is zero
pub fn scale_up(grid: &Grid, factor: usize) -> Result<Grid> {
    if factor == 0 {
        return Err(invalid_parameter("factor", &factor, &"must be positive"));
    }
    let (height, width) = grid.dims();
    let cells = grid.cells();
    Ok(Grid::wrap(Array2::from_shape_fn(
        (height * factor, width * factor),
        |(row, col)| cells.get((row / factor, col / factor)).copied().unwrap_or(0),
    )))
}

/// Keep every `factor`-th cell along both axes
///
/// # Errors
///
/// Returns an error if `factor` is zero or does not divide both dimensions
pub fn scale_down(grid: &Grid, factor: usize) -> Result<Grid> {
    if factor == 0 {
        return Err(invalid_parameter("factor", &factor, &"must be positive"));
    }
    let (height, width) = grid.dims();
    if height % factor != 0 || width % factor != 0 {
        return Err(dimension_error(
            "scale_down",
            &format!("{height}x{width} grid is not divisible by {factor}"),
        ));
    }
    let step = isize::try_from(factor)
        .map_err(|_overflow| invalid_parameter("factor", &factor, &"too large"))?;
    Ok(Grid::wrap(
        grid.cells().slice(s![..;step, ..;step]).to_owned(),
    ))
}

/// Keep every `step`-th row and column starting from the first
///
/// # Errors
///
/// Returns an error if either step is zero
pub fn sample(grid: &Grid, row_step: usize, col_step: usize) -> Result<Grid> {
    let to_step = |step: usize, parameter: &'static str| {
        isize::try_from(step)
            .ok()
            .filter(|&step| step > 0)
            .ok_or_else(|| invalid_parameter(parameter, &step, &"must be positive"))
    };
    let row_step = to_step(row_step, "row_step")?;
    let col_step = to_step(col_step, "col_step")?;
    Ok(Grid::wrap(
        grid.cells()
            .slice(s![..;row_step, ..;col_step])
            .to_owned(),
    ))
}

/// Border widths on each side of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    /// Rows above
    pub top: usize,
    /// Rows below
    pub bottom: usize,
    /// Columns to the left
    pub left: usize,
    /// Columns to the right
    pub right: usize,
}

impl Margins {
    /// The same width on every side
    pub const fn uniform(width: usize) -> Self {
        Self {
            top: width,
            bottom: width,
            left: width,
            right: width,
        }
    }

    /// Margins above and below only
    pub const fn vertical(width: usize) -> Self {
        Self {
            top: width,
            bottom: width,
            left: 0,
            right: 0,
        }
    }

    /// Margins left and right only
    pub const fn horizontal(width: usize) -> Self {
        Self {
            top: 0,
            bottom: 0,
            left: width,
            right: width,
        }
    }
}

/// Remove a border from the grid
///
/// # Errors
///
/// Returns an error if the margins exceed the grid
pub fn crop(grid: &Grid, margins: Margins) -> Result<Grid> {
    let (height, width) = grid.dims();
    if margins.top + margins.bottom > height || margins.left + margins.right > width {
        return Err(dimension_error(
            "crop",
            &format!("margins {margins:?} exceed {height}x{width} grid"),
        ));
    }
    Ok(Grid::wrap(
        grid.cells()
            .slice(s![
                margins.top..height - margins.bottom,
                margins.left..width - margins.right
            ])
            .to_owned(),
    ))
}

/// Add a border filled with `value`
///
/// # Errors
///
/// Returns an error if `value` exceeds 9
pub fn pad(grid: &Grid, margins: Margins, value: u8) -> Result<Grid> {
    if value > MAX_COLOR {
        return Err(invalid_parameter("value", &value, &"must be within 0..=9"));
    }
    let (height, width) = grid.dims();
    let mut cells = Array2::from_elem(
        (
            height + margins.top + margins.bottom,
            width + margins.left + margins.right,
        ),
        value,
    );
    cells
        .slice_mut(s![
            margins.top..margins.top + height,
            margins.left..margins.left + width
        ])
        .assign(grid.cells());
    Ok(Grid::wrap(cells))
}

/// Stack two grids along an axis
///
/// # Errors
///
/// Returns an error if the grids disagree on the other axis
pub fn concatenate(first: &Grid, second: &Grid, axis: Axis) -> Result<Grid> {
    if first.is_empty() {
        return Ok(second.clone());
    }
    if second.is_empty() {
        return Ok(first.clone());
    }
    ndarray::concatenate(axis, &[first.cells().view(), second.cells().view()])
        .map(Grid::wrap)
        .map_err(|shape_error| dimension_error("concatenate", &shape_error))
}

/// Total function over cell values; unmapped values pass through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorMap {
    table: [u8; COLOR_COUNT],
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl ColorMap {
    /// Map every value to itself
    pub const fn identity() -> Self {
        Self {
            table: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        }
    }

    /// Build a map from (from, to) pairs; later pairs override earlier ones
    ///
    /// # Errors
    ///
    /// Returns an error if any value exceeds 9
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Result<Self> {
        pairs
            .iter()
            .try_fold(Self::identity(), |map, &(from, to)| map.with(from, to))
    }

    /// Return a copy with `from` mapped to `to`
    ///
    /// # Errors
    ///
    /// Returns an error if either value exceeds 9
    pub fn with(mut self, from: u8, to: u8) -> Result<Self> {
        if to > MAX_COLOR {
            return Err(invalid_parameter("to", &to, &"must be within 0..=9"));
        }
        let slot = self
            .table
            .get_mut(usize::from(from))
            .ok_or_else(|| invalid_parameter("from", &from, &"must be within 0..=9"))?;
        *slot = to;
        Ok(self)
    }

    /// Image of a single value
    pub fn apply(&self, value: u8) -> u8 {
        self.table.get(usize::from(value)).copied().unwrap_or(value)
    }
}

/// Recolor every cell through `map`
pub fn remap(grid: &Grid, map: &ColorMap) -> Grid {
    Grid::wrap(grid.cells().mapv(|value| map.apply(value)))
}

/// Minimal (min_row, min_col, max_row, max_col) box around cells differing from `background`
pub fn content_bounds(grid: &Grid, background: u8) -> Option<(usize, usize, usize, usize)> {
    grid.indexed_values()
        .filter(|&(_, value)| value != background)
        .fold(None, |bounds, ((row, col), _)| {
            Some(match bounds {
                None => (row, col, row, col),
                Some((min_row, min_col, max_row, max_col)) => (
                    min_row.min(row),
                    min_col.min(col),
                    max_row.max(row),
                    max_col.max(col),
                ),
            })
        })
}

/// Crop to the bounding box of non-background content
///
/// Returns `None` when every cell is background.
pub fn crop_to_content(grid: &Grid, background: u8) -> Option<Grid> {
    let (min_row, min_col, max_row, max_col) = content_bounds(grid, background)?;
    Some(Grid::wrap(
        grid.cells()
            .slice(s![min_row..=max_row, min_col..=max_col])
            .to_owned(),
    ))
}

/// Paint `top_layer` onto `base` where its cells differ from `transparent`
///
/// Cells of `top_layer` outside the base are ignored.
pub fn overlay(base: &Grid, top_layer: &Grid, transparent: u8) -> Grid {
    let top = top_layer.cells();
    Grid::wrap(Array2::from_shape_fn(base.dims(), |(row, col)| {
        let below = base.get(row, col).unwrap_or(0);
        match top.get((row, col)).copied() {
            Some(value) if value != transparent => value,
            _ => below,
        }
    }))
}

/// Count of each value, indexed by value
pub fn histogram(grid: &Grid) -> [usize; COLOR_COUNT] {
    grid.values().fold([0; COLOR_COUNT], |mut counts, value| {
        if let Some(count) = counts.get_mut(usize::from(value)) {
            *count += 1;
        }
        counts
    })
}

/// Sorted distinct values present in the grid
pub fn unique_colors(grid: &Grid) -> Vec<u8> {
    histogram(grid)
        .iter()
        .zip(0..)
        .filter(|&(&count, _)| count > 0)
        .map(|(_, value)| value)
        .collect()
}
