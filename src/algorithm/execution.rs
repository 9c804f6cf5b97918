//! Executable semantics of candidate templates
//!
//! Each template is evaluated exactly as its canonical program text would
//! evaluate: the same inputs fault, the same inputs produce ragged or
//! empty-row outputs, and out-of-range values are passed through unchecked.
//! Evaluation never panics; failures are returned as [`Fault`] values and
//! well-formedness is judged later by the verification engine.

use ndarray::Axis;
use serde::Serialize;
use std::fmt;

use crate::algorithm::library::{Aggregate, MirrorAxis, MirrorSource, Side, Template};
use crate::io::configuration::MAX_COLOR;
use crate::io::error::SolverError;
use crate::spatial::grid::{Grid, MalformedGrid};
use crate::spatial::transform::{
    ColorMap, Margins, anti_transpose, concatenate, crop, crop_to_content, flip_horizontal,
    flip_vertical, pad, remap, rotate90, rotate180, rotate270, sample, scale_down, scale_up, tile,
    transpose,
};

/// Unvalidated rows produced by a candidate
///
/// Rows may be ragged or empty and values may fall outside `0..=9`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<i64>>,
}

impl RawGrid {
    /// Wrap raw rows
    pub const fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    /// `count` rows without any cells
    pub fn empty_rows(count: usize) -> Self {
        Self::new(vec![Vec::new(); count])
    }

    /// Produced rows
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Check that the rows form a grid
    ///
    /// # Errors
    ///
    /// Returns the first structural or value problem found
    pub fn validate(&self) -> Result<Grid, MalformedGrid> {
        Grid::from_raw_rows(&self.rows)
    }
}

impl From<&Grid> for RawGrid {
    fn from(grid: &Grid) -> Self {
        Self::new(grid.to_raw_rows())
    }
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self::from(&grid)
    }
}

/// Category of a per-example runtime failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// A row or cell was read past the end of the grid
    Index,
    /// A reduction ran over an empty sequence
    Value,
    /// Division or modulo by zero
    ZeroDivision,
    /// A grid operation rejected its input shape
    Dimension,
}

/// Runtime failure of a candidate on a single example
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fault {
    /// Failure category
    pub kind: FaultKind,
    /// Human-readable detail
    pub message: String,
}

impl Fault {
    /// Read past the end of a row or of the grid
    pub fn index() -> Self {
        Self {
            kind: FaultKind::Index,
            message: "list index out of range".into(),
        }
    }

    /// `min` or `max` over nothing
    pub fn empty_sequence(function: &str) -> Self {
        Self {
            kind: FaultKind::Value,
            message: format!("{function}() arg is an empty sequence"),
        }
    }

    /// Division or modulo by zero
    pub fn zero_division() -> Self {
        Self {
            kind: FaultKind::ZeroDivision,
            message: "integer division or modulo by zero".into(),
        }
    }
}

impl From<SolverError> for Fault {
    fn from(error: SolverError) -> Self {
        Self {
            kind: FaultKind::Dimension,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            FaultKind::Index => "IndexError",
            FaultKind::Value => "ValueError",
            FaultKind::ZeroDivision => "ZeroDivisionError",
            FaultKind::Dimension => "DimensionError",
        };
        write!(f, "{kind}: {}", self.message)
    }
}

/// Result of running one candidate on one input
pub type Evaluation = Result<RawGrid, Fault>;

/// Run `template` on `grid`
///
/// # Errors
///
/// Returns a fault wherever the canonical program would raise
pub fn execute(template: Template, grid: &Grid) -> Evaluation {
    let (rows, cols) = grid.dims();
    match template {
        Template::Identity => Ok(grid.into()),
        Template::FlipVertical => Ok(flip_vertical(grid).into()),
        Template::FlipHorizontal => Ok(flip_horizontal(grid).into()),
        Template::Rotate180 => Ok(rotate180(grid).into()),
        Template::Rotate90 => Ok(rotate90(grid).into()),
        Template::Rotate270 => Ok(rotate270(grid).into()),
        Template::Transpose => Ok(transpose(grid).into()),
        Template::AntiTranspose => Ok(anti_transpose(grid).into()),
        Template::Tile {
            rows: down,
            cols: across,
        } => Ok(tile(grid, down, across).into()),
        Template::ScaleUp { factor } => Ok(scale_up(grid, factor)?.into()),
        Template::ScaleDown { factor } => truncating_scale_down(grid, factor),

        Template::ShiftUp { amount } => recolor(grid, |value| {
            let shifted = value.saturating_add(amount);
            if shifted <= MAX_COLOR { shifted } else { value }
        }),
        Template::ShiftDown { amount } => {
            recolor(grid, |value| value.checked_sub(amount).unwrap_or(value))
        }
        Template::Multiply { factor } => recolor(grid, |value| {
            u8::try_from(u16::from(value) * u16::from(factor) % 10).unwrap_or(value)
        }),
        Template::AddModulo { amount } => recolor(grid, |value| {
            u8::try_from((u16::from(value) + u16::from(amount)) % 10).unwrap_or(value)
        }),
        Template::Invert => recolor(grid, |value| MAX_COLOR.saturating_sub(value)),
        Template::Binarize => recolor(grid, |value| u8::from(value > 0)),
        Template::Modulo { modulus } => {
            if modulus == 0 {
                // The comprehension only divides once it reaches a cell
                return if grid.is_empty() {
                    Ok(RawGrid::default())
                } else {
                    Err(Fault::zero_division())
                };
            }
            recolor(grid, |value| value % modulus)
        }

        Template::PadRows => {
            first_row_width(grid)?;
            Ok(pad(grid, Margins::vertical(1), 0)?.into())
        }
        Template::PadColumns => Ok(pad(grid, Margins::horizontal(1), 0)?.into()),
        Template::PadBorder { color } => {
            first_row_width(grid)?;
            Ok(pad(grid, Margins::uniform(1), color)?.into())
        }
        Template::CropRows => {
            if rows <= 2 {
                return Ok(RawGrid::default());
            }
            Ok(crop(grid, Margins::vertical(1))?.into())
        }
        Template::CropColumns => {
            if cols <= 2 {
                return Ok(RawGrid::empty_rows(rows));
            }
            Ok(crop(grid, Margins::horizontal(1))?.into())
        }
        Template::CropBorder => {
            if rows <= 2 {
                return Ok(RawGrid::default());
            }
            if cols <= 2 {
                return Ok(RawGrid::empty_rows(rows - 2));
            }
            Ok(crop(grid, Margins::uniform(1))?.into())
        }

        Template::Half { side } => half(grid, side),
        Template::EveryOtherColumn => Ok(sample(grid, 1, 2)?.into()),
        Template::EveryOtherRow => Ok(sample(grid, 2, 1)?.into()),

        Template::Fill { color } => {
            let width = first_row_width(grid)?;
            Ok(Grid::filled(rows, width, color)?.into())
        }
        Template::Checkerboard => Ok(per_cell(grid, |row, col, _| parity(row + col))),
        Template::RowParity => Ok(per_cell(grid, |row, _, _| parity(row))),
        Template::ColumnParity => Ok(per_cell(grid, |_, col, _| parity(col))),

        Template::ConditionalTile { size } => conditional_tile(grid, size),
        Template::ConditionalTileGeneric => conditional_tile(grid, rows),

        Template::Recolor { from, to } => {
            recolor(grid, |value| if value == from { to } else { value })
        }
        Template::SwapColors { first, second } => recolor(grid, |value| {
            if value == first {
                second
            } else if value == second {
                first
            } else {
                value
            }
        }),

        Template::CheckerMask { parity } => Ok(masked(grid, |row, col| parity.matches(row + col))),
        Template::RowMask { parity } => Ok(masked(grid, |row, _| parity.matches(row))),
        Template::ColumnMask { parity } => Ok(masked(grid, |_, col| parity.matches(col))),

        Template::KeepMax => Ok(keep_extreme(grid, grid.values().max())),
        Template::KeepMin => Ok(keep_extreme(grid, grid.values().min())),
        Template::KeepColor { color } => Ok(per_cell(grid, |_, _, value| {
            if value == color { i64::from(value) } else { 0 }
        })),
        Template::CropToContent => crop_to_content(grid, 0)
            .map(RawGrid::from)
            .ok_or_else(|| Fault::empty_sequence("min")),
        Template::Outline => Ok(masked(grid, |row, col| {
            row == 0 || row + 1 == rows || col == 0 || col + 1 == cols
        })),

        Template::MirrorCompletion { source } => Ok(mirror_completion(grid, source)),
        Template::MirrorAppend { axis } => mirror_append(grid, axis),

        Template::MainDiagonal => Ok(masked(grid, |row, col| row == col)),
        Template::AntiDiagonal => Ok(masked(grid, |row, col| row + col + 1 == rows)),
        Template::RowAggregate { aggregate } => Ok(row_aggregate(grid, aggregate)),
        Template::WindowSum { size } => Ok(window_sum(grid, size)),
        Template::QuadrantMask { keep_top_left } => Ok(masked(grid, |row, col| {
            let inside = row < rows / 2 && col < cols / 2;
            inside == keep_top_left
        })),

        Template::Constant {
            rows: height,
            cols: width,
            color,
        } => {
            if width == 0 {
                return Ok(RawGrid::empty_rows(height));
            }
            Ok(Grid::filled(height, width, color)?.into())
        }
    }
}

// `len(g[0])`
fn first_row_width(grid: &Grid) -> Result<usize, Fault> {
    if grid.is_empty() {
        Err(Fault::index())
    } else {
        Ok(grid.cols())
    }
}

fn parity(index: usize) -> i64 {
    i64::from(index % 2 == 1)
}

// Row-major rebuild of the grid with every cell replaced
fn per_cell(grid: &Grid, value: impl Fn(usize, usize, u8) -> i64) -> RawGrid {
    RawGrid::new(
        grid.cells()
            .outer_iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, &cell)| value(row, col, cell))
                    .collect()
            })
            .collect(),
    )
}

// Keep cells where `keep` holds and zero the rest
fn masked(grid: &Grid, keep: impl Fn(usize, usize) -> bool) -> RawGrid {
    per_cell(grid, |row, col, value| {
        if keep(row, col) { i64::from(value) } else { 0 }
    })
}

fn recolor(grid: &Grid, image: impl Fn(u8) -> u8) -> Evaluation {
    let pairs: Vec<(u8, u8)> = (0..=MAX_COLOR).map(|value| (value, image(value))).collect();
    let map = ColorMap::from_pairs(&pairs)?;
    Ok(remap(grid, &map).into())
}

fn truncating_scale_down(grid: &Grid, factor: usize) -> Evaluation {
    let (rows, cols) = grid.dims();
    let (Some(kept_rows), Some(kept_cols)) = (rows.checked_div(factor), cols.checked_div(factor))
    else {
        return Err(Fault::zero_division());
    };
    if kept_rows == 0 {
        return Ok(RawGrid::default());
    }
    if kept_cols == 0 {
        return Ok(RawGrid::empty_rows(kept_rows));
    }
    let divisible = crop(
        grid,
        Margins {
            top: 0,
            bottom: rows % factor,
            left: 0,
            right: cols % factor,
        },
    )?;
    Ok(scale_down(&divisible, factor)?.into())
}

fn half(grid: &Grid, side: Side) -> Evaluation {
    let (rows, cols) = grid.dims();
    let margins = match side {
        Side::Left => {
            if cols / 2 == 0 {
                return Ok(RawGrid::empty_rows(rows));
            }
            Margins {
                right: cols - cols / 2,
                ..Margins::default()
            }
        }
        Side::Right => Margins {
            left: cols / 2,
            ..Margins::default()
        },
        Side::Top => Margins {
            bottom: rows - rows / 2,
            ..Margins::default()
        },
        Side::Bottom => Margins {
            top: rows / 2,
            ..Margins::default()
        },
    };
    Ok(crop(grid, margins)?.into())
}

fn conditional_tile(grid: &Grid, size: usize) -> Evaluation {
    let mut output = Vec::with_capacity(size * size);
    for block_row in 0..size {
        for source in 0..size {
            let mut row = Vec::new();
            for block_col in 0..size {
                let gate = grid.get(block_row, block_col).ok_or_else(Fault::index)?;
                if gate == 0 {
                    row.extend(std::iter::repeat_n(0, size));
                } else {
                    let copied = grid.row(source).ok_or_else(Fault::index)?;
                    row.extend(copied.into_iter().map(i64::from));
                }
            }
            output.push(row);
        }
    }
    Ok(RawGrid::new(output))
}

// The reduction only runs once a cell is reached, so an empty grid passes
fn keep_extreme(grid: &Grid, extreme: Option<u8>) -> RawGrid {
    extreme.map_or_else(RawGrid::default, |extreme| {
        per_cell(grid, |_, _, value| {
            if value == extreme { i64::from(value) } else { 0 }
        })
    })
}

fn mirror_completion(grid: &Grid, source: MirrorSource) -> RawGrid {
    let (rows, cols) = grid.dims();
    let (reflected, keep) = match source {
        MirrorSource::TopToBottom => (flip_vertical(grid), (rows / 2, cols)),
        MirrorSource::LeftToRight => (flip_horizontal(grid), (rows, cols / 2)),
    };
    per_cell(grid, |row, col, value| {
        if row < keep.0 && col < keep.1 {
            i64::from(value)
        } else {
            reflected.get(row, col).map_or(0, i64::from)
        }
    })
}

fn mirror_append(grid: &Grid, axis: MirrorAxis) -> Evaluation {
    let appended = match axis {
        MirrorAxis::Vertical => concatenate(grid, &flip_vertical(grid), Axis(0))?,
        MirrorAxis::Horizontal => concatenate(grid, &flip_horizontal(grid), Axis(1))?,
        MirrorAxis::Both => {
            let stacked = concatenate(grid, &flip_vertical(grid), Axis(0))?;
            concatenate(&stacked, &flip_horizontal(&stacked), Axis(1))?
        }
    };
    Ok(appended.into())
}

fn row_aggregate(grid: &Grid, aggregate: Aggregate) -> RawGrid {
    let width = grid.cols();
    RawGrid::new(
        grid.cells()
            .outer_iter()
            .map(|cells| {
                let values = cells.iter().map(|&value| i64::from(value));
                let statistic = match aggregate {
                    Aggregate::Sum => values.sum::<i64>() % 10,
                    Aggregate::Count => values.filter(|&value| value > 0).count() as i64,
                    Aggregate::Max => values.max().unwrap_or(0),
                    Aggregate::Min => values.min().unwrap_or(0),
                };
                vec![statistic; width]
            })
            .collect(),
    )
}

fn window_sum(grid: &Grid, size: usize) -> RawGrid {
    let (rows, cols) = grid.dims();
    let out_rows = (rows + 1).saturating_sub(size);
    let out_cols = (cols + 1).saturating_sub(size);
    if out_rows == 0 {
        return RawGrid::default();
    }
    RawGrid::new(
        (0..out_rows)
            .map(|row| {
                (0..out_cols)
                    .map(|col| {
                        let total: i64 = (0..size)
                            .flat_map(|down| (0..size).map(move |across| (row + down, col + across)))
                            .filter_map(|(r, c)| grid.get(r, c))
                            .map(i64::from)
                            .sum();
                        total % 10
                    })
                    .collect()
            })
            .collect(),
    )
}
