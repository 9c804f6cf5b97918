//! Flood-fill connected components under 4-connectivity
//!
//! A component is a maximal set of same-valued, axis-adjacent cells whose
//! value differs from the background. Components are discovered in row-major
//! order of their first cell, so the output order is deterministic.

use bitvec::prelude::*;

use crate::spatial::grid::Grid;

/// Connected region of a single color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Shared value of every cell in the component
    pub color: u8,
    /// Member cells as (row, col), in discovery order
    pub cells: Vec<(usize, usize)>,
}

impl Component {
    /// Number of member cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Inclusive (min_row, min_col, max_row, max_col) box around the component
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let (&(first_row, first_col), rest) = self.cells.split_first()?;
        Some(rest.iter().fold(
            (first_row, first_col, first_row, first_col),
            |(min_row, min_col, max_row, max_col), &(row, col)| {
                (
                    min_row.min(row),
                    min_col.min(col),
                    max_row.max(row),
                    max_col.max(col),
                )
            },
        ))
    }
}

/// Partition all non-background cells into 4-connected components
pub fn connected_components(grid: &Grid, background: u8) -> Vec<Component> {
    let mut components: Vec<Component> = Vec::new();
    scan(grid, background, |ordinal, color, cell| {
        if ordinal == components.len() {
            components.push(Component {
                color,
                cells: Vec::new(),
            });
        }
        if let Some(component) = components.last_mut() {
            component.cells.push(cell);
        }
    });
    components
}

/// Number of components without materializing their cells
pub fn component_count(grid: &Grid, background: u8) -> usize {
    scan(grid, background, |_, _, _| {})
}

// Visits every non-background cell as (component ordinal, color, cell),
// component by component, and returns the number of components
fn scan(grid: &Grid, background: u8, mut visit: impl FnMut(usize, u8, (usize, usize))) -> usize {
    let (rows, cols) = grid.dims();
    let mut visited = bitvec![0; rows * cols];
    let mut count = 0;

    for ((row, col), value) in grid.indexed_values() {
        if value == background || visited.get(row * cols + col).as_deref() == Some(&true) {
            continue;
        }
        flood_fill(grid, &mut visited, (row, col), value, |cell| {
            visit(count, value, cell);
        });
        count += 1;
    }
    count
}

/// Largest component by area; the earliest discovered wins ties
pub fn largest_component(grid: &Grid, background: u8) -> Option<Component> {
    connected_components(grid, background)
        .into_iter()
        .rev()
        .max_by_key(Component::area)
}

// Iterative stack fill so deep regions cannot exhaust the call stack
fn flood_fill(
    grid: &Grid,
    visited: &mut BitVec,
    start: (usize, usize),
    color: u8,
    mut visit: impl FnMut((usize, usize)),
) {
    let (rows, cols) = grid.dims();
    let mut stack = vec![start];

    while let Some((row, col)) = stack.pop() {
        let index = row * cols + col;
        if visited.get(index).as_deref() != Some(&false) || grid.get(row, col) != Some(color) {
            continue;
        }
        visited.set(index, true);
        visit((row, col));

        if row > 0 {
            stack.push((row - 1, col));
        }
        if row + 1 < rows {
            stack.push((row + 1, col));
        }
        if col > 0 {
            stack.push((row, col - 1));
        }
        if col + 1 < cols {
            stack.push((row, col + 1));
        }
    }
}
