//! Color distribution statistics across example grids

use serde::Serialize;

use crate::io::configuration::{COLOR_COUNT, MAX_COLOR};
use crate::spatial::grid::Grid;
use crate::spatial::transform::histogram;

/// Per-color cell counts accumulated over any number of grids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ColorDistribution {
    counts: [usize; COLOR_COUNT],
}

impl ColorDistribution {
    /// Distribution of a single grid
    pub fn of(grid: &Grid) -> Self {
        Self {
            counts: histogram(grid),
        }
    }

    /// Accumulated distribution of many grids
    pub fn over<'a>(grids: impl IntoIterator<Item = &'a Grid>) -> Self {
        grids
            .into_iter()
            .fold(Self::default(), |total, grid| total.merged(&Self::of(grid)))
    }

    /// Sum of two distributions
    #[must_use]
    pub fn merged(mut self, other: &Self) -> Self {
        for (count, extra) in self.counts.iter_mut().zip(other.counts) {
            *count += extra;
        }
        self
    }

    /// Count for a single color
    pub fn count(&self, color: u8) -> usize {
        self.counts.get(usize::from(color)).copied().unwrap_or(0)
    }

    /// Counts indexed by color
    pub const fn counts(&self) -> &[usize; COLOR_COUNT] {
        &self.counts
    }

    /// Total number of cells
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Colors with a non-zero count, ascending
    pub fn present(&self) -> Vec<u8> {
        (0..=MAX_COLOR)
            .zip(self.counts)
            .filter(|&(_, count)| count > 0)
            .map(|(color, _)| color)
            .collect()
    }

    /// Most frequent color; the smallest color wins ties
    pub fn dominant(&self) -> Option<u8> {
        (0..=MAX_COLOR)
            .zip(self.counts)
            .filter(|&(_, count)| count > 0)
            .rev()
            .max_by_key(|&(_, count)| count)
            .map(|(color, _)| color)
    }

    /// Share of cells holding `color`, zero for an empty distribution
    pub fn frequency(&self, color: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(color) as f64 / total as f64
        }
    }

    /// Colors present here but absent from `other`
    pub fn absent_from(&self, other: &Self) -> Vec<u8> {
        self.present()
            .into_iter()
            .filter(|&color| other.count(color) == 0)
            .collect()
    }
}
