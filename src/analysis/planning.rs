//! Search plan: sound pruning of the candidate library
//!
//! A candidate is pruned only when a property of the `train` pairs proves it
//! cannot reproduce at least one of them. Pruning never reorders the
//! library, so a search with the plan reaches the same answer as one
//! without it.

use bitvec::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::algorithm::library::{CandidateLibrary, Family, MirrorAxis, MirrorSource, Template};
use crate::analysis::statistics::ColorDistribution;
use crate::spatial::symmetry::{SymmetryFlags, column_repetition, row_repetition};
use crate::task::dataset::TaskDataset;
use crate::task::example::ExamplePair;

/// Why a candidate was excluded from the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneReason {
    /// Its output shape is certain and differs from a `train` output
    DimensionMismatch,
    /// It always repeats its output and a `train` output does not repeat
    MissingRepetition,
    /// It always produces a symmetric output and a `train` output is not
    MissingSymmetry,
    /// It fills one color and a `train` output holds another
    NonUniformOutput,
    /// A `train` output holds a color it can never produce
    ForeignColor,
}

// What the planner needs to know about one train pair
struct PairFacts {
    input_dims: (usize, usize),
    output_dims: (usize, usize),
    input_colors: ColorDistribution,
    output_colors: ColorDistribution,
    output_symmetry: SymmetryFlags,
    repeats_rows: bool,
    repeats_cols: bool,
}

impl PairFacts {
    fn of(pair: &ExamplePair) -> Self {
        Self {
            input_dims: pair.input.dims(),
            output_dims: pair.output.dims(),
            input_colors: ColorDistribution::of(&pair.input),
            output_colors: ColorDistribution::of(&pair.output),
            output_symmetry: SymmetryFlags::of(&pair.output),
            repeats_rows: row_repetition(&pair.output).is_some(),
            repeats_cols: column_repetition(&pair.output).is_some(),
        }
    }

    const fn output_is_empty(&self) -> bool {
        self.output_dims.0 == 0 || self.output_dims.1 == 0
    }

    fn exclusion(&self, template: &Template) -> Option<PruneReason> {
        if let Some(expected) = template.output_dims(self.input_dims.0, self.input_dims.1)
            && expected != self.output_dims
        {
            return Some(PruneReason::DimensionMismatch);
        }
        if !self.output_is_empty() && !self.has_repetition(template) {
            return Some(PruneReason::MissingRepetition);
        }
        if !self.has_symmetry(template) {
            return Some(PruneReason::MissingSymmetry);
        }
        if let Some(color) = template.uniform_color()
            && self.output_colors.count(color) != self.output_colors.total()
        {
            return Some(PruneReason::NonUniformOutput);
        }
        if !self.colors_reachable(template) {
            return Some(PruneReason::ForeignColor);
        }
        None
    }

    const fn has_repetition(&self, template: &Template) -> bool {
        match *template {
            Template::Tile { rows, cols } => {
                (rows < 2 || self.repeats_rows) && (cols < 2 || self.repeats_cols)
            }
            _ => true,
        }
    }

    const fn has_symmetry(&self, template: &Template) -> bool {
        let symmetry = self.output_symmetry;
        match *template {
            Template::MirrorAppend {
                axis: MirrorAxis::Vertical,
            }
            | Template::MirrorCompletion {
                source: MirrorSource::TopToBottom,
            } => symmetry.vertical,
            Template::MirrorAppend {
                axis: MirrorAxis::Horizontal,
            }
            | Template::MirrorCompletion {
                source: MirrorSource::LeftToRight,
            } => symmetry.horizontal,
            Template::MirrorAppend {
                axis: MirrorAxis::Both,
            } => symmetry.vertical && symmetry.horizontal,
            _ => true,
        }
    }

    fn colors_reachable(&self, template: &Template) -> bool {
        match palette_limit(template) {
            Palette::Unrestricted => true,
            Palette::Binary => self.output_colors.present().iter().all(|&color| color <= 1),
            Palette::InputPlus(extra) => self
                .output_colors
                .absent_from(&self.input_colors)
                .iter()
                .all(|&color| color == extra),
        }
    }
}

// Colors a template can place in its output
enum Palette {
    Unrestricted,
    Binary,
    InputPlus(u8),
}

const fn palette_limit(template: &Template) -> Palette {
    match *template {
        Template::Checkerboard
        | Template::RowParity
        | Template::ColumnParity
        | Template::Binarize => Palette::Binary,
        Template::PadBorder { color } => Palette::InputPlus(color),
        Template::PadRows
        | Template::PadColumns
        | Template::CropRows
        | Template::CropColumns
        | Template::CropBorder => Palette::InputPlus(0),
        _ => match template.family() {
            Family::Geometric
            | Family::Tiling
            | Family::Scaling
            | Family::Slicing
            | Family::ConditionalTiling
            | Family::Mask
            | Family::Extraction
            | Family::Symmetry
            | Family::Diagonal
            | Family::QuadrantMask => Palette::InputPlus(0),
            _ => Palette::Unrestricted,
        },
    }
}

/// Candidates the search may skip for one dataset
#[derive(Debug, Clone)]
pub struct SearchPlan {
    allowed: BitVec,
    reasons: BTreeMap<PruneReason, usize>,
}

impl SearchPlan {
    /// Derive the plan for `dataset` over every candidate in `library`
    pub fn for_dataset(dataset: &TaskDataset, library: &CandidateLibrary) -> Self {
        let facts: Vec<PairFacts> = dataset.train().iter().map(PairFacts::of).collect();
        let mut allowed = bitvec![1; library.len()];
        let mut reasons = BTreeMap::new();

        for (index, candidate) in library.iter().enumerate() {
            if let Some(reason) = facts
                .iter()
                .find_map(|pair| pair.exclusion(&candidate.template()))
            {
                allowed.set(index, false);
                *reasons.entry(reason).or_insert(0) += 1;
            }
        }
        Self { allowed, reasons }
    }

    /// Whether the candidate at `index` must still be tried
    ///
    /// Indices beyond the planned library are always allowed.
    pub fn allows(&self, index: usize) -> bool {
        self.allowed.get(index).is_none_or(|bit| *bit)
    }

    /// Number of candidates excluded
    pub fn pruned_count(&self) -> usize {
        self.allowed.count_zeros()
    }

    /// Number of candidates excluded for `reason`
    pub fn pruned_by(&self, reason: PruneReason) -> usize {
        self.reasons.get(&reason).copied().unwrap_or(0)
    }
}
