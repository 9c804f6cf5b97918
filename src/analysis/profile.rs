//! Diagnostic profile of a task's examples
//!
//! The profile is advisory. It feeds human-readable suggestions and the
//! search plan, but the search reaches the same answer without it.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::statistics::ColorDistribution;
use crate::spatial::components::component_count;
use crate::spatial::grid::Grid;
use crate::spatial::symmetry::{RepetitionFlags, SymmetryFlags};
use crate::spatial::transform::{flip_horizontal, flip_vertical, rotate90, rotate180, transpose};
use crate::task::dataset::TaskDataset;
use crate::task::example::{ExampleGroup, ExamplePair};

/// Structural summary of a single grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridProfile {
    /// Shape as (rows, cols)
    pub dims: (usize, usize),
    /// Symmetries that hold
    pub symmetry: SymmetryFlags,
    /// Detected repetition periods
    pub repetition: RepetitionFlags,
    /// Number of 4-connected non-zero components
    pub components: usize,
    /// Cell counts per color
    pub colors: ColorDistribution,
}

impl GridProfile {
    /// Profile `grid` against background 0
    pub fn of(grid: &Grid) -> Self {
        Self {
            dims: grid.dims(),
            symmetry: SymmetryFlags::of(grid),
            repetition: RepetitionFlags::of(grid),
            components: component_count(grid, 0),
            colors: ColorDistribution::of(grid),
        }
    }
}

/// How an output's shape relates to its input's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DimensionChange {
    /// Identical shape
    Same,
    /// Rows and columns swapped
    Transposed,
    /// Each axis multiplied by a whole factor
    ScaledUp {
        /// Row multiplier
        rows: usize,
        /// Column multiplier
        cols: usize,
    },
    /// Each axis divided by a whole factor
    ScaledDown {
        /// Row divisor
        rows: usize,
        /// Column divisor
        cols: usize,
    },
    /// More cells, no whole-factor relation
    Grown,
    /// Fewer cells, no whole-factor relation
    Shrunk,
    /// Same cell count, different shape
    Reshaped,
}

impl DimensionChange {
    /// Classify the change from `input` to `output` shapes
    pub fn classify(input: (usize, usize), output: (usize, usize)) -> Self {
        if input == output {
            return Self::Same;
        }
        if output == (input.1, input.0) {
            return Self::Transposed;
        }
        if let Some((rows, cols)) = whole_factors(output, input) {
            return Self::ScaledUp { rows, cols };
        }
        if let Some((rows, cols)) = whole_factors(input, output) {
            return Self::ScaledDown { rows, cols };
        }
        let (input_area, output_area) = (input.0 * input.1, output.0 * output.1);
        match output_area.cmp(&input_area) {
            std::cmp::Ordering::Greater => Self::Grown,
            std::cmp::Ordering::Less => Self::Shrunk,
            std::cmp::Ordering::Equal => Self::Reshaped,
        }
    }
}

// Per-axis factors with larger = smaller * factor, both at least one
fn whole_factors(larger: (usize, usize), smaller: (usize, usize)) -> Option<(usize, usize)> {
    let factor = |big: usize, small: usize| {
        big.checked_rem(small)
            .filter(|&remainder| remainder == 0)
            .and_then(|_| big.checked_div(small))
            .filter(|&factor| factor >= 1)
    };
    Some((factor(larger.0, smaller.0)?, factor(larger.1, smaller.1)?))
}

/// Profile of one example pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairProfile {
    /// Group the pair belongs to
    pub group: ExampleGroup,
    /// Position within the group
    pub index: usize,
    /// Input grid profile
    pub input: GridProfile,
    /// Output grid profile
    pub output: GridProfile,
    /// Shape relation between input and output
    pub dimension_change: DimensionChange,
}

/// Whole-task transformation traits
// Each flag is an independent observation reported to the user
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Characteristics {
    /// Every output has its input's shape
    pub preserves_dimensions: bool,
    /// Some output differs in shape from its input
    pub changes_dimensions: bool,
    /// Some output has more cells than its input
    pub increases_size: bool,
    /// Some output has fewer cells than its input
    pub decreases_size: bool,
    /// Every output uses exactly its input's colors
    pub preserves_colors: bool,
    /// Some output introduces a color
    pub adds_colors: bool,
    /// Some output drops a color
    pub removes_colors: bool,
    /// All outputs share one shape
    pub constant_output_size: bool,
}

impl Characteristics {
    fn of(pairs: &[&ExamplePair]) -> Self {
        let mut traits = Self {
            preserves_dimensions: true,
            changes_dimensions: false,
            increases_size: false,
            decreases_size: false,
            preserves_colors: true,
            adds_colors: false,
            removes_colors: false,
            constant_output_size: true,
        };
        for pair in pairs {
            let (input, output) = (pair.input.dims(), pair.output.dims());
            if input != output {
                traits.preserves_dimensions = false;
                traits.changes_dimensions = true;
                let (input_area, output_area) = (input.0 * input.1, output.0 * output.1);
                traits.increases_size |= output_area > input_area;
                traits.decreases_size |= output_area < input_area;
            }
            let input_colors = ColorDistribution::of(&pair.input);
            let output_colors = ColorDistribution::of(&pair.output);
            let added = output_colors.absent_from(&input_colors);
            let removed = input_colors.absent_from(&output_colors);
            if !added.is_empty() || !removed.is_empty() {
                traits.preserves_colors = false;
                traits.adds_colors |= !added.is_empty();
                traits.removes_colors |= !removed.is_empty();
            }
        }
        let output_shapes: BTreeSet<(usize, usize)> =
            pairs.iter().map(|pair| pair.output.dims()).collect();
        traits.constant_output_size = output_shapes.len() <= 1;
        traits
    }
}

/// Size and palette metrics of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    /// Largest input cell count
    pub max_input_size: usize,
    /// Largest output cell count
    pub max_output_size: usize,
    /// Distinct colors across all inputs
    pub unique_input_colors: usize,
    /// Distinct colors across all outputs
    pub unique_output_colors: usize,
    /// Some output differs in shape from its input
    pub dimension_changes: bool,
    /// Outputs come in more than one shape
    pub variable_output_size: bool,
}

impl Complexity {
    fn of(pairs: &[&ExamplePair], traits: Characteristics) -> Self {
        let area = |grid: &Grid| grid.rows() * grid.cols();
        Self {
            max_input_size: pairs.iter().map(|pair| area(&pair.input)).max().unwrap_or(0),
            max_output_size: pairs.iter().map(|pair| area(&pair.output)).max().unwrap_or(0),
            unique_input_colors: ColorDistribution::over(pairs.iter().map(|pair| &pair.input))
                .present()
                .len(),
            unique_output_colors: ColorDistribution::over(pairs.iter().map(|pair| &pair.output))
                .present()
                .len(),
            dimension_changes: traits.changes_dimensions,
            variable_output_size: !traits.constant_output_size,
        }
    }
}

/// Cell-aligned input color to output color observations
///
/// Only pairs whose input and output have the same cell count contribute,
/// aligned in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColorMapping {
    /// Output colors observed for each input color
    pub observed: BTreeMap<u8, BTreeSet<u8>>,
}

impl ColorMapping {
    fn of(pairs: &[&ExamplePair]) -> Self {
        let mut observed: BTreeMap<u8, BTreeSet<u8>> = BTreeMap::new();
        for pair in pairs {
            let input: Vec<u8> = pair.input.values().collect();
            let output: Vec<u8> = pair.output.values().collect();
            if input.len() == output.len() {
                for (from, to) in input.into_iter().zip(output) {
                    observed.entry(from).or_default().insert(to);
                }
            }
        }
        Self { observed }
    }

    /// Whether any aligned observation exists and each input color maps to one output color
    pub fn is_consistent(&self) -> bool {
        !self.observed.is_empty() && self.observed.values().all(|targets| targets.len() == 1)
    }

    /// Input colors whose single observed target differs from themselves
    pub fn changed_colors(&self) -> Vec<(u8, u8)> {
        self.observed
            .iter()
            .filter_map(|(&from, targets)| {
                let mut targets = targets.iter().copied();
                match (targets.next(), targets.next()) {
                    (Some(to), None) if to != from => Some((from, to)),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Complete diagnostic profile of a task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisProfile {
    /// Task name
    pub task: String,
    /// Per-pair profiles across every group
    pub pairs: Vec<PairProfile>,
    /// Whole-task transformation traits
    pub characteristics: Characteristics,
    /// Size and palette metrics
    pub complexity: Complexity,
    /// Aligned color observations
    pub color_mapping: ColorMapping,
    /// Symmetries shared by every output
    pub output_symmetry: SymmetryFlags,
    /// Human-readable approach suggestions
    pub suggestions: Vec<String>,
}

/// Profile every example of `dataset`
pub fn analyze(dataset: &TaskDataset) -> AnalysisProfile {
    let labeled: Vec<(ExampleGroup, usize, &ExamplePair)> = dataset.labeled_pairs().collect();
    let pairs: Vec<&ExamplePair> = labeled.iter().map(|&(_, _, pair)| pair).collect();

    let characteristics = Characteristics::of(&pairs);
    let color_mapping = ColorMapping::of(&pairs);
    let output_symmetry = SymmetryFlags::common(pairs.iter().map(|pair| &pair.output));
    let suggestions = suggest(&pairs, characteristics, &color_mapping, output_symmetry);

    AnalysisProfile {
        task: dataset.name().to_owned(),
        pairs: labeled
            .iter()
            .map(|&(group, index, pair)| PairProfile {
                group,
                index,
                input: GridProfile::of(&pair.input),
                output: GridProfile::of(&pair.output),
                dimension_change: DimensionChange::classify(pair.input.dims(), pair.output.dims()),
            })
            .collect(),
        complexity: Complexity::of(&pairs, characteristics),
        characteristics,
        color_mapping,
        output_symmetry,
        suggestions,
    }
}

fn suggest(
    pairs: &[&ExamplePair],
    traits: Characteristics,
    mapping: &ColorMapping,
    output_symmetry: SymmetryFlags,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if traits.preserves_dimensions {
        suggestions.push("Cell-by-cell transformation (same dimensions)".to_owned());
    }
    if traits.increases_size {
        suggestions.push("Scaling or expansion operation".to_owned());
    }
    if traits.decreases_size {
        suggestions.push("Filtering, cropping, or extraction operation".to_owned());
    }
    if traits.constant_output_size {
        suggestions.push("Output size is constant - may be counting or aggregation".to_owned());
    }

    let geometric: [(&str, fn(&Grid) -> Grid); 5] = [
        ("90° clockwise rotation", rotate90),
        ("180° rotation", rotate180),
        ("Horizontal flip", flip_horizontal),
        ("Vertical flip", flip_vertical),
        ("Transpose operation", transpose),
    ];
    if let Some(name) = pairs.iter().find_map(|pair| {
        geometric
            .iter()
            .find(|(_, operation)| operation(&pair.input) == pair.output)
            .map(|&(name, _)| name)
    }) {
        suggestions.push(name.to_owned());
    }

    if mapping.is_consistent() {
        suggestions.push("Simple color replacement mapping".to_owned());
    }

    if pairs
        .iter()
        .all(|pair| RepetitionFlags::of(&pair.output).any())
        && !pairs.is_empty()
    {
        suggestions.push("Outputs repeat a tile - tiling or mirror append".to_owned());
    }
    if output_symmetry.any() && !pairs.is_empty() {
        suggestions.push("Outputs share a symmetry - mirror completion".to_owned());
    }

    if suggestions.is_empty() {
        suggestions.push("Complex custom transformation - requires detailed analysis".to_owned());
    }
    suggestions
}
