//! Engine constants, candidate parameter ranges and tooling defaults

use std::ops::RangeInclusive;

// Candidate library parameter sweeps
/// Repetition counts per axis for tiling templates
pub const TILE_COUNTS: RangeInclusive<usize> = 1..=5;
/// Block sizes for scale-up and scale-down templates
pub const SCALE_FACTORS: RangeInclusive<usize> = 2..=5;
/// Magnitudes for guarded shift, multiply and add templates
pub const SHIFT_AMOUNTS: RangeInclusive<u8> = 1..=9;
/// Moduli for the cell modulus template
pub const MODULI: RangeInclusive<u8> = 2..=5;
/// Block sizes for fixed-size conditional tiling
pub const CONDITIONAL_TILE_SIZES: RangeInclusive<usize> = 2..=5;
/// Window sizes for sliding window sums
pub const WINDOW_SIZES: RangeInclusive<usize> = 2..=3;
/// Dimensions swept by constant-output templates
pub const CONSTANT_DIMENSIONS: RangeInclusive<usize> = 1..=9;
/// Colors swept by constant-output templates
pub const CONSTANT_COLORS: RangeInclusive<u8> = 0..=2;

/// Largest cell value a grid may hold
pub const MAX_COLOR: u8 = 9;
/// Number of distinct cell values
pub const COLOR_COUNT: usize = 10;

// Bounds worst-case work per candidate evaluation
/// Maximum allowed grid dimension in a dataset
pub const MAX_GRID_DIMENSION: usize = 30;

// Scoring
/// Score ceiling a zero-byte program would reach
pub const SCORE_CEILING: usize = 2500;
/// Lowest score a correct program can receive
pub const MIN_CORRECT_SCORE: f64 = 1.0;
/// Score for incorrect programs, positive to keep aggregates orderable
pub const INCORRECT_SCORE: f64 = 0.001;
/// Task count used when projecting a batch total
pub const DEFAULT_PROJECTED_TASKS: usize = 400;

// Example group names as they appear in task files
/// Selection group name
pub const TRAIN_GROUP: &str = "train";
/// Held-out test group name
pub const TEST_GROUP: &str = "test";
/// Generated examples group name
pub const ARC_GEN_GROUP: &str = "arc-gen";

// Output settings
/// Extension for task files picked up from a directory
pub const TASK_EXTENSION: &str = "json";
/// Extension for written solution programs
pub const SOLUTION_EXTENSION: &str = "py";
/// Pixels per grid cell in rendered PNGs
pub const RENDER_CELL_SIZE: u32 = 16;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Standard ARC palette, indexed by cell value
pub const PALETTE: [[u8; 3]; COLOR_COUNT] = [
    [0, 0, 0],
    [0, 116, 217],
    [255, 65, 54],
    [46, 204, 64],
    [255, 220, 0],
    [170, 170, 170],
    [240, 18, 190],
    [255, 133, 27],
    [127, 219, 255],
    [135, 12, 37],
];
