//! Deterministic candidate library of parameterized grid transformations
//!
//! Every candidate is a [`Template`] value paired with its canonical program
//! text and its position in the enumeration. The text is rendered once when
//! the library is built; its UTF-8 length is the byte count used for scoring.
//! Enumeration order is part of the contract: the search accepts the lowest
//! index that verifies, so two libraries built by [`CandidateLibrary::standard`]
//! are identical element for element.

use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::algorithm::execution::{Evaluation, execute};
use crate::io::configuration::{
    CONDITIONAL_TILE_SIZES, CONSTANT_COLORS, CONSTANT_DIMENSIONS, MAX_COLOR, MODULI, SCALE_FACTORS,
    SHIFT_AMOUNTS, TILE_COUNTS, WINDOW_SIZES,
};
use crate::spatial::grid::Grid;

/// Prefix shared by every canonical program
pub const PROGRAM_PREFIX: &str = "solve=lambda g:";

/// Edge of a grid a half-slice keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Left `len(r)//2` columns
    Left,
    /// Columns from `len(r)//2` onward
    Right,
    /// Top `len(g)//2` rows
    Top,
    /// Rows from `len(g)//2` onward
    Bottom,
}

/// Which index parity a mask keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// Keep cells whose index is even
    Even,
    /// Keep cells whose index is odd
    Odd,
}

impl Parity {
    const fn remainder(self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }

    /// Whether `index` has this parity
    pub const fn matches(self, index: usize) -> bool {
        index % 2 == self.remainder()
    }
}

/// Direction in which a mirrored copy is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorAxis {
    /// Append the upside-down grid below
    Vertical,
    /// Append the mirrored rows to the right
    Horizontal,
    /// Both of the above
    Both,
}

/// Half of a grid copied over the other half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorSource {
    /// Top half reflected onto the bottom
    TopToBottom,
    /// Left half reflected onto the right
    LeftToRight,
}

/// Per-row statistic broadcast across the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    /// Row sum modulo 10
    Sum,
    /// Number of non-zero cells
    Count,
    /// Largest value
    Max,
    /// Smallest value
    Min,
}

/// Candidate families, in enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Identity, flips, rotations and transposes
    Geometric,
    /// Whole-grid repetition
    Tiling,
    /// Integer scale-up and scale-down
    Scaling,
    /// Per-cell arithmetic on values
    ColorArithmetic,
    /// Adding or removing borders
    Border,
    /// Halves and strided rows or columns
    Slicing,
    /// Outputs built only from the input shape
    Fill,
    /// Self-similar block tiling gated by cell values
    ConditionalTiling,
    /// Recoloring and color swaps
    ColorMapping,
    /// Index-parity masks
    Mask,
    /// Color extraction, cropping and outlines
    Extraction,
    /// Mirror completion and mirror appends
    Symmetry,
    /// Diagonal extraction
    Diagonal,
    /// Per-row statistics
    RowAggregate,
    /// Sliding window sums
    WindowSum,
    /// Quadrant masks
    QuadrantMask,
    /// Fixed outputs independent of the input
    Constant,
}

impl Family {
    /// Lowercase family name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Geometric => "geometric",
            Self::Tiling => "tiling",
            Self::Scaling => "scaling",
            Self::ColorArithmetic => "color-arithmetic",
            Self::Border => "border",
            Self::Slicing => "slicing",
            Self::Fill => "fill",
            Self::ConditionalTiling => "conditional-tiling",
            Self::ColorMapping => "color-mapping",
            Self::Mask => "mask",
            Self::Extraction => "extraction",
            Self::Symmetry => "symmetry",
            Self::Diagonal => "diagonal",
            Self::RowAggregate => "row-aggregate",
            Self::WindowSum => "window-sum",
            Self::QuadrantMask => "quadrant-mask",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameterized transformation template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum Template {
    /// Return the input unchanged
    Identity,
    /// Reverse the row order
    FlipVertical,
    /// Reverse every row
    FlipHorizontal,
    /// Rotate 180°
    Rotate180,
    /// Rotate 90° clockwise
    Rotate90,
    /// Rotate 270° clockwise
    Rotate270,
    /// Reflect across the main diagonal
    Transpose,
    /// Reflect across the anti-diagonal
    AntiTranspose,
    /// Repeat the grid `rows` times down and `cols` times across
    Tile {
        /// Vertical repetitions
        rows: usize,
        /// Horizontal repetitions
        cols: usize,
    },
    /// Blow every cell up into a block
    ScaleUp {
        /// Block edge length
        factor: usize,
    },
    /// Keep every `factor`-th cell along both axes
    ScaleDown {
        /// Sampling stride
        factor: usize,
    },
    /// Add `amount` where the result stays at most 9
    ShiftUp {
        /// Amount added
        amount: u8,
    },
    /// Subtract `amount` where the result stays non-negative
    ShiftDown {
        /// Amount subtracted
        amount: u8,
    },
    /// Multiply modulo 10
    Multiply {
        /// Multiplier
        factor: u8,
    },
    /// Add modulo 10
    AddModulo {
        /// Amount added
        amount: u8,
    },
    /// Replace `c` with `9-c`
    Invert,
    /// Map non-zero cells to 1
    Binarize,
    /// Reduce every cell modulo `modulus`
    Modulo {
        /// Divisor
        modulus: u8,
    },
    /// Add a zero row above and below
    PadRows,
    /// Add a zero column left and right
    PadColumns,
    /// Surround the grid with a one-cell border
    PadBorder {
        /// Border color
        color: u8,
    },
    /// Drop the first and last row
    CropRows,
    /// Drop the first and last column
    CropColumns,
    /// Drop the outermost ring
    CropBorder,
    /// Keep one half of the grid
    Half {
        /// Kept half
        side: Side,
    },
    /// Keep every other column
    EveryOtherColumn,
    /// Keep every other row
    EveryOtherRow,
    /// Same-shape grid of one color
    Fill {
        /// Fill color
        color: u8,
    },
    /// Same-shape `(i+j)%2` pattern
    Checkerboard,
    /// Same-shape grid holding each row's index parity
    RowParity,
    /// Same-shape grid holding each column's index parity
    ColumnParity,
    /// Fixed-size self tiling: non-zero cells of the top-left block select rows of the input
    ConditionalTile {
        /// Block size
        size: usize,
    },
    /// Self tiling sized by the row count
    ConditionalTileGeneric,
    /// Replace one color with another
    Recolor {
        /// Replaced color
        from: u8,
        /// Replacement color
        to: u8,
    },
    /// Exchange two colors
    SwapColors {
        /// Smaller color of the pair
        first: u8,
        /// Larger color of the pair
        second: u8,
    },
    /// Keep cells whose `(i+j)` parity matches
    CheckerMask {
        /// Kept parity
        parity: Parity,
    },
    /// Keep rows whose index parity matches
    RowMask {
        /// Kept parity
        parity: Parity,
    },
    /// Keep columns whose index parity matches
    ColumnMask {
        /// Kept parity
        parity: Parity,
    },
    /// Zero every cell except the largest value
    KeepMax,
    /// Zero every cell except the smallest value
    KeepMin,
    /// Zero every cell except one color
    KeepColor {
        /// Kept color
        color: u8,
    },
    /// Crop to the bounding box of non-zero cells
    CropToContent,
    /// Zero everything but the outer ring
    Outline,
    /// Reflect one half over the other
    MirrorCompletion {
        /// Half that is copied
        source: MirrorSource,
    },
    /// Append mirrored copies
    MirrorAppend {
        /// Append direction
        axis: MirrorAxis,
    },
    /// Keep the main diagonal
    MainDiagonal,
    /// Keep the anti-diagonal
    AntiDiagonal,
    /// Broadcast a per-row statistic across the row
    RowAggregate {
        /// Statistic
        aggregate: Aggregate,
    },
    /// Sum every `size`×`size` window modulo 10
    WindowSum {
        /// Window edge length
        size: usize,
    },
    /// Keep the top-left quadrant, or everything outside it
    QuadrantMask {
        /// Whether the top-left quadrant is kept rather than cleared
        keep_top_left: bool,
    },
    /// Fixed grid ignoring the input
    Constant {
        /// Output rows
        rows: usize,
        /// Output columns
        cols: usize,
        /// Output color
        color: u8,
    },
}

impl Template {
    /// Family the template belongs to
    pub const fn family(&self) -> Family {
        match self {
            Self::Identity
            | Self::FlipVertical
            | Self::FlipHorizontal
            | Self::Rotate180
            | Self::Rotate90
            | Self::Rotate270
            | Self::Transpose
            | Self::AntiTranspose => Family::Geometric,
            Self::Tile { .. } => Family::Tiling,
            Self::ScaleUp { .. } | Self::ScaleDown { .. } => Family::Scaling,
            Self::ShiftUp { .. }
            | Self::ShiftDown { .. }
            | Self::Multiply { .. }
            | Self::AddModulo { .. }
            | Self::Invert
            | Self::Binarize
            | Self::Modulo { .. } => Family::ColorArithmetic,
            Self::PadRows
            | Self::PadColumns
            | Self::PadBorder { .. }
            | Self::CropRows
            | Self::CropColumns
            | Self::CropBorder => Family::Border,
            Self::Half { .. } | Self::EveryOtherColumn | Self::EveryOtherRow => Family::Slicing,
            Self::Fill { .. } | Self::Checkerboard | Self::RowParity | Self::ColumnParity => {
                Family::Fill
            }
            Self::ConditionalTile { .. } | Self::ConditionalTileGeneric => {
                Family::ConditionalTiling
            }
            Self::Recolor { .. } | Self::SwapColors { .. } => Family::ColorMapping,
            Self::CheckerMask { .. } | Self::RowMask { .. } | Self::ColumnMask { .. } => {
                Family::Mask
            }
            Self::KeepMax
            | Self::KeepMin
            | Self::KeepColor { .. }
            | Self::CropToContent
            | Self::Outline => Family::Extraction,
            Self::MirrorCompletion { .. } | Self::MirrorAppend { .. } => Family::Symmetry,
            Self::MainDiagonal | Self::AntiDiagonal => Family::Diagonal,
            Self::RowAggregate { .. } => Family::RowAggregate,
            Self::WindowSum { .. } => Family::WindowSum,
            Self::QuadrantMask { .. } => Family::QuadrantMask,
            Self::Constant { .. } => Family::Constant,
        }
    }

    /// Canonical program text, including the `solve=lambda g:` prefix
    pub fn source(&self) -> String {
        format!("{PROGRAM_PREFIX}{}", self.body())
    }

    // Keyword-adjacent numbers keep a space before `else` so `1else` never
    // lexes as an exponent literal.
    fn body(&self) -> String {
        match *self {
            Self::Identity => "g".into(),
            Self::FlipVertical => "g[::-1]".into(),
            Self::FlipHorizontal => "[r[::-1]for r in g]".into(),
            Self::Rotate180 => "[r[::-1]for r in g[::-1]]".into(),
            Self::Rotate90 => "[list(r)for r in zip(*g[::-1])]".into(),
            Self::Rotate270 => "[list(r)for r in zip(*g)][::-1]".into(),
            Self::Transpose => "[list(r)for r in zip(*g)]".into(),
            Self::AntiTranspose => "[list(r)for r in zip(*g[::-1])][::-1]".into(),
            Self::Tile { rows: 1, cols: 1 } => "g".into(),
            Self::Tile { rows, cols: 1 } => format!("g*{rows}"),
            Self::Tile { rows: 1, cols } => format!("[r*{cols}for r in g]"),
            Self::Tile { rows, cols } => format!("[r*{cols}for r in g]*{rows}"),
            Self::ScaleUp { factor: k } => {
                format!("[[g[i//{k}][j//{k}]for j in range(len(g[0])*{k})]for i in range(len(g)*{k})]")
            }
            Self::ScaleDown { factor: k } => {
                format!("[[g[i*{k}][j*{k}]for j in range(len(g[0])//{k})]for i in range(len(g)//{k})]")
            }
            Self::ShiftUp { amount: n } => format!("[[c+{n}if c+{n}<10 else c for c in r]for r in g]"),
            Self::ShiftDown { amount: n } => {
                format!("[[c-{n}if c-{n}>=0 else c for c in r]for r in g]")
            }
            Self::Multiply { factor: n } => format!("[[c*{n}%10 for c in r]for r in g]"),
            Self::AddModulo { amount: n } => format!("[[(c+{n})%10 for c in r]for r in g]"),
            Self::Invert => "[[9-c for c in r]for r in g]".into(),
            Self::Binarize => "[[int(c>0)for c in r]for r in g]".into(),
            Self::Modulo { modulus: m } => format!("[[c%{m}for c in r]for r in g]"),
            Self::PadRows => "[[0]*len(g[0])]+g+[[0]*len(g[0])]".into(),
            Self::PadColumns => "[[0]+r+[0]for r in g]".into(),
            Self::PadBorder { color: c } => {
                format!("[[{c}]*(len(g[0])+2)]+[[{c}]+r+[{c}]for r in g]+[[{c}]*(len(g[0])+2)]")
            }
            Self::CropRows => "g[1:-1]".into(),
            Self::CropColumns => "[r[1:-1]for r in g]".into(),
            Self::CropBorder => "[r[1:-1]for r in g[1:-1]]".into(),
            Self::Half { side: Side::Left } => "[r[:len(r)//2]for r in g]".into(),
            Self::Half { side: Side::Right } => "[r[len(r)//2:]for r in g]".into(),
            Self::Half { side: Side::Top } => "g[:len(g)//2]".into(),
            Self::Half { side: Side::Bottom } => "g[len(g)//2:]".into(),
            Self::EveryOtherColumn => "[r[::2]for r in g]".into(),
            Self::EveryOtherRow => "g[::2]".into(),
            Self::Fill { color: c } => format!("[[{c}]*len(g[0])]*len(g)"),
            Self::Checkerboard => "[[(i+j)%2 for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::RowParity => "[[i%2 for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::ColumnParity => "[[j%2 for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::ConditionalTile { size: n } => format!(
                "[[x for j in range({n})for x in(g[s]if g[i][j]else[0]*{n})]for i in range({n})for s in range({n})]"
            ),
            Self::ConditionalTileGeneric => "[[x for j in range(len(g))for x in(g[s]if g[i][j]else[0]*len(g))]for i in range(len(g))for s in range(len(g))]".into(),
            Self::Recolor { from, to } => format!("[[{to}if c=={from} else c for c in r]for r in g]"),
            Self::SwapColors { first, second } => {
                format!("[[{{{first}:{second},{second}:{first}}}.get(c,c)for c in r]for r in g]")
            }
            Self::CheckerMask { parity } => format!(
                "[[c if(i+j)%2=={} else 0 for j,c in enumerate(r)]for i,r in enumerate(g)]",
                parity.remainder()
            ),
            Self::RowMask { parity } => format!(
                "[[c if i%2=={} else 0 for c in r]for i,r in enumerate(g)]",
                parity.remainder()
            ),
            Self::ColumnMask { parity } => format!(
                "[[c if j%2=={} else 0 for j,c in enumerate(r)]for r in g]",
                parity.remainder()
            ),
            Self::KeepMax => "[[c if c==max(sum(g,[]))else 0 for c in r]for r in g]".into(),
            Self::KeepMin => "[[c if c==min(sum(g,[]))else 0 for c in r]for r in g]".into(),
            Self::KeepColor { color } => format!("[[c if c=={color} else 0 for c in r]for r in g]"),
            Self::CropToContent => "(lambda p:[r[min(j for i,j in p):max(j for i,j in p)+1]for r in g[min(i for i,j in p):max(i for i,j in p)+1]])([(i,j)for i,r in enumerate(g)for j,c in enumerate(r)if c])".into(),
            Self::Outline => "[[g[i][j]if i==0 or i==len(g)-1 or j==0 or j==len(r)-1 else 0 for j,c in enumerate(r)]for i,r in enumerate(g)]".into(),
            Self::MirrorCompletion {
                source: MirrorSource::TopToBottom,
            } => "[[g[i][j]if i<len(g)//2 else g[len(g)-1-i][j]for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::MirrorCompletion {
                source: MirrorSource::LeftToRight,
            } => "[[g[i][j]if j<len(g[0])//2 else g[i][len(g[0])-1-j]for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::MirrorAppend {
                axis: MirrorAxis::Vertical,
            } => "g+g[::-1]".into(),
            Self::MirrorAppend {
                axis: MirrorAxis::Horizontal,
            } => "[r+r[::-1]for r in g]".into(),
            Self::MirrorAppend {
                axis: MirrorAxis::Both,
            } => "[r+r[::-1]for r in g+g[::-1]]".into(),
            Self::MainDiagonal => "[[g[i][i]if i==j else 0 for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::AntiDiagonal => "[[g[i][len(g)-1-i]if i+j==len(g)-1 else 0 for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::RowAggregate {
                aggregate: Aggregate::Sum,
            } => "[[sum(r)%10]*len(g[0])for r in g]".into(),
            Self::RowAggregate {
                aggregate: Aggregate::Count,
            } => "[[len([c for c in r if c>0])]*len(g[0])for r in g]".into(),
            Self::RowAggregate {
                aggregate: Aggregate::Max,
            } => "[[max(r)]*len(g[0])for r in g]".into(),
            Self::RowAggregate {
                aggregate: Aggregate::Min,
            } => "[[min(r)]*len(g[0])for r in g]".into(),
            Self::WindowSum { size: k } => format!(
                "[[sum(g[i+a][j+b]for a in range({k})for b in range({k}))%10 for j in range(len(g[0])-{k}+1)]for i in range(len(g)-{k}+1)]"
            ),
            Self::QuadrantMask {
                keep_top_left: true,
            } => "[[g[i][j]if(i<len(g)//2 and j<len(g[0])//2)else 0 for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::QuadrantMask {
                keep_top_left: false,
            } => "[[g[i][j]if(i>=len(g)//2 or j>=len(g[0])//2)else 0 for j in range(len(g[0]))]for i in range(len(g))]".into(),
            Self::Constant { rows, cols, color } => format!("[[{color}]*{cols}]*{rows}"),
        }
    }

    /// Output shape for a non-empty `rows`×`cols` input, when it is certain
    ///
    /// A returned shape is the shape of every well-formed output the template
    /// can produce for such an input; the template may still fault or produce
    /// a malformed grid instead. Shapes with a zero dimension are reported as
    /// 0×0, the only well-formed empty grid. `None` means the shape depends
    /// on cell values or the input is empty.
    pub fn output_dims(&self, rows: usize, cols: usize) -> Option<(usize, usize)> {
        if let Self::Constant {
            rows: height,
            cols: width,
            ..
        } = *self
        {
            return Some(normalized(height, width));
        }
        if rows == 0 || cols == 0 {
            return None;
        }
        let dims = match *self {
            Self::Rotate90 | Self::Rotate270 | Self::Transpose | Self::AntiTranspose => {
                (cols, rows)
            }
            Self::Tile {
                rows: down,
                cols: across,
            } => (rows * down, cols * across),
            Self::ScaleUp { factor } => (rows * factor, cols * factor),
            Self::ScaleDown { factor } => (rows.checked_div(factor)?, cols.checked_div(factor)?),
            Self::PadRows => (rows + 2, cols),
            Self::PadColumns => (rows, cols + 2),
            Self::PadBorder { .. } => (rows + 2, cols + 2),
            Self::CropRows => (rows.saturating_sub(2), cols),
            Self::CropColumns => (rows, cols.saturating_sub(2)),
            Self::CropBorder => (rows.saturating_sub(2), cols.saturating_sub(2)),
            Self::Half { side: Side::Left } => (rows, cols / 2),
            Self::Half { side: Side::Right } => (rows, cols - cols / 2),
            Self::Half { side: Side::Top } => (rows / 2, cols),
            Self::Half { side: Side::Bottom } => (rows - rows / 2, cols),
            Self::EveryOtherColumn => (rows, cols.div_ceil(2)),
            Self::EveryOtherRow => (rows.div_ceil(2), cols),
            // Segments are either a copied row or a zero run of the block size
            Self::ConditionalTile { size } => {
                return (cols == size).then_some(normalized(size * size, size * size));
            }
            Self::ConditionalTileGeneric => {
                return (cols == rows).then_some(normalized(rows * rows, rows * rows));
            }
            Self::CropToContent => return None,
            Self::MirrorAppend {
                axis: MirrorAxis::Vertical,
            } => (rows * 2, cols),
            Self::MirrorAppend {
                axis: MirrorAxis::Horizontal,
            } => (rows, cols * 2),
            Self::MirrorAppend {
                axis: MirrorAxis::Both,
            } => (rows * 2, cols * 2),
            Self::WindowSum { size } => ((rows + 1).saturating_sub(size), (cols + 1).saturating_sub(size)),
            _ => (rows, cols),
        };
        Some(normalized(dims.0, dims.1))
    }

    /// Whether the template ignores cell values and always fills one color
    pub const fn uniform_color(&self) -> Option<u8> {
        match *self {
            Self::Fill { color } | Self::Constant { color, .. } => Some(color),
            _ => None,
        }
    }
}

const fn normalized(rows: usize, cols: usize) -> (usize, usize) {
    if rows == 0 || cols == 0 {
        (0, 0)
    } else {
        (rows, cols)
    }
}

/// Library entry: a template, its canonical program and its enumeration index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Transformation {
    index: usize,
    template: Template,
    source: String,
}

impl Transformation {
    /// Bind a template to an enumeration index, rendering its program text
    pub fn new(index: usize, template: Template) -> Self {
        Self {
            index,
            template,
            source: template.source(),
        }
    }

    /// Position in the library enumeration
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Underlying template
    pub const fn template(&self) -> Template {
        self.template
    }

    /// Family of the underlying template
    pub const fn family(&self) -> Family {
        self.template.family()
    }

    /// Canonical program text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// UTF-8 length of the canonical program text
    pub fn byte_count(&self) -> usize {
        self.source.len()
    }

    /// Run the candidate on one input grid
    ///
    /// # Errors
    ///
    /// Returns a fault wherever the canonical program would raise
    pub fn apply(&self, grid: &Grid) -> Evaluation {
        execute(self.template, grid)
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.source)
    }
}

/// Ordered, immutable collection of candidate transformations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLibrary {
    transformations: Vec<Transformation>,
}

impl Default for CandidateLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl CandidateLibrary {
    /// Index templates in the given order
    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        Self {
            transformations: templates
                .into_iter()
                .enumerate()
                .map(|(index, template)| Transformation::new(index, template))
                .collect(),
        }
    }

    /// The full library in its fixed enumeration order
    pub fn standard() -> Self {
        Self::from_templates(standard_templates())
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    /// Whether the library holds no candidates
    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    /// Candidate at an enumeration index
    pub fn get(&self, index: usize) -> Option<&Transformation> {
        self.transformations.get(index)
    }

    /// First candidate built from `template`
    pub fn find(&self, template: Template) -> Option<&Transformation> {
        self.transformations
            .iter()
            .find(|transformation| transformation.template == template)
    }

    /// Candidates in enumeration order
    pub fn iter(&self) -> std::slice::Iter<'_, Transformation> {
        self.transformations.iter()
    }
}

static STANDARD_LIBRARY: LazyLock<CandidateLibrary> = LazyLock::new(CandidateLibrary::standard);

/// Process-wide standard library, built on first use
pub fn standard_library() -> &'static CandidateLibrary {
    &STANDARD_LIBRARY
}

impl<'a> IntoIterator for &'a CandidateLibrary {
    type Item = &'a Transformation;
    type IntoIter = std::slice::Iter<'a, Transformation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn standard_templates() -> Vec<Template> {
    let mut templates = vec![
        Template::Identity,
        Template::FlipVertical,
        Template::FlipHorizontal,
        Template::Rotate180,
        Template::Rotate90,
        Template::Rotate270,
        Template::Transpose,
        Template::AntiTranspose,
    ];

    for rows in TILE_COUNTS {
        templates.extend(TILE_COUNTS.map(|cols| Template::Tile { rows, cols }));
    }

    templates.extend(SCALE_FACTORS.map(|factor| Template::ScaleUp { factor }));
    templates.extend(SCALE_FACTORS.map(|factor| Template::ScaleDown { factor }));

    for amount in SHIFT_AMOUNTS {
        templates.push(Template::ShiftUp { amount });
        templates.push(Template::ShiftDown { amount });
        if amount >= 2 {
            templates.push(Template::Multiply { factor: amount });
        }
        templates.push(Template::AddModulo { amount });
    }
    templates.push(Template::Invert);
    templates.push(Template::Binarize);
    templates.extend(MODULI.map(|modulus| Template::Modulo { modulus }));

    templates.push(Template::PadRows);
    templates.push(Template::PadColumns);
    templates.extend((0..=MAX_COLOR).map(|color| Template::PadBorder { color }));
    templates.extend([Template::CropRows, Template::CropColumns, Template::CropBorder]);

    templates.extend(
        [Side::Left, Side::Right, Side::Top, Side::Bottom].map(|side| Template::Half { side }),
    );
    templates.extend([Template::EveryOtherColumn, Template::EveryOtherRow]);

    templates.extend((0..=MAX_COLOR).map(|color| Template::Fill { color }));
    templates.extend([
        Template::Checkerboard,
        Template::RowParity,
        Template::ColumnParity,
    ]);

    templates.extend(CONDITIONAL_TILE_SIZES.map(|size| Template::ConditionalTile { size }));
    templates.push(Template::ConditionalTileGeneric);

    for from in 0..=MAX_COLOR {
        templates.extend(
            (0..=MAX_COLOR)
                .filter(|&to| to != from)
                .map(|to| Template::Recolor { from, to }),
        );
    }
    for first in 0..=MAX_COLOR {
        templates.extend(
            (first + 1..=MAX_COLOR).map(|second| Template::SwapColors { first, second }),
        );
    }

    for parity in [Parity::Even, Parity::Odd] {
        templates.push(Template::CheckerMask { parity });
    }
    for parity in [Parity::Even, Parity::Odd] {
        templates.push(Template::RowMask { parity });
    }
    for parity in [Parity::Even, Parity::Odd] {
        templates.push(Template::ColumnMask { parity });
    }

    templates.extend([Template::KeepMax, Template::KeepMin]);
    templates.extend((1..=MAX_COLOR).map(|color| Template::KeepColor { color }));
    templates.extend([Template::CropToContent, Template::Outline]);

    templates.extend(
        [MirrorSource::TopToBottom, MirrorSource::LeftToRight]
            .map(|source| Template::MirrorCompletion { source }),
    );
    templates.extend(
        [MirrorAxis::Vertical, MirrorAxis::Horizontal, MirrorAxis::Both]
            .map(|axis| Template::MirrorAppend { axis }),
    );

    templates.extend([Template::MainDiagonal, Template::AntiDiagonal]);
    templates.extend(
        [Aggregate::Sum, Aggregate::Count, Aggregate::Max, Aggregate::Min]
            .map(|aggregate| Template::RowAggregate { aggregate }),
    );
    templates.extend(WINDOW_SIZES.map(|size| Template::WindowSum { size }));
    templates.extend([true, false].map(|keep_top_left| Template::QuadrantMask { keep_top_left }));

    for rows in CONSTANT_DIMENSIONS {
        for cols in CONSTANT_DIMENSIONS {
            templates.extend(
                CONSTANT_COLORS.map(|color| Template::Constant { rows, cols, color }),
            );
        }
    }

    templates
}
