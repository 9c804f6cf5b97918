//! Spatial data structures and grid algebra
//!
//! This module contains the pure structural operations the engine builds on:
//! - Validated immutable grids
//! - Rotation, reflection, tiling, scaling, margins and recoloring
//! - Connected components
//! - Symmetry and repetition detection

/// Flood-fill connected components
pub mod components;
/// Immutable validated grid type
pub mod grid;
/// Symmetry tests and repetition-period detection
pub mod symmetry;
/// Structural grid operations
pub mod transform;

pub use grid::{Grid, MalformedGrid};
