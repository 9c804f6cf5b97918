//! PNG export of grids in the ARC palette

use image::{ImageBuffer, Rgb};
use std::path::Path;

use crate::io::configuration::{PALETTE, RENDER_CELL_SIZE};
use crate::io::error::{Result, SolverError, file_system_error, invalid_parameter};
use crate::spatial::grid::Grid;

/// Rasterize a grid, one `RENDER_CELL_SIZE` square per cell
///
/// # Errors
///
/// Returns an invalid parameter error for an empty grid, which has no
/// image representation
pub fn rasterize(grid: &Grid) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    if grid.is_empty() {
        return Err(invalid_parameter("grid", &"0x0", &"cannot render an empty grid"));
    }
    let width = grid.cols() as u32 * RENDER_CELL_SIZE;
    let height = grid.rows() as u32 * RENDER_CELL_SIZE;

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let row = (y / RENDER_CELL_SIZE) as usize;
        let col = (x / RENDER_CELL_SIZE) as usize;
        let rgb = grid
            .get(row, col)
            .and_then(|value| PALETTE.get(usize::from(value)))
            .copied()
            .unwrap_or([0, 0, 0]);
        Rgb(rgb)
    }))
}

/// Render `grid` to a PNG file, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The grid is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, output_path: &Path) -> Result<()> {
    let img = rasterize(grid)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|source| file_system_error(parent, "create directory", source))?;
    }

    img.save(output_path)
        .map_err(|source| SolverError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })
}
