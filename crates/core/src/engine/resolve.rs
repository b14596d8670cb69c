//! Color resolution: palette lookup for every cell.

use rayon::prelude::*;

use crate::grid::GridShape;
use crate::palette::{PaletteColor, CHANNELS};

/// Overwrite `colors` with the normalized palette color of each cube cell.
///
/// Cells past the cube (the overscan tail) have no color. No random draws,
/// so cells are resolved in parallel.
pub fn resolve_colors(
    shape: &GridShape,
    palette: &[PaletteColor],
    intensity: &[i32],
    colors: &mut [f32],
) {
    colors
        .par_chunks_exact_mut(CHANNELS)
        .zip(intensity[..shape.cell_count()].par_iter())
        .for_each(|(pixel, &level)| {
            pixel.copy_from_slice(&palette[level as usize].normalized());
        });
}
