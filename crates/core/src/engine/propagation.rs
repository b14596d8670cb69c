//! Propagation: move intensity up one layer with decay and drift.

use crate::grid::GridShape;
use crate::params::FireParams;
use crate::random::FireRng;

/// Pull each non-floor cell's intensity from the cell one layer below.
///
/// For every `current` in `0..N³ - N²`, ascending:
///
/// - `decay = max(trunc(u * decay_span), 0)`
/// - `value = max(intensity[current + N²] - decay, 0)`
/// - `direction` from a second draw, resolved by [`DriftMode`](crate::DriftMode)
/// - `intensity[current - decay * direction] = value`
///
/// Reads and writes share one buffer, so a later cell may observe a value
/// written earlier in the same pass. A target outside the cube is skipped;
/// both draws for that cell are still consumed.
pub fn propagate(shape: &GridShape, params: &FireParams, rng: &mut FireRng, intensity: &mut [i32]) {
    let cells = shape.cell_count();
    let layer = shape.layer_len();

    for current in 0..cells - layer {
        let below = current + layer;

        // Decay never adds intensity, whatever span the caller passes
        let decay = (rng.next_float(params.decay_span) as i32).max(0);
        let value = (intensity[below] - decay).max(0);

        let raw_direction = rng.next_float(2.0) as i32 - 1;
        let direction = params.drift.resolve(raw_direction);
        let shift = (decay * direction) as isize;

        if let Some(target) = current.checked_add_signed(-shift).filter(|&t| t < cells) {
            intensity[target] = value;
        }
    }
}
