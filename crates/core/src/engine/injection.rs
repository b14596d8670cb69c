//! Source injection: feed fresh intensity into the floor of the fire, and
//! the one-off floor nudges requested by host controls.

use crate::grid::GridShape;
use crate::palette::MAX_INTENSITY;
use crate::params::{FireControl, SOURCE_NUDGE_SPAN};
use crate::random::FireRng;

/// Raise every floor cell by `floor(u * strength)`, capped at 36.
///
/// Walks `column` and `depth` over [`SourceOverscan::span`](crate::SourceOverscan::span)
/// and targets `floor_start + column * N + depth`. With overscan the last
/// depth of a column lands on the first cell of the next row, and the final
/// column lands in the overscan tail.
pub fn inject_source(shape: &GridShape, strength: f32, rng: &mut FireRng, intensity: &mut [i32]) {
    let side = shape.side();
    let span = shape.overscan().span(side);
    let floor_start = shape.floor_start();

    for column in 0..span {
        let column_delta = column * side;

        for depth in 0..span {
            let index = floor_start + column_delta + depth;
            let increase = (rng.next_float(1.0) * strength).floor() as i32;
            intensity[index] = (intensity[index] + increase).clamp(0, MAX_INTENSITY);
        }
    }
}

/// Heat or cool the floor once by `floor(u * 7)` per cell.
///
/// Walks the same positions as [`inject_source`]. Cells already at the bound
/// the control pushes towards (36 when heating, 0 when cooling) are skipped
/// without a draw.
pub fn nudge_source(
    shape: &GridShape,
    control: FireControl,
    rng: &mut FireRng,
    intensity: &mut [i32],
) {
    let side = shape.side();
    let span = shape.overscan().span(side);
    let floor_start = shape.floor_start();

    for column in 0..span {
        for depth in 0..span {
            let index = floor_start + column * side + depth;
            let current = intensity[index];
            let saturated = match control {
                FireControl::Increase => current >= MAX_INTENSITY,
                FireControl::Decrease => current <= 0,
            };
            if saturated {
                continue;
            }

            let step = rng.next_float(SOURCE_NUDGE_SPAN).floor() as i32;
            intensity[index] = match control {
                FireControl::Increase => current + step,
                FireControl::Decrease => current - step,
            }
            .clamp(0, MAX_INTENSITY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{FireBuffers, SourceOverscan};
    use crate::random::DEFAULT_SEED;

    #[test]
    fn test_injection_only_touches_floor_and_tail() {
        let shape = GridShape::new(4, SourceOverscan::Replicate).unwrap();
        let mut buffers = FireBuffers::new(&shape);
        let mut rng = FireRng::new(DEFAULT_SEED);

        for _ in 0..10 {
            inject_source(&shape, 7.0, &mut rng, &mut buffers.intensity);
        }

        assert!(buffers.intensity[..shape.floor_start()].iter().all(|&v| v == 0));
        assert!(buffers.intensity[shape.floor_start()..].iter().any(|&v| v > 0));
    }

    #[test]
    fn test_injection_draw_count() {
        // (N + 1)^2 draws with overscan, N^2 without
        for (overscan, draws) in [(SourceOverscan::Replicate, 25), (SourceOverscan::Clamp, 16)] {
            let shape = GridShape::new(4, overscan).unwrap();
            let mut buffers = FireBuffers::new(&shape);
            let mut rng = FireRng::new(5);
            let mut reference = FireRng::new(5);

            inject_source(&shape, 7.0, &mut rng, &mut buffers.intensity);
            for _ in 0..draws {
                reference.next_u32();
            }
            assert_eq!(rng.next_u32(), reference.next_u32());
        }
    }

    #[test]
    fn test_injection_saturates_at_max() {
        let shape = GridShape::new(3, SourceOverscan::Clamp).unwrap();
        let mut buffers = FireBuffers::new(&shape);
        buffers.intensity[shape.floor_start()..].fill(35);
        let mut rng = FireRng::new(1);

        for _ in 0..20 {
            inject_source(&shape, 37.0, &mut rng, &mut buffers.intensity);
        }
        assert!(buffers.intensity[shape.floor_start()..]
            .iter()
            .all(|&v| v == MAX_INTENSITY));
    }

    #[test]
    fn test_cooling_lowers_saturated_floor() {
        let shape = GridShape::new(4, SourceOverscan::Replicate).unwrap();
        let mut buffers = FireBuffers::new(&shape);
        buffers.intensity[shape.floor_start()..].fill(MAX_INTENSITY);
        let mut rng = FireRng::new(DEFAULT_SEED);

        for _ in 0..30 {
            nudge_source(&shape, FireControl::Decrease, &mut rng, &mut buffers.intensity);
        }

        let floor = &buffers.intensity[shape.floor_start()..];
        assert!(floor.iter().all(|&v| (0..=MAX_INTENSITY).contains(&v)));
        assert!(floor.iter().all(|&v| v < MAX_INTENSITY));
        assert!(buffers.intensity[..shape.floor_start()].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_nudge_skips_cells_at_bound() {
        let shape = GridShape::new(3, SourceOverscan::Clamp).unwrap();
        let mut buffers = FireBuffers::new(&shape);
        let mut rng = FireRng::new(2);
        let mut reference = FireRng::new(2);

        // Cold floor: cooling has nothing to do and draws nothing
        nudge_source(&shape, FireControl::Decrease, &mut rng, &mut buffers.intensity);
        assert!(buffers.intensity.iter().all(|&v| v == 0));
        assert_eq!(rng.next_u32(), reference.next_u32());

        buffers.intensity[shape.floor_start()..].fill(MAX_INTENSITY);
        nudge_source(&shape, FireControl::Increase, &mut rng, &mut buffers.intensity);
        assert!(buffers.intensity[shape.floor_start()..]
            .iter()
            .all(|&v| v == MAX_INTENSITY));
        assert_eq!(rng.next_u32(), reference.next_u32());
    }

    #[test]
    fn test_zero_strength_leaves_floor_unchanged() {
        let shape = GridShape::new(3, SourceOverscan::Replicate).unwrap();
        let mut buffers = FireBuffers::new(&shape);
        buffers.intensity[shape.floor_start()] = 12;
        let before = buffers.intensity.clone();
        let mut rng = FireRng::new(1);

        inject_source(&shape, 0.0, &mut rng, &mut buffers.intensity);
        assert_eq!(buffers.intensity, before);
    }
}
