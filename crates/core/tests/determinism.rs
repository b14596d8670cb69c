//! Determinism and invariant checks over many ticks.

use doom_fire_core::{
    engine, DriftMode, FireBuffers, FireParams, FireRng, FireSimulation, GridShape,
    IntensityStats, SourceOverscan, MAX_INTENSITY,
};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn run(shape: GridShape, seed: u32, params: FireParams, ticks: usize) -> FireBuffers {
    let mut sim = FireSimulation::with_params(shape, seed, params).unwrap();
    let mut buffers = FireBuffers::new(&shape);
    for _ in 0..ticks {
        sim.tick_buffers(&mut buffers).unwrap();
    }
    buffers
}

#[test]
fn test_identical_runs_are_bit_identical() {
    init_tracing();
    let shape = GridShape::new(12, SourceOverscan::Replicate).unwrap();

    let a = run(shape, 0xFEA4_BEE5, FireParams::reference(), 60);
    let b = run(shape, 0xFEA4_BEE5, FireParams::reference(), 60);

    assert_eq!(a.intensity, b.intensity);
    let bits_a: Vec<u32> = a.colors.iter().map(|c| c.to_bits()).collect();
    let bits_b: Vec<u32> = b.colors.iter().map(|c| c.to_bits()).collect();
    assert_eq!(bits_a, bits_b);
}

#[test]
fn test_different_seeds_diverge() {
    let shape = GridShape::new(8, SourceOverscan::Replicate).unwrap();
    let a = run(shape, 1, FireParams::reference(), 10);
    let b = run(shape, 2, FireParams::reference(), 10);
    assert_ne!(
        IntensityStats::from_grid(&shape, &a.intensity).checksum,
        IntensityStats::from_grid(&shape, &b.intensity).checksum
    );
}

#[test]
fn test_independent_simulations_do_not_interfere() {
    let shape = GridShape::new(6, SourceOverscan::Replicate).unwrap();
    let mut a = FireSimulation::new(shape);
    let mut b = FireSimulation::new(shape);
    let mut buf_a = FireBuffers::new(&shape);
    let mut buf_b = FireBuffers::new(&shape);

    // Interleave ticks; each owns its random source
    for _ in 0..10 {
        a.tick_buffers(&mut buf_a).unwrap();
        a.tick_buffers(&mut buf_a).unwrap();
        b.tick_buffers(&mut buf_b).unwrap();
    }
    for _ in 0..10 {
        b.tick_buffers(&mut buf_b).unwrap();
    }
    assert_eq!(buf_a, buf_b);
}

#[test]
fn test_engine_matches_simulation() {
    let shape = GridShape::new(5, SourceOverscan::Replicate).unwrap();
    let params = FireParams::reference();

    let expected = run(shape, 31, params, 3);

    let mut rng = FireRng::new(31);
    let mut buffers = FireBuffers::new(&shape);
    for _ in 0..3 {
        engine::run_tick(
            &shape,
            &params,
            &mut rng,
            &doom_fire_core::FIRE_PALETTE,
            &mut buffers.intensity,
            &mut buffers.colors,
        );
    }
    assert_eq!(buffers, expected);
}

#[test]
fn test_fire_builds_up_over_time() {
    let shape = GridShape::new(10, SourceOverscan::Replicate).unwrap();
    let early = run(shape, 5, FireParams::reference(), 1);
    let late = run(shape, 5, FireParams::reference(), 80);

    let early = IntensityStats::from_grid(&shape, &early.intensity);
    let late = IntensityStats::from_grid(&shape, &late.intensity);
    assert!(late.mean > early.mean);
    assert_eq!(late.max, MAX_INTENSITY);
}

fn arb_overscan() -> impl Strategy<Value = SourceOverscan> {
    prop_oneof![Just(SourceOverscan::Replicate), Just(SourceOverscan::Clamp)]
}

fn arb_drift() -> impl Strategy<Value = DriftMode> {
    prop_oneof![Just(DriftMode::Rightward), Just(DriftMode::Symmetric)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn intensities_and_colors_stay_in_range(
        side in 1usize..7,
        seed in any::<u32>(),
        ticks in 1usize..25,
        strength in 0.0f32..=37.0,
        decay_span in 0.0f32..=8.0,
        overscan in arb_overscan(),
        drift in arb_drift(),
    ) {
        let shape = GridShape::new(side, overscan).unwrap();
        let params = FireParams { injection_strength: strength, decay_span, drift };
        let buffers = run(shape, seed, params, ticks);

        prop_assert!(buffers.intensity.iter().all(|&v| (0..=MAX_INTENSITY).contains(&v)));
        prop_assert!(buffers.colors.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn injection_never_lowers_and_caps(
        start in 0i32..=MAX_INTENSITY,
        seed in any::<u32>(),
    ) {
        let shape = GridShape::new(3, SourceOverscan::Replicate).unwrap();
        let mut buffers = FireBuffers::new(&shape);
        buffers.intensity[shape.floor_start()..].fill(start);
        let mut rng = FireRng::new(seed);

        engine::inject_source(&shape, 7.0, &mut rng, &mut buffers.intensity);

        for &v in &buffers.intensity[shape.floor_start()..] {
            prop_assert!((start..=MAX_INTENSITY).contains(&v));
        }
    }

    #[test]
    fn generator_float_bound(seed in any::<u32>(), max in 0.001f32..1000.0) {
        let mut rng = FireRng::new(seed);
        for _ in 0..200 {
            let f = rng.next_float(max);
            prop_assert!((0.0..max).contains(&f));
        }
    }

    #[test]
    fn generator_reproducible(seed in any::<u32>(), k in 1usize..1500) {
        let mut a = FireRng::new(seed);
        let mut b = FireRng::new(seed);
        for _ in 0..k {
            prop_assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
