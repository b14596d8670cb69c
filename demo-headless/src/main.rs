use clap::{Parser, ValueEnum};
use doom_fire_core::{
    DriftMode, FireBuffers, FireParams, FireSimulation, GridShape, IntensityStats,
    SourceOverscan, MAX_INTENSITY,
};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Brightness ramp for slice rendering, dark to bright.
const FIRE_CHARS: [char; 10] = [' ', '.', ':', ';', '*', 'o', 'O', '#', '@', '%'];

/// Doom fire demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "doom-fire-demo")]
#[command(about = "Deterministic procedural fire, rendered as text", long_about = None)]
struct Args {
    /// Grid side length (cube of side^3 cells)
    #[arg(short = 'n', long, default_value_t = 24)]
    side: usize,

    /// Random seed
    #[arg(short, long, default_value_t = 0xFEA4_BEE5)]
    seed: u32,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 120)]
    ticks: u64,

    /// Keep floor injection inside the cube instead of the reference overscan
    #[arg(long, conflicts_with = "overscan")]
    clamp: bool,

    /// Replicate the reference floor overscan (default)
    #[arg(long)]
    overscan: bool,

    /// Lateral drift of the propagation write
    #[arg(long, value_enum)]
    drift: Option<DriftArg>,

    /// Injection strength (overrides the params file)
    #[arg(long)]
    strength: Option<f32>,

    /// JSON file with fire parameters; missing fields keep reference values
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Render the x/z plane at this row after the run
    #[arg(long)]
    slice: Option<usize>,

    /// Report interval in ticks (0 = final report only)
    #[arg(short, long, default_value_t = 20)]
    report_interval: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DriftArg {
    Rightward,
    Symmetric,
}

impl From<DriftArg> for DriftMode {
    fn from(arg: DriftArg) -> Self {
        match arg {
            DriftArg::Rightward => DriftMode::Rightward,
            DriftArg::Symmetric => DriftMode::Symmetric,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Doom Fire Demo ===\n");

    let params = load_params(&args)?;
    let overscan = if args.clamp && !args.overscan {
        SourceOverscan::Clamp
    } else {
        SourceOverscan::Replicate
    };
    let shape = GridShape::new(args.side, overscan)?;
    let mut sim = FireSimulation::with_params(shape, args.seed, params)?;
    let mut buffers = FireBuffers::new(&shape);

    println!(
        "Grid: {side}x{side}x{side} ({} cells, {} intensity slots)",
        shape.cell_count(),
        shape.intensity_len(),
        side = shape.side()
    );
    println!(
        "Params: strength {:.1}, decay span {:.1}, drift {:?}, overscan {:?}\n",
        params.injection_strength, params.decay_span, params.drift, overscan
    );

    println!("  Tick |  Mean |  Max |   Lit");
    println!("-------|-------|------|------");

    for tick in 1..=args.ticks {
        sim.tick_buffers(&mut buffers)?;

        if args.report_interval > 0 && tick % args.report_interval == 0 {
            report(tick, &IntensityStats::from_grid(&shape, &buffers.intensity));
        }
    }

    let stats = IntensityStats::from_grid(&shape, &buffers.intensity);
    if args.report_interval == 0 || args.ticks % args.report_interval != 0 {
        report(args.ticks, &stats);
    }

    if let Some(row) = args.slice {
        if row >= shape.side() {
            return Err(format!("slice row {row} is outside 0..{}", shape.side()).into());
        }
        println!("\nSlice y={row} (floor at the bottom):");
        print!("{}", render_slice(&shape, &buffers.intensity, row));
    }

    println!("\n=== Run Complete ===");
    println!("Ticks: {}", sim.ticks());
    println!("Checksum: {:#010x}", stats.checksum);
    info!("Finished {} ticks, checksum {:#010x}", sim.ticks(), stats.checksum);

    Ok(())
}

/// Reference parameters, then the JSON file, then CLI overrides.
fn load_params(args: &Args) -> Result<FireParams, Box<dyn Error>> {
    let mut params = match &args.params {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let params: FireParams = serde_json::from_str(&text)?;
            info!("Loaded params from {}", path.display());
            params
        }
        None => FireParams::reference(),
    };

    if let Some(strength) = args.strength {
        params.injection_strength = strength;
    }
    if let Some(drift) = args.drift {
        params.drift = drift.into();
    }

    params.validate()?;
    Ok(params)
}

fn report(tick: u64, stats: &IntensityStats) {
    println!(
        "{:6} | {:5.2} | {:4} | {:5}",
        tick, stats.mean, stats.max, stats.lit_cells
    );
}

/// Text rendering of the x/z plane at row `y`, one line per depth layer.
fn render_slice(shape: &GridShape, intensity: &[i32], y: usize) -> String {
    let side = shape.side();
    let mut out = String::with_capacity((side + 1) * side);

    for z in 0..side {
        for x in 0..side {
            let value = intensity[shape.index(x, y, z)].clamp(0, MAX_INTENSITY) as usize;
            let idx = value * (FIRE_CHARS.len() - 1) / MAX_INTENSITY as usize;
            out.push(FIRE_CHARS[idx]);
        }
        out.push('\n');
    }

    out
}
