//! conetrack CLI — order track-boundary cones from a track CSV.

mod track;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use conetrack::{
    filter_valid_cones, split_by_side, ConeOrderer, CrossingCheck, DegenerateAnglePolicy,
    DistanceMatrix, OrderConfig, OrderedBoundary, Point,
};
use serde::Serialize;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const ORDER_SCHEMA_V1: &str = "conetrack.order.v1";

#[derive(Parser)]
#[command(name = "conetrack")]
#[command(about = "Order unordered blue/yellow cone detections into track boundaries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Order the cones of a track CSV and write both boundaries as JSON.
    Order(CliOrderArgs),

    /// Print cone counts and filter results for a track CSV.
    Inspect {
        /// Path to the track CSV (`kind,x,y` rows, no header).
        #[arg(long)]
        track: PathBuf,
    },

    /// Print the default ordering config as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct CliOrderArgs {
    /// Path to the track CSV (`kind,x,y` rows, no header).
    #[arg(long)]
    track: PathBuf,

    /// Path to write the ordered boundaries (JSON). Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Ordering config (JSON). Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to write a versioned debug dump with per-candidate decisions (JSON).
    #[arg(long)]
    debug_json: Option<PathBuf>,

    /// Maximum number of cones returned per side.
    #[arg(long)]
    max_cones: Option<usize>,

    /// Neighbor radius; also the loop-closure distance.
    #[arg(long)]
    max_neighbor_distance: Option<f64>,

    /// Minimum accepted turn angle in degrees.
    #[arg(long)]
    min_turn_angle_deg: Option<f64>,

    /// Segments shorter than this never count as crossing.
    #[arg(long)]
    crossing_tolerance: Option<f64>,

    /// Stop the path search after this many frontier pops.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Skip the turn-angle test when two cones coincide instead of rejecting.
    #[arg(long)]
    skip_degenerate_angles: bool,

    /// Leave the last path segment out of the crossing test.
    #[arg(long)]
    skip_adjacent_crossing: bool,

    /// Origin x. Overrides the `car_start` row of the track file.
    #[arg(long, requires = "origin_y", allow_hyphen_values = true)]
    origin_x: Option<f64>,

    /// Origin y. Overrides the `car_start` row of the track file.
    #[arg(long, requires = "origin_x", allow_hyphen_values = true)]
    origin_y: Option<f64>,
}

impl CliOrderArgs {
    fn build_config(&self) -> CliResult<OrderConfig> {
        let mut config = match &self.config {
            Some(path) => OrderConfig::from_json_file(path)?,
            None => OrderConfig::default(),
        };

        if let Some(v) = self.max_cones {
            config.max_cones = v;
        }
        if let Some(v) = self.max_neighbor_distance {
            config.search.max_neighbor_distance = v;
        }
        if let Some(v) = self.min_turn_angle_deg {
            config.search.min_turn_angle_deg = v;
        }
        if let Some(v) = self.crossing_tolerance {
            config.search.crossing_tolerance = v;
        }
        if self.max_iterations.is_some() {
            config.search.max_iterations = self.max_iterations;
        }
        if self.skip_degenerate_angles {
            config.search.degenerate_angle = DegenerateAnglePolicy::SkipCheck;
        }
        if self.skip_adjacent_crossing {
            config.search.crossing_check = CrossingCheck::SkipAdjacent;
        }

        config.validate()?;
        Ok(config)
    }

    fn origin_override(&self) -> CliResult<Option<Point>> {
        match (self.origin_x, self.origin_y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(Some(Point::new(x, y))),
            (Some(x), Some(y)) => Err(format!("origin ({}, {}) is not finite", x, y).into()),
            _ => Ok(None),
        }
    }
}

#[derive(Serialize)]
struct OrderOutput<'a> {
    schema: &'static str,
    origin: Point,
    left: &'a OrderedBoundary,
    right: &'a OrderedBoundary,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Order(args) => run_order(&args),
        Commands::Inspect { track } => run_inspect(&track),
        Commands::DefaultConfig => run_default_config(),
    }
}

// ── default-config ─────────────────────────────────────────────────────

fn run_default_config() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&OrderConfig::default())?);
    Ok(())
}

// ── inspect ────────────────────────────────────────────────────────────

fn run_inspect(path: &Path) -> CliResult<()> {
    let track = track::load_track(path)?;
    let (left, right) = split_by_side(&track.cones);
    let max_distance = OrderConfig::default().search.max_neighbor_distance;

    println!("track file: {}", path.display());
    println!("  cones:          {}", track.cones.len());
    println!("  skipped rows:   {}", track.n_skipped);
    match track.car_start {
        Some(p) => println!("  car start:      ({:.3}, {:.3})", p.x, p.y),
        None => println!("  car start:      none (origin defaults to (0, 0))"),
    }
    for (name, cones) in [("left (blue)", &left), ("right (yellow)", &right)] {
        let matrix = DistanceMatrix::from_cones(cones);
        let valid = filter_valid_cones(cones, &matrix, max_distance);
        println!(
            "  {:<15} {} cones, {} with a neighbor within {:.1}",
            format!("{}:", name),
            cones.len(),
            valid.len(),
            max_distance
        );
    }
    Ok(())
}

// ── order ──────────────────────────────────────────────────────────────

fn run_order(args: &CliOrderArgs) -> CliResult<()> {
    tracing::info!("Loading track: {}", args.track.display());
    let track = track::load_track(&args.track)?;
    if track.n_skipped > 0 {
        tracing::warn!("skipped {} rows of unknown kind", track.n_skipped);
    }

    let config = args.build_config()?;
    let origin = args
        .origin_override()?
        .or(track.car_start)
        .unwrap_or_else(Point::origin);
    tracing::info!(
        "{} cones, origin ({:.3}, {:.3})",
        track.cones.len(),
        origin.x,
        origin.y
    );

    let orderer = ConeOrderer::new(config);
    let (blue, yellow) = split_by_side(&track.cones);
    let (boundaries, debug_dump) = if args.debug_json.is_some() {
        let (b, d) = orderer.order_track_with_debug(&blue, &yellow, origin)?;
        (b, Some(d))
    } else {
        (orderer.order_track(&blue, &yellow, origin)?, None)
    };

    let output = OrderOutput {
        schema: ORDER_SCHEMA_V1,
        origin,
        left: &boundaries.left,
        right: &boundaries.right,
    };
    let json = serde_json::to_string_pretty(&output)?;
    match &args.out {
        Some(out) => {
            std::fs::write(out, &json)?;
            tracing::info!("Results written to {}", out.display());
        }
        None => println!("{}", json),
    }

    if let (Some(debug_path), Some(dump)) = (&args.debug_json, debug_dump) {
        let debug_json = serde_json::to_string_pretty(&dump)?;
        std::fs::write(debug_path, &debug_json)?;
        tracing::info!("Debug dump written to {}", debug_path.display());
    }

    Ok(())
}
