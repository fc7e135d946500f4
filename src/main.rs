//! Planetgen CLI - procedural planet surface synthesis.
//!
//! Meshes a named planet shape, classifies every surface vertex and
//! scatters doodads over the result.

use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use planetgen::config::{noise_role_names, WorldConfig};
use planetgen::pipeline::{Pipeline, PipelineError, SurfaceJob};
use planetgen::terrain::{ElevationProfile, Purpose, Shape};

/// Procedural planet surface generator.
#[derive(Parser)]
#[command(name = "planetgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct WorldArgs {
    /// TOML world config; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Named preset (earth_like, arid, frozen) used when no config file is given.
    #[arg(short, long)]
    preset: Option<String>,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Base shape name (see `planetgen info`).
    #[arg(long)]
    shape: Option<String>,

    /// Elevation profile name (see `planetgen info`).
    #[arg(long)]
    elevation: Option<String>,

    /// Planet radius in metres.
    #[arg(long)]
    radius: Option<f32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mesh, classify and decorate a planet surface.
    Generate {
        #[command(flatten)]
        world: WorldArgs,

        /// Grid cells per axis of the meshing box.
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Also mesh the sea surface.
        #[arg(long)]
        water: bool,

        /// Skip doodad placement.
        #[arg(long)]
        no_doodads: bool,
    },

    /// Classify a single surface point and print the tile.
    Classify {
        #[command(flatten)]
        world: WorldArgs,

        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        #[arg(long, allow_hyphen_values = true)]
        y: f32,
        #[arg(long, allow_hyphen_values = true)]
        z: f32,

        /// Surface the point belongs to.
        #[arg(long, default_value = "land")]
        purpose: PurposeArg,
    },

    /// List available shapes, elevation profiles and noise roles.
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum PurposeArg {
    Land,
    Water,
    Navigation,
}

impl From<PurposeArg> for Purpose {
    fn from(arg: PurposeArg) -> Self {
        match arg {
            PurposeArg::Land => Purpose::Land,
            PurposeArg::Water => Purpose::Water,
            PurposeArg::Navigation => Purpose::Navigation,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate { world, resolution, water, no_doodads } => {
            run_generate(world, resolution, water, no_doodads)
        }
        Commands::Classify { world, x, y, z, purpose } => run_classify(world, Vec3::new(x, y, z), purpose.into()),
        Commands::Info => {
            run_info();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Resolves the config file or preset, then applies flag overrides.
fn load_world(args: WorldArgs) -> Result<WorldConfig, PipelineError> {
    let mut config = match (&args.config, &args.preset) {
        (Some(path), _) => {
            info!(path = %path.display(), "loading config");
            WorldConfig::load(path)?
        }
        (None, Some(name)) => WorldConfig::preset(name)
            .ok_or_else(|| planetgen::config::ConfigError::Invalid(format!("unknown preset '{}'", name)))?,
        (None, None) => WorldConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(shape) = args.shape {
        config.terrain.shape = shape;
    }
    if let Some(elevation) = args.elevation {
        config.terrain.elevation = elevation;
    }
    if let Some(radius) = args.radius {
        config.terrain.radius = radius;
    }
    Ok(config)
}

fn run_generate(world: WorldArgs, resolution: Option<u32>, water: bool, no_doodads: bool) -> Result<(), PipelineError> {
    let mut config = load_world(world)?;
    if let Some(resolution) = resolution {
        config.mesh.resolution = resolution;
    }
    config.mesh.include_water |= water;
    if no_doodads {
        config.doodads.enabled = false;
    }
    config.validate()?;

    info!(
        seed = config.seed,
        shape = %config.terrain.shape,
        elevation = %config.terrain.elevation,
        resolution = config.mesh.resolution,
        "planetgen - procedural planet surface generator"
    );
    let start = Instant::now();

    let pipeline = Pipeline::standard(config);
    let mut job = SurfaceJob::prepare(pipeline.config())?;
    pipeline.run_with_callbacks(
        &mut job,
        |name, i, total| info!("[{}/{}] {}", i + 1, total, name),
        |_, _, _| {},
    )?;

    if let Some(mesh) = &job.mesh {
        let bounds = mesh.bounds();
        info!(
            triangles = mesh.triangle_count(),
            vertices = mesh.vertex_count(),
            min = ?bounds.min,
            max = ?bounds.max,
            "land mesh"
        );
    }
    if let Some(water) = &job.water_mesh {
        info!(triangles = water.triangle_count(), "water mesh");
    }
    let mut biomes: Vec<(&str, usize)> = planetgen::biomes::BiomeId::all()
        .into_iter()
        .map(|b| (b.name(), job.tiles.iter().filter(|t| t.biome == b).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    biomes.sort_by(|a, b| b.1.cmp(&a.1));
    for (name, n) in biomes {
        info!(biome = name, tiles = n, "biome coverage");
    }
    for (name, n) in job.instance_counts.iter().filter(|(_, n)| *n > 0) {
        info!(doodad = %name, instances = n, "doodads");
    }

    info!(elapsed = ?start.elapsed(), "generation complete");
    Ok(())
}

fn run_classify(world: WorldArgs, position: Vec3, purpose: Purpose) -> Result<(), PipelineError> {
    let config = load_world(world)?;
    config.validate()?;
    let job = SurfaceJob::prepare(&config)?;

    // Outward normal from the density gradient.
    let field = job.terrain.field(purpose, &job.noise);
    let h = 0.5;
    let gradient = Vec3::new(
        field(position + Vec3::X * h) - field(position - Vec3::X * h),
        field(position + Vec3::Y * h) - field(position - Vec3::Y * h),
        field(position + Vec3::Z * h) - field(position - Vec3::Z * h),
    );
    let normal = gradient
        .try_normalize()
        .or_else(|| position.try_normalize())
        .unwrap_or(Vec3::Z);

    let tile = job.classifier(&config).classify(position, normal, purpose)?;

    println!("Tile at ({:.2}, {:.2}, {:.2}) [{}]", position.x, position.y, position.z, purpose.name());
    println!("  Normal:        ({:.3}, {:.3}, {:.3})", normal.x, normal.y, normal.z);
    println!("  Elevation:     {:.2} m", tile.elevation);
    println!("  Slope:         {:.3} rad", tile.slope);
    println!("  Temperature:   {:.1} °C", tile.temperature);
    println!("  Precipitation: {:.1} cm/yr", tile.precipitation);
    println!("  Biome:         {}", tile.biome.name());
    println!("  Terrain type:  {}", tile.terrain_type.name());
    println!("  Vegetation:    {:.3}", tile.vegetation);
    println!("  Fertility:     {:.3}", tile.fertility);
    println!("  Nationality:   {:.3}", tile.nationality);
    println!("  Buildable:     {}", tile.buildable);
    println!("  Material:");
    for (channel, value) in tile.material.channels() {
        println!("    {:<10} {:.3}", channel, value);
    }
    Ok(())
}

fn run_info() {
    println!("Planetgen - Library Info");
    println!("========================");
    println!();
    println!("Shapes ({}):", Shape::COUNT);
    for shape in Shape::all() {
        println!("  {}", shape.name());
    }
    println!();
    println!("Elevation profiles ({}):", ElevationProfile::COUNT);
    for profile in ElevationProfile::all() {
        println!("  {}", profile.name());
    }
    println!();
    let roles = noise_role_names();
    println!("Noise roles ({}):", roles.len());
    for role in roles {
        println!("  {}", role);
    }
    println!();
    println!("Presets: earth_like, arid, frozen");
}
