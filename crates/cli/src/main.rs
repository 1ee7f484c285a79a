#![deny(unsafe_code)]
//! CLI binary for the wgen procedural world generator.
//!
//! Subcommands:
//! - `render` — generate a world and write one PNG per seed variant
//! - `cycle` — render every mode for the same seed
//! - `probe <x> <y>` — print the generated cell at one coordinate
//! - `list` — print available modes and color maps

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use log::info;
use std::path::{Path, PathBuf};
use std::process;
use wgen_core::TileLayout;
use wgen_world::snapshot::write_png;
use wgen_world::{ColorMap, Mode, SeedSequence, World, WorldConfig};

#[derive(Parser)]
#[command(name = "wgen", about = "Procedural world grid generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// World parameters shared by the generating subcommands. Flags override
/// values read from `--config`.
#[derive(Args)]
struct WorldArgs {
    /// JSON world config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid height in cells.
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Noise seed.
    #[arg(long)]
    seed: Option<u32>,

    /// Generation mode (height, round, humidity, all).
    #[arg(short, long)]
    mode: Option<String>,

    /// Color map override (height, humidity, biome).
    #[arg(short, long)]
    color_map: Option<String>,

    /// Tiles per axis for parallel generation (at most 1024 tiles in total),
    /// or "auto" for one per thread.
    #[arg(long, default_value = "8")]
    tiles: String,
}

impl WorldArgs {
    fn config(&self) -> Result<WorldConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::load(path)?,
            None => WorldConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(mode) = &self.mode {
            config.mode = Mode::from_name(mode)?;
        }
        if let Some(color_map) = &self.color_map {
            config.color_map = Some(ColorMap::from_name(color_map)?);
        }
        config.validate()?;
        Ok(config)
    }

    fn layout(&self) -> Result<TileLayout, CliError> {
        if self.tiles == "auto" {
            return Ok(TileLayout::for_available_parallelism());
        }
        let n: usize = self
            .tiles
            .parse()
            .map_err(|e| CliError::Input(format!("invalid --tiles '{}': {e}", self.tiles)))?;
        Ok(TileLayout::new(n, n)?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate a world and write a PNG snapshot per seed variant.
    Render {
        #[command(flatten)]
        world: WorldArgs,

        /// Number of successive seeds to render.
        #[arg(long)]
        variants: Option<usize>,

        /// Output file path. Variants and modes are numbered after the stem.
        #[arg(short, long, default_value = "world.png")]
        output: PathBuf,
    },
    /// Render every mode once for the same seed.
    Cycle {
        #[command(flatten)]
        world: WorldArgs,

        /// Output file path; each mode name is appended to the stem.
        #[arg(short, long, default_value = "world.png")]
        output: PathBuf,
    },
    /// Generate a world and print the cell at (x, y).
    Probe {
        #[command(flatten)]
        world: WorldArgs,

        x: usize,
        y: usize,
    },
    /// List available modes and color maps.
    List,
}

/// `world.png` + `3` -> `world-3.png`.
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "world".to_owned());
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{suffix}"),
    };
    path.with_file_name(name)
}

fn snapshot(world: &World, path: &Path) -> Result<(), CliError> {
    let grid = world.grid();
    write_png(world.image(), grid.width(), grid.height(), path)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let modes = Mode::list_names();
            let color_maps = ColorMap::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "modes": modes,
                    "color_maps": color_maps,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Modes:");
                println!("  {}", modes.join(", "));
                println!("Color maps:");
                println!("  {}", color_maps.join(", "));
            }
        }
        Command::Render {
            world,
            variants,
            output,
        } => {
            let mut config = world.config()?;
            if let Some(variants) = variants {
                config.variants = variants;
            }
            config.validate()?;

            let mut w = World::with_layout(&config, world.layout()?)?;
            let mut seeds = SeedSequence::new(config.seed);
            let mut written = Vec::with_capacity(config.variants);
            for i in 0..config.variants {
                if i == 0 {
                    w.refresh()?;
                } else {
                    w.reseed(seeds.next_seed())?;
                }
                let path = if config.variants == 1 {
                    output.clone()
                } else {
                    suffixed(&output, &i.to_string())
                };
                snapshot(&w, &path)?;
                info!("variant {i}: seed {} -> {}", w.seed(), path.display());
                written.push(serde_json::json!({
                    "seed": w.seed(),
                    "output": path.display().to_string(),
                }));
            }

            if cli.json {
                let info = serde_json::json!({
                    "config": config,
                    "color_map": w.color_map(),
                    "images": written,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, seed {}, {} variant(s)) -> {}",
                    config.mode.name(),
                    config.width,
                    config.height,
                    config.seed,
                    config.variants,
                    output.display()
                );
            }
        }
        Command::Cycle { world, output } => {
            let config = world.config()?;
            let mut w = World::with_layout(&config, world.layout()?)?;
            let mut written = Vec::new();
            let mut mode = config.mode;
            for _ in 0..Mode::list_names().len() {
                w.set_mode(mode)?;
                let path = suffixed(&output, mode.name());
                snapshot(&w, &path)?;
                written.push(path.display().to_string());
                mode = mode.next();
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&written)?);
            } else {
                for path in &written {
                    eprintln!("wrote {path}");
                }
            }
        }
        Command::Probe { world, x, y } => {
            let config = world.config()?;
            let mut w = World::with_layout(&config, world.layout()?)?;
            w.refresh()?;
            let cell = w.grid().get(x, y)?;
            let color = w.color_map().color_of(cell);
            if cli.json {
                let info = serde_json::json!({
                    "x": x,
                    "y": y,
                    "cell": cell,
                    "color": color,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "({x}, {y}): height {:.4}, humidity {:.4}, color #{:02x}{:02x}{:02x}",
                    cell.height, cell.humidity, color.r, color.g, color.b
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
