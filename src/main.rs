use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use city_generator::ascii::{self, AsciiCanvas};
use city_generator::city::hooks::{FocusViewport, TileRenderer};
use city_generator::city::types::CellState;
use city_generator::{export, generate_with, survey, CityConfig, CityError, MapSizePreset};

#[derive(Parser, Debug)]
#[command(name = "city_generator")]
#[command(about = "Generate procedural city layouts: roads, landmarks, police and buildings")]
struct Args {
    /// Map size preset
    #[arg(long, value_enum, default_value = "small")]
    size: MapSizePreset,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file (replaces the size preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of road carving attempts
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Override the number of police stations
    #[arg(long)]
    police: Option<usize>,

    /// Override the minimum distance between police stations
    #[arg(long)]
    min_distance: Option<f32>,

    /// Print the painted map to stdout
    #[arg(long)]
    print: bool,

    /// Export the map as text (e.g., "city.txt")
    #[arg(long)]
    ascii: Option<String>,

    /// Export the map as a PNG image
    #[arg(long)]
    png: Option<String>,

    /// Pixels per cell for PNG export
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..=16))]
    scale: u32,

    /// Export city data as JSON
    #[arg(long)]
    json: Option<String>,

    /// Print a window of this radius around the player apartment
    #[arg(long)]
    view_radius: Option<i32>,

    /// Print the first N cell writes in order
    #[arg(long)]
    trace: Option<usize>,

    /// Run a multi-seed survey with this many cities instead of a single map
    #[arg(long)]
    survey: Option<usize>,
}

/// Paints into an ASCII canvas and keeps the first few writes for tracing.
struct HostRenderer {
    canvas: AsciiCanvas,
    trace_limit: usize,
    trace: Vec<((i32, i32), CellState)>,
}

impl TileRenderer for HostRenderer {
    fn paint(&mut self, pos: (i32, i32), state: CellState) {
        self.canvas.paint(pos, state);
        if self.trace.len() < self.trace_limit {
            self.trace.push((pos, state));
        }
    }
}

fn build_config(args: &Args) -> Result<CityConfig, CityError> {
    let mut config = match &args.config {
        Some(path) => {
            println!("Loading config from {}", path.display());
            CityConfig::load(path)?
        }
        None => {
            println!("Using {} preset", args.size.display_name());
            CityConfig::from(args.size)
        }
    };
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(police) = args.police {
        config.police_count = police;
    }
    if let Some(min_distance) = args.min_distance {
        config.min_distance = min_distance;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), CityError> {
    let config = build_config(args)?;

    // Initialize RNG
    let seed = args.seed.unwrap_or_else(rand::random);

    if let Some(runs) = args.survey {
        println!("Surveying {} cities from seed {}...", runs, seed);
        let report = survey::run_survey(&config, seed, runs)?;
        print!("{}", report.report());
        return Ok(());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("Generating city with seed: {}", seed);
    println!("Map size: {}x{}", config.width, config.height);

    let mut renderer = HostRenderer {
        canvas: AsciiCanvas::new(config.width, config.height),
        trace_limit: args.trace.unwrap_or(0),
        trace: Vec::new(),
    };
    let mut viewport = FocusViewport::default();
    let city = generate_with(&config, &mut rng, &mut renderer, &mut viewport)?;

    println!(
        "Carved {} road cells ({} extensions rejected)",
        city.roads.len(),
        city.road_stats.rejected
    );
    for (landmark, placement) in &city.landmarks {
        match placement {
            Some(p) => println!("  {:<18} at ({}, {})", landmark.display_name(), p.position.0, p.position.1),
            None => println!("  {:<18} no site available", landmark.display_name()),
        }
    }
    println!("Placed {} police stations", city.police_stations.len());
    println!("Placed {} buildings", city.buildings_placed);
    println!();
    print!("{}", city.summary());

    if args.trace.is_some() {
        println!("\nFirst {} cell writes:", renderer.trace.len());
        for (i, ((x, y), state)) in renderer.trace.iter().enumerate() {
            println!("  {:>4}: ({}, {}) {}", i, x, y, state.display_name());
        }
    }

    if let (Some(radius), Some(focus)) = (args.view_radius, viewport.focus) {
        println!("\nView around ({}, {}):", focus.0, focus.1);
        print!("{}", ascii::render_window(&city.grid, focus, radius));
    }

    if args.print {
        println!();
        print!("{}", renderer.canvas.render());
    }

    if let Some(path) = &args.ascii {
        println!("Exporting text map to {}...", path);
        ascii::export_city_file(&city, seed, path)?;
    }
    if let Some(path) = &args.png {
        println!("Exporting PNG to {}...", path);
        export::export_png(&city, path, args.scale)?;
    }
    if let Some(path) = &args.json {
        println!("Exporting city data to {}...", path);
        export::export_json(&city, seed, path)?;
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
