//! Snowfake CLI - Grow a snow crystal and print it as SVG.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use snowfake::schema::parse_size;
use snowfake::{CrystalConfig, CrystalPropagator, StopReason, SvgRenderer};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <size> [config.json]", args[0]);
        eprintln!();
        eprintln!("Grow a Gravner-Griffeath snow crystal and write it as SVG to stdout.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  size         Lattice side length (odd, at least 3)");
        eprintln!("  config.json  Optional growth parameters; size is taken from the command line");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    let size = parse_size(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut config = match args.get(2) {
        Some(path) => load_config(PathBuf::from(path)),
        None => CrystalConfig::default(),
    };
    config.size = size;

    let mut propagator = CrystalPropagator::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    log::info!(
        "Growing on a {0}x{0} lattice (rho={1}, beta={2}, sigma={3})",
        size,
        propagator.config().growth.rho,
        propagator.config().growth.beta,
        propagator.config().growth.sigma
    );

    let start = Instant::now();
    let summary = propagator.run();
    let elapsed = start.elapsed();

    match summary.stop_reason {
        StopReason::OuterThird => log::info!(
            "Finished after {} iterations in {:.2}s: {} cells attached",
            summary.stats.iteration,
            elapsed.as_secs_f32(),
            summary.stats.attached_cells
        ),
        StopReason::IterationCap => log::warn!(
            "Incomplete crystal: stopped at the {}-iteration cap with {} cells attached",
            summary.stats.iteration,
            summary.stats.attached_cells
        ),
    }

    let stdout = io::stdout();
    if let Err(e) = SvgRenderer::default().render(propagator.crystal(), stdout.lock()) {
        eprintln!("Error writing SVG: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: PathBuf) -> CrystalConfig {
    let config_str = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    })
}

fn print_example_config() {
    let config = CrystalConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
