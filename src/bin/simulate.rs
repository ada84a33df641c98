//! Headless training CLI.
//!
//! Trains a population without drawing anything and prints a per-generation
//! report.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: 50 generations of 20 birds
//!   cargo run --bin simulate -- -g 10 -n 50     # 10 generations of 50 birds
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use flappy_neat::simulator::{run_training, RandomNetworks, SimConfig};
use flappy_neat::world::PipeLookahead;
use flappy_neat::SimError;
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

struct Options {
    config: SimConfig,
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SimError> {
    let args: Vec<String> = env::args().collect();
    let Options { config, json } = parse_args(&args)?;
    config.validate()?;

    let default_level = match config.verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                 FLAPPY NEAT TRAINING                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Generations:    {}", config.generations);
    println!("  Population:     {}", config.population_size);
    println!("  Hidden layers:  {:?}", config.hidden_layers);
    match config.max_frames_per_episode {
        Some(frames) => println!("  Max frames:     {}", frames),
        None => println!("  Max frames:     unlimited"),
    }
    if let Some(target) = config.target_score {
        println!("  Target score:   {}", target);
    }
    println!("  Lookahead:      {:?}", config.world.lookahead);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Training...");
    println!();

    let mut source = RandomNetworks::new(&config);
    let report = run_training(&config, &mut source)?;

    println!("{}", report.to_text());

    if json {
        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");

        let filename = format!("training_report_{}.json", stamp);
        fs::write(&filename, report.to_json()?)?;
        println!("JSON report saved to: {}", filename);

        if let Some((network, fitness)) = source.champion() {
            let filename = format!("champion_{}.json", stamp);
            fs::write(&filename, serde_json::to_string_pretty(network)?)?;
            println!("Champion (fitness {:.2}) saved to: {}", fitness, filename);
        }
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options, SimError> {
    // A config file is the base; other flags override it wherever they appear.
    let mut config = match args.iter().position(|a| a == "-c" || a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => SimConfig::from_file(path)?,
            None => return Err(SimError::InvalidConfig("--config needs a path".to_string())),
        },
        None => SimConfig::default(),
    };
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
            }
            "-g" | "--generations" => {
                if i + 1 < args.len() {
                    config.generations = args[i + 1].parse().unwrap_or(config.generations);
                    i += 1;
                }
            }
            "-n" | "--population" => {
                if i + 1 < args.len() {
                    config.population_size = args[i + 1].parse().unwrap_or(config.population_size);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames_per_episode = match args[i + 1].as_str() {
                        "0" | "none" => None,
                        n => n.parse().ok().or(config.max_frames_per_episode),
                    };
                    i += 1;
                }
            }
            "--target" => {
                if i + 1 < args.len() {
                    config.target_score = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--legacy-lookahead" => {
                config.world.lookahead = PipeLookahead::Legacy;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--json" => {
                json = true;
            }
            "--quick" => {
                let world = config.world.clone();
                let seed = config.seed;
                config = SimConfig {
                    world,
                    seed,
                    ..SimConfig::quick()
                };
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    Ok(Options { config, json })
}

fn print_help() {
    println!("Flappy NEAT headless trainer");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>     Load a JSON training config");
    println!("    -g, --generations <N>   Generations to run (default: 50)");
    println!("    -n, --population <N>    Birds per generation (default: 20)");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -t, --frames <F>        Max frames per episode, 0 for none (default: 10,000)");
    println!("    --target <SCORE>        Stop once a bird passes SCORE pipes");
    println!("    --legacy-lookahead      Pick the sensed pipe by list length");
    println!("    -v, --verbose           Log every death and pass");
    println!("    -q, --quiet             Only log warnings");
    println!("    --json                  Save JSON report and champion network");
    println!("    --quick                 Quick run (5 generations of 10 birds)");
    println!("    -h, --help              Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                     # Default run");
    println!("    cargo run --bin simulate -- -g 10 -n 50     # Bigger population");
    println!("    cargo run --bin simulate -- --seed 42       # Reproducible");
    println!("    cargo run --bin simulate -- --target 20     # Stop at 20 pipes");
    println!("    RUST_LOG=debug cargo run --bin simulate     # Per-frame events");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("simulate")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_bad_counts_keep_config_file_values() {
        let path = std::env::temp_dir().join(format!(
            "flappy_neat_simulate_args_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "generations": 7, "population_size": 33 }"#).unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let options = parse_args(&args(&["-c", &path_arg, "-g", "many", "-n", "lots"])).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(options.config.generations, 7);
        assert_eq!(options.config.population_size, 33);
    }

    #[test]
    fn test_flags_override_defaults() {
        let options = parse_args(&args(&["-g", "3", "-n", "9", "--legacy-lookahead", "--json"])).unwrap();
        assert_eq!(options.config.generations, 3);
        assert_eq!(options.config.population_size, 9);
        assert_eq!(options.config.world.lookahead, PipeLookahead::Legacy);
        assert!(options.json);
    }
}
