use std::path::PathBuf;
use std::str::FromStr;

use knights_tour::artifact::DEFAULT_FILE_NAME;
use knights_tour::backtrack::BacktrackSolver;
use knights_tour::board::SQUARES;
use knights_tour::ga::{GaRunner, HaltPolicy};
use knights_tour::{RunConfig, TourArtifact};

const USAGE: &str = "Usage: knights-tour <ga|backtrack> [--config FILE] [--out FILE] [--seed N] \
[--population N] [--generations N] [--halt stop|undo]";

fn value_of<T: FromStr>(args: &[String], i: usize) -> T
where
    T::Err: std::fmt::Display,
{
    let flag = &args[i];
    let Some(v) = args.get(i + 1) else {
        eprintln!("{flag} requires an argument");
        std::process::exit(2);
    };
    match v.parse() {
        Ok(x) => x,
        Err(e) => {
            eprintln!("invalid {flag} {v}: {e}");
            std::process::exit(2);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }
    let solver = args[1].as_str();
    if solver != "ga" && solver != "backtrack" {
        eprintln!("Unknown solver: {solver}\n\n{USAGE}");
        std::process::exit(2);
    }

    let mut config_file: Option<PathBuf> = None;
    let mut out = PathBuf::from(DEFAULT_FILE_NAME);
    let mut seed: Option<u64> = None;
    let mut population: Option<usize> = None;
    let mut generations: Option<usize> = None;
    let mut halt: Option<HaltPolicy> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => config_file = Some(value_of(&args, i)),
            "--out" => out = value_of(&args, i),
            "--seed" => seed = Some(value_of(&args, i)),
            "--population" => population = Some(value_of(&args, i)),
            "--generations" => generations = Some(value_of(&args, i)),
            "--halt" => {
                let v: String = value_of(&args, i);
                halt = Some(match v.as_str() {
                    "stop" => HaltPolicy::Stop,
                    "undo" => HaltPolicy::UndoLast,
                    _ => {
                        eprintln!("invalid --halt {v}: expected stop or undo");
                        std::process::exit(2);
                    }
                });
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return;
            }
            x => {
                eprintln!("Unknown option: {x}\n\n{USAGE}");
                std::process::exit(2);
            }
        }
        i += 2;
    }

    let mut config = match &config_file {
        Some(path) => match RunConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config {}: {e}", path.display());
                std::process::exit(2);
            }
        },
        None => RunConfig::default(),
    };
    if let Some(s) = seed {
        config.ga = config.ga.with_seed(s);
    }
    if let Some(n) = population {
        config.ga = config.ga.with_population_size(n);
    }
    if let Some(n) = generations {
        config.ga = config.ga.with_max_generations(n);
    }
    if let Some(h) = halt {
        config.ga = config.ga.with_halt_policy(h);
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(2);
    }

    let artifact: TourArtifact = if solver == "ga" {
        match GaRunner::run(&config.ga) {
            Ok(result) => {
                println!(
                    "GA: best {}/{SQUARES} after {} generations{}",
                    result.best_fitness,
                    result.generations,
                    if result.solved { " (complete tour)" } else { "" }
                );
                result.to_artifact()
            }
            Err(e) => {
                eprintln!("GA run failed: {e}");
                std::process::exit(1);
            }
        }
    } else {
        let solver = match BacktrackSolver::new(config.backtrack.clone()) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Invalid configuration: {e}");
                std::process::exit(2);
            }
        };
        let result = solver.solve();
        println!(
            "Backtracking: {:?}, {}/{SQUARES} squares, {} nodes in {} ms",
            result.status,
            result.path.len(),
            result.nodes,
            result.elapsed_ms
        );
        result.to_artifact()
    };

    match artifact.save(&out) {
        Ok(()) => println!("Wrote {}", out.display()),
        Err(e) => {
            eprintln!("Failed to write {}: {e}", out.display());
            std::process::exit(1);
        }
    }
}
