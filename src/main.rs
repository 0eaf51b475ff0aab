use std::error::Error;
use std::fmt::Write as _;
use std::io::Read;

use crossterm::style::Stylize;
use rand::{rngs::StdRng, SeedableRng};
use slider_puzzle::{DuplicatePolicy, Heuristic, Puzzle, Solver, SolverConfig};

#[derive(Debug, Default)]
struct CliConfig {
    path: Option<String>,
    random: Option<usize>,
    seed: Option<u64>,
    plain: bool,
    solver: SolverConfig,
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    let initial = match load(&cli) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Initial Puzzle:\n{}", render(&initial, cli.plain));

    let solver = match Solver::with_config(initial, cli.solver) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let (Some(path), Some(moves)) = (solver.solution(), solver.moves_sequence()) else {
        println!("No solution possible");
        return;
    };

    println!("Minimum number of moves = {}", moves.len());
    for (board, item) in path.iter().skip(1).zip(moves) {
        println!("{}\n{}", item, render(board, cli.plain));
    }
}

fn load(cli: &CliConfig) -> Result<Puzzle, Box<dyn Error>> {
    if let Some(size) = cli.random {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        return Ok(Puzzle::random(size, &mut rng)?);
    }

    let text = match &cli.path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(text.parse()?)
}

/// Board text with tiles already in place highlighted and the blank dimmed.
fn render(puzzle: &Puzzle, plain: bool) -> String {
    if plain {
        return puzzle.to_string();
    }

    let mut out = format!("{}\n", puzzle.dimension());
    for (i, row) in puzzle.rows().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            let cell = format!("{:2} ", val);
            let _ = if val == 0 {
                write!(out, "{}", cell.dark_grey())
            } else if puzzle.goal_position(val) == (i, j) {
                write!(out, "{}", cell.green())
            } else {
                write!(out, "{}", cell)
            };
        }
        out.push('\n');
    }
    out
}

fn parse_args() -> CliConfig {
    let mut cfg = CliConfig::default();

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--hamming" => {
                cfg.solver = cfg.solver.with_heuristic(Heuristic::Hamming);
                i += 1;
            }
            "--closed-set" => {
                cfg.solver = cfg.solver.with_duplicates(DuplicatePolicy::ClosedSet);
                i += 1;
            }
            "--plain" => {
                cfg.plain = true;
                i += 1;
            }
            "--random" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.random = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            arg if !arg.starts_with('-') && cfg.path.is_none() => {
                cfg.path = Some(arg.to_string());
                i += 1;
            }
            _ => usage_and_exit(2),
        }
    }

    if cfg.random.is_some() && cfg.path.is_some() {
        usage_and_exit(2);
    }
    cfg
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  slider-puzzle [FILE] [--hamming] [--closed-set] [--plain]\n  slider-puzzle --random N [--seed SEED] [--hamming] [--closed-set] [--plain]\n\nOptions:\n  FILE             Board file: N followed by N*N tiles (default: stdin)\n  --random N       Solve a random N x N board (may be unsolvable)\n  --seed SEED      Deterministic seed for --random\n  --hamming        Order the frontier by Hamming distance (default: Manhattan)\n  --closed-set     Never expand the same board twice\n  --plain          Disable colored output\n\nSet RUST_LOG=debug for search statistics.\n"
    );
    std::process::exit(code)
}
