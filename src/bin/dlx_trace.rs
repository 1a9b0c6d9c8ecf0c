//! Text driver for the stepping solver: prints one line per primitive.
//!
//! Usage: `dlx_trace [rows] [cols] [density] [seed] [run]`
//!
//! Defaults to a 15x15 matrix with density 0.5. Passing `run` as the fifth
//! argument prints solutions only.

use std::env;
use std::process;

use dlx_stepper::dancing_links::{DancingLinks, ExactCoverSearch, SearchConfig, StepMode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

struct Options {
    rows: usize,
    cols: usize,
    density: f64,
    seed: u64,
    mode: StepMode,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            rows: 15,
            cols: 15,
            density: 0.5,
            seed: 0,
            mode: StepMode::Step,
        }
    }
}

fn parse_options() -> Result<Options, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut options = Options::default();
    if let Some(rows) = args.first() {
        options.rows = rows.parse().map_err(|e| format!("rows: {e}"))?;
    }
    if let Some(cols) = args.get(1) {
        options.cols = cols.parse().map_err(|e| format!("cols: {e}"))?;
    }
    if let Some(density) = args.get(2) {
        options.density = density.parse().map_err(|e| format!("density: {e}"))?;
        if !(0.0..=1.0).contains(&options.density) {
            return Err(format!("density {} not in [0, 1]", options.density));
        }
    }
    if let Some(seed) = args.get(3) {
        options.seed = seed.parse().map_err(|e| format!("seed: {e}"))?;
    }
    match args.get(4).map(String::as_str) {
        None | Some("step") => {}
        Some("run") => options.mode = StepMode::Run,
        Some(other) => return Err(format!("unknown mode {other:?}, expected step or run")),
    }
    Ok(options)
}

fn random_matrix(rows: usize, cols: usize, density: f64, rng: &mut impl Rng) -> Vec<Vec<bool>> {
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen_bool(density)).collect())
        .collect()
}

fn main() {
    let options = parse_options().unwrap_or_else(|e| {
        eprintln!("dlx_trace: {e}");
        process::exit(2);
    });

    let mut rng = ChaCha20Rng::seed_from_u64(options.seed);
    let matrix = random_matrix(options.rows, options.cols, options.density, &mut rng);
    for row in &matrix {
        let line: String = row.iter().map(|&v| if v { '1' } else { '0' }).collect();
        println!("{line}");
    }
    println!();

    let links = DancingLinks::new(&matrix).unwrap_or_else(|e| {
        eprintln!("dlx_trace: {e}");
        process::exit(1);
    });
    print!("{links}");
    println!();

    let config = SearchConfig {
        mode: options.mode,
        ..SearchConfig::default()
    };
    let mut search = ExactCoverSearch::new(links, config);
    while search.advance().is_some() {
        println!(
            "{:<24} Stack: {:?}",
            search.current_action(),
            search.partial_solution()
        );
    }

    let stats = search.stats();
    println!();
    println!(
        "{} solutions, {} column picks, {} row picks, {} covers, {} uncovers",
        stats.solutions, stats.column_picks, stats.row_picks, stats.covers, stats.uncovers
    );
}
