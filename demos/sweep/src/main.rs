//! sweep — every queue discipline × arrival rate, one independent run each.
//!
//! Rates are `0.1, 0.2, …, 1.5`.  Each combination gets its own `Sim` with a
//! seed derived from `BASE_SEED` and the combination index, so the sweep is
//! reproducible regardless of how rayon schedules the runs.  Traces go to
//! `OUTPUT_DIR/<discipline>_<rate>.json`; existing files are skipped, so an
//! interrupted sweep can simply be restarted.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bl_core::{BuffetConfig, QueueDiscipline, derive_seed};
use bl_output::{JsonTraceWriter, SimOutputObserver};
use bl_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const BASE_SEED:   u64 = 42;
const TOTAL_TICKS: u64 = 3_000; // burn-in plus sampling window
const RATE_STEPS:  u32 = 15;
const OUTPUT_DIR:  &str = "output/simulations";

/// Outcome of one sweep cell.
enum Cell {
    Skipped,
    Done { spawned: usize, finished: u64 },
}

fn trace_path(dir: &Path, discipline: QueueDiscipline, rate: f64) -> PathBuf {
    dir.join(format!("{}_{rate:.6}.json", discipline.as_str()))
}

fn run_cell(dir: &Path, index: usize, discipline: QueueDiscipline, rate: f64) -> Result<Cell> {
    let path = trace_path(dir, discipline, rate);
    if path.exists() {
        return Ok(Cell::Skipped);
    }

    let config = BuffetConfig {
        discipline,
        arrival_rate: rate,
        seed: derive_seed(BASE_SEED, index as u64),
        total_ticks: TOTAL_TICKS,
        snapshot_interval_ticks: 0,
        ..BuffetConfig::default()
    };
    let mut sim = SimBuilder::new(config).build()?;
    let mut obs = SimOutputObserver::new(JsonTraceWriter::new(&path, discipline.as_str(), rate));
    sim.run(&mut obs);
    if let Some(e) = obs.take_error() {
        return Err(e).with_context(|| format!("writing {}", path.display()));
    }

    Ok(Cell::Done { spawned: sim.spawned_count(), finished: sim.finished_count() })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rates: Vec<f64> = (1..=RATE_STEPS).map(|z| f64::from(z) / 10.0).collect();
    let combinations: Vec<(QueueDiscipline, f64)> = QueueDiscipline::ALL
        .iter()
        .flat_map(|&d| rates.iter().map(move |&r| (d, r)))
        .collect();

    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    println!("=== sweep — buffet_line ===");
    println!(
        "Runs: {}  |  Ticks each: {TOTAL_TICKS}  |  Threads: {}",
        combinations.len(),
        rayon::current_num_threads()
    );

    let t0 = Instant::now();
    let results: Vec<(QueueDiscipline, f64, Result<Cell>)> = combinations
        .par_iter()
        .enumerate()
        .map(|(index, &(discipline, rate))| {
            (discipline, rate, run_cell(dir, index, discipline, rate))
        })
        .collect();

    let mut failures = 0usize;
    for (discipline, rate, result) in &results {
        match result {
            Ok(Cell::Skipped) => info!(%discipline, rate, "exists; skipped"),
            Ok(Cell::Done { spawned, finished }) => println!(
                "  {:<17} rate {rate:.1}  spawned {spawned:>4}  finished {finished:>4}",
                discipline.as_str()
            ),
            Err(e) => {
                failures += 1;
                warn!(%discipline, rate, error = %e, "run failed");
            }
        }
    }

    println!();
    println!("Sweep wall time: {:.2?}", t0.elapsed());
    anyhow::ensure!(failures == 0, "{failures} of {} runs failed", results.len());
    Ok(())
}
