//! run_one — a single seeded buffet_line run.
//!
//! Usage: `run_one [DISCIPLINE] [RATE]`, e.g. `run_one classic 0.8`, or
//! `run_one --config run.json` to load every `BuffetConfig` field from a JSON
//! object (missing fields keep their defaults).
//! Discipline names accept both the canonical and the historical spelling
//! (`free`/`anarchy`, `single-file`/`classic`, `perpendicular`/`vline`,
//! `overtake-limited`/`skippable`).
//!
//! Writes `trace.csv`, `tick_summaries.csv`, and `buffet.json` to
//! `OUTPUT_DIR`.  Set `RUST_LOG=debug` to see arrivals and departures.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bl_core::{BuffetConfig, QueueDiscipline};
use bl_output::{CsvWriter, JsonTraceWriter, OutputWriter, SimOutputObserver, read_config};
use bl_sim::{SimBuilder, SimObserver, TickSummary, TraceRecord};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const TOTAL_TICKS:     u64 = 3_000;
const PROGRESS_EVERY:  u64 = 500;
const OUTPUT_DIR:      &str = "output/run_one";

// ── Observer wrapper printing progress ───────────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner: SimOutputObserver<W>,
    stuck: usize,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.stuck += summary.stuck;
        if summary.tick.0.is_multiple_of(PROGRESS_EVERY) {
            println!(
                "  {:>5}  t = {:>6.1}  active = {:>3}  finished = {:>4}",
                summary.tick.0, summary.observed_at, summary.active, summary.finished_count
            );
        }
        self.inner.on_tick_end(summary);
    }

    fn on_sim_end(&mut self, final_tick: bl_core::Tick, trace: &[TraceRecord]) {
        self.inner.on_sim_end(final_tick, trace);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.as_slice() {
        [flag, path] if flag == "--config" => {
            read_config(Path::new(path)).with_context(|| format!("loading config {path}"))?
        }
        positional => {
            let discipline: QueueDiscipline = match positional.first() {
                Some(name) => name.parse()?,
                None => QueueDiscipline::Free,
            };
            let arrival_rate: f64 = match positional.get(1) {
                Some(rate) => rate.parse().with_context(|| format!("invalid rate {rate:?}"))?,
                None => 1.0,
            };
            BuffetConfig {
                discipline,
                arrival_rate,
                seed: SEED,
                total_ticks: TOTAL_TICKS,
                snapshot_interval_ticks: 0,
                ..BuffetConfig::default()
            }
        }
    };
    let (discipline, arrival_rate) = (config.discipline, config.arrival_rate);

    println!("=== run_one — buffet_line ===");
    println!(
        "Discipline: {discipline}  |  Rate: {arrival_rate}  |  Ticks: {}  |  Seed: {}",
        config.total_ticks, config.seed
    );

    let mut sim = SimBuilder::new(config).build()?;
    println!(
        "Room: {} × {} cells, {} stations",
        sim.geometry.cols,
        sim.geometry.rows,
        sim.goals.station_count()
    );

    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = (
        CsvWriter::new(dir)?,
        JsonTraceWriter::new(dir.join("buffet.json"), discipline.as_str(), arrival_rate),
    );
    let mut obs = ProgressObserver { inner: SimOutputObserver::new(writer), stuck: 0 };

    let t0 = Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        return Err(e).context("writing output");
    }

    let finished = sim.finished_count();
    println!();
    println!("Spawned:    {}", sim.spawned_count());
    println!("Finished:   {finished}");
    println!("Still in:   {}", sim.agents().len());
    println!("Throughput: {:.3} / unit time", finished as f64 / sim.time());
    println!("Stuck-ticks: {}", obs.stuck);
    println!("Wall time:  {:.2?}", elapsed);
    info!(dir = %dir.display(), "output written");

    Ok(())
}
