//! sim-runner: headless runner for the sickle-cell selection model.
//!
//! Usage:
//!   sim-runner --seed 12345 --ticks 200 --db run.db
//!   sim-runner --malaria 0.8 --deadliness 0.3 --advantage 0.9

use anyhow::Result;
use rusqlite::{params, Connection};
use sicklesim_core::{Breed, Collector, SimConfig, SimEngine, SimResult, TickSnapshot};
use std::any::Any;
use std::env;

/// Append-only time-series store: one row per (run, tick, breed),
/// plus the cumulative death counters per tick.
struct SqliteCollector {
    run_id: String,
    conn: Connection,
}

impl SqliteCollector {
    fn open(path: &str, run_id: &str, seed: u64) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS run (
                 run_id     TEXT PRIMARY KEY,
                 seed       INTEGER NOT NULL,
                 version    TEXT NOT NULL,
                 started_at INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS breed_series (
                 id     INTEGER PRIMARY KEY AUTOINCREMENT,
                 run_id TEXT NOT NULL,
                 tick   INTEGER NOT NULL,
                 breed  TEXT NOT NULL,
                 count  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS death_series (
                 run_id             TEXT NOT NULL,
                 tick               INTEGER NOT NULL,
                 natural_deaths     INTEGER NOT NULL,
                 malaria_deaths     INTEGER NOT NULL,
                 sickle_cell_deaths INTEGER NOT NULL,
                 capacity_deaths    INTEGER NOT NULL
             );",
        )?;
        conn.execute(
            "INSERT INTO run (run_id, seed, version, started_at) VALUES (?1, ?2, ?3, ?4)",
            params![run_id, seed as i64, env!("CARGO_PKG_VERSION"), unix_now() as i64],
        )?;
        Ok(Self { run_id: run_id.to_string(), conn })
    }

    fn append(&self, snapshot: &TickSnapshot) -> Result<()> {
        for (&breed, &count) in &snapshot.counts {
            self.conn.execute(
                "INSERT INTO breed_series (run_id, tick, breed, count) VALUES (?1, ?2, ?3, ?4)",
                params![self.run_id, snapshot.tick as i64, breed.name(), count as i64],
            )?;
        }
        self.conn.execute(
            "INSERT INTO death_series
               (run_id, tick, natural_deaths, malaria_deaths, sickle_cell_deaths, capacity_deaths)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.run_id,
                snapshot.tick as i64,
                snapshot.deaths.natural as i64,
                snapshot.deaths.malaria as i64,
                snapshot.deaths.sickle_cell as i64,
                snapshot.deaths.capacity as i64,
            ],
        )?;
        Ok(())
    }
}

impl Collector for SqliteCollector {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn record(&mut self, snapshot: &TickSnapshot) -> SimResult<()> {
        self.append(snapshot).map_err(Into::into)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 200u64);
    let width = parse_arg(&args, "--width", 100u32);
    let height = parse_arg(&args, "--height", 100u32);
    let capacity = parse_arg(&args, "--capacity", 3000u32);
    let malaria = parse_arg(&args, "--malaria", 0.5f64);
    let deadliness = parse_arg(&args, "--deadliness", 0.5f64);
    let advantage = parse_arg(&args, "--advantage", 0.5f64);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");

    println!("sicklesim — sim-runner");
    println!("  seed:       {seed}");
    println!("  ticks:      {ticks}");
    println!("  grid:       {width}x{height}");
    println!("  capacity:   {capacity}");
    println!("  malaria:    {malaria}");
    println!("  deadliness: {deadliness}");
    println!("  advantage:  {advantage}");
    println!("  db:         {db}");
    println!();

    let config = SimConfig {
        width,
        height,
        carrying_capacity: capacity,
        malaria_prevalence: malaria,
        sickle_cell_deadliness: deadliness,
        heterozygous_advantage: advantage,
        seed,
        ..SimConfig::default()
    };

    let run_id = format!("run-{seed}-{}", unix_now());
    let collector = SqliteCollector::open(db, &run_id, seed)?;

    let mut engine = SimEngine::new(config, Box::new(collector))?;
    engine.run_ticks(ticks)?;

    print_summary(&engine, &run_id, ticks);
    Ok(())
}

fn print_summary(engine: &SimEngine, run_id: &str, ticks: u64) {
    let world = &engine.world;
    println!("=== RUN SUMMARY ===");
    println!("  run_id:     {run_id}");
    println!("  ticks run:  {ticks}");
    println!("  final tick: {}", engine.current_tick());
    for breed in Breed::ALL {
        println!("  {:<14} {}", breed.name(), world.count(breed));
    }
    println!("  total:      {}", world.total_count());
    println!();
    println!("=== DEATHS ===");
    println!("  natural:     {}", world.deaths.natural);
    println!("  malaria:     {}", world.deaths.malaria);
    println!("  sickle cell: {}", world.deaths.sickle_cell);
    println!("  capacity:    {}", world.deaths.capacity);
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
