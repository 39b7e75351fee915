//! Data-collector interface — the per-tick time series consumer.
//!
//! The core produces one `TickSnapshot` per tick and hands it to the
//! configured collector. Recording is best-effort: a collector failure
//! is logged and must never abort the simulation tick.

use crate::{
    error::SimResult,
    types::{Breed, Tick},
    world::{DeathLedger, World},
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;

/// Per-tick observation: live count per breed plus the cumulative
/// death-cause counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: Tick,
    pub counts: BTreeMap<Breed, u64>,
    pub total: u64,
    pub deaths: DeathLedger,
}

impl TickSnapshot {
    pub fn observe(world: &World) -> Self {
        let counts: BTreeMap<Breed, u64> = Breed::ALL
            .iter()
            .map(|&breed| (breed, world.count(breed) as u64))
            .collect();
        Self {
            tick: world.tick,
            total: world.total_count() as u64,
            deaths: world.deaths,
            counts,
        }
    }
}

/// The contract every collector must fulfill.
pub trait Collector: Send {
    /// Stable name, used in log messages.
    fn name(&self) -> &'static str;

    /// Record one tick's snapshot. Errors are reported by the engine
    /// but never abort the run.
    fn record(&mut self, snapshot: &TickSnapshot) -> SimResult<()>;

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}

/// Keeps the whole series in memory. Used in tests.
#[derive(Debug, Default)]
pub struct MemoryCollector {
    pub series: Vec<TickSnapshot>,
}

impl MemoryCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for MemoryCollector {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn record(&mut self, snapshot: &TickSnapshot) -> SimResult<()> {
        self.series.push(snapshot.clone());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullCollector;

impl Collector for NullCollector {
    fn name(&self) -> &'static str {
        "null"
    }

    fn record(&mut self, _snapshot: &TickSnapshot) -> SimResult<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
