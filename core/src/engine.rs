//! The simulation engine — drives the tick loop.
//!
//! EXECUTION ORDER within one tick (fixed, documented, never reordered):
//!   1. Lifecycle pass — every live agent moves, ages, matures or dies,
//!      breeds in canonical order, agents in fresh random order.
//!   2. Demographic update — capacity valve, genotype-mixing births,
//!      disease mortality culls.
//!   3. Snapshot emission to the collector (best effort).
//!
//! The demographic update always reads fully settled post-lifecycle
//! counts; the two phases never interleave. A tick either completes or
//! the run aborts with the invariant violation that broke it.

use crate::{
    collector::{Collector, MemoryCollector, TickSnapshot},
    config::SimConfig,
    demography,
    error::SimResult,
    lifecycle,
    snapshot::SimSnapshot,
    types::Tick,
    world::World,
};

pub struct SimEngine {
    pub world: World,
    collector: Box<dyn Collector>,
}

impl SimEngine {
    /// Validate the config, seed the world, and emit the tick-0
    /// snapshot of the seed population to the collector.
    pub fn new(config: SimConfig, collector: Box<dyn Collector>) -> SimResult<Self> {
        let world = World::new(config)?;
        let mut engine = Self { world, collector };
        engine.emit_snapshot();
        Ok(engine)
    }

    /// Engine over the small test config with an in-memory collector.
    pub fn build_test(seed: u64) -> SimResult<Self> {
        let config = SimConfig { seed, ..SimConfig::default_test() };
        Self::new(config, Box::new(MemoryCollector::new()))
    }

    /// Resume from a snapshot. The collector starts fresh; the world
    /// (including the RNG stream position) continues exactly where the
    /// snapshot was captured.
    pub fn restore(snapshot: SimSnapshot, collector: Box<dyn Collector>) -> SimResult<Self> {
        Ok(Self { world: snapshot.restore()?, collector })
    }

    /// Advance one tick. This is the core simulation step.
    pub fn tick(&mut self) -> SimResult<TickSnapshot> {
        self.world.tick += 1;

        lifecycle::step_all(&mut self.world)?;
        demography::update(&mut self.world)?;

        let snapshot = self.emit_snapshot();
        log::debug!(
            "tick {}: total={} deaths={:?}",
            snapshot.tick,
            snapshot.total,
            snapshot.deaths
        );
        Ok(snapshot)
    }

    /// Run n ticks in a loop.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    pub fn current_tick(&self) -> Tick {
        self.world.tick
    }

    /// Capture the full resumable state of the run.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot::capture(&self.world)
    }

    pub fn collector(&self) -> &dyn Collector {
        self.collector.as_ref()
    }

    fn emit_snapshot(&mut self) -> TickSnapshot {
        let snapshot = TickSnapshot::observe(&self.world);
        if let Err(err) = self.collector.record(&snapshot) {
            // Best effort: recording failures never abort the tick.
            log::warn!(
                "collector '{}' failed at tick {}: {err}",
                self.collector.name(),
                snapshot.tick
            );
        }
        snapshot
    }
}
