//! The World façade — grid, registry, and agent table in lockstep.
//!
//! RULE: a live agent exists in the grid at its recorded position AND
//! in the registry under its breed, or it does not exist at all. All
//! creation and removal goes through `spawn`/`remove` here so the two
//! structures are always updated as an atomic pair. Nothing outside
//! this module mutates the grid or the registry directly.

use crate::{
    agent::Agent,
    config::SimConfig,
    error::{SimError, SimResult},
    grid::TorusGrid,
    registry::BreedRegistry,
    rng::SimRng,
    types::{AgentId, Breed, LifeStage, Position, Tick, MATURATION_AGE},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cumulative death counters for the run, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathLedger {
    /// Adults exceeding life expectancy.
    pub natural: u64,
    /// Demographic culls attributed to the malaria terms.
    pub malaria: u64,
    /// Demographic culls attributed to the sickle-cell terms.
    pub sickle_cell: u64,
    /// Carrying-capacity overflow removals.
    pub capacity: u64,
}

pub struct World {
    pub config: SimConfig,
    pub tick: Tick,
    pub rng: SimRng,
    pub deaths: DeathLedger,
    grid: TorusGrid,
    registry: BreedRegistry,
    agents: HashMap<AgentId, Agent>,
}

impl World {
    /// Validate the config and seed the initial population.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut world = Self {
            grid: TorusGrid::new(config.width, config.height),
            registry: BreedRegistry::new(),
            agents: HashMap::new(),
            rng: SimRng::from_seed(config.seed),
            tick: 0,
            deaths: DeathLedger::default(),
            config,
        };
        world.seed_population();
        Ok(world)
    }

    /// Seed counts per breed, in canonical breed order. Adults start
    /// with an age drawn below life expectancy, children below the
    /// maturation age, so nobody dies of old age on the first tick.
    fn seed_population(&mut self) {
        let counts = [
            (Breed::AdultNormal, self.config.initial_normal_adults),
            (Breed::AdultCarrier, self.config.initial_carrier_adults),
            (Breed::AdultSickle, self.config.initial_sickle_adults),
            (Breed::ChildNormal, self.config.initial_normal_children),
            (Breed::ChildCarrier, self.config.initial_carrier_children),
            (Breed::ChildSickle, self.config.initial_sickle_children),
        ];
        for (breed, n) in counts {
            let age_bound = match breed.life_stage() {
                LifeStage::Adult => self.config.life_expectancy as u64,
                LifeStage::Child => MATURATION_AGE as u64,
            };
            for _ in 0..n {
                let pos = self.grid.random_position(&mut self.rng);
                let age = self.rng.next_u64_below(age_bound) as u32;
                self.spawn(breed, pos, age);
            }
        }
    }

    /// Create a live agent: issue an id, place it in the grid, index
    /// it in the registry, record it in the agent table.
    pub fn spawn(&mut self, breed: Breed, pos: Position, age: u32) -> AgentId {
        let id = self.registry.issue_id();
        let life_expectancy = match breed.life_stage() {
            LifeStage::Adult => Some(self.config.life_expectancy),
            LifeStage::Child => None,
        };
        self.grid.place(id, pos);
        self.registry.add(breed, id);
        self.agents.insert(id, Agent { id, breed, age, pos, life_expectancy });
        id
    }

    /// Spawn at a uniformly random grid position.
    pub fn spawn_at_random(&mut self, breed: Breed, age: u32) -> AgentId {
        let pos = self.grid.random_position(&mut self.rng);
        self.spawn(breed, pos, age)
    }

    /// Destroy a live agent, removing it from the grid and the
    /// registry as a pair. A missing entry in any of the three
    /// structures is a fatal desync.
    pub fn remove(&mut self, id: AgentId) -> SimResult<Agent> {
        let agent = self
            .agents
            .remove(&id)
            .ok_or(SimError::AgentMissing { id, structure: "agent table" })?;
        self.grid.remove(id, agent.pos)?;
        self.registry.remove(agent.breed, id)?;
        Ok(agent)
    }

    /// Relocate an agent, keeping grid and record consistent.
    pub fn move_agent(&mut self, id: AgentId, to: Position) -> SimResult<()> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(SimError::AgentMissing { id, structure: "agent table" })?;
        self.grid.relocate(id, agent.pos, to)?;
        agent.pos = to;
        Ok(())
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn count(&self, breed: Breed) -> usize {
        self.registry.count(breed)
    }

    pub fn total_count(&self) -> usize {
        self.registry.total_count()
    }

    pub fn grid(&self) -> &TorusGrid {
        &self.grid
    }

    pub fn registry(&self) -> &BreedRegistry {
        &self.registry
    }

    /// Fresh random activation order for one breed.
    pub fn shuffled(&mut self, breed: Breed) -> Vec<AgentId> {
        self.registry.shuffled(breed, &mut self.rng)
    }

    /// Up to `k` distinct live agents of `breed`, chosen uniformly.
    pub fn sample_without_replacement(&mut self, breed: Breed, k: usize) -> Vec<AgentId> {
        self.registry.sample_without_replacement(breed, k, &mut self.rng)
    }

    /// Wrap an arbitrary coordinate onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        self.grid.wrap(x, y)
    }

    /// Rebuild a world from snapshot parts. Agents are re-inserted in
    /// the given order so registry partitions (and therefore future
    /// shuffles) match the captured world exactly.
    pub(crate) fn from_parts(
        config: SimConfig,
        tick: Tick,
        rng: SimRng,
        deaths: DeathLedger,
        next_id: AgentId,
        agents: Vec<Agent>,
    ) -> SimResult<Self> {
        config.validate()?;
        let mut world = Self {
            grid: TorusGrid::new(config.width, config.height),
            registry: BreedRegistry::new(),
            agents: HashMap::with_capacity(agents.len()),
            rng,
            tick,
            deaths,
            config,
        };
        for agent in agents {
            world.grid.place(agent.id, agent.pos);
            world.registry.add(agent.breed, agent.id);
            world.agents.insert(agent.id, agent);
        }
        world.registry.set_next_id(next_id);
        Ok(world)
    }
}
