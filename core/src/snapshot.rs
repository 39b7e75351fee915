//! Full simulation state to/from JSON.
//!
//! A snapshot captures everything needed to resume a run mid-stream:
//! config, tick counter, RNG stream position, id counter, death
//! ledger, and every agent in registry activation order. Restoring and
//! stepping once is bit-identical to stepping the captured world once.

use crate::{
    agent::Agent,
    config::SimConfig,
    error::SimResult,
    rng::SimRng,
    types::{AgentId, Breed, Tick},
    world::{DeathLedger, World},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub tick: Tick,
    pub config: SimConfig,
    pub rng: SimRng,
    pub next_id: AgentId,
    pub deaths: DeathLedger,
    /// Agents in canonical breed order, preserving each partition's
    /// internal order so restored shuffles replay identically.
    pub agents: Vec<Agent>,
}

impl SimSnapshot {
    pub fn capture(world: &World) -> Self {
        let mut agents = Vec::with_capacity(world.total_count());
        for breed in Breed::ALL {
            for &id in world.registry().members(breed) {
                // Registry membership implies presence in the agent
                // table; a miss here would be a desync the world
                // enforces against.
                if let Some(agent) = world.agent(id) {
                    agents.push(agent.clone());
                }
            }
        }
        Self {
            tick: world.tick,
            config: world.config.clone(),
            rng: world.rng.clone(),
            next_id: world.registry().next_id(),
            deaths: world.deaths,
            agents,
        }
    }

    /// Rebuild a world identical to the captured one.
    pub fn restore(self) -> SimResult<World> {
        World::from_parts(
            self.config,
            self.tick,
            self.rng,
            self.deaths,
            self.next_id,
            self.agents,
        )
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
