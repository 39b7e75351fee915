//! Breed-partitioned activation registry.
//!
//! Partitions all live agents by breed and owns id issuance. Counts
//! are the partition lengths, so count queries are O(1). Membership
//! order is deterministic (insertion order, perturbed only by
//! swap-removal), which keeps the per-tick shuffles reproducible.

use crate::{
    error::{SimError, SimResult},
    rng::SimRng,
    types::{AgentId, Breed},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedRegistry {
    members: [Vec<AgentId>; 6],
    next_id: AgentId,
}

impl BreedRegistry {
    pub fn new() -> Self {
        Self {
            members: Default::default(),
            next_id: 1,
        }
    }

    /// Issue the next agent id. Monotonic, never reused.
    pub fn issue_id(&mut self) -> AgentId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn next_id(&self) -> AgentId {
        self.next_id
    }

    /// Restore the id counter from a snapshot. Must never move the
    /// counter backwards past a live id.
    pub fn set_next_id(&mut self, next_id: AgentId) {
        self.next_id = next_id;
    }

    pub fn add(&mut self, breed: Breed, id: AgentId) {
        self.members[breed.index()].push(id);
    }

    /// Delete `id` from its breed partition. Absence is a contract
    /// violation: it means the registry and the grid disagree.
    pub fn remove(&mut self, breed: Breed, id: AgentId) -> SimResult<()> {
        let partition = &mut self.members[breed.index()];
        match partition.iter().position(|&other| other == id) {
            Some(i) => {
                partition.swap_remove(i);
                Ok(())
            }
            None => Err(SimError::RegistryDesync { id, breed }),
        }
    }

    pub fn count(&self, breed: Breed) -> usize {
        self.members[breed.index()].len()
    }

    pub fn total_count(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    pub fn members(&self, breed: Breed) -> &[AgentId] {
        &self.members[breed.index()]
    }

    /// Fresh random activation order for one breed.
    pub fn shuffled(&self, breed: Breed, rng: &mut SimRng) -> Vec<AgentId> {
        let mut ids = self.members[breed.index()].clone();
        rng.shuffle(&mut ids);
        ids
    }

    /// Up to `k` distinct members of `breed`, uniformly at random.
    /// Clamped to the live count; never selects the same agent twice.
    pub fn sample_without_replacement(
        &self,
        breed: Breed,
        k: usize,
        rng: &mut SimRng,
    ) -> Vec<AgentId> {
        let mut pool = self.members[breed.index()].clone();
        let k = k.min(pool.len());
        // Partial Fisher–Yates: only the first k slots are settled.
        for i in 0..k {
            let j = i + rng.next_u64_below((pool.len() - i) as u64) as usize;
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}

impl Default for BreedRegistry {
    fn default() -> Self {
        Self::new()
    }
}
