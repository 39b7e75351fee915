//! The agent record — one entry per live individual.
//!
//! A single struct tagged with a Breed replaces the original model's
//! six near-duplicate classes; behaviour dispatches on life stage.

use crate::types::{AgentId, Breed, Genotype, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub breed: Breed,
    /// Ticks since creation. Maturation creates a fresh adult with
    /// age 0; the counter never carries across the promotion.
    pub age: u32,
    pub pos: Position,
    /// Natural-death threshold. Set for adults, None for children.
    pub life_expectancy: Option<u32>,
}

impl Agent {
    pub fn genotype(&self) -> Genotype {
        self.breed.genotype()
    }

    /// Allele dosage, always consistent with the breed tag.
    pub fn dosage(&self) -> f64 {
        self.breed.genotype().dosage()
    }
}
