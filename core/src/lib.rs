//! sicklesim-core — spatial simulation of sickle-cell allele selection
//! under endemic malaria.
//!
//! Six demographic classes (adult/child × normal/carrier/afflicted) on
//! a toroidal lattice: agents random-walk, age, mature and die, and a
//! population-level demographic pass converts genotype-mixing fertility
//! and disease mortality into stochastic births and culls each tick.

pub mod agent;
pub mod collector;
pub mod config;
pub mod demography;
pub mod engine;
pub mod error;
pub mod grid;
pub mod lifecycle;
pub mod registry;
pub mod rng;
pub mod snapshot;
pub mod types;
pub mod world;

pub use agent::Agent;
pub use collector::{Collector, MemoryCollector, NullCollector, TickSnapshot};
pub use config::SimConfig;
pub use engine::SimEngine;
pub use error::{SimError, SimResult};
pub use snapshot::SimSnapshot;
pub use types::{AgentId, Breed, Genotype, LifeStage, Position, Tick};
pub use world::{DeathLedger, World};
