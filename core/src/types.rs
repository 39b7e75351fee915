//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};

/// A simulation tick. One tick = one demographic time step.
pub type Tick = u64;

/// A stable, process-unique agent identifier. Issued monotonically
/// by the registry, never reused.
pub type AgentId = u64;

/// Ticks after which a child is promoted to an adult.
pub const MATURATION_AGE: u32 = 5;

/// An in-bounds grid coordinate. Produced only by torus wrapping,
/// so `x < width` and `y < height` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

/// Allele dosage bucket for the sickle-cell gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genotype {
    Normal,
    Carrier,
    Sickle,
}

impl Genotype {
    /// Dosage encoding: 0.0 normal, 0.5 carrier, 1.0 afflicted.
    pub fn dosage(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Carrier => 0.5,
            Self::Sickle => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Adult,
    Child,
}

/// The six agent classes: life stage × genotype.
/// Variant order is the canonical activation and snapshot order —
/// never reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breed {
    AdultNormal,
    AdultCarrier,
    AdultSickle,
    ChildNormal,
    ChildCarrier,
    ChildSickle,
}

impl Breed {
    /// All breeds in canonical order: adults first, then children.
    pub const ALL: [Breed; 6] = [
        Breed::AdultNormal,
        Breed::AdultCarrier,
        Breed::AdultSickle,
        Breed::ChildNormal,
        Breed::ChildCarrier,
        Breed::ChildSickle,
    ];

    /// Stable index into per-breed tables, matching `ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::AdultNormal => 0,
            Self::AdultCarrier => 1,
            Self::AdultSickle => 2,
            Self::ChildNormal => 3,
            Self::ChildCarrier => 4,
            Self::ChildSickle => 5,
        }
    }

    pub fn life_stage(self) -> LifeStage {
        match self {
            Self::AdultNormal | Self::AdultCarrier | Self::AdultSickle => LifeStage::Adult,
            Self::ChildNormal | Self::ChildCarrier | Self::ChildSickle => LifeStage::Child,
        }
    }

    pub fn genotype(self) -> Genotype {
        match self {
            Self::AdultNormal | Self::ChildNormal => Genotype::Normal,
            Self::AdultCarrier | Self::ChildCarrier => Genotype::Carrier,
            Self::AdultSickle | Self::ChildSickle => Genotype::Sickle,
        }
    }

    pub fn from_parts(stage: LifeStage, genotype: Genotype) -> Breed {
        match (stage, genotype) {
            (LifeStage::Adult, Genotype::Normal) => Self::AdultNormal,
            (LifeStage::Adult, Genotype::Carrier) => Self::AdultCarrier,
            (LifeStage::Adult, Genotype::Sickle) => Self::AdultSickle,
            (LifeStage::Child, Genotype::Normal) => Self::ChildNormal,
            (LifeStage::Child, Genotype::Carrier) => Self::ChildCarrier,
            (LifeStage::Child, Genotype::Sickle) => Self::ChildSickle,
        }
    }

    /// Stable name used for logging and the time-series store.
    pub fn name(self) -> &'static str {
        match self {
            Self::AdultNormal => "adult_normal",
            Self::AdultCarrier => "adult_carrier",
            Self::AdultSickle => "adult_sickle",
            Self::ChildNormal => "child_normal",
            Self::ChildCarrier => "child_carrier",
            Self::ChildSickle => "child_sickle",
        }
    }
}
