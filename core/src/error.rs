use crate::types::{AgentId, Breed};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("config parameter '{parameter}' out of range: {value}")]
    ConfigOutOfRange { parameter: &'static str, value: f64 },

    #[error("agent {id} missing from {structure}")]
    AgentMissing { id: AgentId, structure: &'static str },

    #[error("agent {id} not present in grid cell ({x}, {y})")]
    GridDesync { id: AgentId, x: u32, y: u32 },

    #[error("agent {id} not registered under breed {breed:?}")]
    RegistryDesync { id: AgentId, breed: Breed },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
