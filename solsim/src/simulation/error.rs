//! Errors returned at the engine's mutation boundary.
//!
//! Coincident bodies are not an error: the force law returns zero for them.

use thiserror::Error;

use crate::simulation::states::BodyId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("no live body with id {0}")]
    NotFound(BodyId),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("frame duration must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("position and velocity components must be finite")]
    InvalidVector,
    #[error("visual radius must be finite and not negative, got {0}")]
    InvalidRadius(f64),
}

pub type SimResult<T> = Result<T, SimError>;
