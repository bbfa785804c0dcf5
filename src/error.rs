//! Simulation error types.

use thiserror::Error;

use crate::sim::bounds::ShapeKind;
use crate::sim::state::EntityId;

/// Errors raised by the simulation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A bound of the wrong shape was assigned to an entity (e.g. a rectangle
    /// to a miner, which must be a circle).
    #[error("{entity} bounds must be a {expected}, got a {got}")]
    ShapeMismatch {
        entity: &'static str,
        expected: ShapeKind,
        got: ShapeKind,
    },

    /// An entity id was referenced that is not in the scene.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;
