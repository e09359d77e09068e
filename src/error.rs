//! Error types for the integration engine.
//!
//! Every failure the core can produce is a [`SimError`]; none of them are
//! recovered internally. A step that fails may leave some bodies already
//! advanced, so callers must treat the universe as unusable afterwards.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Two bodies came closer than the singularity threshold during a
    /// force evaluation. Fatal for the current universe.
    #[error("bodies {first} and {second} are {distance:e} apart, below the {limit:e} separation limit")]
    Collision {
        first: usize,
        second: usize,
        distance: f64,
        limit: f64,
    },

    /// Coefficient lookup past the end of an Adams table. Indicates a
    /// logic defect in the caller, not bad input data.
    #[error("coefficient index {index} out of range for order-{order} Adams tables")]
    CoefficientIndex { index: usize, order: usize },

    /// Adams tables exist only for orders 4 and 8.
    #[error("unsupported multistep order {0}, expected 4 or 8")]
    UnsupportedOrder(usize),

    /// Method name not recognized by the factory.
    #[error("unknown integration method `{0}`")]
    UnknownMethod(String),
}
