//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Identifier of a single qubit wire within a circuit.
/// Wire 0 is the most significant bit of a basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.0)
    }
}

/// Failures raised while building oracles, circuits or running a simulation.
///
/// Everything the user can trigger from configuration surfaces as
/// `InvalidArgument`; the other variants indicate an internal inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DjError {
    /// A caller supplied a value outside the accepted domain
    /// (non-positive qubit count, unknown oracle kind, malformed truth table).
    #[error("Invalid Argument: {message}")]
    InvalidArgument {
        /// InvalidArgument failure message
        message: String,
    },

    /// The state vector lost normalization beyond tolerance.
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl DjError {
    /// Shorthand for building an `InvalidArgument` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        DjError::InvalidArgument { message: message.into() }
    }
}
