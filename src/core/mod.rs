// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{DjError, QubitId};
pub use state::{bitstring, Classification, StateVector};

pub mod constants;
pub use constants::dj_constants::{
    AMPLITUDE_TOLERANCE, CLASSIFY_THRESHOLD, DEFAULT_SAMPLING_SEED, MAX_INPUT_QUBITS, NORM_TOLERANCE, QUANTUM_QUERIES,
};
