// src/simulation/mod.rs

//! Literal gate-by-gate simulation of a `Circuit`.
//!
//! The `Simulator` walks the circuit's operations through the internal
//! `SimulationEngine`, then reads the measured wires' distribution. Measurement
//! is deferred: `Measure` only selects which wires are reported.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{DjError, QubitId, StateVector, DEFAULT_SAMPLING_SEED, NORM_TOLERANCE};
use crate::operations::Operation;
use crate::validation::check_normalization;
use engine::SimulationEngine;
use log::{debug, info, warn};

/// Runs circuits on a dense state vector.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    /// Number of sampled measurements; 0 reports exact probabilities only.
    shots: u64,
    /// Explicit PRNG seed. When absent `DEFAULT_SAMPLING_SEED` is used.
    seed: Option<u64>,
}

impl Simulator {
    /// Creates a simulator that reports exact probabilities and takes no shots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples `shots` measurements in addition to the exact distribution.
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Fixes the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Runs a simulation of the provided circuit.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with the distribution over every wire named by a
    ///   `Measure` (in order of first appearance), plus sampled counts when shots
    ///   were requested. Without any `Measure`, all wires are reported.
    /// * `Err(DjError)` for unknown wires, malformed gates, or if the final state
    ///   lost normalization.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult, DjError> {
        if circuit.is_empty() {
            return Ok(SimulationResult::new());
        }

        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let mut measured: Vec<QubitId> = Vec::new();

        for op in circuit.operations() {
            match op {
                Operation::Measure { targets } => {
                    for target in targets {
                        if !measured.contains(target) {
                            measured.push(*target);
                        }
                    }
                }
                _ => {
                    if let Some(target) = op.involved_qubits().into_iter().find(|q| measured.contains(q)) {
                        return Err(DjError::SimulationError {
                            message: format!("Operation on {} after it was measured", target),
                        });
                    }
                    engine.apply_operation(op)?;
                }
            }
        }

        if let Err(e) = check_normalization(engine.get_state(), Some(NORM_TOLERANCE)) {
            warn!("{}", e);
            return Err(e);
        }

        if measured.is_empty() {
            measured = circuit.sorted_qubits();
        }

        let mut result = SimulationResult::new();
        let probabilities = engine.marginal_probabilities(&measured)?;
        if let Some(register) = engine.factor_out_minus(&measured, NORM_TOLERANCE)? {
            result.set_register(register);
        }

        if self.shots > 0 {
            let seed = self.seed.unwrap_or(DEFAULT_SAMPLING_SEED);
            debug!("sampling {} shots with seed {}", self.shots, seed);
            SimulationEngine::sample(&probabilities, self.shots, seed, &mut result)?;
        }
        result.set_distribution(measured, probabilities);
        info!(
            "simulated {} operations on {} qubits",
            circuit.len(),
            circuit.qubits().len()
        );
        Ok(result)
    }

    /// Samples shots straight from an already computed register state,
    /// skipping the gate-by-gate run.
    pub fn sample_state(&self, state: &StateVector) -> Result<SimulationResult, DjError> {
        let probabilities = state.probabilities();
        let mut result = SimulationResult::new();
        if self.shots > 0 {
            let seed = self.seed.unwrap_or(DEFAULT_SAMPLING_SEED);
            debug!("sampling {} shots with seed {}", self.shots, seed);
            SimulationEngine::sample(&probabilities, self.shots, seed, &mut result)?;
        }
        let measured = (0..state.num_qubits() as u64).map(QubitId).collect();
        result.set_register(state.clone());
        result.set_distribution(measured, probabilities);
        Ok(result)
    }
}
