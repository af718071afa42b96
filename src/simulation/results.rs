// src/simulation/results.rs
use crate::core::{bitstring, QubitId, StateVector, AMPLITUDE_TOLERANCE};
use std::collections::BTreeMap;
use std::fmt;

/// Holds the outcome of a circuit simulation.
///
/// Always carries the exact marginal distribution over the measured wires.
/// When the unmeasured wire factors out as |->, as the Deutsch-Jozsa
/// ancilla does, the measured register's amplitudes are kept as well.
/// Sampled counts exist only when the simulator was configured with shots.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    measured: Vec<QubitId>,
    /// `probabilities[k]` for outcome `k`, first measured wire most significant.
    probabilities: Vec<f64>,
    register: Option<StateVector>,
    counts: BTreeMap<usize, u64>,
    shots: u64,
}

impl SimulationResult {
    /// Creates a new, empty result set.
    pub(crate) fn new() -> Self {
        Self {
            measured: Vec::new(),
            probabilities: Vec::new(),
            register: None,
            counts: BTreeMap::new(),
            shots: 0,
        }
    }

    pub(crate) fn set_distribution(&mut self, measured: Vec<QubitId>, probabilities: Vec<f64>) {
        self.measured = measured;
        self.probabilities = probabilities;
    }

    pub(crate) fn set_register(&mut self, register: StateVector) {
        self.register = Some(register);
    }

    pub(crate) fn record_shot(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.shots += 1;
    }

    /// The wires whose outcomes this result describes, most significant first.
    pub fn measured_qubits(&self) -> &[QubitId] {
        &self.measured
    }

    /// Exact outcome probabilities.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Exact probability of the all-zero outcome.
    pub fn zero_state_probability(&self) -> f64 {
        self.probabilities.first().copied().unwrap_or(0.0)
    }

    /// Amplitudes of the measured register, if it separated from the rest of the circuit.
    pub fn register_state(&self) -> Option<&StateVector> {
        self.register.as_ref()
    }

    /// Sampled outcome histogram, empty unless shots were requested.
    pub fn counts(&self) -> &BTreeMap<usize, u64> {
        &self.counts
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Sampled frequencies as fractions of the shot count.
    pub fn frequencies(&self) -> BTreeMap<usize, f64> {
        if self.shots == 0 {
            return BTreeMap::new();
        }
        self.counts
            .iter()
            .map(|(&k, &c)| (k, c as f64 / self.shots as f64))
            .collect()
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.measured.is_empty() {
            return writeln!(f, "  No qubits were measured.");
        }
        let width = self.measured.len();
        writeln!(f, "  Outcome probabilities:")?;
        for (k, p) in self.probabilities.iter().enumerate() {
            if *p > AMPLITUDE_TOLERANCE {
                writeln!(f, "    |{}⟩: {:.4}", bitstring(k, width), p)?;
            }
        }
        if self.shots > 0 {
            writeln!(f, "  Sampled counts ({} shots):", self.shots)?;
            for (k, c) in &self.counts {
                writeln!(f, "    |{}⟩: {}", bitstring(*k, width), c)?;
            }
        }
        Ok(())
    }
}
