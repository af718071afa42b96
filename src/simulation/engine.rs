// src/simulation/engine.rs
use crate::core::{DjError, QubitId, StateVector};
use crate::operations::Operation;
use crate::oracle::Oracle;
use crate::simulation::SimulationResult;
use log::debug;
use num_complex::Complex;
use num_traits::Zero;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense state-vector engine over the wires of one circuit.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps wire IDs to their row (0..N-1); row 0 is the most significant bit.
    qubit_indices: HashMap<QubitId, usize>,
    /// Amplitudes over all 2^N basis states.
    global_state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine in |0...0> for the given wires.
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, DjError> {
        if qubit_ids.is_empty() {
            return Err(DjError::SimulationError {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }

        let num_qubits = qubit_ids.len();
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| DjError::SimulationError {
                message: "Number of qubits too large, resulting state vector dimension overflows usize."
                    .to_string(),
            })?;

        // Sort IDs so row assignment does not depend on HashSet iteration order.
        let mut sorted_ids: Vec<QubitId> = qubit_ids.iter().cloned().collect();
        sorted_ids.sort();
        let qubit_indices = sorted_ids.into_iter().enumerate().map(|(i, q)| (q, i)).collect();

        let mut initial_vec = vec![Complex::zero(); dim];
        initial_vec[0] = Complex::new(1.0, 0.0);

        Ok(Self {
            qubit_indices,
            global_state: StateVector::new(initial_vec),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), DjError> {
        if state.dim() != self.global_state.dim() {
            Err(DjError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.global_state.dim()
                ),
            })
        } else {
            self.global_state = state;
            Ok(())
        }
    }

    pub(crate) fn get_state(&self) -> &StateVector {
        &self.global_state
    }

    /// Applies a single unitary operation to the global state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), DjError> {
        match op {
            Operation::PauliX { target } => {
                let idx = self.get_qubit_index(target)?;
                self.apply_single_qubit_gate(idx, &pauli_x_matrix())?;
            }
            Operation::Hadamard { target } => {
                let idx = self.get_qubit_index(target)?;
                self.apply_single_qubit_gate(idx, &hadamard_matrix())?;
            }
            Operation::Cnot { control, target } => {
                let control_idx = self.get_qubit_index(control)?;
                let target_idx = self.get_qubit_index(target)?;
                if control_idx == target_idx {
                    return Err(DjError::SimulationError {
                        message: "Control and target qubits cannot be the same for CNOT".to_string(),
                    });
                }
                let x = pauli_x_matrix();
                // Basis order |control, target>: identity on |0x>, X on |1x>.
                let cnot: [[Complex<f64>; 4]; 4] = [
                    [Complex::new(1.0, 0.0), Complex::zero(), Complex::zero(), Complex::zero()],
                    [Complex::zero(), Complex::new(1.0, 0.0), Complex::zero(), Complex::zero()],
                    [Complex::zero(), Complex::zero(), x[0][0], x[0][1]],
                    [Complex::zero(), Complex::zero(), x[1][0], x[1][1]],
                ];
                self.apply_two_qubit_gate(control_idx, target_idx, &cnot)?;
            }
            Operation::Oracle { inputs, ancilla, oracle } => {
                self.apply_oracle(inputs, ancilla, oracle)?;
            }
            Operation::Measure { .. } => {
                return Err(DjError::SimulationError {
                    message: "Measure operation should not be passed directly to apply_operation".to_string(),
                });
            }
        };
        Ok(())
    }

    /// Marginal outcome distribution over `targets`, first target most significant.
    pub(crate) fn marginal_probabilities(&self, targets: &[QubitId]) -> Result<Vec<f64>, DjError> {
        let positions = self.bit_positions(targets)?;
        let mut probs = vec![0.0; 1usize << targets.len()];
        for (i, amp) in self.global_state.vector().iter().enumerate() {
            probs[gather_bits(i, &positions)] += amp.norm_sqr();
        }
        Ok(probs)
    }

    /// Amplitudes of the `register` wires when the single remaining wire is in |->.
    ///
    /// Projects the remaining wire onto |-> and returns `None` if the component
    /// orthogonal to |-> carries more than `tolerance` probability.
    pub(crate) fn factor_out_minus(&self, register: &[QubitId], tolerance: f64) -> Result<Option<StateVector>, DjError> {
        if register.len() + 1 != self.num_qubits {
            return Ok(None);
        }
        let positions = self.bit_positions(register)?;
        let Some(other) = (0..self.num_qubits).find(|&bit| !positions.contains(&bit)) else {
            return Ok(None);
        };
        let other_mask = 1usize << other;

        let mut minus = vec![Complex::zero(); 1usize << register.len()];
        let mut residual = 0.0;
        for (i, amp) in self.global_state.vector().iter().enumerate() {
            if i & other_mask != 0 {
                continue;
            }
            let a0 = *amp;
            let a1 = self.global_state.vector()[i | other_mask];
            minus[gather_bits(i, &positions)] = (a0 - a1) * FRAC_1_SQRT_2;
            residual += ((a0 + a1) * FRAC_1_SQRT_2).norm_sqr();
        }
        if residual > tolerance {
            debug!("remaining wire is not in |->: residual {}", residual);
            return Ok(None);
        }
        Ok(Some(StateVector::new(minus)))
    }

    /// Draws `shots` outcomes from `probabilities` into `result`.
    pub(crate) fn sample(probabilities: &[f64], shots: u64, seed: u64, result: &mut SimulationResult) -> Result<(), DjError> {
        let distribution = WeightedIndex::new(probabilities).map_err(|e| DjError::SimulationError {
            message: format!("Cannot sample from distribution: {}", e),
        })?;
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..shots {
            result.record_shot(distribution.sample(&mut rng));
        }
        Ok(())
    }

    fn get_qubit_index(&self, qubit: &QubitId) -> Result<usize, DjError> {
        self.qubit_indices.get(qubit).copied().ok_or_else(|| DjError::SimulationError {
            message: format!("Qubit {} not found in simulation context", qubit),
        })
    }

    /// Bit positions (from the right) of the given wires.
    fn bit_positions(&self, qubits: &[QubitId]) -> Result<Vec<usize>, DjError> {
        qubits
            .iter()
            .map(|q| self.get_qubit_index(q).map(|row| self.num_qubits - 1 - row))
            .collect()
    }

    /// Applies a 2x2 matrix to one wire, assuming the standard tensor product layout.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) -> Result<(), DjError> {
        let k = self.num_qubits - 1 - target_idx;
        let k_mask = 1usize << k;
        let dim = self.global_state.dim();
        let mut new_vec = vec![Complex::zero(); dim];

        // Pairs of basis states differing only at bit k
        for i in 0..dim / 2 {
            let i0 = insert_zero_bit(i, k);
            let i1 = i0 | k_mask;
            let psi_0 = self.global_state.vector()[i0];
            let psi_1 = self.global_state.vector()[i1];
            new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.global_state = StateVector::new(new_vec);
        Ok(())
    }

    /// Applies a 4x4 matrix to two wires; matrix rows are indexed by |b1 b2>
    /// with b1 on `idx1` and b2 on `idx2`.
    fn apply_two_qubit_gate(&mut self, idx1: usize, idx2: usize, matrix: &[[Complex<f64>; 4]; 4]) -> Result<(), DjError> {
        if idx1 == idx2 {
            return Err(DjError::SimulationError {
                message: "Target indices for a two-qubit gate cannot be the same".to_string(),
            });
        }
        if self.num_qubits < 2 {
            return Err(DjError::SimulationError {
                message: "Two-qubit gate requires at least two qubits".to_string(),
            });
        }

        let n = self.num_qubits;
        let dim = self.global_state.dim();
        let mut new_vec = vec![Complex::zero(); dim];

        let b1 = n - 1 - idx1;
        let b2 = n - 1 - idx2;
        let (hi, lo) = (b1.max(b2), b1.min(b2));

        for i_other in 0..dim / 4 {
            let i_base = insert_zero_bit(insert_zero_bit(i_other, lo), hi);
            let indices = [
                i_base,
                i_base | (1 << b2),
                i_base | (1 << b1),
                i_base | (1 << b1) | (1 << b2),
            ];

            let psi: [Complex<f64>; 4] = indices.map(|j| self.global_state.vector()[j]);
            for (row, &target) in indices.iter().enumerate() {
                new_vec[target] = (0..4).map(|col| matrix[row][col] * psi[col]).sum();
            }
        }

        self.global_state = StateVector::new(new_vec);
        Ok(())
    }

    /// U_f |x>|y> = |x>|y ⊕ f(x)>, a permutation of basis states.
    fn apply_oracle(&mut self, inputs: &[QubitId], ancilla: &QubitId, oracle: &Oracle) -> Result<(), DjError> {
        if inputs.len() != oracle.num_inputs() {
            return Err(DjError::SimulationError {
                message: format!(
                    "Oracle expects {} input wires, circuit supplies {}",
                    oracle.num_inputs(),
                    inputs.len()
                ),
            });
        }
        let positions = self.bit_positions(inputs)?;
        let ancilla_pos = self.num_qubits - 1 - self.get_qubit_index(ancilla)?;
        if positions.contains(&ancilla_pos) {
            return Err(DjError::SimulationError {
                message: format!("Ancilla {} is also listed as an oracle input", ancilla),
            });
        }
        let ancilla_mask = 1usize << ancilla_pos;

        let old = self.global_state.vector();
        let mut new_vec = vec![Complex::zero(); old.len()];
        for (i, amp) in old.iter().enumerate() {
            let x = gather_bits(i, &positions);
            let j = if oracle.evaluate(x) { i ^ ancilla_mask } else { i };
            new_vec[j] = *amp;
        }
        debug!("applied oracle '{}'", oracle.label());
        self.global_state = StateVector::new(new_vec);
        Ok(())
    }
}

/// Spreads `i` by inserting a zero at bit position `k`.
fn insert_zero_bit(i: usize, k: usize) -> usize {
    let lower = i & ((1usize << k) - 1);
    ((i >> k) << (k + 1)) | lower
}

/// Reads the bits of `i` at `positions` into a compact index, first position most significant.
fn gather_bits(i: usize, positions: &[usize]) -> usize {
    positions.iter().fold(0, |acc, &pos| (acc << 1) | ((i >> pos) & 1))
}

fn pauli_x_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}
