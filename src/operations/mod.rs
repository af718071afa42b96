// src/operations/mod.rs

//! Gate-level operations making up a Deutsch-Jozsa circuit.
//!
//! The set is deliberately small: the algorithm only needs bit flips,
//! Hadamards, the oracle itself and a final measurement. CNOT is kept so
//! structured oracles (parity, first-half) can be spelled out gate by gate.

use crate::core::QubitId;
use crate::oracle::Oracle;
use std::sync::Arc;

/// A single step in a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Pauli-X: |0> <-> |1>.
    PauliX {
        /// Wire to flip.
        target: QubitId,
    },

    /// Hadamard: |0> -> |+>, |1> -> |->.
    Hadamard {
        /// Wire to transform.
        target: QubitId,
    },

    /// Controlled-NOT: flips `target` when `control` is |1>.
    Cnot {
        control: QubitId,
        target: QubitId,
    },

    /// The oracle unitary U_f |x>|y> = |x>|y ⊕ f(x)>.
    ///
    /// `inputs` lists the input wires most significant bit first, so input
    /// index x is read from them in that order.
    Oracle {
        inputs: Vec<QubitId>,
        ancilla: QubitId,
        /// Shared so cloning a circuit does not copy a 2^n truth table.
        oracle: Arc<Oracle>,
    },

    /// Measurement in the computational basis. The simulator reports the
    /// marginal distribution of these wires.
    Measure {
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// Returns every wire directly mentioned in the operation's parameters.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::PauliX { target } => vec![*target],
            Operation::Hadamard { target } => vec![*target],
            Operation::Cnot { control, target } => vec![*control, *target],
            Operation::Oracle { inputs, ancilla, .. } => {
                let mut wires = inputs.clone();
                wires.push(*ancilla);
                wires
            }
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// Whether applying this operation counts as one oracle query.
    pub fn is_query(&self) -> bool {
        matches!(self, Operation::Oracle { .. })
    }
}
