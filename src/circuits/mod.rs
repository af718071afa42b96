// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`crate::operations::Operation`), and the Deutsch-Jozsa circuit
//! itself.

use crate::core::{DjError, QubitId};
use crate::operations::Operation;
use crate::oracle::Oracle;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// An ordered sequence of operations applied to a set of qubit wires.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// The unique set of wires touched by any operation.
    qubits: HashSet<QubitId>,
    /// Operations in application order.
    operations: Vec<Operation>,
    /// Oracle queries written out as plain gates rather than `Operation::Oracle`.
    compiled_queries: usize,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
            compiled_queries: 0,
        }
    }

    /// Appends an operation, registering the wires it touches.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Appends every operation yielded by `ops`, in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Appends the gates realising one oracle query. The group counts as a
    /// single query even when it is empty (the identity for f(x) = 0).
    pub fn add_compiled_query<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        self.add_operations(ops);
        self.compiled_queries += 1;
    }

    /// Returns a reference to the set of unique wires involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// Wires in ascending order; the first one is the most significant bit.
    pub fn sorted_qubits(&self) -> Vec<QubitId> {
        let mut sorted: Vec<QubitId> = self.qubits.iter().cloned().collect();
        sorted.sort();
        sorted
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of oracle applications, block or compiled. Deutsch-Jozsa needs exactly one.
    pub fn query_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_query()).count() + self.compiled_queries
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Adds one oracle query expanded into gates.
    pub fn add_compiled_query<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_compiled_query(ops);
        self
    }

    /// Adds a Hadamard on each of `targets`.
    pub fn hadamard_all(self, targets: &[QubitId]) -> Self {
        self.add_ops(targets.iter().map(|&target| Operation::Hadamard { target }))
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Deutsch-Jozsa circuit
//-------------------------------------------------------------------------

/// How the oracle is written into the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OracleStyle {
    /// A single U_f block over all wires, valid for any truth table.
    #[default]
    Block,
    /// X and CNOT gates when f(x) = (m · x) ⊕ c for some mask m and bit c,
    /// falling back to a block otherwise.
    Gates,
}

/// Finds `(mask, c)` with f(x) = parity(x AND mask) XOR c, if f has that form.
pub fn linear_form(oracle: &Oracle) -> Option<(usize, bool)> {
    let n = oracle.num_inputs();
    let c = oracle.evaluate(0);
    let mask = (0..n)
        .filter(|&bit| oracle.evaluate(1 << bit) != c)
        .fold(0usize, |m, bit| m | (1 << bit));
    let dim = oracle.truth_table().len();
    let matches = (0..dim).all(|x| oracle.evaluate(x) == (((x & mask).count_ones() % 2 == 1) ^ c));
    matches.then_some((mask, c))
}

/// Gates realising U_f for a linear oracle on the given wires.
fn oracle_gates(inputs: &[QubitId], ancilla: QubitId, mask: usize, c: bool) -> Vec<Operation> {
    let n = inputs.len();
    let mut ops = Vec::new();
    if c {
        ops.push(Operation::PauliX { target: ancilla });
    }
    // inputs[0] carries the most significant bit, i.e. bit position n-1.
    for (i, &control) in inputs.iter().enumerate() {
        if mask & (1 << (n - 1 - i)) != 0 {
            ops.push(Operation::Cnot { control, target: ancilla });
        }
    }
    ops
}

/// Builds the full Deutsch-Jozsa circuit for `oracle`.
///
/// Wires `q[0]..q[n-1]` are the inputs and `q[n]` is the ancilla:
/// X on the ancilla, H on every wire, U_f, H on the inputs, measure the inputs.
pub fn deutsch_jozsa_circuit(oracle: &Oracle, style: OracleStyle) -> Result<Circuit, DjError> {
    let n = oracle.num_inputs();
    if n == 0 {
        return Err(DjError::invalid("oracle must have at least one input bit"));
    }
    let inputs: Vec<QubitId> = (0..n as u64).map(QubitId).collect();
    let ancilla = QubitId(n as u64);
    let all_wires: Vec<QubitId> = inputs.iter().copied().chain([ancilla]).collect();

    let builder = CircuitBuilder::new()
        .add_op(Operation::PauliX { target: ancilla })
        .hadamard_all(&all_wires);
    let builder = match (style, linear_form(oracle)) {
        (OracleStyle::Gates, Some((mask, c))) => {
            let gates = oracle_gates(&inputs, ancilla, mask, c);
            debug!("oracle '{}' compiled to {} gate(s)", oracle.label(), gates.len());
            builder.add_compiled_query(gates)
        }
        _ => {
            debug!("oracle '{}' applied as a single block", oracle.label());
            builder.add_op(Operation::Oracle {
                inputs: inputs.clone(),
                ancilla,
                oracle: Arc::new(oracle.clone()),
            })
        }
    };

    Ok(builder
        .hadamard_all(&inputs)
        .add_op(Operation::Measure { targets: inputs })
        .build())
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        let sorted_qubits = self.sorted_qubits();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = sorted_qubits.iter().map(|q| format!("{}", q).len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the gate or wire segment
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][time] holds the connector drawn below this row
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::PauliX { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate("X");
                    }
                }
                Operation::Hadamard { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate("H");
                    }
                }
                Operation::Cnot { control, target } => {
                    if let (Some(r_ctrl), Some(r_tgt)) = (qubit_to_row.get(control), qubit_to_row.get(target)) {
                        op_grid[*r_ctrl][t] = format_gate("@");
                        op_grid[*r_tgt][t] = format_gate("X");
                        let r_min = (*r_ctrl).min(*r_tgt);
                        let r_max = (*r_ctrl).max(*r_tgt);
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Operation::Oracle { inputs, ancilla, .. } => {
                    let rows: Vec<usize> = inputs
                        .iter()
                        .chain(std::iter::once(ancilla))
                        .filter_map(|q| qubit_to_row.get(q).copied())
                        .collect();
                    if let (Some(&r_min), Some(&r_max)) = (rows.iter().min(), rows.iter().max()) {
                        for &r in &rows {
                            op_grid[r][t] = format_gate("[Uf]");
                        }
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Operation::Measure { targets } => {
                    for target in targets {
                        if let Some(r) = qubit_to_row.get(target) {
                            op_grid[*r][t] = format_gate("M");
                        }
                    }
                }
            }
        }

        writeln!(f, "Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{build_balanced, build_oracle, BalancedPattern, OracleKind};

    #[test]
    fn block_circuit_has_expected_shape() -> Result<(), DjError> {
        let oracle = build_oracle(3, OracleKind::Balanced)?;
        let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Block)?;
        // X + 4 H + U_f + 3 H + measure
        assert_eq!(circuit.len(), 10);
        assert_eq!(circuit.qubits().len(), 4);
        assert_eq!(circuit.query_count(), 1);
        assert_eq!(circuit.operations()[0], Operation::PauliX { target: QubitId(3) });
        Ok(())
    }

    #[test]
    fn parity_compiles_to_one_cnot_per_input() -> Result<(), DjError> {
        let oracle = build_oracle(3, OracleKind::Balanced)?;
        let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Gates)?;
        let cnots = circuit
            .operations()
            .iter()
            .filter(|op| matches!(op, Operation::Cnot { .. }))
            .count();
        assert_eq!(cnots, 3);
        assert_eq!(circuit.query_count(), 1);
        Ok(())
    }

    #[test]
    fn compiled_oracles_count_as_one_query() -> Result<(), DjError> {
        for kind in [OracleKind::Const0, OracleKind::Const1, OracleKind::Balanced] {
            let oracle = build_oracle(4, kind)?;
            let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Gates)?;
            assert!(!circuit.operations().iter().any(|op| op.is_query()), "{:?}", kind);
            assert_eq!(circuit.query_count(), 1, "{:?}", kind);
        }
        let mut circuit = Circuit::new();
        circuit.add_operation(Operation::Hadamard { target: QubitId(0) });
        assert_eq!(circuit.query_count(), 0);
        Ok(())
    }

    #[test]
    fn first_half_uses_control_on_first_wire() -> Result<(), DjError> {
        let oracle = build_balanced(3, BalancedPattern::FirstHalf)?;
        assert_eq!(linear_form(&oracle), Some((0b100, false)));
        let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Gates)?;
        assert!(circuit.operations().contains(&Operation::Cnot {
            control: QubitId(0),
            target: QubitId(3),
        }));
        Ok(())
    }

    #[test]
    fn constant_one_is_linear_with_offset() -> Result<(), DjError> {
        let oracle = build_oracle(2, OracleKind::Const1)?;
        assert_eq!(linear_form(&oracle), Some((0, true)));
        Ok(())
    }

    #[test]
    fn random_partition_falls_back_to_block() -> Result<(), DjError> {
        let oracle = Oracle::from_truth_table(2, vec![false, false, true, true])?;
        assert!(linear_form(&oracle).is_some());
        let oracle = Oracle::from_truth_table(3, vec![true, true, false, false, true, false, true, false])?;
        assert_eq!(linear_form(&oracle), None);
        let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Gates)?;
        assert_eq!(circuit.query_count(), 1);
        Ok(())
    }

    #[test]
    fn display_lists_every_wire() -> Result<(), DjError> {
        let oracle = build_oracle(2, OracleKind::Const0)?;
        let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Block)?;
        let text = circuit.to_string();
        assert!(text.starts_with("Circuit[8 operations on 3 qubits]"));
        assert!(text.contains("q[0]: "));
        assert!(text.contains("q[2]: "));
        assert!(text.contains("[Uf]"));
        Ok(())
    }
}
