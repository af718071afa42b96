// src/report/mod.rs

//! Text reporting: probability tables, an ASCII bar plot, the verdict and
//! the quantum/classical query comparison.

use crate::circuits::Circuit;
use crate::core::{bitstring, Classification, StateVector, AMPLITUDE_TOLERANCE, QUANTUM_QUERIES};
use crate::oracle::Oracle;
use std::collections::BTreeMap;
use std::fmt;

const RULE_WIDTH: usize = 70;
const BAR_WIDTH: usize = 40;
/// Plots beyond this many basis states are truncated to the top entries.
const MAX_PLOT_ROWS: usize = 32;

/// Oracle queries needed by each approach to decide constant vs balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryComparison {
    pub quantum: u64,
    /// A deterministic classical algorithm may see 2^(n-1) equal answers
    /// before the next query settles it.
    pub classical_worst_case: u64,
}

impl QueryComparison {
    pub fn for_inputs(num_inputs: usize) -> Self {
        let classical_worst_case = match num_inputs {
            0 => 1,
            n => (1u64 << (n - 1)) + 1,
        };
        Self { quantum: QUANTUM_QUERIES, classical_worst_case }
    }

    pub fn speedup(&self) -> f64 {
        self.classical_worst_case as f64 / self.quantum as f64
    }
}

/// The `k` most likely outcomes, ties broken by basis index, zeros omitted.
pub fn top_outcomes(probabilities: &[f64], k: usize) -> Vec<(usize, f64)> {
    let mut entries: Vec<(usize, f64)> = probabilities
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| *p > AMPLITUDE_TOLERANCE)
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    entries.truncate(k);
    entries
}

/// Everything printed for one (n, oracle) case.
#[derive(Debug, Clone)]
pub struct Report {
    num_inputs: usize,
    oracle_label: String,
    expected: Classification,
    state: StateVector,
    classification: Classification,
    circuit: Option<String>,
    quantum_queries: u64,
    counts: BTreeMap<usize, u64>,
    shots: u64,
    top_k: usize,
    plot: bool,
}

impl Report {
    pub fn new(num_inputs: usize, oracle: &Oracle, state: &StateVector, classification: Classification) -> Self {
        let expected = if oracle.is_constant() {
            Classification::Constant
        } else {
            Classification::Balanced
        };
        Self {
            num_inputs,
            oracle_label: oracle.label().to_string(),
            expected,
            state: state.clone(),
            classification,
            circuit: None,
            quantum_queries: QUANTUM_QUERIES,
            counts: BTreeMap::new(),
            shots: 0,
            top_k: 5,
            plot: true,
        }
    }

    /// Includes the circuit diagram and takes the quantum query count from it.
    pub fn with_circuit(mut self, circuit: &Circuit) -> Self {
        self.circuit = Some(circuit.to_string());
        self.quantum_queries = circuit.query_count() as u64;
        self
    }

    /// Includes sampled counts; the plot then shows frequencies.
    pub fn with_counts(mut self, counts: &BTreeMap<usize, u64>, shots: u64) -> Self {
        self.counts = counts.clone();
        self.shots = shots;
        self
    }

    pub fn with_top(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn expected(&self) -> Classification {
        self.expected
    }

    pub fn is_correct(&self) -> bool {
        self.classification == self.expected
    }

    pub fn oracle_label(&self) -> &str {
        &self.oracle_label
    }

    pub fn queries(&self) -> QueryComparison {
        QueryComparison {
            quantum: self.quantum_queries,
            ..QueryComparison::for_inputs(self.num_inputs)
        }
    }

    /// Sampled frequencies when shots were taken, exact probabilities otherwise.
    fn plotted_distribution(&self) -> Vec<f64> {
        if self.shots == 0 {
            return self.state.probabilities();
        }
        let mut freq = vec![0.0; self.state.dim()];
        for (&k, &c) in &self.counts {
            if let Some(slot) = freq.get_mut(k) {
                *slot = c as f64 / self.shots as f64;
            }
        }
        freq
    }

    fn write_plot(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dist = self.plotted_distribution();
        let rows: Vec<usize> = if dist.len() <= MAX_PLOT_ROWS {
            (0..dist.len()).collect()
        } else {
            let mut rows: Vec<usize> = top_outcomes(&dist, MAX_PLOT_ROWS - 1).into_iter().map(|(k, _)| k).collect();
            if !rows.contains(&0) {
                rows.push(0);
            }
            rows.sort_unstable();
            rows
        };
        let shown = rows.len();
        let source = if self.shots > 0 { "sampled" } else { "exact" };
        writeln!(f, "Probability plot ({}):", source)?;
        for k in rows {
            let p = dist[k];
            let filled = (p * BAR_WIDTH as f64).round() as usize;
            let bar_char = if k == 0 { '#' } else { '=' };
            write!(
                f,
                "  |{}⟩ |{}{}| {:.4}",
                bitstring(k, self.num_inputs),
                bar_char.to_string().repeat(filled.min(BAR_WIDTH)),
                " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                p
            )?;
            if k == 0 {
                write!(f, "  <- |0⟩^n")?;
            }
            writeln!(f)?;
        }
        if dist.len() > MAX_PLOT_ROWS {
            writeln!(f, "  ({} of {} basis states shown)", shown, dist.len())?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "Testing: {}", self.oracle_label)?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Circuit size: {} input qubits + 1 ancilla, {} basis states",
            self.num_inputs,
            self.state.dim()
        )?;
        if let Some(circuit) = &self.circuit {
            writeln!(f)?;
            write!(f, "{}", circuit)?;
        }
        writeln!(f)?;

        writeln!(f, "Quantum algorithm result: {}", self.classification)?;
        writeln!(f, "Expected: {}", self.expected)?;
        writeln!(f, "Correct: {}", if self.is_correct() { "✓" } else { "✗" })?;
        writeln!(f)?;

        writeln!(f, "Measurement probabilities (top {}):", self.top_k)?;
        for (k, p) in top_outcomes(&self.state.probabilities(), self.top_k) {
            writeln!(f, "  |{}⟩: {:.4}", bitstring(k, self.num_inputs), p)?;
        }
        if self.shots > 0 {
            writeln!(f, "Sampled frequencies ({} shots, top {}):", self.shots, self.top_k)?;
            for (k, p) in top_outcomes(&self.plotted_distribution(), self.top_k) {
                writeln!(f, "  |{}⟩: {:.4}", bitstring(k, self.num_inputs), p)?;
            }
        }
        writeln!(f)?;

        if self.plot {
            self.write_plot(f)?;
            writeln!(f)?;
        }

        let queries = self.queries();
        writeln!(f, "Classical queries needed (worst case): {}", queries.classical_worst_case)?;
        writeln!(f, "Quantum queries needed: {}", queries.quantum)?;
        writeln!(f, "Speedup: {}x", queries.speedup())
    }
}

/// Tally over every case in a run.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    outcomes: Vec<(String, bool)>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &Report) {
        self.outcomes.push((report.oracle_label().to_string(), report.is_correct()));
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn correct(&self) -> usize {
        self.outcomes.iter().filter(|(_, ok)| *ok).count()
    }

    pub fn all_correct(&self) -> bool {
        self.correct() == self.total()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Total test cases: {}", self.total())?;
        writeln!(f, "  Correctly identified: {}/{}", self.correct(), self.total())?;
        for (label, ok) in &self.outcomes {
            writeln!(f, "    {} {}", if *ok { "✓" } else { "✗" }, label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::{deutsch_jozsa_circuit, OracleStyle};
    use crate::classify::classify;
    use crate::core::DjError;
    use crate::oracle::{build_oracle, OracleKind};
    use crate::transform::evaluate;

    #[test]
    fn classical_worst_case_counts() {
        assert_eq!(QueryComparison::for_inputs(1).classical_worst_case, 2);
        assert_eq!(QueryComparison::for_inputs(2).classical_worst_case, 3);
        assert_eq!(QueryComparison::for_inputs(3).classical_worst_case, 5);
        assert_eq!(QueryComparison::for_inputs(3).quantum, 1);
        assert_eq!(QueryComparison::for_inputs(10).speedup(), 513.0);
    }

    #[test]
    fn top_outcomes_orders_by_probability_then_index() {
        let probs = [0.1, 0.4, 0.0, 0.4, 0.1];
        assert_eq!(top_outcomes(&probs, 3), vec![(1, 0.4), (3, 0.4), (0, 0.1)]);
        assert_eq!(top_outcomes(&probs, 10).len(), 4);
    }

    #[test]
    fn report_for_constant_one() -> Result<(), DjError> {
        let oracle = build_oracle(3, OracleKind::Const1)?;
        let state = evaluate(3, &oracle)?;
        let report = Report::new(3, &oracle, &state, classify(&state));
        let text = report.to_string();
        assert!(report.is_correct());
        assert!(text.contains("Testing: Constant (f(x) = 1)"));
        assert!(text.contains("Quantum algorithm result: CONSTANT"));
        assert!(text.contains("|000⟩: 1.0000"));
        assert!(text.contains("Classical queries needed (worst case): 5"));
        assert!(text.contains("Quantum queries needed: 1"));
        assert!(text.contains("<- |0⟩^n"));
        Ok(())
    }

    #[test]
    fn quantum_queries_come_from_the_circuit() -> Result<(), DjError> {
        let oracle = build_oracle(3, OracleKind::Balanced)?;
        let state = evaluate(3, &oracle)?;
        let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Gates)?;
        let report = Report::new(3, &oracle, &state, classify(&state)).with_circuit(&circuit);
        assert_eq!(report.queries().quantum, 1);
        assert!(report.to_string().contains("Quantum queries needed: 1"));

        let mut twice = deutsch_jozsa_circuit(&oracle, OracleStyle::Block)?;
        twice.add_compiled_query(Vec::new());
        let report = Report::new(3, &oracle, &state, classify(&state)).with_circuit(&twice);
        assert_eq!(report.queries().quantum, 2);
        assert_eq!(report.queries().classical_worst_case, 5);
        Ok(())
    }

    #[test]
    fn summary_counts_correct_cases() -> Result<(), DjError> {
        let mut summary = Summary::new();
        for kind in [OracleKind::Const0, OracleKind::Balanced] {
            let oracle = build_oracle(2, kind)?;
            let state = evaluate(2, &oracle)?;
            summary.record(&Report::new(2, &oracle, &state, classify(&state)));
        }
        assert_eq!(summary.total(), 2);
        assert!(summary.all_correct());
        assert!(summary.to_string().contains("Correctly identified: 2/2"));
        Ok(())
    }
}
