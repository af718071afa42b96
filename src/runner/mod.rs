// src/runner/mod.rs

//! End-to-end pipeline: oracle -> circuit -> evaluation -> verdict -> report.

use crate::circuits::{deutsch_jozsa_circuit, OracleStyle};
use crate::classify::{classify, classify_counts};
use crate::core::{DjError, StateVector};
use crate::oracle::{build_balanced, build_oracle, input_dimension, BalancedPattern, Oracle, OracleKind};
use crate::report::{Report, Summary};
use crate::simulation::Simulator;
use crate::transform::evaluate;
use crate::validation::check_normalization;
use log::info;

/// How the final amplitudes are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Walsh-Hadamard closed form on the input register only.
    Analytic,
    /// Gate-by-gate state-vector simulation including the ancilla.
    #[default]
    Simulate,
}

/// One oracle to test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleCase {
    pub kind: OracleKind,
    /// Only consulted for `OracleKind::Balanced`.
    pub pattern: BalancedPattern,
}

impl OracleCase {
    pub fn new(kind: OracleKind) -> Self {
        Self { kind, pattern: BalancedPattern::default() }
    }

    pub fn balanced(pattern: BalancedPattern) -> Self {
        Self { kind: OracleKind::Balanced, pattern }
    }

    pub fn build(&self, num_inputs: usize) -> Result<Oracle, DjError> {
        match self.kind {
            OracleKind::Balanced => build_balanced(num_inputs, self.pattern),
            kind => build_oracle(num_inputs, kind),
        }
    }
}

/// The four cases demonstrated by default: both constants, parity and first-half.
pub fn default_cases() -> Vec<OracleCase> {
    vec![
        OracleCase::new(OracleKind::Const0),
        OracleCase::new(OracleKind::Const1),
        OracleCase::balanced(BalancedPattern::Parity),
        OracleCase::balanced(BalancedPattern::FirstHalf),
    ]
}

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub num_inputs: usize,
    pub cases: Vec<OracleCase>,
    pub mode: Mode,
    /// 0 means exact probabilities only.
    pub shots: u64,
    pub seed: Option<u64>,
    pub top_k: usize,
    pub plot: bool,
    pub diagram: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_inputs: 3,
            cases: default_cases(),
            mode: Mode::default(),
            shots: 1000,
            seed: None,
            top_k: 5,
            plot: true,
            diagram: true,
        }
    }
}

impl RunConfig {
    /// Rejects settings the pipeline cannot honour before any work starts.
    pub fn validate(&self) -> Result<(), DjError> {
        input_dimension(self.num_inputs)?;
        if self.cases.is_empty() {
            return Err(DjError::invalid("at least one oracle case must be configured"));
        }
        Ok(())
    }
}

/// Output of running one case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub oracle: Oracle,
    pub state: StateVector,
    pub report: Report,
}

/// Runs a single oracle through the configured pipeline.
pub fn run_case(config: &RunConfig, case: &OracleCase) -> Result<CaseOutcome, DjError> {
    let n = config.num_inputs;
    let oracle = case.build(n)?;
    let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Gates)?;
    info!("running '{}' on {} inputs ({:?})", oracle.label(), n, config.mode);

    let mut simulator = Simulator::new().with_shots(config.shots);
    if let Some(seed) = config.seed {
        simulator = simulator.with_seed(seed);
    }

    let (state, counts, shots) = match config.mode {
        Mode::Analytic => {
            let state = evaluate(n, &oracle)?;
            let sampled = simulator.sample_state(&state)?;
            (state, sampled.counts().clone(), sampled.shots())
        }
        Mode::Simulate => {
            let result = simulator.run(&circuit)?;
            let state = result.register_state().cloned().ok_or_else(|| DjError::SimulationError {
                message: "ancilla did not factor out of the final state".to_string(),
            })?;
            (state, result.counts().clone(), result.shots())
        }
    };
    check_normalization(&state, None)?;

    let classification = if shots > 0 {
        classify_counts(&counts, shots)
    } else {
        classify(&state)
    };

    let mut report = Report::new(n, &oracle, &state, classification)
        .with_top(config.top_k)
        .with_plot(config.plot);
    if config.diagram {
        report = report.with_circuit(&circuit);
    }
    if shots > 0 {
        report = report.with_counts(&counts, shots);
    }
    Ok(CaseOutcome { oracle, state, report })
}

/// Runs every configured case and tallies the verdicts.
pub fn run_all(config: &RunConfig) -> Result<(Vec<CaseOutcome>, Summary), DjError> {
    config.validate()?;
    let mut summary = Summary::new();
    let mut outcomes = Vec::with_capacity(config.cases.len());
    for case in &config.cases {
        let outcome = run_case(config, case)?;
        summary.record(&outcome.report);
        outcomes.push(outcome);
    }
    Ok((outcomes, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_identifies_every_case() -> Result<(), DjError> {
        let config = RunConfig { seed: Some(3), ..RunConfig::default() };
        let (outcomes, summary) = run_all(&config)?;
        assert_eq!(outcomes.len(), 4);
        assert!(summary.all_correct());
        Ok(())
    }

    #[test]
    fn analytic_and_simulated_modes_agree() -> Result<(), DjError> {
        for case in default_cases() {
            let analytic = RunConfig { mode: Mode::Analytic, shots: 0, ..RunConfig::default() };
            let simulated = RunConfig { mode: Mode::Simulate, shots: 0, ..RunConfig::default() };
            let a = run_case(&analytic, &case)?;
            let s = run_case(&simulated, &case)?;
            for (x, y) in a.state.vector().iter().zip(s.state.vector()) {
                assert!((x - y).norm() < 1e-9, "{:?}", case);
            }
        }
        Ok(())
    }

    #[test]
    fn invalid_qubit_count_is_rejected() {
        let config = RunConfig { num_inputs: 0, ..RunConfig::default() };
        assert!(matches!(run_all(&config), Err(DjError::InvalidArgument { .. })));
    }
}
