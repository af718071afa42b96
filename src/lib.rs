// src/lib.rs

//! `deutsch_jozsa` - A small state-vector demonstration of the Deutsch-Jozsa algorithm
//!
//! Builds constant and balanced oracles, runs them through the
//! H - U_f - H circuit (literally, or via the closed-form Walsh-Hadamard
//! transform), decides constant vs balanced from the all-zero amplitude and
//! reports the result next to the classical query count.

pub mod core;
pub mod oracle;
pub mod operations;
pub mod circuits;
pub mod transform;
pub mod simulation;
pub mod classify;
pub mod validation;
pub mod report;
pub mod runner;

// Re-export the most common types for easier top-level use
pub use crate::core::{Classification, DjError, QubitId, StateVector};
pub use oracle::{build_balanced, build_oracle, BalancedPattern, Oracle, OracleKind};
pub use operations::Operation;
pub use circuits::{deutsch_jozsa_circuit, Circuit, CircuitBuilder, OracleStyle};
pub use transform::evaluate;
pub use simulation::{SimulationResult, Simulator};
pub use classify::{classify, classify_counts};
pub use validation::{check_normalization, check_zero_amplitude, validate_state};
pub use report::{QueryComparison, Report, Summary};
pub use runner::{run_all, run_case, Mode, OracleCase, RunConfig};

// Example 1: Closed-form evaluation
// A constant oracle concentrates all amplitude on |0...0>.
/// ```
/// use deutsch_jozsa::{build_oracle, classify, evaluate, Classification, OracleKind, DjError};
///
/// fn main() -> Result<(), DjError> {
///     let oracle = build_oracle(3, OracleKind::Const1)?;
///     let state = evaluate(3, &oracle)?;
///
///     // f(x) = 1 everywhere: the global phase is -1 but |a0|^2 is still 1.
///     assert!((state.zero_state_probability() - 1.0).abs() < 1e-9);
///     assert_eq!(classify(&state), Classification::Constant);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Literal circuit simulation
// The parity oracle is compiled to one CNOT per input and sends every shot to |11>.
/// ```
/// use deutsch_jozsa::{build_oracle, classify_counts, deutsch_jozsa_circuit};
/// use deutsch_jozsa::{Classification, OracleKind, OracleStyle, Simulator, DjError};
///
/// fn main() -> Result<(), DjError> {
///     let oracle = build_oracle(2, OracleKind::Balanced)?;
///     let circuit = deutsch_jozsa_circuit(&oracle, OracleStyle::Gates)?;
///     println!("{}", circuit);
///
///     let result = Simulator::new().with_shots(100).with_seed(1).run(&circuit)?;
///     assert_eq!(result.counts().get(&0b11), Some(&100));
///     assert_eq!(classify_counts(result.counts(), result.shots()), Classification::Balanced);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = ();
