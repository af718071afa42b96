// src/transform/mod.rs

//! Closed-form evaluation of the Deutsch-Jozsa circuit.
//!
//! After H⊗n, the phase oracle and H⊗n again, the input register holds
//!
//! ```text
//! a[k] = (1/2^n) Σ_x (-1)^f(x) (-1)^popcount(x AND k)
//! ```
//!
//! which is the normalized Walsh-Hadamard transform of g(x) = (-1)^f(x).
//! The ancilla stays in |-> throughout and drops out of the expression.

use crate::core::{DjError, StateVector};
use crate::oracle::{input_dimension, Oracle};
use log::debug;
use num_complex::Complex;

/// Computes the final input-register amplitudes for `oracle` on `num_inputs` bits.
///
/// Uses the in-place fast Walsh-Hadamard transform, O(n·2^n). Pure: the same
/// arguments always give the same vector.
///
/// # Errors
/// `DjError::InvalidArgument` if `num_inputs` is out of range or differs
/// from the oracle's own input count.
pub fn evaluate(num_inputs: usize, oracle: &Oracle) -> Result<StateVector, DjError> {
    let dim = input_dimension(num_inputs)?;
    if oracle.num_inputs() != num_inputs {
        return Err(DjError::invalid(format!(
            "oracle is defined on {} input bits but evaluation requested {}",
            oracle.num_inputs(),
            num_inputs
        )));
    }

    // Signs as exact integers so the butterflies accumulate without rounding.
    let mut signs: Vec<i64> = oracle
        .truth_table()
        .iter()
        .map(|&fx| if fx { -1 } else { 1 })
        .collect();
    walsh_hadamard_in_place(&mut signs);

    let scale = 1.0 / dim as f64;
    let amplitudes = signs
        .into_iter()
        .map(|s| Complex::new(s as f64 * scale, 0.0))
        .collect();
    let state = StateVector::new(amplitudes);
    debug!(
        "transform of '{}' on {} inputs: |a0|^2 = {}",
        oracle.label(),
        num_inputs,
        state.zero_state_probability()
    );
    Ok(state)
}

/// Unnormalized fast Walsh-Hadamard transform. `values.len()` must be a power of two.
pub fn walsh_hadamard_in_place(values: &mut [i64]) {
    let len = values.len();
    let mut half = 1;
    while half < len {
        for block in (0..len).step_by(half * 2) {
            for i in block..block + half {
                let a = values[i];
                let b = values[i + half];
                values[i] = a + b;
                values[i + half] = a - b;
            }
        }
        half *= 2;
    }
}

/// Straight O(4^n) evaluation of the defining sum, for cross-checking small cases.
pub fn evaluate_direct(num_inputs: usize, oracle: &Oracle) -> Result<StateVector, DjError> {
    let dim = input_dimension(num_inputs)?;
    if oracle.num_inputs() != num_inputs {
        return Err(DjError::invalid(format!(
            "oracle is defined on {} input bits but evaluation requested {}",
            oracle.num_inputs(),
            num_inputs
        )));
    }
    let scale = 1.0 / dim as f64;
    let amplitudes = (0..dim)
        .map(|k| {
            let sum: i64 = (0..dim)
                .map(|x| {
                    let parity = u32::from(oracle.evaluate(x)) + (x & k).count_ones();
                    if parity % 2 == 0 { 1 } else { -1 }
                })
                .sum();
            Complex::new(sum as f64 * scale, 0.0)
        })
        .collect();
    Ok(StateVector::new(amplitudes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{build_balanced, build_oracle, BalancedPattern, OracleKind};

    const TEST_TOLERANCE: f64 = 1e-9;

    #[test]
    fn fast_transform_matches_definition() -> Result<(), DjError> {
        for n in 1..=5 {
            for pattern in [
                BalancedPattern::Parity,
                BalancedPattern::FirstHalf,
                BalancedPattern::Random { seed: n as u64 },
            ] {
                let oracle = build_balanced(n, pattern)?;
                let fast = evaluate(n, &oracle)?;
                let slow = evaluate_direct(n, &oracle)?;
                for (a, b) in fast.vector().iter().zip(slow.vector()) {
                    assert!((a - b).norm() < TEST_TOLERANCE);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn transform_of_constant_sign_is_delta() {
        let mut v = vec![1i64; 8];
        walsh_hadamard_in_place(&mut v);
        assert_eq!(v, vec![8, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn constant_one_gives_negative_zero_amplitude() -> Result<(), DjError> {
        let oracle = build_oracle(3, OracleKind::Const1)?;
        let state = evaluate(3, &oracle)?;
        let a0 = state.amplitude(0).unwrap_or_default();
        assert!((a0.re + 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn rejects_mismatched_width() -> Result<(), DjError> {
        let oracle = build_oracle(3, OracleKind::Const0)?;
        assert!(matches!(evaluate(4, &oracle), Err(DjError::InvalidArgument { .. })));
        Ok(())
    }
}
