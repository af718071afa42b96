// src/validation/mod.rs

//! Checks on computed state vectors.

use crate::core::{DjError, StateVector, NORM_TOLERANCE};
use crate::oracle::Oracle;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to `NORM_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(DjError::Incoherence)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), DjError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(DjError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks the interference pattern against the oracle's truth table:
/// |a0|^2 must be 1 for a constant oracle and 0 for a balanced one.
pub fn check_zero_amplitude(state: &StateVector, oracle: &Oracle, tolerance: Option<f64>) -> Result<(), DjError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let p0 = state.zero_state_probability();
    let expected = if oracle.is_constant() { 1.0 } else { 0.0 };
    if (p0 - expected).abs() > effective_tolerance {
        return Err(DjError::Incoherence {
            message: format!(
                "|a0|^2 = {} for '{}', expected {} (Deviation > {})",
                p0,
                oracle.label(),
                expected,
                effective_tolerance
            ),
        });
    }
    Ok(())
}

/// Runs every check with default tolerances.
pub fn validate_state(state: &StateVector, oracle: &Oracle) -> Result<(), DjError> {
    check_normalization(state, None)?;
    check_zero_amplitude(state, oracle, None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{build_oracle, OracleKind};
    use num_complex::Complex;

    #[test]
    fn unnormalized_vector_is_rejected() {
        let state = StateVector::new(vec![Complex::new(0.5, 0.0), Complex::new(0.5, 0.0)]);
        assert!(matches!(
            check_normalization(&state, None),
            Err(DjError::Incoherence { .. })
        ));
        assert!(check_normalization(&state, Some(0.6)).is_ok());
    }

    #[test]
    fn zero_amplitude_must_match_oracle() -> Result<(), DjError> {
        let oracle = build_oracle(1, OracleKind::Balanced)?;
        let constant_like = StateVector::new(vec![Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)]);
        assert!(check_zero_amplitude(&constant_like, &oracle, None).is_err());
        let balanced_like = StateVector::new(vec![Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)]);
        validate_state(&balanced_like, &oracle)?;
        Ok(())
    }
}
