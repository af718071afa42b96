// src/classify/mod.rs

//! Turns an interference pattern into the constant/balanced verdict.

use crate::core::{Classification, StateVector, CLASSIFY_THRESHOLD};
use log::debug;
use std::collections::BTreeMap;

/// CONSTANT iff |amplitude[0]|^2 exceeds `CLASSIFY_THRESHOLD`.
///
/// Honest oracles put exactly 1 or exactly 0 on the all-zero state, so the
/// threshold only has to absorb rounding.
pub fn classify(state: &StateVector) -> Classification {
    classify_probability(state.zero_state_probability())
}

/// Same rule applied to an already computed all-zero probability.
pub fn classify_probability(zero_probability: f64) -> Classification {
    if zero_probability > CLASSIFY_THRESHOLD {
        Classification::Constant
    } else {
        Classification::Balanced
    }
}

/// Majority vote over sampled shots: CONSTANT iff the all-zero outcome was
/// seen in strictly more than half of them. No shots means BALANCED.
pub fn classify_counts(counts: &BTreeMap<usize, u64>, shots: u64) -> Classification {
    let zeros = counts.get(&0).copied().unwrap_or(0);
    debug!("all-zero outcome in {} of {} shots", zeros, shots);
    if shots > 0 && zeros * 2 > shots {
        Classification::Constant
    } else {
        Classification::Balanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn amplitude_threshold() {
        let constant = StateVector::new(vec![Complex::new(-1.0, 0.0), Complex::new(0.0, 0.0)]);
        let balanced = StateVector::new(vec![Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)]);
        assert_eq!(classify(&constant), Classification::Constant);
        assert_eq!(classify(&balanced), Classification::Balanced);
        assert_eq!(classify_probability(0.5), Classification::Balanced);
        assert_eq!(classify_probability(0.5 + 1e-6), Classification::Constant);
    }

    #[test]
    fn majority_vote_over_shots() {
        let mut counts = BTreeMap::new();
        counts.insert(0, 600);
        counts.insert(3, 400);
        assert_eq!(classify_counts(&counts, 1000), Classification::Constant);
        counts.insert(0, 500);
        counts.insert(3, 500);
        assert_eq!(classify_counts(&counts, 1000), Classification::Balanced);
        assert_eq!(classify_counts(&BTreeMap::new(), 0), Classification::Balanced);
    }
}
