// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// Amplitudes over the 2^n computational basis states of the input register.
///
/// Produced once per run by either the analytic transform or the literal
/// simulation and never mutated by callers afterwards. Index `k` holds the
/// amplitude of the bitstring `k` written most significant bit first.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Wraps a raw amplitude vector. Normalization is checked by
    /// `validation::check_normalization`, not here.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Number of basis states represented (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector spans, i.e. log2 of the dimension.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Amplitude of basis state `k`, if in range.
    pub fn amplitude(&self, k: usize) -> Option<Complex<f64>> {
        self.amplitudes.get(k).copied()
    }

    /// |amplitude[k]|^2, or 0.0 when `k` is out of range.
    pub fn probability(&self, k: usize) -> f64 {
        self.amplitudes.get(k).map_or(0.0, |c| c.norm_sqr())
    }

    /// Probability of measuring every input qubit as 0.
    pub fn zero_state_probability(&self) -> f64 {
        self.probability(0)
    }

    /// The full measurement distribution, indexed like the amplitudes.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Σ|a_k|^2.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// Outcome of the Deutsch-Jozsa decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The oracle returns the same value for every input.
    Constant,
    /// The oracle returns 1 for exactly half of the inputs.
    Balanced,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Constant => write!(f, "CONSTANT"),
            Classification::Balanced => write!(f, "BALANCED"),
        }
    }
}

/// Formats basis index `k` as an `n`-character bitstring, most significant bit first.
pub fn bitstring(k: usize, n: usize) -> String {
    if n == 0 {
        return String::new();
    }
    format!("{:0width$b}", k, width = n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitstring_pads_to_width() {
        assert_eq!(bitstring(5, 3), "101");
        assert_eq!(bitstring(1, 4), "0001");
        assert_eq!(bitstring(0, 1), "0");
    }

    #[test]
    fn probabilities_and_dimension() {
        let s = StateVector::new(vec![
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(-1.0, 0.0),
        ]);
        assert_eq!(s.dim(), 4);
        assert_eq!(s.num_qubits(), 2);
        assert_eq!(s.zero_state_probability(), 0.0);
        assert_eq!(s.probability(3), 1.0);
        assert_eq!(s.probability(9), 0.0);
        assert!((s.norm_sqr() - 1.0).abs() < 1e-12);
    }
}
