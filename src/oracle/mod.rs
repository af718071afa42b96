// src/oracle/mod.rs

//! Builds the black-box boolean functions queried by the Deutsch-Jozsa
//! algorithm.
//!
//! An [`Oracle`] is stored as a truth table over all 2^n inputs. Every
//! constructor enforces the Deutsch-Jozsa promise: the function is either
//! constant or balanced. Balanced oracles are not restricted to parity; any
//! 50/50 partition of the inputs is accepted.

use crate::core::{bitstring, Classification, DjError, MAX_INPUT_QUBITS};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;

/// The oracle families selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OracleKind {
    /// f(x) = 0 for all x.
    Const0,
    /// f(x) = 1 for all x.
    Const1,
    /// f(x) = 1 for exactly half of the inputs.
    Balanced,
}

impl OracleKind {
    /// The answer Deutsch-Jozsa should produce for this family.
    pub fn expected(&self) -> Classification {
        match self {
            OracleKind::Const0 | OracleKind::Const1 => Classification::Constant,
            OracleKind::Balanced => Classification::Balanced,
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKind::Const0 => write!(f, "CONST0"),
            OracleKind::Const1 => write!(f, "CONST1"),
            OracleKind::Balanced => write!(f, "BALANCED"),
        }
    }
}

impl FromStr for OracleKind {
    type Err = DjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "const0" | "constant0" | "zero" => Ok(OracleKind::Const0),
            "const1" | "constant1" | "one" => Ok(OracleKind::Const1),
            "balanced" => Ok(OracleKind::Balanced),
            other => Err(DjError::invalid(format!(
                "unrecognized oracle kind '{}' (expected const0, const1 or balanced)",
                other
            ))),
        }
    }
}

/// How a balanced oracle partitions its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BalancedPattern {
    /// XOR of every input bit. One CNOT per input qubit onto the ancilla.
    #[default]
    Parity,
    /// The most significant input bit, i.e. a single CNOT from q[0].
    FirstHalf,
    /// Parity of `x AND mask`. The mask must be non-zero and fit in n bits.
    Mask(usize),
    /// A uniformly random balanced partition drawn from a seeded PRNG.
    Random {
        /// PRNG seed, so the same seed always yields the same table.
        seed: u64,
    },
}

/// An immutable boolean function f: {0,1}^n -> {0,1}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oracle {
    num_inputs: usize,
    /// `table[x]` is f(x), with x read most significant bit first.
    table: Vec<bool>,
    label: String,
}

/// Checks `n` against the supported range and returns 2^n.
pub(crate) fn input_dimension(num_inputs: usize) -> Result<usize, DjError> {
    if num_inputs < 1 {
        return Err(DjError::invalid(format!(
            "number of input qubits must be at least 1, got {}",
            num_inputs
        )));
    }
    if num_inputs > MAX_INPUT_QUBITS {
        return Err(DjError::invalid(format!(
            "number of input qubits {} exceeds the supported maximum of {}",
            num_inputs, MAX_INPUT_QUBITS
        )));
    }
    Ok(1usize << num_inputs)
}

/// Builds an oracle of the requested family on `num_inputs` bits.
///
/// Balanced oracles use the parity pattern; see [`build_balanced`] for the
/// other partitions.
///
/// # Errors
/// `DjError::InvalidArgument` if `num_inputs` is zero or above
/// [`MAX_INPUT_QUBITS`].
pub fn build_oracle(num_inputs: usize, kind: OracleKind) -> Result<Oracle, DjError> {
    match kind {
        OracleKind::Const0 => Oracle::constant(num_inputs, false),
        OracleKind::Const1 => Oracle::constant(num_inputs, true),
        OracleKind::Balanced => build_balanced(num_inputs, BalancedPattern::Parity),
    }
}

/// Builds a balanced oracle using the given partition.
pub fn build_balanced(num_inputs: usize, pattern: BalancedPattern) -> Result<Oracle, DjError> {
    let dim = input_dimension(num_inputs)?;
    let (table, label) = match pattern {
        BalancedPattern::Parity => (
            (0..dim).map(|x| x.count_ones() % 2 == 1).collect(),
            "Balanced (Parity)".to_string(),
        ),
        BalancedPattern::FirstHalf => {
            let msb = 1usize << (num_inputs - 1);
            (
                (0..dim).map(|x| x & msb != 0).collect(),
                "Balanced (First Half)".to_string(),
            )
        }
        BalancedPattern::Mask(mask) => {
            if mask == 0 || mask >= dim {
                return Err(DjError::invalid(format!(
                    "mask {} must be non-zero and below 2^{} = {}",
                    mask, num_inputs, dim
                )));
            }
            (
                (0..dim).map(|x| (x & mask).count_ones() % 2 == 1).collect(),
                format!("Balanced (Mask {})", bitstring(mask, num_inputs)),
            )
        }
        BalancedPattern::Random { seed } => (
            random_balanced_table(dim, seed),
            format!("Balanced (Random, seed {})", seed),
        ),
    };
    debug!("built {} on {} inputs", label, num_inputs);
    Ok(Oracle { num_inputs, table, label })
}

/// The dim/2 indices picked by a seeded partial shuffle become the ones.
fn random_balanced_table(dim: usize, seed: u64) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..dim).collect();
    let (ones, _) = indices.partial_shuffle(&mut rng, dim / 2);
    let mut table = vec![false; dim];
    for &x in ones.iter() {
        table[x] = true;
    }
    table
}

impl Oracle {
    /// A constant oracle returning `value` for every input.
    pub fn constant(num_inputs: usize, value: bool) -> Result<Self, DjError> {
        let dim = input_dimension(num_inputs)?;
        let label = format!("Constant (f(x) = {})", u8::from(value));
        debug!("built {} on {} inputs", label, num_inputs);
        Ok(Self { num_inputs, table: vec![value; dim], label })
    }

    /// Wraps an explicit truth table, `table[x] = f(x)`.
    ///
    /// # Errors
    /// `DjError::InvalidArgument` if the table length is not 2^n or the
    /// function is neither constant nor balanced.
    pub fn from_truth_table(num_inputs: usize, table: Vec<bool>) -> Result<Self, DjError> {
        let dim = input_dimension(num_inputs)?;
        if table.len() != dim {
            return Err(DjError::invalid(format!(
                "truth table has {} entries, expected 2^{} = {}",
                table.len(),
                num_inputs,
                dim
            )));
        }
        let ones = table.iter().filter(|&&b| b).count();
        let label = if ones == 0 || ones == dim {
            format!("Constant (f(x) = {})", u8::from(ones == dim))
        } else if ones == dim / 2 {
            "Balanced (Truth Table)".to_string()
        } else {
            return Err(DjError::invalid(format!(
                "truth table maps {} of {} inputs to 1; the function must be constant or balanced",
                ones, dim
            )));
        };
        Ok(Self { num_inputs, table, label })
    }

    /// Replaces the human-readable label shown in reports.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// f(x). Inputs outside 0..2^n are a caller error and evaluate to `false`.
    pub fn evaluate(&self, x: usize) -> bool {
        self.table.get(x).copied().unwrap_or(false)
    }

    /// Number of input bits n.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// The raw truth table.
    pub fn truth_table(&self) -> &[bool] {
        &self.table
    }

    /// How many inputs map to 1.
    pub fn ones(&self) -> usize {
        self.table.iter().filter(|&&b| b).count()
    }

    pub fn is_constant(&self) -> bool {
        let ones = self.ones();
        ones == 0 || ones == self.table.len()
    }

    pub fn is_balanced(&self) -> bool {
        self.ones() * 2 == self.table.len()
    }

    /// The family this oracle belongs to, derived from its table.
    pub fn kind(&self) -> OracleKind {
        match self.ones() {
            0 => OracleKind::Const0,
            n if n == self.table.len() => OracleKind::Const1,
            _ => OracleKind::Balanced,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} input bits", self.label, self.num_inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_oracles_cover_every_input() -> Result<(), DjError> {
        for n in 1..=6 {
            let zero = build_oracle(n, OracleKind::Const0)?;
            let one = build_oracle(n, OracleKind::Const1)?;
            assert_eq!(zero.truth_table().len(), 1 << n);
            assert_eq!(zero.ones(), 0);
            assert_eq!(one.ones(), 1 << n);
            assert_eq!(zero.kind(), OracleKind::Const0);
            assert_eq!(one.kind(), OracleKind::Const1);
        }
        Ok(())
    }

    #[test]
    fn balanced_patterns_split_inputs_in_half() -> Result<(), DjError> {
        for n in 1..=8 {
            let mut patterns = vec![
                BalancedPattern::Parity,
                BalancedPattern::FirstHalf,
                BalancedPattern::Mask(1),
                BalancedPattern::Random { seed: 42 },
            ];
            if n > 1 {
                patterns.push(BalancedPattern::Mask((1 << n) - 1));
            }
            for pattern in patterns {
                let oracle = build_balanced(n, pattern)?;
                assert_eq!(oracle.ones(), 1 << (n - 1), "{:?} on n={}", pattern, n);
                assert!(oracle.is_balanced());
                assert!(!oracle.is_constant());
            }
        }
        Ok(())
    }

    #[test]
    fn one_bit_balanced_is_identity() -> Result<(), DjError> {
        let oracle = build_oracle(1, OracleKind::Balanced)?;
        assert!(!oracle.evaluate(0));
        assert!(oracle.evaluate(1));
        Ok(())
    }

    #[test]
    fn first_half_reads_most_significant_bit() -> Result<(), DjError> {
        let oracle = build_balanced(3, BalancedPattern::FirstHalf)?;
        assert!(!oracle.evaluate(0b011));
        assert!(oracle.evaluate(0b100));
        Ok(())
    }

    #[test]
    fn random_pattern_is_reproducible() -> Result<(), DjError> {
        let a = build_balanced(5, BalancedPattern::Random { seed: 7 })?;
        let b = build_balanced(5, BalancedPattern::Random { seed: 7 })?;
        assert_eq!(a, b);
        assert_eq!(a.ones(), 16);
        Ok(())
    }

    #[test]
    fn random_pattern_covers_every_input() -> Result<(), DjError> {
        // Across seeds every input must land among the ones at least once,
        // and no single input should be picked every time.
        let n = 3;
        let mut hits = [0u32; 8];
        for seed in 0..400 {
            let oracle = build_balanced(n, BalancedPattern::Random { seed })?;
            assert!(oracle.is_balanced());
            for (x, hit) in hits.iter_mut().enumerate() {
                if oracle.evaluate(x) {
                    *hit += 1;
                }
            }
        }
        for (x, &hit) in hits.iter().enumerate() {
            assert!(hit > 120 && hit < 280, "input {} picked {} times", x, hit);
        }
        Ok(())
    }

    #[test]
    fn rejects_zero_and_oversized_inputs() {
        assert!(matches!(
            build_oracle(0, OracleKind::Const0),
            Err(DjError::InvalidArgument { .. })
        ));
        assert!(matches!(
            build_oracle(MAX_INPUT_QUBITS + 1, OracleKind::Balanced),
            Err(DjError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_bad_masks() {
        assert!(build_balanced(3, BalancedPattern::Mask(0)).is_err());
        assert!(build_balanced(3, BalancedPattern::Mask(8)).is_err());
    }

    #[test]
    fn truth_table_must_honor_promise() {
        assert!(Oracle::from_truth_table(2, vec![true, false, false, true]).is_ok());
        assert!(Oracle::from_truth_table(2, vec![true, true, true, true]).is_ok());
        assert!(Oracle::from_truth_table(2, vec![true, false, false, false]).is_err());
        assert!(Oracle::from_truth_table(2, vec![true, false]).is_err());
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("CONST0".parse::<OracleKind>(), Ok(OracleKind::Const0));
        assert_eq!("const1".parse::<OracleKind>(), Ok(OracleKind::Const1));
        assert_eq!(" Balanced ".parse::<OracleKind>(), Ok(OracleKind::Balanced));
        assert!(matches!(
            "sometimes".parse::<OracleKind>(),
            Err(DjError::InvalidArgument { .. })
        ));
    }
}
