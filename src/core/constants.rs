//! Numeric constants shared by the oracle builder, evaluator and classifier.

/// Tolerances and limits used throughout the crate
pub mod dj_constants {
    /// Largest supported input register. The literal simulation holds
    /// 2^(n+1) complex amplitudes, so this keeps memory well below a gigabyte.
    pub const MAX_INPUT_QUBITS: usize = 24;
    /// |amplitude[0]|^2 above this value means the oracle is constant.
    pub const CLASSIFY_THRESHOLD: f64 = 0.5;
    /// Allowed deviation of Σ|a_k|^2 from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Amplitudes with |a|^2 below this are treated as zero when reporting.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
    /// Queries the quantum algorithm needs, independent of n.
    pub const QUANTUM_QUERIES: u64 = 1;
    /// Sampling seed used when none is configured.
    pub const DEFAULT_SAMPLING_SEED: u64 = 0x5eed_d1d0;
}
