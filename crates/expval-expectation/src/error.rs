//! Error types for expectation evaluation.

use expval_ir::{IrError, QubitId};
use expval_pauli::PauliError;
use expval_sim::SimError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced while building or evaluating expectation values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExpectationError {
    /// The statevector length is not `2^n` for the `n` indexed qubits.
    #[error(
        "Statevector has {got} amplitudes, expected {expected} for {num_qubits} indexed qubits"
    )]
    DimensionMismatch {
        /// Number of qubits in the index map.
        num_qubits: usize,
        /// Expected statevector length.
        expected: usize,
        /// Actual statevector length.
        got: usize,
    },

    /// A qubit of the Pauli string has no position in the index map.
    #[error("Qubit {0} has no position in the statevector")]
    QubitNotIndexed(QubitId),

    /// A qubit was mapped to a bit position past the end of the register.
    #[error("Qubit {qubit} mapped to position {index}, but only {num_qubits} qubits are indexed")]
    IndexOutOfRange {
        /// The qubit.
        qubit: QubitId,
        /// Its mapped position.
        index: usize,
        /// Number of indexed qubits.
        num_qubits: usize,
    },

    /// Two qubits share a bit position.
    #[error("Qubit {qubit} reuses bit position {index}")]
    DuplicateIndex {
        /// The second qubit mapped to `index`.
        qubit: QubitId,
        /// The shared position.
        index: usize,
    },

    /// Sample matrix columns do not line up with the Pauli string's qubits.
    #[error("Sample matrix has {got} columns, expected one per qubit ({expected})")]
    ShapeMismatch {
        /// Number of qubits in the Pauli string.
        expected: usize,
        /// Number of columns supplied.
        got: usize,
    },

    /// No sample rows were supplied.
    #[error("Sample matrix has no rows")]
    EmptySamples,

    /// A sample entry is not a classical bit.
    #[error("Sample entry at row {row}, column {column} is {value}, expected 0 or 1")]
    InvalidSample {
        /// Row index.
        row: usize,
        /// Column index.
        column: usize,
        /// The offending value.
        value: u8,
    },

    /// A sampled estimate needs at least one sample.
    #[error("num_samples must be at least 1")]
    ZeroSamples,

    /// The exact sum kept a non-negligible or non-finite imaginary part.
    #[error("Expectation value has imaginary part {imag:e} (tolerance {tolerance:e})")]
    ImaginaryResidue {
        /// Imaginary part of the sum.
        imag: f64,
        /// Scaled tolerance that was exceeded.
        tolerance: f64,
    },

    /// Pauli string error.
    #[error(transparent)]
    Pauli(#[from] PauliError),

    /// Circuit construction error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// Simulation or sampling error.
    #[error("Simulation error: {0}")]
    Sim(#[from] SimError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for expectation operations.
pub type ExpectationResult<T> = Result<T, ExpectationError>;
