//! Error types for the Pauli crate.

use expval_ir::QubitId;
use thiserror::Error;

/// Errors produced when building or transforming Pauli strings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PauliError {
    /// Qubit substitution received the wrong number of replacement qubits.
    #[error("Expected {expected} replacement qubits, got {got}")]
    CardinalityMismatch {
        /// Number of qubits in the original string.
        expected: usize,
        /// Number of replacement qubits supplied.
        got: usize,
    },

    /// The same qubit appears twice where qubits must be unique.
    #[error("Qubit {0} appears more than once")]
    DuplicateQubit(QubitId),

    /// Text could not be parsed as a Pauli or Pauli string.
    #[error("Cannot parse '{input}': {reason}")]
    Parse {
        /// The offending input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type for Pauli operations.
pub type PauliResult<T> = Result<T, PauliError>;
