//! Error types for the sim crate.

use expval_ir::QubitId;
use thiserror::Error;

/// Errors produced while simulating or sampling circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A rotation angle is still symbolic.
    #[error("Gate '{gate_name}' has an unbound parameter")]
    UnboundParameter {
        /// Name of the gate.
        gate_name: String,
    },

    /// An instruction touches a qubit outside the simulated register.
    #[error("Qubit {0} is not part of the simulated register")]
    UnknownQubit(QubitId),

    /// A qubit was mapped to a bit position past the end of the state.
    #[error("Qubit {qubit} mapped to position {index}, but the state has {num_qubits} qubits")]
    QubitOutOfRange {
        /// The qubit.
        qubit: QubitId,
        /// The position it was mapped to.
        index: usize,
        /// Number of qubits in the state.
        num_qubits: usize,
    },

    /// Sampling assumes measurements are terminal on the measured qubits.
    #[error("Gate '{gate_name}' acts on {qubit} after it was measured")]
    GateAfterMeasurement {
        /// The measured qubit.
        qubit: QubitId,
        /// Name of the offending gate.
        gate_name: String,
    },

    /// A measurement appeared where only unitary operations are allowed.
    #[error("Circuit '{0}' contains measurements and has no unitary")]
    NotUnitary(String),

    /// At least one repetition is required.
    #[error("Number of repetitions must be at least 1")]
    ZeroRepetitions,

    /// The register is too large for dense simulation.
    #[error("Circuit has {requested} qubits but the simulator supports at most {max}")]
    TooManyQubits {
        /// Qubits requested.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The state cannot be sampled (for example all amplitudes are zero).
    #[error("Cannot sample from state: {0}")]
    InvalidState(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
