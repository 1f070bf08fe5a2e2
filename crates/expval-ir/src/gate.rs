//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::parameter::ParameterExpression;

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// Check if this gate has unbound symbolic parameters.
    pub fn is_parameterized(&self) -> bool {
        self.parameter().is_some_and(ParameterExpression::is_symbolic)
    }

    /// The rotation angle, for rotation gates.
    pub fn parameter(&self) -> Option<&ParameterExpression> {
        match self {
            StandardGate::Rx(p) | StandardGate::Ry(p) | StandardGate::Rz(p) => Some(p),
            _ => None,
        }
    }

    /// Look a gate up by its name, as produced by [`StandardGate::name`].
    ///
    /// Rotation gates take exactly one parameter; every other gate takes none.
    pub fn from_name(name: &str, params: Vec<ParameterExpression>) -> IrResult<Self> {
        let lowered = name.to_ascii_lowercase();
        let expected = match lowered.as_str() {
            "rx" | "ry" | "rz" => 1,
            _ => 0,
        };
        if params.len() != expected {
            return Err(IrError::ParameterCountMismatch {
                gate_name: lowered,
                expected,
                got: params.len(),
            });
        }
        let mut params = params.into_iter();
        let gate = match lowered.as_str() {
            "id" | "i" => StandardGate::I,
            "x" => StandardGate::X,
            "y" => StandardGate::Y,
            "z" => StandardGate::Z,
            "h" => StandardGate::H,
            "s" => StandardGate::S,
            "sdg" => StandardGate::Sdg,
            "t" => StandardGate::T,
            "tdg" => StandardGate::Tdg,
            "rx" | "ry" | "rz" => {
                let theta = params.next().ok_or_else(|| IrError::ParameterCountMismatch {
                    gate_name: lowered.clone(),
                    expected: 1,
                    got: 0,
                })?;
                match lowered.as_str() {
                    "rx" => StandardGate::Rx(theta),
                    "ry" => StandardGate::Ry(theta),
                    _ => StandardGate::Rz(theta),
                }
            }
            "cx" | "cnot" => StandardGate::CX,
            "cz" => StandardGate::CZ,
            "swap" => StandardGate::Swap,
            _ => return Err(IrError::UnknownGate(name.to_string())),
        };
        Ok(gate)
    }
}
