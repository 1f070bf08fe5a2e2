//! Pauli operators as rotation gates.
//!
//! A Pauli is also a half-turn rotation about its own axis. Rather than
//! making [`Pauli`] itself a gate, the rotation behaviour is carried by
//! [`PauliRotation`], which pairs a Pauli with an exponent `t` and
//! represents `P^t`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use expval_ir::{Instruction, ParameterExpression, QubitId, StandardGate};

use crate::matrix::Unitary2x2;
use crate::pauli::Pauli;

/// Capability shared by single-qubit rotation gates with an exponent.
pub trait RotationGate {
    /// The exponent `t` of the rotation.
    fn exponent(&self) -> &ParameterExpression;

    /// Exact unitary, or `None` while the exponent is symbolic.
    fn matrix(&self) -> Option<Unitary2x2>;

    /// A standard gate equal to this rotation up to global phase.
    fn to_gate(&self) -> StandardGate;
}

/// `pauli` raised to the power `exponent`.
///
/// `P^t = (I + P)/2 + e^{iπt} (I − P)/2`, so `t = 1` is the Pauli itself and
/// `t = ±1/2` are the quarter turns used for basis changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliRotation {
    pauli: Pauli,
    exponent: ParameterExpression,
}

impl PauliRotation {
    /// Create a new rotation.
    pub fn new(pauli: Pauli, exponent: impl Into<ParameterExpression>) -> Self {
        Self {
            pauli,
            exponent: exponent.into(),
        }
    }

    /// The rotation axis.
    pub fn pauli(&self) -> Pauli {
        self.pauli
    }

    /// The inverse rotation `P^{-t}`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            pauli: self.pauli,
            exponent: (-self.exponent.clone()).simplify(),
        }
    }

    /// Bind a symbolic exponent.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        Self {
            pauli: self.pauli,
            exponent: self.exponent.bind(name, value).simplify(),
        }
    }

    /// This rotation applied to `qubit`.
    pub fn on(&self, qubit: QubitId) -> Instruction {
        Instruction::single_qubit_gate(self.to_gate(), qubit)
    }
}

impl RotationGate for PauliRotation {
    fn exponent(&self) -> &ParameterExpression {
        &self.exponent
    }

    fn matrix(&self) -> Option<Unitary2x2> {
        let t = self.exponent.as_f64()?;
        let identity = Unitary2x2::identity();
        let p = self.pauli.matrix();
        let half = Complex64::new(0.5, 0.0);
        let plus = identity.add(&p).scale(half);
        let minus = identity.add(&p.scale(Complex64::new(-1.0, 0.0))).scale(half);
        let phase = Complex64::from_polar(1.0, std::f64::consts::PI * t);
        Some(plus.add(&minus.scale(phase)))
    }

    fn to_gate(&self) -> StandardGate {
        let angle = (ParameterExpression::pi() * self.exponent.clone()).simplify();
        match self.pauli {
            Pauli::X => StandardGate::Rx(angle),
            Pauli::Y => StandardGate::Ry(angle),
            Pauli::Z => StandardGate::Rz(angle),
        }
    }
}
