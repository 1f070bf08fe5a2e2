//! The single-qubit Pauli operators as a cyclic group of order three.
//!
//! `X`, `Y` and `Z` sit on a fixed cycle `X → Y → Z → X` with indices
//! 0, 1 and 2. Every algebraic primitive below is modular arithmetic over
//! that index, so callers can reason about products and orderings without
//! matching on individual operators.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use expval_ir::{Instruction, ParameterExpression, QubitId, StandardGate};

use crate::error::PauliError;
use crate::matrix::Unitary2x2;
use crate::rotation::PauliRotation;

/// One of the three single-qubit Pauli operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Pauli-X, index 0.
    X,
    /// Pauli-Y, index 1.
    Y,
    /// Pauli-Z, index 2.
    Z,
}

impl Pauli {
    /// The fixed cycle, ordered by index.
    pub const ALL: [Pauli; 3] = [Pauli::X, Pauli::Y, Pauli::Z];

    /// Position in the `(X, Y, Z)` cycle.
    #[inline]
    pub const fn index(self) -> i64 {
        match self {
            Pauli::X => 0,
            Pauli::Y => 1,
            Pauli::Z => 2,
        }
    }

    /// Display label.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        }
    }

    /// The Pauli at position `index mod 3`. Negative indices wrap.
    #[inline]
    pub fn by_index(index: i64) -> Pauli {
        // rem_euclid(3) is always in 0..3
        Self::ALL[index.rem_euclid(3) as usize]
    }

    /// The Pauli `relative_index` steps after `p` in the cycle.
    #[inline]
    pub fn by_relative_index(p: Pauli, relative_index: i64) -> Pauli {
        Self::by_index(p.index() + relative_index)
    }

    /// Single-qubit Paulis commute only with themselves.
    #[inline]
    pub fn commutes_with(self, other: Pauli) -> bool {
        self == other
    }

    /// The remaining member of `{self, second}` in the cycle.
    ///
    /// Only meaningful for distinct arguments; for `self == second` the
    /// result is whatever the index arithmetic yields and must not be
    /// relied upon.
    #[inline]
    pub fn third(self, second: Pauli) -> Pauli {
        Self::by_index(-self.index() - second.index())
    }

    /// Position of `self` relative to `second`: `1` if it follows
    /// `second` in the cycle, `-1` if it precedes it, `0` if equal.
    #[inline]
    pub fn relative_index(self, second: Pauli) -> i64 {
        (self.index() - second.index() + 1).rem_euclid(3) - 1
    }

    /// `self` immediately follows `other` in the cycle (`Y > X`, `Z > Y`, `X > Z`).
    #[inline]
    pub fn is_greater_than(self, other: Pauli) -> bool {
        (self.index() - other.index()).rem_euclid(3) == 1
    }

    /// `self` immediately precedes `other` in the cycle.
    #[inline]
    pub fn is_less_than(self, other: Pauli) -> bool {
        (other.index() - self.index()).rem_euclid(3) == 1
    }

    /// Cyclic comparison. `Equal` only for identical operators.
    ///
    /// Not a total order: `X < Y`, `Y < Z` and `Z < X` all hold, so this
    /// is deliberately not exposed through `PartialOrd`/`Ord`.
    pub fn cyclic_cmp(self, other: Pauli) -> Ordering {
        self.relative_index(other).cmp(&0)
    }

    /// Unitary matrix.
    pub fn matrix(self) -> Unitary2x2 {
        match self {
            Pauli::X => Unitary2x2::x(),
            Pauli::Y => Unitary2x2::y(),
            Pauli::Z => Unitary2x2::z(),
        }
    }

    /// The equivalent standard gate.
    pub fn to_gate(self) -> StandardGate {
        match self {
            Pauli::X => StandardGate::X,
            Pauli::Y => StandardGate::Y,
            Pauli::Z => StandardGate::Z,
        }
    }

    /// This Pauli applied to `qubit`.
    pub fn on(self, qubit: QubitId) -> Instruction {
        Instruction::single_qubit_gate(self.to_gate(), qubit)
    }

    /// `self` raised to a (possibly symbolic) power.
    pub fn pow(self, exponent: impl Into<ParameterExpression>) -> PauliRotation {
        PauliRotation::new(self, exponent)
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pauli {
    type Err = PauliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Pauli::X),
            "Y" | "y" => Ok(Pauli::Y),
            "Z" | "z" => Ok(Pauli::Z),
            other => Err(PauliError::Parse {
                input: other.to_string(),
                reason: "expected one of X, Y, Z".to_string(),
            }),
        }
    }
}
