//! Qubit identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a qubit.
///
/// Equality and hashing are by value; the derived `Ord` is the total order
/// used whenever a deterministic qubit ordering is required (for example the
/// domain order of a Pauli string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// A contiguous range of qubits `[start, end)`.
    pub fn range(start: u32, end: u32) -> Vec<QubitId> {
        (start..end).map(QubitId).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
