//! Signed tensor products of Paulis over named qubits.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use expval_ir::QubitId;

use crate::error::{PauliError, PauliResult};
use crate::pauli::Pauli;

/// A tensor product of Paulis on named qubits with an overall sign.
///
/// Stored as an ordered map so the qubit domain has a deterministic order
/// (ascending [`QubitId`]). Qubits not listed implicitly carry the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliString {
    paulis: BTreeMap<QubitId, Pauli>,
    #[serde(default)]
    negated: bool,
}

impl PauliString {
    /// Create from a qubit → Pauli map.
    pub fn new(paulis: BTreeMap<QubitId, Pauli>, negated: bool) -> Self {
        Self { paulis, negated }
    }

    /// The (unsigned) identity string.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from (qubit, Pauli) pairs; every qubit may appear once.
    pub fn from_ops(ops: impl IntoIterator<Item = (QubitId, Pauli)>) -> PauliResult<Self> {
        let mut paulis = BTreeMap::new();
        for (qubit, pauli) in ops {
            if paulis.insert(qubit, pauli).is_some() {
                return Err(PauliError::DuplicateQubit(qubit));
            }
        }
        Ok(Self {
            paulis,
            negated: false,
        })
    }

    /// Same string with the given sign.
    #[must_use]
    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    /// The Pauli on `qubit`, or `None` for identity.
    pub fn get(&self, qubit: QubitId) -> Option<Pauli> {
        self.paulis.get(&qubit).copied()
    }

    /// Qubit domain in ascending order.
    pub fn qubits(&self) -> impl ExactSizeIterator<Item = QubitId> + '_ {
        self.paulis.keys().copied()
    }

    /// (qubit, Pauli) pairs in ascending qubit order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (QubitId, Pauli)> + '_ {
        self.paulis.iter().map(|(q, p)| (*q, *p))
    }

    /// Number of non-identity factors.
    pub fn len(&self) -> usize {
        self.paulis.len()
    }

    /// True if every qubit carries the identity.
    pub fn is_empty(&self) -> bool {
        self.paulis.is_empty()
    }

    /// Whether the overall sign is negative.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// The overall sign as `±1.0`.
    pub fn sign(&self) -> f64 {
        if self.negated { -1.0 } else { 1.0 }
    }

    /// Substitute qubits positionally: the i-th qubit of the domain (in
    /// ascending order) becomes `new_qubits[i]`.
    ///
    /// The result is again keyed in ascending order, so a substitution that
    /// does not preserve order is undone by listing, for each qubit of the
    /// result in ascending order, the qubit it replaced:
    ///
    /// ```
    /// use expval_ir::QubitId;
    /// use expval_pauli::PauliString;
    ///
    /// let ps: PauliString = "X0*Z1".parse().unwrap();
    /// let moved = ps.with_qubits(&[QubitId(4), QubitId(2)]).unwrap();
    /// assert_eq!(moved.to_string(), "Z(q2)*X(q4)");
    /// // q2 came from q1, q4 from q0
    /// let back = moved.with_qubits(&[QubitId(1), QubitId(0)]).unwrap();
    /// assert_eq!(back, ps);
    /// ```
    pub fn with_qubits(&self, new_qubits: &[QubitId]) -> PauliResult<Self> {
        if new_qubits.len() != self.paulis.len() {
            return Err(PauliError::CardinalityMismatch {
                expected: self.paulis.len(),
                got: new_qubits.len(),
            });
        }
        let mut seen = FxHashSet::default();
        if let Some(dup) = new_qubits.iter().find(|q| !seen.insert(**q)) {
            return Err(PauliError::DuplicateQubit(*dup));
        }
        let paulis = self
            .paulis
            .values()
            .zip(new_qubits)
            .map(|(p, q)| (*q, *p))
            .collect();
        Ok(Self {
            paulis,
            negated: self.negated,
        })
    }
}

impl std::ops::Neg for PauliString {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.negated = !self.negated;
        self
    }
}

impl std::ops::Neg for &PauliString {
    type Output = PauliString;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl FromIterator<(QubitId, Pauli)> for PauliString {
    /// Later entries for the same qubit replace earlier ones.
    fn from_iter<T: IntoIterator<Item = (QubitId, Pauli)>>(iter: T) -> Self {
        Self {
            paulis: iter.into_iter().collect(),
            negated: false,
        }
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("-")?;
        }
        if self.paulis.is_empty() {
            return f.write_str("I");
        }
        for (i, (q, p)) in self.paulis.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            write!(f, "{p}({q})")?;
        }
        Ok(())
    }
}

impl FromStr for PauliString {
    type Err = PauliError;

    /// Parses `"Z0*X1"`, `"-Z0 X1"`, `"Z(q0)*X(q1)"`, `"I"` or `"-I"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| PauliError::Parse {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = s.trim();
        let (negated, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let body = body.trim();
        if body.is_empty() {
            return Err(err("empty Pauli string"));
        }
        if body == "I" || body == "i" {
            return Ok(Self::identity().with_negated(negated));
        }

        let mut ops = Vec::new();
        for term in body
            .split(|c: char| c == '*' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let mut chars = term.chars();
            let letter = chars.next().ok_or_else(|| err("empty term"))?;
            let pauli: Pauli = letter.to_string().parse().map_err(|_| {
                err(&format!("unknown Pauli '{letter}' in term '{term}'"))
            })?;
            let rest = chars.as_str();
            let digits = rest
                .strip_prefix("(q")
                .and_then(|r| r.strip_suffix(')'))
                .or_else(|| rest.strip_prefix('q'))
                .unwrap_or(rest);
            let index: u32 = digits
                .parse()
                .map_err(|_| err(&format!("bad qubit index in term '{term}'")))?;
            ops.push((QubitId(index), pauli));
        }
        Ok(Self::from_ops(ops)?.with_negated(negated))
    }
}
