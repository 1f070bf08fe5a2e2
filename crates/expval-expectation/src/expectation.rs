//! The contract shared by both evaluators and the factory choosing between them.

use std::fmt;

use serde::{Deserialize, Serialize};

use expval_ir::{Circuit, QubitId};
use expval_pauli::PauliString;
use expval_sim::Sampler;

use crate::approximate::ApproximateExpectation;
use crate::config::EvaluatorConfig;
use crate::error::ExpectationResult;
use crate::exact::ExactExpectation;

/// An expectation-value request for a Pauli-string observable.
pub trait Expectation {
    /// The observable.
    fn pauli_string(&self) -> &PauliString;

    /// Optional label under which the result is reported.
    fn key(&self) -> Option<&str>;

    /// Qubits the observable acts on, in ascending order.
    fn qubits(&self) -> Vec<QubitId> {
        self.pauli_string().qubits().collect()
    }

    /// Same request with qubits substituted positionally (see
    /// [`PauliString::with_qubits`]).
    fn with_qubits(&self, new_qubits: &[QubitId]) -> ExpectationResult<Self>
    where
        Self: Sized;
}

/// Either evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PauliStringExpectation {
    /// Statevector evaluation.
    Exact(ExactExpectation),
    /// Sampled estimate.
    Approximate(ApproximateExpectation),
}

/// Build an exact evaluator when `num_samples` is `None`, a sampled one
/// otherwise.
pub fn pauli_string_expectation(
    pauli_string: PauliString,
    num_samples: Option<usize>,
    key: Option<String>,
) -> ExpectationResult<PauliStringExpectation> {
    let expectation = match num_samples {
        None => {
            let exact = ExactExpectation::new(pauli_string);
            PauliStringExpectation::Exact(match key {
                Some(key) => exact.with_key(key),
                None => exact,
            })
        }
        Some(n) => {
            let approx = ApproximateExpectation::new(pauli_string, n)?;
            PauliStringExpectation::Approximate(match key {
                Some(key) => approx.with_key(key),
                None => approx,
            })
        }
    };
    Ok(expectation)
}

impl PauliStringExpectation {
    /// Sample count, for sampled estimates.
    pub fn num_samples(&self) -> Option<usize> {
        match self {
            Self::Exact(_) => None,
            Self::Approximate(a) => Some(a.num_samples()),
        }
    }

    /// True for the statevector evaluator.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }

    /// Evaluate against `circuit`: exactly by simulation, or by drawing
    /// samples from `sampler`.
    pub fn evaluate(
        &self,
        circuit: &Circuit,
        sampler: &impl Sampler,
        config: &EvaluatorConfig,
    ) -> ExpectationResult<f64> {
        match self {
            Self::Exact(e) => e.evaluate_with(circuit, config),
            Self::Approximate(a) => a.estimate(circuit, sampler),
        }
    }
}

impl Expectation for PauliStringExpectation {
    fn pauli_string(&self) -> &PauliString {
        match self {
            Self::Exact(e) => e.pauli_string(),
            Self::Approximate(a) => a.pauli_string(),
        }
    }

    fn key(&self) -> Option<&str> {
        match self {
            Self::Exact(e) => e.key(),
            Self::Approximate(a) => a.key(),
        }
    }

    fn with_qubits(&self, new_qubits: &[QubitId]) -> ExpectationResult<Self> {
        Ok(match self {
            Self::Exact(e) => Self::Exact(e.with_qubits(new_qubits)?),
            Self::Approximate(a) => Self::Approximate(a.with_qubits(new_qubits)?),
        })
    }
}

impl From<ExactExpectation> for PauliStringExpectation {
    fn from(e: ExactExpectation) -> Self {
        Self::Exact(e)
    }
}

impl From<ApproximateExpectation> for PauliStringExpectation {
    fn from(a: ApproximateExpectation) -> Self {
        Self::Approximate(a)
    }
}

impl fmt::Display for PauliStringExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(e) => fmt::Display::fmt(e, f),
            Self::Approximate(a) => fmt::Display::fmt(a, f),
        }
    }
}
