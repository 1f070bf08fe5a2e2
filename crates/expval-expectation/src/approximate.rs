//! Sampled expectation estimates.
//!
//! Each qubit of the Pauli string is rotated so that its Pauli becomes `Z`,
//! then the whole domain is measured in the computational basis. The
//! product of the `±1` eigenvalues of a row is `(-1)^{parity}`, and the
//! estimate is its mean over rows.

use std::fmt;
use std::num::NonZeroUsize;

use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use expval_ir::{Circuit, Instruction, QubitId};
use expval_pauli::{Pauli, PauliRotation, PauliString};
use expval_sim::Sampler;

use crate::error::{ExpectationError, ExpectationResult};
use crate::expectation::Expectation;

/// Estimates `⟨sign · ⊗ P_q⟩` from `num_samples` basis-rotated measurements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApproximateExpectation {
    pauli_string: PauliString,
    num_samples: NonZeroUsize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

/// The rotation taking `pauli`'s eigenbasis to the computational basis.
///
/// `X → Y^{-1/2}`, `Y → X^{1/2}`, `Z` needs none.
pub fn z_basis_rotation(pauli: Pauli) -> Option<PauliRotation> {
    match pauli {
        Pauli::X => Some(Pauli::Y.pow(-0.5)),
        Pauli::Y => Some(Pauli::X.pow(0.5)),
        Pauli::Z => None,
    }
}

impl ApproximateExpectation {
    /// Create an estimator drawing `num_samples` samples.
    pub fn new(pauli_string: PauliString, num_samples: usize) -> ExpectationResult<Self> {
        let num_samples = NonZeroUsize::new(num_samples).ok_or(ExpectationError::ZeroSamples)?;
        Ok(Self {
            pauli_string,
            num_samples,
            key: None,
        })
    }

    /// Attach a result key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Number of samples to draw.
    pub fn num_samples(&self) -> usize {
        self.num_samples.get()
    }

    /// Operations to append before measuring the domain qubits.
    ///
    /// One rotation per X or Y factor, in ascending qubit order.
    pub fn measurement_basis_change(&self) -> Vec<Instruction> {
        self.pauli_string
            .iter()
            .filter_map(|(qubit, pauli)| z_basis_rotation(pauli).map(|r| r.on(qubit)))
            .collect()
    }

    /// Reduce rotated measurement outcomes to an estimate.
    ///
    /// `samples` has one row per repetition and one column per domain qubit,
    /// in ascending qubit order. The mean is taken over the supplied rows.
    #[instrument(skip_all, fields(observable = %self.pauli_string, rows = samples.nrows()))]
    pub fn value_from_samples(&self, samples: ArrayView2<'_, u8>) -> ExpectationResult<f64> {
        let (rows, columns) = samples.dim();
        if columns != self.pauli_string.len() {
            return Err(ExpectationError::ShapeMismatch {
                expected: self.pauli_string.len(),
                got: columns,
            });
        }
        if rows == 0 {
            return Err(ExpectationError::EmptySamples);
        }

        let mut odd_rows = 0_usize;
        for (row, bits) in samples.rows().into_iter().enumerate() {
            let mut parity = 0_u8;
            for (column, &value) in bits.iter().enumerate() {
                if value > 1 {
                    return Err(ExpectationError::InvalidSample { row, column, value });
                }
                parity ^= value;
            }
            odd_rows += usize::from(parity);
        }

        let even_rows = rows - odd_rows;
        let mean = (even_rows as f64 - odd_rows as f64) / rows as f64;
        let value = self.pauli_string.sign() * mean;
        debug!("Estimated {} from {} rows ({} odd)", value, rows, odd_rows);
        Ok(value)
    }

    /// Sample `circuit` with the basis change and domain measurement
    /// appended, then reduce.
    ///
    /// `circuit` itself must not already measure the domain qubits.
    /// Measurements it makes on other qubits are sampled but left out of
    /// the reduction.
    #[instrument(skip(self, circuit, sampler), fields(observable = %self.pauli_string))]
    pub fn estimate(&self, circuit: &Circuit, sampler: &impl Sampler) -> ExpectationResult<f64> {
        let mut measured = circuit.clone();
        measured.extend(self.measurement_basis_change())?;
        measured.measure(self.pauli_string.qubits())?;
        let samples = sampler.run(&measured, self.num_samples())?;

        // Domain qubits are measured last, so take their last columns.
        let order = measured.measured_qubits();
        let columns: Vec<usize> = self
            .pauli_string
            .qubits()
            .filter_map(|q| order.iter().rposition(|m| *m == q))
            .collect();
        if columns.len() == order.len() {
            return self.value_from_samples(samples.view());
        }
        debug!(
            "Dropping {} columns measured outside the domain",
            order.len() - columns.len()
        );
        self.value_from_samples(samples.select(Axis(1), &columns).view())
    }
}

impl Expectation for ApproximateExpectation {
    fn pauli_string(&self) -> &PauliString {
        &self.pauli_string
    }

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn with_qubits(&self, new_qubits: &[QubitId]) -> ExpectationResult<Self> {
        Ok(Self {
            pauli_string: self.pauli_string.with_qubits(new_qubits)?,
            num_samples: self.num_samples,
            key: self.key.clone(),
        })
    }
}

impl fmt::Display for ApproximateExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⟨{}⟩~{}", self.pauli_string, self.num_samples)
    }
}
