//! Exact expectation values from a full statevector.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use expval_ir::{Circuit, QubitId};
use expval_pauli::{Pauli, PauliString};
use expval_sim::{qubit_index_map, simulate};

use crate::config::EvaluatorConfig;
use crate::error::{ExpectationError, ExpectationResult};
use crate::expectation::Expectation;

/// `⟨ψ| sign · ⊗ P_q |ψ⟩` computed by direct summation over basis states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExactExpectation {
    pauli_string: PauliString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

/// Bit masks describing how a Pauli string acts on basis states.
///
/// `P|k⟩ = phase · (-1)^{popcount(k & z_mask)} |k ^ x_mask⟩`.
#[derive(Debug, Clone, Copy)]
struct PauliMasks {
    x_mask: usize,
    z_mask: usize,
    phase: Complex64,
}

impl PauliMasks {
    fn new<S: BuildHasher>(
        pauli_string: &PauliString,
        qubit_to_index: &HashMap<QubitId, usize, S>,
    ) -> ExpectationResult<Self> {
        let mut x_mask = 0;
        let mut z_mask = 0;
        let mut num_y = 0;
        for (qubit, pauli) in pauli_string.iter() {
            let bit = 1_usize
                << qubit_to_index
                    .get(&qubit)
                    .ok_or(ExpectationError::QubitNotIndexed(qubit))?;
            match pauli {
                Pauli::X => x_mask |= bit,
                Pauli::Z => z_mask |= bit,
                // Y|0⟩ = i|1⟩, Y|1⟩ = -i|0⟩
                Pauli::Y => {
                    x_mask |= bit;
                    z_mask |= bit;
                    num_y += 1;
                }
            }
        }
        let phase = match num_y % 4 {
            0 => Complex64::new(1.0, 0.0),
            1 => Complex64::new(0.0, 1.0),
            2 => Complex64::new(-1.0, 0.0),
            _ => Complex64::new(0.0, -1.0),
        };
        Ok(Self {
            x_mask,
            z_mask,
            phase,
        })
    }

    /// Contribution of basis state `k` before the global phase.
    #[inline]
    fn term(&self, state: &[Complex64], k: usize) -> Complex64 {
        let value = state[k ^ self.x_mask].conj() * state[k];
        if (k & self.z_mask).count_ones() & 1 == 1 {
            -value
        } else {
            value
        }
    }
}

/// Check the index map describes a register of `state.len()` amplitudes.
fn check_layout<S: BuildHasher>(
    state: &[Complex64],
    qubit_to_index: &HashMap<QubitId, usize, S>,
) -> ExpectationResult<usize> {
    let num_qubits = qubit_to_index.len();
    let expected = u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1_usize.checked_shl(n))
        .ok_or(ExpectationError::DimensionMismatch {
            num_qubits,
            expected: usize::MAX,
            got: state.len(),
        })?;
    if state.len() != expected {
        return Err(ExpectationError::DimensionMismatch {
            num_qubits,
            expected,
            got: state.len(),
        });
    }

    let mut seen = vec![false; num_qubits];
    for (&qubit, &index) in qubit_to_index {
        if index >= num_qubits {
            return Err(ExpectationError::IndexOutOfRange {
                qubit,
                index,
                num_qubits,
            });
        }
        if std::mem::replace(&mut seen[index], true) {
            return Err(ExpectationError::DuplicateIndex { qubit, index });
        }
    }
    Ok(num_qubits)
}

impl ExactExpectation {
    /// Create an evaluator for `pauli_string`.
    pub fn new(pauli_string: PauliString) -> Self {
        Self {
            pauli_string,
            key: None,
        }
    }

    /// Attach a result key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Expectation value of the observable in `state`, using default
    /// numeric settings.
    ///
    /// `qubit_to_index` gives each qubit's bit position (`1 << index`) in
    /// the basis index; its size fixes the register width.
    pub fn value_from_statevector<S: BuildHasher>(
        &self,
        state: &[Complex64],
        qubit_to_index: &HashMap<QubitId, usize, S>,
    ) -> ExpectationResult<f64> {
        self.value_from_statevector_with(state, qubit_to_index, &EvaluatorConfig::default())
    }

    /// [`value_from_statevector`](Self::value_from_statevector) with
    /// explicit settings.
    #[instrument(skip_all, fields(observable = %self.pauli_string))]
    pub fn value_from_statevector_with<S: BuildHasher>(
        &self,
        state: &[Complex64],
        qubit_to_index: &HashMap<QubitId, usize, S>,
        config: &EvaluatorConfig,
    ) -> ExpectationResult<f64> {
        let num_qubits = check_layout(state, qubit_to_index)?;
        let masks = PauliMasks::new(&self.pauli_string, qubit_to_index)?;
        trace!(
            "x_mask={:#b} z_mask={:#b} phase={}",
            masks.x_mask, masks.z_mask, masks.phase
        );

        let (sum, norm_sqr) = if num_qubits >= config.parallel_threshold {
            debug!("Reducing {} amplitudes in parallel", state.len());
            (
                (0..state.len())
                    .into_par_iter()
                    .map(|k| masks.term(state, k))
                    .sum::<Complex64>(),
                state.par_iter().map(Complex64::norm_sqr).sum::<f64>(),
            )
        } else {
            (
                (0..state.len()).map(|k| masks.term(state, k)).sum::<Complex64>(),
                state.iter().map(Complex64::norm_sqr).sum::<f64>(),
            )
        };

        let value = masks.phase * sum * self.pauli_string.sign();
        let tolerance = config.imaginary_tolerance * (1.0 + norm_sqr);
        if value.im.is_nan() || value.im.abs() > tolerance {
            return Err(ExpectationError::ImaginaryResidue {
                imag: value.im,
                tolerance,
            });
        }
        debug!("Exact expectation value: {}", value.re);
        Ok(value.re)
    }

    /// Simulate `circuit` and evaluate the observable on its final state.
    ///
    /// The register follows the circuit's declared qubit order.
    pub fn evaluate(&self, circuit: &Circuit) -> ExpectationResult<f64> {
        self.evaluate_with(circuit, &EvaluatorConfig::default())
    }

    /// [`evaluate`](Self::evaluate) with explicit settings.
    pub fn evaluate_with(
        &self,
        circuit: &Circuit,
        config: &EvaluatorConfig,
    ) -> ExpectationResult<f64> {
        let state = simulate(circuit)?;
        let map = qubit_index_map(circuit.qubits());
        self.value_from_statevector_with(&state, &map, config)
    }
}

impl Expectation for ExactExpectation {
    fn pauli_string(&self) -> &PauliString {
        &self.pauli_string
    }

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn with_qubits(&self, new_qubits: &[QubitId]) -> ExpectationResult<Self> {
        Ok(Self {
            pauli_string: self.pauli_string.with_qubits(new_qubits)?,
            key: self.key.clone(),
        })
    }
}

impl fmt::Display for ExactExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⟨{}⟩", self.pauli_string)
    }
}
