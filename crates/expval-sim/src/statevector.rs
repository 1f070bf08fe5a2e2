//! Dense statevector engine.
//!
//! Qubit `i` of the register is bit `1 << i` of the basis index, so the
//! first qubit is the least significant bit.

use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rustc_hash::FxHashMap;
use std::f64::consts::PI;

use expval_ir::{Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{SimError, SimResult};

/// A pure state over `num_qubits` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis_state(num_qubits, 0)
    }

    /// The computational basis state `|index⟩`.
    ///
    /// `index` is reduced modulo `2^num_qubits`.
    pub fn basis_state(num_qubits: usize, index: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index % size] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the state and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Measurement probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply an instruction, locating its qubits through `qubit_to_index`.
    ///
    /// Measurements leave the state untouched; sampling happens separately.
    pub fn apply(
        &mut self,
        instruction: &Instruction,
        qubit_to_index: &FxHashMap<QubitId, usize>,
    ) -> SimResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let positions = instruction
                    .qubits
                    .iter()
                    .map(|q| self.position(*q, qubit_to_index))
                    .collect::<SimResult<Vec<_>>>()?;
                self.apply_standard_gate(gate, &positions)
            }
            InstructionKind::Measure => Ok(()),
        }
    }

    fn position(
        &self,
        qubit: QubitId,
        qubit_to_index: &FxHashMap<QubitId, usize>,
    ) -> SimResult<usize> {
        let index = *qubit_to_index
            .get(&qubit)
            .ok_or(SimError::UnknownQubit(qubit))?;
        if index >= self.num_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit,
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(index)
    }

    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) -> SimResult<()> {
        let angle = || {
            gate.parameter()
                .and_then(expval_ir::ParameterExpression::as_f64)
                .ok_or_else(|| SimError::UnboundParameter {
                    gate_name: gate.name().to_string(),
                })
        };
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::T => self.apply_phase(qubits[0], PI / 4.0),
            StandardGate::Tdg => self.apply_phase(qubits[0], -PI / 4.0),
            StandardGate::Rx(_) => self.apply_rx(qubits[0], angle()?),
            StandardGate::Ry(_) => self.apply_ry(qubits[0], angle()?),
            StandardGate::Rz(_) => self.apply_rz(qubits[0], angle()?),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Draw one basis index with probability `|amplitude|²`.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<usize> {
        Ok(self.sampler()?.sample(rng))
    }

    /// A reusable distribution over basis indices.
    pub fn sampler(&self) -> SimResult<WeightedIndex<f64>> {
        WeightedIndex::new(self.probabilities())
            .map_err(|e| SimError::InvalidState(e.to_string()))
    }
}
