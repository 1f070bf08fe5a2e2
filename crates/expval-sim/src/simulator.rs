//! Whole-circuit simulation and measurement sampling.

use std::time::Instant;

use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;
use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument};

use expval_ir::{Circuit, InstructionKind, QubitId};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// Largest register [`simulate`] and the default sampler accept.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// Largest register [`unitary`] accepts.
pub const MAX_UNITARY_QUBITS: usize = 10;

/// Map each qubit to its position in `order`.
pub fn qubit_index_map(order: &[QubitId]) -> FxHashMap<QubitId, usize> {
    order.iter().enumerate().map(|(i, q)| (*q, i)).collect()
}

fn check_size(num_qubits: usize, max: usize) -> SimResult<()> {
    if num_qubits > max {
        return Err(SimError::TooManyQubits {
            requested: num_qubits,
            max,
        });
    }
    Ok(())
}

fn evolve(
    circuit: &Circuit,
    mut state: Statevector,
    map: &FxHashMap<QubitId, usize>,
) -> SimResult<Statevector> {
    for inst in circuit.instructions() {
        state.apply(inst, map)?;
    }
    Ok(state)
}

fn reject_measurements(circuit: &Circuit) -> SimResult<()> {
    if circuit.instructions().iter().any(|i| i.is_measure()) {
        return Err(SimError::NotUnitary(circuit.name().to_string()));
    }
    Ok(())
}

/// Apply `circuit` to |0…0⟩ and return the final amplitudes.
///
/// The register is laid out in `circuit.qubits()` order. Circuits with
/// measurements are rejected.
#[instrument(skip(circuit), fields(circuit = circuit.name()))]
pub fn simulate(circuit: &Circuit) -> SimResult<Vec<Complex64>> {
    let n = circuit.num_qubits();
    check_size(n, DEFAULT_MAX_QUBITS)?;
    reject_measurements(circuit)?;

    debug!("Simulating {} instructions on {} qubits", circuit.len(), n);
    let map = qubit_index_map(circuit.qubits());
    Ok(evolve(circuit, Statevector::new(n), &map)?.into_amplitudes())
}

/// The full unitary of `circuit`; column `k` is the circuit applied to `|k⟩`.
#[instrument(skip(circuit), fields(circuit = circuit.name()))]
pub fn unitary(circuit: &Circuit) -> SimResult<Array2<Complex64>> {
    let n = circuit.num_qubits();
    check_size(n, MAX_UNITARY_QUBITS)?;
    reject_measurements(circuit)?;

    let dim = 1 << n;
    let map = qubit_index_map(circuit.qubits());
    let mut u = Array2::zeros((dim, dim));
    for k in 0..dim {
        let column = evolve(circuit, Statevector::basis_state(n, k), &map)?;
        u.column_mut(k).assign(&ArrayView1::from(column.amplitudes()));
    }
    Ok(u)
}

/// Something that can execute a circuit and report measurement outcomes.
pub trait Sampler {
    /// Run `circuit` `repetitions` times.
    ///
    /// Returns one row per repetition and one column per measured qubit,
    /// in the order the circuit measures them. Entries are 0 or 1.
    fn run(&self, circuit: &Circuit, repetitions: usize) -> SimResult<Array2<u8>>;
}

/// Samples terminal measurements from an exact statevector.
///
/// The state is computed once; every repetition is a fresh draw from its
/// probability distribution.
#[derive(Debug, Clone)]
pub struct StatevectorSampler {
    /// Seed for reproducible runs; `None` draws from OS entropy.
    seed: Option<u64>,
    /// Maximum number of qubits supported.
    max_qubits: usize,
}

impl StatevectorSampler {
    /// Create a sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    /// Create a sampler whose runs are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }

    /// Limit the register size.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The configured seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for StatevectorSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Measurements must be terminal on the qubits they touch.
fn check_terminal_measurements(circuit: &Circuit) -> SimResult<()> {
    let mut measured = FxHashSet::default();
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Measure => measured.extend(inst.qubits.iter().copied()),
            InstructionKind::Gate(gate) => {
                if let Some(q) = inst.qubits.iter().find(|q| measured.contains(*q)) {
                    return Err(SimError::GateAfterMeasurement {
                        qubit: *q,
                        gate_name: gate.name().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

impl Sampler for StatevectorSampler {
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run(&self, circuit: &Circuit, repetitions: usize) -> SimResult<Array2<u8>> {
        let start = Instant::now();
        if repetitions == 0 {
            return Err(SimError::ZeroRepetitions);
        }
        let n = circuit.num_qubits();
        check_size(n, self.max_qubits)?;
        check_terminal_measurements(circuit)?;

        let map = qubit_index_map(circuit.qubits());
        let measured = circuit.measured_qubits();
        let masks: Vec<usize> = measured.iter().map(|q| 1 << map[q]).collect();
        debug!(
            "Sampling {} repetitions of {} measured qubits ({} qubits total)",
            repetitions,
            masks.len(),
            n
        );

        let state = evolve(circuit, Statevector::new(n), &map)?;
        let distribution = state.sampler()?;
        let mut rng = self.rng();

        let mut samples = Array2::zeros((repetitions, masks.len()));
        for mut row in samples.rows_mut() {
            let outcome = distribution.sample(&mut rng);
            for (bit, mask) in row.iter_mut().zip(&masks) {
                *bit = u8::from(outcome & mask != 0);
            }
        }

        debug!("Sampling completed in {:?}", start.elapsed());
        Ok(samples)
    }
}
