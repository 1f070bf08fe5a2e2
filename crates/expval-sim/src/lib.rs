//! Statevector simulation for expval circuits.
//!
//! Provides the two circuit services the expectation evaluators rely on:
//!
//! - **apply**: [`simulate`] runs a measurement-free circuit on |0…0⟩ and
//!   returns the amplitudes, with the register laid out in the circuit's
//!   declared qubit order ([`qubit_index_map`]).
//! - **run**: the [`Sampler`] trait executes a circuit with terminal
//!   measurements and returns a repetitions × measured-qubits matrix of
//!   0/1 outcomes. [`StatevectorSampler`] implements it exactly.
//!
//! # Bit convention
//!
//! Qubit `i` of the register is bit `1 << i` of the basis index.
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//!
//! # Example
//!
//! ```rust
//! use expval_ir::{Circuit, QubitId};
//! use expval_sim::{Sampler, StatevectorSampler};
//!
//! let mut circuit = Circuit::bell().unwrap();
//! circuit.measure_all().unwrap();
//!
//! let samples = StatevectorSampler::seeded(7).run(&circuit, 100).unwrap();
//! assert_eq!(samples.dim(), (100, 2));
//! assert!(samples.rows().into_iter().all(|r| r[0] == r[1]));
//! ```

pub mod error;
pub mod simulator;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use simulator::{
    DEFAULT_MAX_QUBITS, MAX_UNITARY_QUBITS, Sampler, StatevectorSampler, qubit_index_map,
    simulate, unitary,
};
pub use statevector::Statevector;
