//! Pauli algebra for expectation-value estimation.
//!
//! The three single-qubit Paulis form a cyclic group `X → Y → Z → X`;
//! [`Pauli`] exposes that structure as index arithmetic (products,
//! commutation, the cyclic "greater than" relation). [`PauliString`] is a
//! signed tensor product of Paulis over named qubits and is the observable
//! type consumed by the expectation crates.
//!
//! # Example
//!
//! ```rust
//! use expval_ir::QubitId;
//! use expval_pauli::{Pauli, PauliString};
//!
//! assert_eq!(Pauli::X.third(Pauli::Y), Pauli::Z);
//! assert!(Pauli::Z.is_less_than(Pauli::X));
//!
//! let zx: PauliString = "-Z0*X1".parse().unwrap();
//! assert_eq!(zx.get(QubitId(1)), Some(Pauli::X));
//! assert_eq!(zx.sign(), -1.0);
//! ```

pub mod error;
pub mod matrix;
pub mod pauli;
pub mod rotation;
pub mod string;

pub use error::{PauliError, PauliResult};
pub use matrix::Unitary2x2;
pub use pauli::Pauli;
pub use rotation::{PauliRotation, RotationGate};
pub use string::PauliString;
