//! Circuit types shared by the expval crates.
//!
//! This crate provides the small circuit vocabulary the expectation-value
//! engine is written against: qubit identities, a standard gate set,
//! instructions and an ordered [`Circuit`] builder.
//!
//! # Example
//!
//! ```rust
//! use expval_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("prep", 4);
//! circuit.x(QubitId(1)).unwrap();
//! circuit.h(QubitId(2)).unwrap();
//! circuit.x(QubitId(3)).unwrap().h(QubitId(3)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(circuit.len(), 4);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `X`, `Y`, `Z` | 1 | Identity and Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `CX`, `CZ` | 2 | Controlled-X and controlled-Z |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::QubitId;
