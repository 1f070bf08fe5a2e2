//! Expectation values of Pauli-string observables.
//!
//! Two evaluators share the [`Expectation`] contract:
//!
//! - [`ExactExpectation`] reduces a full statevector to `⟨ψ|P|ψ⟩` by summing
//!   over basis states. Large registers are reduced on the rayon pool.
//! - [`ApproximateExpectation`] rotates every domain qubit into the `Z`
//!   basis ([`ApproximateExpectation::measurement_basis_change`]), measures,
//!   and averages the row parities of the sampled bits.
//!
//! [`pauli_string_expectation`] picks one depending on whether a sample
//! count is given.
//!
//! # Example
//!
//! ```rust
//! use expval_expectation::{ApproximateExpectation, ExactExpectation};
//! use expval_ir::{Circuit, QubitId};
//! use expval_sim::StatevectorSampler;
//!
//! let mut circuit = Circuit::with_size("prep", 2);
//! circuit.x(QubitId(1)).unwrap();
//!
//! let zz = ExactExpectation::new("Z0*Z1".parse().unwrap());
//! assert!((zz.evaluate(&circuit).unwrap() + 1.0).abs() < 1e-12);
//!
//! let sampled = ApproximateExpectation::new("Z0*Z1".parse().unwrap(), 100).unwrap();
//! let estimate = sampled.estimate(&circuit, &StatevectorSampler::seeded(1)).unwrap();
//! assert_eq!(estimate, -1.0);
//! ```

pub mod approximate;
pub mod config;
pub mod error;
pub mod exact;
pub mod expectation;

pub use approximate::{ApproximateExpectation, z_basis_rotation};
pub use config::{ConfigError, EvaluatorConfig};
pub use error::{ExpectationError, ExpectationResult};
pub use exact::ExactExpectation;
pub use expectation::{Expectation, PauliStringExpectation, pauli_string_expectation};
