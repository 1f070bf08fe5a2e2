//! Job files: a circuit and the observables to evaluate against it.
//!
//! ```yaml
//! name: product
//! num_qubits: 3
//! ops:
//!   - gate: x
//!     qubits: [1]
//!   - gate: rx
//!     qubits: [2]
//!     params: [0.5]
//! observables:
//!   - pauli: "Z0*Z1"
//!   - pauli: "X2"
//!     samples: 2000
//!     key: x2
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use expval_expectation::{PauliStringExpectation, pauli_string_expectation};
use expval_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};
use expval_pauli::PauliString;

/// A job file as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// Circuit name used in logs.
    #[serde(default = "default_name")]
    pub name: String,
    /// Register size; qubits are `q0 .. q{n-1}`.
    pub num_qubits: u32,
    /// Gates applied to |0…0⟩, in order.
    #[serde(default)]
    pub ops: Vec<OpSpec>,
    /// Observables to evaluate.
    pub observables: Vec<ObservableSpec>,
}

/// One gate application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpSpec {
    pub gate: String,
    pub qubits: Vec<u32>,
    /// Rotation angles in radians.
    #[serde(default)]
    pub params: Vec<f64>,
}

/// One observable request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservableSpec {
    /// Pauli string, e.g. `-X0*Z2`.
    pub pauli: String,
    /// Sample count; omitted for an exact value.
    #[serde(default)]
    pub samples: Option<usize>,
    #[serde(default)]
    pub key: Option<String>,
}

fn default_name() -> String {
    "job".to_string()
}

/// A job ready to evaluate.
#[derive(Debug)]
pub struct Job {
    pub circuit: Circuit,
    pub observables: Vec<PauliStringExpectation>,
}

impl JobSpec {
    /// Read and parse a YAML job file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {}", path.display()))?;
        serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Failed to parse job file: {}", path.display()))
    }

    /// Build the circuit and the evaluators.
    pub fn build(&self) -> Result<Job> {
        let mut circuit = Circuit::with_size(&self.name, self.num_qubits);
        for (i, op) in self.ops.iter().enumerate() {
            let params = op
                .params
                .iter()
                .copied()
                .map(ParameterExpression::constant)
                .collect();
            let gate = StandardGate::from_name(&op.gate, params)
                .with_context(|| format!("ops[{i}]: invalid gate '{}'", op.gate))?;
            circuit
                .push(Instruction::gate(gate, op.qubits.iter().copied().map(QubitId)))
                .with_context(|| format!("ops[{i}]: cannot apply '{}'", op.gate))?;
        }

        let observables = self
            .observables
            .iter()
            .enumerate()
            .map(|(i, obs)| {
                let pauli_string: PauliString = obs
                    .pauli
                    .parse()
                    .with_context(|| format!("observables[{i}]: invalid Pauli string"))?;
                for qubit in pauli_string.qubits() {
                    if !circuit.contains_qubit(qubit) {
                        anyhow::bail!(
                            "observables[{i}]: {qubit} is outside the {}-qubit register",
                            self.num_qubits
                        );
                    }
                }
                pauli_string_expectation(pauli_string, obs.samples, obs.key.clone())
                    .with_context(|| format!("observables[{i}]: invalid request"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Job {
            circuit,
            observables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expval_expectation::Expectation;
    use std::io::Write;

    const JOB: &str = r#"
name: demo
num_qubits: 2
ops:
  - gate: h
    qubits: [0]
  - gate: cx
    qubits: [0, 1]
  - gate: rz
    qubits: [1]
    params: [0.25]
observables:
  - pauli: "Z0*Z1"
  - pauli: "-X0*X1"
    samples: 100
    key: xx
"#;

    #[test]
    fn test_parse_and_build() {
        let spec: JobSpec = serde_yaml_ng::from_str(JOB).unwrap();
        let job = spec.build().unwrap();
        assert_eq!(job.circuit.name(), "demo");
        assert_eq!(job.circuit.num_qubits(), 2);
        assert_eq!(job.circuit.len(), 3);
        assert_eq!(job.observables.len(), 2);
        assert!(job.observables[0].is_exact());
        assert_eq!(job.observables[1].num_samples(), Some(100));
        assert_eq!(job.observables[1].key(), Some("xx"));
        assert!(job.observables[1].pauli_string().negated());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{JOB}").unwrap();
        let spec = JobSpec::from_file(file.path()).unwrap();
        assert_eq!(spec.ops.len(), 3);
        assert!(JobSpec::from_file(Path::new("/nonexistent/job.yaml")).is_err());
    }

    #[test]
    fn test_default_name() {
        let spec: JobSpec =
            serde_yaml_ng::from_str("num_qubits: 1\nobservables:\n  - pauli: Z0\n").unwrap();
        assert_eq!(spec.name, "job");
        assert!(spec.ops.is_empty());
    }

    #[test]
    fn test_build_errors() {
        let parse = |s: &str| serde_yaml_ng::from_str::<JobSpec>(s).unwrap();

        let unknown_gate = parse("num_qubits: 1\nops:\n  - gate: foo\n    qubits: [0]\nobservables: []\n");
        assert!(unknown_gate.build().is_err());

        let missing_angle = parse("num_qubits: 1\nops:\n  - gate: rx\n    qubits: [0]\nobservables: []\n");
        assert!(missing_angle.build().is_err());

        let out_of_range = parse("num_qubits: 1\nops:\n  - gate: x\n    qubits: [3]\nobservables: []\n");
        assert!(out_of_range.build().is_err());

        let bad_pauli = parse("num_qubits: 1\nobservables:\n  - pauli: Q0\n");
        assert!(bad_pauli.build().is_err());

        let outside = parse("num_qubits: 1\nobservables:\n  - pauli: Z4\n");
        assert!(outside.build().is_err());

        let zero = parse("num_qubits: 1\nobservables:\n  - pauli: Z0\n    samples: 0\n");
        assert!(zero.build().is_err());
    }
}
