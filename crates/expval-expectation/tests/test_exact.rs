//! Integration tests for the statevector evaluator.

use expval_expectation::{EvaluatorConfig, ExactExpectation, Expectation, ExpectationError};
use expval_ir::{Circuit, QubitId};
use expval_pauli::{Pauli, PauliString};
use expval_sim::{qubit_index_map, simulate};
use proptest::prelude::*;

fn q(i: u32) -> QubitId {
    QubitId(i)
}

fn exact(s: &str) -> ExactExpectation {
    ExactExpectation::new(s.parse().unwrap())
}

/// |0⟩ ⊗ |1⟩ ⊗ |+⟩ ⊗ |−⟩ on q0..q3.
fn product_state_circuit() -> Circuit {
    let mut circuit = Circuit::with_size("product", 4);
    circuit
        .x(q(1))
        .unwrap()
        .h(q(2))
        .unwrap()
        .x(q(3))
        .unwrap()
        .h(q(3))
        .unwrap();
    circuit
}

// ---------------------------------------------------------------------------
// Worked example
// ---------------------------------------------------------------------------

#[test]
fn product_state_expectations() {
    let circuit = product_state_circuit();
    let state = simulate(&circuit).unwrap();
    let map = qubit_index_map(circuit.qubits());

    let cases = [
        ("Z0*Z1", -1.0),
        ("Z0*Z2", 0.0),
        ("Z0*Z3", 0.0),
        ("Z0*X1", 0.0),
        ("Z1*X2", -1.0),
        ("X0*Z1", 0.0),
        ("X3", -1.0),
    ];
    for (observable, expected) in cases {
        let value = exact(observable).value_from_statevector(&state, &map).unwrap();
        assert!(
            (value - expected).abs() < 1e-10,
            "{observable}: got {value}, expected {expected}"
        );
    }
}

#[test]
fn evaluate_matches_manual_reduction() {
    let circuit = product_state_circuit();
    let e = exact("Z1*X2");
    let via_circuit = e.evaluate(&circuit).unwrap();
    let state = simulate(&circuit).unwrap();
    let manual = e
        .value_from_statevector(&state, &qubit_index_map(circuit.qubits()))
        .unwrap();
    assert_eq!(via_circuit, manual);
}

#[test]
fn bell_state_correlations() {
    let bell = Circuit::bell().unwrap();
    for (observable, expected) in [("X0*X1", 1.0), ("Y0*Y1", -1.0), ("Z0*Z1", 1.0), ("Z0", 0.0)] {
        let value = exact(observable).evaluate(&bell).unwrap();
        assert!((value - expected).abs() < 1e-10, "{observable}: {value}");
    }
}

#[test]
fn observable_outside_register_is_an_error() {
    let circuit = Circuit::with_size("c", 2);
    assert!(matches!(
        exact("Z5").evaluate(&circuit),
        Err(ExpectationError::QubitNotIndexed(QubitId(5)))
    ));
}

#[test]
fn key_and_qubits() {
    let e = exact("X3*Z1").with_key("energy");
    assert_eq!(e.key(), Some("energy"));
    assert_eq!(e.qubits(), vec![q(1), q(3)]);
    assert_eq!(exact("Z0").key(), None);
}

#[test]
fn parallel_threshold_does_not_change_result() {
    let mut circuit = Circuit::with_size("c", 3);
    circuit
        .h(q(0))
        .unwrap()
        .ry(0.4, q(1))
        .unwrap()
        .cx(q(0), q(2))
        .unwrap()
        .s(q(2))
        .unwrap();
    let parallel = EvaluatorConfig {
        parallel_threshold: 1,
        ..EvaluatorConfig::default()
    };
    for observable in ["X0*Y2", "Z1", "Y0*X1*Y2"] {
        let e = exact(observable);
        let a = e.evaluate(&circuit).unwrap();
        let b = e.evaluate_with(&circuit, &parallel).unwrap();
        assert!((a - b).abs() < 1e-12, "{observable}: {a} vs {b}");
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_pauli_string(num_qubits: u32) -> impl Strategy<Value = PauliString> {
    prop::collection::btree_map(0..num_qubits, 0_i64..3, 0..=num_qubits as usize).prop_map(
        |m| {
            m.into_iter()
                .map(|(qubit, index)| (QubitId(qubit), Pauli::by_index(index)))
                .collect()
        },
    )
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    prop::collection::vec((0_u32..3, -3.0_f64..3.0, 0_u32..3), 0..10).prop_map(|ops| {
        let mut circuit = Circuit::with_size("random", 3);
        for (qubit, theta, kind) in ops {
            let target = QubitId((qubit + 1) % 3);
            match kind {
                0 => circuit.ry(theta, QubitId(qubit)),
                1 => circuit.rx(theta, QubitId(qubit)),
                _ => circuit.cx(QubitId(qubit), target),
            }
            .unwrap();
        }
        circuit
    })
}

proptest! {
    #[test]
    fn negating_the_string_negates_the_value(
        circuit in arb_circuit(),
        ps in arb_pauli_string(3),
    ) {
        let plus = ExactExpectation::new(ps.clone()).evaluate(&circuit).unwrap();
        let minus = ExactExpectation::new(-ps).evaluate(&circuit).unwrap();
        prop_assert!((plus + minus).abs() < 1e-12);
        prop_assert!(plus.abs() <= 1.0 + 1e-9);
    }

    #[test]
    fn relabelled_state_and_observable_agree(
        circuit in arb_circuit(),
        ps in arb_pauli_string(3),
    ) {
        let shift = |q: QubitId| QubitId(q.0 + 10);
        let mut moved_circuit =
            Circuit::with_qubits("moved", circuit.qubits().iter().map(|q| shift(*q))).unwrap();
        moved_circuit
            .extend(circuit.instructions().iter().map(|inst| inst.map_qubits(shift)))
            .unwrap();

        let e = ExactExpectation::new(ps.clone()).with_key("k");
        let targets: Vec<QubitId> = ps.qubits().map(shift).collect();
        let moved = e.with_qubits(&targets).unwrap();
        prop_assert_eq!(moved.key(), Some("k"));

        let a = e.evaluate(&circuit).unwrap();
        let b = moved.evaluate(&moved_circuit).unwrap();
        prop_assert!((a - b).abs() < 1e-12);

        let sources: Vec<QubitId> = ps.qubits().collect();
        prop_assert_eq!(moved.with_qubits(&sources).unwrap(), e);
    }
}
