//! Integration tests for the sampled estimator and the evaluator factory.

use expval_expectation::{
    ApproximateExpectation, EvaluatorConfig, ExactExpectation, Expectation, ExpectationError,
    PauliStringExpectation, pauli_string_expectation,
};
use expval_ir::{Circuit, QubitId};
use expval_pauli::{Pauli, PauliString};
use expval_sim::{StatevectorSampler, unitary};
use ndarray::{Array2, array, linalg::kron};
use num_complex::Complex64;

fn q(i: u32) -> QubitId {
    QubitId(i)
}

fn approx(s: &str, n: usize) -> ApproximateExpectation {
    ApproximateExpectation::new(s.parse().unwrap(), n).unwrap()
}

fn pauli_matrix(p: Pauli) -> Array2<Complex64> {
    Array2::from_shape_vec((2, 2), p.matrix().data.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Basis change
// ---------------------------------------------------------------------------

#[test]
fn basis_change_diagonalises_two_qubit_strings() {
    let diagonal = array![1.0, -1.0, -1.0, 1.0].mapv(|v| Complex64::new(v, 0.0));
    let expected = Array2::from_diag(&diagonal);
    for (p0, p1) in [
        (Pauli::Z, Pauli::Z),
        (Pauli::Z, Pauli::X),
        (Pauli::X, Pauli::X),
        (Pauli::X, Pauli::Y),
    ] {
        let ps = PauliString::from_ops([(q(0), p0), (q(1), p1)]).unwrap();
        let e = ApproximateExpectation::new(ps, 1).unwrap();

        let mut circuit = Circuit::with_size("basis_change", 2);
        circuit.extend(e.measurement_basis_change()).unwrap();
        let u = unitary(&circuit).unwrap();

        // q0 is the least significant bit, so it is the right-hand factor.
        let observable = kron(&pauli_matrix(p1), &pauli_matrix(p0));
        let u_dagger = u.t().mapv(|v| v.conj());
        let rotated = u.dot(&observable).dot(&u_dagger);

        for ((i, j), v) in rotated.indexed_iter() {
            assert!(
                (v - expected[[i, j]]).norm() < 1e-10,
                "{p0}{p1}: entry ({i}, {j}) = {v}"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Sample reduction
// ---------------------------------------------------------------------------

#[test]
fn sample_rows_reduce_by_parity() {
    let e = approx("Z0*Z1*Z2", 1);
    let cases = [
        (array![[0_u8, 0, 0], [0, 0, 0]], 1.0),
        (array![[0_u8, 0, 0], [0, 0, 1]], 0.0),
        (array![[0_u8, 1, 0], [1, 0, 0]], -1.0),
        (array![[0_u8, 1, 0], [1, 1, 1]], -1.0),
    ];
    for (samples, expected) in cases {
        let value = e.value_from_samples(samples.view()).unwrap();
        assert!((value - expected).abs() < 1e-12, "{samples:?}: {value}");
    }
}

#[test]
fn negation_flips_the_estimate() {
    let samples = array![[0_u8, 1], [1, 1], [0, 0]];
    let plus = approx("X0*Y1", 3);
    let minus = approx("-X0*Y1", 3);
    let a = plus.value_from_samples(samples.view()).unwrap();
    let b = minus.value_from_samples(samples.view()).unwrap();
    assert!((a - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(a, -b);
}

#[test]
fn column_count_must_match_domain() {
    let e = approx("Z0*Z1", 1);
    assert!(matches!(
        e.value_from_samples(array![[0_u8]].view()),
        Err(ExpectationError::ShapeMismatch { expected: 2, got: 1 })
    ));
}

// ---------------------------------------------------------------------------
// Accessors and substitution
// ---------------------------------------------------------------------------

fn nine_qubit_string() -> PauliString {
    QubitId::range(0, 9)
        .into_iter()
        .map(|qubit| (qubit, Pauli::by_index(i64::from(qubit.0))))
        .collect::<PauliString>()
        .with_negated(true)
}

#[test]
fn properties_are_exposed() {
    let ps = nine_qubit_string();
    let e = ApproximateExpectation::new(ps.clone(), 5).unwrap().with_key("a");
    assert_eq!(e.qubits(), QubitId::range(0, 9));
    assert_eq!(e.pauli_string(), &ps);
    assert_eq!(e.num_samples(), 5);
    assert_eq!(e.key(), Some("a"));
}

#[test]
fn with_qubits_shifts_domain() {
    let e = ApproximateExpectation::new(nine_qubit_string(), 5)
        .unwrap()
        .with_key("a");
    let moved = e.with_qubits(&QubitId::range(9, 18)).unwrap();
    assert_eq!(moved.qubits(), QubitId::range(9, 18));
    assert_eq!(moved.num_samples(), 5);
    assert_eq!(moved.key(), Some("a"));
    assert!(moved.pauli_string().negated());
    for i in 0..9 {
        assert_eq!(
            moved.pauli_string().get(q(i + 9)),
            Some(Pauli::by_index(i64::from(i)))
        );
    }
    assert_eq!(moved.with_qubits(&QubitId::range(0, 9)).unwrap(), e);

    assert!(matches!(
        e.with_qubits(&QubitId::range(0, 8)),
        Err(ExpectationError::Pauli(_))
    ));
}

#[test]
fn factory_selects_evaluator() {
    let ps: PauliString = "Z0*X1".parse().unwrap();

    let exact = pauli_string_expectation(ps.clone(), None, None).unwrap();
    assert_eq!(exact, PauliStringExpectation::Exact(ExactExpectation::new(ps.clone())));
    assert!(exact.is_exact());
    assert_eq!(exact.num_samples(), None);

    let sampled = pauli_string_expectation(ps.clone(), Some(5), Some("a".to_string())).unwrap();
    let expected = ApproximateExpectation::new(ps.clone(), 5).unwrap().with_key("a");
    assert_eq!(sampled, PauliStringExpectation::from(expected));
    assert_eq!(sampled.num_samples(), Some(5));
    assert_eq!(sampled.key(), Some("a"));

    assert!(matches!(
        pauli_string_expectation(ps, Some(0), None),
        Err(ExpectationError::ZeroSamples)
    ));
}

// ---------------------------------------------------------------------------
// Sampling end to end
// ---------------------------------------------------------------------------

#[test]
fn bell_state_estimates_are_exact_for_eigenstates() {
    let bell = Circuit::bell().unwrap();
    let sampler = StatevectorSampler::seeded(11);
    let cases = [("X0*X1", 1.0), ("Y0*Y1", -1.0), ("Z0*Z1", 1.0), ("-Z0*Z1", -1.0)];
    for (observable, expected) in cases {
        let value = approx(observable, 200).estimate(&bell, &sampler).unwrap();
        assert_eq!(value, expected, "{observable}");
    }
}

#[test]
fn measurements_outside_the_domain_are_ignored() {
    let mut circuit = Circuit::with_size("c", 3);
    circuit.x(q(1)).unwrap().h(q(2)).unwrap();
    circuit.measure([q(1)]).unwrap();
    let sampler = StatevectorSampler::seeded(1);

    assert_eq!(approx("Z0", 10).estimate(&circuit, &sampler).unwrap(), 1.0);
    // q1 reads 1 on every row and would flip the parity if it were counted
    assert_eq!(approx("Z0*X2", 10).estimate(&circuit, &sampler).unwrap(), 1.0);
    assert_eq!(approx("-X2", 10).estimate(&circuit, &sampler).unwrap(), -1.0);
}

#[test]
fn estimate_converges_to_exact_value() {
    let mut circuit = Circuit::with_size("c", 2);
    circuit
        .ry(0.7, q(0))
        .unwrap()
        .rx(1.1, q(1))
        .unwrap()
        .cx(q(0), q(1))
        .unwrap();
    let sampler = StatevectorSampler::seeded(2024);
    for observable in ["Z0", "Y1", "X0*Z1"] {
        let ps: PauliString = observable.parse().unwrap();
        let exact = ExactExpectation::new(ps.clone()).evaluate(&circuit).unwrap();
        let estimate = ApproximateExpectation::new(ps, 20_000)
            .unwrap()
            .estimate(&circuit, &sampler)
            .unwrap();
        assert!(
            (exact - estimate).abs() < 0.05,
            "{observable}: exact {exact}, estimate {estimate}"
        );
    }
}

#[test]
fn factory_evaluators_agree_on_eigenstate() {
    let mut circuit = Circuit::with_size("c", 1);
    circuit.h(q(0)).unwrap();
    let sampler = StatevectorSampler::seeded(3);
    let config = EvaluatorConfig::default();
    let ps: PauliString = "X0".parse().unwrap();
    for samples in [None, Some(50)] {
        let e = pauli_string_expectation(ps.clone(), samples, None).unwrap();
        let value = e.evaluate(&circuit, &sampler, &config).unwrap();
        assert!((value - 1.0).abs() < 1e-10);
    }
}
