//! Property-based tests for the Pauli cycle and Pauli strings.

use expval_ir::QubitId;
use expval_pauli::{Pauli, PauliString};
use proptest::prelude::*;

fn arb_pauli() -> impl Strategy<Value = Pauli> {
    prop::sample::select(Pauli::ALL.to_vec())
}

fn arb_pauli_string() -> impl Strategy<Value = PauliString> {
    (
        prop::collection::btree_map(0_u32..32, arb_pauli(), 0..8),
        any::<bool>(),
    )
        .prop_map(|(map, negated)| {
            PauliString::new(map.into_iter().map(|(q, p)| (QubitId(q), p)).collect(), negated)
        })
}

// ---------------------------------------------------------------------------
// Single-qubit cycle
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn by_index_is_periodic(i in -1000_i64..1000) {
        prop_assert_eq!(Pauli::by_index(i), Pauli::by_index(i + 3));
        prop_assert_eq!(Pauli::by_index(i).index(), i.rem_euclid(3));
    }

    #[test]
    fn relative_index_inverts_by_relative_index(a in arb_pauli(), b in arb_pauli()) {
        prop_assert_eq!(Pauli::by_relative_index(b, a.relative_index(b)), a);
        prop_assert_eq!(a.relative_index(b), -b.relative_index(a));
    }

    #[test]
    fn third_completes_the_cycle(a in arb_pauli(), b in arb_pauli()) {
        prop_assume!(a != b);
        let c = a.third(b);
        prop_assert!(c != a && c != b);
        prop_assert_eq!(c, b.third(a));
        prop_assert_eq!(a.third(c), b);
    }

    #[test]
    fn exactly_one_relation_holds(a in arb_pauli(), b in arb_pauli()) {
        let relations = [a == b, a.is_less_than(b), a.is_greater_than(b)];
        prop_assert_eq!(relations.iter().filter(|r| **r).count(), 1);
        prop_assert_eq!(a.commutes_with(b), a == b);
        prop_assert_eq!(a.is_greater_than(b), b.is_less_than(a));
    }
}

#[test]
fn ordering_is_a_three_cycle() {
    for p in Pauli::ALL {
        let next = Pauli::by_relative_index(p, 1);
        assert!(next.is_greater_than(p));
        assert!(Pauli::by_relative_index(next, 1).is_greater_than(next));
        assert!(p.is_greater_than(Pauli::by_relative_index(next, 1)));
    }
}

// ---------------------------------------------------------------------------
// Pauli strings
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn with_qubits_can_be_undone(
        ps in arb_pauli_string(),
        offset in 100_u32..200,
        reversed in any::<bool>(),
    ) {
        let old: Vec<QubitId> = ps.qubits().collect();
        let mut new: Vec<QubitId> = old.iter().map(|q| QubitId(q.0 + offset)).collect();
        if reversed {
            new.reverse();
        }
        let moved = ps.with_qubits(&new).unwrap();
        prop_assert_eq!(moved.len(), ps.len());
        prop_assert_eq!(moved.negated(), ps.negated());
        for (q_old, q_new) in old.iter().zip(&new) {
            prop_assert_eq!(moved.get(*q_new), ps.get(*q_old));
        }

        // The inverse lists, for each moved qubit in ascending order, the
        // original qubit it came from.
        let back: Vec<QubitId> = moved
            .qubits()
            .map(|q| old[new.iter().position(|n| *n == q).unwrap()])
            .collect();
        prop_assert_eq!(moved.with_qubits(&back).unwrap(), ps);
    }

    #[test]
    fn double_negation_is_identity(ps in arb_pauli_string()) {
        prop_assert_eq!(-(-ps.clone()), ps.clone());
        prop_assert_eq!((-&ps).sign(), -ps.sign());
    }
}
