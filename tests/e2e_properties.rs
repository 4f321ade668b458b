//! Property tests: for arbitrary dirty-but-bounded DSMs the search
//! terminates and the aggregates stay normalized.

use std::sync::Arc;

use proptest::prelude::*;

use cpm_rs::{Cell, ChangePropagationTree, Dsm, Instigator};

const N: usize = 5;

fn build_dsm(weights: &[Vec<f64>]) -> Arc<Dsm> {
    let matrix = weights
        .iter()
        .map(|row| row.iter().copied().map(Cell::from).collect())
        .collect();
    let columns = (0..N).map(|i| format!("n{i}")).collect();
    Arc::new(Dsm::new(matrix, columns, Instigator::Column).unwrap())
}

fn arb_weights() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(0.0f64..=1.0, N), N)
}

proptest! {
    #[test]
    fn aggregates_stay_normalized(
        weights in arb_weights(),
        start in 0..N,
        target in 0..N,
        depth in 0usize..=4,
    ) {
        let dsm = build_dsm(&weights);
        let tree = ChangePropagationTree::new(start, target, Arc::clone(&dsm), dsm).unwrap();
        let outcome = tree.propagate(depth);

        let p = outcome.probability();
        // Impact DSM mirrors the likelihood DSM, so every final-hop
        // impact edge exists.
        let r = outcome.risk().unwrap();

        prop_assert!((0.0..=1.0).contains(&p), "probability {p}");
        prop_assert!((0.0..=1.0).contains(&r), "risk {r}");
        // Impact weights are at most 1, so risk never exceeds probability.
        prop_assert!(r <= p + 1e-12, "risk {r} > probability {p}");
    }

    #[test]
    fn propagate_twice_agrees(
        weights in arb_weights(),
        start in 0..N,
        target in 0..N,
    ) {
        let dsm = build_dsm(&weights);
        let tree = ChangePropagationTree::new(start, target, Arc::clone(&dsm), dsm).unwrap();

        let first = tree.propagate(3);
        let second = tree.propagate(3);

        prop_assert_eq!(first.probability(), second.probability());
        prop_assert_eq!(first.risk().unwrap(), second.risk().unwrap());
        prop_assert_eq!(first.leaf_count(), second.leaf_count());
    }

    #[test]
    fn saturated_cyclic_matrix_terminates(weight in 0.01f64..=1.0) {
        let weights: Vec<Vec<f64>> = (0..N)
            .map(|_| (0..N).map(|_| weight).collect())
            .collect();
        let dsm = build_dsm(&weights);
        let tree = ChangePropagationTree::new(0, N - 1, Arc::clone(&dsm), dsm).unwrap();
        let outcome = tree.propagate(4);

        let p = outcome.probability();
        prop_assert!(p > 0.0 && p <= 1.0);
    }
}
