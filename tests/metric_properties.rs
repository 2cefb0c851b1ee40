//! Integration tests for the coverage and uniformity metrics.

use coverage_metrics::prelude::*;

/// Deterministic pseudo-random count vectors for property checks.
fn synthetic_count_vectors(n_vectors: usize) -> Vec<Vec<u64>> {
    let mut seed = 42u64;
    let mut simple_rand = |bound: u64| -> u64 {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        ((seed >> 16) & 0x7FFF) % bound
    };

    (0..n_vectors)
        .map(|_| {
            let n_categories = 1 + simple_rand(12) as usize;
            let mut values: Vec<u64> = (0..n_categories).map(|_| simple_rand(60)).collect();
            // Guarantee at least one item.
            values[0] += 1;
            values
        })
        .collect()
}

#[test]
fn test_coverage_at_zero_is_classical_coverage() {
    for values in synthetic_count_vectors(50) {
        let counts = CountVector::from_dense(&values);
        let total_categories = values.len() + 3;
        let nonzero = values.iter().filter(|&&v| v > 0).count();
        let expected = nonzero as f64 / total_categories as f64;
        assert_eq!(coverage_at_k(&counts, 0, total_categories).unwrap(), expected);
    }
}

#[test]
fn test_coverage_at_k_non_increasing() {
    for values in synthetic_count_vectors(30) {
        let counts = CountVector::from_dense(&values);
        let curve = coverage_curve_k(&counts, values.len(), None).unwrap();
        for pair in curve.points.windows(2) {
            assert!(pair[1].coverage <= pair[0].coverage);
        }
        assert_eq!(curve.points.last().unwrap().coverage, 0.0);
    }
}

#[test]
fn test_literal_coverage_at_k_example() {
    let counts = CountVector::from_pairs([("A", 10), ("B", 15), ("C", 35), ("D", 50)]);
    assert_eq!(counts.total().unwrap(), 100);
    let expected = [
        (0, 1.0),
        (5, 1.0),
        (9, 1.0),
        (10, 0.75),
        (14, 0.75),
        (15, 0.5),
        (35, 0.25),
        (49, 0.25),
        (50, 0.0),
    ];
    for (k, value) in expected {
        assert_eq!(coverage_at_k(&counts, k, 4).unwrap(), value);
    }
}

#[test]
fn test_auc_uniform_is_one_for_any_size() {
    for n_categories in 1..=30usize {
        for multiple in [1u64, 3, 10] {
            let counts = CountVector::from_dense(&vec![multiple; n_categories]);
            assert_eq!(auc_coverage(&counts, n_categories).unwrap(), 1.0);
        }
    }
}

#[test]
fn test_auc_strictly_positive_and_bounded() {
    for values in synthetic_count_vectors(100) {
        let counts = CountVector::from_dense(&values);
        for extra in [0usize, 1, 50] {
            let auc = auc_coverage(&counts, values.len() + extra).unwrap();
            assert!(auc > 0.0);
            assert!(auc <= 1.0);
        }
    }
}

#[test]
fn test_auc_permutation_invariant() {
    for values in synthetic_count_vectors(30) {
        let forward = CountVector::from_dense(&values);
        let mut reversed_values = values.clone();
        reversed_values.reverse();
        let reversed = CountVector::from_pairs(
            reversed_values
                .iter()
                .enumerate()
                .map(|(i, &v)| (format!("category_{}", i), v)),
        );
        let n = values.len();
        assert_eq!(
            auc_coverage(&forward, n).unwrap(),
            auc_coverage(&reversed, n).unwrap()
        );
    }
}

#[test]
fn test_end_to_end_reference_distributions() {
    let cases = [
        ([25, 25, 25, 25], 1.0),
        ([35, 30, 25, 10], 0.75),
        ([50, 30, 15, 5], 0.5),
        ([90, 3, 3, 4], 0.25),
    ];
    for (values, expected) in cases {
        let counts = CountVector::from_pairs(["a", "b", "c", "d"].into_iter().zip(values));
        let auc = auc_coverage(&counts, 4).unwrap();
        assert!((auc - expected).abs() < 1e-3, "{:?}: {}", values, auc);
    }
}

#[test]
fn test_auc_unchanged_under_replication() {
    // Includes vectors such as (2, 1) whose floored even point does not scale.
    let mut vectors = synthetic_count_vectors(60);
    vectors.push(vec![2, 1]);
    vectors.push(vec![3, 1, 1]);
    for values in vectors {
        let n = values.len();
        let base = auc_coverage(&CountVector::from_dense(&values), n).unwrap();
        for factor in [2u64, 3, 7] {
            let scaled: Vec<u64> = values.iter().map(|v| v * factor).collect();
            let auc = auc_coverage(&CountVector::from_dense(&scaled), n).unwrap();
            assert_eq!(auc, base, "{:?} x {}", values, factor);
        }
    }
}

#[test]
fn test_auc_is_one_only_for_uniform() {
    let mut vectors = synthetic_count_vectors(200);
    vectors.push(vec![2, 1]);
    vectors.push(vec![6, 2, 2]);
    vectors.push(vec![26, 25, 25, 24]);
    for values in vectors {
        let counts = CountVector::from_dense(&values);
        let uniform = values.iter().all(|&v| v == values[0]);
        let auc = auc_coverage(&counts, values.len()).unwrap();
        assert_eq!(auc == 1.0, uniform, "{:?}: {}", values, auc);
        // A larger declared space leaves unseen categories below the mean.
        assert!(auc_coverage(&counts, values.len() + 1).unwrap() < 1.0);
    }
}

#[test]
fn test_coverage_at_q_uniform_jump() {
    for n in [1usize, 2, 4, 5, 10, 100] {
        let probs = ProbabilityVector::uniform(n).unwrap();
        let u = 1.0 / n as f64;
        assert_eq!(coverage_at_q(&probs, u).unwrap(), n);
        if u < 1.0 {
            assert_eq!(coverage_at_q(&probs, (u + 1e-6).min(1.0)).unwrap(), 0);
        }
        assert_eq!(coverage_at_q(&probs, 0.0).unwrap(), n);
    }
}

#[test]
fn test_coverage_at_q_non_increasing() {
    for values in synthetic_count_vectors(20) {
        let counts = CountVector::from_dense(&values);
        let probs = counts.to_probabilities(values.len()).unwrap();
        let mut previous = usize::MAX;
        for step in 0..=200 {
            let covered = coverage_at_q(&probs, step as f64 / 200.0).unwrap();
            assert!(covered <= previous);
            previous = covered;
        }
    }
}

#[test]
fn test_dfu_bounds_and_extremes() {
    for n in 2..=25 {
        assert_eq!(
            deviation_from_uniform(&ProbabilityVector::uniform(n).unwrap()).unwrap(),
            0.0
        );
        assert_eq!(
            deviation_from_uniform(&ProbabilityVector::point_mass("x", n).unwrap()).unwrap(),
            1.0
        );
    }
    for values in synthetic_count_vectors(50) {
        let counts = CountVector::from_dense(&values);
        let probs = counts.to_probabilities(values.len() + 1).unwrap();
        let dfu = deviation_from_uniform(&probs).unwrap();
        assert!((0.0..=1.0).contains(&dfu));
    }
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let counts = CountVector::from_pairs([("a", 1), ("b", 2)]);
    assert!(matches!(
        coverage_at_k(&counts, 0, 1),
        Err(MetricError::InvalidArgument(_))
    ));
    assert!(matches!(
        auc_coverage(&CountVector::from_pairs([("a", 0)]), 1),
        Err(MetricError::InvalidArgument(_))
    ));

    let probs = ProbabilityVector::uniform(3).unwrap();
    assert!(matches!(
        coverage_at_q(&probs, 1.5),
        Err(MetricError::InvalidArgument(_))
    ));
    assert!(matches!(
        ProbabilityVector::new([("a", 0.7), ("b", 0.7)]),
        Err(MetricError::Normalization(_))
    ));
    assert!(matches!(
        ProbabilityVector::new([("a", 1.5), ("b", -0.5)]),
        Err(MetricError::Normalization(_))
    ));
}

#[test]
fn test_metrics_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CountVector>();
    assert_send_sync::<ProbabilityVector>();
    assert_send_sync::<EvennessProfile>();

    let counts = CountVector::from_dense(&[35, 30, 25, 10]);
    let expected = auc_coverage(&counts, 4).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| auc_coverage(&counts, 4).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
