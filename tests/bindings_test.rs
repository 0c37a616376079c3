mod common;

use mlbridge::ffi::stub::testing::{self, SnapshotValue};
use mlbridge::*;
use ndarray::{s, Array2};

fn points(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| (i * cols + j) as f64)
}

fn labels(n: usize) -> Vec<u64> {
    (0..n as u64).map(|i| i % 2).collect()
}

/// Runs `call` twice: once stubbed to fail, expecting the binding error, and
/// once normally, expecting success.
fn check_failure_then_success<T, F>(binding: &'static str, call: F)
where
    F: Fn() -> Result<T>,
{
    testing::fail_next_run();
    match call() {
        Err(Error::NativeCallFailed { binding: b }) => assert_eq!(b, binding),
        other => panic!(
            "binding '{}' should surface the native failure, got {:?}",
            binding,
            other.is_ok()
        ),
    }
    assert!(call().is_ok(), "binding '{}' should succeed", binding);
}

#[test]
fn every_binding_surfaces_a_native_failure() {
    let _guard = common::stub_guard();

    check_failure_then_success("adaboost", || {
        adaboost(&AdaboostOptions {
            training: Some(points(6, 2)),
            labels: Some(labels(6)),
            ..Default::default()
        })
    });
    check_failure_then_success("cf", || {
        cf(&CfOptions {
            training: Some(points(9, 3)),
            ..Default::default()
        })
    });
    check_failure_then_success("dbscan", || {
        dbscan(points(6, 2).view(), &DbscanOptions::default())
    });
    check_failure_then_success("decision_tree", || {
        decision_tree(&DecisionTreeOptions {
            training: Some(points(6, 2)),
            labels: Some(labels(6)),
            ..Default::default()
        })
    });
    check_failure_then_success("hmm_train", || {
        hmm_train(&HmmTrainOptions {
            input: Some(points(10, 1)),
            states: Some(2),
            ..Default::default()
        })
    });
    check_failure_then_success("kmeans", || {
        kmeans(points(6, 2).view(), 2, &KmeansOptions::default())
    });
    check_failure_then_success("knn", || {
        knn(
            2,
            &KnnOptions {
                reference: Some(points(6, 2)),
                ..Default::default()
            },
        )
    });
    check_failure_then_success("linear_regression", || {
        linear_regression(&LinearRegressionOptions {
            training: Some(points(6, 2)),
            training_responses: Some(vec![0.0; 6]),
            ..Default::default()
        })
    });
    check_failure_then_success("logistic_regression", || {
        logistic_regression(&LogisticRegressionOptions {
            training: Some(points(6, 2)),
            labels: Some(labels(6)),
            ..Default::default()
        })
    });
    check_failure_then_success("pca", || {
        pca(points(6, 3).view(), &PcaOptions::default())
    });
    check_failure_then_success("random_forest", || {
        random_forest(&RandomForestOptions {
            training: Some(points(6, 2)),
            labels: Some(labels(6)),
            ..Default::default()
        })
    });
    check_failure_then_success("sparse_coding", || {
        sparse_coding(points(6, 2).view(), 2, &SparseCodingOptions::default())
    });
}

#[test]
fn missing_required_inputs_fail_natively() {
    let _guard = common::stub_guard();

    let err = decision_tree(&DecisionTreeOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NativeCallFailed { .. }));

    let err = knn(0, &KnnOptions {
        reference: Some(points(4, 2)),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::NativeCallFailed { .. }));
}

#[test]
fn strings_with_an_interior_nul_are_rejected_before_the_native_call() {
    let _guard = common::stub_guard();

    // A run of a different binding, to mark what the stub last saw.
    dbscan(points(4, 2).view(), &DbscanOptions::default()).unwrap();

    let err = kmeans(
        points(6, 2).view(),
        2,
        &KmeansOptions {
            algorithm: Some("el\0kan".to_string()),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)), "{:?}", err);

    // The entry point was never invoked.
    assert_eq!(testing::last_run().unwrap().binding, "dbscan");
}

#[test]
fn seeds_beyond_the_signed_integer_range_are_rejected() {
    let _guard = common::stub_guard();

    dbscan(points(4, 2).view(), &DbscanOptions::default()).unwrap();

    let err = kmeans(
        points(6, 2).view(),
        2,
        &KmeansOptions {
            seed: Some(u64::MAX),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)), "{:?}", err);
    assert_eq!(testing::last_run().unwrap().binding, "dbscan");

    // A representable seed still goes through as a plain integer.
    kmeans(
        points(6, 2).view(),
        2,
        &KmeansOptions {
            seed: Some(42),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        testing::last_run().unwrap().values.get("seed"),
        Some(&SnapshotValue::Int(42))
    );
}

#[test]
fn verbose_mode_survives_a_full_binding_run() {
    let _guard = common::stub_guard();

    mlbridge::set_verbose(true);
    kmeans(points(4, 2).view(), 2, &KmeansOptions::default()).unwrap();
    mlbridge::set_verbose(false);
    kmeans(points(4, 2).view(), 2, &KmeansOptions::default()).unwrap();
}

#[test]
fn classifier_outputs_are_only_produced_for_a_test_matrix() {
    let _guard = common::stub_guard();

    let without_test = adaboost(&AdaboostOptions {
        training: Some(points(6, 2)),
        labels: Some(labels(6)),
        ..Default::default()
    })
    .unwrap();
    assert!(without_test.predictions.is_none());
    assert!(without_test.probabilities.is_none());

    let run = testing::last_run().unwrap();
    assert!(run.passed.contains("output_model"));
    assert!(!run.passed.contains("predictions"));
    assert!(!run.passed.contains("probabilities"));

    let with_test = adaboost(&AdaboostOptions {
        training: Some(points(6, 2)),
        labels: Some(labels(6)),
        test: Some(points(3, 2)),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(with_test.predictions.as_ref().map(Vec::len), Some(3));
    // Two classes, three test points, host orientation.
    assert_eq!(with_test.probabilities.as_ref().map(|p| p.dim()), Some((3, 2)));
}

#[test]
fn knn_returns_neighbor_and_distance_matrices_in_host_orientation() {
    let _guard = common::stub_guard();

    let result = knn(
        2,
        &KnnOptions {
            reference: Some(points(5, 3)),
            ..Default::default()
        },
    )
    .unwrap();

    let neighbors = result.neighbors.unwrap();
    let distances = result.distances.unwrap();
    assert_eq!(neighbors.dim(), (5, 2));
    assert_eq!(distances.dim(), (5, 2));
    for row in distances.outer_iter() {
        assert_eq!(row[0], 0.0);
        assert_eq!(row[1], 1.0);
    }
}

#[test]
fn pca_truncates_dimensions() {
    let _guard = common::stub_guard();

    let input = points(6, 4);
    let result = pca(
        input.view(),
        &PcaOptions {
            new_dimensionality: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(result.output.dim(), (6, 2));
    assert_eq!(result.output, input.slice(s![.., ..2]));
}

#[test]
fn dbscan_assigns_every_point() {
    let _guard = common::stub_guard();

    let input = points(7, 2);
    let result = dbscan(input.view(), &DbscanOptions::default()).unwrap();
    assert_eq!(result.assignments.len(), 7);
    assert_eq!(result.centroids.dim(), (1, 2));
    assert_eq!(result.centroids.row(0), input.row(0));
}

#[test]
fn cf_recommends_for_queried_users() {
    let _guard = common::stub_guard();

    let result = cf(&CfOptions {
        training: Some(points(9, 3)),
        query: Some(vec![0, 1, 2]),
        recommendations: Some(4),
        ..Default::default()
    })
    .unwrap();
    // Four recommendations per queried user, one user per row.
    assert_eq!(result.output.map(|o| o.dim()), Some((3, 4)));
}

#[test]
fn sparse_coding_learns_a_dictionary_and_encodes_test_points() {
    let _guard = common::stub_guard();

    let training = points(5, 3);
    let result = sparse_coding(
        training.view(),
        2,
        &SparseCodingOptions {
            test: Some(points(4, 3)),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(result.dictionary.dim(), (2, 3));
    assert_eq!(result.dictionary, training.slice(s![..2, ..]));
    assert_eq!(result.codes.map(|c| c.dim()), Some((4, 2)));
}

#[test]
fn linear_regression_predicts_for_test_points() {
    let _guard = common::stub_guard();

    let result = linear_regression(&LinearRegressionOptions {
        training: Some(points(6, 2)),
        training_responses: Some(vec![1.0; 6]),
        test: Some(points(4, 2)),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(result.output_predictions.map(|p| p.len()), Some(4));
}
