mod common;

use mlbridge::ffi::stub::testing::{self, SnapshotValue};
use mlbridge::{kmeans, KmeansOptions, MatrixLayout};
use ndarray::{s, Array2};

fn sample_points(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| (i * cols + j) as f64)
}

#[test]
fn kmeans_populates_the_parameter_set_as_documented() {
    let _guard = common::stub_guard();

    let input = sample_points(100, 4);
    kmeans(input.view(), 3, &KmeansOptions::default()).unwrap();

    let run = testing::last_run().unwrap();
    assert_eq!(run.binding, "kmeans");
    // A 100x4 row-major host matrix becomes a 4x100 native matrix.
    assert_eq!(
        run.values.get("input"),
        Some(&SnapshotValue::Mat { rows: 4, cols: 100 })
    );
    assert_eq!(run.values.get("clusters"), Some(&SnapshotValue::Int(3)));
    assert!(run.passed.contains("centroid"));
    assert!(run.passed.contains("output"));
    assert_eq!(run.set_counts.get("input"), Some(&1));
    assert_eq!(run.set_counts.get("clusters"), Some(&1));
}

#[test]
fn omitted_options_leave_their_keys_absent() {
    let _guard = common::stub_guard();

    let input = sample_points(10, 2);
    kmeans(input.view(), 2, &KmeansOptions::default()).unwrap();

    let run = testing::last_run().unwrap();
    assert_eq!(run.values.len(), 2, "only input and clusters: {:?}", run.values);
    assert!(!run.values.contains_key("algorithm"));
    assert!(!run.values.contains_key("max_iterations"));
    assert!(!run.values.contains_key("seed"));
}

#[test]
fn provided_options_are_set_exactly_once_with_the_right_type() {
    let _guard = common::stub_guard();

    let input = sample_points(10, 2);
    let options = KmeansOptions {
        algorithm: Some("elkan".to_string()),
        allow_empty_clusters: Some(true),
        max_iterations: Some(250),
        percentage: Some(0.1),
        seed: Some(42),
        ..Default::default()
    };
    kmeans(input.view(), 2, &options).unwrap();

    let run = testing::last_run().unwrap();
    assert_eq!(
        run.values.get("algorithm"),
        Some(&SnapshotValue::Str("elkan".to_string()))
    );
    assert_eq!(
        run.values.get("allow_empty_clusters"),
        Some(&SnapshotValue::Bool(true))
    );
    assert_eq!(
        run.values.get("max_iterations"),
        Some(&SnapshotValue::Int(250))
    );
    assert_eq!(run.values.get("percentage"), Some(&SnapshotValue::Double(0.1)));
    assert_eq!(run.values.get("seed"), Some(&SnapshotValue::Int(42)));
    for key in ["algorithm", "allow_empty_clusters", "max_iterations", "percentage", "seed"] {
        assert_eq!(run.set_counts.get(key), Some(&1), "{}", key);
    }
}

#[test]
fn centroids_come_back_in_host_orientation() {
    let _guard = common::stub_guard();

    let input = sample_points(100, 4);
    let result = kmeans(input.view(), 3, &KmeansOptions::default()).unwrap();

    // The stub's centroids are the first three points.
    assert_eq!(result.centroid.dim(), (3, 4));
    assert_eq!(result.centroid, input.slice(s![..3, ..]));

    // The output matrix is the input with the assignment appended per point.
    assert_eq!(result.output.dim(), (100, 5));
    assert_eq!(result.output.slice(s![.., ..4]), input);
    for (i, row) in result.output.outer_iter().enumerate() {
        assert_eq!(row[4], (i % 3) as f64);
    }
}

#[test]
fn points_are_columns_transposes_inputs_and_outputs_consistently() {
    let _guard = common::stub_guard();

    let input = sample_points(100, 4);
    let by_rows = kmeans(input.view(), 3, &KmeansOptions::default()).unwrap();

    let transposed = input.t().to_owned();
    let options = KmeansOptions {
        layout: MatrixLayout::PointsAreColumns,
        ..Default::default()
    };
    let by_cols = kmeans(transposed.view(), 3, &options).unwrap();

    // Same native matrix either way.
    let run = testing::last_run().unwrap();
    assert_eq!(
        run.values.get("input"),
        Some(&SnapshotValue::Mat { rows: 4, cols: 100 })
    );

    // Outputs flip orientation together with the inputs.
    assert_eq!(by_cols.centroid.dim(), (4, 3));
    assert_eq!(by_cols.centroid, by_rows.centroid.t());
    assert_eq!(by_cols.output.dim(), (5, 100));
    assert_eq!(by_cols.output, by_rows.output.t());
}

#[test]
fn more_clusters_than_points_is_a_native_failure() {
    let _guard = common::stub_guard();

    let input = sample_points(2, 2);
    let err = kmeans(input.view(), 5, &KmeansOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        mlbridge::Error::NativeCallFailed { binding: "kmeans" }
    ));
}
