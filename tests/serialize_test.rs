mod common;

use std::fs::File;
use std::io::Write as _;

use mlbridge::ffi::stub::testing;
use mlbridge::io::{load_model, save_model};
use mlbridge::models::{DecisionTreeModel, KnnModel};
use mlbridge::*;
use ndarray::Array2;

fn trained_tree() -> ModelHandle<DecisionTreeModel> {
    let training = Array2::from_shape_fn((8, 3), |(i, j)| (i + j) as f64);
    let labels: Vec<u64> = (0..8).map(|i| i % 2).collect();
    decision_tree(&DecisionTreeOptions {
        training: Some(training),
        labels: Some(labels),
        ..Default::default()
    })
    .unwrap()
    .output_model
}

#[test]
fn a_serialized_model_round_trips_and_stays_usable() {
    let _guard = common::stub_guard();

    let model = trained_tree();
    let bytes = model.to_bytes().unwrap();
    assert!(!bytes.is_empty());

    let restored = ModelHandle::<DecisionTreeModel>::from_bytes(&bytes).unwrap();
    assert!(restored.is_owned());
    assert_ne!(restored.as_ptr(), model.as_ptr());

    // The restored model works as an input model for a prediction run.
    let test = Array2::from_shape_fn((4, 3), |(i, j)| (i * j) as f64);
    let result = decision_tree(&DecisionTreeOptions {
        input_model: Some(&restored),
        test: Some(test),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(result.predictions.map(|p| p.len()), Some(4));
}

#[test]
fn a_garbage_blob_is_rejected() {
    let _guard = common::stub_guard();

    let err = ModelHandle::<DecisionTreeModel>::from_bytes(b"not a model").unwrap_err();
    assert!(matches!(err, Error::MalformedBlob(_)));
}

#[test]
fn a_blob_of_the_wrong_model_type_is_rejected() {
    let _guard = common::stub_guard();

    let bytes = trained_tree().to_bytes().unwrap();
    let err = ModelHandle::<KnnModel>::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, Error::MalformedBlob(_)));
}

#[test]
fn models_round_trip_through_a_file() {
    let _guard = common::stub_guard();

    let model = trained_tree();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.bin");

    let mut file = File::create(&path).unwrap();
    save_model(&model, &mut file).unwrap();
    drop(file);

    let mut file = File::open(&path).unwrap();
    let restored: ModelHandle<DecisionTreeModel> = load_model(&mut file).unwrap();
    assert!(restored.is_owned());
    assert_ne!(restored.as_ptr(), model.as_ptr());
}

#[test]
fn a_truncated_file_is_an_io_error() {
    let _guard = common::stub_guard();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.bin");

    // A length prefix promising more bytes than the file holds.
    let mut file = File::create(&path).unwrap();
    file.write_all(&1024u64.to_le_bytes()).unwrap();
    file.write_all(&[0u8; 3]).unwrap();
    drop(file);

    let mut file = File::open(&path).unwrap();
    let err = load_model::<DecisionTreeModel, _>(&mut file).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn deserialization_does_not_leak_rejected_models() {
    let _guard = common::stub_guard();

    let before = testing::live_models();
    let _ = ModelHandle::<DecisionTreeModel>::from_bytes(b"\x00garbage");
    assert_eq!(testing::live_models(), before);
}
