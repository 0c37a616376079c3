mod common;

use mlbridge::ffi::stub::testing;
use mlbridge::{
    decision_tree, hmm_train, DecisionTreeOptions, HmmTrainOptions, ModelHandle,
};
use ndarray::Array2;

fn trained_tree() -> mlbridge::DecisionTreeOutput {
    let options = DecisionTreeOptions {
        training: Some(Array2::from_shape_fn((8, 3), |(i, j)| (i + j) as f64)),
        labels: Some(vec![0, 1, 0, 1, 0, 1, 0, 1]),
        ..Default::default()
    };
    decision_tree(&options).unwrap()
}

#[test]
fn dropping_an_owned_handle_deletes_the_model_exactly_once() {
    let _guard = common::stub_guard();

    let before = testing::deleted_models();
    let trained = trained_tree();
    assert!(trained.output_model.is_owned());
    drop(trained);
    assert_eq!(testing::deleted_models(), before + 1);
    assert_eq!(testing::invalid_deletes(), 0);
}

#[test]
fn a_model_read_back_after_being_set_does_not_gain_a_second_finalizer() {
    let _guard = common::stub_guard();

    let trained = trained_tree();
    let before = testing::deleted_models();

    let options = DecisionTreeOptions {
        input_model: Some(&trained.output_model),
        test: Some(Array2::from_shape_fn((4, 3), |(i, j)| (i * j) as f64)),
        ..Default::default()
    };
    let predicted = decision_tree(&options).unwrap();

    // The native side returned the caller's own pointer.
    assert_eq!(predicted.output_model.as_ptr(), trained.output_model.as_ptr());
    assert!(!predicted.output_model.is_owned());
    assert_eq!(predicted.predictions.as_ref().map(Vec::len), Some(4));

    drop(predicted);
    assert_eq!(testing::deleted_models(), before, "alias must not delete");
    drop(trained);
    assert_eq!(testing::deleted_models(), before + 1);
    assert_eq!(testing::invalid_deletes(), 0);
}

#[test]
fn release_transfers_ownership_and_suppresses_the_finalizer() {
    let _guard = common::stub_guard();

    let trained = trained_tree();
    let live = testing::live_models();
    let before = testing::deleted_models();

    let _raw = trained.output_model.release();

    assert_eq!(testing::deleted_models(), before);
    assert_eq!(testing::live_models(), live);
    assert_eq!(testing::invalid_deletes(), 0);
}

#[test]
fn untyped_hmm_models_have_no_finalizer() {
    let _guard = common::stub_guard();

    let before = testing::deleted_models();
    let options = HmmTrainOptions {
        input: Some(Array2::from_shape_fn((20, 1), |(i, _)| i as f64)),
        states: Some(2),
        ..Default::default()
    };
    let trained = hmm_train(&options).unwrap();
    let ptr = trained.output_model.as_ptr();
    drop(trained);
    assert_eq!(testing::deleted_models(), before);

    // The pointer stays valid for reuse as an input model.
    let first = hmm_train(&options).unwrap();
    let retrained = hmm_train(&HmmTrainOptions {
        input_model: Some(&first.output_model),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(retrained.output_model.as_ptr(), first.output_model.as_ptr());
    let _ = ptr;
}

#[test]
fn a_deserialized_handle_owns_its_model() {
    let _guard = common::stub_guard();

    let trained = trained_tree();
    let blob = trained.output_model.to_bytes().unwrap();
    let restored: ModelHandle<mlbridge::models::DecisionTreeModel> =
        ModelHandle::from_bytes(&blob).unwrap();

    assert!(restored.is_owned());
    assert_ne!(restored.as_ptr(), trained.output_model.as_ptr());

    let before = testing::deleted_models();
    drop(restored);
    assert_eq!(testing::deleted_models(), before + 1);
    assert_eq!(testing::invalid_deletes(), 0);
}
