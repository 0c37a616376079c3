//! One wrapper function per native algorithm.
//!
//! Every wrapper follows the same shape: build a fresh [`crate::params::BindingCtx`],
//! set only the arguments the caller actually provided (an omitted optional
//! argument leaves its parameter-set key absent, so the native default
//! applies), flag the requested outputs, invoke the algorithm's entry symbol,
//! and read back the requested outputs. Hyperparameters live in per-binding
//! options structs with explicit `Option` fields; the defaults quoted in their
//! docs mirror the native library's documentation and are never set by this
//! layer.

pub mod adaboost;
pub mod cf;
pub mod dbscan;
pub mod decision_tree;
pub mod hmm_train;
pub mod kmeans;
pub mod knn;
pub mod linear_regression;
pub mod logistic_regression;
pub mod pca;
pub mod random_forest;
pub mod sparse_coding;

pub use adaboost::{adaboost, AdaboostOptions, AdaboostOutput};
pub use cf::{cf, CfOptions, CfOutput};
pub use dbscan::{dbscan, DbscanOptions, DbscanOutput};
pub use decision_tree::{decision_tree, DecisionTreeOptions, DecisionTreeOutput};
pub use hmm_train::{hmm_train, HmmTrainOptions, HmmTrainOutput};
pub use kmeans::{kmeans, KmeansOptions, KmeansOutput};
pub use knn::{knn, KnnOptions, KnnOutput};
pub use linear_regression::{linear_regression, LinearRegressionOptions, LinearRegressionOutput};
pub use logistic_regression::{
    logistic_regression, LogisticRegressionOptions, LogisticRegressionOutput,
};
pub use pca::{pca, PcaOptions, PcaOutput};
pub use random_forest::{random_forest, RandomForestOptions, RandomForestOutput};
pub use sparse_coding::{sparse_coding, SparseCodingOptions, SparseCodingOutput};
