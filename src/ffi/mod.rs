//! Raw C ABI surface of the native machine-learning library.
//!
//! Every symbol here is part of the stable contract with the native side: one
//! exported entry point per algorithm, a parameter-set object exchanged by
//! opaque handle, and a set/get/serialize/deserialize/delete routine family
//! per model type (declared alongside the model types in [`crate::models`]).
//!
//! Two backends provide these symbols. With the `native` feature the
//! declarations in `decl` resolve against the installed native library at link
//! time. Without it, the [`stub`] module supplies byte-identical signatures
//! implemented in Rust, so the marshaling layer can be exercised without the
//! native binary.

use std::os::raw::c_void;

/// Opaque handle to a native parameter set.
pub type ParamsHandle = *mut c_void;

/// Opaque handle to a native timer object.
pub type TimersHandle = *mut c_void;

/// Raw pointer to a native model of unspecified layout.
pub type ModelPtr = *mut c_void;

/// Signature shared by every per-algorithm entry point. Returns `true` on
/// success; on failure the native library has already printed its diagnostics.
pub type NativeEntry = unsafe extern "C" fn(ParamsHandle, TimersHandle) -> bool;

#[cfg(feature = "native")]
mod decl;
#[cfg(feature = "native")]
pub use decl::*;

#[cfg(not(feature = "native"))]
pub mod stub;
#[cfg(not(feature = "native"))]
pub use stub::abi::*;

/// Declares the per-algorithm entry symbols for both backends.
macro_rules! declare_entries {
    ($( $sym:ident => $name:literal ),+ $(,)?) => {
        #[cfg(feature = "native")]
        extern "C" {
            $( pub fn $sym(params: ParamsHandle, timers: TimersHandle) -> bool; )+
        }

        #[cfg(not(feature = "native"))]
        mod entries {
            use super::{ParamsHandle, TimersHandle};

            $(
                pub unsafe extern "C" fn $sym(params: ParamsHandle, timers: TimersHandle) -> bool {
                    super::stub::runs::run($name, params, timers)
                }
            )+
        }
        #[cfg(not(feature = "native"))]
        pub use entries::*;
    };
}

declare_entries! {
    mlAdaboost => "adaboost",
    mlCf => "cf",
    mlDbscan => "dbscan",
    mlDecisionTree => "decision_tree",
    mlHmmTrain => "hmm_train",
    mlKmeans => "kmeans",
    mlKnn => "knn",
    mlLinearRegression => "linear_regression",
    mlLogisticRegression => "logistic_regression",
    mlPca => "pca",
    mlRandomForest => "random_forest",
    mlSparseCoding => "sparse_coding",
}
