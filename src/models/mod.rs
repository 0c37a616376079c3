//! Native model types and their owning handles.
//!
//! Every model type the native library exposes comes with a fixed family of
//! exported symbols: set/get the pointer on a parameter set, serialize and
//! deserialize the model, and delete it. [`declare_model!`] binds one marker
//! type per family so handles stay typed end to end: a
//! `ModelHandle<KnnModel>` can only be fed to parameters expecting a k-NN
//! model, checked at compile time.

mod handle;

pub use handle::{ModelHandle, UntypedHandle};

use std::os::raw::c_char;

use crate::ffi::{ModelPtr, ParamsHandle};

/// One native model type: its ABI tag plus the symbol family operating on it.
///
/// The methods mirror raw C calls and inherit their contracts: `ptr` values
/// must come from the native library (or be null where documented), and `key`
/// must be a NUL-terminated string.
pub trait ModelType {
    /// Type tag, as spelled in the native library's documentation.
    const TYPE_NAME: &'static str;

    unsafe fn set_ptr(params: ParamsHandle, key: *const c_char, ptr: ModelPtr);
    unsafe fn get_ptr(params: ParamsHandle, key: *const c_char) -> ModelPtr;
    unsafe fn serialize_ptr(ptr: ModelPtr, len: *mut usize) -> *mut u8;
    unsafe fn deserialize_ptr(data: *const u8, len: usize) -> ModelPtr;
    unsafe fn delete_ptr(ptr: ModelPtr);
}

macro_rules! declare_model {
    ($(#[$meta:meta])* $name:ident, $tag:literal,
     $set:ident, $get:ident, $ser:ident, $deser:ident, $del:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        #[cfg(feature = "native")]
        extern "C" {
            fn $set(params: ParamsHandle, key: *const c_char, ptr: ModelPtr);
            fn $get(params: ParamsHandle, key: *const c_char) -> ModelPtr;
            fn $ser(ptr: ModelPtr, len: *mut usize) -> *mut u8;
            fn $deser(data: *const u8, len: usize) -> ModelPtr;
            fn $del(ptr: ModelPtr);
        }

        #[cfg(feature = "native")]
        impl ModelType for $name {
            const TYPE_NAME: &'static str = $tag;

            unsafe fn set_ptr(params: ParamsHandle, key: *const c_char, ptr: ModelPtr) {
                $set(params, key, ptr)
            }

            unsafe fn get_ptr(params: ParamsHandle, key: *const c_char) -> ModelPtr {
                $get(params, key)
            }

            unsafe fn serialize_ptr(ptr: ModelPtr, len: *mut usize) -> *mut u8 {
                $ser(ptr, len)
            }

            unsafe fn deserialize_ptr(data: *const u8, len: usize) -> ModelPtr {
                $deser(data, len)
            }

            unsafe fn delete_ptr(ptr: ModelPtr) {
                $del(ptr)
            }
        }

        #[cfg(not(feature = "native"))]
        impl ModelType for $name {
            const TYPE_NAME: &'static str = $tag;

            unsafe fn set_ptr(params: ParamsHandle, key: *const c_char, ptr: ModelPtr) {
                crate::ffi::stub::model_abi::set($tag, params, key, ptr)
            }

            unsafe fn get_ptr(params: ParamsHandle, key: *const c_char) -> ModelPtr {
                crate::ffi::stub::model_abi::get($tag, params, key)
            }

            unsafe fn serialize_ptr(ptr: ModelPtr, len: *mut usize) -> *mut u8 {
                crate::ffi::stub::model_abi::serialize($tag, ptr, len)
            }

            unsafe fn deserialize_ptr(data: *const u8, len: usize) -> ModelPtr {
                crate::ffi::stub::model_abi::deserialize($tag, data, len)
            }

            unsafe fn delete_ptr(ptr: ModelPtr) {
                crate::ffi::stub::model_abi::delete($tag, ptr)
            }
        }
    };
}

declare_model! {
    /// AdaBoost ensemble model.
    AdaboostModel, "adaboost_model",
    mlSetAdaboostModelPtr, mlGetAdaboostModelPtr,
    mlSerializeAdaboostModelPtr, mlDeserializeAdaboostModelPtr,
    mlDeleteAdaboostModelPtr
}

declare_model! {
    /// Collaborative-filtering model.
    CfModel, "cf_model",
    mlSetCfModelPtr, mlGetCfModelPtr,
    mlSerializeCfModelPtr, mlDeserializeCfModelPtr,
    mlDeleteCfModelPtr
}

declare_model! {
    /// Decision tree classifier model.
    DecisionTreeModel, "decision_tree_model",
    mlSetDecisionTreeModelPtr, mlGetDecisionTreeModelPtr,
    mlSerializeDecisionTreeModelPtr, mlDeserializeDecisionTreeModelPtr,
    mlDeleteDecisionTreeModelPtr
}

declare_model! {
    /// k-nearest-neighbors search model.
    KnnModel, "knn_model",
    mlSetKnnModelPtr, mlGetKnnModelPtr,
    mlSerializeKnnModelPtr, mlDeserializeKnnModelPtr,
    mlDeleteKnnModelPtr
}

declare_model! {
    /// Linear regression model.
    LinearRegressionModel, "linear_regression_model",
    mlSetLinearRegressionModelPtr, mlGetLinearRegressionModelPtr,
    mlSerializeLinearRegressionModelPtr, mlDeserializeLinearRegressionModelPtr,
    mlDeleteLinearRegressionModelPtr
}

declare_model! {
    /// Logistic regression model.
    LogisticRegressionModel, "logistic_regression_model",
    mlSetLogisticRegressionModelPtr, mlGetLogisticRegressionModelPtr,
    mlSerializeLogisticRegressionModelPtr, mlDeserializeLogisticRegressionModelPtr,
    mlDeleteLogisticRegressionModelPtr
}

declare_model! {
    /// Random forest classifier model.
    RandomForestModel, "random_forest_model",
    mlSetRandomForestModelPtr, mlGetRandomForestModelPtr,
    mlSerializeRandomForestModelPtr, mlDeserializeRandomForestModelPtr,
    mlDeleteRandomForestModelPtr
}

declare_model! {
    /// Sparse coding dictionary model.
    SparseCodingModel, "sparse_coding_model",
    mlSetSparseCodingModelPtr, mlGetSparseCodingModelPtr,
    mlSerializeSparseCodingModelPtr, mlDeserializeSparseCodingModelPtr,
    mlDeleteSparseCodingModelPtr
}
