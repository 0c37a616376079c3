//! In-process stand-in for the native library.
//!
//! The stub implements the full ABI surface against boxed Rust state: typed
//! parameter stores, a registry of live model pointers, and one canned
//! behavior per algorithm entry point. Canned outputs are test fixtures with
//! plausible shapes, not algorithm implementations. The [`testing`] module
//! exposes the hooks the integration tests rely on.

pub mod abi;
pub(crate) mod runs;
pub(crate) mod store;
pub mod testing;

use std::ffi::c_void;
use std::os::raw::c_char;

/// Generic model operations the per-type symbol shims delegate to.
pub(crate) mod model_abi {
    use super::*;
    use crate::ffi::{ModelPtr, ParamsHandle};

    pub(crate) unsafe fn set(
        _tag: &'static str,
        params: ParamsHandle,
        key: *const c_char,
        ptr: ModelPtr,
    ) {
        abi::mlSetParamModelPtr(params, key, ptr);
    }

    /// Retrieves a model pointer, yielding null when the stored model does not
    /// carry the requested type tag.
    pub(crate) unsafe fn get(
        tag: &'static str,
        params: ParamsHandle,
        key: *const c_char,
    ) -> ModelPtr {
        let ptr = abi::mlGetParamModelPtr(params, key);
        if ptr.is_null() || !store::check_model(tag, ptr) {
            return std::ptr::null_mut();
        }
        ptr
    }

    pub(crate) unsafe fn serialize(
        tag: &'static str,
        ptr: ModelPtr,
        len: *mut usize,
    ) -> *mut u8 {
        store::serialize_model(tag, ptr, len)
    }

    pub(crate) unsafe fn deserialize(
        tag: &'static str,
        data: *const u8,
        len: usize,
    ) -> ModelPtr {
        store::deserialize_model(tag, data, len)
    }

    pub(crate) unsafe fn delete(tag: &'static str, ptr: *mut c_void) {
        store::delete_model(tag, ptr);
    }
}
