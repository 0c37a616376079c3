//! `extern "C"` declarations resolved against the installed native library.
//!
//! Matrix buffers cross this boundary in column-major order with points as
//! columns; index buffers are always 64-bit unsigned, the width the native ABI
//! expects regardless of platform.

use std::os::raw::c_char;

use super::{ModelPtr, ParamsHandle, TimersHandle};

extern "C" {
    pub fn mlCreateParams(binding: *const c_char) -> ParamsHandle;
    pub fn mlDestroyParams(params: ParamsHandle);

    pub fn mlCreateTimers() -> TimersHandle;
    pub fn mlDestroyTimers(timers: TimersHandle);

    pub fn mlEnableVerbose();
    pub fn mlDisableVerbose();

    pub fn mlSetParamInt(params: ParamsHandle, key: *const c_char, value: i64);
    pub fn mlSetParamDouble(params: ParamsHandle, key: *const c_char, value: f64);
    pub fn mlSetParamBool(params: ParamsHandle, key: *const c_char, value: bool);
    pub fn mlSetParamString(params: ParamsHandle, key: *const c_char, value: *const c_char);
    pub fn mlSetParamMat(
        params: ParamsHandle,
        key: *const c_char,
        data: *const f64,
        rows: usize,
        cols: usize,
    );
    pub fn mlSetParamUMat(
        params: ParamsHandle,
        key: *const c_char,
        data: *const u64,
        rows: usize,
        cols: usize,
    );
    pub fn mlSetParamCol(params: ParamsHandle, key: *const c_char, data: *const f64, len: usize);
    pub fn mlSetParamUCol(params: ParamsHandle, key: *const c_char, data: *const u64, len: usize);
    pub fn mlSetParamModelPtr(params: ParamsHandle, key: *const c_char, ptr: ModelPtr);
    pub fn mlSetPassed(params: ParamsHandle, key: *const c_char);

    pub fn mlGetParamInt(params: ParamsHandle, key: *const c_char) -> i64;
    pub fn mlGetParamDouble(params: ParamsHandle, key: *const c_char) -> f64;
    pub fn mlGetParamBool(params: ParamsHandle, key: *const c_char) -> bool;
    pub fn mlGetParamString(params: ParamsHandle, key: *const c_char) -> *const c_char;
    pub fn mlGetParamMat(
        params: ParamsHandle,
        key: *const c_char,
        rows: *mut usize,
        cols: *mut usize,
    ) -> *const f64;
    pub fn mlGetParamUMat(
        params: ParamsHandle,
        key: *const c_char,
        rows: *mut usize,
        cols: *mut usize,
    ) -> *const u64;
    pub fn mlGetParamCol(params: ParamsHandle, key: *const c_char, len: *mut usize) -> *const f64;
    pub fn mlGetParamUCol(params: ParamsHandle, key: *const c_char, len: *mut usize) -> *const u64;
    pub fn mlGetParamModelPtr(params: ParamsHandle, key: *const c_char) -> ModelPtr;

    /// Frees a buffer returned by one of the `mlSerialize*Ptr` routines.
    pub fn mlDeleteBuffer(ptr: *mut u8, len: usize);
}
