//! Stub implementations of the shared ABI symbols, signature-compatible with
//! the declarations used under the `native` feature.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::atomic::Ordering;

use super::store::{self, ParamStore, TimerStore, Value};
use crate::ffi::{ModelPtr, ParamsHandle, TimersHandle};

unsafe fn key_of(key: *const c_char) -> String {
    CStr::from_ptr(key).to_string_lossy().into_owned()
}

unsafe fn slice_or_empty<'a, T>(data: *const T, len: usize) -> &'a [T] {
    if data.is_null() || len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(data, len)
    }
}

pub unsafe extern "C" fn mlCreateParams(binding: *const c_char) -> ParamsHandle {
    let binding = CStr::from_ptr(binding).to_string_lossy().into_owned();
    Box::into_raw(Box::new(ParamStore::new(binding))) as ParamsHandle
}

pub unsafe extern "C" fn mlDestroyParams(params: ParamsHandle) {
    if !params.is_null() {
        drop(Box::from_raw(params as *mut ParamStore));
    }
}

pub unsafe extern "C" fn mlCreateTimers() -> TimersHandle {
    Box::into_raw(Box::new(TimerStore {
        started: std::time::Instant::now(),
    })) as TimersHandle
}

pub unsafe extern "C" fn mlDestroyTimers(timers: TimersHandle) {
    if !timers.is_null() {
        drop(Box::from_raw(timers as *mut TimerStore));
    }
}

pub unsafe extern "C" fn mlEnableVerbose() {
    store::VERBOSE.store(true, Ordering::SeqCst);
}

pub unsafe extern "C" fn mlDisableVerbose() {
    store::VERBOSE.store(false, Ordering::SeqCst);
}

pub unsafe extern "C" fn mlSetParamInt(params: ParamsHandle, key: *const c_char, value: i64) {
    store::params(params).put(key_of(key), Value::Int(value));
}

pub unsafe extern "C" fn mlSetParamDouble(params: ParamsHandle, key: *const c_char, value: f64) {
    store::params(params).put(key_of(key), Value::Double(value));
}

pub unsafe extern "C" fn mlSetParamBool(params: ParamsHandle, key: *const c_char, value: bool) {
    store::params(params).put(key_of(key), Value::Bool(value));
}

pub unsafe extern "C" fn mlSetParamString(
    params: ParamsHandle,
    key: *const c_char,
    value: *const c_char,
) {
    let owned = CStr::from_ptr(value).to_owned();
    store::params(params).put(key_of(key), Value::Str(owned));
}

pub unsafe extern "C" fn mlSetParamMat(
    params: ParamsHandle,
    key: *const c_char,
    data: *const f64,
    rows: usize,
    cols: usize,
) {
    let data = slice_or_empty(data, rows * cols).to_vec();
    store::params(params).put(key_of(key), Value::Mat { data, rows, cols });
}

pub unsafe extern "C" fn mlSetParamUMat(
    params: ParamsHandle,
    key: *const c_char,
    data: *const u64,
    rows: usize,
    cols: usize,
) {
    let data = slice_or_empty(data, rows * cols).to_vec();
    store::params(params).put(key_of(key), Value::UMat { data, rows, cols });
}

pub unsafe extern "C" fn mlSetParamCol(
    params: ParamsHandle,
    key: *const c_char,
    data: *const f64,
    len: usize,
) {
    let data = slice_or_empty(data, len).to_vec();
    store::params(params).put(key_of(key), Value::Col(data));
}

pub unsafe extern "C" fn mlSetParamUCol(
    params: ParamsHandle,
    key: *const c_char,
    data: *const u64,
    len: usize,
) {
    let data = slice_or_empty(data, len).to_vec();
    store::params(params).put(key_of(key), Value::UCol(data));
}

pub unsafe extern "C" fn mlSetParamModelPtr(
    params: ParamsHandle,
    key: *const c_char,
    ptr: ModelPtr,
) {
    store::params(params).put(key_of(key), Value::Model(ptr as usize));
}

pub unsafe extern "C" fn mlSetPassed(params: ParamsHandle, key: *const c_char) {
    let key = key_of(key);
    store::params(params).passed.insert(key);
}

pub unsafe extern "C" fn mlGetParamInt(params: ParamsHandle, key: *const c_char) -> i64 {
    store::params(params).int(&key_of(key)).unwrap_or(0)
}

pub unsafe extern "C" fn mlGetParamDouble(params: ParamsHandle, key: *const c_char) -> f64 {
    match store::params(params).values.get(&key_of(key)) {
        Some(Value::Double(v)) => *v,
        _ => 0.0,
    }
}

pub unsafe extern "C" fn mlGetParamBool(params: ParamsHandle, key: *const c_char) -> bool {
    matches!(
        store::params(params).values.get(&key_of(key)),
        Some(Value::Bool(true))
    )
}

pub unsafe extern "C" fn mlGetParamString(
    params: ParamsHandle,
    key: *const c_char,
) -> *const c_char {
    match store::params(params).values.get(&key_of(key)) {
        Some(Value::Str(s)) => s.as_ptr(),
        _ => std::ptr::null(),
    }
}

pub unsafe extern "C" fn mlGetParamMat(
    params: ParamsHandle,
    key: *const c_char,
    rows: *mut usize,
    cols: *mut usize,
) -> *const f64 {
    match store::params(params).values.get(&key_of(key)) {
        Some(Value::Mat { data, rows: r, cols: c }) => {
            *rows = *r;
            *cols = *c;
            data.as_ptr()
        }
        _ => {
            *rows = 0;
            *cols = 0;
            std::ptr::null()
        }
    }
}

pub unsafe extern "C" fn mlGetParamUMat(
    params: ParamsHandle,
    key: *const c_char,
    rows: *mut usize,
    cols: *mut usize,
) -> *const u64 {
    match store::params(params).values.get(&key_of(key)) {
        Some(Value::UMat { data, rows: r, cols: c }) => {
            *rows = *r;
            *cols = *c;
            data.as_ptr()
        }
        _ => {
            *rows = 0;
            *cols = 0;
            std::ptr::null()
        }
    }
}

pub unsafe extern "C" fn mlGetParamCol(
    params: ParamsHandle,
    key: *const c_char,
    len: *mut usize,
) -> *const f64 {
    match store::params(params).values.get(&key_of(key)) {
        Some(Value::Col(data)) => {
            *len = data.len();
            data.as_ptr()
        }
        _ => {
            *len = 0;
            std::ptr::null()
        }
    }
}

pub unsafe extern "C" fn mlGetParamUCol(
    params: ParamsHandle,
    key: *const c_char,
    len: *mut usize,
) -> *const u64 {
    match store::params(params).values.get(&key_of(key)) {
        Some(Value::UCol(data)) => {
            *len = data.len();
            data.as_ptr()
        }
        _ => {
            *len = 0;
            std::ptr::null()
        }
    }
}

pub unsafe extern "C" fn mlGetParamModelPtr(params: ParamsHandle, key: *const c_char) -> ModelPtr {
    store::params(params)
        .model(&key_of(key))
        .unwrap_or(std::ptr::null_mut())
}

pub unsafe extern "C" fn mlDeleteBuffer(ptr: *mut u8, len: usize) {
    store::free_buffer(ptr, len);
}
