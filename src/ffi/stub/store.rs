//! Backing state for the stub backend: typed parameter stores, the live-model
//! registry, and the counters the test hooks read.

use std::alloc::Layout;
use std::collections::{HashMap, HashSet};
use std::ffi::CString;
use std::os::raw::c_void;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use lazy_static::lazy_static;

use crate::ffi::ModelPtr;

/// A typed value held by a stub parameter store.
#[derive(Debug)]
pub(crate) enum Value {
    Int(i64),
    Double(f64),
    Bool(bool),
    Str(CString),
    Mat {
        data: Vec<f64>,
        rows: usize,
        cols: usize,
    },
    UMat {
        data: Vec<u64>,
        rows: usize,
        cols: usize,
    },
    Col(Vec<f64>),
    UCol(Vec<u64>),
    Model(usize),
}

/// Stub counterpart of a native parameter set.
pub(crate) struct ParamStore {
    pub binding: String,
    pub values: HashMap<String, Value>,
    pub passed: HashSet<String>,
    /// Number of set calls per key, for the structural test hooks.
    pub set_counts: HashMap<String, usize>,
}

impl ParamStore {
    pub fn new(binding: String) -> Self {
        ParamStore {
            binding,
            values: HashMap::new(),
            passed: HashSet::new(),
            set_counts: HashMap::new(),
        }
    }

    pub fn put(&mut self, key: String, value: Value) {
        *self.set_counts.entry(key.clone()).or_insert(0) += 1;
        self.values.insert(key, value);
    }

    pub fn mat(&self, key: &str) -> Option<(&[f64], usize, usize)> {
        match self.values.get(key) {
            Some(Value::Mat { data, rows, cols }) => Some((data.as_slice(), *rows, *cols)),
            _ => None,
        }
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(Value::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn model(&self, key: &str) -> Option<ModelPtr> {
        match self.values.get(key) {
            Some(Value::Model(ptr)) => Some(*ptr as ModelPtr),
            _ => None,
        }
    }

    pub fn is_passed(&self, key: &str) -> bool {
        self.passed.contains(key)
    }
}

/// Stub counterpart of a native timer object.
pub(crate) struct TimerStore {
    pub started: std::time::Instant,
}

/// A stub model: a type tag plus an opaque payload standing in for the real
/// trained-model state.
pub(crate) struct StubModel {
    pub tag: &'static str,
    pub payload: Vec<u8>,
}

lazy_static! {
    /// Pointers of every stub model currently alive, mapped to their type tag.
    static ref LIVE_MODELS: Mutex<HashMap<usize, &'static str>> =
        Mutex::new(HashMap::new());
}

static DELETED_MODELS: AtomicUsize = AtomicUsize::new(0);
static INVALID_DELETES: AtomicUsize = AtomicUsize::new(0);
static FAIL_NEXT_RUN: AtomicBool = AtomicBool::new(false);
pub(crate) static VERBOSE: AtomicBool = AtomicBool::new(false);

fn live_models() -> std::sync::MutexGuard<'static, HashMap<usize, &'static str>> {
    LIVE_MODELS.lock().unwrap_or_else(|e| e.into_inner())
}

/// Allocates a new stub model and registers it as live.
pub(crate) fn new_model(tag: &'static str, payload: Vec<u8>) -> ModelPtr {
    let ptr = Box::into_raw(Box::new(StubModel { tag, payload }));
    live_models().insert(ptr as usize, tag);
    ptr as ModelPtr
}

/// Looks up a live model, checking that its tag matches the requested type.
pub(crate) fn check_model(tag: &str, ptr: ModelPtr) -> bool {
    matches!(live_models().get(&(ptr as usize)), Some(t) if *t == tag)
}

/// Deletes a live model. A pointer that is not live, or whose tag does not
/// match, is counted as an invalid delete and left untouched so the tests can
/// detect the misuse instead of corrupting the heap.
pub(crate) unsafe fn delete_model(tag: &str, ptr: ModelPtr) {
    if ptr.is_null() {
        INVALID_DELETES.fetch_add(1, Ordering::SeqCst);
        return;
    }
    let mut live = live_models();
    match live.get(&(ptr as usize)) {
        Some(t) if *t == tag => {
            live.remove(&(ptr as usize));
            drop(live);
            drop(Box::from_raw(ptr as *mut StubModel));
            DELETED_MODELS.fetch_add(1, Ordering::SeqCst);
        }
        _ => {
            log::error!("stub: delete of unknown or mistyped model pointer ({})", tag);
            INVALID_DELETES.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Serializes a live model into a tag-prefixed blob allocated for the caller.
/// The caller frees it through `mlDeleteBuffer`.
pub(crate) unsafe fn serialize_model(tag: &str, ptr: ModelPtr, len_out: *mut usize) -> *mut u8 {
    if !check_model(tag, ptr) {
        *len_out = 0;
        return std::ptr::null_mut();
    }
    let model = &*(ptr as *const StubModel);
    let mut blob = Vec::with_capacity(model.tag.len() + 1 + model.payload.len());
    blob.extend_from_slice(model.tag.as_bytes());
    blob.push(0);
    blob.extend_from_slice(&model.payload);
    alloc_buffer(&blob, len_out)
}

/// Reconstructs a model from a tag-prefixed blob. A missing or mismatched tag
/// yields a null pointer, the same signal the native deserializer gives for a
/// blob of the wrong model type.
pub(crate) unsafe fn deserialize_model(
    tag: &'static str,
    data: *const u8,
    len: usize,
) -> ModelPtr {
    if data.is_null() || len == 0 {
        return std::ptr::null_mut();
    }
    let blob = std::slice::from_raw_parts(data, len);
    let split = match blob.iter().position(|&b| b == 0) {
        Some(pos) => pos,
        None => return std::ptr::null_mut(),
    };
    if &blob[..split] != tag.as_bytes() {
        return std::ptr::null_mut();
    }
    new_model(tag, blob[split + 1..].to_vec())
}

/// Copies `bytes` into a raw allocation sized exactly to `bytes.len()`,
/// freeable by `mlDeleteBuffer` with the same length.
pub(crate) unsafe fn alloc_buffer(bytes: &[u8], len_out: *mut usize) -> *mut u8 {
    *len_out = bytes.len();
    if bytes.is_empty() {
        return std::ptr::null_mut();
    }
    let layout = match Layout::array::<u8>(bytes.len()) {
        Ok(layout) => layout,
        Err(_) => {
            *len_out = 0;
            return std::ptr::null_mut();
        }
    };
    let ptr = std::alloc::alloc(layout);
    if !ptr.is_null() {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr, bytes.len());
    }
    ptr
}

/// Frees an allocation produced by [`alloc_buffer`].
pub(crate) unsafe fn free_buffer(ptr: *mut u8, len: usize) {
    if ptr.is_null() || len == 0 {
        return;
    }
    if let Ok(layout) = Layout::array::<u8>(len) {
        std::alloc::dealloc(ptr, layout);
    }
}

pub(crate) fn take_fail_next_run() -> bool {
    FAIL_NEXT_RUN.swap(false, Ordering::SeqCst)
}

pub(crate) fn set_fail_next_run() {
    FAIL_NEXT_RUN.store(true, Ordering::SeqCst);
}

pub(crate) fn live_model_count() -> usize {
    live_models().len()
}

pub(crate) fn deleted_model_count() -> usize {
    DELETED_MODELS.load(Ordering::SeqCst)
}

pub(crate) fn invalid_delete_count() -> usize {
    INVALID_DELETES.load(Ordering::SeqCst)
}

/// Borrows the parameter store behind a raw handle.
///
/// Safety: the handle must come from `mlCreateParams` and not yet have been
/// destroyed; the stub layer never hands out overlapping mutable borrows
/// because parameter sets are private to one invocation.
pub(crate) unsafe fn params<'a>(handle: *mut c_void) -> &'a mut ParamStore {
    &mut *(handle as *mut ParamStore)
}

/// Borrows the timer store behind a raw handle. Same contract as [`params`],
/// against `mlCreateTimers`.
pub(crate) unsafe fn timers<'a>(handle: *mut c_void) -> &'a TimerStore {
    &*(handle as *const TimerStore)
}
