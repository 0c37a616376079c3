//! Hooks for inspecting and steering the stub backend from tests.
//!
//! Every entry-point invocation records a snapshot of the parameter set it was
//! handed, so tests can assert which keys were set, with which types, and
//! which outputs were requested. The globals here are process-wide; tests that
//! read them serialize themselves with a shared lock.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use lazy_static::lazy_static;

use super::store::{self, ParamStore, Value};

/// Type-and-shape view of one parameter-set entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotValue {
    Int(i64),
    Double(f64),
    Bool(bool),
    Str(String),
    Mat { rows: usize, cols: usize },
    UMat { rows: usize, cols: usize },
    Col(usize),
    UCol(usize),
    Model,
}

/// The parameter set exactly as the last entry point received it.
#[derive(Debug, Clone, Default)]
pub struct RunSnapshot {
    pub binding: String,
    pub values: HashMap<String, SnapshotValue>,
    pub passed: HashSet<String>,
    /// Host-side set calls per key.
    pub set_counts: HashMap<String, usize>,
}

lazy_static! {
    static ref LAST_RUN: Mutex<Option<RunSnapshot>> = Mutex::new(None);
}

pub(crate) fn record(params: &ParamStore) {
    let mut snapshot = RunSnapshot {
        binding: params.binding.clone(),
        passed: params.passed.clone(),
        set_counts: params.set_counts.clone(),
        ..Default::default()
    };
    for (key, value) in &params.values {
        let view = match value {
            Value::Int(v) => SnapshotValue::Int(*v),
            Value::Double(v) => SnapshotValue::Double(*v),
            Value::Bool(v) => SnapshotValue::Bool(*v),
            Value::Str(v) => SnapshotValue::Str(v.to_string_lossy().into_owned()),
            Value::Mat { rows, cols, .. } => SnapshotValue::Mat {
                rows: *rows,
                cols: *cols,
            },
            Value::UMat { rows, cols, .. } => SnapshotValue::UMat {
                rows: *rows,
                cols: *cols,
            },
            Value::Col(data) => SnapshotValue::Col(data.len()),
            Value::UCol(data) => SnapshotValue::UCol(data.len()),
            Value::Model(_) => SnapshotValue::Model,
        };
        snapshot.values.insert(key.clone(), view);
    }
    *LAST_RUN.lock().unwrap_or_else(|e| e.into_inner()) = Some(snapshot);
}

/// Returns the parameter set seen by the most recent entry-point invocation.
pub fn last_run() -> Option<RunSnapshot> {
    LAST_RUN.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Makes the next entry-point invocation return failure without producing any
/// output, mimicking a native-side validation error.
pub fn fail_next_run() {
    store::set_fail_next_run();
}

/// Number of stub models currently alive.
pub fn live_models() -> usize {
    store::live_model_count()
}

/// Total number of stub models deleted so far in this process.
pub fn deleted_models() -> usize {
    store::deleted_model_count()
}

/// Number of delete calls that named a pointer that was not a live model of
/// the expected type. Always zero when handle ownership is tracked correctly.
pub fn invalid_deletes() -> usize {
    store::invalid_delete_count()
}
