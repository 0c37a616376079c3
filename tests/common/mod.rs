#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;

lazy_static! {
    static ref STUB_LOCK: Mutex<()> = Mutex::new(());
}

/// Serializes tests that read or steer the stub backend's process-wide state
/// (run snapshots, forced failures, model counters).
pub fn stub_guard() -> MutexGuard<'static, ()> {
    STUB_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
