//! Per-invocation parameter-set context.
//!
//! Every binding call owns exactly one [`BindingCtx`]: a fresh native
//! parameter set paired with a fresh timer object, both destroyed when the
//! context drops, on every exit path. The context also pins host buffers
//! passed into the native call (released once the call returns) and tracks
//! which model pointers the caller already owns, so a model read back out of
//! the parameter set never grows a second finalizer.

use std::collections::HashSet;
use std::ffi::CString;
use std::ptr::NonNull;

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};
use crate::ffi::{self, NativeEntry, ParamsHandle, TimersHandle};
use crate::marshal::{self, MatrixLayout};
use crate::models::{ModelHandle, ModelType, UntypedHandle};

fn cstr(s: &str) -> Result<CString> {
    CString::new(s)
        .map_err(|_| Error::InvalidInput(format!("string contains an interior NUL byte: {:?}", s)))
}

pub(crate) struct BindingCtx {
    binding: &'static str,
    params: ParamsHandle,
    timers: TimersHandle,
    /// Host allocations the native side may read during the call.
    retained_f64: Vec<Vec<f64>>,
    retained_u64: Vec<Vec<u64>>,
    /// Model pointers that already have a host-side finalizer.
    caller_owned: HashSet<usize>,
}

impl BindingCtx {
    pub fn new(binding: &'static str) -> Result<Self> {
        let name = cstr(binding)?;
        let (params, timers) =
            unsafe { (ffi::mlCreateParams(name.as_ptr()), ffi::mlCreateTimers()) };
        log::trace!("created parameter set for binding '{}'", binding);
        Ok(BindingCtx {
            binding,
            params,
            timers,
            retained_f64: Vec::new(),
            retained_u64: Vec::new(),
            caller_owned: HashSet::new(),
        })
    }

    pub fn set_i64(&mut self, key: &str, value: i64) -> Result<()> {
        let key = cstr(key)?;
        unsafe { ffi::mlSetParamInt(self.params, key.as_ptr(), value) };
        Ok(())
    }

    /// Sets an unsigned value on the ABI's signed integer parameter type,
    /// rejecting values the signed width cannot hold.
    pub fn set_u64(&mut self, key: &str, value: u64) -> Result<()> {
        let value = i64::try_from(value).map_err(|_| {
            Error::InvalidInput(format!(
                "'{}' value {} exceeds the native integer range",
                key, value
            ))
        })?;
        self.set_i64(key, value)
    }

    pub fn set_f64(&mut self, key: &str, value: f64) -> Result<()> {
        let key = cstr(key)?;
        unsafe { ffi::mlSetParamDouble(self.params, key.as_ptr(), value) };
        Ok(())
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        let key = cstr(key)?;
        unsafe { ffi::mlSetParamBool(self.params, key.as_ptr(), value) };
        Ok(())
    }

    pub fn set_str(&mut self, key: &str, value: &str) -> Result<()> {
        let key = cstr(key)?;
        let value = cstr(value)?;
        unsafe { ffi::mlSetParamString(self.params, key.as_ptr(), value.as_ptr()) };
        Ok(())
    }

    pub fn set_mat(
        &mut self,
        key: &str,
        view: ArrayView2<'_, f64>,
        layout: MatrixLayout,
    ) -> Result<()> {
        let key = cstr(key)?;
        let (data, rows, cols) = marshal::dense_to_native(view, layout);
        let ptr = data.as_ptr();
        // Pinned until the native call returns.
        self.retained_f64.push(data);
        unsafe { ffi::mlSetParamMat(self.params, key.as_ptr(), ptr, rows, cols) };
        Ok(())
    }

    pub fn set_umat(
        &mut self,
        key: &str,
        view: ArrayView2<'_, u64>,
        layout: MatrixLayout,
    ) -> Result<()> {
        let key = cstr(key)?;
        let (data, rows, cols) = marshal::index_to_native(view, layout);
        let ptr = data.as_ptr();
        self.retained_u64.push(data);
        unsafe { ffi::mlSetParamUMat(self.params, key.as_ptr(), ptr, rows, cols) };
        Ok(())
    }

    pub fn set_col(&mut self, key: &str, values: &[f64]) -> Result<()> {
        let key = cstr(key)?;
        let data = values.to_vec();
        let (ptr, len) = (data.as_ptr(), data.len());
        self.retained_f64.push(data);
        unsafe { ffi::mlSetParamCol(self.params, key.as_ptr(), ptr, len) };
        Ok(())
    }

    pub fn set_ucol(&mut self, key: &str, values: &[u64]) -> Result<()> {
        let key = cstr(key)?;
        let data = values.to_vec();
        let (ptr, len) = (data.as_ptr(), data.len());
        self.retained_u64.push(data);
        unsafe { ffi::mlSetParamUCol(self.params, key.as_ptr(), ptr, len) };
        Ok(())
    }

    /// Places a model pointer on the parameter set. The handle keeps
    /// ownership; the pointer is remembered so that reading the same model
    /// back out yields an unowned alias instead of a second finalizer.
    pub fn set_model<M: ModelType>(&mut self, key: &str, model: &ModelHandle<M>) -> Result<()> {
        let key = cstr(key)?;
        unsafe { M::set_ptr(self.params, key.as_ptr(), model.as_ptr()) };
        self.caller_owned.insert(model.as_ptr() as usize);
        Ok(())
    }

    /// Same as [`set_model`](Self::set_model) for the legacy untyped model ABI.
    pub fn set_untyped_model(&mut self, key: &str, model: &UntypedHandle) -> Result<()> {
        let key = cstr(key)?;
        unsafe { ffi::mlSetParamModelPtr(self.params, key.as_ptr(), model.as_ptr()) };
        self.caller_owned.insert(model.as_ptr() as usize);
        Ok(())
    }

    /// Flags an output the caller wants the native side to populate.
    pub fn mark_passed(&mut self, key: &str) -> Result<()> {
        let key = cstr(key)?;
        unsafe { ffi::mlSetPassed(self.params, key.as_ptr()) };
        Ok(())
    }

    /// Invokes the binding's native entry point, translating the failure flag
    /// into an error. Pinned input buffers are released once the call returns,
    /// whatever the outcome.
    pub fn run(&mut self, entry: NativeEntry) -> Result<()> {
        log::debug!("invoking native binding '{}'", self.binding);
        let ok = unsafe { entry(self.params, self.timers) };
        self.retained_f64.clear();
        self.retained_u64.clear();
        if ok {
            Ok(())
        } else {
            Err(Error::NativeCallFailed {
                binding: self.binding,
            })
        }
    }

    pub fn get_mat(&self, key: &str, layout: MatrixLayout) -> Result<Array2<f64>> {
        let ckey = cstr(key)?;
        let (mut rows, mut cols) = (0usize, 0usize);
        let ptr =
            unsafe { ffi::mlGetParamMat(self.params, ckey.as_ptr(), &mut rows, &mut cols) };
        if ptr.is_null() {
            return Err(self.missing_output(key));
        }
        let data = unsafe { std::slice::from_raw_parts(ptr, rows * cols).to_vec() };
        marshal::dense_from_native(data, rows, cols, layout)
    }

    pub fn get_umat(&self, key: &str, layout: MatrixLayout) -> Result<Array2<u64>> {
        let ckey = cstr(key)?;
        let (mut rows, mut cols) = (0usize, 0usize);
        let ptr =
            unsafe { ffi::mlGetParamUMat(self.params, ckey.as_ptr(), &mut rows, &mut cols) };
        if ptr.is_null() {
            return Err(self.missing_output(key));
        }
        let data = unsafe { std::slice::from_raw_parts(ptr, rows * cols).to_vec() };
        marshal::index_from_native(data, rows, cols, layout)
    }

    pub fn get_col(&self, key: &str) -> Result<Vec<f64>> {
        let ckey = cstr(key)?;
        let mut len = 0usize;
        let ptr = unsafe { ffi::mlGetParamCol(self.params, ckey.as_ptr(), &mut len) };
        if ptr.is_null() {
            return Err(self.missing_output(key));
        }
        Ok(unsafe { std::slice::from_raw_parts(ptr, len).to_vec() })
    }

    pub fn get_ucol(&self, key: &str) -> Result<Vec<u64>> {
        let ckey = cstr(key)?;
        let mut len = 0usize;
        let ptr = unsafe { ffi::mlGetParamUCol(self.params, ckey.as_ptr(), &mut len) };
        if ptr.is_null() {
            return Err(self.missing_output(key));
        }
        Ok(unsafe { std::slice::from_raw_parts(ptr, len).to_vec() })
    }

    /// Reads a model pointer out of the parameter set. A pointer the caller
    /// already owns comes back as an unowned alias.
    pub fn get_model<M: ModelType>(&self, key: &str) -> Result<ModelHandle<M>> {
        let ckey = cstr(key)?;
        let ptr = unsafe { M::get_ptr(self.params, ckey.as_ptr()) };
        let ptr = NonNull::new(ptr).ok_or_else(|| Error::NullModel(key.to_string()))?;
        if self.caller_owned.contains(&(ptr.as_ptr() as usize)) {
            Ok(ModelHandle::from_raw_unowned(ptr))
        } else {
            Ok(ModelHandle::from_raw(ptr))
        }
    }

    /// Reads an untyped model pointer out of the parameter set.
    pub fn get_untyped_model(&self, key: &str) -> Result<UntypedHandle> {
        let ckey = cstr(key)?;
        let ptr = unsafe { ffi::mlGetParamModelPtr(self.params, ckey.as_ptr()) };
        NonNull::new(ptr)
            .map(UntypedHandle::from_raw)
            .ok_or_else(|| Error::NullModel(key.to_string()))
    }

    fn missing_output(&self, key: &str) -> Error {
        Error::InvalidInput(format!(
            "binding '{}' did not produce the requested output '{}'",
            self.binding, key
        ))
    }
}

impl Drop for BindingCtx {
    fn drop(&mut self) {
        log::trace!(
            "destroying parameter set and timers for binding '{}'",
            self.binding
        );
        unsafe {
            ffi::mlDestroyParams(self.params);
            ffi::mlDestroyTimers(self.timers);
        }
    }
}
