use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::c_void;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::ffi::{self, ModelPtr};
use crate::models::ModelType;

/// Owning wrapper around a native model pointer.
///
/// The wrapper deletes the native model through the type's delete routine
/// exactly once, when it drops while still owning the pointer. Ownership ends
/// either at drop or through [`release`](ModelHandle::release), which hands
/// the raw pointer to the caller for a transfer-of-ownership set call.
///
/// A handle obtained from a binding that was given the same model as input is
/// created unowned: the caller's original handle keeps the one finalizer.
pub struct ModelHandle<M: ModelType> {
    ptr: NonNull<c_void>,
    owned: Cell<bool>,
    _model: PhantomData<M>,
}

impl<M: ModelType> ModelHandle<M> {
    /// Wraps a pointer whose lifetime this handle now owns.
    pub(crate) fn from_raw(ptr: NonNull<c_void>) -> Self {
        ModelHandle {
            ptr,
            owned: Cell::new(true),
            _model: PhantomData,
        }
    }

    /// Wraps a pointer that some other handle already owns. Dropping the
    /// result never invokes the native delete routine.
    pub(crate) fn from_raw_unowned(ptr: NonNull<c_void>) -> Self {
        ModelHandle {
            ptr,
            owned: Cell::new(false),
            _model: PhantomData,
        }
    }

    /// The raw pointer, for passing into native calls.
    pub fn as_ptr(&self) -> ModelPtr {
        self.ptr.as_ptr()
    }

    /// Whether this handle will delete the model when dropped.
    pub fn is_owned(&self) -> bool {
        self.owned.get()
    }

    /// Consumes the handle, transferring ownership of the pointer to the
    /// caller. The native delete routine will not run for it.
    pub fn release(self) -> ModelPtr {
        self.owned.set(false);
        self.ptr.as_ptr()
    }

    /// Serializes the model into the native library's opaque blob format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut len = 0usize;
        let buf = unsafe { M::serialize_ptr(self.as_ptr(), &mut len) };
        if buf.is_null() {
            return Err(Error::MalformedBlob(format!(
                "native serializer produced no data for '{}'",
                M::TYPE_NAME
            )));
        }
        let bytes = unsafe { std::slice::from_raw_parts(buf, len).to_vec() };
        unsafe { ffi::mlDeleteBuffer(buf, len) };
        Ok(bytes)
    }

    /// Reconstructs a model from a blob previously produced by
    /// [`to_bytes`](ModelHandle::to_bytes). The blob format is defined
    /// entirely by the native library and treated as opaque here.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let ptr = unsafe { M::deserialize_ptr(data.as_ptr(), data.len()) };
        NonNull::new(ptr)
            .map(Self::from_raw)
            .ok_or_else(|| {
                Error::MalformedBlob(format!(
                    "blob is not a serialized '{}' model",
                    M::TYPE_NAME
                ))
            })
    }
}

impl<M: ModelType> Drop for ModelHandle<M> {
    fn drop(&mut self) {
        if self.owned.get() {
            log::trace!("deleting native '{}' model", M::TYPE_NAME);
            unsafe { M::delete_ptr(self.ptr.as_ptr()) };
        }
    }
}

impl<M: ModelType> fmt::Debug for ModelHandle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("type", &M::TYPE_NAME)
            .field("ptr", &self.ptr)
            .field("owned", &self.owned.get())
            .finish()
    }
}

/// Handle for bindings whose native ABI carries no model-type metadata.
///
/// The native contract for these models is a bare pointer: there is no typed
/// delete or serialize routine to call, so the handle performs no cleanup and
/// the pointer's lifetime is managed by the native library for the duration of
/// the process.
#[derive(Debug, Clone, Copy)]
pub struct UntypedHandle {
    ptr: NonNull<c_void>,
}

impl UntypedHandle {
    pub(crate) fn from_raw(ptr: NonNull<c_void>) -> Self {
        UntypedHandle { ptr }
    }

    /// The raw pointer, for passing into native calls.
    pub fn as_ptr(&self) -> ModelPtr {
        self.ptr.as_ptr()
    }
}
