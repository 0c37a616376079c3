//! Safe Rust bindings to a native machine-learning library's C API.
//!
//! Every algorithm the native library exports is wrapped by one function in
//! [`bindings`]: the wrapper marshals its arguments into a native parameter
//! set, invokes the algorithm's exported entry point, and marshals the
//! requested outputs back. Trained models are opaque native pointers held by
//! [`models::ModelHandle`], which deletes them through the matching native
//! routine on drop and can round-trip them through the library's opaque blob
//! format via [`io`].
//!
//! No algorithm runs in this crate; all training and prediction happens
//! inside the native library. By default the crate links a built-in stub
//! backend that mimics the ABI for testing; enable the `native` feature to
//! link the real library.
//!
//! ```no_run
//! use mlbridge::{kmeans, KmeansOptions};
//! use ndarray::Array2;
//!
//! # fn main() -> mlbridge::Result<()> {
//! let points = Array2::<f64>::zeros((100, 4));
//! let clustering = kmeans(points.view(), 3, &KmeansOptions::default())?;
//! assert_eq!(clustering.centroid.nrows(), 3);
//! # Ok(())
//! # }
//! ```

// The ABI symbol names come from the native library's documentation.
#![allow(non_snake_case)]
#![allow(clippy::too_many_arguments)]

pub mod bindings;
pub mod error;
pub mod ffi;
pub mod io;
pub mod marshal;
pub mod models;
pub(crate) mod params;

// Re-export commonly used types
pub use bindings::*;
pub use error::{Error, Result};
pub use marshal::MatrixLayout;
pub use models::{ModelHandle, ModelType, UntypedHandle};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Toggles the native library's own diagnostic output. Off by default.
pub fn set_verbose(enabled: bool) {
    unsafe {
        if enabled {
            ffi::mlEnableVerbose()
        } else {
            ffi::mlDisableVerbose()
        }
    }
}
