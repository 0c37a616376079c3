use thiserror::Error;

/// Error type for the binding layer.
///
/// The native library reports failure through a single boolean flag and prints
/// its own diagnostics, so `NativeCallFailed` carries nothing beyond the name
/// of the binding that failed. The remaining variants cover problems detected
/// on the Rust side before or after the native call.
#[derive(Error, Debug)]
pub enum Error {
    #[error("native binding '{binding}' failed; see the native library's output for details")]
    NativeCallFailed { binding: &'static str },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("native library returned a null model pointer for '{0}'")]
    NullModel(String),

    #[error("serialized model blob is malformed: {0}")]
    MalformedBlob(String),
}

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, Error>;
