//! Streaming of serialized models.
//!
//! A persisted model is a length-prefixed opaque blob: a little-endian `u64`
//! byte count followed by exactly the bytes the native serializer produced.
//! The blob's internal format belongs to the native library; this layer only
//! moves it to and from a stream, byte for byte.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::models::{ModelHandle, ModelType};

/// Writes `model` to `writer` as a length-prefixed blob.
pub fn save_model<M: ModelType, W: Write>(model: &ModelHandle<M>, writer: &mut W) -> Result<()> {
    let bytes = model.to_bytes()?;
    writer.write_all(&(bytes.len() as u64).to_le_bytes())?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Reads one length-prefixed blob from `reader` and reconstructs the model.
pub fn load_model<M: ModelType, R: Read>(reader: &mut R) -> Result<ModelHandle<M>> {
    let mut prefix = [0u8; 8];
    reader.read_exact(&mut prefix)?;
    let len = u64::from_le_bytes(prefix);
    let len = usize::try_from(len)
        .map_err(|_| Error::MalformedBlob(format!("length prefix {} exceeds usize", len)))?;
    let mut blob = vec![0u8; len];
    reader.read_exact(&mut blob)?;
    ModelHandle::<M>::from_bytes(&blob)
}
