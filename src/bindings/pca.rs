//! Principal component analysis binding.

use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::params::BindingCtx;

/// Optional arguments for [`pca`].
#[derive(Debug, Clone, Default)]
pub struct PcaOptions {
    /// Dimensionality to reduce to, 0 to keep all dimensions.
    /// Native default: 0.
    pub new_dimensionality: Option<usize>,
    /// Scale each dimension to unit variance first. Native default: false.
    pub scale: Option<bool>,
    /// Keep enough dimensions to retain this fraction of the variance,
    /// overriding `new_dimensionality` when positive. Native default: 0.
    pub var_to_retain: Option<f64>,
    /// Decomposition method: "exact", "randomized", or "quic".
    /// Native default: "exact".
    pub decomposition_method: Option<String>,
    pub layout: MatrixLayout,
}

/// Outputs of [`pca`].
#[derive(Debug, Clone)]
pub struct PcaOutput {
    /// The input points projected onto the retained principal components.
    pub output: Array2<f64>,
}

/// Reduces the dimensionality of `input` via the native `pca` binding.
pub fn pca(input: ArrayView2<'_, f64>, options: &PcaOptions) -> Result<PcaOutput> {
    let mut ctx = BindingCtx::new("pca")?;

    ctx.set_mat("input", input, options.layout)?;
    if let Some(v) = options.new_dimensionality {
        ctx.set_i64("new_dimensionality", v as i64)?;
    }
    if let Some(v) = options.scale {
        ctx.set_bool("scale", v)?;
    }
    if let Some(v) = options.var_to_retain {
        ctx.set_f64("var_to_retain", v)?;
    }
    if let Some(v) = &options.decomposition_method {
        ctx.set_str("decomposition_method", v)?;
    }

    ctx.mark_passed("output")?;

    ctx.run(ffi::mlPca)?;

    Ok(PcaOutput {
        output: ctx.get_mat("output", options.layout)?,
    })
}
