//! Sparse coding binding (dictionary learning with LARS encoding).

use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{ModelHandle, SparseCodingModel};
use crate::params::BindingCtx;

/// Optional arguments for [`sparse_coding`].
#[derive(Debug, Clone, Default)]
pub struct SparseCodingOptions<'a> {
    /// Existing model whose dictionary seeds the optimization.
    pub input_model: Option<&'a ModelHandle<SparseCodingModel>>,
    /// Points to encode against the learned dictionary; enables `codes`.
    pub test: Option<Array2<f64>>,
    /// Starting dictionary, one atom per point.
    pub initial_dictionary: Option<Array2<f64>>,
    /// L1 sparsity penalty on the codes. Native default: 0.
    pub lambda1: Option<f64>,
    /// L2 penalty on the codes. Native default: 0.
    pub lambda2: Option<f64>,
    /// Maximum alternating-optimization iterations, 0 for no limit.
    /// Native default: 0.
    pub max_iterations: Option<usize>,
    /// Objective-improvement threshold ending the optimization.
    /// Native default: 0.01.
    pub objective_tolerance: Option<f64>,
    /// Tolerance of the inner Newton solver. Native default: 1e-6.
    pub newton_tolerance: Option<f64>,
    /// Random seed, 0 to seed from the clock. Native default: 0.
    pub seed: Option<u64>,
    pub layout: MatrixLayout,
}

/// Outputs of [`sparse_coding`].
#[derive(Debug)]
pub struct SparseCodingOutput {
    pub output_model: ModelHandle<SparseCodingModel>,
    /// The learned dictionary, one atom per point.
    pub dictionary: Array2<f64>,
    /// Sparse codes of the `test` points; present when a test matrix was
    /// given.
    pub codes: Option<Array2<f64>>,
}

/// Learns a sparse-coding dictionary of `atoms` atoms from `training` via the
/// native `sparse_coding` binding.
pub fn sparse_coding(
    training: ArrayView2<'_, f64>,
    atoms: usize,
    options: &SparseCodingOptions<'_>,
) -> Result<SparseCodingOutput> {
    let mut ctx = BindingCtx::new("sparse_coding")?;

    ctx.set_mat("training", training, options.layout)?;
    ctx.set_i64("atoms", atoms as i64)?;
    if let Some(v) = options.input_model {
        ctx.set_model("input_model", v)?;
    }
    if let Some(v) = &options.test {
        ctx.set_mat("test", v.view(), options.layout)?;
    }
    if let Some(v) = &options.initial_dictionary {
        ctx.set_mat("initial_dictionary", v.view(), options.layout)?;
    }
    if let Some(v) = options.lambda1 {
        ctx.set_f64("lambda1", v)?;
    }
    if let Some(v) = options.lambda2 {
        ctx.set_f64("lambda2", v)?;
    }
    if let Some(v) = options.max_iterations {
        ctx.set_i64("max_iterations", v as i64)?;
    }
    if let Some(v) = options.objective_tolerance {
        ctx.set_f64("objective_tolerance", v)?;
    }
    if let Some(v) = options.newton_tolerance {
        ctx.set_f64("newton_tolerance", v)?;
    }
    if let Some(v) = options.seed {
        ctx.set_u64("seed", v)?;
    }

    ctx.mark_passed("output_model")?;
    ctx.mark_passed("dictionary")?;
    let encode = options.test.is_some();
    if encode {
        ctx.mark_passed("codes")?;
    }

    ctx.run(ffi::mlSparseCoding)?;

    Ok(SparseCodingOutput {
        output_model: ctx.get_model("output_model")?,
        dictionary: ctx.get_mat("dictionary", options.layout)?,
        codes: if encode {
            Some(ctx.get_mat("codes", options.layout)?)
        } else {
            None
        },
    })
}
