//! Hidden Markov model training binding.
//!
//! The HMM entry points predate typed model metadata in the native ABI: their
//! models travel as bare pointers with no type tag, no typed delete routine,
//! and no serialization symbols. The wrapper preserves that contract through
//! [`UntypedHandle`] instead of inventing a type the native side never had.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::UntypedHandle;
use crate::params::BindingCtx;

/// Arguments for [`hmm_train`]. Provide `input` observations to train a new
/// model, or `input_model` to continue training an existing one.
#[derive(Debug, Clone, Default)]
pub struct HmmTrainOptions<'a> {
    /// Observation sequence, one observation per point.
    pub input: Option<Array2<f64>>,
    /// Existing model to continue training.
    pub input_model: Option<&'a UntypedHandle>,
    /// Number of hidden states; required when training from scratch.
    pub states: Option<usize>,
    /// Emission type: "discrete", "gaussian", "diag_gmm", or "gmm".
    /// Native default: "gaussian". Parameter-set key: `type`.
    pub hmm_type: Option<String>,
    /// Gaussians per state for the mixture emission types. Native default: 0.
    pub gaussians: Option<usize>,
    /// Log-likelihood tolerance ending Baum-Welch training.
    /// Native default: 1e-5.
    pub tolerance: Option<f64>,
    /// Random seed, 0 to seed from the clock. Native default: 0.
    pub seed: Option<u64>,
    pub layout: MatrixLayout,
}

/// Outputs of [`hmm_train`].
#[derive(Debug, Clone)]
pub struct HmmTrainOutput {
    /// The trained model. Untyped per the native HMM ABI: its lifetime is
    /// managed by the native library, not by this handle.
    pub output_model: UntypedHandle,
}

/// Trains a hidden Markov model via the native `hmm_train` binding.
pub fn hmm_train(options: &HmmTrainOptions<'_>) -> Result<HmmTrainOutput> {
    let mut ctx = BindingCtx::new("hmm_train")?;

    if let Some(v) = &options.input {
        ctx.set_mat("input", v.view(), options.layout)?;
    }
    if let Some(v) = options.input_model {
        ctx.set_untyped_model("input_model", v)?;
    }
    if let Some(v) = options.states {
        ctx.set_i64("states", v as i64)?;
    }
    if let Some(v) = &options.hmm_type {
        ctx.set_str("type", v)?;
    }
    if let Some(v) = options.gaussians {
        ctx.set_i64("gaussians", v as i64)?;
    }
    if let Some(v) = options.tolerance {
        ctx.set_f64("tolerance", v)?;
    }
    if let Some(v) = options.seed {
        ctx.set_u64("seed", v)?;
    }

    ctx.mark_passed("output_model")?;

    ctx.run(ffi::mlHmmTrain)?;

    Ok(HmmTrainOutput {
        output_model: ctx.get_untyped_model("output_model")?,
    })
}
