//! Collaborative filtering binding.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{CfModel, ModelHandle};
use crate::params::BindingCtx;

/// Arguments for [`cf`]. Training data is a list of (user, item, rating)
/// tuples, one tuple per point.
#[derive(Debug, Clone, Default)]
pub struct CfOptions<'a> {
    /// (user, item, rating) tuples to decompose.
    pub training: Option<Array2<f64>>,
    pub input_model: Option<&'a ModelHandle<CfModel>>,
    /// Users to generate recommendations for; enables the `output` matrix.
    pub query: Option<Vec<u64>>,
    /// Generate recommendations for every user. Native default: false.
    pub all_user_recommendations: Option<bool>,
    /// Factorization algorithm: "NMF", "BatchSVD", "SVDIncompleteIncremental",
    /// "SVDCompleteIncremental", "RegSVD", "RandSVD", or "BiasSVD".
    /// Native default: "NMF".
    pub algorithm: Option<String>,
    /// Neighborhood size for rating prediction. Native default: 5.
    pub neighborhood: Option<usize>,
    /// Rank of the decomposition, 0 to choose automatically. Native default: 0.
    pub rank: Option<usize>,
    /// Maximum factorizer iterations. Native default: 1000.
    pub max_iterations: Option<usize>,
    /// Residue threshold terminating the factorization. Native default: 1e-5.
    pub min_residue: Option<f64>,
    /// Number of recommendations per user. Native default: 5.
    pub recommendations: Option<usize>,
    /// Random seed, 0 to seed from the clock. Native default: 0.
    pub seed: Option<u64>,
    pub layout: MatrixLayout,
}

/// Outputs of [`cf`].
#[derive(Debug)]
pub struct CfOutput {
    pub output_model: ModelHandle<CfModel>,
    /// Recommended item indices, one column of recommendations per queried
    /// user; present when recommendations were requested.
    pub output: Option<Array2<u64>>,
}

/// Trains a collaborative-filtering model or generates recommendations via
/// the native `cf` binding.
pub fn cf(options: &CfOptions<'_>) -> Result<CfOutput> {
    let mut ctx = BindingCtx::new("cf")?;

    if let Some(v) = &options.training {
        ctx.set_mat("training", v.view(), options.layout)?;
    }
    if let Some(v) = options.input_model {
        ctx.set_model("input_model", v)?;
    }
    if let Some(v) = &options.query {
        ctx.set_ucol("query", v)?;
    }
    if let Some(v) = options.all_user_recommendations {
        ctx.set_bool("all_user_recommendations", v)?;
    }
    if let Some(v) = &options.algorithm {
        ctx.set_str("algorithm", v)?;
    }
    if let Some(v) = options.neighborhood {
        ctx.set_i64("neighborhood", v as i64)?;
    }
    if let Some(v) = options.rank {
        ctx.set_i64("rank", v as i64)?;
    }
    if let Some(v) = options.max_iterations {
        ctx.set_i64("max_iterations", v as i64)?;
    }
    if let Some(v) = options.min_residue {
        ctx.set_f64("min_residue", v)?;
    }
    if let Some(v) = options.recommendations {
        ctx.set_i64("recommendations", v as i64)?;
    }
    if let Some(v) = options.seed {
        ctx.set_u64("seed", v)?;
    }

    ctx.mark_passed("output_model")?;
    let recommend =
        options.query.is_some() || options.all_user_recommendations == Some(true);
    if recommend {
        ctx.mark_passed("output")?;
    }

    ctx.run(ffi::mlCf)?;

    Ok(CfOutput {
        output_model: ctx.get_model("output_model")?,
        output: if recommend {
            Some(ctx.get_umat("output", options.layout)?)
        } else {
            None
        },
    })
}
