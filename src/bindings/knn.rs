//! k-nearest-neighbors search binding.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{KnnModel, ModelHandle};
use crate::params::BindingCtx;

/// Arguments for [`knn`]. Provide `reference` to build a search structure, or
/// `input_model` to reuse one; with `query` absent, neighbors are searched
/// within the reference set itself.
#[derive(Debug, Clone, Default)]
pub struct KnnOptions<'a> {
    /// Reference points to search within.
    pub reference: Option<Array2<f64>>,
    /// Query points; defaults to the reference set.
    pub query: Option<Array2<f64>>,
    pub input_model: Option<&'a ModelHandle<KnnModel>>,
    /// Search mode: "naive", "single_tree", "dual_tree", or "greedy".
    /// Native default: "dual_tree".
    pub algorithm: Option<String>,
    /// Tree type for the tree-based modes. Native default: "kd".
    pub tree_type: Option<String>,
    /// Leaf size of the built tree. Native default: 20.
    pub leaf_size: Option<usize>,
    /// Allowed approximation error; 0 for exact search. Native default: 0.
    pub epsilon: Option<f64>,
    /// Project the data through a random orthogonal basis first.
    /// Native default: false.
    pub random_basis: Option<bool>,
    /// Random seed, 0 to seed from the clock. Native default: 0.
    pub seed: Option<u64>,
    pub layout: MatrixLayout,
}

/// Outputs of [`knn`].
#[derive(Debug)]
pub struct KnnOutput {
    pub output_model: ModelHandle<KnnModel>,
    /// Indices of the k nearest reference points per query point; present
    /// when point data was given.
    pub neighbors: Option<Array2<u64>>,
    /// Distances to those neighbors, in the same shape.
    pub distances: Option<Array2<f64>>,
}

/// Finds the `k` nearest neighbors via the native `knn` binding.
pub fn knn(k: usize, options: &KnnOptions<'_>) -> Result<KnnOutput> {
    let mut ctx = BindingCtx::new("knn")?;

    ctx.set_i64("k", k as i64)?;
    if let Some(v) = &options.reference {
        ctx.set_mat("reference", v.view(), options.layout)?;
    }
    if let Some(v) = &options.query {
        ctx.set_mat("query", v.view(), options.layout)?;
    }
    if let Some(v) = options.input_model {
        ctx.set_model("input_model", v)?;
    }
    if let Some(v) = &options.algorithm {
        ctx.set_str("algorithm", v)?;
    }
    if let Some(v) = &options.tree_type {
        ctx.set_str("tree_type", v)?;
    }
    if let Some(v) = options.leaf_size {
        ctx.set_i64("leaf_size", v as i64)?;
    }
    if let Some(v) = options.epsilon {
        ctx.set_f64("epsilon", v)?;
    }
    if let Some(v) = options.random_basis {
        ctx.set_bool("random_basis", v)?;
    }
    if let Some(v) = options.seed {
        ctx.set_u64("seed", v)?;
    }

    ctx.mark_passed("output_model")?;
    let search = options.reference.is_some() || options.query.is_some();
    if search {
        ctx.mark_passed("neighbors")?;
        ctx.mark_passed("distances")?;
    }

    ctx.run(ffi::mlKnn)?;

    Ok(KnnOutput {
        output_model: ctx.get_model("output_model")?,
        neighbors: if search {
            Some(ctx.get_umat("neighbors", options.layout)?)
        } else {
            None
        },
        distances: if search {
            Some(ctx.get_mat("distances", options.layout)?)
        } else {
            None
        },
    })
}
