//! k-means clustering binding.

use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::params::BindingCtx;

/// Optional arguments for [`kmeans`].
///
/// Each field maps to the parameter-set key of the same name. `None` leaves
/// the key absent so the native default applies; the defaults quoted below
/// are mirrored from the native library's documentation, which stays
/// authoritative.
#[derive(Debug, Clone, Default)]
pub struct KmeansOptions {
    /// Algorithm variant: "naive", "pelleg-moore", "elkan", "hamerly",
    /// "dualtree", or "dualtree-covertree". Native default: "naive".
    pub algorithm: Option<String>,
    /// Allow clusters to end up empty instead of reinitializing them.
    /// Native default: false.
    pub allow_empty_clusters: Option<bool>,
    /// Remove empty clusters when they occur. Native default: false.
    pub kill_empty_clusters: Option<bool>,
    /// Only output the cluster assignments, not the points. Native default: false.
    pub labels_only: Option<bool>,
    /// Maximum number of iterations, 0 for no limit. Native default: 1000.
    pub max_iterations: Option<usize>,
    /// Share of the dataset to sample for the refined-start heuristic.
    /// Native default: 0.02.
    pub percentage: Option<f64>,
    /// Use refined starting centroids from sampled subsets. Native default: false.
    pub refined_start: Option<bool>,
    /// Number of samplings for the refined start. Native default: 100.
    pub samplings: Option<usize>,
    /// Random seed, 0 to seed from the clock. Native default: 0.
    pub seed: Option<u64>,
    /// Starting centroids, one per requested cluster.
    pub initial_centroids: Option<Array2<f64>>,
    /// Orientation of the matrix arguments and outputs.
    pub layout: MatrixLayout,
}

/// Outputs of [`kmeans`].
#[derive(Debug, Clone)]
pub struct KmeansOutput {
    /// Final cluster centroids, one per cluster.
    pub centroid: Array2<f64>,
    /// The input points with each point's cluster assignment appended as an
    /// extra dimension.
    pub output: Array2<f64>,
}

/// Partitions `input` into `clusters` clusters with the native `kmeans`
/// binding.
pub fn kmeans(
    input: ArrayView2<'_, f64>,
    clusters: usize,
    options: &KmeansOptions,
) -> Result<KmeansOutput> {
    let mut ctx = BindingCtx::new("kmeans")?;

    ctx.set_mat("input", input, options.layout)?;
    ctx.set_i64("clusters", clusters as i64)?;
    if let Some(v) = &options.algorithm {
        ctx.set_str("algorithm", v)?;
    }
    if let Some(v) = options.allow_empty_clusters {
        ctx.set_bool("allow_empty_clusters", v)?;
    }
    if let Some(v) = options.kill_empty_clusters {
        ctx.set_bool("kill_empty_clusters", v)?;
    }
    if let Some(v) = options.labels_only {
        ctx.set_bool("labels_only", v)?;
    }
    if let Some(v) = options.max_iterations {
        ctx.set_i64("max_iterations", v as i64)?;
    }
    if let Some(v) = options.percentage {
        ctx.set_f64("percentage", v)?;
    }
    if let Some(v) = options.refined_start {
        ctx.set_bool("refined_start", v)?;
    }
    if let Some(v) = options.samplings {
        ctx.set_i64("samplings", v as i64)?;
    }
    if let Some(v) = options.seed {
        ctx.set_u64("seed", v)?;
    }
    if let Some(v) = &options.initial_centroids {
        ctx.set_mat("initial_centroids", v.view(), options.layout)?;
    }

    ctx.mark_passed("centroid")?;
    ctx.mark_passed("output")?;

    ctx.run(ffi::mlKmeans)?;

    Ok(KmeansOutput {
        centroid: ctx.get_mat("centroid", options.layout)?,
        output: ctx.get_mat("output", options.layout)?,
    })
}
