//! DBSCAN density-based clustering binding.

use ndarray::{Array2, ArrayView2};

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::params::BindingCtx;

/// Optional arguments for [`dbscan`].
#[derive(Debug, Clone, Default)]
pub struct DbscanOptions {
    /// Radius of each point's neighborhood. Native default: 1.0.
    pub epsilon: Option<f64>,
    /// Minimum neighborhood size for a core point. Native default: 5.
    pub min_size: Option<usize>,
    /// Point selection policy during clustering: "ordered" or "random".
    /// Native default: "ordered".
    pub selection_type: Option<String>,
    pub layout: MatrixLayout,
}

/// Outputs of [`dbscan`]. Noise points carry the maximum index value as their
/// assignment.
#[derive(Debug, Clone)]
pub struct DbscanOutput {
    /// Cluster assignment per input point.
    pub assignments: Vec<u64>,
    /// Centroid of each discovered cluster.
    pub centroids: Array2<f64>,
}

/// Clusters `input` via the native `dbscan` binding.
pub fn dbscan(input: ArrayView2<'_, f64>, options: &DbscanOptions) -> Result<DbscanOutput> {
    let mut ctx = BindingCtx::new("dbscan")?;

    ctx.set_mat("input", input, options.layout)?;
    if let Some(v) = options.epsilon {
        ctx.set_f64("epsilon", v)?;
    }
    if let Some(v) = options.min_size {
        ctx.set_i64("min_size", v as i64)?;
    }
    if let Some(v) = &options.selection_type {
        ctx.set_str("selection_type", v)?;
    }

    ctx.mark_passed("assignments")?;
    ctx.mark_passed("centroids")?;

    ctx.run(ffi::mlDbscan)?;

    Ok(DbscanOutput {
        assignments: ctx.get_ucol("assignments")?,
        centroids: ctx.get_mat("centroids", options.layout)?,
    })
}
