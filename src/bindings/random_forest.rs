//! Random forest classifier binding.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{ModelHandle, RandomForestModel};
use crate::params::BindingCtx;

/// Arguments for [`random_forest`]. Train from `training` plus `labels`, or
/// reuse `input_model`.
#[derive(Debug, Clone, Default)]
pub struct RandomForestOptions<'a> {
    pub training: Option<Array2<f64>>,
    pub labels: Option<Vec<u64>>,
    pub input_model: Option<&'a ModelHandle<RandomForestModel>>,
    /// Points to classify; enables the prediction outputs.
    pub test: Option<Array2<f64>>,
    /// Number of trees in the forest. Native default: 10.
    pub num_trees: Option<usize>,
    /// Minimum number of points in a leaf. Native default: 1.
    pub minimum_leaf_size: Option<usize>,
    /// Minimum gain required to split a node. Native default: 0.
    pub minimum_gain_split: Option<f64>,
    /// Maximum tree depth, 0 for unlimited. Native default: 0.
    pub maximum_depth: Option<usize>,
    /// Number of dimensions sampled per split, 0 for the square root of the
    /// dimensionality. Native default: 0.
    pub subspace_dim: Option<usize>,
    /// Random seed, 0 to seed from the clock. Native default: 0.
    pub seed: Option<u64>,
    /// Print the accuracy on the training set after training.
    /// Native default: false.
    pub print_training_accuracy: Option<bool>,
    pub layout: MatrixLayout,
}

/// Outputs of [`random_forest`].
#[derive(Debug)]
pub struct RandomForestOutput {
    pub output_model: ModelHandle<RandomForestModel>,
    pub predictions: Option<Vec<u64>>,
    pub probabilities: Option<Array2<f64>>,
}

/// Trains or applies a random forest via the native `random_forest` binding.
pub fn random_forest(options: &RandomForestOptions<'_>) -> Result<RandomForestOutput> {
    let mut ctx = BindingCtx::new("random_forest")?;

    if let Some(v) = &options.training {
        ctx.set_mat("training", v.view(), options.layout)?;
    }
    if let Some(v) = &options.labels {
        ctx.set_ucol("labels", v)?;
    }
    if let Some(v) = options.input_model {
        ctx.set_model("input_model", v)?;
    }
    if let Some(v) = &options.test {
        ctx.set_mat("test", v.view(), options.layout)?;
    }
    if let Some(v) = options.num_trees {
        ctx.set_i64("num_trees", v as i64)?;
    }
    if let Some(v) = options.minimum_leaf_size {
        ctx.set_i64("minimum_leaf_size", v as i64)?;
    }
    if let Some(v) = options.minimum_gain_split {
        ctx.set_f64("minimum_gain_split", v)?;
    }
    if let Some(v) = options.maximum_depth {
        ctx.set_i64("maximum_depth", v as i64)?;
    }
    if let Some(v) = options.subspace_dim {
        ctx.set_i64("subspace_dim", v as i64)?;
    }
    if let Some(v) = options.seed {
        ctx.set_u64("seed", v)?;
    }
    if let Some(v) = options.print_training_accuracy {
        ctx.set_bool("print_training_accuracy", v)?;
    }

    ctx.mark_passed("output_model")?;
    let classify = options.test.is_some();
    if classify {
        ctx.mark_passed("predictions")?;
        ctx.mark_passed("probabilities")?;
    }

    ctx.run(ffi::mlRandomForest)?;

    Ok(RandomForestOutput {
        output_model: ctx.get_model("output_model")?,
        predictions: if classify {
            Some(ctx.get_ucol("predictions")?)
        } else {
            None
        },
        probabilities: if classify {
            Some(ctx.get_mat("probabilities", options.layout)?)
        } else {
            None
        },
    })
}
