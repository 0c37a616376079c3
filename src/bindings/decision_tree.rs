//! Decision tree classifier binding.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{DecisionTreeModel, ModelHandle};
use crate::params::BindingCtx;

/// Arguments for [`decision_tree`]. Train from `training` plus `labels`, or
/// reuse `input_model`.
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeOptions<'a> {
    pub training: Option<Array2<f64>>,
    pub labels: Option<Vec<u64>>,
    /// Instance weights, one per training point.
    pub weights: Option<Vec<f64>>,
    pub input_model: Option<&'a ModelHandle<DecisionTreeModel>>,
    /// Points to classify; enables the prediction outputs.
    pub test: Option<Array2<f64>>,
    /// Minimum number of points in a leaf. Native default: 20.
    pub minimum_leaf_size: Option<usize>,
    /// Minimum gain required to split a node. Native default: 1e-7.
    pub minimum_gain_split: Option<f64>,
    /// Maximum tree depth, 0 for unlimited. Native default: 0.
    pub maximum_depth: Option<usize>,
    /// Print the accuracy on the training set after training.
    /// Native default: false.
    pub print_training_accuracy: Option<bool>,
    pub layout: MatrixLayout,
}

/// Outputs of [`decision_tree`].
#[derive(Debug)]
pub struct DecisionTreeOutput {
    pub output_model: ModelHandle<DecisionTreeModel>,
    /// Predicted labels for `test`; present when a test matrix was given.
    pub predictions: Option<Vec<u64>>,
    /// Per-class probabilities for `test`; present when a test matrix was given.
    pub probabilities: Option<Array2<f64>>,
}

/// Trains or applies a decision tree via the native `decision_tree` binding.
pub fn decision_tree(options: &DecisionTreeOptions<'_>) -> Result<DecisionTreeOutput> {
    let mut ctx = BindingCtx::new("decision_tree")?;

    if let Some(v) = &options.training {
        ctx.set_mat("training", v.view(), options.layout)?;
    }
    if let Some(v) = &options.labels {
        ctx.set_ucol("labels", v)?;
    }
    if let Some(v) = &options.weights {
        ctx.set_col("weights", v)?;
    }
    if let Some(v) = options.input_model {
        ctx.set_model("input_model", v)?;
    }
    if let Some(v) = &options.test {
        ctx.set_mat("test", v.view(), options.layout)?;
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
    if let Some(v) = options.print_training_accuracy {
        ctx.set_bool("print_training_accuracy", v)?;
    }

    ctx.mark_passed("output_model")?;
    let classify = options.test.is_some();
    if classify {
        ctx.mark_passed("predictions")?;
        ctx.mark_passed("probabilities")?;
    }

    ctx.run(ffi::mlDecisionTree)?;

    Ok(DecisionTreeOutput {
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
