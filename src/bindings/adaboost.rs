//! AdaBoost.MH binding.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{AdaboostModel, ModelHandle};
use crate::params::BindingCtx;

/// Arguments for [`adaboost`]. At least one of `training` (with `labels`) or
/// `input_model` must be given; the native library rejects the call otherwise.
#[derive(Debug, Clone, Default)]
pub struct AdaboostOptions<'a> {
    /// Training points.
    pub training: Option<Array2<f64>>,
    /// Labels for the training points, one per point, in `[0, num_classes)`.
    pub labels: Option<Vec<u64>>,
    /// Previously trained model to start from instead of training anew.
    pub input_model: Option<&'a ModelHandle<AdaboostModel>>,
    /// Points to classify; enables the prediction outputs.
    pub test: Option<Array2<f64>>,
    /// Maximum number of boosting iterations. Native default: 1000.
    pub iterations: Option<usize>,
    /// Tolerance below which the boosting loop terminates. Native default: 1e-10.
    pub tolerance: Option<f64>,
    /// Weak learner: "decision_stump" or "perceptron".
    /// Native default: "decision_stump".
    pub weak_learner: Option<String>,
    /// Orientation of the matrix arguments and outputs.
    pub layout: MatrixLayout,
}

/// Outputs of [`adaboost`].
#[derive(Debug)]
pub struct AdaboostOutput {
    pub output_model: ModelHandle<AdaboostModel>,
    /// Predicted labels for `test`; present when a test matrix was given.
    pub predictions: Option<Vec<u64>>,
    /// Per-class probabilities for `test`; present when a test matrix was given.
    pub probabilities: Option<Array2<f64>>,
}

/// Trains or applies an AdaBoost ensemble via the native `adaboost` binding.
pub fn adaboost(options: &AdaboostOptions<'_>) -> Result<AdaboostOutput> {
    let mut ctx = BindingCtx::new("adaboost")?;

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
    if let Some(v) = options.iterations {
        ctx.set_i64("iterations", v as i64)?;
    }
    if let Some(v) = options.tolerance {
        ctx.set_f64("tolerance", v)?;
    }
    if let Some(v) = &options.weak_learner {
        ctx.set_str("weak_learner", v)?;
    }

    ctx.mark_passed("output_model")?;
    let classify = options.test.is_some();
    if classify {
        ctx.mark_passed("predictions")?;
        ctx.mark_passed("probabilities")?;
    }

    ctx.run(ffi::mlAdaboost)?;

    Ok(AdaboostOutput {
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
