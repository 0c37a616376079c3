//! Ordinary least squares / ridge regression binding.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{LinearRegressionModel, ModelHandle};
use crate::params::BindingCtx;

/// Arguments for [`linear_regression`]. Train from `training` plus
/// `training_responses`, or reuse `input_model`.
#[derive(Debug, Clone, Default)]
pub struct LinearRegressionOptions<'a> {
    pub training: Option<Array2<f64>>,
    /// Response value for each training point.
    pub training_responses: Option<Vec<f64>>,
    pub input_model: Option<&'a ModelHandle<LinearRegressionModel>>,
    /// Points to predict responses for; enables `output_predictions`.
    pub test: Option<Array2<f64>>,
    /// Tikhonov regularization strength; 0 for plain least squares.
    /// Native default: 0.
    pub lambda: Option<f64>,
    pub layout: MatrixLayout,
}

/// Outputs of [`linear_regression`].
#[derive(Debug)]
pub struct LinearRegressionOutput {
    pub output_model: ModelHandle<LinearRegressionModel>,
    /// Predicted responses for `test`; present when a test matrix was given.
    pub output_predictions: Option<Vec<f64>>,
}

/// Fits or applies a linear regression model via the native
/// `linear_regression` binding.
pub fn linear_regression(
    options: &LinearRegressionOptions<'_>,
) -> Result<LinearRegressionOutput> {
    let mut ctx = BindingCtx::new("linear_regression")?;

    if let Some(v) = &options.training {
        ctx.set_mat("training", v.view(), options.layout)?;
    }
    if let Some(v) = &options.training_responses {
        ctx.set_col("training_responses", v)?;
    }
    if let Some(v) = options.input_model {
        ctx.set_model("input_model", v)?;
    }
    if let Some(v) = &options.test {
        ctx.set_mat("test", v.view(), options.layout)?;
    }
    if let Some(v) = options.lambda {
        ctx.set_f64("lambda", v)?;
    }

    ctx.mark_passed("output_model")?;
    let predict = options.test.is_some();
    if predict {
        ctx.mark_passed("output_predictions")?;
    }

    ctx.run(ffi::mlLinearRegression)?;

    Ok(LinearRegressionOutput {
        output_model: ctx.get_model("output_model")?,
        output_predictions: if predict {
            Some(ctx.get_col("output_predictions")?)
        } else {
            None
        },
    })
}
