//! L2-regularized logistic regression binding.

use ndarray::Array2;

use crate::error::Result;
use crate::ffi;
use crate::marshal::MatrixLayout;
use crate::models::{LogisticRegressionModel, ModelHandle};
use crate::params::BindingCtx;

/// Arguments for [`logistic_regression`]. Labels must be 0 or 1; the native
/// library rejects anything else.
#[derive(Debug, Clone, Default)]
pub struct LogisticRegressionOptions<'a> {
    pub training: Option<Array2<f64>>,
    pub labels: Option<Vec<u64>>,
    pub input_model: Option<&'a ModelHandle<LogisticRegressionModel>>,
    /// Points to classify; enables the prediction outputs.
    pub test: Option<Array2<f64>>,
    /// L2 regularization strength. Native default: 0.
    pub lambda: Option<f64>,
    /// Maximum optimizer iterations, 0 for unlimited. Native default: 10000.
    pub max_iterations: Option<usize>,
    /// Optimizer: "lbfgs" or "sgd". Native default: "lbfgs".
    pub optimizer: Option<String>,
    /// SGD step size. Native default: 0.01.
    pub step_size: Option<f64>,
    /// SGD batch size. Native default: 64.
    pub batch_size: Option<usize>,
    /// Convergence tolerance. Native default: 1e-10.
    pub tolerance: Option<f64>,
    /// Probability threshold separating the two classes. Native default: 0.5.
    pub decision_boundary: Option<f64>,
    pub layout: MatrixLayout,
}

/// Outputs of [`logistic_regression`].
#[derive(Debug)]
pub struct LogisticRegressionOutput {
    pub output_model: ModelHandle<LogisticRegressionModel>,
    pub predictions: Option<Vec<u64>>,
    pub probabilities: Option<Array2<f64>>,
}

/// Trains or applies a logistic regression model via the native
/// `logistic_regression` binding.
pub fn logistic_regression(
    options: &LogisticRegressionOptions<'_>,
) -> Result<LogisticRegressionOutput> {
    let mut ctx = BindingCtx::new("logistic_regression")?;

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
    if let Some(v) = options.lambda {
        ctx.set_f64("lambda", v)?;
    }
    if let Some(v) = options.max_iterations {
        ctx.set_i64("max_iterations", v as i64)?;
    }
    if let Some(v) = &options.optimizer {
        ctx.set_str("optimizer", v)?;
    }
    if let Some(v) = options.step_size {
        ctx.set_f64("step_size", v)?;
    }
    if let Some(v) = options.batch_size {
        ctx.set_i64("batch_size", v as i64)?;
    }
    if let Some(v) = options.tolerance {
        ctx.set_f64("tolerance", v)?;
    }
    if let Some(v) = options.decision_boundary {
        ctx.set_f64("decision_boundary", v)?;
    }

    ctx.mark_passed("output_model")?;
    let classify = options.test.is_some();
    if classify {
        ctx.mark_passed("predictions")?;
        ctx.mark_passed("probabilities")?;
    }

    ctx.run(ffi::mlLogisticRegression)?;

    Ok(LogisticRegressionOutput {
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
