//! Pre-trained bankruptcy classifier.
//!
//! The model is loaded once at startup and shared read-only by every request.
//! Handlers only see the [`Classifier`] trait, so the ONNX runtime stays behind
//! this module.

use crate::models::{FeatureRow, FEATURE_COUNT};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tract_onnx::prelude::*;

/// A binary classifier that scores one feature row.
pub trait Classifier: Send + Sync {
    /// Returns the estimated probability of class 1 (bankruptcy) for `row`.
    fn predict_proba(&self, row: &FeatureRow) -> anyhow::Result<f64>;
}

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Classifier backed by an ONNX export of the trained model.
///
/// The graph takes a single `[1, 10]` float input and yields the class
/// probabilities either as `[1, 2]` (both classes) or `[1, 1]` (positive
/// class only). A separate label output, when present, is ignored.
///
/// Feature values are narrowed from `f64` to `f32` before inference. Values
/// beyond the `f32` range (about 3.4e38) become infinite and reach the graph
/// as such.
pub struct OnnxClassifier {
    plan: OnnxPlan,
    path: PathBuf,
}

impl OnnxClassifier {
    /// Loads, optimizes and prepares the model stored at `path`.
    ///
    /// A missing or corrupt artifact is an error; the service must not start
    /// serving without a model.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            anyhow::bail!("model artifact not found at {}", path.display());
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .with_context(|| format!("failed to parse ONNX model {}", path.display()))?
            .with_input_fact(0, f32::fact([1, FEATURE_COUNT]).into())
            .context("model does not accept a [1, 10] float input")?
            .into_optimized()
            .context("failed to optimize ONNX model")?
            .into_runnable()
            .context("failed to build runnable model")?;

        tracing::info!("Loaded classifier from {}", path.display());

        Ok(Self {
            plan,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, row: &FeatureRow) -> anyhow::Result<f64> {
        let values: Vec<f32> = row.values().iter().map(|v| *v as f32).collect();
        let input = tract_ndarray::Array2::from_shape_vec((1, FEATURE_COUNT), values)?;

        let outputs = self.plan.run(tvec!(input.into_tensor().into()))?;

        positive_class_probability(&outputs)
    }
}

/// Picks the class-1 probability out of the graph outputs.
///
/// Exports from scikit-learn put an int64 label tensor first and the float
/// probability matrix second, so the first float output of a supported shape
/// wins.
fn positive_class_probability(outputs: &[TValue]) -> anyhow::Result<f64> {
    for output in outputs {
        if output.datum_type() != f32::datum_type() {
            continue;
        }

        let view = output.to_array_view::<f32>()?;
        match view.shape() {
            [1, 2] => return Ok(f64::from(view[[0, 1]])),
            [1, 1] => return Ok(f64::from(view[[0, 0]])),
            _ => continue,
        }
    }

    anyhow::bail!("model produced no probability output of shape [1, 2] or [1, 1]")
}
