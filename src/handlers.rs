use crate::classifier::Classifier;
use crate::errors::AppError;
use crate::models::{InputRecord, PredictParams, PredictionResult};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Classifier loaded at startup; read-only for the life of the process.
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

/// Health check endpoint.
///
/// Returns the service status and version. Does not touch the model.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "bankruptcy-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /predict/
///
/// Scores one company's financial indicators and labels the result against
/// the caller's threshold (0.5 when omitted).
///
/// Schema failures in the body or query are rejected with 422 before the
/// model is invoked. A failing model call is a 500.
#[utoipa::path(
    post,
    path = "/predict/",
    params(PredictParams),
    request_body = InputRecord,
    responses(
        (status = 200, description = "Prediction computed", body = PredictionResult),
        (status = 422, description = "Body or query does not match the schema"),
        (status = 500, description = "Inference failed")
    )
)]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PredictParams>, QueryRejection>,
    payload: Result<Json<InputRecord>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let Json(record) = payload?;
    let Query(params) = params?;

    let row = record.to_row();
    tracing::debug!("Scoring row: {:?}", row.columns().collect::<Vec<_>>());

    let classifier = Arc::clone(&state.classifier);

    // Inference is CPU-bound; keep it off the async workers.
    let probability = tokio::task::spawn_blocking(move || classifier.predict_proba(&row))
        .await?
        .map_err(|e| AppError::InferenceError(format!("{:#}", e)))?;

    if !(0.0..=1.0).contains(&probability) {
        return Err(AppError::InferenceError(format!(
            "probability {} outside [0, 1]",
            probability
        )));
    }

    let result = PredictionResult::from_probability(probability, params.threshold);

    tracing::debug!(
        "Prediction: {} (probability {:.6}, threshold {})",
        result.prediction,
        result.probability,
        params.threshold
    );

    Ok(Json(result))
}
