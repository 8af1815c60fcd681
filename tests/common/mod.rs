//! Shared helpers for the HTTP integration tests.
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bankruptcy_api::api;
use bankruptcy_api::classifier::Classifier;
use bankruptcy_api::handlers::AppState;
use bankruptcy_api::models::{FeatureRow, FEATURE_NAMES};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_BODY_LIMIT: usize = 16 * 1024;

/// Always returns the same probability.
pub struct FixedClassifier(pub f64);

impl Classifier for FixedClassifier {
    fn predict_proba(&self, _row: &FeatureRow) -> anyhow::Result<f64> {
        Ok(self.0)
    }
}

/// Logistic score over the weighted feature sum, like a fitted linear model.
pub struct LogisticClassifier {
    pub weights: [f64; 10],
    pub bias: f64,
}

impl Classifier for LogisticClassifier {
    fn predict_proba(&self, row: &FeatureRow) -> anyhow::Result<f64> {
        let z: f64 = row
            .values()
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.bias;
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

/// Fails every call, as a broken model would.
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict_proba(&self, _row: &FeatureRow) -> anyhow::Result<f64> {
        anyhow::bail!("matrix multiplication failed")
    }
}

/// Counts calls before delegating.
pub struct CountingClassifier<C> {
    pub inner: C,
    pub calls: Arc<AtomicUsize>,
}

impl<C: Classifier> Classifier for CountingClassifier<C> {
    fn predict_proba(&self, row: &FeatureRow) -> anyhow::Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.predict_proba(row)
    }
}

pub fn app_with(classifier: impl Classifier + 'static) -> Router {
    api::router(
        Arc::new(AppState::new(Arc::new(classifier))),
        TEST_BODY_LIMIT,
    )
}

pub fn sample_logistic() -> LogisticClassifier {
    LogisticClassifier {
        weights: [0.8, -1.2, 0.5, -2.0, 0.1, 1.5, -1.0, 2.5, -0.7, -0.3],
        bias: -1.0,
    }
}

/// A complete record with every feature set to `value`.
pub fn record_json(value: f64) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = FEATURE_NAMES
        .iter()
        .map(|name| (name.to_string(), serde_json::json!(value)))
        .collect();
    serde_json::Value::Object(map)
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = send(app, request).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
