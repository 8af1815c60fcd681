//! Bankruptcy Prediction API Library
//!
//! Serves a pre-trained bankruptcy classifier over HTTP. The model is loaded
//! once at startup and every request scores a single record of ten financial
//! indicators against a caller-adjustable threshold.
//!
//! # Modules
//!
//! - `api`: Router, middleware and OpenAPI document.
//! - `classifier`: Classifier trait and the ONNX-backed implementation.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Request, response and feature row types.

pub mod api;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
