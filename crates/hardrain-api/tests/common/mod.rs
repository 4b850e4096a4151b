//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use hardrain_core::generator::LineGenerator;
use hardrain_core::rng::DeterministicRng;
use hardrain_core::sink::LineSink;
use hardrain_stanza::application::sequencer::Sequencer;
use hardrain_test_support::{FixedClock, RecordingLineSink, SequenceRng};
use http_body_util::BodyExt;
use tower::ServiceExt;

use hardrain_api::build_router;
use hardrain_api::state::AppState;

/// Build the full app router around a seeded sequencer with deterministic
/// clock and a sink that records what it is given.
pub fn build_test_app(generator: Arc<dyn LineGenerator>) -> (Router, Arc<RecordingLineSink>) {
    let sink = Arc::new(RecordingLineSink::new());
    let app = build_test_app_with(generator, sink.clone(), Box::new(SequenceRng::new(vec![0])));
    (app, sink)
}

/// Build the full app router with explicit collaborators.
pub fn build_test_app_with(
    generator: Arc<dyn LineGenerator>,
    sink: Arc<dyn LineSink>,
    rng: Box<dyn DeterministicRng>,
) -> Router {
    let sequencer = Sequencer::seeded(generator, sink, Arc::new(FixedClock::default()), rng);
    build_router(AppState::new(Arc::new(sequencer)))
}

/// Send a POST request with an empty body and return the JSON response.
pub async fn post_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the JSON response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, text) = get_text(app, uri).await;
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    (status, json)
}

/// Send a GET request and return the body as text.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}
