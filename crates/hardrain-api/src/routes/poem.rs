//! Routes for the poem transcript.

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use tracing::{info, instrument, warn};

use hardrain_stanza::application::query_handlers::{self, TranscriptView};
use hardrain_stanza::application::sequencer::GeneratedLine;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn get_transcript(State(state): State<AppState>) -> Json<TranscriptView> {
    Json(query_handlers::get_transcript(&state.sequencer))
}

/// GET /text
#[instrument(skip(state))]
async fn get_text(State(state): State<AppState>) -> String {
    query_handlers::render_text(&state.sequencer.snapshot().lines)
}

/// POST /lines
#[instrument(skip(state))]
async fn generate_line(State(state): State<AppState>) -> Result<Json<GeneratedLine>, ApiError> {
    info!("handling generate_line trigger");

    let generated = state.sequencer.generate_next().await?;
    if let Some(warning) = &generated.persist_warning {
        warn!(line_id = %generated.line.id, warning = %warning, "line kept without persistence");
    }

    Ok(Json(generated))
}

/// Returns the router for the poem.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_transcript))
        .route("/text", get(get_text))
        .route("/lines", post(generate_line))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use hardrain_core::generator::LineGenerator;
    use hardrain_core::sink::LineSink;
    use hardrain_stanza::application::sequencer::Sequencer;
    use hardrain_test_support::{
        FailingGenerator, FailingLineSink, FixedClock, MockRng, RecordingLineSink,
        ScriptedGenerator,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state_with(generator: Arc<dyn LineGenerator>, sink: Arc<dyn LineSink>) -> AppState {
        let sequencer = Sequencer::seeded(
            generator,
            sink,
            Arc::new(FixedClock::default()),
            Box::new(MockRng),
        );
        AppState::new(Arc::new(sequencer))
    }

    fn post_lines() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/lines")
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_line_returns_200_with_appended_question() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(ScriptedGenerator::from_texts(&["Oh, what did you see"])),
            Arc::new(RecordingLineSink::new()),
        ));

        // Act
        let response = app.oneshot(post_lines()).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(
            json["line"]["text"],
            "Oh, what did you see, my blue-eyed son?"
        );
        assert_eq!(json["line"]["role"], "question");
        assert_eq!(json["line"]["stanza_index"], 2);
        assert!(json["persist_warning"].is_null());
    }

    #[tokio::test]
    async fn test_generate_line_returns_502_when_generator_fails() {
        // Arrange
        let state = app_state_with(
            Arc::new(FailingGenerator),
            Arc::new(RecordingLineSink::new()),
        );
        let app = router().with_state(state.clone());

        // Act
        let response = app.oneshot(post_lines()).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = json_body(response).await;
        assert_eq!(json["error"], "generation_failed");
        assert_eq!(state.sequencer.snapshot().lines.len(), 9);
    }

    #[tokio::test]
    async fn test_generate_line_reports_persist_warning() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(ScriptedGenerator::from_texts(&["Oh, what did you see"])),
            Arc::new(FailingLineSink),
        ));

        // Act
        let response = app.oneshot(post_lines()).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["persist_warning"].is_string());
    }

    #[tokio::test]
    async fn test_get_transcript_returns_seed_stanza() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(FailingGenerator),
            Arc::new(RecordingLineSink::new()),
        ));
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["lines"].as_array().unwrap().len(), 9);
        assert_eq!(json["current_stanza"], 2);
        assert_eq!(json["position_in_stanza"], 0);
        assert_eq!(json["phase"], "idle");
    }

    #[tokio::test]
    async fn test_get_text_returns_plain_poem() {
        // Arrange
        let app = router().with_state(app_state_with(
            Arc::new(FailingGenerator),
            Arc::new(RecordingLineSink::new()),
        ));
        let request = Request::builder()
            .method("GET")
            .uri("/text")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Oh, where have you been, my blue-eyed son?\n"));
    }
}
