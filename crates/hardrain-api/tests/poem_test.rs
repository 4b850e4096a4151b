//! Integration tests for the poem endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use hardrain_test_support::{FailingGenerator, ScriptedGenerator};

#[tokio::test]
async fn test_nine_triggers_complete_a_nine_line_stanza() {
    // Arrange
    let generator = Arc::new(ScriptedGenerator::from_texts(&[
        "Oh, what did you see",
        "Oh, what did you see",
        "I saw a newborn baby with wild wolves all around it",
        "I saw a highway of diamonds with nobody on it",
        "I saw a black branch with blood that kept drippin'",
        "I saw a room full of men with their hammers a-bleedin'",
        "I saw a white ladder all covered with water",
    ]));
    let (app, sink) = common::build_test_app(generator.clone());

    // Act
    let mut roles = Vec::new();
    let mut texts = Vec::new();
    for _ in 0..9 {
        let (status, json) = common::post_json(app.clone(), "/api/v1/poem/lines").await;
        assert_eq!(status, StatusCode::OK);
        roles.push(json["line"]["role"].as_str().unwrap().to_owned());
        texts.push(json["line"]["text"].as_str().unwrap().to_owned());
    }

    // Assert
    assert_eq!(
        roles,
        vec![
            "question", "question", "body", "body", "body", "body", "body", "refrain_a",
            "refrain_b"
        ]
    );
    assert_eq!(texts[0], "Oh, what did you see, my blue-eyed son?");
    assert_eq!(texts[1], "Oh, what did you see, my darling young one?");
    assert_eq!(
        texts[7],
        "And it's a hard, and it's a hard, it's a hard, it's a hard"
    );
    assert_eq!(texts[8], "And it's a hard rain's a-gonna fall");
    assert_eq!(generator.requests().len(), 7);
    assert_eq!(sink.persisted().len(), 9);

    let (status, json) = common::get_json(app.clone(), "/api/v1/poem").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lines"].as_array().unwrap().len(), 18);
    assert_eq!(json["current_stanza"], 3);
    assert_eq!(json["position_in_stanza"], 0);

    let (status, text) = common::get_text(app, "/api/v1/poem/text").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.ends_with("And it's a hard rain's a-gonna fall\n\n"));
}

#[tokio::test]
async fn test_failed_generation_returns_502_and_keeps_transcript() {
    // Arrange
    let (app, sink) = common::build_test_app(Arc::new(FailingGenerator));

    // Act
    let (status, json) = common::post_json(app.clone(), "/api/v1/poem/lines").await;

    // Assert
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "generation_failed");
    assert!(sink.persisted().is_empty());

    let (_, json) = common::get_json(app, "/api/v1/poem").await;
    assert_eq!(json["lines"].as_array().unwrap().len(), 9);
    assert_eq!(json["current_stanza"], 2);
    assert_eq!(json["phase"], "idle");
}
