//! Upstream client tests
//!
//! Exercise the analysis path end to end against a mocked Gemini endpoint:
//! successful structured responses and every recognized upstream failure
//! collapsing into the single generic error

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use httpmock::prelude::*;
use medlens::config::settings::{GeminiConfig, LoggingConfig, RequestConfig, ServerConfig, Settings};
use medlens::handlers::create_router;
use medlens::ANALYSIS_FAILED_MESSAGE;
use tower::ServiceExt;

const MODEL_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn create_test_settings(base_url: String) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        gemini: GeminiConfig {
            api_key: "test-key-for-client-1234".to_string(),
            base_url,
            model: "gemini-2.5-flash".to_string(),
            timeout: 10,
        },
        request: RequestConfig {
            max_request_size: 1024 * 1024,
            max_image_bytes: 512 * 1024,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
        },
    }
}

fn analyze_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A well-formed candidate carrying a schema-conforming analysis payload
fn candidate_body(analysis_json: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": analysis_json }]
            },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_successful_analysis_roundtrip() {
    let server = MockServer::start_async().await;
    let analysis = serde_json::json!({
        "potentialErrors": [{
            "category": "Dosing",
            "risk": "High",
            "description": "Warfarin dose above usual range",
            "rationale": "Prescribed 15 mg daily; usual maintenance is 2-10 mg"
        }],
        "drugInformation": [{
            "name": "Warfarin",
            "class": "Vitamin K antagonist",
            "mechanism": "Inhibits vitamin K epoxide reductase",
            "indication": "Atrial fibrillation",
            "prescribedDose": "15 mg daily",
            "standardDose": "2-10 mg daily, INR-adjusted",
            "adverseEffects": "Bleeding",
            "monitoring": "INR",
            "precautions": "Numerous drug interactions"
        }],
        "labValues": []
    });

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MODEL_PATH)
                .header("x-goog-api-key", "test-key-for-client-1234")
                .json_body_partial(r#"{"generationConfig":{"responseMimeType":"application/json"}}"#);
            then.status(200)
                .json_body(candidate_body(&analysis.to_string()));
        })
        .await;

    let app = create_router(create_test_settings(server.base_url()))
        .await
        .expect("Failed to create router");

    let response = app
        .oneshot(analyze_request(r#"{"text":"Warfarin 15mg daily"}"#))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["potentialErrors"][0]["risk"], "High");
    assert_eq!(body["drugInformation"][0]["class"], "Vitamin K antagonist");
    assert_eq!(body["labValues"], serde_json::json!([]));
}

#[tokio::test]
async fn test_image_submission_reaches_upstream_inline() {
    let server = MockServer::start_async().await;
    let empty_analysis = r#"{"potentialErrors":[],"drugInformation":[],"labValues":[]}"#;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MODEL_PATH)
                .body_contains("iVBORw0KGgo=")
                .body_contains("image/png");
            then.status(200).json_body(candidate_body(empty_analysis));
        })
        .await;

    let app = create_router(create_test_settings(server.base_url()))
        .await
        .expect("Failed to create router");

    let response = app
        .oneshot(analyze_request(
            r#"{"image":{"mimeType":"image/png","data":"iVBORw0KGgo="}}"#,
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);

    // Empty arrays still come back explicitly for the per-tab empty states
    let body = response_json(response).await;
    assert_eq!(body["potentialErrors"], serde_json::json!([]));
    assert_eq!(body["drugInformation"], serde_json::json!([]));
    assert_eq!(body["labValues"], serde_json::json!([]));
}

#[tokio::test]
async fn test_upstream_http_error_yields_generic_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(500).json_body(serde_json::json!({
                "error": { "code": 500, "message": "Internal error", "status": "INTERNAL" }
            }));
        })
        .await;

    let app = create_router(create_test_settings(server.base_url()))
        .await
        .expect("Failed to create router");

    let response = app
        .oneshot(analyze_request(r#"{"text":"Metformin 500mg"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert_eq!(body["error"]["type"], "analysis_error");
    assert_eq!(body["error"]["message"], ANALYSIS_FAILED_MESSAGE);
    // Upstream detail stays server-side
    assert!(!body.to_string().contains("INTERNAL"));
}

#[tokio::test]
async fn test_empty_candidates_yield_generic_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .json_body(serde_json::json!({ "candidates": [] }));
        })
        .await;

    let app = create_router(create_test_settings(server.base_url()))
        .await
        .expect("Failed to create router");

    let response = app
        .oneshot(analyze_request(r#"{"text":"Metformin 500mg"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert_eq!(body["error"]["message"], ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_non_schema_candidate_text_yields_generic_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .json_body(candidate_body("I cannot analyze this document."));
        })
        .await;

    let app = create_router(create_test_settings(server.base_url()))
        .await
        .expect("Failed to create router");

    let response = app
        .oneshot(analyze_request(r#"{"text":"Metformin 500mg"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert_eq!(body["error"]["message"], ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_blocked_prompt_yields_generic_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200).json_body(serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            }));
        })
        .await;

    let app = create_router(create_test_settings(server.base_url()))
        .await
        .expect("Failed to create router");

    let response = app
        .oneshot(analyze_request(r#"{"text":"Metformin 500mg"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert_eq!(body["error"]["message"], ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_unparsable_upstream_body_yields_generic_message() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(200)
                .header("Content-Type", "application/json")
                .body("this is not json");
        })
        .await;

    let app = create_router(create_test_settings(server.base_url()))
        .await
        .expect("Failed to create router");

    let response = app
        .oneshot(analyze_request(r#"{"text":"Metformin 500mg"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert_eq!(body["error"]["message"], ANALYSIS_FAILED_MESSAGE);
}
