use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;
use tokio::runtime::Handle;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::config::{OverlapPolicy, RecognitionConfig};
use crate::session::{EventReceiver, event_channel};

fn config_for(server: &MockServer) -> RecognitionConfig {
    RecognitionConfig {
        endpoint: format!("{}/analyze", server.uri()),
        api_key: Some("test-key".to_string()),
        ..RecognitionConfig::default()
    }
}

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 1, 2, 3];

#[test]
fn data_url_wraps_base64_png() {
    let url = png_data_url(PNG);
    let encoded = url.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), PNG);
}

#[tokio::test]
async fn posts_bearer_token_and_image_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({ "image": png_data_url(PNG) })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "description": "a cat" })))
        .expect(1)
        .mount(&server)
        .await;

    let recognizer = HttpRecognizer::new(&config_for(&server)).unwrap();
    let description = recognizer.recognize(PNG).await.unwrap();
    assert_eq!(description, "a cat");
}

#[tokio::test]
async fn extra_response_fields_are_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "description": "a dog", "confidence": 0.9 })),
        )
        .mount(&server)
        .await;

    let recognizer = HttpRecognizer::new(&config_for(&server)).unwrap();
    assert_eq!(recognizer.recognize(PNG).await.unwrap(), "a dog");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let recognizer = HttpRecognizer::new(&config_for(&server)).unwrap();
    let err = recognizer.recognize(PNG).await.unwrap_err();
    assert!(
        matches!(err, RecognitionError::Status { status: 401, ref body } if body == "bad key"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn success_status_with_error_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "nope" })))
        .mount(&server)
        .await;

    let recognizer = HttpRecognizer::new(&config_for(&server)).unwrap();
    let err = recognizer.recognize(PNG).await.unwrap_err();
    assert!(matches!(err, RecognitionError::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let recognizer = HttpRecognizer::new(&config_for(&server)).unwrap();
    let err = recognizer.recognize(PNG).await.unwrap_err();
    assert!(matches!(err, RecognitionError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = RecognitionConfig {
        endpoint: format!("http://127.0.0.1:{port}/analyze"),
        api_key: Some("k".to_string()),
        ..RecognitionConfig::default()
    };
    let recognizer = HttpRecognizer::new(&config).unwrap();
    let err = recognizer.recognize(PNG).await.unwrap_err();
    assert!(matches!(err, RecognitionError::Transport(_)));
}

#[test]
fn debug_output_masks_key() {
    let config = RecognitionConfig {
        api_key: Some("super-secret-key".to_string()),
        ..RecognitionConfig::default()
    };
    let recognizer = HttpRecognizer::new(&config).unwrap();
    let rendered = format!("{recognizer:?}");
    assert!(!rendered.contains("secret"));
    assert_eq!(recognizer.endpoint(), "https://api.gemini.ai/analyze");
}

#[derive(Clone, Default)]
struct CountingRecognizer {
    calls: Arc<Mutex<usize>>,
    fail: bool,
}

#[async_trait]
impl Recognizer for CountingRecognizer {
    async fn recognize(&self, _image_png: &[u8]) -> Result<String, RecognitionError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            Err(RecognitionError::MalformedResponse("missing description".to_string()))
        } else {
            Ok("a house".to_string())
        }
    }
}

struct PanickingRecognizer;

#[async_trait]
impl Recognizer for PanickingRecognizer {
    async fn recognize(&self, _image_png: &[u8]) -> Result<String, RecognitionError> {
        panic!("recognizer exploded");
    }
}

fn manager_with(
    recognizer: Arc<dyn Recognizer>,
    policy: OverlapPolicy,
) -> (RecognitionManager, EventReceiver) {
    let (_events, receiver) = event_channel();
    let manager = RecognitionManager::new(
        &Handle::current(),
        recognizer,
        policy,
        receiver.completion_sender(),
    );
    (manager, receiver)
}

#[tokio::test]
async fn manager_reports_each_submission_once() {
    let recognizer = CountingRecognizer::default();
    let (mut manager, mut completions) =
        manager_with(Arc::new(recognizer.clone()), OverlapPolicy::LastResolved);

    let first = manager.submit(vec![1]);
    let second = manager.submit(vec![2]);
    assert_eq!((first, second), (1, 2));
    assert_eq!(manager.in_flight(), 2);

    let mut ids = Vec::new();
    for _ in 0..2 {
        let completion = completions.next_completion().await.unwrap();
        ids.push(completion.id);
        assert_eq!(
            manager.accept(completion),
            Some(RecognitionOutcome::Success("a house".to_string()))
        );
    }
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(manager.in_flight(), 0);
    assert_eq!(*recognizer.calls.lock().unwrap(), 2);
}

#[tokio::test]
async fn manager_turns_errors_into_failures() {
    let recognizer = CountingRecognizer {
        fail: true,
        ..CountingRecognizer::default()
    };
    let (mut manager, mut completions) =
        manager_with(Arc::new(recognizer), OverlapPolicy::LastResolved);

    manager.submit(vec![0]);
    let completion = completions.next_completion().await.unwrap();
    assert!(matches!(
        manager.accept(completion),
        Some(RecognitionOutcome::Failure(reason)) if reason.contains("missing description")
    ));
}

#[tokio::test]
async fn manager_survives_panicking_recognizer() {
    let (mut manager, mut completions) =
        manager_with(Arc::new(PanickingRecognizer), OverlapPolicy::LastResolved);

    manager.submit(vec![0]);
    let completion = completions.next_completion().await.unwrap();
    assert!(matches!(
        completion.outcome,
        RecognitionOutcome::Failure(ref reason) if reason.contains("task failed")
    ));
    manager.accept(completion);
    assert_eq!(manager.in_flight(), 0);
}

#[tokio::test]
async fn latest_request_policy_filters_by_id() {
    let (mut manager, _completions) =
        manager_with(Arc::new(CountingRecognizer::default()), OverlapPolicy::LatestRequest);
    assert_eq!(manager.policy(), OverlapPolicy::LatestRequest);

    let stale = manager.submit(vec![1]);
    let current = manager.submit(vec![2]);
    let outcome = RecognitionOutcome::Success("x".to_string());

    assert_eq!(
        manager.accept(RecognitionCompletion {
            id: current,
            outcome: outcome.clone()
        }),
        Some(outcome.clone())
    );
    assert_eq!(
        manager.accept(RecognitionCompletion {
            id: stale,
            outcome: outcome.clone()
        }),
        None
    );

    let late = manager.submit(vec![3]);
    manager.invalidate();
    assert_eq!(
        manager.accept(RecognitionCompletion { id: late, outcome }),
        None
    );
}

#[tokio::test]
async fn reject_produces_failure_without_request() {
    let recognizer = CountingRecognizer::default();
    let (mut manager, _completions) =
        manager_with(Arc::new(recognizer.clone()), OverlapPolicy::LastResolved);

    let outcome = manager.reject(RecognitionError::Task("no snapshot".to_string()));
    assert!(matches!(outcome, RecognitionOutcome::Failure(_)));
    assert_eq!(manager.in_flight(), 0);
    assert_eq!(*recognizer.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn submit_with_stopped_event_loop_does_not_panic() {
    let mut manager = RecognitionManager::with_closed_channel_for_test(
        &Handle::current(),
        Arc::new(CountingRecognizer::default()),
    );
    manager.submit(vec![9]);
    tokio::task::yield_now().await;
    assert_eq!(manager.in_flight(), 1);
}
