//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::watch;
use tower::ServiceExt;

use publisher_api::{AppState, build_app};
use publisher_backend::MemoryBackend;
use publisher_core::config::{AppConfig, BackendConfig};
use publisher_service::PublishService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backend, for inspecting published content directly
    pub backend: MemoryBackend,
    /// Keeps in-flight waits alive
    _shutdown: watch::Sender<bool>,
}

/// Test response with status and parsed JSON body
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `success` flag of the envelope
    pub fn success(&self) -> bool {
        self.body["success"].as_bool().expect("envelope has success")
    }

    /// Envelope log lines
    pub fn log(&self) -> Vec<String> {
        self.body["log"]
            .as_array()
            .expect("envelope has log")
            .iter()
            .map(|line| line.as_str().expect("log line is a string").to_string())
            .collect()
    }

    /// Handle of the submitted job
    pub fn handle(&self) -> String {
        self.body["handle"]
            .as_str()
            .expect("response has handle")
            .to_string()
    }
}

/// Configuration with a fast simulated backend
pub fn test_config() -> AppConfig {
    AppConfig {
        backend: BackendConfig {
            instance: "publisher-test".to_string(),
            source_store: "master".to_string(),
            targets: vec!["web".to_string(), "experienceedge".to_string()],
            languages: vec!["en".to_string(), "fr".to_string()],
            items: vec![
                "/content".to_string(),
                "/content/home".to_string(),
                "/content/home/news".to_string(),
            ],
            step_delay_ms: 10,
            ..BackendConfig::default()
        },
        ..AppConfig::default()
    }
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application from `config`
    pub fn with_config(config: AppConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let backend = MemoryBackend::new(&config.backend);
        let publish_service = Arc::new(PublishService::new(Arc::new(backend.clone()), shutdown_rx));
        let state = AppState::new(Arc::new(config), publish_service);

        Self {
            router: build_app(state),
            backend,
            _shutdown: shutdown_tx,
        }
    }

    /// Make a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Query the status of `handle`
    pub async fn result(&self, handle: &str) -> TestResponse {
        self.get(&format!(
            "/api/publish/result?handleString={}",
            handle.replace(';', "%3B")
        ))
        .await
    }

    /// Poll the status endpoint until `handle` reports `Finished`
    pub async fn wait_finished(&self, handle: &str) -> TestResponse {
        for _ in 0..200 {
            let response = self.result(handle).await;
            if response.body["state"] == "Finished" {
                return response;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("job {handle} did not finish");
    }
}
