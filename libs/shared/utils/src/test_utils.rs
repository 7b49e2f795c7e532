use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response};
use serde_json::Value;

use shared_config::AppConfig;

pub struct TestConfig {
    pub seed_mock_data: bool,
    pub analytics_default_window_days: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            seed_mock_data: false,
            analytics_default_window_days: 30,
        }
    }
}

impl TestConfig {
    pub fn seeded() -> Self {
        Self {
            seed_mock_data: true,
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            seed_mock_data: self.seed_mock_data,
            analytics_default_window_days: self.analytics_default_window_days,
            clinic_name: "Test Med Spa".to_string(),
            nurse_line_phone: "(555) 000-0000".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
