use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;

use flashgate::config::ServerConfig;
use flashgate::error::{FlashgateError, Result};
use flashgate::providers::Provider;
use flashgate::request::{ModelRequest, RequestBuilder};
use flashgate::server::build_router;

pub const MULTIPART_BOUNDARY: &str = "flashgate-test-boundary";

/// Provider double: replies with fixed text or fails with a provider error
pub struct StubProvider {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<ModelRequest>>,
}

#[allow(dead_code)]
impl StubProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn generate_content(&self, request: &ModelRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .map_err(|reason| FlashgateError::Provider(reason).into())
    }

    fn model(&self) -> String {
        "stub-model".to_string()
    }
}

/// Server config whose static directory does not exist
#[allow(dead_code)]
pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        static_dir: "/nonexistent/flashgate-static".to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn router_with(provider: Arc<dyn Provider>) -> Router {
    build_router(RequestBuilder::new(provider), &test_server_config())
}

#[allow(dead_code)]
pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Multipart body with an optional prompt and an optional `fileUpload` part
#[allow(dead_code)]
pub fn multipart_request(prompt: Option<&str>, file: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    if let Some(prompt) = prompt {
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{p}\r\n",
                b = MULTIPART_BOUNDARY,
                p = prompt
            )
            .as_bytes(),
        );
    }
    if let Some((mime, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"fileUpload\"; filename=\"upload.bin\"\r\nContent-Type: {m}\r\n\r\n",
                b = MULTIPART_BOUNDARY,
                m = mime
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/file-processing")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Split a response into status and parsed JSON body
#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
