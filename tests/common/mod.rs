//! Shared helpers for skinchart integration tests
//!
//! Builds services over an in-memory store with a mock advice client,
//! and drives the HTTP router without binding a socket.

#![allow(dead_code)]

pub mod conversations;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use skinchart::{ChartService, MemoryStore, MockAdviceClient};
use tower::ServiceExt;

pub use conversations::{Conversation, CONVERSATIONS};

/// A service plus handles on its store and advice client.
pub struct TestApp {
    pub service: ChartService,
    pub store: Arc<MemoryStore>,
    pub advice: Arc<MockAdviceClient>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_advice(MockAdviceClient::replying("Cleanse gently and wear SPF 30."))
    }

    pub fn with_advice(advice: MockAdviceClient) -> Self {
        let store = Arc::new(MemoryStore::new());
        let advice = Arc::new(advice);
        let service = ChartService::new(store.clone(), advice.clone());
        Self {
            service,
            store,
            advice,
        }
    }

    pub fn router(&self) -> Router {
        skinchart::server::router(self.service.clone(), None)
    }

    /// Send one request through a fresh router and decode the JSON reply.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("request builds");

        let response = self.router().oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is JSON")
        };
        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Open a fresh session over HTTP and return the issued id.
    pub async fn new_user(&self) -> String {
        let (status, json) = self.post("/api/session", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::OK);
        json["userId"].as_str().expect("userId in session").to_string()
    }
}
