//! Fake backend for exercising the client over real HTTP.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{MethodRouter, post};
use poliza_backend::{BackendClient, BackendConfig};
use serde_json::Value;

/// Everything a recording route received, in order.
#[derive(Clone, Default)]
pub struct Calls {
    bodies: Arc<Mutex<Vec<Value>>>,
    auth: Arc<Mutex<Vec<Option<String>>>>,
}

impl Calls {
    pub fn count(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }

    pub fn body(&self, n: usize) -> Value {
        self.bodies.lock().unwrap()[n].clone()
    }

    pub fn authorization(&self, n: usize) -> Option<String> {
        self.auth.lock().unwrap()[n].clone()
    }
}

/// A JSON route that records each request and answers with a fixed reply.
pub fn recording(status: StatusCode, reply: Value) -> (MethodRouter, Calls) {
    let calls = Calls::default();
    let recorder = calls.clone();
    let route = post(move |headers: HeaderMap, Json(body): Json<Value>| {
        let recorder = recorder.clone();
        let reply = reply.clone();
        async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            recorder.bodies.lock().unwrap().push(body);
            recorder.auth.lock().unwrap().push(auth);
            (status, Json(reply))
        }
    });
    (route, calls)
}

/// Serve `router` on an ephemeral port and return a client pointed at it.
pub async fn serve(router: Router) -> BackendClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    client_for(&format!("http://{addr}/api"))
}

pub fn client_for(base_url: &str) -> BackendClient {
    BackendClient::new(&BackendConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}
