//! Mock inference server for client integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{self, header};
use axum::response::Response;
use bytes::Bytes;
use futures_util::StreamExt;
use ochat_client::ClientConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An axum router served on an ephemeral loopback port.
pub struct MockServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}/api"),
            handle,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new().with_base_url(&self.base_url)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a loopback port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}

/// Chunked NDJSON response that writes each piece as a separate chunk.
pub fn ndjson_response(chunks: Vec<&'static str>) -> Response {
    let stream = futures_util::stream::iter(chunks).then(|chunk| async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok::<_, Infallible>(Bytes::from_static(chunk.as_bytes()))
    });
    ndjson_stream_response(Body::from_stream(stream))
}

/// NDJSON response that sends `chunks` and then never finishes.
pub fn stalled_ndjson_response(chunks: Vec<&'static str>) -> Response {
    let stream = futures_util::stream::iter(chunks)
        .map(|chunk| Ok::<_, Infallible>(Bytes::from_static(chunk.as_bytes())))
        .chain(futures_util::stream::pending());
    ndjson_stream_response(Body::from_stream(stream))
}

fn ndjson_stream_response(body: Body) -> Response {
    http::Response::builder()
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .body(body)
        .unwrap()
}
