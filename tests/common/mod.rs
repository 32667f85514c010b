//! An in-process stand-in for the API server.

#![allow(dead_code)]

use http::{HeaderMap, Method, Request, Response, StatusCode};
use hyper::Body;
use serde_json::{json, Value};
use tower_test::mock::{self, Handle};

pub struct ApiServer {
    handle: Handle<Request<Body>, Response<Body>>,
}

/// Create a client which sends its requests to the returned [`ApiServer`].
pub fn mock_client() -> (kube::Client, ApiServer) {
    let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
    (kube::Client::new(service, "default"), ApiServer { handle })
}

impl ApiServer {
    /// Expect the next request, answer it and return the request body.
    pub async fn expect(
        &mut self,
        method: Method,
        path: &str,
        status: StatusCode,
        response: Value,
    ) -> Option<Value> {
        self.expect_request(method, path, status, response).await.1
    }

    /// Same as [`ApiServer::expect`], also returning the request headers.
    pub async fn expect_request(
        &mut self,
        method: Method,
        path: &str,
        status: StatusCode,
        response: Value,
    ) -> (HeaderMap, Option<Value>) {
        let (request, send) = self
            .handle
            .next_request()
            .await
            .expect("client sent no request");

        assert_eq!(request.method(), method);
        assert_eq!(request.uri().path(), path);

        let (parts, body) = request.into_parts();
        let body = hyper::body::to_bytes(body).await.unwrap();

        send.send_response(
            Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&response).unwrap()))
                .unwrap(),
        );

        let body = if body.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&body).unwrap())
        };
        (parts.headers, body)
    }

    /// Assert the client went away without sending anything else.
    pub async fn expect_done(mut self) {
        if let Some((request, _)) = self.handle.next_request().await {
            panic!("unexpected request: {} {}", request.method(), request.uri());
        }
    }
}

pub fn status(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code,
    })
}

pub fn not_found(message: &str) -> (StatusCode, Value) {
    (StatusCode::NOT_FOUND, status(404, "NotFound", message))
}
