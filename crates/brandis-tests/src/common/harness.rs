// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! Drives the API router in-process. Each request is a `oneshot` against a
//! fresh clone of the router, so tests never bind a socket.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use brandis_api::{ApiServer, AppState};
use brandis_config::BrandisConfig;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

// =============================================================================
// TestApp
// =============================================================================

/// The API under test.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    cookie_name: String,
}

impl TestApp {
    /// Builds the app with default configuration.
    pub fn new() -> Self {
        Self::with_config(&BrandisConfig::default())
    }

    /// Builds the app from a configuration.
    pub fn with_config(config: &BrandisConfig) -> Self {
        super::init_test_logging();
        let state = AppState::from_config(config);
        Self {
            router: ApiServer::new(state).router(),
            cookie_name: config.cookie.name.clone(),
        }
    }

    /// Sends a GET, optionally carrying a session cookie.
    pub async fn get(&self, path: &str, credential: Option<&str>) -> TestResponse {
        self.send(Method::GET, path, credential, None).await
    }

    /// Sends a POST with a JSON body.
    pub async fn post_json(&self, path: &str, credential: Option<&str>, body: &Value) -> TestResponse {
        self.send(Method::POST, path, credential, Some(body.to_string()))
            .await
    }

    /// Sends a POST without a body.
    pub async fn post(&self, path: &str, credential: Option<&str>) -> TestResponse {
        self.send(Method::POST, path, credential, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        credential: Option<&str>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(value) = credential {
            builder = builder.header(header::COOKIE, format!("{}={}", self.cookie_name, value));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json)),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
            cookie_name: self.cookie_name.clone(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TestResponse
// =============================================================================

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
    cookie_name: String,
}

impl TestResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("body is not JSON")
    }

    /// Returns the `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Returns the raw `Set-Cookie` header for the session cookie.
    pub fn session_set_cookie(&self) -> Option<&str> {
        let prefix = format!("{}=", self.cookie_name);
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
    }

    /// Returns the value the response sets the session cookie to.
    pub fn session_cookie_value(&self) -> Option<String> {
        let prefix = format!("{}=", self.cookie_name);
        self.session_set_cookie()
            .and_then(|v| v.split(';').next())
            .and_then(|pair| pair.strip_prefix(&prefix))
            .map(str::to_string)
    }
}
