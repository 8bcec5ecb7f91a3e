//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock SIGOF portal injected, so the whole API can be exercised
//! without the real portal.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use repartos_core::{
    config::{CatalogConfig, OrdersConfig, PortalConfig, ServerConfig},
    testing::MockPortal,
    Config, Portal, UnitId,
};

/// Re-export fixtures for test convenience
pub use repartos_core::testing::fixtures;

pub const USERNAME: &str = "ana";
pub const PASSWORD: &str = "clave";
pub const UNIT: UnitId = UnitId(7);

/// Test fixture for E2E testing with a mock portal.
///
/// The mock accepts `ana`/`clave` and reports unit 7. Reports and the
/// catalog are configured per test through `portal`.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_gallery() {
///     let fixture = TestFixture::new().await;
///     fixture.portal.set_report("101", fixtures::report_bytes(&rows)).await;
///     let token = fixture.login().await;
///
///     let response = fixture.get_auth("/api/v1/cycles/101/photos", &token).await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock portal - configure accounts, reports and catalog
    pub portal: MockPortal,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Body parsed as JSON, `Null` when it is not JSON
    pub body: Value,
    pub bytes: Bytes,
}

impl TestFixture {
    /// Create a new test fixture with the default account.
    pub async fn new() -> Self {
        let portal = MockPortal::new();
        portal.add_account(USERNAME, PASSWORD, UNIT).await;

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
                ..ServerConfig::default()
            },
            portal: PortalConfig::default(),
            catalog: CatalogConfig::new("http://catalog.test/export.xlsx"),
            orders: OrdersConfig::default(),
        };

        let state = Arc::new(repartos_server::state::AppState::new(
            config,
            Arc::new(portal.clone()) as Arc<dyn Portal>,
        ));
        let router = repartos_server::api::create_router(state);

        Self { router, portal }
    }

    /// Log in with the default account and return the bearer token.
    pub async fn login(&self) -> String {
        let response = self
            .post(
                "/api/v1/session",
                serde_json::json!({ "username": USERNAME, "password": PASSWORD }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "login failed");
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, None, Some(body)).await
    }

    /// Send an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> TestResponse {
        self.request("GET", path, Some(token), None).await
    }

    /// Send an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(token), Some(body)).await
    }

    /// Send an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, token: &str) -> TestResponse {
        self.request("DELETE", path, Some(token), None).await
    }

    /// Send a request to the test server.
    async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            request_builder =
                request_builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
