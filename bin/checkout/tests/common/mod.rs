#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use checkout_core::clients::PaypalClient;
use checkout_core::AppState;
use checkout_primitives::models::app_state::app_config::AppConfig;
use checkout_primitives::models::app_state::paypal_details::{PaypalEnvironment, PaypalInfo};
use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub mod fixtures;

pub const TEST_CLIENT_ID: &str = "test_paypal_client_id";

/// PayPal settings pointing at a mock server instead of the real API.
pub fn test_paypal_info(api_url: &str) -> PaypalInfo {
    PaypalInfo {
        paypal_client_id: TEST_CLIENT_ID.to_string(),
        paypal_secret: SecretString::from("test_paypal_secret".to_string()),
        paypal_environment: PaypalEnvironment::Sandbox,
        paypal_api_url: api_url.to_string(),
    }
}

pub fn test_config(api_url: &str) -> AppConfig {
    AppConfig {
        app_env: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: "http://localhost:3000".to_string(),
        paypal_details: test_paypal_info(api_url),
    }
}

/// Test state with its own managed client, so each test's mock server stays isolated
/// from the process-wide handle.
pub fn create_test_app_state(api_url: &str) -> Arc<AppState> {
    checkout::utility::logging::setup_logging();

    let config = test_config(api_url);
    let paypal = PaypalClient::new(&config.paypal_details).expect("test PayPal client");
    AppState::with_client(config, paypal).expect("test app state")
}

pub fn create_test_app(state: Arc<AppState>) -> Router {
    checkout_api::app::create_router(state)
}

pub fn create_test_server(mock_server: &MockServer) -> TestServer {
    let state = create_test_app_state(&mock_server.uri());
    TestServer::new(create_test_app(state)).expect("test server")
}

/// Token endpoint answering with `token`, asserting it is hit `times` times.
pub async fn mock_token(mock_server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 32400
        })))
        .expect(times)
        .mount(mock_server)
        .await;
}
