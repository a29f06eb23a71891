use http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_create_order_formats_amount_and_currency() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "ORDER_TOKEN", 1).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .and(header("authorization", "Bearer ORDER_TOKEN"))
        .and(body_partial_json(json!({
            "intent": "CAPTURE",
            "purchase_units": [{ "amount": { "currency_code": "GBP", "value": "25.50" } }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ORDER_25",
            "status": "CREATED",
            "links": [{ "href": "https://approval.url", "rel": "approve", "method": "GET" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    let response = server
        .post("/payments/orders")
        .json(&json!({ "amount": "25.5", "currency": "gbp" }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "orderID": "ORDER_25" }));

    // no payment source, so no idempotency key either
    let requests = mock_server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/v2/checkout/orders")
        .unwrap();
    assert!(create.headers.get("PayPal-Request-Id").is_none());

    let sent: Value = serde_json::from_slice(&create.body).unwrap();
    assert!(sent.get("payment_source").is_none());
}

#[tokio::test]
async fn test_create_order_accepts_numeric_amount() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "ORDER_TOKEN", 1).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .and(body_partial_json(json!({
            "purchase_units": [{ "amount": { "currency_code": "USD", "value": "10.00" } }]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "ORDER_10", "status": "CREATED" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    let response = server
        .post("/payments/orders")
        .json(&json!({ "amount": 10, "currency": "usd" }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["orderID"], "ORDER_10");
}

#[tokio::test]
async fn test_create_order_reuses_managed_token() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "ORDER_TOKEN", 1).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "ORDER_1", "status": "CREATED" })),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    for _ in 0..2 {
        server
            .post("/payments/orders")
            .json(&json!({ "amount": "5", "currency": "eur" }))
            .await
            .assert_status(StatusCode::OK);
    }
}

#[tokio::test]
async fn test_create_order_rejects_invalid_amounts_before_paypal() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "UNUSED", 0).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    for amount in [json!("0"), json!("-3"), json!("abc"), json!(null)] {
        let response = server
            .post("/payments/orders")
            .json(&json!({ "amount": amount, "currency": "usd" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["statusMessage"], "Bad Request");
        assert_eq!(body["message"], "Invalid or missing amount.");
    }
}

#[tokio::test]
async fn test_create_order_requires_currency() {
    let mock_server = MockServer::start().await;
    let server = common::create_test_server(&mock_server);

    let response = server
        .post("/payments/orders")
        .json(&json!({ "amount": "12.00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Missing currency code.");
    assert_eq!(body["data"]["error_step"], "Validating Input Data");
}

#[tokio::test]
async fn test_create_order_provider_outage_is_internal_error() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "ORDER_TOKEN", 1).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream connect error"))
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    let response = server
        .post("/payments/orders")
        .json(&json!({ "amount": "25.5", "currency": "gbp" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["statusMessage"], "Internal Server Error");
    assert_eq!(
        body["message"],
        "An unexpected error occurred while processing the payment."
    );
    assert!(!body.to_string().contains("upstream connect error"));
}

#[tokio::test]
async fn test_create_order_without_order_id_is_internal_error() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "ORDER_TOKEN", 1).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "CREATED" })))
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    let response = server
        .post("/payments/orders")
        .json(&json!({ "amount": "1", "currency": "usd" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_order_maps_provider_issue() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "ORDER_TOKEN", 1).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "name": "UNPROCESSABLE_ENTITY",
            "debug_id": "abc123",
            "details": [{ "issue": "INSTRUMENT_DECLINED" }]
        })))
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    let response = server
        .post("/payments/orders")
        .json(&json!({ "amount": "1", "currency": "usd" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Your card was declined by the bank.");
    assert_eq!(body["data"]["paypal_debug_id"], "abc123");
}

#[tokio::test]
async fn test_client_config_exposes_only_public_settings() {
    let mock_server = MockServer::start().await;
    let server = common::create_test_server(&mock_server);

    let response = server.get("/payments/config").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "clientId": common::TEST_CLIENT_ID, "environment": "sandbox" })
    );
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;
    let server = common::create_test_server(&mock_server);

    let response = server.get("/api/health").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "API is healthy");
}

#[tokio::test]
async fn test_create_order_revoked_token_is_authentication_error() {
    let mock_server = MockServer::start().await;
    common::mock_token(&mock_server, "REVOKED", 2).await;

    Mock::given(method("POST"))
        .and(path("/v2/checkout/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_token",
            "error_description": "Token signature verification failed"
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let server = common::create_test_server(&mock_server);

    for _ in 0..2 {
        let response = server
            .post("/payments/orders")
            .json(&json!({ "amount": "1", "currency": "usd" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["statusMessage"], "Authentication Error");
        assert!(!body.to_string().contains("invalid_token"));
    }
}
