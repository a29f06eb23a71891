use crate::clients::oauth::endpoint;
use crate::services::order_builder::PreparedOrder;
use checkout_primitives::error::{ApiError, ProviderFailure};
use checkout_primitives::models::dtos::providers::paypal::{PaypalErrorBody, ProviderOrderResult};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;
use std::future::Future;
use tracing::{error, warn};
use uuid::Uuid;

pub const PAYPAL_REQUEST_ID: &str = "PayPal-Request-Id";
const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Create/capture against PayPal Orders v2.
///
/// Implemented by the managed [`PaypalClient`](crate::clients::PaypalClient)
/// and by [`DirectOrdersClient`](crate::clients::DirectOrdersClient); both
/// resolve into the same [`ProviderOrderResult`].
pub trait OrdersApi {
    fn create_order(
        &self,
        order: &PreparedOrder,
    ) -> impl Future<Output = Result<ProviderOrderResult, ApiError>> + Send;

    fn capture_order(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<ProviderOrderResult, ApiError>> + Send;
}

pub(crate) async fn send_create(
    http: &Client,
    base_url: &Url,
    token: &str,
    order: &PreparedOrder,
) -> Result<ProviderOrderResult, ApiError> {
    let url = endpoint(base_url, &["v2", "checkout", "orders"])?;

    let mut request = http
        .post(url)
        .bearer_auth(token)
        .header(PREFER, RETURN_REPRESENTATION)
        .json(&order.body);

    if let Some(request_id) = &order.request_id {
        request = request.header(PAYPAL_REQUEST_ID, request_id);
    }

    execute(request).await
}

pub(crate) async fn send_capture(
    http: &Client,
    base_url: &Url,
    token: &str,
    order_id: &str,
) -> Result<ProviderOrderResult, ApiError> {
    let url = endpoint(base_url, &["v2", "checkout", "orders", order_id, "capture"])?;

    let request = http
        .post(url)
        .bearer_auth(token)
        .header(PREFER, RETURN_REPRESENTATION)
        .header(PAYPAL_REQUEST_ID, Uuid::new_v4().to_string())
        .json(&serde_json::json!({}));

    execute(request).await
}

async fn execute(request: RequestBuilder) -> Result<ProviderOrderResult, ApiError> {
    let resp = request
        .send()
        .await
        .inspect_err(|e| error!(error = %e, "Failed to reach PayPal"))?;

    read_order_response(resp).await
}

async fn read_order_response(resp: Response) -> Result<ProviderOrderResult, ApiError> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;

    parse_order_response(status, &text)
}

/// Any status outside `[200, 300)` or a body without an order id is a failure,
/// even though the transport itself succeeded.
pub fn parse_order_response(http_status: u16, text: &str) -> Result<ProviderOrderResult, ApiError> {
    let body = serde_json::from_str::<Value>(text).ok();

    // OAuth-style bodies (`{"error":"invalid_token"}`) never parse as an order error document
    if matches!(http_status, 401 | 403) {
        let debug_id = body
            .as_ref()
            .and_then(PaypalErrorBody::from_value)
            .and_then(|b| b.debug_id);
        warn!(http_status, paypal_debug_id = ?debug_id, "PayPal rejected the access token");
        return Err(ApiError::Authentication(format!(
            "PayPal order call returned HTTP {}",
            http_status
        )));
    }

    if !(200..300).contains(&http_status) {
        return match body.as_ref().and_then(PaypalErrorBody::from_value) {
            Some(body) => {
                warn!(
                    http_status,
                    paypal_debug_id = ?body.debug_id,
                    paypal_issue = ?body.first_issue(),
                    "PayPal rejected order request"
                );
                Err(ApiError::Rejected(ProviderFailure { http_status, body }))
            }
            None => {
                error!(http_status, "PayPal error response is not a JSON error document");
                Err(ApiError::Transport(format!(
                    "PayPal returned HTTP {} without a JSON error body",
                    http_status
                )))
            }
        };
    }

    let body = body.ok_or_else(|| {
        error!(http_status, "PayPal success response is not JSON");
        ApiError::Transport("PayPal returned a non-JSON response".into())
    })?;

    ProviderOrderResult::from_body(http_status, body).ok_or_else(|| {
        error!(http_status, "PayPal response is missing the order id");
        ApiError::Transport("PayPal response is missing the order id".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_order_id_is_a_result() {
        let result =
            parse_order_response(201, r#"{"id":"5O190127TN364715T","status":"CREATED"}"#).unwrap();
        assert_eq!(result.order_id, "5O190127TN364715T");
        assert_eq!(result.status, "CREATED");
        assert_eq!(result.http_status, 201);
    }

    #[test]
    fn success_without_order_id_is_transport_error() {
        let err = parse_order_response(200, r#"{"status":"CREATED"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));

        let err = parse_order_response(200, "<html>ok</html>").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn structured_error_is_rejection() {
        let err = parse_order_response(
            422,
            r#"{"name":"UNPROCESSABLE_ENTITY","debug_id":"d-1","details":[{"issue":"INSTRUMENT_DECLINED","description":"declined"}]}"#,
        )
        .unwrap_err();

        match err {
            ApiError::Rejected(failure) => {
                assert_eq!(failure.http_status, 422);
                assert_eq!(failure.body.first_issue(), Some("INSTRUMENT_DECLINED"));
                assert_eq!(failure.body.debug_id.as_deref(), Some("d-1"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn rejected_token_is_authentication_error() {
        let err = parse_order_response(
            401,
            r#"{"error":"invalid_token","error_description":"Token signature verification failed"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Authentication(msg) if msg.contains("401")));

        let err = parse_order_response(
            403,
            r#"{"name":"NOT_AUTHORIZED","debug_id":"d-2","details":[]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Authentication(_)));
    }

    #[test]
    fn unstructured_error_is_transport_error() {
        let err = parse_order_response(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));

        let err = parse_order_response(400, r#"{"unexpected":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let err = send_capture(&Client::new(), &base, "TOKEN", "ORDER-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
