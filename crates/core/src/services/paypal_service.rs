use crate::clients::OrdersApi;
use crate::services::order_builder::PreparedOrder;
use checkout_primitives::error::ApiError;
use checkout_primitives::models::dtos::providers::paypal::ProviderOrderResult;
use tracing::{info, warn};

#[derive(Clone)]
pub struct PayPalService;

impl PayPalService {
    pub async fn create_order<G: OrdersApi>(
        gateway: &G,
        order: &PreparedOrder,
    ) -> Result<ProviderOrderResult, ApiError> {
        let card_present = order.body.payment_source.is_some();
        info!(
            card_present,
            paypal_request_id = ?order.request_id,
            "Creating PayPal order"
        );

        let result = gateway.create_order(order).await.inspect_err(|e| {
            warn!(card_present, error = %e, "PayPal order creation failed");
        })?;

        info!(
            paypal_order_id = %result.order_id,
            paypal_status = %result.status,
            http_status = result.http_status,
            "PayPal order created"
        );

        Ok(result)
    }

    pub async fn capture_order<G: OrdersApi>(
        gateway: &G,
        order_id: &str,
    ) -> Result<ProviderOrderResult, ApiError> {
        info!(paypal_order_id = %order_id, "Capturing PayPal order");

        let result = gateway.capture_order(order_id).await.inspect_err(|e| {
            warn!(paypal_order_id = %order_id, error = %e, "PayPal capture failed");
        })?;

        info!(
            paypal_order_id = %result.order_id,
            paypal_status = %result.status,
            paypal_capture_id = ?result.capture_id,
            paypal_capture_status = ?result.capture_status,
            http_status = result.http_status,
            "PayPal capture returned"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::order_builder::{build_create_request, OrderFlow};
    use checkout_primitives::error::ProviderFailure;
    use checkout_primitives::models::dtos::providers::paypal::PaypalErrorBody;
    use serde_json::json;

    /// In-memory gateway returning canned outcomes.
    struct StubGateway {
        create: fn() -> Result<ProviderOrderResult, ApiError>,
        capture: fn(&str) -> Result<ProviderOrderResult, ApiError>,
    }

    impl OrdersApi for StubGateway {
        async fn create_order(
            &self,
            _order: &PreparedOrder,
        ) -> Result<ProviderOrderResult, ApiError> {
            (self.create)()
        }

        async fn capture_order(&self, order_id: &str) -> Result<ProviderOrderResult, ApiError> {
            (self.capture)(order_id)
        }
    }

    fn created() -> Result<ProviderOrderResult, ApiError> {
        ProviderOrderResult::from_body(201, json!({ "id": "O-1", "status": "CREATED" }))
            .ok_or_else(|| ApiError::Internal("fixture".into()))
    }

    fn captured(order_id: &str) -> Result<ProviderOrderResult, ApiError> {
        ProviderOrderResult::from_body(201, json!({ "id": order_id, "status": "COMPLETED" }))
            .ok_or_else(|| ApiError::Internal("fixture".into()))
    }

    fn declined(_: &str) -> Result<ProviderOrderResult, ApiError> {
        Err(ApiError::Rejected(ProviderFailure {
            http_status: 422,
            body: PaypalErrorBody::default(),
        }))
    }

    #[tokio::test]
    async fn passes_gateway_results_through() {
        let gateway = StubGateway {
            create: created,
            capture: captured,
        };
        let order = build_create_request(OrderFlow::AmountOnly {
            amount: Some("1"),
            currency: Some("usd"),
        })
        .unwrap();

        let result = PayPalService::create_order(&gateway, &order).await.unwrap();
        assert_eq!(result.order_id, "O-1");

        let result = PayPalService::capture_order(&gateway, "O-9").await.unwrap();
        assert_eq!(result.order_id, "O-9");
    }

    #[tokio::test]
    async fn propagates_gateway_errors_unchanged() {
        let gateway = StubGateway {
            create: created,
            capture: declined,
        };

        let err = PayPalService::capture_order(&gateway, "O-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(f) if f.http_status == 422));
    }
}
