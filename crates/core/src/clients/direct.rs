use crate::clients::oauth::{get_access_token, PaypalCredentials};
use crate::clients::orders::{self, OrdersApi};
use crate::services::order_builder::PreparedOrder;
use checkout_primitives::error::ApiError;
use checkout_primitives::models::app_state::paypal_details::PaypalInfo;
use checkout_primitives::models::dtos::providers::paypal::ProviderOrderResult;
use reqwest::{Client, Url};

/// Plain REST access to Orders v2: a fresh client-credentials token for every
/// call, and no timeout beyond whatever the supplied `Client` carries.
#[derive(Clone)]
pub struct DirectOrdersClient {
    http: Client,
    base_url: Url,
    credentials: PaypalCredentials,
}

impl DirectOrdersClient {
    pub fn new(http: Client, info: &PaypalInfo) -> Result<Self, ApiError> {
        let base_url = Url::parse(&info.paypal_api_url)
            .map_err(|_| ApiError::Internal("Invalid PayPal base URL".into()))?;

        Ok(Self {
            http,
            base_url,
            credentials: PaypalCredentials::from(info),
        })
    }

    async fn token(&self) -> Result<String, ApiError> {
        get_access_token(&self.http, &self.credentials, &self.base_url)
            .await
            .map(|t| t.access_token)
    }
}

impl OrdersApi for DirectOrdersClient {
    async fn create_order(&self, order: &PreparedOrder) -> Result<ProviderOrderResult, ApiError> {
        let token = self.token().await?;
        orders::send_create(&self.http, &self.base_url, &token, order).await
    }

    async fn capture_order(&self, order_id: &str) -> Result<ProviderOrderResult, ApiError> {
        let token = self.token().await?;
        orders::send_capture(&self.http, &self.base_url, &token, order_id).await
    }
}
