use crate::models::app_state::paypal_details::PaypalEnvironment;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

/// Public PayPal settings handed to the storefront for client-side SDK setup.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfigResponse {
    pub client_id: String,
    pub environment: PaypalEnvironment,
}
