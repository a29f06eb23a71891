use axum::extract::{Json, State};
use checkout_core::AppState;
use checkout_primitives::models::dtos::health_dto::ClientConfigResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/payments/config",
    summary = "Public PayPal settings for the storefront",
    description = "Client id and environment the browser needs to load the PayPal JS SDK. \
                   The client secret is never included.",
    responses(
        (status = 200, body = ClientConfigResponse)
    ),
    tag = "Payments"
)]
pub async fn client_config(State(state): State<Arc<AppState>>) -> Json<ClientConfigResponse> {
    let paypal = &state.config.paypal_details;

    Json(ClientConfigResponse {
        client_id: paypal.paypal_client_id.clone(),
        environment: paypal.paypal_environment,
    })
}
