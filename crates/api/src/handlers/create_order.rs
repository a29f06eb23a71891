use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use checkout_core::services::normalizer::ResultExt;
use checkout_core::services::order_builder::{build_create_request, OrderFlow};
use checkout_core::services::paypal_service::PayPalService;
use checkout_core::AppState;
use checkout_primitives::error::{ApiError, NormalizedError, Step};
use checkout_primitives::models::dtos::checkout_dto::{
    CreateOrderRequest, CreateOrderResponse, ErrorBody,
};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/payments/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "PayPal order created, ready for buyer approval", body = CreateOrderResponse),
        (status = 400, description = "Invalid amount or currency, or PayPal rejected the order", body = ErrorBody),
        (status = 500, description = "PayPal unreachable or misconfigured", body = ErrorBody)
    ),
    tag = "Payments"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, NormalizedError> {
    let Json(req) = payload.map_err(ApiError::from).at_step(Step::ReadingBody)?;

    req.validate()
        .map_err(ApiError::from)
        .at_step(Step::ValidatingInput)?;

    let order = build_create_request(OrderFlow::from(&req)).at_step(Step::PreparingRequest)?;

    let result = PayPalService::create_order(&state.paypal, &order)
        .await
        .at_step(Step::CallingProvider)?;

    Ok(Json(CreateOrderResponse {
        order_id: result.order_id,
    }))
}
