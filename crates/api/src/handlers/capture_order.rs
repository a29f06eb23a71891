use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use checkout_core::services::normalizer::{classify_capture, ResultExt};
use checkout_core::services::paypal_service::PayPalService;
use checkout_core::AppState;
use checkout_primitives::error::{ApiError, NormalizedError, Step};
use checkout_primitives::models::dtos::checkout_dto::{
    CaptureOrderRequest, CaptureOrderResponse, ErrorBody, MISSING_ORDER_ID,
};
use std::sync::Arc;
use validator::Validate;

/// Captures through the direct REST path, with a fresh OAuth token per call.
#[utoipa::path(
    post,
    path = "/payments/orders/capture",
    request_body = CaptureOrderRequest,
    responses(
        (status = 200, description = "Payment captured", body = CaptureOrderResponse),
        (status = 400, description = "Missing orderID, capture declined or pending", body = ErrorBody),
        (status = 500, description = "Authentication or transport failure", body = ErrorBody)
    ),
    tag = "Payments"
)]
pub async fn capture_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CaptureOrderRequest>, JsonRejection>,
) -> Result<Json<CaptureOrderResponse>, NormalizedError> {
    let Json(req) = payload.map_err(ApiError::from).at_step(Step::ReadingBody)?;

    req.validate()
        .map_err(ApiError::from)
        .at_step(Step::ValidatingInput)?;

    let order_id = req
        .order_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation(MISSING_ORDER_ID.into()))
        .at_step(Step::ValidatingInput)?;

    let result = PayPalService::capture_order(&state.direct, order_id)
        .await
        .at_step(Step::CallingProvider)?;

    let result = classify_capture(result).at_step(Step::ProcessingResponse)?;

    Ok(Json(CaptureOrderResponse::from(result)))
}
