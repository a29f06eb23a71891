use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use checkout_core::services::normalizer::{classify_card_charge, ResultExt};
use checkout_core::services::order_builder::{build_create_request, OrderFlow};
use checkout_core::services::paypal_service::PayPalService;
use checkout_core::AppState;
use checkout_primitives::error::{ApiError, NormalizedError, Step};
use checkout_primitives::models::dtos::checkout_dto::{
    CardChargeRequest, CardChargeResponse, ErrorBody,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/payments/card-charge",
    request_body = CardChargeRequest,
    responses(
        (status = 200, description = "Card charged and captured", body = CardChargeResponse),
        (status = 400, description = "Invalid input, card declined or payment not completed", body = ErrorBody),
        (status = 500, description = "PayPal unreachable or misconfigured", body = ErrorBody)
    ),
    tag = "Payments"
)]
pub async fn card_charge(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CardChargeRequest>, JsonRejection>,
) -> Result<Json<CardChargeResponse>, NormalizedError> {
    let Json(req) = payload.map_err(ApiError::from).at_step(Step::ReadingBody)?;

    req.validate()
        .map_err(ApiError::from)
        .at_step(Step::ValidatingInput)?;

    let order = build_create_request(OrderFlow::from(&req)).at_step(Step::PreparingRequest)?;

    info!(
        card_last_four = ?req.card_details.as_ref().and_then(|c| c.last_four()),
        "Processing card charge"
    );

    let result = PayPalService::create_order(&state.paypal, &order)
        .await
        .at_step(Step::CallingProvider)?;

    let result = classify_card_charge(result).at_step(Step::ProcessingResponse)?;

    Ok(Json(CardChargeResponse::from(result)))
}
