use crate::handlers::{
    capture_order::__path_capture_order, card_charge::__path_card_charge,
    client_config::__path_client_config, create_order::__path_create_order,
    health::__path_health_check,
};
use checkout_primitives::models::app_state::paypal_details::PaypalEnvironment;
use checkout_primitives::models::dtos::checkout_dto::{
    CaptureData, CaptureOrderRequest, CaptureOrderResponse, CardChargeData, CardChargeRequest,
    CardChargeResponse, CardDetails, CartSnapshot, CreateOrderRequest, CreateOrderResponse,
    CustomerInfo, ErrorBody, ErrorData,
};
use checkout_primitives::models::dtos::health_dto::{ClientConfigResponse, HealthStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(card_charge, create_order, capture_order, client_config, health_check),
    components(schemas(
        CardChargeRequest, CartSnapshot, CustomerInfo, CardDetails, CardChargeResponse,
        CardChargeData, CreateOrderRequest, CreateOrderResponse, CaptureOrderRequest,
        CaptureOrderResponse, CaptureData, ErrorBody, ErrorData, ClientConfigResponse,
        PaypalEnvironment, HealthStatus
    )),
    tags(
        (name = "Payments", description = "PayPal order creation, card charges and captures"),
        (name = "Health", description = "Service liveness")
    )
)]
pub struct ApiDoc;
