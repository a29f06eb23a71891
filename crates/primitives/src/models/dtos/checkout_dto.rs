use crate::models::dtos::providers::paypal::ProviderOrderResult;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

pub const MISSING_CART_PARTS: &str = "Missing cart, customer, or cardDetails in request body.";
pub const MISSING_CARD_DETAILS: &str = "Missing required card details (number, expiry, CVV).";
pub const MISSING_CUSTOMER_DETAILS: &str = "Missing required customer billing details.";
pub const INVALID_COUNTRY_CODE: &str =
    "Invalid or missing billing country code (must be 2-letter ISO).";
pub const INVALID_CART_AMOUNT: &str = "Invalid or missing cart totalAmount.";
pub const MISSING_CART_CURRENCY: &str = "Missing cart currencyCode.";
pub const INVALID_AMOUNT: &str = "Invalid or missing amount.";
pub const MISSING_CURRENCY: &str = "Missing currency code.";
pub const MISSING_ORDER_ID: &str = "Missing orderID.";

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[validate(
        required(message = "Invalid or missing cart totalAmount."),
        length(min = 1, message = "Invalid or missing cart totalAmount.")
    )]
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(example = "25.50")]
    pub total_amount: Option<String>,

    #[validate(
        required(message = "Missing cart currencyCode."),
        length(min = 1, message = "Missing cart currencyCode.")
    )]
    #[serde(default)]
    #[schema(example = "GBP")]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[validate(
        required(message = "Missing required customer billing details."),
        length(min = 1, message = "Missing required customer billing details.")
    )]
    #[serde(default)]
    pub first_name: Option<String>,

    #[validate(
        required(message = "Missing required customer billing details."),
        length(min = 1, message = "Missing required customer billing details.")
    )]
    #[serde(default)]
    pub last_name: Option<String>,

    #[validate(
        required(message = "Missing required customer billing details."),
        length(min = 1, message = "Missing required customer billing details.")
    )]
    #[serde(default)]
    pub email: Option<String>,

    #[validate(
        required(message = "Missing required customer billing details."),
        length(min = 1, message = "Missing required customer billing details.")
    )]
    #[serde(default)]
    pub address1: Option<String>,

    #[validate(
        required(message = "Missing required customer billing details."),
        length(min = 1, message = "Missing required customer billing details.")
    )]
    #[serde(default)]
    pub city: Option<String>,

    #[validate(
        required(message = "Missing required customer billing details."),
        length(min = 1, message = "Missing required customer billing details.")
    )]
    #[serde(default)]
    pub postcode: Option<String>,

    #[validate(
        required(message = "Invalid or missing billing country code (must be 2-letter ISO)."),
        length(
            equal = 2,
            message = "Invalid or missing billing country code (must be 2-letter ISO)."
        )
    )]
    #[serde(default)]
    #[schema(example = "GB")]
    pub country_code: Option<String>,
}

/// Raw card input. Never serialized, and `Debug` only shows the last four digits.
#[derive(Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[validate(
        required(message = "Missing required card details (number, expiry, CVV)."),
        length(min = 1, message = "Missing required card details (number, expiry, CVV).")
    )]
    #[serde(default)]
    pub card_number: Option<String>,

    #[validate(
        required(message = "Missing required card details (number, expiry, CVV)."),
        length(min = 1, message = "Missing required card details (number, expiry, CVV).")
    )]
    #[serde(default)]
    #[schema(example = "04/28")]
    pub expiry: Option<String>,

    #[validate(
        required(message = "Missing required card details (number, expiry, CVV)."),
        length(min = 1, message = "Missing required card details (number, expiry, CVV).")
    )]
    #[serde(default)]
    pub cvv: Option<String>,
}

impl CardDetails {
    pub fn last_four(&self) -> Option<String> {
        let digits: Vec<char> = self
            .card_number
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        (digits.len() >= 4).then(|| digits[digits.len() - 4..].iter().collect())
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("last_four", &self.last_four())
            .field("expiry", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardChargeRequest {
    #[validate(
        required(message = "Missing cart, customer, or cardDetails in request body."),
        nested
    )]
    #[serde(default)]
    pub cart: Option<CartSnapshot>,

    #[validate(
        required(message = "Missing cart, customer, or cardDetails in request body."),
        nested
    )]
    #[serde(default)]
    pub customer: Option<CustomerInfo>,

    #[validate(
        required(message = "Missing cart, customer, or cardDetails in request body."),
        nested
    )]
    #[serde(default)]
    pub card_details: Option<CardDetails>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    #[validate(
        required(message = "Invalid or missing amount."),
        length(min = 1, message = "Invalid or missing amount.")
    )]
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(example = "25.5")]
    pub amount: Option<String>,

    #[validate(
        required(message = "Missing currency code."),
        length(min = 1, message = "Missing currency code.")
    )]
    #[serde(default)]
    #[schema(example = "gbp")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CaptureOrderRequest {
    #[validate(
        required(message = "Missing orderID."),
        length(min = 1, message = "Missing orderID.")
    )]
    #[serde(default, rename = "orderID")]
    pub order_id: Option<String>,
}

/// Accepts `"25.50"` as well as a bare JSON number, always yielding the decimal text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a decimal string, got {}",
            other
        ))),
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardChargeData {
    pub paypal_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paypal_capture_id: Option<String>,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CardChargeResponse {
    pub success: bool,
    pub message: String,
    pub data: CardChargeData,
}

impl From<ProviderOrderResult> for CardChargeResponse {
    fn from(result: ProviderOrderResult) -> Self {
        Self {
            success: true,
            message: "Payment successful!".to_string(),
            data: CardChargeData {
                paypal_order_id: result.order_id,
                paypal_capture_id: result.capture_id,
                status: result.status,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    #[serde(rename = "orderID")]
    pub order_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaptureData {
    pub paypal_order_id: String,
    pub paypal_capture_id: Option<String>,
    pub status: String,
    #[schema(value_type = Option<Object>)]
    pub payer: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CaptureOrderResponse {
    pub success: bool,
    pub message: String,
    pub data: CaptureData,
}

impl From<ProviderOrderResult> for CaptureOrderResponse {
    fn from(result: ProviderOrderResult) -> Self {
        Self {
            success: true,
            message: "Payment captured successfully!".to_string(),
            data: CaptureData {
                paypal_order_id: result.order_id,
                paypal_capture_id: result.capture_id,
                status: result.status,
                payer: result.payer,
            },
        }
    }
}

/// Error envelope shared by every checkout endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub status_message: String,
    pub message: String,
    pub data: ErrorData,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ErrorData {
    pub error_step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_debug_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_capture_status: Option<String>,
}
