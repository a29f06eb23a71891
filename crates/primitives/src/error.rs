use crate::models::dtos::checkout_dto::{ErrorBody, ErrorData};
use crate::models::dtos::providers::paypal::{IssueDetail, PaypalErrorBody};
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use std::fmt;

/// Which provider operation produced an order that did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOperation {
    /// Card-present creation, which PayPal captures in the same call.
    CardCharge,
    Capture,
}

/// PayPal answered with a non-2xx status and a structured error document.
#[derive(Debug, Clone)]
pub struct ProviderFailure {
    pub http_status: u16,
    pub body: PaypalErrorBody,
}

/// PayPal answered 2xx, but the order (or its capture) is not `COMPLETED`.
#[derive(Debug, Clone)]
pub struct IncompleteOrder {
    pub operation: OrderOperation,
    pub order_id: String,
    pub status: String,
    pub capture_status: Option<String>,
    pub debug_id: Option<String>,
    pub provider_message: Option<String>,
    pub details: Vec<IssueDetail>,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    InvalidRequest(validator::ValidationErrors),
    Authentication(String),
    Rejected(ProviderFailure),
    Pending(IncompleteOrder),
    NotCompleted(IncompleteOrder),
    Transport(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::InvalidRequest(e) => write!(f, "Validation error: {}", e),
            ApiError::Authentication(e) => write!(f, "Authentication error: {}", e),
            ApiError::Rejected(e) => write!(
                f,
                "PayPal rejected the request (HTTP {}, {})",
                e.http_status,
                e.body
                    .first_issue()
                    .or(e.body.name.as_deref())
                    .unwrap_or("no issue code")
            ),
            ApiError::Pending(o) => write!(f, "Capture pending for PayPal order {}", o.order_id),
            ApiError::NotCompleted(o) => write!(
                f,
                "PayPal order {} not completed (status {}, capture status {})",
                o.order_id,
                o.status,
                o.capture_status.as_deref().unwrap_or("N/A")
            ),
            ApiError::Transport(e) => write!(f, "Transport error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::InvalidRequest(e) => Some(e),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::InvalidRequest(err)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::Validation(format!("Invalid request body: {}", err.body_text()))
    }
}

/// Processing phase a request was in when it failed. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Initialization,
    ReadingBody,
    ValidatingInput,
    PreparingRequest,
    FetchingAccessToken,
    CallingProvider,
    ProcessingResponse,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Initialization => "Initialization",
            Step::ReadingBody => "Reading Request Body",
            Step::ValidatingInput => "Validating Input Data",
            Step::PreparingRequest => "Preparing PayPal Order Request",
            Step::FetchingAccessToken => "Fetching Access Token",
            Step::CallingProvider => "Calling PayPal API",
            Step::ProcessingResponse => "Processing PayPal Response",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single user-facing error contract every checkout endpoint answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub http_status: StatusCode,
    pub status_message: String,
    pub user_message: String,
    pub debug_id: Option<String>,
    pub issue_code: Option<String>,
    pub step: Step,
    pub order_id: Option<String>,
    pub order_status: Option<String>,
    pub capture_status: Option<String>,
}

impl NormalizedError {
    pub fn new(
        http_status: StatusCode,
        status_message: impl Into<String>,
        user_message: impl Into<String>,
        step: Step,
    ) -> Self {
        Self {
            http_status,
            status_message: status_message.into(),
            user_message: user_message.into(),
            debug_id: None,
            issue_code: None,
            step,
            order_id: None,
            order_status: None,
            capture_status: None,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status_code: self.http_status.as_u16(),
            status_message: self.status_message.clone(),
            message: self.user_message.clone(),
            data: ErrorData {
                error_step: self.step.as_str().to_string(),
                paypal_debug_id: self.debug_id.clone(),
                paypal_issue: self.issue_code.clone(),
                paypal_order_id: self.order_id.clone(),
                paypal_status: self.order_status.clone(),
                paypal_capture_status: self.capture_status.clone(),
            },
        }
    }
}

impl IntoResponse for NormalizedError {
    fn into_response(self) -> Response {
        (self.http_status, Json(self.body())).into_response()
    }
}
