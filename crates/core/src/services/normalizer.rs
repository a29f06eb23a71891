//! One place where provider outcomes and local failures become the user-facing
//! error contract. Handlers never inspect PayPal error bodies themselves.

use checkout_primitives::error::{
    ApiError, IncompleteOrder, NormalizedError, OrderOperation, ProviderFailure, Step,
};
use checkout_primitives::models::dtos::providers::paypal::{IssueDetail, ProviderOrderResult};
use http::StatusCode;
use tracing::{error, warn};
use validator::{ValidationErrors, ValidationErrorsKind};

const BAD_REQUEST: &str = "Bad Request";
const AUTHENTICATION_ERROR: &str = "Authentication Error";
const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
const PAYMENT_PROCESSING_ERROR: &str = "Payment Processing Error";
const PAYMENT_FAILED: &str = "Payment Failed";
const CAPTURE_NOT_COMPLETED: &str = "Capture Not Completed";

const GENERIC_FAILURE: &str = "An unexpected error occurred while processing the payment.";
const AUTHENTICATION_FAILURE: &str = "Failed to authenticate with PayPal.";
const PAYMENT_PROCESSING_FAILED: &str = "Payment processing failed.";
const CHARGE_FAILED: &str = "Payment failed. Please check details or try again.";
const CAPTURE_FAILED: &str = "Payment capture failed or is pending.";
const CAPTURE_PENDING: &str = "Payment capture is pending. Please check your PayPal account.";

/// Fixed user messages for the PayPal issue codes a shopper can act on.
pub fn issue_message(issue: &str) -> Option<&'static str> {
    match issue {
        "INSTRUMENT_DECLINED" => Some("Your card was declined by the bank."),
        "CREDIT_CARD_CVV_CHECK_FAILED" | "INVALID_SECURITY_CODE" => {
            Some("Invalid security code (CVV).")
        }
        "CREDIT_CARD_REFUSED" => Some("Card refused. Try another card or contact your bank."),
        "EXPIRED_CARD" => Some("Card has expired."),
        "INVALID_ACCOUNT_NUMBER" => Some("Invalid card number."),
        "DUPLICATE_REQUEST_ID" => {
            Some("Duplicate transaction attempt. Please wait and try again if necessary.")
        }
        "ORDER_ALREADY_CAPTURED" => Some("This order has already been captured."),
        _ => None,
    }
}

fn known_issue(details: &[IssueDetail]) -> Option<(&str, &'static str)> {
    details
        .iter()
        .filter_map(|d| d.issue.as_deref())
        .find_map(|issue| issue_message(issue).map(|msg| (issue, msg)))
}

pub fn normalize(err: ApiError, step: Step) -> NormalizedError {
    let normalized = match err {
        ApiError::Validation(message) => {
            NormalizedError::new(StatusCode::BAD_REQUEST, BAD_REQUEST, message, step)
        }
        ApiError::InvalidRequest(errors) => NormalizedError::new(
            StatusCode::BAD_REQUEST,
            BAD_REQUEST,
            validation_message(&errors),
            step,
        ),
        ApiError::Authentication(_) => NormalizedError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            AUTHENTICATION_ERROR,
            AUTHENTICATION_FAILURE,
            Step::FetchingAccessToken,
        ),
        ApiError::Rejected(failure) => rejected(failure, step),
        ApiError::Pending(order) => {
            let mut normalized = NormalizedError::new(
                StatusCode::BAD_REQUEST,
                CAPTURE_NOT_COMPLETED,
                CAPTURE_PENDING,
                step,
            );
            normalized.issue_code = order.capture_status.clone();
            with_order(normalized, order)
        }
        ApiError::NotCompleted(order) => not_completed(order, step),
        ApiError::Transport(_) | ApiError::Internal(_) => NormalizedError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR,
            GENERIC_FAILURE,
            step,
        ),
    };

    log(&normalized);
    normalized
}

fn rejected(failure: ProviderFailure, step: Step) -> NormalizedError {
    let ProviderFailure { http_status, body } = failure;

    let mut normalized = match http_status {
        401 | 403 => NormalizedError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            AUTHENTICATION_ERROR,
            AUTHENTICATION_FAILURE,
            step,
        ),
        500.. => NormalizedError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR,
            GENERIC_FAILURE,
            step,
        ),
        _ => {
            let first = body.details.first();
            let message = match known_issue(&body.details) {
                Some((_, mapped)) => mapped.to_string(),
                None => first
                    .and_then(|d| d.description.clone())
                    .or_else(|| body.message.clone())
                    .or_else(|| body.first_issue().map(|i| format!("Payment error: {}", i)))
                    .unwrap_or_else(|| PAYMENT_PROCESSING_FAILED.to_string()),
            };
            NormalizedError::new(
                StatusCode::BAD_REQUEST,
                PAYMENT_PROCESSING_ERROR,
                message,
                step,
            )
        }
    };

    normalized.issue_code = known_issue(&body.details)
        .map(|(issue, _)| issue)
        .or_else(|| body.first_issue())
        .map(str::to_string);
    normalized.debug_id = body.debug_id;
    normalized
}

fn not_completed(order: IncompleteOrder, step: Step) -> NormalizedError {
    let first_issue = order.details.iter().find_map(|d| d.issue.clone());

    let (status_message, issue, message) = match order.operation {
        OrderOperation::CardCharge => {
            let message = match known_issue(&order.details) {
                Some((_, mapped)) => mapped.to_string(),
                None => order
                    .details
                    .first()
                    .and_then(|d| d.description.clone())
                    .or_else(|| order.provider_message.clone())
                    .unwrap_or_else(|| CHARGE_FAILED.to_string()),
            };
            (PAYMENT_FAILED, first_issue, message)
        }
        OrderOperation::Capture => {
            let issue = first_issue.or_else(|| order.capture_status.clone());
            let message = issue
                .as_deref()
                .and_then(issue_message)
                .unwrap_or(CAPTURE_FAILED)
                .to_string();
            (CAPTURE_NOT_COMPLETED, issue, message)
        }
    };

    let mut normalized =
        NormalizedError::new(StatusCode::BAD_REQUEST, status_message, message, step);
    normalized.issue_code = issue;
    with_order(normalized, order)
}

fn with_order(mut normalized: NormalizedError, order: IncompleteOrder) -> NormalizedError {
    normalized.debug_id = order.debug_id;
    normalized.order_id = Some(order.order_id);
    normalized.order_status = Some(order.status).filter(|s| !s.is_empty());
    normalized.capture_status = order.capture_status;
    normalized
}

/// Field messages from (possibly nested) validator errors, ordered by field path.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut collected = Vec::new();
    collect_messages(errors, "", &mut collected);
    collected.sort();

    let mut messages: Vec<String> = Vec::new();
    for (_, message) in collected {
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    if messages.is_empty() {
        "Invalid request.".to_string()
    } else {
        messages.join(" ")
    }
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for e in field_errors {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}.", path));
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn log(normalized: &NormalizedError) {
    if normalized.http_status.is_server_error() {
        error!(
            step = %normalized.step,
            status_message = %normalized.status_message,
            paypal_issue = ?normalized.issue_code,
            paypal_debug_id = ?normalized.debug_id,
            "Checkout request failed"
        );
    } else {
        warn!(
            step = %normalized.step,
            status_message = %normalized.status_message,
            paypal_issue = ?normalized.issue_code,
            paypal_debug_id = ?normalized.debug_id,
            paypal_order_id = ?normalized.order_id,
            "Checkout request rejected"
        );
    }
}

/// A card charge succeeds once PayPal reports the order `COMPLETED`.
pub fn classify_card_charge(result: ProviderOrderResult) -> Result<ProviderOrderResult, ApiError> {
    if result.is_completed() {
        return Ok(result);
    }
    Err(ApiError::NotCompleted(incomplete(
        &result,
        OrderOperation::CardCharge,
    )))
}

/// A capture needs both the order and its first capture `COMPLETED`;
/// a `PENDING` capture is reported separately from a failure.
pub fn classify_capture(result: ProviderOrderResult) -> Result<ProviderOrderResult, ApiError> {
    if result.is_completed() && result.capture_completed() {
        return Ok(result);
    }

    let order = incomplete(&result, OrderOperation::Capture);
    if result.capture_pending() {
        Err(ApiError::Pending(order))
    } else {
        Err(ApiError::NotCompleted(order))
    }
}

fn incomplete(result: &ProviderOrderResult, operation: OrderOperation) -> IncompleteOrder {
    let embedded = result.embedded_error();
    IncompleteOrder {
        operation,
        order_id: result.order_id.clone(),
        status: result.status.clone(),
        capture_status: result.capture_status.clone(),
        debug_id: embedded.debug_id,
        provider_message: embedded.message,
        details: embedded.details,
    }
}

/// Attaches the processing step to any error on its way out of a handler.
pub trait ResultExt<T> {
    fn at_step(self, step: Step) -> Result<T, NormalizedError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn at_step(self, step: Step) -> Result<T, NormalizedError> {
        self.map_err(|e| normalize(e.into(), step))
    }
}
