use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

pub const ORDER_STATUS_COMPLETED: &str = "COMPLETED";
pub const CAPTURE_STATUS_PENDING: &str = "PENDING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderIntent {
    Capture,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseUnitRequest {
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayerName {
    pub given_name: String,
    pub surname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payer {
    pub name: PayerName,
    pub email_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingAddress {
    pub address_line_1: String,
    /// City.
    pub admin_area_2: String,
    pub postal_code: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardSource {
    #[serde(serialize_with = "expose_secret")]
    pub number: SecretString,
    /// `YYYY-MM`
    pub expiry: String,
    #[serde(serialize_with = "expose_secret")]
    pub security_code: SecretString,
    pub name: String,
    pub billing_address: BillingAddress,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentSource {
    pub card: CardSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub intent: OrderIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_source: Option<PaymentSource>,
    pub purchase_units: Vec<PurchaseUnitRequest>,
}

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug, Deserialize)]
pub struct PayPalTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssueDetail {
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

/// PayPal's error document (`name`, `message`, `debug_id`, `details[]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaypalErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub debug_id: Option<String>,
    #[serde(default)]
    pub details: Vec<IssueDetail>,
}

impl PaypalErrorBody {
    /// Only JSON objects carrying at least one of PayPal's error keys qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if !["name", "message", "details"]
            .iter()
            .any(|key| object.contains_key(*key))
        {
            return None;
        }
        Self::deserialize(value).ok()
    }

    pub fn first_issue(&self) -> Option<&str> {
        self.details.iter().find_map(|d| d.issue.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PaypalOrder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnitResponse>,
    #[serde(default)]
    pub payer: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PurchaseUnitResponse {
    #[serde(default)]
    pub payments: Option<Payments>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Payments {
    #[serde(default)]
    pub captures: Vec<Capture>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Capture {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Uniform result of a create or capture call, whichever transport produced it.
#[derive(Debug, Clone)]
pub struct ProviderOrderResult {
    pub raw_response: Value,
    pub http_status: u16,
    pub order_id: String,
    pub capture_id: Option<String>,
    pub status: String,
    pub capture_status: Option<String>,
    pub payer: Option<Value>,
}

impl ProviderOrderResult {
    /// `None` when the body has no order id.
    pub fn from_body(http_status: u16, raw_response: Value) -> Option<Self> {
        let order = PaypalOrder::deserialize(&raw_response).ok()?;
        let order_id = order.id.filter(|id| !id.is_empty())?;

        let capture = order
            .purchase_units
            .into_iter()
            .next()
            .and_then(|unit| unit.payments)
            .and_then(|payments| payments.captures.into_iter().next());
        let (capture_id, capture_status) = match capture {
            Some(c) => (c.id, c.status),
            None => (None, None),
        };

        Some(Self {
            http_status,
            order_id,
            capture_id,
            capture_status,
            status: order.status.unwrap_or_default(),
            payer: order.payer,
            raw_response,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == ORDER_STATUS_COMPLETED
    }

    pub fn capture_completed(&self) -> bool {
        self.capture_status.as_deref() == Some(ORDER_STATUS_COMPLETED)
    }

    pub fn capture_pending(&self) -> bool {
        self.capture_status.as_deref() == Some(CAPTURE_STATUS_PENDING)
    }

    /// Issue details PayPal sometimes embeds in an otherwise successful body.
    pub fn embedded_error(&self) -> PaypalErrorBody {
        PaypalErrorBody::deserialize(&self.raw_response).unwrap_or_default()
    }
}
