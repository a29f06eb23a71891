use eyre::{eyre, Report};
use secrecy::SecretString;
use serde::Serialize;
use std::env;
use std::fmt;
use tracing::{info, warn};
use utoipa::ToSchema;

pub const SANDBOX_API_URL: &str = "https://api-m.sandbox.paypal.com";
pub const LIVE_API_URL: &str = "https://api-m.paypal.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaypalEnvironment {
    Sandbox,
    Live,
}

impl PaypalEnvironment {
    /// Case-insensitive, trimmed match on `live` / `sandbox`.
    ///
    /// Anything else (including a missing value) falls back to sandbox with a
    /// configuration warning; it never selects live by accident.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("live") => PaypalEnvironment::Live,
            Some("sandbox") => PaypalEnvironment::Sandbox,
            _ => {
                warn!(
                    paypal_environment = ?raw,
                    "Invalid or missing PAYPAL_ENVIRONMENT, defaulting to sandbox"
                );
                PaypalEnvironment::Sandbox
            }
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            PaypalEnvironment::Sandbox => SANDBOX_API_URL,
            PaypalEnvironment::Live => LIVE_API_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaypalEnvironment::Sandbox => "sandbox",
            PaypalEnvironment::Live => "live",
        }
    }
}

impl fmt::Display for PaypalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PaypalInfo {
    pub paypal_client_id: String,
    pub paypal_secret: SecretString,
    pub paypal_environment: PaypalEnvironment,
    pub paypal_api_url: String,
}

impl PaypalInfo {
    pub fn new() -> Result<Self, Report> {
        let paypal_environment =
            PaypalEnvironment::resolve(env::var("PAYPAL_ENVIRONMENT").ok().as_deref());

        let paypal_client_id = required_var("PAYPAL_CLIENT_ID")?;
        let paypal_secret = SecretString::from(required_var("PAYPAL_CLIENT_SECRET")?);

        let paypal_api_url = match env::var("PAYPAL_API_URL") {
            Ok(url) if !url.trim().is_empty() => {
                info!(paypal_api_url = %url, "Using PAYPAL_API_URL override");
                url.trim().to_string()
            }
            _ => paypal_environment.base_url().to_string(),
        };

        Ok(Self {
            paypal_client_id,
            paypal_secret,
            paypal_environment,
            paypal_api_url,
        })
    }
}

fn required_var(name: &str) -> Result<String, Report> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| eyre!("{} must be set", name))
}
