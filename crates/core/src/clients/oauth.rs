use checkout_primitives::error::ApiError;
use checkout_primitives::models::app_state::paypal_details::PaypalInfo;
use checkout_primitives::models::dtos::providers::paypal::PayPalTokenResponse;
use http::header::ACCEPT;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, warn};

#[derive(Debug, Clone)]
pub struct PaypalCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl From<&PaypalInfo> for PaypalCredentials {
    fn from(info: &PaypalInfo) -> Self {
        Self {
            client_id: info.paypal_client_id.clone(),
            client_secret: info.paypal_secret.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Client-credentials grant against `{base_url}/v1/oauth2/token`.
///
/// Every failure (network, non-2xx, missing `access_token`) is an
/// [`ApiError::Authentication`]; callers must not go on to the order call.
pub async fn get_access_token(
    http: &Client,
    credentials: &PaypalCredentials,
    base_url: &Url,
) -> Result<AccessToken, ApiError> {
    let url = endpoint(base_url, &["v1", "oauth2", "token"])?;

    debug!(token_url = %url, "Requesting PayPal access token");

    let resp = http
        .post(url)
        .basic_auth(
            &credentials.client_id,
            Some(credentials.client_secret.expose_secret()),
        )
        .header(ACCEPT, "application/json")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, "PayPal token request failed");
            ApiError::Authentication("PayPal token request failed".into())
        })?;

    let status = resp.status();
    if !status.is_success() {
        warn!(http_status = status.as_u16(), "PayPal authentication rejected");
        return Err(ApiError::Authentication(format!(
            "PayPal authentication failed with HTTP {}",
            status.as_u16()
        )));
    }

    let token = resp
        .json::<PayPalTokenResponse>()
        .await
        .map_err(|_| ApiError::Authentication("Invalid PayPal token response".into()))?;

    match token.access_token.filter(|t| !t.is_empty()) {
        Some(access_token) => {
            debug!("Obtained PayPal access token");
            Ok(AccessToken {
                access_token,
                expires_in: token.expires_in,
            })
        }
        None => {
            warn!("PayPal token response has no access_token");
            Err(ApiError::Authentication(
                "Failed to obtain access token from PayPal".into(),
            ))
        }
    }
}

/// Appends path segments to the configured base URL, keeping any base path.
pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::Internal("Invalid PayPal base URL".into()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
