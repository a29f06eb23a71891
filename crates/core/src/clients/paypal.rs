use crate::clients::oauth::{get_access_token, PaypalCredentials};
use crate::clients::orders::{self, OrdersApi};
use crate::services::order_builder::PreparedOrder;
use checkout_primitives::error::ApiError;
use checkout_primitives::models::app_state::paypal_details::{PaypalEnvironment, PaypalInfo};
use checkout_primitives::models::dtos::providers::paypal::ProviderOrderResult;
use once_cell::sync::OnceCell;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

static CLIENT: OnceCell<PaypalClient> = OnceCell::new();

/// Process-wide PayPal handle, built once on first use.
///
/// Construction is single-flight: concurrent first callers block on the same
/// initializer and all observe the one handle. The configuration passed by the
/// first caller wins; later arguments are ignored.
pub fn get_client(info: &PaypalInfo) -> Result<&'static PaypalClient, ApiError> {
    CLIENT.get_or_try_init(|| {
        info!(
            paypal_environment = %info.paypal_environment,
            paypal_api_url = %info.paypal_api_url,
            "Initializing PayPal client"
        );
        PaypalClient::new(info)
    })
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Managed PayPal handle: owns its OAuth token the way the vendor SDK does and
/// applies a fixed 30s timeout to every request.
#[derive(Clone)]
pub struct PaypalClient {
    http: Client,
    base_url: Url,
    credentials: PaypalCredentials,
    environment: PaypalEnvironment,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl PaypalClient {
    pub fn new(info: &PaypalInfo) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to build PayPal HTTP client: {}", e)))?;

        let base_url = Url::parse(&info.paypal_api_url)
            .map_err(|_| ApiError::Internal("Invalid PayPal base URL".into()))?;

        Ok(Self {
            http,
            base_url,
            credentials: PaypalCredentials::from(info),
            environment: info.paypal_environment,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn environment(&self) -> PaypalEnvironment {
        self.environment
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn bearer_token(&self) -> Result<String, ApiError> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.token.write().await;
        // another request may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(token.value.clone());
        }

        let fresh = get_access_token(&self.http, &self.credentials, &self.base_url).await?;
        let ttl = Duration::from_secs(fresh.expires_in.unwrap_or(0))
            .saturating_sub(TOKEN_EXPIRY_MARGIN);

        debug!(ttl_secs = ttl.as_secs(), "Cached PayPal access token");

        *cached = Some(CachedToken {
            value: fresh.access_token.clone(),
            expires_at: Instant::now() + ttl,
        });

        Ok(fresh.access_token)
    }

    /// Drops the cached token if PayPal refused it, so the next call fetches a new one.
    /// The failed call itself is not retried.
    async fn evict_on_auth_failure<T>(
        &self,
        token: &str,
        result: Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        if let Err(ApiError::Authentication(_)) = &result {
            let mut cached = self.token.write().await;
            // a concurrent request may already have replaced it
            if cached.as_ref().is_some_and(|t| t.value == token) {
                *cached = None;
                warn!("Discarded PayPal access token rejected by the Orders API");
            }
        }
        result
    }
}

impl OrdersApi for PaypalClient {
    async fn create_order(&self, order: &PreparedOrder) -> Result<ProviderOrderResult, ApiError> {
        let token = self.bearer_token().await?;
        let result = orders::send_create(&self.http, &self.base_url, &token, order).await;
        self.evict_on_auth_failure(&token, result).await
    }

    async fn capture_order(&self, order_id: &str) -> Result<ProviderOrderResult, ApiError> {
        let token = self.bearer_token().await?;
        let result = orders::send_capture(&self.http, &self.base_url, &token, order_id).await;
        self.evict_on_auth_failure(&token, result).await
    }
}
