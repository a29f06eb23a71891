use reqwest::Client;
use std::sync::Arc;

use crate::clients::{get_client, DirectOrdersClient, PaypalClient};
use eyre::Result;
pub use checkout_primitives::models::app_state::app_config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub paypal: PaypalClient,
    pub direct: DirectOrdersClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        let paypal = get_client(&config.paypal_details)?.clone();
        Self::with_client(config, paypal)
    }

    /// Builds state around an explicit managed client instead of the process-wide one.
    pub fn with_client(config: AppConfig, paypal: PaypalClient) -> Result<Arc<Self>> {
        // no request timeout on the direct path
        let http = Client::builder().build()?;

        let direct = DirectOrdersClient::new(http, &config.paypal_details)?;

        Ok(Arc::new(Self {
            config,
            paypal,
            direct,
        }))
    }
}
