mod observability;

pub mod utility;

use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, load_env};
use checkout_core::app_state::AppState;
use checkout_primitives::models::app_state::app_config::AppConfig;
use eyre::Report;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();

    info!("Starting checkout service...");

    // 3. load configuration; missing PayPal credentials stop startup here
    let config = AppConfig::from_env()?;

    let addr = config.bind_addr()?;

    // 4. build application state around the process-wide PayPal client
    let state = AppState::new(config)?;

    info!(
        paypal_environment = %state.paypal.environment(),
        "PayPal client ready"
    );

    // 5. initialize metrics
    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    // 6. build axum router
    let app = build_router(state, metric_layer, metric_handle)?;

    // 7. start HTTP server
    serve(app, addr).await?;

    info!("Checkout service shut down gracefully");
    Ok(())
}
