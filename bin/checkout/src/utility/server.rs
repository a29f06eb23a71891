use crate::utility::shutdown::shutdown_signal;
use axum::Router;
use eyre::Report;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Serves the checkout router on `addr` until a shutdown signal arrives.
pub async fn serve(router: Router, addr: SocketAddr) -> Result<(), Report> {
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Checkout service listening");
    info!("Swagger UI: http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}
