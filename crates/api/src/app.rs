use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    capture_order::capture_order, card_charge::card_charge, client_config::client_config,
    create_order::create_order, health::health_check,
};
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use checkout_core::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const BODY_LIMIT: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(health_check))
        .merge(payment_routes())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            https_redirect_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http()),
        );

    // the governor needs the peer address, which in-process test servers lack
    if !state.config.is_test() {
        match GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(20)
            .finish()
        {
            Some(conf) => router = router.layer(GovernorLayer::new(Arc::new(conf))),
            None => warn!("Invalid rate limit configuration, rate limiting disabled"),
        }
    }

    router.with_state(state)
}

fn payment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payments/config", get(client_config))
        .route("/payments/card-charge", post(card_charge))
        .route("/payments/orders", post(create_order))
        .route("/payments/orders/capture", post(capture_order))
}

async fn https_redirect_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    if state.config.is_production() {
        let headers = req.headers();
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok());

        if let Some("http") = proto {
            let host = headers
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");

            let path_and_query = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("");
            let redirect_url = format!("https://{}{}", host, path_and_query);

            return Ok(Redirect::permanent(&redirect_url).into_response());
        }
    }

    Ok(next.run(req).await)
}
