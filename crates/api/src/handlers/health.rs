use axum::{http::StatusCode, Json};
use checkout_primitives::models::dtos::health_dto::HealthStatus;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check endpoint",
    description = "Liveness probe. Returns 200 OK while the service can accept requests; \
                   PayPal itself is not contacted.",
    operation_id = "healthCheck",
    responses(
        ( status = 200, description = "Service is up", body = HealthStatus),
    ),
    security(()),
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: StatusCode::OK.to_string(),
        message: "API is healthy".to_string(),
    })
}
