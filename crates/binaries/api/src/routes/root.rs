use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// The ping response.
#[derive(Serialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = "pong")]
    pub message: String,
}

/// Health check.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = PingResponse),
    )
)]
pub async fn root() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}
