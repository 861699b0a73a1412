//! Dashboard handlers: closet stats and the AI stylist message.

use crate::api_state::ApiState;
use axum::extract::State;
use axum::{Extension, Json};
use common_services::api::dashboard::error::DashboardError;
use common_services::api::dashboard::interfaces::{ClosetStats, StylistResponse};
use common_services::api::dashboard::service::{closet_stats, stylist_message};
use common_services::database::app_user::User;

/// The shape of the caller's closet: item total and top tags.
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses(
        (status = 200, description = "Closet statistics", body = ClosetStats),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_closet_stats_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
) -> Result<Json<ClosetStats>, DashboardError> {
    let stats = closet_stats(&api_state.pool, &user).await?;
    Ok(Json(stats))
}

/// A personalized stylist message based on closet stats.
#[utoipa::path(
    get,
    path = "/dashboard/stylist",
    responses(
        (status = 200, description = "Stylist message of the day", body = StylistResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_stylist_message_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
) -> Result<Json<StylistResponse>, DashboardError> {
    let response = stylist_message(&api_state.pool, &api_state.ai, &user).await?;
    Ok(Json(response))
}
