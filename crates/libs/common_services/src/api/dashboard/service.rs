use crate::ai::AiClient;
use crate::api::dashboard::error::DashboardError;
use crate::api::dashboard::interfaces::{ClosetStats, FieldCount, StylistResponse};
use crate::database::app_user::User;
use color_eyre::eyre::Report;
use sqlx::PgPool;
use tracing::warn;

const TOP_TAG_LIMIT: i64 = 5;

const STYLIST_OFFLINE: &str =
    "The stylist is taking a coffee break, but your closet is looking great today!";

/// Aggregates the closet's shape: item total plus the most frequent colors
/// and categories.
pub async fn closet_stats(pool: &PgPool, user: &User) -> Result<ClosetStats, DashboardError> {
    let total_items = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM clothing_item WHERE user_id = $1",
    )
    .bind(user.id)
    .fetch_one(pool)
    .await?;

    // Colors live in an array column, so unnest before grouping.
    let top_colors = sqlx::query_as::<_, FieldCount>(
        "SELECT color AS name, COUNT(*) AS count
         FROM clothing_item, unnest(colors) AS color
         WHERE user_id = $1
         GROUP BY color
         ORDER BY count DESC, color
         LIMIT $2",
    )
    .bind(user.id)
    .bind(TOP_TAG_LIMIT)
    .fetch_all(pool)
    .await?;

    let top_categories = sqlx::query_as::<_, FieldCount>(
        "SELECT category AS name, COUNT(*) AS count
         FROM clothing_item
         WHERE user_id = $1
         GROUP BY category
         ORDER BY count DESC, category
         LIMIT $2",
    )
    .bind(user.id)
    .bind(TOP_TAG_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(ClosetStats {
        total_items,
        top_colors,
        top_categories,
    })
}

/// A personalized stylist message based on the closet stats. The stats query
/// must succeed; a failing generation model degrades to a canned message
/// rather than an error.
pub async fn stylist_message(
    pool: &PgPool,
    ai: &AiClient,
    user: &User,
) -> Result<StylistResponse, DashboardError> {
    let stats = closet_stats(pool, user).await?;
    let stats_json = serde_json::to_value(&stats).map_err(Report::new)?;

    let message = match ai.stylist_blurb(&stats_json).await {
        Ok(message) => message,
        Err(err) => {
            warn!("Stylist blurb generation failed: {}", err);
            STYLIST_OFFLINE.to_string()
        }
    };

    Ok(StylistResponse { message, stats })
}
