use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// One "name appears N times" aggregation row.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldCount {
    pub name: String,
    pub count: i64,
}

/// The "shape" of a closet: top tags by frequency.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosetStats {
    pub total_items: i64,
    pub top_colors: Vec<FieldCount>,
    pub top_categories: Vec<FieldCount>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StylistResponse {
    pub message: String,
    /// Included so callers can see what the stylist saw.
    pub stats: ClosetStats,
}
