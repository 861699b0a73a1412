use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Column list shared by every read query. The embedding column is
/// deliberately absent: API-facing row types must never carry raw vectors.
pub const ITEM_COLUMNS: &str = "id, user_id, image_url, storage_uri, thumbnail_url, \
     name, category, sub_category, description, colors, seasons, occasions, \
     is_public, created_at, updated_at";

/// The canonical clothing record as read from the store.
///
/// `storage_uri` is internal plumbing for media deletion; the API response
/// shape lives in `api::wardrobe::interfaces` and omits it.
#[derive(Debug, Clone, FromRow)]
pub struct ClothingItem {
    pub id: String,
    pub user_id: i32,
    pub image_url: String,
    pub storage_uri: String,
    pub thumbnail_url: String,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub description: String,
    pub colors: Vec<String>,
    pub seasons: Vec<String>,
    pub occasions: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload produced by the tagging pipeline. The embedding length must
/// match the vector column's dimensionality.
#[derive(Debug, Clone)]
pub struct NewClothingItem {
    pub id: String,
    pub user_id: i32,
    pub image_url: String,
    pub storage_uri: String,
    pub thumbnail_url: String,
    pub name: String,
    pub category: String,
    pub sub_category: String,
    pub description: String,
    pub colors: Vec<String>,
    pub seasons: Vec<String>,
    pub occasions: Vec<String>,
    pub embedding: Vec<f32>,
}

/// Partial update; `None` fields keep their stored value. `updated_at` is
/// always bumped regardless of which fields are present.
#[derive(Debug, Clone, Default)]
pub struct ClothingItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub description: Option<String>,
    pub colors: Option<Vec<String>>,
    pub seasons: Option<Vec<String>>,
    pub occasions: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Minimal row for the embedding reindex task.
#[derive(Debug, Clone, FromRow)]
pub struct ReindexItem {
    pub id: String,
    pub name: String,
    pub description: String,
}
