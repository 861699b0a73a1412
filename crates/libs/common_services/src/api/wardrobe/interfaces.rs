use crate::database::clothing_item::{ClothingItem, ClothingItemPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The item shape returned to API callers: no embedding vector, no internal
/// storage URI.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItemResponse {
    pub id: String,
    pub user_id: i32,
    pub image_url: String,
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

impl From<ClothingItem> for ClothingItemResponse {
    fn from(item: ClothingItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            image_url: item.image_url,
            thumbnail_url: item.thumbnail_url,
            name: item.name,
            category: item.category,
            sub_category: item.sub_category,
            description: item.description,
            colors: item.colors,
            seasons: item.seasons,
            occasions: item.occasions,
            is_public: item.is_public,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Partial update: only fields present in the request are changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateClothingItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub description: Option<String>,
    pub colors: Option<Vec<String>>,
    pub seasons: Option<Vec<String>>,
    pub occasions: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

impl From<UpdateClothingItemRequest> for ClothingItemPatch {
    fn from(request: UpdateClothingItemRequest) -> Self {
        Self {
            name: request.name,
            category: request.category,
            sub_category: request.sub_category,
            description: request.description,
            colors: request.colors,
            seasons: request.seasons,
            occasions: request.occasions,
            is_public: request.is_public,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub owner_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_without_embedding_or_storage_uri() {
        let now = Utc::now();
        let response = ClothingItemResponse::from(ClothingItem {
            id: "abc123".to_string(),
            user_id: 1,
            image_url: "http://localhost/media/abc123.jpg".to_string(),
            storage_uri: "abc123.jpg".to_string(),
            thumbnail_url: "http://localhost/media/abc123_thumb.jpg".to_string(),
            name: "Vintage Denim Jacket".to_string(),
            category: "Outerwear".to_string(),
            sub_category: "Jacket".to_string(),
            description: "A faded denim jacket.".to_string(),
            colors: vec!["Blue".to_string()],
            seasons: vec!["Fall".to_string()],
            occasions: vec!["Casual".to_string()],
            is_public: false,
            created_at: now,
            updated_at: now,
        });
        let json = serde_json::to_value(&response).expect("serialize");
        let object = json.as_object().expect("object");
        assert!(!object.contains_key("embedding"));
        assert!(!object.contains_key("storageUri"));
        assert_eq!(object["imageUrl"], "http://localhost/media/abc123.jpg");
        assert_eq!(object["subCategory"], "Jacket");
    }

    #[test]
    fn missing_request_fields_deserialize_to_none() {
        let request: UpdateClothingItemRequest =
            serde_json::from_str(r#"{"isPublic": true}"#).expect("parse");
        assert_eq!(request.is_public, Some(true));
        assert!(request.name.is_none());
        assert!(request.colors.is_none());
    }
}
