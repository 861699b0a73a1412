//! HTTP handlers for the wardrobe: upload, search, CRUD and the owner
//! lookup. All of them operate on the authenticated user's own items; only
//! the owner lookup can touch another user's (public) item.

use crate::api_state::ApiState;
use app_state::settings;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::search::error::SearchError;
use common_services::api::search::interfaces::SearchParams;
use common_services::api::search::service::search_items;
use common_services::api::wardrobe::error::WardrobeError;
use common_services::api::wardrobe::interfaces::{
    ClothingItemResponse, OwnerResponse, UpdateClothingItemRequest,
};
use common_services::api::wardrobe::service::{
    UploadedImage, delete_item, get_item, list_items, owner_name, update_item, upload_item,
};
use common_services::database::app_user::User;

/// Upload a clothing item image; the tagging pipeline stores media, asks the
/// AI service for tags and a description, embeds the description and saves
/// the record.
///
/// # Errors
///
/// Returns `WardrobeError` when the upload is not a usable image, when AI
/// analysis or embedding fails (nothing is stored in that case), or for
/// storage failures.
#[utoipa::path(
    post,
    path = "/clothing/upload",
    request_body(content = String, content_type = "multipart/form-data",
        description = "Form with a single `image` file field"),
    responses(
        (status = 200, description = "Uploaded and tagged clothing item", body = ClothingItemResponse),
        (status = 400, description = "Invalid file"),
        (status = 502, description = "AI analysis or embedding failed"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_clothing_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<ClothingItemResponse>, WardrobeError> {
    let mut upload: Option<UploadedImage> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| WardrobeError::InvalidUpload(err.to_string()))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(ToString::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|err| WardrobeError::InvalidUpload(err.to_string()))?;
            upload = Some(UploadedImage {
                bytes: bytes.to_vec(),
                filename,
                content_type,
            });
        }
    }
    let upload =
        upload.ok_or_else(|| WardrobeError::InvalidUpload("missing 'image' field".to_string()))?;

    let item = upload_item(
        &api_state.pool,
        &api_state.ai,
        &api_state.media,
        &user,
        upload,
        settings().media.thumbnail_max_width,
    )
    .await?;
    Ok(Json(item.into()))
}

/// Search the caller's closet, by keyword or by semantic "vibe" similarity.
///
/// The response is always an array, possibly empty, and never includes
/// embedding vectors.
///
/// # Errors
///
/// Returns `SearchError` for malformed descriptors, embedding failures
/// (semantic mode never silently falls back to keyword mode), store
/// failures, and result decode failures.
#[utoipa::path(
    post,
    path = "/clothing/search",
    request_body = SearchParams,
    responses(
        (status = 200, description = "Matching items, best first in semantic mode", body = [ClothingItemResponse]),
        (status = 400, description = "Malformed search descriptor"),
        (status = 502, description = "Embedding generation failed"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_clothing_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
    Json(params): Json<SearchParams>,
) -> Result<Json<Vec<ClothingItemResponse>>, SearchError> {
    let items = search_items(
        &api_state.pool,
        &api_state.ai,
        &user,
        &params,
        &settings().search,
        settings().ai.embed_timeout(),
    )
    .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// List all of the caller's items, newest first.
#[utoipa::path(
    get,
    path = "/clothing",
    responses(
        (status = 200, description = "All of the caller's items", body = [ClothingItemResponse]),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_clothing_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<ClothingItemResponse>>, WardrobeError> {
    let items = list_items(&api_state.pool, &user).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Fetch one of the caller's items by id.
#[utoipa::path(
    get,
    path = "/clothing/{item_id}",
    params(("item_id" = String, Path, description = "Clothing item id")),
    responses(
        (status = 200, description = "The item", body = ClothingItemResponse),
        (status = 404, description = "No such item for this user"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_clothing_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
    Path(item_id): Path<String>,
) -> Result<Json<ClothingItemResponse>, WardrobeError> {
    let item = get_item(&api_state.pool, &user, &item_id).await?;
    Ok(Json(item.into()))
}

/// Partially update one of the caller's items. Only fields present in the
/// body are changed; the updated timestamp is always bumped.
#[utoipa::path(
    put,
    path = "/clothing/{item_id}",
    params(("item_id" = String, Path, description = "Clothing item id")),
    request_body = UpdateClothingItemRequest,
    responses(
        (status = 200, description = "The updated item", body = ClothingItemResponse),
        (status = 404, description = "No such item for this user"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_clothing_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateClothingItemRequest>,
) -> Result<Json<ClothingItemResponse>, WardrobeError> {
    let item = update_item(&api_state.pool, &user, &item_id, request).await?;
    Ok(Json(item.into()))
}

/// Delete one of the caller's items. Backing media is deleted best-effort;
/// a media deletion failure never blocks record deletion.
#[utoipa::path(
    delete,
    path = "/clothing/{item_id}",
    params(("item_id" = String, Path, description = "Clothing item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "No such item for this user"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_clothing_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
    Path(item_id): Path<String>,
) -> Result<StatusCode, WardrobeError> {
    delete_item(&api_state.pool, &api_state.media, &user, &item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Owner display name for a public or owned item. This is the single lookup
/// scoped by item id rather than by the requesting user.
#[utoipa::path(
    get,
    path = "/clothing/{item_id}/owner",
    params(("item_id" = String, Path, description = "Clothing item id")),
    responses(
        (status = 200, description = "The owner's display name", body = OwnerResponse),
        (status = 404, description = "Item does not exist or is private to another user"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_clothing_owner_handler(
    State(api_state): State<ApiState>,
    Extension(user): Extension<User>,
    Path(item_id): Path<String>,
) -> Result<Json<OwnerResponse>, WardrobeError> {
    let owner_name = owner_name(&api_state.pool, &user, &item_id).await?;
    Ok(Json(OwnerResponse { owner_name }))
}
