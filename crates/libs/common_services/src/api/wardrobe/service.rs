use crate::ai::AiClient;
use crate::ai::EmbeddingProvider;
use crate::api::wardrobe::error::WardrobeError;
use crate::api::wardrobe::interfaces::UpdateClothingItemRequest;
use crate::database::app_user::User;
use crate::database::clothing_item::{ClothingItem, NewClothingItem};
use crate::database::clothing_store::ClothingStore;
use crate::media::{MediaStore, downscale};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

/// One image as it arrived in the multipart request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
}

/// Runs the full tagging pipeline for one uploaded image and stores the
/// resulting item.
///
/// Background removal and thumbnailing are best-effort: a failure falls back
/// to the original bytes / the full-size image URL. AI analysis and embedding
/// are not: if either fails, no record is stored and media written so far is
/// cleaned up best-effort.
///
/// # Errors
///
/// * `WardrobeError::InvalidUpload` when the payload is not a usable image.
/// * `WardrobeError::AnalysisFailed` / `WardrobeError::EmbeddingFailed` when
///   the AI collaborator fails; nothing is persisted in that case.
/// * `WardrobeError::Media` / `WardrobeError::Database` for storage failures.
pub async fn upload_item(
    pool: &PgPool,
    ai: &AiClient,
    media: &MediaStore,
    user: &User,
    upload: UploadedImage,
    thumbnail_max_width: u32,
) -> Result<ClothingItem, WardrobeError> {
    if upload.bytes.is_empty() {
        return Err(WardrobeError::InvalidUpload("empty file".to_string()));
    }
    let mime_type = sniff_image_mime(&upload.bytes, upload.content_type.as_deref())?;

    // Background removal is an enhancement, not a requirement.
    let image_bytes = match ai.remove_background(&upload.bytes, &upload.filename).await {
        Ok(cleaned) => cleaned,
        Err(err) => {
            warn!("Background removal skipped: {}", err);
            upload.bytes
        }
    };
    // The removal service may re-encode (typically to PNG); re-sniff.
    let mime_type = sniff_image_mime(&image_bytes, Some(mime_type.as_str()))?;

    let item_id = Uuid::new_v4().simple().to_string();
    let image_key = format!("{item_id}.{}", extension_for(&mime_type));
    let stored_image = media.store(&image_bytes, &image_key).await?;

    let thumbnail_url = match downscale(&image_bytes, thumbnail_max_width) {
        Ok(thumb_bytes) => {
            let thumb_key = MediaStore::thumbnail_key(&image_key);
            match media.store(&thumb_bytes, &thumb_key).await {
                Ok(stored_thumb) => stored_thumb.public_url,
                Err(err) => {
                    warn!("Thumbnail store failed, using full image: {}", err);
                    stored_image.public_url.clone()
                }
            }
        }
        Err(err) => {
            warn!("Thumbnail generation failed, using full image: {}", err);
            stored_image.public_url.clone()
        }
    };

    // From here on failures must not leave a half-tagged record behind:
    // analysis and embedding either both succeed or the upload fails.
    let analysis = match ai.analyze_image(&image_bytes, &mime_type).await {
        Ok(analysis) => analysis,
        Err(err) => {
            cleanup_media(media, &image_key).await;
            return Err(WardrobeError::AnalysisFailed(err));
        }
    };
    let embedding = match ai.embed(&analysis.description).await {
        Ok(embedding) => embedding,
        Err(err) => {
            cleanup_media(media, &image_key).await;
            return Err(WardrobeError::EmbeddingFailed(err));
        }
    };

    let new_item = NewClothingItem {
        id: item_id,
        user_id: user.id,
        image_url: stored_image.public_url,
        storage_uri: stored_image.storage_uri,
        thumbnail_url,
        name: analysis.name,
        category: analysis.category,
        sub_category: analysis.sub_category,
        description: analysis.description,
        colors: analysis.colors,
        seasons: analysis.seasons,
        occasions: analysis.occasions,
        embedding,
    };
    match ClothingStore::create(pool, &new_item).await {
        Ok(item) => {
            info!("Stored clothing item {} for user {}", item.id, user.id);
            Ok(item)
        }
        Err(err) => {
            cleanup_media(media, &image_key).await;
            Err(err.into())
        }
    }
}

pub async fn list_items(pool: &PgPool, user: &User) -> Result<Vec<ClothingItem>, WardrobeError> {
    Ok(ClothingStore::list_for_user(pool, user.id).await?)
}

pub async fn get_item(
    pool: &PgPool,
    user: &User,
    item_id: &str,
) -> Result<ClothingItem, WardrobeError> {
    ClothingStore::find_by_id(pool, item_id, user.id)
        .await?
        .ok_or_else(|| WardrobeError::ItemNotFound(item_id.to_string()))
}

/// Applies a partial update; omitted fields are unchanged and the updated
/// timestamp is always refreshed.
pub async fn update_item(
    pool: &PgPool,
    user: &User,
    item_id: &str,
    request: UpdateClothingItemRequest,
) -> Result<ClothingItem, WardrobeError> {
    ClothingStore::update(pool, item_id, user.id, &request.into())
        .await?
        .ok_or_else(|| WardrobeError::ItemNotFound(item_id.to_string()))
}

/// Deletes the record, then best-effort deletes its backing media. A media
/// deletion failure is logged but never rolls back the record deletion.
pub async fn delete_item(
    pool: &PgPool,
    media: &MediaStore,
    user: &User,
    item_id: &str,
) -> Result<(), WardrobeError> {
    let storage_uri = ClothingStore::delete(pool, item_id, user.id)
        .await?
        .ok_or_else(|| WardrobeError::ItemNotFound(item_id.to_string()))?;
    cleanup_media(media, &storage_uri).await;
    Ok(())
}

/// Owner display name for a public or owned item; scoped by item id.
pub async fn owner_name(
    pool: &PgPool,
    user: &User,
    item_id: &str,
) -> Result<String, WardrobeError> {
    ClothingStore::owner_name(pool, item_id, user.id)
        .await?
        .ok_or_else(|| WardrobeError::ItemNotFound(item_id.to_string()))
}

async fn cleanup_media(media: &MediaStore, image_key: &str) {
    for key in [image_key.to_string(), MediaStore::thumbnail_key(image_key)] {
        if let Err(err) = media.delete(&key).await {
            warn!("Failed to delete media blob {}: {}", key, err);
        }
    }
}

fn sniff_image_mime(bytes: &[u8], declared: Option<&str>) -> Result<String, WardrobeError> {
    let mime = infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .or_else(|| declared.map(ToString::to_string))
        .ok_or_else(|| WardrobeError::InvalidUpload("unrecognized file type".to_string()))?;
    if !mime.starts_with("image/") {
        return Err(WardrobeError::InvalidUpload(format!(
            "expected an image, got {mime}"
        )));
    }
    Ok(mime)
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_sniffing_prefers_magic_bytes_over_declared_type() {
        let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let mime = sniff_image_mime(&png_magic, Some("image/jpeg")).expect("sniff");
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn non_image_payloads_are_rejected() {
        let pdf_magic = b"%PDF-1.7 rest of document";
        assert!(matches!(
            sniff_image_mime(pdf_magic, None),
            Err(WardrobeError::InvalidUpload(_))
        ));
        // Unrecognizable bytes with a declared non-image type fail too.
        assert!(matches!(
            sniff_image_mime(&[0u8; 4], Some("text/plain")),
            Err(WardrobeError::InvalidUpload(_))
        ));
    }

    #[test]
    fn extension_follows_mime_type() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/unknown"), "jpg");
    }
}
