use crate::media::error::MediaError;
use app_state::MediaSettings;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A stored blob: the internal key used for later deletion and the public
/// URL handed to clients. The key never leaves the backend.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub storage_uri: String,
    pub public_url: String,
}

/// Disk-backed blob store for item images and thumbnails, served statically
/// by the api binary. Keys are flat file names; anything path-like is
/// rejected before it touches the filesystem.
#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl MediaStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_settings(media: &MediaSettings) -> Self {
        Self::new(media.media_folder.clone(), media.public_base_url.clone())
    }

    pub async fn store(&self, bytes: &[u8], key: &str) -> Result<StoredMedia, MediaError> {
        validate_key(key)?;
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(key);
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored media blob at {}", path.display());
        Ok(StoredMedia {
            storage_uri: key.to_string(),
            public_url: self.public_url(key),
        })
    }

    pub async fn delete(&self, key: &str) -> Result<(), MediaError> {
        validate_key(key)?;
        let path = self.root.join(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Already gone is fine; deletion is best-effort anyway.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    /// Key under which an item's thumbnail lives, derived from the full
    /// image's key.
    #[must_use]
    pub fn thumbnail_key(key: &str) -> String {
        let stem = Path::new(key)
            .file_stem()
            .map_or(key, |stem| stem.to_str().unwrap_or(key));
        format!("{stem}_thumb.jpg")
    }
}

fn validate_key(key: &str) -> Result<(), MediaError> {
    let valid = !key.is_empty()
        && !key.contains(['/', '\\'])
        && !key.starts_with('.')
        && key.chars().all(|c| !c.is_control());
    if valid {
        Ok(())
    } else {
        Err(MediaError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_keys() {
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b.jpg").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("").is_err());
        assert!(validate_key("ab12cd34.jpg").is_ok());
    }

    #[test]
    fn thumbnail_key_replaces_extension() {
        assert_eq!(MediaStore::thumbnail_key("ab12cd34.png"), "ab12cd34_thumb.jpg");
        assert_eq!(MediaStore::thumbnail_key("noext"), "noext_thumb.jpg");
    }

    #[test]
    fn public_url_joins_base_and_key() {
        let store = MediaStore::new("/tmp/media", "http://localhost:8080/media/");
        assert_eq!(
            store.public_url("ab12.jpg"),
            "http://localhost:8080/media/ab12.jpg"
        );
    }

    #[tokio::test]
    async fn store_and_delete_roundtrip() -> Result<(), MediaError> {
        let dir = std::env::temp_dir().join("armoire_media_store_test");
        let store = MediaStore::new(&dir, "http://localhost/media");
        let stored = store.store(b"fake image bytes", "roundtrip.jpg").await?;
        assert_eq!(stored.storage_uri, "roundtrip.jpg");
        assert!(dir.join("roundtrip.jpg").exists());
        store.delete("roundtrip.jpg").await?;
        assert!(!dir.join("roundtrip.jpg").exists());
        // Deleting again is a no-op, not an error.
        store.delete("roundtrip.jpg").await?;
        Ok(())
    }
}
