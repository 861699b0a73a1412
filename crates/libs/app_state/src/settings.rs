use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub database: DatabaseSettings,
    pub api: ApiSettings,
    pub auth: AuthSettings,
    pub ai: AiSettings,
    pub media: MediaSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds.
    pub acquire_timeout: u64,
    /// Seconds.
    pub idle_timeout: u64,
    /// Seconds.
    pub max_lifetime: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub access_token_expiry_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiSettings {
    pub base_url: String,
    pub api_key: String,
    pub generation_model: String,
    pub embedding_model: String,
    /// Every stored embedding must have exactly this length, or vector
    /// search degrades silently.
    pub embedding_dimensions: usize,
    pub request_timeout_secs: u64,
    pub embed_timeout_secs: u64,
    pub background_removal_url: Option<String>,
    pub background_removal_api_key: Option<String>,
}

impl AiSettings {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn embed_timeout(&self) -> Duration {
        Duration::from_secs(self.embed_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaSettings {
    pub media_folder: PathBuf,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
    pub thumbnail_max_width: u32,
}

/// Tuning for the approximate nearest-neighbor search. The candidate pool is
/// how many neighbors are examined before truncating to the result limit.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SearchProfile {
    pub candidate_pool: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SearchSettings {
    /// Small pool and cap for lower latency.
    pub quick: SearchProfile,
    /// Larger pool and cap for broader recall.
    pub broad: SearchProfile,
}
