use crate::ai::error::AiError;
use async_trait::async_trait;

/// Converts free text into a fixed-length vector.
///
/// The search engine and the tagging pipeline depend on this trait rather
/// than on a concrete client, so tests can inject doubles.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError>;
}
