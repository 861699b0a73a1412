//! Regenerates the stored embedding of every clothing item from its
//! description, e.g. after switching embedding models. Failures on single
//! items are logged and skipped so one bad row cannot stall the run.

use color_eyre::Result;
use common_services::ai::{AiClient, EmbeddingProvider};
use common_services::database::clothing_store::ClothingStore;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, warn};

/// The embedding provider enforces request rates; pace calls instead of
/// hammering it.
const PACE: Duration = Duration::from_millis(200);

pub async fn run(pool: &PgPool, ai: &AiClient) -> Result<()> {
    let items = ClothingStore::list_for_reindex(pool).await?;
    info!("Re-indexing {} clothing items", items.len());

    let mut processed = 0usize;
    let mut succeeded = 0usize;
    for item in items {
        processed += 1;
        if item.description.trim().is_empty() {
            info!("[{processed}] {}: skipped (no description)", item.name);
            continue;
        }

        let embedding = match ai.embed(&item.description).await {
            Ok(embedding) => embedding,
            Err(err) => {
                warn!("[{processed}] {}: embedding failed: {err}", item.name);
                continue;
            }
        };
        match ClothingStore::update_embedding(pool, &item.id, embedding).await {
            Ok(()) => {
                info!("[{processed}] {}: done", item.name);
                succeeded += 1;
            }
            Err(err) => warn!("[{processed}] {}: update failed: {err}", item.name),
        }

        tokio::time::sleep(PACE).await;
    }

    info!("Finished. Processed {processed} items, successfully re-indexed {succeeded}.");
    Ok(())
}
