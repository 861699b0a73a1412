use crate::database::DbError;
use crate::database::clothing_item::{
    ClothingItem, ClothingItemPatch, ITEM_COLUMNS, NewClothingItem, ReindexItem,
};
use pgvector::Vector;
use sqlx::{Executor, Postgres};

pub struct ClothingStore;

impl ClothingStore {
    /// Inserts a fully tagged item. Only called once the tagging pipeline has
    /// produced an analysis and an embedding.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        item: &NewClothingItem,
    ) -> Result<ClothingItem, DbError> {
        Ok(sqlx::query_as::<_, ClothingItem>(&format!(
            "INSERT INTO clothing_item
                (id, user_id, image_url, storage_uri, thumbnail_url,
                 name, category, sub_category, description,
                 colors, seasons, occasions, embedding)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&item.id)
        .bind(item.user_id)
        .bind(&item.image_url)
        .bind(&item.storage_uri)
        .bind(&item.thumbnail_url)
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.sub_category)
        .bind(&item.description)
        .bind(&item.colors)
        .bind(&item.seasons)
        .bind(&item.occasions)
        .bind(Vector::from(item.embedding.clone()))
        .fetch_one(executor)
        .await?)
    }

    /// Owner-scoped lookup; other users' items are invisible here.
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        item_id: &str,
        user_id: i32,
    ) -> Result<Option<ClothingItem>, DbError> {
        Ok(sqlx::query_as::<_, ClothingItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM clothing_item WHERE id = $1 AND user_id = $2"
        ))
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn list_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Vec<ClothingItem>, DbError> {
        Ok(sqlx::query_as::<_, ClothingItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM clothing_item
             WHERE user_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Partial update. `None` patch fields keep the stored value; the
    /// `updated_at` timestamp is always refreshed.
    pub async fn update(
        executor: impl Executor<'_, Database = Postgres>,
        item_id: &str,
        user_id: i32,
        patch: &ClothingItemPatch,
    ) -> Result<Option<ClothingItem>, DbError> {
        Ok(sqlx::query_as::<_, ClothingItem>(&format!(
            "UPDATE clothing_item SET
                name = COALESCE($1, name),
                category = COALESCE($2, category),
                sub_category = COALESCE($3, sub_category),
                description = COALESCE($4, description),
                colors = COALESCE($5, colors),
                seasons = COALESCE($6, seasons),
                occasions = COALESCE($7, occasions),
                is_public = COALESCE($8, is_public),
                updated_at = now()
             WHERE id = $9 AND user_id = $10
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&patch.name)
        .bind(&patch.category)
        .bind(&patch.sub_category)
        .bind(&patch.description)
        .bind(&patch.colors)
        .bind(&patch.seasons)
        .bind(&patch.occasions)
        .bind(patch.is_public)
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Deletes an owned item and returns its internal storage URI so the
    /// caller can clean up backing media.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        item_id: &str,
        user_id: i32,
    ) -> Result<Option<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>(
            "DELETE FROM clothing_item WHERE id = $1 AND user_id = $2 RETURNING storage_uri",
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Owner display name for a single item, visible when the item is public
    /// or owned by the requester. Scoped by item id, not by owner.
    pub async fn owner_name(
        executor: impl Executor<'_, Database = Postgres>,
        item_id: &str,
        requester_id: i32,
    ) -> Result<Option<String>, DbError> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT u.name
             FROM clothing_item ci
             JOIN app_user u ON u.id = ci.user_id
             WHERE ci.id = $1 AND (ci.is_public OR ci.user_id = $2)",
        )
        .bind(item_id)
        .bind(requester_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Every item eligible for embedding regeneration.
    pub async fn list_for_reindex(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<ReindexItem>, DbError> {
        Ok(sqlx::query_as::<_, ReindexItem>(
            "SELECT id, name, description FROM clothing_item ORDER BY created_at",
        )
        .fetch_all(executor)
        .await?)
    }

    pub async fn update_embedding(
        executor: impl Executor<'_, Database = Postgres>,
        item_id: &str,
        embedding: Vec<f32>,
    ) -> Result<(), DbError> {
        sqlx::query("UPDATE clothing_item SET embedding = $1, updated_at = now() WHERE id = $2")
            .bind(Vector::from(embedding))
            .bind(item_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
