//! Postgres-backed profile store: one JSONB document per user.
//!
//! The engine treats the document as opaque; all indexing needs are covered
//! by the primary key on `user_id` plus a secondary index on
//! `(user_id, last_draw_at)` for paginated newest-first history reads.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use super::store::{ProfileStore, StoreError};
use crate::model::UserFortuneProfile;

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the table and indexes if they do not exist. Call once at
    /// startup, before serving draws.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS fortune_profiles (
                user_id      BIGINT PRIMARY KEY,
                doc          JSONB NOT NULL,
                created_at   TIMESTAMPTZ NOT NULL,
                last_draw_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS fortune_profiles_last_draw_idx
             ON fortune_profiles (user_id, last_draw_at DESC)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    #[instrument(level = "debug", skip(self))]
    async fn load(&self, user_id: u64) -> Result<Option<UserFortuneProfile>, StoreError> {
        let row = sqlx::query("SELECT doc FROM fortune_profiles WHERE user_id = $1")
            .bind(user_id as i64)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let doc: serde_json::Value = row.try_get("doc")?;
                Ok(Some(serde_json::from_value(doc)?))
            }
            None => Ok(None),
        }
    }

    #[instrument(level = "debug", skip(self, profile), fields(user_id = profile.user_id))]
    async fn save(&self, profile: &UserFortuneProfile) -> Result<(), StoreError> {
        let doc = serde_json::to_value(profile)?;
        sqlx::query(
            r#"
            INSERT INTO fortune_profiles (user_id, doc, created_at, last_draw_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET doc = EXCLUDED.doc, last_draw_at = EXCLUDED.last_draw_at
            "#,
        )
        .bind(profile.user_id as i64)
        .bind(doc)
        .bind(profile.created_at)
        .bind(profile.last_draw_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
