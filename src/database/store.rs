//! The read/write contract every profile store implements.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::UserFortuneProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("profile document (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Document-per-user persistence. `save` must be an upsert: the whole profile
/// document replaces whatever was stored for that user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load(&self, user_id: u64) -> Result<Option<UserFortuneProfile>, StoreError>;
    async fn save(&self, profile: &UserFortuneProfile) -> Result<(), StoreError>;
}
