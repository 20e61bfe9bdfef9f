//! In-memory profile store for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::store::{ProfileStore, StoreError};
use crate::model::UserFortuneProfile;

/// Clones share the same underlying map, so a test can keep a handle to the
/// store it hands the service.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<u64, UserFortuneProfile>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles (test helper).
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn load(&self, user_id: u64) -> Result<Option<UserFortuneProfile>, StoreError> {
        Ok(self.inner.read().await.get(&user_id).cloned())
    }

    async fn save(&self, profile: &UserFortuneProfile) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .insert(profile.user_id, profile.clone());
        Ok(())
    }
}
