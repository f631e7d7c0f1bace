use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{PreferenceStore, SubgroupMode};
use crate::core::AppResult;

/// Process-local preference store, used by `preview` runs and tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    modes: RwLock<HashMap<i64, SubgroupMode>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, user_id: i64) -> SubgroupMode {
        self.modes.read().await.get(&user_id).copied().unwrap_or_default()
    }

    async fn set(&self, user_id: i64, mode: SubgroupMode) -> AppResult<()> {
        self.modes.write().await.insert(user_id, mode);
        Ok(())
    }
}
