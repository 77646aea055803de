//! In-process [`ProfileStore`] for development mode and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::notification::RecipientRecord;
use crate::ports::{PortError, ProfileStore};

/// Profiles kept in a map keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    records: RwLock<HashMap<String, RecipientRecord>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a JSON object mapping user ids to records, e.g.
    /// `{"alice": {"fcmToken": "..."}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: HashMap<String, RecipientRecord> = serde_json::from_str(json)?;
        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Insert or replace the record for `user_id`.
    pub async fn insert(&self, user_id: impl Into<String>, record: RecipientRecord) {
        self.records.write().await.insert(user_id.into(), record);
    }

    /// Remove the record for `user_id`, returning it if present.
    pub async fn remove(&self, user_id: &str) -> Option<RecipientRecord> {
        self.records.write().await.remove(user_id)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_recipient(
        &self,
        receiver_id: &str,
    ) -> Result<Option<RecipientRecord>, PortError> {
        Ok(self.records.read().await.get(receiver_id).cloned())
    }
}
