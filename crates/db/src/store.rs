//! [`ProfileStore`] backed by the `users` table.

use async_trait::async_trait;
use beacon_core::notification::RecipientRecord;
use beacon_core::ports::{PortError, ProfileStore};

use crate::repositories::RecipientRepo;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: DbPool,
}

impl PgProfileStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_recipient(
        &self,
        receiver_id: &str,
    ) -> Result<Option<RecipientRecord>, PortError> {
        let row = RecipientRepo::find_by_id(&self.pool, receiver_id).await?;
        Ok(row.map(RecipientRecord::from))
    }

    async fn ping(&self) -> Result<(), PortError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
