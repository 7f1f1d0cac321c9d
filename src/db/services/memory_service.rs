use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::{CreatorStore, StoreError};
use crate::db::entities::creator::{CreatorId, Draft, Model};

/// In-process `creators` table used by tests and the `--in-memory` mode.
///
/// Ids are sequential from 1 and `created_at` is strictly increasing, so
/// insertion order and timestamp order always agree.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    // Kept in insertion order.
    rows: Vec<Model>,
    last_id: CreatorId,
    last_created_at: Option<DateTime<Utc>>,
}

impl Table {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(ts);
        ts
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CreatorStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Model>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().rev().cloned().collect())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Model>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().rev().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.table.read().await.rows.len() as u64)
    }

    async fn get_by_id(&self, id: CreatorId) -> Result<Model, StoreError> {
        let table = self.table.read().await;
        table
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Creator with id {id} not found")))
    }

    async fn insert(&self, draft: &Draft) -> Result<Model, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let created_at = table.next_timestamp();
        let model = Model {
            id: table.last_id,
            name: draft.name.clone(),
            url: draft.url.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            created_at,
        };
        table.rows.push(model.clone());
        Ok(model)
    }

    async fn update_by_id(&self, id: CreatorId, draft: &Draft) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Creator with id {id} not found")))?;
        row.name = draft.name.clone();
        row.url = draft.url.clone();
        row.description = draft.description.clone();
        row.image_url = draft.image_url.clone();
        Ok(())
    }

    async fn delete_by_id(&self, id: CreatorId) -> Result<(), StoreError> {
        self.table.write().await.rows.retain(|row| row.id != id);
        Ok(())
    }
}
