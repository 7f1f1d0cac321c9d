use async_trait::async_trait;
use thiserror::Error;

use crate::db::entities::creator::{CreatorId, Draft, Model};

pub mod memory_service;
pub mod postgrest_service;

pub use memory_service::MemoryStore;
pub use postgrest_service::PostgrestStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Store returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Failed to decode store response: {0}")]
    Decode(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// The remote `creators` table.
///
/// Every page issues its own calls through this trait; there is no shared
/// cache between pages, so each call reflects the store at that moment.
#[async_trait]
pub trait CreatorStore: Send + Sync {
    /// All rows, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Model>, StoreError>;

    /// The `limit` newest rows, in the same order as [`CreatorStore::list_all`].
    async fn list_recent(&self, limit: usize) -> Result<Vec<Model>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;

    /// Exactly one row must match, anything else is `NotFound`.
    async fn get_by_id(&self, id: CreatorId) -> Result<Model, StoreError>;

    async fn insert(&self, draft: &Draft) -> Result<Model, StoreError>;

    /// Rewrites all four editable columns in one request.
    async fn update_by_id(&self, id: CreatorId, draft: &Draft) -> Result<(), StoreError>;

    /// Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: CreatorId) -> Result<(), StoreError>;
}
