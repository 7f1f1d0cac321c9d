pub mod config;

use std::sync::Arc;

use crate::db::services::{CreatorStore, MemoryStore, PostgrestStore, StoreError};
use crate::server::config::{ServerConfig, StoreKind};

/// Builds the store the configuration asks for.
pub fn build_store(config: &ServerConfig) -> Result<Arc<dyn CreatorStore>, StoreError> {
    match &config.store {
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreKind::Supabase { url, anon_key } => Ok(Arc::new(PostgrestStore::new(
            url,
            anon_key,
            &config.creators_table,
        )?)),
    }
}
