use tracing::error;

use crate::db::entities::creator::Model;
use crate::db::services::CreatorStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Empty,
    Loaded(Vec<Model>),
}

/// The "all creators" page.
///
/// A failed read renders exactly like an empty table. `load_failed` keeps the
/// two apart for callers that want to show the difference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListView {
    pub state: ListState,
    pub load_failed: bool,
}

impl ListView {
    pub async fn load(store: &dyn CreatorStore) -> Self {
        match store.list_all().await {
            Ok(creators) if creators.is_empty() => Self {
                state: ListState::Empty,
                load_failed: false,
            },
            Ok(creators) => Self {
                state: ListState::Loaded(creators),
                load_failed: false,
            },
            Err(e) => {
                error!(error = %e, "Error loading creators.");
                Self {
                    state: ListState::Empty,
                    load_failed: true,
                }
            }
        }
    }

    pub fn creators(&self) -> &[Model] {
        match &self.state {
            ListState::Loaded(creators) => creators.as_slice(),
            ListState::Loading | ListState::Empty => &[],
        }
    }
}
