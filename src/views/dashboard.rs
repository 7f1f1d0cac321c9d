use tracing::error;

use crate::db::entities::creator::Model;
use crate::db::services::CreatorStore;

pub const RECENT_LIMIT: usize = 3;

/// Home page summary. Both reads are issued together and each one falls back
/// to its default on its own, so one failure never hides the other result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardView {
    pub total: u64,
    pub recent: Vec<Model>,
    pub count_failed: bool,
    pub recent_failed: bool,
}

impl DashboardView {
    pub async fn load(store: &dyn CreatorStore) -> Self {
        let (count, recent) = tokio::join!(store.count(), store.list_recent(RECENT_LIMIT));

        let mut view = Self::default();
        match count {
            Ok(total) => view.total = total,
            Err(e) => {
                error!(error = %e, "Error loading creator count.");
                view.count_failed = true;
            }
        }
        match recent {
            Ok(mut recent) => {
                recent.truncate(RECENT_LIMIT);
                view.recent = recent;
            }
            Err(e) => {
                error!(error = %e, "Error loading recent creators.");
                view.recent_failed = true;
            }
        }
        view
    }
}
