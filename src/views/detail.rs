use tracing::error;

use crate::db::entities::creator::Model;
use crate::db::services::CreatorStore;
use crate::views::nav::parse_id;

/// Why a detail lookup produced nothing. Both render as "Creator Not Found".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingReason {
    Missing,
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailView {
    Loading,
    NotFound { reason: MissingReason },
    Found(Model),
}

impl DetailView {
    /// Looks up `raw_id` as taken from the URL. Ids the store could never
    /// hold are reported as missing without a round trip.
    pub async fn load(store: &dyn CreatorStore, raw_id: &str) -> Self {
        let Some(id) = parse_id(raw_id) else {
            return DetailView::NotFound {
                reason: MissingReason::Missing,
            };
        };

        match store.get_by_id(id).await {
            Ok(creator) => DetailView::Found(creator),
            Err(e) => {
                error!(creator_id = id, error = %e, "Error loading creator.");
                let reason = if e.is_not_found() {
                    MissingReason::Missing
                } else {
                    MissingReason::Unavailable
                };
                DetailView::NotFound { reason }
            }
        }
    }
}
