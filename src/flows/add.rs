use tracing::{error, info};

use super::{Notice, ADDED, ADD_FAILED};
use crate::db::entities::creator::{Draft, Model};
use crate::db::services::{CreatorStore, StoreError};
use crate::validation::{validate, Field, FieldErrors};
use crate::views::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddFlow {
    Editing {
        draft: Draft,
        errors: FieldErrors,
        notices: Vec<Notice>,
    },
    Submitting {
        draft: Draft,
    },
    Redirected {
        to: Route,
        notices: Vec<Notice>,
    },
}

impl Default for AddFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AddFlow {
    pub fn new() -> Self {
        Self::with_draft(Draft::default())
    }

    pub fn with_draft(draft: Draft) -> Self {
        AddFlow::Editing {
            draft,
            errors: FieldErrors::default(),
            notices: Vec::new(),
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            AddFlow::Editing { draft, .. } | AddFlow::Submitting { draft } => Some(draft),
            AddFlow::Redirected { .. } => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, AddFlow::Submitting { .. })
    }

    /// Typing into a field drops whatever error that field was showing.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if let AddFlow::Editing { draft, errors, .. } = self {
            *field.value_mut(draft) = value.into();
            errors.clear(field);
        }
    }

    /// Runs the field rules. An invalid draft stays in `Editing` with its
    /// errors and never reaches the store.
    pub fn begin_submit(self) -> Self {
        match self {
            AddFlow::Editing { draft, .. } => {
                let errors = validate(&draft);
                if errors.is_empty() {
                    AddFlow::Submitting { draft }
                } else {
                    AddFlow::Editing {
                        draft,
                        errors,
                        notices: Vec::new(),
                    }
                }
            }
            other => other,
        }
    }

    pub fn finish(self, result: Result<Model, StoreError>) -> Self {
        match self {
            AddFlow::Submitting { draft } => match result {
                Ok(created) => {
                    info!(creator_id = created.id, "Creator added.");
                    AddFlow::Redirected {
                        to: Route::List,
                        notices: vec![Notice::success(ADDED)],
                    }
                }
                Err(e) => {
                    error!(error = %e, "Error adding creator.");
                    AddFlow::Editing {
                        draft,
                        errors: FieldErrors::default(),
                        notices: vec![Notice::error(ADD_FAILED)],
                    }
                }
            },
            other => other,
        }
    }

    /// Validate, insert, and settle in one go.
    pub async fn submit(self, store: &dyn CreatorStore) -> Self {
        let flow = self.begin_submit();
        if let AddFlow::Submitting { draft } = &flow {
            let result = store.insert(draft).await;
            return flow.finish(result);
        }
        flow
    }

    /// Leaves for the list and drops the draft. Ignored while submitting.
    pub fn cancel(self) -> Self {
        match self {
            AddFlow::Submitting { .. } => self,
            _ => AddFlow::Redirected {
                to: Route::List,
                notices: Vec::new(),
            },
        }
    }
}
