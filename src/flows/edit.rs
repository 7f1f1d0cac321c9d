use tracing::{error, info};

use super::{
    Notice, DELETED, DELETE_FAILED, LOAD_FAILED, LOAD_NOT_FOUND, UPDATED, UPDATE_FAILED,
};
use crate::db::entities::creator::{CreatorId, Draft, Model};
use crate::db::services::{CreatorStore, StoreError};
use crate::validation::{validate, Field, FieldErrors};
use crate::views::nav::parse_id;
use crate::views::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditFlow {
    Loading {
        id: CreatorId,
    },
    Editing {
        id: CreatorId,
        draft: Draft,
        errors: FieldErrors,
        notices: Vec<Notice>,
    },
    Saving {
        id: CreatorId,
        draft: Draft,
    },
    /// The "are you sure" dialog is open over the form.
    ConfirmDelete {
        id: CreatorId,
        draft: Draft,
        errors: FieldErrors,
    },
    Deleting {
        id: CreatorId,
        draft: Draft,
    },
    Redirected {
        to: Route,
        notices: Vec<Notice>,
    },
}

impl EditFlow {
    pub fn loading(id: CreatorId) -> Self {
        EditFlow::Loading { id }
    }

    /// Resumes editing from a draft the browser posted back.
    pub fn editing(id: CreatorId, draft: Draft) -> Self {
        EditFlow::Editing {
            id,
            draft,
            errors: FieldErrors::default(),
            notices: Vec::new(),
        }
    }

    /// Reopens the delete dialog from a draft the browser posted back.
    pub fn confirming(id: CreatorId, draft: Draft) -> Self {
        EditFlow::ConfirmDelete {
            id,
            draft,
            errors: FieldErrors::default(),
        }
    }

    /// Where a request for a record that cannot exist ends up.
    pub fn not_found() -> Self {
        EditFlow::Redirected {
            to: Route::List,
            notices: vec![Notice::error(LOAD_NOT_FOUND)],
        }
    }

    pub fn id(&self) -> Option<CreatorId> {
        match self {
            EditFlow::Loading { id }
            | EditFlow::Editing { id, .. }
            | EditFlow::Saving { id, .. }
            | EditFlow::ConfirmDelete { id, .. }
            | EditFlow::Deleting { id, .. } => Some(*id),
            EditFlow::Redirected { .. } => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditFlow::Editing { draft, .. }
            | EditFlow::Saving { draft, .. }
            | EditFlow::ConfirmDelete { draft, .. }
            | EditFlow::Deleting { draft, .. } => Some(draft),
            EditFlow::Loading { .. } | EditFlow::Redirected { .. } => None,
        }
    }

    /// A record that could not be loaded never gets a form; the user is
    /// sent back to the list instead.
    pub fn loaded(self, result: Result<Model, StoreError>) -> Self {
        match self {
            EditFlow::Loading { id } => match result {
                Ok(creator) => EditFlow::editing(id, creator.to_draft()),
                Err(e) => {
                    error!(creator_id = id, error = %e, "Error loading creator for edit.");
                    let message = if e.is_not_found() {
                        LOAD_NOT_FOUND
                    } else {
                        LOAD_FAILED
                    };
                    EditFlow::Redirected {
                        to: Route::List,
                        notices: vec![Notice::error(message)],
                    }
                }
            },
            other => other,
        }
    }

    pub async fn load(store: &dyn CreatorStore, id: CreatorId) -> Self {
        let result = store.get_by_id(id).await;
        EditFlow::loading(id).loaded(result)
    }

    /// Like [`EditFlow::load`] but starting from the raw URL segment.
    pub async fn load_path(store: &dyn CreatorStore, raw_id: &str) -> Self {
        match parse_id(raw_id) {
            Some(id) => Self::load(store, id).await,
            None => EditFlow::not_found(),
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if let EditFlow::Editing { draft, errors, .. } = self {
            *field.value_mut(draft) = value.into();
            errors.clear(field);
        }
    }

    pub fn begin_save(self) -> Self {
        match self {
            EditFlow::Editing { id, draft, .. } => {
                let errors = validate(&draft);
                if errors.is_empty() {
                    EditFlow::Saving { id, draft }
                } else {
                    EditFlow::Editing {
                        id,
                        draft,
                        errors,
                        notices: Vec::new(),
                    }
                }
            }
            other => other,
        }
    }

    pub fn saved(self, result: Result<(), StoreError>) -> Self {
        match self {
            EditFlow::Saving { id, draft } => match result {
                Ok(()) => {
                    info!(creator_id = id, "Creator updated.");
                    EditFlow::Redirected {
                        to: Route::Detail(id),
                        notices: vec![Notice::success(UPDATED)],
                    }
                }
                Err(e) => {
                    error!(creator_id = id, error = %e, "Error updating creator.");
                    EditFlow::Editing {
                        id,
                        draft,
                        errors: FieldErrors::default(),
                        notices: vec![Notice::error(UPDATE_FAILED)],
                    }
                }
            },
            other => other,
        }
    }

    /// Validates and sends all four fields, changed or not.
    pub async fn save(self, store: &dyn CreatorStore) -> Self {
        let flow = self.begin_save();
        if let EditFlow::Saving { id, draft } = &flow {
            let result = store.update_by_id(*id, draft).await;
            return flow.saved(result);
        }
        flow
    }

    pub fn request_delete(self) -> Self {
        match self {
            EditFlow::Editing {
                id, draft, errors, ..
            } => EditFlow::ConfirmDelete { id, draft, errors },
            other => other,
        }
    }

    pub fn cancel_delete(self) -> Self {
        match self {
            EditFlow::ConfirmDelete { id, draft, errors } => EditFlow::Editing {
                id,
                draft,
                errors,
                notices: Vec::new(),
            },
            other => other,
        }
    }

    pub fn begin_delete(self) -> Self {
        match self {
            EditFlow::ConfirmDelete { id, draft, .. } => EditFlow::Deleting { id, draft },
            other => other,
        }
    }

    /// Always ends on the list with a "deleted" notice. A failed delete adds
    /// its own error notice first, so both are shown in that order.
    pub fn deleted(self, result: Result<(), StoreError>) -> Self {
        match self {
            EditFlow::Deleting { id, .. } => {
                let mut notices = Vec::with_capacity(2);
                match result {
                    Ok(()) => info!(creator_id = id, "Creator deleted."),
                    Err(e) => {
                        error!(creator_id = id, error = %e, "Error deleting creator.");
                        notices.push(Notice::error(DELETE_FAILED));
                    }
                }
                notices.push(Notice::success(DELETED));
                EditFlow::Redirected {
                    to: Route::List,
                    notices,
                }
            }
            other => other,
        }
    }

    pub async fn confirm_delete(self, store: &dyn CreatorStore) -> Self {
        let flow = self.begin_delete();
        if let EditFlow::Deleting { id, .. } = &flow {
            let result = store.delete_by_id(*id).await;
            return flow.deleted(result);
        }
        flow
    }

    /// Back to the detail page without saving.
    pub fn cancel(self) -> Self {
        match self {
            EditFlow::Editing { id, .. } | EditFlow::ConfirmDelete { id, .. } => {
                EditFlow::Redirected {
                    to: Route::Detail(id),
                    notices: Vec::new(),
                }
            }
            other => other,
        }
    }
}
