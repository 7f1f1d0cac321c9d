//! Form workflows for creating and editing a creator.
//!
//! Each workflow is a single enum. A transition consumes the current state
//! and returns the next one, and a transition that does not apply to the
//! current state hands it back untouched.

use serde::{Deserialize, Serialize};

pub mod add;
pub mod edit;

pub use add::AddFlow;
pub use edit::EditFlow;

pub const ADDED: &str = "Creator added successfully!";
pub const ADD_FAILED: &str = "Error adding creator. Please try again.";
pub const UPDATED: &str = "Creator updated successfully!";
pub const UPDATE_FAILED: &str = "Error updating creator. Please try again.";
pub const DELETED: &str = "Creator deleted successfully!";
pub const DELETE_FAILED: &str = "Error deleting creator. Please try again.";
pub const LOAD_NOT_FOUND: &str = "Creator not found";
pub const LOAD_FAILED: &str = "Error loading creator";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message the user must see, in the order it was raised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
