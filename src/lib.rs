pub mod db;
pub mod flows;
pub mod server;
pub mod validation;
pub mod version;
pub mod views;
pub mod web;

pub use db::entities::creator::{CreatorId, Draft as CreatorDraft, Model as Creator};
pub use db::services::{CreatorStore, MemoryStore, PostgrestStore, StoreError};
pub use validation::{validate, Field, FieldErrors};
