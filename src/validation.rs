//! Field rules shared by the add and edit forms.
//!
//! [`validate`] is pure: it never touches the store or any page state, so it
//! can run before a submission is even attempted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::db::entities::creator::Draft;

pub const NAME_REQUIRED: &str = "Name is required";
pub const URL_REQUIRED: &str = "URL is required";
pub const URL_SCHEME: &str = "URL must start with http:// or https://";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

/// A form field, ordered the way the form lays them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "imageURL")]
    ImageUrl,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Url, Field::Description, Field::ImageUrl];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Url => "url",
            Field::Description => "description",
            Field::ImageUrl => "imageURL",
        }
    }

    pub fn value(self, draft: &Draft) -> &str {
        match self {
            Field::Name => &draft.name,
            Field::Url => &draft.url,
            Field::Description => &draft.description,
            Field::ImageUrl => &draft.image_url,
        }
    }

    pub fn value_mut(self, draft: &mut Draft) -> &mut String {
        match self {
            Field::Name => &mut draft.name,
            Field::Url => &mut draft.url,
            Field::Description => &mut draft.description,
            Field::ImageUrl => &mut draft.image_url,
        }
    }
}

/// Failing fields and their messages. Passing fields have no entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    // Blank is reported as missing; the scheme check looks at the raw value.
    if draft.url.trim().is_empty() {
        errors.insert(Field::Url, URL_REQUIRED);
    } else if !draft.url.starts_with("http://") && !draft.url.starts_with("https://") {
        errors.insert(Field::Url, URL_SCHEME);
    }

    if draft.description.trim().is_empty() {
        errors.insert(Field::Description, DESCRIPTION_REQUIRED);
    }

    errors
}

pub fn is_valid(draft: &Draft) -> bool {
    validate(draft).is_empty()
}
