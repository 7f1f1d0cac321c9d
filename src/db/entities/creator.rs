use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Primary key of the `creators` table (`int8`, server-assigned).
pub type CreatorId = i64;

/// Image sizes used by the different surfaces that show a creator.
pub const CARD_IMAGE_SIZE: u32 = 100;
pub const RECENT_IMAGE_SIZE: u32 = 48;
pub const DETAIL_IMAGE_SIZE: u32 = 192;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: CreatorId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "imageURL", default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// The four user-editable columns. Inserts and updates always send all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
}

impl Model {
    pub fn to_draft(&self) -> Draft {
        Draft {
            name: self.name.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// The stored image, or a generated placeholder when none was given.
    pub fn image_src(&self, size: u32) -> String {
        if self.image_url.is_empty() {
            placeholder_image(&self.name, size)
        } else {
            self.image_url.clone()
        }
    }
}

/// Square placeholder keyed by the first character of `name` (`?` when empty).
pub fn placeholder_image(name: &str, size: u32) -> String {
    let initial = name
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_else(|| "?".to_string());
    format!(
        "https://via.placeholder.com/{size}x{size}/6366f1/ffffff?text={}",
        urlencoding::encode(&initial)
    )
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
