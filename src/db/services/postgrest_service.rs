use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{CreatorStore, StoreError};
use crate::db::entities::creator::{CreatorId, Draft, Model};
use crate::version::user_agent;

/// PostgREST error code for a `.single()` lookup that matched zero or many rows.
const SINGLE_ROW_VIOLATION: &str = "PGRST116";

/// Talks to a Supabase project's REST endpoint for one table.
#[derive(Clone, Debug)]
pub struct PostgrestStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl PostgrestStore {
    /// `base_url` is the project URL (e.g. `https://xyz.supabase.co`).
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Result<Self, StoreError> {
        let client = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self::with_client(client, base_url, api_key, table))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: &str, table: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select(&self, query: &[(&str, String)]) -> Result<Vec<Model>, StoreError> {
        let response = self.request(Method::GET).query(query).send().await?;
        decode(check(response).await?).await
    }
}

fn id_filter(id: CreatorId) -> (&'static str, String) {
    ("id", format!("eq.{id}"))
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    let parsed = serde_json::from_str::<PostgrestErrorBody>(&body).ok();
    let code = parsed.as_ref().and_then(|p| p.code.clone());
    let message = parsed
        .and_then(|p| p.message)
        .unwrap_or_else(|| body.clone());

    if code.as_deref() == Some(SINGLE_ROW_VIOLATION) {
        return Err(StoreError::NotFound(message));
    }
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Total from a `Content-Range` header such as `0-2/42` or `*/42`.
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[async_trait]
impl CreatorStore for PostgrestStore {
    async fn list_all(&self) -> Result<Vec<Model>, StoreError> {
        self.select(&[
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ])
        .await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Model>, StoreError> {
        self.select(&[
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ])
        .await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let response = self
            .request(Method::HEAD)
            .query(&[("select", "*")])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = check(response).await?;
        let range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Decode("missing Content-Range header".to_string()))?;
        parse_content_range_total(range)
            .ok_or_else(|| StoreError::Decode(format!("unusable Content-Range: {range}")))
    }

    async fn get_by_id(&self, id: CreatorId) -> Result<Model, StoreError> {
        let mut rows = self
            .select(&[("select", "*".to_string()), id_filter(id)])
            .await?;
        if rows.len() != 1 {
            debug!(creator_id = id, matched = rows.len(), "Lookup did not match exactly one row.");
            return Err(StoreError::NotFound(format!("Creator with id {id} not found")));
        }
        Ok(rows.remove(0))
    }

    async fn insert(&self, draft: &Draft) -> Result<Model, StoreError> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[draft])
            .send()
            .await?;
        let rows: Vec<Model> = decode(check(response).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    async fn update_by_id(&self, id: CreatorId, draft: &Draft) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH)
            .query(&[id_filter(id)])
            .header("Prefer", "return=representation")
            .json(draft)
            .send()
            .await?;
        let rows: Vec<Model> = decode(check(response).await?).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(format!("Creator with id {id} not found")));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: CreatorId) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE)
            .query(&[id_filter(id)])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
