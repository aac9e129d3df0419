use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::filter::Filter;

/// Errors surfaced by the Record Store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("record store returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode record store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Every Record Store response wraps its payload in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Query options for item listings.
#[derive(Debug, Clone, Default)]
pub struct ItemsQuery {
    fields: Vec<String>,
    filter: Option<Value>,
    sort: Vec<String>,
    limit: Option<i64>,
    page: Option<u64>,
}

impl ItemsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        if !filter.is_empty() {
            self.filter = Some(filter.build());
        }
        self
    }

    /// Sort keys in store syntax; a leading `-` means descending.
    pub fn sort(mut self, keys: &[&str]) -> Self {
        self.sort = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// `-1` asks the store for the whole result set.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter".to_string(), filter.to_string()));
        }
        if !self.sort.is_empty() {
            params.push(("sort".to_string(), self.sort.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        params
    }
}

/// Server-side aggregation request.
#[derive(Debug, Clone, Default)]
pub struct AggregateSpec {
    count_all: bool,
    count_distinct: Option<String>,
    sum: Vec<String>,
    group_by: Vec<String>,
}

impl AggregateSpec {
    pub fn count() -> Self {
        Self {
            count_all: true,
            ..Self::default()
        }
    }

    pub fn count_distinct(field: &str) -> Self {
        Self {
            count_distinct: Some(field.to_string()),
            ..Self::default()
        }
    }

    pub fn sum(mut self, fields: &[&str]) -> Self {
        self.sum = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn group_by(mut self, fields: &[&str]) -> Self {
        self.group_by = fields.iter().map(|f| f.to_string()).collect();
        self
    }
}

/// HTTP client for the Record Store REST API.
///
/// This consumes the external service as-is; collection semantics
/// (soft-delete flags, relation expansion) stay with the callers.
pub struct DirectusClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl DirectusClient {
    pub fn new(base_url: &str, token: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn read_body(response: reqwest::Response) -> Result<String, StoreError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            tracing::error!("Record store request failed with {}: {}", status, body);
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<T, StoreError> {
        let auth = match bearer {
            Some(token) => format!("Bearer {}", token),
            None => self.bearer(),
        };
        let response = self
            .http
            .get(self.url(path))
            .header("Authorization", auth)
            .query(params)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }

    pub async fn list_items<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &ItemsQuery,
    ) -> Result<Vec<T>, StoreError> {
        self.get_data(&format!("/items/{}", collection), &query.to_params(), None)
            .await
    }

    pub async fn get_item<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: i64,
        fields: &[&str],
    ) -> Result<T, StoreError> {
        let params = vec![("fields".to_string(), fields.join(","))];
        self.get_data(&format!("/items/{}/{}", collection, id), &params, None)
            .await
    }

    pub async fn create_item(
        &self,
        collection: &str,
        payload: &impl Serialize,
    ) -> Result<Value, StoreError> {
        let response = self
            .http
            .post(self.url(&format!("/items/{}", collection)))
            .header("Authorization", self.bearer())
            .json(payload)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        let envelope: Envelope<Value> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }

    pub async fn update_item(
        &self,
        collection: &str,
        id: i64,
        payload: &impl Serialize,
    ) -> Result<(), StoreError> {
        let response = self
            .http
            .patch(self.url(&format!("/items/{}/{}", collection, id)))
            .header("Authorization", self.bearer())
            .json(payload)
            .send()
            .await?;
        Self::read_body(response).await?;
        Ok(())
    }

    /// Batch update: `{"keys": [...], "data": {...}}`.
    pub async fn update_items(
        &self,
        collection: &str,
        keys: &[Value],
        data: &impl Serialize,
    ) -> Result<(), StoreError> {
        let body = serde_json::json!({ "keys": keys, "data": data });
        let response = self
            .http
            .patch(self.url(&format!("/items/{}", collection)))
            .header("Authorization", self.bearer())
            .json(&body)
            .send()
            .await?;
        Self::read_body(response).await?;
        Ok(())
    }

    /// Aggregation endpoint. Bracketed parameter names are composed by
    /// hand, so values are percent-encoded explicitly.
    pub async fn aggregate(
        &self,
        collection: &str,
        spec: &AggregateSpec,
        filter: Filter,
    ) -> Result<Vec<Value>, StoreError> {
        let mut parts: Vec<String> = Vec::new();
        if spec.count_all {
            parts.push("aggregate[count]=*".to_string());
        }
        if let Some(field) = &spec.count_distinct {
            parts.push(format!(
                "aggregate[countDistinct]={}",
                urlencoding::encode(field)
            ));
        }
        if !spec.sum.is_empty() {
            parts.push(format!(
                "aggregate[sum]={}",
                urlencoding::encode(&spec.sum.join(","))
            ));
        }
        if !spec.group_by.is_empty() {
            parts.push(format!(
                "groupBy={}",
                urlencoding::encode(&spec.group_by.join(","))
            ));
        }
        if !filter.is_empty() {
            parts.push(format!(
                "filter={}",
                urlencoding::encode(&filter.build().to_string())
            ));
        }
        let path = format!("/items/{}?{}", collection, parts.join("&"));
        self.get_data(&path, &[], None).await
    }

    /// Option choices of an enumerated field, from the field metadata.
    pub async fn field_meta(&self, collection: &str, field: &str) -> Result<Value, StoreError> {
        self.get_data(&format!("/fields/{}/{}", collection, field), &[], None)
            .await
    }

    pub async fn list_users<T: DeserializeOwned>(
        &self,
        query: &ItemsQuery,
    ) -> Result<Vec<T>, StoreError> {
        self.get_data("/users", &query.to_params(), None).await
    }

    pub async fn create_user(&self, payload: &impl Serialize) -> Result<Value, StoreError> {
        let response = self
            .http
            .post(self.url("/users"))
            .header("Authorization", self.bearer())
            .json(payload)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        let envelope: Envelope<Value> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }

    pub async fn update_user(
        &self,
        id: &str,
        payload: &impl Serialize,
    ) -> Result<(), StoreError> {
        let response = self
            .http
            .patch(self.url(&format!("/users/{}", id)))
            .header("Authorization", self.bearer())
            .json(payload)
            .send()
            .await?;
        Self::read_body(response).await?;
        Ok(())
    }

    pub async fn list_roles<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
        self.get_data("/roles", &[], None).await
    }

    /// Identity Provider login; tokens are passed through to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, StoreError> {
        let body = serde_json::json!({ "email": email, "password": password, "mode": "json" });
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;
        let text = Self::read_body(response).await?;
        let envelope: Envelope<Value> = serde_json::from_str(&text)?;
        Ok(envelope.data)
    }

    /// `/users/me` with the caller's own bearer token.
    pub async fn me(&self, bearer: &str, fields: &[&str]) -> Result<Value, StoreError> {
        let params = vec![("fields".to_string(), fields.join(","))];
        self.get_data("/users/me", &params, Some(bearer)).await
    }
}
