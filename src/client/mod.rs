use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config;
use crate::error::ClientError;
use crate::types::{EmployeeRecord, LoginPayload, StoreRecord};

/// Directory lookups used by the store-label resolver.
///
/// A seam between the resolver and the HTTP client so resolution order can be
/// tested against stub directories.
#[async_trait]
pub trait DirectoryLookup {
    async fn store_by_id(&self, id: i64, token: &str) -> Result<StoreRecord, ClientError>;
    async fn employee_by_id(&self, id: i64, token: &str) -> Result<EmployeeRecord, ClientError>;
}

/// Stateless HTTP client for the retail-management API.
///
/// The caller supplies the token on each authenticated call; the client
/// attaches it as a Bearer header. Each call is fire-once: no retry, no
/// queuing, no backoff, and no request timeout is configured.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::config().api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticate with email and password.
    ///
    /// A response missing `token` or `user` fails even on HTTP success; the
    /// session is left untouched by the caller in that case.
    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginPayload, ClientError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = json!({ "email": email, "senha": senha });

        tracing::debug!(%email, "issuing login request");

        let response = self.http.post(&url).json(&body).send().await?;
        let value = Self::read_json(response).await?;
        LoginPayload::from_response(&value)
    }

    async fn get_json(&self, path: &str, token: &str) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).bearer_auth(token).send().await?;
        Self::read_json(response).await
    }

    /// Decode a response body, surfacing the server's `{error|message}`
    /// payload on non-success statuses.
    async fn read_json(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        if status.is_success() {
            let value = response
                .json::<Value>()
                .await
                .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
            return Ok(value);
        }

        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Err(ClientError::from_status(status.as_u16(), &body))
    }

    fn decode_record<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
        // Lookup endpoints may wrap the record under `data`.
        let record = match value {
            Value::Object(ref map) if map.get("data").map_or(false, Value::is_object) => {
                map.get("data").cloned().unwrap_or(Value::Null)
            }
            other => other,
        };
        serde_json::from_value(record).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl DirectoryLookup for ApiClient {
    async fn store_by_id(&self, id: i64, token: &str) -> Result<StoreRecord, ClientError> {
        let value = self.get_json(&format!("/lojas/{}", id), token).await?;
        Self::decode_record(value)
    }

    async fn employee_by_id(&self, id: i64, token: &str) -> Result<EmployeeRecord, ClientError> {
        let value = self.get_json(&format!("/funcionarios/{}", id), token).await?;
        Self::decode_record(value)
    }
}
