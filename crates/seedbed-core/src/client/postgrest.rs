use super::StoreClient;
use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::model::{ColumnSpec, SeedRecord};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

/// Client for Supabase-hosted PostgREST endpoints.
///
/// Every request carries the access key twice, as `apikey` and as a bearer
/// token; that is what the hosted API expects for anon and service keys.
pub struct PostgrestClient {
    base: String,
    key: String,
    client: reqwest::Client,
}

impl PostgrestClient {
    pub fn new(cfg: &StoreConfig) -> Self {
        Self {
            base: format!("{}/rest/v1", cfg.url),
            key: cfg.key.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base, table)
    }

    fn rpc_url(&self, procedure: &str) -> String {
        format!("{}/rpc/{}", self.base, procedure)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
    }
}

#[async_trait]
impl StoreClient for PostgrestClient {
    async fn probe_head(&self, table: &str) -> Result<Option<u64>, StoreError> {
        // GET rather than HEAD: on a miss the JSON error body is what lets
        // us tell "table missing" apart from every other failure.
        let url = format!("{}?select=*&limit=0", self.table_url(table));
        let resp = self
            .request(Method::GET, &url)
            .header("Prefer", "count=exact")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(read_error(resp).await);
        }

        let count = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);
        Ok(count)
    }

    async fn invoke_procedure(&self, name: &str) -> Result<(), StoreError> {
        let resp = self
            .request(Method::POST, &self.rpc_url(name))
            .json(&json!({}))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(read_error(resp).await)
        }
    }

    async fn create_table(&self, table: &str, columns: &[ColumnSpec]) -> Result<(), StoreError> {
        let sql = crate::ddl::create_table_sql(table, columns);
        let resp = self
            .request(Method::POST, &self.rpc_url("exec_sql"))
            .json(&json!({ "query": sql }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(read_error(resp).await)
        }
    }

    async fn insert(&self, table: &str, records: &[SeedRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let resp = self
            .request(Method::POST, &self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(records)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(read_error(resp).await)
        }
    }

    async fn fetch_sample(
        &self,
        table: &str,
        limit: usize,
    ) -> Result<Vec<SeedRecord>, StoreError> {
        let url = format!("{}?select=*&limit={}", self.table_url(table), limit);
        let resp = self.request(Method::GET, &url).send().await?;

        if !resp.status().is_success() {
            return Err(read_error(resp).await);
        }
        let rows: Vec<SeedRecord> = resp.json().await?;
        Ok(rows)
    }

    fn backend_name(&self) -> &'static str {
        "postgrest"
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        let mut err = StoreError::message(format!("transport error: {e}"));
        if let Some(status) = e.status() {
            err.http_status = Some(status.as_u16());
        }
        err
    }
}

/// Shape of a PostgREST error body. Every field is optional in practice.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

async fn read_error(resp: reqwest::Response) -> StoreError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    classify_body(status, &body)
}

/// Turns a non-2xx response into a classified error. Bodies that are not
/// the expected JSON shape degrade to a plain message with the HTTP status.
fn classify_body(status: u16, body: &str) -> StoreError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if parsed.code.is_some() || parsed.message.is_some() {
            return StoreError {
                code: parsed.code,
                message: parsed
                    .message
                    .unwrap_or_else(|| format!("HTTP {status}")),
                details: parsed.details,
                hint: parsed.hint,
                http_status: Some(status),
            };
        }
    }

    let snippet = body.trim();
    let message = if snippet.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {}", snippet.chars().take(200).collect::<String>())
    };
    StoreError::message(message).with_status(status)
}

/// Extracts the total from a `Content-Range` value such as `*/0` or `0-4/5`.
fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.parse().ok()
}
