//! Azure Cosmos DB (SQL API) document store over the REST interface
//!
//! Requests are authorized with the account master key: each request carries
//! an HMAC-SHA256 signature over verb, resource type, resource link and date.
//! The collection must be partitioned on `/id`.

use crate::traits::{CreateOutcome, DescriptionStore, Lookup, StoreError, StoreResult};
use altscribe_core::DescriptionRecord;
use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Method, StatusCode};
use sha2::Sha256;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

const API_VERSION: &str = "2018-12-31";
const RESOURCE_TYPE: &str = "docs";

pub struct CosmosDescriptionStore {
    http_client: reqwest::Client,
    endpoint: String,
    key: Vec<u8>,
    database: String,
    container: String,
}

impl Debug for CosmosDescriptionStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CosmosDescriptionStore")
            .field("endpoint", &self.endpoint)
            .field("database", &self.database)
            .field("container", &self.container)
            .finish()
    }
}

impl CosmosDescriptionStore {
    /// # Arguments
    /// * `endpoint` - Account URI (e.g., "https://descriptions.documents.azure.com:443/")
    /// * `master_key` - Base64 primary or secondary key
    /// * `database` / `container` - Names of the database and the partitioned collection
    pub fn new(
        endpoint: &str,
        master_key: &str,
        database: String,
        container: String,
    ) -> StoreResult<Self> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(master_key.trim())
            .map_err(|e| StoreError::ConfigError(format!("ACCOUNT_KEY is not valid base64: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key,
            database,
            container,
        })
    }

    fn collection_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    /// `authorization` header value for one request.
    fn auth_token(&self, method: &Method, resource_link: &str, date: &str) -> StoreResult<String> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            method.as_str().to_lowercase(),
            RESOURCE_TYPE,
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| StoreError::ConfigError(format!("Invalid ACCOUNT_KEY for HMAC: {}", e)))?;
        mac.update(payload.as_bytes());
        let signature =
            base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={}", signature)).into_owned())
    }

    fn request(
        &self,
        method: Method,
        url: String,
        resource_link: &str,
        partition_key: &str,
    ) -> StoreResult<reqwest::RequestBuilder> {
        let date = rfc1123_now();
        let partition_header = serde_json::to_string(&[partition_key])?;
        let authorization = self.auth_token(&method, resource_link, &date)?;

        Ok(self
            .http_client
            .request(method.clone(), url)
            .header("authorization", authorization)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-documentdb-partitionkey", partition_header))
    }
}

fn rfc1123_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

async fn error_from_response(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    StoreError::Http { status, body }
}

#[async_trait]
impl DescriptionStore for CosmosDescriptionStore {
    async fn point_read(&self, id: &str) -> StoreResult<Lookup> {
        let resource_link = format!("{}/docs/{}", self.collection_link(), id);
        let url = format!(
            "{}/{}/docs/{}",
            self.endpoint,
            self.collection_link(),
            urlencoding::encode(id)
        );
        let start = std::time::Instant::now();

        let response = self
            .request(Method::GET, url, &resource_link, id)?
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let record: DescriptionRecord = response
                    .json()
                    .await
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                tracing::debug!(
                    id = %id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Cosmos DB point read found document"
                );
                Ok(Lookup::Found(record))
            }
            StatusCode::NOT_FOUND => Ok(Lookup::NotFound),
            _ => Err(error_from_response(response).await),
        }
    }

    async fn create_item(&self, record: &DescriptionRecord) -> StoreResult<CreateOutcome> {
        let resource_link = self.collection_link();
        let url = format!("{}/{}/docs", self.endpoint, resource_link);
        let start = std::time::Instant::now();

        let response = self
            .request(Method::POST, url, &resource_link, &record.id)?
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                tracing::info!(
                    id = %record.id,
                    database = %self.database,
                    container = %self.container,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Cosmos DB document created"
                );
                Ok(CreateOutcome::Created)
            }
            StatusCode::CONFLICT => Ok(CreateOutcome::Conflict),
            _ => Err(error_from_response(response).await),
        }
    }

    fn backend_name(&self) -> &'static str {
        "cosmos"
    }
}
