//! Cosmos DB data-plane client (REST, master-key auth).
//!
//! Talks to a pre-provisioned container whose partition key path is
//! `/category`. Only the five operations the directory needs are implemented;
//! nothing here creates databases, containers, or indexes.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;

use super::r#trait::{DocumentStore, StoreError};
use crate::config::StoreConfig;
use crate::document::BookDocument;

const API_VERSION: &str = "2018-12-31";
const PARTITION_KEY_HEADER: &str = "x-ms-documentdb-partitionkey";
const CONTINUATION_HEADER: &str = "x-ms-continuation";

type HmacSha256 = Hmac<Sha256>;

/// Document store backed by an Azure Cosmos DB container.
pub struct CosmosDocumentStore {
    http: reqwest::Client,
    endpoint: String,
    key: Vec<u8>,
    collection_link: String,
}

impl CosmosDocumentStore {
    /// Build a client from connection settings.
    ///
    /// Decodes the base64 master key up front so a malformed credential fails
    /// at startup rather than on the first request.
    pub fn new(config: &StoreConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let key = STANDARD
            .decode(&config.key)
            .context("COSMOS_KEY is not valid base64")?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            key,
            collection_link: format!("dbs/{}/colls/{}", config.database, config.container),
        })
    }

    fn document_link(&self, id: &str) -> String {
        format!("{}/docs/{}", self.collection_link, id)
    }

    fn document_url(&self, id: &str) -> String {
        format!(
            "{}/{}/docs/{}",
            self.endpoint,
            self.collection_link,
            urlencoding::encode(id)
        )
    }

    fn collection_docs_url(&self) -> String {
        format!("{}/{}/docs", self.endpoint, self.collection_link)
    }

    /// Attach master-key auth headers for one request.
    fn signed(
        &self,
        builder: reqwest::RequestBuilder,
        verb: &str,
        resource_link: &str,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let token = auth_token(&self.key, verb, resource_link, &date)?;

        Ok(builder
            .header("authorization", token)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION))
    }

    async fn failure(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        StoreError::Request(format!("cosmos returned {status}: {body}"))
    }

    /// Run a query to completion, following continuation tokens.
    ///
    /// The store caps each response page; as long as a page comes back with
    /// an `x-ms-continuation` header, the query is re-issued with that token
    /// until the results are exhausted.
    async fn run_query(&self, body: serde_json::Value) -> Result<Vec<BookDocument>, StoreError> {
        let mut documents = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .signed(
                    self.http.post(self.collection_docs_url()),
                    "post",
                    &self.collection_link,
                )?
                .header("content-type", "application/query+json")
                .header("x-ms-documentdb-isquery", "true")
                .header("x-ms-documentdb-query-enablecrosspartition", "true")
                .body(body.to_string());

            if let Some(token) = continuation.as_deref() {
                request = request.header(CONTINUATION_HEADER, token);
            }

            let response = request.send().await.map_err(request_error)?;

            if !response.status().is_success() {
                return Err(Self::failure(response).await);
            }

            continuation = next_continuation(response.headers());

            let page: QueryResponse = response.json().await.map_err(request_error)?;
            documents.extend(page.documents);

            if continuation.is_none() {
                return Ok(documents);
            }
        }
    }
}

#[async_trait]
impl DocumentStore for CosmosDocumentStore {
    async fn insert(&self, doc: BookDocument) -> Result<BookDocument, StoreError> {
        let response = self
            .signed(
                self.http.post(self.collection_docs_url()),
                "post",
                &self.collection_link,
            )?
            .header(PARTITION_KEY_HEADER, partition_key_header(&doc.category))
            .json(&doc)
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            StatusCode::CONFLICT => Err(StoreError::DuplicateKey(doc.id)),
            status if status.is_success() => response.json().await.map_err(request_error),
            _ => Err(Self::failure(response).await),
        }
    }

    async fn query_all(&self) -> Result<Vec<BookDocument>, StoreError> {
        self.run_query(json!({
            "query": "SELECT * FROM c",
            "parameters": [],
        }))
        .await
    }

    async fn query_by_key(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Vec<BookDocument>, StoreError> {
        // Field names cannot be parameterized in Cosmos SQL; values always are.
        if !valid_field_name(key) {
            return Err(StoreError::Request(format!("invalid query field: {key}")));
        }

        self.run_query(json!({
            "query": format!("SELECT * FROM c WHERE c.{key} = @value"),
            "parameters": [{ "name": "@value", "value": value }],
        }))
        .await
    }

    async fn replace(
        &self,
        existing: &BookDocument,
        new_doc: BookDocument,
    ) -> Result<BookDocument, StoreError> {
        let link = self.document_link(&existing.id);
        let response = self
            .signed(self.http.put(self.document_url(&existing.id)), "put", &link)?
            .header(PARTITION_KEY_HEADER, partition_key_header(&new_doc.category))
            .json(&new_doc)
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(existing.id.clone())),
            status if status.is_success() => response.json().await.map_err(request_error),
            _ => Err(Self::failure(response).await),
        }
    }

    async fn delete(&self, id: &str, partition_key: &str) -> Result<(), StoreError> {
        let link = self.document_link(id);
        let response = self
            .signed(self.http.delete(self.document_url(id)), "delete", &link)?
            .header(PARTITION_KEY_HEADER, partition_key_header(partition_key))
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(id.to_string())),
            status if status.is_success() => Ok(()),
            _ => Err(Self::failure(response).await),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "Documents", default)]
    documents: Vec<BookDocument>,
}

fn request_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::Request(err.to_string())
}

/// Continuation token for the next query page, if the response carries one.
///
/// An absent, empty, or non-ASCII header all mean "last page".
fn next_continuation(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(CONTINUATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// The canonical string-to-sign for master-key auth: lowercased verb and
/// date, the resource type, the exact resource link, and a trailing empty
/// segment.
fn signature_payload(verb: &str, resource_link: &str, date: &str) -> String {
    format!(
        "{}\ndocs\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_link,
        date.to_lowercase()
    )
}

/// `authorization` header value: URL-encoded `type=master&ver=1.0&sig=<b64>`.
fn auth_token(
    key: &[u8],
    verb: &str,
    resource_link: &str,
    date: &str,
) -> Result<String, StoreError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| StoreError::Request(format!("hmac init failed: {e}")))?;
    mac.update(signature_payload(verb, resource_link, date).as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={signature}")).into_owned())
}

/// Cosmos partition-key header value: a one-element JSON array.
fn partition_key_header(value: &str) -> String {
    json!([value]).to_string()
}

fn valid_field_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
