//! HTTP client for the directory's WPGraphQL endpoint.
//!
//! Wraps `reqwest` with GraphQL envelope handling and a response cache.
//! One client is built at startup and shared by every view; its cache lives
//! as long as the client does.

use std::sync::Arc;
use std::time::Duration;

use guia_core::{AppConfig, ListingDetail, Page, PageSource};
use moka::future::Cache;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::GraphqlError;
use crate::ingest::{ingest_detail, ingest_page};
use crate::queries::{
    GET_COMERCIO, GET_COMERCIOS, GET_COMERCIOS_OPERATION, GET_COMERCIO_OPERATION, PING,
};
use crate::types::{ComercioData, ComerciosData, GraphqlResponse};

/// Transport and cache settings for [`GraphqlClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// `0` disables the response cache.
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "guia-comercios/0.1".to_string(),
            cache_ttl_secs: 300,
            cache_max_entries: 1000,
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            cache_ttl_secs: config.cache_ttl_secs,
            cache_max_entries: config.cache_max_entries,
        }
    }
}

/// Client for the two directory queries.
///
/// Successful `data` payloads are cached per operation and variables, so
/// walking the same cursors again (another visitor, a reopened session)
/// does not hit the backend. Errors are never cached.
pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
    cache: Option<Cache<String, Arc<Value>>>,
}

impl GraphqlClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute `http`/`https` URL, or [`GraphqlError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(endpoint: &str, options: &ClientOptions) -> Result<Self, GraphqlError> {
        let endpoint = Url::parse(endpoint).map_err(|e| GraphqlError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(GraphqlError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme \"{}\"", endpoint.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str())
            .build()?;

        let cache = (options.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .max_capacity(options.cache_max_entries)
                .time_to_live(Duration::from_secs(options.cache_ttl_secs))
                .build()
        });

        Ok(Self {
            client,
            endpoint,
            cache,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches one page of the `comercios` connection.
    ///
    /// Returns `Ok(None)` when the response has no connection data.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] on network failure.
    /// - [`GraphqlError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GraphqlError::Graphql`] when the response carries errors.
    /// - [`GraphqlError::Deserialize`] if `data` does not match the query shape.
    pub async fn get_comercios(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> Result<Option<Page>, GraphqlError> {
        let variables = json!({ "first": first, "after": after });
        let data: Option<ComerciosData> = self
            .execute(GET_COMERCIOS_OPERATION, GET_COMERCIOS, variables)
            .await?;

        Ok(data.and_then(|d| d.comercios).map(ingest_page))
    }

    /// Looks up a single comercio by slug.
    ///
    /// Returns `Ok(None)` when the backend has no record for `slug`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_comercios`].
    pub async fn get_comercio(&self, slug: &str) -> Result<Option<ListingDetail>, GraphqlError> {
        let variables = json!({ "slug": slug });
        let data: Option<ComercioData> = self
            .execute(GET_COMERCIO_OPERATION, GET_COMERCIO, variables)
            .await?;

        Ok(data.and_then(|d| d.comercio_by).map(ingest_detail))
    }

    /// Sends a trivial uncached query to check the endpoint is reachable.
    ///
    /// # Errors
    ///
    /// Any transport or GraphQL error from the request.
    pub async fn ping(&self) -> Result<(), GraphqlError> {
        self.send("Ping", PING, &json!({})).await.map(|_| ())
    }

    /// Runs `query`, serving `data` from the cache when possible.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<Option<T>, GraphqlError> {
        let key = cache_key(operation, &variables);

        let cached = match &self.cache {
            Some(cache) => cache.get(&key).await,
            None => None,
        };

        let data = if let Some(data) = cached {
            tracing::debug!(operation, %variables, "GraphQL cache hit");
            data
        } else {
            let Some(data) = self.send(operation, query, &variables).await? else {
                return Ok(None);
            };
            let data = Arc::new(data);
            if let Some(cache) = &self.cache {
                cache.insert(key, Arc::clone(&data)).await;
            }
            data
        };

        serde_json::from_value::<T>(Value::clone(&data))
            .map(Some)
            .map_err(|e| GraphqlError::Deserialize {
                context: format!("{operation} data"),
                source: e,
            })
    }

    /// POSTs one operation and unwraps the GraphQL envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Graphql`] with the first message when the
    /// `errors` array is non-empty, even if partial `data` is present.
    async fn send(
        &self,
        operation: &str,
        query: &str,
        variables: &Value,
    ) -> Result<Option<Value>, GraphqlError> {
        let body = json!({
            "query": query,
            "operationName": operation,
            "variables": variables,
        });

        tracing::debug!(operation, %variables, "sending GraphQL request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GraphqlError::UnexpectedStatus {
                status: status.as_u16(),
                operation: operation.to_owned(),
            });
        }

        let text = response.text().await?;
        let envelope: GraphqlResponse<Value> =
            serde_json::from_str(&text).map_err(|e| GraphqlError::Deserialize {
                context: format!("{operation} response"),
                source: e,
            })?;

        if let Some(first) = envelope.errors.unwrap_or_default().into_iter().next() {
            tracing::warn!(operation, message = %first.message, "GraphQL error response");
            return Err(GraphqlError::Graphql {
                operation: operation.to_owned(),
                message: first.message,
            });
        }

        Ok(envelope.data.filter(|data| !data.is_null()))
    }
}

impl PageSource for GraphqlClient {
    type Error = GraphqlError;

    async fn fetch_page(&self, first: u32, after: Option<&str>) -> Result<Option<Page>, GraphqlError> {
        self.get_comercios(first, after).await
    }
}

/// Cache key: operation name plus the serialized variables.
fn cache_key(operation: &str, variables: &Value) -> String {
    format!("{operation}:{variables}")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
