//! Bitquery EAP client and the run's error taxonomy.

use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::environment;
use crate::graphql_queries::DEX_TRADES_QUERY;

/// Production endpoint for the Bitquery EAP streaming API.
pub const BITQUERY_EAP_URL: &str = "https://streaming.bitquery.io/eap";

/// Environment variable overriding the endpoint, used to point the binary at
/// a local server in integration tests.
pub const ENDPOINT_ENV_VAR: &str = "BITQUERY_API_URL";

const BODY_SNIPPET_LEN: usize = 200;

/// Everything that can abort a run. Every variant is fatal: the entry point
/// is the sole place that turns a variant into a diagnostic and an exit code.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("BITQUERY_API_TOKEN is not set")]
    MissingToken,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request failed with status {status} | body snippet: {snippet}")]
    Status { status: u16, snippet: String },
    #[error("malformed response: {message} | body snippet: {snippet}")]
    BadResponse { message: String, snippet: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trim a response body to a bounded snippet for diagnostics.
fn snippet(body: &str) -> String {
    if body.chars().count() > BODY_SNIPPET_LEN {
        let preview: String = body.chars().take(BODY_SNIPPET_LEN).collect();
        format!("{preview}...")
    } else {
        body.to_string()
    }
}

/// Wire shape of the request body: exactly one key, `query`.
#[derive(Serialize)]
struct GraphQLRequest {
    query: &'static str,
}

/// Client for the Bitquery EAP GraphQL API.
///
/// Holds the prepared header set and the target endpoint; the query itself
/// is fixed, so [`BitqueryClient::fetch`] takes no arguments.
pub struct BitqueryClient {
    client: reqwest::Client,
    headers: HeaderMap,
    endpoint: String,
}

impl BitqueryClient {
    /// Create a client for the standard endpoint.
    ///
    /// `BITQUERY_API_URL` overrides the endpoint when set so tests can
    /// redirect the binary to a mock server.
    #[must_use]
    pub fn new(token: &str) -> Self {
        let endpoint = environment::var(ENDPOINT_ENV_VAR)
            .unwrap_or_else(|_| BITQUERY_EAP_URL.to_string());
        Self::with_endpoint(token, &endpoint)
    }

    /// Create a client targeting a custom endpoint directly.
    #[must_use]
    pub fn with_endpoint(token: &str, endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            headers: build_headers(token),
            endpoint: endpoint.to_string(),
        }
    }

    /// Send the fixed query and decode the response body as opaque JSON.
    ///
    /// The body is passed through without inspection; GraphQL-level `errors`
    /// members are data like any other and end up in the output file.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the request cannot be completed, the
    /// status falls outside `2xx`, or the body is not valid JSON. A `2xx`
    /// body that fails to decode is treated with the same severity as a
    /// transport failure.
    pub async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&GraphQLRequest {
                query: DEX_TRADES_QUERY,
            })
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Status {
                status,
                snippet: snippet(&body),
            });
        }
        debug!("received {} byte response from {}", body.len(), self.endpoint);
        serde_json::from_str(&body).map_err(|e| FetchError::BadResponse {
            message: e.to_string(),
            snippet: snippet(&body),
        })
    }
}

/// Build the contract header set: `Content-Type` and `Authorization`.
#[must_use]
pub fn build_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        "application/json".parse().expect("static string"),
    );
    headers.insert(
        AUTHORIZATION,
        format!("Bearer {token}").parse().expect("valid header"),
    );
    headers
}
