//! One-shot fetcher for the Bitquery EAP streaming API.
//!
//! Exposes the client, token resolution and output helpers so the
//! integration tests can exercise them without going through the binary.

pub mod api;
pub mod auth;
pub mod environment;
pub mod graphql_queries;
pub mod output;

pub use api::{BITQUERY_EAP_URL, BitqueryClient, FetchError};
pub use auth::resolve_api_token;
