//! Solr transport for docdelta
//!
//! Delivers a built update body to a Solr collection's update handler and
//! hands back the raw response stream. Failures are surfaced as they come
//! from the HTTP client; nothing is retried.

pub mod client;
pub mod config;
pub mod error;

pub use client::{SolrClient, UpdateTransport};
pub use config::SolrConfig;
pub use error::TransportError;
