//! Blocking Solr update client.

use std::fmt;
use std::io::Read;
use std::time::{Duration, Instant};

use docdelta_core::errors::{ExError, ExErrorKind};
use docdelta_core::{log_op_end, log_op_error, log_op_start};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::config::SolrConfig;
use crate::error::TransportError;

/// Anything that can deliver an update body and return the response stream.
pub trait UpdateTransport {
    /// Send `body` to the update endpoint
    ///
    /// # Errors
    ///
    /// Delivery failures, unchanged from the underlying transport.
    fn update(&self, body: &str) -> Result<Box<dyn Read>, TransportError>;
}

/// Posts update bodies to `http://<host>/solr/<collection>/update`.
pub struct SolrClient {
    client: Client,
    config: SolrConfig,
}

impl SolrClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// `Http` if the underlying HTTP client cannot be constructed.
    pub fn new(config: SolrConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SolrConfig {
        &self.config
    }

    /// The update URL, with commit enabled and version conflicts tolerated
    ///
    /// # Errors
    ///
    /// `InvalidUrl` if host or collection do not form a valid URL.
    pub fn update_url(&self) -> Result<Url, TransportError> {
        self.url("update", &[("commit", "true"), ("failOnVersionConflicts", "false")])
    }

    fn url(&self, component: &str, params: &[(&str, &str)]) -> Result<Url, TransportError> {
        let base = format!("http://{}/", self.config.host);
        let mut url = Url::parse(&base)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(["solr", self.config.collection.as_str(), component]);
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }
}

impl fmt::Debug for SolrClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolrClient")
            .field("host", &self.config.host)
            .field("collection", &self.config.collection)
            .finish()
    }
}

impl UpdateTransport for SolrClient {
    fn update(&self, body: &str) -> Result<Box<dyn Read>, TransportError> {
        let started = Instant::now();
        let url = self.update_url()?;
        log_op_start!("solr_update", url = url.as_str(), body_bytes = body.len());

        let result = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send();

        match result {
            Ok(response) => {
                log_op_end!(
                    "solr_update",
                    duration_ms = started.elapsed().as_millis() as u64,
                    status = response.status().as_u16(),
                );
                Ok(Box::new(response))
            }
            Err(err) => {
                let err = TransportError::from(err);
                log_op_error!(
                    "solr_update",
                    ExError::new(ExErrorKind::Transport).with_message(err.to_string()),
                    duration_ms = started.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }
}
