/// Where and how to reach Solr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrConfig {
    /// `host:port`, without scheme
    pub host: String,
    pub collection: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl SolrConfig {
    pub fn new(host: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            collection: collection.into(),
            ..Self::default()
        }
    }

    pub fn with_connect_timeout_ms(mut self, ms: u64) -> Self {
        self.connect_timeout_ms = ms;
        self
    }

    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            host: "localhost:8983".to_string(),
            collection: "test".to_string(),
            connect_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
        }
    }
}
