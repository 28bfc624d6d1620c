use docdelta_core::errors::{ExError, ExErrorKind};
use thiserror::Error;

/// Delivery failure, carried unchanged from the HTTP layer
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid Solr URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<TransportError> for ExError {
    fn from(err: TransportError) -> Self {
        ExError::new(ExErrorKind::Transport)
            .with_op("solr_update")
            .with_message(err.to_string())
    }
}
