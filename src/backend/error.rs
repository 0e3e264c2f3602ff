//! Transport errors raised by chat backends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed completion response")]
    Decode(#[source] reqwest::Error),
}
