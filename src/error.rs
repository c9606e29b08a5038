//! Error types shared by the fetch, translate and publish stages.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("feed parse error: {0}")]
    Feed(#[from] quick_xml::DeError),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rendered JSON is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl NewsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
