use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize template: {0}")]
    Json(#[from] serde_json::Error),
    #[error("elasticsearch request failed: {0}")]
    Elasticsearch(#[from] elasticsearch::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
