use thiserror::Error;

/// Why a catalog could not be loaded. The caller keeps whatever catalog it
/// already had.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not well-formed: {0}")]
    Parse(#[from] serde_json::Error),
}
