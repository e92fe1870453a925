use std::path::PathBuf;
use thiserror::Error;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors raised while fetching, comparing, transforming, and writing the Azure IP Ranges.
///
/// A corrupt or missing *previous* snapshot is never an error; it is logged and the new data is
/// treated as new.
#[derive(Debug, Error)]
pub enum Error {
    /// The new payload does not decode as a Service Tags dataset.
    #[error("failed to parse Service Tags JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status code {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("no JSON download link found on page")]
    LinkNotFound,

    #[error("multiple JSON download links found ({0}), expected exactly one")]
    AmbiguousLink(usize),

    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to encode JSON document: {0}")]
    Json(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}
