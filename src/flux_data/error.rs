use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FluxDataError {
    #[error("File not found on the archive (last tried {url})")]
    RemoteNotFound { url: String },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Transfer from {url} was interrupted")]
    TransferInterrupted {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("FTP transfer failed for {url}")]
    FtpTransfer {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("Failed to decompress '{path}': {message}")]
    Decompression { path: PathBuf, message: String },

    #[error("I/O error on '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse line {line} of '{path}': {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed building DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("No local file for {0}; download it first")]
    NotDownloaded(String),

    #[error("Can't plot data: the DataFrame was not created")]
    DataFrameNotCreated,

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl FluxDataError {
    /// True for failures of the network transfer itself, as opposed to the
    /// file being absent from the archive.
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            FluxDataError::HttpClient(_)
                | FluxDataError::NetworkRequest(..)
                | FluxDataError::HttpStatus { .. }
                | FluxDataError::TransferInterrupted { .. }
                | FluxDataError::FtpTransfer { .. }
        )
    }
}
