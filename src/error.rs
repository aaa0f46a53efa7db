use crate::flux_data::error::FluxDataError;
use crate::resolver::error::ResolveError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RstnError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    FluxData(#[from] FluxDataError),

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Data path exists but is not a directory: '{0}'")]
    DataDirNotADirectory(PathBuf),

    #[error("Failed to determine the default data directory")]
    DataDirResolution,
}
