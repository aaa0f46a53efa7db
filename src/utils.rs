use crate::error::RstnError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "rstn_data";

pub fn get_data_dir() -> Result<PathBuf, RstnError> {
    dirs::cache_dir()
        .ok_or(RstnError::DataDirResolution)
        .map(|p| p.join(DATA_DIR_NAME))
}

pub async fn ensure_data_dir_exists(path: &Path) -> Result<(), RstnError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(RstnError::DataDirNotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating data directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| RstnError::DataDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(RstnError::DataDirCreation(path.to_path_buf(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_missing_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        ensure_data_dir_exists(&nested).await?;
        assert!(nested.is_dir());
        // Idempotent.
        ensure_data_dir_exists(&nested).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_file_path() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("data");
        std::fs::write(&file, b"")?;
        assert!(matches!(
            ensure_data_dir_exists(&file).await,
            Err(RstnError::DataDirNotADirectory(_))
        ));
        Ok(())
    }
}
