use crate::flux_data::error::FluxDataError;
use crate::types::artifact::LocalArtifact;
use async_compression::tokio::bufread::GzipDecoder;
use log::{debug, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Inflates a downloaded artifact next to itself.
///
/// `NAME.gz` becomes `NAME` and the compressed file is removed. A file that
/// is not gzip and is not named `.gz` is already plain and comes back as is.
/// A `.gz` file that is not gzip, or a corrupt stream, is a
/// [`FluxDataError::Decompression`] and leaves no partial output.
pub async fn decompress(artifact: &LocalArtifact) -> Result<LocalArtifact, FluxDataError> {
    let path = artifact.path();
    let named_gz = has_gz_extension(path);

    if !has_gzip_magic(path).await? {
        if named_gz {
            return Err(FluxDataError::Decompression {
                path: path.to_path_buf(),
                message: "not a gzip stream".to_string(),
            });
        }
        debug!("{:?} is not compressed", path);
        return Ok(LocalArtifact::plain(path.to_path_buf()));
    }

    let target = if named_gz {
        path.with_extension("")
    } else {
        path.to_path_buf()
    };
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let source = fs::File::open(path)
        .await
        .map_err(|e| FluxDataError::Io(path.to_path_buf(), e))?;
    let mut decoder = GzipDecoder::new(BufReader::new(source));
    decoder.multiple_members(true);
    tokio::pin!(decoder);

    let temp = NamedTempFile::new_in(&dir).map_err(|e| FluxDataError::Io(dir.clone(), e))?;
    let handle = temp
        .as_file()
        .try_clone()
        .map_err(|e| FluxDataError::Io(temp.path().to_path_buf(), e))?;
    let mut output = fs::File::from_std(handle);

    let inflated = tokio::io::copy(&mut decoder, &mut output)
        .await
        .map_err(|e| FluxDataError::Decompression {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    output
        .flush()
        .await
        .map_err(|e| FluxDataError::Io(temp.path().to_path_buf(), e))?;
    drop(output);

    temp.persist(&target)
        .map_err(|e| FluxDataError::Io(target.clone(), e.error))?;
    if target != path {
        fs::remove_file(path)
            .await
            .map_err(|e| FluxDataError::Io(path.to_path_buf(), e))?;
    }

    info!("Decompressed {:?} to {:?} ({} bytes)", path, target, inflated);
    Ok(LocalArtifact::plain(target))
}

fn has_gz_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

async fn has_gzip_magic(path: &Path) -> Result<bool, FluxDataError> {
    let mut file = fs::File::open(path)
        .await
        .map_err(|e| FluxDataError::Io(path.to_path_buf(), e))?;
    let mut magic = [0u8; 2];
    match file.read_exact(&mut magic).await {
        Ok(_) => Ok(magic == GZIP_MAGIC),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(FluxDataError::Io(path.to_path_buf(), e)),
    }
}
