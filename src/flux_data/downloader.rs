use crate::config::ArchiveConfig;
use crate::flux_data::error::FluxDataError;
use crate::resolver::era::Compression;
use crate::types::artifact::LocalArtifact;
use crate::types::locator::RemoteLocator;
use crate::types::transport::Transport;
use futures_util::TryStreamExt;
use log::{debug, info, warn};
use reqwest::{redirect, Client, StatusCode};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::{fs, task};
use tokio_util::io::StreamReader;

/// libcurl's `CURLE_REMOTE_FILE_NOT_FOUND`.
const CURLE_REMOTE_FILE_NOT_FOUND: u32 = 78;

/// Fetches station-day files from the archive into a local directory.
pub struct RstnDownloader {
    config: ArchiveConfig,
    download_client: Client,
}

impl RstnDownloader {
    pub fn new(config: ArchiveConfig) -> Result<RstnDownloader, FluxDataError> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .redirect(redirect::Policy::none());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let download_client = builder.build().map_err(FluxDataError::HttpClient)?;
        Ok(RstnDownloader {
            config,
            download_client,
        })
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Downloads the file `locator` points at into `dir` over `transport`.
    ///
    /// If a file for any candidate name is already in `dir` (compressed or
    /// not) it is returned without touching the network. Otherwise candidates
    /// are tried in order; a candidate the archive does not have moves on to
    /// the next one. Any other failure stops immediately.
    ///
    /// The file is written under a temporary name and renamed into place once
    /// complete, so a failed transfer leaves nothing behind.
    pub async fn download(
        &self,
        locator: &RemoteLocator,
        dir: &Path,
        transport: Transport,
    ) -> Result<LocalArtifact, FluxDataError> {
        if let Some(artifact) = find_local_artifact(locator, dir).await {
            info!(
                "Using local file {:?} for {} on {}",
                artifact.path(),
                locator.station,
                locator.date
            );
            return Ok(artifact);
        }

        fs::create_dir_all(dir)
            .await
            .map_err(|e| FluxDataError::Io(dir.to_path_buf(), e))?;

        let root = self.config.root(transport);
        let mut last_url = String::new();
        for name in locator.candidates() {
            let url = locator.url_for(root, name);
            let destination = dir.join(name);
            info!("Downloading {} via {}", url, transport);

            let found = match transport {
                Transport::Https => self.fetch_https(&url, dir, &destination).await?,
                Transport::Ftp => self.fetch_ftp(&url, dir, &destination).await?,
            };
            if found {
                info!("Saved {} to {:?}", url, destination);
                return Ok(match locator.compression {
                    Compression::Gzip => LocalArtifact::compressed(destination),
                    Compression::None => LocalArtifact::plain(destination),
                });
            }
            warn!("{} is not on the archive", url);
            last_url = url;
        }

        Err(FluxDataError::RemoteNotFound { url: last_url })
    }

    /// Returns `Ok(false)` when the server does not have the file.
    async fn fetch_https(
        &self,
        url: &str,
        dir: &Path,
        destination: &Path,
    ) -> Result<bool, FluxDataError> {
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| FluxDataError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        // Missing files are answered with a redirect to an HTML page.
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE || status.is_redirection()
        {
            return Ok(false);
        }
        if !status.is_success() {
            warn!("HTTP error for {}: {}", url, status);
            return Err(FluxDataError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let temp = NamedTempFile::new_in(dir)
            .map_err(|e| FluxDataError::Io(dir.to_path_buf(), e))?;
        let handle = temp
            .as_file()
            .try_clone()
            .map_err(|e| FluxDataError::Io(temp.path().to_path_buf(), e))?;
        let mut file = fs::File::from_std(handle);

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let reader = StreamReader::new(stream);
        tokio::pin!(reader);

        let written = tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(|e| FluxDataError::TransferInterrupted {
                url: url.to_string(),
                source: e,
            })?;
        file.flush()
            .await
            .map_err(|e| FluxDataError::Io(temp.path().to_path_buf(), e))?;
        drop(file);
        debug!("Received {} bytes from {}", written, url);

        persist(temp, destination)?;
        Ok(true)
    }

    /// Returns `Ok(false)` when the server does not have the file.
    async fn fetch_ftp(
        &self,
        url: &str,
        dir: &Path,
        destination: &Path,
    ) -> Result<bool, FluxDataError> {
        let url = url.to_string();
        let dir = dir.to_path_buf();
        let destination = destination.to_path_buf();
        let connect_timeout = self.config.connect_timeout;
        let timeout = self.config.timeout;

        task::spawn_blocking(move || {
            let ftp_error = |source: curl::Error| FluxDataError::FtpTransfer {
                url: url.clone(),
                source,
            };

            let mut temp =
                NamedTempFile::new_in(&dir).map_err(|e| FluxDataError::Io(dir.clone(), e))?;
            let mut easy = curl::easy::Easy::new();
            easy.url(&url).map_err(ftp_error)?;
            easy.connect_timeout(connect_timeout).map_err(ftp_error)?;
            easy.timeout(timeout).map_err(ftp_error)?;

            let mut write_error = None;
            let result = {
                let mut transfer = easy.transfer();
                transfer
                    .write_function(|data| match temp.write_all(data) {
                        Ok(()) => Ok(data.len()),
                        Err(e) => {
                            write_error = Some(e);
                            Ok(0) // aborts the transfer
                        }
                    })
                    .map_err(ftp_error)?;
                transfer.perform()
            };

            if let Some(e) = write_error {
                return Err(FluxDataError::Io(temp.path().to_path_buf(), e));
            }
            match result {
                Ok(()) => {}
                Err(e) if is_missing_on_server(&e) => return Ok(false),
                Err(e) => {
                    warn!("FTP error for {}: {}", url, e);
                    return Err(ftp_error(e));
                }
            }

            temp.flush()
                .map_err(|e| FluxDataError::Io(temp.path().to_path_buf(), e))?;
            persist(temp, &destination)?;
            Ok(true)
        })
        .await?
    }
}

/// A missing month directory fails the FTP `CWD` with 550, which libcurl
/// reports as access denied rather than file not found.
fn is_missing_on_server(error: &curl::Error) -> bool {
    error.code() == CURLE_REMOTE_FILE_NOT_FOUND
        || error.is_remote_access_denied()
        || error.is_file_couldnt_read_file()
}

/// Looks for a file of `locator` already in `dir`, preferring the
/// decompressed form.
pub async fn find_local_artifact(locator: &RemoteLocator, dir: &Path) -> Option<LocalArtifact> {
    for name in locator.decompressed_candidates() {
        let path = dir.join(name);
        if is_file(&path).await {
            return Some(LocalArtifact::plain(path));
        }
    }
    if locator.compression == Compression::None {
        return None;
    }
    for name in locator.candidates() {
        let path = dir.join(name);
        if is_file(&path).await {
            return Some(LocalArtifact::compressed(path));
        }
    }
    None
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

fn persist(temp: NamedTempFile, destination: &Path) -> Result<PathBuf, FluxDataError> {
    temp.persist(destination)
        .map_err(|e| FluxDataError::Io(destination.to_path_buf(), e.error))?;
    Ok(destination.to_path_buf())
}
