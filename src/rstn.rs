//! This module provides the main entry point of the crate: [`Rstn`], one
//! station-day of RSTN 1-second solar radio flux data, from download to plot.

use crate::config::ArchiveConfig;
use crate::error::RstnError;
use crate::filtering::FluxFrameFilterExt;
use crate::flux_data::decompressor::decompress;
use crate::flux_data::downloader::{find_local_artifact, RstnDownloader};
use crate::flux_data::error::FluxDataError;
use crate::flux_data::reader::read_flux_file;
use crate::resolver::path_resolver::PathResolver;
use crate::types::artifact::LocalArtifact;
use crate::types::locator::RemoteLocator;
use crate::types::observation_date::ObservationDate;
use crate::types::station::Station;
use crate::types::transport::Transport;
use crate::utils::{ensure_data_dir_exists, get_data_dir};
use bon::bon;
use log::info;
use polars::prelude::{DataFrame, IntoLazy};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One station's RSTN data for one day.
///
/// The remote location is resolved when the value is built, so an unknown
/// station or an unsupported date fails straight away. The remaining steps
/// mirror the manual workflow: [`Rstn::download`], [`Rstn::decompress`],
/// [`Rstn::create_dataframe`] and, with the `plotting` feature, `plot`.
/// [`Rstn::fetch`] runs the first three in one go.
///
/// Files are kept in the data directory (by default `rstn_data` inside the
/// user's cache directory). A file already there is used instead of
/// downloading it again.
///
/// # Examples
///
/// ```no_run
/// # use rstn::{Rstn, RstnError, Transport};
/// # #[tokio::main]
/// # async fn main() -> Result<(), RstnError> {
/// let mut rstn = Rstn::builder()
///     .year(2002)
///     .month(4)
///     .day(9)
///     .station("Sagamore Hill")
///     .path("data")
///     .build()?;
///
/// rstn.download(Transport::Https).await?;
/// rstn.decompress().await?;
/// let df = rstn.create_dataframe().await?;
/// println!("{}", df.head(Some(5)));
/// # Ok(())
/// # }
/// ```
pub struct Rstn {
    locator: RemoteLocator,
    data_dir: PathBuf,
    downloader: RstnDownloader,
    artifact: Option<LocalArtifact>,
    dataframe: Option<DataFrame>,
}

#[bon]
impl Rstn {
    /// Resolves the request and prepares the downloader.
    ///
    /// # Arguments
    ///
    /// * `.year(i32)`, `.month(u32)`, `.day(u32)`: **Required.** The observation date.
    /// * `.station(&str)`: **Required.** Station name, archive slug or code (e.g. "San Vito", "LIS").
    /// * `.path(impl Into<PathBuf>)`: Optional. Where files are stored. Created on first download.
    /// * `.https_root(impl Into<String>)`, `.ftp_root(impl Into<String>)`: Optional. Archive mirrors.
    /// * `.connect_timeout(Duration)`, `.timeout(Duration)`: Optional. Network time limits.
    ///
    /// # Errors
    ///
    /// * [`RstnError::Resolve`] for an unknown station, an invalid calendar date or
    ///   a date outside 2000-01-01 to today.
    /// * [`RstnError::DataDirResolution`] when no `path` is given and the user's
    ///   cache directory cannot be determined.
    /// * [`RstnError::FluxData`] if the HTTP client cannot be set up.
    #[builder]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        station: &str,
        #[builder(into)] path: Option<PathBuf>,
        #[builder(into)] https_root: Option<String>,
        #[builder(into)] ftp_root: Option<String>,
        connect_timeout: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Self, RstnError> {
        let locator = PathResolver::default().resolve_ymd(station, year, month, day)?;
        let data_dir = match path {
            Some(path) => path,
            None => get_data_dir()?,
        };

        let defaults = ArchiveConfig::default();
        let config = ArchiveConfig {
            https_root: https_root.unwrap_or(defaults.https_root),
            ftp_root: ftp_root.unwrap_or(defaults.ftp_root),
            connect_timeout: connect_timeout.unwrap_or(defaults.connect_timeout),
            timeout: timeout.unwrap_or(defaults.timeout),
            system_proxy: defaults.system_proxy,
        };

        Ok(Self::with_config(locator, data_dir, config)?)
    }
}

impl Rstn {
    /// Builds from an already resolved locator and a full [`ArchiveConfig`].
    pub fn with_config(
        locator: RemoteLocator,
        data_dir: PathBuf,
        config: ArchiveConfig,
    ) -> Result<Self, FluxDataError> {
        Ok(Self {
            locator,
            data_dir,
            downloader: RstnDownloader::new(config)?,
            artifact: None,
            dataframe: None,
        })
    }

    pub fn locator(&self) -> &RemoteLocator {
        &self.locator
    }

    pub fn station(&self) -> &Station {
        &self.locator.station
    }

    pub fn date(&self) -> ObservationDate {
        self.locator.date
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The local file as of the last step, if any.
    pub fn artifact(&self) -> Option<&LocalArtifact> {
        self.artifact.as_ref()
    }

    /// Name of the local file as of the last step, if any.
    pub fn filename(&self) -> Option<&str> {
        self.artifact.as_ref().and_then(|a| a.file_name())
    }

    /// Downloads the day's file into the data directory.
    ///
    /// Does nothing over the network if the file, compressed or not, is
    /// already in the data directory.
    ///
    /// # Errors
    ///
    /// * [`FluxDataError::RemoteNotFound`] if the archive has no file under any
    ///   candidate name.
    /// * Transfer errors ([`FluxDataError::is_transfer`]) for network and
    ///   server failures. Nothing is retried.
    /// * [`RstnError::DataDirCreation`] if the data directory cannot be created.
    pub async fn download(&mut self, transport: Transport) -> Result<&LocalArtifact, RstnError> {
        ensure_data_dir_exists(&self.data_dir).await?;
        let artifact = self
            .downloader
            .download(&self.locator, &self.data_dir, transport)
            .await?;
        self.dataframe = None;
        let artifact: &LocalArtifact = self.artifact.insert(artifact);
        Ok(artifact)
    }

    /// Decompresses the downloaded file and returns the path of the plain file.
    ///
    /// Without a prior [`Rstn::download`] this picks up a matching file already
    /// in the data directory.
    ///
    /// # Errors
    ///
    /// * [`FluxDataError::NotDownloaded`] if there is no local file.
    /// * [`FluxDataError::Decompression`] for a corrupt or non-gzip `.gz` file.
    pub async fn decompress(&mut self) -> Result<PathBuf, RstnError> {
        let artifact = match &self.artifact {
            Some(artifact) => artifact.clone(),
            None => find_local_artifact(&self.locator, &self.data_dir)
                .await
                .ok_or_else(|| FluxDataError::NotDownloaded(self.locator.remote_path()))?,
        };
        let plain = decompress(&artifact).await?;
        let path = plain.path().to_path_buf();
        self.artifact = Some(plain);
        Ok(path)
    }

    /// Loads the decompressed file into a `DataFrame` and keeps it for [`Rstn::dataframe`]
    /// and plotting.
    ///
    /// Decompresses first if that has not happened yet. The frame has a
    /// `time` column (UTC) and one Int64 column per frequency, named by
    /// its MHz value ("245" … "15400"); missing samples are null.
    pub async fn create_dataframe(&mut self) -> Result<&DataFrame, RstnError> {
        let plain = self
            .artifact
            .as_ref()
            .filter(|artifact| !artifact.is_compressed())
            .map(|artifact| artifact.path().to_path_buf());
        let path = match plain {
            Some(path) => path,
            None => self.decompress().await?,
        };
        let df = read_flux_file(&path, self.locator.date.year()).await?;
        info!(
            "Built dataframe with {} rows for {} on {}",
            df.height(),
            self.locator.station,
            self.locator.date
        );
        let frame: &DataFrame = self.dataframe.insert(df);
        Ok(frame)
    }

    /// Downloads, decompresses and loads the day in one call.
    pub async fn fetch(&mut self, transport: Transport) -> Result<&DataFrame, RstnError> {
        self.download(transport).await?;
        self.decompress().await?;
        self.create_dataframe().await
    }

    /// The frame built by [`Rstn::create_dataframe`], if any.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.dataframe.as_ref()
    }

    /// The frame with each channel's daily mean subtracted (Float64).
    ///
    /// # Errors
    ///
    /// [`FluxDataError::DataFrameNotCreated`] before [`Rstn::create_dataframe`].
    pub fn baseline_subtracted(&self) -> Result<DataFrame, RstnError> {
        let df = self.require_dataframe()?;
        Ok(df
            .clone()
            .lazy()
            .baseline_subtracted()
            .collect()
            .map_err(FluxDataError::from)?)
    }

    fn require_dataframe(&self) -> Result<&DataFrame, FluxDataError> {
        self.dataframe
            .as_ref()
            .ok_or(FluxDataError::DataFrameNotCreated)
    }

    #[cfg(feature = "plotting")]
    fn plot_title(&self) -> String {
        format!("{} {}", self.locator.station.name, self.locator.date)
    }

    /// Plots every channel against time in the browser.
    ///
    /// # Errors
    ///
    /// [`FluxDataError::DataFrameNotCreated`] before [`Rstn::create_dataframe`].
    #[cfg(feature = "plotting")]
    pub fn plot(&self) -> Result<(), RstnError> {
        let df = self.require_dataframe()?;
        crate::flux_data::plot::show(df, &self.plot_title());
        Ok(())
    }

    /// Writes the same plot as [`Rstn::plot`] to an HTML file.
    #[cfg(feature = "plotting")]
    pub fn write_plot_html(&self, path: &Path) -> Result<(), RstnError> {
        let df = self.require_dataframe()?;
        crate::flux_data::plot::write_html(df, &self.plot_title(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::error::ResolveError;
    use crate::test_support::{gzip, sample_day, write_file, Route, TestArchive};
    use chrono::{NaiveDate, NaiveDateTime};
    use polars::prelude::{DataType, TimeUnit};
    use tempfile::tempdir;

    fn first_time(df: &DataFrame) -> Option<NaiveDateTime> {
        let millis = df.column("time").ok()?.cast(&DataType::Int64).ok()?;
        let first = millis.i64().ok()?.get(0)?;
        chrono::DateTime::from_timestamp_millis(first).map(|t| t.naive_utc())
    }

    #[test]
    fn test_unknown_station_fails_at_build() {
        let result = Rstn::builder()
            .year(2002)
            .month(4)
            .day(9)
            .station("Holloman")
            .path("unused")
            .build();
        assert!(matches!(
            result,
            Err(RstnError::Resolve(ResolveError::UnknownStation { .. }))
        ));
    }

    #[test]
    fn test_old_date_fails_at_build() {
        let result = Rstn::builder()
            .year(1999)
            .month(12)
            .day(31)
            .station("San Vito")
            .path("unused")
            .build();
        assert!(matches!(
            result,
            Err(RstnError::Resolve(ResolveError::UnsupportedDate { .. }))
        ));
    }

    #[test]
    fn test_build_resolves_locator() -> Result<(), RstnError> {
        let rstn = Rstn::builder()
            .year(2014)
            .month(10)
            .day(16)
            .station("San Vito")
            .path("unused")
            .build()?;
        assert_eq!(rstn.locator().filename(), "16oct14.lis.gz");
        assert_eq!(rstn.station().code, "LIS");
        assert_eq!(rstn.data_dir(), Path::new("unused"));
        assert!(rstn.artifact().is_none());
        assert!(rstn.dataframe().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let date = NaiveDate::from_ymd_opt(2002, 4, 9).unwrap();
        let body = gzip(sample_day("K7OS", date, 90).as_bytes()).await;
        let archive = TestArchive::start(vec![(
            "sagamore-hill/2002/04/09APR02.K7O.gz",
            Route::ok(body),
        )])
        .await;
        let dir = tempdir()?;
        let mut rstn = Rstn::with_config(
            PathResolver::default().resolve_ymd("Sagamore Hill", 2002, 4, 9)?,
            dir.path().join("data"),
            archive.config(),
        )?;

        let df = rstn.fetch(Transport::Https).await?;

        assert_eq!(df.height(), 90);
        assert_eq!(
            df.column("time")?.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        assert_eq!(first_time(df), date.and_hms_opt(0, 0, 0));
        assert_eq!(rstn.filename(), Some("09APR02.K7O"));
        assert!(dir.path().join("data/09APR02.K7O").is_file());
        assert!(!dir.path().join("data/09APR02.K7O.gz").exists());
        assert!(rstn.dataframe().is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_step_by_step_workflow() -> Result<(), Box<dyn std::error::Error>> {
        let date = NaiveDate::from_ymd_opt(2014, 10, 16).unwrap();
        let body = gzip(sample_day("LISS", date, 10).as_bytes()).await;
        let archive = TestArchive::start(vec![(
            "san-vito/2014/10/16oct14.lis.gz",
            Route::ok(body),
        )])
        .await;
        let dir = tempdir()?;
        let mut rstn = Rstn::with_config(
            PathResolver::default().resolve_ymd("San Vito", 2014, 10, 16)?,
            dir.path().to_path_buf(),
            archive.config(),
        )?;

        let artifact = rstn.download(Transport::Https).await?;
        assert!(artifact.is_compressed());

        let plain = rstn.decompress().await?;
        assert_eq!(plain, dir.path().join("16oct14.lis"));
        let first_line = std::fs::read_to_string(&plain)?
            .lines()
            .next()
            .map(str::to_string);
        assert!(first_line.is_some_and(|l| l.starts_with("LISS20141016")));

        let df = rstn.create_dataframe().await?;
        assert_eq!(df.height(), 10);
        assert_eq!(first_time(df), date.and_hms_opt(0, 0, 0));

        // A second download finds the local plain file and stays offline.
        let requests_before = archive.requests().len();
        let again = rstn.download(Transport::Https).await?;
        assert!(!again.is_compressed());
        assert_eq!(archive.requests().len(), requests_before);
        assert!(rstn.dataframe().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_decompress_without_download() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut rstn = Rstn::builder()
            .year(2005)
            .month(7)
            .day(1)
            .station("Palehua")
            .path(dir.path())
            .build()?;

        assert!(matches!(
            rstn.decompress().await,
            Err(RstnError::FluxData(FluxDataError::NotDownloaded(_)))
        ));

        let date = NaiveDate::from_ymd_opt(2005, 7, 1).unwrap();
        write_file(
            &dir.path().join("01JUL05.PHF.gz"),
            &gzip(sample_day("PHFS", date, 5).as_bytes()).await,
        )
        .await;
        let plain = rstn.decompress().await?;
        assert_eq!(plain, dir.path().join("01JUL05.PHF"));
        Ok(())
    }

    #[tokio::test]
    async fn test_baseline_requires_dataframe() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut rstn = Rstn::builder()
            .year(2016)
            .month(1)
            .day(2)
            .station("Learmonth")
            .path(dir.path())
            .build()?;
        assert!(matches!(
            rstn.baseline_subtracted(),
            Err(RstnError::FluxData(FluxDataError::DataFrameNotCreated))
        ));

        let date = NaiveDate::from_ymd_opt(2016, 1, 2).unwrap();
        write_file(
            &dir.path().join("02jan16.apl"),
            sample_day("APLS", date, 20).as_bytes(),
        )
        .await;
        rstn.create_dataframe().await?;
        let normalized = rstn.baseline_subtracted()?;
        assert_eq!(normalized.column("245")?.dtype(), &DataType::Float64);
        assert_eq!(normalized.height(), 20);
        Ok(())
    }

    #[cfg(feature = "plotting")]
    #[test]
    fn test_plot_requires_dataframe() -> Result<(), RstnError> {
        let rstn = Rstn::builder()
            .year(2016)
            .month(1)
            .day(2)
            .station("Learmonth")
            .path("unused")
            .build()?;
        assert!(matches!(
            rstn.write_plot_html(Path::new("unused.html")),
            Err(RstnError::FluxData(FluxDataError::DataFrameNotCreated))
        ));
        Ok(())
    }
}
