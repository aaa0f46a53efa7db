mod config;
mod error;
mod filtering;
mod flux_data;
mod resolver;
mod rstn;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

pub use config::ArchiveConfig;
pub use error::RstnError;
pub use filtering::FluxFrameFilterExt;
pub use rstn::*;

pub use resolver::era::{rule_for, Compression, EraRule, LetterCase, ERA_RULES};
pub use resolver::error::ResolveError;
pub use resolver::path_resolver::{PathResolver, SUPPORTED_FROM};

pub use types::artifact::LocalArtifact;
pub use types::channel::FluxChannel;
pub use types::locator::RemoteLocator;
pub use types::observation_date::ObservationDate;
pub use types::station::*;
pub use types::transport::*;

pub use flux_data::decompressor::decompress;
pub use flux_data::downloader::{find_local_artifact, RstnDownloader};
pub use flux_data::error::FluxDataError;
pub use flux_data::reader::{
    field_width_for_year, parse_flux_text, parse_line, read_flux_file, records_to_dataframe,
    FluxRecord, TIME_COLUMN,
};
pub use utils::get_data_dir;
