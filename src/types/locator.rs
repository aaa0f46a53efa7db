//! The resolved remote location of one station-day file.

use crate::resolver::era::Compression;
use crate::types::observation_date::ObservationDate;
use crate::types::station::Station;
use serde::Serialize;

/// Where a station's data for one day lives in the archive.
///
/// Produced by [`crate::PathResolver::resolve`]. The directory is relative to
/// the archive root of whichever [`crate::Transport`] is used, so the same
/// locator serves both HTTPS and FTP.
///
/// `candidates` is never empty: the first entry is the spelling the naming
/// era prescribes, later entries are alternate spellings tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteLocator {
    pub station: Station,
    pub date: ObservationDate,
    /// Archive-relative directory, `<slug>/<yyyy>/<mm>`.
    pub directory: String,
    pub compression: Compression,
    candidates: Vec<String>,
}

impl RemoteLocator {
    pub(crate) fn new(
        station: Station,
        date: ObservationDate,
        directory: String,
        compression: Compression,
        primary: String,
        alternates: Vec<String>,
    ) -> Self {
        let mut candidates = Vec::with_capacity(alternates.len() + 1);
        candidates.push(primary);
        for alternate in alternates {
            if !candidates.contains(&alternate) {
                candidates.push(alternate);
            }
        }
        Self {
            station,
            date,
            directory,
            compression,
            candidates,
        }
    }

    /// The filename the naming era prescribes, including the compression suffix.
    pub fn filename(&self) -> &str {
        &self.candidates[0]
    }

    /// Every filename worth trying, in order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Archive-relative path of the primary filename.
    pub fn remote_path(&self) -> String {
        format!("{}/{}", self.directory, self.filename())
    }

    /// Full URL of `filename` below `root`.
    pub fn url_for(&self, root: &str, filename: &str) -> String {
        format!("{}/{}/{}", root.trim_end_matches('/'), self.directory, filename)
    }

    /// Full URLs of all candidates below `root`, in try order.
    pub fn urls(&self, root: &str) -> Vec<String> {
        self.candidates
            .iter()
            .map(|name| self.url_for(root, name))
            .collect()
    }

    /// The candidate names with the compression suffix removed, as they look
    /// once decompressed.
    pub fn decompressed_candidates(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|name| self.compression.strip_suffix(name).to_string())
            .collect()
    }
}
