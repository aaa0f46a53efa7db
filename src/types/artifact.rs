use std::path::{Path, PathBuf};

/// A station-day file on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifact {
    path: PathBuf,
    compressed: bool,
}

impl LocalArtifact {
    pub fn compressed(path: PathBuf) -> Self {
        Self {
            path,
            compressed: true,
        }
    }

    pub fn plain(path: PathBuf) -> Self {
        Self {
            path,
            compressed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True until the artifact has gone through the decompressor.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}
