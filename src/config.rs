use crate::types::transport::{Transport, FTP_ROOT, HTTPS_ROOT};
use std::time::Duration;

/// Where and how the archive is reached.
///
/// The defaults point at NOAA's NGDC servers. Either root can be replaced by
/// a mirror with the same directory layout.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub https_root: String,
    pub ftp_root: String,
    pub connect_timeout: Duration,
    /// Upper bound for one whole transfer.
    pub timeout: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment for HTTPS.
    pub system_proxy: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            https_root: HTTPS_ROOT.to_string(),
            ftp_root: FTP_ROOT.to_string(),
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(300),
            system_proxy: true,
        }
    }
}

impl ArchiveConfig {
    pub fn root(&self, transport: Transport) -> &str {
        match transport {
            Transport::Https => &self.https_root,
            Transport::Ftp => &self.ftp_root,
        }
    }
}
