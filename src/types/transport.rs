use serde::Serialize;
use std::fmt;

/// NGDC HTTPS root of the RSTN 1-second archive.
pub const HTTPS_ROOT: &str = "https://www.ngdc.noaa.gov/stp/space-weather/solar-data/solar-features/solar-radio/rstn-1-second";

/// NGDC FTP root of the RSTN 1-second archive. The FTP tree spells the top
/// directory in upper case.
pub const FTP_ROOT: &str = "ftp://ftp.ngdc.noaa.gov/STP/space-weather/solar-data/solar-features/solar-radio/rstn-1-second";

/// How the archive file is fetched.
///
/// The archive publishes the same files over both protocols. Neither is
/// preferred and there is no automatic fallback from one to the other; the
/// caller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Transport {
    Https,
    Ftp,
}

impl Transport {
    pub fn default_root(&self) -> &'static str {
        match self {
            Transport::Https => HTTPS_ROOT,
            Transport::Ftp => FTP_ROOT,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Https => write!(f, "https"),
            Transport::Ftp => write!(f, "ftp"),
        }
    }
}
