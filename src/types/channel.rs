//! The eight fixed RSTN observing frequencies.

use serde::Serialize;
use std::fmt;

/// One of the eight RSTN radiometer frequencies.
///
/// Each channel becomes a column of the flux dataframe, named by its
/// frequency in MHz (see [`FluxChannel::column_name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FluxChannel {
    Mhz245,
    Mhz410,
    Mhz610,
    Mhz1415,
    Mhz2695,
    Mhz4995,
    Mhz8800,
    Mhz15400,
}

impl FluxChannel {
    /// All channels in the order they appear on a data line.
    pub const ALL: [FluxChannel; 8] = [
        FluxChannel::Mhz245,
        FluxChannel::Mhz410,
        FluxChannel::Mhz610,
        FluxChannel::Mhz1415,
        FluxChannel::Mhz2695,
        FluxChannel::Mhz4995,
        FluxChannel::Mhz8800,
        FluxChannel::Mhz15400,
    ];

    pub fn mhz(&self) -> u32 {
        match self {
            FluxChannel::Mhz245 => 245,
            FluxChannel::Mhz410 => 410,
            FluxChannel::Mhz610 => 610,
            FluxChannel::Mhz1415 => 1415,
            FluxChannel::Mhz2695 => 2695,
            FluxChannel::Mhz4995 => 4995,
            FluxChannel::Mhz8800 => 8800,
            FluxChannel::Mhz15400 => 15400,
        }
    }

    /// Column name used in the flux dataframe.
    pub fn column_name(&self) -> &'static str {
        match self {
            FluxChannel::Mhz245 => "245",
            FluxChannel::Mhz410 => "410",
            FluxChannel::Mhz610 => "610",
            FluxChannel::Mhz1415 => "1415",
            FluxChannel::Mhz2695 => "2695",
            FluxChannel::Mhz4995 => "4995",
            FluxChannel::Mhz8800 => "8800",
            FluxChannel::Mhz15400 => "15400",
        }
    }

    pub(crate) fn column_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.column_name()).collect()
    }
}

impl fmt::Display for FluxChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", self.mhz())
    }
}
