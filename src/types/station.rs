//! Defines the RSTN observing stations and the static table used to look them up.

use serde::Serialize;
use std::fmt;

/// A single RSTN observing site.
///
/// Stations are never created at runtime; every known site is listed in
/// [`STATIONS`] and looked up with [`Station::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Station {
    /// Human-readable name (e.g. "Sagamore Hill").
    pub name: &'static str,
    /// Directory name used by the archive (e.g. "sagamore-hill").
    pub slug: &'static str,
    /// Archive short code, also used as the file extension (e.g. "K7O").
    pub code: &'static str,
}

/// Every station whose 1-second data is published in the NGDC RSTN archive.
pub const STATIONS: &[Station] = &[
    Station {
        name: "Sagamore Hill",
        slug: "sagamore-hill",
        code: "K7O",
    },
    Station {
        name: "San Vito",
        slug: "san-vito",
        code: "LIS",
    },
    Station {
        name: "Palehua",
        slug: "palehua",
        code: "PHF",
    },
    Station {
        name: "Learmonth",
        slug: "learmonth",
        code: "APL",
    },
];

impl Station {
    /// Looks a station up by name, directory slug or short code.
    ///
    /// Matching ignores ASCII case and treats spaces, hyphens and underscores
    /// as the same separator, so `"Sagamore Hill"`, `"sagamore-hill"` and
    /// `"k7o"` all find the same station.
    ///
    /// # Examples
    ///
    /// ```
    /// use rstn::Station;
    ///
    /// let station = Station::find("san vito").unwrap();
    /// assert_eq!(station.code, "LIS");
    /// assert!(Station::find("Holloman").is_none());
    /// ```
    pub fn find(query: &str) -> Option<&'static Station> {
        let wanted = normalize(query);
        if wanted.is_empty() {
            return None;
        }
        STATIONS.iter().find(|station| {
            normalize(station.name) == wanted
                || station.slug == wanted
                || station.code.eq_ignore_ascii_case(&wanted)
        })
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

fn normalize(query: &str) -> String {
    query
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
