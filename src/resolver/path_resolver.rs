//! Maps a (station, date) request onto the archive's directory layout and
//! file naming.

use crate::resolver::era::{rule_for, EraRule, ERA_RULES};
use crate::resolver::error::ResolveError;
use crate::types::locator::RemoteLocator;
use crate::types::observation_date::ObservationDate;
use crate::types::station::{Station, STATIONS};
use chrono::{NaiveDate, Utc};
use log::debug;

/// Earliest date the archive format is known for.
pub const SUPPORTED_FROM: (i32, u32, u32) = (2000, 1, 1);

/// Resolves station-day requests to [`RemoteLocator`]s.
///
/// Resolution has no side effects and no hidden state: the same station,
/// date and "today" always give the same locator.
///
/// # Examples
///
/// ```
/// use rstn::{ObservationDate, PathResolver};
///
/// let resolver = PathResolver::default();
/// let date = ObservationDate::from_ymd(2002, 4, 9).unwrap();
/// let locator = resolver.resolve("Sagamore Hill", date).unwrap();
///
/// assert_eq!(locator.directory, "sagamore-hill/2002/04");
/// assert_eq!(locator.filename(), "09APR02.K7O.gz");
/// ```
#[derive(Debug, Clone)]
pub struct PathResolver {
    rules: Vec<EraRule>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self {
            rules: ERA_RULES.to_vec(),
        }
    }
}

impl PathResolver {
    /// A resolver using a custom set of naming rules. Rules are sorted by
    /// their first day.
    pub fn with_rules(mut rules: Vec<EraRule>) -> Self {
        rules.sort_by_key(|rule| rule.starts);
        Self { rules }
    }

    /// The naming rules in use, oldest first.
    pub fn rules(&self) -> &[EraRule] {
        &self.rules
    }

    /// Resolves `station` on `date`, using the current UTC date as the upper bound.
    ///
    /// # Errors
    ///
    /// * [`ResolveError::UnknownStation`] if `station` is not in the station table.
    /// * [`ResolveError::UnsupportedDate`] if `date` is before 2000-01-01 or after today.
    pub fn resolve(
        &self,
        station: &str,
        date: ObservationDate,
    ) -> Result<RemoteLocator, ResolveError> {
        self.resolve_as_of(station, date, Utc::now().date_naive())
    }

    /// Like [`PathResolver::resolve`], taking the date parts separately.
    ///
    /// # Errors
    ///
    /// Additionally returns [`ResolveError::InvalidDate`] when the parts do not
    /// form a calendar date.
    pub fn resolve_ymd(
        &self,
        station: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<RemoteLocator, ResolveError> {
        self.resolve(station, ObservationDate::from_ymd(year, month, day)?)
    }

    /// Resolves with an explicit "today". This is the pure form of [`PathResolver::resolve`].
    pub fn resolve_as_of(
        &self,
        station: &str,
        date: ObservationDate,
        today: NaiveDate,
    ) -> Result<RemoteLocator, ResolveError> {
        let station = Station::find(station).ok_or_else(|| ResolveError::UnknownStation {
            name: station.to_string(),
            known: STATIONS
                .iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
                .join(", "),
        })?;

        let earliest = earliest_supported();
        let unsupported = || ResolveError::UnsupportedDate {
            date: date.naive(),
            earliest,
            latest: today,
        };
        if date.naive() < earliest || date.naive() > today {
            return Err(unsupported());
        }
        let rule = rule_for(&self.rules, date).ok_or_else(unsupported)?;

        let directory = format!("{}/{:04}/{:02}", station.slug, date.year(), date.month());
        let locator = RemoteLocator::new(
            *station,
            date,
            directory,
            rule.compression,
            rule.filename(station, date),
            vec![rule.alternate_filename(station, date)],
        );
        debug!(
            "Resolved {} on {} to {}",
            station,
            date,
            locator.remote_path()
        );
        Ok(locator)
    }
}

fn earliest_supported() -> NaiveDate {
    let (year, month, day) = SUPPORTED_FROM;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
