//! Dated naming conventions of the RSTN archive.
//!
//! The archive has renamed its files over the years. Each convention is an
//! [`EraRule`] that applies from its first day until the next rule starts.
//! Adding a new convention means appending a rule to [`ERA_RULES`]; existing
//! rules stay untouched.

use crate::types::observation_date::ObservationDate;
use crate::types::station::Station;
use serde::Serialize;

/// Letter case of the month abbreviation and station code in a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterCase {
    Upper,
    Lower,
}

impl LetterCase {
    fn apply(&self, text: &str) -> String {
        match self {
            LetterCase::Upper => text.to_ascii_uppercase(),
            LetterCase::Lower => text.to_ascii_lowercase(),
        }
    }

    fn other(&self) -> LetterCase {
        match self {
            LetterCase::Upper => LetterCase::Lower,
            LetterCase::Lower => LetterCase::Upper,
        }
    }
}

/// Compression applied to archive files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Compression {
    Gzip,
    None,
}

impl Compression {
    pub fn suffix(&self) -> &'static str {
        match self {
            Compression::Gzip => ".gz",
            Compression::None => "",
        }
    }

    /// `name` without this compression's suffix; unchanged if it does not carry it.
    pub fn strip_suffix<'a>(&self, name: &'a str) -> &'a str {
        let suffix = self.suffix();
        if suffix.is_empty() {
            return name;
        }
        name.strip_suffix(suffix).unwrap_or(name)
    }
}

/// One naming convention and the first day it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EraRule {
    /// First day (year, month, day) the rule applies to.
    pub starts: (i32, u32, u32),
    pub case: LetterCase,
    pub compression: Compression,
}

/// The archive's conventions, oldest first.
pub const ERA_RULES: &[EraRule] = &[
    // 09APR02.K7O.gz
    EraRule {
        starts: (2000, 1, 1),
        case: LetterCase::Upper,
        compression: Compression::Gzip,
    },
    // 16oct14.lis.gz
    EraRule {
        starts: (2013, 1, 1),
        case: LetterCase::Lower,
        compression: Compression::Gzip,
    },
];

impl EraRule {
    pub fn applies_to(&self, date: ObservationDate) -> bool {
        (date.year(), date.month(), date.day()) >= self.starts
    }

    /// The filename this rule prescribes for `station` on `date`.
    pub fn filename(&self, station: &Station, date: ObservationDate) -> String {
        Self::format_name(self.case, self.compression, station, date)
    }

    /// The same name in the other letter case. The archive does not switch
    /// case cleanly at era boundaries, so both spellings are worth trying.
    pub fn alternate_filename(&self, station: &Station, date: ObservationDate) -> String {
        Self::format_name(self.case.other(), self.compression, station, date)
    }

    fn format_name(
        case: LetterCase,
        compression: Compression,
        station: &Station,
        date: ObservationDate,
    ) -> String {
        format!(
            "{:02}{}{}.{}{}",
            date.day(),
            case.apply(date.month_abbreviation()),
            date.short_year(),
            case.apply(station.code),
            compression.suffix()
        )
    }
}

/// The latest rule in `rules` (sorted oldest first) that applies to `date`.
pub fn rule_for(rules: &[EraRule], date: ObservationDate) -> Option<&EraRule> {
    rules.iter().rev().find(|rule| rule.applies_to(date))
}
