//! Parses the fixed-width RSTN 1-second text format into a Polars `DataFrame`.
//!
//! A record line is a 4 character station tag, a `YYYYMMDDhhmmss` UTC
//! timestamp and eight flux values (one per [`FluxChannel`]) in fixed-width
//! fields. The field width grew over the years: 6 characters before 2008,
//! 7 until 2014 and 8 from 2015.

use crate::flux_data::error::FluxDataError;
use crate::types::channel::FluxChannel;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;
use polars::prelude::*;
use std::path::Path;
use tokio::task;

/// Characters before the first flux field.
const PREFIX_LEN: usize = 18;
const CHANNELS: usize = FluxChannel::ALL.len();

/// Name of the timestamp column.
pub const TIME_COLUMN: &str = "time";

/// One parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluxRecord {
    pub time: NaiveDateTime,
    /// Values in [`FluxChannel::ALL`] order; `None` where the field is blank
    /// or not a number.
    pub flux: [Option<i64>; CHANNELS],
}

/// Flux field width the archive used for data of `year`.
pub fn field_width_for_year(year: i32) -> usize {
    if year >= 2015 {
        8
    } else if year >= 2008 {
        7
    } else {
        6
    }
}

/// A line whose length matches a whole layout tells its own width; files
/// around the format changes do not always follow the calendar.
fn field_width_for_line(line: &str, fallback: usize) -> usize {
    (6..=8)
        .find(|width| line.len() == PREFIX_LEN + CHANNELS * width)
        .unwrap_or(fallback)
}

/// Parses one record line with flux fields of `width` characters.
pub fn parse_line(line: &str, width: usize) -> Result<FluxRecord, String> {
    let stamp = line
        .get(4..PREFIX_LEN)
        .ok_or_else(|| format!("line too short for a timestamp ({} chars)", line.len()))?;
    if !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid timestamp '{stamp}'"));
    }
    let number = |range: std::ops::Range<usize>| -> u32 {
        stamp[range].parse().unwrap_or(u32::MAX)
    };
    let year = number(0..4) as i32;
    let time = NaiveDate::from_ymd_opt(year, number(4..6), number(6..8))
        .and_then(|date| date.and_hms_opt(number(8..10), number(10..12), number(12..14)))
        .ok_or_else(|| format!("invalid timestamp '{stamp}'"))?;

    let mut flux = [None; CHANNELS];
    for (i, value) in flux.iter_mut().enumerate() {
        let start = PREFIX_LEN + i * width;
        let end = if i == CHANNELS - 1 {
            line.len()
        } else {
            (start + width).min(line.len())
        };
        *value = line
            .get(start..end)
            .and_then(|field| field.trim().parse::<i64>().ok());
    }

    Ok(FluxRecord { time, flux })
}

/// Parses a whole day file. `year` picks the default field width.
///
/// Blank lines are skipped. Errors carry the 1-based line number.
pub fn parse_flux_text(text: &str, year: i32) -> Result<Vec<FluxRecord>, (usize, String)> {
    let default_width = field_width_for_year(year);
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let line = line.trim_end_matches('\r');
            parse_line(line, field_width_for_line(line, default_width))
                .map_err(|message| (index + 1, message))
        })
        .collect()
}

/// Builds the flux `DataFrame`: a millisecond `time` column (UTC wall time)
/// and one nullable Int64 column per channel, named by its MHz value.
pub fn records_to_dataframe(records: &[FluxRecord]) -> PolarsResult<DataFrame> {
    let time = DatetimeChunked::from_naive_datetime(
        PlSmallStr::from_static(TIME_COLUMN),
        records.iter().map(|r| r.time),
        TimeUnit::Milliseconds,
    )
    .into_series();

    let mut columns = Vec::with_capacity(CHANNELS + 1);
    columns.push(Column::from(time));
    for (i, channel) in FluxChannel::ALL.iter().enumerate() {
        let values: Vec<Option<i64>> = records.iter().map(|r| r.flux[i]).collect();
        columns.push(Column::from(Series::new(channel.column_name().into(), values)));
    }
    DataFrame::new(columns)
}

/// Reads and parses a decompressed day file on a blocking thread.
pub async fn read_flux_file(path: &Path, year: i32) -> Result<DataFrame, FluxDataError> {
    let path_buf = path.to_path_buf();
    let df = task::spawn_blocking(move || {
        let bytes =
            std::fs::read(&path_buf).map_err(|e| FluxDataError::Io(path_buf.clone(), e))?;
        let text = String::from_utf8_lossy(&bytes);
        let records = parse_flux_text(&text, year).map_err(|(line, message)| {
            FluxDataError::Parse {
                path: path_buf.clone(),
                line,
                message,
            }
        })?;
        Ok::<DataFrame, FluxDataError>(records_to_dataframe(&records)?)
    })
    .await??;
    info!("Loaded {} records from {:?}", df.height(), path);
    Ok(df)
}
