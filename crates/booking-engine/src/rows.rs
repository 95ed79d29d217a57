//! Reservation sheet rows.
//!
//! # Row contract
//!
//! The sheet is read positionally; only four fields matter:
//!
//! | Field | Content                                   |
//! |-------|-------------------------------------------|
//! | 0     | start time, or empty                      |
//! | 1     | end time, or empty                        |
//! | 5     | space, e.g. `CWNG_C110 Lecture Hall`      |
//! | 6     | requested resource, or empty              |
//!
//! Rows may be shorter than seven fields; missing fields read as empty. Time
//! cells are either `H:MM AM/PM` text or the `HH:MM[:SS]` form a native
//! spreadsheet time exports to. Any other non-empty time text fails the load.
//!
//! Sheets need not be UTF-8. Legacy "CSV (Comma delimited)" exports carry
//! single-byte non-breaking spaces; cells are decoded lossily and every
//! non-ASCII character is dropped.

use std::io::Read;
use std::path::Path;

use chrono::NaiveTime;

use crate::error::{BookingError, Result};
use crate::time::parse_time;

pub const START_FIELD: usize = 0;
pub const END_FIELD: usize = 1;
pub const SPACE_FIELD: usize = 5;
pub const RESOURCE_FIELD: usize = 6;

/// One parsed sheet row. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// 1-based line in the source sheet.
    pub line: usize,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub space: Option<String>,
    pub resource: Option<String>,
}

impl Row {
    /// Parse a row from its positional fields.
    ///
    /// # Errors
    /// Returns `BookingError::Row` when a time cell holds unparseable text.
    pub fn from_fields<S: AsRef<str>>(line: usize, fields: &[S]) -> Result<Self> {
        let cell = |idx: usize| fields.get(idx).and_then(|f| clean_cell(f.as_ref()));
        let time = |idx: usize| -> Result<Option<NaiveTime>> {
            cell(idx)
                .map(|text| {
                    parse_cell_time(&text).map_err(|e| BookingError::Row {
                        line,
                        message: e.to_string(),
                    })
                })
                .transpose()
        };

        Ok(Self {
            line,
            start: time(START_FIELD)?,
            end: time(END_FIELD)?,
            space: cell(SPACE_FIELD),
            resource: cell(RESOURCE_FIELD),
        })
    }
}

/// Read every row of a CSV export, skipping `header_rows` leading records.
///
/// Records may have differing lengths. The first bad row aborts the read.
pub fn read_rows<R: Read>(reader: R, header_rows: usize) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.byte_records().enumerate() {
        let record = record?;
        if idx < header_rows {
            continue;
        }
        let fields: Vec<_> = record.iter().map(String::from_utf8_lossy).collect();
        rows.push(Row::from_fields(idx + 1, &fields)?);
    }
    Ok(rows)
}

/// Like [`read_rows`] but opens the file at `path`.
pub fn read_rows_path(path: &Path, header_rows: usize) -> Result<Vec<Row>> {
    let file = std::fs::File::open(path)?;
    read_rows(file, header_rows)
}

/// Parse a time cell: 12-hour text first, then the 24-hour export form.
pub fn parse_cell_time(text: &str) -> Result<NaiveTime> {
    parse_time(text).or_else(|err| {
        ["%H:%M:%S", "%H:%M"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
            .ok_or(err)
    })
}

/// Strip non-ASCII characters and surrounding whitespace; blank becomes `None`.
fn clean_cell(raw: &str) -> Option<String> {
    let ascii: String = raw.chars().filter(char::is_ascii).collect();
    let trimmed = ascii.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
