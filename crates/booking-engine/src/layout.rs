//! Lay reservations out on the delivery sheet template.
//!
//! One sheet row per reservation, starting at row 2 (row 1 holds headers):
//!
//! | Column | Content                                              |
//! |--------|------------------------------------------------------|
//! | B      | short space label                                    |
//! | D–G    | `X` for each resource mapped to that column          |
//! | H      | names of resources without a dedicated column        |
//! | J      | delivery window                                      |
//! | K      | start                                                |
//! | M      | end                                                  |
//! | N      | pickup window                                        |
//!
//! Every other reservation (the first, third, ...) is highlighted across A–O.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::config::{ResourceCatalog, ResourceColumn, OVERFLOW_COLUMN, RESOURCE_COLUMNS};
use crate::event::Event;
use crate::time::format_time;

pub const FIRST_ROW: u32 = 2;
pub const HEADER_ROW: u32 = 1;
pub const FIRST_COLUMN: char = 'A';
pub const LAST_COLUMN: char = 'O';

pub const SPACE_COLUMN: char = 'B';
pub const DELIVERY_COLUMN: char = 'J';
pub const START_COLUMN: char = 'K';
pub const END_COLUMN: char = 'M';
pub const PICKUP_COLUMN: char = 'N';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    Plain,
    Highlight,
}

/// A single cell assignment for the output sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellWrite {
    pub row: u32,
    pub column: char,
    pub value: String,
    pub style: CellStyle,
}

/// `"CWNG_C110 Lecture Hall"` → `"C110"`: drop everything up to the first
/// underscore, then cut at the first space.
pub fn format_space(space: &str) -> String {
    let after_prefix = space.split_once('_').map_or(space, |(_, rest)| rest);
    after_prefix
        .split(' ')
        .next()
        .unwrap_or(after_prefix)
        .to_string()
}

/// File stem for a sheet prepared on `today`: tomorrow as `Mon-DD`.
pub fn output_stem(today: NaiveDate) -> String {
    (today + Duration::days(1)).format("%b-%d").to_string()
}

/// Header cells for row 1.
pub fn header_cells(catalog: &ResourceCatalog) -> Vec<CellWrite> {
    let mut headers: Vec<(char, String)> = vec![(SPACE_COLUMN, "Room".to_string())];
    for col in RESOURCE_COLUMNS {
        if let Some(resource) = catalog.resource_for_column(col) {
            headers.push((col, catalog.common_name(resource).to_string()));
        }
    }
    headers.extend([
        (OVERFLOW_COLUMN, "Other".to_string()),
        (DELIVERY_COLUMN, "Deliver".to_string()),
        (START_COLUMN, "Start".to_string()),
        (END_COLUMN, "End".to_string()),
        (PICKUP_COLUMN, "Pick Up".to_string()),
    ]);
    headers
        .into_iter()
        .map(|(column, value)| CellWrite {
            row: HEADER_ROW,
            column,
            value,
            style: CellStyle::Plain,
        })
        .collect()
}

/// Cells for every reservation, in reservation order.
///
/// Highlighted rows get a write for every column A–O (empty where there is
/// no value) so the style covers the whole row.
pub fn reservation_cells(reservations: &[Event], catalog: &ResourceCatalog) -> Vec<CellWrite> {
    let mut cells = Vec::new();
    for (idx, event) in reservations.iter().enumerate() {
        let row = FIRST_ROW + idx as u32;
        let style = if idx % 2 == 0 {
            CellStyle::Highlight
        } else {
            CellStyle::Plain
        };

        let mut values = row_values(event, catalog);
        if style == CellStyle::Highlight {
            for column in FIRST_COLUMN..=LAST_COLUMN {
                if !values.iter().any(|(c, _)| *c == column) {
                    values.push((column, String::new()));
                }
            }
        }
        values.sort_by_key(|(c, _)| *c);

        cells.extend(values.into_iter().map(|(column, value)| CellWrite {
            row,
            column,
            value,
            style,
        }));
    }
    cells
}

fn row_values(event: &Event, catalog: &ResourceCatalog) -> Vec<(char, String)> {
    let mut values = vec![
        (SPACE_COLUMN, format_space(event.space())),
        (DELIVERY_COLUMN, event.delivery_window().to_string()),
        (START_COLUMN, format_time(event.start())),
        (END_COLUMN, format_time(event.end())),
        (PICKUP_COLUMN, event.pickup_window().to_string()),
    ];

    let mut overflow: Vec<&str> = Vec::new();
    for resource in event.resources() {
        match catalog.column(resource) {
            ResourceColumn::Marked(col) => {
                if !values.iter().any(|(c, _)| *c == col) {
                    values.push((col, "X".to_string()));
                }
            }
            ResourceColumn::Overflow => overflow.push(resource),
        }
    }
    if !overflow.is_empty() {
        values.push((OVERFLOW_COLUMN, overflow.join(", ")));
    }
    values
}
