//! Tunable thresholds and resource lookup tables.
//!
//! Everything has a built-in default; a TOML file only needs the keys it
//! changes:
//!
//! ```toml
//! [thresholds]
//! merge_gap_minutes = 90
//!
//! [input]
//! header_rows = 2
//!
//! [resource_columns]
//! "Sound System" = "F"
//!
//! [common_names]
//! "Sound System" = "Speakers"
//! ```
//!
//! Resource entries extend the built-in tables rather than replace them.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Duration;
use serde::Deserialize;

use crate::due::DueRules;
use crate::error::{BookingError, Result};

/// Column that collects resources missing from the column table.
pub const OVERFLOW_COLUMN: char = 'H';
/// Columns a known resource may be assigned to.
pub const RESOURCE_COLUMNS: [char; 4] = ['D', 'E', 'F', 'G'];

const DEFAULT_COLUMNS: [(&str, char); 4] = [
    ("Laptop Cart", 'D'),
    ("Document Camera", 'E'),
    ("Portable Projector", 'F'),
    ("Clicker Set", 'G'),
];

const DEFAULT_COMMON_NAMES: [(&str, &str); 5] = [
    ("Laptop Cart", "Laptops"),
    ("Document Camera", "Doc Cam"),
    ("Portable Projector", "Projector"),
    ("Clicker Set", "Clickers"),
    ("Portable Speaker", "Speaker"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Same-resource bookings closer than this fuse into one.
    pub merge_gap_minutes: i64,
    /// A neighbour closer than this turns a window into an exact instant.
    pub adjacent_gap_minutes: i64,
    /// Lead time for exact-instant windows on the dashboard.
    pub instant_lead_minutes: i64,
    /// Lead time for open and ranged windows on the dashboard.
    pub lookahead_minutes: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            merge_gap_minutes: 120,
            adjacent_gap_minutes: 15,
            instant_lead_minutes: 60,
            lookahead_minutes: 120,
        }
    }
}

impl Thresholds {
    pub fn merge_gap(&self) -> Duration {
        Duration::minutes(self.merge_gap_minutes)
    }

    pub fn adjacent_gap(&self) -> Duration {
        Duration::minutes(self.adjacent_gap_minutes)
    }

    pub fn due_rules(&self) -> DueRules {
        DueRules {
            lookahead: Duration::minutes(self.lookahead_minutes),
            instant_lead: Duration::minutes(self.instant_lead_minutes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Leading sheet rows to skip (titles, column headers).
    pub header_rows: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { header_rows: 1 }
    }
}

/// Where a resource is marked on the output sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceColumn {
    /// A dedicated column, marked with `X`.
    Marked(char),
    /// The overflow column, which holds the resource name itself.
    Overflow,
}

/// Resource name lookups for the sheet and the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCatalog {
    columns: BTreeMap<String, char>,
    common_names: BTreeMap<String, String>,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS
                .iter()
                .map(|(name, col)| (name.to_string(), *col))
                .collect(),
            common_names: DEFAULT_COMMON_NAMES
                .iter()
                .map(|(name, label)| (name.to_string(), label.to_string()))
                .collect(),
        }
    }
}

impl ResourceCatalog {
    /// Add or replace entries. Columns must be one of D–G.
    ///
    /// # Errors
    /// Returns `BookingError::Config` for a column outside D–G.
    pub fn with_overrides(
        mut self,
        columns: BTreeMap<String, char>,
        common_names: BTreeMap<String, String>,
    ) -> Result<Self> {
        for (name, col) in columns {
            let col = col.to_ascii_uppercase();
            if !RESOURCE_COLUMNS.contains(&col) {
                return Err(BookingError::Config(format!(
                    "resource '{}' mapped to column '{}'; expected one of D, E, F, G",
                    name, col
                )));
            }
            self.columns.insert(name, col);
        }
        self.common_names.extend(common_names);
        Ok(self)
    }

    pub fn column(&self, resource: &str) -> ResourceColumn {
        self.columns
            .get(resource)
            .map_or(ResourceColumn::Overflow, |c| ResourceColumn::Marked(*c))
    }

    /// Short display label, or the resource name itself when unmapped.
    pub fn common_name<'a>(&'a self, resource: &'a str) -> &'a str {
        self.common_names
            .get(resource)
            .map_or(resource, String::as_str)
    }

    /// First resource assigned to `column`, used for sheet headers.
    pub fn resource_for_column(&self, column: char) -> Option<&str> {
        self.columns
            .iter()
            .find(|(_, c)| **c == column)
            .map(|(name, _)| name.as_str())
    }
}

/// Full configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub thresholds: Thresholds,
    pub input: InputConfig,
    pub resources: ResourceCatalog,
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    thresholds: Thresholds,
    input: InputConfig,
    resource_columns: BTreeMap<String, char>,
    common_names: BTreeMap<String, String>,
}

impl Config {
    /// Parse a TOML document, filling unset keys with defaults.
    ///
    /// # Errors
    /// Returns `BookingError::Toml` for malformed TOML and
    /// `BookingError::Config` for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let t = &file.thresholds;
        if [
            t.merge_gap_minutes,
            t.adjacent_gap_minutes,
            t.instant_lead_minutes,
            t.lookahead_minutes,
        ]
        .iter()
        .any(|m| *m < 0)
        {
            return Err(BookingError::Config(
                "threshold minutes must not be negative".to_string(),
            ));
        }

        let resources =
            ResourceCatalog::default().with_overrides(file.resource_columns, file.common_names)?;
        Ok(Self {
            thresholds: file.thresholds,
            input: file.input,
            resources,
        })
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
