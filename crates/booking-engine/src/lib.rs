//! # booking-engine
//!
//! Turns a room reservation sheet into an equipment delivery schedule.
//!
//! Bookings are grouped by space, nearby bookings of the same equipment are
//! fused into continuous occupancy, and every resulting reservation gets a
//! delivery window (before it starts) and a pickup window (after it ends)
//! that avoid the neighbouring bookings of the room. A dashboard can then poll
//! which deliveries and pickups are due against the current clock.
//!
//! ## Quick start
//!
//! ```rust
//! use booking_engine::{Book, Config};
//!
//! let sheet = "\
//! Start,End,Event,Org,Count,Space,Resource
//! 9:00 AM,10:00 AM,CHEM 110,Chem,24,CWNG_C110 Lecture Hall,Laptop Cart
//! 10:10 AM,11:00 AM,CHEM 110,Chem,24,CWNG_C110 Lecture Hall,Laptop Cart
//! ";
//! let book = Book::load_csv(sheet.as_bytes(), &Config::default()).unwrap();
//! assert_eq!(book.reservations().len(), 1);
//! assert_eq!(
//!     book.reservations()[0].render_summary(),
//!     "9:00 AM - 11:00 AM, CWNG_C110 Lecture Hall, Laptop Cart"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`time`] — time-of-day distance, parsing and formatting
//! - [`event`] — the reservation entity and its ordering
//! - [`rows`] — sheet row contract and CSV ingestion
//! - [`rooms`] — per-space index built from rows
//! - [`merge`] — fixed-point fusion of same-resource bookings
//! - [`window`] — delivery and pickup windows
//! - [`due`] — which deliveries and pickups are due now
//! - [`book`] — one loaded sheet, end to end
//! - [`config`] — thresholds and resource lookup tables
//! - [`layout`] — placement of reservations on the output sheet
//! - [`sheet`] — CSV and JSON output sinks
//! - [`error`] — Error types

pub mod book;
pub mod config;
pub mod due;
pub mod error;
pub mod event;
pub mod layout;
pub mod merge;
pub mod rooms;
pub mod rows;
pub mod sheet;
pub mod time;
pub mod window;

pub use book::{display_line, Book};
pub use config::{Config, ResourceCatalog, Thresholds};
pub use due::{current_deliveries, current_pickups, DueItem, DueRules, Priority};
pub use error::BookingError;
pub use event::{chronological, Event};
pub use merge::{merge_room, merge_rooms};
pub use rooms::RoomIndex;
pub use rows::{read_rows, Row};
pub use time::{distance, format_time, parse_time};
pub use window::{delivery_window, pickup_window, Window};
