//! Delivery and pickup windows.
//!
//! Equipment has to reach a room before the reservation starts and leave it
//! after the reservation ends, without disturbing whoever else has the room.
//! The window for each side is derived from the neighbouring bookings of the
//! same space:
//!
//! - no neighbour: [`Window::Open`], any time will do;
//! - neighbour within the adjacency gap: [`Window::At`] the neighbour's
//!   boundary, treated as effectively simultaneous;
//! - otherwise: [`Window::Between`] the two boundaries.

use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::event::{chronological, Event};
use crate::time::format_time;

/// When equipment may be moved in or out of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Window {
    /// No constraint from neighbouring bookings.
    Open,
    /// At this exact instant.
    At { time: NaiveTime },
    /// Some time strictly between the two bounds.
    Between { earlier: NaiveTime, later: NaiveTime },
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Open => f.write_str("Open"),
            Window::At { time } => f.write_str(&format_time(*time)),
            Window::Between { earlier, later } => {
                write!(f, "{} - {}", format_time(*earlier), format_time(*later))
            }
        }
    }
}

/// Delivery window for `event` given every booking of its room.
///
/// The neighbour is the latest booking (by [`chronological`] order) that
/// starts strictly before `event` does. A merged event therefore never finds
/// its own first component, which shares its start.
pub fn delivery_window(event: &Event, room: &[Event], adjacent_gap: Duration) -> Window {
    let prev = room
        .iter()
        .filter(|e| e.start < event.start)
        .max_by(|a, b| chronological(a, b));

    match prev {
        None => Window::Open,
        Some(prev) if event.distance_to(prev) < adjacent_gap => Window::At { time: prev.end },
        Some(prev) => Window::Between {
            earlier: prev.end,
            later: event.start,
        },
    }
}

/// Pickup window for `event` given every booking of its room.
///
/// The neighbour is the earliest booking that starts strictly after `event`
/// ends.
pub fn pickup_window(event: &Event, room: &[Event], adjacent_gap: Duration) -> Window {
    let next = room
        .iter()
        .filter(|e| e.start > event.end)
        .min_by(|a, b| chronological(a, b));

    match next {
        None => Window::Open,
        Some(next) if event.distance_to(next) < adjacent_gap => Window::At { time: next.start },
        Some(next) => Window::Between {
            earlier: event.end,
            later: next.start,
        },
    }
}
