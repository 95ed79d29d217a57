//! Per-space grouping of the bookings in one sheet.
//!
//! Built once per load from the sheet rows. Besides feeding the merger, the
//! pre-merge index is the neighbour table used when computing delivery and
//! pickup windows.
//!
//! # Continuation rows
//!
//! A booking that requests several resources spans several rows: the first
//! carries the times, space and first resource, the following rows carry only
//! a resource. A row with neither times nor a resource closes the chain, so a
//! later resource-only row is dropped instead of attaching to an older event.

use std::collections::BTreeMap;

use crate::event::{chronological, Event};
use crate::rows::Row;

/// Bookings grouped by space, each list in source-row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomIndex {
    rooms: BTreeMap<String, Vec<Event>>,
}

impl RoomIndex {
    /// Group sheet rows into events per space.
    ///
    /// Rows without a space or without both times are skipped, as are rows
    /// whose start is not before their end. A skipped row closes the
    /// continuation chain. Resource-only rows attach to the preceding event
    /// while the chain is open.
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut rooms: BTreeMap<String, Vec<Event>> = BTreeMap::new();
        // (space, index) of the event that continuation rows attach to.
        let mut open: Option<(String, usize)> = None;
        let mut dropped = 0usize;
        let mut skipped = 0usize;

        for row in rows {
            match (row.start, row.end, row.space.as_deref()) {
                (Some(start), Some(end), Some(space)) => {
                    let mut event = match Event::new(space, start, end) {
                        Ok(event) => event,
                        Err(err) => {
                            // Overnight or reversed spans cannot be scheduled on one day.
                            skipped += 1;
                            tracing::warn!(line = row.line, error = %err, "skipping row");
                            open = None;
                            continue;
                        }
                    };
                    if let Some(resource) = &row.resource {
                        event.add_resource(resource.as_str());
                    }
                    let list = rooms.entry(space.to_string()).or_default();
                    list.push(event);
                    open = Some((space.to_string(), list.len() - 1));
                }
                (None, None, _) => match &row.resource {
                    None => open = None,
                    Some(resource) => match &open {
                        Some((space, idx)) => {
                            if let Some(event) = rooms.get_mut(space).and_then(|l| l.get_mut(*idx)) {
                                event.add_resource(resource.as_str());
                            }
                        }
                        None => {
                            dropped += 1;
                            tracing::warn!(
                                line = row.line,
                                resource = %resource,
                                "resource row has no event to attach to"
                            );
                        }
                    },
                },
                _ => open = None,
            }
        }

        let index = Self { rooms };
        tracing::info!(
            spaces = index.space_count(),
            events = index.event_count(),
            dropped,
            skipped,
            "built room index"
        );
        index
    }

    pub(crate) fn from_map(rooms: BTreeMap<String, Vec<Event>>) -> Self {
        Self { rooms }
    }

    /// Bookings of `space` in stored order; empty for an unknown space.
    pub fn room(&self, space: &str) -> &[Event] {
        self.rooms.get(space).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Bookings of `space` in chronological order.
    pub fn sorted_room(&self, space: &str) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.room(space).iter().collect();
        events.sort_by(|a, b| chronological(a, b));
        events
    }

    pub fn spaces(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Event])> {
        self.rooms.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn space_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn event_count(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }

    /// Every event that requests equipment, across all spaces, in
    /// chronological order. The sort is stable, so equal spans keep space
    /// order.
    pub fn reservations(&self) -> Vec<Event> {
        let mut reservations: Vec<Event> = self
            .rooms
            .values()
            .flatten()
            .filter(|e| e.is_reservation())
            .cloned()
            .collect();
        reservations.sort_by(chronological);
        reservations
    }
}
