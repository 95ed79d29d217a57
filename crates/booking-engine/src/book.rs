//! One loaded reservation sheet.
//!
//! A [`Book`] runs the whole pipeline once (rows → room index → merge →
//! sorted reservations → windows) and then answers dashboard polls. Loading a
//! new sheet means building a new `Book`; completion flags do not carry over.

use std::io::Read;

use chrono::NaiveTime;

use crate::config::{Config, ResourceCatalog, Thresholds};
use crate::due::{self, DueItem, DueRules};
use crate::error::Result;
use crate::event::Event;
use crate::layout::format_space;
use crate::merge::merge_rooms;
use crate::rooms::RoomIndex;
use crate::rows::{read_rows, Row};
use crate::time::format_time;
use crate::window::{delivery_window, pickup_window, Window};

#[derive(Debug, Clone)]
pub struct Book {
    rooms: RoomIndex,
    reservations: Vec<Event>,
    rules: DueRules,
}

impl Book {
    /// Build a book from already-parsed rows.
    ///
    /// Windows are computed against the pre-merge room index, so a merged
    /// event's neighbours are the original bookings around it.
    pub fn from_rows(rows: &[Row], thresholds: &Thresholds) -> Self {
        let rooms = RoomIndex::from_rows(rows);
        let merged = merge_rooms(&rooms, thresholds.merge_gap());

        let mut reservations = merged.reservations();
        for event in &mut reservations {
            let room = rooms.room(event.space());
            event.delivery = delivery_window(event, room, thresholds.adjacent_gap());
            event.pickup = pickup_window(event, room, thresholds.adjacent_gap());
        }
        tracing::info!(reservations = reservations.len(), "book loaded");

        Self {
            rooms,
            reservations,
            rules: thresholds.due_rules(),
        }
    }

    /// Read a CSV sheet and build a book from it. The first unparseable time
    /// aborts the load.
    pub fn load_csv<R: Read>(reader: R, config: &Config) -> Result<Self> {
        let rows = read_rows(reader, config.input.header_rows)?;
        Ok(Self::from_rows(&rows, &config.thresholds))
    }

    /// The pre-merge room index.
    pub fn rooms(&self) -> &RoomIndex {
        &self.rooms
    }

    /// Merged reservations in chronological order, windows filled in.
    pub fn reservations(&self) -> &[Event] {
        &self.reservations
    }

    pub fn get(&self, id: usize) -> Option<&Event> {
        self.reservations.get(id)
    }

    pub fn rules(&self) -> &DueRules {
        &self.rules
    }

    pub fn current_deliveries(&self, now: NaiveTime) -> Vec<DueItem<'_>> {
        due::current_deliveries(&self.reservations, now, &self.rules)
    }

    pub fn current_pickups(&self, now: NaiveTime) -> Vec<DueItem<'_>> {
        due::current_pickups(&self.reservations, now, &self.rules)
    }

    /// Like [`Book::current_deliveries`] with an explicit rule set.
    pub fn deliveries_with(&self, now: NaiveTime, rules: &DueRules) -> Vec<DueItem<'_>> {
        due::current_deliveries(&self.reservations, now, rules)
    }

    /// Like [`Book::current_pickups`] with an explicit rule set.
    pub fn pickups_with(&self, now: NaiveTime, rules: &DueRules) -> Vec<DueItem<'_>> {
        due::current_pickups(&self.reservations, now, rules)
    }

    /// Flip the delivery-done flag of reservation `id`, returning the new
    /// value, or `None` for an unknown id.
    pub fn toggle_delivery(&mut self, id: usize) -> Option<bool> {
        let event = self.reservations.get_mut(id)?;
        event.delivery_done = !event.delivery_done;
        Some(event.delivery_done)
    }

    /// Flip the pickup-done flag of reservation `id`.
    pub fn toggle_pickup(&mut self, id: usize) -> Option<bool> {
        let event = self.reservations.get_mut(id)?;
        event.pickup_done = !event.pickup_done;
        Some(event.pickup_done)
    }
}

/// Dashboard line for one side of a reservation:
/// `"8:50 AM | C110 | Clickers, Laptops"`.
///
/// An open delivery reads `"By <start>"` and an open pickup `"After <end>"`.
pub fn display_line(
    event: &Event,
    window: Window,
    is_pickup: bool,
    catalog: &ResourceCatalog,
) -> String {
    let when = match (window, is_pickup) {
        (Window::Open, false) => format!("By {}", format_time(event.start())),
        (Window::Open, true) => format!("After {}", format_time(event.end())),
        (w, _) => w.to_string(),
    };
    let names: Vec<&str> = event
        .resources()
        .iter()
        .map(|r| catalog.common_name(r))
        .collect();
    format!(
        "{} | {} | {}",
        when,
        format_space(event.space()),
        names.join(", ")
    )
}

impl DueItem<'_> {
    pub fn delivery_line(&self, catalog: &ResourceCatalog) -> String {
        display_line(self.event, self.event.delivery_window(), false, catalog)
    }

    pub fn pickup_line(&self, catalog: &ResourceCatalog) -> String {
        display_line(self.event, self.event.pickup_window(), true, catalog)
    }
}
