//! The reservation entity: a (possibly merged) booking of one space.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::error::{BookingError, Result};
use crate::time::{distance, format_time};
use crate::window::Window;

/// One room booking with its requested equipment and derived windows.
///
/// `start < end` holds for every constructed value. The span only changes when
/// the merger widens it; the windows are filled in by the book after merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    space: String,
    pub(crate) start: NaiveTime,
    pub(crate) end: NaiveTime,
    resources: BTreeSet<String>,
    pub(crate) delivery: Window,
    pub(crate) pickup: Window,
    pub(crate) delivery_done: bool,
    pub(crate) pickup_done: bool,
}

impl Event {
    /// Create an event with no resources and open windows.
    ///
    /// # Errors
    /// Returns `BookingError::InvalidSpan` unless `start < end`.
    pub fn new(space: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        let space = space.into();
        if start >= end {
            return Err(BookingError::InvalidSpan { space, start, end });
        }
        Ok(Self {
            space,
            start,
            end,
            resources: BTreeSet::new(),
            delivery: Window::Open,
            pickup: Window::Open,
            delivery_done: false,
            pickup_done: false,
        })
    }

    /// Builder-style variant of [`Event::add_resource`].
    pub fn with_resource(mut self, name: impl Into<String>) -> Self {
        self.add_resource(name);
        self
    }

    /// Replace both windows.
    pub fn with_windows(mut self, delivery: Window, pickup: Window) -> Self {
        self.delivery = delivery;
        self.pickup = pickup;
        self
    }

    /// Add a requested resource. Adding the same name twice is a no-op.
    pub fn add_resource(&mut self, name: impl Into<String>) {
        self.resources.insert(name.into());
    }

    pub fn space(&self) -> &str {
        &self.space
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn resources(&self) -> &BTreeSet<String> {
        &self.resources
    }

    /// `true` when the event requests equipment and so belongs in the schedule.
    pub fn is_reservation(&self) -> bool {
        !self.resources.is_empty()
    }

    pub fn delivery_window(&self) -> Window {
        self.delivery
    }

    pub fn pickup_window(&self) -> Window {
        self.pickup
    }

    pub fn is_delivery_done(&self) -> bool {
        self.delivery_done
    }

    pub fn is_pickup_done(&self) -> bool {
        self.pickup_done
    }

    /// Smallest distance between any boundary of `self` and any boundary of
    /// `other`.
    ///
    /// Back-to-back bookings are close in either direction, so the measure is
    /// symmetric: `a.distance_to(b) == b.distance_to(a)`.
    pub fn distance_to(&self, other: &Event) -> Duration {
        [self.start, self.end]
            .into_iter()
            .flat_map(|a| [other.start, other.end].into_iter().map(move |b| distance(a, b)))
            .min()
            .unwrap_or_else(Duration::zero)
    }

    /// `true` when the two spans share more than a boundary instant.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `true` when `self` orders no later than `other` (see [`chronological`]).
    pub fn precedes(&self, other: &Event) -> bool {
        chronological(self, other) != Ordering::Greater
    }

    /// `"9:00 AM - 11:00 AM, CWNG_C110 Lecture Hall, Clicker Set, Laptop Cart"`
    pub fn render_summary(&self) -> String {
        let resources: Vec<&str> = self.resources.iter().map(String::as_str).collect();
        format!(
            "{} - {}, {}, {}",
            format_time(self.start),
            format_time(self.end),
            self.space,
            resources.join(", ")
        )
    }
}

/// Chronological ordering of events: earlier start first, ties broken by
/// earlier end. Events with the same span compare `Equal`, which keeps stable
/// sorts stable.
pub fn chronological(a: &Event, b: &Event) -> Ordering {
    a.start.cmp(&b.start).then(a.end.cmp(&b.end))
}
