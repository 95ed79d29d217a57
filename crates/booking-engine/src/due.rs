//! Which deliveries and pickups need attention right now.
//!
//! The dashboard polls these functions against the wall clock (about once a
//! minute). They are pure: the result depends only on the reservations and
//! the clock value passed in.

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::event::Event;
use crate::time::distance;
use crate::window::Window;

/// Ranking tier of a due item. Only one tier exists so far; the field is kept
/// so renderers can already sort on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Standard,
}

/// A reservation that currently needs a delivery or pickup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueItem<'a> {
    /// Position in the reservation list; stable for the lifetime of a book.
    pub id: usize,
    pub event: &'a Event,
    pub priority: Priority,
}

/// Thresholds applied by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueRules {
    /// How far ahead open and ranged windows start showing.
    pub lookahead: Duration,
    /// How far ahead an exact-instant window starts showing.
    pub instant_lead: Duration,
}

impl Default for DueRules {
    fn default() -> Self {
        Self {
            lookahead: Duration::hours(2),
            instant_lead: Duration::minutes(60),
        }
    }
}

/// `true` when `event`'s delivery should be on the board at `now`.
pub fn delivery_due(event: &Event, now: NaiveTime, rules: &DueRules) -> bool {
    match event.delivery_window() {
        Window::Open => now < event.start() && distance(now, event.start()) < rules.lookahead,
        Window::At { time } => now < time && distance(now, time) < rules.instant_lead,
        Window::Between { earlier, later } => {
            earlier < now && now < later && distance(now, later) < rules.lookahead
        }
    }
}

/// `true` when `event`'s pickup should be on the board at `now`.
///
/// A ranged window also fires within the instant lead of its earlier bound,
/// on either side of it.
pub fn pickup_due(event: &Event, now: NaiveTime, rules: &DueRules) -> bool {
    match event.pickup_window() {
        Window::Open => now < event.end() && distance(now, event.end()) < rules.lookahead,
        Window::At { time } => now < time && distance(now, time) < rules.instant_lead,
        Window::Between { earlier, later } => {
            (earlier < now && now < later) || distance(now, earlier) < rules.instant_lead
        }
    }
}

/// Reservations whose delivery is due at `now`, in reservation order.
pub fn current_deliveries<'a>(
    reservations: &'a [Event],
    now: NaiveTime,
    rules: &DueRules,
) -> Vec<DueItem<'a>> {
    collect_due(reservations, |e| delivery_due(e, now, rules))
}

/// Reservations whose pickup is due at `now`, in reservation order.
pub fn current_pickups<'a>(
    reservations: &'a [Event],
    now: NaiveTime,
    rules: &DueRules,
) -> Vec<DueItem<'a>> {
    collect_due(reservations, |e| pickup_due(e, now, rules))
}

fn collect_due<'a>(reservations: &'a [Event], due: impl Fn(&Event) -> bool) -> Vec<DueItem<'a>> {
    reservations
        .iter()
        .enumerate()
        .filter(|(_, event)| due(event))
        .map(|(id, event)| DueItem {
            id,
            event,
            priority: Priority::default(),
        })
        .collect()
}
