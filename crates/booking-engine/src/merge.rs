//! Fuse nearby bookings of the same equipment into continuous occupancy.
//!
//! A class that books a laptop cart for 9:00 and again for 10:10 in the same
//! room keeps the cart in between; delivering and collecting it twice would be
//! wasted trips. Within each space, two events fuse when their resource sets
//! are equal and non-empty and they either overlap or come within the merge
//! gap of each other. Fusion repeats until no pair qualifies, since a widened
//! span can bring further events within reach.
//!
//! Bookings of *other* equipment between the two are not considered: two
//! cart bookings 90 minutes apart fuse even if an unrelated class uses the
//! room in between.
//!
//! The fused event spans the hull of both inputs, and overlapping bookings
//! fuse regardless of their boundary distance. Copying only the absorbed
//! event's end (or start) would shrink a survivor that contains it, leaving
//! same-equipment bookings that overlap and input time left uncovered.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::event::Event;
use crate::rooms::RoomIndex;

/// Merge every space of `index`. The input is left untouched.
pub fn merge_rooms(index: &RoomIndex, merge_gap: Duration) -> RoomIndex {
    let rooms: BTreeMap<String, Vec<Event>> = index
        .iter()
        .map(|(space, events)| (space.to_string(), merge_room(events, merge_gap)))
        .collect();
    let merged = RoomIndex::from_map(rooms);
    tracing::info!(
        before = index.event_count(),
        after = merged.event_count(),
        "merged reservations"
    );
    merged
}

/// Merge one space's events to a fixed point.
///
/// Each pass looks for the first fusable pair without mutating, then applies
/// that single fusion and starts over. The event count drops by one per
/// fusion, so at most `events.len() - 1` passes find work.
pub fn merge_room(events: &[Event], merge_gap: Duration) -> Vec<Event> {
    let mut events = events.to_vec();

    while let Some((keep, absorb)) = find_fusable(&events, merge_gap) {
        let absorbed = events[absorb].clone();
        let survivor = &mut events[keep];
        tracing::debug!(
            space = survivor.space(),
            survivor = %survivor.render_summary(),
            absorbed = %absorbed.render_summary(),
            "fusing reservations"
        );
        survivor.start = survivor.start.min(absorbed.start);
        survivor.end = survivor.end.max(absorbed.end);
        events.remove(absorb);
    }

    events
}

/// Whether two events of the same space should become one.
pub fn fusable(a: &Event, b: &Event, merge_gap: Duration) -> bool {
    a.is_reservation()
        && a.resources() == b.resources()
        && (a.overlaps(b) || a.distance_to(b) < merge_gap)
}

/// First fusable pair as `(survivor, absorbed)` indices. The survivor is the
/// chronologically earlier event.
fn find_fusable(events: &[Event], merge_gap: Duration) -> Option<(usize, usize)> {
    for (i, a) in events.iter().enumerate() {
        for (j, b) in events.iter().enumerate() {
            if i != j && fusable(a, b, merge_gap) {
                return Some(if a.precedes(b) { (i, j) } else { (j, i) });
            }
        }
    }
    None
}
