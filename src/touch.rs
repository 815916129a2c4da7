//! Browser touch adapter: DOM `TouchEvent`s to [`ContactEvent`]s.
//!
//! One DOM event may report several changed fingers. Each changed touch
//! becomes its own [`ContactEvent`], and every event carries the full list of
//! touches still on the surface so a move can resync all of them.

#[cfg(test)]
#[path = "touch_test.rs"]
mod touch_test;

use web_sys::{Touch, TouchEvent, TouchList};

use crate::camera::Point;
use crate::cursor::ContactId;
use crate::input::{Contact, ContactEvent, Phase};

/// Map a DOM touch event type to a contact phase. Cancel collapses to `Up`.
#[must_use]
pub fn phase_for_event_type(event_type: &str) -> Option<Phase> {
    match event_type {
        "touchstart" => Some(Phase::Down),
        "touchmove" => Some(Phase::Move),
        "touchend" | "touchcancel" => Some(Phase::Up),
        _ => None,
    }
}

/// Convert a DOM touch event into core events, one per changed touch.
///
/// `origin` is the canvas's top-left corner in client coordinates; positions
/// come out relative to it. Unknown event types yield nothing.
#[must_use]
pub fn contact_events(event: &TouchEvent, origin: Point) -> Vec<ContactEvent> {
    let Some(phase) = phase_for_event_type(&event.type_()) else {
        return Vec::new();
    };
    let contacts = if phase == Phase::Move { collect(&event.touches(), origin) } else { Vec::new() };
    collect(&event.changed_touches(), origin)
        .into_iter()
        .map(|c| ContactEvent { id: c.id, position: c.position, phase, contacts: contacts.clone() })
        .collect()
}

fn collect(list: &TouchList, origin: Point) -> Vec<Contact> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| to_contact(&t, origin))
        .collect()
}

fn to_contact(touch: &Touch, origin: Point) -> Contact {
    let client = Point::new(f64::from(touch.client_x()), f64::from(touch.client_y()));
    Contact { id: ContactId::from(touch.identifier()), position: client - origin }
}
