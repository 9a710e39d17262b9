//! `EventKey`, the hash key identifying a single hook point (SPEC_FULL.md §3).

use std::fmt;

/// The host VM's fixed event-type enumeration. Values are stable across a
/// process lifetime and mirror the host's own numbering so that the raw
/// `i32` the host hands the `event()` hook can be converted losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EventType {
    /// Fired once when an instance is created.
    Create = 0,
    /// Fired once when an instance is destroyed.
    Destroy = 1,
    /// Fired by alarm countdowns 0..12.
    Alarm = 2,
    /// Fired every step; sub-kind distinguishes normal/pre/post.
    Step = 3,
    /// Fired on collision with another object; sub-kind is the other
    /// object's index.
    Collision = 4,
    /// Catch-all for events not covered by the other variants (animation
    /// end, room start/end, game start/end, no-more-health, ...).
    Other = 5,
    /// Fired during the draw phase; sub-kind is the draw sub-event.
    Draw = 6,
}

impl EventType {
    /// Converts a raw host event-type integer into an [`EventType`].
    /// Unknown values fall back to [`EventType::Other`] rather than
    /// panicking, since a future host revision may introduce event types
    /// this MRE build does not know about yet.
    pub fn from_raw(raw: i32) -> EventType {
        match raw {
            0 => EventType::Create,
            1 => EventType::Destroy,
            2 => EventType::Alarm,
            3 => EventType::Step,
            4 => EventType::Collision,
            6 => EventType::Draw,
            _ => EventType::Other,
        }
    }

    /// The maximum legal sub-index (exclusive) for this event type, used
    /// when resizing an object's event-listener array (SPEC_FULL.md §4.4).
    pub fn max_sub_index(self) -> u32 {
        match self {
            EventType::Create | EventType::Destroy => 1,
            EventType::Step => 3,
            EventType::Alarm => crate::ALARM_COUNT,
            EventType::Collision => u32::MAX, // bounded by #objects at call time
            EventType::Other | EventType::Draw => crate::UNKNOWN_SUBEVENT_BOUND,
        }
    }
}

/// Step sub-event kinds (SPEC_FULL.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StepKind {
    /// The step event proper.
    Normal = 0,
    /// Runs before [`StepKind::Normal`].
    Pre = 1,
    /// Runs after [`StepKind::Normal`].
    Post = 2,
}

/// A triple `(event-type, event-number, object-index)` identifying a single
/// hook point. Hashes and compares by all three fields together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    /// The event type.
    pub event_type: EventType,
    /// Disambiguates within `event_type` (alarm index, step kind, collision
    /// target object, "other"/"draw" sub-kind).
    pub event_number: u32,
    /// The object class this event fires on.
    pub object_index: u32,
}

impl EventKey {
    /// Builds a new event key.
    pub fn new(event_type: EventType, event_number: u32, object_index: u32) -> Self {
        Self {
            event_type,
            event_number,
            object_index,
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:?}, {}, obj#{})",
            self.event_type, self.event_number, self.object_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_hashes_and_compares_by_all_three_fields() {
        let a = EventKey::new(EventType::Alarm, 0, 5);
        let b = EventKey::new(EventType::Alarm, 0, 5);
        let c = EventKey::new(EventType::Alarm, 1, 5);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn unknown_raw_event_type_falls_back_to_other() {
        assert_eq!(EventType::from_raw(999), EventType::Other);
    }
}
