//! Grouping of classified events into maximal same-action, same-target runs.

use crate::classify::ClassifiedEvent;
use rewind_common::event::Action;

/// A maximal run of classified events sharing one action and one target.
///
/// Invariant: `events` is non-empty and every member agrees with `action` and
/// `xpath`; the events immediately before and after the run (if any) differ
/// in one of the two.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSequence {
    pub action: Action,
    pub xpath: Option<String>,
    pub events: Vec<ClassifiedEvent>,
}

impl EventSequence {
    fn start(event: ClassifiedEvent) -> Self {
        Self {
            action: event.action,
            xpath: event.xpath.clone(),
            events: vec![event],
        }
    }

    fn accepts(&self, event: &ClassifiedEvent) -> bool {
        self.action == event.action && self.xpath == event.xpath
    }
}

/// Partition a time-ordered classified stream into maximal sequences, in
/// chronological order of first occurrence.
pub fn group_event_sequences(events: &[ClassifiedEvent]) -> Vec<EventSequence> {
    let mut sequences: Vec<EventSequence> = Vec::new();

    for event in events {
        match sequences.last_mut() {
            Some(current) if current.accepts(event) => current.events.push(event.clone()),
            _ => sequences.push(EventSequence::start(event.clone())),
        }
    }

    sequences
}
