//! Event classification: labeling raw interaction records as replayable
//! actions.
//!
//! Classification is total: every raw event either matches exactly one action
//! signature or fails with [`ClassificationError`]. At stream granularity the
//! failure is expected and non-fatal: [`find_action_events`] silently drops
//! everything that does not classify.

use rewind_common::event::{Action, EventSource, RawEvent, MOUSE_DOWN, PAGE_BODY_ID};

/// The event matched no known action signature.
#[derive(Debug, Clone)]
pub struct ClassificationError {
    pub timestamp: u64,
    pub source: u8,
}

impl std::fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "event at {} (source {}) matches no action signature",
            self.timestamp, self.source
        )
    }
}

impl std::error::Error for ClassificationError {}

/// A raw event with its assigned action and the xpath identity of its target.
///
/// Scroll events carry no xpath; the page itself is the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub action: Action,
    pub xpath: Option<String>,
    pub raw: RawEvent,
}

/// True for a trusted button-down mouse interaction.
pub fn is_mouse_down_event(event: &RawEvent) -> bool {
    EventSource::from_code(event.source) == Some(EventSource::MouseInteraction)
        && event.interaction == Some(MOUSE_DOWN)
        && event.is_trusted
}

/// True for a scroll of the page body. Scrolls of inner elements are not a
/// navigable user action and do not count.
pub fn is_scroll_event(event: &RawEvent) -> bool {
    EventSource::from_code(event.source) == Some(EventSource::Scroll)
        && event.target_id == Some(PAGE_BODY_ID)
}

/// True for a trusted input event carrying a text payload. The empty string
/// is a valid payload: clearing a field is a recordable action.
pub fn is_type_event(event: &RawEvent) -> bool {
    EventSource::from_code(event.source) == Some(EventSource::Input)
        && event.is_trusted
        && event.text.is_some()
}

/// Classify a single raw event.
pub fn classify(event: &RawEvent) -> Result<Action, ClassificationError> {
    if is_mouse_down_event(event) {
        Ok(Action::Click)
    } else if is_scroll_event(event) {
        Ok(Action::Scroll)
    } else if is_type_event(event) {
        Ok(Action::Type)
    } else {
        Err(ClassificationError {
            timestamp: event.timestamp,
            source: event.source,
        })
    }
}

/// Filter a raw stream down to the events that classify, preserving order.
pub fn find_action_events(events: &[RawEvent]) -> Vec<ClassifiedEvent> {
    events
        .iter()
        .filter_map(|event| {
            let action = classify(event).ok()?;
            let xpath = match action {
                Action::Scroll => None,
                Action::Click | Action::Type => event.xpath.clone(),
            };
            Some(ClassifiedEvent {
                action,
                xpath,
                raw: event.clone(),
            })
        })
        .collect()
}
