//! Step building: collapsing event sequences into canonical replay steps.
//!
//! Each sequence is mapped through an action-specific builder with access to
//! the immediately following sequence. The builders are pure functions over
//! `(sequence, successor)` pairs; the pipeline flattens their output and
//! re-indexes by final position.

use crate::classify::{find_action_events, ClassifiedEvent};
use crate::sequence::{group_event_sequences, EventSequence};
use rewind_common::event::{Action, RawEvent};
use rewind_common::workflow::{BrowserStep, Locator, ScrollDirection, StepAction};

fn element_locator(event: &ClassifiedEvent) -> Locator {
    Locator::Element {
        selector: event.raw.properties.clone().unwrap_or_default(),
    }
}

/// Build one click step per event in the sequence.
///
/// Exception: when the following sequence is a type run on the same element,
/// the final click is the focus-click implied by the typing and is dropped;
/// replaying the type action focuses the field itself.
pub fn build_click_steps(
    sequence: &EventSequence,
    next: Option<&EventSequence>,
) -> Vec<BrowserStep> {
    let merges_into_type = next
        .map(|n| n.action == Action::Type && n.xpath == sequence.xpath)
        .unwrap_or(false);

    let count = if merges_into_type {
        sequence.events.len().saturating_sub(1)
    } else {
        sequence.events.len()
    };

    sequence.events[..count]
        .iter()
        .map(|event| BrowserStep {
            index: 0,
            action: StepAction::Click,
            page_id: event.raw.page_id,
            locator: element_locator(event),
            value: None,
            scroll_direction: None,
            scroll_to: None,
        })
        .collect()
}

/// Collapse a keystroke run into a single input step carrying the final text.
/// Intermediate keystrokes are never replayed individually.
pub fn build_type_step(sequence: &EventSequence) -> Option<BrowserStep> {
    let last = sequence.events.last()?;

    Some(BrowserStep {
        index: 0,
        action: StepAction::Input,
        page_id: last.raw.page_id,
        locator: element_locator(last),
        value: last.raw.text.clone(),
        scroll_direction: None,
        scroll_to: None,
    })
}

/// Derive a page scroll step from a sampled scroll run.
///
/// A single sample carries no direction information and is treated as noise:
/// no step, no error. Direction reflects only the net first-to-last movement.
pub fn build_scroll_step(sequence: &EventSequence) -> Option<BrowserStep> {
    if sequence.events.len() < 2 {
        return None;
    }

    let first = sequence.events.first()?.raw.y?;
    let last_event = sequence.events.last()?;
    let last = last_event.raw.y?;

    let direction = if last > first {
        ScrollDirection::Down
    } else {
        ScrollDirection::Up
    };

    Some(BrowserStep {
        index: 0,
        action: StepAction::Scroll,
        page_id: last_event.raw.page_id,
        locator: Locator::Page,
        value: None,
        scroll_direction: Some(direction),
        scroll_to: Some(last),
    })
}

/// Map every sequence through its action builder with one-sequence lookahead,
/// flatten, and re-index by final position.
pub fn build_sequence_steps(sequences: &[EventSequence]) -> Vec<BrowserStep> {
    let mut steps: Vec<BrowserStep> = Vec::new();

    for (i, sequence) in sequences.iter().enumerate() {
        let next = sequences.get(i + 1);
        match sequence.action {
            Action::Click => steps.extend(build_click_steps(sequence, next)),
            Action::Type => steps.extend(build_type_step(sequence)),
            Action::Scroll => steps.extend(build_scroll_step(sequence)),
        }
    }

    for (index, step) in steps.iter_mut().enumerate() {
        step.index = index;
    }

    steps
}

/// Full build pipeline: classify and filter a raw event log, group it into
/// sequences, and emit the workflow's step list. Pure in its input.
pub fn build_steps(events: &[RawEvent]) -> Vec<BrowserStep> {
    let actions = find_action_events(events);
    let sequences = group_event_sequences(&actions);
    build_sequence_steps(&sequences)
}
