//! Raw interaction events as captured by the recording collaborator.
//!
//! The recorder emits rrweb-style incremental snapshots: each record carries a
//! numeric `source` discriminant plus source-specific payload fields. The
//! numeric codes are decoded into [`EventSource`] in exactly one place so the
//! rest of the pipeline never compares raw integers.

use crate::selector::ElementSelector;
use serde::{Deserialize, Serialize};

/// Mouse-interaction sub-type code for a button press.
pub const MOUSE_DOWN: u8 = 1;

/// Node id the recorder assigns to the page body. Scrolls on any other node
/// are not replayable as a page action.
pub const PAGE_BODY_ID: u32 = 1;

/// Capture-layer source of a raw event.
///
/// Only the sources the build pipeline acts on are named; every other code is
/// unknown by construction and classifies as no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    MouseInteraction,
    Scroll,
    Input,
}

impl EventSource {
    /// Decode a raw numeric source code. Returns `None` for codes the
    /// pipeline does not recognize.
    pub fn from_code(code: u8) -> Option<EventSource> {
        match code {
            2 => Some(EventSource::MouseInteraction),
            3 => Some(EventSource::Scroll),
            5 => Some(EventSource::Input),
            _ => None,
        }
    }
}

/// User action a raw event can classify as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Click,
    Scroll,
    Type,
}

/// One timestamped record from the recording collaborator. Immutable; the
/// build pipeline only ever reads these.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub page_id: u32,
    /// Numeric capture-layer source code. Decoded via [`EventSource`].
    pub source: u8,
    /// Sub-type within a source (for mouse interactions, the button phase).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<u8>,
    /// Whether the browser marked the event as user-initiated.
    #[serde(default)]
    pub is_trusted: bool,
    /// Node id the event targeted (scroll events report the scrolled node).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<u32>,
    /// Identifying attributes of the target element at capture time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ElementSelector>,
    /// Recorded xpath of the target element, stable within one session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpath: Option<String>,
    /// Field contents after an input event. Empty string is a valid value
    /// (the user cleared the field).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
}
