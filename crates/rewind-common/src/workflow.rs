//! Persisted replay format: workflows and their browser steps.
//!
//! This is the wire schema shared between the build pipeline (producer) and
//! the runner (consumer). Steps are immutable once built; `index` is the
//! stable key used for replay-time value overrides.

use crate::selector::ElementSelector;
use serde::{Deserialize, Serialize};

/// Replayable step action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Click,
    Input,
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// What a step targets: a recorded element snapshot, or the page itself for
/// scroll steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Locator {
    Element { selector: ElementSelector },
    Page,
}

impl Locator {
    pub fn selector(&self) -> Option<&ElementSelector> {
        match self {
            Locator::Element { selector } => Some(selector),
            Locator::Page => None,
        }
    }
}

/// A single canonical replayable action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserStep {
    /// Position in the final ordered workflow.
    pub index: usize,
    pub action: StepAction,
    pub page_id: u32,
    pub locator: Locator,
    /// Final value to replay for input steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_direction: Option<ScrollDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<i64>,
}

/// A named, ordered step list plus its target URL: the unit of persistence
/// between recording and replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub name: String,
    pub url: String,
    pub steps: Vec<BrowserStep>,
}

/// Browser session size for one replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1366,
            height: 768,
        }
    }
}
