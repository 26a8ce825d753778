pub mod event;
pub mod selector;
pub mod workflow;

pub use event::{Action, EventSource, RawEvent};
pub use selector::ElementSelector;
pub use workflow::{BrowserStep, Locator, ScrollDirection, StepAction, Viewport, Workflow};
