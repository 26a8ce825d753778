//! The injected browser-driver capability.
//!
//! The engine never owns a browser; it drives one through this trait. A
//! concrete implementation (CDP, WebDriver, ...) supplies sized sessions,
//! candidate element queries, live selector snapshots, and input primitives.

use async_trait::async_trait;
use rewind_common::selector::ElementSelector;
use rewind_common::workflow::Viewport;
use thiserror::Error;

/// Opaque reference to a live element within the driver's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

#[derive(Debug, Clone, Error)]
pub enum DriverError {
    #[error("driver session is not ready")]
    NotReady,

    /// The element exists but cannot currently receive the action (still
    /// animating, covered, detached mid-render). Transient by nature.
    #[error("element not interactable: {0}")]
    NotInteractable(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("stale element handle {0:?}")]
    StaleHandle(ElementHandle),

    #[error("{0} is not supported by this driver")]
    NotSupported(String),

    #[error("driver failure: {0}")]
    Other(String),
}

impl DriverError {
    /// Whether the condition may clear on its own while the page settles.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DriverError::NotInteractable(_) | DriverError::StaleHandle(_)
        )
    }
}

/// Unified interface every browser driver must implement.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Open a session sized to the viewport and navigate to the start URL.
    async fn launch(&mut self, url: &str, viewport: Viewport) -> Result<(), DriverError>;

    /// Release the session and all associated resources.
    async fn close(&mut self) -> Result<(), DriverError>;

    /// Find live elements plausibly matching the recorded selector's broad
    /// identity (same tag family / recorded region). Precision is not
    /// required here; the caller ranks the candidates by similarity.
    async fn find_candidates(
        &mut self,
        page_id: u32,
        base: &ElementSelector,
    ) -> Result<Vec<ElementHandle>, DriverError>;

    /// Read an element's current selector snapshot.
    async fn read_selector(
        &mut self,
        page_id: u32,
        element: ElementHandle,
    ) -> Result<ElementSelector, DriverError>;

    async fn click(&mut self, page_id: u32, element: ElementHandle) -> Result<(), DriverError>;

    /// Replace the element's value with `value`. An empty string clears the
    /// field.
    async fn input(
        &mut self,
        page_id: u32,
        element: ElementHandle,
        value: &str,
    ) -> Result<(), DriverError>;

    /// Scroll the page to the given vertical offset.
    async fn scroll(&mut self, page_id: u32, to: i64) -> Result<(), DriverError>;
}
