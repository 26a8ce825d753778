//! Self-healing element location.
//!
//! The recorded selector snapshot is ranked against every plausible live
//! candidate the driver can produce. Exact-path matching is deliberately not
//! attempted: the page may have drifted since recording, and weighted
//! attribute similarity re-identifies the element anyway.

use crate::driver::{Driver, DriverError, ElementHandle};
use rewind_common::selector::ElementSelector;
use rewind_core::score::{strongest_match, EmptySelectorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    /// No live candidate cleared the confidence floor. Usually transient:
    /// the page may still be rendering the element.
    #[error("no candidate matched the recorded selector with enough confidence")]
    NotLocated,

    #[error(transparent)]
    EmptySelector(#[from] EmptySelectorError),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl LocateError {
    pub fn is_transient(&self) -> bool {
        match self {
            LocateError::NotLocated => true,
            LocateError::EmptySelector(_) => false,
            LocateError::Driver(e) => e.is_transient(),
        }
    }
}

/// Locate the live element best matching a recorded selector.
///
/// Queries the driver for candidates, reads each one's current snapshot,
/// ranks by `score / max_possible_score`, and picks the top candidate at or
/// above the confidence floor.
pub async fn locate_element<D: Driver + ?Sized>(
    driver: &mut D,
    page_id: u32,
    base: &ElementSelector,
    confidence_floor: f64,
) -> Result<ElementHandle, LocateError> {
    let handles = driver.find_candidates(page_id, base).await?;

    let mut snapshots = Vec::with_capacity(handles.len());
    for handle in &handles {
        snapshots.push(driver.read_selector(page_id, *handle).await?);
    }

    let best = strongest_match(&snapshots, base, confidence_floor)?;

    match best {
        Some(candidate) => {
            tracing::debug!(
                "located element with confidence {:.2} ({} candidates)",
                candidate.confidence,
                handles.len()
            );
            Ok(handles[candidate.position])
        }
        None => Err(LocateError::NotLocated),
    }
}
