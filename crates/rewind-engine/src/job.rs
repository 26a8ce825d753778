//! A workflow bound to one concrete execution context.

use crate::values::{resolve_url, step_values, OverrideError};
use rewind_common::workflow::{Viewport, Workflow};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Override(#[from] OverrideError),

    #[error("invalid job url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

/// One replay run's context: resolved URL, viewport, and the per-step value
/// override table. Created per execution, discarded after.
#[derive(Debug, Clone)]
pub struct Job {
    pub workflow: Workflow,
    pub url: String,
    pub viewport: Viewport,
    pub values: Vec<Option<String>>,
}

impl Job {
    /// Bind a workflow to a run context. The environment snapshot supplies
    /// the URL override and the per-step value overrides; both are resolved
    /// and validated here, before any step executes.
    pub fn new(
        workflow: Workflow,
        viewport: Viewport,
        env: &HashMap<String, String>,
    ) -> Result<Self, JobError> {
        let values = step_values(&workflow, env)?;
        let url = resolve_url(&workflow, env);

        url::Url::parse(&url).map_err(|source| JobError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        Ok(Self {
            workflow,
            url,
            viewport,
            values,
        })
    }

    /// Bind a workflow using the current process environment as the snapshot.
    pub fn from_env(workflow: Workflow, viewport: Viewport) -> Result<Self, JobError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::new(workflow, viewport, &env)
    }

    /// Replay value for a step: the override when one exists (the empty
    /// string included), otherwise the recorded value.
    pub fn value_for(&self, index: usize) -> Option<&str> {
        match self.values.get(index) {
            Some(Some(value)) => Some(value.as_str()),
            _ => self
                .workflow
                .steps
                .get(index)
                .and_then(|step| step.value.as_deref()),
        }
    }
}
