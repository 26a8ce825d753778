//! Replay-time value overrides.
//!
//! A step's recorded value can be overridden without re-recording via the
//! `QAW_<WORKFLOW_NAME>_<STEP_INDEX>` convention (workflow name upper-cased,
//! index zero-based decimal). The lookup is an explicit table built once per
//! job from an environment snapshot; the runner never reads ambient process
//! state.

use rewind_common::workflow::{StepAction, Workflow};
use std::collections::HashMap;
use thiserror::Error;

/// Environment key overriding the workflow's recorded URL.
pub const URL_OVERRIDE_KEY: &str = "QAW_URL";

#[derive(Debug, Clone, Error)]
pub enum OverrideError {
    #[error("override {key} targets step {index}, which takes no value")]
    ValuelessStep { key: String, index: usize },
}

/// Override key for one step of a workflow, e.g. `QAW_LOGIN_0`.
pub fn override_key(workflow_name: &str, index: usize) -> String {
    format!("QAW_{}_{}", workflow_name.to_uppercase(), index)
}

/// Build the per-step override table for a workflow.
///
/// Each slot holds `Some` when the environment snapshot carries an override
/// for that index (the empty string included) and `None` when the step's
/// recorded value applies unmodified. Overrides naming a step that takes no
/// value are rejected here, before anything executes.
pub fn step_values(
    workflow: &Workflow,
    env: &HashMap<String, String>,
) -> Result<Vec<Option<String>>, OverrideError> {
    workflow
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let key = override_key(&workflow.name, index);
            match env.get(&key) {
                Some(value) => {
                    if step.action != StepAction::Input {
                        return Err(OverrideError::ValuelessStep { key, index });
                    }
                    Ok(Some(value.clone()))
                }
                None => Ok(None),
            }
        })
        .collect()
}

/// Resolve the job URL: an override in the snapshot wins over the recorded
/// workflow URL.
pub fn resolve_url(workflow: &Workflow, env: &HashMap<String, String>) -> String {
    env.get(URL_OVERRIDE_KEY)
        .cloned()
        .unwrap_or_else(|| workflow.url.clone())
}
