//! Replay of a job's step list against a browser driver.
//!
//! Steps execute strictly in index order; the next step never begins before
//! the previous one's action, including its internal retries, completes or
//! fails fatally. A fatal step error aborts the remainder of the job, but the
//! driver session is released on every exit path.

use crate::config::RunnerConfig;
use crate::driver::{Driver, DriverError};
use crate::job::Job;
use crate::locate::{locate_element, LocateError};
use crate::retry::retry;
use rewind_common::selector::ElementSelector;
use rewind_common::workflow::{BrowserStep, StepAction};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("step {index}: {source}")]
    Locate {
        index: usize,
        #[source]
        source: LocateError,
    },

    #[error("step {index} is malformed: {reason}")]
    MalformedStep { index: usize, reason: String },
}

impl ExecutionError {
    fn is_transient(&self) -> bool {
        match self {
            ExecutionError::Driver(e) => e.is_transient(),
            ExecutionError::Locate { source, .. } => source.is_transient(),
            ExecutionError::MalformedStep { .. } => false,
        }
    }
}

async fn before_action(sleep_ms: u64) {
    if sleep_ms > 0 {
        tokio::time::sleep(Duration::from_millis(sleep_ms)).await;
    }
}

/// Executes one job against one exclusively-owned driver session.
pub struct Runner<D: Driver> {
    driver: D,
    job: Job,
    config: RunnerConfig,
}

impl<D: Driver> Runner<D> {
    /// Acquire a driver session sized to the job's viewport, already
    /// navigated to the job's resolved URL.
    pub async fn create(
        job: Job,
        mut driver: D,
        config: RunnerConfig,
    ) -> Result<Self, ExecutionError> {
        info!(
            "starting job '{}' at {} ({} steps)",
            job.workflow.name,
            job.url,
            job.workflow.steps.len()
        );

        if let Err(e) = driver.launch(&job.url, job.viewport).await {
            // The session may be half-open; releasing it is best-effort.
            let _ = driver.close().await;
            return Err(e.into());
        }

        Ok(Self {
            driver,
            job,
            config,
        })
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    /// Run every step in index order, aborting on the first fatal error.
    pub async fn run(&mut self) -> Result<(), ExecutionError> {
        let steps = self.job.workflow.steps.clone();
        for step in &steps {
            self.run_step(step).await?;
        }
        Ok(())
    }

    pub async fn run_step(&mut self, step: &BrowserStep) -> Result<(), ExecutionError> {
        info!("step {} ({:?})", step.index, step.action);

        match step.action {
            StepAction::Click => self.click(step).await,
            StepAction::Input => {
                let value = self.job.value_for(step.index).map(str::to_string);
                self.input(step, value.as_deref()).await
            }
            StepAction::Scroll => self.scroll(step).await,
        }
    }

    pub async fn click(&mut self, step: &BrowserStep) -> Result<(), ExecutionError> {
        let selector = element_selector(step)?;
        let index = step.index;
        let page_id = step.page_id;
        let sleep_ms = self.config.sleep_ms;
        let floor = self.config.confidence_floor;

        retry(
            &self.config.retry_policy(),
            "click",
            &mut self.driver,
            |driver: &mut D| {
                let selector = selector.clone();
                Box::pin(async move {
                    let handle = locate_element(driver, page_id, &selector, floor)
                        .await
                        .map_err(|source| ExecutionError::Locate { index, source })?;
                    before_action(sleep_ms).await;
                    driver.click(page_id, handle).await?;
                    Ok(())
                })
            },
            ExecutionError::is_transient,
        )
        .await
    }

    pub async fn input(
        &mut self,
        step: &BrowserStep,
        value: Option<&str>,
    ) -> Result<(), ExecutionError> {
        let selector = element_selector(step)?;
        let index = step.index;
        let page_id = step.page_id;
        let sleep_ms = self.config.sleep_ms;
        let floor = self.config.confidence_floor;
        let value = value.unwrap_or("").to_string();

        retry(
            &self.config.retry_policy(),
            "input",
            &mut self.driver,
            |driver: &mut D| {
                let selector = selector.clone();
                let value = value.clone();
                Box::pin(async move {
                    let handle = locate_element(driver, page_id, &selector, floor)
                        .await
                        .map_err(|source| ExecutionError::Locate { index, source })?;
                    before_action(sleep_ms).await;
                    driver.input(page_id, handle, &value).await?;
                    Ok(())
                })
            },
            ExecutionError::is_transient,
        )
        .await
    }

    pub async fn scroll(&mut self, step: &BrowserStep) -> Result<(), ExecutionError> {
        let to = step.scroll_to.ok_or_else(|| ExecutionError::MalformedStep {
            index: step.index,
            reason: "scroll step has no recorded scroll target".into(),
        })?;
        let page_id = step.page_id;
        let sleep_ms = self.config.sleep_ms;

        retry(
            &self.config.retry_policy(),
            "scroll",
            &mut self.driver,
            |driver: &mut D| {
                Box::pin(async move {
                    before_action(sleep_ms).await;
                    driver.scroll(page_id, to).await?;
                    Ok(())
                })
            },
            ExecutionError::is_transient,
        )
        .await
    }

    /// Release the driver session. Must run even when `run` failed midway.
    pub async fn close(&mut self) -> Result<(), ExecutionError> {
        self.driver.close().await.map_err(Into::into)
    }

    /// Create, run, and close in one call, releasing the session on every
    /// exit path.
    pub async fn execute(job: Job, driver: D, config: RunnerConfig) -> Result<(), ExecutionError> {
        let mut runner = Self::create(job, driver, config).await?;

        let result = runner.run().await;
        if let Err(e) = runner.close().await {
            if result.is_ok() {
                return Err(e);
            }
            warn!("failed to close driver session after job error: {}", e);
        }
        result
    }
}

fn element_selector(step: &BrowserStep) -> Result<&ElementSelector, ExecutionError> {
    step.locator
        .selector()
        .ok_or_else(|| ExecutionError::MalformedStep {
            index: step.index,
            reason: format!("{:?} step carries a page locator", step.action),
        })
}
