pub mod config;
pub mod driver;
pub mod job;
pub mod locate;
pub mod retry;
pub mod runner;
pub mod values;

pub use config::{ConfigLoader, RunnerConfig};
pub use driver::{Driver, DriverError, ElementHandle};
pub use job::{Job, JobError};
pub use locate::LocateError;
pub use retry::RetryPolicy;
pub use runner::{ExecutionError, Runner};
