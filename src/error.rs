//! Error taxonomy (spec §7): startup errors and IPC errors are fatal;
//! everything else ("no eligible ship", "empty undock queue") is a normal
//! outcome and never surfaces as a `Result::Err`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("testcase file {path}: {reason}")]
    Testcase { path: String, reason: String },

    #[error("shared memory attach failed: {0}")]
    SharedMemory(String),

    #[error("message queue join failed: {0}")]
    Queue(String),
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("startup failed")]
    Startup(#[from] StartupError),

    #[error("ipc failure: {0}")]
    Ipc(String),
}
