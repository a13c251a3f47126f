//! Error types for the head-scroll library.

use thiserror::Error;

/// Main error type for the library.
///
/// Internal pipeline stages (scorer, filter, state machine) never fail;
/// a missed detection is `None`, not an error. Only boundary collaborators
/// (frame source, scroll executor, worker channel, configuration) produce
/// these variants.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame source could not produce frames and the session cannot continue
    #[error("Frame source error: {0}")]
    FrameSource(String),

    /// Scroll executor could not deliver a scroll action
    #[error("Scroll executor error: {0}")]
    ScrollExecutor(String),

    /// Worker offload channel could not be established or has shut down
    #[error("Worker channel error: {0}")]
    WorkerChannel(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
