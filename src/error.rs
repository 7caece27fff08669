use thiserror::Error;

/// Failures raised by the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No session at position {index} (there are {len} sessions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Storage I/O failed for key '{key}'")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize sessions")]
    Serialize(#[from] serde_json::Error),
}

/// Invalid transitions of the start/stop timer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer is already running")]
    AlreadyRunning,

    #[error("Timer is not running")]
    NotRunning,
}

/// Remote sync failures. These are reported, never fatal.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Sync request failed")]
    Transport(#[from] reqwest::Error),

    #[error("Sync endpoint returned status {0}")]
    Status(reqwest::StatusCode),
}
