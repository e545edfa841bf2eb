use line_buffer::ContractViolation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while applying mirror events.
pub enum SyncError {
    #[error("no mirrored model for {0}")]
    /// The event names a URL that was never added or was already removed.
    UnknownModel(String),

    #[error("stale event for {url}: version {event_version} is older than {model_version}")]
    /// The event's version is lower than the mirror's current version.
    StaleVersion {
        /// Model URL.
        url: String,
        /// Version carried by the event.
        event_version: u64,
        /// Version the mirror is already at.
        model_version: u64,
    },

    #[error("column 0 in wire range {0}; wire columns are 1-based")]
    /// A wire range used column 0.
    ZeroColumn(String),

    #[error(transparent)]
    /// The buffer rejected the event's coordinates or end-of-line sequence.
    Buffer(#[from] ContractViolation),
}
