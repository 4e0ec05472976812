//! Error types for mailbox IPC operations

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur on a mailbox hop.
///
/// Staleness is deliberately absent: a poll that finds no new data is a
/// normal outcome (`Ok(None)`), not a failure.
#[derive(Error, Debug)]
pub enum IpcError {
    /// A bounded lock acquisition expired. Retryable; no shared state was
    /// touched.
    #[error("Lock contended on hop {hop}: gave up after {waited:?}")]
    LockContended {
        /// Hop name
        hop: &'static str,
        /// How long the caller waited before giving up
        waited: Duration,
    },

    /// The contention escalation bound was exceeded. Fatal for this hop's
    /// IPC path; the peer stage is presumed wedged while holding the lock.
    #[error("Lock fault on hop {hop}: {consecutive} consecutive contended acquires")]
    LockFault {
        /// Hop name
        hop: &'static str,
        /// Length of the contention streak that triggered the fault
        consecutive: u32,
    },

    /// Byte-sink transport failure downstream of the final consumer.
    #[error("Transport error: {source}")]
    Transport {
        /// Source IO error
        #[from]
        source: std::io::Error,
    },
}

impl IpcError {
    /// True when the caller may simply retry on its next cycle.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockContended { .. })
    }
}

/// Result type for mailbox IPC operations
pub type IpcResult<T> = Result<T, IpcError>;
