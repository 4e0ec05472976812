//! Writer role: publishes payloads into one hop's mailbox

use crate::error::{IpcError, IpcResult};
use crate::mailbox::Mailbox;
use crate::stats::ContentionStats;
use std::sync::Arc;
use std::time::Duration;

/// Exclusive writer for one mailbox.
///
/// Not `Clone`: a hop has exactly one writer, and [`crate::pipeline::hop`]
/// hands out the single instance. Call [`Producer::publish`] once per new
/// measurement; never perform sensor or transport I/O while a publish is
/// in flight.
#[derive(Debug)]
pub struct Producer<T> {
    mailbox: Arc<Mailbox<T>>,
    lock_wait: Duration,
    contention_bound: u32,
    stats: ContentionStats,
}

impl<T: Copy> Producer<T> {
    pub(crate) fn new(mailbox: Arc<Mailbox<T>>, lock_wait: Duration, contention_bound: u32) -> Self {
        Self {
            mailbox,
            lock_wait,
            contention_bound,
            stats: ContentionStats::default(),
        }
    }

    /// Publish a payload: bounded acquire, write, release.
    ///
    /// Returns the mailbox's new version on success.
    ///
    /// # Errors
    ///
    /// - [`IpcError::LockContended`]: the wait bound expired; the payload
    ///   was not written and the caller may retry next cycle.
    /// - [`IpcError::LockFault`]: too many contended acquires in a row;
    ///   the hop is presumed dead and the caller should stop retrying.
    pub fn publish(&mut self, payload: T) -> IpcResult<u32> {
        let outcome = match self.mailbox.lock_within(self.lock_wait) {
            Ok(mut guard) => Ok(guard.write(payload)),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(version) => {
                self.stats.record_acquired();
                tracing::trace!(hop = self.mailbox.hop(), version, "published");
                Ok(version)
            }
            Err(err) => Err(self.escalate(err)),
        }
    }

    /// Hop name this producer writes to.
    pub fn hop(&self) -> &'static str {
        self.mailbox.hop()
    }

    /// Snapshot of this producer's counters.
    pub fn stats(&self) -> ContentionStats {
        self.stats
    }

    fn escalate(&mut self, err: IpcError) -> IpcError {
        let streak = self.stats.record_contended();
        if streak >= self.contention_bound {
            tracing::error!(
                hop = self.mailbox.hop(),
                consecutive = streak,
                "contention bound exceeded, declaring hop faulted"
            );
            IpcError::LockFault {
                hop: self.mailbox.hop(),
                consecutive: streak,
            }
        } else {
            tracing::warn!(
                hop = self.mailbox.hop(),
                consecutive = streak,
                "lock contended"
            );
            err
        }
    }
}
