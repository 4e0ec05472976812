//! Reader role: polls one hop's mailbox for fresh data

use crate::error::{IpcError, IpcResult};
use crate::freshness;
use crate::mailbox::Mailbox;
use crate::stats::ContentionStats;
use std::sync::Arc;
use std::time::Duration;

/// Exclusive reader for one mailbox.
///
/// Not `Clone`: a hop has exactly one reader. The consumer owns its
/// last-seen version, so freshness tracking cannot drift from the caller.
/// This is a polling protocol; call [`Consumer::poll`] at whatever cadence
/// the downstream consumer needs (display refresh, UART transmit), there
/// is no writer-side notification.
#[derive(Debug)]
pub struct Consumer<T> {
    mailbox: Arc<Mailbox<T>>,
    lock_wait: Duration,
    contention_bound: u32,
    last_seen: u32,
    stats: ContentionStats,
}

impl<T: Copy> Consumer<T> {
    pub(crate) fn new(mailbox: Arc<Mailbox<T>>, lock_wait: Duration, contention_bound: u32) -> Self {
        // A consumer created at bring-up has seen the initial payload;
        // only a subsequent publish counts as fresh.
        let last_seen = mailbox.version();
        Self {
            mailbox,
            lock_wait,
            contention_bound,
            last_seen,
            stats: ContentionStats::default(),
        }
    }

    /// Poll for data newer than the last observation.
    ///
    /// Returns `Ok(Some((payload, version)))` when the mailbox advanced
    /// since the previous poll, updating the internal last-seen version.
    /// Returns `Ok(None)` when nothing new arrived; the caller keeps its
    /// previous payload. Staleness is a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Same contention taxonomy as [`crate::Producer::publish`]:
    /// [`IpcError::LockContended`] is retryable, [`IpcError::LockFault`]
    /// means the hop is presumed dead.
    pub fn poll(&mut self) -> IpcResult<Option<(T, u32)>> {
        let read = match self.mailbox.lock_within(self.lock_wait) {
            Ok(guard) => Ok(guard.read()),
            Err(err) => Err(err),
        };
        let (payload, version) = match read {
            Ok(pair) => pair,
            Err(err) => return Err(self.escalate(err)),
        };
        self.stats.record_acquired();

        if freshness::is_fresh(version, self.last_seen) {
            self.last_seen = version;
            self.stats.record_poll(true);
            tracing::trace!(hop = self.mailbox.hop(), version, "fresh data");
            Ok(Some((payload, version)))
        } else {
            self.stats.record_poll(false);
            Ok(None)
        }
    }

    /// Version of the last payload this consumer observed.
    pub fn last_seen(&self) -> u32 {
        self.last_seen
    }

    /// Cheap freshness peek without copying the payload.
    pub fn has_fresh(&self) -> bool {
        freshness::is_fresh(self.mailbox.version(), self.last_seen)
    }

    /// Hop name this consumer reads from.
    pub fn hop(&self) -> &'static str {
        self.mailbox.hop()
    }

    /// Snapshot of this consumer's counters.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::Producer;

    fn pair(bound: u32) -> (Producer<u32>, Consumer<u32>) {
        let mailbox = Mailbox::new("test/hop", 0u32);
        let wait = Duration::from_millis(1);
        (
            Producer::new(Arc::clone(&mailbox), wait, bound),
            Consumer::new(mailbox, wait, bound),
        )
    }

    #[test]
    fn initial_payload_is_not_fresh() {
        let (_writer, mut reader) = pair(8);
        assert!(!reader.has_fresh());
        assert_eq!(reader.poll().unwrap(), None);
        assert_eq!(reader.stats().stale, 1);
    }

    #[test]
    fn poll_sees_each_publish_once() {
        let (mut writer, mut reader) = pair(8);

        writer.publish(11).unwrap();
        assert!(reader.has_fresh());
        assert_eq!(reader.poll().unwrap(), Some((11, 1)));

        // No new write: stale.
        assert_eq!(reader.poll().unwrap(), None);

        writer.publish(22).unwrap();
        assert_eq!(reader.poll().unwrap(), Some((22, 2)));
        assert_eq!(reader.last_seen(), 2);
    }

    #[test]
    fn no_lost_updates_with_interleaved_polls() {
        let (mut writer, mut reader) = pair(8);

        for value in [100u32, 200, 300] {
            writer.publish(value).unwrap();
            let (payload, _) = reader.poll().unwrap().expect("publish must be visible");
            assert_eq!(payload, value);
        }
        assert_eq!(reader.stats().fresh, 3);
        assert_eq!(reader.stats().stale, 0);
    }

    #[test]
    fn burst_of_writes_collapses_to_latest() {
        let (mut writer, mut reader) = pair(8);

        writer.publish(1).unwrap();
        writer.publish(2).unwrap();
        writer.publish(3).unwrap();

        // A poll after several publishes sees the latest, never a mix.
        assert_eq!(reader.poll().unwrap(), Some((3, 3)));
        assert_eq!(reader.poll().unwrap(), None);
    }

    #[test]
    fn contention_escalates_on_reader_side_too() {
        let mailbox = Mailbox::new("test/hop", 0u32);
        let mut reader = Consumer::new(Arc::clone(&mailbox), Duration::from_millis(1), 2);
        let _held = mailbox.lock();

        assert!(matches!(
            reader.poll().unwrap_err(),
            IpcError::LockContended { .. }
        ));
        assert!(matches!(
            reader.poll().unwrap_err(),
            IpcError::LockFault { consecutive: 2, .. }
        ));
    }

    #[test]
    fn consumer_attached_late_sees_current_value_as_seen() {
        let mailbox = Mailbox::new("test/hop", 0u32);
        let wait = Duration::from_millis(1);
        let mut writer = Producer::new(Arc::clone(&mailbox), wait, 8);
        writer.publish(5).unwrap();

        // Attach after the first publish: that publish is the baseline.
        let mut reader = Consumer::new(mailbox, wait, 8);
        assert_eq!(reader.poll().unwrap(), None);

        writer.publish(6).unwrap();
        assert_eq!(reader.poll().unwrap(), Some((6, 2)));
    }
}
