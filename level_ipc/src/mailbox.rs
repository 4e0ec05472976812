//! The mailbox: one hop's shared state behind a single lock
//!
//! A `Mailbox<T>` bundles the payload, the mutual-exclusion lock and the
//! update counter into one abstraction. The payload is reachable only
//! through a [`MailboxGuard`], so the lock is released on every exit path
//! (normal or error) when the guard drops. A forgotten unlock cannot
//! starve the peer core.
//!
//! Payloads are `Copy`: a critical section is a plain memcpy plus a
//! counter bump, keeping cross-core lock hold time to a handful of
//! instructions.

use crate::error::{IpcError, IpcResult};
use crate::freshness;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Duration;

/// Payload plus update counter, always mutated together under the lock.
#[derive(Debug)]
struct Slot<T> {
    payload: T,
    version: u32,
}

/// One hop's shared mailbox: payload + lock + update counter.
///
/// Created once at bring-up and shared via `Arc` for the process lifetime;
/// there is no teardown beyond process exit. Exactly one writer role and
/// one reader role hold handles to any given mailbox (enforced by
/// [`crate::pipeline::hop`]).
#[derive(Debug)]
pub struct Mailbox<T> {
    hop: &'static str,
    slot: Mutex<Slot<T>>,
}

impl<T: Copy> Mailbox<T> {
    /// Create a mailbox with version 0 and the given initial payload.
    pub fn new(hop: &'static str, initial: T) -> Arc<Self> {
        Arc::new(Self {
            hop,
            slot: Mutex::new(Slot {
                payload: initial,
                version: 0,
            }),
        })
    }

    /// Hop name this mailbox backs.
    pub fn hop(&self) -> &'static str {
        self.hop
    }

    /// Acquire the lock, blocking indefinitely.
    ///
    /// This is the minimal protocol. Polling loops should prefer
    /// [`Mailbox::lock_within`]; indefinite blocking is a deadlock risk
    /// for any context with its own deadlines (see the crate docs).
    pub fn lock(&self) -> MailboxGuard<'_, T> {
        MailboxGuard {
            hop: self.hop,
            slot: self.slot.lock(),
        }
    }

    /// Acquire the lock, waiting at most `wait`.
    ///
    /// # Errors
    ///
    /// Returns [`IpcError::LockContended`] if the lock could not be
    /// obtained within the bound. No shared state is touched in that case.
    pub fn lock_within(&self, wait: Duration) -> IpcResult<MailboxGuard<'_, T>> {
        match self.slot.try_lock_for(wait) {
            Some(slot) => Ok(MailboxGuard {
                hop: self.hop,
                slot,
            }),
            None => Err(IpcError::LockContended {
                hop: self.hop,
                waited: wait,
            }),
        }
    }

    /// Current update counter value without copying the payload.
    ///
    /// Takes the lock briefly; intended for freshness peeks and
    /// diagnostics, not for data access.
    pub fn version(&self) -> u32 {
        self.slot.lock().version
    }
}

/// Scoped accessor for a locked mailbox.
///
/// Holding a guard is holding the lock; dropping it releases the lock.
/// Keep critical sections short: copy in, copy out, nothing else.
#[derive(Debug)]
pub struct MailboxGuard<'a, T> {
    hop: &'static str,
    slot: MutexGuard<'a, Slot<T>>,
}

impl<T: Copy> MailboxGuard<'_, T> {
    /// Replace the payload and advance the update counter by one.
    ///
    /// Both complete before the guard can drop, which is what gives the
    /// counter its "data is consistent as of this version" meaning.
    /// Returns the new version.
    pub fn write(&mut self, payload: T) -> u32 {
        self.slot.payload = payload;
        self.slot.version = freshness::advance(self.slot.version);
        self.slot.version
    }

    /// Coherent snapshot of payload and version.
    ///
    /// Both fields come from the same critical section, so the pair always
    /// corresponds to a single completed write.
    pub fn read(&self) -> (T, u32) {
        (self.slot.payload, self.slot.version)
    }

    /// Update counter value under the current lock.
    pub fn version(&self) -> u32 {
        self.slot.version
    }

    /// Hop name of the locked mailbox.
    pub fn hop(&self) -> &'static str {
        self.hop
    }
}
