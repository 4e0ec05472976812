//! Broker role: reader of one hop, writer of the next
//!
//! Pure composition: the broker owns a [`Consumer`] on its inbound
//! mailbox and a [`Producer`] on its outbound mailbox and moves data
//! between them once per cycle, optionally transforming it on the way
//! (unit conversion, filtering). The two hops' counters advance
//! independently.

use crate::consumer::Consumer;
use crate::error::IpcResult;
use crate::producer::Producer;
use level::config::ForwardPolicy;

/// What a broker cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerOutcome {
    /// Fresh inbound data was transformed and published; carries the
    /// outbound version.
    Forwarded(u32),
    /// Nothing new inbound; the last forwarded payload was re-published
    /// as a heartbeat ([`ForwardPolicy::RepeatLast`]).
    Repeated(u32),
    /// Nothing new inbound and nothing published.
    Skipped,
}

/// Forwarding stage between two hops.
pub struct Broker<A, B, F>
where
    F: FnMut(A) -> B,
{
    inbound: Consumer<A>,
    outbound: Producer<B>,
    transform: F,
    policy: ForwardPolicy,
    last_forwarded: Option<B>,
}

impl<A: Copy, B: Copy, F: FnMut(A) -> B> Broker<A, B, F> {
    /// Build a broker from its two role handles and a transform.
    pub fn new(
        inbound: Consumer<A>,
        outbound: Producer<B>,
        transform: F,
        policy: ForwardPolicy,
    ) -> Self {
        Self {
            inbound,
            outbound,
            transform,
            policy,
            last_forwarded: None,
        }
    }

    /// Run one broker cycle: poll inbound, publish outbound.
    ///
    /// # Errors
    ///
    /// Propagates lock errors from either hop; a contended inbound poll
    /// leaves the outbound mailbox untouched.
    pub fn cycle(&mut self) -> IpcResult<BrokerOutcome> {
        match self.inbound.poll()? {
            Some((payload, _inbound_version)) => {
                let out = (self.transform)(payload);
                let version = self.outbound.publish(out)?;
                self.last_forwarded = Some(out);
                Ok(BrokerOutcome::Forwarded(version))
            }
            None => match self.policy {
                ForwardPolicy::RepeatLast => match self.last_forwarded {
                    Some(out) => {
                        let version = self.outbound.publish(out)?;
                        Ok(BrokerOutcome::Repeated(version))
                    }
                    // Nothing ever forwarded; there is no heartbeat to repeat.
                    None => Ok(BrokerOutcome::Skipped),
                },
                ForwardPolicy::SkipWhenStale => Ok(BrokerOutcome::Skipped),
            },
        }
    }

    /// Inbound-side counters.
    pub fn inbound_stats(&self) -> crate::stats::ContentionStats {
        self.inbound.stats()
    }

    /// Outbound-side counters.
    pub fn outbound_stats(&self) -> crate::stats::ContentionStats {
        self.outbound.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::Mailbox;
    use std::sync::Arc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_millis(1);

    struct Rig {
        upstream: Producer<u32>,
        broker: Broker<u32, u32, fn(u32) -> u32>,
        downstream: Consumer<u32>,
    }

    fn rig(policy: ForwardPolicy) -> Rig {
        let inbound = Mailbox::new("test/a->b", 0u32);
        let outbound = Mailbox::new("test/b->c", 0u32);

        let upstream = Producer::new(Arc::clone(&inbound), WAIT, 8);
        let broker = Broker::new(
            Consumer::new(inbound, WAIT, 8),
            Producer::new(Arc::clone(&outbound), WAIT, 8),
            (|v| v * 2) as fn(u32) -> u32,
            policy,
        );
        let downstream = Consumer::new(outbound, WAIT, 8);

        Rig {
            upstream,
            broker,
            downstream,
        }
    }

    #[test]
    fn forwards_fresh_data_with_transform() {
        let mut rig = rig(ForwardPolicy::SkipWhenStale);

        rig.upstream.publish(21).unwrap();
        assert_eq!(rig.broker.cycle().unwrap(), BrokerOutcome::Forwarded(1));
        assert_eq!(rig.downstream.poll().unwrap(), Some((42, 1)));
    }

    #[test]
    fn skip_policy_leaves_outbound_untouched() {
        let mut rig = rig(ForwardPolicy::SkipWhenStale);

        assert_eq!(rig.broker.cycle().unwrap(), BrokerOutcome::Skipped);
        assert_eq!(rig.downstream.poll().unwrap(), None);
    }

    #[test]
    fn repeat_policy_heartbeats_last_payload() {
        let mut rig = rig(ForwardPolicy::RepeatLast);

        // Nothing forwarded yet: nothing to repeat.
        assert_eq!(rig.broker.cycle().unwrap(), BrokerOutcome::Skipped);

        rig.upstream.publish(5).unwrap();
        assert_eq!(rig.broker.cycle().unwrap(), BrokerOutcome::Forwarded(1));

        // Stale cycles now re-publish; the downstream sees each heartbeat
        // as a fresh version of the same payload.
        assert_eq!(rig.broker.cycle().unwrap(), BrokerOutcome::Repeated(2));
        assert_eq!(rig.broker.cycle().unwrap(), BrokerOutcome::Repeated(3));
        assert_eq!(rig.downstream.poll().unwrap(), Some((10, 3)));
    }

    #[test]
    fn outbound_counter_is_independent_of_inbound() {
        let mut rig = rig(ForwardPolicy::SkipWhenStale);

        // Drive the inbound hop to version 5.
        for v in 1..=5u32 {
            rig.upstream.publish(v).unwrap();
        }
        // One broker cycle forwards once: outbound goes 0 -> 1 regardless
        // of the inbound counter sitting at 5.
        assert_eq!(rig.broker.cycle().unwrap(), BrokerOutcome::Forwarded(1));
        assert_eq!(rig.downstream.poll().unwrap(), Some((10, 1)));
    }
}
