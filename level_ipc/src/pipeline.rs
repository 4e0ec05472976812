//! Hop construction and whole-pipeline bring-up
//!
//! A hop is one producer->consumer relationship backed by one mailbox.
//! [`hop`] is the only way to obtain role handles, and it yields exactly
//! one [`Producer`] and one [`Consumer`] per mailbox; neither is `Clone`,
//! so the single-writer/single-reader discipline is enforced by the type
//! system rather than by convention.
//!
//! Bring-up happens before any stage runs: both mailboxes exist, version
//! 0, lock unlocked, default payload, by the time [`Pipeline::bring_up`]
//! returns. Stage threads started afterwards therefore always observe
//! initialized state.

use crate::broker::Broker;
use crate::consumer::Consumer;
use crate::mailbox::Mailbox;
use crate::producer::Producer;
use level::config::PipelineConfig;
use level::consts::{HOP_BROKER_TO_CONSOLE, HOP_SENSOR_TO_BROKER};
use level::tilt::TiltReading;

/// Create one hop: a mailbox and its two role handles.
///
/// The mailbox itself stays private to the pair; all access goes through
/// the roles.
pub fn hop<T: Copy>(
    name: &'static str,
    initial: T,
    config: &PipelineConfig,
) -> (Producer<T>, Consumer<T>) {
    let mailbox = Mailbox::new(name, initial);
    let producer = Producer::new(
        std::sync::Arc::clone(&mailbox),
        config.lock_wait(),
        config.contention_bound,
    );
    let consumer = Consumer::new(mailbox, config.lock_wait(), config.contention_bound);
    (producer, consumer)
}

/// Broker type used by the standard two-hop tilt pipeline.
pub type TiltBroker = Broker<TiltReading, TiltReading, fn(TiltReading) -> TiltReading>;

/// Role handles for the standard three-stage pipeline:
/// sensor core -> broker core -> console core.
pub struct Pipeline {
    /// Writer handle for the sensor stage.
    pub sensor: Producer<TiltReading>,
    /// Forwarding stage between the two hops.
    pub broker: TiltBroker,
    /// Reader handle for the console/transmit stage.
    pub console: Consumer<TiltReading>,
}

impl Pipeline {
    /// Initialize both hops and hand out the stage handles.
    ///
    /// The broker forwards readings unchanged; deployments that need unit
    /// conversion or filtering build their own [`Broker`] from two
    /// [`hop`] calls instead.
    pub fn bring_up(config: &PipelineConfig) -> Self {
        let (sensor, broker_in) = hop(HOP_SENSOR_TO_BROKER, TiltReading::default(), config);
        let (broker_out, console) = hop(HOP_BROKER_TO_CONSOLE, TiltReading::default(), config);

        tracing::info!(
            service = %config.shared.service_name,
            "pipeline mailboxes initialized"
        );

        Self {
            sensor,
            broker: Broker::new(
                broker_in,
                broker_out,
                std::convert::identity as fn(TiltReading) -> TiltReading,
                config.forward_policy,
            ),
            console,
        }
    }
}
