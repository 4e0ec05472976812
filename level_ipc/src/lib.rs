//! # Tilt Pipeline Mailbox IPC
//!
//! Cross-core data sharing for a three-stage tilt ("bubble level")
//! pipeline. A sensor value produced on one execution core reaches a
//! consumer core through an intermediate broker core; every hop between
//! two cores is backed by a **mailbox**: a payload, a mutual-exclusion
//! lock and a monotonically wrapping update counter, bundled into one
//! abstraction so the payload is only reachable through a scoped guard.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Sensor core  │     │ Broker core  │     │ Console core │
//! │              │     │              │     │              │
//! │ Producer ────┼──►──┼─ Consumer    │     │              │
//! │              │ Mbox│   │transform │     │              │
//! │              │ A→B │ Producer ────┼──►──┼─ Consumer    │
//! └──────────────┘     └─────────Mbox─┘ B→C └──────┬───────┘
//!                                                  │
//!                                              ByteSink (UART)
//! ```
//!
//! No stage calls into another; all communication goes through the shared
//! mailbox state, polled rather than pushed. The counters of different
//! hops advance independently.
//!
//! ## Usage
//!
//! ```rust
//! use level::config::PipelineConfig;
//! use level::tilt::TiltReading;
//! use level_ipc::{BrokerOutcome, Pipeline, transport};
//!
//! # fn main() -> Result<(), level_ipc::IpcError> {
//! let config = PipelineConfig::default();
//! let mut pipeline = Pipeline::bring_up(&config);
//!
//! // Sensor core: publish a measurement.
//! pipeline.sensor.publish(TiltReading::new(0.12, -0.05))?;
//!
//! // Broker core: forward it to the second hop.
//! assert_eq!(pipeline.broker.cycle()?, BrokerOutcome::Forwarded(1));
//!
//! // Console core: poll and transmit.
//! let mut uart: Vec<u8> = Vec::new();
//! if let Some((reading, _version)) = pipeline.console.poll()? {
//!     transport::send_reading(&mut uart, &reading)?;
//! }
//! assert!(!uart.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Staleness protocol
//!
//! Writers advance the counter by exactly one per completed write; a
//! reader keeps the last version it observed and treats any other value
//! as fresh, which remains correct across counter wraparound. A poll that
//! finds no advance returns `Ok(None)` - staleness is a normal outcome,
//! not an error.
//!
//! ## Locking discipline
//!
//! - `lock()` blocks indefinitely (minimal protocol).
//! - `lock_within()` bounds the wait and surfaces
//!   [`IpcError::LockContended`]; the roles use it exclusively and
//!   escalate a configured streak of contended acquires to
//!   [`IpcError::LockFault`].
//! - Critical sections are copy-in/copy-out only. Never hold a guard
//!   across sensor or transport I/O, and never call a blocking acquire
//!   from an interrupt context.
//!
//! ## Thread Safety
//!
//! - **Producer / Consumer**: single-owner role handles, one of each per
//!   mailbox, handed out by [`pipeline::hop`] and not `Clone`.
//! - **Mailbox**: shared via `Arc`, safe from any number of contexts; the
//!   internal lock serializes all access.
//! - **Broker**: plain composition of one consumer and one producer.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod broker;
pub mod consumer;
pub mod error;
pub mod freshness;
pub mod mailbox;
pub mod pipeline;
pub mod producer;
pub mod stats;
pub mod transport;

pub use broker::{Broker, BrokerOutcome};
pub use consumer::Consumer;
pub use error::{IpcError, IpcResult};
pub use mailbox::{Mailbox, MailboxGuard};
pub use pipeline::{Pipeline, TiltBroker, hop};
pub use producer::Producer;
pub use stats::ContentionStats;
pub use transport::{ByteSink, TiltSensor};

/// Initialize tracing for pipeline logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_ids(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
