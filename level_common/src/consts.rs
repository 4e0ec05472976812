//! Pipeline constants.
//!
//! These constants define the fundamental parameters of the tilt pipeline.
//! They are the single source of truth - all other crates should import
//! from here.

use std::time::Duration;

/// Name of the sensor-core to broker-core hop.
pub const HOP_SENSOR_TO_BROKER: &str = "tilt/sensor->broker";

/// Name of the broker-core to console-core hop.
pub const HOP_BROKER_TO_CONSOLE: &str = "tilt/broker->console";

/// Default sensor sampling period (1 kHz).
pub const DEFAULT_SAMPLE_PERIOD: Duration = Duration::from_millis(1);

/// Default broker forwarding period.
///
/// The broker runs faster than the consumer but does not need to outrun
/// the producer; polling at the sample cadence keeps worst-case forwarding
/// latency at one sample period.
pub const DEFAULT_BROKER_PERIOD: Duration = Duration::from_millis(1);

/// Default consumer poll period (display/UART cadence, 50 Hz).
pub const DEFAULT_CONSUMER_PERIOD: Duration = Duration::from_millis(20);

/// Default bound on a single lock acquisition wait.
///
/// Critical sections are copy-in/copy-out only, so a held lock clears in
/// well under a microsecond. A millisecond of waiting means the peer stage
/// is wedged, not busy.
pub const DEFAULT_LOCK_WAIT: Duration = Duration::from_millis(1);

/// Default number of consecutive contended acquires tolerated before the
/// hop is declared faulted.
pub const DEFAULT_CONTENTION_BOUND: u32 = 8;
