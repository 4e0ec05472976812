//! Collaborator seams at the edges of the pipeline
//!
//! The IPC core does not own peripherals. The sensor on the producing
//! core and the serial output on the consuming core are modelled as
//! traits that deliver or accept values at the mailbox boundary; how the
//! bytes reach a wire is someone else's problem.

use crate::error::IpcResult;
use level::tilt::TiltReading;
use std::io::Write;

/// "Give me the latest measurement" collaborator on the producing core.
pub trait TiltSensor {
    /// Sample the current tilt. Synchronous; any sensor-level error
    /// handling happens inside the driver.
    fn sample(&mut self) -> TiltReading;
}

/// Opaque byte channel consumed by the final pipeline stage.
///
/// Blanket-implemented for anything `std::io::Write`, so tests can use a
/// `Vec<u8>` and a deployment can hand in a serial port handle.
pub trait ByteSink {
    /// Deliver one frame of bytes, blocking until accepted.
    fn send(&mut self, bytes: &[u8]) -> IpcResult<()>;
}

impl<W: Write> ByteSink for W {
    fn send(&mut self, bytes: &[u8]) -> IpcResult<()> {
        self.write_all(bytes)?;
        self.flush()?;
        Ok(())
    }
}

/// Render a reading as one line-oriented text frame.
///
/// Matches the firmware's serial monitor format: signed fixed-point axes,
/// CRLF-terminated.
pub fn encode_reading(reading: &TiltReading) -> String {
    format!(
        "x={:+.3} y={:+.3}\r\n",
        reading.accel_x, reading.accel_y
    )
}

/// Encode and transmit a reading through a byte sink.
pub fn send_reading<S: ByteSink>(sink: &mut S, reading: &TiltReading) -> IpcResult<()> {
    sink.send(encode_reading(reading).as_bytes())
}
