//! Tilt payload exchanged across every pipeline hop.
//!
//! A `TiltReading` is a fixed-size, copy-only record so that a mailbox
//! critical section is a plain memcpy with no allocation or pointer
//! chasing. The struct is `#[repr(C)]` because the same layout is shared
//! with the firmware-facing encoder in `level_ipc::transport`.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Two-axis accelerometer reading in units of g.
///
/// Immutable once published: every publish replaces the whole record and
/// advances the owning mailbox's update counter by one.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltReading {
    /// Tilt on the X axis.
    pub accel_x: f32,
    /// Tilt on the Y axis.
    pub accel_y: f32,
}

const_assert_eq!(core::mem::size_of::<TiltReading>(), 8);

impl TiltReading {
    /// Create a reading from raw axis values.
    pub const fn new(accel_x: f32, accel_y: f32) -> Self {
        Self { accel_x, accel_y }
    }

    /// Combined tilt magnitude across both axes.
    pub fn magnitude(&self) -> f32 {
        (self.accel_x * self.accel_x + self.accel_y * self.accel_y).sqrt()
    }

    /// True when both axes are within `tolerance_g` of level.
    pub fn is_level(&self, tolerance_g: f32) -> bool {
        self.accel_x.abs() <= tolerance_g && self.accel_y.abs() <= tolerance_g
    }
}
