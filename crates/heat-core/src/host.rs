//! Host collaborator interfaces
//!
//! The game engine binding implements these traits. All calls happen on the
//! host's update thread, so handles are single-threaded and take `&self`
//! where the host object is a shared UI handle.

use std::rc::Rc;

use crate::error::HeatError;
use crate::telemetry::TelemetrySnapshot;

/// How long a hover-screen message stays up, in seconds
pub const OVERLAY_DURATION_SECS: f32 = 3.0;

/// Overlay repeat count meaning "repeat until replaced"
pub const REPEAT_FOREVER: i32 = -1;

/// Source of per-tick vehicle state
pub trait TelemetrySource {
    /// Read the current state. Called once per tick.
    fn poll(&mut self) -> TelemetrySnapshot;
}

/// Registers hotkey callbacks with the host input system
pub trait HotkeyBinder {
    /// Bind `combo` (e.g. `LeftControl+H`) to a callback fired on the
    /// update thread.
    fn bind(&mut self, combo: &str, on_press: Box<dyn FnMut()>) -> Result<(), HeatError>;
}

/// A located UI text label
pub trait WatermarkSink {
    /// Replace the label text
    fn set_text(&self, text: &str);
}

/// Finds and activates the watermark label at startup
pub trait WatermarkLocator {
    /// Locate the label, make it visible, and hand back a handle to it
    fn locate(&self) -> Result<Rc<dyn WatermarkSink>, HeatError>;
}

/// Visual style of an overlay message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    /// Plain text
    #[default]
    Standard,
}

/// A message pushed to the hover screen
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayText {
    /// Seconds the message stays visible without a refresh
    pub duration_secs: f32,
    /// Times the message repeats, [`REPEAT_FOREVER`] for no expiry
    pub repeat_count: i32,
    /// Display style
    pub style: TextStyle,
    /// Message body
    pub text: String,
}

impl OverlayText {
    /// Standard readout message: fixed duration, repeating until replaced
    pub fn readout(text: String) -> Self {
        Self {
            duration_secs: OVERLAY_DURATION_SECS,
            repeat_count: REPEAT_FOREVER,
            style: TextStyle::Standard,
            text,
        }
    }
}

/// The in-world hover screen above the car
pub trait OverlaySink {
    /// Push a message. Hosts without an active hover screen drop it.
    fn push_text(&self, text: OverlayText);
}
