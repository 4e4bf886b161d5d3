//! # Heat Core Library
//!
//! Core functionality for the Heat vehicle telemetry overlay.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Settings resolution with self-healing defaults
//! - Activation policy (always / above a heat warning / hotkey toggle)
//! - Two-line heat and speed text formatting
//! - Routing of the text to a watermark label or a hover-screen overlay
//! - A simulated telemetry source for running without a game
//!
//! The host game is reached only through the traits in [`host`] and
//! [`settings::SettingsStore`], so the controller can be driven by any
//! engine binding or by tests.
//!
//! ## Example
//!
//! ```rust,ignore
//! use heat_core::prelude::*;
//!
//! let mut controller = DisplayController::initialize(HostContext {
//!     store: &mut settings_file,
//!     hotkeys: &mut hotkeys,
//!     watermark: &locator,
//!     overlay: overlay.clone(),
//! })?;
//!
//! // Once per frame
//! controller.update(&mut telemetry);
//! ```

pub mod controller;
pub mod demo;
pub mod error;
pub mod format;
pub mod host;
pub mod policy;
pub mod settings;
pub mod telemetry;
pub mod toggle;
pub mod units;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::controller::{DisplayController, HostContext, Sink};
    pub use crate::demo::DemoTelemetry;
    pub use crate::error::HeatError;
    pub use crate::format::{format_display_text, resolve_units, SpeedUnit};
    pub use crate::host::{
        HotkeyBinder, OverlaySink, OverlayText, TelemetrySource, TextStyle, WatermarkLocator,
        WatermarkSink,
    };
    pub use crate::policy::should_display;
    pub use crate::settings::{
        Activation, DisplayTarget, MemoryStore, Settings, SettingsFile, SettingsResolver,
        SettingsStore, Units,
    };
    pub use crate::telemetry::{TelemetrySnapshot, UnitSystem};
    pub use crate::toggle::ToggleState;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
