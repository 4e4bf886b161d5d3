//! Error types for controller initialization

use thiserror::Error;

use crate::settings::StoreError;

/// Fatal errors raised while bringing the display controller up.
///
/// Everything recoverable (bad setting values, missing telemetry) is absorbed
/// before it reaches this type.
#[derive(Error, Debug)]
pub enum HeatError {
    #[error("Settings store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unsupported display target '{0}': no sink can render it")]
    UnsupportedDisplay(String),

    #[error("Watermark label unavailable: {0}")]
    WatermarkUnavailable(String),

    #[error("Failed to bind hotkey '{combo}': {message}")]
    Hotkey { combo: String, message: String },
}
