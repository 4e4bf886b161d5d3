//! Plugin Settings
//!
//! Typed settings record for the overlay, the tokens each field accepts, and
//! the resolver that turns a raw key/value store into a valid record.
//!
//! ## Persisted keys
//!
//! ```text
//! toggleHotkey      = LeftControl+H
//! units             = Automatic | Kph | Mph
//! display           = Watermark | Hud
//! activation        = Always | Warning | Toggle
//! warningThreshold  = 0.8
//! ```
//!
//! Tokens are matched case-insensitively.

mod resolver;
mod store;

pub use resolver::SettingsResolver;
pub use store::{MemoryStore, SettingsFile, SettingsStore, StoreError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name of the host settings file, without extension
pub const SETTINGS_NAME: &str = "Heat.plugin";

/// Persisted setting keys
pub mod keys {
    /// Hotkey that flips the toggle activation mode
    pub const TOGGLE_HOTKEY: &str = "toggleHotkey";
    /// Speed unit selection
    pub const UNITS: &str = "units";
    /// Display target selection
    pub const DISPLAY: &str = "display";
    /// Activation mode
    pub const ACTIVATION: &str = "activation";
    /// Heat fraction above which warning mode shows the readout
    pub const WARNING_THRESHOLD: &str = "warningThreshold";

    /// Every key the resolver manages
    pub const ALL: [&str; 5] = [TOGGLE_HOTKEY, UNITS, DISPLAY, ACTIVATION, WARNING_THRESHOLD];
}

/// Why a stored setting value was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingError {
    #[error("unrecognized value '{0}'")]
    UnknownToken(String),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("value is blank")]
    Blank,
}

/// Speed unit selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    /// Follow the game's global unit-system preference
    #[default]
    Automatic,
    /// Always kilometres per hour
    Kph,
    /// Always miles per hour
    Mph,
}

/// Where the readout is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayTarget {
    /// Persistent UI label
    #[default]
    Watermark,
    /// Hover-screen overlay above the car
    Hud,
    /// On-car display from older plugin builds. Recognized so it is not
    /// silently rewritten, but no sink exists for it.
    Car,
}

/// When the readout is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activation {
    /// Whenever a car is present
    #[default]
    Always,
    /// Only while heat is above the warning threshold
    Warning,
    /// Only while toggled on by the hotkey
    Toggle,
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

impl FromStr for Units {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "automatic" => Ok(Units::Automatic),
            "kph" => Ok(Units::Kph),
            "mph" => Ok(Units::Mph),
            _ => Err(SettingError::UnknownToken(s.to_string())),
        }
    }
}

impl FromStr for DisplayTarget {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "watermark" => Ok(DisplayTarget::Watermark),
            "hud" => Ok(DisplayTarget::Hud),
            "car" => Ok(DisplayTarget::Car),
            _ => Err(SettingError::UnknownToken(s.to_string())),
        }
    }
}

impl FromStr for Activation {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "always" => Ok(Activation::Always),
            "warning" => Ok(Activation::Warning),
            "toggle" => Ok(Activation::Toggle),
            _ => Err(SettingError::UnknownToken(s.to_string())),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Automatic => write!(f, "Automatic"),
            Units::Kph => write!(f, "Kph"),
            Units::Mph => write!(f, "Mph"),
        }
    }
}

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTarget::Watermark => write!(f, "Watermark"),
            DisplayTarget::Hud => write!(f, "Hud"),
            DisplayTarget::Car => write!(f, "Car"),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Always => write!(f, "Always"),
            Activation::Warning => write!(f, "Warning"),
            Activation::Toggle => write!(f, "Toggle"),
        }
    }
}

/// Parse a hotkey combination. Any non-blank string is accepted as-is; the
/// host's binder decides whether the combination is meaningful.
pub fn parse_hotkey(s: &str) -> Result<String, SettingError> {
    if s.trim().is_empty() {
        return Err(SettingError::Blank);
    }
    Ok(s.to_string())
}

/// Parse the warning threshold. No range check: values outside [0, 1] make
/// warning mode permanently on or off.
pub fn parse_threshold(s: &str) -> Result<f64, SettingError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| SettingError::InvalidNumber(s.to_string()))
}

/// Resolved plugin settings. Every field holds a valid value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Key combination that flips the toggle state
    pub toggle_hotkey: String,
    /// Speed unit selection
    pub units: Units,
    /// Display target
    pub display: DisplayTarget,
    /// Activation mode
    pub activation: Activation,
    /// Heat fraction for warning mode
    pub warning_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toggle_hotkey: "LeftControl+H".to_string(),
            units: Units::Automatic,
            display: DisplayTarget::Watermark,
            activation: Activation::Always,
            warning_threshold: 0.8,
        }
    }
}
