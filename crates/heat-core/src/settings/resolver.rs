//! Settings resolution
//!
//! Each schema entry is resolved independently: a missing key gets the
//! default written in, an unparseable value is logged, removed and replaced
//! by the default. The store is saved once at the end so the healed entries
//! persist.

use std::fmt::Display;

use super::{
    keys, parse_hotkey, parse_threshold, Activation, DisplayTarget, SettingError, Settings,
    SettingsStore, Units,
};

/// Builds a valid [`Settings`] record from a raw store, healing it in place.
#[derive(Debug, Clone, Default)]
pub struct SettingsResolver {
    defaults: Settings,
}

impl SettingsResolver {
    /// Create a resolver using the standard defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with custom defaults
    pub fn with_defaults(defaults: Settings) -> Self {
        Self { defaults }
    }

    /// Defaults substituted for missing or invalid entries
    pub fn defaults(&self) -> &Settings {
        &self.defaults
    }

    /// Resolve every schema entry and save the store.
    ///
    /// Never fails: a failed save is logged and the resolved record is still
    /// returned, since it is valid in memory.
    pub fn resolve(&self, store: &mut dyn SettingsStore) -> Settings {
        let defaults = &self.defaults;

        let settings = Settings {
            toggle_hotkey: process_setting(
                store,
                keys::TOGGLE_HOTKEY,
                defaults.toggle_hotkey.clone(),
                parse_hotkey,
            ),
            units: process_setting(store, keys::UNITS, defaults.units, str::parse::<Units>),
            display: process_setting(
                store,
                keys::DISPLAY,
                defaults.display,
                str::parse::<DisplayTarget>,
            ),
            activation: process_setting(
                store,
                keys::ACTIVATION,
                defaults.activation,
                str::parse::<Activation>,
            ),
            warning_threshold: process_setting(
                store,
                keys::WARNING_THRESHOLD,
                defaults.warning_threshold,
                parse_threshold,
            ),
        };

        if let Err(e) = store.save() {
            tracing::warn!("[Heat] Failed to save settings: {e}");
        }

        tracing::debug!(?settings, "Resolved settings");
        settings
    }
}

fn process_setting<T, F>(store: &mut dyn SettingsStore, key: &str, default: T, parser: F) -> T
where
    T: Display,
    F: Fn(&str) -> Result<T, SettingError>,
{
    let default_string = default.to_string();

    let Some(raw) = store.get(key) else {
        store.add(key, &default_string);
        return default;
    };

    match parser(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                "[Heat] Invalid '{key}' setting specified ({e}); defaulting to '{default_string}'"
            );
            store.remove(key);
            store.add(key, &default_string);
            default
        }
    }
}
