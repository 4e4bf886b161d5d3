//! Display Controller
//!
//! Ties settings, telemetry, the activation policy and the formatter
//! together and routes the readout to one of two sinks.
//!
//! # Lifecycle
//!
//! 1. **Initialize** - resolve settings, pick the sink, locate the watermark
//!    label if needed, bind the toggle hotkey
//! 2. **Update** - once per frame: poll telemetry, decide, format, route
//!
//! # Sinks
//!
//! - `Watermark` - the label is written every tick, with an empty string
//!   while the readout is hidden. The toggle hotkey clears it immediately.
//! - `Hud` - text is pushed only while the readout is shown; the overlay
//!   fades out on its own once pushes stop.

use std::fmt;
use std::rc::Rc;

use crate::error::HeatError;
use crate::format::format_display_text;
use crate::host::{
    HotkeyBinder, OverlaySink, OverlayText, TelemetrySource, WatermarkLocator, WatermarkSink,
};
use crate::policy::should_display;
use crate::settings::{DisplayTarget, Settings, SettingsResolver, SettingsStore};
use crate::telemetry::TelemetrySnapshot;
use crate::toggle::ToggleState;

/// Host services needed to bring the controller up.
pub struct HostContext<'a> {
    /// Persistent plugin settings
    pub store: &'a mut dyn SettingsStore,
    /// Hotkey registration
    pub hotkeys: &'a mut dyn HotkeyBinder,
    /// Watermark label lookup, used only for the watermark sink
    pub watermark: &'a dyn WatermarkLocator,
    /// Hover-screen overlay
    pub overlay: Rc<dyn OverlaySink>,
}

/// Output the readout is routed to. Fixed for the controller's lifetime.
#[derive(Clone)]
pub enum Sink {
    /// Persistent UI label
    Watermark(Rc<dyn WatermarkSink>),
    /// Hover-screen overlay
    Hud(Rc<dyn OverlaySink>),
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Watermark(_) => write!(f, "Sink::Watermark"),
            Sink::Hud(_) => write!(f, "Sink::Hud"),
        }
    }
}

/// Per-frame heat readout driver
#[derive(Debug)]
pub struct DisplayController {
    settings: Settings,
    sink: Sink,
    toggle: ToggleState,
}

impl DisplayController {
    /// Resolve settings with the standard defaults and bring the controller up.
    pub fn initialize(host: HostContext<'_>) -> Result<Self, HeatError> {
        Self::initialize_with(&SettingsResolver::new(), host)
    }

    /// Bring the controller up using a specific resolver.
    ///
    /// # Errors
    /// - The display target has no sink (legacy `car`)
    /// - The watermark label cannot be located
    /// - The toggle hotkey cannot be bound
    pub fn initialize_with(
        resolver: &SettingsResolver,
        host: HostContext<'_>,
    ) -> Result<Self, HeatError> {
        let settings = resolver.resolve(host.store);

        let sink = match settings.display {
            DisplayTarget::Watermark => Sink::Watermark(host.watermark.locate()?),
            DisplayTarget::Hud => Sink::Hud(host.overlay),
            DisplayTarget::Car => {
                return Err(HeatError::UnsupportedDisplay(settings.display.to_string()));
            }
        };

        let toggle = ToggleState::new();
        let on_press = {
            let toggle = toggle.clone();
            let label = match &sink {
                Sink::Watermark(label) => Some(Rc::clone(label)),
                Sink::Hud(_) => None,
            };
            move || {
                let toggled = toggle.flip();
                if let Some(label) = &label {
                    label.set_text("");
                }
                tracing::debug!(toggled, "Toggle hotkey pressed");
            }
        };
        host.hotkeys
            .bind(&settings.toggle_hotkey, Box::new(on_press))?;

        tracing::info!(
            "Heat initialized: display={}, activation={}, units={}, hotkey={}",
            settings.display,
            settings.activation,
            settings.units,
            settings.toggle_hotkey
        );

        Ok(Self {
            settings,
            sink,
            toggle,
        })
    }

    /// Resolved settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Active sink
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Current toggle state
    pub fn toggled(&self) -> bool {
        self.toggle.get()
    }

    /// Per-frame entry point: poll telemetry and route the readout.
    pub fn update(&self, telemetry: &mut dyn TelemetrySource) -> Option<String> {
        let snapshot = telemetry.poll();
        self.render(&snapshot)
    }

    /// Route the readout for one snapshot. Returns the text shown, if any.
    pub fn render(&self, snapshot: &TelemetrySnapshot) -> Option<String> {
        let text = should_display(&self.settings, snapshot, self.toggle.get())
            .then(|| format_display_text(snapshot.heat_level, self.settings.units, snapshot));

        match &self.sink {
            Sink::Watermark(label) => label.set_text(text.as_deref().unwrap_or("")),
            Sink::Hud(overlay) => {
                if let Some(text) = &text {
                    overlay.push_text(OverlayText::readout(text.clone()));
                }
            }
        }

        tracing::trace!(shown = text.is_some(), "Tick");
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;
    use crate::telemetry::UnitSystem;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Label {
        text: RefCell<String>,
    }

    impl WatermarkSink for Label {
        fn set_text(&self, text: &str) {
            *self.text.borrow_mut() = text.to_string();
        }
    }

    struct Locator(Rc<Label>);

    impl WatermarkLocator for Locator {
        fn locate(&self) -> Result<Rc<dyn WatermarkSink>, HeatError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct Overlay {
        pushed: RefCell<Vec<OverlayText>>,
    }

    impl OverlaySink for Overlay {
        fn push_text(&self, text: OverlayText) {
            self.pushed.borrow_mut().push(text);
        }
    }

    #[derive(Default)]
    struct Hotkeys {
        bound: Vec<(String, Box<dyn FnMut()>)>,
    }

    impl HotkeyBinder for Hotkeys {
        fn bind(&mut self, combo: &str, on_press: Box<dyn FnMut()>) -> Result<(), HeatError> {
            self.bound.push((combo.to_string(), on_press));
            Ok(())
        }
    }

    impl Hotkeys {
        fn press(&mut self) {
            for (_, callback) in &mut self.bound {
                callback();
            }
        }
    }

    fn controller(
        pairs: &[(&str, &str)],
        label: &Rc<Label>,
        overlay: &Rc<Overlay>,
        hotkeys: &mut Hotkeys,
    ) -> Result<DisplayController, HeatError> {
        let mut store = MemoryStore::from_pairs(pairs.iter().copied());
        let locator = Locator(label.clone());
        DisplayController::initialize(HostContext {
            store: &mut store,
            hotkeys,
            watermark: &locator,
            overlay: overlay.clone(),
        })
    }

    fn car(heat: f64) -> TelemetrySnapshot {
        TelemetrySnapshot::from_kph(heat, 87.4, Some(UnitSystem::Metric))
    }

    #[test]
    fn test_watermark_written_every_tick() {
        let label = Rc::new(Label::default());
        let overlay = Rc::new(Overlay::default());
        let mut hotkeys = Hotkeys::default();
        let ctrl = controller(&[], &label, &overlay, &mut hotkeys).unwrap();

        assert_eq!(ctrl.render(&car(0.755)), Some("76% Heat\n87 KPH".to_string()));
        assert_eq!(*label.text.borrow(), "76% Heat\n87 KPH");

        assert_eq!(ctrl.render(&TelemetrySnapshot::absent()), None);
        assert_eq!(*label.text.borrow(), "");
        assert!(overlay.pushed.borrow().is_empty());
    }

    #[test]
    fn test_hud_pushes_only_when_shown() {
        let label = Rc::new(Label::default());
        let overlay = Rc::new(Overlay::default());
        let mut hotkeys = Hotkeys::default();
        let ctrl = controller(
            &[("display", "hud"), ("activation", "warning")],
            &label,
            &overlay,
            &mut hotkeys,
        )
        .unwrap();

        ctrl.render(&car(0.5));
        assert!(overlay.pushed.borrow().is_empty());

        ctrl.render(&car(0.9));
        let pushed = overlay.pushed.borrow();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].duration_secs, 3.0);
        assert_eq!(pushed[0].repeat_count, -1);
        assert_eq!(pushed[0].text, "90% Heat\n87 KPH");
        assert_eq!(*label.text.borrow(), "");
    }

    #[test]
    fn test_toggle_clears_watermark() {
        let label = Rc::new(Label::default());
        let overlay = Rc::new(Overlay::default());
        let mut hotkeys = Hotkeys::default();
        let ctrl = controller(&[("activation", "toggle")], &label, &overlay, &mut hotkeys).unwrap();

        assert_eq!(hotkeys.bound[0].0, "LeftControl+H");
        assert_eq!(ctrl.render(&car(0.2)), None);

        hotkeys.press();
        assert!(ctrl.toggled());
        ctrl.render(&car(0.2));
        assert_eq!(*label.text.borrow(), "20% Heat\n87 KPH");

        hotkeys.press();
        assert!(!ctrl.toggled());
        assert_eq!(*label.text.borrow(), "");
    }

    #[test]
    fn test_toggle_in_hud_mode_leaves_label_alone() {
        let label = Rc::new(Label::default());
        label.set_text("untouched");
        let overlay = Rc::new(Overlay::default());
        let mut hotkeys = Hotkeys::default();
        let ctrl = controller(
            &[("display", "Hud"), ("activation", "Toggle")],
            &label,
            &overlay,
            &mut hotkeys,
        )
        .unwrap();

        hotkeys.press();
        assert!(ctrl.toggled());
        assert_eq!(*label.text.borrow(), "untouched");
    }

    #[test]
    fn test_legacy_car_display_is_fatal() {
        let label = Rc::new(Label::default());
        let overlay = Rc::new(Overlay::default());
        let mut hotkeys = Hotkeys::default();
        let err = controller(&[("display", "car")], &label, &overlay, &mut hotkeys).unwrap_err();

        assert!(matches!(err, HeatError::UnsupportedDisplay(_)));
        assert!(hotkeys.bound.is_empty());
    }

    #[test]
    fn test_update_polls_source() {
        struct Fixed(TelemetrySnapshot, usize);
        impl TelemetrySource for Fixed {
            fn poll(&mut self) -> TelemetrySnapshot {
                self.1 += 1;
                self.0
            }
        }

        let label = Rc::new(Label::default());
        let overlay = Rc::new(Overlay::default());
        let mut hotkeys = Hotkeys::default();
        let ctrl = controller(&[("units", "mph")], &label, &overlay, &mut hotkeys).unwrap();

        let mut source = Fixed(car(0.0), 0);
        assert_eq!(ctrl.update(&mut source), Some("0% Heat\n54 MPH".to_string()));
        assert_eq!(source.1, 1);
    }
}
