//! Heat console demo
//!
//! Runs the display controller against simulated telemetry, printing the
//! watermark or overlay text to the terminal whenever it changes.
//!
//! ```text
//! heat-demo [SETTINGS_FILE] [SECONDS]
//! ```
//!
//! The toggle hotkey is pressed automatically every few seconds so toggle
//! activation can be watched without a keyboard hook.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use heat_core::prelude::*;
use tracing_subscriber::EnvFilter;

const TICK_MS: u64 = 100;
const DEFAULT_SECONDS: u64 = 30;
const TOGGLE_EVERY_TICKS: u64 = 40;

/// Prints the label text when it changes
#[derive(Default)]
struct ConsoleLabel {
    last: RefCell<String>,
}

impl WatermarkSink for ConsoleLabel {
    fn set_text(&self, text: &str) {
        let mut last = self.last.borrow_mut();
        if *last != text {
            println!("[watermark] {}", text.replace('\n', " | "));
            *last = text.to_string();
        }
    }
}

struct ConsoleLocator(Rc<ConsoleLabel>);

impl WatermarkLocator for ConsoleLocator {
    fn locate(&self) -> Result<Rc<dyn WatermarkSink>, HeatError> {
        Ok(self.0.clone())
    }
}

/// Prints overlay pushes when the text changes
#[derive(Default)]
struct ConsoleOverlay {
    last: RefCell<String>,
}

impl OverlaySink for ConsoleOverlay {
    fn push_text(&self, text: OverlayText) {
        let mut last = self.last.borrow_mut();
        if *last != text.text {
            println!(
                "[hover {:.1}s] {}",
                text.duration_secs,
                text.text.replace('\n', " | ")
            );
            *last = text.text;
        }
    }
}

/// Holds bound callbacks; the main loop presses them on a schedule
#[derive(Default)]
struct ScriptedHotkeys {
    bindings: Vec<(String, Box<dyn FnMut()>)>,
}

impl ScriptedHotkeys {
    fn press_all(&mut self) {
        for (combo, callback) in &mut self.bindings {
            tracing::info!("Pressing {combo}");
            callback();
        }
    }
}

impl HotkeyBinder for ScriptedHotkeys {
    fn bind(&mut self, combo: &str, on_press: Box<dyn FnMut()>) -> Result<(), HeatError> {
        self.bindings.push((combo.to_string(), on_press));
        Ok(())
    }
}

fn settings_path(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from)
        .or_else(SettingsFile::default_path)
        .unwrap_or_else(|| PathBuf::from("Heat.plugin.json"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = settings_path(args.next());
    let seconds = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .with_context(|| format!("invalid duration '{s}'"))?,
        None => DEFAULT_SECONDS,
    };

    tracing::info!(
        "Heat demo {} started at {}, settings: {}",
        heat_core::VERSION,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        path.display()
    );

    let mut store = SettingsFile::load(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    let mut hotkeys = ScriptedHotkeys::default();
    let locator = ConsoleLocator(Rc::new(ConsoleLabel::default()));

    let controller = DisplayController::initialize(HostContext {
        store: &mut store,
        hotkeys: &mut hotkeys,
        watermark: &locator,
        overlay: Rc::new(ConsoleOverlay::default()),
    })
    .context("failed to initialize display controller")?;

    let mut telemetry = DemoTelemetry::new(rand_seed(), TICK_MS);
    let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
    let total_ticks = seconds * 1000 / TICK_MS;

    for tick in 1..=total_ticks {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }

        if tick % TOGGLE_EVERY_TICKS == 0 {
            hotkeys.press_all();
        }
        controller.update(&mut telemetry);
    }

    tracing::info!(
        "Demo finished after {:.1}s simulated",
        telemetry.elapsed_ms() as f64 / 1000.0
    );
    Ok(())
}

fn rand_seed() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
