//! Demo Mode - Simulated telemetry for running without a game
//!
//! Simulates a car cruising with random bursts of boost. Boost drives the
//! heat level up, coasting cools it down. When heat reaches 100% the car
//! "explodes" and is absent for a short respawn period.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::host::TelemetrySource;
use crate::telemetry::{TelemetrySnapshot, UnitSystem};

const CRUISE_KPH: f64 = 140.0;
const BOOST_KPH: f64 = 320.0;
const RESPAWN_MS: u64 = 2000;

/// Demo telemetry source producing plausible heat and speed data
pub struct DemoTelemetry {
    /// Simulated time advanced per poll (ms)
    tick_ms: u64,
    /// Current simulated time (ms)
    now_ms: u64,
    /// Current drive state
    state: DriveState,
    /// Current speed (smoothed)
    speed_kph: f64,
    /// Current heat fraction
    heat: f64,
    /// Preference reported to the formatter
    preferred_units: Option<UnitSystem>,
    rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DriveState {
    /// Steady speed, heat dissipating
    Cruise { until_ms: u64 },
    /// Boosting, heat building
    Boost { until_ms: u64 },
    /// Car destroyed, waiting to respawn
    Respawn { until_ms: u64 },
}

impl DemoTelemetry {
    /// Create a seeded simulator advancing `tick_ms` per poll
    pub fn new(seed: u64, tick_ms: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let first_boost = rng.gen_range(1500..4000);

        Self {
            tick_ms,
            now_ms: 0,
            state: DriveState::Cruise {
                until_ms: first_boost,
            },
            speed_kph: 0.0,
            heat: 0.0,
            preferred_units: Some(UnitSystem::Metric),
            rng,
        }
    }

    /// Report a different global unit preference
    pub fn with_preferred_units(mut self, preferred_units: Option<UnitSystem>) -> Self {
        self.preferred_units = preferred_units;
        self
    }

    /// Simulated time elapsed (ms)
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advance the simulation by one tick and return the snapshot
    pub fn step(&mut self) -> TelemetrySnapshot {
        self.now_ms += self.tick_ms;
        let dt = self.tick_ms as f64 / 1000.0;

        self.update_state();

        if let DriveState::Respawn { .. } = self.state {
            return TelemetrySnapshot::absent();
        }

        let (target_kph, heat_rate) = match self.state {
            DriveState::Boost { .. } => (BOOST_KPH, 0.22),
            _ => (CRUISE_KPH, -0.12),
        };

        // Smooth speed changes, ~2 s time constant
        self.speed_kph += (target_kph - self.speed_kph) * (dt / 2.0).min(1.0);
        let wobble = self.rng.gen_range(-0.5..0.5);
        self.speed_kph = (self.speed_kph + wobble).max(0.0);

        self.heat = (self.heat + heat_rate * dt).clamp(0.0, 1.0);
        if self.heat >= 1.0 {
            tracing::debug!("Demo car overheated at {} ms", self.now_ms);
            self.state = DriveState::Respawn {
                until_ms: self.now_ms + RESPAWN_MS,
            };
            return TelemetrySnapshot::absent();
        }

        TelemetrySnapshot::from_kph(self.heat, self.speed_kph, self.preferred_units)
    }

    fn update_state(&mut self) {
        let now = self.now_ms;
        let current = self.state;
        self.state = match current {
            DriveState::Cruise { until_ms } if now >= until_ms => DriveState::Boost {
                until_ms: now + self.rng.gen_range(2000..6000),
            },
            DriveState::Boost { until_ms } if now >= until_ms => DriveState::Cruise {
                until_ms: now + self.rng.gen_range(3000..8000),
            },
            DriveState::Respawn { until_ms } if now >= until_ms => {
                self.heat = 0.0;
                self.speed_kph = 0.0;
                DriveState::Cruise {
                    until_ms: now + self.rng.gen_range(1500..4000),
                }
            }
            state => state,
        };
    }
}

impl TelemetrySource for DemoTelemetry {
    fn poll(&mut self) -> TelemetrySnapshot {
        self.step()
    }
}
