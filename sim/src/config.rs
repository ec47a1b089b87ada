//! Engine configuration.
//!
//! Defaults mirror the classic demo: a 100x100 board of 20 px cells stepping
//! every 100 ms.

use crate::error::{LifeError, Result};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// How `tick_rate` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickMode {
    /// `tick_rate` is generations per second; threshold = 1000 / rate ms.
    #[default]
    FramesPerSecond,
    /// `tick_rate` is the raw interval between generations in milliseconds.
    IntervalMillis,
}

/// What happens to accumulated time beyond the threshold when a generation fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OvershootPolicy {
    /// Reset the accumulator to zero.
    #[default]
    Discard,
    /// Keep the remainder (`accumulated % threshold`) for the next frame.
    CarryForward,
}

/// Simulation configuration, stored as a resource in the engine world.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Pixel size of one cell for layout.
    pub cell_size: f32,
    pub tick_mode: TickMode,
    /// Tick rate in the unit of `tick_mode`, clamped to that mode's bounds.
    pub tick_rate: f32,
    /// Generations-per-second bounds for `FramesPerSecond`.
    pub min_tick_rate: f32,
    pub max_tick_rate: f32,
    /// Millisecond bounds for `IntervalMillis`.
    pub min_interval_ms: f32,
    pub max_interval_ms: f32,
    pub overshoot: OvershootPolicy,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            cell_size: 20.0,
            tick_mode: TickMode::FramesPerSecond,
            tick_rate: 10.0, // 100 ms per generation
            min_tick_rate: 1.0,
            max_tick_rate: 60.0,
            min_interval_ms: 1000.0 / 60.0,
            max_interval_ms: 1000.0,
            overshoot: OvershootPolicy::Discard,
        }
    }
}

impl LifeConfig {
    /// Parse a host-supplied JSON config. Missing fields take defaults.
    pub fn from_json(data: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.cell_size > 0.0) {
            return Err(LifeError::InvalidConfig("cell_size must be positive"));
        }
        if !(self.min_tick_rate > 0.0) {
            return Err(LifeError::InvalidConfig("min_tick_rate must be positive"));
        }
        if self.min_tick_rate > self.max_tick_rate {
            return Err(LifeError::InvalidConfig(
                "min_tick_rate must not exceed max_tick_rate",
            ));
        }
        if !(self.min_interval_ms > 0.0) {
            return Err(LifeError::InvalidConfig("min_interval_ms must be positive"));
        }
        if self.min_interval_ms > self.max_interval_ms {
            return Err(LifeError::InvalidConfig(
                "min_interval_ms must not exceed max_interval_ms",
            ));
        }
        Ok(())
    }

    /// `(min, max)` for the current tick mode, in that mode's unit.
    pub fn rate_bounds(&self) -> (f32, f32) {
        match self.tick_mode {
            TickMode::FramesPerSecond => (self.min_tick_rate, self.max_tick_rate),
            TickMode::IntervalMillis => (self.min_interval_ms, self.max_interval_ms),
        }
    }

    /// Clamp a requested rate into the bounds of the current tick mode.
    pub fn clamp_rate(&self, rate: f32) -> f32 {
        let (min, max) = self.rate_bounds();
        if rate.is_nan() {
            return min;
        }
        rate.clamp(min, max)
    }

    /// Switch tick mode, converting `tick_rate` so the cadence is kept.
    ///
    /// Generations per second and milliseconds per generation are reciprocal
    /// (`ms = 1000 / rate`). The converted rate is clamped to the new mode's
    /// bounds. Returns the applied rate.
    pub fn switch_tick_mode(&mut self, mode: TickMode) -> f32 {
        if mode != self.tick_mode {
            let current = f64::from(self.clamp_rate(self.tick_rate));
            self.tick_mode = mode;
            self.tick_rate = self.clamp_rate((1000.0 / current) as f32);
        }
        self.tick_rate
    }

    /// Milliseconds that must accumulate before one generation runs.
    pub fn tick_threshold_ms(&self) -> f64 {
        let rate = f64::from(self.clamp_rate(self.tick_rate));
        match self.tick_mode {
            TickMode::FramesPerSecond => 1000.0 / rate,
            TickMode::IntervalMillis => rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LifeConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.tick_threshold_ms() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_interval_mode_threshold() {
        let config = LifeConfig {
            tick_mode: TickMode::IntervalMillis,
            tick_rate: 40.0,
            ..Default::default()
        };
        assert!((config.tick_threshold_ms() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_interval_mode_uses_millisecond_bounds() {
        let config = LifeConfig {
            tick_mode: TickMode::IntervalMillis,
            ..Default::default()
        };
        assert_eq!(config.rate_bounds(), (1000.0 / 60.0, 1000.0));
        assert_eq!(config.clamp_rate(100.0), 100.0);
        assert_eq!(config.clamp_rate(5000.0), 1000.0);
        assert_eq!(config.clamp_rate(1.0), 1000.0 / 60.0);
    }

    #[test]
    fn test_switch_tick_mode_keeps_cadence() {
        let mut config = LifeConfig::default();
        assert_eq!(config.switch_tick_mode(TickMode::IntervalMillis), 100.0);
        assert!((config.tick_threshold_ms() - 100.0).abs() < 1e-6);

        config.tick_rate = 250.0;
        assert_eq!(config.switch_tick_mode(TickMode::FramesPerSecond), 4.0);
        assert!((config.tick_threshold_ms() - 250.0).abs() < 1e-6);

        // Same mode: rate untouched.
        assert_eq!(config.switch_tick_mode(TickMode::FramesPerSecond), 4.0);
    }

    #[test]
    fn test_clamp_rate() {
        let config = LifeConfig::default();
        assert_eq!(config.clamp_rate(0.0), 1.0);
        assert_eq!(config.clamp_rate(500.0), 60.0);
        assert_eq!(config.clamp_rate(24.0), 24.0);
        assert_eq!(config.clamp_rate(f32::NAN), 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = LifeConfig { width: 0, ..Default::default() };
        assert!(matches!(zero.validate(), Err(LifeError::InvalidDimension { .. })));

        let cell = LifeConfig { cell_size: 0.0, ..Default::default() };
        assert!(matches!(cell.validate(), Err(LifeError::InvalidConfig(_))));

        let bounds = LifeConfig {
            min_tick_rate: 30.0,
            max_tick_rate: 10.0,
            ..Default::default()
        };
        assert!(bounds.validate().is_err());

        let interval = LifeConfig {
            min_interval_ms: 500.0,
            max_interval_ms: 100.0,
            ..Default::default()
        };
        assert!(matches!(interval.validate(), Err(LifeError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = LifeConfig::from_json(r#"{"width": 40, "tick_mode": "IntervalMillis"}"#).unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 100);
        assert_eq!(config.tick_mode, TickMode::IntervalMillis);
        assert_eq!(config.overshoot, OvershootPolicy::Discard);
    }
}
