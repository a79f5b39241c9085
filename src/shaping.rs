// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Shaping functions for synthetic sensor values.
//!
//! A value is a deterministic curve (day/night, seasonal, solar) plus
//! bounded uniform noise. Each generator has its own [`Profile`]; the
//! profile picks the curve for a sensor by matching on its
//! [`SensorKind`](crate::sensor::SensorKind).

use crate::sensor::{SensorDefinition, SensorKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Phase of the temperature curve: minimum at midnight, peak mid-afternoon.
pub const TEMPERATURE_PHASE: f64 = -PI / 2.0;

/// Humidity runs in inverse phase to temperature.
pub const HUMIDITY_PHASE: f64 = PI / 2.0;

/// First hour of the daylight window (inclusive).
pub const DAYLIGHT_START: f64 = 6.0;

/// Last hour of the daylight window (inclusive).
pub const DAYLIGHT_END: f64 = 18.0;

/// Hours in which switches are busier.
pub const WORKING_HOURS: (f64, f64) = (8.0, 18.0);

/// `sin(2π·hour/24 + phase)`, in [-1, 1].
pub fn daily_curve(hour: f64, phase: f64) -> f64 {
    (2.0 * PI * hour / 24.0 + phase).sin()
}

/// Daily curve lifted to [0, 2]: zero offset at the trough.
pub fn raised_daily_curve(hour: f64, phase: f64) -> f64 {
    daily_curve(hour, phase) + 1.0
}

/// Seasonal swing over a `period_days` cycle.
pub fn seasonal(day: f64, period_days: f64, amplitude: f64) -> f64 {
    (2.0 * PI * day / period_days).sin() * amplitude
}

/// Whether `hour` falls inside the daylight window.
pub fn is_daylight(hour: f64) -> bool {
    (DAYLIGHT_START..=DAYLIGHT_END).contains(&hour)
}

/// Half-sine over the daylight window, 0 outside it.
pub fn solar_curve(hour: f64) -> f64 {
    if is_daylight(hour) {
        (PI * (hour - DAYLIGHT_START) / (DAYLIGHT_END - DAYLIGHT_START)).sin()
    } else {
        0.0
    }
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Additive uniform noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Noise {
    /// Multiplier on every noise band; 0 disables additive noise.
    pub scale: f64,
}

impl Default for Noise {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Noise {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Sample from `U(-width/2, width/2)`, scaled.
    pub fn centered(&self, width: f64, rng: &mut (impl Rng + ?Sized)) -> f64 {
        (rng.gen::<f64>() - 0.5) * width * self.scale
    }
}

/// Per-sample inputs to a shaping function.
#[derive(Debug, Clone, Copy)]
pub struct ShapeInput {
    /// Hour of day, fractional.
    pub hour: f64,
    /// Day index within the generated window.
    pub day: f64,
    /// Sample index within the series.
    pub index: usize,
    /// Total samples in the series.
    pub count: usize,
    /// Value the curve is centred on.
    pub base: f64,
}

/// State carried between samples of one series.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeState {
    /// Previous value, used by switches to hold or flip.
    pub previous: f64,
}

impl ShapeState {
    pub fn starting_at(previous: f64) -> Self {
        Self { previous }
    }
}

/// Shaping profile of a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    /// Hourly readings over a month, feeding "current value" displays.
    History,
    /// Ten-minute samples over the last day, seeded by a current value.
    DayChart,
    /// Hourly samples feeding the multi-sensor charts.
    Hourly,
}

impl Profile {
    /// Evaluate one sample for `sensor`.
    ///
    /// Bounded kinds are clamped after noise; rounding follows the
    /// profile's display precision.
    pub fn shape(
        &self,
        sensor: &SensorDefinition,
        input: &ShapeInput,
        state: &mut ShapeState,
        noise: &Noise,
        rng: &mut (impl Rng + ?Sized),
    ) -> f64 {
        let value = match self {
            Profile::History => history_value(sensor, input, noise, rng),
            Profile::DayChart => day_chart_value(sensor, input, state, noise, rng),
            Profile::Hourly => hourly_value(sensor, input, state, noise, rng),
        };
        state.previous = value;
        value
    }
}

fn history_value(
    sensor: &SensorDefinition,
    input: &ShapeInput,
    noise: &Noise,
    rng: &mut (impl Rng + ?Sized),
) -> f64 {
    let hour = input.hour;
    match sensor.kind {
        SensorKind::Switch => {
            if rng.gen::<f64>() < 0.15 {
                1.0
            } else {
                0.0
            }
        }
        SensorKind::Temperature => {
            let day_night = raised_daily_curve(hour, TEMPERATURE_PHASE) * 6.0;
            let season = seasonal(input.day, 30.0, 3.0);
            round_to(input.base + day_night + season + noise.centered(4.0, rng), 1)
        }
        SensorKind::AirHumidity => {
            let day_night = raised_daily_curve(hour, HUMIDITY_PHASE) * 8.0;
            let value = (input.base + day_night + noise.centered(10.0, rng)).round();
            value.clamp(30.0, 95.0)
        }
        SensorKind::ParRadiation => {
            let value = if is_daylight(hour) {
                (input.base * solar_curve(hour) + noise.centered(200.0, rng)).round()
            } else {
                (rng.gen::<f64>() * 50.0).round()
            };
            value.max(0.0)
        }
        SensorKind::VolumetricMoisture | SensorKind::Pressure | SensorKind::Co2 => {
            (input.base + noise.centered(sensor.variance, rng)).round()
        }
    }
}

fn day_chart_value(
    sensor: &SensorDefinition,
    input: &ShapeInput,
    state: &ShapeState,
    noise: &Noise,
    rng: &mut (impl Rng + ?Sized),
) -> f64 {
    let hour = input.hour;
    let value = match sensor.kind {
        SensorKind::Switch => flip_switch(state.previous, hour, rng),
        SensorKind::Temperature => {
            input.base + raised_daily_curve(hour, TEMPERATURE_PHASE) * 8.0 + noise.centered(3.0, rng)
        }
        SensorKind::AirHumidity => {
            let value =
                input.base + raised_daily_curve(hour, HUMIDITY_PHASE) * 10.0 + noise.centered(8.0, rng);
            value.clamp(20.0, 95.0)
        }
        SensorKind::ParRadiation => {
            let value = if is_daylight(hour) {
                let cloud = if rng.gen::<f64>() < 0.3 {
                    rng.gen::<f64>() * 0.5
                } else {
                    0.9
                };
                input.base * solar_curve(hour) * cloud
            } else {
                rng.gen::<f64>() * 20.0
            };
            value.max(0.0)
        }
        SensorKind::VolumetricMoisture | SensorKind::Pressure | SensorKind::Co2 => {
            (input.base + noise.centered(input.base * 0.1, rng)).max(0.0)
        }
    };
    round_to(value, 2)
}

fn hourly_value(
    sensor: &SensorDefinition,
    input: &ShapeInput,
    state: &ShapeState,
    noise: &Noise,
    rng: &mut (impl Rng + ?Sized),
) -> f64 {
    let hour = input.hour;
    let value = match sensor.kind {
        SensorKind::Switch => flip_switch(state.previous, hour, rng),
        SensorKind::Temperature => {
            input.base + daily_curve(hour, TEMPERATURE_PHASE) * 8.0 + noise.centered(3.0, rng)
        }
        SensorKind::AirHumidity => {
            let value = input.base + daily_curve(hour, HUMIDITY_PHASE) * 15.0 + noise.centered(8.0, rng);
            value.clamp(30.0, 90.0)
        }
        SensorKind::ParRadiation => {
            let value = if is_daylight(hour) {
                let clouds = if rng.gen::<f64>() < 0.3 {
                    rng.gen::<f64>() * 0.4
                } else {
                    0.1
                };
                input.base * solar_curve(hour) * (1.0 - clouds)
            } else {
                rng.gen::<f64>() * 50.0
            };
            value.max(0.0)
        }
        SensorKind::VolumetricMoisture | SensorKind::Pressure | SensorKind::Co2 => {
            let trend = (2.0 * PI * input.index as f64 / input.count.max(1) as f64).sin()
                * (input.base * 0.1);
            input.base + trend + noise.centered(input.base * 0.05, rng)
        }
    };
    round_to(value, 2)
}

/// Hold the previous switch state, flipping with a small probability.
fn flip_switch(previous: f64, hour: f64, rng: &mut (impl Rng + ?Sized)) -> f64 {
    let (start, end) = WORKING_HOURS;
    let p = if (start..=end).contains(&hour) { 0.02 } else { 0.005 };
    let on = previous != 0.0;
    let on = if rng.gen::<f64>() < p { !on } else { on };
    if on {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{dashboard_sensors, greenhouse_sensors, Unit};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn input(hour: f64, base: f64) -> ShapeInput {
        ShapeInput {
            hour,
            day: 0.0,
            index: 0,
            count: 1,
            base,
        }
    }

    #[test]
    fn test_daily_curve_extremes() {
        assert_relative_eq!(daily_curve(0.0, TEMPERATURE_PHASE), -1.0, epsilon = 1e-12);
        assert_relative_eq!(daily_curve(12.0, TEMPERATURE_PHASE), 1.0, epsilon = 1e-12);
        assert_relative_eq!(raised_daily_curve(0.0, TEMPERATURE_PHASE), 0.0, epsilon = 1e-12);
        // Inverse phase: humidity peaks at midnight
        assert_relative_eq!(daily_curve(0.0, HUMIDITY_PHASE), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solar_curve() {
        assert_eq!(solar_curve(3.0), 0.0);
        assert_eq!(solar_curve(20.0), 0.0);
        assert_relative_eq!(solar_curve(12.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(solar_curve(6.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(17.349, 1), 17.3);
        assert_eq!(round_to(17.355, 2), 17.36);
        assert_eq!(round_to(17.5, 0), 18.0);
    }

    #[test]
    fn test_zero_noise() {
        let mut rng = test_rng();
        let noise = Noise::new(0.0);
        for _ in 0..100 {
            assert_eq!(noise.centered(10.0, &mut rng), 0.0);
        }
    }

    #[test]
    fn test_history_temperature_midnight_without_noise() {
        let mut rng = test_rng();
        let temp = &dashboard_sensors()[0];
        let mut state = ShapeState::default();
        let v = Profile::History.shape(temp, &input(0.0, 17.0), &mut state, &Noise::new(0.0), &mut rng);
        // Raised curve: no offset at night, no seasonal swing on day 0
        assert_relative_eq!(v, 17.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hourly_temperature_midnight_without_noise() {
        let mut rng = test_rng();
        let temp = &greenhouse_sensors()[0];
        let mut state = ShapeState::default();
        let v = Profile::Hourly.shape(temp, &input(0.0, 22.0), &mut state, &Noise::new(0.0), &mut rng);
        assert_relative_eq!(v, 14.0, epsilon = 1e-9);
    }

    #[test]
    fn test_par_night_branch_is_low() {
        let mut rng = test_rng();
        let par = SensorDefinition::new("par", "PAR", SensorKind::ParRadiation, Unit::Par, 1043.0);
        let mut state = ShapeState::default();
        for profile in [Profile::History, Profile::DayChart, Profile::Hourly] {
            for _ in 0..200 {
                let v = profile.shape(&par, &input(2.0, 1043.0), &mut state, &Noise::default(), &mut rng);
                assert!((0.0..=50.0).contains(&v), "{:?} gave {}", profile, v);
            }
        }
    }

    #[test]
    fn test_switch_holds_binary_values() {
        let mut rng = test_rng();
        let switch = SensorDefinition::new("s", "S", SensorKind::Switch, Unit::Boolean, 0.0);
        let mut state = ShapeState::starting_at(1.0);
        for i in 0..500 {
            let hour = (i % 24) as f64;
            let v = Profile::DayChart.shape(&switch, &input(hour, 1.0), &mut state, &Noise::default(), &mut rng);
            assert!(v == 0.0 || v == 1.0);
        }
    }

    #[test]
    fn test_humidity_clamps() {
        let mut rng = test_rng();
        let humidity = SensorDefinition::new("h", "H", SensorKind::AirHumidity, Unit::Percent, 94.0);
        let mut state = ShapeState::default();
        for i in 0..240 {
            let hour = (i % 24) as f64;
            let h = Profile::History.shape(&humidity, &input(hour, 94.0), &mut state, &Noise::default(), &mut rng);
            assert!((30.0..=95.0).contains(&h));
            let d = Profile::DayChart.shape(&humidity, &input(hour, 94.0), &mut state, &Noise::default(), &mut rng);
            assert!((20.0..=95.0).contains(&d));
            let a = Profile::Hourly.shape(&humidity, &input(hour, 94.0), &mut state, &Noise::default(), &mut rng);
            assert!((30.0..=90.0).contains(&a));
        }
    }
}
