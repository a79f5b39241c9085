// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Synthetic series generation.
//!
//! Three generators share the shaping functions in [`crate::shaping`]:
//!
//! - [`generate_history`]: a month of hourly readings per sensor,
//!   reduced later to "current value" displays.
//! - [`generate_day_chart`]: 144 ten-minute points over the last day,
//!   seeded by a sensor's current value.
//! - [`generate_hourly`]: 200 hourly points per sensor for the
//!   multi-sensor charts.

use crate::error::{Result, VerdantError};
use crate::reading::{Reading, Series, SeriesPoint};
use crate::sensor::SensorDefinition;
use crate::shaping::{Noise, Profile, ShapeInput, ShapeState};
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Days covered by the history generator.
pub const HISTORY_DAYS: u32 = 30;

/// Hourly samples per day.
pub const HOURS_PER_DAY: u32 = 24;

/// Generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// "Now" for the generated window; series end at or before it.
    pub anchor: NaiveDateTime,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Additive noise settings.
    #[serde(default)]
    pub noise: Noise,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            anchor: Local::now().naive_local(),
            seed: None,
            noise: Noise::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config anchored at the current local time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor time.
    pub fn with_anchor(mut self, anchor: NaiveDateTime) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Scale every additive noise band (0 disables it).
    pub fn with_noise_scale(mut self, scale: f64) -> Self {
        self.noise = Noise::new(scale);
        self
    }

    /// Check the configuration before generating.
    pub fn validate(&self) -> Result<()> {
        if !self.noise.scale.is_finite() || self.noise.scale < 0.0 {
            return Err(VerdantError::InvalidConfig(format!(
                "noise scale must be a non-negative number, got {}",
                self.noise.scale
            )));
        }
        Ok(())
    }

    /// Random source for one generation pass.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }
}

/// How many points a series has and how far apart they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    pub count: usize,
    pub spacing_secs: i64,
}

impl SamplingPolicy {
    /// 24 hours at 10-minute spacing.
    pub fn day_chart() -> Self {
        Self {
            count: 144,
            spacing_secs: 600,
        }
    }

    /// 200 hourly points.
    pub fn hourly() -> Self {
        Self {
            count: 200,
            spacing_secs: 3600,
        }
    }

    pub fn spacing(&self) -> Duration {
        Duration::seconds(self.spacing_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(VerdantError::InvalidConfig(
                "series must have at least one point".to_string(),
            ));
        }
        if self.spacing_secs <= 0 {
            return Err(VerdantError::InvalidConfig(format!(
                "spacing must be positive, got {}s",
                self.spacing_secs
            )));
        }
        Ok(())
    }
}

/// Generate a month of hourly readings for every sensor.
///
/// Readings start at midnight 30 days before the anchor date, one per
/// hour with a random minute, in sensor order.
pub fn generate_history(config: &GeneratorConfig, sensors: &[SensorDefinition]) -> Result<Vec<Reading>> {
    config.validate()?;
    let mut rng = config.rng();

    let start = config.anchor.date() - Duration::days(HISTORY_DAYS as i64);
    let mut readings = Vec::with_capacity(sensors.len() * (HISTORY_DAYS * HOURS_PER_DAY) as usize);

    for sensor in sensors {
        let mut state = ShapeState::starting_at(sensor.base_value);
        for day in 0..HISTORY_DAYS {
            let date = start + Duration::days(day as i64);
            for hour in 0..HOURS_PER_DAY {
                let minute = rng.gen_range(0..60);
                let timestamp = date
                    .and_hms_opt(hour, minute, 0)
                    .ok_or_else(|| VerdantError::InvalidConfig(format!("bad time {}:{}", hour, minute)))?;

                let input = ShapeInput {
                    hour: hour as f64,
                    day: day as f64,
                    index: (day * HOURS_PER_DAY + hour) as usize,
                    count: (HISTORY_DAYS * HOURS_PER_DAY) as usize,
                    base: sensor.base_value,
                };
                let value = Profile::History.shape(sensor, &input, &mut state, &config.noise, &mut rng);

                readings.push(Reading {
                    id: format!("{}_{}_{}", sensor.id, day, hour),
                    sensor_id: sensor.id.clone(),
                    label: sensor.label.clone(),
                    value,
                    unit: sensor.unit,
                    timestamp,
                });
            }
        }
    }

    log::debug!(
        "generated {} history readings for {} sensors",
        readings.len(),
        sensors.len()
    );
    Ok(readings)
}

/// Generate the last-24h chart for a sensor, seeded by its current value.
pub fn generate_day_chart(config: &GeneratorConfig, sensor: &SensorDefinition, seed_value: f64) -> Result<Series> {
    let policy = SamplingPolicy::day_chart();
    generate_series(config, sensor, Profile::DayChart, policy, seed_value)
}

/// Generate hourly series for every sensor.
pub fn generate_hourly(config: &GeneratorConfig, sensors: &[SensorDefinition]) -> Result<Vec<Series>> {
    config.validate()?;
    let policy = SamplingPolicy::hourly();
    // One pass, one random stream across sensors
    let mut rng = config.rng();
    sensors
        .iter()
        .map(|sensor| series_with_rng(config, sensor, Profile::Hourly, policy, sensor.base_value, &mut rng))
        .collect()
}

/// Generate one series under an explicit profile and sampling policy.
///
/// The series ends one spacing before the anchor for [`Profile::Hourly`]
/// and starts exactly one day before the anchor for
/// [`Profile::DayChart`]. `seed_value` is the base of the curve and the
/// predecessor of the first point.
pub fn generate_series(
    config: &GeneratorConfig,
    sensor: &SensorDefinition,
    profile: Profile,
    policy: SamplingPolicy,
    seed_value: f64,
) -> Result<Series> {
    config.validate()?;
    let mut rng = config.rng();
    series_with_rng(config, sensor, profile, policy, seed_value, &mut rng)
}

fn series_with_rng(
    config: &GeneratorConfig,
    sensor: &SensorDefinition,
    profile: Profile,
    policy: SamplingPolicy,
    seed_value: f64,
    rng: &mut StdRng,
) -> Result<Series> {
    policy.validate()?;

    let spacing = policy.spacing();
    let start = match profile {
        Profile::DayChart => config.anchor - Duration::hours(24),
        Profile::History | Profile::Hourly => config.anchor - spacing * policy.count as i32,
    };

    let mut state = ShapeState::starting_at(seed_value);
    let mut points = Vec::with_capacity(policy.count);
    let mut previous = match profile {
        Profile::DayChart => seed_value,
        Profile::History | Profile::Hourly => f64::NAN,
    };

    for i in 0..policy.count {
        let time = start + spacing * i as i32;
        let elapsed_hours = (i as i64 * policy.spacing_secs) as f64 / 3600.0;
        let hour = match profile {
            Profile::DayChart => elapsed_hours % 24.0,
            // Whole clock hours: minutes past the hour do not move the curve
            Profile::History | Profile::Hourly => time.hour() as f64,
        };

        let input = ShapeInput {
            hour,
            day: (elapsed_hours / 24.0).floor(),
            index: i,
            count: policy.count,
            base: seed_value,
        };
        let value = profile.shape(sensor, &input, &mut state, &config.noise, rng);

        // No predecessor and no seed to compare against: no fluctuation
        if previous.is_nan() {
            previous = value;
        }
        points.push(SeriesPoint::new(time, value, previous));
        previous = value;
    }

    Ok(Series {
        sensor_id: sensor.id.clone(),
        unit: sensor.unit,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{dashboard_sensors, greenhouse_sensors, SensorKind, Unit};
    use chrono::NaiveDate;

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::new().with_anchor(anchor()).with_seed(42)
    }

    #[test]
    fn test_history_shape() {
        let sensors = dashboard_sensors();
        let readings = generate_history(&config(), &sensors).unwrap();
        assert_eq!(readings.len(), sensors.len() * 30 * 24);

        let first = &readings[0];
        assert_eq!(first.id, "temperature_0_0");
        assert_eq!(first.timestamp.date(), NaiveDate::from_ymd_opt(2026, 9, 16).unwrap());
    }

    #[test]
    fn test_history_is_time_ordered_per_sensor() {
        let readings = generate_history(&config(), &dashboard_sensors()).unwrap();
        for pair in readings.windows(2) {
            if pair[0].sensor_id == pair[1].sensor_id {
                assert!(pair[0].timestamp < pair[1].timestamp);
            }
        }
    }

    #[test]
    fn test_day_chart_shape() {
        let sensor = &dashboard_sensors()[0];
        let series = generate_day_chart(&config(), sensor, 17.0).unwrap();
        assert_eq!(series.len(), 144);
        assert_eq!(series.points[0].time, anchor() - Duration::hours(24));
        assert_eq!(
            series.points[1].time - series.points[0].time,
            Duration::minutes(10)
        );
        assert!(series.is_time_ordered());
    }

    #[test]
    fn test_day_chart_first_fluctuation_against_seed() {
        let sensor = &dashboard_sensors()[0];
        let series = generate_day_chart(&config(), sensor, 17.0).unwrap();
        let first = series.points[0];
        assert!((first.fluctuation - (first.value - 17.0).abs()).abs() < 1e-9);
    }

    #[test]
    fn test_hourly_shape() {
        let sensors = greenhouse_sensors();
        let all = generate_hourly(&config(), &sensors).unwrap();
        assert_eq!(all.len(), 6);
        for series in &all {
            assert_eq!(series.len(), 200);
            assert_eq!(series.points[0].fluctuation, 0.0);
            assert!(series.is_time_ordered());
            assert!(series.last().unwrap().time < anchor());
        }
    }

    #[test]
    fn test_hourly_uses_whole_clock_hours() {
        let off_hour = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let config = GeneratorConfig::new()
            .with_anchor(off_hour)
            .with_seed(1)
            .with_noise_scale(0.0);
        let all = generate_hourly(&config, &greenhouse_sensors()).unwrap();

        let temperature = all.iter().find(|s| s.sensor_id == "temp").unwrap();
        let midnight = temperature.points.iter().find(|p| p.time.hour() == 0).unwrap();
        assert_eq!(midnight.time.minute(), 30);
        assert!((midnight.value - 14.0).abs() < 1e-9);

        // 18:30 still falls inside the daylight window
        let light = all.iter().find(|s| s.sensor_id == "light").unwrap();
        for point in light.points.iter().filter(|p| p.time.hour() == 18) {
            assert!(point.value.abs() < 1e-6, "sunset PAR {}", point.value);
        }
    }

    #[test]
    fn test_reproducibility() {
        let sensors = greenhouse_sensors();
        let a = generate_hourly(&config(), &sensors).unwrap();
        let b = generate_hourly(&config(), &sensors).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_policy() {
        let sensor = SensorDefinition::new("t", "T", SensorKind::Temperature, Unit::Celsius, 20.0);
        let policy = SamplingPolicy {
            count: 0,
            spacing_secs: 60,
        };
        let err = generate_series(&config(), &sensor, Profile::Hourly, policy, 20.0).unwrap_err();
        assert!(matches!(err, VerdantError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_noise_scale() {
        let config = config().with_noise_scale(-1.0);
        assert!(generate_history(&config, &dashboard_sensors()).is_err());
    }
}
