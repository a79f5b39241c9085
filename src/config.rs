// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Configuration types for the live view

use crate::error::{Result, VerdantError};
use crate::schedule::LiveTask;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of one mutation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTiming {
    /// Period between runs, in milliseconds
    pub interval_ms: u64,

    /// Delay before the first run, in milliseconds
    #[serde(default)]
    pub initial_delay_ms: u64,
}

impl TaskTiming {
    pub const fn every_ms(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            initial_delay_ms: 0,
        }
    }

    pub const fn with_initial_delay_ms(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

/// Cadence of every live task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSchedule {
    pub readouts: TaskTiming,
    pub series_append: TaskTiming,
    pub heatmap: TaskTiming,
    pub critical_injection: TaskTiming,
    pub clock: TaskTiming,
    pub gallery: TaskTiming,
}

impl Default for TaskSchedule {
    fn default() -> Self {
        Self {
            readouts: TaskTiming::every_ms(5_000),
            series_append: TaskTiming::every_ms(2_000),
            heatmap: TaskTiming::every_ms(3_000).with_initial_delay_ms(2_000),
            critical_injection: TaskTiming::every_ms(1_000).with_initial_delay_ms(1_000),
            clock: TaskTiming::every_ms(1_000),
            gallery: TaskTiming::every_ms(4_000).with_initial_delay_ms(4_000),
        }
    }
}

impl TaskSchedule {
    /// Timing of `task`.
    pub fn timing(&self, task: LiveTask) -> TaskTiming {
        match task {
            LiveTask::Readouts => self.readouts,
            LiveTask::SeriesAppend => self.series_append,
            LiveTask::Heatmap => self.heatmap,
            LiveTask::CriticalInjection => self.critical_injection,
            LiveTask::Clock => self.clock,
            LiveTask::Gallery => self.gallery,
        }
    }

    /// Replace the timing of `task`.
    pub fn with_timing(mut self, task: LiveTask, timing: TaskTiming) -> Self {
        let slot = match task {
            LiveTask::Readouts => &mut self.readouts,
            LiveTask::SeriesAppend => &mut self.series_append,
            LiveTask::Heatmap => &mut self.heatmap,
            LiveTask::CriticalInjection => &mut self.critical_injection,
            LiveTask::Clock => &mut self.clock,
            LiveTask::Gallery => &mut self.gallery,
        };
        *slot = timing;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for task in LiveTask::ALL {
            if self.timing(task).interval_ms == 0 {
                return Err(VerdantError::InvalidConfig(format!(
                    "{} interval must be positive",
                    task.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Live view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Task cadences
    pub schedule: TaskSchedule,

    /// Maximum points kept per live series
    pub series_cap: usize,

    /// Width of the uniform step applied on each append (±width/2)
    pub append_step: f64,

    /// Width of the heatmap drift per tick (±width/2)
    pub heatmap_step: f64,

    /// Chance that a critical-injection tick fires
    pub critical_probability: f64,

    /// Width of the extra temperature jolt on injection (±width/2)
    pub critical_jolt: f64,

    /// Chance that a switch readout flips on a readouts tick
    pub switch_flip_probability: f64,

    /// Random seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            schedule: TaskSchedule::default(),
            series_cap: 100,
            append_step: 3.0,
            heatmap_step: 3.0,
            critical_probability: 0.1,
            critical_jolt: 6.0,
            switch_flip_probability: 0.3,
            seed: None,
        }
    }
}

impl LiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_schedule(mut self, schedule: TaskSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_series_cap(mut self, cap: usize) -> Self {
        self.series_cap = cap;
        self
    }

    pub fn with_critical_probability(mut self, p: f64) -> Self {
        self.critical_probability = p;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.schedule.validate()?;
        if self.series_cap == 0 {
            return Err(VerdantError::InvalidConfig(
                "series cap must be at least 1".to_string(),
            ));
        }
        for (name, p) in [
            ("critical_probability", self.critical_probability),
            ("switch_flip_probability", self.switch_flip_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(VerdantError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        for (name, w) in [
            ("append_step", self.append_step),
            ("heatmap_step", self.heatmap_step),
            ("critical_jolt", self.critical_jolt),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(VerdantError::InvalidConfig(format!(
                    "{} must be non-negative, got {}",
                    name, w
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let s = TaskSchedule::default();
        assert_eq!(s.timing(LiveTask::Readouts).interval(), Duration::from_secs(5));
        assert_eq!(s.timing(LiveTask::Heatmap).initial_delay(), Duration::from_secs(2));
        assert_eq!(s.timing(LiveTask::Gallery).initial_delay_ms, 4_000);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let s = TaskSchedule::default().with_timing(LiveTask::Clock, TaskTiming::every_ms(0));
        assert!(matches!(s.validate(), Err(VerdantError::InvalidConfig(_))));
    }

    #[test]
    fn test_live_config_default() {
        let config = LiveConfig::default();
        assert_eq!(config.series_cap, 100);
        assert_eq!(config.critical_probability, 0.1);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_live_config_invalid() {
        assert!(LiveConfig::default().with_series_cap(0).validate().is_err());
        assert!(LiveConfig::default().with_critical_probability(1.5).validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: LiveConfig =
            serde_json::from_str(r#"{"series_cap": 50, "schedule": {"clock": {"interval_ms": 250}}}"#).unwrap();
        assert_eq!(config.series_cap, 50);
        assert_eq!(config.schedule.clock.interval_ms, 250);
        assert_eq!(config.schedule.readouts.interval_ms, 5_000);
    }
}
