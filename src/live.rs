// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Live view state and its mutation tasks.
//!
//! [`LiveState`] owns everything a mounted view shows: capped per-sensor
//! series, the heatmap grid, the readout cards, the view clock and the
//! gallery carousel. [`LiveState::apply`] runs one [`LiveTask`] to
//! completion; scheduling is left to the caller.

use crate::assets::{plant_gallery, Carousel, GalleryItem};
use crate::config::LiveConfig;
use crate::error::{Result, VerdantError};
use crate::generator::{generate_hourly, GeneratorConfig};
use crate::heatmap::HeatmapGrid;
use crate::reading::{Series, SeriesPoint};
use crate::schedule::LiveTask;
use crate::segment::{segment_critical_changes, SegmenterConfig};
use crate::sensor::{dashboard_sensors, greenhouse_sensors, SensorDefinition, SensorKind, Unit};
use crate::shaping::{round_to, Noise};
use chrono::{Duration, NaiveDateTime};
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Readout classification against its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadoutStatus {
    Low,
    Normal,
    High,
}

/// Random-walk rule of a readout kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadoutRule {
    /// Step is drawn from `U(-step, step)`.
    pub step: f64,
    pub min: f64,
    pub max: f64,
    /// Below this is [`ReadoutStatus::Low`].
    pub low: f64,
    /// Above this is [`ReadoutStatus::High`].
    pub high: f64,
    pub decimals: i32,
}

impl ReadoutRule {
    /// Rule for `kind`; `None` for kinds that hold or flip.
    pub fn for_kind(kind: SensorKind) -> Option<Self> {
        let rule = |step, min, max, low, high, decimals| ReadoutRule {
            step,
            min,
            max,
            low,
            high,
            decimals,
        };
        match kind {
            SensorKind::Temperature => Some(rule(3.0, 5.0, 35.0, 10.0, 25.0, 1)),
            SensorKind::AirHumidity => Some(rule(10.0, 20.0, 95.0, 30.0, 80.0, 0)),
            SensorKind::VolumetricMoisture => Some(rule(5.0, 50.0, 150.0, 70.0, 120.0, 0)),
            SensorKind::ParRadiation => Some(rule(200.0, 100.0, 2000.0, 500.0, 1500.0, 0)),
            SensorKind::Pressure | SensorKind::Co2 | SensorKind::Switch => None,
        }
    }

    pub fn status(&self, value: f64) -> ReadoutStatus {
        if value < self.low {
            ReadoutStatus::Low
        } else if value > self.high {
            ReadoutStatus::High
        } else {
            ReadoutStatus::Normal
        }
    }
}

/// A live "current value" card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub sensor_id: String,
    pub label: String,
    pub kind: SensorKind,
    pub unit: Unit,
    pub value: f64,
    pub status: ReadoutStatus,
}

impl Readout {
    fn new(sensor: &SensorDefinition, value: f64) -> Self {
        let status = ReadoutRule::for_kind(sensor.kind)
            .map(|r| r.status(value))
            .unwrap_or(ReadoutStatus::Normal);
        Self {
            sensor_id: sensor.id.clone(),
            label: sensor.label.clone(),
            kind: sensor.kind,
            unit: sensor.unit,
            value,
            status,
        }
    }

    /// Advance one random-walk step.
    pub fn step(&mut self, flip_probability: f64, rng: &mut (impl Rng + ?Sized)) {
        if let Some(rule) = ReadoutRule::for_kind(self.kind) {
            let next = self.value + rng.gen_range(-rule.step..=rule.step);
            self.value = round_to(next.clamp(rule.min, rule.max), rule.decimals);
            self.status = rule.status(self.value);
        } else if self.kind == SensorKind::Switch {
            if rng.gen::<f64>() < flip_probability {
                self.value = 1.0 - self.value;
            }
            self.status = ReadoutStatus::Normal;
        }
    }

    pub fn display_value(&self) -> String {
        self.unit.format_value(self.value)
    }
}

/// Initial readout cards.
pub fn initial_readouts() -> Vec<Readout> {
    dashboard_sensors()
        .iter()
        .map(|sensor| {
            let value = match sensor.id.as_str() {
                "air_humidity" => 65.0,
                "switch_1" => 0.0,
                "switch_2" => 1.0,
                _ => sensor.base_value,
            };
            Readout::new(sensor, value)
        })
        .collect()
}

/// A series bounded to the most recent points.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSeries {
    pub sensor_id: String,
    pub kind: SensorKind,
    pub unit: Unit,
    points: VecDeque<SeriesPoint>,
}

impl LiveSeries {
    fn from_series(series: Series, kind: SensorKind, cap: usize) -> Self {
        let mut points: VecDeque<SeriesPoint> = series.points.into();
        while points.len() > cap {
            points.pop_front();
        }
        Self {
            sensor_id: series.sensor_id,
            kind,
            unit: series.unit,
            points,
        }
    }

    /// Append a value, evicting the oldest beyond `cap`.
    ///
    /// Returns the number of evicted points.
    pub fn push(&mut self, time: NaiveDateTime, value: f64, cap: usize) -> usize {
        let previous = self.points.back().map_or(value, |p| p.value);
        // Keep timestamps non-decreasing
        let time = self.points.back().map_or(time, |p| time.max(p.time));
        self.points.push_back(SeriesPoint::new(time, value, previous));

        let mut evicted = 0;
        while self.points.len() > cap {
            self.points.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.back()
    }

    pub fn points(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    /// Owned copy as a plain series.
    pub fn to_series(&self) -> Series {
        Series {
            sensor_id: self.sensor_id.clone(),
            unit: self.unit,
            points: self.points.iter().copied().collect(),
        }
    }
}

/// Per-series view in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub sensor_id: String,
    pub len: usize,
    pub last: Option<f64>,
}

/// Serializable picture of the live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub clock: NaiveDateTime,
    pub readouts: Vec<Readout>,
    pub series: Vec<SeriesSummary>,
    /// Critical changes in the temperature line.
    pub critical_changes: usize,
    pub heatmap_range: (f64, f64),
    pub gallery_item: Option<String>,
    pub task_runs: BTreeMap<String, u64>,
}

/// State owned by one mounted view.
#[derive(Debug)]
pub struct LiveState {
    config: LiveConfig,
    rng: StdRng,
    series: Vec<LiveSeries>,
    heatmap: HeatmapGrid,
    readouts: Vec<Readout>,
    clock: NaiveDateTime,
    gallery: Vec<GalleryItem>,
    carousel: Carousel,
    runs: BTreeMap<String, u64>,
}

impl LiveState {
    /// Build the initial state with the view clock at `anchor`.
    pub fn new(config: LiveConfig, anchor: NaiveDateTime) -> Result<Self> {
        config.validate()?;

        let sensors = greenhouse_sensors();
        let mut generator = GeneratorConfig::new().with_anchor(anchor);
        if let Some(seed) = config.seed {
            generator = generator.with_seed(seed);
        }
        let hourly = generate_hourly(&generator, &sensors)?;
        let series = hourly
            .into_iter()
            .zip(&sensors)
            .map(|(s, sensor)| LiveSeries::from_series(s, sensor.kind, config.series_cap))
            .collect();

        // Separate stream from the generators
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let heatmap = HeatmapGrid::generate(&Noise::default(), &mut rng);
        let gallery = plant_gallery();
        let carousel = Carousel::new(gallery.len());

        log::debug!("live state created at {}", anchor);
        Ok(Self {
            config,
            rng,
            series,
            heatmap,
            readouts: initial_readouts(),
            clock: anchor,
            gallery,
            carousel,
            runs: BTreeMap::new(),
        })
    }

    /// Run `task` to completion. Returns whether anything changed.
    pub fn apply(&mut self, task: LiveTask) -> bool {
        *self.runs.entry(task.as_str().to_string()).or_insert(0) += 1;
        match task {
            LiveTask::Readouts => {
                let flip = self.config.switch_flip_probability;
                for readout in &mut self.readouts {
                    readout.step(flip, &mut self.rng);
                }
                true
            }
            LiveTask::SeriesAppend => {
                self.append_all();
                true
            }
            LiveTask::Heatmap => {
                self.heatmap.perturb(self.config.heatmap_step, &mut self.rng);
                true
            }
            LiveTask::CriticalInjection => self.inject_critical(),
            LiveTask::Clock => {
                let step = self.config.schedule.clock.interval_ms as i64;
                self.clock += Duration::milliseconds(step);
                true
            }
            LiveTask::Gallery => {
                self.carousel.next();
                true
            }
        }
    }

    fn drift(&mut self, last: f64, width: f64) -> f64 {
        (last + (self.rng.gen::<f64>() - 0.5) * width).max(0.0)
    }

    fn append_all(&mut self) {
        let cap = self.config.series_cap;
        let step = self.config.append_step;
        for i in 0..self.series.len() {
            let Some(last) = self.series[i].last().map(|p| p.value) else {
                continue;
            };
            let value = if self.series[i].unit.is_boolean() {
                last
            } else {
                round_to(self.drift(last, step), 2)
            };
            let clock = self.clock;
            let evicted = self.series[i].push(clock, value, cap);
            log::trace!("appended {} to {} (evicted {})", value, self.series[i].sensor_id, evicted);
        }
    }

    fn inject_critical(&mut self) -> bool {
        if self.rng.gen::<f64>() >= self.config.critical_probability {
            return false;
        }
        let Some(i) = self.series.iter().position(|s| s.kind == SensorKind::Temperature) else {
            return false;
        };
        let Some(last) = self.series[i].last().map(|p| p.value) else {
            return false;
        };

        let base = self.drift(last, self.config.append_step);
        let jolt = (self.rng.gen::<f64>() - 0.5) * self.config.critical_jolt;
        let value = round_to((base + jolt).max(0.0), 2);
        let clock = self.clock;
        self.series[i].push(clock, value, self.config.series_cap);
        log::debug!("injected temperature jolt {:+.2} -> {}", value - last, value);
        true
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }

    pub fn series(&self) -> &[LiveSeries] {
        &self.series
    }

    pub fn series_for(&self, sensor_id: &str) -> Option<&LiveSeries> {
        self.series.iter().find(|s| s.sensor_id == sensor_id)
    }

    pub fn heatmap(&self) -> &HeatmapGrid {
        &self.heatmap
    }

    pub fn readouts(&self) -> &[Readout] {
        &self.readouts
    }

    /// Manually set a readout, with the same checks as [`crate::override_value`].
    pub fn override_readout(&mut self, sensor_id: &str, value: f64) -> Result<()> {
        let readout = self
            .readouts
            .iter_mut()
            .find(|r| r.sensor_id == sensor_id)
            .ok_or_else(|| VerdantError::UnknownSensor(sensor_id.to_string()))?;

        let valid = value.is_finite() && (!readout.unit.is_boolean() || value == 0.0 || value == 1.0);
        if !valid {
            return Err(VerdantError::InvalidValue {
                sensor: sensor_id.to_string(),
                value,
            });
        }

        readout.value = value;
        readout.status = ReadoutRule::for_kind(readout.kind)
            .map(|r| r.status(value))
            .unwrap_or(ReadoutStatus::Normal);
        Ok(())
    }

    pub fn clock(&self) -> NaiveDateTime {
        self.clock
    }

    pub fn gallery_item(&self) -> Option<&GalleryItem> {
        self.gallery.get(self.carousel.index)
    }

    /// How many times `task` has run.
    pub fn runs(&self, task: LiveTask) -> u64 {
        self.runs.get(task.as_str()).copied().unwrap_or(0)
    }

    /// Critical changes in the live temperature line.
    pub fn critical_changes(&self) -> usize {
        let Some(temp) = self.series.iter().find(|s| s.kind == SensorKind::Temperature) else {
            return 0;
        };
        let values: Vec<f64> = temp.points().map(|p| p.value).collect();
        let config = SegmenterConfig::default().with_window(values.len());
        segment_critical_changes(&values, &config)
            .map(|s| s.critical.len())
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> LiveSnapshot {
        LiveSnapshot {
            clock: self.clock,
            readouts: self.readouts.clone(),
            series: self
                .series
                .iter()
                .map(|s| SeriesSummary {
                    sensor_id: s.sensor_id.clone(),
                    len: s.len(),
                    last: s.last().map(|p| p.value),
                })
                .collect(),
            critical_changes: self.critical_changes(),
            heatmap_range: self.heatmap.min_max(),
            gallery_item: self.gallery_item().map(|g| g.name.clone()),
            task_runs: self.runs.clone(),
        }
    }
}
