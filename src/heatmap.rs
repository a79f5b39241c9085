// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Zone × hour temperature heatmap.
//!
//! A dense grid of [`ZONES`] greenhouse zones by [`HOURS`] hours. Odd
//! zones run two degrees warmer. Temperatures stay within
//! [`MIN_TEMPERATURE`, `MAX_TEMPERATURE`] after generation and after
//! every perturbation.

use crate::scale::{ChartFrame, LinearScale};
use crate::shaping::{daily_curve, round_to, Noise, TEMPERATURE_PHASE};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Greenhouse zones (rows).
pub const ZONES: usize = 8;

/// Hours of the day (columns).
pub const HOURS: usize = 24;

pub const MIN_TEMPERATURE: f64 = 15.0;
pub const MAX_TEMPERATURE: f64 = 35.0;

const BASE_TEMPERATURE: f64 = 20.0;
const DAILY_AMPLITUDE: f64 = 6.0;
const WARM_ZONE_OFFSET: f64 = 2.0;

/// Cold, middle and hot color stops.
pub const COLOR_STOPS: [Rgb; 3] = [
    Rgb(0x1e, 0x3a, 0x8a),
    Rgb(0xf5, 0x9e, 0x0b),
    Rgb(0xdc, 0x26, 0x26),
];

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear interpolation per channel, `t` clamped to [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    /// `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// One zone/hour cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatCell {
    pub zone: usize,
    pub hour: usize,
    /// Degrees Celsius, one decimal.
    pub temperature: f64,
}

impl HeatCell {
    /// Rounded temperature, used as the bin count.
    pub fn count(&self) -> i64 {
        self.temperature.round() as i64
    }
}

/// The full grid, row-major by zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    cells: Vec<HeatCell>,
}

impl HeatmapGrid {
    /// Generate a fresh grid.
    pub fn generate(noise: &Noise, rng: &mut (impl Rng + ?Sized)) -> Self {
        let mut cells = Vec::with_capacity(ZONES * HOURS);
        for zone in 0..ZONES {
            for hour in 0..HOURS {
                let t = BASE_TEMPERATURE
                    + DAILY_AMPLITUDE * daily_curve(hour as f64, TEMPERATURE_PHASE)
                    + WARM_ZONE_OFFSET * (zone % 2) as f64
                    + noise.centered(2.0, rng);
                cells.push(HeatCell {
                    zone,
                    hour,
                    temperature: clamp_temperature(round_to(t, 1)),
                });
            }
        }
        Self { cells }
    }

    /// Drift every cell by up to `±width/2` degrees.
    pub fn perturb(&mut self, width: f64, rng: &mut (impl Rng + ?Sized)) {
        for cell in &mut self.cells {
            let drift = (rng.gen::<f64>() - 0.5) * width;
            cell.temperature = clamp_temperature(round_to(cell.temperature + drift, 1));
        }
    }

    pub fn cells(&self) -> &[HeatCell] {
        &self.cells
    }

    /// Cell at `zone`, `hour`, if in range.
    pub fn get(&self, zone: usize, hour: usize) -> Option<&HeatCell> {
        if zone >= ZONES || hour >= HOURS {
            return None;
        }
        self.cells.get(zone * HOURS + hour)
    }

    /// Coldest and hottest temperatures.
    pub fn min_max(&self) -> (f64, f64) {
        self.cells.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.temperature), hi.max(c.temperature))
        })
    }

    /// Position of `temperature` between the grid's extremes, 0.5 when flat.
    pub fn intensity(&self, temperature: f64) -> f64 {
        let (lo, hi) = self.min_max();
        if hi - lo <= f64::EPSILON {
            return 0.5;
        }
        ((temperature - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    /// Fill color for `temperature`.
    pub fn color(&self, temperature: f64) -> Rgb {
        color_at(self.intensity(temperature))
    }

    /// Cell under the cursor (outer coordinates), if any.
    pub fn cell_at(&self, frame: &ChartFrame, x: f64, y: f64) -> Option<&HeatCell> {
        let (ix, iy) = frame.to_inner(x, y);
        if ix < 0.0 || iy < 0.0 {
            return None;
        }
        let (hours, zones) = band_scales(frame);
        let hour = hours.invert(ix).round();
        let zone = zones.invert(iy).round();
        if hour < 0.0 || zone < 0.0 {
            return None;
        }
        self.get(zone as usize, hour as usize)
    }
}

/// Hour (x) and zone (y) scales centering each cell on its index.
pub fn band_scales(frame: &ChartFrame) -> (LinearScale, LinearScale) {
    let hours = LinearScale::new((-0.5, HOURS as f64 - 0.5), (0.0, frame.inner_width()));
    let zones = LinearScale::new((-0.5, ZONES as f64 - 0.5), (frame.inner_height(), 0.0));
    (hours, zones)
}

/// Three-stop color at intensity `t`.
pub fn color_at(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        COLOR_STOPS[0].lerp(COLOR_STOPS[1], t * 2.0)
    } else {
        COLOR_STOPS[1].lerp(COLOR_STOPS[2], (t - 0.5) * 2.0)
    }
}

fn clamp_temperature(t: f64) -> f64 {
    t.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}
