// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Chart scales.
//!
//! Continuous mappings from data space to pixel space and back, with
//! "nice" domain rounding and tick generation for axes.

use crate::reading::SeriesPoint;
use crate::sensor::Unit;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Pixel margins around a chart's plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Outer size and margins of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for ChartFrame {
    /// The small per-sensor card chart.
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 140.0,
            margin: Margin {
                top: 10.0,
                right: 20.0,
                bottom: 30.0,
                left: 40.0,
            },
        }
    }
}

impl ChartFrame {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self { width, height, margin }
    }

    /// Width of the plotting area, never negative.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the plotting area, never negative.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Convert outer (cursor) coordinates to plotting-area coordinates.
    pub fn to_inner(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.margin.left, y - self.margin.top)
    }

    /// Convert plotting-area coordinates to outer coordinates.
    pub fn to_outer(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.margin.left, y + self.margin.top)
    }
}

/// Linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to the range.
    ///
    /// A collapsed domain maps everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let t = if span == 0.0 { 0.5 } else { (pixel - r0) / span };
        d0 + t * (d1 - d0)
    }

    /// Extend the domain outward to round tick boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };

        let mut prev = None;
        for _ in 0..10 {
            let Some(inc) = tick_increment(start, stop, count) else {
                break;
            };
            if prev == Some(inc) {
                break;
            }
            match inc {
                Increment::Multiply(step) => {
                    start = (start / step).floor() * step;
                    stop = (stop / step).ceil() * step;
                }
                Increment::Divide(per_unit) => {
                    start = (start * per_unit).floor() / per_unit;
                    stop = (stop * per_unit).ceil() / per_unit;
                }
            }
            prev = Some(inc);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round tick values spanning the domain, approximately `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (start, stop) = if d1 < d0 { (d1, d0) } else { (d0, d1) };
        if start == stop {
            return vec![start];
        }
        match tick_increment(start, stop, count) {
            Some(Increment::Multiply(step)) => {
                let first = (start / step).ceil() as i64;
                let last = (stop / step).floor() as i64;
                (first..=last).map(|i| i as f64 * step).collect()
            }
            Some(Increment::Divide(per_unit)) => {
                let first = (start * per_unit).ceil() as i64;
                let last = (stop * per_unit).floor() as i64;
                (first..=last).map(|i| i as f64 / per_unit).collect()
            }
            None => Vec::new(),
        }
    }
}

/// Tick spacing. Sub-unit steps are kept as "ticks per unit" so that
/// tick values are exact quotients rather than accumulated products.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Increment {
    Multiply(f64),
    Divide(f64),
}

fn tick_increment(start: f64, stop: f64, count: usize) -> Option<Increment> {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw == 0.0 || !raw.is_finite() {
        return None;
    }
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power < 0.0 {
        Some(Increment::Divide(10f64.powf(-power) / factor))
    } else {
        Some(Increment::Multiply(10f64.powf(power) * factor))
    }
}

/// Step between "nice" ticks: 1, 2 or 5 times a power of ten.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    match tick_increment(start, stop, count) {
        Some(Increment::Multiply(step)) => step,
        Some(Increment::Divide(per_unit)) => 1.0 / per_unit,
        None => 0.0,
    }
}

/// Linear mapping from a time window to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    pub domain: (NaiveDateTime, NaiveDateTime),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (NaiveDateTime, NaiveDateTime), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale spanning the first and last point of a series.
    pub fn for_points(points: &[SeriesPoint], range: (f64, f64)) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;
        Some(Self::new((first.time, last.time), range))
    }

    fn millis_scale(&self) -> LinearScale {
        let span = (self.domain.1 - self.domain.0).num_milliseconds() as f64;
        LinearScale::new((0.0, span), self.range)
    }

    /// Map a time to a pixel position.
    pub fn apply(&self, time: NaiveDateTime) -> f64 {
        let offset = (time - self.domain.0).num_milliseconds() as f64;
        self.millis_scale().apply(offset)
    }

    /// Map a pixel position back to a time.
    ///
    /// Positions too far out to be represented saturate to the earliest
    /// or latest representable time.
    pub fn invert(&self, pixel: f64) -> NaiveDateTime {
        let offset = self.millis_scale().invert(pixel).round();
        let saturated = if offset < 0.0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        };
        if !offset.is_finite() || offset.abs() >= i64::MAX as f64 {
            return saturated;
        }
        Duration::try_milliseconds(offset as i64)
            .and_then(|delta| self.domain.0.checked_add_signed(delta))
            .unwrap_or(saturated)
    }
}

/// Minimum and maximum of the values, or `None` when empty.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Value-axis domain for a chart of `points`.
///
/// Boolean units always use `[0, 1]`; other units pad the extent by 5%.
pub fn value_domain(points: &[SeriesPoint], unit: Unit) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    if unit.is_boolean() {
        return Some((0.0, 1.0));
    }
    extent(points.iter().map(|p| p.value)).map(|(lo, hi)| (lo * 0.95, hi * 1.05))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_frame_inner_area() {
        let frame = ChartFrame::default();
        assert_eq!(frame.inner_width(), 220.0);
        assert_eq!(frame.inner_height(), 100.0);
        assert_eq!(frame.to_inner(50.0, 20.0), (10.0, 10.0));
    }

    #[test]
    fn test_linear_apply_invert() {
        let scale = LinearScale::new((0.0, 100.0), (100.0, 0.0));
        assert_eq!(scale.apply(25.0), 75.0);
        assert_relative_eq!(scale.invert(75.0), 25.0);
    }

    #[test]
    fn test_collapsed_domain() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 200.0));
        assert_eq!(scale.apply(5.0), 100.0);
    }

    #[test]
    fn test_nice() {
        let scale = LinearScale::new((16.15, 33.6), (100.0, 0.0)).nice(10);
        assert_eq!(scale.domain, (16.0, 34.0));

        let reversed = LinearScale::new((0.93, 0.07), (0.0, 1.0)).nice(10);
        assert_relative_eq!(reversed.domain.0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(reversed.domain.1, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ticks() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);

        let wide = LinearScale::new((0.0, 2000.0), (0.0, 1.0));
        assert_eq!(wide.ticks(4), vec![0.0, 500.0, 1000.0, 1500.0, 2000.0]);
        assert_relative_eq!(tick_step(0.0, 1.0, 5), 0.2);
    }

    #[test]
    fn test_time_scale() {
        let scale = TimeScale::new((at(0), at(10)), (0.0, 100.0));
        assert_relative_eq!(scale.apply(at(5)), 50.0);
        assert_eq!(scale.invert(30.0), at(3));
        assert_eq!(scale.invert(150.0), at(15));
    }

    #[test]
    fn test_time_scale_invert_out_of_range() {
        let scale = TimeScale::new((at(0), at(10)), (0.0, 100.0));
        assert_eq!(scale.invert(1e12), NaiveDateTime::MAX);
        assert_eq!(scale.invert(-1e12), NaiveDateTime::MIN);
        assert_eq!(scale.invert(f64::INFINITY), NaiveDateTime::MAX);
        assert_eq!(scale.invert(f64::NEG_INFINITY), NaiveDateTime::MIN);
    }

    #[test]
    fn test_value_domain() {
        let points = vec![
            SeriesPoint::new(at(0), 10.0, 10.0),
            SeriesPoint::new(at(1), 20.0, 10.0),
        ];
        let (lo, hi) = value_domain(&points, Unit::Celsius).unwrap();
        assert_relative_eq!(lo, 9.5);
        assert_relative_eq!(hi, 21.0);
        assert_eq!(value_domain(&points, Unit::Boolean), Some((0.0, 1.0)));
        assert_eq!(value_domain(&[], Unit::Celsius), None);
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent(vec![3.0, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }
}
