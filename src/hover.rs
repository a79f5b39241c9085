//! Hover lookup
//!
//! Maps a cursor position over a chart to the data point whose tooltip
//! should be shown. Cursor and tooltip coordinates are outer (SVG)
//! coordinates; the [`ChartFrame`] margins are applied internally.

use crate::error::{Result, VerdantError};
use crate::reading::{Series, SeriesPoint};
use crate::scale::{ChartFrame, LinearScale, TimeScale};
use serde::{Deserialize, Serialize};

/// Axis weights for the nearest-point distance.
///
/// A larger horizontal weight makes the lookup follow lines along the
/// time axis instead of jumping to a vertically closer series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverWeights {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for HoverWeights {
    fn default() -> Self {
        Self {
            horizontal: 1.0,
            vertical: 0.8,
        }
    }
}

impl HoverWeights {
    pub fn with_horizontal(mut self, weight: f64) -> Self {
        self.horizontal = weight;
        self
    }

    pub fn with_vertical(mut self, weight: f64) -> Self {
        self.vertical = weight;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |w: f64| w.is_finite() && w >= 0.0;
        if !ok(self.horizontal) || !ok(self.vertical) {
            return Err(VerdantError::InvalidConfig(format!(
                "hover weights must be non-negative, got ({}, {})",
                self.horizontal, self.vertical
            )));
        }
        Ok(())
    }

    /// Weighted distance for pixel offsets `dx`, `dy`.
    pub fn distance(&self, dx: f64, dy: f64) -> f64 {
        ((self.horizontal * dx).powi(2) + (self.vertical * dy).powi(2)).sqrt()
    }
}

/// Where to draw a tooltip and what it shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub left: f64,
    pub top: f64,
    pub point: SeriesPoint,
}

/// Point closest to the cursor under the weighted distance.
///
/// The tooltip is anchored on the point itself. Returns `None` for an
/// empty slice. Equal distances keep the earlier point.
pub fn nearest_point(
    points: &[SeriesPoint],
    frame: &ChartFrame,
    x_scale: &TimeScale,
    y_scale: &LinearScale,
    cursor: (f64, f64),
    weights: &HoverWeights,
) -> Option<Tooltip> {
    let (mx, my) = frame.to_inner(cursor.0, cursor.1);
    let mut best: Option<(f64, &SeriesPoint)> = None;

    for point in points {
        let px = x_scale.apply(point.time);
        let py = y_scale.apply(point.value);
        let d = weights.distance(px - mx, py - my);
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, point));
        }
    }

    best.map(|(_, point)| {
        let (left, top) = frame.to_outer(x_scale.apply(point.time), y_scale.apply(point.value));
        Tooltip {
            left,
            top,
            point: *point,
        }
    })
}

/// Nearest point across several series drawn on shared scales.
///
/// Returns the owning sensor id with the tooltip.
pub fn nearest_across<'a>(
    series: &'a [Series],
    frame: &ChartFrame,
    x_scale: &TimeScale,
    y_scale: &LinearScale,
    cursor: (f64, f64),
    weights: &HoverWeights,
) -> Option<(&'a str, Tooltip)> {
    let (mx, my) = frame.to_inner(cursor.0, cursor.1);
    series
        .iter()
        .filter_map(|s| {
            nearest_point(&s.points, frame, x_scale, y_scale, cursor, weights).map(|t| {
                let (px, py) = frame.to_inner(t.left, t.top);
                (weights.distance(px - mx, py - my), s.sensor_id.as_str(), t)
            })
        })
        .fold(None, |best: Option<(f64, &str, Tooltip)>, cur| match best {
            Some(b) if b.0 <= cur.0 => Some(b),
            _ => Some(cur),
        })
        .map(|(_, id, t)| (id, t))
}

/// Single-series tooltip following the cursor horizontally.
///
/// Picks the point just before the first point at or after the cursor
/// time. A cursor before the first point shows the first point; a cursor
/// past the last point shows the last one. The tooltip stays on the
/// cursor's x and sits on the point's value.
pub fn bisect_point(
    points: &[SeriesPoint],
    frame: &ChartFrame,
    x_scale: &TimeScale,
    y_scale: &LinearScale,
    cursor_x: f64,
) -> Option<Tooltip> {
    if points.is_empty() {
        return None;
    }
    let time = x_scale.invert(cursor_x - frame.margin.left);
    let index = match points.iter().position(|p| p.time >= time) {
        Some(i) => i.saturating_sub(1),
        None => points.len() - 1,
    };
    let point = points[index];
    Some(Tooltip {
        left: cursor_x,
        top: y_scale.apply(point.value) + frame.margin.top,
        point,
    })
}
