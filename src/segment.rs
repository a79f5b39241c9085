//! Critical-change segmentation
//!
//! Splits a temperature line into drawable segments, breaking at every
//! jump larger than a threshold so the jump can be highlighted.

use crate::error::{Result, VerdantError};
use crate::reading::Series;
use serde::{Deserialize, Serialize};

/// Segmenter settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// A change strictly above this is critical.
    pub threshold: f64,
    /// Segments are closed once they reach this many points.
    pub max_segment_len: usize,
    /// Only the first `window` points are scanned.
    pub window: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            threshold: 2.5,
            max_segment_len: 15,
            window: 80,
        }
    }
}

impl SegmenterConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_segment_len(mut self, len: usize) -> Self {
        self.max_segment_len = len;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(VerdantError::InvalidConfig(format!(
                "threshold must be non-negative, got {}",
                self.threshold
            )));
        }
        if self.max_segment_len < 2 {
            return Err(VerdantError::InvalidConfig(format!(
                "segments need at least 2 points, got {}",
                self.max_segment_len
            )));
        }
        Ok(())
    }
}

/// Inclusive index range into the scanned values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    /// Number of points, boundaries included.
    pub fn point_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Segments plus the indices of critical points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    pub segments: Vec<Segment>,
    pub critical: Vec<usize>,
}

impl Segmentation {
    pub fn is_critical(&self, index: usize) -> bool {
        self.critical.binary_search(&index).is_ok()
    }
}

/// Segment `values` at critical changes.
///
/// Adjacent segments share their boundary point, so drawing every
/// segment reproduces the whole line. A segment always ends at a
/// critical point, and the next one starts from it.
pub fn segment_critical_changes(values: &[f64], config: &SegmenterConfig) -> Result<Segmentation> {
    config.validate()?;
    let values = &values[..values.len().min(config.window)];
    let mut out = Segmentation::default();
    if values.is_empty() {
        return Ok(out);
    }

    let mut start = 0;
    for i in 1..values.len() {
        let critical = (values[i] - values[i - 1]).abs() > config.threshold;
        if critical {
            out.critical.push(i);
            out.segments.push(Segment { start, end: i });
            start = i;
        } else if i - start + 1 >= config.max_segment_len {
            out.segments.push(Segment { start, end: i });
            start = i;
        }
    }

    let last = values.len() - 1;
    if start < last || out.segments.is_empty() {
        out.segments.push(Segment { start, end: last });
    }

    log::trace!(
        "segmented {} points into {} segments, {} critical",
        values.len(),
        out.segments.len(),
        out.critical.len()
    );
    Ok(out)
}

/// Segment a series' values.
pub fn segment_series(series: &Series, config: &SegmenterConfig) -> Result<Segmentation> {
    segment_critical_changes(&series.values(), config)
}
