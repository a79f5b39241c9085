//! Stacked-area aggregation
//!
//! Sums hourly series by hour of day, brings every sensor to a
//! comparable magnitude, and stacks the selected sensors into bands.

use crate::error::{Result, VerdantError};
use crate::reading::Series;
use crate::scale::{ChartFrame, LinearScale};
use crate::sensor::{SensorDefinition, SensorKind};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalization divisor per sensor kind.
pub fn divisor(kind: SensorKind) -> f64 {
    match kind {
        SensorKind::Temperature => 10.0,
        SensorKind::AirHumidity => 100.0,
        SensorKind::ParRadiation => 1000.0,
        SensorKind::Pressure => 100.0,
        SensorKind::Co2 => 100.0,
        SensorKind::VolumetricMoisture => 10.0,
        SensorKind::Switch => 1.0,
    }
}

/// Normalized per-sensor sums for one hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedRow {
    pub hour: u32,
    /// Aligned with [`StackedChart::sensor_ids`].
    pub values: Vec<f64>,
}

/// One stacked band: `(hour, y0, y1)` per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub sensor_id: String,
    pub points: Vec<(u32, f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedChart {
    pub sensor_ids: Vec<String>,
    /// Sorted by hour; hours without data are absent.
    pub rows: Vec<StackedRow>,
}

impl StackedChart {
    /// Aggregate `series` (any order) using the catalog for divisors.
    ///
    /// Series whose sensor is missing from the catalog are rejected.
    pub fn from_series(series: &[Series], sensors: &[SensorDefinition]) -> Result<Self> {
        let mut divisors = Vec::with_capacity(series.len());
        for s in series {
            let sensor = sensors
                .iter()
                .find(|d| d.id == s.sensor_id)
                .ok_or_else(|| VerdantError::UnknownSensor(s.sensor_id.clone()))?;
            divisors.push(divisor(sensor.kind));
        }

        let mut sums: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for (col, s) in series.iter().enumerate() {
            for p in &s.points {
                let row = sums.entry(p.time.hour()).or_insert_with(|| vec![0.0; series.len()]);
                row[col] += p.value;
            }
        }

        let rows = sums
            .into_iter()
            .map(|(hour, values)| StackedRow {
                hour,
                values: values.iter().zip(&divisors).map(|(v, d)| v / d).collect(),
            })
            .collect();

        Ok(Self {
            sensor_ids: series.iter().map(|s| s.sensor_id.clone()).collect(),
            rows,
        })
    }

    fn columns(&self, selected: &[&str]) -> Vec<usize> {
        selected
            .iter()
            .filter_map(|id| self.sensor_ids.iter().position(|s| s == id))
            .collect()
    }

    /// Stack the selected sensors bottom-up in selection order.
    ///
    /// Unknown ids are ignored.
    pub fn bands(&self, selected: &[&str]) -> Vec<Band> {
        let columns = self.columns(selected);
        let mut floor = vec![0.0; self.rows.len()];
        columns
            .into_iter()
            .map(|col| {
                let points = self
                    .rows
                    .iter()
                    .zip(floor.iter_mut())
                    .map(|(row, y0)| {
                        let y1 = *y0 + row.values[col];
                        let band = (row.hour, *y0, y1);
                        *y0 = y1;
                        band
                    })
                    .collect();
                Band {
                    sensor_id: self.sensor_ids[col].clone(),
                    points,
                }
            })
            .collect()
    }

    /// `[0, 1.1 × largest stacked total]` for the selected sensors.
    pub fn y_domain(&self, selected: &[&str]) -> (f64, f64) {
        let columns = self.columns(selected);
        let max = self
            .rows
            .iter()
            .map(|row| columns.iter().map(|&c| row.values[c]).sum::<f64>())
            .fold(0.0, f64::max);
        (0.0, max * 1.1)
    }

    /// Hour axis over the frame's plotting area.
    pub fn x_scale(frame: &ChartFrame) -> LinearScale {
        LinearScale::new((0.0, 23.0), (0.0, frame.inner_width()))
    }

    /// Row under the cursor (outer x), if that hour has data.
    pub fn row_at(&self, frame: &ChartFrame, x: f64) -> Option<&StackedRow> {
        let (ix, _) = frame.to_inner(x, 0.0);
        let hour = Self::x_scale(frame).invert(ix).round();
        if !(0.0..24.0).contains(&hour) {
            return None;
        }
        self.rows.iter().find(|r| r.hour == hour as u32)
    }
}
