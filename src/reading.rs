//! Readings and series points
//!
//! A [`Reading`] is one observation of one sensor at one instant. A
//! [`SeriesPoint`] is a chart sample carrying its fluctuation from the
//! previous sample.

use crate::error::{Result, VerdantError};
use crate::sensor::Unit;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format for reading timestamps (`16/10/2026, 14:05`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// A single sensor observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Reading identifier (`<sensor>_<day>_<hour>`).
    pub id: String,
    /// Owning sensor.
    pub sensor_id: String,
    /// Sensor label, copied for display.
    pub label: String,
    /// Observed value; 0/1 for boolean units.
    pub value: f64,
    /// Unit of the value.
    pub unit: Unit,
    /// Wall-clock time of the observation.
    pub timestamp: NaiveDateTime,
}

impl Reading {
    /// Timestamp formatted for display.
    pub fn display_label(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Value formatted for display (`ON`/`OFF` for switches).
    pub fn display_value(&self) -> String {
        self.unit.format_value(self.value)
    }
}

/// One point of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: NaiveDateTime,
    pub value: f64,
    /// Absolute difference to the preceding value.
    pub fluctuation: f64,
}

impl SeriesPoint {
    pub fn new(time: NaiveDateTime, value: f64, previous: f64) -> Self {
        Self {
            time,
            value,
            fluctuation: (value - previous).abs(),
        }
    }
}

/// An ordered series for one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub sensor_id: String,
    pub unit: Unit,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values in time order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Last point, if any.
    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// Check that timestamps never go backwards.
    pub fn is_time_ordered(&self) -> bool {
        self.points.windows(2).all(|w| w[0].time <= w[1].time)
    }
}

/// Overwrite the displayed value of one sensor's reading.
///
/// Switch readings only accept 0 or 1, and non-finite values are
/// rejected for every unit.
pub fn override_value(readings: &mut [Reading], sensor_id: &str, value: f64) -> Result<()> {
    let reading = readings
        .iter_mut()
        .find(|r| r.sensor_id == sensor_id)
        .ok_or_else(|| VerdantError::UnknownSensor(sensor_id.to_string()))?;

    let valid = value.is_finite() && (!reading.unit.is_boolean() || value == 0.0 || value == 1.0);
    if !valid {
        return Err(VerdantError::InvalidValue {
            sensor: sensor_id.to_string(),
            value,
        });
    }

    reading.value = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn reading(sensor_id: &str, unit: Unit, value: f64) -> Reading {
        Reading {
            id: format!("{}_0_0", sensor_id),
            sensor_id: sensor_id.to_string(),
            label: sensor_id.to_string(),
            value,
            unit,
            timestamp: at(14, 5),
        }
    }

    #[test]
    fn test_display_label() {
        let r = reading("temperature", Unit::Celsius, 21.3);
        assert_eq!(r.display_label(), "16/10/2026, 14:05");
        assert_eq!(r.display_value(), "21.3 °C");
    }

    #[test]
    fn test_series_point_fluctuation() {
        let p = SeriesPoint::new(at(0, 0), 18.0, 20.5);
        assert_eq!(p.fluctuation, 2.5);
    }

    #[test]
    fn test_override_numeric() {
        let mut readings = vec![reading("temperature", Unit::Celsius, 21.3)];
        override_value(&mut readings, "temperature", 19.0).unwrap();
        assert_eq!(readings[0].value, 19.0);
    }

    #[test]
    fn test_override_switch_rejects_non_binary() {
        let mut readings = vec![reading("switch_1", Unit::Boolean, 0.0)];
        let err = override_value(&mut readings, "switch_1", 0.5).unwrap_err();
        assert!(matches!(err, VerdantError::InvalidValue { .. }));

        override_value(&mut readings, "switch_1", 1.0).unwrap();
        assert_eq!(readings[0].value, 1.0);
    }

    #[test]
    fn test_override_rejects_nan_and_unknown() {
        let mut readings = vec![reading("temperature", Unit::Celsius, 21.3)];
        assert!(override_value(&mut readings, "temperature", f64::NAN).is_err());
        assert_eq!(
            override_value(&mut readings, "wind", 3.0),
            Err(VerdantError::UnknownSensor("wind".to_string()))
        );
    }

    #[test]
    fn test_time_ordered() {
        let series = Series {
            sensor_id: "temp".to_string(),
            unit: Unit::Celsius,
            points: vec![
                SeriesPoint::new(at(0, 0), 1.0, 1.0),
                SeriesPoint::new(at(0, 10), 2.0, 1.0),
            ],
        };
        assert!(series.is_time_ordered());
        assert_eq!(series.values(), vec![1.0, 2.0]);
    }
}
