//! Latest-reading reducer
//!
//! Picks the most recent reading per sensor for "current value" cards.

use crate::error::{Result, VerdantError};
use crate::reading::Reading;
use crate::sensor::SensorDefinition;

/// Reading with the greatest timestamp.
///
/// Ties keep the reading seen first. Empty input is an error rather
/// than a panic.
pub fn latest_reading<'a, I>(readings: I) -> Result<&'a Reading>
where
    I: IntoIterator<Item = &'a Reading>,
{
    readings
        .into_iter()
        .fold(None, |latest: Option<&Reading>, current| match latest {
            Some(l) if current.timestamp <= l.timestamp => Some(l),
            _ => Some(current),
        })
        .ok_or(VerdantError::NoReadings)
}

/// Latest reading of each sensor, in catalog order.
///
/// Sensors without any reading are skipped.
pub fn latest_per_sensor(readings: &[Reading], sensors: &[SensorDefinition]) -> Vec<Reading> {
    sensors
        .iter()
        .filter_map(|sensor| {
            let own = readings.iter().filter(|r| r.sensor_id == sensor.id);
            match latest_reading(own) {
                Ok(reading) => Some(reading.clone()),
                Err(_) => {
                    log::debug!("no readings for sensor {}", sensor.id);
                    None
                }
            }
        })
        .collect()
}
