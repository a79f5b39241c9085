//! Dashboard composition
//!
//! History → latest reading per sensor → a day chart seeded by each
//! latest value, with the statistics shown under every card.

use crate::error::{Result, VerdantError};
use crate::generator::{generate_day_chart, generate_history, GeneratorConfig};
use crate::reading::{override_value, Reading, Series};
use crate::reducer::latest_per_sensor;
use crate::sensor::SensorDefinition;
use crate::stats::{activations, average_fluctuation};
use serde::{Deserialize, Serialize};

/// Per-card statistic: fluctuation for numeric sensors, activations for switches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStat {
    AverageFluctuation(f64),
    Activations(usize),
}

/// Current readings and their day charts, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub readings: Vec<Reading>,
    pub charts: Vec<Series>,
}

impl Dashboard {
    /// Generate history for `sensors`, reduce it, and chart each sensor.
    pub fn build(config: &GeneratorConfig, sensors: &[SensorDefinition]) -> Result<Self> {
        let history = generate_history(config, sensors)?;
        let readings = latest_per_sensor(&history, sensors);

        let mut charts = Vec::with_capacity(readings.len());
        for (i, reading) in readings.iter().enumerate() {
            let sensor = sensors
                .iter()
                .find(|s| s.id == reading.sensor_id)
                .ok_or_else(|| VerdantError::UnknownSensor(reading.sensor_id.clone()))?;
            // Distinct stream per card under a fixed seed
            let card_config = match config.seed {
                Some(seed) => config.clone().with_seed(seed.wrapping_add(i as u64 + 1)),
                None => config.clone(),
            };
            charts.push(generate_day_chart(&card_config, sensor, reading.value)?);
        }

        log::debug!("dashboard built with {} cards", readings.len());
        Ok(Self { readings, charts })
    }

    /// Statistic for the card of `sensor_id`.
    pub fn card_stat(&self, sensor_id: &str) -> Result<CardStat> {
        let chart = self
            .charts
            .iter()
            .find(|c| c.sensor_id == sensor_id)
            .ok_or_else(|| VerdantError::UnknownSensor(sensor_id.to_string()))?;
        if chart.unit.is_boolean() {
            Ok(CardStat::Activations(activations(chart)))
        } else {
            Ok(CardStat::AverageFluctuation(average_fluctuation(chart)?))
        }
    }

    /// Manually overwrite a displayed current value.
    pub fn override_value(&mut self, sensor_id: &str, value: f64) -> Result<()> {
        override_value(&mut self.readings, sensor_id, value)
    }
}
