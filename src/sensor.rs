// Verdant - Synthetic greenhouse telemetry
// Copyright (c) 2025 Verdant Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Sensor definitions and the static catalogs used by the views.
//!
//! Every shaping decision downstream is taken by matching on
//! [`SensorKind`], never on labels.

use serde::{Deserialize, Serialize};

/// Physical quantity a sensor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    /// Air temperature.
    Temperature,
    /// Relative air humidity.
    AirHumidity,
    /// Volumetric water content of the substrate.
    VolumetricMoisture,
    /// Photosynthetically active radiation.
    ParRadiation,
    /// Barometric pressure.
    Pressure,
    /// CO₂ concentration.
    Co2,
    /// Boolean actuator (pump, valve, fan).
    Switch,
}

impl SensorKind {
    /// Get kind name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::AirHumidity => "air_humidity",
            SensorKind::VolumetricMoisture => "volumetric_moisture",
            SensorKind::ParRadiation => "par_radiation",
            SensorKind::Pressure => "pressure",
            SensorKind::Co2 => "co2",
            SensorKind::Switch => "switch",
        }
    }

    /// Whether values of this kind are restricted to {0, 1}.
    pub fn is_boolean(&self) -> bool {
        matches!(self, SensorKind::Switch)
    }
}

/// Unit of measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Celsius,
    Percent,
    Vwc,
    Par,
    HectoPascal,
    Ppm,
    /// Marker unit for ON/OFF actuators.
    Boolean,
}

impl Unit {
    /// Display symbol. Empty for boolean units.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Percent => "%",
            Unit::Vwc => "VWC",
            Unit::Par => "µmol m⁻² s⁻¹",
            Unit::HectoPascal => "hPa",
            Unit::Ppm => "ppm",
            Unit::Boolean => "",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Unit::Boolean)
    }

    /// Format a value for display in this unit.
    ///
    /// Boolean units render as `ON`/`OFF`; everything else keeps the
    /// value's own precision and appends the symbol.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Unit::Boolean => {
                if value != 0.0 {
                    "ON".to_string()
                } else {
                    "OFF".to_string()
                }
            }
            unit => format!("{} {}", value, unit.symbol()),
        }
    }
}

/// Static description of one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDefinition {
    /// Sensor identifier, unique within a catalog.
    pub id: String,
    /// Human readable label.
    pub label: String,
    /// Quantity measured.
    pub kind: SensorKind,
    /// Unit of measurement.
    pub unit: Unit,
    /// Value the shaping functions are centred on.
    pub base_value: f64,
    /// Full width of the uniform noise band for kinds without a dedicated curve.
    pub variance: f64,
}

impl SensorDefinition {
    /// Create a new sensor definition.
    pub fn new(id: &str, label: &str, kind: SensorKind, unit: Unit, base_value: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            unit,
            base_value,
            variance: 0.0,
        }
    }

    /// Set the noise band width.
    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }

    /// Whether this sensor only ever holds 0 or 1.
    pub fn is_boolean(&self) -> bool {
        self.kind.is_boolean() || self.unit.is_boolean()
    }
}

/// Sensors shown on the summary dashboard.
///
/// The two switches are listed in the order the dashboard shows them.
pub fn dashboard_sensors() -> Vec<SensorDefinition> {
    vec![
        SensorDefinition::new(
            "temperature",
            "Temperature",
            SensorKind::Temperature,
            Unit::Celsius,
            17.0,
        )
        .with_variance(8.0),
        SensorDefinition::new(
            "air_humidity",
            "Air Humidity",
            SensorKind::AirHumidity,
            Unit::Percent,
            74.0,
        )
        .with_variance(15.0),
        SensorDefinition::new(
            "volumetric_humidity",
            "Volumetric Humidity",
            SensorKind::VolumetricMoisture,
            Unit::Vwc,
            96.0,
        )
        .with_variance(20.0),
        SensorDefinition::new("switch_2", "ON/OFF 2", SensorKind::Switch, Unit::Boolean, 0.0),
        SensorDefinition::new("switch_1", "ON/OFF 1", SensorKind::Switch, Unit::Boolean, 0.0),
        SensorDefinition::new(
            "par",
            "PAR Radiation",
            SensorKind::ParRadiation,
            Unit::Par,
            1043.0,
        )
        .with_variance(400.0),
    ]
}

/// Sensors feeding the greenhouse charts (curves, stacked areas, critical changes).
pub fn greenhouse_sensors() -> Vec<SensorDefinition> {
    vec![
        SensorDefinition::new("temp", "Temperature", SensorKind::Temperature, Unit::Celsius, 22.0),
        SensorDefinition::new("humidity", "Humidity", SensorKind::AirHumidity, Unit::Percent, 65.0),
        SensorDefinition::new("light", "PAR Radiation", SensorKind::ParRadiation, Unit::Par, 800.0),
        SensorDefinition::new("pressure", "Pressure", SensorKind::Pressure, Unit::HectoPascal, 1013.0),
        SensorDefinition::new("co2", "CO₂", SensorKind::Co2, Unit::Ppm, 400.0),
        SensorDefinition::new("soil", "Soil Moisture", SensorKind::VolumetricMoisture, Unit::Vwc, 45.0),
    ]
}

/// Find a sensor by id.
pub fn find_sensor<'a>(sensors: &'a [SensorDefinition], id: &str) -> Option<&'a SensorDefinition> {
    sensors.iter().find(|s| s.id == id)
}
