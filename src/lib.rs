//! # Verdant - Synthetic greenhouse telemetry
//!
//! Synthetic sensor data for greenhouse IoT dashboards, plus the chart-side
//! math needed to display it.
//!
//! ## Key Features
//!
//! - **Generators**: month-long history, 24h day charts, hourly multi-sensor
//!   series and a zone × hour heatmap, all reproducible from a seed
//! - **Chart math**: linear/time scales, weighted hover lookup, stacked areas
//! - **Critical changes**: segmentation of a temperature line at large jumps
//! - **Live state**: capped series and readouts mutated by periodic tasks
//!
//! ## Quick Start
//!
//! ```rust
//! use verdant::{generate_history, latest_reading, dashboard_sensors, GeneratorConfig};
//!
//! let config = GeneratorConfig::new().with_seed(42);
//! let sensors = dashboard_sensors();
//! let history = generate_history(&config, &sensors).unwrap();
//!
//! let temperature = history.iter().filter(|r| r.sensor_id == "temperature");
//! let latest = latest_reading(temperature).unwrap();
//! println!("{} at {}", latest.display_value(), latest.display_label());
//! ```
//!
//! ## Modules
//!
//! - [`sensor`]: Sensor kinds, units and catalogs
//! - [`generator`]: Series generators
//! - [`reducer`]: Latest-reading reduction
//! - [`scale`] and [`hover`]: Chart scales and tooltip lookup
//! - [`segment`]: Critical-change segmentation
//! - [`live`]: Live view state and mutation tasks
//! - [`schedule`]: Task timetable for the live runtime

// Modules
pub mod assets;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod heatmap;
pub mod hover;
pub mod live;
pub mod reading;
pub mod reducer;
pub mod scale;
pub mod schedule;
pub mod segment;
pub mod sensor;
pub mod shaping;
pub mod stacked;
pub mod stats;

// Re-exports for convenience
pub use assets::{plant_gallery, Carousel, GalleryItem, MapEmbed, PlantStatus};
pub use config::{LiveConfig, TaskSchedule, TaskTiming};
pub use dashboard::{CardStat, Dashboard};
pub use error::{Result, VerdantError};
pub use generator::{
    generate_day_chart, generate_history, generate_hourly, generate_series, GeneratorConfig,
    SamplingPolicy,
};
pub use heatmap::{HeatCell, HeatmapGrid, Rgb};
pub use hover::{bisect_point, nearest_across, nearest_point, HoverWeights, Tooltip};
pub use live::{LiveSeries, LiveSnapshot, LiveState, Readout, ReadoutStatus};
pub use reading::{override_value, Reading, Series, SeriesPoint};
pub use reducer::{latest_per_sensor, latest_reading};
pub use scale::{value_domain, ChartFrame, LinearScale, Margin, TimeScale};
pub use schedule::{LiveTask, Timetable};
pub use segment::{segment_critical_changes, segment_series, Segment, SegmenterConfig, Segmentation};
pub use sensor::{dashboard_sensors, greenhouse_sensors, SensorDefinition, SensorKind, Unit};
pub use shaping::{Noise, Profile};
pub use stacked::{StackedChart, StackedRow};
pub use stats::{activations, average_fluctuation, summarize, DatasetSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
