//! Series statistics shown under charts.

use crate::error::{Result, VerdantError};
use crate::reading::Series;
use crate::shaping::round_to;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Mean fluctuation of a series, rounded to 2 decimals.
///
/// Boolean series report 0; their changes are counted by [`activations`].
pub fn average_fluctuation(series: &Series) -> Result<f64> {
    if series.is_empty() {
        return Err(VerdantError::EmptySeries);
    }
    if series.unit.is_boolean() {
        return Ok(0.0);
    }
    let total: f64 = series.points.iter().map(|p| p.fluctuation).sum();
    Ok(round_to(total / series.len() as f64, 2))
}

/// Number of off→on transitions.
pub fn activations(series: &Series) -> usize {
    series
        .points
        .windows(2)
        .filter(|w| w[0].value == 0.0 && w[1].value == 1.0)
        .count()
}

/// Overview of a multi-sensor dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_points: usize,
    pub sensors: Vec<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Summarize `series`; fails when there is no point at all.
pub fn summarize(series: &[Series]) -> Result<DatasetSummary> {
    let times = series.iter().flat_map(|s| s.points.iter().map(|p| p.time));
    let (start, end) = times
        .fold(None, |acc: Option<(NaiveDateTime, NaiveDateTime)>, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
        .ok_or(VerdantError::EmptySeries)?;

    Ok(DatasetSummary {
        total_points: series.iter().map(Series::len).sum(),
        sensors: series.iter().map(|s| s.sensor_id.clone()).collect(),
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::SeriesPoint;
    use crate::sensor::Unit;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn series(id: &str, unit: Unit, values: &[f64], first_hour: u32) -> Series {
        let mut prev = values.first().copied().unwrap_or(0.0);
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let p = SeriesPoint::new(at(first_hour + i as u32), v, prev);
                prev = v;
                p
            })
            .collect();
        Series {
            sensor_id: id.to_string(),
            unit,
            points,
        }
    }

    #[test]
    fn test_average_fluctuation() {
        let s = series("temp", Unit::Celsius, &[10.0, 11.0, 13.0], 0);
        assert_eq!(average_fluctuation(&s).unwrap(), 1.0);

        let b = series("switch_1", Unit::Boolean, &[0.0, 1.0], 0);
        assert_eq!(average_fluctuation(&b).unwrap(), 0.0);

        let empty = series("temp", Unit::Celsius, &[], 0);
        assert_eq!(average_fluctuation(&empty), Err(VerdantError::EmptySeries));
    }

    #[test]
    fn test_activations() {
        let s = series("switch_1", Unit::Boolean, &[0.0, 1.0, 1.0, 0.0, 1.0, 0.0], 0);
        assert_eq!(activations(&s), 2);
    }

    #[test]
    fn test_summary() {
        let all = vec![
            series("temp", Unit::Celsius, &[1.0, 2.0], 3),
            series("soil", Unit::Vwc, &[1.0, 2.0, 3.0], 1),
        ];
        let summary = summarize(&all).unwrap();
        assert_eq!(summary.total_points, 5);
        assert_eq!(summary.start, at(1));
        assert_eq!(summary.end, at(4));
        assert_eq!(summary.sensors, vec!["temp", "soil"]);
        assert!(summarize(&[]).is_err());
    }
}
