use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::scale::LinearScale;
use crate::core::types::{ChartKind, DataPoint, PlotArea};
use crate::error::ChartResult;

/// Axis value under a plot x-coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisValue {
    Number(f64),
    Time(DateTime<Utc>),
}

impl AxisValue {
    /// Numeric representation; time values are UNIX seconds.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::Time(time) => datetime_to_unix_seconds(time),
        }
    }
}

/// Maps plot pixels to the data's own x-axis values.
///
/// The axis runs from the first bin's `start` to the last bin's `end`. When
/// the data carries no spans the axis falls back to bin positions
/// `[0, data.len()]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    kind: ChartKind,
    pixels_to_values: LinearScale,
}

impl AxisScale {
    pub fn from_data(kind: ChartKind, data: &[DataPoint], plot: PlotArea) -> ChartResult<Self> {
        let first = data.first().and_then(|point| point.start);
        let last = data.last().and_then(|point| point.end);
        let (start, end) = match (first, last) {
            (Some(start), Some(end)) => (start, end),
            _ => (0.0, data.len() as f64),
        };
        Ok(Self {
            kind,
            pixels_to_values: LinearScale::new((0.0, plot.width), (start, end))?,
        })
    }

    #[must_use]
    pub fn value_at(self, pixel: f64) -> AxisValue {
        let raw = self.pixels_to_values.map(pixel);
        match self.kind {
            ChartKind::Numeric => AxisValue::Number(raw),
            ChartKind::Time => {
                unix_seconds_to_datetime(raw).map_or(AxisValue::Number(raw), AxisValue::Time)
            }
        }
    }
}

/// Evenly spaced division offsets across `[0, span_px]`, both ends included.
///
/// The division count is `round(span_px / division_width_px)`, at least one.
#[must_use]
pub fn division_offsets(span_px: f64, division_width_px: f64) -> Vec<f64> {
    if !span_px.is_finite() || span_px <= 0.0 {
        return vec![0.0];
    }
    let count = if division_width_px.is_finite() && division_width_px > 0.0 {
        ((span_px / division_width_px).round() as usize).max(1)
    } else {
        1
    };
    let step = span_px / count as f64;
    (0..=count).map(|index| index as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_offsets_include_both_edges() {
        let offsets = division_offsets(400.0, 80.0);
        assert_eq!(offsets.len(), 6);
        assert_eq!(offsets[0], 0.0);
        assert_eq!(offsets[5], 400.0);
    }

    #[test]
    fn narrow_plot_keeps_one_division() {
        assert_eq!(division_offsets(30.0, 80.0), vec![0.0, 30.0]);
    }

    #[test]
    fn spanless_data_falls_back_to_bin_positions() {
        let data = vec![DataPoint::new(1.0); 4];
        let plot = PlotArea {
            width: 200.0,
            height: 50.0,
        };
        let axis = AxisScale::from_data(ChartKind::Numeric, &data, plot).expect("axis");
        assert_eq!(axis.value_at(100.0), AxisValue::Number(2.0));
    }
}
