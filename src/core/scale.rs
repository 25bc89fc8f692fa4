use ordered_float::OrderedFloat;

use crate::core::types::{DataPoint, EXTENT_DOMAIN_MAX, PlotArea};
use crate::error::{ChartError, ChartResult};

/// Linear mapping between a value domain and a pixel range.
///
/// Immutable: rebuild it whenever data or plot dimensions change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Builds a scale from a domain and a pixel range.
    ///
    /// A zero-span domain is accepted: every value maps to `range_start`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        for (name, value) in [
            ("domain start", domain.0),
            ("domain end", domain.1),
            ("range start", range.0),
            ("range end", range.1),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "scale {name} must be finite"
                )));
            }
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Frequency → y pixel. Domain `[0, max(freq)]`, range `[plot_height, 0]`.
    pub fn value_scale(data: &[DataPoint], plot: PlotArea) -> ChartResult<Self> {
        Self::new((0.0, max_frequency(data)), (plot.height, 0.0))
    }

    /// Normalized position `[0, 100]` → x pixel across the plot width.
    pub fn index_scale(plot: PlotArea) -> ChartResult<Self> {
        Self::new((0.0, EXTENT_DOMAIN_MAX), (0.0, plot.width))
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return self.range_start;
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Largest frequency in `data`; empty bins and non-finite values count as zero.
#[must_use]
pub fn max_frequency(data: &[DataPoint]) -> f64 {
    data.iter()
        .map(|point| {
            if point.freq.is_finite() {
                OrderedFloat(point.freq.max(0.0))
            } else {
                OrderedFloat(0.0)
            }
        })
        .max()
        .map_or(0.0, |max| max.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_span_domain_maps_to_range_start() {
        let scale = LinearScale::new((0.0, 0.0), (120.0, 0.0)).expect("scale");
        assert_eq!(scale.map(0.0), 120.0);
        assert_eq!(scale.map(42.0), 120.0);
    }

    #[test]
    fn zero_span_range_inverts_to_domain_start() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 0.0)).expect("scale");
        assert_eq!(scale.invert(10.0), 0.0);
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        assert!(LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, 1.0), (f64::INFINITY, 1.0)).is_err());
    }
}
