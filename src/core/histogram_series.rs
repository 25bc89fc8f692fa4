use serde::{Deserialize, Serialize};

use crate::core::bar_index::BarIndexMapper;
use crate::core::scale::LinearScale;
use crate::core::types::{DataPoint, PlotArea};
use crate::error::{ChartError, ChartResult};

/// Geometry the bar renderer must draw for one bin, in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
}

impl BarGeometry {
    /// Zero-height bar resting on the baseline, used as the enter state.
    #[must_use]
    pub fn collapsed(index: usize, x: f64, width: f64, plot_height: f64) -> Self {
        Self {
            index,
            x,
            width,
            y: plot_height,
            height: 0.0,
        }
    }

    /// Blends position and height toward `to`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            index: to.index,
            x: self.x + (to.x - self.x) * t,
            width: self.width + (to.width - self.width) * t,
            y: self.y + (to.y - self.y) * t,
            height: (self.height + (to.height - self.height) * t).max(0.0),
        }
    }
}

/// Height of a bar for `freq`, lifted to `min_bar_height` when it would otherwise
/// be visible but thinner than the floor.
#[must_use]
pub fn bar_height(freq: f64, value_scale: LinearScale, plot_height: f64, min_bar_height: f64) -> f64 {
    if !freq.is_finite() || freq <= 0.0 {
        return 0.0;
    }
    let height = plot_height - value_scale.map(freq);
    if height > 0.0 && height < min_bar_height {
        min_bar_height
    } else {
        height.max(0.0)
    }
}

/// Projects binned data into bar rectangles.
///
/// Bars are laid out left to right at `index * bar_width`; each is drawn one
/// pixel narrower than its slot so neighbours stay visually separated.
pub fn project_histogram_bars(
    data: &[DataPoint],
    mapper: Option<BarIndexMapper>,
    value_scale: LinearScale,
    plot: PlotArea,
    min_bar_height: f64,
) -> ChartResult<Vec<BarGeometry>> {
    if !min_bar_height.is_finite() || min_bar_height < 0.0 {
        return Err(ChartError::InvalidData(
            "minimum bar height must be finite and >= 0".to_owned(),
        ));
    }

    let Some(mapper) = mapper else {
        return Ok(Vec::new());
    };

    let drawn_width = (mapper.bar_width() - 1.0).max(0.0);
    let bars = data
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let height = bar_height(point.freq, value_scale, plot.height, min_bar_height);
            BarGeometry {
                index,
                x: mapper.bar_x(index),
                width: drawn_width,
                y: plot.height - height,
                height,
            }
        })
        .collect();
    Ok(bars)
}
