use crate::core::{Margins, PlotArea, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{HandleConfig, HistogramChartConfig};

/// Checks a bootstrap config and returns the canvas viewport it describes.
pub(super) fn validate_chart_config(config: &HistogramChartConfig) -> ChartResult<Viewport> {
    let width = config.width.ok_or(ChartError::MissingOption("width"))?;
    let height = config.height.ok_or(ChartError::MissingOption("height"))?;
    let viewport = Viewport::new(width, height);
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport { width, height });
    }

    validate_margins(config.margins)?;
    validate_plot_area(viewport, config.margins)?;
    validate_handle_config(config.handle)?;

    if !config.min_bar_height.is_finite() || config.min_bar_height < 0.0 {
        return Err(ChartError::InvalidData(
            "minimum bar height must be finite and >= 0".to_owned(),
        ));
    }
    if !config.division_width.is_finite() || config.division_width <= 0.0 {
        return Err(ChartError::InvalidData(
            "division width must be finite and > 0".to_owned(),
        ));
    }
    config.style.validate()?;

    Ok(viewport)
}

pub(super) fn validate_plot_area(viewport: Viewport, margins: Margins) -> ChartResult<PlotArea> {
    let plot = PlotArea::from_canvas(
        f64::from(viewport.width),
        f64::from(viewport.height),
        margins,
    );
    if plot.width <= 0.0 || plot.height <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "margins leave no plot area inside {}x{}",
            viewport.width, viewport.height
        )));
    }
    Ok(plot)
}

fn validate_margins(margins: Margins) -> ChartResult<()> {
    for (name, value) in [
        ("top", margins.top),
        ("right", margins.right),
        ("bottom", margins.bottom),
        ("left", margins.left),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "margin `{name}` must be finite and >= 0"
            )));
        }
    }
    Ok(())
}

fn validate_handle_config(handle: HandleConfig) -> ChartResult<()> {
    if !handle.width.is_finite() || handle.width <= 0.0 {
        return Err(ChartError::InvalidData(
            "handle width must be finite and > 0".to_owned(),
        ));
    }
    if !handle.height.is_finite() || handle.height <= 0.0 {
        return Err(ChartError::InvalidData(
            "handle height must be finite and > 0".to_owned(),
        ));
    }
    if !handle.radius.is_finite() || handle.radius < 0.0 {
        return Err(ChartError::InvalidData(
            "handle radius must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}
