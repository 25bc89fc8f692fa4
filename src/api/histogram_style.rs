use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors, strokes and font sizes used when building render frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramStyle {
    pub bar_color: Color,
    /// Bars outside the brushed range.
    pub bar_dimmed_color: Color,
    /// Bar under the hover pointer.
    pub bar_highlight_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub axis_label_color: Color,
    pub axis_label_font_size_px: f64,
    pub brush_fill_color: Color,
    pub handle_line_color: Color,
    pub handle_line_width: f64,
    pub handle_fill_color: Color,
    pub handle_grip_color: Color,
    pub axis_tip_fill_color: Color,
    pub axis_tip_text_color: Color,
    pub axis_tip_font_size_px: f64,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            bar_color: Color::rgb(0.623, 0.835, 0.925),
            bar_dimmed_color: Color::rgb(0.886, 0.902, 0.910),
            bar_highlight_color: Color::rgb(0.247, 0.651, 0.843),
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.08),
            grid_line_width: 1.0,
            axis_label_color: Color::rgb(0.4, 0.4, 0.4),
            axis_label_font_size_px: 10.0,
            brush_fill_color: Color::rgba(0.0, 0.0, 0.0, 0.04),
            handle_line_color: Color::rgb(0.6, 0.6, 0.6),
            handle_line_width: 1.0,
            handle_fill_color: Color::rgb(1.0, 1.0, 1.0),
            handle_grip_color: Color::rgb(0.6, 0.6, 0.6),
            axis_tip_fill_color: Color::rgb(0.2, 0.2, 0.2),
            axis_tip_text_color: Color::rgb(1.0, 1.0, 1.0),
            axis_tip_font_size_px: 10.0,
        }
    }
}

impl HistogramStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.bar_color,
            self.bar_dimmed_color,
            self.bar_highlight_color,
            self.grid_line_color,
            self.axis_label_color,
            self.brush_fill_color,
            self.handle_line_color,
            self.handle_fill_color,
            self.handle_grip_color,
            self.axis_tip_fill_color,
            self.axis_tip_text_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("handle_line_width", self.handle_line_width),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("axis_tip_font_size_px", self.axis_tip_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}
