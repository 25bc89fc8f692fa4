mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;

pub use frame::{LayerPrimitives, RenderFrame};
pub use layer_stack::ChartLayer;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart state and brush logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Rendered width of `text`, used to keep axis tips inside the plot.
    ///
    /// The default is a deterministic estimate so headless charts and
    /// snapshots do not depend on installed fonts.
    fn measure_text_width(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_text_width_px(text, font_size_px)
    }
}

/// Backend-independent label width estimate from per-glyph width classes.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
