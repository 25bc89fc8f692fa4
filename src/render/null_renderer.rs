use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless charts.
///
/// It still validates frame content so tests catch invalid geometry, and it
/// keeps the last frame for inspection.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
