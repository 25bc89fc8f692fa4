use std::time::Duration;

use tracing::trace;

use crate::core::{BarGeometry, BrushExtent, ChartPosition, PlotArea, Viewport, division_offsets};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, TextHAlign};

use super::frame_builder::{AxisLabel, AxisTipLabel, FrameContext, build_histogram_frame};
use super::{
    AXIS_TIP_PADDING_PX, AxisTipSide, HistogramChart, Transition, TransitionTarget,
    position_axis_tip,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

impl<R: Renderer> HistogramChart<R> {
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        trace!(
            lines = frame.line_count(),
            rects = frame.rect_count(),
            texts = frame.text_count(),
            "render histogram frame"
        );
        self.renderer.render(&frame)
    }

    /// Renders into an external cairo context, e.g. from a GTK draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    /// Materializes the current displayed state, transitions included.
    ///
    /// A hidden chart produces a frame with every layer empty.
    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        let viewport = Viewport::new(self.state.width(), self.state.canvas_height());
        if !self.state.is_visible() {
            return Ok(RenderFrame::new(viewport));
        }

        let plot = self.state.plot();
        let margins = self.state.margins();
        let pos = self.displayed_position();
        let bars = self.displayed_bars()?;
        let divisions = division_offsets(plot.width, self.config.division_width);
        let axis_labels = self.axis_labels(&divisions);
        let brush_px = self.displayed_brush_pixels();
        let axis_tips = match brush_px {
            Some((lo, hi)) => self.axis_tip_labels(plot, lo, hi),
            None => Vec::new(),
        };
        let highlight = if self.state.is_dragging() {
            self.state.live_highlight()
        } else {
            self.state.selection()
        };

        let frame = build_histogram_frame(&FrameContext {
            viewport,
            origin_x: margins.left + pos.x,
            origin_y: margins.top + pos.y,
            plot,
            kind: self.config.kind,
            style: &self.config.style,
            handle: self.config.handle,
            divisions: &divisions,
            bars: &bars,
            highlight,
            hovered_bar: self.state.highlighted_bar(),
            brush_px,
            axis_labels: &axis_labels,
            axis_tips: &axis_tips,
        });
        frame.validate()?;
        Ok(frame)
    }

    /// Advances every pending transition by `delta`.
    ///
    /// Returns `true` while any transition is still running.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let completed = self.transitions.advance(delta);
        if !completed.is_empty() {
            trace!(?completed, "transitions completed");
        }
        !self.transitions.is_idle()
    }

    pub(super) fn displayed_bars(&self) -> ChartResult<Vec<BarGeometry>> {
        match self
            .transitions
            .get(TransitionTarget::Bars)
            .and_then(Transition::sample_bars)
        {
            Some(bars) => Ok(bars),
            None => self.state.bar_geometry(self.config.min_bar_height),
        }
    }

    pub(super) fn displayed_brush_extent(&self) -> BrushExtent {
        self.transitions
            .get(TransitionTarget::Brush)
            .and_then(Transition::sample_brush)
            .unwrap_or_else(|| self.state.brush_extent())
    }

    pub(super) fn displayed_position(&self) -> ChartPosition {
        self.transitions
            .get(TransitionTarget::Position)
            .and_then(Transition::sample_position)
            .unwrap_or_else(|| self.state.pos())
    }

    pub(super) fn displayed_axis_tip_opacity(&self, side: AxisTipSide) -> f64 {
        self.transitions
            .get(TransitionTarget::AxisTip(side))
            .and_then(Transition::sample_opacity)
            .unwrap_or(if self.state.is_dragging() { 1.0 } else { 0.0 })
    }

    fn displayed_brush_pixels(&self) -> Option<(f64, f64)> {
        let extent = self.displayed_brush_extent();
        if extent.is_empty() {
            return None;
        }
        self.state
            .mapper()
            .map(|mapper| mapper.extent_to_pixels(extent))
    }

    fn axis_labels(&self, divisions: &[f64]) -> Vec<AxisLabel> {
        let Some(axis) = self.state.axis_scale(self.config.kind) else {
            return Vec::new();
        };
        let last = divisions.len().saturating_sub(1);
        divisions
            .iter()
            .enumerate()
            .map(|(index, &x)| AxisLabel {
                x,
                text: self.formatter.format_axis_value(axis.value_at(x)),
                align: if index == 0 {
                    TextHAlign::Left
                } else if index == last {
                    TextHAlign::Right
                } else {
                    TextHAlign::Center
                },
            })
            .collect()
    }

    fn axis_tip_labels(&self, plot: PlotArea, lo_px: f64, hi_px: f64) -> Vec<AxisTipLabel> {
        if !self.config.axis_tips {
            return Vec::new();
        }
        let Some(axis) = self.state.axis_scale(self.config.kind) else {
            return Vec::new();
        };
        let tips = self.state.axis_tips();
        let font_size = self.config.style.axis_tip_font_size_px;

        // Text follows the drawn handle, which may still be animating.
        AxisTipSide::BOTH
            .into_iter()
            .filter_map(|side| {
                let handle_x = match side {
                    AxisTipSide::Left => tips.left.map(|_| lo_px)?,
                    AxisTipSide::Right => tips.right.map(|_| hi_px)?,
                };
                let text = self.formatter.format_axis_value(axis.value_at(handle_x));
                let box_width =
                    self.renderer.measure_text_width(&text, font_size) + AXIS_TIP_PADDING_PX;
                Some(AxisTipLabel {
                    layout: position_axis_tip(handle_x, box_width, plot.width),
                    text,
                    opacity: self.displayed_axis_tip_opacity(side),
                })
            })
            .collect()
    }
}
