use std::time::Duration;

use tracing::debug;

use crate::core::{BarGeometry, BrushExtent, DataPoint, Viewport, canonicalize_bins};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::validation::validate_plot_area;
use super::{
    Easing, HistogramChart, Notifications, REFRESH_TRANSITION, Transition, TransitionTarget,
    TransitionValue,
};

impl<R: Renderer> HistogramChart<R> {
    /// Replaces the histogram data.
    ///
    /// A different bin count rebuilds the chart and clears the selection.
    /// The same bin count behaves like [`HistogramChart::refresh_data`].
    /// Non-finite or negative frequencies are stored as empty bins.
    pub fn replace_data(&mut self, data: Vec<DataPoint>) -> ChartResult<()> {
        let previous_len = self.state.data().len();
        if previous_len == data.len() {
            return self.refresh_data(data);
        }

        let data = canonicalize_bins(data);
        debug!(previous_len, current_len = data.len(), "replace histogram data");

        let mut notifications = Notifications::default();
        notifications.state(self.state.set_data(data));
        self.clear_selection_into(&mut notifications);
        self.reset_view(&mut notifications)?;
        self.publish(notifications);
        Ok(())
    }

    /// Updates bin values in place, keeping the selection.
    ///
    /// Bars animate from their displayed geometry to the new heights.
    pub fn refresh_data(&mut self, data: Vec<DataPoint>) -> ChartResult<()> {
        if data.len() != self.state.data().len() {
            return Err(ChartError::InvalidData(format!(
                "refresh expects {} bins, got {}",
                self.state.data().len(),
                data.len()
            )));
        }

        let data = canonicalize_bins(data);
        debug!(bins = data.len(), "refresh histogram data");

        let displayed = self.displayed_bars()?;
        let mut notifications = Notifications::default();
        notifications.state(self.state.set_data(data));
        self.schedule_bars(
            displayed,
            REFRESH_TRANSITION,
            Easing::CubicInOut,
            Duration::ZERO,
        )?;
        self.refresh_axis_tips(&mut notifications);
        self.publish(notifications);
        Ok(())
    }

    /// Rebuilds the chart from scratch and clears the selection.
    pub fn reset(&mut self) -> ChartResult<()> {
        debug!("reset histogram chart");
        let mut notifications = Notifications::default();
        self.clear_selection_into(&mut notifications);
        self.reset_view(&mut notifications)?;
        self.publish(notifications);
        Ok(())
    }

    /// Changes the canvas width.
    ///
    /// The selection keeps its bar indices; the brush is re-snapped to them
    /// in the new pixel space.
    pub fn resize(&mut self, width: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, self.state.height());
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width,
                height: viewport.height,
            });
        }
        validate_plot_area(viewport, self.state.margins())?;
        debug!(previous = self.state.width(), width, "resize histogram chart");

        let mut notifications = Notifications::default();
        notifications.state(self.state.set_width(width));
        self.reset_view(&mut notifications)?;
        self.publish(notifications);
        Ok(())
    }

    /// Drops in-flight interaction and animation, snaps the brush to the
    /// current selection and replays the bar enter animation.
    pub(super) fn reset_view(&mut self, notifications: &mut Notifications) -> ChartResult<()> {
        self.transitions.cancel_all();
        self.brush.reset();
        self.state.set_live_highlight(None);
        notifications.state(self.state.set_dragging(false));
        notifications.state(self.state.clear_hover());

        let extent = match (self.state.selection(), self.state.mapper()) {
            (Some(range), Some(mapper)) => mapper.snapped_extent(range),
            _ => BrushExtent::collapsed(),
        };
        notifications.state(self.state.set_brush_extent(extent));
        self.refresh_axis_tips(notifications);

        let animation = self.config.animation;
        self.schedule_bars(
            Vec::new(),
            animation.duration(),
            animation.easing,
            animation.bar_stagger(),
        )
    }

    /// Animates bars from `from` to the resting geometry. Missing start
    /// geometry rises from the baseline.
    fn schedule_bars(
        &mut self,
        from: Vec<BarGeometry>,
        duration: Duration,
        easing: Easing,
        stagger: Duration,
    ) -> ChartResult<()> {
        let to = self.state.bar_geometry(self.config.min_bar_height)?;
        if to.is_empty() {
            self.transitions.cancel(TransitionTarget::Bars);
            return Ok(());
        }
        self.transitions.schedule(
            TransitionTarget::Bars,
            Transition::new(TransitionValue::Bars { from, to, stagger }, duration, easing),
        );
        Ok(())
    }
}
