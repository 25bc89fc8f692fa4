use tracing::trace;

use crate::core::{BarIndexMapper, bar_height};
use crate::interaction::HoverPayload;
use crate::render::Renderer;

use super::{ChartEvent, HistogramChart, Notifications};

/// Distance between the tooltip anchor and the bar top.
const HOVER_OFFSET_Y_PX: f64 = 20.0;

impl<R: Renderer> HistogramChart<R> {
    /// Tracks the pointer over the plot outside of drags.
    ///
    /// Positions outside every bar are ignored. Over a bar, the bar is
    /// highlighted and a `Hover` event carries its tooltip payload, or `None`
    /// while dragging, for empty bars and for bars outside the selection.
    pub fn hover_move(&mut self, x: f64, y: f64) {
        let Some(mapper) = self.state.mapper() else {
            return;
        };
        let Some(index) = mapper.pixel_to_index(x) else {
            trace!(x, "hover outside bars");
            return;
        };

        let payload = self.hover_payload(mapper, index);
        let mut notifications = Notifications::default();
        notifications.state(self.state.hover_bar(x, y, index));
        notifications.event(ChartEvent::Hover { payload });
        self.publish(notifications);
    }

    /// Clears the hover highlight and hides the tooltip.
    pub fn hover_leave(&mut self) {
        let mut notifications = Notifications::default();
        notifications.state(self.state.clear_hover());
        notifications.event(ChartEvent::Hover { payload: None });
        self.publish(notifications);
    }

    fn hover_payload(&self, mapper: BarIndexMapper, index: usize) -> Option<HoverPayload> {
        if self.state.is_dragging() {
            return None;
        }
        if self
            .state
            .selection()
            .is_some_and(|range| !range.contains(index))
        {
            return None;
        }
        let freq = self.state.data().get(index)?.freq;
        if freq <= 0.0 {
            return None;
        }

        let plot = self.state.plot();
        let value_scale = self.state.value_scale().ok()?;
        let height = bar_height(freq, value_scale, plot.height, self.config.min_bar_height);
        let bar_top = plot.height - height;
        let bar_width = mapper.bar_width();

        Some(HoverPayload {
            top: self.state.margins().top + self.state.pos().y + bar_top - HOVER_OFFSET_Y_PX,
            left: index as f64 * bar_width + bar_width / 2.0,
            data: self.formatter.format_number(freq),
        })
    }
}
