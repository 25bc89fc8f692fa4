use tracing::debug;

use crate::core::ChartPosition;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{
    Easing, HistogramChart, Notifications, POSITION_TRANSITION, Transition, TransitionTarget,
    TransitionValue,
};

impl<R: Renderer> HistogramChart<R> {
    /// Grows the canvas by `height` and shifts the plot down by the same amount.
    pub fn expand(&mut self, height: u32) {
        let canvas_height = self.state.height().saturating_add(height);
        debug!(height, canvas_height, "expand histogram canvas");

        let mut notifications = Notifications::default();
        notifications.state(self.state.set_canvas_height(canvas_height));
        self.move_to(
            ChartPosition {
                x: 0.0,
                y: f64::from(height),
            },
            &mut notifications,
        );
        self.publish(notifications);
    }

    /// Sets the canvas height to `height` and moves the plot back to the origin.
    pub fn contract(&mut self, height: u32) -> ChartResult<()> {
        if height == 0 {
            return Err(ChartError::InvalidViewport {
                width: self.state.width(),
                height,
            });
        }
        debug!(height, "contract histogram canvas");

        let mut notifications = Notifications::default();
        notifications.state(self.state.set_canvas_height(height));
        self.move_to(ChartPosition::default(), &mut notifications);
        self.publish(notifications);
        Ok(())
    }

    pub fn show(&mut self) {
        let mut notifications = Notifications::default();
        notifications.state(self.state.set_visible(true));
        self.publish(notifications);
    }

    pub fn hide(&mut self) {
        let mut notifications = Notifications::default();
        notifications.state(self.state.set_visible(false));
        self.publish(notifications);
    }

    fn move_to(&mut self, pos: ChartPosition, notifications: &mut Notifications) {
        let from = self.displayed_position();
        notifications.state(self.state.set_pos(pos));
        if from == pos {
            self.transitions.cancel(TransitionTarget::Position);
            return;
        }
        self.transitions.schedule(
            TransitionTarget::Position,
            Transition::new(
                TransitionValue::Position { from, to: pos },
                POSITION_TRANSITION,
                Easing::CubicInOut,
            ),
        );
    }
}
