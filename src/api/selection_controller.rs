use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{BrushExtent, IndexRange, single_bar_range};
use crate::interaction::{BrushContext, BrushEffect, BrushInput, CommitDecision};
use crate::render::Renderer;

use super::{
    AXIS_TIP_FADE, AxisTipSide, AxisTipValues, BRUSH_TRANSITION, ChartEvent, Easing,
    HistogramChart, Notifications, Transition, TransitionTarget, TransitionValue,
};

impl<R: Renderer> HistogramChart<R> {
    /// Selects bars `[lo, hi)` and animates the brush onto them.
    ///
    /// Bounds are clamped to the data and ordered; an empty range is widened
    /// to one bar. `(0, 0)` and charts without data are no-ops returning
    /// `false`. Emits `RangeUpdated` when the selection changes and never
    /// `OnBrushEnd`.
    pub fn select_range(&mut self, lo: usize, hi: usize) -> bool {
        if lo == 0 && hi == 0 {
            trace!("ignore empty programmatic range");
            return false;
        }
        let Some(mapper) = self.state.mapper() else {
            debug!(lo, hi, "ignore programmatic range without data");
            return false;
        };

        let bar_count = mapper.bar_count();
        let (a, b) = (lo.min(bar_count), hi.min(bar_count));
        let (a, b) = (a.min(b), a.max(b));
        let Some(range) = IndexRange::new(a, b).or_else(|| single_bar_range(a, bar_count)) else {
            return false;
        };

        debug!(lo = range.lo(), hi = range.hi(), "select range");
        let mut notifications = Notifications::default();
        if self.brush.is_dragging() {
            self.abort_drag(&mut notifications);
        }
        self.commit_range(range, mapper.snapped_extent(range), &mut notifications);
        self.publish(notifications);
        true
    }

    /// Clears the selection and collapses the brush.
    ///
    /// Emits `RangeUpdated { range: None }` when a selection existed;
    /// `OnBrushEnd` is never emitted.
    pub fn clear_selection(&mut self) {
        debug!("clear selection");
        let mut notifications = Notifications::default();
        self.clear_selection_into(&mut notifications);
        self.publish(notifications);
    }

    /// Starts a brush drag at plot x-coordinate `x`.
    pub fn pointer_down(&mut self, x: f64) {
        self.handle_brush_input(BrushInput::Start { x });
    }

    pub fn pointer_move(&mut self, x: f64) {
        self.handle_brush_input(BrushInput::Move { x });
    }

    /// Ends the drag at `x` and commits the resulting range.
    pub fn pointer_up(&mut self, x: f64) {
        self.handle_brush_input(BrushInput::End { x });
    }

    /// Ends the drag with the extent reached so far.
    pub fn pointer_cancel(&mut self) {
        self.handle_brush_input(BrushInput::Cancel);
    }

    fn handle_brush_input(&mut self, input: BrushInput) {
        let context = BrushContext {
            mapper: self.state.mapper(),
            current: self.state.brush_extent(),
            handle_width: self.config.handle.width,
        };
        let effect = self.brush.handle(input, context);

        let mut notifications = Notifications::default();
        match effect {
            BrushEffect::Ignored => trace!(?input, "brush input ignored"),
            BrushEffect::Started { extent } => {
                self.transitions.cancel(TransitionTarget::Brush);
                self.fade_axis_tips(1.0);
                notifications.state(self.state.set_dragging(true));
                notifications.state(self.state.set_brush_extent(extent));
                self.state.set_live_highlight(
                    context
                        .mapper
                        .and_then(|mapper| mapper.highlighted_range(extent)),
                );
                self.refresh_axis_tips(&mut notifications);
            }
            BrushEffect::Moved { extent, highlight } => {
                notifications.state(self.state.set_brush_extent(extent));
                self.state.set_live_highlight(highlight);
                self.refresh_axis_tips(&mut notifications);
            }
            BrushEffect::Committed(decision) => self.finish_drag(decision, &mut notifications),
        }
        self.publish(notifications);
    }

    fn finish_drag(&mut self, decision: CommitDecision, notifications: &mut Notifications) {
        self.fade_axis_tips(0.0);
        notifications.state(self.state.set_dragging(false));
        self.state.set_live_highlight(None);

        match decision {
            CommitDecision::Select {
                range,
                extent,
                kind,
            } => {
                debug!(
                    lo = range.lo(),
                    hi = range.hi(),
                    bars = range.bar_count(),
                    ?kind,
                    "brush committed"
                );
                self.commit_range(range, extent, notifications);
                notifications.event(ChartEvent::OnBrushEnd {
                    lo: range.lo(),
                    hi: range.hi(),
                });
            }
            CommitDecision::Collapse => {
                debug!("brush released outside bars");
                let restored = match (self.state.selection(), self.state.mapper()) {
                    (Some(range), Some(mapper)) => mapper.snapped_extent(range),
                    _ => BrushExtent::collapsed(),
                };
                self.animate_brush_to(restored, notifications);
                self.refresh_axis_tips(notifications);
            }
        }
    }

    fn abort_drag(&mut self, notifications: &mut Notifications) {
        self.brush.reset();
        self.fade_axis_tips(0.0);
        notifications.state(self.state.set_dragging(false));
        self.state.set_live_highlight(None);
    }

    fn commit_range(
        &mut self,
        range: IndexRange,
        extent: BrushExtent,
        notifications: &mut Notifications,
    ) {
        if let Some(change) = self.state.set_selection(Some(range)) {
            notifications.state(Some(change));
            notifications.event(ChartEvent::RangeUpdated { range: Some(range) });
        }
        self.animate_brush_to(extent, notifications);
        self.refresh_axis_tips(notifications);
    }

    pub(super) fn clear_selection_into(&mut self, notifications: &mut Notifications) {
        if self.brush.is_dragging() {
            self.abort_drag(notifications);
        }
        if let Some(change) = self.state.set_selection(None) {
            notifications.state(Some(change));
            notifications.event(ChartEvent::RangeUpdated { range: None });
        }
        self.transitions.cancel(TransitionTarget::Brush);
        self.state.set_live_highlight(None);
        notifications.state(self.state.set_brush_extent(BrushExtent::collapsed()));
        self.refresh_axis_tips(notifications);
    }

    /// Moves the brush to `extent`: instantly when the brush was empty,
    /// otherwise over the brush transition.
    fn animate_brush_to(&mut self, extent: BrushExtent, notifications: &mut Notifications) {
        let from = self.displayed_brush_extent();
        let duration = if self.state.brush_extent().is_empty() {
            Duration::ZERO
        } else {
            BRUSH_TRANSITION
        };
        notifications.state(self.state.set_brush_extent(extent));

        if duration.is_zero() || from == extent {
            self.transitions.cancel(TransitionTarget::Brush);
            return;
        }
        self.transitions.schedule(
            TransitionTarget::Brush,
            Transition::new(
                TransitionValue::Brush { from, to: extent },
                duration,
                Easing::CubicInOut,
            ),
        );
    }

    fn fade_axis_tips(&mut self, opacity: f64) {
        if !self.config.axis_tips {
            return;
        }
        for side in AxisTipSide::BOTH {
            let from = self.displayed_axis_tip_opacity(side);
            self.transitions.schedule(
                TransitionTarget::AxisTip(side),
                Transition::new(
                    TransitionValue::Opacity { from, to: opacity },
                    AXIS_TIP_FADE,
                    Easing::CubicInOut,
                ),
            );
        }
    }

    /// Recomputes the axis values under both brush edges.
    pub(super) fn refresh_axis_tips(&mut self, notifications: &mut Notifications) {
        if !self.config.axis_tips {
            return;
        }
        let values = match (self.state.mapper(), self.state.axis_scale(self.config.kind)) {
            (Some(mapper), Some(axis)) => {
                let (lo_px, hi_px) = mapper.extent_to_pixels(self.state.brush_extent());
                AxisTipValues {
                    left: Some(axis.value_at(lo_px)),
                    right: Some(axis.value_at(hi_px)),
                }
            }
            _ => AxisTipValues::default(),
        };
        notifications.state(self.state.set_axis_tips(values));
    }
}
