use tracing::{debug, trace};

use crate::core::{BrushExtent, DataPoint, IndexRange};
use crate::interaction::BrushController;
use crate::render::Renderer;

use super::{
    ChartEvent, ChartState, EventEmitter, HistogramChartConfig, Notifications, StateChange,
    Subscription, TransitionScheduler, ValueFormatter,
};

/// Interactive range-selection histogram.
///
/// `HistogramChart` owns the chart state, the brush state machine, pending
/// transitions and the renderer. Hosts feed it plot-local pointer input and
/// a clock through [`HistogramChart::advance`], and observe it through
/// [`ChartEvent`] and [`StateChange`] subscriptions.
pub struct HistogramChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: HistogramChartConfig,
    pub(super) formatter: Box<dyn ValueFormatter>,
    pub(super) state: ChartState,
    pub(super) brush: BrushController,
    pub(super) transitions: TransitionScheduler,
    pub(super) events: EventEmitter<ChartEvent>,
    pub(super) state_changes: EventEmitter<StateChange>,
}

impl<R: Renderer> HistogramChart<R> {
    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &HistogramChartConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
        self.state.data()
    }

    #[must_use]
    pub fn selection(&self) -> Option<IndexRange> {
        self.state.selection()
    }

    #[must_use]
    pub fn brush_extent(&self) -> BrushExtent {
        self.state.brush_extent()
    }

    /// Brush edges in plot pixels, `None` without data.
    #[must_use]
    pub fn brush_pixels(&self) -> Option<(f64, f64)> {
        self.state.brush_pixels()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    #[must_use]
    pub fn bar_width(&self) -> f64 {
        self.state.bar_width()
    }

    #[must_use]
    pub fn transitions(&self) -> &TransitionScheduler {
        &self.transitions
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn set_formatter(&mut self, formatter: impl ValueFormatter + 'static) {
        self.formatter = Box::new(formatter);
    }

    pub fn subscribe_events<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn subscribe_state<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&StateChange) + 'static,
    {
        self.state_changes.subscribe(listener)
    }

    /// Cancels pending transitions, detaches every listener and hands the
    /// renderer back.
    #[must_use]
    pub fn destroy(mut self) -> R {
        self.transitions.cancel_all();
        self.brush.reset();
        self.events.clear();
        self.state_changes.clear();
        debug!("histogram chart destroyed");
        self.renderer
    }

    pub(super) fn publish(&self, notifications: Notifications) {
        for change in &notifications.state {
            trace!(?change, "state change");
            self.state_changes.emit(change);
        }
        for event in &notifications.events {
            debug!(?event, "chart event");
            self.events.emit(event);
        }
    }
}
