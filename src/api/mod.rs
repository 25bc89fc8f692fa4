mod axis_tip_layout;
mod chart;
mod chart_config;
mod chart_init;
mod chart_model;
mod data_controller;
mod emitter;
mod events;
mod formatter;
mod frame_builder;
mod histogram_style;
mod hover_controller;
mod layout_controller;
mod render_coordinator;
mod selection_controller;
mod snapshot_controller;
mod transitions;
mod validation;

pub use axis_tip_layout::{
    AXIS_TIP_EDGE_GUARD_PX, AXIS_TIP_HEIGHT_PX, AXIS_TIP_OFFSET_Y_PX, AXIS_TIP_PADDING_PX,
    AxisTipLayout, AxisTipPlacement, AxisTipSide, position_axis_tip,
};
pub use chart::HistogramChart;
pub use chart_config::{AnimationConfig, HandleConfig, HistogramChartConfig};
pub use chart_model::{AxisTipValues, ChartState};
pub use emitter::{EventEmitter, ListenerId, Subscription};
pub use events::{ChartEvent, StateChange};
pub use formatter::{DefaultFormatter, ValueFormatter};
pub use histogram_style::HistogramStyle;
pub use snapshot_controller::ChartSnapshot;
pub use transitions::{
    AXIS_TIP_FADE, BRUSH_TRANSITION, Easing, POSITION_TRANSITION, REFRESH_TRANSITION, Transition,
    TransitionScheduler, TransitionTarget, TransitionValue,
};

use events::Notifications;
