use serde::Serialize;

use crate::core::{
    BarGeometry, BrushExtent, ChartKind, ChartPosition, IndexRange, PlotArea, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{AxisTipValues, HistogramChart, TransitionTarget};

/// Deterministic view of the chart for regression tests and debugging.
///
/// Bars are the resting geometry, independent of running transitions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub plot: PlotArea,
    pub kind: ChartKind,
    pub class_name: Option<String>,
    pub bar_count: usize,
    pub bar_width: f64,
    pub selection: Option<IndexRange>,
    pub brush_extent: BrushExtent,
    pub brush_pixels: Option<(f64, f64)>,
    pub dragging: bool,
    pub pos: ChartPosition,
    pub visible: bool,
    pub axis_tips: AxisTipValues,
    pub highlighted_bar: Option<usize>,
    pub bars: Vec<BarGeometry>,
    pub active_transitions: Vec<TransitionTarget>,
}

impl<R: Renderer> HistogramChart<R> {
    pub fn snapshot(&self) -> ChartResult<ChartSnapshot> {
        let state = &self.state;
        Ok(ChartSnapshot {
            viewport: Viewport::new(state.width(), state.canvas_height()),
            plot: state.plot(),
            kind: self.config.kind,
            class_name: self.config.class_name.clone(),
            bar_count: state.data().len(),
            bar_width: state.bar_width(),
            selection: state.selection(),
            brush_extent: state.brush_extent(),
            brush_pixels: state.brush_pixels(),
            dragging: state.is_dragging(),
            pos: state.pos(),
            visible: state.is_visible(),
            axis_tips: state.axis_tips(),
            highlighted_bar: state.highlighted_bar(),
            bars: state.bar_geometry(self.config.min_bar_height)?,
            active_transitions: self.transitions.active_targets(),
        })
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json(&self) -> ChartResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
