use serde::Serialize;

use crate::core::{
    AxisScale, AxisValue, BarGeometry, BarIndexMapper, BrushExtent, ChartKind, ChartPosition,
    DataPoint, IndexRange, LinearScale, Margins, PlotArea, project_histogram_bars,
};
use crate::error::ChartResult;
use crate::interaction::HoverState;

use super::StateChange;

/// Axis values under the left and right brush handles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AxisTipValues {
    pub left: Option<AxisValue>,
    pub right: Option<AxisValue>,
}

/// Observable widget state.
///
/// Scales and the bar mapper are derived from the current fields on every
/// call and never cached, so they cannot go stale after a data or size
/// change. Setters return the resulting `StateChange`, or `None` when the
/// value did not change.
#[derive(Debug, Clone)]
pub struct ChartState {
    data: Vec<DataPoint>,
    width: u32,
    height: u32,
    canvas_height: u32,
    margins: Margins,
    selection: Option<IndexRange>,
    brush_extent: BrushExtent,
    live_highlight: Option<IndexRange>,
    dragging: bool,
    pos: ChartPosition,
    axis_tips: AxisTipValues,
    visible: bool,
    hover: HoverState,
}

impl ChartState {
    pub(super) fn new(width: u32, height: u32, margins: Margins) -> Self {
        Self {
            data: Vec::new(),
            width,
            height,
            canvas_height: height,
            margins,
            selection: None,
            brush_extent: BrushExtent::collapsed(),
            live_highlight: None,
            dragging: false,
            pos: ChartPosition::default(),
            axis_tips: AxisTipValues::default(),
            visible: true,
            hover: HoverState::default(),
        }
    }

    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas height, which `expand`/`contract` change independently of `height`.
    #[must_use]
    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    #[must_use]
    pub fn selection(&self) -> Option<IndexRange> {
        self.selection
    }

    #[must_use]
    pub fn brush_extent(&self) -> BrushExtent {
        self.brush_extent
    }

    /// Bars covered by the brush during a drag.
    #[must_use]
    pub fn live_highlight(&self) -> Option<IndexRange> {
        self.live_highlight
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn pos(&self) -> ChartPosition {
        self.pos
    }

    #[must_use]
    pub fn axis_tips(&self) -> AxisTipValues {
        self.axis_tips
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn highlighted_bar(&self) -> Option<usize> {
        self.hover.highlighted_bar
    }

    #[must_use]
    pub fn plot(&self) -> PlotArea {
        PlotArea::from_canvas(f64::from(self.width), f64::from(self.height), self.margins)
    }

    /// `plot width / bar count`, or `0` without data.
    #[must_use]
    pub fn bar_width(&self) -> f64 {
        self.mapper().map_or(0.0, BarIndexMapper::bar_width)
    }

    pub fn value_scale(&self) -> ChartResult<LinearScale> {
        LinearScale::value_scale(&self.data, self.plot())
    }

    pub fn index_scale(&self) -> ChartResult<LinearScale> {
        LinearScale::index_scale(self.plot())
    }

    #[must_use]
    pub fn mapper(&self) -> Option<BarIndexMapper> {
        let plot = self.plot();
        let index_scale = LinearScale::index_scale(plot).ok()?;
        BarIndexMapper::new(self.data.len(), plot, index_scale)
    }

    #[must_use]
    pub fn axis_scale(&self, kind: ChartKind) -> Option<AxisScale> {
        if self.data.is_empty() {
            return None;
        }
        AxisScale::from_data(kind, &self.data, self.plot()).ok()
    }

    /// Resting bar geometry for the current data and size.
    pub fn bar_geometry(&self, min_bar_height: f64) -> ChartResult<Vec<BarGeometry>> {
        project_histogram_bars(
            &self.data,
            self.mapper(),
            self.value_scale()?,
            self.plot(),
            min_bar_height,
        )
    }

    /// Brush extent edges in plot pixels.
    #[must_use]
    pub fn brush_pixels(&self) -> Option<(f64, f64)> {
        self.mapper()
            .map(|mapper| mapper.extent_to_pixels(self.brush_extent))
    }

    pub(super) fn set_data(&mut self, data: Vec<DataPoint>) -> Option<StateChange> {
        let previous_len = self.data.len();
        self.data = data;
        Some(StateChange::Data {
            previous_len,
            current_len: self.data.len(),
        })
    }

    pub(super) fn set_width(&mut self, width: u32) -> Option<StateChange> {
        replace(&mut self.width, width)
            .map(|(previous, current)| StateChange::Width { previous, current })
    }

    pub(super) fn set_canvas_height(&mut self, height: u32) -> Option<StateChange> {
        replace(&mut self.canvas_height, height)
            .map(|(previous, current)| StateChange::CanvasHeight { previous, current })
    }

    pub(super) fn set_selection(&mut self, selection: Option<IndexRange>) -> Option<StateChange> {
        replace(&mut self.selection, selection)
            .map(|(previous, current)| StateChange::Selection { previous, current })
    }

    pub(super) fn set_brush_extent(&mut self, extent: BrushExtent) -> Option<StateChange> {
        replace(&mut self.brush_extent, extent)
            .map(|(previous, current)| StateChange::BrushMoved { previous, current })
    }

    pub(super) fn set_live_highlight(&mut self, highlight: Option<IndexRange>) {
        self.live_highlight = highlight;
    }

    pub(super) fn set_dragging(&mut self, dragging: bool) -> Option<StateChange> {
        replace(&mut self.dragging, dragging)
            .map(|(previous, current)| StateChange::Dragging { previous, current })
    }

    pub(super) fn set_pos(&mut self, pos: ChartPosition) -> Option<StateChange> {
        replace(&mut self.pos, pos)
            .map(|(previous, current)| StateChange::Position { previous, current })
    }

    pub(super) fn set_axis_tips(&mut self, tips: AxisTipValues) -> Option<StateChange> {
        replace(&mut self.axis_tips, tips)
            .map(|(previous, current)| StateChange::AxisTips { previous, current })
    }

    pub(super) fn set_visible(&mut self, visible: bool) -> Option<StateChange> {
        replace(&mut self.visible, visible)
            .map(|(previous, current)| StateChange::Visibility { previous, current })
    }

    pub(super) fn hover_bar(&mut self, x: f64, y: f64, bar: usize) -> Option<StateChange> {
        let previous = self.hover.highlighted_bar;
        self.hover.on_pointer_move(x, y, Some(bar));
        highlighted_bar_change(previous, self.hover.highlighted_bar)
    }

    pub(super) fn clear_hover(&mut self) -> Option<StateChange> {
        let previous = self.hover.highlighted_bar;
        self.hover.on_pointer_leave();
        highlighted_bar_change(previous, self.hover.highlighted_bar)
    }
}

fn replace<T: Copy + PartialEq>(slot: &mut T, value: T) -> Option<(T, T)> {
    if *slot == value {
        return None;
    }
    let previous = std::mem::replace(slot, value);
    Some((previous, value))
}

fn highlighted_bar_change(previous: Option<usize>, current: Option<usize>) -> Option<StateChange> {
    (previous != current).then_some(StateChange::HighlightedBar { previous, current })
}
