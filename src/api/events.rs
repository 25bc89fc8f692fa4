use serde::Serialize;
use smallvec::SmallVec;

use crate::core::{BrushExtent, ChartPosition, IndexRange};
use crate::interaction::HoverPayload;

use super::AxisTipValues;

/// Events host applications react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartEvent {
    /// Committed selection changed. `None` after the selection was cleared.
    RangeUpdated { range: Option<IndexRange> },
    /// Tooltip data for the bar under the pointer, `None` to hide it.
    Hover { payload: Option<HoverPayload> },
    /// A user drag or click finished with a committed range.
    OnBrushEnd { lo: usize, hi: usize },
}

/// Observable chart state transitions, each carrying previous and current values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateChange {
    Data {
        previous_len: usize,
        current_len: usize,
    },
    Width {
        previous: u32,
        current: u32,
    },
    CanvasHeight {
        previous: u32,
        current: u32,
    },
    Selection {
        previous: Option<IndexRange>,
        current: Option<IndexRange>,
    },
    Dragging {
        previous: bool,
        current: bool,
    },
    Position {
        previous: ChartPosition,
        current: ChartPosition,
    },
    AxisTips {
        previous: AxisTipValues,
        current: AxisTipValues,
    },
    BrushMoved {
        previous: BrushExtent,
        current: BrushExtent,
    },
    Visibility {
        previous: bool,
        current: bool,
    },
    HighlightedBar {
        previous: Option<usize>,
        current: Option<usize>,
    },
}

/// Notifications collected during one public operation and published once
/// the mutation is complete.
#[derive(Debug, Default)]
pub(super) struct Notifications {
    pub state: SmallVec<[StateChange; 4]>,
    pub events: SmallVec<[ChartEvent; 2]>,
}

impl Notifications {
    pub fn state(&mut self, change: Option<StateChange>) {
        if let Some(change) = change {
            self.state.push(change);
        }
    }

    pub fn event(&mut self, event: ChartEvent) {
        self.events.push(event);
    }
}
