use serde::{Deserialize, Serialize};

/// Hover tooltip data for the bar under the pointer.
///
/// `left` is the bar centre in plot pixels; `top` is the tooltip anchor in
/// canvas pixels, already offset above the bar top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverPayload {
    pub top: f64,
    pub left: f64,
    pub data: String,
}

/// Pointer tracking outside of brush drags.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub highlighted_bar: Option<usize>,
}

impl HoverState {
    /// Records the pointer; the highlight only moves when `bar` is known.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, bar: Option<usize>) {
        self.visible = true;
        self.x = x;
        self.y = y;
        if bar.is_some() {
            self.highlighted_bar = bar;
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
        self.highlighted_bar = None;
    }
}
