use serde::{Deserialize, Serialize};

/// Horizontal padding added around the measured label text.
pub const AXIS_TIP_PADDING_PX: f64 = 4.0;
/// Gap kept between a centered tip and the right plot edge.
pub const AXIS_TIP_EDGE_GUARD_PX: f64 = 2.0;
/// Tip top, measured from the plot top.
pub const AXIS_TIP_OFFSET_Y_PX: f64 = 52.0;
pub const AXIS_TIP_HEIGHT_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTipSide {
    Left,
    Right,
}

impl AxisTipSide {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTipPlacement {
    Centered,
    ClampedLeft,
    ClampedRight,
}

/// Label box placement in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTipLayout {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub placement: AxisTipPlacement,
}

impl AxisTipLayout {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }
}

/// Places a label box of `box_width` under a handle at `handle_x`.
///
/// The box is centered on the handle unless that would cross the left plot
/// edge (pinned to `0`) or come within the edge guard of the right one
/// (pinned to `plot_width - width`). Boxes wider than the plot are clipped.
#[must_use]
pub fn position_axis_tip(handle_x: f64, box_width: f64, plot_width: f64) -> AxisTipLayout {
    let plot_width = if plot_width.is_finite() {
        plot_width.max(0.0)
    } else {
        0.0
    };
    let width = if box_width.is_finite() {
        box_width.clamp(0.0, plot_width)
    } else {
        0.0
    };
    let handle_x = if handle_x.is_finite() { handle_x } else { 0.0 };
    let half = width / 2.0;

    let (left, placement) = if handle_x - half < 0.0 {
        (0.0, AxisTipPlacement::ClampedLeft)
    } else if handle_x + half + AXIS_TIP_EDGE_GUARD_PX >= plot_width {
        (plot_width - width, AxisTipPlacement::ClampedRight)
    } else {
        (handle_x - half, AxisTipPlacement::Centered)
    };

    AxisTipLayout {
        left,
        top: AXIS_TIP_OFFSET_Y_PX,
        width,
        height: AXIS_TIP_HEIGHT_PX,
        placement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_when_room_on_both_sides() {
        let layout = position_axis_tip(200.0, 40.0, 400.0);
        assert_eq!(layout.placement, AxisTipPlacement::Centered);
        assert_eq!(layout.left, 180.0);
    }

    #[test]
    fn pinned_to_left_edge_near_origin() {
        let layout = position_axis_tip(10.0, 40.0, 400.0);
        assert_eq!(layout.placement, AxisTipPlacement::ClampedLeft);
        assert_eq!(layout.left, 0.0);
    }

    #[test]
    fn pinned_to_right_edge_within_guard() {
        let layout = position_axis_tip(379.0, 40.0, 400.0);
        assert_eq!(layout.placement, AxisTipPlacement::ClampedRight);
        assert_eq!(layout.left, 360.0);
        assert_eq!(layout.right(), 400.0);
    }

    #[test]
    fn oversized_label_is_clipped_to_plot() {
        let layout = position_axis_tip(50.0, 500.0, 120.0);
        assert_eq!(layout.width, 120.0);
        assert_eq!(layout.left, 0.0);
    }
}
