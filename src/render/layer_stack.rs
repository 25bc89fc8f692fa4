use serde::{Deserialize, Serialize};

/// Paint layers of the histogram, listed back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartLayer {
    Axis,
    Grid,
    Bars,
    Brush,
    Handles,
    AxisTips,
}

impl ChartLayer {
    pub const PAINT_ORDER: [Self; 6] = [
        Self::Axis,
        Self::Grid,
        Self::Bars,
        Self::Brush,
        Self::Handles,
        Self::AxisTips,
    ];
}
