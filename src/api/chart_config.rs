use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, Margins};
use crate::error::{ChartError, ChartResult};

use super::{Easing, HistogramStyle};

/// Bar enter/reset animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Delay added per bar index, so bars rise left to right.
    pub bar_stagger_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750,
            easing: Easing::Elastic,
            bar_stagger_ms: 10,
        }
    }
}

impl AnimationConfig {
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[must_use]
    pub fn bar_stagger(self) -> Duration {
        Duration::from_millis(self.bar_stagger_ms)
    }
}

/// Brush handle geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleConfig {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    /// Draws the rounded grab box with grip lines on each handle.
    pub show_grips: bool,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 23.0,
            radius: 3.0,
            show_grips: true,
        }
    }
}

/// Chart bootstrap configuration.
///
/// `width` and `height` are required; construction fails when either is
/// missing. Everything else has a documented default so partial JSON
/// documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramChartConfig {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default = "default_margins")]
    pub margins: Margins,
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default = "default_min_bar_height")]
    pub min_bar_height: f64,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub handle: HandleConfig,
    /// Shows value labels under the brush handles while dragging.
    #[serde(default)]
    pub axis_tips: bool,
    /// Target spacing between vertical grid divisions.
    #[serde(default = "default_division_width")]
    pub division_width: f64,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub style: HistogramStyle,
}

impl Default for HistogramChartConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            margins: default_margins(),
            kind: ChartKind::default(),
            min_bar_height: default_min_bar_height(),
            animation: AnimationConfig::default(),
            handle: HandleConfig::default(),
            axis_tips: false,
            division_width: default_division_width(),
            class_name: None,
            style: HistogramStyle::default(),
        }
    }
}

impl HistogramChartConfig {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_min_bar_height(mut self, min_bar_height: f64) -> Self {
        self.min_bar_height = min_bar_height;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_handle(mut self, handle: HandleConfig) -> Self {
        self.handle = handle;
        self
    }

    #[must_use]
    pub fn with_axis_tips(mut self, enabled: bool) -> Self {
        self.axis_tips = enabled;
        self
    }

    #[must_use]
    pub fn with_division_width(mut self, division_width: f64) -> Self {
        self.division_width = division_width;
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: HistogramStyle) -> Self {
        self.style = style;
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }
}

fn default_margins() -> Margins {
    Margins::new(4.0, 4.0, 20.0, 4.0)
}

fn default_min_bar_height() -> f64 {
    2.0
}

fn default_division_width() -> f64 {
    80.0
}
