use std::f64::consts::TAU;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{BarGeometry, BrushExtent, ChartPosition};

use super::AxisTipSide;

pub const REFRESH_TRANSITION: Duration = Duration::from_millis(200);
pub const BRUSH_TRANSITION: Duration = Duration::from_millis(150);
pub const POSITION_TRANSITION: Duration = Duration::from_millis(150);
pub const AXIS_TIP_FADE: Duration = Duration::from_millis(200);

const ELASTIC_PERIOD: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
    /// Decaying oscillation that overshoots before settling on the target.
    Elastic,
}

impl Easing {
    /// Maps linear progress to eased progress. Input is clamped to `[0, 1]`
    /// and both ends are exact.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Elastic => {
                let shift = ELASTIC_PERIOD / 4.0;
                1.0 + 2f64.powf(-10.0 * t) * ((t - shift) * TAU / ELASTIC_PERIOD).sin()
            }
        }
    }
}

/// Visual element an animation drives. One pending task per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTarget {
    Bars,
    Brush,
    Position,
    AxisTip(AxisTipSide),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionValue {
    /// Bar `i` starts `i * stagger` after the task.
    Bars {
        from: Vec<BarGeometry>,
        to: Vec<BarGeometry>,
        stagger: Duration,
    },
    Brush {
        from: BrushExtent,
        to: BrushExtent,
    },
    Position {
        from: ChartPosition,
        to: ChartPosition,
    },
    Opacity {
        from: f64,
        to: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    value: TransitionValue,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl Transition {
    #[must_use]
    pub fn new(value: TransitionValue, duration: Duration, easing: Easing) -> Self {
        Self {
            value,
            duration,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn value(&self) -> &TransitionValue {
        &self.value
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Duration plus the delay of the last staggered element.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        match &self.value {
            TransitionValue::Bars { to, stagger, .. } => {
                let last_delay = stagger.saturating_mul(to.len().saturating_sub(1) as u32);
                self.duration.saturating_add(last_delay)
            }
            _ => self.duration,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    fn progress(&self, delay: Duration) -> f64 {
        let local = self.elapsed.saturating_sub(delay);
        if self.duration.is_zero() || local >= self.duration {
            return 1.0;
        }
        self.easing
            .apply(local.as_secs_f64() / self.duration.as_secs_f64())
    }

    #[must_use]
    pub fn sample_bars(&self) -> Option<Vec<BarGeometry>> {
        let TransitionValue::Bars { from, to, stagger } = &self.value else {
            return None;
        };
        let bars = to
            .iter()
            .enumerate()
            .map(|(index, target)| {
                let start = from.get(index).copied().unwrap_or_else(|| {
                    BarGeometry::collapsed(index, target.x, target.width, target.y + target.height)
                });
                let delay = stagger.saturating_mul(index as u32);
                start.lerp(*target, self.progress(delay))
            })
            .collect();
        Some(bars)
    }

    #[must_use]
    pub fn sample_brush(&self) -> Option<BrushExtent> {
        match self.value {
            TransitionValue::Brush { from, to } => {
                Some(from.lerp(to, self.progress(Duration::ZERO)))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn sample_position(&self) -> Option<ChartPosition> {
        match self.value {
            TransitionValue::Position { from, to } => {
                let t = self.progress(Duration::ZERO);
                Some(ChartPosition {
                    x: from.x + (to.x - from.x) * t,
                    y: from.y + (to.y - from.y) * t,
                })
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn sample_opacity(&self) -> Option<f64> {
        match self.value {
            TransitionValue::Opacity { from, to } => {
                let t = self.progress(Duration::ZERO);
                Some((from + (to - from) * t).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

/// Cancellable animation registry advanced by the host clock.
///
/// Scheduling a target replaces whatever was pending for it, so a new
/// animation always starts from the last displayed value of the old one.
#[derive(Debug, Clone, Default)]
pub struct TransitionScheduler {
    tasks: IndexMap<TransitionTarget, Transition>,
}

impl TransitionScheduler {
    /// Returns the task that was cancelled, if any.
    pub fn schedule(
        &mut self,
        target: TransitionTarget,
        transition: Transition,
    ) -> Option<Transition> {
        let replaced = self.tasks.shift_remove(&target);
        trace!(
            ?target,
            replaced = replaced.is_some(),
            duration_ms = transition.total_duration().as_millis() as u64,
            "schedule transition"
        );
        self.tasks.insert(target, transition);
        replaced
    }

    pub fn cancel(&mut self, target: TransitionTarget) -> bool {
        self.tasks.shift_remove(&target).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn get(&self, target: TransitionTarget) -> Option<&Transition> {
        self.tasks.get(&target)
    }

    #[must_use]
    pub fn is_active(&self, target: TransitionTarget) -> bool {
        self.tasks.contains_key(&target)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn active_targets(&self) -> Vec<TransitionTarget> {
        self.tasks.keys().copied().collect()
    }

    /// Moves every task forward by `delta` and drops finished ones.
    /// Returns the targets that completed during this step.
    pub fn advance(&mut self, delta: Duration) -> SmallVec<[TransitionTarget; 4]> {
        let mut completed = SmallVec::new();
        for (target, task) in &mut self.tasks {
            task.elapsed = task.elapsed.saturating_add(delta);
            if task.is_finished() {
                completed.push(*target);
            }
        }
        self.tasks.retain(|_, task| !task.is_finished());
        completed
    }
}
