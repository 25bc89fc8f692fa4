use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BarIndexMapper, BrushExtent, IndexRange, single_bar_range};

/// Pointer input consumed by the brush, in plot-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushInput {
    Start { x: f64 },
    Move { x: f64 },
    End { x: f64 },
    /// Host reported drag termination (pointer left the tracking surface).
    Cancel,
}

/// Brush lifecycle.
///
/// `Committing` only exists between the end of a drag and the commit
/// decision; `BrushController` never rests in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushState {
    Idle,
    Dragging {
        /// Extent edge that stays fixed while the pointer moves.
        anchor: f64,
        extent: BrushExtent,
        pointer: f64,
    },
    Committing {
        extent: BrushExtent,
        pointer: f64,
    },
}

impl BrushState {
    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Read-only geometry a transition needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushContext {
    /// `None` while the chart has no bars.
    pub mapper: Option<BarIndexMapper>,
    /// Extent currently shown, used to detect drags that grab a handle.
    pub current: BrushExtent,
    pub handle_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitKind {
    /// Zero-width interaction resolved to the bar under the pointer.
    Click,
    /// Drag too small to cross a bar boundary, widened to one bar.
    Widened,
    Drag,
}

/// Outcome of the end of a brush interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitDecision {
    Select {
        range: IndexRange,
        /// Brush extent aligned to the range's bar bounds.
        extent: BrushExtent,
        kind: CommitKind,
    },
    /// Nothing under the pointer; the brush collapses and no event fires.
    Collapse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushEffect {
    Ignored,
    Started {
        extent: BrushExtent,
    },
    Moved {
        extent: BrushExtent,
        highlight: Option<IndexRange>,
    },
    Committed(CommitDecision),
}

/// Single transition function of the brush state machine.
///
/// `End` and `Cancel` move a drag into `Committing`; callers resolve that
/// state with [`resolve_commit`].
#[must_use]
pub fn transition(
    state: BrushState,
    input: BrushInput,
    ctx: BrushContext,
) -> (BrushState, BrushEffect) {
    let Some(mapper) = ctx.mapper else {
        return match (state, input) {
            (
                BrushState::Dragging { extent, pointer, .. },
                BrushInput::End { .. } | BrushInput::Cancel,
            ) => (BrushState::Committing { extent, pointer }, BrushEffect::Ignored),
            (other, _) => (other, BrushEffect::Ignored),
        };
    };

    match (state, input) {
        (BrushState::Idle | BrushState::Dragging { .. }, BrushInput::Start { x }) => {
            let anchor = grab_anchor(mapper, ctx, x);
            let extent = BrushExtent::new(anchor, mapper.pixel_to_domain(x));
            (
                BrushState::Dragging {
                    anchor,
                    extent,
                    pointer: x,
                },
                BrushEffect::Started { extent },
            )
        }
        (BrushState::Dragging { anchor, .. }, BrushInput::Move { x }) => {
            let extent = BrushExtent::new(anchor, mapper.pixel_to_domain(x));
            (
                BrushState::Dragging {
                    anchor,
                    extent,
                    pointer: x,
                },
                BrushEffect::Moved {
                    extent,
                    highlight: mapper.highlighted_range(extent),
                },
            )
        }
        (BrushState::Dragging { anchor, .. }, BrushInput::End { x }) => {
            let extent = BrushExtent::new(anchor, mapper.pixel_to_domain(x));
            (
                BrushState::Committing { extent, pointer: x },
                BrushEffect::Ignored,
            )
        }
        (BrushState::Dragging { extent, pointer, .. }, BrushInput::Cancel) => (
            BrushState::Committing { extent, pointer },
            BrushEffect::Ignored,
        ),
        (other, _) => (other, BrushEffect::Ignored),
    }
}

// Grabbing a handle keeps the opposite edge fixed; anywhere else starts a new extent.
fn grab_anchor(mapper: BarIndexMapper, ctx: BrushContext, x: f64) -> f64 {
    let pointer_domain = mapper.pixel_to_domain(x);
    if ctx.current.is_empty() {
        return pointer_domain;
    }
    let (lo_px, hi_px) = mapper.extent_to_pixels(ctx.current);
    let reach = ctx.handle_width * 0.5;
    let to_lo = (x - lo_px).abs();
    let to_hi = (x - hi_px).abs();
    if to_hi <= reach && to_hi <= to_lo {
        ctx.current.lo
    } else if to_lo <= reach {
        ctx.current.hi
    } else {
        pointer_domain
    }
}

/// Resolves a finished interaction into a committed range.
///
/// - empty extent: the bar under `pointer`, widened to one bar
/// - bounds rounding to the same boundary: widened to one bar
/// - otherwise the rounded bounds
///
/// Widening never extends past the data end.
#[must_use]
pub fn resolve_commit(
    extent: BrushExtent,
    pointer: f64,
    mapper: Option<BarIndexMapper>,
) -> CommitDecision {
    let Some(mapper) = mapper else {
        return CommitDecision::Collapse;
    };
    let bar_count = mapper.bar_count();

    let resolved = if extent.is_empty() {
        mapper
            .pixel_to_index(pointer)
            .and_then(|index| single_bar_range(index, bar_count))
            .map(|range| (range, CommitKind::Click))
    } else {
        let (lo_px, hi_px) = mapper.extent_to_pixels(extent);
        let lo = mapper.boundary_index(lo_px);
        let hi = mapper.boundary_index(hi_px);
        if lo == hi {
            single_bar_range(lo, bar_count).map(|range| (range, CommitKind::Widened))
        } else {
            IndexRange::new(lo, hi).map(|range| (range, CommitKind::Drag))
        }
    };

    match resolved {
        Some((range, kind)) => CommitDecision::Select {
            range,
            extent: mapper.snapped_extent(range),
            kind,
        },
        None => CommitDecision::Collapse,
    }
}

/// Owns the brush state and folds `Committing` back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushController {
    state: BrushState,
}

impl Default for BrushController {
    fn default() -> Self {
        Self {
            state: BrushState::Idle,
        }
    }
}

impl BrushController {
    #[must_use]
    pub fn state(self) -> BrushState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.state.is_dragging()
    }

    /// Applies one input; a finished drag is resolved before returning.
    pub fn handle(&mut self, input: BrushInput, ctx: BrushContext) -> BrushEffect {
        let (next, effect) = transition(self.state, input, ctx);
        trace!(?input, from = ?self.state, to = ?next, "brush transition");
        self.state = next;

        if let BrushState::Committing { extent, pointer } = self.state {
            self.state = BrushState::Idle;
            return BrushEffect::Committed(resolve_commit(extent, pointer, ctx.mapper));
        }
        effect
    }

    /// Drops any in-flight drag without committing it.
    pub fn reset(&mut self) {
        self.state = BrushState::Idle;
    }
}
