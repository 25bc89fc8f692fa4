mod brush;
mod hover;

pub use brush::{
    BrushContext, BrushController, BrushEffect, BrushInput, BrushState, CommitDecision,
    CommitKind, resolve_commit, transition,
};
pub use hover::{HoverPayload, HoverState};
