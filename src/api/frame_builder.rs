use crate::core::{BarGeometry, ChartKind, IndexRange, PlotArea, Viewport};
use crate::render::{
    ChartLayer, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{AXIS_TIP_PADDING_PX, AxisTipLayout, HandleConfig, HistogramStyle};

/// Gap between the plot bottom and the top of the axis labels.
const AXIS_LABEL_GAP_PX: f64 = 4.0;
/// How far handle lines extend past the plot top and bottom.
const HANDLE_LINE_OVERHANG_PX: f64 = 4.0;
const HANDLE_GRIP_SPACING_PX: f64 = 3.0;
const HANDLE_GRIP_HALF_WIDTH_PX: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct AxisLabel {
    pub x: f64,
    pub text: String,
    pub align: TextHAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct AxisTipLabel {
    pub layout: AxisTipLayout,
    pub text: String,
    pub opacity: f64,
}

/// Everything displayed in one frame. Geometry is in plot pixels and is
/// shifted by `origin` into canvas pixels.
#[derive(Debug, Clone, Copy)]
pub(super) struct FrameContext<'a> {
    pub viewport: Viewport,
    pub origin_x: f64,
    pub origin_y: f64,
    pub plot: PlotArea,
    pub kind: ChartKind,
    pub style: &'a HistogramStyle,
    pub handle: HandleConfig,
    pub divisions: &'a [f64],
    pub bars: &'a [BarGeometry],
    /// Bars inside the brush; everything else is dimmed when set.
    pub highlight: Option<IndexRange>,
    pub hovered_bar: Option<usize>,
    pub brush_px: Option<(f64, f64)>,
    pub axis_labels: &'a [AxisLabel],
    pub axis_tips: &'a [AxisTipLabel],
}

pub(super) fn build_histogram_frame(ctx: &FrameContext<'_>) -> RenderFrame {
    let mut frame = RenderFrame::new(ctx.viewport);
    push_axis_labels(&mut frame, ctx);
    push_grid(&mut frame, ctx);
    push_bars(&mut frame, ctx);
    if let Some((lo, hi)) = ctx.brush_px {
        push_brush(&mut frame, ctx, lo, hi);
        push_handles(&mut frame, ctx, lo, hi);
        push_axis_tips(&mut frame, ctx);
    }
    frame
}

fn push_grid(frame: &mut RenderFrame, ctx: &FrameContext<'_>) {
    let style = ctx.style;
    let (ox, oy) = (ctx.origin_x, ctx.origin_y);
    let width = ctx.plot.width;
    let height = ctx.plot.height;

    for y in [0.0, height / 2.0, height] {
        frame.push_line(
            ChartLayer::Grid,
            LinePrimitive::new(
                ox,
                oy + y,
                ox + width,
                oy + y,
                style.grid_line_width,
                style.grid_line_color,
            ),
        );
    }
    frame.push_line(
        ChartLayer::Grid,
        LinePrimitive::new(
            ox,
            oy + height,
            ox + (width - 1.0).max(0.0),
            oy + height,
            style.grid_line_width,
            style.grid_line_color,
        ),
    );

    if ctx.kind != ChartKind::Numeric || ctx.divisions.len() < 3 {
        return;
    }
    for &x in &ctx.divisions[1..ctx.divisions.len() - 1] {
        frame.push_line(
            ChartLayer::Grid,
            LinePrimitive::new(
                ox + x,
                oy,
                ox + x,
                oy + height,
                style.grid_line_width,
                style.grid_line_color,
            ),
        );
    }
}

fn push_axis_labels(frame: &mut RenderFrame, ctx: &FrameContext<'_>) {
    let top = ctx.origin_y + ctx.plot.height + AXIS_LABEL_GAP_PX;
    for label in ctx.axis_labels {
        if label.text.is_empty() {
            continue;
        }
        frame.push_text(
            ChartLayer::Axis,
            TextPrimitive::new(
                label.text.clone(),
                ctx.origin_x + label.x,
                top,
                ctx.style.axis_label_font_size_px,
                ctx.style.axis_label_color,
                label.align,
            ),
        );
    }
}

fn push_bars(frame: &mut RenderFrame, ctx: &FrameContext<'_>) {
    let style = ctx.style;
    for bar in ctx.bars {
        let dimmed = ctx
            .highlight
            .is_some_and(|range| !range.contains(bar.index));
        let color = if dimmed {
            style.bar_dimmed_color
        } else if ctx.hovered_bar == Some(bar.index) {
            style.bar_highlight_color
        } else {
            style.bar_color
        };
        frame.push_rect(
            ChartLayer::Bars,
            RectPrimitive::new(
                ctx.origin_x + bar.x,
                ctx.origin_y + bar.y,
                bar.width.max(0.0),
                bar.height.max(0.0),
                color,
            ),
        );
    }
}

fn push_brush(frame: &mut RenderFrame, ctx: &FrameContext<'_>, lo: f64, hi: f64) {
    frame.push_rect(
        ChartLayer::Brush,
        RectPrimitive::new(
            ctx.origin_x + lo,
            ctx.origin_y,
            (hi - lo).max(0.0),
            ctx.plot.height,
            ctx.style.brush_fill_color,
        ),
    );
}

fn push_handles(frame: &mut RenderFrame, ctx: &FrameContext<'_>, lo: f64, hi: f64) {
    let style = ctx.style;
    let handle = ctx.handle;
    let (ox, oy) = (ctx.origin_x, ctx.origin_y);
    let height = ctx.plot.height;

    for edge in [lo, hi] {
        let x = ox + edge;
        frame.push_line(
            ChartLayer::Handles,
            LinePrimitive::new(
                x,
                oy - HANDLE_LINE_OVERHANG_PX,
                x,
                oy + height + HANDLE_LINE_OVERHANG_PX,
                style.handle_line_width,
                style.handle_line_color,
            ),
        );

        if !handle.show_grips {
            continue;
        }
        let center_y = oy + height / 2.0;
        frame.push_rect(
            ChartLayer::Handles,
            RectPrimitive::new(
                x - handle.width / 2.0,
                center_y - handle.height / 2.0,
                handle.width,
                handle.height,
                style.handle_fill_color,
            )
            .with_corner_radius(handle.radius),
        );
        for step in [-1.0, 0.0, 1.0] {
            let y = center_y + step * HANDLE_GRIP_SPACING_PX;
            frame.push_line(
                ChartLayer::Handles,
                LinePrimitive::new(
                    x - HANDLE_GRIP_HALF_WIDTH_PX,
                    y,
                    x + HANDLE_GRIP_HALF_WIDTH_PX,
                    y,
                    1.0,
                    style.handle_grip_color,
                ),
            );
        }
    }
}

fn push_axis_tips(frame: &mut RenderFrame, ctx: &FrameContext<'_>) {
    let style = ctx.style;
    for tip in ctx.axis_tips {
        if tip.opacity <= 0.0 || tip.layout.width <= 0.0 || tip.text.is_empty() {
            continue;
        }
        let left = ctx.origin_x + tip.layout.left;
        let top = ctx.origin_y + tip.layout.top;
        frame.push_rect(
            ChartLayer::AxisTips,
            RectPrimitive::new(
                left,
                top,
                tip.layout.width,
                tip.layout.height,
                style.axis_tip_fill_color.faded(tip.opacity),
            ),
        );
        frame.push_text(
            ChartLayer::AxisTips,
            TextPrimitive::new(
                tip.text.clone(),
                left + AXIS_TIP_PADDING_PX / 2.0,
                top,
                style.axis_tip_font_size_px,
                style.axis_tip_text_color.faded(tip.opacity),
                TextHAlign::Left,
            ),
        );
    }
}
