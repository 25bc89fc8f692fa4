use std::time::Duration;

use histogram_brush::api::{
    AXIS_TIP_FADE, AxisTipSide, BRUSH_TRANSITION, DefaultFormatter, HistogramChart,
    HistogramChartConfig, POSITION_TRANSITION, TransitionTarget, ValueFormatter,
};
use histogram_brush::core::{AxisValue, ChartPosition, DataPoint, Margins};
use histogram_brush::error::ChartError;
use histogram_brush::render::{ChartLayer, NullRenderer};

fn chart(axis_tips: bool) -> HistogramChart<NullRenderer> {
    let config = HistogramChartConfig::new(400, 70)
        .with_margins(Margins::default())
        .with_axis_tips(axis_tips);
    let mut chart = HistogramChart::new(NullRenderer::default(), config).expect("chart init");
    let data = (0..10)
        .map(|i| DataPoint::with_span(i as f64 * 10.0, (i + 1) as f64 * 10.0, 4.0))
        .collect();
    chart.replace_data(data).expect("replace data");
    while chart.advance(Duration::from_millis(50)) {}
    chart
}

#[test]
fn expand_and_contract_move_the_plot() {
    let mut chart = chart(false);

    chart.expand(30);
    assert_eq!(chart.state().canvas_height(), 100);
    assert_eq!(chart.state().pos(), ChartPosition { x: 0.0, y: 30.0 });
    assert!(chart.transitions().is_active(TransitionTarget::Position));

    chart.advance(POSITION_TRANSITION);
    assert!(chart.transitions().is_idle());

    chart.contract(70).expect("contract");
    assert_eq!(chart.state().canvas_height(), 70);
    assert_eq!(chart.state().pos(), ChartPosition::default());

    let err = chart.contract(0).expect_err("zero height must fail");
    assert!(matches!(err, ChartError::InvalidViewport { height: 0, .. }));
}

#[test]
fn second_selection_animates_from_the_displayed_brush() {
    let mut chart = chart(false);
    assert!(chart.select_range(1, 3));
    assert!(!chart.transitions().is_active(TransitionTarget::Brush));

    assert!(chart.select_range(5, 8));
    assert!(chart.transitions().is_active(TransitionTarget::Brush));

    chart.advance(BRUSH_TRANSITION / 2);
    assert!(chart.select_range(2, 4));
    let task = chart
        .transitions()
        .get(TransitionTarget::Brush)
        .expect("brush transition");
    assert_eq!(task.elapsed(), Duration::ZERO);

    chart.advance(BRUSH_TRANSITION);
    assert!(chart.transitions().is_idle());
}

#[test]
fn clear_and_resize_cancel_pending_animations() {
    let mut chart = chart(false);
    assert!(chart.select_range(1, 3));
    assert!(chart.select_range(5, 8));
    assert!(chart.transitions().is_active(TransitionTarget::Brush));

    chart.clear_selection();
    assert!(!chart.transitions().is_active(TransitionTarget::Brush));

    assert!(chart.select_range(1, 3));
    assert!(chart.select_range(5, 8));
    chart.resize(600).expect("resize");
    assert!(!chart.transitions().is_active(TransitionTarget::Brush));
    assert!(chart.transitions().is_active(TransitionTarget::Bars));
}

#[test]
fn axis_tips_track_handles_while_dragging() {
    let mut chart = chart(true);

    chart.pointer_down(100.0);
    chart.pointer_move(180.0);

    let tips = chart.state().axis_tips();
    let left = tips.left.map(AxisValue::as_f64).expect("left tip");
    let right = tips.right.map(AxisValue::as_f64).expect("right tip");
    assert!((left - 25.0).abs() <= 1e-9);
    assert!((right - 45.0).abs() <= 1e-9);
    for side in AxisTipSide::BOTH {
        assert!(chart.transitions().is_active(TransitionTarget::AxisTip(side)));
    }

    chart.advance(AXIS_TIP_FADE);
    let frame = chart.build_frame().expect("frame");
    let tips_layer = frame.layer(ChartLayer::AxisTips).expect("axis tips layer");
    assert_eq!(tips_layer.rects.len(), 2);
    assert_eq!(tips_layer.texts.len(), 2);

    chart.pointer_up(180.0);
    chart.advance(AXIS_TIP_FADE);
    let frame = chart.build_frame().expect("frame");
    assert!(
        frame
            .layer(ChartLayer::AxisTips)
            .expect("axis tips layer")
            .is_empty()
    );
}

#[test]
fn fading_axis_tips_label_the_animated_handles() {
    let mut chart = chart(true);

    chart.pointer_down(90.0);
    chart.pointer_move(170.0);
    chart.advance(AXIS_TIP_FADE);
    chart.pointer_up(170.0);
    assert!(chart.transitions().is_active(TransitionTarget::Brush));

    chart.advance(BRUSH_TRANSITION / 2);
    let frame = chart.build_frame().expect("frame");
    let brush = frame.layer(ChartLayer::Brush).expect("brush layer").rects[0];
    let (lo_px, hi_px) = (brush.x, brush.x + brush.width);
    assert!(lo_px > 80.0 && lo_px < 90.0);

    let texts: Vec<&str> = frame
        .layer(ChartLayer::AxisTips)
        .expect("axis tips layer")
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    let formatter = DefaultFormatter;
    // Data spans [0, 100] over 400 px.
    assert_eq!(
        texts,
        vec![
            formatter.format_number(lo_px / 4.0),
            formatter.format_number(hi_px / 4.0),
        ]
    );

    let settled_left = chart.state().axis_tips().left.expect("left tip");
    assert_ne!(texts[0], formatter.format_axis_value(settled_left));
}

#[test]
fn axis_tips_stay_hidden_when_disabled() {
    let mut chart = chart(false);

    chart.pointer_down(100.0);
    chart.pointer_move(180.0);

    assert_eq!(chart.state().axis_tips().left, None);
    let frame = chart.build_frame().expect("frame");
    assert!(
        frame
            .layer(ChartLayer::AxisTips)
            .expect("axis tips layer")
            .is_empty()
    );
}
