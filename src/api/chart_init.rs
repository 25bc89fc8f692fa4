use tracing::debug;

use crate::error::ChartResult;
use crate::interaction::BrushController;
use crate::render::Renderer;

use super::validation::validate_chart_config;
use super::{
    ChartState, DefaultFormatter, EventEmitter, HistogramChart, HistogramChartConfig,
    TransitionScheduler,
};

impl<R: Renderer> HistogramChart<R> {
    /// Creates a chart with no data.
    ///
    /// Fails before anything is built when `width` or `height` is missing or
    /// the remaining config cannot produce a drawable plot.
    pub fn new(renderer: R, config: HistogramChartConfig) -> ChartResult<Self> {
        let viewport = validate_chart_config(&config)?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            kind = ?config.kind,
            axis_tips = config.axis_tips,
            "create histogram chart"
        );

        Ok(Self {
            renderer,
            state: ChartState::new(viewport.width, viewport.height, config.margins),
            config,
            formatter: Box::new(DefaultFormatter),
            brush: BrushController::default(),
            transitions: TransitionScheduler::default(),
            events: EventEmitter::default(),
            state_changes: EventEmitter::default(),
        })
    }
}
