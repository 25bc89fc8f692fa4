use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartLayer, LinePrimitive, RectPrimitive, TextPrimitive};

/// Primitives painted together in one layer.
///
/// Within a layer, rects paint first, then lines, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: ChartLayer,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn empty(kind: ChartLayer) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }
}

/// Backend-agnostic scene for one chart draw pass, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    /// Frame with every layer present and empty, in paint order.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: ChartLayer::PAINT_ORDER
                .into_iter()
                .map(LayerPrimitives::empty)
                .collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: ChartLayer) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn layer_mut(&mut self, kind: ChartLayer) -> &mut LayerPrimitives {
        let position = match self.layers.iter().position(|layer| layer.kind == kind) {
            Some(position) => position,
            None => {
                self.layers.push(LayerPrimitives::empty(kind));
                self.layers.len() - 1
            }
        };
        &mut self.layers[position]
    }

    pub fn push_line(&mut self, kind: ChartLayer, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_rect(&mut self, kind: ChartLayer, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_text(&mut self, kind: ChartLayer, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for layer in &self.layers {
            for line in &layer.lines {
                line.validate()?;
            }
            for rect in &layer.rects {
                rect.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.lines.len()).sum()
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rects.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.texts.len()).sum()
    }
}
