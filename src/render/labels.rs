use crate::render::graph::Drawable;
use crate::render::primitives::{Color, TextHAlign, TextPrimitive};

/// Measured label ready to be positioned in scene space.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedLabel {
    pub text: TextPrimitive,
    pub measured_width: f64,
}

impl RasterizedLabel {
    /// Places the label with its vertical center at `y`.
    #[must_use]
    pub fn placed(mut self, x: f64, y: f64, h_align: TextHAlign) -> Drawable {
        self.text.x = x;
        self.text.y = y;
        self.text.h_align = h_align;
        Drawable::Text(self.text)
    }
}

/// Turns label text into a measured drawable.
pub trait LabelFactory {
    fn measure_and_rasterize(&self, text: &str, font_size: f64, color: Color) -> RasterizedLabel;
}

/// Deterministic, backend-independent width estimate.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' | '(' | ')' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Label factory that measures with [`estimate_text_width_px`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedLabelFactory;

impl LabelFactory for EstimatedLabelFactory {
    fn measure_and_rasterize(&self, text: &str, font_size: f64, color: Color) -> RasterizedLabel {
        let lines = text.lines().map(|line| estimate_text_width_px(line, font_size));
        let measured_width = lines.fold(0.0, f64::max);
        RasterizedLabel {
            text: TextPrimitive::new(text, 0.0, 0.0, font_size, color, TextHAlign::Left),
            measured_width,
        }
    }
}
