// Text layout primitives for the résumé renderer.
// Implements: standard-font metrics, greedy word wrap, page geometry.

pub mod font_metrics;
pub mod wrap;

use serde::{Deserialize, Serialize};

pub use font_metrics::{FontFace, StandardMetrics, TextMeasure};
pub use wrap::wrap_lines;

/// Page dimensions and vertical rhythm, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Distance the cursor moves down after every drawn line, whatever the font size.
    pub line_height: f32,
}

impl PageGeometry {
    /// US Letter, 50pt margins, 14pt lines.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin: 50.0,
            line_height: 14.0,
        }
    }

    /// Baseline of the first line on a fresh page.
    pub fn top(&self) -> f32 {
        self.height - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}
