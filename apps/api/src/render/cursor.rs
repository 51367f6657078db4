use crate::layout::PageGeometry;

/// Write position of the résumé renderer.
///
/// `vertical_position` is a PDF baseline (origin bottom-left), so it only
/// decreases within a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    pub page_index: usize,
    pub vertical_position: f32,
}

impl RenderCursor {
    pub fn at_top(geometry: &PageGeometry) -> Self {
        Self {
            page_index: 0,
            vertical_position: geometry.top(),
        }
    }

    /// Moves the cursor down by `dy` points.
    pub fn advance(&mut self, dy: f32) {
        self.vertical_position -= dy;
    }

    pub fn next_page(&mut self, geometry: &PageGeometry) {
        self.page_index += 1;
        self.vertical_position = geometry.top();
    }

    /// True when a baseline at the current position is inside the bottom margin.
    pub fn can_draw(&self, geometry: &PageGeometry) -> bool {
        self.vertical_position >= geometry.margin
    }

    /// True when `below` more points fit under the current position.
    pub fn fits(&self, below: f32, geometry: &PageGeometry) -> bool {
        self.vertical_position - below >= geometry.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_down_and_resets_on_new_page() {
        let g = PageGeometry::letter();
        let mut cursor = RenderCursor::at_top(&g);
        cursor.advance(14.0);
        assert_eq!(cursor.vertical_position, 728.0);

        cursor.next_page(&g);
        assert_eq!(cursor.page_index, 1);
        assert_eq!(cursor.vertical_position, 742.0);
    }

    #[test]
    fn test_bottom_margin_bounds() {
        let g = PageGeometry::letter();
        let mut cursor = RenderCursor::at_top(&g);
        cursor.vertical_position = 50.0;
        assert!(cursor.can_draw(&g));
        assert!(!cursor.fits(1.0, &g));
        cursor.advance(0.5);
        assert!(!cursor.can_draw(&g));
    }
}
