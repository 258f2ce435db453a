//! The scrollable window onto the page

use elevator_core::engine::{Document, NodeId, Viewport};

use crate::page::{px_to_row, rows_to_px, PageLayout};

/// Scroll state of the page in a terminal area.
///
/// The offset is kept in pixels so an animation can move smoothly between
/// rows; rendering rounds it to the nearest row. Offsets are clamped to the
/// scrollable range like a browser window would.
#[derive(Debug, Clone)]
pub struct PageViewport {
    layout: PageLayout,
    height: u16,
    offset: f64,
}

impl PageViewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            layout: PageLayout::build(width),
            height,
            offset: 0.0,
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// First visible row
    pub fn row(&self) -> u16 {
        px_to_row(self.offset)
    }

    /// Largest scroll offset in pixels
    pub fn max_scroll(&self) -> f64 {
        rows_to_px(self.layout.total_rows().saturating_sub(self.height))
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_scroll()
    }

    /// Move by a number of rows, negative is up
    pub fn scroll_by(&mut self, rows: i32) {
        let target = self.offset + rows as f64 * rows_to_px(1);
        self.scroll_to(target);
    }

    /// Lay the page out again for a new terminal size, keeping the
    /// reader at the same relative position.
    pub fn relayout(&mut self, width: u16, height: u16) {
        let fraction = match self.max_scroll() {
            max if max > 0.0 => self.offset / max,
            _ => 0.0,
        };
        if width != self.layout.width() {
            self.layout = PageLayout::build(width);
        }
        self.height = height;
        self.offset = (fraction * self.max_scroll()).clamp(0.0, self.max_scroll());
    }
}

impl Document for PageViewport {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.layout.element_by_id(id)
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.layout.offset_top(node)
    }

    fn offset_parent(&self, node: NodeId) -> Option<NodeId> {
        self.layout.offset_parent(node)
    }
}

impl Viewport for PageViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn scroll_to(&mut self, offset: f64) {
        self.offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_scroll())
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = PageViewport::new(80, 20);
        vp.scroll_to(-50.0);
        assert_eq!(vp.scroll_offset(), 0.0);

        vp.scroll_to(1.0e9);
        assert_eq!(vp.scroll_offset(), vp.max_scroll());
        assert!(vp.at_bottom());

        vp.scroll_to(f64::NAN);
        assert_eq!(vp.scroll_offset(), 0.0);
    }

    #[test]
    fn test_scroll_by_rows() {
        let mut vp = PageViewport::new(80, 20);
        vp.scroll_by(3);
        assert_eq!(vp.row(), 3);
        vp.scroll_by(-10);
        assert_eq!(vp.row(), 0);
    }

    #[test]
    fn test_page_taller_than_terminal_scrolls() {
        let vp = PageViewport::new(80, 20);
        assert_eq!(
            vp.max_scroll(),
            rows_to_px(vp.layout().total_rows() - 20)
        );
    }

    #[test]
    fn test_relayout_keeps_relative_position() {
        let mut vp = PageViewport::new(80, 20);
        vp.scroll_to(vp.max_scroll());
        vp.relayout(40, 30);
        assert!(vp.at_bottom());

        vp.scroll_to(0.0);
        vp.relayout(100, 10);
        assert_eq!(vp.scroll_offset(), 0.0);
    }

    #[test]
    fn test_document_delegates_to_layout() {
        let vp = PageViewport::new(80, 20);
        assert!(vp.element_by_id("elevator").is_some());
        assert!(vp.element_by_id("11").is_some());
        assert!(vp.element_by_id("12").is_none());
    }
}
