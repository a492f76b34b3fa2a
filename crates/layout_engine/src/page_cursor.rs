//! Vertical cursor with page overflow detection
//!
//! The cursor tracks the current page and the vertical offset of the next
//! write. A page is either writable or exhausted; an exhausted page (one a
//! gap ran off the bottom of) is replaced by a fresh page on the next
//! reservation. Page breaks are emitted into the caller's instruction list
//! at the moment they happen, so the list stays in drawing order.

use crate::{DrawInstruction, LayoutError, PageGeometry, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    Writable,
    Exhausted,
}

/// Owns the current page index and vertical offset of one document build
#[derive(Debug, Clone)]
pub struct PageCursor {
    geometry: PageGeometry,
    page: usize,
    offset: f32,
    state: PageState,
}

impl PageCursor {
    /// Start at the top margin of the first page
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            page: 0,
            offset: geometry.top(),
            state: PageState::Writable,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Zero-based index of the current page
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages opened so far
    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    /// Current vertical offset from the top edge
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Space left above the bottom margin
    pub fn remaining(&self) -> f32 {
        match self.state {
            PageState::Writable => self.geometry.bottom() - self.offset,
            PageState::Exhausted => 0.0,
        }
    }

    /// Whether a block of `height` fits on the current page
    pub fn fits(&self, height: f32) -> bool {
        self.state == PageState::Writable && self.offset + height <= self.geometry.bottom()
    }

    /// Claim `height` of vertical space and return the offset to write at.
    /// Breaks to a new page first when the space is not available.
    pub fn reserve(&mut self, height: f32, out: &mut Vec<DrawInstruction>) -> Result<f32> {
        self.check_height(height)?;
        if !self.fits(height) {
            self.break_page(out);
        }
        let position = self.offset;
        self.offset += height;
        Ok(position)
    }

    /// Skip `height` of vertical space. A gap that runs past the bottom
    /// margin exhausts the page instead of carrying over to the next one.
    pub fn advance(&mut self, height: f32) -> Result<()> {
        self.check_height(height)?;
        if self.fits(height) {
            self.offset += height;
        } else {
            self.offset = self.geometry.bottom();
            self.state = PageState::Exhausted;
        }
        Ok(())
    }

    /// Break to a new page unless at least `room` is left on this one.
    /// Returns whether a break happened.
    pub fn ensure(&mut self, room: f32, out: &mut Vec<DrawInstruction>) -> Result<bool> {
        self.check_height(room)?;
        if self.fits(room) {
            return Ok(false);
        }
        self.break_page(out);
        Ok(true)
    }

    /// Unconditionally start a new page
    pub fn break_page(&mut self, out: &mut Vec<DrawInstruction>) {
        out.push(DrawInstruction::PageBreak);
        self.page += 1;
        self.offset = self.geometry.top();
        self.state = PageState::Writable;
        tracing::trace!(page = self.page, "page break");
    }

    fn check_height(&self, height: f32) -> Result<()> {
        if !(height >= 0.0 && height.is_finite()) {
            return Err(LayoutError::InvalidHeight(height));
        }
        let available = self.geometry.usable_height();
        if height > available {
            return Err(LayoutError::BlockTooTall { height, available });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geometry() -> PageGeometry {
        PageGeometry::new(100.0, 100.0, 10.0)
    }

    fn breaks(out: &[DrawInstruction]) -> usize {
        out.iter().filter(|i| i.is_page_break()).count()
    }

    #[test]
    fn test_starts_at_top_margin() {
        let cursor = PageCursor::new(geometry());
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.offset(), 10.0);
        assert_eq!(cursor.remaining(), 80.0);
    }

    #[test]
    fn test_reserve_returns_write_position() {
        let mut cursor = PageCursor::new(geometry());
        let mut out = Vec::new();
        assert_eq!(cursor.reserve(15.0, &mut out).unwrap(), 10.0);
        assert_eq!(cursor.reserve(5.0, &mut out).unwrap(), 25.0);
        assert_eq!(cursor.offset(), 30.0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_reserve_breaks_on_overflow() {
        let mut cursor = PageCursor::new(geometry());
        let mut out = Vec::new();
        cursor.reserve(75.0, &mut out).unwrap();
        let y = cursor.reserve(6.0, &mut out).unwrap();
        assert_eq!(y, 10.0);
        assert_eq!(cursor.page(), 1);
        assert_eq!(breaks(&out), 1);
    }

    #[test]
    fn test_reserve_exactly_to_bottom() {
        let mut cursor = PageCursor::new(geometry());
        let mut out = Vec::new();
        cursor.reserve(80.0, &mut out).unwrap();
        assert_eq!(cursor.page(), 0);
        assert_eq!(cursor.offset(), 90.0);
    }

    #[test]
    fn test_advance_exhausts_page_without_break() {
        let mut cursor = PageCursor::new(geometry());
        let mut out = Vec::new();
        cursor.reserve(75.0, &mut out).unwrap();
        cursor.advance(10.0).unwrap();
        assert!(out.is_empty());
        assert_eq!(cursor.offset(), 90.0);
        assert_eq!(cursor.remaining(), 0.0);

        // a zero-height reservation on an exhausted page still opens a new one
        let y = cursor.reserve(0.0, &mut out).unwrap();
        assert_eq!(y, 10.0);
        assert_eq!(breaks(&out), 1);
    }

    #[test]
    fn test_break_page_after_exhausted_emits_once() {
        let mut cursor = PageCursor::new(geometry());
        let mut out = Vec::new();
        cursor.reserve(78.0, &mut out).unwrap();
        cursor.advance(10.0).unwrap();
        cursor.break_page(&mut out);
        assert_eq!(breaks(&out), 1);
        assert_eq!(cursor.page(), 1);
        assert_eq!(cursor.offset(), 10.0);
    }

    #[test]
    fn test_ensure() {
        let mut cursor = PageCursor::new(geometry());
        let mut out = Vec::new();
        assert!(!cursor.ensure(40.0, &mut out).unwrap());
        cursor.reserve(50.0, &mut out).unwrap();
        assert!(cursor.ensure(40.0, &mut out).unwrap());
        assert_eq!(cursor.offset(), 10.0);
        assert_eq!(breaks(&out), 1);
    }

    #[test]
    fn test_block_too_tall() {
        let mut cursor = PageCursor::new(geometry());
        let mut out = Vec::new();
        let err = cursor.reserve(81.0, &mut out).unwrap_err();
        assert!(matches!(err, LayoutError::BlockTooTall { .. }));
        assert!(matches!(cursor.advance(-1.0), Err(LayoutError::InvalidHeight(_))));
        assert!(out.is_empty());
    }

    proptest! {
        #[test]
        fn prop_reservations_stay_inside_margins(
            ops in prop::collection::vec((0.0f32..40.0, any::<bool>()), 1..200)
        ) {
            let g = geometry();
            let mut cursor = PageCursor::new(g);
            let mut out = Vec::new();
            for (height, is_gap) in ops {
                let page_before = cursor.page();
                if is_gap {
                    cursor.advance(height).unwrap();
                } else {
                    let breaks_before = breaks(&out);
                    let y = cursor.reserve(height, &mut out).unwrap();
                    prop_assert!(y >= g.top());
                    prop_assert!(y + height <= g.bottom());
                    // a page change is always announced by a page break
                    prop_assert_eq!(breaks(&out) - breaks_before, cursor.page() - page_before);
                }
                prop_assert!(cursor.offset() >= g.top());
                prop_assert!(cursor.offset() <= g.bottom());
            }
            prop_assert_eq!(breaks(&out), cursor.page());
        }
    }
}
