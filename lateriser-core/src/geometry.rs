//! Vertical Geometry
//!
//! Elements and the viewport are reduced to vertical spans in document
//! coordinates. Horizontal position never matters here.

/// Raw measurement reported by an element: document-relative top and
/// rendered height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementGeometry {
    pub top: f64,
    pub height: f64,
}

impl ElementGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// A vertical span `[top, bottom]` in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Build the span an element occupies.
    ///
    /// A top that is not a finite number counts as 0, and so does a height
    /// that is not finite or is negative.
    pub fn from_geometry(geometry: ElementGeometry) -> Self {
        let top = if geometry.top.is_finite() { geometry.top } else { 0.0 };
        let height = if geometry.height.is_finite() && geometry.height > 0.0 {
            geometry.height
        } else {
            0.0
        };
        Self {
            top,
            bottom: top + height,
        }
    }

    /// Open-interval intersection with the window `(scroll_y, window_bottom)`.
    ///
    /// True when either edge lies strictly inside the window, or when the
    /// span covers the whole window and sticks out on both sides. An edge
    /// sitting exactly on a window boundary does not count.
    pub fn intersects(&self, scroll_y: f64, window_bottom: f64) -> bool {
        let inside = |y: f64| y > scroll_y && y < window_bottom;

        inside(self.top)
            || inside(self.bottom)
            || (scroll_y > self.top && window_bottom < self.bottom)
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_inside_window() {
        let span = Span::new(600.0, 900.0);
        assert!(span.intersects(500.0, 1300.0));
    }

    #[test]
    fn bottom_inside_window() {
        let span = Span::new(100.0, 300.0);
        assert!(span.intersects(200.0, 1000.0));
    }

    #[test]
    fn boundaries_are_exclusive() {
        // Top exactly at the window bottom.
        assert!(!Span::new(800.0, 1000.0).intersects(0.0, 800.0));
        // Bottom exactly at the scroll offset.
        assert!(!Span::new(-200.0, 0.0).intersects(0.0, 800.0));
        // Top exactly at the scroll offset, bottom exactly at the window bottom.
        assert!(!Span::new(0.0, 800.0).intersects(0.0, 800.0));
    }

    #[test]
    fn one_unit_inside_triggers() {
        assert!(Span::new(799.0, 1000.0).intersects(0.0, 800.0));
        assert!(Span::new(-200.0, 1.0).intersects(0.0, 800.0));
        assert!(Span::new(1.0, 800.0).intersects(0.0, 800.0));
    }

    #[test]
    fn full_straddle_triggers() {
        let tall = Span::new(0.0, 5000.0);
        assert!(tall.intersects(1000.0, 1800.0));
    }

    #[test]
    fn disjoint_spans_do_not_trigger() {
        assert!(!Span::new(2000.0, 2300.0).intersects(0.0, 800.0));
        assert!(!Span::new(-500.0, -100.0).intersects(0.0, 800.0));
    }

    #[test]
    fn degenerate_measurements_clamp_to_zero() {
        let span = Span::from_geometry(ElementGeometry::new(f64::NAN, 120.0));
        assert_eq!(span, Span::new(0.0, 120.0));

        let span = Span::from_geometry(ElementGeometry::new(40.0, -5.0));
        assert_eq!(span, Span::new(40.0, 40.0));
        assert_eq!(span.height(), 0.0);
    }
}
