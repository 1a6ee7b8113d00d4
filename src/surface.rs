// Drawing surface abstraction
//
// The engine draws through the `Surface` trait: a 2-D pixel space exposing
// clear, filled-circle and stroked-line primitives. `DisplayList` is the
// retained implementation used by the terminal host; the UI layer paints its
// shapes onto a ratatui canvas every frame.

use crate::theme::Rgba;

/// Pixel dimensions of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const ZERO: Bounds = Bounds {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the bounds are at least one pixel in each direction
    ///
    /// Anything smaller means the container was not measurable yet and the
    /// engine treats the surface as unavailable.
    pub fn is_drawable(&self) -> bool {
        self.width >= 1.0 && self.height >= 1.0
    }

    /// Half-open containment: `[0, width) × [0, height)`
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }
}

/// A 2-D drawing target
pub trait Surface {
    /// Current backing-buffer dimensions
    fn bounds(&self) -> Bounds;

    /// Resize the backing buffer; previously drawn content is discarded
    fn set_bounds(&mut self, bounds: Bounds);

    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Paint a filled circle centred on `(x, y)`
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    /// Stroke a straight line from `from` to `to`
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);
}

/// A single retained drawing command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
        width: f64,
    },
}

/// Retained-mode surface: records shapes until the next clear or resize
///
/// Shapes outside the bounds are kept as-is; the painter clips them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    bounds: Bounds,
    shapes: Vec<Shape>,
}

impl DisplayList {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn circle_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Line { .. }))
            .count()
    }
}

impl Surface for DisplayList {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.shapes.clear();
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.shapes.push(Shape::Circle {
            x,
            y,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.shapes.push(Shape::Line {
            from,
            to,
            color,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_drawable() {
        assert!(!Bounds::ZERO.is_drawable());
        assert!(!Bounds::new(0.5, 10.0).is_drawable());
        assert!(Bounds::new(1.0, 1.0).is_drawable());
    }

    #[test]
    fn test_bounds_contains_is_half_open() {
        let b = Bounds::new(800.0, 600.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(799.9, 599.9));
        assert!(!b.contains(800.0, 10.0));
        assert!(!b.contains(10.0, 600.0));
        assert!(!b.contains(-0.1, 10.0));
    }

    #[test]
    fn test_display_list_records_and_clears() {
        let mut list = DisplayList::new(Bounds::new(100.0, 100.0));
        let c = Rgba::new(1, 2, 3, 1.0);
        list.fill_circle(1.0, 2.0, 3.0, c);
        list.stroke_line((0.0, 0.0), (5.0, 5.0), c, 0.5);
        assert_eq!(list.circle_count(), 1);
        assert_eq!(list.line_count(), 1);

        list.clear();
        assert!(list.shapes().is_empty());
        assert_eq!(list.bounds(), Bounds::new(100.0, 100.0));
    }

    #[test]
    fn test_resize_discards_content() {
        let mut list = DisplayList::new(Bounds::new(100.0, 100.0));
        list.fill_circle(1.0, 2.0, 3.0, Rgba::new(1, 2, 3, 1.0));
        list.set_bounds(Bounds::new(50.0, 40.0));
        assert!(list.shapes().is_empty());
        assert_eq!(list.bounds(), Bounds::new(50.0, 40.0));
    }

    #[test]
    fn test_off_surface_shapes_are_recorded() {
        let mut list = DisplayList::new(Bounds::new(10.0, 10.0));
        list.fill_circle(500.0, -20.0, 2.0, Rgba::new(1, 2, 3, 1.0));
        assert_eq!(list.circle_count(), 1);
    }
}
