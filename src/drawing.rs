use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A single backend-agnostic drawing operation.
///
/// Coordinates follow screen convention (x right, y down). Colour, stroke
/// width, and rasterization are host concerns referencing an external
/// style, the same way material IDs reference an external palette.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawPrimitive {
    /// A straight line segment between two points.
    Line {
        /// Where the segment starts.
        start: Vec2,
        /// Where the segment ends.
        end: Vec2,
    },
    /// An axis-aligned filled square marker.
    Rect {
        /// Center of the square.
        center: Vec2,
        /// Side length.
        size: f32,
    },
}

/// The complete, engine-agnostic output of one turtle run.
///
/// An ordered list of primitives ready to be replayed by any renderer
/// (SDL, wgpu, SVG export, ...). Order is the turtle's visit order, which
/// matters to hosts that stroke incrementally or animate the drawing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Emitted primitives, in draw order.
    pub primitives: Vec<DrawPrimitive>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line segment.
    pub fn add_line(&mut self, start: Vec2, end: Vec2) {
        self.primitives.push(DrawPrimitive::Line { start, end });
    }

    /// Appends a filled square marker.
    pub fn add_rect(&mut self, center: Vec2, size: f32) {
        self.primitives.push(DrawPrimitive::Rect { center, size });
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the run produced anything at all.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Axis-aligned bounding box of everything drawn, as `(min, max)`.
    /// `None` when the drawing is empty. Hosts use this to centre and zoom.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut extend = |p: Vec2| {
            min = min.min(p);
            max = max.max(p);
        };

        for primitive in &self.primitives {
            match *primitive {
                DrawPrimitive::Line { start, end } => {
                    extend(start);
                    extend(end);
                }
                DrawPrimitive::Rect { center, size } => {
                    let half = Vec2::splat(size / 2.0);
                    extend(center - half);
                    extend(center + half);
                }
            }
        }

        if self.primitives.is_empty() {
            None
        } else {
            Some((min, max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_lines_and_rects() {
        let mut drawing = Drawing::new();
        assert_eq!(drawing.bounds(), None);

        drawing.add_line(Vec2::new(-1.0, 2.0), Vec2::new(3.0, 0.0));
        drawing.add_rect(Vec2::new(5.0, 5.0), 2.0);

        let (min, max) = drawing.bounds().unwrap();
        assert_eq!(min, Vec2::new(-1.0, 0.0));
        assert_eq!(max, Vec2::new(6.0, 6.0));
    }
}
