//! Anchor declarations: the constraint vocabulary of the layout engine.
//!
//! A region is positioned by declaring that one of its nine symbolic
//! [`AnchorPoint`]s coincides (plus an offset) with an anchor point of
//! another region. The solver in [`super::solver`] turns a region's anchor
//! list into concrete geometry.

use gossamer_render::{Point, Rect};

use super::RegionId;

/// One of the nine symbolic anchor locations on a rectangle.
///
/// For disk-shaped regions only [`AnchorPoint::Center`] is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorPoint {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Horizontal classification of an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum XEdge {
    Left,
    CenterX,
    Right,
}

/// Vertical classification of an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum YEdge {
    Top,
    CenterY,
    Bottom,
}

impl AnchorPoint {
    /// All nine points, in reading order.
    pub const ALL: [AnchorPoint; 9] = [
        AnchorPoint::TopLeft,
        AnchorPoint::Top,
        AnchorPoint::TopRight,
        AnchorPoint::Left,
        AnchorPoint::Center,
        AnchorPoint::Right,
        AnchorPoint::BottomLeft,
        AnchorPoint::Bottom,
        AnchorPoint::BottomRight,
    ];

    /// Index into per-point tables, following [`Self::ALL`] order.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Which vertical edge (or center line) this point's x coordinate names.
    pub(crate) fn x_edge(self) -> XEdge {
        match self {
            AnchorPoint::TopLeft | AnchorPoint::Left | AnchorPoint::BottomLeft => XEdge::Left,
            AnchorPoint::Top | AnchorPoint::Center | AnchorPoint::Bottom => XEdge::CenterX,
            AnchorPoint::TopRight | AnchorPoint::Right | AnchorPoint::BottomRight => XEdge::Right,
        }
    }

    /// Which horizontal edge (or center line) this point's y coordinate names.
    pub(crate) fn y_edge(self) -> YEdge {
        match self {
            AnchorPoint::TopLeft | AnchorPoint::Top | AnchorPoint::TopRight => YEdge::Top,
            AnchorPoint::Left | AnchorPoint::Center | AnchorPoint::Right => YEdge::CenterY,
            AnchorPoint::BottomLeft | AnchorPoint::Bottom | AnchorPoint::BottomRight => {
                YEdge::Bottom
            }
        }
    }

    /// The coordinates of this anchor point on a concrete rectangle.
    pub fn on_rect(self, rect: &Rect) -> Point {
        let x = match self.x_edge() {
            XEdge::Left => rect.left(),
            XEdge::CenterX => rect.center().x,
            XEdge::Right => rect.right(),
        };
        let y = match self.y_edge() {
            YEdge::Top => rect.top(),
            YEdge::CenterY => rect.center().y,
            YEdge::Bottom => rect.bottom(),
        };
        Point::new(x, y)
    }
}

/// An immutable positional constraint: "my `point` sits at `relative_to`'s
/// `relative_point`, shifted by (`x_ofs`, `y_ofs`)".
///
/// A region holds an ordered list of anchors. The list is *prepended* on
/// every `set_point` call and scanned head-first during resolution with the
/// first occurrence of each `point` key winning, so the most recent
/// `set_point` for a given point dominates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// The anchor point on the owning region.
    pub point: AnchorPoint,
    /// The region this anchor is relative to.
    pub relative_to: RegionId,
    /// The anchor point on `relative_to`.
    pub relative_point: AnchorPoint,
    /// Horizontal offset, in canvas pixels.
    pub x_ofs: f32,
    /// Vertical offset, in canvas pixels (Y up).
    pub y_ofs: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gossamer_render::Size;

    #[test]
    fn test_points_on_rect() {
        let r = Rect::from_center(Point::ZERO, Size::new(100.0, 50.0));
        assert_eq!(AnchorPoint::TopLeft.on_rect(&r), Point::new(-50.0, 25.0));
        assert_eq!(AnchorPoint::Center.on_rect(&r), Point::ZERO);
        assert_eq!(AnchorPoint::Bottom.on_rect(&r), Point::new(0.0, -25.0));
        assert_eq!(
            AnchorPoint::BottomRight.on_rect(&r),
            Point::new(50.0, -25.0)
        );
    }

    #[test]
    fn test_edge_classification() {
        assert_eq!(AnchorPoint::Left.x_edge(), XEdge::Left);
        assert_eq!(AnchorPoint::Left.y_edge(), YEdge::CenterY);
        assert_eq!(AnchorPoint::Top.x_edge(), XEdge::CenterX);
        assert_eq!(AnchorPoint::BottomRight.y_edge(), YEdge::Bottom);
    }
}
