//! The region geometry model.
//!
//! A [`RegionData`] slot holds everything the toolkit knows about one
//! positionable entity: its declared size constraints, its anchor list, the
//! concrete geometry the solver last derived, and the back-reference set of
//! regions anchored to it. Regions live in an arena owned by
//! [`crate::UiSystem`] and are addressed by [`RegionId`].
//!
//! Shape is never stored. A region is a disk iff `radius` is set, neither
//! `width` nor `height` is set, and no non-`Center` anchor is present; it is
//! a rectangle otherwise. Both predicates are recomputed from declared state
//! on every query, so they can never disagree.

pub mod anchor;
pub(crate) mod solver;

use std::collections::HashSet;

use slotmap::new_key_type;

use gossamer_render::{Point, Rect};

use crate::frame::FrameData;
use crate::layered::LayeredData;

pub use anchor::{Anchor, AnchorPoint};

new_key_type! {
    /// A unique, stable identifier for a region in the arena.
    ///
    /// Ids remain valid across hierarchy edits and become invalid only when
    /// the region is removed from the [`crate::UiSystem`].
    pub struct RegionId;
}

/// Concrete geometry derived by the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedShape {
    /// All four corners of a rectangle.
    Rect(Rect),
    /// Center and radius of a disk.
    Disk {
        /// Disk center in canvas space.
        center: Point,
        /// Disk radius in pixels.
        radius: f32,
    },
}

impl ResolvedShape {
    /// Axis-aligned bounds of the shape.
    pub fn bounds(&self) -> Rect {
        match *self {
            ResolvedShape::Rect(rect) => rect,
            ResolvedShape::Disk { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }

    /// Whether the shape contains a canvas-space point.
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            ResolvedShape::Rect(rect) => rect.contains(point),
            ResolvedShape::Disk { center, radius } => center.distance_to(point) <= radius,
        }
    }
}

/// The concrete role of a region.
pub enum RegionKind {
    /// A frame: owns children, participates in z-order, receives input.
    Frame(FrameData),
    /// A leaf visual primitive inside a frame's draw list.
    Layered(LayeredData),
}

/// Arena slot for one region.
pub struct RegionData {
    /// Optional debug/lookup name.
    pub(crate) name: Option<String>,
    /// Owning parent frame, if attached.
    pub(crate) parent: Option<RegionId>,
    /// Explicit width; presence forces rectangle shape.
    pub(crate) width: Option<f32>,
    /// Explicit height; presence forces rectangle shape.
    pub(crate) height: Option<f32>,
    /// Explicit radius; forces disk shape when width/height are absent.
    pub(crate) radius: Option<f32>,
    /// Anchor list, most recent `set_point` first.
    pub(crate) anchors: Vec<Anchor>,
    /// Last geometry the solver derived; `None` means not drawable.
    pub(crate) resolved: Option<ResolvedShape>,
    /// Regions anchored *to* this one. Relation only, never ownership:
    /// the set exists so mutations here can re-resolve dependents.
    pub(crate) dependents: HashSet<RegionId>,
    /// The region's own shown flag (effective visibility also requires all
    /// ancestors to be shown).
    pub(crate) shown: bool,
    /// Opacity in [0, 1]; multiplied down the ancestor chain when drawing.
    pub(crate) alpha: f32,
    /// Explicit scroll-clip ancestor, set when placed inside a scroll frame.
    pub(crate) scroll_clip: Option<RegionId>,
    pub(crate) kind: RegionKind,
}

impl RegionData {
    pub(crate) fn new(kind: RegionKind) -> Self {
        Self {
            name: None,
            parent: None,
            width: None,
            height: None,
            radius: None,
            anchors: Vec::new(),
            resolved: None,
            dependents: HashSet::new(),
            shown: true,
            alpha: 1.0,
            scroll_clip: None,
            kind,
        }
    }

    /// Whether the region is currently a disk.
    ///
    /// Recomputed from declared properties on every call; mutually exclusive
    /// with [`Self::is_rect`] by construction.
    pub fn is_disk(&self) -> bool {
        self.radius.is_some()
            && self.width.is_none()
            && self.height.is_none()
            && self
                .anchors
                .iter()
                .all(|a| a.point == AnchorPoint::Center)
    }

    /// Whether the region is currently a rectangle.
    pub fn is_rect(&self) -> bool {
        !self.is_disk()
    }

    /// Whether the solver has produced valid geometry.
    pub fn can_be_drawn(&self) -> bool {
        self.resolved.is_some()
    }

    /// Canvas coordinates of one of this region's anchor points.
    ///
    /// Returns `None` while unresolved; for disks, only `Center` has
    /// coordinates.
    pub fn point_coords(&self, point: AnchorPoint) -> Option<Point> {
        match self.resolved? {
            ResolvedShape::Rect(rect) => Some(point.on_rect(&rect)),
            ResolvedShape::Disk { center, .. } => {
                (point == AnchorPoint::Center).then_some(center)
            }
        }
    }

    /// Resolved bounds, if drawable.
    pub fn rect(&self) -> Option<Rect> {
        self.resolved.map(|s| s.bounds())
    }

    /// Frame payload accessor.
    pub(crate) fn frame(&self) -> Option<&FrameData> {
        match &self.kind {
            RegionKind::Frame(f) => Some(f),
            RegionKind::Layered(_) => None,
        }
    }

    pub(crate) fn frame_mut(&mut self) -> Option<&mut FrameData> {
        match &mut self.kind {
            RegionKind::Frame(f) => Some(f),
            RegionKind::Layered(_) => None,
        }
    }

    pub(crate) fn layered(&self) -> Option<&LayeredData> {
        match &self.kind {
            RegionKind::Layered(l) => Some(l),
            RegionKind::Frame(_) => None,
        }
    }

    pub(crate) fn layered_mut(&mut self) -> Option<&mut LayeredData> {
        match &mut self.kind {
            RegionKind::Layered(l) => Some(l),
            RegionKind::Frame(_) => None,
        }
    }

    pub(crate) fn is_frame(&self) -> bool {
        matches!(self.kind, RegionKind::Frame(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gossamer_render::Size;
    use slotmap::SlotMap;

    fn dummy_id() -> RegionId {
        let mut map: SlotMap<RegionId, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn test_shape_exclusivity() {
        let mut r = RegionData::new(RegionKind::Frame(FrameData::default()));
        assert!(r.is_rect());
        assert!(!r.is_disk());

        r.radius = Some(10.0);
        assert!(r.is_disk());
        assert!(!r.is_rect());

        // Explicit width forces rectangle semantics even with a radius.
        r.width = Some(20.0);
        assert!(r.is_rect());
        assert!(!r.is_disk());
    }

    #[test]
    fn test_non_center_anchor_forces_rect() {
        let mut r = RegionData::new(RegionKind::Frame(FrameData::default()));
        r.radius = Some(10.0);
        r.anchors.push(Anchor {
            point: AnchorPoint::TopLeft,
            relative_to: dummy_id(),
            relative_point: AnchorPoint::TopLeft,
            x_ofs: 0.0,
            y_ofs: 0.0,
        });
        assert!(r.is_rect());
    }

    #[test]
    fn test_point_coords_unresolved() {
        let r = RegionData::new(RegionKind::Frame(FrameData::default()));
        assert!(!r.can_be_drawn());
        assert_eq!(r.point_coords(AnchorPoint::Center), None);
    }

    #[test]
    fn test_disk_point_coords() {
        let mut r = RegionData::new(RegionKind::Frame(FrameData::default()));
        r.radius = Some(5.0);
        r.resolved = Some(ResolvedShape::Disk {
            center: Point::new(3.0, 4.0),
            radius: 5.0,
        });
        assert_eq!(
            r.point_coords(AnchorPoint::Center),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(r.point_coords(AnchorPoint::TopLeft), None);
    }

    #[test]
    fn test_resolved_shape_contains() {
        let rect = ResolvedShape::Rect(Rect::from_center(Point::ZERO, Size::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(6.0, 0.0)));

        let disk = ResolvedShape::Disk {
            center: Point::ZERO,
            radius: 5.0,
        };
        assert!(disk.contains(Point::new(3.0, 4.0)));
        assert!(!disk.contains(Point::new(3.1, 4.1)));
    }
}
