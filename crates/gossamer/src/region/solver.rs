//! The anchor constraint solver.
//!
//! Resolution is eager: every mutation that can change a region's geometry
//! (`set_point`, explicit sizing, canvas resize) re-resolves the region and
//! then sweeps the change through its dependents in a breadth-first wave.
//! Queries never trigger solving.
//!
//! Per region the solver works in canvas space:
//!  1. scan the anchor list head-first, keeping the first occurrence of each
//!     anchor-point key and skipping anchors whose target is unresolved;
//!  2. classify the known points per axis into left / center / right (and
//!     top / center / bottom) coordinates;
//!  3. deduce the missing extent per axis from explicit size, an edge pair,
//!     or an edge-center pair;
//!  4. synthesize the bottom-left corner from any known coordinate plus the
//!     extent.
//! Disks take a short path: one resolvable `Center` anchor plus the declared
//! radius.
//!
//! A region that cannot be fully determined resolves to `None` and is
//! excluded from drawing and hit testing until more constraints arrive.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use gossamer_render::{Point, Rect};

use crate::logging::targets;
use crate::region::anchor::{Anchor, AnchorPoint, XEdge, YEdge};
use crate::region::{RegionId, ResolvedShape};
use crate::UiSystem;

impl UiSystem {
    /// Resolve `id`, then propagate through its dependents breadth-first.
    ///
    /// The visited set guards against anchor cycles: each region is solved at
    /// most once per wave, so a cycle settles on the wave's first pass and
    /// terminates instead of ping-ponging.
    ///
    /// Returns whether `id` itself resolved.
    pub(crate) fn resolve(&mut self, id: RegionId) -> bool {
        let mut queue = VecDeque::new();
        let mut visited: HashSet<RegionId> = HashSet::new();
        queue.push_back(id);
        let mut root_ok = false;

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let ok = self.resolve_one(current);
            if current == id {
                root_ok = ok;
            }
            if !ok {
                continue;
            }
            let Some(region) = self.regions.get(current) else {
                continue;
            };
            for dep in &region.dependents {
                if !visited.contains(dep) {
                    queue.push_back(*dep);
                }
            }
        }
        root_ok
    }

    /// Solve a single region from its current constraints.
    fn resolve_one(&mut self, id: RegionId) -> bool {
        // The root has no anchors; it always mirrors the canvas.
        if id == self.root() {
            let rect = Rect::from_center(Point::ZERO, self.canvas_size());
            self.regions[id].resolved = Some(ResolvedShape::Rect(rect));
            return true;
        }
        let Some(region) = self.regions.get(id) else {
            return false;
        };
        let anchors = region.anchors.clone();
        let explicit_width = region.width;
        let explicit_height = region.height;
        let radius = region.radius;

        let shape = if region.is_disk() {
            radius.and_then(|r| self.solve_disk(&anchors, r))
        } else {
            self.solve_rect(&anchors, explicit_width, explicit_height)
        };

        trace!(target: targets::SOLVER, ?id, resolved = shape.is_some(), "solve");
        self.regions[id].resolved = shape;
        shape.is_some()
    }

    fn solve_disk(&self, anchors: &[Anchor], radius: f32) -> Option<ResolvedShape> {
        // First resolvable Center anchor wins; disks admit no other key.
        for a in anchors {
            let Some(base) = self.anchor_target_coords(a) else {
                continue;
            };
            return Some(ResolvedShape::Disk {
                center: Point::new(base.x + a.x_ofs, base.y + a.y_ofs),
                radius,
            });
        }
        None
    }

    fn solve_rect(
        &self,
        anchors: &[Anchor],
        explicit_width: Option<f32>,
        explicit_height: Option<f32>,
    ) -> Option<ResolvedShape> {
        // Head-first scan: the first occurrence of each anchor-point key wins,
        // which makes the most recent set_point dominate. Anchors whose target
        // is unresolved are skipped, not fatal.
        let mut known: [Option<Point>; 9] = [None; 9];
        for a in anchors {
            let slot = a.point.index();
            if known[slot].is_some() {
                continue;
            }
            let Some(base) = self.anchor_target_coords(a) else {
                continue;
            };
            known[slot] = Some(Point::new(base.x + a.x_ofs, base.y + a.y_ofs));
        }

        // Per-axis classification: first known point per edge class wins.
        let mut left = None;
        let mut center_x = None;
        let mut right = None;
        let mut top = None;
        let mut center_y = None;
        let mut bottom = None;
        for (slot, point) in known.iter().enumerate() {
            let Some(p) = point else {
                continue;
            };
            let key = AnchorPoint::ALL[slot];
            let x_slot = match key.x_edge() {
                XEdge::Left => &mut left,
                XEdge::CenterX => &mut center_x,
                XEdge::Right => &mut right,
            };
            if x_slot.is_none() {
                *x_slot = Some(p.x);
            }
            let y_slot = match key.y_edge() {
                YEdge::Top => &mut top,
                YEdge::CenterY => &mut center_y,
                YEdge::Bottom => &mut bottom,
            };
            if y_slot.is_none() {
                *y_slot = Some(p.y);
            }
        }

        let width = explicit_width.or(match (left, center_x, right) {
            (Some(l), _, Some(r)) => Some(r - l),
            (Some(l), Some(c), None) => Some((c - l) * 2.0),
            (None, Some(c), Some(r)) => Some((r - c) * 2.0),
            _ => None,
        })?;
        let height = explicit_height.or(match (bottom, center_y, top) {
            (Some(b), _, Some(t)) => Some(t - b),
            (Some(b), Some(c), None) => Some((c - b) * 2.0),
            (None, Some(c), Some(t)) => Some((t - c) * 2.0),
            _ => None,
        })?;

        let x0 = left
            .or(center_x.map(|c| c - width / 2.0))
            .or(right.map(|r| r - width))?;
        let y0 = bottom
            .or(center_y.map(|c| c - height / 2.0))
            .or(top.map(|t| t - height))?;

        Some(ResolvedShape::Rect(Rect::new(
            x0,
            y0,
            width.max(0.0),
            height.max(0.0),
        )))
    }

    /// Canvas coordinates of an anchor's target point, if its target is
    /// alive and resolved.
    fn anchor_target_coords(&self, anchor: &Anchor) -> Option<Point> {
        self.regions
            .get(anchor.relative_to)?
            .point_coords(anchor.relative_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameStrata;

    #[test]
    fn test_center_anchor_with_explicit_size() {
        let mut ui = UiSystem::new(800.0, 600.0);
        let f = ui.create_frame(None);
        ui.set_size(f, 100.0, 50.0);
        ui.set_point(f, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);

        assert!(ui.can_be_drawn(f));
        assert_eq!(ui.left(f), -50.0);
        assert_eq!(ui.right(f), 50.0);
        assert_eq!(ui.top(f), 25.0);
        assert_eq!(ui.bottom(f), -25.0);
    }

    #[test]
    fn test_two_corner_anchors_deduce_size() {
        let mut ui = UiSystem::new(200.0, 200.0);
        let f = ui.create_frame(None);
        ui.set_point(f, AnchorPoint::BottomLeft, ui.root(), AnchorPoint::Center, 10.0, 20.0);
        ui.set_point(f, AnchorPoint::TopRight, ui.root(), AnchorPoint::Center, 40.0, 50.0);

        assert!(ui.can_be_drawn(f));
        assert_eq!(ui.width(f), 30.0);
        assert_eq!(ui.height(f), 30.0);
        assert_eq!(ui.left(f), 10.0);
        assert_eq!(ui.bottom(f), 20.0);
    }

    #[test]
    fn test_edge_plus_center_doubles_distance() {
        let mut ui = UiSystem::new(200.0, 200.0);
        let f = ui.create_frame(None);
        ui.set_point(f, AnchorPoint::Left, ui.root(), AnchorPoint::Center, 0.0, 0.0);
        ui.set_point(f, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 25.0, 0.0);
        ui.set_height(f, 10.0);

        assert!(ui.can_be_drawn(f));
        assert_eq!(ui.width(f), 50.0);
        assert_eq!(ui.left(f), 0.0);
        assert_eq!(ui.right(f), 50.0);
    }

    #[test]
    fn test_underconstrained_stays_unresolved() {
        let mut ui = UiSystem::new(200.0, 200.0);
        let f = ui.create_frame(None);
        // One corner but no extents: nothing to draw yet.
        ui.set_point(f, AnchorPoint::TopLeft, ui.root(), AnchorPoint::TopLeft, 0.0, 0.0);

        assert!(!ui.can_be_drawn(f));
        assert_eq!(ui.left(f), 0.0);
        assert_eq!(ui.width(f), 0.0);

        // The missing extents arrive; the same anchors now suffice.
        ui.set_size(f, 40.0, 20.0);
        assert!(ui.can_be_drawn(f));
        assert_eq!(ui.left(f), -100.0);
        assert_eq!(ui.top(f), 100.0);
        assert_eq!(ui.bottom(f), 80.0);
    }

    #[test]
    fn test_most_recent_set_point_wins() {
        let mut ui = UiSystem::new(200.0, 200.0);
        let f = ui.create_frame(None);
        ui.set_size(f, 10.0, 10.0);
        ui.set_point(f, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);
        ui.set_point(f, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 30.0, 0.0);

        assert_eq!(ui.center(f), Point::new(30.0, 0.0));
    }

    #[test]
    fn test_dependent_chain_propagates() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let a = ui.create_frame(None);
        let b = ui.create_frame(None);
        ui.set_size(a, 50.0, 50.0);
        ui.set_size(b, 20.0, 20.0);
        ui.set_point(a, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);
        ui.set_point(b, AnchorPoint::Left, a, AnchorPoint::Right, 5.0, 0.0);

        assert_eq!(ui.left(b), 30.0);

        // Moving the upstream frame sweeps through the dependent.
        ui.set_point(a, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 100.0, 0.0);
        assert_eq!(ui.left(b), 130.0);
    }

    #[test]
    fn test_disk_fast_path() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let d = ui.create_frame(None);
        ui.set_radius(d, 25.0);
        ui.set_point(d, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 10.0, -10.0);

        assert!(ui.can_be_drawn(d));
        assert!(ui.region(d).is_some_and(|r| r.is_disk()));
        assert_eq!(ui.center(d), Point::new(10.0, -10.0));
        assert_eq!(ui.width(d), 50.0);
    }

    #[test]
    fn test_anchor_to_unresolved_target_defers() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let a = ui.create_frame(None);
        let b = ui.create_frame(None);
        ui.set_size(b, 10.0, 10.0);
        ui.set_point(b, AnchorPoint::Center, a, AnchorPoint::Center, 0.0, 0.0);

        // `a` is unresolved, so `b` cannot resolve yet.
        assert!(!ui.can_be_drawn(b));

        ui.set_size(a, 30.0, 30.0);
        ui.set_point(a, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);

        // Resolving `a` swept the wave into `b`.
        assert!(ui.can_be_drawn(b));
        assert_eq!(ui.center(b), Point::ZERO);
    }

    #[test]
    fn test_canvas_resize_moves_anchored_frames() {
        let mut ui = UiSystem::new(100.0, 100.0);
        let f = ui.create_frame(None);
        ui.set_size(f, 10.0, 10.0);
        ui.set_point(f, AnchorPoint::TopRight, ui.root(), AnchorPoint::TopRight, 0.0, 0.0);
        assert_eq!(ui.right(f), 50.0);

        ui.resize_canvas(300.0, 300.0);
        assert_eq!(ui.right(f), 150.0);
        assert_eq!(ui.top(f), 150.0);
    }

    #[test]
    fn test_resolution_idempotent() {
        let mut ui = UiSystem::new(100.0, 100.0);
        let f = ui.create_frame(None);
        ui.set_size(f, 10.0, 10.0);
        ui.set_point(f, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 3.0, 4.0);
        let first = ui.region(f).and_then(|r| r.rect());

        ui.resolve(f);
        ui.resolve(f);
        assert_eq!(ui.region(f).and_then(|r| r.rect()), first);
        assert_eq!(ui.strata(f), Some(FrameStrata::Below));
    }
}
