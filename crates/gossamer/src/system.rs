//! The `UiSystem` context object.
//!
//! One `UiSystem` owns everything a UI instance needs: the region arena, the
//! strata registries, the script registry and the input-router state. There
//! are no process-wide singletons; constructing two systems gives two fully
//! independent UIs, which is also what makes tests hermetic.
//!
//! The mutation API here is deliberately forgiving: operations on stale ids
//! are silent no-ops, geometry queries on unresolved regions return 0, and
//! only hierarchy edits that would corrupt the tree return an error.

use std::cmp::Ordering;

use slotmap::SlotMap;
use tracing::{debug, trace};

use gossamer_render::{Color, FontDesc, Point, Rect, RenderBackend, Size, TextureHandle};

use crate::error::{UiError, UiResult};
use crate::frame::{DragRegistration, FrameData, FrameStrata};
use crate::input::InputState;
use crate::layered::{DrawLayer, Justify, LayeredData, LayeredPayload};
use crate::logging::targets;
use crate::region::{
    Anchor, AnchorPoint, RegionData, RegionId, RegionKind, ResolvedShape,
};
use crate::script::{ScriptEvent, ScriptHandler, ScriptKind, ScriptRegistry};
use crate::strata::StrataManager;
use crate::widget::FrameController;

/// A complete, self-contained UI instance.
pub struct UiSystem {
    pub(crate) regions: SlotMap<RegionId, RegionData>,
    pub(crate) strata: StrataManager,
    pub(crate) scripts: ScriptRegistry,
    pub(crate) input: InputState,
    root: RegionId,
    canvas: Size,
}

impl UiSystem {
    /// Create a UI system with a root frame of the given canvas size.
    ///
    /// The root frame sits in the `Below` stratum, centered at the origin,
    /// and acts as the fallback hit-test target and default parent.
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        let mut regions: SlotMap<RegionId, RegionData> = SlotMap::with_key();
        let canvas = Size::new(canvas_width, canvas_height);

        let mut root_data = RegionData::new(RegionKind::Frame(FrameData {
            strata: FrameStrata::Below,
            mouse_enabled: true,
            ..FrameData::default()
        }));
        root_data.width = Some(canvas.width);
        root_data.height = Some(canvas.height);
        root_data.resolved = Some(ResolvedShape::Rect(Rect::from_center(Point::ZERO, canvas)));
        let root = regions.insert(root_data);

        let mut strata = StrataManager::default();
        strata.add(root, FrameStrata::Below, false, &regions);

        Self {
            regions,
            strata,
            scripts: ScriptRegistry::default(),
            input: InputState::default(),
            root,
            canvas,
        }
    }

    /// The root frame.
    #[inline]
    pub fn root(&self) -> RegionId {
        self.root
    }

    /// Current canvas size.
    #[inline]
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    /// Resize the canvas; the root frame and everything anchored to it
    /// follows immediately.
    pub fn resize_canvas(&mut self, width: f32, height: f32) {
        self.canvas = Size::new(width, height);
        let root = self.root;
        if let Some(r) = self.regions.get_mut(root) {
            r.width = Some(width);
            r.height = Some(height);
        }
        self.resolve(root);
    }

    /// Read access to a region slot.
    pub fn region(&self, id: RegionId) -> Option<&RegionData> {
        self.regions.get(id)
    }

    /// Whether an id still refers to a live region.
    #[inline]
    pub fn is_alive(&self, id: RegionId) -> bool {
        self.regions.contains_key(id)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a frame. With `parent == None` the frame is parented to the
    /// root. The new frame inherits its parent's stratum and sits one level
    /// above it.
    pub fn create_frame(&mut self, parent: Option<RegionId>) -> RegionId {
        let parent = parent.unwrap_or(self.root);
        let (stratum, level) = self
            .regions
            .get(parent)
            .and_then(|r| r.frame())
            .map(|f| (f.strata, f.level + 1))
            .unwrap_or((FrameStrata::Medium, 0));

        let id = self.regions.insert(RegionData::new(RegionKind::Frame(FrameData {
            strata: stratum,
            level,
            ..FrameData::default()
        })));
        self.attach(id, parent);
        let hidden = !self.is_visible(id);
        self.strata.add(id, stratum, hidden, &self.regions);
        trace!(target: targets::REGION, ?id, "frame created");
        id
    }

    /// Create a texture layered region inside `parent`'s draw list.
    pub fn create_texture(&mut self, parent: RegionId, layer: DrawLayer) -> RegionId {
        debug_assert!(
            self.regions.get(parent).is_some_and(|r| r.is_frame()),
            "layered regions need a frame parent"
        );
        let id = self
            .regions
            .insert(RegionData::new(RegionKind::Layered(LayeredData::texture(layer))));
        self.attach(id, parent);
        id
    }

    /// Create a font string layered region inside `parent`'s draw list.
    pub fn create_font_string(&mut self, parent: RegionId, layer: DrawLayer) -> RegionId {
        debug_assert!(
            self.regions.get(parent).is_some_and(|r| r.is_frame()),
            "layered regions need a frame parent"
        );
        let id = self
            .regions
            .insert(RegionData::new(RegionKind::Layered(LayeredData::text(layer))));
        self.attach(id, parent);
        id
    }

    /// Remove a region and its whole subtree from the system.
    pub fn remove_region(&mut self, id: RegionId) {
        if id == self.root || !self.regions.contains_key(id) {
            return;
        }
        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));

        if let Some(parent) = self.regions[id].parent {
            if let Some(f) = self.regions.get_mut(parent).and_then(|r| r.frame_mut()) {
                f.children.retain(|c| *c != id);
            }
        }
        for dead in doomed {
            if let Some(region) = self.regions.remove(dead) {
                if let Some(frame) = region.frame() {
                    self.strata.remove(dead, frame.strata, &self.regions);
                }
                // Drop back-references we held on anchor targets.
                for a in &region.anchors {
                    if let Some(target) = self.regions.get_mut(a.relative_to) {
                        target.dependents.remove(&dead);
                    }
                }
            }
            self.scripts.remove_region(dead);
            self.input.forget(dead);
        }
        trace!(target: targets::REGION, ?id, "region removed");
    }

    // =========================================================================
    // Naming
    // =========================================================================

    /// Set a debug name. Duplicate names are a programmer error, checked in
    /// debug builds only.
    pub fn set_name(&mut self, id: RegionId, name: impl Into<String>) {
        let name = name.into();
        debug_assert!(
            !self
                .regions
                .iter()
                .any(|(other, r)| other != id && r.name.as_deref() == Some(name.as_str())),
            "duplicate region name: {name}"
        );
        if let Some(r) = self.regions.get_mut(id) {
            r.name = Some(name);
        }
    }

    /// The region's debug name, if set.
    pub fn name(&self, id: RegionId) -> Option<&str> {
        self.regions.get(id)?.name.as_deref()
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// A region's parent.
    pub fn parent(&self, id: RegionId) -> Option<RegionId> {
        self.regions.get(id)?.parent
    }

    /// A frame's children, in creation order.
    pub fn children(&self, id: RegionId) -> Vec<RegionId> {
        self.regions
            .get(id)
            .and_then(|r| r.frame())
            .map(|f| f.children.clone())
            .unwrap_or_default()
    }

    /// All transitive descendants, depth-first.
    pub fn descendants(&self, id: RegionId) -> Vec<RegionId> {
        let mut out = Vec::new();
        let mut stack = self.children(id);
        while let Some(next) = stack.pop() {
            stack.extend(self.children(next));
            out.push(next);
        }
        out
    }

    /// The ancestor chain, nearest parent first.
    pub fn ancestors(&self, id: RegionId) -> Vec<RegionId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            out.push(p);
            current = self.parent(p);
        }
        out
    }

    /// Whether `a` is a strict ancestor of `b`.
    pub fn is_ancestor(&self, a: RegionId, b: RegionId) -> bool {
        let mut current = self.parent(b);
        while let Some(p) = current {
            if p == a {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Reparent a region. Fails if this would create a cycle or the new
    /// parent is not a frame.
    pub fn set_parent(&mut self, id: RegionId, new_parent: RegionId) -> UiResult<()> {
        if !self.regions.contains_key(id) || !self.regions.contains_key(new_parent) {
            return Err(UiError::InvalidRegionId);
        }
        if !self.regions[new_parent].is_frame() {
            return Err(UiError::NotAFrame);
        }
        if id == new_parent || self.is_ancestor(id, new_parent) {
            return Err(UiError::CircularParentage);
        }

        let was_attached = self.is_attached(id);
        if let Some(old) = self.regions[id].parent {
            if let Some(f) = self.regions.get_mut(old).and_then(|r| r.frame_mut()) {
                f.children.retain(|c| *c != id);
            }
        }
        self.attach(id, new_parent);
        if !was_attached {
            self.attach_subtree_to_strata(id);
        }
        self.refresh_visibility(id);
        Ok(())
    }

    /// Detach a region from the render and hit-test trees.
    ///
    /// Also clears the region's anchor points (dropping the back-references
    /// it held on other regions). The region and its subtree stay alive and
    /// can be reattached with `set_parent`.
    pub fn remove_parent(&mut self, id: RegionId) {
        if id == self.root {
            return;
        }
        let Some(parent) = self.regions.get(id).and_then(|r| r.parent) else {
            return;
        };
        if let Some(f) = self.regions.get_mut(parent).and_then(|r| r.frame_mut()) {
            f.children.retain(|c| *c != id);
        }
        self.regions[id].parent = None;
        self.clear_all_points(id);
        self.detach_subtree_from_strata(id);
    }

    fn attach(&mut self, id: RegionId, parent: RegionId) {
        self.regions[id].parent = Some(parent);
        if let Some(f) = self.regions.get_mut(parent).and_then(|r| r.frame_mut()) {
            f.children.push(id);
        }
    }

    /// Whether the region's ancestor chain reaches the root.
    fn is_attached(&self, id: RegionId) -> bool {
        id == self.root || self.ancestors(id).last() == Some(&self.root)
    }

    fn attach_subtree_to_strata(&mut self, id: RegionId) {
        let mut frames = vec![id];
        frames.extend(self.descendants(id));
        for f in frames {
            if let Some(frame) = self.regions.get(f).and_then(|r| r.frame()) {
                let stratum = frame.strata;
                let hidden = !self.is_visible(f);
                self.strata.add(f, stratum, hidden, &self.regions);
            }
        }
    }

    fn detach_subtree_from_strata(&mut self, id: RegionId) {
        let mut frames = vec![id];
        frames.extend(self.descendants(id));
        for f in frames {
            if let Some(frame) = self.regions.get(f).and_then(|r| r.frame()) {
                let stratum = frame.strata;
                self.strata.remove(f, stratum, &self.regions);
            }
        }
    }

    // =========================================================================
    // Anchors and sizing
    // =========================================================================

    /// Declare that `point` of this region sits at `relative_point` of
    /// `relative_to`, shifted by (`x_ofs`, `y_ofs`).
    ///
    /// The most recent declaration for a given `point` wins. Triggers an
    /// immediate resolution pass for this region and its dependents.
    pub fn set_point(
        &mut self,
        id: RegionId,
        point: AnchorPoint,
        relative_to: RegionId,
        relative_point: AnchorPoint,
        x_ofs: f32,
        y_ofs: f32,
    ) {
        debug_assert!(id != relative_to, "region anchored to itself");
        if id == relative_to
            || !self.regions.contains_key(id)
            || !self.regions.contains_key(relative_to)
        {
            return;
        }
        self.regions[id].anchors.insert(
            0,
            Anchor {
                point,
                relative_to,
                relative_point,
                x_ofs,
                y_ofs,
            },
        );
        self.regions[relative_to].dependents.insert(id);
        self.resolve(id);
    }

    /// Anchor both corners of this region to `target`, making it track
    /// `target`'s full rectangle.
    pub fn set_all_points(&mut self, id: RegionId, target: RegionId) {
        self.set_point(id, AnchorPoint::BottomLeft, target, AnchorPoint::BottomLeft, 0.0, 0.0);
        self.set_point(id, AnchorPoint::TopRight, target, AnchorPoint::TopRight, 0.0, 0.0);
    }

    /// Remove every anchor declaration, dropping the back-references held on
    /// the anchor targets. The region becomes unresolved.
    pub fn clear_all_points(&mut self, id: RegionId) {
        let Some(region) = self.regions.get_mut(id) else {
            return;
        };
        let anchors = std::mem::take(&mut region.anchors);
        region.resolved = None;
        for a in &anchors {
            if let Some(target) = self.regions.get_mut(a.relative_to) {
                target.dependents.remove(&id);
            }
        }
    }

    /// Set an explicit width; forces rectangle shape.
    pub fn set_width(&mut self, id: RegionId, width: f32) {
        if let Some(r) = self.regions.get_mut(id) {
            r.width = Some(width.max(0.0));
            self.resolve(id);
        }
    }

    /// Set an explicit height; forces rectangle shape.
    pub fn set_height(&mut self, id: RegionId, height: f32) {
        if let Some(r) = self.regions.get_mut(id) {
            r.height = Some(height.max(0.0));
            self.resolve(id);
        }
    }

    /// Set explicit width and height together.
    pub fn set_size(&mut self, id: RegionId, width: f32, height: f32) {
        if let Some(r) = self.regions.get_mut(id) {
            r.width = Some(width.max(0.0));
            r.height = Some(height.max(0.0));
            self.resolve(id);
        }
    }

    /// Set an explicit radius; with no explicit width/height and only
    /// `Center` anchors this makes the region a disk.
    pub fn set_radius(&mut self, id: RegionId, radius: f32) {
        if let Some(r) = self.regions.get_mut(id) {
            r.radius = Some(radius.max(0.0));
            self.resolve(id);
        }
    }

    // =========================================================================
    // Geometry queries (0-defaulting while unresolved)
    // =========================================================================

    pub(crate) fn rect_of(&self, id: RegionId) -> Option<Rect> {
        self.regions.get(id)?.rect()
    }

    /// Left edge, or 0 while unresolved.
    pub fn left(&self, id: RegionId) -> f32 {
        self.rect_of(id).map(|r| r.left()).unwrap_or(0.0)
    }

    /// Right edge, or 0 while unresolved.
    pub fn right(&self, id: RegionId) -> f32 {
        self.rect_of(id).map(|r| r.right()).unwrap_or(0.0)
    }

    /// Top edge, or 0 while unresolved.
    pub fn top(&self, id: RegionId) -> f32 {
        self.rect_of(id).map(|r| r.top()).unwrap_or(0.0)
    }

    /// Bottom edge, or 0 while unresolved.
    pub fn bottom(&self, id: RegionId) -> f32 {
        self.rect_of(id).map(|r| r.bottom()).unwrap_or(0.0)
    }

    /// Center point, or the origin while unresolved.
    pub fn center(&self, id: RegionId) -> Point {
        self.rect_of(id).map(|r| r.center()).unwrap_or(Point::ZERO)
    }

    /// Width: explicit if declared, else resolved, else 0.
    pub fn width(&self, id: RegionId) -> f32 {
        let Some(region) = self.regions.get(id) else {
            return 0.0;
        };
        region
            .width
            .or_else(|| region.rect().map(|r| r.width()))
            .unwrap_or(0.0)
    }

    /// Height: explicit if declared, else resolved, else 0.
    pub fn height(&self, id: RegionId) -> f32 {
        let Some(region) = self.regions.get(id) else {
            return 0.0;
        };
        region
            .height
            .or_else(|| region.rect().map(|r| r.height()))
            .unwrap_or(0.0)
    }

    /// Whether the solver has produced valid geometry for this region.
    pub fn can_be_drawn(&self, id: RegionId) -> bool {
        self.regions.get(id).is_some_and(|r| r.can_be_drawn())
    }

    /// Whether the mouse is currently inside this region's shape.
    pub fn is_mouse_over(&self, id: RegionId) -> bool {
        self.regions
            .get(id)
            .and_then(|r| r.resolved)
            .is_some_and(|s| s.contains(self.input.mouse))
    }

    // =========================================================================
    // Visibility and alpha
    // =========================================================================

    /// Show the region. Fires `Shown` when the flag actually flips.
    pub fn show(&mut self, id: RegionId) {
        let Some(r) = self.regions.get_mut(id) else {
            return;
        };
        if r.shown {
            return;
        }
        r.shown = true;
        self.refresh_visibility(id);
        self.fire(id, &ScriptEvent::Shown);
    }

    /// Hide the region. Fires `Hidden` when the flag actually flips.
    pub fn hide(&mut self, id: RegionId) {
        let Some(r) = self.regions.get_mut(id) else {
            return;
        };
        if !r.shown {
            return;
        }
        r.shown = false;
        self.refresh_visibility(id);
        self.fire(id, &ScriptEvent::Hidden);
    }

    /// The region's own shown flag.
    pub fn is_shown(&self, id: RegionId) -> bool {
        self.regions.get(id).is_some_and(|r| r.shown)
    }

    /// Effective visibility: shown, and every ancestor shown.
    pub fn is_visible(&self, id: RegionId) -> bool {
        let Some(region) = self.regions.get(id) else {
            return false;
        };
        if !region.shown {
            return false;
        }
        self.ancestors(id)
            .iter()
            .all(|a| self.regions.get(*a).is_some_and(|r| r.shown))
    }

    /// Re-derive strata hidden status for a subtree after a visibility or
    /// hierarchy change.
    fn refresh_visibility(&mut self, id: RegionId) {
        let mut frames = vec![id];
        frames.extend(self.descendants(id));
        for f in frames {
            if let Some(frame) = self.regions.get(f).and_then(|r| r.frame()) {
                let stratum = frame.strata;
                let hidden = !self.is_visible(f);
                self.strata.set_hidden(f, stratum, hidden, &self.regions);
            }
        }
    }

    /// Set the region's own opacity, silently clamped to [0, 1].
    pub fn set_alpha(&mut self, id: RegionId, alpha: f32) {
        if let Some(r) = self.regions.get_mut(id) {
            r.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// The region's own opacity.
    pub fn alpha(&self, id: RegionId) -> f32 {
        self.regions.get(id).map(|r| r.alpha).unwrap_or(1.0)
    }

    /// Opacity after multiplying down the ancestor chain.
    pub fn effective_alpha(&self, id: RegionId) -> f32 {
        let mut alpha = self.alpha(id);
        for a in self.ancestors(id) {
            alpha *= self.alpha(a);
        }
        alpha.clamp(0.0, 1.0)
    }

    // =========================================================================
    // Z-order
    // =========================================================================

    /// Move a frame to another stratum.
    pub fn set_strata(&mut self, id: RegionId, stratum: FrameStrata) {
        let Some(old) = self.regions.get(id).and_then(|r| r.frame()).map(|f| f.strata) else {
            return;
        };
        if old == stratum {
            return;
        }
        self.strata.remove(id, old, &self.regions);
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.strata = stratum;
        }
        if self.is_attached(id) {
            let hidden = !self.is_visible(id);
            self.strata.add(id, stratum, hidden, &self.regions);
        }
    }

    /// A frame's stratum.
    pub fn strata(&self, id: RegionId) -> Option<FrameStrata> {
        Some(self.regions.get(id)?.frame()?.strata)
    }

    /// Set a frame's level within its stratum.
    pub fn set_level(&mut self, id: RegionId, level: i32) {
        let Some(frame) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) else {
            return;
        };
        if frame.level == level {
            return;
        }
        frame.level = level;
        let stratum = frame.strata;
        self.strata.rebuild(stratum, &self.regions);
    }

    /// A frame's level.
    pub fn level(&self, id: RegionId) -> i32 {
        self.regions
            .get(id)
            .and_then(|r| r.frame())
            .map(|f| f.level)
            .unwrap_or(0)
    }

    /// Mark a frame as top-level: it auto-raises on primary click.
    pub fn set_top_level(&mut self, id: RegionId, top_level: bool) {
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.top_level = top_level;
        }
    }

    /// Put a frame on top of its stratum: its level becomes one more than
    /// the stratum's maximum (hidden members included), every descendant
    /// frame is forced to the same level, and only the affected strata are
    /// rebuilt.
    pub fn raise(&mut self, id: RegionId) {
        let Some(stratum) = self.strata(id) else {
            return;
        };
        let new_level = self.strata.raised_level(stratum, &self.regions);
        debug!(target: targets::STRATA, ?id, new_level, "raise");

        let mut affected = vec![stratum];
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.level = new_level;
        }
        for d in self.descendants(id) {
            if let Some(f) = self.regions.get_mut(d).and_then(|r| r.frame_mut()) {
                f.level = new_level;
                if !affected.contains(&f.strata) {
                    affected.push(f.strata);
                }
            }
        }
        for s in affected {
            self.strata.rebuild(s, &self.regions);
        }
    }

    /// Paint-order comparison between two frames: stratum ascending, then
    /// level ascending, then ancestors before descendants; unrelated frames
    /// at equal level compare equal (stable order decides).
    pub fn compare_draw_order(&self, a: RegionId, b: RegionId) -> Ordering {
        let (sa, la) = (self.strata(a), self.level(a));
        let (sb, lb) = (self.strata(b), self.level(b));
        sa.cmp(&sb).then(la.cmp(&lb)).then_with(|| {
            if self.is_ancestor(a, b) {
                Ordering::Less
            } else if self.is_ancestor(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }

    // =========================================================================
    // Frame flags
    // =========================================================================

    /// Enable or disable hit testing and click dispatch for a frame.
    pub fn set_mouse_enabled(&mut self, id: RegionId, enabled: bool) {
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.mouse_enabled = enabled;
        }
    }

    /// Whether the frame takes part in hit testing.
    pub fn is_mouse_enabled(&self, id: RegionId) -> bool {
        self.regions
            .get(id)
            .and_then(|r| r.frame())
            .map(|f| f.mouse_enabled)
            .unwrap_or(false)
    }

    /// Scissor descendants to this frame's bounds while drawing.
    pub fn set_clip_children(&mut self, id: RegionId, clip: bool) {
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.clip_children = clip;
        }
    }

    /// Assign the scroll-clip ancestor recorded on a region.
    pub(crate) fn set_scroll_clip(&mut self, id: RegionId, clip: Option<RegionId>) {
        if let Some(r) = self.regions.get_mut(id) {
            r.scroll_clip = clip;
        }
    }

    /// Register (or clear) how this frame participates in drag gestures.
    pub fn register_for_drag(&mut self, id: RegionId, registration: Option<DragRegistration>) {
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.drag = registration;
        }
    }

    /// Constrain drags of this frame to `clamp`'s bounds (`None` restores
    /// the default, the root frame).
    pub fn set_clamped_to_frame(&mut self, id: RegionId, clamp: Option<RegionId>) {
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.clamp_to = clamp;
        }
    }

    // =========================================================================
    // Controllers (widget capability objects)
    // =========================================================================

    /// Install a widget controller on a frame.
    pub fn set_controller(&mut self, id: RegionId, controller: Box<dyn FrameController>) {
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            f.controller = Some(controller);
        }
    }

    /// Temporarily take a frame's controller for a dispatch. Pair with
    /// [`Self::restore_controller`].
    pub(crate) fn take_controller(&mut self, id: RegionId) -> Option<Box<dyn FrameController>> {
        self.regions
            .get_mut(id)
            .and_then(|r| r.frame_mut())
            .and_then(|f| f.controller.take())
    }

    /// Put a taken controller back, unless the dispatch replaced it or
    /// removed the frame.
    pub(crate) fn restore_controller(&mut self, id: RegionId, controller: Box<dyn FrameController>) {
        if let Some(f) = self.regions.get_mut(id).and_then(|r| r.frame_mut()) {
            if f.controller.is_none() {
                f.controller = Some(controller);
            }
        }
    }

    /// Typed access to a frame's controller.
    pub fn controller_mut<T: FrameController>(&mut self, id: RegionId) -> Option<&mut T> {
        self.regions
            .get_mut(id)
            .and_then(|r| r.frame_mut())
            .and_then(|f| f.controller.as_mut())
            .and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    // =========================================================================
    // Scripts
    // =========================================================================

    /// Register a handler for an event kind, replacing any existing one.
    pub fn set_script(&mut self, id: RegionId, kind: ScriptKind, handler: ScriptHandler) {
        if self.regions.contains_key(id) {
            self.scripts.set(id, kind, handler);
        }
    }

    /// Remove a handler; missing handlers are a silent no-op.
    pub fn clear_script(&mut self, id: RegionId, kind: ScriptKind) {
        self.scripts.clear(id, kind);
    }

    /// Whether a handler is registered.
    pub fn has_script(&self, id: RegionId, kind: ScriptKind) -> bool {
        self.scripts.contains(id, kind)
    }

    /// Fire an event's handler on a region. Returns whether a handler ran.
    ///
    /// The handler is removed for the duration of its own call, so it may
    /// mutate the system freely, including hiding the target or installing
    /// a replacement handler.
    pub fn fire(&mut self, id: RegionId, event: &ScriptEvent) -> bool {
        if !self.regions.contains_key(id) {
            return false;
        }
        let kind = event.kind();
        let Some(mut handler) = self.scripts.take(id, kind) else {
            return false;
        };
        trace!(target: targets::SCRIPT, ?id, ?kind, "fire");
        handler(self, id, event);
        self.scripts.restore(id, kind, handler);
        true
    }

    // =========================================================================
    // Per-tick update
    // =========================================================================

    /// Advance one tick: fire every `Update` handler, then every widget
    /// controller's update hook (fades, blink cadences).
    pub fn update(&mut self, dt_ms: f32) {
        for id in self.scripts.regions_with(ScriptKind::Update) {
            if self.regions.contains_key(id) {
                self.fire(id, &ScriptEvent::Update { dt_ms });
            }
        }
        let with_controllers: Vec<RegionId> = self
            .regions
            .iter()
            .filter(|(_, r)| r.frame().is_some_and(|f| f.controller.is_some()))
            .map(|(id, _)| id)
            .collect();
        for id in with_controllers {
            if let Some(mut c) = self.take_controller(id) {
                c.on_update(self, id, dt_ms);
                self.restore_controller(id, c);
            }
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Paint the whole UI: strata ascending, frame draw order ascending,
    /// layered regions by (layer, sub-layer) within each frame.
    pub fn draw<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        for stratum in FrameStrata::ALL {
            // Draw order is rebuilt eagerly on mutation; here we only read.
            let order: Vec<RegionId> = self.strata.stratum(stratum).draw_order().to_vec();
            for frame in order {
                self.draw_frame(frame, backend);
            }
        }
    }

    fn draw_frame<B: RenderBackend + ?Sized>(&self, id: RegionId, backend: &mut B) {
        let Some(region) = self.regions.get(id) else {
            return;
        };
        let Some(frame) = region.frame() else {
            return;
        };
        if region.resolved.is_none() {
            return;
        }
        let alpha = self.effective_alpha(id);
        let clip = self.clip_rect_for(id);
        if let Some(c) = clip {
            backend.set_scissor(Some(c));
        }

        let mut layered: Vec<RegionId> = frame
            .children
            .iter()
            .copied()
            .filter(|c| {
                self.regions
                    .get(*c)
                    .is_some_and(|r| r.layered().is_some() && r.shown && r.resolved.is_some())
            })
            .collect();
        layered.sort_by_key(|c| {
            self.regions[*c]
                .layered()
                .map(|l| (l.layer, l.sub_layer))
                .unwrap_or((DrawLayer::Background, 0))
        });
        for child in layered {
            let child_region = &self.regions[child];
            self.draw_layered(child_region, alpha * child_region.alpha, backend);
        }

        if clip.is_some() {
            backend.set_scissor(None);
        }
    }

    fn draw_layered<B: RenderBackend + ?Sized>(
        &self,
        region: &RegionData,
        alpha: f32,
        backend: &mut B,
    ) {
        let Some(layered) = region.layered() else {
            return;
        };
        let Some(shape) = region.resolved else {
            return;
        };
        match &layered.payload {
            LayeredPayload::Texture { texture, color } => {
                let color = color.with_alpha_scaled(alpha);
                match (shape, texture) {
                    (ResolvedShape::Rect(rect), Some(handle)) => {
                        backend.draw_texture(*handle, rect, color);
                    }
                    (ResolvedShape::Rect(rect), None) => {
                        backend.fill_rect(rect, color);
                    }
                    (ResolvedShape::Disk { center, radius }, _) => {
                        backend.fill_disk(center, radius, color);
                    }
                }
            }
            LayeredPayload::Text {
                text,
                font,
                color,
                justify,
            } => {
                if text.is_empty() {
                    return;
                }
                let rect = shape.bounds();
                let width = backend.text_width(text, font);
                let line_height = backend.line_height(font);
                let x = match justify {
                    Justify::Left => rect.left(),
                    Justify::Center => rect.center().x - width / 2.0,
                    Justify::Right => rect.right() - width,
                };
                let y = rect.center().y - line_height / 2.0;
                backend.draw_text(text, Point::new(x, y), font, color.with_alpha_scaled(alpha));
            }
        }
    }

    /// The scissor rectangle a region draws under, if any: an explicit
    /// scroll-clip ancestor wins, else the nearest ancestor frame with
    /// `clip_children`.
    pub(crate) fn clip_rect_for(&self, id: RegionId) -> Option<Rect> {
        let mut current = Some(id);
        while let Some(c) = current {
            let region = self.regions.get(c)?;
            if let Some(sc) = region.scroll_clip {
                return self.rect_of(sc);
            }
            if c != id {
                if let Some(f) = region.frame() {
                    if f.clip_children {
                        return self.rect_of(c);
                    }
                }
            }
            current = region.parent;
        }
        None
    }

    // =========================================================================
    // Layered-region payload setters
    // =========================================================================

    /// Set a texture region's backend texture.
    pub fn set_texture(&mut self, id: RegionId, texture: Option<TextureHandle>) {
        if let Some(LayeredPayload::Texture { texture: t, .. }) = self.payload_mut(id) {
            *t = texture;
        }
    }

    /// Set a texture region's fill color (or tint, when textured).
    pub fn set_color(&mut self, id: RegionId, color: Color) {
        match self.payload_mut(id) {
            Some(LayeredPayload::Texture { color: c, .. }) => *c = color,
            Some(LayeredPayload::Text { color: c, .. }) => *c = color,
            None => {}
        }
    }

    /// Set a font string's text.
    pub fn set_text(&mut self, id: RegionId, text: impl Into<String>) {
        if let Some(LayeredPayload::Text { text: t, .. }) = self.payload_mut(id) {
            *t = text.into();
        }
    }

    /// A font string's current text.
    pub fn text(&self, id: RegionId) -> Option<&str> {
        match &self.regions.get(id)?.layered()?.payload {
            LayeredPayload::Text { text, .. } => Some(text.as_str()),
            LayeredPayload::Texture { .. } => None,
        }
    }

    /// Set a font string's font.
    pub fn set_font(&mut self, id: RegionId, font: FontDesc) {
        if let Some(LayeredPayload::Text { font: f, .. }) = self.payload_mut(id) {
            *f = font;
        }
    }

    /// Set a font string's justification.
    pub fn set_justify(&mut self, id: RegionId, justify: Justify) {
        if let Some(LayeredPayload::Text { justify: j, .. }) = self.payload_mut(id) {
            *j = justify;
        }
    }

    /// Set a layered region's sub-layer within its draw layer.
    pub fn set_sub_layer(&mut self, id: RegionId, sub_layer: i32) {
        if let Some(l) = self.regions.get_mut(id).and_then(|r| r.layered_mut()) {
            l.sub_layer = sub_layer;
        }
    }

    fn payload_mut(&mut self, id: RegionId) -> Option<&mut LayeredPayload> {
        self.regions
            .get_mut(id)
            .and_then(|r| r.layered_mut())
            .map(|l| &mut l.payload)
    }
}
