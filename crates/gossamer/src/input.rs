//! The input router: hit testing, click dispatch, drag sessions, hover
//! tracking, keyboard focus and wheel broadcast.
//!
//! The application loop translates its windowing events into the
//! `mouse_*` / `key_*` calls here, already in canvas coordinates (Y up,
//! origin at the canvas center). Everything downstream of that translation,
//! from hit testing to which scripts fire, is decided by the router.

use tracing::debug;

use gossamer_render::{Point, Rect};

use crate::frame::{DragRegistration, FrameStrata};
use crate::logging::targets;
use crate::region::{AnchorPoint, RegionId, ResolvedShape};
use crate::script::{MouseButton, ScriptEvent, ScriptKind};
use crate::UiSystem;

/// Per-axis distance the cursor must travel from the press before a drag
/// session starts moving its frame.
pub const DRAG_DEADZONE: f32 = 7.0;

/// Router state owned by the [`UiSystem`].
#[derive(Default)]
pub(crate) struct InputState {
    /// Last reported cursor position, canvas space.
    pub(crate) mouse: Point,
    /// Frame currently under the cursor (Enter/Leave edge detection).
    pub(crate) top_mouse: Option<RegionId>,
    /// Frame that received the most recent press; cleared on release.
    pub(crate) clicked: Option<RegionId>,
    /// Active drag session, armed at press time.
    pub(crate) drag: Option<DragSession>,
    /// Exclusive keyboard focus target.
    pub(crate) focus: Option<RegionId>,
}

impl InputState {
    /// Drop every reference to a removed region.
    pub(crate) fn forget(&mut self, id: RegionId) {
        if self.top_mouse == Some(id) {
            self.top_mouse = None;
        }
        if self.clicked == Some(id) {
            self.clicked = None;
        }
        if self.focus == Some(id) {
            self.focus = None;
        }
        if self.drag.as_ref().is_some_and(|d| d.frame == id) {
            self.drag = None;
        }
    }
}

/// An armed (and possibly active) drag gesture.
pub(crate) struct DragSession {
    /// The frame being moved (the registration target for delegated drags).
    pub(crate) frame: RegionId,
    /// Bounds the frame is kept inside.
    pub(crate) clamp: RegionId,
    /// Cursor position at press time; deadzone is measured from here.
    pub(crate) start: Point,
    /// Cursor offset from the frame's reference point (bottom-left for
    /// rectangles, center for disks) at press time.
    pub(crate) grab: Point,
    /// Whether the deadzone has been crossed and the frame is moving.
    pub(crate) began: bool,
    /// The button that armed the session.
    pub(crate) button: MouseButton,
}

impl UiSystem {
    /// Last reported cursor position.
    #[inline]
    pub fn mouse_position(&self) -> Point {
        self.input.mouse
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// The frame under the cursor.
    ///
    /// Strata are scanned top-down; within the first stratum containing any
    /// qualifying frame, the last qualifying frame in draw order (the one
    /// painted on top) wins. Falls back to the root when nothing qualifies.
    pub fn top_under_mouse(&self) -> RegionId {
        let mouse = self.input.mouse;
        for stratum in FrameStrata::ALL.iter().rev() {
            let mut winner = None;
            for frame in self.strata.stratum(*stratum).draw_order() {
                if self.hit_qualifies(*frame, mouse) {
                    winner = Some(*frame);
                }
            }
            if let Some(w) = winner {
                return w;
            }
        }
        self.root()
    }

    /// Mouse-enabled, visible, resolved and containing the point.
    fn hit_qualifies(&self, id: RegionId, mouse: Point) -> bool {
        let Some(region) = self.regions.get(id) else {
            return false;
        };
        let Some(frame) = region.frame() else {
            return false;
        };
        frame.mouse_enabled
            && region.resolved.is_some_and(|s| s.contains(mouse))
            && self.is_visible(id)
    }

    /// Re-derive the top mouse frame, firing `Leave` on the old frame and
    /// `Enter` (plus controller hover) on the new one when it changed.
    fn refresh_top_mouse(&mut self) {
        let new = self.top_under_mouse();
        if self.input.top_mouse == Some(new) {
            return;
        }
        if let Some(old) = self.input.top_mouse {
            if self.regions.contains_key(old) {
                if let Some(mut c) = self.take_controller(old) {
                    c.set_hovered(self, old, false);
                    self.restore_controller(old, c);
                }
                self.fire(old, &ScriptEvent::Leave);
            }
        }
        self.input.top_mouse = Some(new);
        if let Some(mut c) = self.take_controller(new) {
            c.set_hovered(self, new, true);
            self.restore_controller(new, c);
        }
        self.fire(new, &ScriptEvent::Enter);
    }

    // =========================================================================
    // Mouse buttons
    // =========================================================================

    /// A mouse button went down at (`x`, `y`).
    pub fn mouse_pressed(&mut self, x: f32, y: f32, button: MouseButton) {
        self.input.mouse = Point::new(x, y);
        self.refresh_top_mouse();
        let target = self.input.top_mouse.unwrap_or_else(|| self.root());
        debug!(target: targets::INPUT, ?target, ?button, "press");

        // Primary clicks float top-level windows to the top of their stratum.
        if button == MouseButton::Left {
            if let Some(top_level) = self.top_level_target(target) {
                self.raise(top_level);
            }
        }

        // Widget controllers react first (state transitions, focus grabs),
        // then the frame's Click script fires either way.
        self.dispatch_controller_click(target, x, y, button);
        if self.regions.contains_key(target) {
            self.fire(target, &ScriptEvent::Click { x, y, button });
        }

        self.input.clicked = Some(target);
        self.maybe_begin_drag(target, x, y, button);
    }

    /// A mouse button came up at (`x`, `y`).
    ///
    /// `MouseUp` fires on the frame now under the cursor and, if different,
    /// on the frame that took the press, each at most once. Any armed drag
    /// session ends here, firing `DragStop` only if it actually moved.
    pub fn mouse_released(&mut self, x: f32, y: f32, button: MouseButton) {
        self.input.mouse = Point::new(x, y);
        let top = self.top_under_mouse();
        let clicked = self.input.clicked.take();

        if self.regions.contains_key(top) {
            self.fire(top, &ScriptEvent::MouseUp { x, y, button });
        }
        if let Some(pressed) = clicked {
            if pressed != top && self.regions.contains_key(pressed) {
                self.fire(pressed, &ScriptEvent::MouseUp { x, y, button });
            }
            if let Some(mut c) = self.take_controller(pressed) {
                c.on_release(self, pressed, x, y, button);
                self.restore_controller(pressed, c);
            }
        }

        if let Some(session) = self.input.drag.take() {
            if session.button == button && session.began && self.regions.contains_key(session.frame)
            {
                self.fire(session.frame, &ScriptEvent::DragStop);
            }
        }
        self.refresh_top_mouse();
    }

    /// The cursor moved to (`x`, `y`) by (`dx`, `dy`).
    pub fn mouse_moved(&mut self, x: f32, y: f32, dx: f32, dy: f32) {
        self.input.mouse = Point::new(x, y);

        if let Some(mut session) = self.input.drag.take() {
            if !session.began
                && ((x - session.start.x).abs() > DRAG_DEADZONE
                    || (y - session.start.y).abs() > DRAG_DEADZONE)
            {
                session.began = true;
                debug!(target: targets::INPUT, frame = ?session.frame, "drag start");
                self.fire(session.frame, &ScriptEvent::DragStart);
            }
            if session.began {
                self.apply_drag(&session);
            }
            self.input.drag = Some(session);
        }

        self.refresh_top_mouse();
        let top = self.input.top_mouse.unwrap_or_else(|| self.root());

        // While a press is held the pressed frame's controller keeps
        // tracking the cursor (slider thumbs and the like), even off-frame.
        let grab_target = self.input.clicked.unwrap_or(top);
        if let Some(mut c) = self.take_controller(grab_target) {
            c.on_mouse_move(self, grab_target, x, y);
            self.restore_controller(grab_target, c);
        }
        if self.regions.contains_key(top) {
            self.fire(top, &ScriptEvent::MouseMoved { x, y, dx, dy });
        }
    }

    /// The wheel scrolled. Broadcast to every frame with a `Wheel` handler;
    /// handlers decide relevance themselves (typically via
    /// [`UiSystem::is_mouse_over`]).
    pub fn mouse_wheel(&mut self, dx: f32, dy: f32) {
        for id in self.scripts.regions_with(ScriptKind::Wheel) {
            if self.regions.contains_key(id) && self.is_visible(id) {
                self.fire(id, &ScriptEvent::Wheel { dx, dy });
            }
        }
        // Scrolling may have moved content under a stationary cursor.
        self.refresh_top_mouse();
    }

    /// The nearest frame in `id`'s ancestor chain (starting at `id`) marked
    /// top-level, walked only while stratum and level stay the same.
    fn top_level_target(&self, id: RegionId) -> Option<RegionId> {
        let start = self.regions.get(id)?.frame()?;
        let (stratum, level) = (start.strata, start.level);
        let mut current = Some(id);
        while let Some(c) = current {
            let frame = self.regions.get(c)?.frame()?;
            if frame.strata != stratum || frame.level != level {
                return None;
            }
            if frame.top_level {
                return Some(c);
            }
            current = self.regions.get(c).and_then(|r| r.parent);
        }
        None
    }

    fn dispatch_controller_click(&mut self, id: RegionId, x: f32, y: f32, button: MouseButton) {
        let Some(mut c) = self.take_controller(id) else {
            return;
        };
        c.on_click(self, id, x, y, button);
        self.restore_controller(id, c);
    }

    // =========================================================================
    // Drag sessions
    // =========================================================================

    /// Arm a drag session if the press matches `target`'s registration.
    fn maybe_begin_drag(&mut self, target: RegionId, x: f32, y: f32, button: MouseButton) {
        let Some(registration) = self
            .regions
            .get(target)
            .and_then(|r| r.frame())
            .and_then(|f| f.drag)
        else {
            return;
        };
        if registration.button() != button {
            return;
        }

        let press = Point::new(x, y);
        let hit = match registration {
            DragRegistration::WholeFrame { .. } | DragRegistration::Delegated { .. } => true,
            DragRegistration::Rect { rect, .. } => match self.rect_of(target) {
                Some(bounds) => Rect::new(
                    bounds.left() + rect.left(),
                    bounds.bottom() + rect.bottom(),
                    rect.width(),
                    rect.height(),
                )
                .contains(press),
                None => false,
            },
            DragRegistration::Disk { center, radius, .. } => match self.rect_of(target) {
                Some(bounds) => {
                    let c = bounds.center();
                    Point::new(c.x + center.x, c.y + center.y).distance_to(press) <= radius
                }
                None => false,
            },
        };
        if !hit {
            return;
        }

        let dragged = match registration {
            DragRegistration::Delegated { target: t, .. } => t,
            _ => target,
        };
        let Some(dragged_region) = self.regions.get(dragged) else {
            return;
        };
        let clamp = dragged_region
            .frame()
            .and_then(|f| f.clamp_to)
            .unwrap_or_else(|| self.root());
        let grab = match dragged_region.resolved {
            Some(ResolvedShape::Disk { center, .. }) => {
                Point::new(x - center.x, y - center.y)
            }
            Some(ResolvedShape::Rect(r)) => Point::new(x - r.left(), y - r.bottom()),
            None => return,
        };
        self.input.drag = Some(DragSession {
            frame: dragged,
            clamp,
            start: press,
            grab,
            began: false,
            button,
        });
    }

    /// Reposition the dragged frame under the cursor, clamped inside the
    /// clamp frame's bounds.
    ///
    /// The move is expressed through the solver: all anchors are replaced by
    /// a single anchor onto the clamp frame, so the frame keeps following the
    /// clamp frame afterwards. For rectangles the current extents are pinned
    /// as explicit size first, so the single remaining anchor still resolves.
    fn apply_drag(&mut self, session: &DragSession) {
        let Some(clamp_rect) = self.rect_of(session.clamp) else {
            return;
        };
        let mouse = self.input.mouse;
        let Some(shape) = self.regions.get(session.frame).and_then(|r| r.resolved) else {
            return;
        };
        match shape {
            ResolvedShape::Disk { radius, .. } => {
                let desired_x = mouse.x - session.grab.x;
                let desired_y = mouse.y - session.grab.y;
                let cx = clamp_axis(
                    desired_x,
                    clamp_rect.left() + radius,
                    clamp_rect.right() - radius,
                );
                let cy = clamp_axis(
                    desired_y,
                    clamp_rect.bottom() + radius,
                    clamp_rect.top() - radius,
                );
                let anchor_base = clamp_rect.center();
                self.clear_all_points(session.frame);
                self.set_point(
                    session.frame,
                    AnchorPoint::Center,
                    session.clamp,
                    AnchorPoint::Center,
                    cx - anchor_base.x,
                    cy - anchor_base.y,
                );
            }
            ResolvedShape::Rect(rect) => {
                let (w, h) = (rect.width(), rect.height());
                if let Some(region) = self.regions.get_mut(session.frame) {
                    if region.width.is_none() {
                        region.width = Some(w);
                    }
                    if region.height.is_none() {
                        region.height = Some(h);
                    }
                }
                let bx = clamp_axis(
                    mouse.x - session.grab.x,
                    clamp_rect.left(),
                    clamp_rect.right() - w,
                );
                let by = clamp_axis(
                    mouse.y - session.grab.y,
                    clamp_rect.bottom(),
                    clamp_rect.top() - h,
                );
                self.clear_all_points(session.frame);
                self.set_point(
                    session.frame,
                    AnchorPoint::BottomLeft,
                    session.clamp,
                    AnchorPoint::BottomLeft,
                    bx - clamp_rect.left(),
                    by - clamp_rect.bottom(),
                );
            }
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Give (or clear) exclusive keyboard focus.
    pub fn set_keyboard_focus(&mut self, focus: Option<RegionId>) {
        self.input.focus = focus.filter(|f| self.regions.contains_key(*f));
    }

    /// The current keyboard focus target, if any.
    pub fn keyboard_focus(&self) -> Option<RegionId> {
        self.input.focus
    }

    /// A key went down.
    ///
    /// With a live focus target, the key routes exclusively to it (controller
    /// first, then its `KeyDown` script) and the call returns `true`: the
    /// application should not also treat the key as a global binding. Without
    /// focus the key is broadcast to every visible frame with a `KeyDown`
    /// handler and the call returns `false`.
    pub fn key_pressed(&mut self, key: &str, repeat: bool) -> bool {
        if let Some(focus) = self.input.focus {
            if self.regions.contains_key(focus) {
                if let Some(mut c) = self.take_controller(focus) {
                    c.on_key(self, focus, key, repeat);
                    self.restore_controller(focus, c);
                }
                if self.regions.contains_key(focus) {
                    self.fire(
                        focus,
                        &ScriptEvent::KeyDown {
                            key: key.to_owned(),
                            repeat,
                        },
                    );
                }
                return true;
            }
            self.input.focus = None;
        }
        for id in self.scripts.regions_with(ScriptKind::KeyDown) {
            if self.regions.contains_key(id) && self.is_visible(id) {
                self.fire(
                    id,
                    &ScriptEvent::KeyDown {
                        key: key.to_owned(),
                        repeat,
                    },
                );
            }
        }
        false
    }

    /// A key came up. Same routing contract as [`Self::key_pressed`].
    pub fn key_released(&mut self, key: &str) -> bool {
        if let Some(focus) = self.input.focus {
            if self.regions.contains_key(focus) {
                self.fire(focus, &ScriptEvent::KeyUp { key: key.to_owned() });
                return true;
            }
            self.input.focus = None;
        }
        for id in self.scripts.regions_with(ScriptKind::KeyUp) {
            if self.regions.contains_key(id) && self.is_visible(id) {
                self.fire(id, &ScriptEvent::KeyUp { key: key.to_owned() });
            }
        }
        false
    }
}

/// Clamp to [min, max], degenerating to `min` when the range is inverted
/// (frame larger than its clamp bounds).
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if max < min {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn press_frame(ui: &mut UiSystem, size: f32, x: f32, y: f32) -> RegionId {
        let f = ui.create_frame(None);
        ui.set_size(f, size, size);
        ui.set_point(f, AnchorPoint::Center, ui.root(), AnchorPoint::Center, x, y);
        ui.set_mouse_enabled(f, true);
        f
    }

    #[test]
    fn test_top_under_mouse_prefers_higher_stratum() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let low = press_frame(&mut ui, 100.0, 0.0, 0.0);
        let high = press_frame(&mut ui, 100.0, 0.0, 0.0);
        ui.set_strata(low, FrameStrata::Low);
        ui.set_strata(high, FrameStrata::Dialog);

        ui.mouse_moved(0.0, 0.0, 0.0, 0.0);
        assert_eq!(ui.top_under_mouse(), high);
    }

    #[test]
    fn test_top_under_mouse_falls_back_to_root() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let f = press_frame(&mut ui, 10.0, 0.0, 0.0);
        ui.mouse_moved(150.0, 150.0, 0.0, 0.0);
        assert_ne!(ui.top_under_mouse(), f);
        assert_eq!(ui.top_under_mouse(), ui.root());
    }

    #[test]
    fn test_click_script_fires_once() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let f = press_frame(&mut ui, 50.0, 0.0, 0.0);
        let clicks = Rc::new(Cell::new(0));
        let seen = clicks.clone();
        ui.set_script(
            f,
            ScriptKind::Click,
            Box::new(move |_, _, _| seen.set(seen.get() + 1)),
        );

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        ui.mouse_released(0.0, 0.0, MouseButton::Left);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_click_script_fires_alongside_controller() {
        use crate::widget::{Button, ButtonState};

        let mut ui = UiSystem::new(400.0, 400.0);
        let button = Button::new(&mut ui, None);
        ui.set_size(button.id(), 50.0, 50.0);
        ui.set_point(button.id(), AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);
        let clicks = Rc::new(Cell::new(0));
        let seen = clicks.clone();
        ui.set_script(
            button.id(),
            ScriptKind::Click,
            Box::new(move |_, _, _| seen.set(seen.get() + 1)),
        );

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        // The controller took its state transition and the script still ran.
        assert_eq!(button.state(&mut ui), ButtonState::Pushed);
        assert_eq!(clicks.get(), 1);
        ui.mouse_released(0.0, 0.0, MouseButton::Left);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_enter_and_leave_edges() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let f = press_frame(&mut ui, 50.0, 0.0, 0.0);
        let log = Rc::new(Cell::new((0, 0)));
        let enter = log.clone();
        ui.set_script(
            f,
            ScriptKind::Enter,
            Box::new(move |_, _, _| {
                let (e, l) = enter.get();
                enter.set((e + 1, l));
            }),
        );
        let leave = log.clone();
        ui.set_script(
            f,
            ScriptKind::Leave,
            Box::new(move |_, _, _| {
                let (e, l) = leave.get();
                leave.set((e, l + 1));
            }),
        );

        ui.mouse_moved(0.0, 0.0, 0.0, 0.0);
        ui.mouse_moved(1.0, 1.0, 1.0, 1.0); // still inside, no new edge
        ui.mouse_moved(100.0, 100.0, 99.0, 99.0);
        assert_eq!(log.get(), (1, 1));
    }

    #[test]
    fn test_drag_respects_deadzone() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let f = press_frame(&mut ui, 50.0, 0.0, 0.0);
        ui.register_for_drag(f, Some(DragRegistration::WholeFrame { button: MouseButton::Left }));

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        // Within the deadzone: no movement.
        ui.mouse_moved(5.0, 0.0, 5.0, 0.0);
        assert_eq!(ui.center(f), Point::ZERO);
        // Past the deadzone: the frame follows the cursor.
        ui.mouse_moved(20.0, 0.0, 15.0, 0.0);
        assert_eq!(ui.center(f), Point::new(20.0, 0.0));
        ui.mouse_released(20.0, 0.0, MouseButton::Left);
    }

    #[test]
    fn test_drag_clamped_to_root() {
        let mut ui = UiSystem::new(100.0, 100.0);
        let f = press_frame(&mut ui, 20.0, 0.0, 0.0);
        ui.register_for_drag(f, Some(DragRegistration::WholeFrame { button: MouseButton::Left }));

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        ui.mouse_moved(500.0, 500.0, 500.0, 500.0);
        // The frame cannot leave the canvas.
        assert_eq!(ui.right(f), 50.0);
        assert_eq!(ui.top(f), 50.0);
    }

    #[test]
    fn test_drag_wrong_button_ignored() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let f = press_frame(&mut ui, 50.0, 0.0, 0.0);
        ui.register_for_drag(f, Some(DragRegistration::WholeFrame { button: MouseButton::Right }));

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        ui.mouse_moved(50.0, 0.0, 50.0, 0.0);
        assert_eq!(ui.center(f), Point::ZERO);
    }

    #[test]
    fn test_delegated_drag_moves_target() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let window = press_frame(&mut ui, 100.0, 0.0, 0.0);
        let title = ui.create_frame(Some(window));
        ui.set_size(title, 100.0, 10.0);
        ui.set_point(title, AnchorPoint::Top, window, AnchorPoint::Top, 0.0, 0.0);
        ui.set_mouse_enabled(title, true);
        ui.register_for_drag(
            title,
            Some(DragRegistration::Delegated {
                target: window,
                button: MouseButton::Left,
            }),
        );

        ui.mouse_pressed(0.0, 45.0, MouseButton::Left);
        ui.mouse_moved(30.0, 45.0, 30.0, 0.0);
        assert_eq!(ui.center(window), Point::new(30.0, 0.0));
        // The title bar is anchored to the window and follows it.
        assert_eq!(ui.top(title), ui.top(window));
    }

    #[test]
    fn test_release_without_motion_fires_no_drag_stop() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let f = press_frame(&mut ui, 50.0, 0.0, 0.0);
        ui.register_for_drag(f, Some(DragRegistration::WholeFrame { button: MouseButton::Left }));
        let stops = Rc::new(Cell::new(0));
        let seen = stops.clone();
        ui.set_script(
            f,
            ScriptKind::DragStop,
            Box::new(move |_, _, _| seen.set(seen.get() + 1)),
        );

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        ui.mouse_released(0.0, 0.0, MouseButton::Left);
        assert_eq!(stops.get(), 0);
    }

    #[test]
    fn test_keyboard_focus_routes_exclusively() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let focused = press_frame(&mut ui, 20.0, 0.0, 0.0);
        let other = press_frame(&mut ui, 20.0, 100.0, 0.0);
        let hits = Rc::new(Cell::new((0, 0)));

        let a = hits.clone();
        ui.set_script(
            focused,
            ScriptKind::KeyDown,
            Box::new(move |_, _, _| {
                let (f, o) = a.get();
                a.set((f + 1, o));
            }),
        );
        let b = hits.clone();
        ui.set_script(
            other,
            ScriptKind::KeyDown,
            Box::new(move |_, _, _| {
                let (f, o) = b.get();
                b.set((f, o + 1));
            }),
        );

        ui.set_keyboard_focus(Some(focused));
        assert!(ui.key_pressed("a", false));
        assert_eq!(hits.get(), (1, 0));

        ui.set_keyboard_focus(None);
        assert!(!ui.key_pressed("a", false));
        assert_eq!(hits.get(), (2, 1));
    }

    #[test]
    fn test_wheel_broadcasts_to_handlers() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let near = press_frame(&mut ui, 20.0, 0.0, 0.0);
        let far = press_frame(&mut ui, 20.0, 100.0, 100.0);
        let sum = Rc::new(Cell::new(0.0));

        for f in [near, far] {
            let s = sum.clone();
            ui.set_script(
                f,
                ScriptKind::Wheel,
                Box::new(move |_, _, ev| {
                    if let ScriptEvent::Wheel { dy, .. } = ev {
                        s.set(s.get() + dy);
                    }
                }),
            );
        }

        ui.mouse_wheel(0.0, 3.0);
        // Broadcast: both handlers see the event regardless of hover.
        assert_eq!(sum.get(), 6.0);
    }

    #[test]
    fn test_hidden_frame_not_hit() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let f = press_frame(&mut ui, 50.0, 0.0, 0.0);
        ui.mouse_moved(0.0, 0.0, 0.0, 0.0);
        assert_eq!(ui.top_under_mouse(), f);

        ui.hide(f);
        assert_eq!(ui.top_under_mouse(), ui.root());
    }
}
