//! Scroll frames.
//!
//! A scroll frame is a clipping viewport over a taller content frame. The
//! wheel scrolls by re-anchoring the content against the viewport's top-left
//! corner; the offset is clamped so the content can never scroll past either
//! end. The wheel handler is an ordinary `Wheel` script that checks
//! `is_mouse_over` itself, since wheel events are broadcast.

use std::any::Any;

use crate::region::{AnchorPoint, RegionId};
use crate::script::{ScriptEvent, ScriptKind};
use crate::widget::FrameController;
use crate::UiSystem;

struct ScrollFrameController {
    content: Option<RegionId>,
    /// Current scroll offset in pixels, 0 = content top flush with the
    /// viewport top.
    offset: f32,
    /// Pixels per wheel unit.
    step: f32,
}

impl ScrollFrameController {
    fn new() -> Self {
        Self {
            content: None,
            offset: 0.0,
            step: 20.0,
        }
    }

    fn max_offset(&self, ui: &UiSystem, frame: RegionId) -> f32 {
        let Some(content) = self.content else {
            return 0.0;
        };
        (ui.height(content) - ui.height(frame)).max(0.0)
    }

    /// Re-anchor the content for the current offset. A positive offset
    /// slides the content up, revealing what sits below the viewport.
    fn sync_content(&self, ui: &mut UiSystem, frame: RegionId) {
        let Some(content) = self.content else {
            return;
        };
        ui.clear_all_points(content);
        ui.set_point(content, AnchorPoint::TopLeft, frame, AnchorPoint::TopLeft, 0.0, self.offset);
    }

    fn scroll_to(&mut self, ui: &mut UiSystem, frame: RegionId, offset: f32) {
        let clamped = offset.clamp(0.0, self.max_offset(ui, frame));
        if clamped == self.offset {
            return;
        }
        self.offset = clamped;
        self.sync_content(ui, frame);
    }
}

impl FrameController for ScrollFrameController {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Handle for a scroll frame (the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollFrame {
    frame: RegionId,
}

impl ScrollFrame {
    /// Create a scroll frame under `parent` (the root when `None`).
    pub fn new(ui: &mut UiSystem, parent: Option<RegionId>) -> Self {
        let frame = ui.create_frame(parent);
        ui.set_mouse_enabled(frame, true);
        ui.set_clip_children(frame, true);
        ui.set_controller(frame, Box::new(ScrollFrameController::new()));
        // Wheel events are broadcast; relevance is our own check.
        ui.set_script(
            frame,
            ScriptKind::Wheel,
            Box::new(|ui, id, ev| {
                let ScriptEvent::Wheel { dy, .. } = ev else {
                    return;
                };
                if !ui.is_mouse_over(id) {
                    return;
                }
                ScrollFrame { frame: id }.scroll_by(ui, -*dy);
            }),
        );
        Self { frame }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.frame
    }

    /// Install the content frame. It is reparented under the viewport,
    /// clipped to it, and anchored at the current offset.
    pub fn set_scroll_child(&self, ui: &mut UiSystem, content: RegionId) -> crate::UiResult<()> {
        ui.set_parent(content, self.frame)?;
        ui.set_scroll_clip(content, Some(self.frame));
        let frame = self.frame;
        if let Some(c) = ui.controller_mut::<ScrollFrameController>(frame) {
            c.content = Some(content);
            c.offset = 0.0;
        }
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(s) = c.as_any_mut().downcast_mut::<ScrollFrameController>() {
                s.sync_content(ui, frame);
            }
            ui.restore_controller(frame, c);
        }
        Ok(())
    }

    /// Pixels scrolled per wheel unit.
    pub fn set_wheel_step(&self, ui: &mut UiSystem, step: f32) {
        if let Some(c) = ui.controller_mut::<ScrollFrameController>(self.frame) {
            c.step = step.max(0.0);
        }
    }

    /// Current scroll offset in pixels.
    pub fn scroll_offset(&self, ui: &mut UiSystem) -> f32 {
        ui.controller_mut::<ScrollFrameController>(self.frame)
            .map(|c| c.offset)
            .unwrap_or(0.0)
    }

    /// Scroll by wheel units (positive scrolls the content up).
    pub fn scroll_by(&self, ui: &mut UiSystem, units: f32) {
        let frame = self.frame;
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(s) = c.as_any_mut().downcast_mut::<ScrollFrameController>() {
                let target = s.offset + units * s.step;
                s.scroll_to(ui, frame, target);
            }
            ui.restore_controller(frame, c);
        }
    }

    /// Scroll to an absolute pixel offset, clamped to the content extent.
    pub fn scroll_to(&self, ui: &mut UiSystem, offset: f32) {
        let frame = self.frame;
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(s) = c.as_any_mut().downcast_mut::<ScrollFrameController>() {
                s.scroll_to(ui, frame, offset);
            }
            ui.restore_controller(frame, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_with_content(ui: &mut UiSystem) -> (ScrollFrame, RegionId) {
        let sf = ScrollFrame::new(ui, None);
        ui.set_size(sf.id(), 100.0, 100.0);
        ui.set_point(sf.id(), AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);

        let content = ui.create_frame(None);
        ui.set_size(content, 100.0, 300.0);
        sf.set_scroll_child(ui, content).unwrap();
        (sf, content)
    }

    #[test]
    fn test_content_clamps_to_extent() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let (sf, content) = viewport_with_content(&mut ui);

        // Content top starts flush with the viewport top.
        assert_eq!(ui.top(content), ui.top(sf.id()));

        sf.scroll_to(&mut ui, 5000.0);
        assert_eq!(sf.scroll_offset(&mut ui), 200.0);
        // Content bottom flush with the viewport bottom at full scroll.
        assert_eq!(ui.bottom(content), ui.bottom(sf.id()));

        sf.scroll_to(&mut ui, -50.0);
        assert_eq!(sf.scroll_offset(&mut ui), 0.0);
    }

    #[test]
    fn test_wheel_scrolls_only_under_mouse() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let (sf, _content) = viewport_with_content(&mut ui);
        sf.set_wheel_step(&mut ui, 10.0);

        // Cursor away from the viewport: the broadcast is ignored.
        ui.mouse_moved(190.0, 190.0, 0.0, 0.0);
        ui.mouse_wheel(0.0, -1.0);
        assert_eq!(sf.scroll_offset(&mut ui), 0.0);

        // Cursor over the viewport: wheel-down scrolls the content up.
        ui.mouse_moved(0.0, 0.0, -190.0, -190.0);
        ui.mouse_wheel(0.0, -1.0);
        assert_eq!(sf.scroll_offset(&mut ui), 10.0);
    }

    #[test]
    fn test_content_is_clipped_to_viewport() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let (sf, content) = viewport_with_content(&mut ui);
        assert_eq!(ui.clip_rect_for(content), ui.region(sf.id()).and_then(|r| r.rect()));
    }
}
