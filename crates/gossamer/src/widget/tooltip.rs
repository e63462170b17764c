//! Tooltips.
//!
//! A tooltip is a frame in the `Tooltip` stratum (always above everything
//! else), anchored above an owner frame while shown. Dismissal is a timed
//! fade: an alpha accumulator ticked from the update loop ramps the tooltip
//! out and hides it when the ramp ends.

use std::any::Any;

use crate::frame::FrameStrata;
use crate::region::{AnchorPoint, RegionId};
use crate::widget::FrameController;
use crate::UiSystem;

/// Default fade-out duration.
const FADE_MS: f32 = 200.0;

struct TooltipController {
    /// Remaining fade time; `None` while fully shown or hidden.
    fade_left_ms: Option<f32>,
    fade_total_ms: f32,
}

impl FrameController for TooltipController {
    fn on_update(&mut self, ui: &mut UiSystem, frame: RegionId, dt_ms: f32) {
        let Some(left) = self.fade_left_ms else {
            return;
        };
        let left = left - dt_ms;
        if left <= 0.0 {
            self.fade_left_ms = None;
            ui.hide(frame);
            ui.set_alpha(frame, 1.0);
            return;
        }
        self.fade_left_ms = Some(left);
        ui.set_alpha(frame, left / self.fade_total_ms);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Handle for a tooltip frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tooltip {
    frame: RegionId,
}

impl Tooltip {
    /// Create a tooltip. It starts hidden, mouse-transparent, and in the
    /// `Tooltip` stratum.
    pub fn new(ui: &mut UiSystem) -> Self {
        let frame = ui.create_frame(None);
        ui.set_strata(frame, FrameStrata::Tooltip);
        ui.set_mouse_enabled(frame, false);
        ui.hide(frame);
        ui.set_controller(
            frame,
            Box::new(TooltipController {
                fade_left_ms: None,
                fade_total_ms: FADE_MS,
            }),
        );
        Self { frame }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.frame
    }

    /// Anchor the tooltip above `owner` and show it at full opacity,
    /// cancelling any fade in progress.
    pub fn show_above(&self, ui: &mut UiSystem, owner: RegionId, gap: f32) {
        ui.clear_all_points(self.frame);
        ui.set_point(self.frame, AnchorPoint::Bottom, owner, AnchorPoint::Top, 0.0, gap);
        if let Some(c) = ui.controller_mut::<TooltipController>(self.frame) {
            c.fade_left_ms = None;
        }
        ui.set_alpha(self.frame, 1.0);
        ui.show(self.frame);
    }

    /// Begin the timed fade-out; the tooltip hides itself when it ends.
    pub fn fade_out(&self, ui: &mut UiSystem, duration_ms: f32) {
        if !ui.is_shown(self.frame) {
            return;
        }
        if let Some(c) = ui.controller_mut::<TooltipController>(self.frame) {
            let total = duration_ms.max(1.0);
            c.fade_total_ms = total;
            c.fade_left_ms = Some(total);
        }
    }

    /// Hide immediately, skipping the fade.
    pub fn dismiss(&self, ui: &mut UiSystem) {
        if let Some(c) = ui.controller_mut::<TooltipController>(self.frame) {
            c.fade_left_ms = None;
        }
        ui.set_alpha(self.frame, 1.0);
        ui.hide(self.frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shows_above_owner_in_tooltip_stratum() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let owner = ui.create_frame(None);
        ui.set_size(owner, 50.0, 20.0);
        ui.set_point(owner, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);

        let tip = Tooltip::new(&mut ui);
        ui.set_size(tip.id(), 60.0, 16.0);
        tip.show_above(&mut ui, owner, 4.0);

        assert!(ui.is_shown(tip.id()));
        assert_eq!(ui.strata(tip.id()), Some(FrameStrata::Tooltip));
        assert_eq!(ui.bottom(tip.id()), ui.top(owner) + 4.0);
    }

    #[test]
    fn test_fade_out_ramps_alpha_then_hides() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let owner = ui.create_frame(None);
        ui.set_size(owner, 50.0, 20.0);
        ui.set_point(owner, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);

        let tip = Tooltip::new(&mut ui);
        ui.set_size(tip.id(), 60.0, 16.0);
        tip.show_above(&mut ui, owner, 0.0);
        tip.fade_out(&mut ui, 100.0);

        ui.update(50.0);
        assert!(ui.is_shown(tip.id()));
        assert_eq!(ui.alpha(tip.id()), 0.5);

        ui.update(60.0);
        assert!(!ui.is_shown(tip.id()));
        assert_eq!(ui.alpha(tip.id()), 1.0);
    }

    #[test]
    fn test_show_cancels_fade() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let owner = ui.create_frame(None);
        ui.set_size(owner, 50.0, 20.0);
        ui.set_point(owner, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);

        let tip = Tooltip::new(&mut ui);
        ui.set_size(tip.id(), 60.0, 16.0);
        tip.show_above(&mut ui, owner, 0.0);
        tip.fade_out(&mut ui, 100.0);
        ui.update(50.0);

        tip.show_above(&mut ui, owner, 0.0);
        ui.update(500.0);
        assert!(ui.is_shown(tip.id()));
        assert_eq!(ui.alpha(tip.id()), 1.0);
    }
}
