//! Status bars.
//!
//! A status bar shows a value in [min, max] as a horizontally growing fill.
//! The fill is a texture child whose width is recomputed from the fraction on
//! every value or range change; without fill artwork the bar silently shows
//! nothing.

use std::any::Any;

use gossamer_render::Color;

use crate::layered::DrawLayer;
use crate::region::{AnchorPoint, RegionId};
use crate::script::ScriptEvent;
use crate::widget::{FrameController, Texture};
use crate::UiSystem;

struct StatusBarController {
    min: f32,
    max: f32,
    value: f32,
    fill: Option<RegionId>,
}

impl StatusBarController {
    fn new() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            value: 0.0,
            fill: None,
        }
    }

    fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            ((self.value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    /// Resize the fill to the current fraction of the bar's width.
    fn sync_fill(&self, ui: &mut UiSystem, frame: RegionId) {
        let Some(fill) = self.fill else {
            return;
        };
        let width = ui.width(frame) * self.fraction();
        ui.set_width(fill, width);
        ui.set_height(fill, ui.height(frame));
        ui.clear_all_points(fill);
        ui.set_point(fill, AnchorPoint::BottomLeft, frame, AnchorPoint::BottomLeft, 0.0, 0.0);
    }

    fn apply(&mut self, ui: &mut UiSystem, frame: RegionId, raw: f32) {
        let clamped = raw.clamp(self.min.min(self.max), self.max.max(self.min));
        if clamped == self.value {
            return;
        }
        self.value = clamped;
        self.sync_fill(ui, frame);
        ui.fire(frame, &ScriptEvent::ValueChanged { value: clamped });
    }
}

impl FrameController for StatusBarController {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Handle for a status bar frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBar {
    frame: RegionId,
}

impl StatusBar {
    /// Create a status bar under `parent` (the root when `None`).
    pub fn new(ui: &mut UiSystem, parent: Option<RegionId>) -> Self {
        let frame = ui.create_frame(parent);
        ui.set_controller(frame, Box::new(StatusBarController::new()));
        Self { frame }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.frame
    }

    /// Current value.
    pub fn value(&self, ui: &mut UiSystem) -> f32 {
        ui.controller_mut::<StatusBarController>(self.frame)
            .map(|c| c.value)
            .unwrap_or(0.0)
    }

    /// Set the range; the current value is re-clamped into it.
    pub fn set_min_max(&self, ui: &mut UiSystem, min: f32, max: f32) {
        let value = match ui.controller_mut::<StatusBarController>(self.frame) {
            Some(c) => {
                c.min = min;
                c.max = max;
                c.value
            }
            None => return,
        };
        self.set_value(ui, value);
        // Re-clamping may leave the value unchanged while the fraction moved.
        self.refresh(ui);
    }

    /// Set the value, clamped into [min, max]. Fires `ValueChanged` on an
    /// actual change.
    pub fn set_value(&self, ui: &mut UiSystem, value: f32) {
        let frame = self.frame;
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(bar) = c.as_any_mut().downcast_mut::<StatusBarController>() {
                bar.apply(ui, frame, value);
            }
            ui.restore_controller(frame, c);
        }
    }

    /// Fill color, creating the fill artwork on first use.
    pub fn set_fill_color(&self, ui: &mut UiSystem, color: Color) {
        if ui
            .controller_mut::<StatusBarController>(self.frame)
            .is_some_and(|c| c.fill.is_none())
        {
            let tex = Texture::new(ui, self.frame, DrawLayer::Artwork);
            if let Some(c) = ui.controller_mut::<StatusBarController>(self.frame) {
                c.fill = Some(tex.id());
            }
        }
        let fill = ui
            .controller_mut::<StatusBarController>(self.frame)
            .and_then(|c| c.fill);
        if let Some(fill) = fill {
            ui.set_color(fill, color);
        }
        self.refresh(ui);
    }

    /// Recompute the fill geometry (after the bar itself was resized).
    pub fn refresh(&self, ui: &mut UiSystem) {
        let frame = self.frame;
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(bar) = c.as_any_mut().downcast_mut::<StatusBarController>() {
                bar.sync_fill(ui, frame);
            }
            ui.restore_controller(frame, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptKind;
    use std::cell::Cell;
    use std::rc::Rc;

    fn bar(ui: &mut UiSystem) -> StatusBar {
        let b = StatusBar::new(ui, None);
        ui.set_size(b.id(), 200.0, 20.0);
        ui.set_point(b.id(), AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);
        b
    }

    #[test]
    fn test_fill_width_is_proportional() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let b = bar(&mut ui);
        b.set_min_max(&mut ui, 0.0, 100.0);
        b.set_fill_color(&mut ui, Color::WHITE);
        b.set_value(&mut ui, 25.0);

        let fill = ui
            .controller_mut::<StatusBarController>(b.id())
            .and_then(|c| c.fill)
            .unwrap();
        assert_eq!(ui.width(fill), 50.0);
        assert_eq!(ui.left(fill), ui.left(b.id()));

        b.set_value(&mut ui, 100.0);
        assert_eq!(ui.width(fill), 200.0);
    }

    #[test]
    fn test_value_clamps_to_range() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let b = bar(&mut ui);
        b.set_min_max(&mut ui, 10.0, 20.0);
        b.set_value(&mut ui, 500.0);
        assert_eq!(b.value(&mut ui), 20.0);
        b.set_value(&mut ui, -500.0);
        assert_eq!(b.value(&mut ui), 10.0);
    }

    #[test]
    fn test_no_fill_is_silent() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let b = bar(&mut ui);
        let fired = Rc::new(Cell::new(0));
        let seen = fired.clone();
        ui.set_script(
            b.id(),
            ScriptKind::ValueChanged,
            Box::new(move |_, _, _| seen.set(seen.get() + 1)),
        );

        // Value changes work (and fire) with no artwork installed.
        b.set_value(&mut ui, 0.5);
        assert_eq!(fired.get(), 1);
        assert_eq!(b.value(&mut ui), 0.5);
    }
}
