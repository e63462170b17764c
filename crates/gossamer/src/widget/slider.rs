//! Sliders.
//!
//! A slider maps a mouse position along its major axis to a value in
//! [min, max], optionally snapped to a step. Pressing anywhere on the track
//! jumps the value to the press point and starts tracking; the value then
//! follows the cursor until release, even if the cursor leaves the frame.
//! Every actual value change fires the `ValueChanged` script.

use std::any::Any;

use gossamer_render::Color;

use crate::layered::DrawLayer;
use crate::region::{AnchorPoint, RegionId};
use crate::script::{MouseButton, ScriptEvent};
use crate::widget::{FrameController, Texture};
use crate::UiSystem;

/// Track direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

struct SliderController {
    orientation: Orientation,
    min: f32,
    max: f32,
    value: f32,
    /// Snap increment; 0 disables snapping.
    step: f32,
    /// Whether a press is held and the value follows the cursor.
    tracking: bool,
    thumb: Option<RegionId>,
    thumb_size: f32,
}

impl SliderController {
    fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            min: 0.0,
            max: 1.0,
            value: 0.0,
            step: 0.0,
            tracking: false,
            thumb: None,
            thumb_size: 12.0,
        }
    }

    fn snap(&self, raw: f32) -> f32 {
        let clamped = raw.clamp(self.min.min(self.max), self.max.max(self.min));
        if self.step > 0.0 {
            let steps = ((clamped - self.min) / self.step).round();
            (self.min + steps * self.step).clamp(self.min.min(self.max), self.max.max(self.min))
        } else {
            clamped
        }
    }

    /// Value at a cursor position along the track.
    fn value_at(&self, ui: &UiSystem, frame: RegionId, x: f32, y: f32) -> Option<f32> {
        let rect = ui.region(frame)?.rect()?;
        let t = match self.orientation {
            Orientation::Horizontal if rect.width() > 0.0 => (x - rect.left()) / rect.width(),
            Orientation::Vertical if rect.height() > 0.0 => (y - rect.bottom()) / rect.height(),
            _ => return None,
        };
        Some(self.min + t.clamp(0.0, 1.0) * (self.max - self.min))
    }

    /// Apply a new value; fires `ValueChanged` only on an actual change.
    fn apply(&mut self, ui: &mut UiSystem, frame: RegionId, raw: f32) {
        let snapped = self.snap(raw);
        if snapped == self.value {
            return;
        }
        self.value = snapped;
        self.sync_thumb(ui, frame);
        ui.fire(frame, &ScriptEvent::ValueChanged { value: snapped });
    }

    /// Re-anchor the thumb to the position the current value names.
    fn sync_thumb(&self, ui: &mut UiSystem, frame: RegionId) {
        let Some(thumb) = self.thumb else {
            return;
        };
        let span = self.max - self.min;
        let t = if span == 0.0 {
            0.0
        } else {
            ((self.value - self.min) / span).clamp(0.0, 1.0)
        };
        let (x, y) = match self.orientation {
            Orientation::Horizontal => (t * ui.width(frame), ui.height(frame) / 2.0),
            Orientation::Vertical => (ui.width(frame) / 2.0, t * ui.height(frame)),
        };
        ui.clear_all_points(thumb);
        ui.set_point(thumb, AnchorPoint::Center, frame, AnchorPoint::BottomLeft, x, y);
    }
}

impl FrameController for SliderController {
    fn on_click(&mut self, ui: &mut UiSystem, frame: RegionId, x: f32, y: f32, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        self.tracking = true;
        if let Some(v) = self.value_at(ui, frame, x, y) {
            self.apply(ui, frame, v);
        }
    }

    fn on_mouse_move(&mut self, ui: &mut UiSystem, frame: RegionId, x: f32, y: f32) {
        if !self.tracking {
            return;
        }
        if let Some(v) = self.value_at(ui, frame, x, y) {
            self.apply(ui, frame, v);
        }
    }

    fn on_release(
        &mut self,
        _ui: &mut UiSystem,
        _frame: RegionId,
        _x: f32,
        _y: f32,
        _button: MouseButton,
    ) {
        self.tracking = false;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Handle for a slider frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    frame: RegionId,
}

impl Slider {
    /// Create a slider under `parent` (the root when `None`).
    pub fn new(ui: &mut UiSystem, parent: Option<RegionId>, orientation: Orientation) -> Self {
        let frame = ui.create_frame(parent);
        ui.set_mouse_enabled(frame, true);
        ui.set_controller(frame, Box::new(SliderController::new(orientation)));
        Self { frame }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.frame
    }

    /// Current value.
    pub fn value(&self, ui: &mut UiSystem) -> f32 {
        ui.controller_mut::<SliderController>(self.frame)
            .map(|c| c.value)
            .unwrap_or(0.0)
    }

    /// Set the value range; the current value is re-clamped into it.
    pub fn set_min_max(&self, ui: &mut UiSystem, min: f32, max: f32) {
        let value = match ui.controller_mut::<SliderController>(self.frame) {
            Some(c) => {
                c.min = min;
                c.max = max;
                c.value
            }
            None => return,
        };
        self.set_value(ui, value);
    }

    /// Set the snap increment (0 disables snapping).
    pub fn set_step(&self, ui: &mut UiSystem, step: f32) {
        if let Some(c) = ui.controller_mut::<SliderController>(self.frame) {
            c.step = step.max(0.0);
        }
    }

    /// Set the value programmatically. Clamped and snapped like a mouse
    /// change; fires `ValueChanged` if the value actually moved.
    pub fn set_value(&self, ui: &mut UiSystem, value: f32) {
        let frame = self.frame;
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(s) = c.as_any_mut().downcast_mut::<SliderController>() {
                s.apply(ui, frame, value);
            }
            ui.restore_controller(frame, c);
        }
    }

    /// Fill color of the thumb, creating the thumb artwork on first use.
    pub fn set_thumb_color(&self, ui: &mut UiSystem, color: Color) {
        let thumb = self.ensure_thumb(ui);
        ui.set_color(thumb, color);
    }

    /// Thumb square edge length, in pixels.
    pub fn set_thumb_size(&self, ui: &mut UiSystem, size: f32) {
        let thumb = self.ensure_thumb(ui);
        ui.set_size(thumb, size.max(0.0), size.max(0.0));
        if let Some(c) = ui.controller_mut::<SliderController>(self.frame) {
            c.thumb_size = size.max(0.0);
        }
    }

    fn ensure_thumb(&self, ui: &mut UiSystem) -> RegionId {
        if let Some(existing) = ui
            .controller_mut::<SliderController>(self.frame)
            .and_then(|c| c.thumb)
        {
            return existing;
        }
        let tex = Texture::new(ui, self.frame, DrawLayer::Overlay);
        let size = ui
            .controller_mut::<SliderController>(self.frame)
            .map(|c| c.thumb_size)
            .unwrap_or(12.0);
        ui.set_size(tex.id(), size, size);
        if let Some(c) = ui.controller_mut::<SliderController>(self.frame) {
            c.thumb = Some(tex.id());
        }
        if let Some(mut c) = ui.take_controller(self.frame) {
            if let Some(s) = c.as_any_mut().downcast_mut::<SliderController>() {
                s.sync_thumb(ui, self.frame);
            }
            ui.restore_controller(self.frame, c);
        }
        tex.id()
    }
}
