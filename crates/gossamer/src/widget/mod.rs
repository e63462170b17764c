//! Widgets: frames with a capability object attached.
//!
//! A widget is an ordinary frame plus a [`FrameController`] that the input
//! router and update loop call into. Widget handles (`Button`, `Slider`, …)
//! are thin, copyable wrappers around the frame's [`RegionId`]; all state
//! lives in the controller inside the arena, so handles can be freely stored
//! and passed around.
//!
//! Dispatch uses the same take/restore dance as script handlers: the
//! controller is removed from its slot for the duration of each hook, so
//! hooks may mutate the [`UiSystem`] freely, including removing their own
//! frame.

mod button;
mod edit_box;
mod scroll_frame;
mod slider;
mod status_bar;
mod tooltip;

use std::any::Any;

use gossamer_render::{Color, FontDesc, TextureHandle};

use crate::layered::{DrawLayer, Justify};
use crate::region::RegionId;
use crate::script::MouseButton;
use crate::UiSystem;

pub use button::{Button, ButtonState};
pub use edit_box::EditBox;
pub use scroll_frame::ScrollFrame;
pub use slider::{Orientation, Slider};
pub use status_bar::StatusBar;
pub use tooltip::Tooltip;

/// Behavior hooks a widget installs on its frame.
///
/// Every hook has an empty default, so controllers implement only what they
/// react to. Hooks receive the system mutably; re-entrancy is handled by the
/// caller taking the controller out of its slot first.
pub trait FrameController: Any {
    /// A mouse button was pressed on the frame.
    fn on_click(&mut self, ui: &mut UiSystem, frame: RegionId, x: f32, y: f32, button: MouseButton) {
        let _ = (ui, frame, x, y, button);
    }

    /// The press that started on this frame was released.
    fn on_release(
        &mut self,
        ui: &mut UiSystem,
        frame: RegionId,
        x: f32,
        y: f32,
        button: MouseButton,
    ) {
        let _ = (ui, frame, x, y, button);
    }

    /// The cursor moved while this frame holds the press (or is topmost).
    fn on_mouse_move(&mut self, ui: &mut UiSystem, frame: RegionId, x: f32, y: f32) {
        let _ = (ui, frame, x, y);
    }

    /// Hover state flipped.
    fn set_hovered(&mut self, ui: &mut UiSystem, frame: RegionId, hovered: bool) {
        let _ = (ui, frame, hovered);
    }

    /// A key event reached the frame through keyboard focus. Return whether
    /// the key was consumed.
    fn on_key(&mut self, ui: &mut UiSystem, frame: RegionId, key: &str, repeat: bool) -> bool {
        let _ = (ui, frame, key, repeat);
        false
    }

    /// One tick elapsed.
    fn on_update(&mut self, ui: &mut UiSystem, frame: RegionId, dt_ms: f32) {
        let _ = (ui, frame, dt_ms);
    }

    /// Downcast support for [`UiSystem::controller_mut`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Handle for a texture layered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    id: RegionId,
}

impl Texture {
    /// Create a texture region inside `parent`'s draw list.
    pub fn new(ui: &mut UiSystem, parent: RegionId, layer: DrawLayer) -> Self {
        Self {
            id: ui.create_texture(parent, layer),
        }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Stretch over `target`'s full rectangle.
    pub fn set_all_points(&self, ui: &mut UiSystem, target: RegionId) {
        ui.set_all_points(self.id, target);
    }

    pub fn set_texture(&self, ui: &mut UiSystem, texture: Option<TextureHandle>) {
        ui.set_texture(self.id, texture);
    }

    pub fn set_color(&self, ui: &mut UiSystem, color: Color) {
        ui.set_color(self.id, color);
    }

    pub fn set_sub_layer(&self, ui: &mut UiSystem, sub_layer: i32) {
        ui.set_sub_layer(self.id, sub_layer);
    }
}

/// Handle for a text layered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontString {
    id: RegionId,
}

impl FontString {
    /// Create a text region inside `parent`'s draw list.
    pub fn new(ui: &mut UiSystem, parent: RegionId, layer: DrawLayer) -> Self {
        Self {
            id: ui.create_font_string(parent, layer),
        }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn set_all_points(&self, ui: &mut UiSystem, target: RegionId) {
        ui.set_all_points(self.id, target);
    }

    pub fn set_text(&self, ui: &mut UiSystem, text: impl Into<String>) {
        ui.set_text(self.id, text);
    }

    pub fn text<'a>(&self, ui: &'a UiSystem) -> Option<&'a str> {
        ui.text(self.id)
    }

    pub fn set_font(&self, ui: &mut UiSystem, font: FontDesc) {
        ui.set_font(self.id, font);
    }

    pub fn set_color(&self, ui: &mut UiSystem, color: Color) {
        ui.set_color(self.id, color);
    }

    pub fn set_justify(&self, ui: &mut UiSystem, justify: Justify) {
        ui.set_justify(self.id, justify);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        clicks: u32,
    }

    impl FrameController for Probe {
        fn on_click(
            &mut self,
            _ui: &mut UiSystem,
            _frame: RegionId,
            _x: f32,
            _y: f32,
            _button: MouseButton,
        ) {
            self.clicks += 1;
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_controller_receives_clicks_and_downcasts() {
        let mut ui = UiSystem::new(200.0, 200.0);
        let f = ui.create_frame(None);
        ui.set_size(f, 50.0, 50.0);
        ui.set_point(
            f,
            crate::region::AnchorPoint::Center,
            ui.root(),
            crate::region::AnchorPoint::Center,
            0.0,
            0.0,
        );
        ui.set_mouse_enabled(f, true);
        ui.set_controller(f, Box::new(Probe { clicks: 0 }));

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        ui.mouse_released(0.0, 0.0, MouseButton::Left);

        let probe = ui.controller_mut::<Probe>(f).unwrap();
        assert_eq!(probe.clicks, 1);
    }
}
