//! Push buttons.
//!
//! A button is a mouse-enabled frame whose controller tracks an explicit
//! state machine (`Normal`, `Pushed`, `Disabled`) and swaps per-state
//! artwork. The press fires the frame's `Click` script, so application code
//! reacts the same way it would to a plain frame.

use std::any::Any;

use gossamer_render::Color;

use crate::layered::{DrawLayer, Justify};
use crate::region::RegionId;
use crate::script::MouseButton;
use crate::widget::{FontString, FrameController, Texture};
use crate::UiSystem;

/// The button state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    /// The primary button is held down on the frame.
    Pushed,
    /// Input is ignored and the disabled artwork shows.
    Disabled,
}

/// Which per-state artwork slot a texture fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Normal,
    Pushed,
    Disabled,
    Highlight,
}

struct ButtonController {
    state: ButtonState,
    hovered: bool,
    normal: Option<RegionId>,
    pushed: Option<RegionId>,
    disabled: Option<RegionId>,
    highlight: Option<RegionId>,
    label: Option<FontString>,
}

impl ButtonController {
    fn new() -> Self {
        Self {
            state: ButtonState::Normal,
            hovered: false,
            normal: None,
            pushed: None,
            disabled: None,
            highlight: None,
            label: None,
        }
    }

    fn slot(&self, slot: Slot) -> Option<RegionId> {
        match slot {
            Slot::Normal => self.normal,
            Slot::Pushed => self.pushed,
            Slot::Disabled => self.disabled,
            Slot::Highlight => self.highlight,
        }
    }

    fn set_slot(&mut self, slot: Slot, id: RegionId) {
        match slot {
            Slot::Normal => self.normal = Some(id),
            Slot::Pushed => self.pushed = Some(id),
            Slot::Disabled => self.disabled = Some(id),
            Slot::Highlight => self.highlight = Some(id),
        }
    }

    fn transition(&mut self, ui: &mut UiSystem, state: ButtonState) {
        self.state = state;
        self.sync_artwork(ui);
    }

    /// Show exactly the artwork the current state calls for.
    fn sync_artwork(&self, ui: &mut UiSystem) {
        let visible = |slot: Slot| match (self.state, slot) {
            (ButtonState::Normal, Slot::Normal) => true,
            (ButtonState::Pushed, Slot::Pushed) => true,
            (ButtonState::Disabled, Slot::Disabled) => true,
            (_, Slot::Highlight) => self.hovered && self.state != ButtonState::Disabled,
            _ => false,
        };
        for slot in [Slot::Normal, Slot::Pushed, Slot::Disabled, Slot::Highlight] {
            if let Some(id) = self.slot(slot) {
                if visible(slot) {
                    ui.show(id);
                } else {
                    ui.hide(id);
                }
            }
        }
    }
}

impl FrameController for ButtonController {
    fn on_click(&mut self, ui: &mut UiSystem, _frame: RegionId, _x: f32, _y: f32, button: MouseButton) {
        if self.state == ButtonState::Disabled || button != MouseButton::Left {
            return;
        }
        self.transition(ui, ButtonState::Pushed);
    }

    fn on_release(
        &mut self,
        ui: &mut UiSystem,
        _frame: RegionId,
        _x: f32,
        _y: f32,
        _button: MouseButton,
    ) {
        if self.state == ButtonState::Pushed {
            self.transition(ui, ButtonState::Normal);
        }
    }

    fn set_hovered(&mut self, ui: &mut UiSystem, _frame: RegionId, hovered: bool) {
        self.hovered = hovered;
        self.sync_artwork(ui);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Handle for a push button frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    frame: RegionId,
}

impl Button {
    /// Create a button under `parent` (the root when `None`).
    pub fn new(ui: &mut UiSystem, parent: Option<RegionId>) -> Self {
        let frame = ui.create_frame(parent);
        ui.set_mouse_enabled(frame, true);
        ui.set_controller(frame, Box::new(ButtonController::new()));
        Self { frame }
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.frame
    }

    /// Current state.
    pub fn state(&self, ui: &mut UiSystem) -> ButtonState {
        ui.controller_mut::<ButtonController>(self.frame)
            .map(|c| c.state)
            .unwrap_or_default()
    }

    /// Drop into `Disabled`: artwork swaps and clicks are ignored.
    pub fn disable(&self, ui: &mut UiSystem) {
        if let Some(mut c) = ui.take_controller(self.frame) {
            if let Some(b) = c.as_any_mut().downcast_mut::<ButtonController>() {
                b.transition(ui, ButtonState::Disabled);
            }
            ui.restore_controller(self.frame, c);
        }
    }

    /// Return to `Normal` from `Disabled`.
    pub fn enable(&self, ui: &mut UiSystem) {
        if let Some(mut c) = ui.take_controller(self.frame) {
            if let Some(b) = c.as_any_mut().downcast_mut::<ButtonController>() {
                if b.state == ButtonState::Disabled {
                    b.transition(ui, ButtonState::Normal);
                }
            }
            ui.restore_controller(self.frame, c);
        }
    }

    /// Set the label text, creating the label on first use.
    pub fn set_text(&self, ui: &mut UiSystem, text: impl Into<String>) {
        let label = match ui
            .controller_mut::<ButtonController>(self.frame)
            .and_then(|c| c.label)
        {
            Some(label) => label,
            None => {
                let label = FontString::new(ui, self.frame, DrawLayer::Overlay);
                label.set_all_points(ui, self.frame);
                label.set_justify(ui, Justify::Center);
                if let Some(c) = ui.controller_mut::<ButtonController>(self.frame) {
                    c.label = Some(label);
                }
                label
            }
        };
        label.set_text(ui, text);
    }

    /// The label text, if a label exists.
    pub fn text<'a>(&self, ui: &'a mut UiSystem) -> Option<&'a str> {
        let label = ui.controller_mut::<ButtonController>(self.frame)?.label?;
        label.text(ui)
    }

    /// Fill color for the idle artwork.
    pub fn set_normal_color(&self, ui: &mut UiSystem, color: Color) {
        let tex = self.ensure_texture(ui, Slot::Normal);
        ui.set_color(tex, color);
    }

    /// Fill color for the pressed artwork.
    pub fn set_pushed_color(&self, ui: &mut UiSystem, color: Color) {
        let tex = self.ensure_texture(ui, Slot::Pushed);
        ui.set_color(tex, color);
    }

    /// Fill color for the disabled artwork.
    pub fn set_disabled_color(&self, ui: &mut UiSystem, color: Color) {
        let tex = self.ensure_texture(ui, Slot::Disabled);
        ui.set_color(tex, color);
    }

    /// Fill color for the hover highlight.
    pub fn set_highlight_color(&self, ui: &mut UiSystem, color: Color) {
        let tex = self.ensure_texture(ui, Slot::Highlight);
        ui.set_color(tex, color);
    }

    fn ensure_texture(&self, ui: &mut UiSystem, slot: Slot) -> RegionId {
        if let Some(existing) = ui
            .controller_mut::<ButtonController>(self.frame)
            .and_then(|c| c.slot(slot))
        {
            return existing;
        }
        let layer = match slot {
            Slot::Highlight => DrawLayer::Highlight,
            _ => DrawLayer::Artwork,
        };
        let tex = Texture::new(ui, self.frame, layer);
        tex.set_all_points(ui, self.frame);
        if let Some(c) = ui.controller_mut::<ButtonController>(self.frame) {
            c.set_slot(slot, tex.id());
        }
        // A fresh texture starts shown; bring visibility in line with state.
        if let Some(mut c) = ui.take_controller(self.frame) {
            if let Some(b) = c.as_any_mut().downcast_mut::<ButtonController>() {
                b.sync_artwork(ui);
            }
            ui.restore_controller(self.frame, c);
        }
        tex.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::AnchorPoint;
    use crate::script::ScriptKind;
    use std::cell::Cell;
    use std::rc::Rc;

    fn centered_button(ui: &mut UiSystem) -> Button {
        let b = Button::new(ui, None);
        ui.set_size(b.id(), 80.0, 30.0);
        ui.set_point(b.id(), AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);
        b
    }

    #[test]
    fn test_click_pushes_then_releases() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let b = centered_button(&mut ui);
        let clicks = Rc::new(Cell::new(0));
        let seen = clicks.clone();
        ui.set_script(
            b.id(),
            ScriptKind::Click,
            Box::new(move |_, _, _| seen.set(seen.get() + 1)),
        );

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        assert_eq!(b.state(&mut ui), ButtonState::Pushed);
        ui.mouse_released(0.0, 0.0, MouseButton::Left);
        assert_eq!(b.state(&mut ui), ButtonState::Normal);
        // The widget does not swallow the Click script.
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_disabled_ignores_clicks() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let b = centered_button(&mut ui);
        b.disable(&mut ui);

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        assert_eq!(b.state(&mut ui), ButtonState::Disabled);
        ui.mouse_released(0.0, 0.0, MouseButton::Left);

        b.enable(&mut ui);
        assert_eq!(b.state(&mut ui), ButtonState::Normal);
    }

    #[test]
    fn test_state_artwork_visibility() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let b = centered_button(&mut ui);
        b.set_normal_color(&mut ui, Color::WHITE);
        b.set_pushed_color(&mut ui, Color::BLACK);

        let normal = ui
            .controller_mut::<ButtonController>(b.id())
            .and_then(|c| c.normal)
            .unwrap();
        let pushed = ui
            .controller_mut::<ButtonController>(b.id())
            .and_then(|c| c.pushed)
            .unwrap();

        assert!(ui.is_shown(normal));
        assert!(!ui.is_shown(pushed));

        ui.mouse_pressed(0.0, 0.0, MouseButton::Left);
        assert!(!ui.is_shown(normal));
        assert!(ui.is_shown(pushed));
        ui.mouse_released(0.0, 0.0, MouseButton::Left);
    }

    #[test]
    fn test_label_text() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let b = centered_button(&mut ui);
        b.set_text(&mut ui, "Go");
        assert_eq!(b.text(&mut ui), Some("Go"));
    }
}
