//! Single-line text entry.
//!
//! Clicking an edit box takes exclusive keyboard focus and places the cursor
//! at the click point; keys then route to the controller until focus is
//! released (`Escape`, or the application moving focus elsewhere). Single
//! character key names insert text; editing keys move or delete. Every text
//! change fires `TextChanged`, and `Enter` fires `EnterPressed`.
//!
//! Cursor placement uses the same per-glyph advance estimate the test
//! backend reports: half the font size per character.

use std::any::Any;

use gossamer_render::{Color, FontDesc};

use crate::layered::{DrawLayer, Justify};
use crate::region::{AnchorPoint, RegionId};
use crate::script::{MouseButton, ScriptEvent};
use crate::widget::{FontString, FrameController, Texture};
use crate::UiSystem;

/// Cursor blink half-period.
const BLINK_MS: f32 = 500.0;

struct EditBoxController {
    text: String,
    /// Cursor position in characters.
    cursor: usize,
    font: FontDesc,
    blink_ms: f32,
    blink_on: bool,
    label: Option<FontString>,
    caret: Option<RegionId>,
}

impl EditBoxController {
    fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            font: FontDesc::default(),
            blink_ms: 0.0,
            blink_on: true,
            label: None,
            caret: None,
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn glyph_advance(&self) -> f32 {
        self.font.size * 0.5
    }

    fn set_text(&mut self, ui: &mut UiSystem, frame: RegionId, text: String) {
        self.text = text;
        self.cursor = self.cursor.min(self.char_count());
        if let Some(label) = self.label {
            label.set_text(ui, self.text.clone());
        }
        self.sync_caret(ui, frame);
        ui.fire(
            frame,
            &ScriptEvent::TextChanged {
                text: self.text.clone(),
            },
        );
    }

    fn insert(&mut self, ui: &mut UiSystem, frame: RegionId, s: &str) {
        let mut text = self.text.clone();
        text.insert_str(self.byte_at(self.cursor), s);
        self.cursor += s.chars().count();
        self.set_text(ui, frame, text);
    }

    fn delete_back(&mut self, ui: &mut UiSystem, frame: RegionId) {
        if self.cursor == 0 {
            return;
        }
        let mut text = self.text.clone();
        let start = self.byte_at(self.cursor - 1);
        let end = self.byte_at(self.cursor);
        text.replace_range(start..end, "");
        self.cursor -= 1;
        self.set_text(ui, frame, text);
    }

    fn delete_forward(&mut self, ui: &mut UiSystem, frame: RegionId) {
        if self.cursor >= self.char_count() {
            return;
        }
        let mut text = self.text.clone();
        let start = self.byte_at(self.cursor);
        let end = self.byte_at(self.cursor + 1);
        text.replace_range(start..end, "");
        self.set_text(ui, frame, text);
    }

    fn move_cursor(&mut self, ui: &mut UiSystem, frame: RegionId, to: usize) {
        self.cursor = to.min(self.char_count());
        self.blink_ms = 0.0;
        self.blink_on = true;
        self.sync_caret(ui, frame);
    }

    /// Place the caret texture after the character the cursor sits on.
    fn sync_caret(&self, ui: &mut UiSystem, frame: RegionId) {
        let Some(caret) = self.caret else {
            return;
        };
        let x = self.cursor as f32 * self.glyph_advance();
        ui.clear_all_points(caret);
        ui.set_point(caret, AnchorPoint::Left, frame, AnchorPoint::Left, x, 0.0);
        ui.set_size(caret, 1.0, self.font.size);
    }
}

impl FrameController for EditBoxController {
    fn on_click(&mut self, ui: &mut UiSystem, frame: RegionId, x: f32, _y: f32, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        ui.set_keyboard_focus(Some(frame));
        let advance = self.glyph_advance();
        let to = if advance > 0.0 {
            (((x - ui.left(frame)) / advance).round().max(0.0)) as usize
        } else {
            self.char_count()
        };
        self.move_cursor(ui, frame, to);
        if let Some(caret) = self.caret {
            ui.show(caret);
        }
    }

    fn on_key(&mut self, ui: &mut UiSystem, frame: RegionId, key: &str, _repeat: bool) -> bool {
        match key {
            "Backspace" => self.delete_back(ui, frame),
            "Delete" => self.delete_forward(ui, frame),
            "Left" => self.move_cursor(ui, frame, self.cursor.saturating_sub(1)),
            "Right" => self.move_cursor(ui, frame, self.cursor + 1),
            "Home" => self.move_cursor(ui, frame, 0),
            "End" => self.move_cursor(ui, frame, self.char_count()),
            "Enter" => {
                ui.fire(frame, &ScriptEvent::EnterPressed);
            }
            "Escape" => {
                ui.set_keyboard_focus(None);
                if let Some(caret) = self.caret {
                    ui.hide(caret);
                }
            }
            _ => {
                // Single-character key names are text input.
                if key.chars().count() == 1 {
                    let owned = key.to_owned();
                    self.insert(ui, frame, &owned);
                } else {
                    return false;
                }
            }
        }
        true
    }

    fn on_update(&mut self, ui: &mut UiSystem, frame: RegionId, dt_ms: f32) {
        let Some(caret) = self.caret else {
            return;
        };
        if ui.keyboard_focus() != Some(frame) {
            ui.hide(caret);
            return;
        }
        self.blink_ms += dt_ms;
        while self.blink_ms >= BLINK_MS {
            self.blink_ms -= BLINK_MS;
            self.blink_on = !self.blink_on;
        }
        if self.blink_on {
            ui.show(caret);
        } else {
            ui.hide(caret);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Handle for an edit box frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditBox {
    frame: RegionId,
}

impl EditBox {
    /// Create an edit box under `parent` (the root when `None`).
    pub fn new(ui: &mut UiSystem, parent: Option<RegionId>) -> Self {
        let frame = ui.create_frame(parent);
        ui.set_mouse_enabled(frame, true);
        ui.set_controller(frame, Box::new(EditBoxController::new()));

        let this = Self { frame };
        this.ensure_artwork(ui);
        this
    }

    #[inline]
    pub fn id(&self) -> RegionId {
        self.frame
    }

    /// Current contents.
    pub fn text(&self, ui: &mut UiSystem) -> String {
        ui.controller_mut::<EditBoxController>(self.frame)
            .map(|c| c.text.clone())
            .unwrap_or_default()
    }

    /// Replace the contents; the cursor clamps to the new end. Fires
    /// `TextChanged`.
    pub fn set_text(&self, ui: &mut UiSystem, text: impl Into<String>) {
        let frame = self.frame;
        let text = text.into();
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(e) = c.as_any_mut().downcast_mut::<EditBoxController>() {
                e.set_text(ui, frame, text);
            }
            ui.restore_controller(frame, c);
        }
    }

    /// Cursor position in characters.
    pub fn cursor(&self, ui: &mut UiSystem) -> usize {
        ui.controller_mut::<EditBoxController>(self.frame)
            .map(|c| c.cursor)
            .unwrap_or(0)
    }

    /// Set the font used for display and cursor metrics.
    pub fn set_font(&self, ui: &mut UiSystem, font: FontDesc) {
        let label = ui
            .controller_mut::<EditBoxController>(self.frame)
            .map(|c| {
                c.font = font.clone();
                c.label
            })
            .unwrap_or(None);
        if let Some(label) = label {
            label.set_font(ui, font);
        }
    }

    /// Text color.
    pub fn set_text_color(&self, ui: &mut UiSystem, color: Color) {
        let (label, caret) = match ui.controller_mut::<EditBoxController>(self.frame) {
            Some(c) => (c.label, c.caret),
            None => return,
        };
        if let Some(label) = label {
            label.set_color(ui, color);
        }
        if let Some(caret) = caret {
            ui.set_color(caret, color);
        }
    }

    fn ensure_artwork(&self, ui: &mut UiSystem) {
        let frame = self.frame;
        let label = FontString::new(ui, frame, DrawLayer::Artwork);
        label.set_all_points(ui, frame);
        label.set_justify(ui, Justify::Left);

        let caret = Texture::new(ui, frame, DrawLayer::Overlay);
        ui.hide(caret.id());

        if let Some(c) = ui.controller_mut::<EditBoxController>(frame) {
            c.label = Some(label);
            c.caret = Some(caret.id());
        }
        if let Some(mut c) = ui.take_controller(frame) {
            if let Some(e) = c.as_any_mut().downcast_mut::<EditBoxController>() {
                e.sync_caret(ui, frame);
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

    fn edit_box(ui: &mut UiSystem) -> EditBox {
        let e = EditBox::new(ui, None);
        ui.set_size(e.id(), 120.0, 20.0);
        ui.set_point(e.id(), AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);
        e
    }

    fn focus(ui: &mut UiSystem, e: &EditBox) {
        ui.mouse_pressed(ui.left(e.id()), 0.0, MouseButton::Left);
        ui.mouse_released(ui.left(e.id()), 0.0, MouseButton::Left);
    }

    #[test]
    fn test_click_takes_focus_and_types() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let e = edit_box(&mut ui);
        focus(&mut ui, &e);
        assert_eq!(ui.keyboard_focus(), Some(e.id()));

        assert!(ui.key_pressed("h", false));
        assert!(ui.key_pressed("i", false));
        assert_eq!(e.text(&mut ui), "hi");
        assert_eq!(e.cursor(&mut ui), 2);
    }

    #[test]
    fn test_editing_keys() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let e = edit_box(&mut ui);
        e.set_text(&mut ui, "abc");
        focus(&mut ui, &e);
        // Click at the left edge put the cursor at 0.
        assert_eq!(e.cursor(&mut ui), 0);

        ui.key_pressed("End", false);
        assert_eq!(e.cursor(&mut ui), 3);
        ui.key_pressed("Backspace", false);
        assert_eq!(e.text(&mut ui), "ab");
        ui.key_pressed("Home", false);
        ui.key_pressed("Delete", false);
        assert_eq!(e.text(&mut ui), "b");
        ui.key_pressed("Right", false);
        ui.key_pressed("x", false);
        assert_eq!(e.text(&mut ui), "bx");
    }

    #[test]
    fn test_enter_and_escape() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let e = edit_box(&mut ui);
        focus(&mut ui, &e);
        let entered = Rc::new(Cell::new(0));
        let seen = entered.clone();
        ui.set_script(
            e.id(),
            ScriptKind::EnterPressed,
            Box::new(move |_, _, _| seen.set(seen.get() + 1)),
        );

        ui.key_pressed("Enter", false);
        assert_eq!(entered.get(), 1);

        ui.key_pressed("Escape", false);
        assert_eq!(ui.keyboard_focus(), None);
        // Keys now broadcast instead of routing to the box.
        assert!(!ui.key_pressed("z", false));
        assert_eq!(e.text(&mut ui), "");
    }

    #[test]
    fn test_text_changed_fires() {
        let mut ui = UiSystem::new(400.0, 400.0);
        let e = edit_box(&mut ui);
        focus(&mut ui, &e);
        let last = Rc::new(std::cell::RefCell::new(String::new()));
        let seen = last.clone();
        ui.set_script(
            e.id(),
            ScriptKind::TextChanged,
            Box::new(move |_, _, ev| {
                if let ScriptEvent::TextChanged { text } = ev {
                    *seen.borrow_mut() = text.clone();
                }
            }),
        );

        ui.key_pressed("a", false);
        assert_eq!(&*last.borrow(), "a");
    }
}
