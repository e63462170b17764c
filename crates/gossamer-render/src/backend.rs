//! The pluggable rendering seam.
//!
//! The toolkit core never talks to a GPU or a canvas directly; it emits
//! primitive draw calls through [`RenderBackend`]. Backends are synchronous
//! and free to batch internally; no batching contract is imposed here.
//!
//! [`RecordingBackend`] is a backend that records every call it receives,
//! used by the toolkit's own tests and useful for golden-testing widget code.

use crate::color::Color;
use crate::types::{Point, Rect};

/// Opaque handle to a texture owned by the backend.
///
/// The core only ever stores and forwards these; allocation and lookup are
/// backend business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// A font request: family name plus pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDesc {
    pub family: String,
    pub size: f32,
}

impl FontDesc {
    /// Create a font descriptor.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for FontDesc {
    fn default() -> Self {
        Self {
            family: "sans-serif".into(),
            size: 14.0,
        }
    }
}

/// Primitive draw interface implemented by rendering backends.
///
/// All rectangles are in canvas space (origin at center, Y up); converting to
/// the backend's native coordinate system is the backend's job.
pub trait RenderBackend {
    /// Fill an axis-aligned rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a disk with a solid color.
    fn fill_disk(&mut self, center: Point, radius: f32, color: Color);

    /// Draw a textured quad, tinted by `tint` (use [`Color::WHITE`] for none).
    fn draw_texture(&mut self, texture: TextureHandle, rect: Rect, tint: Color);

    /// Draw a single line of text with its bottom-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, font: &FontDesc, color: Color);

    /// Set or clear the scissor/clip rectangle applied to subsequent calls.
    fn set_scissor(&mut self, rect: Option<Rect>);

    /// Measure the width of `text` rendered with `font`, in pixels.
    fn text_width(&self, text: &str, font: &FontDesc) -> f32;

    /// Height of one line of text in `font`, in pixels.
    fn line_height(&self, font: &FontDesc) -> f32;
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect {
        rect: Rect,
        color: Color,
    },
    Disk {
        center: Point,
        radius: f32,
        color: Color,
    },
    Texture {
        texture: TextureHandle,
        rect: Rect,
        tint: Color,
    },
    Text {
        text: String,
        origin: Point,
        color: Color,
    },
    Scissor(Option<Rect>),
}

/// A backend that records draw calls instead of rendering them.
///
/// Text metrics are synthetic but deterministic: every glyph is
/// `0.5 * font.size` wide and a line is exactly `font.size` tall.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
}

impl RecordingBackend {
    /// Create an empty recording backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Discard the recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Count calls matching a predicate.
    pub fn count_matching(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl RenderBackend for RecordingBackend {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Rect { rect, color });
    }

    fn fill_disk(&mut self, center: Point, radius: f32, color: Color) {
        self.calls.push(DrawCall::Disk {
            center,
            radius,
            color,
        });
    }

    fn draw_texture(&mut self, texture: TextureHandle, rect: Rect, tint: Color) {
        self.calls.push(DrawCall::Texture {
            texture,
            rect,
            tint,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, _font: &FontDesc, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            origin,
            color,
        });
    }

    fn set_scissor(&mut self, rect: Option<Rect>) {
        self.calls.push(DrawCall::Scissor(rect));
    }

    fn text_width(&self, text: &str, font: &FontDesc) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }

    fn line_height(&self, font: &FontDesc) -> f32 {
        font.size
    }
}
