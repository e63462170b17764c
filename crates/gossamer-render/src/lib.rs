//! Rendering interface and geometry primitives for Gossamer.
//!
//! This crate defines the seam between the retained-mode UI core and the
//! concrete 2D renderer (canvas, WebGL, software; the core does not care):
//!
//! - [`Point`], [`Size`], [`Rect`]: canvas-space geometry, Y-up with the
//!   origin at the canvas center
//! - [`Color`]: RGBA with silently clamped channels
//! - [`RenderBackend`]: the primitive draw + text-metrics trait
//! - [`RecordingBackend`]: a call-recording backend for tests

mod backend;
mod color;
mod error;
mod types;

pub use backend::{DrawCall, FontDesc, RecordingBackend, RenderBackend, TextureHandle};
pub use color::Color;
pub use error::RenderError;
pub use types::{Point, Rect, Size};
