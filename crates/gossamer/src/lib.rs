//! Gossamer, a retained-mode UI toolkit for 2D canvases.
//!
//! The toolkit keeps a persistent hierarchy of *regions*: frames (which own
//! children, participate in z-order and receive input) and layered regions
//! (textures and text inside a frame's draw list). Geometry is declarative:
//! regions are positioned by anchoring symbolic points to each other and the
//! constraint solver derives concrete rectangles (or disks) eagerly on every
//! mutation.
//!
//! Everything hangs off an explicit [`UiSystem`] context object; there is no
//! global state. The application loop feeds it translated input events
//! (canvas coordinates, Y up, origin at the canvas center), ticks it with
//! [`UiSystem::update`], and paints it through any [`RenderBackend`]
//! implementation.
//!
//! ```
//! use gossamer::{AnchorPoint, UiSystem};
//!
//! let mut ui = UiSystem::new(800.0, 600.0);
//! let panel = ui.create_frame(None);
//! ui.set_size(panel, 100.0, 100.0);
//! ui.set_point(panel, AnchorPoint::Center, ui.root(), AnchorPoint::Center, 0.0, 0.0);
//! assert_eq!(ui.left(panel), -50.0);
//! ```

pub mod error;
pub mod frame;
pub mod input;
pub mod layered;
pub mod logging;
pub mod region;
pub mod script;
pub(crate) mod strata;
pub mod system;
pub mod widget;

pub use error::{UiError, UiResult};
pub use frame::{DragRegistration, FrameStrata};
pub use input::DRAG_DEADZONE;
pub use layered::{DrawLayer, Justify};
pub use region::{Anchor, AnchorPoint, RegionId, ResolvedShape};
pub use script::{MouseButton, ScriptEvent, ScriptHandler, ScriptKind};
pub use system::UiSystem;
pub use widget::{
    Button, ButtonState, EditBox, FontString, FrameController, Orientation, ScrollFrame, Slider,
    StatusBar, Texture, Tooltip,
};

pub use gossamer_render::{
    Color, DrawCall, FontDesc, Point, Rect, RecordingBackend, RenderBackend, Size, TextureHandle,
};
