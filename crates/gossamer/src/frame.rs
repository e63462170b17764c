//! Frame state: strata, levels, input flags, drag registration.
//!
//! A frame is a region that owns children, participates in z-order and
//! receives input. The data here is pure state; ordering lives in
//! [`crate::strata`] and dispatch in [`crate::input`].

use gossamer_render::{Point, Rect};

use crate::region::RegionId;
use crate::script::MouseButton;
use crate::widget::FrameController;

/// Coarse z-order bucket. Strata draw in declaration order, `Below` first
/// (bottom-most) up to `Tooltip` (top-most).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameStrata {
    Below,
    Background,
    Low,
    Medium,
    High,
    Dialog,
    Fullscreen,
    Tooltip,
}

impl FrameStrata {
    /// All strata, bottom to top.
    pub const ALL: [FrameStrata; 8] = [
        FrameStrata::Below,
        FrameStrata::Background,
        FrameStrata::Low,
        FrameStrata::Medium,
        FrameStrata::High,
        FrameStrata::Dialog,
        FrameStrata::Fullscreen,
        FrameStrata::Tooltip,
    ];

    /// Index into per-stratum tables.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// How a frame participates in drag gestures.
///
/// Registration alone does nothing; a drag session begins when a press with
/// the registered button lands in the registered area, and the session moves
/// the frame only after the deadzone is crossed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragRegistration {
    /// Any press inside the frame starts a drag.
    WholeFrame {
        /// Trigger button.
        button: MouseButton,
    },
    /// The press must land inside a sub-rectangle, given relative to the
    /// frame's bottom-left corner.
    Rect {
        /// Grab area, frame-local (bottom-left relative).
        rect: Rect,
        /// Trigger button.
        button: MouseButton,
    },
    /// The press must land within `radius` of a point given relative to the
    /// frame's center.
    Disk {
        /// Grab center, relative to the frame center.
        center: Point,
        /// Grab radius in pixels.
        radius: f32,
        /// Trigger button.
        button: MouseButton,
    },
    /// Pressing this frame drags another frame (e.g. a title bar dragging
    /// its window).
    Delegated {
        /// The frame that actually moves.
        target: RegionId,
        /// Trigger button.
        button: MouseButton,
    },
}

impl DragRegistration {
    /// The mouse button that triggers this registration.
    pub fn button(&self) -> MouseButton {
        match *self {
            DragRegistration::WholeFrame { button }
            | DragRegistration::Rect { button, .. }
            | DragRegistration::Disk { button, .. }
            | DragRegistration::Delegated { button, .. } => button,
        }
    }
}

/// Frame payload of a region slot.
pub struct FrameData {
    /// Coarse ordering bucket.
    pub(crate) strata: FrameStrata,
    /// Fine ordering within the stratum.
    pub(crate) level: i32,
    /// Auto-raise within the stratum on primary click.
    pub(crate) top_level: bool,
    /// Whether the frame takes part in hit testing and click dispatch.
    pub(crate) mouse_enabled: bool,
    /// Whether descendants are scissored to this frame's bounds.
    pub(crate) clip_children: bool,
    /// Child regions (frames and layered regions), in creation order.
    pub(crate) children: Vec<RegionId>,
    /// Active drag registration, if any.
    pub(crate) drag: Option<DragRegistration>,
    /// Frame the drag logic clamps to; defaults to the root when unset.
    pub(crate) clamp_to: Option<RegionId>,
    /// Widget capability object; plain frames have none.
    pub(crate) controller: Option<Box<dyn FrameController>>,
}

impl Default for FrameData {
    fn default() -> Self {
        Self {
            strata: FrameStrata::Medium,
            level: 0,
            top_level: false,
            mouse_enabled: false,
            clip_children: false,
            children: Vec::new(),
            drag: None,
            clamp_to: None,
            controller: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strata_bottom_to_top() {
        assert!(FrameStrata::Below < FrameStrata::Background);
        assert!(FrameStrata::Fullscreen < FrameStrata::Tooltip);
        assert_eq!(FrameStrata::ALL[0], FrameStrata::Below);
        assert_eq!(FrameStrata::ALL[7], FrameStrata::Tooltip);
    }

    #[test]
    fn test_drag_registration_button() {
        let reg = DragRegistration::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            button: MouseButton::Right,
        };
        assert_eq!(reg.button(), MouseButton::Right);
    }
}
