//! Script events and handler registration.
//!
//! Every named event kind is a variant of [`ScriptEvent`] carrying a fixed
//! payload, with a parallel payload-less [`ScriptKind`] used as the
//! registration key. One dispatch path serves all kinds.
//!
//! Handlers receive the [`crate::UiSystem`] mutably and may freely mutate the
//! hierarchy, including hiding or re-registering the target. To make that
//! safe the registry removes a handler for the duration of its own call and
//! restores it afterwards unless the handler installed a replacement.

use std::collections::HashMap;

use crate::region::RegionId;
use crate::UiSystem;

/// A mouse button, as delivered by the application loop.
///
/// `Left` is the primary button (top-level raise, drag default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// The registration key for a script handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Click,
    MouseUp,
    Enter,
    Leave,
    MouseMoved,
    Wheel,
    KeyDown,
    KeyUp,
    Update,
    Shown,
    Hidden,
    DragStart,
    DragStop,
    ValueChanged,
    TextChanged,
    EnterPressed,
}

/// A fired event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    /// Primary interaction on a frame or widget.
    Click { x: f32, y: f32, button: MouseButton },
    /// Mouse button released over (or after clicking) the frame.
    MouseUp { x: f32, y: f32, button: MouseButton },
    /// Mouse moved onto the frame.
    Enter,
    /// Mouse left the frame.
    Leave,
    /// Mouse moved while this frame is the top mouse frame.
    MouseMoved { x: f32, y: f32, dx: f32, dy: f32 },
    /// Wheel scrolled anywhere on the canvas.
    Wheel { dx: f32, dy: f32 },
    /// Key pressed (focus target or broadcast).
    KeyDown { key: String, repeat: bool },
    /// Key released.
    KeyUp { key: String },
    /// Per-tick update.
    Update { dt_ms: f32 },
    /// The region's own shown flag flipped on.
    Shown,
    /// The region's own shown flag flipped off.
    Hidden,
    /// A drag session crossed the deadzone and began moving the frame.
    DragStart,
    /// A drag session ended (any release).
    DragStop,
    /// A widget value changed (slider, status bar).
    ValueChanged { value: f32 },
    /// An edit box's text changed.
    TextChanged { text: String },
    /// Enter pressed inside a focused edit box.
    EnterPressed,
}

impl ScriptEvent {
    /// The registration key this payload belongs to.
    pub fn kind(&self) -> ScriptKind {
        match self {
            ScriptEvent::Click { .. } => ScriptKind::Click,
            ScriptEvent::MouseUp { .. } => ScriptKind::MouseUp,
            ScriptEvent::Enter => ScriptKind::Enter,
            ScriptEvent::Leave => ScriptKind::Leave,
            ScriptEvent::MouseMoved { .. } => ScriptKind::MouseMoved,
            ScriptEvent::Wheel { .. } => ScriptKind::Wheel,
            ScriptEvent::KeyDown { .. } => ScriptKind::KeyDown,
            ScriptEvent::KeyUp { .. } => ScriptKind::KeyUp,
            ScriptEvent::Update { .. } => ScriptKind::Update,
            ScriptEvent::Shown => ScriptKind::Shown,
            ScriptEvent::Hidden => ScriptKind::Hidden,
            ScriptEvent::DragStart => ScriptKind::DragStart,
            ScriptEvent::DragStop => ScriptKind::DragStop,
            ScriptEvent::ValueChanged { .. } => ScriptKind::ValueChanged,
            ScriptEvent::TextChanged { .. } => ScriptKind::TextChanged,
            ScriptEvent::EnterPressed => ScriptKind::EnterPressed,
        }
    }
}

/// A registered script handler.
pub type ScriptHandler = Box<dyn FnMut(&mut UiSystem, RegionId, &ScriptEvent)>;

/// Handler storage keyed by (region, kind).
#[derive(Default)]
pub(crate) struct ScriptRegistry {
    handlers: HashMap<(RegionId, ScriptKind), ScriptHandler>,
}

impl ScriptRegistry {
    /// Install a handler, replacing any existing one for the same key.
    pub(crate) fn set(&mut self, region: RegionId, kind: ScriptKind, handler: ScriptHandler) {
        self.handlers.insert((region, kind), handler);
    }

    /// Remove a handler; missing handlers are a silent no-op.
    pub(crate) fn clear(&mut self, region: RegionId, kind: ScriptKind) {
        self.handlers.remove(&(region, kind));
    }

    /// Whether a handler is registered.
    pub(crate) fn contains(&self, region: RegionId, kind: ScriptKind) -> bool {
        self.handlers.contains_key(&(region, kind))
    }

    /// Take a handler out for the duration of its own invocation.
    pub(crate) fn take(&mut self, region: RegionId, kind: ScriptKind) -> Option<ScriptHandler> {
        self.handlers.remove(&(region, kind))
    }

    /// Put a taken handler back, unless the invocation installed a new one.
    pub(crate) fn restore(&mut self, region: RegionId, kind: ScriptKind, handler: ScriptHandler) {
        self.handlers.entry((region, kind)).or_insert(handler);
    }

    /// All regions with a handler for `kind` (broadcast targets).
    pub(crate) fn regions_with(&self, kind: ScriptKind) -> Vec<RegionId> {
        self.handlers
            .keys()
            .filter(|(_, k)| *k == kind)
            .map(|(r, _)| *r)
            .collect()
    }

    /// Drop every handler owned by a removed region.
    pub(crate) fn remove_region(&mut self, region: RegionId) {
        self.handlers.retain(|(r, _), _| *r != region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<RegionId> {
        let mut map: SlotMap<RegionId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_event_kind_mapping() {
        let ev = ScriptEvent::Click {
            x: 0.0,
            y: 0.0,
            button: MouseButton::Left,
        };
        assert_eq!(ev.kind(), ScriptKind::Click);
        assert_eq!(ScriptEvent::Leave.kind(), ScriptKind::Leave);
    }

    #[test]
    fn test_registry_take_restore() {
        let ids = ids(1);
        let mut reg = ScriptRegistry::default();
        reg.set(ids[0], ScriptKind::Click, Box::new(|_, _, _| {}));

        let h = reg.take(ids[0], ScriptKind::Click).unwrap();
        assert!(!reg.contains(ids[0], ScriptKind::Click));

        reg.restore(ids[0], ScriptKind::Click, h);
        assert!(reg.contains(ids[0], ScriptKind::Click));
    }

    #[test]
    fn test_restore_keeps_replacement() {
        let ids = ids(1);
        let mut reg = ScriptRegistry::default();
        reg.set(ids[0], ScriptKind::Click, Box::new(|_, _, _| {}));

        let old = reg.take(ids[0], ScriptKind::Click).unwrap();
        // Handler re-registered itself mid-call.
        reg.set(ids[0], ScriptKind::Click, Box::new(|_, _, _| {}));
        reg.restore(ids[0], ScriptKind::Click, old);

        // The replacement must win; restore must not clobber it.
        assert!(reg.contains(ids[0], ScriptKind::Click));
        assert_eq!(reg.regions_with(ScriptKind::Click).len(), 1);
    }

    #[test]
    fn test_broadcast_targets() {
        let ids = ids(3);
        let mut reg = ScriptRegistry::default();
        reg.set(ids[0], ScriptKind::Wheel, Box::new(|_, _, _| {}));
        reg.set(ids[2], ScriptKind::Wheel, Box::new(|_, _, _| {}));
        reg.set(ids[1], ScriptKind::Click, Box::new(|_, _, _| {}));

        let mut targets = reg.regions_with(ScriptKind::Wheel);
        targets.sort();
        let mut expected = vec![ids[0], ids[2]];
        expected.sort();
        assert_eq!(targets, expected);
    }
}
