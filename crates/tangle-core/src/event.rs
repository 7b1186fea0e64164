#![forbid(unsafe_code)]

//! Canvas input events.
//!
//! Hosts normalize their native pointer/keyboard streams into these types
//! and feed them to behaviors through [`crate::graph::GraphHost`]-driven
//! dispatch. Events are plain data: no timestamps (the dispatcher passes
//! the current instant alongside the event) and no backpointers into host
//! state beyond the optional hit `target`.

use bitflags::bitflags;

use crate::geometry::Point;
use crate::id::{ItemId, ItemKind};

bitflags! {
    /// Modifier keys active during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

/// Which pointer button an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed.
    Down,

    /// Pointer moved (with or without a button held).
    Move,

    /// Button released.
    Up,
}

/// A pointer event over the canvas.
///
/// `target` is the topmost item under the pointer as resolved by the
/// host's cheap synchronous hit test; `None` means bare canvas. The
/// expensive element-stack hit test used for drop resolution is a separate
/// asynchronous probe (see [`ProbeEvent`]).
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub target: Option<ItemId>,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self {
            kind,
            position,
            button: PointerButton::Left,
            modifiers: Modifiers::empty(),
            target: None,
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ItemId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Key identity for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Enter,
    Char(char),
}

/// A keyboard event while the canvas has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Handle identifying one asynchronous hit-test request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(u64);

impl ProbeId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The item an asynchronous hit test resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub id: ItemId,
    pub kind: ItemKind,
}

/// Resolution of an asynchronous hit-test probe.
///
/// `hit: None` means the probe found only bare canvas under the point.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeEvent {
    pub id: ProbeId,
    pub hit: Option<DropTarget>,
}

/// Any input a behavior can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Probe(ProbeEvent),
}

impl InputEvent {
    /// Convenience constructor for a pointer event.
    #[must_use]
    pub const fn pointer(kind: PointerKind, position: Point) -> Self {
        Self::Pointer(PointerEvent::new(kind, position))
    }

    #[must_use]
    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(ev) => Some(ev),
            _ => None,
        }
    }
}
