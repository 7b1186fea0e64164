#![forbid(unsafe_code)]

//! Tangle public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

use web_time::Instant;

// --- Core re-exports -------------------------------------------------------

pub use tangle_core::{
    ArrowConfig, ComboData, DropTarget, EdgeData, EdgeRouting, GraphEvent, GraphHost, GraphView,
    InputEvent, ItemId, ItemKind, KeyCode, KeyEvent, Modifiers, NodeData, Point, PointerButton,
    PointerEvent, PointerKind, PositionUpdate, ProbeEvent, ProbeId, Rect, RouteStrategy, ShapeId,
    ShapePayload, ShapeSpec, ShapeStyle, TransientKey, TransientSpec,
};

// --- Routing re-exports ----------------------------------------------------

pub use tangle_route::{ObstacleBox, ObstacleSet, RouterConfig};

// --- Rendering re-exports --------------------------------------------------

pub use tangle_render::{EdgeRenderer, PathPrimitive, PathSegment, build_path};

// --- Interaction re-exports ------------------------------------------------

pub use tangle_interact::{
    Behavior, Behaviors, DRAGGING_STATE, DragConfig, DragMachine, Handled, VisibilityLedger,
};

// --- Interaction facade ----------------------------------------------------

/// Wires a behavior stack to a host event loop.
///
/// The host normalizes its input into [`InputEvent`]s, forwards each one
/// through [`Interaction::dispatch`], and calls [`Interaction::poll`] once
/// per tick so trailing throttle edges and debounced settles fire.
#[derive(Debug, Default)]
pub struct Interaction {
    behaviors: Behaviors,
}

impl Interaction {
    /// Create an interaction with no behaviors attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interaction with a drag behavior built from `config`.
    #[must_use]
    pub fn with_drag(config: DragConfig) -> Self {
        Self {
            behaviors: Behaviors::new().with(DragMachine::new(config)),
        }
    }

    /// Append another behavior. Dispatch order is registration order.
    #[must_use]
    pub fn with(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behaviors = self.behaviors.with(behavior);
        self
    }

    /// Install every behavior on `host`.
    pub fn activate(&mut self, host: &mut dyn GraphHost) {
        self.behaviors.activate(host);
    }

    /// Dispatch one event, stopping at the first behavior that consumes it.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        now: Instant,
        host: &mut dyn GraphHost,
    ) -> Handled {
        self.behaviors.dispatch(event, now, host)
    }

    /// Drive timers. Call once per host tick.
    pub fn poll(&mut self, now: Instant, host: &mut dyn GraphHost) {
        self.behaviors.poll(now, host);
    }

    /// Remove every behavior, unwinding any gesture still in flight.
    pub fn deactivate(&mut self, host: &mut dyn GraphHost) {
        self.behaviors.deactivate(host);
    }
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Behavior, Behaviors, DragConfig, DragMachine, EdgeData, EdgeRenderer, GraphHost,
        GraphView, Handled, InputEvent, Interaction, ItemId, NodeData, Point, PointerEvent,
        PointerKind, Rect,
    };

    pub use crate::{core, interact, render, route};
}

pub use tangle_core as core;
pub use tangle_interact as interact;
pub use tangle_render as render;
pub use tangle_route as route;
