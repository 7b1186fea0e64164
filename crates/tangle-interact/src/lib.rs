#![forbid(unsafe_code)]

//! Pointer-driven interaction for node-link diagrams.
//!
//! # Role in Tangle
//! `tangle-interact` owns gestures: it consumes normalized input events,
//! mutates the graph through the [`tangle_core::GraphHost`] contract, and
//! never talks to a rendering backend directly.
//!
//! # Primary responsibilities
//! - **Behavior dispatch**: the [`Behavior`] trait and the fixed
//!   [`Behaviors`] registry hosts drive from their event loop.
//! - **Node dragging**: [`DragMachine`], an Idle → Armed → Dragging →
//!   Settling state machine covering live, transient, and delegate
//!   movement, hidden-item bookkeeping, near-edge re-routing, and combo
//!   reparenting from a drop probe.
//! - **Gesture bookkeeping**: the [`VisibilityLedger`] restore record and
//!   the [`Throttle`]/[`Debounce`] timer gates, all driven by explicit
//!   `Instant` values.
//!
//! # How it fits in the system
//! Hosts construct a [`DragMachine`] with a [`DragConfig`], register it in
//! a [`Behaviors`] set, forward input events, and call
//! [`Behaviors::poll`] once per tick. Everything else happens through the
//! host traits in `tangle-core`.

pub mod behavior;
pub mod config;
pub mod drag;
pub mod ledger;
pub mod session;
pub mod timing;

pub use behavior::{Behavior, Behaviors, Handled};
pub use config::{DragConfig, DragModes, ShouldBegin};
pub use drag::{DRAGGING_STATE, DROP_PROBE_TIMEOUT, DragMachine};
pub use ledger::VisibilityLedger;
pub use timing::{Debounce, Throttle};
