#![forbid(unsafe_code)]

//! Core: identities, geometry, events, data model, and host contracts.
//!
//! # Role in Tangle
//! `tangle-core` defines the shared vocabulary of the workspace. Every
//! other crate speaks in these types: the router consumes obstacle
//! snapshots built from [`graph::GraphView`], the renderer emits
//! [`shape::ShapeSpec`] values, and the interaction crate drives
//! [`graph::GraphHost`] writes.
//!
//! # Primary responsibilities
//! - **Ids**: opaque item and sub-shape identities.
//! - **Geometry**: `f64` world-unit points and axis-aligned rectangles.
//! - **Events**: normalized pointer/key/probe input.
//! - **Data model**: node/edge/combo snapshots and per-edge routing config.
//! - **Host contracts**: the read/write traits a hosting runtime
//!   implements, plus the cancellation pair used by asynchronous queries.
//!
//! # How it fits in the system
//! Hosts implement the traits in [`graph`] and [`shape`], translate their
//! native input into [`event`] values, and hand both to the behaviors in
//! `tangle-interact`. Nothing in this crate does I/O.

pub mod cancellation;
pub mod data;
pub mod event;
pub mod geometry;
pub mod graph;
pub mod id;
pub mod logging;
pub mod shape;

#[cfg(feature = "test-helpers")]
pub mod testing;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

pub use cancellation::{CancellationSource, CancellationToken};
pub use data::{ArrowConfig, ComboData, EdgeData, EdgeRouting, NodeData, RouteStrategy};
pub use event::{
    DropTarget, InputEvent, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent,
    PointerKind, ProbeEvent, ProbeId,
};
pub use geometry::{Point, Rect};
pub use graph::{GraphEvent, GraphHost, GraphView, PositionUpdate, TransientKey, TransientSpec};
pub use id::{ItemId, ItemKind, ShapeId};
pub use shape::{ShapePayload, ShapeSink, ShapeSpec, ShapeStyle};
