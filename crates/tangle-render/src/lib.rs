#![forbid(unsafe_code)]

//! Edge geometry building and sub-shape rendering.
//!
//! # Role in Tangle
//! `tangle-render` turns a routed polyline into drawable geometry and
//! keeps an edge's sub-shapes in sync with its model. It writes through
//! the [`tangle_core::ShapeSink`] trait and never touches the graph
//! directly.
//!
//! # Primary responsibilities
//! - **Path building**: [`build_path`] rounds interior corners with a
//!   per-corner clamped radius and encodes to SVG path syntax.
//! - **Edge drawing**: [`EdgeRenderer::draw_edge`] decides whether the
//!   router runs, upserts the key path, and reconciles halo, arrows,
//!   label, and icon against what the model declares.
//!
//! # How it fits in the system
//! Hosts call the renderer on every edge (re)draw; `tangle-interact`
//! calls the same entry points when live-redrawing edges around a drag.

pub mod edge;
pub mod path;

pub use edge::EdgeRenderer;
pub use path::{PathPrimitive, PathSegment, build_path};
