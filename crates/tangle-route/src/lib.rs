#![forbid(unsafe_code)]

//! Obstacle-aware orthogonal edge routing.
//!
//! # Role in Tangle
//! `tangle-route` turns an edge's anchor pair into an axis-aligned
//! polyline that stays clear of third-party node boxes. It is a pure
//! function over snapshots: no graph access, no I/O, no clocks.
//!
//! # Primary responsibilities
//! - **Obstacle snapshots**: [`ObstacleSet`] captures id-to-box lookups
//!   from a [`tangle_core::GraphView`] or from explicit boxes.
//! - **Search**: grid A* with Manhattan costs, a turn penalty, and a
//!   bounded expansion budget.
//! - **Graceful degradation**: any query the search cannot answer
//!   returns the caller's polyline unchanged instead of an error.
//!
//! # How it fits in the system
//! `tangle-render` calls [`route`] before building path geometry when
//! an edge asks for the avoidance strategy; `tangle-interact` relies on
//! the same call path when live-redrawing edges during a drag.

pub mod obstacles;
pub mod router;

pub use obstacles::{ObstacleBox, ObstacleSet};
pub use router::{RouterConfig, route};
