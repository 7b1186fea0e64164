#![forbid(unsafe_code)]

//! Graph data model: nodes, edges, combos, and per-edge routing options.
//!
//! These are snapshot types. Hosts own the authoritative store and hand
//! out owned copies through [`crate::graph::GraphView`]; the drag machine
//! and renderer never hold references into host state across frames.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::id::ItemId;

/// Named routing strategies recognized by the edge renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RouteStrategy {
    /// Straight polyline through the given control points.
    #[default]
    Direct,

    /// Axis-aligned polyline; obstacle avoidance applies when enabled.
    Orthogonal,
}

/// Per-edge routing configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeRouting {
    pub strategy: RouteStrategy,
    pub avoid_obstacles: bool,
    /// Corner rounding radius applied by the path builder.
    pub corner_radius: f64,
    /// Clearance kept around obstacle boxes while routing.
    pub offset: f64,
}

impl Default for EdgeRouting {
    fn default() -> Self {
        Self {
            strategy: RouteStrategy::Direct,
            avoid_obstacles: false,
            corner_radius: 0.0,
            offset: 2.0,
        }
    }
}

impl EdgeRouting {
    /// Orthogonal routing with obstacle avoidance on.
    #[must_use]
    pub fn orthogonal_avoiding() -> Self {
        Self {
            strategy: RouteStrategy::Orthogonal,
            avoid_obstacles: true,
            ..Self::default()
        }
    }

    /// Whether this configuration asks for the avoidance router at all.
    #[must_use]
    pub fn avoidance_active(&self) -> bool {
        self.strategy == RouteStrategy::Orthogonal && self.avoid_obstacles
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: RouteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_avoid_obstacles(mut self, avoid: bool) -> Self {
        self.avoid_obstacles = avoid;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// Arrow decorations at the ends of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrowConfig {
    pub source: bool,
    pub target: bool,
    /// Arrow head length in world units.
    pub size: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            source: false,
            target: true,
            size: 8.0,
        }
    }
}

/// Snapshot of one node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeData {
    pub id: ItemId,
    pub position: Point,
    /// Bounding box of the rendered shapes, derived by the host.
    pub bounds: Rect,
    /// Combo this node belongs to, if any.
    pub parent: Option<ItemId>,
    pub visible: bool,
    /// Active state names, e.g. `"selected"`.
    pub states: Vec<String>,
    /// Marks this node as one whose drags re-route nearby avoidance edges.
    pub prevent_overlap: bool,
}

impl NodeData {
    /// A visible, parentless node with zero-size bounds. Hosts fill in
    /// real bounds once the node has been measured.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            bounds: Rect::from_center(position, 0.0, 0.0),
            parent: None,
            visible: true,
            states: Vec::new(),
            prevent_overlap: false,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.bounds = Rect::from_center(self.position, width, height);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ItemId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.states.push(state.into());
        self
    }

    #[must_use]
    pub fn with_prevent_overlap(mut self, prevent: bool) -> Self {
        self.prevent_overlap = prevent;
        self
    }

    #[must_use]
    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }
}

/// Snapshot of one edge.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeData {
    pub id: ItemId,
    pub source: ItemId,
    pub target: ItemId,
    /// Explicit interior waypoints; empty means none.
    pub control_points: Vec<Point>,
    pub routing: EdgeRouting,
    pub visible: bool,
    pub states: Vec<String>,
    /// Declarative sub-shape markers consumed by the edge renderer.
    pub label: Option<String>,
    pub icon: bool,
    pub halo: bool,
    pub arrows: ArrowConfig,
}

impl EdgeData {
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        source: impl Into<ItemId>,
        target: impl Into<ItemId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            control_points: Vec::new(),
            routing: EdgeRouting::default(),
            visible: true,
            states: Vec::new(),
            label: None,
            icon: false,
            halo: false,
            arrows: ArrowConfig::default(),
        }
    }

    #[must_use]
    pub fn with_routing(mut self, routing: EdgeRouting) -> Self {
        self.routing = routing;
        self
    }

    #[must_use]
    pub fn with_control_points(mut self, points: Vec<Point>) -> Self {
        self.control_points = points;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_halo(mut self, halo: bool) -> Self {
        self.halo = halo;
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: bool) -> Self {
        self.icon = icon;
        self
    }

    #[must_use]
    pub fn with_arrows(mut self, arrows: ArrowConfig) -> Self {
        self.arrows = arrows;
        self
    }

    #[must_use]
    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    /// The other endpoint, given one of this edge's endpoints.
    #[must_use]
    pub fn opposite(&self, id: &ItemId) -> Option<&ItemId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Whether `id` is one of this edge's endpoints.
    #[must_use]
    pub fn touches(&self, id: &ItemId) -> bool {
        &self.source == id || &self.target == id
    }
}

/// Snapshot of one combo (hierarchical grouping item).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComboData {
    pub id: ItemId,
    pub position: Point,
    pub bounds: Rect,
    /// Enclosing combo, if nested.
    pub parent: Option<ItemId>,
    pub visible: bool,
    pub states: Vec<String>,
}

impl ComboData {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            bounds: Rect::from_center(position, 0.0, 0.0),
            parent: None,
            visible: true,
            states: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.bounds = Rect::from_center(self.position, width, height);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ItemId>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
