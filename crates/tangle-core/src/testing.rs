#![forbid(unsafe_code)]

//! In-memory reference host for tests.
//!
//! [`MemoryGraph`] implements [`GraphView`], [`GraphHost`], and
//! [`ShapeSink`] over plain maps, with enough introspection (event log,
//! transient registry, hit-test request queue, write counters) to assert
//! on everything the interaction core does. It applies writes
//! synchronously and resolves spatial queries by brute force; fidelity,
//! not speed, is the point.
//!
//! ```
//! use tangle_core::geometry::Point;
//! use tangle_core::data::NodeData;
//! use tangle_core::graph::GraphView;
//! use tangle_core::testing::MemoryGraph;
//!
//! let mut graph = MemoryGraph::new();
//! graph.add_node(NodeData::new("a", Point::new(10.0, 10.0)).with_size(40.0, 40.0));
//! assert!(graph.node(&"a".into()).is_some());
//! assert_eq!(graph.node_ids(), vec!["a".into()]);
//! ```

use ahash::AHashMap;

use crate::cancellation::CancellationToken;
use crate::data::{ComboData, EdgeData, NodeData};
use crate::event::{DropTarget, ProbeId};
use crate::geometry::{Point, Rect};
use crate::graph::{GraphEvent, GraphHost, GraphView, PositionUpdate, TransientKey, TransientSpec};
use crate::id::{ItemId, ItemKind, ShapeId};
use crate::shape::{ShapeSink, ShapeSpec};

/// Padding added around children when recomputing combo bounds.
const COMBO_PADDING: f64 = 10.0;

/// A recorded asynchronous hit-test request.
///
/// Tests answer these by building a
/// [`ProbeEvent`](crate::event::ProbeEvent) from the stored probe id and
/// whatever `MemoryGraph::hit_test_topmost` returns for the point.
#[derive(Debug)]
pub struct HitRequest {
    pub point: Point,
    pub exclude: Vec<ItemId>,
    pub probe: ProbeId,
    pub token: CancellationToken,
}

/// In-memory graph store implementing the host contracts.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: AHashMap<ItemId, NodeData>,
    edges: AHashMap<ItemId, EdgeData>,
    combos: AHashMap<ItemId, ComboData>,
    /// Currently visible sub-shape ids per item, in draw order.
    visible: AHashMap<ItemId, Vec<ShapeId>>,
    /// Committed sub-shapes per item (from the `ShapeSink` impl).
    shapes: AHashMap<ItemId, Vec<ShapeSpec>>,
    transients: AHashMap<TransientKey, TransientSpec>,
    /// Bottom-to-top stacking order of all items.
    z_order: Vec<ItemId>,
    events: Vec<GraphEvent>,
    hit_requests: Vec<HitRequest>,
    raised: Vec<ItemId>,
    position_write_calls: usize,
    combo_bounds_refreshes: usize,
}

impl MemoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: NodeData) {
        let id = node.id.clone();
        self.visible
            .insert(id.clone(), if node.visible { vec![ShapeId::key()] } else { Vec::new() });
        self.nodes.insert(id.clone(), node);
        self.z_order.push(id);
    }

    pub fn add_edge(&mut self, edge: EdgeData) {
        let id = edge.id.clone();
        self.visible
            .insert(id.clone(), if edge.visible { vec![ShapeId::key()] } else { Vec::new() });
        self.edges.insert(id.clone(), edge);
        self.z_order.push(id);
    }

    pub fn add_combo(&mut self, combo: ComboData) {
        let id = combo.id.clone();
        self.visible
            .insert(id.clone(), if combo.visible { vec![ShapeId::key()] } else { Vec::new() });
        self.combos.insert(id.clone(), combo);
        self.z_order.push(id);
    }

    /// Override an item's visible sub-shape set (for tests that need more
    /// than the default `key` shape).
    pub fn set_visible_shapes(&mut self, id: &ItemId, shapes: Vec<ShapeId>) {
        let not_empty = !shapes.is_empty();
        self.visible.insert(id.clone(), shapes);
        self.set_item_visible_flag(id, not_empty);
    }

    /// Synchronous topmost-item resolution, the answer a real backend
    /// would compute for [`GraphHost::request_hit_test`].
    #[must_use]
    pub fn hit_test_topmost(&self, point: Point, exclude: &[ItemId]) -> Option<DropTarget> {
        for id in self.z_order.iter().rev() {
            if exclude.contains(id) || !self.is_visible(id) {
                continue;
            }
            let Some(bounds) = self.bounds(id) else {
                continue;
            };
            if bounds.contains(point) {
                let kind = self.kind_of(id)?;
                return Some(DropTarget {
                    id: id.clone(),
                    kind,
                });
            }
        }
        None
    }

    #[must_use]
    pub fn kind_of(&self, id: &ItemId) -> Option<ItemKind> {
        if self.nodes.contains_key(id) {
            Some(ItemKind::Node)
        } else if self.edges.contains_key(id) {
            Some(ItemKind::Edge)
        } else if self.combos.contains_key(id) {
            Some(ItemKind::Combo)
        } else {
            None
        }
    }

    #[must_use]
    pub fn node_position(&self, id: &ItemId) -> Option<Point> {
        self.nodes.get(id).map(|n| n.position)
    }

    #[must_use]
    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_hit_requests(&mut self) -> Vec<HitRequest> {
        std::mem::take(&mut self.hit_requests)
    }

    #[must_use]
    pub fn hit_request_count(&self) -> usize {
        self.hit_requests.len()
    }

    #[must_use]
    pub fn transient(&self, key: &TransientKey) -> Option<&TransientSpec> {
        self.transients.get(key)
    }

    #[must_use]
    pub fn transient_count(&self) -> usize {
        self.transients.len()
    }

    #[must_use]
    pub fn raised(&self) -> &[ItemId] {
        &self.raised
    }

    /// Number of `update_positions` calls received.
    #[must_use]
    pub fn position_write_calls(&self) -> usize {
        self.position_write_calls
    }

    /// Number of `update_positions` calls that also refreshed combo bounds.
    #[must_use]
    pub fn combo_bounds_refreshes(&self) -> usize {
        self.combo_bounds_refreshes
    }

    #[must_use]
    pub fn committed_shapes(&self, id: &ItemId) -> &[ShapeSpec] {
        self.shapes.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    fn set_item_visible_flag(&mut self, id: &ItemId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.visible = visible;
        } else if let Some(e) = self.edges.get_mut(id) {
            e.visible = visible;
        } else if let Some(c) = self.combos.get_mut(id) {
            c.visible = visible;
        }
    }

    fn edge_bbox(&self, edge: &EdgeData) -> Option<Rect> {
        let source = self.nodes.get(&edge.source)?;
        let target = self.nodes.get(&edge.target)?;
        let mut bbox = source.bounds.union(&target.bounds);
        for p in &edge.control_points {
            bbox = bbox.union(&Rect::new(p.x, p.y, 0.0, 0.0).inflate(1.0));
        }
        Some(bbox)
    }

    fn states_of(&self, id: &ItemId) -> Option<&Vec<String>> {
        if let Some(n) = self.nodes.get(id) {
            Some(&n.states)
        } else if let Some(e) = self.edges.get(id) {
            Some(&e.states)
        } else if let Some(c) = self.combos.get(id) {
            Some(&c.states)
        } else {
            None
        }
    }

    fn states_of_mut(&mut self, id: &ItemId) -> Option<&mut Vec<String>> {
        if let Some(n) = self.nodes.get_mut(id) {
            Some(&mut n.states)
        } else if let Some(e) = self.edges.get_mut(id) {
            Some(&mut e.states)
        } else if let Some(c) = self.combos.get_mut(id) {
            Some(&mut c.states)
        } else {
            None
        }
    }

    /// Recompute every combo's bounds from its direct children,
    /// deepest-first so nested combos settle before their parents.
    fn refresh_combo_bounds(&mut self) {
        let mut order: Vec<(usize, ItemId)> = self
            .combos
            .keys()
            .map(|id| (self.combo_depth(id), id.clone()))
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        for (_, combo_id) in order {
            let mut bbox = Rect::default();
            for node in self.nodes.values() {
                if node.parent.as_ref() == Some(&combo_id) {
                    bbox = bbox.union(&node.bounds);
                }
            }
            let child_combo_bounds: Vec<Rect> = self
                .combos
                .values()
                .filter(|c| c.parent.as_ref() == Some(&combo_id))
                .map(|c| c.bounds)
                .collect();
            for b in child_combo_bounds {
                bbox = bbox.union(&b);
            }
            if let Some(combo) = self.combos.get_mut(&combo_id) {
                if !bbox.is_empty() {
                    combo.bounds = bbox.inflate(COMBO_PADDING);
                    combo.position = combo.bounds.center();
                }
            }
        }
    }

    fn combo_depth(&self, id: &ItemId) -> usize {
        let mut depth = 0;
        let mut cursor = self.combos.get(id).and_then(|c| c.parent.clone());
        while let Some(parent) = cursor {
            depth += 1;
            if depth > self.combos.len() {
                break;
            }
            cursor = self.combos.get(&parent).and_then(|c| c.parent.clone());
        }
        depth
    }
}

impl GraphView for MemoryGraph {
    fn node(&self, id: &ItemId) -> Option<NodeData> {
        self.nodes.get(id).cloned()
    }

    fn edge(&self, id: &ItemId) -> Option<EdgeData> {
        self.edges.get(id).cloned()
    }

    fn combo(&self, id: &ItemId) -> Option<ComboData> {
        self.combos.get(id).cloned()
    }

    fn bounds(&self, id: &ItemId) -> Option<Rect> {
        if let Some(n) = self.nodes.get(id) {
            Some(n.bounds)
        } else if let Some(c) = self.combos.get(id) {
            Some(c.bounds)
        } else if let Some(e) = self.edges.get(id) {
            self.edge_bbox(e)
        } else {
            None
        }
    }

    fn node_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn related_edges(&self, id: &ItemId) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self
            .edges
            .values()
            .filter(|e| e.touches(id))
            .map(|e| e.id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn neighbors(&self, id: &ItemId) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self
            .edges
            .values()
            .filter_map(|e| e.opposite(id).cloned())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    fn edges_near(&self, area: Rect) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self
            .edges
            .values()
            .filter(|e| {
                self.edge_bbox(e)
                    .is_some_and(|bbox| bbox.intersects(&area))
            })
            .map(|e| e.id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn is_visible(&self, id: &ItemId) -> bool {
        self.visible.get(id).is_some_and(|shapes| !shapes.is_empty())
    }

    fn visible_shapes(&self, id: &ItemId) -> Vec<ShapeId> {
        self.visible.get(id).cloned().unwrap_or_default()
    }

    fn has_state(&self, id: &ItemId, state: &str) -> bool {
        self.states_of(id)
            .is_some_and(|states| states.iter().any(|s| s == state))
    }

    fn items_with_state(&self, state: &str) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self
            .nodes
            .values()
            .filter(|n| n.has_state(state))
            .map(|n| n.id.clone())
            .chain(
                self.edges
                    .values()
                    .filter(|e| e.has_state(state))
                    .map(|e| e.id.clone()),
            )
            .chain(
                self.combos
                    .values()
                    .filter(|c| c.states.iter().any(|s| s == state))
                    .map(|c| c.id.clone()),
            )
            .collect();
        ids.sort();
        ids
    }
}

impl GraphHost for MemoryGraph {
    fn update_positions(&mut self, moves: &[PositionUpdate], update_combo_bounds: bool) {
        self.position_write_calls += 1;
        for mv in moves {
            if let Some(node) = self.nodes.get_mut(&mv.id) {
                let (dx, dy) = node.position.delta_to(mv.position);
                node.position = mv.position;
                node.bounds = node.bounds.translate(dx, dy);
            } else if let Some(combo) = self.combos.get_mut(&mv.id) {
                let (dx, dy) = combo.position.delta_to(mv.position);
                combo.position = mv.position;
                combo.bounds = combo.bounds.translate(dx, dy);
            }
        }
        if update_combo_bounds {
            self.combo_bounds_refreshes += 1;
            self.refresh_combo_bounds();
        }
    }

    fn set_parent(&mut self, id: &ItemId, parent: Option<&ItemId>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = parent.cloned();
        } else if let Some(combo) = self.combos.get_mut(id) {
            combo.parent = parent.cloned();
        }
    }

    fn set_visibility(&mut self, id: &ItemId, shapes: &[ShapeId], visible: bool) {
        let Some(current) = self.visible.get_mut(id) else {
            return;
        };
        if visible {
            for shape in shapes {
                if !current.contains(shape) {
                    current.push(shape.clone());
                }
            }
        } else {
            current.retain(|s| !shapes.contains(s));
        }
        let not_empty = self.visible.get(id).is_some_and(|v| !v.is_empty());
        self.set_item_visible_flag(id, not_empty);
    }

    fn draw_transient(&mut self, spec: TransientSpec) {
        self.transients.insert(spec.key.clone(), spec);
    }

    fn remove_transient(&mut self, key: &TransientKey) {
        self.transients.remove(key);
    }

    fn raise(&mut self, id: &ItemId) {
        if let Some(pos) = self.z_order.iter().position(|z| z == id) {
            let item = self.z_order.remove(pos);
            self.z_order.push(item);
            self.raised.push(id.clone());
        }
    }

    fn set_state(&mut self, id: &ItemId, state: &str, on: bool) {
        if let Some(states) = self.states_of_mut(id) {
            if on {
                if !states.iter().any(|s| s == state) {
                    states.push(state.to_owned());
                }
            } else {
                states.retain(|s| s != state);
            }
        }
    }

    fn emit(&mut self, event: GraphEvent) {
        self.events.push(event);
    }

    fn request_hit_test(
        &mut self,
        point: Point,
        exclude: &[ItemId],
        probe: ProbeId,
        token: CancellationToken,
    ) {
        self.hit_requests.push(HitRequest {
            point,
            exclude: exclude.to_vec(),
            probe,
            token,
        });
    }
}

impl ShapeSink for MemoryGraph {
    fn upsert_shape(&mut self, owner: &ItemId, spec: ShapeSpec) {
        let shapes = self.shapes.entry(owner.clone()).or_default();
        match shapes.iter_mut().find(|s| s.id == spec.id) {
            Some(existing) => *existing = spec.clone(),
            None => shapes.push(spec.clone()),
        }
        let visible = self.visible.entry(owner.clone()).or_default();
        if !visible.contains(&spec.id) {
            visible.push(spec.id);
        }
        self.set_item_visible_flag(owner, true);
    }

    fn remove_shape(&mut self, owner: &ItemId, shape: &ShapeId) {
        if let Some(shapes) = self.shapes.get_mut(owner) {
            shapes.retain(|s| &s.id != shape);
        }
        if let Some(visible) = self.visible.get_mut(owner) {
            visible.retain(|s| s != shape);
        }
    }
}
