#![forbid(unsafe_code)]

//! Host contracts: what the surrounding graph runtime provides.
//!
//! The interaction core never owns graph data. It reads through
//! [`GraphView`] and writes through [`GraphHost`]; both are implemented by
//! the hosting runtime. The split keeps routing and rendering code honest
//! (they take `&dyn GraphView` and cannot mutate) and gives tests a single
//! seam to fake.
//!
//! # Contract notes
//!
//! - Lookups return owned snapshots, not references; callers may hold them
//!   across their own mutations.
//! - All write operations apply synchronously before returning. The one
//!   asynchronous operation is [`GraphHost::request_hit_test`], answered
//!   later through an [`InputEvent::Probe`](crate::event::InputEvent)
//!   dispatch.
//! - Operations on unknown ids are no-ops on the host side; callers that
//!   care log and skip (missing entities never abort a gesture).

use crate::cancellation::CancellationToken;
use crate::data::{ComboData, EdgeData, NodeData};
use crate::event::ProbeId;
use crate::geometry::{Point, Rect};
use crate::id::{ItemId, ShapeId};
use crate::shape::ShapeSpec;

/// One item's position move in a batch update.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    pub id: ItemId,
    pub position: Point,
}

impl PositionUpdate {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// A named event emitted toward the surrounding application.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEvent {
    pub name: String,
    pub item_ids: Vec<ItemId>,
}

impl GraphEvent {
    #[must_use]
    pub fn new(name: impl Into<String>, item_ids: Vec<ItemId>) -> Self {
        Self {
            name: name.into(),
            item_ids,
        }
    }
}

/// Key identifying one primitive on the transient overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransientKey {
    /// Overlay stand-in for a real item.
    Item(ItemId),

    /// The synthetic drag rectangle used by delegate mode.
    Delegate,
}

/// A primitive drawn on the transient overlay.
///
/// Drawing with an existing key replaces that primitive (upsert), which is
/// what lets the drag loop re-emit moving copies every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientSpec {
    pub key: TransientKey,
    pub shape: ShapeSpec,
}

impl TransientSpec {
    #[must_use]
    pub fn new(key: TransientKey, shape: ShapeSpec) -> Self {
        Self { key, shape }
    }
}

/// Read access to the host's graph store.
pub trait GraphView {
    fn node(&self, id: &ItemId) -> Option<NodeData>;

    fn edge(&self, id: &ItemId) -> Option<EdgeData>;

    fn combo(&self, id: &ItemId) -> Option<ComboData>;

    /// Rendered bounding box of any item kind.
    fn bounds(&self, id: &ItemId) -> Option<Rect>;

    /// Every node id, sorted ascending. Obstacle snapshots are built from
    /// this, so the ordering contract keeps routing deterministic.
    fn node_ids(&self) -> Vec<ItemId>;

    /// Edges touching the given node, sorted ascending.
    fn related_edges(&self, id: &ItemId) -> Vec<ItemId>;

    /// Nodes sharing an edge with the given node, sorted ascending.
    fn neighbors(&self, id: &ItemId) -> Vec<ItemId>;

    /// Edges whose geometry passes near `area`. Real hosts back this with
    /// a spatial index (quad-tree); ordering must be ascending by id.
    fn edges_near(&self, area: Rect) -> Vec<ItemId>;

    fn is_visible(&self, id: &ItemId) -> bool;

    /// The currently visible sub-shape ids of an item. Empty for hidden
    /// or unknown items.
    fn visible_shapes(&self, id: &ItemId) -> Vec<ShapeId>;

    fn has_state(&self, id: &ItemId, state: &str) -> bool;

    /// Every item currently carrying `state`, sorted ascending.
    fn items_with_state(&self, state: &str) -> Vec<ItemId>;
}

/// Write access to the host's graph store.
pub trait GraphHost: GraphView {
    /// Batch position write. With `update_combo_bounds` set, the host also
    /// refreshes ancestor combo geometry before returning.
    fn update_positions(&mut self, moves: &[PositionUpdate], update_combo_bounds: bool);

    /// Structural parent change (combo membership). Atomic per item: no
    /// observer sees a half-applied move between groups.
    fn set_parent(&mut self, id: &ItemId, parent: Option<&ItemId>);

    /// Show or hide the listed sub-shapes of an item.
    fn set_visibility(&mut self, id: &ItemId, shapes: &[ShapeId], visible: bool);

    fn draw_transient(&mut self, spec: TransientSpec);

    fn remove_transient(&mut self, key: &TransientKey);

    /// Raise an item to the front of its layer.
    fn raise(&mut self, id: &ItemId);

    fn set_state(&mut self, id: &ItemId, state: &str, on: bool);

    fn emit(&mut self, event: GraphEvent);

    /// Begin an asynchronous hit test for the topmost item at `point`,
    /// ignoring the items in `exclude`. The host answers by dispatching an
    /// [`InputEvent::Probe`](crate::event::InputEvent) carrying `probe`; a
    /// cancelled `token` means the requester no longer needs the answer
    /// (the host may skip the work, and a late answer is discarded).
    fn request_hit_test(
        &mut self,
        point: Point,
        exclude: &[ItemId],
        probe: ProbeId,
        token: CancellationToken,
    );
}
