#![forbid(unsafe_code)]

//! Obstacle snapshots consumed by the router.

use ahash::AHashMap;

use tangle_core::{GraphView, ItemId, Rect};

/// One routable obstacle: an item id and its world-space bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleBox {
    pub id: ItemId,
    pub bounds: Rect,
}

impl ObstacleBox {
    #[must_use]
    pub const fn new(id: ItemId, bounds: Rect) -> Self {
        Self { id, bounds }
    }
}

/// Immutable id-indexed set of obstacle boxes.
///
/// Boxes are kept sorted by id so that iteration order, and therefore the
/// routing result, does not depend on insertion order.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    boxes: Vec<ObstacleBox>,
    index: AHashMap<ItemId, usize>,
}

impl ObstacleSet {
    /// Snapshot every node the view exposes, skipping unsized items.
    pub fn from_view(view: &dyn GraphView) -> Self {
        let mut boxes = Vec::new();
        for id in view.node_ids() {
            if let Some(node) = view.node(&id)
                && !node.bounds.is_empty()
            {
                boxes.push(ObstacleBox::new(id, node.bounds));
            }
        }
        Self::from_boxes(boxes)
    }

    /// Build the set from explicit boxes. Later duplicates of an id are
    /// dropped.
    #[must_use]
    pub fn from_boxes(mut boxes: Vec<ObstacleBox>) -> Self {
        boxes.sort_by(|a, b| a.id.cmp(&b.id));
        boxes.dedup_by(|a, b| a.id == b.id);
        let index = boxes
            .iter()
            .enumerate()
            .map(|(idx, obstacle)| (obstacle.id.clone(), idx))
            .collect();
        Self { boxes, index }
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Rect> {
        self.index.get(id).map(|&idx| &self.boxes[idx].bounds)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObstacleBox> {
        self.boxes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
