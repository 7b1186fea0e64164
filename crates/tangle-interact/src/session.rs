#![forbid(unsafe_code)]

//! Per-gesture caches of the drag machine.
//!
//! A [`DragSession`] is built when the movement threshold is exceeded and
//! dropped when the machine returns to Idle; nothing here outlives one
//! gesture. The machine is the sole owner, these types only carry state and
//! the handful of derived lookups the handlers share.

use ahash::AHashSet;
use web_time::Instant;

use tangle_core::cancellation::CancellationSource;
use tangle_core::event::{DropTarget, ProbeId};
use tangle_core::geometry::{Point, Rect};
use tangle_core::graph::PositionUpdate;
use tangle_core::id::ItemId;

use crate::config::DragModes;
use crate::ledger::VisibilityLedger;
use crate::timing::{Debounce, Throttle};

/// One dragged node: identity plus its pre-gesture snapshot.
#[derive(Debug, Clone)]
pub struct DragTarget {
    pub id: ItemId,
    /// Position at drag entry; deltas and rollbacks are relative to this.
    pub origin: Point,
    /// Bounds at drag entry, for delegate/transient copies and the
    /// near-edge query area.
    pub bounds: Rect,
}

/// State of one in-flight drag gesture.
#[derive(Debug)]
pub struct DragSession {
    /// Pointer position at the qualifying pointer-down.
    pub origin: Point,
    pub modes: DragModes,
    pub targets: Vec<DragTarget>,
    /// Edges touching any target, sorted, deduped at drag entry.
    pub related_edges: Vec<ItemId>,
    /// Cumulative pointer delta from `origin`.
    pub delta: (f64, f64),
    /// Any target carries the prevent-overlap marker.
    pub prevent_overlap: bool,
    /// Items hidden during this gesture, with their restore snapshots.
    pub ledger: VisibilityLedger,
    /// Near edges currently hidden by the overlap-prevention pass.
    pub near_hidden: AHashSet<ItemId>,
    /// Gate for live position writes.
    pub throttle: Throttle<(f64, f64)>,
}

impl DragSession {
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.targets.iter().map(|t| t.id.clone()).collect()
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.targets.iter().any(|t| &t.id == id)
    }

    /// Union of the pre-gesture target bounds. Empty when there are no
    /// targets, which the machine never allows.
    #[must_use]
    pub fn union_bounds(&self) -> Rect {
        let mut iter = self.targets.iter();
        let Some(first) = iter.next() else {
            return Rect::default();
        };
        iter.fold(first.bounds, |acc, t| acc.union(&t.bounds))
    }

    /// Union bounds translated by the current delta.
    #[must_use]
    pub fn moved_bounds(&self) -> Rect {
        let (dx, dy) = self.delta;
        self.union_bounds().translate(dx, dy)
    }

    /// Position updates placing every target at origin plus `delta`.
    #[must_use]
    pub fn positions_at(&self, delta: (f64, f64)) -> Vec<PositionUpdate> {
        self.targets
            .iter()
            .map(|t| PositionUpdate::new(t.id.clone(), t.origin.translate(delta.0, delta.1)))
            .collect()
    }

    /// Position updates restoring every target to its origin.
    #[must_use]
    pub fn origin_positions(&self) -> Vec<PositionUpdate> {
        self.positions_at((0.0, 0.0))
    }

    /// The snapshot for one dragged id, if it is part of this gesture.
    #[must_use]
    pub fn target(&self, id: &ItemId) -> Option<&DragTarget> {
        self.targets.iter().find(|t| &t.id == id)
    }
}

/// An outstanding drop-target probe.
#[derive(Debug)]
pub struct PendingProbe {
    pub id: ProbeId,
    /// Instant after which the answer is no longer waited for.
    pub deadline: Instant,
    pub source: CancellationSource,
}

/// State between pointer-up and the restore pass.
#[derive(Debug)]
pub struct SettleState {
    pub session: DragSession,
    /// Collapses rapid repeated releases into one restore.
    pub debounce: Debounce<()>,
    pub debounce_done: bool,
    /// Outstanding probe; `None` once answered, timed out, or never issued.
    pub probe: Option<PendingProbe>,
    /// Probe answer. `Some(None)` means bare canvas under the drop point.
    pub resolved: Option<Option<DropTarget>>,
}

impl SettleState {
    /// Whether the settle is no longer waiting on the drop probe.
    #[must_use]
    pub fn probe_settled(&self) -> bool {
        self.probe.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DragConfig;
    use web_time::Duration;

    fn target(id: &str, x: f64, y: f64) -> DragTarget {
        DragTarget {
            id: ItemId::new(id),
            origin: Point::new(x, y),
            bounds: Rect::from_center(Point::new(x, y), 20.0, 20.0),
        }
    }

    fn session(targets: Vec<DragTarget>) -> DragSession {
        DragSession {
            origin: Point::ZERO,
            modes: DragConfig::default().resolve_modes(),
            targets,
            related_edges: Vec::new(),
            delta: (0.0, 0.0),
            prevent_overlap: false,
            ledger: VisibilityLedger::new(),
            near_hidden: AHashSet::new(),
            throttle: Throttle::new(Duration::ZERO),
        }
    }

    #[test]
    fn union_bounds_cover_all_targets() {
        let s = session(vec![target("a", 0.0, 0.0), target("b", 100.0, 50.0)]);
        let bounds = s.union_bounds();
        assert_eq!(bounds, Rect::new(-10.0, -10.0, 120.0, 70.0));
    }

    #[test]
    fn moved_bounds_follow_delta() {
        let mut s = session(vec![target("a", 0.0, 0.0)]);
        s.delta = (30.0, -5.0);
        assert_eq!(s.moved_bounds(), Rect::new(20.0, -15.0, 20.0, 20.0));
    }

    #[test]
    fn positions_at_offset_every_origin() {
        let s = session(vec![target("a", 10.0, 10.0), target("b", 50.0, 0.0)]);
        let moves = s.positions_at((5.0, -5.0));
        assert_eq!(moves[0].position, Point::new(15.0, 5.0));
        assert_eq!(moves[1].position, Point::new(55.0, -5.0));
        assert_eq!(s.origin_positions()[0].position, Point::new(10.0, 10.0));
    }
}
