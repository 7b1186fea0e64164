#![forbid(unsafe_code)]

//! Ledger of items hidden during a gesture.
//!
//! Every hide records the item's visible sub-shape set exactly once, so
//! the restore pass can bring back precisely what the gesture removed.
//! Re-hiding an already-recorded id keeps the original snapshot; taking
//! an id back out (mid-gesture restore) forgets it, so a later re-hide
//! snapshots afresh.

use ahash::AHashSet;

use tangle_core::{ItemId, ShapeId};

/// Append-only-then-drained record of hidden items.
#[derive(Debug, Clone, Default)]
pub struct VisibilityLedger {
    entries: Vec<(ItemId, Vec<ShapeId>)>,
    recorded: AHashSet<ItemId>,
}

impl VisibilityLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` with its visible sub-shape snapshot.
    ///
    /// Returns `false` when the id was already recorded; the original
    /// snapshot wins.
    pub fn record(&mut self, id: ItemId, shapes: Vec<ShapeId>) -> bool {
        if !self.recorded.insert(id.clone()) {
            return false;
        }
        self.entries.push((id, shapes));
        true
    }

    /// Remove and return one entry, for mid-gesture restores.
    /// Unknown ids return `None`.
    pub fn take(&mut self, id: &ItemId) -> Option<Vec<ShapeId>> {
        let idx = self.entries.iter().position(|(entry, _)| entry == id)?;
        self.recorded.remove(id);
        Some(self.entries.remove(idx).1)
    }

    /// Drain every remaining entry in the order it was recorded. The
    /// ledger is empty afterwards; draining again yields nothing.
    pub fn drain(&mut self) -> Vec<(ItemId, Vec<ShapeId>)> {
        self.recorded.clear();
        std::mem::take(&mut self.entries)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.recorded.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ItemId {
        ItemId::new(name)
    }

    #[test]
    fn first_record_wins() {
        let mut ledger = VisibilityLedger::new();
        assert!(ledger.record(id("a"), vec![ShapeId::key(), ShapeId::label()]));
        assert!(!ledger.record(id("a"), vec![ShapeId::key()]));
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.take(&id("a")),
            Some(vec![ShapeId::key(), ShapeId::label()])
        );
    }

    #[test]
    fn take_unknown_is_noop() {
        let mut ledger = VisibilityLedger::new();
        ledger.record(id("a"), vec![ShapeId::key()]);
        assert_eq!(ledger.take(&id("missing")), None);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn take_forgets_so_rehide_snapshots_afresh() {
        let mut ledger = VisibilityLedger::new();
        ledger.record(id("a"), vec![ShapeId::key(), ShapeId::halo()]);
        assert_eq!(ledger.take(&id("a")), Some(vec![ShapeId::key(), ShapeId::halo()]));
        assert!(!ledger.contains(&id("a")));
        assert!(ledger.record(id("a"), vec![ShapeId::key()]));
        assert_eq!(ledger.take(&id("a")), Some(vec![ShapeId::key()]));
    }

    #[test]
    fn drain_preserves_record_order_and_empties() {
        let mut ledger = VisibilityLedger::new();
        ledger.record(id("c"), vec![ShapeId::key()]);
        ledger.record(id("a"), vec![ShapeId::key()]);
        ledger.record(id("b"), vec![ShapeId::key()]);
        ledger.take(&id("a"));

        let drained = ledger.drain();
        let order: Vec<&str> = drained.iter().map(|(entry, _)| entry.as_str()).collect();
        assert_eq!(order, ["c", "b"]);
        assert!(ledger.is_empty());
        assert!(ledger.drain().is_empty());
    }
}
