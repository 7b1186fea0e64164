#![forbid(unsafe_code)]

//! Stable identities for graph items and their sub-shapes.
//!
//! Items (nodes, edges, combos) and the individual shapes that render them
//! are addressed by opaque string ids supplied by the host. The newtypes
//! here exist so the two id spaces cannot be mixed up at a call site.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque identity of a graph item (node, edge, or combo).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity of one sub-shape within an item's rendered group.
///
/// The renderer uses a fixed vocabulary for the shapes it manages; see the
/// associated constructors. Hosts may add further shapes of their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeId(String);

impl ShapeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The main visual primitive of an item.
    #[must_use]
    pub fn key() -> Self {
        Self::new("key")
    }

    /// Wide low-opacity stroke drawn beneath the key shape.
    #[must_use]
    pub fn halo() -> Self {
        Self::new("halo")
    }

    /// Text label.
    #[must_use]
    pub fn label() -> Self {
        Self::new("label")
    }

    /// Small icon marker.
    #[must_use]
    pub fn icon() -> Self {
        Self::new("icon")
    }

    /// Arrow decoration at the source end of an edge.
    #[must_use]
    pub fn arrow_source() -> Self {
        Self::new("arrow-source")
    }

    /// Arrow decoration at the target end of an edge.
    #[must_use]
    pub fn arrow_target() -> Self {
        Self::new("arrow-target")
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which family an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemKind {
    Node,
    Edge,
    Combo,
}
